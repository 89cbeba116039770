//! Config module tests
//!
//! - State store directories, load/save and backup pruning
//! - Transactions: commit, rollback, first-save handling
//! - Sparse state capture and replay

#[cfg(test)]
mod transaction_tests;
