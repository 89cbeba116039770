//! Capture module tests
//!
//! - Keyboard/mouse session state machine
//! - Controller and joystick poll tasks
//! - Modifier tracking and countdown
