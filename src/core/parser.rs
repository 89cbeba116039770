// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/core/parser.rs
//!
//! Bind string parsing
//!
//! Two textual forms are handled here:
//! - Exported bind strings: `<prefix><index>_<tokens>`, e.g. `kb1_lctrl+f`
//!   or `js2_button3`. The separator underscore is optional on input.
//! - Manual entry: `[<index>:]<tokens>`, e.g. `3:lalt+f` or plain `f`.
//!
//! # Architecture
//! The prefix grammars use nom combinators; everything after the prefix is
//! taken verbatim. Parsing is lenient on purpose: a string that does not
//! start with a device prefix is still a keyboard bind, and an unknown
//! two-letter prefix falls back to keyboard.

use nom::{
    bytes::complete::take_while_m_n,
    character::complete::{char, digit1, multispace0},
    combinator::{map_res, opt},
    IResult, Parser,
};
use thiserror::Error;

use crate::core::types::DeviceClass;

/// Manual entry errors
#[derive(Debug, Error, PartialEq)]
pub enum BindStringError {
    #[error("Bind entry is empty")]
    Empty,

    #[error("No bind after device index {0}")]
    MissingBind(u32),
}

/// A bind string split into device class, index and tokens
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedBind {
    pub device: DeviceClass,
    /// `None` when the string carried no `<prefix><index>` header
    pub device_index: Option<u32>,
    /// Tokens after the header, possibly empty
    pub bind: String,
}

/// A manual entry split into device index and tokens
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ManualEntry {
    pub device_index: u32,
    pub bind: String,
}

/// Two ASCII letters
fn device_prefix(input: &str) -> IResult<&str, &str> {
    take_while_m_n(2, 2, |c: char| c.is_ascii_alphabetic())(input)
}

fn device_number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |digits: &str| digits.parse::<u32>()).parse(input)
}

/// `<prefix><index>[_]`
fn bind_header(input: &str) -> IResult<&str, (&str, u32)> {
    let (input, prefix) = device_prefix(input)?;
    let (input, index) = device_number(input)?;
    let (input, _) = opt(char('_')).parse(input)?;
    Ok((input, (prefix, index)))
}

/// `<index>:` with optional surrounding whitespace
fn manual_index(input: &str) -> IResult<&str, u32> {
    let (input, _) = multispace0(input)?;
    let (input, index) = device_number(input)?;
    let (input, _) = (multispace0, char(':'), multispace0).parse(input)?;
    Ok((input, index))
}

/// Parses an exported bind string
///
/// # Examples
/// - `kb1_lctrl+f` → keyboard, index 1, `lctrl+f`
/// - `gp1_a` → controller, index 1, `a`
/// - `xx2_foo` → keyboard (unknown prefix), index 2, `foo`
/// - `w` → keyboard, no index, `w`
pub fn parse_bind_string(input: &str) -> ParsedBind {
    match bind_header(input) {
        Ok((rest, (prefix, index))) => {
            let device = DeviceClass::from_prefix(prefix).unwrap_or_else(|| {
                log::debug!("Unknown device prefix '{}', treating as keyboard", prefix);
                DeviceClass::Keyboard
            });
            ParsedBind {
                device,
                device_index: Some(index),
                bind: rest.to_string(),
            }
        }
        Err(_) => ParsedBind {
            device: DeviceClass::Keyboard,
            device_index: None,
            bind: input.to_string(),
        },
    }
}

/// Parses the manual entry field
///
/// The optional `<n>:` prefix selects the device index; a missing prefix or
/// an index of 0 means device 1. The tail is used verbatim (trimmed) with no
/// capture validation.
pub fn parse_manual_entry(input: &str) -> Result<ManualEntry, BindStringError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(BindStringError::Empty);
    }

    let (bind, device_index) = match manual_index(trimmed) {
        Ok((rest, index)) => (rest.trim(), index.max(1)),
        Err(_) => (trimmed, 1),
    };

    if bind.is_empty() {
        return Err(BindStringError::MissingBind(device_index));
    }

    Ok(ManualEntry {
        device_index,
        bind: bind.to_string(),
    })
}

/// Renders a slot as an exported bind string (`kb1_w`)
pub fn format_bind_string(device: DeviceClass, device_index: u32, bind: &str) -> String {
    format!("{}{}_{}", device.prefix(), device_index.max(1), bind)
}

/// Splits a bind into its `+`-separated tokens, dropping empty pieces
pub fn split_tokens(bind: &str) -> Vec<&str> {
    bind.split('+')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}
