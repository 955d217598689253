//! Split a logical line into a property name and value.
//!
//! The name is everything before the first `:`, cut at the first `;` and uppercased.
//! Parameters such as `TZID=...` are dropped, so later stages only ever see the bare
//! value. The value is everything after the first `:`, trimmed.
//!
//! #### Warning
//!   No checks are made on the validity of either part.

use std::fmt;

use crate::{PARAM_DELIMITER, VALUE_DELIMITER};

/// A property extracted from one logical line.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct ContentLine {
    /// Property name, uppercased, without parameters.
    pub name: String,
    /// Trimmed property value.
    pub value: String,
}

impl ContentLine {
    /// Returns `None` when the line has no `:` delimiter.
    pub fn parse(line: &str) -> Option<Self> {
        let (head, value) = line.split_once(VALUE_DELIMITER)?;
        let name = head
            .split_once(PARAM_DELIMITER)
            .map_or(head, |(name, _params)| name);

        Some(Self {
            name: name.to_uppercase(),
            value: value.trim().to_owned(),
        })
    }
}

impl fmt::Display for ContentLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "name: {}\nvalue: {:?}", self.name, self.value)
    }
}
