// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// List of all errors.
///
/// Only produced while setting pattern attributes.
/// Resolving and rendering never fail.
#[derive(Debug)]
pub enum Error {
    /// Attribute is not a `pattern` element attribute.
    UnknownAttribute(String),

    /// Failed to parse an attribute value.
    InvalidValue {
        /// Attribute name.
        name: &'static str,
        /// Raw attribute value.
        value: String,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::UnknownAttribute(ref name) => {
                write!(f, "'{}' is not a pattern attribute", name)
            }
            Error::InvalidValue {
                name,
                ref value,
            } => {
                write!(f, "'{}' is not a valid '{}' value", value, name)
            }
        }
    }
}

impl std::error::Error for Error {}
