// Option Validation
//
// Checks an fstab option string against the option catalog. Options are
// checked in order and the first problem found is reported.

use crate::error::OptionsError;

use super::catalog::{TokenClass, classify};
use super::token::{MountOptionToken, MountOptions};

/// Validate an fstab option string: a nonempty, comma separated list of
/// `foo`, `nofoo` and `bar=baz` options (see nfs(5)).
pub fn validate(options: &str) -> Result<(), OptionsError> {
    if options.is_empty() {
        return Err(OptionsError::EmptyOptions);
    }

    MountOptions::parse(options)
        .tokens()
        .iter()
        .try_for_each(validate_token)
}

/// Like [`validate`], returning the error message, or an empty string if the
/// options are valid
pub fn validation_message(options: &str) -> String {
    match validate(options) {
        Ok(()) => String::new(),
        Err(e) => e.to_string(),
    }
}

fn validate_token(token: &MountOptionToken) -> Result<(), OptionsError> {
    let class = classify(&token.key);

    if class.is_flag() {
        return match &token.value {
            None => Ok(()),
            Some(value) => Err(OptionsError::UnexpectedValue {
                key: token.key.clone(),
                value: value.clone(),
            }),
        };
    }

    if class == TokenClass::Unknown {
        return Err(OptionsError::UnknownOption {
            key: token.key.clone(),
        });
    }

    match token.value.as_deref() {
        Some(value) if value.contains('=') => Err(OptionsError::InvalidOption {
            option: token.to_string(),
        }),
        None | Some("") => Err(OptionsError::EmptyValue {
            key: token.key.clone(),
        }),
        Some(_) => Ok(()),
    }
}
