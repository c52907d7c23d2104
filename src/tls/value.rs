//! Option value helpers
//!
//! `duplicate_value` and `destroy_value` have the shape of the
//! [`OptionHandler`](crate::option_handler::OptionHandler) clone and destroy
//! callbacks, so an adapter can store the TLS options in a snapshot without
//! the snapshot knowing anything about them. Adapters with options of their
//! own call `duplicate_value` first and fall back to their own copy on
//! [`OptionError::NotHandled`]. `destroy_value` always consumes the value, so
//! an adapter releasing values of its own must route by name (for example
//! with [`OptionName::from_name`]) before handing a value over.

use super::error::{OptionError, Result};
use super::names::OptionName;

/// Copy a value for one of the recognized TLS options
///
/// The value is copied verbatim into a fresh allocation.
pub fn duplicate_value(name: &str, value: &str) -> Result<String> {
    match OptionName::from_name(name) {
        Some(option) => copy_value(option, value),
        None => Err(OptionError::NotHandled(name.to_string())),
    }
}

/// Release a value previously produced by [`duplicate_value`]
///
/// Ownership of `value` is taken in every case; an unrecognized name still
/// reports [`OptionError::NotHandled`] so the caller knows the value was not
/// one of ours.
pub fn destroy_value(name: &str, value: String) -> Result<()> {
    drop(value);
    match OptionName::from_name(name) {
        Some(_) => Ok(()),
        None => Err(OptionError::NotHandled(name.to_string())),
    }
}

/// Fallible deep copy used for every stored or exported value
pub(crate) fn copy_value(option: OptionName, value: &str) -> Result<String> {
    let mut copy = String::new();
    if copy.try_reserve_exact(value.len()).is_err() {
        tracing::error!(option = %option, len = value.len(), "unable to copy option value");
        return Err(OptionError::AllocationFailure(option));
    }
    copy.push_str(value);
    Ok(copy)
}
