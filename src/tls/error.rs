//! TLS option error types
//!
//! Every error here is local and non-fatal: a rejected option leaves the
//! aggregate exactly as it was, and the caller may keep setting others.

use super::names::OptionName;
use super::options::X509Flavor;
use crate::option_handler::HandlerError;

/// Result type for TLS option operations
pub type Result<T> = std::result::Result<T, OptionError>;

/// TLS option errors
#[derive(Debug, thiserror::Error)]
pub enum OptionError {
    /// A required argument was missing
    #[error("Invalid argument: {0} is missing")]
    InvalidArgument(&'static str),

    /// The owning adapter did not declare the capability for this option
    #[error("Option not supported: {0}")]
    Unsupported(OptionName),

    /// The X.509 field behind this option has already been written
    #[error("Option already set: {0}")]
    AlreadySet(OptionName),

    /// Standard and ECC X.509 material cannot be mixed
    #[error("x509 flavor conflict: requested {requested}, already committed to {committed}")]
    FlavorConflict {
        requested: X509Flavor,
        committed: X509Flavor,
    },

    /// The value could not be copied
    #[error("Unable to allocate copy of {0}")]
    AllocationFailure(OptionName),

    /// The name is not one of the recognized TLS options
    ///
    /// This is a routing signal rather than a failure: the caller should try
    /// its other option consumers.
    #[error("Option not handled: {0}")]
    NotHandled(String),

    /// Building the option snapshot failed
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] Box<HandlerError>),

    /// A capability list could not be parsed
    #[error("Invalid capability: {0}")]
    InvalidCapability(String),
}

impl OptionError {
    /// Check whether this is the "not handled" routing signal
    pub fn is_not_handled(&self) -> bool {
        matches!(self, OptionError::NotHandled(_))
    }
}

impl From<HandlerError> for OptionError {
    fn from(err: HandlerError) -> Self {
        OptionError::Snapshot(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_handled_is_routing_signal() {
        assert!(OptionError::NotHandled("HttpProxy".to_string()).is_not_handled());
        assert!(!OptionError::Unsupported(OptionName::TrustedCerts).is_not_handled());
        assert!(!OptionError::InvalidArgument("value").is_not_handled());
    }

    #[test]
    fn test_error_display() {
        let err = OptionError::FlavorConflict {
            requested: X509Flavor::Ecc,
            committed: X509Flavor::Standard,
        };
        assert_eq!(
            err.to_string(),
            "x509 flavor conflict: requested ECC, already committed to standard"
        );

        let err = OptionError::AlreadySet(OptionName::X509Key);
        assert_eq!(err.to_string(), "Option already set: x509privatekey");
    }

    #[test]
    fn test_handler_error_conversion() {
        let err: OptionError = HandlerError::Allocation("creating option list").into();
        assert!(matches!(err, OptionError::Snapshot(_)));
    }
}
