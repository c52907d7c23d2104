//! Generic name/value option list
//!
//! An `OptionHandler` records options as name/value pairs so they can be
//! replayed later onto another object, typically a freshly created or cloned
//! transport adapter. The handler does not interpret values: copying,
//! releasing and applying them is delegated to the three callbacks supplied
//! at creation.
//!
//! # Example
//!
//! ```
//! use tlsio_options::option_handler::OptionHandler;
//! use tlsio_options::tls::{self, Capabilities, TlsOptions};
//!
//! let mut handler = OptionHandler::create(tls::duplicate_value, tls::destroy_value, tls::apply_option)
//!     .unwrap();
//! handler.add_option("TrustedCerts", "CERTBLOB").unwrap();
//!
//! let mut options = TlsOptions::new(Capabilities::TRUSTED_CERTS);
//! handler.feed_options(&mut options).unwrap();
//! assert_eq!(options.trusted_certs(), Some("CERTBLOB"));
//! ```

use crate::tls::OptionError;
use std::fmt;

/// Copies a value before it is stored in the handler
pub type CloneOption = fn(name: &str, value: &str) -> crate::tls::Result<String>;

/// Releases a value owned by the handler
pub type DestroyOption = fn(name: &str, value: String) -> crate::tls::Result<()>;

/// Applies a stored value to a target
pub type SetOption<T> = fn(target: &mut T, name: &str, value: &str) -> crate::tls::Result<()>;

/// Number of entries reserved on creation
const INITIAL_CAPACITY: usize = 4;

/// Result type for option handler operations
pub type Result<T> = std::result::Result<T, HandlerError>;

/// Option handler errors
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("Invalid argument: {0}")]
    InvalidArg(&'static str),

    #[error("Allocation failed while {0}")]
    Allocation(&'static str),

    #[error("Failed to clone option {name}: {source}")]
    CloneFailed {
        name: String,
        #[source]
        source: OptionError,
    },

    #[error("Failed to destroy option {name}: {source}")]
    DestroyFailed {
        name: String,
        #[source]
        source: OptionError,
    },

    #[error("Failed to set option {name}: {source}")]
    FeedFailed {
        name: String,
        #[source]
        source: OptionError,
    },
}

struct OptionEntry {
    name: String,
    value: String,
}

/// Ordered list of named option values
///
/// Values are owned by the handler; dropping it hands every remaining value
/// to the destroy callback.
pub struct OptionHandler<T> {
    clone_option: CloneOption,
    destroy_option: DestroyOption,
    set_option: SetOption<T>,
    entries: Vec<OptionEntry>,
}

impl<T> OptionHandler<T> {
    /// Create an empty handler with the given callbacks
    pub fn create(
        clone_option: CloneOption,
        destroy_option: DestroyOption,
        set_option: SetOption<T>,
    ) -> Result<Self> {
        let mut entries = Vec::new();
        entries
            .try_reserve(INITIAL_CAPACITY)
            .map_err(|_| HandlerError::Allocation("creating option list"))?;

        Ok(OptionHandler {
            clone_option,
            destroy_option,
            set_option,
            entries,
        })
    }

    /// Store a copy of `value` under `name`
    ///
    /// Entries keep insertion order; adding a name twice keeps both.
    pub fn add_option(&mut self, name: &str, value: &str) -> Result<()> {
        if name.is_empty() {
            tracing::error!("option name is empty");
            return Err(HandlerError::InvalidArg("option name is empty"));
        }

        self.entries
            .try_reserve(1)
            .map_err(|_| HandlerError::Allocation("adding option"))?;

        let value = (self.clone_option)(name, value).map_err(|source| {
            tracing::error!(option = name, error = %source, "unable to clone option");
            HandlerError::CloneFailed {
                name: name.to_string(),
                source,
            }
        })?;

        self.entries.push(OptionEntry {
            name: name.to_string(),
            value,
        });
        Ok(())
    }

    /// Remove every entry stored under `name`
    ///
    /// Returns the number of entries removed. Each removed value is passed to
    /// the destroy callback; the first destroy failure is reported after all
    /// matching entries have been removed.
    pub fn remove_option(&mut self, name: &str) -> Result<usize> {
        if name.is_empty() {
            return Err(HandlerError::InvalidArg("option name is empty"));
        }

        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| entry.name == name);
        self.entries = kept;

        let count = removed.len();
        let mut first_error = None;
        for entry in removed {
            if let Err(source) = (self.destroy_option)(&entry.name, entry.value) {
                first_error.get_or_insert(HandlerError::DestroyFailed {
                    name: entry.name,
                    source,
                });
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(count),
        }
    }

    /// Apply every entry to `target`, in insertion order
    ///
    /// Stops at the first entry the set callback rejects.
    pub fn feed_options(&self, target: &mut T) -> Result<()> {
        for entry in &self.entries {
            (self.set_option)(target, &entry.name, &entry.value).map_err(|source| {
                tracing::error!(option = %entry.name, error = %source, "unable to set option");
                HandlerError::FeedFailed {
                    name: entry.name.clone(),
                    source,
                }
            })?;
        }
        Ok(())
    }

    /// Create an independent handler holding fresh copies of every entry
    pub fn try_clone(&self) -> Result<Self> {
        let mut clone = Self::create(self.clone_option, self.destroy_option, self.set_option)?;
        for entry in &self.entries {
            clone.add_option(&entry.name, &entry.value)?;
        }
        Ok(clone)
    }

    /// Get the first value stored under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value.as_str())
    }

    /// Iterate over `(name, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_str(), entry.value.as_str()))
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no entries are stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Drop for OptionHandler<T> {
    fn drop(&mut self) {
        for entry in self.entries.drain(..) {
            if let Err(e) = (self.destroy_option)(&entry.name, entry.value) {
                tracing::warn!(option = %entry.name, error = %e, "unable to destroy option");
            }
        }
    }
}

impl<T> fmt::Debug for OptionHandler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Names only; values may be secrets
        f.debug_struct("OptionHandler")
            .field("names", &self.entries.iter().map(|e| e.name.as_str()).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    thread_local! {
        static DESTROYED: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    fn copy_any(_name: &str, value: &str) -> crate::tls::Result<String> {
        Ok(value.to_string())
    }

    fn copy_refusing_secret(name: &str, value: &str) -> crate::tls::Result<String> {
        if name == "Secret" {
            Err(OptionError::NotHandled(name.to_string()))
        } else {
            Ok(value.to_string())
        }
    }

    fn record_destroy(name: &str, _value: String) -> crate::tls::Result<()> {
        DESTROYED.with(|d| d.borrow_mut().push(name.to_string()));
        Ok(())
    }

    fn push_pair(target: &mut Vec<(String, String)>, name: &str, value: &str) -> crate::tls::Result<()> {
        if name == "Rejected" {
            return Err(OptionError::NotHandled(name.to_string()));
        }
        target.push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn destroyed() -> Vec<String> {
        DESTROYED.with(|d| d.borrow_mut().drain(..).collect())
    }

    fn handler() -> OptionHandler<Vec<(String, String)>> {
        OptionHandler::create(copy_any, record_destroy, push_pair).unwrap()
    }

    #[test]
    fn test_add_and_get() {
        let mut h = handler();
        h.add_option("A", "1").unwrap();
        h.add_option("B", "2").unwrap();
        h.add_option("A", "3").unwrap();

        assert_eq!(h.len(), 3);
        assert_eq!(h.get("A"), Some("1"));
        assert_eq!(h.get("C"), None);
        assert_eq!(
            h.iter().collect::<Vec<_>>(),
            vec![("A", "1"), ("B", "2"), ("A", "3")]
        );
    }

    #[test]
    fn test_add_empty_name() {
        let mut h = handler();
        assert!(matches!(h.add_option("", "1"), Err(HandlerError::InvalidArg(_))));
        assert!(h.is_empty());
    }

    #[test]
    fn test_add_clone_failure() {
        let mut h = OptionHandler::create(copy_refusing_secret, record_destroy, push_pair).unwrap();
        h.add_option("Plain", "1").unwrap();

        let err = h.add_option("Secret", "2").unwrap_err();
        assert!(matches!(err, HandlerError::CloneFailed { ref name, .. } if name == "Secret"));
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn test_drop_destroys_every_value() {
        destroyed();
        {
            let mut h = handler();
            h.add_option("A", "1").unwrap();
            h.add_option("B", "2").unwrap();
        }
        assert_eq!(destroyed(), vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_remove_option() {
        let mut h = handler();
        h.add_option("A", "1").unwrap();
        h.add_option("B", "2").unwrap();
        h.add_option("A", "3").unwrap();
        destroyed();

        assert_eq!(h.remove_option("A").unwrap(), 2);
        assert_eq!(destroyed(), vec!["A".to_string(), "A".to_string()]);
        assert_eq!(h.iter().collect::<Vec<_>>(), vec![("B", "2")]);
        assert_eq!(h.remove_option("missing").unwrap(), 0);
    }

    #[test]
    fn test_feed_options() {
        let mut h = handler();
        h.add_option("A", "1").unwrap();
        h.add_option("B", "2").unwrap();

        let mut target = Vec::new();
        h.feed_options(&mut target).unwrap();
        assert_eq!(
            target,
            vec![("A".to_string(), "1".to_string()), ("B".to_string(), "2".to_string())]
        );
    }

    #[test]
    fn test_feed_stops_at_rejection() {
        let mut h = handler();
        h.add_option("A", "1").unwrap();
        h.add_option("Rejected", "2").unwrap();
        h.add_option("B", "3").unwrap();

        let mut target = Vec::new();
        let err = h.feed_options(&mut target).unwrap_err();
        assert!(matches!(err, HandlerError::FeedFailed { ref name, .. } if name == "Rejected"));
        assert_eq!(target.len(), 1);
    }

    #[test]
    fn test_try_clone_is_independent() {
        let mut h = handler();
        h.add_option("A", "1").unwrap();

        let mut clone = h.try_clone().unwrap();
        clone.add_option("B", "2").unwrap();
        drop(h);

        assert_eq!(clone.len(), 2);
        assert_eq!(clone.get("A"), Some("1"));
    }

    #[test]
    fn test_debug_shows_names_only() {
        let mut h = handler();
        h.add_option("Key", "hidden").unwrap();
        let debug = format!("{:?}", h);
        assert!(debug.contains("Key"));
        assert!(!debug.contains("hidden"));
    }
}
