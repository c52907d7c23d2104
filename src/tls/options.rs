//! TLS option aggregator
//!
//! `TlsOptions` is embedded by a TLS transport adapter to hold the trusted
//! certificate bundle and the X.509 client certificate/key pair until the
//! adapter configures its TLS engine.
//!
//! Rules enforced on every [`TlsOptions::set`]:
//!
//! - an option is only accepted if its capability bit was granted at
//!   initialization
//! - the X.509 certificate and key are each set at most once
//! - standard and ECC X.509 material never mix; the first X.509 write commits
//!   the flavor for the lifetime of the record
//! - the trusted certificate bundle may be replaced at any time
//!
//! A rejected call never modifies the record.

use super::capability::Capabilities;
use super::error::{OptionError, Result};
use super::names::{Field, OptionName};
use super::value::copy_value;
use crate::option_handler::{CloneOption, DestroyOption, OptionHandler, SetOption};
use std::fmt;

/// Flavor of the committed X.509 client material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum X509Flavor {
    /// No X.509 option has been set yet
    #[default]
    Unspecified,
    /// RSA-style certificate and key (`x509certificate` / `x509privatekey`)
    Standard,
    /// ECC certificate and key (`x509EccCertificate` / `x509EccKey`)
    Ecc,
}

impl X509Flavor {
    /// Capability bit covering this flavor
    pub fn capability(&self) -> Capabilities {
        match self {
            X509Flavor::Unspecified => Capabilities::NONE,
            X509Flavor::Standard => Capabilities::X509_CERT,
            X509Flavor::Ecc => Capabilities::X509_ECC_CERT,
        }
    }

    /// Option name the certificate is exported under
    pub fn cert_option(&self) -> Option<OptionName> {
        match self {
            X509Flavor::Unspecified => None,
            X509Flavor::Standard => Some(OptionName::X509Cert),
            X509Flavor::Ecc => Some(OptionName::X509EccCert),
        }
    }

    /// Option name the private key is exported under
    pub fn key_option(&self) -> Option<OptionName> {
        match self {
            X509Flavor::Unspecified => None,
            X509Flavor::Standard => Some(OptionName::X509Key),
            X509Flavor::Ecc => Some(OptionName::X509EccKey),
        }
    }

    /// Get flavor as string
    pub fn as_str(&self) -> &'static str {
        match self {
            X509Flavor::Unspecified => "unspecified",
            X509Flavor::Standard => "standard",
            X509Flavor::Ecc => "ECC",
        }
    }
}

impl fmt::Display for X509Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// TLS option state owned by a transport adapter
///
/// All stored values are private copies; the caller's buffers are only
/// borrowed for the duration of a call. Mutation requires `&mut self`, so a
/// record shared between threads must be guarded by the owner.
#[derive(Clone, PartialEq, Eq)]
pub struct TlsOptions {
    capabilities: Capabilities,
    trusted_certs: Option<String>,
    x509_flavor: X509Flavor,
    x509_cert: Option<String>,
    x509_key: Option<String>,
}

impl TlsOptions {
    /// Create an empty record honoring `capabilities`
    pub fn new(capabilities: Capabilities) -> Self {
        TlsOptions {
            capabilities,
            trusted_certs: None,
            x509_flavor: X509Flavor::Unspecified,
            x509_cert: None,
            x509_key: None,
        }
    }

    /// Reset the record in place, dropping any stored values
    pub fn initialize(&mut self, capabilities: Capabilities) {
        *self = Self::new(capabilities);
    }

    /// Capabilities granted at initialization
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Committed X.509 flavor
    pub fn x509_flavor(&self) -> X509Flavor {
        self.x509_flavor
    }

    /// Trusted certificate bundle
    pub fn trusted_certs(&self) -> Option<&str> {
        self.trusted_certs.as_deref()
    }

    /// X.509 client certificate (either flavor)
    pub fn x509_cert(&self) -> Option<&str> {
        self.x509_cert.as_deref()
    }

    /// X.509 client private key (either flavor)
    pub fn x509_key(&self) -> Option<&str> {
        self.x509_key.as_deref()
    }

    /// Set an option by its canonical name
    ///
    /// Returns [`OptionError::NotHandled`] for names outside the five TLS
    /// options; the record is untouched in that case.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        match OptionName::from_name(name) {
            Some(option) => self.set_known(option, value),
            None => Err(OptionError::NotHandled(name.to_string())),
        }
    }

    fn set_known(&mut self, option: OptionName, value: &str) -> Result<()> {
        match option.flavor() {
            None => self.set_trusted_certs(value),
            Some(flavor) => self.set_x509(option, flavor, value),
        }
    }

    fn set_trusted_certs(&mut self, value: &str) -> Result<()> {
        if !self.capabilities.contains(Capabilities::TRUSTED_CERTS) {
            tracing::error!(option = %OptionName::TrustedCerts, "option not supported");
            return Err(OptionError::Unsupported(OptionName::TrustedCerts));
        }

        let copy = copy_value(OptionName::TrustedCerts, value)?;
        // Replaces and drops any earlier bundle
        self.trusted_certs = Some(copy);

        tracing::debug!(option = %OptionName::TrustedCerts, len = value.len(), "option stored");
        Ok(())
    }

    fn set_x509(&mut self, option: OptionName, flavor: X509Flavor, value: &str) -> Result<()> {
        if !self.capabilities.contains(flavor.capability()) {
            tracing::error!(option = %option, flavor = %flavor, "unsupported x509 type");
            return Err(OptionError::Unsupported(option));
        }

        let field = option.field();
        if self.slot(field).is_some() {
            tracing::error!(option = %option, "unable to set x509 options more than once");
            return Err(OptionError::AlreadySet(option));
        }

        self.check_flavor(option, flavor)?;

        let copy = copy_value(option, value)?;
        *self.slot_mut(field) = Some(copy);
        self.x509_flavor = flavor;

        tracing::debug!(option = %option, flavor = %flavor, len = value.len(), "option stored");
        Ok(())
    }

    fn check_flavor(&self, option: OptionName, requested: X509Flavor) -> Result<()> {
        match self.x509_flavor {
            X509Flavor::Unspecified => Ok(()),
            committed if committed == requested => Ok(()),
            committed => {
                tracing::error!(
                    option = %option,
                    requested = %requested,
                    committed = %committed,
                    "supplied x509 type conflicts with previously set x509"
                );
                Err(OptionError::FlavorConflict {
                    requested,
                    committed,
                })
            }
        }
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::TrustedCerts => &self.trusted_certs,
            Field::X509Cert => &self.x509_cert,
            Field::X509Key => &self.x509_key,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::TrustedCerts => &mut self.trusted_certs,
            Field::X509Cert => &mut self.x509_cert,
            Field::X509Key => &mut self.x509_key,
        }
    }

    /// Get a stored value by canonical name
    ///
    /// The X.509 names only answer for the committed flavor, so
    /// `x509EccKey` is `None` when standard material was set.
    pub fn get(&self, name: &str) -> Option<&str> {
        let option = OptionName::from_name(name)?;
        match option.flavor() {
            Some(flavor) if flavor != self.x509_flavor => None,
            _ => self.slot(option.field()).as_deref(),
        }
    }

    /// Stored options in export order, under their canonical names
    pub fn entries(&self) -> impl Iterator<Item = (OptionName, &str)> + '_ {
        let trusted = self
            .trusted_certs
            .as_deref()
            .map(|value| (OptionName::TrustedCerts, value));
        let cert = self.x509_flavor.cert_option().zip(self.x509_cert.as_deref());
        let key = self.x509_flavor.key_option().zip(self.x509_key.as_deref());

        trusted.into_iter().chain(cert).chain(key)
    }

    /// Export the stored options into a new [`OptionHandler`]
    ///
    /// The handler receives its own copies (made by `clone_option`). If any
    /// entry cannot be added, the partially built handler is dropped, which
    /// runs `destroy_option` on every entry already added.
    pub fn retrieve_options<T>(
        &self,
        clone_option: CloneOption,
        destroy_option: DestroyOption,
        set_option: SetOption<T>,
    ) -> Result<OptionHandler<T>> {
        let mut handler = OptionHandler::create(clone_option, destroy_option, set_option)
            .map_err(|e| {
                tracing::error!(error = %e, "unable to create option handler");
                e
            })?;

        for (option, value) in self.entries() {
            if let Err(e) = handler.add_option(option.as_str(), value) {
                tracing::error!(option = %option, error = %e, "unable to save option");
                return Err(e.into());
            }
        }

        Ok(handler)
    }

    /// Drop every stored value
    ///
    /// The released record also loses its capabilities, so every later
    /// [`set`](Self::set) fails with [`OptionError::Unsupported`] until
    /// [`initialize`](Self::initialize) is called again. Releasing twice is
    /// harmless.
    pub fn release(&mut self) {
        self.trusted_certs = None;
        self.x509_cert = None;
        self.x509_key = None;
        self.x509_flavor = X509Flavor::Unspecified;
        self.capabilities = Capabilities::NONE;
    }
}

impl fmt::Debug for TlsOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Lengths only; the values are secrets
        f.debug_struct("TlsOptions")
            .field("capabilities", &self.capabilities)
            .field("trusted_certs_len", &self.trusted_certs.as_ref().map(String::len))
            .field("x509_flavor", &self.x509_flavor)
            .field("x509_cert_len", &self.x509_cert.as_ref().map(String::len))
            .field("x509_key_len", &self.x509_key.as_ref().map(String::len))
            .finish()
    }
}

/// Set an option through a boundary where any argument may be missing
///
/// A missing record, name or value fails with
/// [`OptionError::InvalidArgument`] and nothing is modified.
pub fn set_option(
    options: Option<&mut TlsOptions>,
    name: Option<&str>,
    value: Option<&str>,
) -> Result<()> {
    match (options, name, value) {
        (Some(options), Some(name), Some(value)) => options.set(name, value),
        (options, name, value) => {
            tracing::error!(
                options = options.is_some(),
                name = name.is_some(),
                value = value.is_some(),
                "NULL parameter"
            );
            let missing = if options.is_none() {
                "options"
            } else if name.is_none() {
                "option name"
            } else {
                "option value"
            };
            Err(OptionError::InvalidArgument(missing))
        }
    }
}

/// [`SetOption`] callback that feeds a snapshot entry back into a record
pub fn apply_option(options: &mut TlsOptions, name: &str, value: &str) -> Result<()> {
    options.set(name, value)
}
