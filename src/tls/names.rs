//! Canonical TLS option names
//!
//! The five option names recognized by [`TlsOptions`](super::TlsOptions).
//! Names are matched exactly and case-sensitively.

use super::capability::Capabilities;
use super::options::X509Flavor;
use std::fmt;

/// PEM bundle of trusted root/intermediate certificates
pub const OPTION_TRUSTED_CERTS: &str = "TrustedCerts";
/// Standard X.509 client certificate (PEM)
pub const OPTION_X509_CERT: &str = "x509certificate";
/// Standard X.509 client private key (PEM)
pub const OPTION_X509_KEY: &str = "x509privatekey";
/// ECC X.509 client certificate (PEM)
pub const OPTION_X509_ECC_CERT: &str = "x509EccCertificate";
/// ECC X.509 client private key (PEM)
pub const OPTION_X509_ECC_KEY: &str = "x509EccKey";

/// Recognized TLS option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionName {
    /// `TrustedCerts`
    TrustedCerts,
    /// `x509certificate`
    X509Cert,
    /// `x509privatekey`
    X509Key,
    /// `x509EccCertificate`
    X509EccCert,
    /// `x509EccKey`
    X509EccKey,
}

/// Storage slot an option writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    TrustedCerts,
    X509Cert,
    X509Key,
}

impl OptionName {
    /// All recognized options, in export order
    pub const ALL: [OptionName; 5] = [
        OptionName::TrustedCerts,
        OptionName::X509Cert,
        OptionName::X509Key,
        OptionName::X509EccCert,
        OptionName::X509EccKey,
    ];

    /// Look up an option by its canonical name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            OPTION_TRUSTED_CERTS => Some(OptionName::TrustedCerts),
            OPTION_X509_CERT => Some(OptionName::X509Cert),
            OPTION_X509_KEY => Some(OptionName::X509Key),
            OPTION_X509_ECC_CERT => Some(OptionName::X509EccCert),
            OPTION_X509_ECC_KEY => Some(OptionName::X509EccKey),
            _ => None,
        }
    }

    /// Get the canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionName::TrustedCerts => OPTION_TRUSTED_CERTS,
            OptionName::X509Cert => OPTION_X509_CERT,
            OptionName::X509Key => OPTION_X509_KEY,
            OptionName::X509EccCert => OPTION_X509_ECC_CERT,
            OptionName::X509EccKey => OPTION_X509_ECC_KEY,
        }
    }

    /// X.509 flavor this option belongs to (`None` for trusted certs)
    pub fn flavor(&self) -> Option<X509Flavor> {
        match self {
            OptionName::TrustedCerts => None,
            OptionName::X509Cert | OptionName::X509Key => Some(X509Flavor::Standard),
            OptionName::X509EccCert | OptionName::X509EccKey => Some(X509Flavor::Ecc),
        }
    }

    /// Capability bit required to set this option
    pub fn capability(&self) -> Capabilities {
        match self.flavor() {
            None => Capabilities::TRUSTED_CERTS,
            Some(flavor) => flavor.capability(),
        }
    }

    /// Check if this option carries X.509 client material
    pub fn is_x509(&self) -> bool {
        self.flavor().is_some()
    }

    pub(crate) fn field(&self) -> Field {
        match self {
            OptionName::TrustedCerts => Field::TrustedCerts,
            OptionName::X509Cert | OptionName::X509EccCert => Field::X509Cert,
            OptionName::X509Key | OptionName::X509EccKey => Field::X509Key,
        }
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
