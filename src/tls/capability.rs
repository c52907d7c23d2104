//! Capability mask
//!
//! The set of options an adapter is willing to honor, fixed when the
//! [`TlsOptions`](super::TlsOptions) record is initialized.

use super::error::OptionError;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

/// Bit set of supported TLS options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capabilities(u32);

impl Capabilities {
    /// No options supported
    pub const NONE: Capabilities = Capabilities(0);

    /// `TrustedCerts` (0x1)
    pub const TRUSTED_CERTS: Capabilities = Capabilities(0x1);

    /// Standard X.509 certificate and key (0x2)
    pub const X509_CERT: Capabilities = Capabilities(0x2);

    /// ECC X.509 certificate and key (0x4)
    pub const X509_ECC_CERT: Capabilities = Capabilities(0x4);

    /// Every defined capability
    pub fn all() -> Self {
        Self::TRUSTED_CERTS | Self::X509_CERT | Self::X509_ECC_CERT
    }

    /// Create from raw bits
    ///
    /// Undefined bits are kept as-is; they never satisfy any option.
    pub fn from_bits(bits: u32) -> Self {
        Capabilities(bits)
    }

    /// Get raw bits
    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Check if every bit of `other` is present
    ///
    /// `other` must be non-empty: `contains(NONE)` is `false`, so an empty
    /// requirement is never satisfied.
    pub fn contains(&self, other: Capabilities) -> bool {
        other.0 != 0 && (self.0 & other.0) == other.0
    }

    fn flag_name(&self) -> &'static str {
        match *self {
            Self::TRUSTED_CERTS => "trusted-certs",
            Self::X509_CERT => "x509",
            Self::X509_ECC_CERT => "x509-ecc",
            _ => "unknown",
        }
    }
}

impl BitOr for Capabilities {
    type Output = Capabilities;

    fn bitor(self, rhs: Capabilities) -> Capabilities {
        Capabilities(self.0 | rhs.0)
    }
}

impl BitOrAssign for Capabilities {
    fn bitor_assign(&mut self, rhs: Capabilities) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [Self::TRUSTED_CERTS, Self::X509_CERT, Self::X509_ECC_CERT]
            .iter()
            .filter(|flag| self.contains(**flag))
            .map(|flag| flag.flag_name())
            .collect();

        if names.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&names.join("|"))
        }
    }
}

/// Parse a capability list such as `"trusted-certs|x509"` (case-insensitive,
/// `|` or `,` separated)
impl FromStr for Capabilities {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut caps = Capabilities::NONE;
        for token in s.split(['|', ',']).map(str::trim).filter(|t| !t.is_empty()) {
            caps |= match token.to_lowercase().as_str() {
                "none" => Capabilities::NONE,
                "trusted-certs" | "trustedcerts" => Capabilities::TRUSTED_CERTS,
                "x509" | "x509-cert" => Capabilities::X509_CERT,
                "x509-ecc" | "x509-ecc-cert" => Capabilities::X509_ECC_CERT,
                "all" => Capabilities::all(),
                _ => return Err(OptionError::InvalidCapability(token.to_string())),
            };
        }
        Ok(caps)
    }
}
