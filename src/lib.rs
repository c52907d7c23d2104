//! tlsio-options - TLS option state for transport adapters
//!
//! This crate collects and validates the small, fixed set of TLS options that
//! transport adapters commonly accept (trusted certificates and an X.509 client
//! certificate/key pair, standard or ECC) and exports them as a replayable
//! option list.

pub mod option_handler;
pub mod tls;

pub use option_handler::{HandlerError, OptionHandler};
pub use tls::{Capabilities, OptionError, OptionName, TlsOptions, X509Flavor};
