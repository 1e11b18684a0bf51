//! Error types for certificate expiry checks.
//!
//! Every variant is terminal: nothing in the crate retries or recovers.
//! The binary turns any of them into a one-line diagnostic and exit code 1.

use std::fmt;
use std::io;

use crate::config::ConfigError;

/// Error type for a failed expiry check.
#[derive(Debug)]
pub enum CheckError {
    /// The site argument was missing or unusable
    InvalidInput {
        /// Which field/parameter was invalid
        field: String,
        /// Why it was invalid
        reason: String,
    },

    /// DNS resolution failed for the given hostname
    DnsResolution {
        /// The hostname that failed to resolve
        hostname: String,
        /// The underlying I/O error
        source: io::Error,
    },

    /// TCP connection failed to the target address
    ConnectionFailed {
        /// The address (host:port) that connection failed to
        address: String,
        /// The underlying I/O error
        source: io::Error,
    },

    /// TLS handshake failed
    HandshakeFailed {
        /// Details about why the handshake failed
        details: String,
    },

    /// OpenSSL refused to set up the client session
    OpenSSLError {
        /// The underlying OpenSSL error
        details: String,
    },

    /// A peer certificate could not be decoded
    CertificateError {
        /// Description of what went wrong
        reason: String,
    },

    /// The handshake succeeded but no certificate names the host
    NoMatchingCertificate {
        /// The host that was queried
        host: String,
    },
}

impl CheckError {
    /// True for failures to reach the host or finish the handshake.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::DnsResolution { .. }
                | Self::ConnectionFailed { .. }
                | Self::HandshakeFailed { .. }
                | Self::OpenSSLError { .. }
        )
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { reason, .. } => write!(f, "{}", reason),
            Self::DnsResolution { hostname, source } => {
                write!(
                    f,
                    "Something went wrong with TLS connection: failed to resolve {}: {}",
                    hostname, source
                )
            }
            Self::ConnectionFailed { address, source } => {
                write!(
                    f,
                    "Something went wrong with TLS connection: connect to {} failed: {}",
                    address, source
                )
            }
            Self::HandshakeFailed { details } => {
                write!(
                    f,
                    "Something went wrong with TLS connection: handshake failed: {}",
                    details
                )
            }
            Self::OpenSSLError { details } => {
                write!(
                    f,
                    "Something went wrong with TLS connection: {}",
                    details
                )
            }
            Self::CertificateError { reason } => write!(f, "Certificate error: {}", reason),
            Self::NoMatchingCertificate { host } => {
                write!(f, "{} does not contain proper SSL certificate.", host)
            }
        }
    }
}

impl std::error::Error for CheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DnsResolution { source, .. } => Some(source),
            Self::ConnectionFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for CheckError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Validation { field, reason } => Self::InvalidInput { field, reason },
        }
    }
}

impl From<openssl::error::ErrorStack> for CheckError {
    fn from(e: openssl::error::ErrorStack) -> Self {
        Self::OpenSSLError {
            details: e.to_string(),
        }
    }
}

impl<S: fmt::Debug> From<openssl::ssl::HandshakeError<S>> for CheckError {
    fn from(e: openssl::ssl::HandshakeError<S>) -> Self {
        Self::HandshakeFailed {
            details: format!("{}", e),
        }
    }
}
