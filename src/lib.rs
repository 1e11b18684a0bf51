//! Reports how many days remain before a host's TLS certificate expires.
//!
//! The host is contacted on port 443, its certificate chain is read without
//! verifying trust, and the first certificate whose common name matches the
//! host decides the result.
//!
//! ```no_run
//! let days = certdays::check_expiry("example.com")?;
//! println!("{}", days);
//! # Ok::<(), certdays::CheckError>(())
//! ```

use chrono::{DateTime, Utc};
use log::{debug, warn};
use openssl::asn1::{Asn1Time, Asn1TimeRef};
use openssl::nid::Nid;
use openssl::ssl::{Ssl, SslContext, SslMethod, SslVerifyMode};
use openssl::x509::X509Ref;
use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};

pub mod config;
pub mod error;
pub mod matcher;

pub use config::Config;
pub use error::CheckError;
pub use matcher::CommonNamePattern;

/// Port every check connects to.
pub const HTTPS_PORT: u16 = 443;

/// The parts of a peer certificate the check looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    /// Subject common name, if the certificate carries one
    pub common_name: Option<String>,
    /// End of the validity period
    pub not_after: DateTime<Utc>,
}

impl Certificate {
    /// Reads the subject common name and expiry of `cert`.
    ///
    /// The common name is kept whole, interior NUL bytes included, so a name
    /// like `example.com\0.evil.org` never passes for `example.com`.
    pub fn from_x509(cert: &X509Ref) -> Result<Certificate, CheckError> {
        let common_name = match cert.subject_name().entries_by_nid(Nid::COMMONNAME).next() {
            Some(entry) => Some(entry.data().to_string().map_err(|e| {
                CheckError::CertificateError {
                    reason: format!("unreadable common name: {}", e),
                }
            })?),
            None => None,
        };
        Ok(Certificate {
            common_name,
            not_after: asn1_to_utc(cert.not_after())?,
        })
    }
}

fn asn1_to_utc(time: &Asn1TimeRef) -> Result<DateTime<Utc>, CheckError> {
    let epoch = Asn1Time::from_unix(0)?;
    let diff = epoch.diff(time)?;
    let secs = i64::from(diff.days) * 86_400 + i64::from(diff.secs);
    DateTime::from_timestamp(secs, 0).ok_or_else(|| CheckError::CertificateError {
        reason: format!("expiration date out of range: {}", time),
    })
}

/// Retrieves the certificate chain `host` presents on port 443.
pub fn fetch_chain(host: &str) -> Result<Vec<Certificate>, CheckError> {
    fetch_chain_from(&format!("{}:{}", host, HTTPS_PORT), host)
}

/// Retrieves the certificate chain presented at `address`, sending `host` as SNI.
///
/// Peer verification is switched off: the point is to read the expiry of any
/// certificate, including self-signed and otherwise untrusted ones. The chain
/// is returned leaf first, as the server sent it.
pub fn fetch_chain_from(address: &str, host: &str) -> Result<Vec<Certificate>, CheckError> {
    let addrs: Vec<SocketAddr> = address
        .to_socket_addrs()
        .map_err(|source| CheckError::DnsResolution {
            hostname: host.to_string(),
            source,
        })?
        .collect();
    if addrs.is_empty() {
        return Err(CheckError::DnsResolution {
            hostname: host.to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no addresses found"),
        });
    }

    let mut context = SslContext::builder(SslMethod::tls())?;
    context.set_verify(SslVerifyMode::NONE);
    let context = context.build();

    let mut connector = Ssl::new(&context)?;
    connector.set_hostname(host)?;

    debug!("connecting to {} ({:?})", address, addrs);
    let tcp_stream =
        TcpStream::connect(&addrs[..]).map_err(|source| CheckError::ConnectionFailed {
            address: address.to_string(),
            source,
        })?;
    let mut stream = connector.connect(tcp_stream)?;
    debug!(
        "handshake with {} done using {}",
        address,
        stream.ssl().version_str()
    );

    let chain = match stream.ssl().peer_cert_chain() {
        Some(certs) => keep_decoded(certs.iter().map(Certificate::from_x509)),
        None => Vec::new(),
    };
    if let Err(e) = stream.shutdown() {
        debug!("TLS shutdown with {} failed: {}", address, e);
    }
    Ok(chain)
}

/// Drops certificates that failed to decode so the rest can still be matched.
fn keep_decoded<I>(decoded: I) -> Vec<Certificate>
where
    I: IntoIterator<Item = Result<Certificate, CheckError>>,
{
    decoded
        .into_iter()
        .enumerate()
        .filter_map(|(position, result)| match result {
            Ok(cert) => Some(cert),
            Err(e) => {
                warn!("skipping certificate #{} in chain: {}", position, e);
                None
            }
        })
        .collect()
}

/// Returns the first certificate in `chain` whose common name matches `host`.
pub fn select_certificate<'a>(host: &str, chain: &'a [Certificate]) -> Option<&'a Certificate> {
    chain.iter().find(|cert| {
        let common_name = match &cert.common_name {
            Some(name) => name,
            None => return false,
        };
        match CommonNamePattern::new(common_name) {
            Ok(pattern) => pattern.matches(host),
            Err(e) => {
                warn!("skipping certificate for {}: {}", common_name, e);
                false
            }
        }
    })
}

/// Whole days from `now` until `not_after`, truncated toward zero.
///
/// Negative once the certificate has expired. Accurate to one day.
pub fn days_left(not_after: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let hours = (not_after - now).num_milliseconds() as f64 / 3_600_000.0;
    (hours / 24.0) as i64
}

/// Picks the certificate for `host` out of `chain` and counts its days left at `now`.
pub fn check_expiry_at(
    host: &str,
    chain: &[Certificate],
    now: DateTime<Utc>,
) -> Result<i64, CheckError> {
    let cert = select_certificate(host, chain).ok_or_else(|| CheckError::NoMatchingCertificate {
        host: host.to_string(),
    })?;
    debug!(
        "{} matched common name {:?}, expires {}",
        host, cert.common_name, cert.not_after
    );
    Ok(days_left(cert.not_after, now))
}

/// Connects to `host` on port 443 and returns the days left on its certificate.
pub fn check_expiry(host: &str) -> Result<i64, CheckError> {
    if host.is_empty() {
        return Err(CheckError::InvalidInput {
            field: "host".to_string(),
            reason: config::MISSING_SITE.to_string(),
        });
    }
    let chain = fetch_chain(host)?;
    debug!("{} presented {} certificate(s)", host, chain.len());
    check_expiry_at(host, &chain, Utc::now())
}
