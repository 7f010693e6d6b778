// euicc-serial/src/http/mod.rs

//! HTTP collaborator used by the host to reach profile servers.
//!
//! Requests carry headers as the host hands them over, one `"Key: Value"`
//! string each. Trusted CA certificates live in an [`HttpContext`] that the
//! caller owns and passes to every call.

use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::Path;

use log::{debug, info};

use crate::Result;
use crate::interface::DriverInfo;

#[cfg(feature = "http")]
pub mod client;

#[cfg(feature = "http")]
pub use client::ReqwestHttp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum HttpMethod {
    #[display(fmt = "GET")]
    Get,
    #[display(fmt = "POST")]
    Post,
}

/// Split a `"Key: Value"` line at the first colon. One space after the
/// colon is dropped; lines without a colon yield `None`.
pub fn parse_header_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    Some((key, value.strip_prefix(' ').unwrap_or(value)))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    /// Raw header lines, sent in order
    pub headers: Vec<String>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body: Some(body.into()),
        }
    }

    pub fn with_header(mut self, line: impl Into<String>) -> Self {
        self.headers.push(line.into());
        self
    }

    /// POST when there is a body, GET otherwise.
    pub fn method(&self) -> HttpMethod {
        if self.body.is_some() {
            HttpMethod::Post
        } else {
            HttpMethod::Get
        }
    }

    /// Well-formed header lines as `(key, value)`, malformed ones skipped.
    pub fn header_pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.headers.iter().filter_map(|line| {
            let pair = parse_header_line(line);
            if pair.is_none() {
                debug!("skipping header line without ':': {}", line);
            }
            pair
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// `None` when the server sent no body
    pub body: Option<Vec<u8>>,
}

impl HttpResponse {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            body: (!body.is_empty()).then_some(body),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// PEM bundle of trusted CA certificates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateBundle {
    pem: Vec<u8>,
}

impl CertificateBundle {
    pub fn from_pem(pem: impl Into<Vec<u8>>) -> Self {
        Self { pem: pem.into() }
    }

    /// Read a bundle from disk. A missing file is not an error; the
    /// context then falls back to the platform's roots.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        match fs::read(path) {
            Ok(pem) => {
                info!("CA certificates loaded from {}, size={}", path.display(), pem.len());
                Ok(Some(Self { pem }))
            }
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                debug!("no certificate bundle at {}", path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn as_pem(&self) -> &[u8] {
        &self.pem
    }

    pub fn len(&self) -> usize {
        self.pem.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pem.is_empty()
    }
}

/// State shared by consecutive HTTP calls of one host session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpContext {
    certificates: Option<CertificateBundle>,
}

impl HttpContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_certificates(mut self, bundle: CertificateBundle) -> Self {
        self.certificates = Some(bundle);
        self
    }

    /// Context trusting the bundle at `path`, if there is one.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            certificates: CertificateBundle::load(path)?,
        })
    }

    pub fn certificates(&self) -> Option<&CertificateBundle> {
        self.certificates.as_ref()
    }
}

/// One HTTP round trip on behalf of the host.
pub trait HttpInterface {
    fn info(&self) -> DriverInfo;

    /// Send `request`, following redirects, and return status and body.
    fn transmit(&mut self, ctx: &HttpContext, request: &HttpRequest) -> Result<HttpResponse>;
}
