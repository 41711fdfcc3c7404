use thiserror::Error;

/// Top-level error type for the `motioneye-api` crate.
///
/// Every failure the client can surface is a variant of this enum, so callers
/// can match broadly (`Err(_)`) or on one specific kind. Usage errors
/// (`InvalidUrl`, `InvalidPath`) are raised before any network activity.
#[derive(Debug, Error)]
pub enum Error {
    // ── Usage ───────────────────────────────────────────────────────
    /// The base URL (or a URL derived from it) could not be parsed, or lacks
    /// a scheme or host.
    #[error("Invalid URL, must have a URL scheme and host: {url} ({reason})")]
    InvalidUrl { url: String, reason: String },

    /// A media path was empty after stripping its leading separator.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The client's own transport was released by `close()`.
    #[error("Client is closed")]
    Closed,

    // ── Transport ───────────────────────────────────────────────────
    /// No response was received (DNS failure, connection refused or reset,
    /// timeout before the response head).
    #[error("Connection failed to motionEye at {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    // ── Server ──────────────────────────────────────────────────────
    /// The server rejected the credentials (HTTP 403).
    #[error("Authentication failed in request to {url}")]
    Authentication { url: String },

    /// Any other failed exchange: unexpected status, undecodable body, or a
    /// body that broke off while being read.
    #[error("Request to {url} failed: {message}")]
    Request {
        url: String,
        status: Option<u16>,
        message: String,
    },
}

impl Error {
    /// Returns `true` if the server rejected the credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if no response was received at all.
    ///
    /// Login checks may want to retry these, but not auth failures.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }

    /// Returns `true` for caller mistakes detected before any I/O.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl { .. } | Self::InvalidPath(_) | Self::Closed
        )
    }

    /// HTTP status attached to the error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { .. } => Some(403),
            Self::Request { status, .. } => *status,
            _ => None,
        }
    }

    /// A `send()` failure: no response arrived (DNS, refused, reset, timeout).
    pub(crate) fn connection(err: reqwest::Error, url: &str) -> Self {
        Self::Connection {
            url: url.to_owned(),
            source: err,
        }
    }

    /// A failure reading the body of a response that did arrive.
    pub(crate) fn body_read(err: &reqwest::Error, url: &str, status: u16) -> Self {
        Self::Request {
            url: url.to_owned(),
            status: Some(status),
            message: format!("failed to read response body: {err}"),
        }
    }
}
