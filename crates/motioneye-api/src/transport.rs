// Transport configuration and ownership of the underlying reqwest::Client.
//
// The client either builds its own HTTP client (and releases it on close)
// or borrows one from the caller, which it must never release.

use std::time::Duration;

use tracing::debug;

use crate::error::Error;

const USER_AGENT: &str = concat!("motioneye-api/", env!("CARGO_PKG_VERSION"));

/// Settings for building an owned HTTP client.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Whole-request timeout (connect + response).
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: USER_AGENT.into(),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(Error::HttpClient)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// The HTTP handle a client sends through.
#[derive(Debug)]
pub(crate) enum Transport {
    /// Built by the client; dropped on close.
    Owned(reqwest::Client),
    /// Supplied by the caller; close leaves it alone.
    Shared(reqwest::Client),
    /// An owned handle that has been released.
    Released,
}

impl Transport {
    pub(crate) fn http(&self) -> Result<&reqwest::Client, Error> {
        match self {
            Self::Owned(http) | Self::Shared(http) => Ok(http),
            Self::Released => Err(Error::Closed),
        }
    }

    /// Release an owned handle. Idempotent; a shared handle is kept.
    pub(crate) fn release(&mut self) {
        match self {
            Self::Owned(_) => {
                debug!("releasing owned HTTP transport");
                *self = Self::Released;
            }
            Self::Shared(_) | Self::Released => {}
        }
    }

    pub(crate) fn is_released(&self) -> bool {
        matches!(self, Self::Released)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_drops_owned_handle_once() {
        let mut transport = Transport::Owned(reqwest::Client::new());
        transport.release();
        assert!(transport.is_released());
        assert!(matches!(transport.http(), Err(Error::Closed)));

        transport.release();
        assert!(transport.is_released());
    }

    #[test]
    fn release_keeps_shared_handle() {
        let mut transport = Transport::Shared(reqwest::Client::new());
        transport.release();
        assert!(!transport.is_released());
        assert!(transport.http().is_ok());
    }

    #[test]
    fn default_user_agent_names_the_crate() {
        let config = TransportConfig::default();
        assert!(config.user_agent.starts_with("motioneye-api/"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
