use secrecy::{ExposeSecret, SecretString};
use sha1::{Digest, Sha1};

/// Username motionEye ships with for its administrator account.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Username motionEye ships with for its surveillance (viewer) account.
pub const DEFAULT_SURVEILLANCE_USERNAME: &str = "user";

/// Which of the two motionEye accounts signs a request.
///
/// Marker enum (no data) -- the actual credentials live in [`Credentials`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialSet {
    /// Full access: configuration, actions, media listing.
    #[default]
    Admin,
    /// Read-only access: snapshots and media downloads.
    Surveillance,
}

/// A motionEye username/password pair.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// `admin` with an empty password, as on a fresh motionEye install.
    pub fn default_admin() -> Self {
        Self::new(DEFAULT_ADMIN_USERNAME, "")
    }

    /// `user` with an empty password, as on a fresh motionEye install.
    pub fn default_surveillance() -> Self {
        Self::new(DEFAULT_SURVEILLANCE_USERNAME, "")
    }

    /// Key material for request signatures: lowercase hex SHA-1 of the
    /// password. An empty password still yields a valid key.
    pub fn signature_key(&self) -> String {
        hex::encode(Sha1::digest(self.password.expose_secret().as_bytes()))
    }
}
