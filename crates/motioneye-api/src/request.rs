// Request descriptors and signed URL construction.

use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::auth::{CredentialSet, Credentials};
use crate::error::Error;
use crate::signature::{SIGNATURE_PARAM, compute_signature};

/// Query parameter naming the account a request is signed for.
pub const USERNAME_PARAM: &str = "_username";

/// One API call, built per request and discarded after the response.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
    pub credentials: CredentialSet,
}

impl ApiRequest {
    /// A `GET` signed with the admin account.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            params: Vec::new(),
            body: None,
            credentials: CredentialSet::Admin,
        }
    }

    /// A `POST` with a JSON body, signed with the admin account.
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::get(path)
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn credentials(mut self, credentials: CredentialSet) -> Self {
        self.credentials = credentials;
        self
    }
}

/// Parse a server base URL, requiring both a scheme and a host.
pub fn parse_base_url(url: &str) -> Result<Url, Error> {
    let invalid = |reason: String| Error::InvalidUrl {
        url: url.to_owned(),
        reason,
    };

    let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    if parsed.cannot_be_a_base() || parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing scheme or host".into()));
    }
    Ok(parsed)
}

/// Resolve `path` against `base` and sign it.
///
/// The caller's `params` come first, then `_username`, then `_signature`.
/// The signature covers everything before it plus `body`, which must be
/// the exact text that will be sent.
pub fn build_signed_url(
    base: &Url,
    path: &str,
    params: &[(String, String)],
    body: Option<&str>,
    method: &Method,
    credentials: &Credentials,
) -> Result<Url, Error> {
    let mut url = base.join(path).map_err(|e| Error::InvalidUrl {
        url: format!("{base} + {path}"),
        reason: e.to_string(),
    })?;

    {
        let mut query = url.query_pairs_mut();
        for (name, value) in params {
            query.append_pair(name, value);
        }
        query.append_pair(USERNAME_PARAM, &credentials.username);
    }

    let signature = compute_signature(method, url.as_str(), body, &credentials.signature_key());
    url.query_pairs_mut().append_pair(SIGNATURE_PARAM, &signature);
    Ok(url)
}

/// Remove at most one leading `/` from a media path.
///
/// `"/foo"` and `"foo"` produce the same URL; a path that is empty
/// afterwards is rejected.
pub fn strip_leading_slash(path: &str) -> Result<&str, Error> {
    let stripped = path.strip_prefix('/').unwrap_or(path);
    if stripped.is_empty() {
        return Err(Error::InvalidPath(format!(
            "could not parse empty path: {path:?}"
        )));
    }
    Ok(stripped)
}
