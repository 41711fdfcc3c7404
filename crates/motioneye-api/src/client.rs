// motionEye HTTP client
//
// Wraps `reqwest::Client` with motionEye's signed-URL scheme and maps
// response statuses onto the crate's error taxonomy. Endpoint methods are
// thin: a fixed path, a credential set, and `request()`.

use futures_util::future::BoxFuture;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde_json::{Value, json};
use tracing::{debug, error, warn};
use url::Url;

use crate::auth::{CredentialSet, Credentials};
use crate::camera::{self, CameraConfig, DEFAULT_URL_SCHEME, keys};
use crate::error::Error;
use crate::request::{ApiRequest, build_signed_url, parse_base_url, strip_leading_slash};
use crate::transport::{Transport, TransportConfig};

/// Everything needed to construct a [`MotionEyeClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL, e.g. `http://localhost:8765`.
    pub url: String,
    pub admin: Credentials,
    pub surveillance: Credentials,
    pub transport: TransportConfig,
}

impl ClientConfig {
    /// Default credentials and transport for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            admin: Credentials::default_admin(),
            surveillance: Credentials::default_surveillance(),
            transport: TransportConfig::default(),
        }
    }

    pub fn with_admin(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.admin = Credentials::new(username, password);
        self
    }

    pub fn with_surveillance(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.surveillance = Credentials::new(username, password);
        self
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }
}

/// Client for one motionEye server.
///
/// Request methods take `&self` and may run concurrently; the only shared
/// state is the HTTP handle. Call [`close`](Self::close) to release a handle
/// the client built itself.
#[derive(Debug)]
pub struct MotionEyeClient {
    base_url: Url,
    admin: Credentials,
    surveillance: Credentials,
    transport: Transport,
}

impl MotionEyeClient {
    /// Create a client that owns its HTTP transport.
    ///
    /// Fails with [`Error::InvalidUrl`] if the URL lacks a scheme or host.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let base_url = parse_base_url(&config.url)?;
        let http = config.transport.build_client()?;
        Ok(Self {
            base_url,
            admin: config.admin,
            surveillance: config.surveillance,
            transport: Transport::Owned(http),
        })
    }

    /// Create a client that sends through a caller-owned `reqwest::Client`.
    ///
    /// [`close`](Self::close) never releases this handle. The config's
    /// transport settings are ignored.
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = parse_base_url(&config.url)?;
        Ok(Self {
            base_url,
            admin: config.admin,
            surveillance: config.surveillance,
            transport: Transport::Shared(http),
        })
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Log in and hand back the client only if that succeeded.
    ///
    /// Any client error (unreachable server, rejected credentials, bad
    /// response) yields `None`; the transport is released in that case.
    pub async fn connect(mut self) -> Option<Self> {
        match self.login().await {
            Ok(_) => Some(self),
            Err(e) => {
                debug!(error = %e, "login check failed");
                self.close();
                None
            }
        }
    }

    /// Connect, run `f` against the client, then close it.
    ///
    /// Returns `None` without calling `f` if the login check fails. The
    /// transport is released on every path, including a panic in `f`
    /// (the client is dropped while unwinding).
    ///
    /// ```no_run
    /// # async fn demo() -> Result<(), motioneye_api::Error> {
    /// use motioneye_api::{ClientConfig, MotionEyeClient};
    ///
    /// let client = MotionEyeClient::new(ClientConfig::new("http://localhost:8765"))?;
    /// let manifest = client
    ///     .session(|client| Box::pin(async move { client.get_manifest().await }))
    ///     .await;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn session<T, F>(self, f: F) -> Option<T>
    where
        F: for<'c> FnOnce(&'c MotionEyeClient) -> BoxFuture<'c, T>,
    {
        let mut client = self.connect().await?;
        let output = f(&client).await;
        client.close();
        Some(output)
    }

    /// Release the transport if this client built it. Idempotent, and safe
    /// to call whether or not login ever succeeded.
    pub fn close(&mut self) {
        self.transport.release();
    }

    /// Whether [`close`](Self::close) has released an owned transport.
    pub fn is_closed(&self) -> bool {
        self.transport.is_released()
    }

    // ── Request execution ────────────────────────────────────────────

    fn credentials(&self, set: CredentialSet) -> &Credentials {
        match set {
            CredentialSet::Admin => &self.admin,
            CredentialSet::Surveillance => &self.surveillance,
        }
    }

    /// Build a signed absolute URL for `path` without sending anything.
    pub fn signed_url(
        &self,
        path: &str,
        params: &[(String, String)],
        body: Option<&str>,
        method: &Method,
        credentials: CredentialSet,
    ) -> Result<Url, Error> {
        build_signed_url(
            &self.base_url,
            path,
            params,
            body,
            method,
            self.credentials(credentials),
        )
    }

    /// Send a request and decode its JSON response.
    ///
    /// An empty response body decodes to `Value::Null`.
    pub async fn request(&self, req: ApiRequest) -> Result<Value, Error> {
        let http = self.transport.http()?;

        let body = req.body.as_ref().map(Value::to_string);
        let url = self.signed_url(
            &req.path,
            &req.params,
            body.as_deref(),
            &req.method,
            req.credentials,
        )?;
        let url_str = url.to_string();

        let mut builder = http.request(req.method.clone(), url);
        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let resp = builder.send().await.map_err(|e| {
            warn!("Connection failed to motionEye: {e}");
            Error::connection(e, &url_str)
        })?;

        let status = resp.status();
        debug!("{} {} -> {}", req.method, url_str, status.as_u16());

        if status == reqwest::StatusCode::FORBIDDEN {
            warn!("Authentication failed in request to {url_str}");
            return Err(Error::Authentication { url: url_str });
        }

        if !status.is_success() {
            warn!("Unexpected HTTP response status code {status} for request: {url_str}");
            return Err(Error::Request {
                url: url_str,
                status: Some(status.as_u16()),
                message: format!("unexpected HTTP status {status}"),
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| {
                warn!("Request failed to motionEye: {e}");
                Error::body_read(&e, &url_str, status.as_u16())
            })?;

        decode_json(&bytes).map_err(|message| {
            error!("Could not JSON decode: {bytes:?}");
            Error::Request {
                url: url_str,
                status: Some(status.as_u16()),
                message,
            }
        })
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Log in to the server (`GET /login`).
    pub async fn login(&self) -> Result<Value, Error> {
        self.request(ApiRequest::get("/login")).await
    }

    /// `GET /manifest.json`
    pub async fn get_manifest(&self) -> Result<Value, Error> {
        self.request(ApiRequest::get("/manifest.json")).await
    }

    /// `GET /config/main/get`
    pub async fn get_server_config(&self) -> Result<Value, Error> {
        self.request(ApiRequest::get("/config/main/get")).await
    }

    /// All camera configs (`GET /config/list`).
    pub async fn get_cameras(&self) -> Result<Value, Error> {
        self.request(ApiRequest::get("/config/list")).await
    }

    /// `GET /config/{camera_id}/get`
    pub async fn get_camera(&self, camera_id: u32) -> Result<Value, Error> {
        self.request(ApiRequest::get(format!("/config/{camera_id}/get")))
            .await
    }

    /// Replace a camera's config (`POST /config/{camera_id}/set`).
    pub async fn set_camera(&self, camera_id: u32, config: &CameraConfig) -> Result<Value, Error> {
        self.request(ApiRequest::post(
            format!("/config/{camera_id}/set"),
            Value::Object(config.clone()),
        ))
        .await
    }

    /// Trigger an action (`POST /action/{camera_id}/{action}` with `{}`).
    ///
    /// Accepts a [`CameraAction`](crate::CameraAction) or any action name.
    pub async fn action(&self, camera_id: u32, action: impl AsRef<str>) -> Result<Value, Error> {
        let action = action.as_ref();
        self.request(ApiRequest::post(
            format!("/action/{camera_id}/{action}"),
            json!({}),
        ))
        .await
    }

    /// List recorded movies (`GET /movie/{camera_id}/list`).
    pub async fn get_movies(&self, camera_id: u32, prefix: Option<&str>) -> Result<Value, Error> {
        self.request(with_prefix(
            ApiRequest::get(format!("/movie/{camera_id}/list")),
            prefix,
        ))
        .await
    }

    /// List still images (`GET /picture/{camera_id}/list`).
    pub async fn get_images(&self, camera_id: u32, prefix: Option<&str>) -> Result<Value, Error> {
        self.request(with_prefix(
            ApiRequest::get(format!("/picture/{camera_id}/list")),
            prefix,
        ))
        .await
    }

    // ── URL synthesis ────────────────────────────────────────────────

    /// The camera's MJPEG stream URL, if it is streaming.
    ///
    /// Remote cameras carry their own `host`; otherwise the base URL's host
    /// name is used. The scheme is always `http`.
    pub fn get_camera_stream_url(&self, camera: &CameraConfig) -> Option<String> {
        if !camera::is_camera_streaming(camera) {
            return None;
        }
        let port = camera::url_fragment(camera.get(keys::STREAMING_PORT)?);
        let host = match camera.get(keys::HOST) {
            Some(host) => camera::url_fragment(host),
            None => self.base_url.host_str()?.to_owned(),
        };
        Some(format!("{DEFAULT_URL_SCHEME}://{host}:{port}/"))
    }

    /// Signed URL of the camera's current snapshot, if it is streaming
    /// and has an `id`.
    pub fn get_camera_snapshot_url(&self, camera: &CameraConfig) -> Option<String> {
        if !camera::is_camera_streaming(camera) {
            return None;
        }
        let id = camera::url_fragment(camera.get(keys::ID)?);
        self.media_url(&format!("/picture/{id}/current/"))
            .inspect_err(|e| warn!("could not build snapshot URL: {e}"))
            .ok()
    }

    /// Signed playback (or preview) URL for a recorded movie.
    pub fn get_movie_url(&self, camera_id: u32, path: &str, preview: bool) -> Result<String, Error> {
        let action = if preview { "preview" } else { "playback" };
        let path = strip_leading_slash(path)?;
        self.media_url(&format!("/movie/{camera_id}/{action}/{path}"))
    }

    /// Signed download (or preview) URL for a still image.
    pub fn get_image_url(&self, camera_id: u32, path: &str, preview: bool) -> Result<String, Error> {
        let action = if preview { "preview" } else { "download" };
        let path = strip_leading_slash(path)?;
        self.media_url(&format!("/picture/{camera_id}/{action}/{path}"))
    }

    fn media_url(&self, path: &str) -> Result<String, Error> {
        self.signed_url(path, &[], None, &Method::GET, CredentialSet::Surveillance)
            .map(String::from)
    }
}

fn with_prefix(req: ApiRequest, prefix: Option<&str>) -> ApiRequest {
    match prefix {
        Some(prefix) if !prefix.is_empty() => req.param("prefix", prefix),
        _ => req,
    }
}

/// Decode a response body. Blank bodies are `Null`; anything that is not
/// UTF-8 JSON is an error.
fn decode_json(bytes: &[u8]) -> Result<Value, String> {
    let text = std::str::from_utf8(bytes).map_err(|e| format!("invalid UTF-8 in body: {e}"))?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| format!("invalid JSON in body: {e}"))
}
