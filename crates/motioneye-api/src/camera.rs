// Camera vocabulary
//
// motionEye camera configs are passed through untouched; this module only
// names the keys and values the client (and its callers) need to reason
// about: streaming detection, media file types, actions and web hooks.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// One camera's configuration, as returned by `/config/{id}/get`.
pub type CameraConfig = serde_json::Map<String, Value>;

/// Port motionEye listens on by default.
pub const DEFAULT_PORT: u16 = 8765;

/// Scheme of the MJPEG stream. motion cannot serve it over https.
pub const DEFAULT_URL_SCHEME: &str = "http";

/// Well-known keys in motionEye payloads.
pub mod keys {
    pub const ACTIONS: &str = "actions";
    pub const CAMERAS: &str = "cameras";
    pub const ERROR: &str = "error";
    pub const HOST: &str = "host";
    pub const ID: &str = "id";
    pub const MEDIA_LIST: &str = "mediaList";
    pub const MIME_TYPE: &str = "mimeType";
    pub const MOTION_DETECTION: &str = "motion_detection";
    pub const MOVIES: &str = "movies";
    pub const NAME: &str = "name";
    pub const PATH: &str = "path";
    pub const ROOT_DIRECTORY: &str = "root_directory";
    pub const STILL_IMAGES: &str = "still_images";
    pub const STREAMING_PORT: &str = "streaming_port";
    pub const STREAMING_AUTH_MODE: &str = "streaming_auth_mode";
    pub const UPLOAD_ENABLED: &str = "upload_enabled";
    pub const VIDEO_STREAMING: &str = "video_streaming";

    pub const TEXT_OVERLAY: &str = "text_overlay";
    pub const TEXT_OVERLAY_CAMERA_NAME: &str = "camera-name";
    pub const TEXT_OVERLAY_CUSTOM_TEXT: &str = "custom-text";
    pub const TEXT_OVERLAY_CUSTOM_TEXT_LEFT: &str = "custom_left_text";
    pub const TEXT_OVERLAY_CUSTOM_TEXT_RIGHT: &str = "custom_right_text";
    pub const TEXT_OVERLAY_DISABLED: &str = "disabled";
    pub const TEXT_OVERLAY_LEFT: &str = "left_text";
    pub const TEXT_OVERLAY_RIGHT: &str = "right_text";
    pub const TEXT_OVERLAY_TIMESTAMP: &str = "timestamp";

    pub const WEB_HOOK_NOTIFICATIONS_ENABLED: &str = "web_hook_notifications_enabled";
    pub const WEB_HOOK_NOTIFICATIONS_HTTP_METHOD: &str = "web_hook_notifications_http_method";
    pub const WEB_HOOK_NOTIFICATIONS_URL: &str = "web_hook_notifications_url";
    pub const WEB_HOOK_STORAGE_ENABLED: &str = "web_hook_storage_enabled";
    pub const WEB_HOOK_STORAGE_HTTP_METHOD: &str = "web_hook_storage_http_method";
    pub const WEB_HOOK_STORAGE_URL: &str = "web_hook_storage_url";
}

/// Whether a camera serves an MJPEG stream: it has a `streaming_port`
/// and `video_streaming` is `true`.
pub fn is_camera_streaming(camera: &CameraConfig) -> bool {
    camera.contains_key(keys::STREAMING_PORT)
        && camera.get(keys::VIDEO_STREAMING).and_then(Value::as_bool) == Some(true)
}

/// motion's event file types below 8 are images, the rest movies.
pub fn is_file_type_image(file_type: i64) -> bool {
    file_type < 8
}

pub fn is_file_type_movie(file_type: i64) -> bool {
    !is_file_type_image(file_type)
}

/// Render a scalar config value for use in a URL (`8081`, `"foo"` -> `8081`, `foo`).
pub(crate) fn url_fragment(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Actions accepted by `POST /action/{id}/{action}`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
    EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum CameraAction {
    Snapshot,
    RecordStart,
    RecordStop,
    Lock,
    Unlock,
    LightOn,
    LightOff,
    AlarmOn,
    AlarmOff,
    Up,
    Right,
    Down,
    Left,
    ZoomIn,
    ZoomOut,
    Preset1,
    Preset2,
    Preset3,
    Preset4,
    Preset5,
    Preset6,
    Preset7,
    Preset8,
    Preset9,
}

/// How motionEye delivers a web hook.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr, Serialize, Deserialize,
)]
pub enum WebHookHttpMethod {
    #[strum(serialize = "GET")]
    #[serde(rename = "GET")]
    Get,
    /// POST with a JSON body.
    #[strum(serialize = "POSTj")]
    #[serde(rename = "POSTj")]
    PostJson,
    /// POST with the values in the query string.
    #[strum(serialize = "POST")]
    #[serde(rename = "POST")]
    PostQuery,
    /// POST with a form body.
    #[strum(serialize = "POSTf")]
    #[serde(rename = "POSTf")]
    PostForm,
}

/// motion conversion specifiers usable in web hook URLs.
///
/// See <https://motion-project.github.io/motion_config.html#conversion_specifiers>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum WebHookSpecifier {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Time,
    Event,
    FrameNumber,
    CameraId,
    ChangedPixels,
    NoiseLevel,
    Width,
    Height,
    MotionWidth,
    MotionHeight,
    MotionCenterX,
    MotionCenterY,
    FilePath,
    FileType,
    Threshold,
    DespeckleLabels,
    CameraName,
    Fps,
    Host,
    MotionVersion,
}

impl WebHookSpecifier {
    /// The `%` sequence motion substitutes.
    pub fn specifier(self) -> &'static str {
        match self {
            Self::Year => "%Y",
            Self::Month => "%m",
            Self::Day => "%d",
            Self::Hour => "%H",
            Self::Minute => "%M",
            Self::Second => "%S",
            Self::Time => "%T",
            Self::Event => "%v",
            Self::FrameNumber => "%q",
            Self::CameraId => "%t",
            Self::ChangedPixels => "%D",
            Self::NoiseLevel => "%N",
            Self::Width => "%w",
            Self::Height => "%h",
            Self::MotionWidth => "%i",
            Self::MotionHeight => "%J",
            Self::MotionCenterX => "%K",
            Self::MotionCenterY => "%L",
            Self::FilePath => "%f",
            Self::FileType => "%n",
            Self::Threshold => "%o",
            Self::DespeckleLabels => "%Q",
            Self::CameraName => "%$",
            Self::Fps => "%{fps}",
            Self::Host => "%{host}",
            Self::MotionVersion => "%{ver}",
        }
    }
}
