// motioneye-api: Async Rust client for the motionEye surveillance server

pub mod auth;
pub mod camera;
pub mod client;
pub mod error;
pub mod request;
pub mod signature;
pub mod transport;

pub use auth::{CredentialSet, Credentials, DEFAULT_ADMIN_USERNAME, DEFAULT_SURVEILLANCE_USERNAME};
pub use camera::{
    CameraAction, CameraConfig, DEFAULT_PORT, WebHookHttpMethod, WebHookSpecifier,
    is_camera_streaming, is_file_type_image, is_file_type_movie, keys,
};
pub use client::{ClientConfig, MotionEyeClient};
pub use error::Error;
pub use request::{ApiRequest, build_signed_url, strip_leading_slash};
pub use signature::compute_signature;
pub use transport::TransportConfig;
