use std::path::PathBuf;

use thiserror::Error;

/// Main error type for frame-lock.
///
/// Covers configuration problems, HTTP transport failures, payload decoding,
/// and the two domain outcomes the operator cares about: the frame was not
/// found, or the store refused the write.
#[derive(Debug, Error)]
pub enum Error {
   /// Configuration-related error occurred.
   #[error("config error: {0}")]
   Config(#[from] ConfigError),

   /// HTTP request or response error occurred.
   #[error("http error: {0}")]
   Http(#[from] HttpError),

   /// JSON serialization or deserialization error occurred.
   #[error("json error: {0}")]
   Json(#[from] serde_json::Error),

   /// No frame matched the identifier, or the read was refused.
   #[error("frame {frame_id} not found")]
   NotFound { frame_id: String },

   /// The store answered the write with a status other than 200 or 204.
   #[error("store rejected update with HTTP {status}: {body}")]
   WriteRejected { status: u16, body: String },

   /// Failure already printed to the user, e.g. a ping that got a non-2xx
   /// answer.
   #[error("{message}")]
   Reported { message: String, exit_code: i32 },
}

impl Error {
   pub const fn exit_code(&self) -> i32 {
      match self {
         Self::Reported { exit_code, .. } => *exit_code,
         Self::NotFound { .. } => 2,
         Self::WriteRejected { .. } => 3,
         Self::Config(_) => 4,
         Self::Http(_) | Self::Json(_) => 1,
      }
   }
}

/// Errors raised while assembling or validating [`crate::config::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
   /// A required setting is empty after all layers were merged.
   #[error("missing {setting}; pass {flag} or set {env}")]
   Missing { setting: &'static str, flag: &'static str, env: &'static str },

   /// A config file was named explicitly but does not exist.
   #[error("config file not found: {path}", path = _0.display())]
   FileNotFound(PathBuf),

   /// The store URL is not an http(s) URL.
   #[error("invalid store url {0:?}: expected http:// or https://")]
   InvalidUrl(String),

   /// A provider produced a value of the wrong shape.
   #[error("failed to load configuration: {0}")]
   Extract(#[from] Box<figment::Error>),
}

/// Errors that can occur during HTTP operations.
#[derive(Debug, Error)]
pub enum HttpError {
   /// HTTP request failed (network error, timeout, etc.).
   #[error("request failed: {0}")]
   Request(#[from] reqwest::Error),

   /// The API key cannot be carried in a header.
   #[error("invalid header value for {0}")]
   InvalidHeader(&'static str),
}

impl From<reqwest::Error> for Error {
   fn from(e: reqwest::Error) -> Self {
      Self::Http(HttpError::Request(e))
   }
}

impl From<figment::Error> for Error {
   fn from(e: figment::Error) -> Self {
      Self::Config(ConfigError::Extract(Box::new(e)))
   }
}

/// Standard result type using [`enum@Error`] as the default error type
pub type Result<T, E = Error> = std::result::Result<T, E>;
