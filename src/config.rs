//! Configuration for the store connection and the target frame.
//!
//! Settings are layered with figment: built-in defaults, then a TOML file,
//! then `FRAME_LOCK_*` environment variables. Command-line flags are applied
//! last by the binary through [`Config::with_overrides`].

use std::{
   collections::BTreeMap,
   path::{Path, PathBuf},
   time::Duration,
};

use directories::ProjectDirs;
use figment::{
   Figment,
   providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ConfigError, Result};

pub const ENV_PREFIX: &str = "FRAME_LOCK_";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Keys whose env values are taken verbatim instead of parsed as figment
/// values, so `00123` stays `00123`.
const TEXT_KEYS: &[&str] = &["supabase_url", "supabase_key", "frame_id"];

/// Connection settings and target frame, merged from every layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
   #[serde(deserialize_with = "text_or_scalar")]
   pub supabase_url:       String,
   #[serde(deserialize_with = "text_or_scalar")]
   pub supabase_key:       String,
   #[serde(deserialize_with = "text_or_scalar")]
   pub frame_id:           String,
   pub request_timeout_ms: u64,
}

impl Default for Config {
   fn default() -> Self {
      Self {
         supabase_url:       String::new(),
         supabase_key:       String::new(),
         frame_id:           String::new(),
         request_timeout_ms: 30_000,
      }
   }
}

/// Values taken from the command line; `None` leaves the merged value alone.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
   pub supabase_url: Option<String>,
   pub supabase_key: Option<String>,
   pub frame_id:     Option<String>,
}

impl Config {
   /// Loads the configuration from `path` if given, otherwise from the
   /// per-user config file when it exists, then from the environment.
   pub fn load(path: Option<&Path>) -> Result<Self> {
      if let Some(path) = path
         && !path.is_file()
      {
         return Err(ConfigError::FileNotFound(path.to_path_buf()).into());
      }
      let file = path.map(Path::to_path_buf).or_else(default_config_path);
      let config = Self::figment(file.as_deref()).extract()?;
      Ok(config)
   }

   pub fn figment(file: Option<&Path>) -> Figment {
      let mut figment = Figment::from(Serialized::defaults(Self::default()));
      if let Some(file) = file {
         tracing::debug!("reading config from {}", file.display());
         figment = figment.merge(Toml::file(file));
      }
      let text: BTreeMap<String, String> = Env::prefixed(ENV_PREFIX)
         .only(TEXT_KEYS)
         .iter()
         .map(|(key, value)| (key.as_str().to_string(), value))
         .collect();
      figment
         .merge(Env::prefixed(ENV_PREFIX).ignore(TEXT_KEYS).lowercase(true))
         .merge(Serialized::defaults(text))
   }

   pub fn with_overrides(mut self, overrides: Overrides) -> Self {
      if let Some(url) = overrides.supabase_url {
         self.supabase_url = url;
      }
      if let Some(key) = overrides.supabase_key {
         self.supabase_key = key;
      }
      if let Some(id) = overrides.frame_id {
         self.frame_id = id;
      }
      self
   }

   /// Checks the settings every store call needs.
   pub fn validate_store(&self) -> Result<()> {
      let url = self.supabase_url.trim();
      if url.is_empty() {
         return Err(
            ConfigError::Missing {
               setting: "store url",
               flag:    "--url",
               env:     "FRAME_LOCK_SUPABASE_URL",
            }
            .into(),
         );
      }
      if !(url.starts_with("https://") || url.starts_with("http://")) {
         return Err(ConfigError::InvalidUrl(url.to_string()).into());
      }
      if self.supabase_key.trim().is_empty() {
         return Err(
            ConfigError::Missing {
               setting: "api key",
               flag:    "--api-key",
               env:     "FRAME_LOCK_SUPABASE_KEY",
            }
            .into(),
         );
      }
      Ok(())
   }

   /// Checks the store settings plus the target frame id.
   pub fn validate_fix(&self) -> Result<()> {
      self.validate_store()?;
      if self.frame_id.trim().is_empty() {
         return Err(
            ConfigError::Missing {
               setting: "frame id",
               flag:    "the FRAME_ID argument",
               env:     "FRAME_LOCK_FRAME_ID",
            }
            .into(),
         );
      }
      Ok(())
   }

   /// Base URL without trailing slashes.
   pub fn base_url(&self) -> &str {
      self.supabase_url.trim().trim_end_matches('/')
   }

   pub fn request_timeout(&self) -> Option<Duration> {
      (self.request_timeout_ms > 0).then(|| Duration::from_millis(self.request_timeout_ms))
   }
}

/// Accepts a bare number or bool where a string is expected, e.g.
/// `frame_id = 12345` in TOML.
fn text_or_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
   D: Deserializer<'de>,
{
   #[derive(Deserialize)]
   #[serde(untagged)]
   enum Scalar {
      Text(String),
      Unsigned(u64),
      Signed(i64),
      Float(f64),
      Flag(bool),
   }

   Ok(match Scalar::deserialize(deserializer)? {
      Scalar::Text(s) => s,
      Scalar::Unsigned(n) => n.to_string(),
      Scalar::Signed(n) => n.to_string(),
      Scalar::Float(n) => n.to_string(),
      Scalar::Flag(b) => b.to_string(),
   })
}

/// `<user config dir>/frame-lock/config.toml`, only if the file exists.
pub fn default_config_path() -> Option<PathBuf> {
   let dirs = ProjectDirs::from("", "", "frame-lock")?;
   let path = dirs.config_dir().join(CONFIG_FILE_NAME);
   path.exists().then_some(path)
}
