//! Access to the remote `frames` table.
//!
//! [`FrameStore`] is the seam the fix flow is written against; [`RestStore`]
//! implements it over the PostgREST API exposed by Supabase.

use async_trait::async_trait;
use reqwest::{
   Client, StatusCode,
   header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde_json::Value;

use crate::{
   Result,
   config::Config,
   error::{Error, HttpError},
   types::{DesignDataPatch, Frame},
};

const FRAMES_PATH: &str = "/rest/v1/frames";
const ROOT_PATH: &str = "/rest/v1/";
const FRAME_COLUMNS: &str = "id,name,design_data";
const MAX_ERROR_BODY: usize = 512;

/// Read and write access to frame records.
#[async_trait]
pub trait FrameStore: Send + Sync {
   /// Returns the first frame matching `frame_id`, or `None` if the read
   /// matched nothing or was refused.
   async fn fetch(&self, frame_id: &str) -> Result<Option<Frame>>;

   /// Replaces the whole `design_data` of the frame. Succeeds on 200 or 204.
   async fn persist(&self, frame_id: &str, design_data: &Value) -> Result<()>;
}

/// [`FrameStore`] backed by the Supabase REST endpoint.
pub struct RestStore {
   client:   Client,
   base_url: String,
}

impl RestStore {
   pub fn new(config: &Config) -> Result<Self> {
      let key = config.supabase_key.trim();
      let mut headers = HeaderMap::new();
      headers.insert(
         "apikey",
         HeaderValue::from_str(key).map_err(|_| HttpError::InvalidHeader("apikey"))?,
      );
      let mut bearer = HeaderValue::from_str(&format!("Bearer {key}"))
         .map_err(|_| HttpError::InvalidHeader("authorization"))?;
      bearer.set_sensitive(true);
      headers.insert(AUTHORIZATION, bearer);

      let mut builder = Client::builder().default_headers(headers);
      if let Some(timeout) = config.request_timeout() {
         builder = builder.timeout(timeout);
      }

      Ok(Self { client: builder.build()?, base_url: config.base_url().to_string() })
   }

   pub fn frames_url(&self) -> String {
      format!("{}{FRAMES_PATH}", self.base_url)
   }

   /// Issues an authenticated GET against the REST root and returns the
   /// status and body.
   pub async fn ping(&self) -> Result<(StatusCode, String)> {
      let url = format!("{}{ROOT_PATH}", self.base_url);
      tracing::debug!("GET {url}");
      let response = self.client.get(&url).send().await?;
      let status = response.status();
      let body = response.text().await?;
      Ok((status, body))
   }
}

/// PostgREST equality filter for the `id` column.
pub fn id_filter(frame_id: &str) -> (&'static str, String) {
   ("id", format!("eq.{frame_id}"))
}

pub fn is_write_success(status: StatusCode) -> bool {
   status == StatusCode::OK || status == StatusCode::NO_CONTENT
}

/// Cuts an error body down to something printable on one screen.
pub fn truncate_body(body: &str) -> String {
   let body = body.trim();
   if body.len() <= MAX_ERROR_BODY {
      return body.to_string();
   }
   let mut end = MAX_ERROR_BODY;
   while !body.is_char_boundary(end) {
      end -= 1;
   }
   format!("{}...", &body[..end])
}

#[async_trait]
impl FrameStore for RestStore {
   async fn fetch(&self, frame_id: &str) -> Result<Option<Frame>> {
      let url = self.frames_url();
      let (key, value) = id_filter(frame_id);
      tracing::debug!("GET {url}?{key}={value}&select={FRAME_COLUMNS}");

      let response = self
         .client
         .get(&url)
         .query(&[(key, value.as_str()), ("select", FRAME_COLUMNS)])
         .send()
         .await?;

      let status = response.status();
      if !status.is_success() {
         tracing::warn!("frame read returned HTTP {}", status.as_u16());
         return Ok(None);
      }

      let body = response.bytes().await?;
      let frames: Vec<Frame> = serde_json::from_slice(&body)?;
      tracing::debug!("frame read matched {} row(s)", frames.len());
      Ok(frames.into_iter().next())
   }

   async fn persist(&self, frame_id: &str, design_data: &Value) -> Result<()> {
      let url = self.frames_url();
      let (key, value) = id_filter(frame_id);
      tracing::info!("PATCH {url}?{key}={value}");

      let response = self
         .client
         .patch(&url)
         .query(&[(key, value.as_str())])
         .header(CONTENT_TYPE, "application/json")
         .header("prefer", "return=representation")
         .json(&DesignDataPatch { design_data })
         .send()
         .await?;

      let status = response.status();
      if is_write_success(status) {
         return Ok(());
      }
      let body = response.text().await.unwrap_or_default();
      Err(Error::WriteRejected { status: status.as_u16(), body: truncate_body(&body) })
   }
}
