#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::{collections::HashMap, sync::Mutex};

use frame_lock::{Error, Result, store::FrameStore, types::Frame};
use serde_json::Value;

/// In-memory [`FrameStore`] that records every write it receives.
#[derive(Default)]
pub struct MemoryStore {
   frames:      Mutex<HashMap<String, Frame>>,
   writes:      Mutex<Vec<(String, Value)>>,
   fetches:     Mutex<usize>,
   reject_with: Option<u16>,
}

impl MemoryStore {
   pub fn new() -> Self {
      Self::default()
   }

   /// Answers every write with `status` instead of accepting it.
   pub fn rejecting(status: u16) -> Self {
      Self { reject_with: Some(status), ..Self::default() }
   }

   pub fn with_frame(self, id: &str, name: &str, design_data: Value) -> Self {
      self.frames.lock().unwrap().insert(id.to_string(), Frame {
         id: id.to_string(),
         name: name.to_string(),
         design_data,
      });
      self
   }

   pub fn writes(&self) -> Vec<(String, Value)> {
      self.writes.lock().unwrap().clone()
   }

   pub fn fetch_count(&self) -> usize {
      *self.fetches.lock().unwrap()
   }

   pub fn design_data(&self, id: &str) -> Option<Value> {
      self.frames.lock().unwrap().get(id).map(|f| f.design_data.clone())
   }
}

#[async_trait::async_trait]
impl FrameStore for MemoryStore {
   async fn fetch(&self, frame_id: &str) -> Result<Option<Frame>> {
      *self.fetches.lock().unwrap() += 1;
      Ok(self.frames.lock().unwrap().get(frame_id).cloned())
   }

   async fn persist(&self, frame_id: &str, design_data: &Value) -> Result<()> {
      self.writes
         .lock()
         .unwrap()
         .push((frame_id.to_string(), design_data.clone()));
      if let Some(status) = self.reject_with {
         return Err(Error::WriteRejected { status, body: "rejected".to_string() });
      }
      if let Some(frame) = self.frames.lock().unwrap().get_mut(frame_id) {
         frame.design_data = design_data.clone();
      }
      Ok(())
   }
}
