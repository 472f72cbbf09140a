//! Frame records as returned by the store, and helpers for reading element
//! fields out of the untyped `design_data` payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ELEMENTS_KEY: &str = "elements";
pub const TYPE_KEY: &str = "type";
pub const NAME_KEY: &str = "name";
pub const LOCKED_KEY: &str = "isLocked";
pub const IMAGE_TYPE: &str = "image";

/// A single design-document record.
///
/// `design_data` stays a raw [`Value`] so fields this tool never looks at are
/// written back exactly as they were read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
   pub id:          String,
   #[serde(default)]
   pub name:        String,
   #[serde(default)]
   pub design_data: Value,
}

/// Body of the write request.
#[derive(Debug, Serialize)]
pub struct DesignDataPatch<'a> {
   pub design_data: &'a Value,
}

pub fn element_type(element: &Value) -> Option<&str> {
   element.get(TYPE_KEY).and_then(Value::as_str)
}

pub fn element_name(element: &Value) -> Option<&str> {
   element.get(NAME_KEY).and_then(Value::as_str)
}

pub fn is_image(element: &Value) -> bool {
   element_type(element) == Some(IMAGE_TYPE)
}

/// Loose truthiness: `null`, `false`, zero, and empty strings, arrays or
/// objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
   match value {
      Value::Null => false,
      Value::Bool(b) => *b,
      Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
      Value::String(s) => !s.is_empty(),
      Value::Array(a) => !a.is_empty(),
      Value::Object(o) => !o.is_empty(),
   }
}

pub fn is_locked(element: &Value) -> bool {
   element.get(LOCKED_KEY).is_some_and(is_truthy)
}

#[cfg(test)]
mod tests {
   use serde_json::json;

   use super::*;

   #[test]
   fn falsy_values() {
      for v in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
         assert!(!is_truthy(&v), "{v} should be falsy");
      }
      for v in [json!(true), json!(1), json!("no"), json!([0]), json!({"a": 1})] {
         assert!(is_truthy(&v), "{v} should be truthy");
      }
   }

   #[test]
   fn missing_lock_is_unlocked() {
      assert!(!is_locked(&json!({"type": "image"})));
      assert!(!is_locked(&json!({"type": "image", "isLocked": false})));
      assert!(is_locked(&json!({"type": "image", "isLocked": true})));
   }

   #[test]
   fn non_object_elements_are_not_images() {
      assert!(!is_image(&json!("image")));
      assert!(!is_image(&json!({"type": "Image"})));
      assert!(is_image(&json!({"type": "image"})));
   }

   #[test]
   fn frame_tolerates_missing_optional_fields() {
      let frame: Frame = serde_json::from_value(json!({"id": "f1"})).unwrap();
      assert_eq!(frame.name, "");
      assert_eq!(frame.design_data, Value::Null);
   }
}
