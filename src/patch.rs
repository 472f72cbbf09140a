//! Scan-and-fix pass over a frame's `design_data`.

use serde::Serialize;
use serde_json::Value;

use crate::types::{self, ELEMENTS_KEY, LOCKED_KEY};

/// What happened to one image element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageOutcome {
   /// Position in the `elements` sequence.
   pub index: usize,
   pub name:  Option<String>,
   /// `true` if `isLocked` was set by this pass.
   pub fixed: bool,
}

/// Result of [`lock_images`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LockReport {
   /// Number of elements found, of any type.
   pub total:  usize,
   /// One entry per image element, in element order.
   pub images: Vec<ImageOutcome>,
}

impl LockReport {
   pub fn changed(&self) -> bool {
      self.images.iter().any(|img| img.fixed)
   }

   pub fn fixed_count(&self) -> usize {
      self.images.iter().filter(|img| img.fixed).count()
   }
}

/// Sets `isLocked = true` on every image element whose flag is falsy.
///
/// Mutates `design_data` in place. Non-image elements are not touched. A
/// payload without an `elements` array is reported as empty.
pub fn lock_images(design_data: &mut Value) -> LockReport {
   let Some(elements) = design_data.get_mut(ELEMENTS_KEY).and_then(Value::as_array_mut) else {
      tracing::warn!("design_data has no elements array; nothing to inspect");
      return LockReport::default();
   };

   let mut report = LockReport { total: elements.len(), images: Vec::new() };
   for (index, element) in elements.iter_mut().enumerate() {
      if !types::is_image(element) {
         continue;
      }
      let name = types::element_name(element).map(str::to_owned);
      let fixed = !types::is_locked(element);
      if fixed && let Some(obj) = element.as_object_mut() {
         obj.insert(LOCKED_KEY.to_string(), Value::Bool(true));
      }
      report.images.push(ImageOutcome { index, name, fixed });
   }
   report
}

#[cfg(test)]
mod tests {
   use serde_json::json;

   use super::*;

   #[test]
   fn locks_unlocked_image_and_leaves_text() {
      let mut data = json!({
         "elements": [
            {"type": "image", "name": "A", "isLocked": false},
            {"type": "text", "name": "B"}
         ]
      });
      let report = lock_images(&mut data);

      assert_eq!(
         data,
         json!({
            "elements": [
               {"type": "image", "name": "A", "isLocked": true},
               {"type": "text", "name": "B"}
            ]
         })
      );
      assert_eq!(report.total, 2);
      assert_eq!(report.images, vec![ImageOutcome {
         index: 0,
         name:  Some("A".to_string()),
         fixed: true,
      }]);
      assert!(report.changed());
   }

   #[test]
   fn already_locked_is_unchanged() {
      let mut data = json!({"elements": [{"type": "image", "name": "A", "isLocked": true}]});
      let before = data.clone();
      let report = lock_images(&mut data);
      assert_eq!(data, before);
      assert!(!report.changed());
      assert_eq!(report.images.len(), 1);
   }

   #[test]
   fn missing_flag_is_added() {
      let mut data = json!({"elements": [{"type": "image", "name": "logo"}]});
      let report = lock_images(&mut data);
      assert_eq!(data["elements"][0]["isLocked"], json!(true));
      assert_eq!(report.fixed_count(), 1);
   }

   #[test]
   fn second_pass_is_a_no_op() {
      let mut data = json!({
         "elements": [
            {"type": "image", "isLocked": 0},
            {"type": "shape"},
            {"type": "image"}
         ]
      });
      assert_eq!(lock_images(&mut data).fixed_count(), 2);
      let after_first = data.clone();
      assert!(!lock_images(&mut data).changed());
      assert_eq!(data, after_first);
   }

   #[test]
   fn truthy_non_bool_counts_as_locked() {
      let mut data = json!({"elements": [{"type": "image", "isLocked": "yes"}]});
      let report = lock_images(&mut data);
      assert!(!report.changed());
      assert_eq!(data["elements"][0]["isLocked"], json!("yes"));
   }

   #[test]
   fn key_order_is_preserved() {
      let mut data: Value =
         serde_json::from_str(r#"{"elements":[{"z":1,"type":"image","a":2}],"background":"x"}"#)
            .unwrap();
      lock_images(&mut data);
      assert_eq!(
         serde_json::to_string(&data).unwrap(),
         r#"{"elements":[{"z":1,"type":"image","a":2,"isLocked":true}],"background":"x"}"#
      );
   }

   #[test]
   fn malformed_payloads_report_nothing() {
      for mut data in [json!(null), json!({}), json!({"elements": "nope"}), json!([1, 2])] {
         let before = data.clone();
         assert_eq!(lock_images(&mut data), LockReport::default());
         assert_eq!(data, before);
      }
   }

   #[test]
   fn non_object_elements_are_counted_but_skipped() {
      let mut data = json!({"elements": ["image", 3, {"type": "image"}]});
      let report = lock_images(&mut data);
      assert_eq!(report.total, 3);
      assert_eq!(report.images.len(), 1);
      assert_eq!(report.images[0].index, 2);
   }
}
