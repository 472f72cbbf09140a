//! Lock command.
//!
//! Fetches one frame, sets `isLocked` on its unlocked image elements and
//! writes the payload back when anything changed.

use console::style;
use serde::Serialize;

use crate::{
   Error, Result,
   config::Config,
   patch::{self, LockReport},
   store::{FrameStore, RestStore},
};

/// Flags accepted by the fix command.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixOptions {
   /// Inspect and report, but never write.
   pub dry_run: bool,
   /// Print one JSON summary instead of progress lines.
   pub json:    bool,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixSummary {
   pub frame_id:   String,
   pub frame_name: String,
   pub elements:   usize,
   pub images:     usize,
   pub fixed:      usize,
   pub updated:    bool,
   pub dry_run:    bool,
}

/// Executes the fix command against the configured store.
pub async fn execute(config: &Config, options: FixOptions) -> Result<()> {
   config.validate_fix()?;
   let store = RestStore::new(config)?;
   let summary = run(&store, config.frame_id.trim(), options).await?;

   if options.json {
      println!("{}", serde_json::to_string_pretty(&summary)?);
   }
   Ok(())
}

/// Runs fetch, scan-and-fix and (if needed) persist against `store`.
///
/// Returns [`Error::NotFound`] without writing when the frame is missing, and
/// [`Error::WriteRejected`] when the store refuses the update.
pub async fn run<S>(store: &S, frame_id: &str, options: FixOptions) -> Result<FixSummary>
where
   S: FrameStore + ?Sized,
{
   let human = !options.json;
   if human {
      println!("Fetching frame...");
   }

   let Some(mut frame) = store.fetch(frame_id).await? else {
      return Err(Error::NotFound { frame_id: frame_id.to_string() });
   };

   let report = patch::lock_images(&mut frame.design_data);
   if human {
      print_report(&frame.name, &report);
   }

   let mut summary = FixSummary {
      frame_id:   frame_id.to_string(),
      frame_name: frame.name,
      elements:   report.total,
      images:     report.images.len(),
      fixed:      report.fixed_count(),
      updated:    false,
      dry_run:    options.dry_run,
   };

   if !report.changed() {
      if human {
         println!("\n{}", style("No changes needed").green());
      }
      return Ok(summary);
   }

   if options.dry_run {
      if human {
         println!(
            "\n{} {} image element(s) would be locked; no update sent",
            style("Dry run:").yellow(),
            summary.fixed
         );
      }
      return Ok(summary);
   }

   if human {
      println!("\nUpdating frame...");
   }
   store.persist(frame_id, &frame.design_data).await?;
   summary.updated = true;
   tracing::info!("frame {frame_id} updated, {} image(s) locked", summary.fixed);

   if human {
      println!("{}", style("✓ Frame updated successfully!").green().bold());
   }
   Ok(summary)
}

fn print_report(frame_name: &str, report: &LockReport) {
   println!("Frame: {}", style(frame_name).bold());
   println!("Found {} elements", report.total);
   for image in &report.images {
      let name = image.name.as_deref().unwrap_or("<unnamed>");
      if image.fixed {
         println!("  [{}] Fixing image '{}' - setting isLocked=true", image.index, name);
      } else {
         println!("  [{}] Image '{}' already locked", image.index, style(name).dim());
      }
   }
}
