//! Store reachability check.
//!
//! Sends one authenticated request to the REST root so a cron job or an
//! operator can confirm the project is up and the key is accepted.

use console::style;

use crate::{
   Error, Result,
   config::Config,
   store::{RestStore, truncate_body},
};

/// Executes the ping command.
pub async fn execute(config: &Config) -> Result<()> {
   config.validate_store()?;
   let store = RestStore::new(config)?;

   let (status, body) = store.ping().await?;
   if status.is_success() {
      println!(
         "{} Store reachable at {} {}",
         style("✓").green(),
         config.base_url(),
         style(format!("(HTTP {})", status.as_u16())).dim()
      );
      return Ok(());
   }

   let message = format!("ping failed: HTTP {} {}", status.as_u16(), truncate_body(&body));
   eprintln!("{} {}", style("✗").red(), message);
   Err(Error::Reported { message, exit_code: 1 })
}
