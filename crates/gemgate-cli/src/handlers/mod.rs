//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(args) -> Result<()>`
//! - Thin wrappers that build what the command needs from its arguments,
//!   call into `gemgate-proxy`, and format output for the terminal.

pub mod ask;
pub mod serve;
