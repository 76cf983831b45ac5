//! Connection-scoped domain values.
//!
//! A connection carries exactly one [`Prompt`] in and one [`ReplyText`] out.

mod prompt;
mod reply;

pub use prompt::{Prompt, READ_CAPACITY};
pub use reply::ReplyText;
