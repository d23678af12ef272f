//! Paragraph text shaping: sentences, fixed-budget lines, and noise filtering.

mod filter;
mod sentences;
mod wrap;

pub use filter::{retain_lines, retain_parts};
pub use sentences::{Sentences, sentences};
pub use wrap::{Line, LineKind, LineWrapper, char_len, reconstruct, wrap_paragraph};
