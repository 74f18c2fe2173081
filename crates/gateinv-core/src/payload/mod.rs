//! Root extractor: locate the embedded bootstrap array inside a document.
//!
//! Pages ship the payload as a single JS string literal passed to a call such
//! as `enqueue("...");`. The literal is backslash-escaped JSON; decoding the
//! escapes and parsing the result yields the raw, index-addressed sequence the
//! resolver works on. Only the first wrapper in a document is considered.

mod error;
mod extract;
mod unescape;

pub use error::PayloadError;
pub use extract::{extract_root, PayloadExtractor, DEFAULT_CALL_NAME};
pub use unescape::{unescape, EscapeError};
