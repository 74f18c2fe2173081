//! HAR (HTTP Archive) input: isolate the response body carrying the payload.
//!
//! Captures usually hold dozens of responses. Only the first body containing
//! the marker substring (after any base64 transport decoding) is handed on to
//! the root extractor.

mod parse;
mod select;

pub use select::{read_har_body, select_bootstrap_body, HarError};
