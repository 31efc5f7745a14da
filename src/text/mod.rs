//! Plain-text helpers shared by the tracker and the injector
//!
//! ## Modules
//!
//! - `cursor`: Selection ranges inside an input value
//! - `offsets`: UTF-16 offset conversion, trimming and splicing

pub mod cursor;
pub mod offsets;

// Re-exports for convenience
pub use cursor::TextRange;
pub use offsets::{
    byte_to_utf16, find_unique_utf16, normalize_whitespace, slice_utf16, splice_utf16, trim_range,
    utf16_len, utf16_to_byte,
};
