//! jsonloom — a typed JSON codec over UTF-8 and UTF-16 symbol buffers.
//!
//! One generic engine serves both wire encodings: every buffer, reader,
//! writer and formatter is parameterized over a symbol type `S` (`u8` for
//! UTF-8, `u16` for UTF-16). Formatter lookup is monomorphization — for each
//! `(value type, symbol, resolver)` triple the compiler materializes one
//! stateless formatter singleton — so hot paths carry no per-element
//! dispatch.
//!
//! Composite formatters recurse over value structure: sequences, optionals,
//! enumerations declared with [`json_enum!`] and aggregates declared with
//! [`json_object!`]. Sequence decoding builds through a shared scratch-buffer
//! pool, and each triple keeps a sticky size hint so steady-state sessions
//! avoid reallocation.
//!
//! ```
//! jsonloom::json_object! {
//!     /// A scored entry.
//!     pub struct Entry {
//!         pub name: String,
//!         pub score: Option<u32>,
//!     }
//! }
//!
//! let entries = vec![
//!     Entry { name: "ada".into(), score: Some(9) },
//!     Entry { name: "brin".into(), score: None },
//! ];
//!
//! let json = jsonloom::utf8::to_string(&entries).unwrap();
//! // Absent members are omitted under the default resolver.
//! assert_eq!(json, r#"[{"name":"ada","score":9},{"name":"brin"}]"#);
//!
//! let back: Vec<Entry> = jsonloom::utf8::from_str(&json).unwrap();
//! assert_eq!(back, entries);
//! ```
//!
//! The async surfaces in [`utf8`] and [`utf16`] adapt byte streams at the
//! session boundary; the engine itself is strictly synchronous over a fully
//! available view.

mod error;
mod hints;
mod pool;
mod reader;
mod session;
mod text;
mod writer;

pub mod fmt;
pub mod utf16;
pub mod utf8;

pub use error::{ErrorKind, JsonError};
pub use reader::{JsonReader, DEFAULT_MAX_DEPTH};
pub use text::TextUnit;
pub use writer::JsonWriter;

#[cfg(test)]
mod tests;
