//! Human-readable views of a decoded grammar.
//!
//! - [`TraceWriter`] renders decode events as they happen.
//! - [`write_summary`] lists every rule with its alternates and symbol offsets.
//! - [`write_reference_check`] flags dangling and unreferenced rules.
//! - [`write_listing`] prints one BNF-style line per rule.
//! - [`write_hex_dump`] prints the raw token words.
//!
//! Rendering is a presentation concern; other code should read the
//! [`Grammar`](crate::grammar::Grammar) directly rather than parse these.
//!
//! ```
//! use ruletab::decode::decode_traced;
//! use ruletab::report::{summary, TraceWriter};
//!
//! let mut trace = TraceWriter::new(String::new());
//! let grammar = decode_traced(&[3, 4, 2, 97, 122, 0, 0, 0xFFFF], &mut trace).unwrap();
//!
//! assert!(trace.finish().unwrap().starts_with("grammar {"));
//! assert!(summary(&grammar).contains("['a'-'z']"));
//! ```

mod dump;
mod listing;
mod palette;
mod summary;
mod trace_writer;

pub use dump::{hex_dump, write_hex_dump, WORDS_PER_LINE};
pub use listing::{listing, write_listing};
pub use palette::Palette;
pub use summary::{summary, write_reference_check, write_summary};
pub use trace_writer::TraceWriter;
