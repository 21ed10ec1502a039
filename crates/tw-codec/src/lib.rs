//! Byte ingress, telnet filtering, CP437 decoding, ANSI stripping, and line
//! assembly (spec §2 items 1-3, §4.1-§4.3).
//!
//! Nothing in this crate knows about sectors, ports, or any other game
//! concept — it only turns raw bytes into logical lines of decoded text,
//! the same separation of concerns the teacher workspace draws between
//! `core-input` (raw event plumbing) and `core-actions` (semantic dispatch).

mod ansi;
mod codec;
mod decode;
mod line;
mod telnet;
mod writer;

pub use ansi::AnsiStripper;
pub use codec::{Codec, IngestOutput};
pub use decode::decode_cp437;
pub use line::{LineAssembler, DEFAULT_MAX_LINE_BYTES};
pub use telnet::{FilterOutput, TelnetFilter};
pub use writer::{OutboundWriter, RecordingWriter, WriterError};
