//! The parser core's single public entry point (spec §6).
//!
//! [`Parser`] wires the five pipeline stages described in spec §2 together:
//! [`tw_codec::Codec`] turns raw bytes into decoded text and logical lines;
//! [`Dispatcher`] interprets each line against the two-axis state machine
//! and mutates/persists game state through a [`tw_store::GameStore`]; an
//! optional [`tw_script::ScriptEngine`] is notified per completed line; and
//! a [`tw_events::TuiObserver`] receives the forwarded text plus every
//! derived event. There is no background thread and no internal queue
//! (spec §5): a call to [`Parser::write`] runs the whole pipeline to
//! completion before returning.

pub mod config;
pub mod dispatch;
pub mod dispatcher;
pub mod persist;
pub mod sector_record;
pub mod state;
pub mod stats_tracker;
pub mod text_util;

pub use config::ParserConfig;
pub use dispatcher::Dispatcher;
pub use state::{Display, SectorPosition};

use tw_codec::{Codec, OutboundWriter, WriterError};
use tw_events::TuiObserver;
use tw_script::ScriptEngine;
use tw_store::GameStore;

/// The bidirectional proxy's game-state parser core.
///
/// Holds no lock-protected shared state: `store`, `observer`, and `engine`
/// are borrowed for the duration of a single [`Parser::write`] call rather
/// than owned, so the caller decides their lifetime and sharing strategy
/// (spec §5 "Bounded mutable state without sharing").
pub struct Parser {
    codec: Codec,
    dispatcher: Dispatcher,
    engine: Option<Box<dyn ScriptEngine>>,
    stopped: bool,
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            codec: Codec::new(config.max_line_bytes),
            dispatcher: Dispatcher::new(config.history_size),
            engine: None,
            stopped: false,
        }
    }

    /// Attach a scripting engine. Absence is a silent no-op per the
    /// capability contract of spec §6/§9.
    pub fn set_script_engine(&mut self, engine: Option<Box<dyn ScriptEngine>>) {
        self.engine = engine;
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Disable further processing. Once set, [`Parser::write`] becomes a
    /// no-op (spec §5 "Cancellation").
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Ingest one chunk of raw bytes end to end: telnet filter, CP437
    /// decode, ANSI strip, line assembly, dispatch, persistence, and event
    /// emission, all before returning (spec §5 "Scheduling model").
    ///
    /// `write(&[])` is a no-op. A stopped parser is also a no-op. The only
    /// error this can return is a writer error from in-band telnet
    /// negotiation (spec §4.1); bytes already decoded before the failure
    /// are still processed.
    pub fn write(
        &mut self,
        bytes: &[u8],
        outbound: &mut dyn OutboundWriter,
        store: &mut dyn GameStore,
        observer: &mut dyn TuiObserver,
    ) -> Result<(), WriterError> {
        if self.stopped || bytes.is_empty() {
            return Ok(());
        }

        let out = self.codec.ingest(bytes, outbound);
        if !out.decoded.is_empty() {
            observer.on_raw_data(&out.decoded);
        }

        for line in &out.completed_lines {
            self.dispatcher.handle_line(line, store, observer);
            tw_script::notify_line(&mut self.engine, line);
        }

        // Partial-line prompt recognition (spec §4.3, §9): re-check the
        // still-growing current line after a chunk that did not end on a
        // terminator, so prompts like `Command [TL=...] (N) ?` are caught
        // without waiting for a CR/LF that never arrives.
        let partial = self.codec.current_line().to_string();
        if !partial.is_empty() {
            self.dispatcher.check_partial_prompt(&partial, store, observer);
        }

        if let Some(err) = out.writer_error {
            return Err(err);
        }
        Ok(())
    }

    /// Forward bytes straight to the TUI without parsing (spec §6, used by
    /// scripted echo).
    pub fn inject_tui(&self, bytes: &[u8], observer: &mut dyn TuiObserver) {
        let text = String::from_utf8_lossy(bytes);
        observer.on_raw_data(&text);
    }

    /// Reset all transient state: display/sector-position, in-progress
    /// sector, stats tracker, live stats, and message history (spec §8
    /// "Idempotent reset"). Does not reopen a stopped parser.
    pub fn reset(&mut self) {
        self.dispatcher.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tw_codec::RecordingWriter;
    use tw_events::NoopObserver;
    use tw_store::InMemoryGameStore;

    #[test]
    fn empty_write_is_a_noop() {
        let mut parser = Parser::new(ParserConfig::default());
        let mut writer = RecordingWriter::default();
        let mut store = InMemoryGameStore::new();
        let mut observer = NoopObserver;
        parser.write(&[], &mut writer, &mut store, &mut observer).unwrap();
        assert_eq!(parser.dispatcher().display(), Display::None);
    }

    #[test]
    fn stopped_parser_ignores_further_bytes() {
        let mut parser = Parser::new(ParserConfig::default());
        let mut writer = RecordingWriter::default();
        let mut store = InMemoryGameStore::new();
        let mut observer = NoopObserver;
        parser.stop();
        parser
            .write(b"Sector  : 1 in Fed Space\r\n", &mut writer, &mut store, &mut observer)
            .unwrap();
        assert!(parser.is_stopped());
        assert_eq!(parser.dispatcher().display(), Display::None);
        assert!(store.sector(1).is_none());
    }

    #[test]
    fn chunk_split_command_prompt_sets_current_sector() {
        let mut parser = Parser::new(ParserConfig::default());
        let mut writer = RecordingWriter::default();
        let mut store = InMemoryGameStore::new();
        let mut observer = NoopObserver;

        parser
            .write(b"Command [TL=", &mut writer, &mut store, &mut observer)
            .unwrap();
        assert_eq!(parser.dispatcher().player_stats().identity.current_sector, None);

        parser
            .write(b"00150] (2500) ?", &mut writer, &mut store, &mut observer)
            .unwrap();
        assert_eq!(parser.dispatcher().player_stats().identity.current_sector, Some(2500));
        assert_eq!(parser.dispatcher().display(), Display::None);
    }

    #[test]
    fn raw_data_is_forwarded_to_observer() {
        struct Recorder(std::cell::RefCell<String>);
        impl TuiObserver for Recorder {
            fn on_raw_data(&mut self, decoded: &str) {
                self.0.borrow_mut().push_str(decoded);
            }
        }

        let mut parser = Parser::new(ParserConfig::default());
        let mut writer = RecordingWriter::default();
        let mut store = InMemoryGameStore::new();
        let mut observer = Recorder(std::cell::RefCell::new(String::new()));

        parser
            .write(b"hello\r\n", &mut writer, &mut store, &mut observer)
            .unwrap();
        assert_eq!(observer.0.into_inner(), "hello\r\n");
    }

    #[test]
    fn inject_tui_bypasses_parsing() {
        struct Recorder(std::cell::RefCell<Vec<String>>);
        impl TuiObserver for Recorder {
            fn on_raw_data(&mut self, decoded: &str) {
                self.0.borrow_mut().push(decoded.to_string());
            }
        }
        let parser = Parser::new(ParserConfig::default());
        let mut observer = Recorder(std::cell::RefCell::new(Vec::new()));
        parser.inject_tui(b"echoed text", &mut observer);
        assert_eq!(observer.0.into_inner(), vec!["echoed text".to_string()]);
    }

    #[test]
    fn full_sector_stream_persists_and_resets_for_next_sector() {
        let mut parser = Parser::new(ParserConfig::default());
        let mut writer = RecordingWriter::default();
        let mut store = InMemoryGameStore::new();
        let mut observer = NoopObserver;

        let stream = b"Sector  : 100 in Fed Space\r\n\
Ports   : Terran Outpost, Class 1 Port SSS\r\n\
Command [TL=00001] (100) ?";
        parser.write(stream, &mut writer, &mut store, &mut observer).unwrap();

        let sector = store.sector(100).expect("sector persisted");
        assert_eq!(sector.constellation, "Fed Space");
        assert!(sector.port.is_some());
    }
}
