//! Wires the telnet filter, CP437 decoder, ANSI stripper and line assembler
//! into the single pipeline described by spec §2 items 1-3.

use crate::ansi::AnsiStripper;
use crate::decode::decode_cp437;
use crate::line::{LineAssembler, DEFAULT_MAX_LINE_BYTES};
use crate::telnet::TelnetFilter;
use crate::writer::{OutboundWriter, WriterError};

/// Output of pushing one chunk of raw bytes through the full ingress
/// pipeline.
#[derive(Debug, Default)]
pub struct IngestOutput {
    /// Decoded, ANSI-stripped text — forwarded verbatim to the TUI via
    /// `on_raw_data` (spec §6).
    pub decoded: String,
    /// Logical lines completed while consuming this chunk, in order.
    pub completed_lines: Vec<String>,
    pub writer_error: Option<WriterError>,
}

/// Stateful byte-to-line pipeline. One instance per connection.
#[derive(Debug)]
pub struct Codec {
    telnet: TelnetFilter,
    ansi: AnsiStripper,
    lines: LineAssembler,
}

impl Codec {
    pub fn new(max_line_bytes: usize) -> Self {
        Self {
            telnet: TelnetFilter::new(),
            ansi: AnsiStripper::new(),
            lines: LineAssembler::new(max_line_bytes),
        }
    }

    /// Push one chunk of raw bytes through telnet filtering, CP437 decoding,
    /// ANSI stripping, and line assembly.
    pub fn ingest(&mut self, bytes: &[u8], writer: &mut dyn OutboundWriter) -> IngestOutput {
        let filtered = self.telnet.filter(bytes, writer);
        let decoded_cp437 = decode_cp437(&filtered.data);
        let decoded = self.ansi.strip(&decoded_cp437);
        let completed_lines = self.lines.feed(&decoded);
        IngestOutput {
            decoded,
            completed_lines,
            writer_error: filtered.writer_error,
        }
    }

    /// The still-growing current line, for trailing-prompt recognition
    /// (spec §4.3, §9).
    pub fn current_line(&self) -> &str {
        self.lines.current_line()
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINE_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::RecordingWriter;

    #[test]
    fn end_to_end_decodes_and_splits_lines() {
        let mut codec = Codec::default();
        let mut writer = RecordingWriter::default();
        let input = b"Sector  : 1234 in Fed Space\r\nBeacon  : FedSpace, FedLaw Enforced\r\n";
        let out = codec.ingest(input, &mut writer);
        assert_eq!(
            out.completed_lines,
            vec![
                "Sector  : 1234 in Fed Space".to_string(),
                "Beacon  : FedSpace, FedLaw Enforced".to_string(),
            ]
        );
    }

    #[test]
    fn ansi_and_telnet_are_both_stripped_in_one_pass() {
        let mut codec = Codec::default();
        let mut writer = RecordingWriter::default();
        let mut input = vec![0x1Bu8, b'[', b'1', b'm'];
        input.extend_from_slice(b"colored");
        input.extend_from_slice(&[0x1B, b'[', b'0', b'm']);
        input.extend_from_slice(&[255, 251, 1]); // IAC WILL ECHO
        input.extend_from_slice(b"\r\n");
        let out = codec.ingest(&input, &mut writer);
        assert_eq!(out.completed_lines, vec!["colored".to_string()]);
    }

    #[test]
    fn chunk_insensitivity_for_a_split_line() {
        let mut writer = RecordingWriter::default();

        let mut codec_a = Codec::default();
        let whole = codec_a.ingest(b"Command [TL=00150] (2500) ?", &mut writer);

        let mut codec_b = Codec::default();
        let part1 = codec_b.ingest(b"Command [TL=", &mut writer);
        let part2 = codec_b.ingest(b"00150] (2500) ?", &mut writer);

        assert_eq!(whole.decoded, format!("{}{}", part1.decoded, part2.decoded));
        assert_eq!(codec_b.current_line(), "Command [TL=00150] (2500) ?");
    }
}
