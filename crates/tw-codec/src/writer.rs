//! Outbound writer contract used for in-band telnet option negotiation
//! (spec §4.1 "Byte Ingress & Telnet Filter").

use thiserror::Error;

/// Surfaced only when the caller-supplied outbound writer itself fails; a
/// malformed or unexpected telnet sequence never produces one of these
/// (spec §4.1 "Fails only if the outbound writer reports an error").
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WriterError {
    #[error("outbound telnet writer failed: {0}")]
    Io(String),
}

/// Caller-supplied sink for telnet negotiation replies (`IAC WILL/DO ...`).
/// The real implementation forwards these bytes to the live socket; tests
/// substitute an in-memory recorder.
pub trait OutboundWriter {
    fn write(&mut self, bytes: &[u8]) -> Result<(), WriterError>;
}

/// Test/diagnostic writer that records every write and can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingWriter {
    pub written: Vec<u8>,
    pub fail_next: bool,
}

impl OutboundWriter for RecordingWriter {
    fn write(&mut self, bytes: &[u8]) -> Result<(), WriterError> {
        if self.fail_next {
            self.fail_next = false;
            return Err(WriterError::Io("simulated failure".to_string()));
        }
        self.written.extend_from_slice(bytes);
        Ok(())
    }
}
