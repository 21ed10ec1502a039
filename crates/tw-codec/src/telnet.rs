//! Telnet IAC filter (spec §4.1).
//!
//! Stateful across `filter()` calls so an `IAC` sequence split across chunk
//! boundaries (e.g. the option byte of `IAC DO <option>` arriving in the
//! next `write`) is still recognised correctly.

use crate::writer::{OutboundWriter, WriterError};

const IAC: u8 = 255;
const SE: u8 = 240;
const SB: u8 = 250;
const WILL: u8 = 251;
const WONT: u8 = 252;
const DO: u8 = 253;
const DONT: u8 = 254;

const OPT_BINARY: u8 = 0;
const OPT_ECHO: u8 = 1;
const OPT_SUPPRESS_GO_AHEAD: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Data,
    Iac,
    Negotiate(u8), // awaiting the option byte for WILL/WONT/DO/DONT
    Subnegotiation,
    SubnegotiationIac, // inside SB...SE, saw an IAC (expecting SE)
}

/// Result of filtering one chunk of raw bytes.
#[derive(Debug, Default)]
pub struct FilterOutput {
    /// Bytes with every telnet command sequence removed.
    pub data: Vec<u8>,
    /// Set if the outbound writer failed while negotiating. Bytes already
    /// cleaned are still returned in `data` — the error does not unwind
    /// processing of the chunk (spec §4.1).
    pub writer_error: Option<WriterError>,
}

/// Stateful telnet command filter. One instance per connection.
#[derive(Debug, Default)]
pub struct TelnetFilter {
    state: State,
}

impl Default for State {
    fn default() -> Self {
        State::Data
    }
}

impl TelnetFilter {
    pub fn new() -> Self {
        Self { state: State::Data }
    }

    /// Remove telnet command bytes from `bytes`, negotiating basic options
    /// through `writer` as they are encountered.
    pub fn filter(&mut self, bytes: &[u8], writer: &mut dyn OutboundWriter) -> FilterOutput {
        let mut out = FilterOutput {
            data: Vec::with_capacity(bytes.len()),
            writer_error: None,
        };

        for &byte in bytes {
            match self.state {
                State::Data => {
                    if byte == IAC {
                        self.state = State::Iac;
                    } else {
                        out.data.push(byte);
                    }
                }
                State::Iac => match byte {
                    IAC => {
                        // Escaped 0xFF data byte.
                        out.data.push(IAC);
                        self.state = State::Data;
                    }
                    WILL | WONT | DO | DONT => {
                        self.state = State::Negotiate(byte);
                    }
                    SB => {
                        self.state = State::Subnegotiation;
                    }
                    SE => {
                        // Stray SE outside subnegotiation: ignore.
                        self.state = State::Data;
                    }
                    _ => {
                        // NOP / DM / BRK / IP / AO / AYT / EC / EL / GA: two-byte
                        // commands with no payload, nothing further to consume.
                        self.state = State::Data;
                    }
                },
                State::Negotiate(command) => {
                    if let Err(e) = Self::negotiate(command, byte, writer) {
                        out.writer_error.get_or_insert(e);
                    }
                    self.state = State::Data;
                }
                State::Subnegotiation => {
                    if byte == IAC {
                        self.state = State::SubnegotiationIac;
                    }
                    // else: subnegotiation payload byte, discard.
                }
                State::SubnegotiationIac => {
                    if byte == SE {
                        self.state = State::Data;
                    } else {
                        // Escaped IAC inside subnegotiation payload; stay inside.
                        self.state = State::Subnegotiation;
                    }
                }
            }
        }

        out
    }

    fn negotiate(
        command: u8,
        option: u8,
        writer: &mut dyn OutboundWriter,
    ) -> Result<(), WriterError> {
        let reply = match command {
            DO => match option {
                OPT_BINARY | OPT_ECHO | OPT_SUPPRESS_GO_AHEAD => [IAC, WILL, option],
                _ => [IAC, WONT, option],
            },
            WILL => match option {
                OPT_BINARY | OPT_SUPPRESS_GO_AHEAD | OPT_ECHO => [IAC, DO, option],
                _ => [IAC, DONT, option],
            },
            WONT | DONT => return Ok(()),
            _ => return Ok(()),
        };
        writer.write(&reply)
    }
}
