//! Rolling line assembler (spec §4.3).

/// Defensive upper bound on a single logical line, beyond which further
/// characters are silently dropped until the next terminator (spec §4.3).
pub const DEFAULT_MAX_LINE_BYTES: usize = 8192;

#[derive(Debug)]
pub struct LineAssembler {
    buffer: String,
    max_bytes: usize,
    /// Tracks whether the previous character was a bare `\r`, so that a
    /// following `\n` is swallowed as the second half of a CRLF pair rather
    /// than emitting a second, spurious empty line.
    saw_cr: bool,
}

impl LineAssembler {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            buffer: String::new(),
            max_bytes: max_bytes.max(1),
            saw_cr: false,
        }
    }

    /// Feed decoded, ANSI-stripped text through the assembler, returning
    /// every logical line completed while consuming `text`, in order.
    pub fn feed(&mut self, text: &str) -> Vec<String> {
        let mut completed = Vec::new();
        for ch in text.chars() {
            match ch {
                '\r' => {
                    completed.push(self.flush());
                    self.saw_cr = true;
                }
                '\n' => {
                    if self.saw_cr {
                        self.saw_cr = false;
                    } else {
                        completed.push(self.flush());
                    }
                }
                _ => {
                    self.saw_cr = false;
                    if self.buffer.len() < self.max_bytes {
                        self.buffer.push(ch);
                    }
                    // else: overflow, silently truncated, keep going.
                }
            }
        }
        completed
    }

    /// Read-only view of the still-accumulating current line, used by the
    /// dispatcher to recognise trailing prompts that never terminate with
    /// CR/LF (spec §4.3, §9 "Partial-line prompt detection").
    pub fn current_line(&self) -> &str {
        &self.buffer
    }

    fn flush(&mut self) -> String {
        self.saw_cr = false;
        std::mem::take(&mut self.buffer)
    }
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINE_BYTES)
    }
}
