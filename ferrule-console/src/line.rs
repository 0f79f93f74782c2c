//! Line assembly for the serial console
//!
//! Bytes arrive one at a time from the UART. A line ends at CR, LF or
//! CRLF (the LF of a CRLF pair is swallowed). Backspace and DEL erase the
//! previous character. Other control bytes and non-ASCII bytes are dropped.

use heapless::String;

/// Maximum line length in bytes
pub const MAX_LINE_LEN: usize = 128;

const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7F;

/// A complete input line (without terminator)
pub type Line = String<MAX_LINE_LEN>;

/// Errors during line assembly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded [`MAX_LINE_LEN`]; it is discarded up to the next terminator
    Overflow,
}

/// State machine for assembling lines
#[derive(Debug, Clone)]
pub struct LineBuffer {
    buffer: Line,
    state: LineState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineState {
    /// Collecting characters
    Collecting,
    /// Last byte was CR; an LF right now belongs to the same terminator
    AfterCr,
    /// Line overflowed; dropping bytes until the terminator
    Discarding,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    /// Create an empty line buffer
    pub const fn new() -> Self {
        Self {
            buffer: String::new(),
            state: LineState::Collecting,
        }
    }

    /// Reset the buffer state
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.state = LineState::Collecting;
    }

    /// Characters collected so far
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a line,
    /// `Ok(None)` when more bytes are needed, or `Err` once when a line
    /// overflows.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Line>, LineError> {
        if byte == b'\n' && self.state == LineState::AfterCr {
            self.state = LineState::Collecting;
            return Ok(None);
        }

        match byte {
            b'\r' | b'\n' => {
                let discarded = self.state == LineState::Discarding;
                self.state = if byte == b'\r' {
                    LineState::AfterCr
                } else {
                    LineState::Collecting
                };
                let line = core::mem::take(&mut self.buffer);
                if discarded {
                    Ok(None)
                } else {
                    Ok(Some(line))
                }
            }
            _ if self.state == LineState::Discarding => Ok(None),
            BACKSPACE | DELETE => {
                self.state = LineState::Collecting;
                self.buffer.pop();
                Ok(None)
            }
            0x20..=0x7E => {
                self.state = LineState::Collecting;
                if self.buffer.push(byte as char).is_err() {
                    self.buffer.clear();
                    self.state = LineState::Discarding;
                    return Err(LineError::Overflow);
                }
                Ok(None)
            }
            _ => {
                self.state = LineState::Collecting;
                Ok(None)
            }
        }
    }
}
