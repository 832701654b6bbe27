//! Input adapter translating a line-oriented event stream into stabilizer calls.
//!
//! Each non-empty line is one event. Fields may be separated by whitespace
//! or commas, and `#` starts a comment.
//!
//! ```text
//! # x y timestamp_ms
//! 120.5 80 1000
//! move 121 80.5 1016
//! smoothing+
//! threshold-
//! toggle
//! reset
//! ```

use crate::{Error, Result};
use std::io::BufRead;

/// A single event from the input source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to `(x, y)` at `timestamp_ms`
    Move { x: f64, y: f64, timestamp_ms: u64 },
    /// Increase smoothing strength by one
    SmoothingUp,
    /// Decrease smoothing strength by one
    SmoothingDown,
    /// Increase tremor threshold by one
    ThresholdUp,
    /// Decrease tremor threshold by one
    ThresholdDown,
    /// Restore default parameters and clear stabilizer state
    Reset,
    /// Enable or disable stabilization
    Toggle,
}

/// Parse a single line. Returns `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str, line_number: usize) -> Result<Option<InputEvent>> {
    let content = line.split('#').next().unwrap_or_default().trim();
    if content.is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = content
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .collect();

    let parse_error = |message: String| Error::ParseError {
        line: line_number,
        message,
    };

    let event = match fields.as_slice() {
        ["smoothing+"] => InputEvent::SmoothingUp,
        ["smoothing-"] => InputEvent::SmoothingDown,
        ["threshold+"] => InputEvent::ThresholdUp,
        ["threshold-"] => InputEvent::ThresholdDown,
        ["reset"] => InputEvent::Reset,
        ["toggle"] => InputEvent::Toggle,
        ["move", x, y, t] | [x, y, t] => {
            let x = x
                .parse::<f64>()
                .map_err(|e| parse_error(format!("invalid x '{x}': {e}")))?;
            let y = y
                .parse::<f64>()
                .map_err(|e| parse_error(format!("invalid y '{y}': {e}")))?;
            if !x.is_finite() || !y.is_finite() {
                return Err(parse_error("non-finite coordinate".to_string()));
            }
            let timestamp_ms = t
                .parse::<u64>()
                .map_err(|e| parse_error(format!("invalid timestamp '{t}': {e}")))?;
            InputEvent::Move { x, y, timestamp_ms }
        }
        _ => return Err(parse_error(format!("unrecognized event '{content}'"))),
    };

    Ok(Some(event))
}

/// Iterator over events read from a buffered reader
pub struct EventReader<R> {
    reader: R,
    line_number: usize,
    buffer: Vec<u8>,
}

impl<R: BufRead> EventReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = Result<InputEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_number += 1;
                    let Ok(line) = std::str::from_utf8(&self.buffer) else {
                        return Some(Err(Error::ParseError {
                            line: self.line_number,
                            message: "line is not valid UTF-8".to_string(),
                        }));
                    };
                    match parse_line(line, self.line_number) {
                        Ok(Some(event)) => return Some(Ok(event)),
                        Ok(None) => continue,
                        Err(e) => return Some(Err(e)),
                    }
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}
