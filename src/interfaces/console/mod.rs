//! Line-oriented console I/O.
//!
//! `Console` is generic over its reader and writer so the session can be
//! driven by stdin/stdout in the binary and by byte buffers in tests.

pub mod menu;

use crate::error::Result;
use std::fmt::Display;
use std::io::{BufRead, Write};

pub struct Console<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// # Arguments
    ///
    /// * `reader` - Line source for answers to prompts.
    /// * `writer` - Sink for prompts and messages; flushed after each prompt.
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Writes `message` without a newline and waits for one line of input.
    ///
    /// Returns `Ok(None)` once the input is exhausted. The trailing line
    /// terminator is stripped; other whitespace is left to the caller.
    pub fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.writer, "{message}")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Writes `message` followed by a newline.
    pub fn say(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.writer, "{message}")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}
