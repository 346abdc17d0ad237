//! Buffered XML output sink.

use std::io::{self, BufWriter, Write};

/// Owns the caller's writer for the length of one document.
///
/// [`XmlSink::finish`] flushes and hands the writer back. On an early
/// return the sink is dropped, which releases the writer.
pub(crate) struct XmlSink<W: Write> {
    out: BufWriter<W>,
}

impl<W: Write> XmlSink<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out: BufWriter::new(out),
        }
    }

    /// Writes `text` unchanged.
    pub(crate) fn raw(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())
    }

    /// Writes `text` with `& < > " '` replaced by entity references.
    pub(crate) fn escaped(&mut self, text: &str) -> io::Result<()> {
        let mut last = 0;
        for (i, c) in text.char_indices() {
            let entity = match c {
                '&' => "&amp;",
                '<' => "&lt;",
                '>' => "&gt;",
                '"' => "&quot;",
                '\'' => "&apos;",
                _ => continue,
            };
            self.out.write_all(text[last..i].as_bytes())?;
            self.out.write_all(entity.as_bytes())?;
            last = i + c.len_utf8();
        }
        self.out.write_all(text[last..].as_bytes())
    }

    pub(crate) fn finish(self) -> io::Result<W> {
        self.out.into_inner().map_err(|e| e.into_error())
    }
}
