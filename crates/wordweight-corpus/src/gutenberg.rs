//! Extracting the body of a Project Gutenberg plain-text ebook
//!
//! Gutenberg files wrap the actual text in a license header and footer:
//!
//! ```text
//! Title: ...
//! *** START OF THIS PROJECT GUTENBERG EBOOK ... ***
//! <body>
//! *** END OF THIS PROJECT GUTENBERG EBOOK ... ***
//! <license>
//! ```
//!
//! [`EbookBody`] passes through only the body lines.

use std::io::{self, BufRead, Read};

const START_MARKERS: [&[u8]; 2] = [
    b"*** START OF THIS PROJECT GUTENBERG EBOOK",
    b"*** START OF THE PROJECT GUTENBERG EBOOK",
];

const END_MARKERS: [&[u8]; 2] = [
    b"*** END OF THIS PROJECT GUTENBERG EBOOK",
    b"*** END OF THE PROJECT GUTENBERG EBOOK",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Header,
    Body,
    Footer,
}

/// A reader yielding only the body of a Gutenberg ebook
///
/// Input without a start marker yields nothing.
#[derive(Debug)]
pub struct EbookBody<R> {
    source: R,
    section: Section,
    line: Vec<u8>,
    pos: usize,
}

impl<R: BufRead> EbookBody<R> {
    /// Wrap a buffered source
    pub fn new(source: R) -> Self {
        Self {
            source,
            section: Section::Header,
            line: Vec::new(),
            pos: 0,
        }
    }

    /// Recover the underlying source
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Load the next body line into the buffer
    ///
    /// Returns `false` once the body is exhausted.
    fn next_body_line(&mut self) -> io::Result<bool> {
        while self.section != Section::Footer {
            self.line.clear();
            self.pos = 0;
            if self.source.read_until(b'\n', &mut self.line)? == 0 {
                if self.section == Section::Header {
                    tracing::debug!("No Gutenberg start marker found");
                }
                self.section = Section::Footer;
                return Ok(false);
            }

            match self.section {
                Section::Header => {
                    if has_marker(&self.line, &START_MARKERS) {
                        self.section = Section::Body;
                    }
                }
                Section::Body => {
                    if has_marker(&self.line, &END_MARKERS) {
                        self.section = Section::Footer;
                        self.line.clear();
                        return Ok(false);
                    }
                    return Ok(true);
                }
                Section::Footer => {}
            }
        }
        Ok(false)
    }
}

fn has_marker(line: &[u8], markers: &[&[u8]]) -> bool {
    markers.iter().any(|marker| line.starts_with(marker))
}

impl<R: BufRead> Read for EbookBody<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.pos >= self.line.len() && !self.next_body_line()? {
            return Ok(0);
        }
        let pending = &self.line[self.pos..];
        let n = pending.len().min(buf.len());
        buf[..n].copy_from_slice(&pending[..n]);
        self.pos += n;
        Ok(n)
    }
}
