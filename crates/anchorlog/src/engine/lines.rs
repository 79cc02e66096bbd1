//! Anchored line bookkeeping and cursor arithmetic.
//!
//! [`AnchorList`] is driven by exactly one thread (the processing loop) and
//! is the only thing that knows what each anchored line currently shows.
//! After every operation the cursor rests one row below the bottom-most
//! anchored line, or at the start of a fresh line when none are live.

use std::fmt::Write as _;
use std::io::{self, Write};

use anchorlog_core::Level;
use anchorlog_core::ansi::{ERASE_EOL, next_line, prev_line};

#[derive(Debug)]
struct AnchoredLine {
    id: u32,
    text: String,
}

/// Live anchored lines, ordered by ascending id, plus the sink they are
/// drawn on.
#[derive(Debug)]
pub(crate) struct AnchorList<W: Write> {
    out: W,
    lines: Vec<AnchoredLine>,
    frame: String,
}

impl<W: Write> AnchorList<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out,
            lines: Vec::with_capacity(32),
            frame: String::with_capacity(1024),
        }
    }

    #[cfg(test)]
    pub(crate) fn ids(&self) -> Vec<u32> {
        self.lines.iter().map(|l| l.id).collect()
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }

    fn must_find(&self, id: u32) -> usize {
        match self.lines.iter().position(|l| l.id == id) {
            Some(idx) => idx,
            None => panic!("anchored line {id} is not live"),
        }
    }

    /// Redraws `lines[from..]` starting at the cursor, one row each.
    fn redraw_from(&mut self, from: usize) {
        for line in &self.lines[from..] {
            self.frame.push_str(&line.text);
            self.frame.push_str(ERASE_EOL);
            self.frame.push_str(&next_line(1));
        }
    }

    fn emit(&mut self) -> io::Result<()> {
        self.out.write_all(self.frame.as_bytes())?;
        self.frame.clear();
        self.out.flush()
    }

    /// Reserves a row for a new anchored line.
    ///
    /// # Panics
    ///
    /// Panics if `id` is already live.
    pub(crate) fn add(&mut self, id: u32) -> io::Result<()> {
        assert!(
            self.lines.iter().all(|l| l.id != id),
            "anchored line {id} added twice"
        );

        // scroll to make room at the bottom
        self.frame.push('\n');

        let idx = self.lines.partition_point(|l| l.id < id);
        self.lines.insert(idx, AnchoredLine { id, text: String::new() });

        // lines below the insertion point moved down one row
        if idx + 1 < self.lines.len() {
            self.frame.push_str(&prev_line(self.lines.len() - idx));
            self.redraw_from(idx);
        }

        self.emit()
    }

    /// Releases an anchored line and closes the gap it leaves.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not live.
    pub(crate) fn remove(&mut self, id: u32) -> io::Result<()> {
        let idx = self.must_find(id);
        self.lines.remove(idx);

        self.frame.push_str(&prev_line(1 + self.lines.len() - idx));
        self.redraw_from(idx);
        self.frame.push_str(ERASE_EOL);

        self.emit()
    }

    /// Prints a rendered line.
    ///
    /// Lines with no anchor (or any level above transient) scroll above the
    /// anchored block; transient lines with an anchor overwrite it in place.
    ///
    /// # Panics
    ///
    /// Panics if `id` is non-zero and not live while anchors exist.
    pub(crate) fn print(&mut self, id: u32, level: Level, text: &str) -> io::Result<()> {
        if self.lines.is_empty() {
            self.frame.push_str(text);
            self.frame.push('\n');
            return self.emit();
        }

        if id == 0 || level != Level::Transient {
            self.frame.push('\n');
            self.frame.push_str(&prev_line(1 + self.lines.len()));
            let _ = writeln!(self.frame, "{text}{ERASE_EOL}");
            for line in &self.lines {
                let _ = writeln!(self.frame, "{}{ERASE_EOL}", line.text);
            }
            if id == 0 {
                return self.emit();
            }
        }

        let idx = self.must_find(id);
        self.lines[idx].text = text.to_string();
        let offset = self.lines.len() - idx;
        self.frame.push_str(&prev_line(offset));
        self.frame.push_str(text);
        self.frame.push_str(ERASE_EOL);
        self.frame.push_str(&next_line(offset));
        self.emit()
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
