//! Minimal terminal model for asserting what anchored output looks like.
//!
//! Parses the escape sequences a root emits and replays them onto a grid
//! that grows downward without bound, so tests can check the final screen
//! content and cursor position instead of raw byte sequences.
//!
//! # Supported Sequences
//! - printable text (UTF-8), `\n` (treated as CR LF, like a tty), `\r`
//! - Cursor movement: `CSI n A/B`, `CSI n E/F`
//! - EL (Erase Line): `CSI n K`
//! - ED (Erase Display): `CSI n J`
//! - SGR: `CSI ... m` (ignored, styles are not tracked)
//!
//! # Example
//! ```
//! use anchorlog::testing::TerminalModel;
//!
//! let mut model = TerminalModel::new();
//! model.feed(b"one\ntwo\n\x1b[1Fzwei\x1b[K\n");
//! assert_eq!(model.lines(), ["one", "zwei"]);
//! assert_eq!(model.cursor(), (2, 0));
//! ```

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    Ground,
    Escape,
    Csi,
}

/// Virtual screen fed with raw output bytes.
#[derive(Debug, Clone)]
pub struct TerminalModel {
    rows: Vec<Vec<char>>,
    row: usize,
    col: usize,
    state: ParserState,
    csi_params: Vec<usize>,
    csi_current: Option<usize>,
    utf8: Vec<u8>,
}

impl Default for TerminalModel {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalModel {
    /// An empty screen with the cursor at the top-left.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: vec![Vec::new()],
            row: 0,
            col: 0,
            state: ParserState::Ground,
            csi_params: Vec::new(),
            csi_current: None,
            utf8: Vec::new(),
        }
    }

    /// Feed bytes to the model.
    pub fn feed(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            match self.state {
                ParserState::Ground => self.ground(byte),
                ParserState::Escape => self.escape(byte),
                ParserState::Csi => self.csi(byte),
            }
        }
    }

    /// Screen rows with trailing blanks trimmed; trailing empty rows are
    /// dropped.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .rows
            .iter()
            .map(|r| r.iter().collect::<String>().trim_end().to_string())
            .collect();
        while lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        lines
    }

    /// Cursor position as `(row, column)`, zero-based.
    #[must_use]
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    fn ground(&mut self, byte: u8) {
        match byte {
            0x1b => self.state = ParserState::Escape,
            b'\n' => {
                self.move_to_row(self.row + 1);
                self.col = 0;
            }
            b'\r' => self.col = 0,
            0x20..=0x7e => self.put_char(byte as char),
            0x80..=0xff => {
                self.utf8.push(byte);
                if let Ok(s) = std::str::from_utf8(&self.utf8) {
                    let chars: Vec<char> = s.chars().collect();
                    self.utf8.clear();
                    for ch in chars {
                        self.put_char(ch);
                    }
                } else if self.utf8.len() >= 4 {
                    self.utf8.clear();
                    self.put_char('?');
                }
            }
            _ => {}
        }
    }

    fn escape(&mut self, byte: u8) {
        if byte == b'[' {
            self.state = ParserState::Csi;
            self.csi_params.clear();
            self.csi_current = None;
        } else {
            self.state = ParserState::Ground;
        }
    }

    fn csi(&mut self, byte: u8) {
        match byte {
            b'0'..=b'9' => {
                let digit = usize::from(byte - b'0');
                self.csi_current = Some(self.csi_current.unwrap_or(0).saturating_mul(10) + digit);
                return;
            }
            b';' => {
                self.csi_params.push(self.csi_current.take().unwrap_or(0));
                return;
            }
            _ => {}
        }

        if let Some(current) = self.csi_current.take() {
            self.csi_params.push(current);
        }
        self.state = ParserState::Ground;

        match byte {
            b'A' => self.row = self.row.saturating_sub(self.count()),
            b'B' => self.move_to_row(self.row + self.count()),
            b'E' => {
                self.move_to_row(self.row + self.count());
                self.col = 0;
            }
            b'F' => {
                self.row = self.row.saturating_sub(self.count());
                self.col = 0;
            }
            b'K' => self.erase_line(self.param(0)),
            b'J' => self.erase_display(self.param(0)),
            _ => {}
        }
    }

    fn param(&self, index: usize) -> usize {
        self.csi_params.get(index).copied().unwrap_or(0)
    }

    /// Movement count, where a missing or zero parameter means one.
    fn count(&self) -> usize {
        self.param(0).max(1)
    }

    fn move_to_row(&mut self, row: usize) {
        while self.rows.len() <= row {
            self.rows.push(Vec::new());
        }
        self.row = row;
    }

    fn put_char(&mut self, ch: char) {
        let line = &mut self.rows[self.row];
        if line.len() <= self.col {
            line.resize(self.col + 1, ' ');
        }
        line[self.col] = ch;
        self.col += 1;
    }

    fn erase_line(&mut self, mode: usize) {
        let col = self.col;
        let line = &mut self.rows[self.row];
        match mode {
            0 => line.truncate(col),
            1 => {
                for cell in line.iter_mut().take(col + 1) {
                    *cell = ' ';
                }
            }
            _ => line.clear(),
        }
    }

    fn erase_display(&mut self, mode: usize) {
        match mode {
            0 => {
                self.erase_line(0);
                self.rows.truncate(self.row + 1);
            }
            1 => {
                for line in &mut self.rows[..self.row] {
                    line.clear();
                }
                self.erase_line(1);
            }
            _ => {
                for line in &mut self.rows {
                    line.clear();
                }
            }
        }
    }
}
