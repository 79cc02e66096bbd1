//! ANSI/VT100 escape sequences.
//!
//! The engine treats these as opaque byte strings interleaved with message
//! text; nothing here parses terminal output.

/// Escape character.
pub const ESC: char = '\u{1b}';

/// Control Sequence Introducer.
pub const CSI: &str = "\u{1b}[";

/// Erase from the cursor to the end of the current line.
pub const ERASE_EOL: &str = "\u{1b}[K";

/// Erase the whole current line.
pub const ERASE_LINE: &str = "\u{1b}[2K";

/// Erase from the cursor to the end of the screen.
pub const ERASE_DOWN: &str = "\u{1b}[J";

/// Reset all graphic attributes.
pub const RESET: &str = "\u{1b}[0m";

pub const FG_BLACK: &str = "30";
pub const FG_DARK_RED: &str = "31";
pub const FG_DARK_GREEN: &str = "32";
pub const FG_DARK_YELLOW: &str = "33";
pub const FG_DARK_BLUE: &str = "34";
pub const FG_DARK_MAGENTA: &str = "35";
pub const FG_DARK_CYAN: &str = "36";
pub const FG_LIGHT_GRAY: &str = "37";
pub const FG_DARK_GRAY: &str = "90";
pub const FG_RED: &str = "91";
pub const FG_GREEN: &str = "92";
pub const FG_YELLOW: &str = "93";
pub const FG_BLUE: &str = "94";
pub const FG_MAGENTA: &str = "95";
pub const FG_CYAN: &str = "96";
pub const FG_WHITE: &str = "97";

/// Move the cursor up `n` rows, keeping the column.
#[must_use]
pub fn up(n: usize) -> String {
    format!("{CSI}{n}A")
}

/// Move the cursor down `n` rows, keeping the column.
#[must_use]
pub fn down(n: usize) -> String {
    format!("{CSI}{n}B")
}

/// Move to the start of the line `n` rows below. Stops at the bottom of the
/// screen without scrolling.
#[must_use]
pub fn next_line(n: usize) -> String {
    format!("{CSI}{n}E")
}

/// Move to the start of the line `n` rows above. Stops at the top of the
/// screen.
#[must_use]
pub fn prev_line(n: usize) -> String {
    format!("{CSI}{n}F")
}

/// Select Graphic Rendition with the given parameters, in order.
#[must_use]
pub fn sgr(params: &[&str]) -> String {
    let mut out = String::with_capacity(params.len() * 4 + 3);
    out.push_str(CSI);
    out.push_str(&params.join(";"));
    out.push('m');
    out
}

/// Crops `s` to at most `max` visible characters, keeping every escape
/// sequence intact (including ones past the cut).
#[must_use]
pub fn crop_preserving_ansi(s: &str, max: usize) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_escape = false;
    let mut visible = 0;

    for ch in s.chars() {
        if in_escape {
            out.push(ch);
            if ch == '[' || ch.is_ascii_digit() || ch == ';' || ch == '?' {
                continue;
            }
            in_escape = false;
            continue;
        }
        if ch == ESC {
            out.push(ch);
            in_escape = true;
            continue;
        }
        if visible < max {
            out.push(ch);
            visible += 1;
        }
    }

    out
}
