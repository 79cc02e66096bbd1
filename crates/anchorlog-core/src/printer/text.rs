//! Human-oriented text lines.

use std::fmt::Write as _;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use super::{Printer, escape_field_value, escape_message, now, trim_newlines};
use crate::ansi;
use crate::field::Field;
use crate::level::Level;
use crate::options::{Palette, PrinterOption};

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year].[month].[day]-[hour]:[minute]:[second]");

/// Minimum gap between the left and right side of a line.
const MIN_SPACE: usize = 3;
/// The right side always starts at a multiple of this column.
const TAB_WIDTH: usize = 5;

/// Renders `[time ][lvl ]message   field=value ...`.
///
/// ```text
/// [nfo] short message       count=3
/// [nfo] a long message that overflows the indent   count=3
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPrinter {
    palette: Palette,
    show_time: bool,
    show_level: bool,
    field_indent: usize,
    fields_first: bool,
    transient_line_length: usize,
}

impl Default for TextPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextPrinter {
    /// Plain printer: no colors, no timestamp, level tags on, indent 20.
    #[must_use]
    pub fn new() -> Self {
        Self {
            palette: Palette::NONE,
            show_time: false,
            show_level: true,
            field_indent: 20,
            fields_first: false,
            transient_line_length: 0,
        }
    }

    /// Sets the palette.
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Toggles the timestamp.
    #[must_use]
    pub fn with_time(mut self, show: bool) -> Self {
        self.show_time = show;
        self
    }

    /// Toggles the level tag.
    #[must_use]
    pub fn with_level(mut self, show: bool) -> Self {
        self.show_level = show;
        self
    }

    /// Sets the minimum column of the right-hand side.
    #[must_use]
    pub fn with_field_indent(mut self, indent: usize) -> Self {
        self.field_indent = indent;
        self
    }

    /// Puts fields before the message.
    #[must_use]
    pub fn with_fields_first(mut self, fields_first: bool) -> Self {
        self.fields_first = fields_first;
        self
    }

    /// Crops transient lines to `cols` visible characters (0 disables).
    #[must_use]
    pub fn with_transient_line_length(mut self, cols: usize) -> Self {
        self.transient_line_length = cols;
        self
    }

    fn level_tag(level: Level) -> &'static str {
        match level {
            Level::Transient => "[==>] ",
            Level::Verbose => "[dbg] ",
            Level::Info => "[nfo] ",
            Level::Warning => "[WRN] ",
            Level::Error => "[ERR] ",
            Level::Fatal => "[!!!] ",
        }
    }

    fn render_line(&self, level: Level, msg: &str, fields: &[Field]) -> String {
        let colors = self
            .palette
            .colors(level)
            .map(|(primary, secondary)| {
                (
                    ansi::sgr(&[primary.fg_code()]),
                    ansi::sgr(&[secondary.fg_code()]),
                )
            });
        let (primary, secondary) = match &colors {
            Some((p, s)) => (p.as_str(), s.as_str()),
            None => ("", ""),
        };

        let msg = escape_message(trim_newlines(msg));
        let mut out = String::with_capacity(256);
        out.push_str(secondary);

        if self.show_time {
            let _ = write!(out, "{} ", now().format(TIMESTAMP_FORMAT).unwrap_or_default());
        }
        if self.show_level {
            out.push_str(Self::level_tag(level));
        }

        let write_msg = |out: &mut String| -> usize {
            out.push_str(primary);
            out.push_str(&msg);
            msg.chars().count()
        };

        let write_fields = |out: &mut String| -> usize {
            let mut count = 0;
            for (i, field) in fields.iter().enumerate() {
                if i != 0 {
                    out.push(' ');
                    count += 1;
                }
                let mut value = field.value.clone();
                if field.is_json_string {
                    if !field.is_json_safe {
                        value = escape_field_value(&value);
                    }
                    if value.is_empty() || value.contains([' ', '\\']) {
                        value = format!("\"{value}\"");
                    }
                }
                out.push_str(secondary);
                out.push_str(&field.name);
                out.push('=');
                out.push_str(primary);
                out.push_str(&value);
                count += field.name.chars().count() + 1 + value.chars().count();
            }
            count
        };

        let (visible, has_right_side) = if self.fields_first {
            (write_fields(&mut out), !msg.is_empty())
        } else {
            (write_msg(&mut out), !fields.is_empty())
        };

        if visible > 0 && has_right_side {
            let mut space = MIN_SPACE;
            if visible + space < self.field_indent {
                space = self.field_indent - visible;
            }
            let offset = ((visible + space - 1) / TAB_WIDTH + 1) * TAB_WIDTH;
            out.extend(std::iter::repeat_n(' ', offset - visible));
        }

        if has_right_side {
            if self.fields_first {
                write_msg(&mut out);
            } else {
                write_fields(&mut out);
            }
        }

        if colors.is_some() {
            out.push_str(ansi::RESET);
        }

        if level == Level::Transient
            && self.transient_line_length > 0
            && out.chars().count() > self.transient_line_length
        {
            return ansi::crop_preserving_ansi(&out, self.transient_line_length);
        }
        out
    }
}

impl Printer for TextPrinter {
    fn render(&self, level: Level, opts: &[PrinterOption], msg: &str, fields: &[Field]) -> String {
        if opts.is_empty() {
            return self.render_line(level, msg, fields);
        }
        let mut one_off = self.clone();
        one_off.set_options(opts);
        one_off.render_line(level, msg, fields)
    }

    fn set_options(&mut self, opts: &[PrinterOption]) {
        for opt in opts {
            match *opt {
                PrinterOption::Palette(palette) => self.palette = palette,
                PrinterOption::ShowTime(show) => self.show_time = show,
                PrinterOption::ShowLevel(show) => self.show_level = show,
                PrinterOption::FieldIndent(indent) => self.field_indent = indent,
                PrinterOption::MessageFirst => self.fields_first = false,
                PrinterOption::FieldsFirst => self.fields_first = true,
                PrinterOption::TransientLineLength(cols) => self.transient_line_length = cols,
            }
        }
    }
}
