//! The `\colortbl` palette.

use graffle_core::color::Rgb;

use super::lexer::{Token, tokenize};
use crate::error::DiagnosticCollector;

/// An RTF color palette.
///
/// Entries are terminated by `;`. The first entry is normally empty and
/// stands for the automatic color, which reads as black.
///
/// # Example
///
/// ```
/// # use graffle_parser::rtf::ColorTable;
/// let colors = ColorTable::parse(r"{\colortbl;\red255\green255\blue255;\red75\green75\blue75;}");
/// assert_eq!(colors.hex(0), "000000");
/// assert_eq!(colors.hex(1), "ffffff");
/// assert_eq!(colors.hex(2), "4b4b4b");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorTable {
    entries: Vec<Rgb>,
    pending: [u8; 3],
}

impl ColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the first `\colortbl` group found in `rtf`.
    ///
    /// Text outside the group is ignored. Without a color table the palette
    /// is empty.
    pub fn parse(rtf: &str) -> Self {
        let mut diagnostics = DiagnosticCollector::new();
        let mut table = Self::new();
        let mut depth = 0usize;
        let mut table_depth = None;

        for token in tokenize(rtf, &mut diagnostics) {
            match token {
                Token::GroupStart => depth += 1,
                Token::GroupEnd => {
                    if table_depth == Some(depth) {
                        break;
                    }
                    depth = depth.saturating_sub(1);
                }
                Token::Word {
                    name: "colortbl", ..
                } => table_depth = Some(depth),
                Token::Word { name, param } if table_depth.is_some() => {
                    table.set_component(name, param.unwrap_or(0));
                }
                Token::Text(text) if table_depth.is_some() => table.terminate_entries(text),
                _ => {}
            }
        }

        table
    }

    /// Sets one channel of the entry being read. Returns `false` for words
    /// that are not color channels.
    pub(super) fn set_component(&mut self, name: &str, value: i32) -> bool {
        let channel = match name {
            "red" => 0,
            "green" => 1,
            "blue" => 2,
            _ => return false,
        };
        self.pending[channel] = value.clamp(0, 255) as u8;
        true
    }

    /// Closes one entry per `;` in `text`.
    pub(super) fn terminate_entries(&mut self, text: &str) {
        for _ in text.matches(';') {
            let [r, g, b] = std::mem::take(&mut self.pending);
            self.entries.push(Rgb::from_bytes(r, g, b));
        }
    }

    /// The color at a palette index.
    ///
    /// Index 0 is the automatic color and is black even when the table is
    /// empty.
    pub fn get(&self, index: usize) -> Option<Rgb> {
        match self.entries.get(index) {
            Some(color) => Some(*color),
            None if index == 0 => Some(Rgb::BLACK),
            None => None,
        }
    }

    /// The color at `index` as six hex digits; unknown indices read as black.
    pub fn hex(&self, index: usize) -> String {
        self.get(index).unwrap_or(Rgb::BLACK).to_hex()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
