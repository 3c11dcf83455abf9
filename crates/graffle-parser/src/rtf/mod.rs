//! Decoder for the rich-text subset OmniGraffle stores in `Text` entries.
//!
//! Only what is needed to place text is kept: the characters of each line and
//! the character formatting in effect at the start of that line. Font and
//! color tables are resolved so a span carries a family name and an RGB
//! color rather than table indices.
//!
//! Text that does not contain an `{\rtf` header is treated as plain text and
//! split on newlines.

mod color_table;
mod lexer;

use std::{fmt, mem};

use encoding_rs::WINDOWS_1252;
use indexmap::IndexMap;
use log::trace;

use graffle_core::color::Rgb;

pub use color_table::ColorTable;

use crate::error::{Diagnostic, DiagnosticCollector, ErrorCode};
use lexer::{Token, tokenize};

const RTF_HEADER: &str = "{\\rtf";

/// Horizontal alignment of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justified,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justified => "justify",
        }
    }
}

impl fmt::Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Character and paragraph formatting of one line.
///
/// Unset fields fall back to the graphic's `FontInfo`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpanStyle {
    /// Size in pixels, half the RTF `\fs` value.
    pub font_size: Option<f64>,
    pub bold: bool,
    pub italic: bool,
    pub font_family: Option<String>,
    pub color: Option<Rgb>,
    pub text_align: Option<TextAlign>,
}

impl SpanStyle {
    /// The SVG presentation attributes for a `tspan` with this style.
    ///
    /// Alignment is not an attribute; it moves the span's anchor instead.
    ///
    /// # Example
    ///
    /// ```
    /// # use graffle_parser::rtf::SpanStyle;
    /// let style = SpanStyle {
    ///     font_size: Some(5.0),
    ///     bold: true,
    ///     ..SpanStyle::default()
    /// };
    /// assert_eq!(
    ///     style.attributes(),
    ///     [("font-size", "5.0px".to_string()), ("font-weight", "bold".to_string())]
    /// );
    /// ```
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attributes = Vec::new();
        if let Some(size) = self.font_size {
            attributes.push(("font-size", format!("{size:.1}px")));
        }
        if self.bold {
            attributes.push(("font-weight", "bold".to_string()));
        }
        if self.italic {
            attributes.push(("font-style", "italic".to_string()));
        }
        if let Some(family) = &self.font_family {
            attributes.push(("font-family", family.clone()));
        }
        if let Some(color) = self.color {
            attributes.push(("fill", color.to_string()));
        }
        attributes
    }
}

/// One line of decoded text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextSpan {
    pub text: String,
    pub style: SpanStyle,
}

/// The lines of a decoded text block, plus any problems found on the way.
#[derive(Debug, Clone, Default)]
pub struct RichText {
    spans: Vec<TextSpan>,
    warnings: Vec<Diagnostic>,
}

impl RichText {
    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn into_parts(self) -> (Vec<TextSpan>, Vec<Diagnostic>) {
        (self.spans, self.warnings)
    }
}

/// Decodes a `Text` entry into lines.
///
/// Decoding never fails: malformed escapes and unbalanced braces become
/// `E307` warnings and the rest of the text is still used.
///
/// # Example
///
/// ```
/// # use graffle_parser::rtf;
/// let text = rtf::decode(r"{\rtf1\ansi\fs10\b testing}");
/// assert_eq!(text.spans().len(), 1);
/// assert_eq!(text.spans()[0].text, "testing");
/// assert_eq!(text.spans()[0].style.font_size, Some(5.0));
/// ```
pub fn decode(text: &str) -> RichText {
    if !text.contains(RTF_HEADER) {
        return RichText {
            spans: text
                .lines()
                .map(|line| TextSpan {
                    text: line.to_string(),
                    style: SpanStyle::default(),
                })
                .collect(),
            warnings: Vec::new(),
        };
    }

    let mut decoder = Decoder::new();
    let tokens = tokenize(text, &mut decoder.diagnostics);
    for token in tokens {
        decoder.token(token);
    }
    decoder.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Destination {
    Text,
    FontTable,
    ColorTable,
    Skip,
}

#[derive(Debug, Clone)]
struct GroupState {
    destination: Destination,
    font_size: Option<f64>,
    bold: bool,
    italic: bool,
    font: Option<i32>,
    color: Option<usize>,
    align: Option<TextAlign>,
    /// Characters to drop after a `\u` escape.
    unicode_skip: usize,
}

impl Default for GroupState {
    fn default() -> Self {
        Self {
            destination: Destination::Text,
            font_size: None,
            bold: false,
            italic: false,
            font: None,
            color: None,
            align: None,
            unicode_skip: 1,
        }
    }
}

impl GroupState {
    fn reset_character(&mut self) {
        self.font_size = None;
        self.bold = false;
        self.italic = false;
        self.font = None;
        self.color = None;
    }
}

struct Decoder {
    groups: Vec<GroupState>,
    state: GroupState,
    /// Set right after `{`, so `{\*` can mark an ignorable destination.
    group_opened: bool,
    fonts: IndexMap<i32, String>,
    font_entry: (Option<i32>, String),
    colors: ColorTable,
    skip: usize,
    line: String,
    line_style: Option<SpanStyle>,
    spans: Vec<TextSpan>,
    diagnostics: DiagnosticCollector,
}

impl Decoder {
    fn new() -> Self {
        Self {
            groups: Vec::new(),
            state: GroupState::default(),
            group_opened: false,
            fonts: IndexMap::new(),
            font_entry: (None, String::new()),
            colors: ColorTable::new(),
            skip: 0,
            line: String::new(),
            line_style: None,
            spans: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn token(&mut self, token: Token<'_>) {
        let group_opened = mem::take(&mut self.group_opened);
        match token {
            Token::GroupStart => {
                self.groups.push(self.state.clone());
                self.group_opened = true;
            }
            Token::GroupEnd => self.close_group(),
            Token::Symbol('*') if group_opened => self.state.destination = Destination::Skip,
            Token::Word { name, param } => self.word(name, param),
            Token::Symbol(symbol) => self.symbol(symbol),
            Token::Byte(byte) => {
                let bytes = [byte];
                let (decoded, _) = WINDOWS_1252.decode_without_bom_handling(&bytes);
                for c in decoded.chars() {
                    self.push_char(c);
                }
            }
            Token::Text(text) => self.text(text),
        }
    }

    fn close_group(&mut self) {
        let Some(outer) = self.groups.pop() else {
            self.diagnostics.emit(Diagnostic::data_error(
                ErrorCode::E307,
                "unbalanced `}` in rich text",
            ));
            return;
        };
        if self.state.destination == Destination::FontTable
            && outer.destination != Destination::FontTable
        {
            self.commit_font();
        }
        self.state = outer;
    }

    fn word(&mut self, name: &str, param: Option<i32>) {
        match self.state.destination {
            Destination::Skip => {}
            Destination::FontTable => {
                if name == "f" {
                    self.font_entry.0 = param;
                }
            }
            Destination::ColorTable => {
                self.colors.set_component(name, param.unwrap_or(0));
            }
            Destination::Text => self.text_word(name, param),
        }
    }

    fn text_word(&mut self, name: &str, param: Option<i32>) {
        let enabled = param.is_none_or(|value| value != 0);
        match name {
            "fonttbl" => self.state.destination = Destination::FontTable,
            "colortbl" => self.state.destination = Destination::ColorTable,
            "stylesheet" | "info" | "pict" | "header" | "footer" | "listtable"
            | "listoverridetable" | "expandedcolortbl" | "object" => {
                self.state.destination = Destination::Skip;
            }
            "f" => self.state.font = param,
            "fs" => match param {
                Some(half_points) if half_points <= 0 => {
                    trace!(half_points; "Ignoring non-positive font size");
                }
                _ => self.state.font_size = param.map(|half_points| f64::from(half_points) / 2.0),
            },
            "b" => self.state.bold = enabled,
            "i" => self.state.italic = enabled,
            "cf" => self.state.color = param.and_then(|index| usize::try_from(index).ok()),
            "ql" => self.state.align = Some(TextAlign::Left),
            "qc" => self.state.align = Some(TextAlign::Center),
            "qr" => self.state.align = Some(TextAlign::Right),
            "qj" => self.state.align = Some(TextAlign::Justified),
            "pard" => self.state.align = None,
            "plain" => self.state.reset_character(),
            "par" | "line" => self.break_line(),
            "tab" => self.push_char('\t'),
            "uc" => {
                self.state.unicode_skip = param.and_then(|n| usize::try_from(n).ok()).unwrap_or(1);
            }
            "u" => {
                if let Some(code) = param {
                    // Code points above 32767 are written as negative numbers.
                    let code = if code < 0 { code + 65536 } else { code };
                    let c = u32::try_from(code)
                        .ok()
                        .and_then(char::from_u32)
                        .unwrap_or(char::REPLACEMENT_CHARACTER);
                    self.push_char(c);
                    self.skip = self.state.unicode_skip;
                }
            }
            _ => trace!(word = name; "Ignoring rich-text control word"),
        }
    }

    fn symbol(&mut self, symbol: char) {
        if self.state.destination != Destination::Text {
            return;
        }
        match symbol {
            '\n' | '\r' => self.break_line(),
            '\\' | '{' | '}' => self.push_char(symbol),
            '~' => self.push_char('\u{a0}'),
            '_' => self.push_char('-'),
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        match self.state.destination {
            Destination::Text => {
                for c in text.chars().filter(|c| !matches!(c, '\r' | '\n')) {
                    self.push_char(c);
                }
            }
            Destination::FontTable => {
                for c in text.chars() {
                    if c == ';' {
                        self.commit_font();
                    } else {
                        self.font_entry.1.push(c);
                    }
                }
            }
            Destination::ColorTable => self.colors.terminate_entries(text),
            Destination::Skip => {}
        }
    }

    fn push_char(&mut self, c: char) {
        if self.groups.is_empty() || self.state.destination != Destination::Text {
            return;
        }
        if self.skip > 0 {
            self.skip -= 1;
            return;
        }
        if self.line_style.is_none() {
            self.line_style = Some(self.current_style());
        }
        self.line.push(c);
    }

    fn break_line(&mut self) {
        if self.groups.is_empty() {
            return;
        }
        let style = self
            .line_style
            .take()
            .unwrap_or_else(|| self.current_style());
        self.spans.push(TextSpan {
            text: mem::take(&mut self.line),
            style,
        });
    }

    fn commit_font(&mut self) {
        let (index, name) = mem::take(&mut self.font_entry);
        let name = name.trim();
        if let Some(index) = index.filter(|_| !name.is_empty()) {
            self.fonts.insert(index, name.to_string());
        }
    }

    fn current_style(&self) -> SpanStyle {
        SpanStyle {
            font_size: self.state.font_size,
            bold: self.state.bold,
            italic: self.state.italic,
            font_family: self
                .state
                .font
                .and_then(|index| self.fonts.get(&index).cloned()),
            color: self.state.color.and_then(|index| self.colors.get(index)),
            text_align: self.state.align,
        }
    }

    fn finish(mut self) -> RichText {
        if !self.line.is_empty() {
            let style = self
                .line_style
                .take()
                .unwrap_or_else(|| self.current_style());
            self.spans.push(TextSpan {
                text: mem::take(&mut self.line),
                style,
            });
        }
        if !self.groups.is_empty() {
            self.diagnostics.emit(Diagnostic::data_error(
                ErrorCode::E307,
                format!("{} unclosed group(s) in rich text", self.groups.len()),
            ));
        }
        RichText {
            spans: self.spans,
            // Decoding only ever emits warnings.
            warnings: self.diagnostics.finish().unwrap_or_default(),
        }
    }
}
