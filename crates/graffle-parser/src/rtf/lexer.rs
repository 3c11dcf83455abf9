//! Tokenizer for the RTF subset.

use winnow::{
    Parser as _,
    ascii::digit1,
    combinator::{alt, cut_err, opt, preceded, terminated},
    error::ModalResult,
    token::{any, take_while},
};

use crate::error::{Diagnostic, DiagnosticCollector, ErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Token<'a> {
    GroupStart,
    GroupEnd,
    /// `\name` with an optional signed parameter, e.g. `\fs24` or `\b`.
    Word { name: &'a str, param: Option<i32> },
    /// A backslash followed by one non-letter, e.g. `\{` or `\*`.
    Symbol(char),
    /// `\'hh`
    Byte(u8),
    Text(&'a str),
}

/// A signed decimal parameter. The digits are always consumed; a value that
/// does not fit an `i32` is dropped.
fn parameter(input: &mut &str) -> ModalResult<Option<i32>> {
    (opt('-'), digit1)
        .take()
        .map(|digits: &str| digits.parse().ok())
        .parse_next(input)
}

fn control_word<'a>(input: &mut &'a str) -> ModalResult<Token<'a>> {
    preceded(
        '\\',
        terminated(
            (take_while(1.., |c: char| c.is_ascii_alphabetic()), opt(parameter)),
            opt(' '),
        ),
    )
    .map(|(name, param)| Token::Word {
        name,
        param: param.flatten(),
    })
    .parse_next(input)
}

fn hex_byte<'a>(input: &mut &'a str) -> ModalResult<Token<'a>> {
    preceded(
        "\\'",
        cut_err(
            take_while(2, |c: char| c.is_ascii_hexdigit())
                .try_map(|hex: &str| u8::from_str_radix(hex, 16)),
        ),
    )
    .map(Token::Byte)
    .parse_next(input)
}

fn control_symbol<'a>(input: &mut &'a str) -> ModalResult<Token<'a>> {
    preceded('\\', any).map(Token::Symbol).parse_next(input)
}

fn text<'a>(input: &mut &'a str) -> ModalResult<Token<'a>> {
    take_while(1.., |c: char| !matches!(c, '\\' | '{' | '}'))
        .map(Token::Text)
        .parse_next(input)
}

fn token<'a>(input: &mut &'a str) -> ModalResult<Token<'a>> {
    alt((
        '{'.value(Token::GroupStart),
        '}'.value(Token::GroupEnd),
        hex_byte, // Must come before control_symbol
        control_word,
        control_symbol,
        text,
    ))
    .parse_next(input)
}

/// Splits RTF text into tokens.
///
/// A malformed escape is reported as an `E307` warning and skipped one
/// character at a time, so tokenizing always produces a usable stream.
pub(super) fn tokenize<'a>(rtf: &'a str, diagnostics: &mut DiagnosticCollector) -> Vec<Token<'a>> {
    let mut tokens = Vec::new();
    let mut input = rtf;

    while !input.is_empty() {
        let start = rtf.len() - input.len();
        match token(&mut input) {
            Ok(token) => tokens.push(token),
            Err(_) => {
                diagnostics.emit(Diagnostic::data_error(
                    ErrorCode::E307,
                    format!("invalid rich-text escape at offset {start}"),
                ));
                let mut rest = rtf[start..].chars();
                rest.next();
                input = rest.as_str();
            }
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(rtf: &str) -> Vec<Token<'_>> {
        let mut diagnostics = DiagnosticCollector::new();
        let tokens = tokenize(rtf, &mut diagnostics);
        assert!(diagnostics.finish().unwrap().is_empty());
        tokens
    }

    #[test]
    fn test_control_words() {
        assert_eq!(
            lex(r"{\rtf1\b testing}"),
            [
                Token::GroupStart,
                Token::Word {
                    name: "rtf",
                    param: Some(1)
                },
                Token::Word {
                    name: "b",
                    param: None
                },
                Token::Text("testing"),
                Token::GroupEnd,
            ]
        );
    }

    #[test]
    fn test_negative_parameter() {
        assert_eq!(
            lex(r"\u-3913?"),
            [
                Token::Word {
                    name: "u",
                    param: Some(-3913)
                },
                Token::Text("?"),
            ]
        );
    }

    #[test]
    fn test_oversized_parameter_is_consumed() {
        assert_eq!(
            lex(r"\fs999999999999999999999 x"),
            [
                Token::Word {
                    name: "fs",
                    param: None
                },
                Token::Text("x"),
            ]
        );
    }

    #[test]
    fn test_only_one_space_is_a_delimiter() {
        assert_eq!(
            lex(r"\cf2  x"),
            [
                Token::Word {
                    name: "cf",
                    param: Some(2)
                },
                Token::Text(" x"),
            ]
        );
    }

    #[test]
    fn test_symbols_and_bytes() {
        assert_eq!(
            lex("\\{\\'e9\\\n\\*"),
            [
                Token::Symbol('{'),
                Token::Byte(0xE9),
                Token::Symbol('\n'),
                Token::Symbol('*'),
            ]
        );
    }

    #[test]
    fn test_bad_escape_is_skipped() {
        let mut diagnostics = DiagnosticCollector::new();
        let tokens = tokenize(r"a\'zz b", &mut diagnostics);
        let warnings = diagnostics.finish().unwrap();

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code(), Some(ErrorCode::E307));
        assert_eq!(tokens.first(), Some(&Token::Text("a")));
        assert_eq!(tokens.last(), Some(&Token::Text("'zz b")));
    }

    #[test]
    fn test_trailing_backslash() {
        let mut diagnostics = DiagnosticCollector::new();
        let tokens = tokenize("end\\", &mut diagnostics);
        assert_eq!(tokens, [Token::Text("end")]);
        assert_eq!(diagnostics.finish().unwrap().len(), 1);
    }
}
