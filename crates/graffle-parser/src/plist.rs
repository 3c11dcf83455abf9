//! Structural decode of property-list XML into a [`Value`] tree.
//!
//! This stage knows nothing about shapes or styles. It maps `dict`, `array`
//! and the scalar elements onto [`Value`] and rejects anything else.

use log::{debug, trace};
use roxmltree::{Document, Node, ParsingOptions};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
    value::{Dict, Value},
};

/// Decodes property-list XML text into its root dictionary.
///
/// The root is either a `<plist>` element holding one value, or a bare
/// value element. It must be a `dict`.
///
/// # Errors
///
/// Returns a [`ParseError`] for XML syntax errors, unknown element kinds,
/// unpaired dict entries, or a root that is not a dict. All unknown elements
/// in the document are reported together.
///
/// # Example
///
/// ```
/// # use graffle_parser::plist;
/// let root = plist::decode("<dict><key>ImageCounter</key><integer>1</integer></dict>").unwrap();
/// assert_eq!(root["ImageCounter"].as_str(), Some("1"));
/// ```
pub fn decode(xml: &str) -> Result<Dict, ParseError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options).map_err(|err| {
        let offset = byte_offset(xml, err.pos());
        Diagnostic::error(format!("invalid xml: {err}"))
            .with_code(ErrorCode::E100)
            .with_label(Span::new(offset..offset), "here")
    })?;

    let root = doc.root_element();
    let top = if root.has_tag_name("plist") {
        let mut values = root.children().filter(Node::is_element);
        match (values.next(), values.next()) {
            (Some(top), None) => top,
            (None, _) => return Err(missing_root(root, "the plist is empty").into()),
            (Some(_), Some(extra)) => {
                return Err(Diagnostic::error("plist holds more than one top-level value")
                    .with_code(ErrorCode::E103)
                    .with_label(node_span(extra), "unexpected value")
                    .into());
            }
        }
    } else {
        root
    };

    let mut decoder = Decoder::default();
    let value = decoder.value(top);
    decoder.collector.finish()?;

    match value {
        Value::Dict(dict) => {
            debug!(entries = dict.len(); "Property list decoded");
            Ok(dict)
        }
        other => Err(missing_root(
            top,
            &format!("the top-level value is a {}, not a dict", other.kind_name()),
        )
        .into()),
    }
}

#[derive(Default)]
struct Decoder {
    collector: DiagnosticCollector,
}

impl Decoder {
    fn value(&mut self, node: Node) -> Value {
        let name = node.tag_name().name();
        trace!(element = name; "Decoding plist node");
        match name {
            "dict" => Value::Dict(self.dict(node)),
            "array" => Value::Array(
                node.children()
                    .filter(Node::is_element)
                    .map(|child| self.value(child))
                    .collect(),
            ),
            "string" => Value::String(text_of(node)),
            "integer" | "real" => Value::Number(text_of(node).trim().to_string()),
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            "date" => Value::Date(text_of(node).trim().to_string()),
            "data" => Value::Data(text_of(node).split_whitespace().collect()),
            other => {
                self.collector.emit(
                    Diagnostic::error(format!("unknown plist node `{other}`"))
                        .with_code(ErrorCode::E101)
                        .with_label(node_span(node), "not a property-list element")
                        .with_help(
                            "property lists may only contain dict, array, key, string, \
                             integer, real, true, false, date and data",
                        ),
                );
                Value::String(String::new())
            }
        }
    }

    fn dict(&mut self, node: Node) -> Dict {
        let mut dict = Dict::new();
        let mut pending: Option<(String, Node)> = None;

        for child in node.children().filter(Node::is_element) {
            if child.has_tag_name("key") {
                if let Some((key, key_node)) = pending.replace((text_of(child), child)) {
                    self.unpaired(node, key_node, format!("key `{key}` has no value"));
                }
                continue;
            }

            let value = self.value(child);
            match pending.take() {
                Some((key, _)) => {
                    dict.insert(key, value);
                }
                None => self.unpaired(node, child, "value without a key".to_string()),
            }
        }

        if let Some((key, key_node)) = pending {
            self.unpaired(node, key_node, format!("key `{key}` has no value"));
        }
        dict
    }

    fn unpaired(&mut self, dict: Node, entry: Node, message: String) {
        self.collector.emit(
            Diagnostic::error(message)
                .with_code(ErrorCode::E102)
                .with_label(node_span(entry), "unpaired entry")
                .with_secondary_label(node_span(dict), "in this dict"),
        );
    }
}

fn missing_root(node: Node, reason: &str) -> Diagnostic {
    Diagnostic::error(format!("missing document root: {reason}"))
        .with_code(ErrorCode::E103)
        .with_label(node_span(node), "expected a dict")
}

fn text_of(node: Node) -> String {
    node.children()
        .filter(Node::is_text)
        .filter_map(|child| child.text())
        .collect()
}

fn node_span(node: Node) -> Span {
    Span::new(node.range())
}

/// Converts a 1-based row/column position into a byte offset.
fn byte_offset(text: &str, pos: roxmltree::TextPos) -> usize {
    let row = pos.row.saturating_sub(1) as usize;
    let col = pos.col.saturating_sub(1) as usize;

    let line_start: usize = text
        .split_inclusive('\n')
        .take(row)
        .map(str::len)
        .sum();
    let line = &text[line_start.min(text.len())..];
    let col_offset = line
        .char_indices()
        .nth(col)
        .map_or(line.len(), |(offset, _)| offset);
    line_start + col_offset
}
