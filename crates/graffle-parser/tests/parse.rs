use std::io::Write;

use flate2::{Compression, write::GzEncoder};

use graffle_core::document::{GraphicKind, Shape};
use graffle_parser::{ContainerKind, GraffleFile, error::ErrorCode, parse};

const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>GraphDocumentVersion</key>
    <integer>6</integer>
    <key>Sheets</key>
    <array>
        <dict>
            <key>SheetTitle</key>
            <string>Canvas 1</string>
            <key>BackgroundGraphic</key>
            <dict>
                <key>Bounds</key>
                <string>{{0, 0}, {756, 553}}</string>
                <key>Class</key>
                <string>SolidGraphic</string>
                <key>ID</key>
                <integer>2</integer>
                <key>Style</key>
                <dict>
                    <key>shadow</key>
                    <dict><key>Draws</key><string>NO</string></dict>
                    <key>stroke</key>
                    <dict><key>Draws</key><string>NO</string></dict>
                </dict>
            </dict>
            <key>GraphicsList</key>
            <array>
                <dict>
                    <key>Class</key>
                    <string>LineGraphic</string>
                    <key>ID</key>
                    <integer>5</integer>
                    <key>Points</key>
                    <array>
                        <string>{100, 75}</string>
                        <string>{200, 75}</string>
                    </array>
                </dict>
                <dict>
                    <key>Bounds</key>
                    <string>{{50, 50}, {50, 50}}</string>
                    <key>Class</key>
                    <string>ShapedGraphic</string>
                    <key>ID</key>
                    <integer>4</integer>
                    <key>Shape</key>
                    <string>Circle</string>
                    <key>Text</key>
                    <dict>
                        <key>Text</key>
                        <string>{\rtf1\ansi\ansicpg1252\cocoartf949
{\fonttbl\f0\fswiss\fcharset0 Helvetica;}
\pard\qc
\f0\fs24 Hello}</string>
                    </dict>
                </dict>
            </array>
        </dict>
    </array>
</dict>
</plist>
"#;

#[test]
fn test_parse_document() {
    let (document, warnings) = parse(DOCUMENT).expect("Failed to parse");
    assert!(warnings.is_empty());

    assert_eq!(document.format_version(), 6);
    let sheet = document.sheet(0).expect("one sheet");
    assert_eq!(sheet.title(), Some("Canvas 1"));

    let background = sheet.background().expect("background graphic");
    assert!(matches!(background.kind(), GraphicKind::Solid(_)));

    let graphics = sheet.graphics();
    assert_eq!(graphics.len(), 2);
    assert_eq!(graphics[0].id(), "5");

    match graphics[1].kind() {
        GraphicKind::Shaped(shaped) => assert_eq!(shaped.shape(), &Shape::Circle),
        other => panic!("Expected a shaped graphic, got {}", other.class_name()),
    }
    let text = graphics[1].text().expect("text run");
    let decoded = graffle_parser::rtf::decode(&text.text);
    assert_eq!(decoded.spans()[0].text, "Hello");
    assert_eq!(
        decoded.spans()[0].style.font_family.as_deref(),
        Some("Helvetica")
    );
}

#[test]
fn test_read_compressed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diagram.graffle");

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(DOCUMENT.as_bytes()).unwrap();
    std::fs::write(&path, encoder.finish().unwrap()).unwrap();

    let file = GraffleFile::open(&path).unwrap();
    assert_eq!(file.kind(), ContainerKind::Gzip);

    let (document, _) = parse(&file.close()).unwrap();
    assert_eq!(document.sheets().len(), 1);
}

#[test]
fn test_unknown_node_is_fatal() {
    let xml = DOCUMENT.replace("<integer>6</integer>", "<number>6</number>");
    let err = parse(&xml).unwrap_err();

    let diag = err.first_error().unwrap();
    assert_eq!(diag.code(), Some(ErrorCode::E101));
    let span = diag.labels()[0].span();
    assert_eq!(&xml[span.start()..span.end()], "<number>6</number>");
}
