use std::{fs, io::Write, path::Path};

use flate2::{Compression, write::GzEncoder};
use tempfile::tempdir;

use graffle::GraffleError;
use graffle_cli::{Args, run};

const TWO_PAGES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>GraphDocumentVersion</key>
    <integer>6</integer>
    <key>Sheets</key>
    <array>
        <dict>
            <key>GraphicsList</key>
            <array>
                <dict>
                    <key>Bounds</key>
                    <string>{{10, 10}, {80, 40}}</string>
                    <key>Class</key>
                    <string>ShapedGraphic</string>
                    <key>ID</key>
                    <integer>1</integer>
                    <key>Shape</key>
                    <string>RoundRect</string>
                </dict>
            </array>
        </dict>
        <dict>
            <key>GraphicsList</key>
            <array>
                <dict>
                    <key>Bounds</key>
                    <string>{{0, 0}, {60, 60}}</string>
                    <key>Class</key>
                    <string>ShapedGraphic</string>
                    <key>ID</key>
                    <integer>7</integer>
                    <key>Shape</key>
                    <string>Cloud</string>
                </dict>
            </array>
        </dict>
    </array>
</dict>
</plist>
"#;

/// A version 5 document: one page on the root dict, background from the
/// canvas color.
const SINGLE_PAGE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>GraphDocumentVersion</key>
    <integer>5</integer>
    <key>CanvasColor</key>
    <dict><key>w</key><string>1</string></dict>
    <key>GraphicsList</key>
    <array>
        <dict>
            <key>Class</key>
            <string>LineGraphic</string>
            <key>ID</key>
            <integer>3</integer>
            <key>Points</key>
            <array>
                <string>{0, 0}</string>
                <string>{50, 50}</string>
            </array>
            <key>Style</key>
            <dict>
                <key>stroke</key>
                <dict>
                    <key>TailArrow</key>
                    <string>CrowBall</string>
                    <key>Pattern</key>
                    <integer>9</integer>
                </dict>
            </dict>
        </dict>
    </array>
</dict>
</plist>
"#;

fn args(input: &Path, output: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        page: None,
        no_background: false,
        bounding_box: None,
        config: None,
        log_level: "off".to_string(),
    }
}

fn gzip(text: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

#[test]
fn e2e_smoke_test_every_page() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("diagram.graffle");
    fs::write(&input, gzip(TWO_PAGES)).unwrap();

    let output = temp_dir.path().join("diagram.svg");
    let warnings = run(&args(&input, &output)).expect("conversion failed");
    assert!(warnings.is_empty());

    let first = fs::read_to_string(temp_dir.path().join("diagram-0.svg")).unwrap();
    assert!(first.contains(r#"id="1""#));
    assert!(first.contains("<rect"));

    let second = fs::read_to_string(temp_dir.path().join("diagram-1.svg")).unwrap();
    assert!(second.contains(r##"<use xlink:href="#network_cloud"/>"##));
    assert!(second.contains(r#"<g id="network_cloud">"#));
    assert!(!output.exists());
}

#[test]
fn e2e_smoke_test_selected_page_into_directory() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("figures.graffle");
    fs::write(&input, TWO_PAGES).unwrap();
    let out_dir = temp_dir.path().join("svg");
    fs::create_dir(&out_dir).unwrap();

    let mut args = args(&input, &out_dir);
    args.page = Some(1);
    run(&args).unwrap();

    let files: Vec<_> = fs::read_dir(&out_dir)
        .unwrap()
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(files, ["figures-1.svg"]);
}

#[test]
fn e2e_smoke_test_old_version_with_warnings() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("old.graffle");
    fs::write(&input, SINGLE_PAGE).unwrap();
    let output = temp_dir.path().join("old.svg");

    let warnings = run(&args(&input, &output)).unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code(), Some(graffle::ErrorCode::E304));

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains(r#"id="background""#));
    assert!(svg.contains("url(#mCrowBall)"));
    assert!(svg.contains(r#"id="mCrowBall""#));
    assert!(svg.contains("stroke-dasharray:1 1"));

    // Without the background only the line remains.
    let mut args = args(&input, &output);
    args.no_background = true;
    run(&args).unwrap();
    let svg = fs::read_to_string(&output).unwrap();
    assert!(!svg.contains(r#"id="background""#));
}

#[test]
fn e2e_smoke_test_invalid_inputs() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("out.svg");

    let text = temp_dir.path().join("notes.txt");
    fs::write(&text, "just some notes").unwrap();
    let err = run(&args(&text, &output)).unwrap_err();
    assert!(matches!(err, GraffleError::InvalidInputFile { .. }));

    let input = temp_dir.path().join("diagram.graffle");
    fs::write(&input, TWO_PAGES).unwrap();
    let mut out_of_range = args(&input, &output);
    out_of_range.page = Some(5);
    let err = run(&out_of_range).unwrap_err();
    assert!(matches!(err, GraffleError::PageOutOfRange { page: 5, count: 2 }));

    let mut missing_config = args(&input, &output);
    missing_config.config = Some(temp_dir.path().join("none.toml").to_string_lossy().to_string());
    assert!(run(&missing_config).is_err());
    assert!(!output.exists());
}
