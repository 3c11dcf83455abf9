//! Elaboration of the generic value tree into the typed document model.
//!
//! The value tree is loosely typed: every scalar is text, and fields may be
//! missing or hold the wrong kind. This phase is lenient about graphic-level
//! data. A bad number, coordinate string or value kind inside a graphic
//! becomes an `E2xx` warning and the field is treated as absent. Only problems
//! with the page structure itself (a `Sheets` entry that is not a list of
//! dicts) are errors.

use indexmap::IndexMap;
use log::{debug, info, trace};

use graffle_core::{
    color::Rgb,
    document::{
        ArrowKind, Document, FileInfo, FillStyle, FontInfo, Graphic, GraphicKind, LineGraphic,
        PrintInfo, PrintValue, ShadowStyle, Shape, ShapeData, ShapedGraphic, Sheet, StrokeStyle,
        Style, TextRun,
    },
};

use crate::{
    coords,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    value::{Dict, Value},
};

/// Builds a [`Document`] from a decoded property-list root.
///
/// Returns the document together with the warnings raised while building it.
///
/// # Errors
///
/// Fails when the page structure cannot be read: `Sheets` is present but is
/// not an array of dicts.
pub fn elaborate(root: &Dict) -> Result<(Document, Vec<Diagnostic>), ParseError> {
    let mut builder = Builder::default();
    let document = builder.build(root);
    let warnings = builder.diagnostics.finish()?;
    Ok((document, warnings))
}

#[derive(Default)]
struct Builder {
    diagnostics: DiagnosticCollector,
}

impl Builder {
    fn build(&mut self, root: &Dict) -> Document {
        let file_info = self.file_info(root);
        info!(version = file_info.format_version(); "Building document model");

        let images = match root.get("ImageList") {
            Some(list) => self
                .array(list, "document", "ImageList")
                .iter()
                .filter_map(|image| self.string(image, "document", "ImageList"))
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        };

        let sheets = match root.get("Sheets") {
            Some(Value::Array(sheets)) => sheets
                .iter()
                .enumerate()
                .filter_map(|(index, sheet)| match sheet {
                    Value::Dict(sheet) => Some(self.sheet(sheet, index)),
                    other => {
                        self.diagnostics.emit(
                            Diagnostic::error(format!(
                                "sheet {index} is a {}, expected a dict",
                                other.kind_name()
                            ))
                            .with_code(ErrorCode::E203),
                        );
                        None
                    }
                })
                .collect(),
            Some(other) => {
                self.diagnostics.emit(
                    Diagnostic::error(format!(
                        "`Sheets` is a {}, expected an array",
                        other.kind_name()
                    ))
                    .with_code(ErrorCode::E203),
                );
                Vec::new()
            }
            // Single-page documents keep the page fields on the root.
            None => vec![self.sheet(root, 0)],
        };

        debug!(sheets = sheets.len(), images = images.len(); "Document model built");
        Document::new(file_info, sheets, images)
    }

    fn file_info(&mut self, root: &Dict) -> FileInfo {
        let owner = "document";
        let version = root
            .get("GraphDocumentVersion")
            .and_then(|value| self.integer(value, owner, "GraphDocumentVersion"))
            .unwrap_or(-1);

        let print_info = match root.get("PrintInfo") {
            Some(value) => self
                .dict(value, owner, "PrintInfo")
                .map(|dict| self.print_info(dict))
                .unwrap_or_default(),
            None => PrintInfo::default(),
        };

        let text = |key: &str| {
            root.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let application_version = root
            .get("ApplicationVersion")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        FileInfo::new(version, print_info)
            .with_creator(text("Creator"))
            .with_dates(text("CreationDate"), text("ModificationDate"))
            .with_application_version(application_version)
    }

    /// Reads `PrintInfo`, whose entries are `[type, value]` pairs.
    fn print_info(&mut self, dict: &Dict) -> PrintInfo {
        let mut entries = IndexMap::new();
        for (key, entry) in dict {
            let Some([kind, value]) = entry.as_array().and_then(|pair| pair.first_chunk::<2>()) else {
                self.diagnostics.emit(Diagnostic::data_error(
                    ErrorCode::E203,
                    format!("print setting `{key}` is not a [type, value] pair"),
                ));
                continue;
            };
            let value = match kind.as_str().unwrap_or_default() {
                "int" => self.integer(value, "PrintInfo", key).map(PrintValue::Int),
                "size" => value
                    .as_str()
                    .and_then(|text| self.recover(coords::parse_size(text)))
                    .map(|(w, h)| PrintValue::Size(w, h)),
                "coded" => Some(PrintValue::Coded),
                _ => value.as_str().map(|text| PrintValue::Text(text.to_string())),
            };
            if let Some(value) = value {
                entries.insert(key.clone(), value);
            }
        }
        PrintInfo::new(entries)
    }

    fn sheet(&mut self, dict: &Dict, index: usize) -> Sheet {
        let owner = format!("sheet {index}");
        trace!(sheet = index; "Building sheet");

        let graphics = match dict.get("GraphicsList") {
            Some(list) => self.graphics(list, &owner, "GraphicsList"),
            None => {
                self.diagnostics.emit(Diagnostic::data_error(
                    ErrorCode::E202,
                    format!("{owner} has no `GraphicsList`"),
                ));
                Vec::new()
            }
        };

        let background = dict
            .get("BackgroundGraphic")
            .and_then(|value| self.graphic(value, &owner));

        let origin = dict
            .get("CanvasOrigin")
            .and_then(Value::as_str)
            .and_then(|text| self.recover(coords::parse_point(text)))
            .unwrap_or_default();
        let canvas_color = dict
            .get("CanvasColor")
            .and_then(|value| self.color(value, &owner));

        Sheet::new(graphics)
            .with_title(
                dict.get("SheetTitle")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            )
            .with_background(background)
            .with_canvas(origin, canvas_color)
    }

    fn graphics(&mut self, list: &Value, owner: &str, key: &str) -> Vec<Graphic> {
        self.array(list, owner, key)
            .iter()
            .filter_map(|value| self.graphic(value, owner))
            .collect()
    }

    fn graphic(&mut self, value: &Value, parent: &str) -> Option<Graphic> {
        let dict = self.dict(value, parent, "graphic")?;
        let id = dict
            .get("ID")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let owner = format!("graphic {id}");

        let class = match dict.get("Class").and_then(Value::as_str) {
            Some(class) => class,
            None => {
                self.diagnostics.emit(Diagnostic::data_error(
                    ErrorCode::E202,
                    format!("{owner} has no `Class`"),
                ));
                ""
            }
        };
        trace!(id = id.as_str(), class = class; "Building graphic");

        let kind = match class {
            "ShapedGraphic" => GraphicKind::Shaped(self.shaped(dict, &owner)),
            "SolidGraphic" => GraphicKind::Solid(self.shaped(dict, &owner)),
            "LineGraphic" => GraphicKind::Line(self.line(dict, &owner)),
            "Group" => GraphicKind::Group(self.children(dict, &owner)),
            "TableGroup" => GraphicKind::TableGroup(self.children(dict, &owner)),
            other => GraphicKind::Unknown(other.to_string()),
        };

        let bounds = dict
            .get("Bounds")
            .and_then(|value| self.string(value, &owner, "Bounds"))
            .and_then(|text| self.recover(coords::parse_bounds(text)));
        let style = dict
            .get("Style")
            .and_then(|value| self.dict(value, &owner, "Style"))
            .map(|style| self.style(style, &owner));
        let text = dict
            .get("Text")
            .and_then(|value| self.dict(value, &owner, "Text"))
            .map(|text| self.text_run(text, &owner));
        let font = dict
            .get("FontInfo")
            .and_then(|value| self.dict(value, &owner, "FontInfo"))
            .map(|font| self.font_info(font, &owner));

        Some(
            Graphic::new(id, kind)
                .with_bounds(bounds)
                .with_style(style)
                .with_text(text, font),
        )
    }

    fn shaped(&mut self, dict: &Dict, owner: &str) -> ShapedGraphic {
        let shape = dict
            .get("Shape")
            .and_then(Value::as_str)
            .map_or(Shape::Rectangle, |name| {
                let Ok(shape) = name.parse::<Shape>();
                shape
            });
        let image_id = dict
            .get("ImageID")
            .and_then(|value| self.integer(value, owner, "ImageID"));
        let flag = |key: &str| dict.get(key).and_then(Value::as_flag).unwrap_or(false);
        let rotation = dict
            .get("Rotation")
            .and_then(|value| self.number(value, owner, "Rotation"));
        let shape_data = dict
            .get("ShapeData")
            .and_then(|value| self.dict(value, owner, "ShapeData"))
            .map(|data| ShapeData {
                ratio: data
                    .get("ratio")
                    .and_then(|value| self.number(value, owner, "ratio")),
                width: data
                    .get("width")
                    .and_then(|value| self.number(value, owner, "width")),
            });

        ShapedGraphic::new(shape)
            .with_image(image_id)
            .with_flips(flag("HFlip"), flag("VFlip"))
            .with_rotation(rotation)
            .with_shape_data(shape_data)
    }

    fn line(&mut self, dict: &Dict, owner: &str) -> LineGraphic {
        let points = match dict.get("Points") {
            Some(points) => self
                .array(points, owner, "Points")
                .iter()
                .filter_map(|point| {
                    let text = self.string(point, owner, "Points")?;
                    self.recover(coords::parse_point(text))
                })
                .collect(),
            None => {
                self.diagnostics.emit(Diagnostic::data_error(
                    ErrorCode::E202,
                    format!("{owner} has no `Points`"),
                ));
                Vec::new()
            }
        };

        let automatic = dict
            .get("OrthogonalBarAutomatic")
            .and_then(Value::as_flag)
            .unwrap_or(false);
        let position = dict
            .get("OrthogonalBarPosition")
            .and_then(|value| self.number(value, owner, "OrthogonalBarPosition"));

        LineGraphic::new(points).with_orthogonal_bar(automatic, position)
    }

    fn children(&mut self, dict: &Dict, owner: &str) -> Vec<Graphic> {
        dict.get("Graphics")
            .map(|list| self.graphics(list, owner, "Graphics"))
            .unwrap_or_default()
    }

    fn style(&mut self, dict: &Dict, owner: &str) -> Style {
        let fill = dict
            .get("fill")
            .and_then(|value| self.dict(value, owner, "fill"))
            .map(|fill| FillStyle {
                draws: draws(fill),
                color: fill.get("Color").and_then(|value| self.color(value, owner)),
            });

        let stroke = dict
            .get("stroke")
            .and_then(|value| self.dict(value, owner, "stroke"))
            .map(|stroke| {
                let arrow = |key: &str| {
                    stroke
                        .get(key)
                        .and_then(Value::as_str)
                        .map(|name| {
                            let Ok(kind) = name.parse::<ArrowKind>();
                            kind
                        })
                };
                StrokeStyle {
                    draws: draws(stroke),
                    color: stroke
                        .get("Color")
                        .and_then(|value| self.color(value, owner)),
                    width: stroke
                        .get("Width")
                        .and_then(|value| self.number(value, owner, "Width")),
                    corner_radius: stroke
                        .get("CornerRadius")
                        .and_then(|value| self.number(value, owner, "CornerRadius")),
                    pattern: stroke
                        .get("Pattern")
                        .and_then(|value| self.integer(value, owner, "Pattern")),
                    head_arrow: arrow("HeadArrow"),
                    tail_arrow: arrow("TailArrow"),
                }
            });

        let shadow = dict
            .get("shadow")
            .and_then(|value| self.dict(value, owner, "shadow"))
            .map(|shadow| ShadowStyle {
                draws: draws(shadow),
            });

        Style {
            fill,
            stroke,
            shadow,
        }
    }

    fn text_run(&mut self, dict: &Dict, owner: &str) -> TextRun {
        TextRun {
            text: dict
                .get("Text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            pad: dict
                .get("Pad")
                .and_then(|value| self.number(value, owner, "Pad"))
                .unwrap_or(0.0),
            vertical_pad: dict
                .get("VerticalPad")
                .and_then(|value| self.number(value, owner, "VerticalPad"))
                .unwrap_or(0.0),
        }
    }

    fn font_info(&mut self, dict: &Dict, owner: &str) -> FontInfo {
        FontInfo {
            font: dict
                .get("Font")
                .and_then(Value::as_str)
                .map(str::to_string),
            size: dict
                .get("Size")
                .and_then(|value| self.number(value, owner, "Size")),
            color: dict.get("Color").and_then(|value| self.color(value, owner)),
        }
    }

    /// Reads a color record: `r`, `g`, `b` channels in `0..=1`, or a single
    /// `w` channel for grays. Alpha is ignored.
    fn color(&mut self, value: &Value, owner: &str) -> Option<Rgb> {
        let dict = self.dict(value, owner, "Color")?;
        let mut channel = |key: &str| {
            dict.get(key)
                .and_then(|value| self.number(value, owner, key))
        };
        if !dict.contains_key("r") {
            if let Some(white) = channel("w") {
                return Some(Rgb::new(white, white, white));
            }
        }
        Some(Rgb::new(
            channel("r").unwrap_or(0.0),
            channel("g").unwrap_or(0.0),
            channel("b").unwrap_or(0.0),
        ))
    }

    fn number(&mut self, value: &Value, owner: &str, key: &str) -> Option<f64> {
        let number = value.as_f64();
        if number.is_none() {
            self.diagnostics.emit(Diagnostic::data_error(
                ErrorCode::E201,
                format!("{owner}: invalid number `{value}` for `{key}`"),
            ));
        }
        number
    }

    fn integer(&mut self, value: &Value, owner: &str, key: &str) -> Option<i64> {
        let number = value.as_i64();
        if number.is_none() {
            self.diagnostics.emit(Diagnostic::data_error(
                ErrorCode::E201,
                format!("{owner}: invalid integer `{value}` for `{key}`"),
            ));
        }
        number
    }

    fn string<'v>(&mut self, value: &'v Value, owner: &str, key: &str) -> Option<&'v str> {
        let text = value.as_str();
        if text.is_none() {
            self.wrong_kind(value, owner, key, "string");
        }
        text
    }

    fn dict<'v>(&mut self, value: &'v Value, owner: &str, key: &str) -> Option<&'v Dict> {
        let dict = value.as_dict();
        if dict.is_none() {
            self.wrong_kind(value, owner, key, "dict");
        }
        dict
    }

    fn array<'v>(&mut self, value: &'v Value, owner: &str, key: &str) -> &'v [Value] {
        match value.as_array() {
            Some(items) => items,
            None => {
                self.wrong_kind(value, owner, key, "array");
                &[]
            }
        }
    }

    fn wrong_kind(&mut self, value: &Value, owner: &str, key: &str, expected: &str) {
        self.diagnostics.emit(Diagnostic::data_error(
            ErrorCode::E203,
            format!(
                "{owner}: `{key}` is a {}, expected a {expected}",
                value.kind_name()
            ),
        ));
    }

    /// Reports a failed parse as a warning and drops the value.
    fn recover<T>(&mut self, result: Result<T, Diagnostic>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(diagnostic) => {
                self.diagnostics.emit(diagnostic);
                None
            }
        }
    }
}

/// A missing `Draws` entry means the part is drawn.
fn draws(dict: &Dict) -> bool {
    dict.get("Draws").and_then(Value::as_str) != Some("NO")
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use graffle_core::geometry::{Bounds, Point};

    use super::*;
    use crate::plist;

    fn build(body: &str) -> (Document, Vec<Diagnostic>) {
        let root = plist::decode(&format!("<plist version=\"1.0\"><dict>{body}</dict></plist>")).unwrap();
        elaborate(&root).unwrap()
    }

    const RECT: &str = r#"
        <dict>
            <key>Class</key><string>ShapedGraphic</string>
            <key>ID</key><integer>3</integer>
            <key>Bounds</key><string>{{0, 0}, {100, 50}}</string>
            <key>Shape</key><string>Rectangle</string>
        </dict>"#;

    #[test]
    fn test_root_is_the_only_sheet() {
        let (document, warnings) = build(&format!(
            "<key>GraphDocumentVersion</key><integer>6</integer>\
             <key>GraphicsList</key><array>{RECT}</array>"
        ));

        assert!(warnings.is_empty());
        assert_eq!(document.format_version(), 6);
        assert_eq!(document.sheets().len(), 1);

        let graphic = &document.sheets()[0].graphics()[0];
        assert_eq!(graphic.id(), "3");
        assert_eq!(
            graphic.bounds(),
            Some(Bounds::from_origin_extent(0.0, 0.0, 100.0, 50.0))
        );
        let GraphicKind::Shaped(shaped) = graphic.kind() else {
            panic!("expected a shaped graphic, got {graphic}");
        };
        assert_eq!(shaped.shape(), &Shape::Rectangle);
        assert!(shaped.transform().is_identity());
    }

    #[test]
    fn test_sheets() {
        let (document, _) = build(&format!(
            "<key>Sheets</key><array>\
                <dict><key>SheetTitle</key><string>One</string><key>GraphicsList</key><array>{RECT}</array></dict>\
                <dict><key>SheetTitle</key><string>Two</string><key>GraphicsList</key><array/></dict>\
             </array>"
        ));

        assert_eq!(document.sheets().len(), 2);
        assert_eq!(document.sheet(0).and_then(Sheet::title), Some("One"));
        assert!(document.sheet(1).unwrap().graphics().is_empty());
        assert_eq!(document.format_version(), -1);
    }

    #[test]
    fn test_sheets_must_be_an_array() {
        let root = plist::decode("<dict><key>Sheets</key><string>x</string></dict>").unwrap();
        let err = elaborate(&root).unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E203));
    }

    #[test]
    fn test_missing_graphics_list_warns() {
        let (document, warnings) = build("");
        assert!(document.sheets()[0].graphics().is_empty());
        assert_eq!(warnings[0].code(), Some(ErrorCode::E202));
    }

    #[test]
    fn test_bad_bounds_keep_the_graphic() {
        let (document, warnings) = build(
            r#"<key>GraphicsList</key><array><dict>
                <key>Class</key><string>ShapedGraphic</string>
                <key>ID</key><integer>1</integer>
                <key>Bounds</key><string>{{0, 0}, {wide, 50}}</string>
            </dict></array>"#,
        );
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code(), Some(ErrorCode::E200));
        assert_eq!(document.sheets()[0].graphics()[0].bounds(), None);
    }

    #[test]
    fn test_style_record() {
        let (document, warnings) = build(
            r#"<key>GraphicsList</key><array><dict>
                <key>Class</key><string>LineGraphic</string>
                <key>ID</key><integer>9</integer>
                <key>Points</key><array><string>{1, 2}</string><string>{3, 4}</string></array>
                <key>Style</key><dict>
                    <key>fill</key><dict><key>Draws</key><string>NO</string></dict>
                    <key>stroke</key><dict>
                        <key>Color</key><dict><key>r</key><string>0.5</string><key>g</key><string>0.5</string><key>b</key><string>0.5</string></dict>
                        <key>HeadArrow</key><string>FilledArrow</string>
                        <key>TailArrow</key><string>0</string>
                        <key>Pattern</key><integer>1</integer>
                        <key>Width</key><real>2</real>
                    </dict>
                    <key>shadow</key><dict><key>Draws</key><string>NO</string></dict>
                </dict>
            </dict></array>"#,
        );
        assert!(warnings.is_empty());

        let graphic = &document.sheets()[0].graphics()[0];
        let style = graphic.style().unwrap();
        assert!(!style.fill.as_ref().unwrap().draws);

        let stroke = style.stroke.as_ref().unwrap();
        assert!(stroke.draws);
        assert_eq!(stroke.color.map(|c| c.to_hex()), Some("808080".to_string()));
        assert_eq!(stroke.head_arrow, Some(ArrowKind::FilledArrow));
        assert_eq!(stroke.tail_arrow, Some(ArrowKind::NoArrow));
        assert_eq!(stroke.pattern, Some(1));
        assert_approx_eq!(f64, stroke.width.unwrap(), 2.0);
        assert!(!style.shadow.as_ref().unwrap().draws);

        let GraphicKind::Line(line) = graphic.kind() else {
            panic!("expected a line, got {graphic}");
        };
        assert_eq!(line.points(), [Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
    }

    #[test]
    fn test_invalid_line_points_are_skipped() {
        let (document, warnings) = build(
            r#"<key>GraphicsList</key><array><dict>
                <key>Class</key><string>LineGraphic</string>
                <key>ID</key><integer>4</integer>
                <key>Points</key><array>
                    <string>{0, 0}</string>
                    <array/>
                    <string>{x, 1}</string>
                    <string>{5, 6}</string>
                </array>
            </dict></array>"#,
        );
        let codes: Vec<_> = warnings.iter().filter_map(Diagnostic::code).collect();
        assert_eq!(codes.len(), 2);
        assert_eq!(codes[1], ErrorCode::E200);

        let GraphicKind::Line(line) = document.sheets()[0].graphics()[0].kind() else {
            panic!("expected a line");
        };
        assert_eq!(line.points(), [Point::new(0.0, 0.0), Point::new(5.0, 6.0)]);
    }

    #[test]
    fn test_gray_color() {
        let (document, _) = build(
            r#"<key>CanvasColor</key><dict><key>w</key><string>1</string></dict>
               <key>CanvasOrigin</key><string>{10, 20}</string>
               <key>GraphicsList</key><array/>"#,
        );
        let sheet = &document.sheets()[0];
        assert_eq!(sheet.canvas_color(), Some(Rgb::WHITE));
        assert_eq!(sheet.canvas_origin(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_invalid_number_warns() {
        let (document, warnings) = build(
            r#"<key>GraphicsList</key><array><dict>
                <key>Class</key><string>ShapedGraphic</string>
                <key>ID</key><integer>4</integer>
                <key>Rotation</key><string>sideways</string>
            </dict></array>"#,
        );
        assert_eq!(warnings[0].code(), Some(ErrorCode::E201));
        assert_eq!(
            warnings[0].message(),
            "graphic 4: invalid number `sideways` for `Rotation`"
        );
        let GraphicKind::Shaped(shaped) = document.sheets()[0].graphics()[0].kind() else {
            panic!("expected a shaped graphic");
        };
        assert_eq!(shaped.transform().rotation, None);
    }

    #[test]
    fn test_shaped_attributes() {
        let (document, _) = build(
            r#"<key>ImageList</key><array><string>image1.png</string></array>
               <key>GraphicsList</key><array><dict>
                <key>Class</key><string>ShapedGraphic</string>
                <key>ID</key><integer>5</integer>
                <key>Shape</key><string>AdjustableArrow</string>
                <key>HFlip</key><string>YES</string>
                <key>Rotation</key><real>90</real>
                <key>ImageID</key><integer>0</integer>
                <key>ShapeData</key><dict><key>ratio</key><real>0.5</real><key>width</key><real>20</real></dict>
                <key>Text</key><dict><key>Text</key><string>hi</string><key>Pad</key><integer>2</integer></dict>
                <key>FontInfo</key><dict><key>Font</key><string>Courier</string><key>Size</key><real>10</real></dict>
            </dict></array>"#,
        );
        assert_eq!(document.image(0), Some("image1.png"));

        let graphic = &document.sheets()[0].graphics()[0];
        let GraphicKind::Shaped(shaped) = graphic.kind() else {
            panic!("expected a shaped graphic");
        };
        assert_eq!(shaped.shape(), &Shape::AdjustableArrow);
        assert_eq!(shaped.image_id(), Some(0));
        assert_eq!(
            shaped.transform(),
            graffle_core::document::PathTransform {
                h_flip: true,
                v_flip: false,
                rotation: Some(90.0),
            }
        );
        assert_eq!(
            shaped.shape_data(),
            Some(&ShapeData {
                ratio: Some(0.5),
                width: Some(20.0)
            })
        );

        let text = graphic.text().unwrap();
        assert_eq!(text.text, "hi");
        assert_approx_eq!(f64, text.pad, 2.0);
        assert_approx_eq!(f64, text.vertical_pad, 0.0);
        assert_eq!(graphic.font().unwrap().font.as_deref(), Some("Courier"));
    }

    #[test]
    fn test_groups_and_unknown_classes() {
        let (document, warnings) = build(&format!(
            r#"<key>GraphicsList</key><array>
                <dict><key>Class</key><string>Group</string><key>ID</key><integer>1</integer>
                      <key>Graphics</key><array>{RECT}{RECT}</array></dict>
                <dict><key>Class</key><string>PolygonGraphic</string><key>ID</key><integer>2</integer></dict>
                <dict><key>ID</key><integer>7</integer></dict>
            </array>"#
        ));

        let graphics = document.sheets()[0].graphics();
        let GraphicKind::Group(children) = graphics[0].kind() else {
            panic!("expected a group");
        };
        assert_eq!(children.len(), 2);
        assert_eq!(graphics[1].kind().class_name(), "PolygonGraphic");

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message(), "graphic 7 has no `Class`");
    }

    #[test]
    fn test_file_info() {
        let (document, _) = build(
            r#"<key>GraphDocumentVersion</key><integer>5</integer>
               <key>Creator</key><string>Tim</string>
               <key>ApplicationVersion</key><array><string>com.omnigroup.OmniGraffle</string><string>138.9</string></array>
               <key>PrintInfo</key><dict>
                   <key>NSLeftMargin</key><array><string>float</string><string>18</string></array>
                   <key>NSTopMargin</key><array><string>int</string><string>18</string></array>
                   <key>NSPaperSize</key><array><string>size</string><string>{612, 792}</string></array>
                   <key>NSPrinter</key><array><string>coded</string><string>BAtzdHJl</string></array>
                   <key>NSBroken</key><string>oops</string>
               </dict>
               <key>GraphicsList</key><array/>"#,
        );

        let info = document.file_info();
        assert_eq!(info.format_version(), 5);
        assert_eq!(info.creator(), "Tim");
        assert_eq!(info.application_version().len(), 2);

        let print = info.print_info();
        assert_approx_eq!(f64, print.top_margin(), 18.0);
        // Only `int` entries count as margins.
        assert_approx_eq!(f64, print.left_margin(), 0.0);
        assert_eq!(print.paper_size(), (612.0, 792.0));
        assert_eq!(print.get("NSPrinter"), Some(&PrintValue::Coded));
        assert_eq!(print.get("NSBroken"), None);
    }
}
