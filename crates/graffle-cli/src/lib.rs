//! CLI logic for the graffle2svg converter.
//!
//! This module contains the core CLI logic: loading configuration, reading
//! the input document, rendering the selected pages, and writing one SVG
//! file per page.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{info, warn};

use graffle::{Converter, Diagnostic, GraffleError};

/// Run the graffle2svg CLI application
///
/// This function reads the input document, renders the selected pages and
/// writes each one to its output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Returns
///
/// The data warnings found while reading and rendering, in order.
///
/// # Errors
///
/// Returns `GraffleError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Unrecognised or malformed input documents
/// - A page selector beyond the last page
pub fn run(args: &Args) -> Result<Vec<Diagnostic>, GraffleError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Converting document"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if args.no_background {
        app_config.render_mut().set_background(false);
    }
    if args.bounding_box.is_some() {
        app_config.render_mut().set_bounding_box(args.bounding_box);
    }

    let converter = Converter::new(app_config);
    let (document, mut warnings) = converter.open(&args.input)?;

    let pages = match args.page {
        Some(page) => vec![page],
        None => (0..converter.page_count(&document)).collect(),
    };
    if pages.is_empty() {
        warn!(input_path = args.input; "Document has no pages, nothing written");
        return Ok(warnings);
    }

    let outputs = output_paths(Path::new(&args.input), Path::new(&args.output), &pages);
    for (page, output) in pages.iter().zip(&outputs) {
        let (svg, page_warnings) = converter.render_svg(&document, *page)?;
        warnings.extend(page_warnings);

        fs::write(output, svg)?;
        info!(page = *page, output_file:% = output.display(); "SVG exported");
    }

    Ok(warnings)
}

/// Where each page is written.
///
/// An existing directory receives `<input-stem>-<page>.svg` files. Otherwise
/// a single page goes to `output` itself and several pages go next to it as
/// `<output-stem>-<page>.<ext>`.
fn output_paths(input: &Path, output: &Path, pages: &[usize]) -> Vec<PathBuf> {
    if output.is_dir() {
        let stem = input
            .file_stem()
            .map_or_else(|| "page".into(), |stem| stem.to_string_lossy());
        return pages
            .iter()
            .map(|page| output.join(format!("{stem}-{page}.svg")))
            .collect();
    }

    if let [_] = pages {
        return vec![output.to_path_buf()];
    }

    let stem = output
        .file_stem()
        .map_or_else(|| "out".into(), |stem| stem.to_string_lossy());
    let extension = output
        .extension()
        .map_or_else(|| "svg".into(), |ext| ext.to_string_lossy());
    pages
        .iter()
        .map(|page| output.with_file_name(format!("{stem}-{page}.{extension}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page_uses_output() {
        let paths = output_paths(Path::new("in.graffle"), Path::new("/tmp/x/diagram.svg"), &[3]);
        assert_eq!(paths, [PathBuf::from("/tmp/x/diagram.svg")]);
    }

    #[test]
    fn test_several_pages_are_numbered() {
        let paths = output_paths(Path::new("in.graffle"), Path::new("out/figure.svg"), &[0, 1]);
        assert_eq!(
            paths,
            [
                PathBuf::from("out/figure-0.svg"),
                PathBuf::from("out/figure-1.svg")
            ]
        );
    }

    #[test]
    fn test_directory_output_uses_input_stem() {
        let dir = tempfile::tempdir().unwrap();
        let paths = output_paths(Path::new("docs/progit.graffle"), dir.path(), &[0, 2]);
        assert_eq!(
            paths,
            [dir.path().join("progit-0.svg"), dir.path().join("progit-2.svg")]
        );
    }
}
