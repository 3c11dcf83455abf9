//! Command-line argument definitions for the graffle2svg CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input document, the pages to render
//! and where they go, override rendering options, and control logging.

use clap::Parser;

/// Command-line arguments for the graffle2svg converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input graffle file
    #[arg(help = "Path to the input file (plain or gzip-compressed)")]
    pub input: String,

    /// Output SVG file, or an existing directory to write pages into
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Render only this page, counting from 0
    #[arg(short, long)]
    pub page: Option<usize>,

    /// Do not draw the page background
    #[arg(long)]
    pub no_background: bool,

    /// Skip graphics outside this box and use it as the SVG viewBox
    #[arg(long, value_name = "X1,Y1,X2,Y2", value_parser = parse_bounding_box)]
    pub bounding_box: Option<[f64; 4]>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Parses four comma-separated numbers: two opposite corners of a box.
fn parse_bounding_box(value: &str) -> Result<[f64; 4], String> {
    let numbers = value
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|err| format!("invalid number `{}`: {err}", part.trim()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    numbers
        .try_into()
        .map_err(|numbers: Vec<f64>| format!("expected 4 numbers, got {}", numbers.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bounding_box() {
        assert_eq!(
            parse_bounding_box("0, 0,100.5,-20"),
            Ok([0.0, 0.0, 100.5, -20.0])
        );
        assert_eq!(
            parse_bounding_box("1,2,3"),
            Err("expected 4 numbers, got 3".to_string())
        );
        assert!(parse_bounding_box("1,2,x,4").is_err());
    }

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "graffle2svg",
            "diagram.graffle",
            "--page",
            "2",
            "--no-background",
            "--bounding-box",
            "0,0,400,300",
        ])
        .unwrap();

        assert_eq!(args.input, "diagram.graffle");
        assert_eq!(args.output, "out.svg");
        assert_eq!(args.page, Some(2));
        assert!(args.no_background);
        assert_eq!(args.bounding_box, Some([0.0, 0.0, 400.0, 300.0]));
        assert_eq!(args.log_level, "info");
    }
}
