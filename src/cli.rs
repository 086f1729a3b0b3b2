// Command line interface module
// Handles parsing of command line arguments and validation of the image path

use crate::config::{
    ViewerConfig, DEFAULT_FPS, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_WINDOW_DIMENSION,
};
use crate::error::{Result, ViewerError};
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};

/// pixview - Browse the images of a directory in a fixed-size window
#[derive(Parser, Debug)]
#[command(name = "pixview")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the first image to show
    #[arg(value_name = "IMAGE")]
    pub image_path: Option<PathBuf>,

    /// Width of the window (images are fit into this box)
    #[arg(long, default_value_t = DEFAULT_WIDTH, value_parser = parse_window_dimension)]
    pub width: u32,

    /// Height of the window (images are fit into this box)
    #[arg(long, default_value_t = DEFAULT_HEIGHT, value_parser = parse_window_dimension)]
    pub height: u32,

    /// Frame rate cap
    #[arg(long, default_value_t = DEFAULT_FPS, value_parser = parse_positive)]
    pub fps: u32,
}

/// Parsed arguments with a validated image path
#[derive(Debug)]
pub struct ParsedArgs {
    pub image_path: PathBuf,
    pub config: ViewerConfig,
}

/// Parse a strictly positive integer
fn parse_positive(s: &str) -> std::result::Result<u32, String> {
    let value: u32 = s.parse().map_err(|_| format!("Invalid value: {s}"))?;
    if value == 0 {
        return Err("Value must be greater than 0".to_string());
    }
    Ok(value)
}

/// Parse a window dimension, bounded so the frame buffer stays allocatable
fn parse_window_dimension(s: &str) -> std::result::Result<u32, String> {
    let value = parse_positive(s)?;
    if value > MAX_WINDOW_DIMENSION {
        return Err(format!(
            "Window dimension must be at most {MAX_WINDOW_DIMENSION}"
        ));
    }
    Ok(value)
}

/// Program name as invoked, for the usage line
fn program_name() -> String {
    std::env::args()
        .next()
        .unwrap_or_else(|| "pixview".to_string())
}

/// Check that the path can be opened for reading
pub fn check_readable(path: &Path) -> Result<()> {
    File::open(path).map(drop).map_err(|_| ViewerError::Unreadable {
        path: path.to_path_buf(),
    })
}

/// Turn raw arguments into a validated image path and a configuration
pub fn validate(args: Args) -> Result<ParsedArgs> {
    let image_path = args.image_path.ok_or_else(|| ViewerError::Usage {
        program: program_name(),
    })?;

    check_readable(&image_path)?;

    let config = ViewerConfig {
        target_width: args.width,
        target_height: args.height,
        fps: args.fps,
        ..ViewerConfig::default()
    };

    Ok(ParsedArgs { image_path, config })
}

/// Parse command line arguments and validate the image path
pub fn parse_args() -> Result<ParsedArgs> {
    validate(Args::parse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn args(image_path: Option<PathBuf>) -> Args {
        Args {
            image_path,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fps: DEFAULT_FPS,
        }
    }

    #[test]
    fn test_missing_path_is_usage_error() {
        let err = validate(args(None)).unwrap_err();
        assert!(matches!(err, ViewerError::Usage { .. }));
        assert!(err.to_string().starts_with("Usage: "));
        assert!(err.to_string().ends_with(" IMAGE"));
    }

    #[test]
    fn test_unreadable_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.png");
        let err = validate(args(Some(missing.clone()))).unwrap_err();
        assert!(matches!(err, ViewerError::Unreadable { .. }));
        assert_eq!(
            format!("Error: {err}"),
            format!(
                "Error: image file {} cannot be opened for reading.",
                missing.display()
            )
        );
    }

    #[test]
    fn test_readable_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.png");
        fs::write(&path, b"not checked here").unwrap();
        let parsed = validate(args(Some(path.clone()))).unwrap();
        assert_eq!(parsed.image_path, path);
        assert_eq!(parsed.config, ViewerConfig::default());
    }

    #[test]
    fn test_clap_overrides() {
        let args = Args::try_parse_from(["pixview", "--width", "800", "--fps", "30", "x.png"])
            .unwrap();
        assert_eq!(args.width, 800);
        assert_eq!(args.height, DEFAULT_HEIGHT);
        assert_eq!(args.fps, 30);
        assert_eq!(args.image_path, Some(PathBuf::from("x.png")));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(Args::try_parse_from(["pixview", "--height", "0", "x.png"]).is_err());
        assert!(parse_positive("abc").is_err());
        assert_eq!(parse_positive("12"), Ok(12));
    }

    #[test]
    fn test_oversized_window_rejected() {
        assert!(Args::try_parse_from(["pixview", "--width", "3000000000", "x.png"]).is_err());
        assert!(Args::try_parse_from(["pixview", "--height", "16385", "x.png"]).is_err());
        assert!(parse_window_dimension("3000000000").is_err());

        let args = Args::try_parse_from(["pixview", "--width", "16384", "x.png"]).unwrap();
        assert_eq!(args.width, MAX_WINDOW_DIMENSION);
    }
}
