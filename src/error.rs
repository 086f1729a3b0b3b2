// Error module
// Domain errors raised while validating input, listing and decoding images

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the viewer before and during a browsing session
#[derive(Debug, Error)]
pub enum ViewerError {
    /// No image path was given on the command line
    #[error("Usage: {program} IMAGE")]
    Usage { program: String },

    /// The startup path exists but cannot be opened for reading
    #[error("image file {} cannot be opened for reading.", path.display())]
    Unreadable { path: PathBuf },

    /// The containing directory could not be listed
    #[error("could not list directory {}", dir.display())]
    Listing {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The startup file does not show up in its own directory listing
    #[error("{name} is not an entry of directory {}", dir.display())]
    FileNotListed { name: String, dir: PathBuf },

    /// A candidate file could not be read or decoded as an image
    #[error("could not load {}. It may not be a valid image file.", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The startup image failed to decode, so there is nothing to show
    #[error("initial image {} could not be displayed", path.display())]
    InitialImage { path: PathBuf },

    /// A navigation scan tried every entry of the directory without success
    #[error("no displayable images left in the directory")]
    NoDisplayableImage,
}

pub type Result<T> = std::result::Result<T, ViewerError>;
