// pixview - A minimal image viewer for Wayland
// Shows one image at a time and steps through its directory with the arrow keys

mod app;
mod cli;
mod config;
mod error;
mod image_loader;
mod listing;
mod render;
mod wayland;

use anyhow::Result;
use app::ViewerState;
use error::ViewerError;
use log::info;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(usage @ ViewerError::Usage { .. }) => {
            println!("{}", usage);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    info!(
        "Starting pixview with image: {:?}, target box: {}x{}",
        args.image_path, args.config.target_width, args.config.target_height
    );

    // List the directory and load the first image
    let viewer = ViewerState::open(&args.image_path, args.config)?;

    let slide = viewer.slide();
    info!(
        "Image loaded: {} ({}x{} pixels)",
        slide.name, slide.image.width, slide.image.height
    );

    wayland::run(viewer)
}
