// Viewer configuration
// Values fixed at startup and handed to the loader, state and window

/// Default target box the images are fit into
pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;

/// Largest accepted window width or height
pub const MAX_WINDOW_DIMENSION: u32 = 16384;

/// Default frame rate cap
pub const DEFAULT_FPS: u32 = 60;

/// Prefix of the window title, followed by the current file name
pub const APP_TITLE: &str = "Image Viewer";

/// Startup configuration, read once and passed around by reference
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Width of the window and of the target box
    pub target_width: u32,
    /// Height of the window and of the target box
    pub target_height: u32,
    /// Title prefix shown in the window title bar
    pub title: String,
    /// Frame rate cap for presenting frames
    pub fps: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_WIDTH,
            target_height: DEFAULT_HEIGHT,
            title: APP_TITLE.to_string(),
            fps: DEFAULT_FPS,
        }
    }
}

impl ViewerConfig {
    /// Window title for the given file name
    pub fn window_title(&self, file_name: &str) -> String {
        format!("{}: {}", self.title, file_name)
    }

    /// Top-left offset that centers an image of the given size in the window.
    /// Negative when the image is larger than the window on that axis.
    pub fn centered_position(&self, width: u32, height: u32) -> (i32, i32) {
        let x = (self.target_width as i64 - width as i64).div_euclid(2);
        let y = (self.target_height as i64 - height as i64).div_euclid(2);
        (x as i32, y as i32)
    }
}
