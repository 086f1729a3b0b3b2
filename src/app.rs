// Application state module
// Holds the file list and the current slide, and reacts to viewer commands

use crate::config::ViewerConfig;
use crate::error::{Result, ViewerError};
use crate::image_loader::{self, LoadedImage};
use crate::listing::{self, FileList};
use log::{info, warn};
use std::path::Path;

/// Direction of a navigation scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// What the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Step(Direction),
}

/// Event loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Quit,
}

/// The entry currently on screen. Replaced as a whole on navigation.
#[derive(Debug, Clone)]
pub struct Slide {
    pub index: usize,
    pub name: String,
    pub image: LoadedImage,
    /// Top-left offset centering the image in the window
    pub position: (i32, i32),
}

impl Slide {
    fn new(index: usize, name: String, image: LoadedImage, config: &ViewerConfig) -> Self {
        let position = config.centered_position(image.width, image.height);
        Self {
            index,
            name,
            image,
            position,
        }
    }
}

/// Main application state
pub struct ViewerState {
    config: ViewerConfig,
    files: FileList,
    slide: Slide,
    state: LoopState,
}

impl ViewerState {
    /// List the directory of `path` and load `path` as the first slide
    pub fn open(path: &Path, config: ViewerConfig) -> Result<Self> {
        let (files, index) = FileList::for_image(path)?;
        info!(
            "Browsing {} entries in {}",
            files.len(),
            files.dir().display()
        );

        let image = image_loader::try_load(path, &config).ok_or_else(|| {
            ViewerError::InitialImage {
                path: path.to_path_buf(),
            }
        })?;
        let name = entry_name(&files, index);

        Ok(Self::new(config, files, index, name, image))
    }

    fn new(
        config: ViewerConfig,
        files: FileList,
        index: usize,
        name: String,
        image: LoadedImage,
    ) -> Self {
        let slide = Slide::new(index, name, image, &config);
        Self {
            config,
            files,
            slide,
            state: LoopState::Running,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn slide(&self) -> &Slide {
        &self.slide
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Window title for the current slide
    pub fn title(&self) -> String {
        self.config.window_title(&self.slide.name)
    }

    /// React to a command and return the resulting loop state.
    /// An exhausted navigation scan keeps the current slide and the loop running.
    pub fn apply(&mut self, command: Command) -> LoopState {
        match command {
            Command::Quit => {
                info!("Quit requested");
                self.state = LoopState::Quit;
            }
            Command::Step(direction) => {
                if let Err(err) = self.step(direction) {
                    warn!("{}; keeping {}", err, self.slide.name);
                }
            }
        }
        self.state
    }

    /// Move to the next loadable entry in `direction`
    pub fn step(&mut self, direction: Direction) -> Result<()> {
        let config = self.config.clone();
        self.step_with(direction, |path| image_loader::try_load(path, &config))
    }

    /// Move to the next entry in `direction` for which `load` returns an
    /// image. Gives up after one full lap of the list.
    pub fn step_with<F>(&mut self, direction: Direction, mut load: F) -> Result<()>
    where
        F: FnMut(&Path) -> Option<LoadedImage>,
    {
        if self.files.is_empty() {
            return Err(ViewerError::NoDisplayableImage);
        }
        let forward = direction == Direction::Forward;
        let mut index = self.slide.index;

        for _ in 0..self.files.len() {
            index = listing::wrap_step(index, self.files.len(), forward);
            let Some(path) = self.files.path(index) else {
                continue;
            };
            if let Some(image) = load(&path) {
                let name = entry_name(&self.files, index);
                self.slide = Slide::new(index, name, image, &self.config);
                return Ok(());
            }
        }

        Err(ViewerError::NoDisplayableImage)
    }
}

fn entry_name(files: &FileList, index: usize) -> String {
    files
        .name(index)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
