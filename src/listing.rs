// Directory listing module
// Builds the sorted list of sibling entries the viewer steps through

use crate::error::{Result, ViewerError};
use log::debug;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Sorted entries of the directory holding the startup image
#[derive(Debug, Clone)]
pub struct FileList {
    dir: PathBuf,
    entries: Vec<OsString>,
}

impl FileList {
    /// List `dir` one level deep and sort the entry names ordinally
    pub fn read(dir: &Path) -> Result<Self> {
        let read_dir = fs::read_dir(dir).map_err(|source| ViewerError::Listing {
            dir: dir.to_path_buf(),
            source,
        })?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|source| ViewerError::Listing {
                dir: dir.to_path_buf(),
                source,
            })?;
            entries.push(entry.file_name());
        }
        entries.sort();

        debug!("Listed {} entries in {}", entries.len(), dir.display());

        Ok(Self {
            dir: dir.to_path_buf(),
            entries,
        })
    }

    /// List the directory holding `path` and locate the file in it.
    /// Returns the list and the index of the file.
    pub fn for_image(path: &Path) -> Result<(Self, usize)> {
        let (dir, name) = split_path(path)?;
        let list = Self::read(&dir)?;
        let index = list
            .position(&name)
            .ok_or_else(|| ViewerError::FileNotListed {
                name: name.to_string_lossy().into_owned(),
                dir: dir.clone(),
            })?;
        Ok((list, index))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Entry name at `index`
    pub fn name(&self, index: usize) -> Option<&OsString> {
        self.entries.get(index)
    }

    /// Full path of the entry at `index`
    pub fn path(&self, index: usize) -> Option<PathBuf> {
        self.name(index).map(|name| self.dir.join(name))
    }

    fn position(&self, name: &OsString) -> Option<usize> {
        self.entries.binary_search(name).ok()
    }
}

/// Split a path into (directory, file name); an empty directory is the
/// current working directory.
fn split_path(path: &Path) -> Result<(PathBuf, OsString)> {
    let not_listed = || ViewerError::FileNotListed {
        name: path.display().to_string(),
        dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
    };

    let name = path.file_name().ok_or_else(not_listed)?.to_os_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().map_err(|source| ViewerError::Listing {
            dir: PathBuf::from("."),
            source,
        })?,
    };
    Ok((dir, name))
}

/// Step `index` by one in either direction, wrapping around `len`
pub fn wrap_step(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else if index == 0 {
        len - 1
    } else {
        index - 1
    }
}
