use std::path::{Path, PathBuf};

/// Sound attached to an object state. Playback is not wired to any backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioSource {
    file_name: PathBuf,
}

impl AudioSource {
    pub fn new(file_name: impl Into<PathBuf>) -> Self {
        Self { file_name: file_name.into() }
    }

    pub fn file_name(&self) -> &Path {
        &self.file_name
    }

    pub fn play(&self) {
        log::debug!("no audio backend, not playing {}", self.file_name.display());
    }
}
