use crate::areas::database::Database;
use crate::areas::state::StateFile;
use crate::errors::TwigError;
use std::path::{Path, PathBuf};

pub const OBJECTS_DIR: &str = "objects";
pub const STATE_FILE: &str = "state.json";

/// Another repository on the local file system, addressed by its `.twig` dir
#[derive(Debug)]
pub struct RemoteRepository {
    path: Box<Path>,
    database: Database,
    state_file: StateFile,
}

impl RemoteRepository {
    /// Open the repository whose metadata directory is `location`
    ///
    /// Relative locations are resolved against `base`, the working
    /// directory of the local repository.
    pub fn open(base: &Path, location: &str) -> anyhow::Result<Self> {
        let path = Self::resolve(base, location);

        if !path.is_dir() || !path.join(STATE_FILE).is_file() {
            return Err(TwigError::RemoteDirectoryNotFound.into());
        }

        Ok(RemoteRepository {
            database: Database::new(path.join(OBJECTS_DIR).into_boxed_path()),
            state_file: StateFile::new(path.join(STATE_FILE).into_boxed_path()),
            path: path.into_boxed_path(),
        })
    }

    /// Normalise a user supplied location to the platform separator
    pub fn normalize_location(location: &str) -> String {
        location.replace('/', std::path::MAIN_SEPARATOR_STR)
    }

    fn resolve(base: &Path, location: &str) -> PathBuf {
        let location = PathBuf::from(Self::normalize_location(location));

        if location.is_absolute() {
            location
        } else {
            base.join(location)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn state_file(&self) -> &StateFile {
        &self.state_file
    }
}
