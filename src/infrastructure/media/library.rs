/// Playable media files served to the display page
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// URL prefix the media folder is mounted under
pub const MEDIA_URL_PREFIX: &str = "/static/media";

/// File extensions the display page can play
pub const PLAYABLE_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "mov"];

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Media folder not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read media folder {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Cached list of media URLs, built from one folder scan
#[derive(Debug, Clone, Default)]
pub struct MediaLibrary {
    folder: PathBuf,
    files: Vec<String>,
}

impl MediaLibrary {
    /// Scan `folder` (not recursively) for playable files
    pub fn scan(folder: impl AsRef<Path>) -> Result<Self, MediaError> {
        let folder = folder.as_ref().to_path_buf();

        if !folder.is_dir() {
            return Err(MediaError::NotFound(folder));
        }

        let io_err = |source| MediaError::Io {
            path: folder.clone(),
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&folder).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let path = entry.path();

            if !path.is_file() || !is_playable(&path) {
                continue;
            }

            if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                files.push(format!("{}/{}", MEDIA_URL_PREFIX, name));
            }
        }
        files.sort();

        Ok(Self { folder, files })
    }

    /// Scan `folder`, falling back to an empty library if it is unusable
    pub fn load_or_empty(folder: impl AsRef<Path>) -> Self {
        let folder = folder.as_ref();
        match Self::scan(folder) {
            Ok(library) => {
                info!(
                    "Loaded {} media files from {}",
                    library.count(),
                    folder.display()
                );
                library
            }
            Err(e) => {
                warn!("{}; serving an empty media list", e);
                Self {
                    folder: folder.to_path_buf(),
                    files: Vec::new(),
                }
            }
        }
    }

    /// Public URLs, sorted by file name
    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn count(&self) -> usize {
        self.files.len()
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }
}

fn is_playable(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            PLAYABLE_EXTENSIONS
                .iter()
                .any(|playable| ext.eq_ignore_ascii_case(playable))
        })
        .unwrap_or(false)
}
