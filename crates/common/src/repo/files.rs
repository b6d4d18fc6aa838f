use std::fmt;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::key::Key;

/// A logical file in a repository
///
/// Every piece of repository state lives under exactly one of these kinds;
/// its location is looked up with [`filepath`] (filesystem) or [`file_key`]
/// (datastore), never built by hand.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum File {
    /// Invalid default, never a storage target
    #[default]
    Unknown,
    /// On-disk mutex lock
    Lockfile,
    /// Information about this repository (version number, size, ...)
    Info,
    /// Configuration specific to this repo, including the peer profile
    Config,
    /// List of datasets
    Datasets,
    /// Log of all events in the order they happened
    EventLogs,
    /// The local dataset reference namespace
    Refstore,
    /// Known peer repositories
    Peers,
    Analytics,
    SearchIndex,
    /// Current selection of references
    SelectedRefs,
    ChangeRequests,
}

impl File {
    /// Every file kind, `Unknown` included
    pub const ALL: [File; 12] = [
        File::Unknown,
        File::Lockfile,
        File::Info,
        File::Config,
        File::Datasets,
        File::EventLogs,
        File::Refstore,
        File::Peers,
        File::Analytics,
        File::SearchIndex,
        File::SelectedRefs,
        File::ChangeRequests,
    ];

    /// Path relative to the repository root
    pub const fn path(self) -> &'static str {
        match self {
            File::Unknown => "",
            File::Lockfile => "/repo.lock",
            File::Info => "/info.json",
            File::Config => "/config.json",
            File::Datasets => "/datasets.json",
            File::EventLogs => "/events.json",
            File::Refstore => "/ds_refs.json",
            File::Peers => "/peers.json",
            File::Analytics => "/analytics.json",
            File::SearchIndex => "/index.bleve",
            File::SelectedRefs => "/selected_refs.json",
            File::ChangeRequests => "/change_requests.json",
        }
    }

    pub fn is_unknown(self) -> bool {
        self == File::Unknown
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            File::Unknown => write!(f, "unknown"),
            file => write!(f, "{}", file.path().trim_start_matches('/')),
        }
    }
}

/// Relative filepath of a repo file, empty for [`File::Unknown`]
pub fn filepath(file: File) -> &'static str {
    file.path()
}

/// Datastore key of a repo file, derived only from its [`filepath`]
pub fn file_key(file: File) -> Key {
    Key::new(filepath(file))
}

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("unknown repo file has no storage location")]
    UnknownFile,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to serialize {file}: {source}")]
    Serialize {
        file: File,
        source: serde_json::Error,
    },
    #[error("failed to parse {file}: {source}")]
    Deserialize {
        file: File,
        source: serde_json::Error,
    },
}

/// Root directory of a repository, resolving [`File`]s to real paths
///
/// Writes are plain overwrites: not atomic and not locked. Callers that
/// can race on the same file must serialize access themselves, e.g. by
/// holding [`File::Lockfile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePath(PathBuf);

impl BasePath {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self(root.into())
    }

    /// Absolute location of `file` under this root
    pub fn filepath(&self, file: File) -> Result<PathBuf, FileError> {
        if file.is_unknown() {
            return Err(FileError::UnknownFile);
        }
        Ok(self.0.join(file.path().trim_start_matches('/')))
    }

    pub fn exists(&self, file: File) -> bool {
        self.filepath(file).is_ok_and(|path| path.exists())
    }

    /// Raw contents of `file`
    pub fn read_bytes(&self, file: File) -> Result<Vec<u8>, FileError> {
        let path = self.filepath(file)?;
        Ok(std::fs::read(path)?)
    }

    /// Read `file` and parse it as JSON
    pub fn read_file<T: DeserializeOwned>(&self, file: File) -> Result<T, FileError> {
        let data = self.read_bytes(file)?;
        serde_json::from_slice(&data).map_err(|source| FileError::Deserialize { file, source })
    }

    /// Serialize `value` as JSON and overwrite `file` with it.
    ///
    /// The file is created with default permissions (subject to the
    /// process umask).
    pub fn save_file<T: Serialize + ?Sized>(&self, value: &T, file: File) -> Result<(), FileError> {
        let path = self.filepath(file)?;
        let data = serde_json::to_vec(value).map_err(|source| {
            tracing::debug!(%file, error = %source, "failed to serialize repo file");
            FileError::Serialize { file, source }
        })?;
        std::fs::write(path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_filepaths() {
        assert_eq!(filepath(File::Config), "/config.json");
        assert_eq!(filepath(File::Unknown), "");
        assert_eq!(filepath(File::Lockfile), "/repo.lock");
        assert_eq!(filepath(File::SearchIndex), "/index.bleve");
        assert_eq!(File::default(), File::Unknown);
    }

    #[test]
    fn test_paths_are_unique() {
        let paths: HashSet<_> = File::ALL.iter().map(|f| f.path()).collect();
        assert_eq!(paths.len(), File::ALL.len());
        for file in File::ALL.iter().filter(|f| !f.is_unknown()) {
            assert!(file.path().starts_with('/'));
        }
    }

    #[test]
    fn test_file_keys_follow_paths() {
        for file in File::ALL {
            assert_eq!(file_key(file), Key::new(filepath(file)));
        }
        assert_eq!(file_key(File::Config).as_str(), "/config.json");
        assert_eq!(file_key(File::Unknown).as_str(), "/");
    }

    #[test]
    fn test_display() {
        assert_eq!(File::Refstore.to_string(), "ds_refs.json");
        assert_eq!(File::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_filepath_is_joined_under_root() {
        let base = BasePath::new("/tmp/repo");
        assert_eq!(
            base.filepath(File::Config).unwrap(),
            PathBuf::from("/tmp/repo/config.json")
        );
        assert!(matches!(
            base.filepath(File::Unknown),
            Err(FileError::UnknownFile)
        ));
    }
}
