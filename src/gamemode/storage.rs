//! Where descriptor files live on disk.

use jwalk::WalkDir;
use std::io;
use std::path::{Path, PathBuf};

use super::ConfigKind;
use crate::debug;

const CONFIG_EXTENSION: &str = "txt";

/// Game directory holding one subdirectory per [`ConfigKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Storage {
    game_dir: PathBuf,
}

impl Storage {
    pub fn new(game_dir: impl Into<PathBuf>) -> Self {
        Self {
            game_dir: game_dir.into(),
        }
    }

    /// Storage rooted at the directory of the running executable.
    pub fn from_executable() -> io::Result<Self> {
        let exe = std::env::current_exe()?;
        let dir = exe
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "executable has no parent directory"))?;
        Ok(Self::new(dir))
    }

    #[inline]
    pub fn game_dir(&self) -> &Path {
        &self.game_dir
    }

    #[inline]
    pub fn kind_dir(&self, kind: ConfigKind) -> PathBuf {
        self.game_dir.join(kind.dir_name())
    }

    /// Create the kind's directory if it is not there yet.
    pub fn ensure_kind_dir(&self, kind: ConfigKind) -> io::Result<PathBuf> {
        let dir = self.kind_dir(kind);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// `{game_dir}/{kind_dir}/{name}.txt`
    pub fn config_path(&self, kind: ConfigKind, name: &str) -> PathBuf {
        self.kind_dir(kind).join(format!("{name}.{CONFIG_EXTENSION}"))
    }

    /// Logical names of every descriptor of `kind`, recursively.
    ///
    /// Names are relative to the kind directory, use `/` separators and
    /// have the `.txt` extension stripped. A missing kind directory is
    /// created and yields an empty list.
    pub fn list_config_files(&self, kind: ConfigKind) -> Vec<String> {
        let root = match self.ensure_kind_dir(kind) {
            Ok(root) => root,
            Err(err) => {
                debug!("list"; "cannot create {}: {}", self.kind_dir(kind).display(), err);
                return Vec::new();
            }
        };

        let mut names: Vec<String> = WalkDir::new(&root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == CONFIG_EXTENSION))
            .filter_map(|path| logical_name(&root, &path))
            .collect();
        names.sort();
        names
    }
}

/// `root/a/b.txt` -> `a/b`
fn logical_name(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?.with_extension("");
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    (!parts.is_empty()).then(|| parts.join("/"))
}
