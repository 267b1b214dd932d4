use lol_html::errors::RewritingError;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum PatchError {
    InstallRootMissing(PathBuf),
    OutsideRoot { path: PathBuf, root: PathBuf },
    Io { path: PathBuf, source: io::Error },
    Yaml { path: PathBuf, source: serde_yaml::Error },
    Html { path: PathBuf, source: RewritingError },
    Json(serde_json::Error),
}

impl PatchError {
    /// Wraps an I/O error with the path it happened on, for use with `map_err`.
    pub fn io(path: &Path) -> impl FnOnce(io::Error) -> PatchError {
        move |source| PatchError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for PatchError {
    fn from(e: serde_json::Error) -> Self {
        PatchError::Json(e)
    }
}

impl std::fmt::Display for PatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::InstallRootMissing(path) => {
                write!(f, "install directory not found: {}", path.display())
            }
            Self::OutsideRoot { path, root } => write!(
                f,
                "{} is not inside {}",
                path.display(),
                root.display()
            ),
            Self::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Self::Yaml { path, source } => write!(f, "{}: {}", path.display(), source),
            Self::Html { path, source } => write!(f, "{}: {}", path.display(), source),
            Self::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for PatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Yaml { source, .. } => Some(source),
            Self::Html { source, .. } => Some(source),
            Self::Json(e) => Some(e),
            Self::InstallRootMissing(_) | Self::OutsideRoot { .. } => None,
        }
    }
}
