use crate::error::PatchError;
use crate::localization::config::Lang;
use crate::store::FileStore;
use clap::Parser;
use std::path::{Path, PathBuf};

pub const PATCH_DIR_NAME: &str = "ChilloutVR_Data";
pub const BASE_PATH_FILE_NAME: &str = "cvrBasePath.txt";
pub const CVRTEST_TRANSLATIONS: &str = "cvrtest-translations.yaml";
pub const GAMEUI_TRANSLATIONS: &str = "gameui-translations.yaml";

pub const HTML_DIRS: [&str; 2] = [
    "StreamingAssets/Cohtml/UIResources/CVRTest",
    "StreamingAssets/Cohtml/UIResources/GameUI",
];
pub const CVRTEST_INDEX: &str = "StreamingAssets/Cohtml/UIResources/CVRTest/index.html";
pub const ENGLISH_TRANSLATION_JS: &str =
    "StreamingAssets/Cohtml/UIResources/GameUI/translations/english.translation.js";

pub const DEFAULT_WAIT_SECS: u64 = 60;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Patch asset tree. Defaults to ./ChilloutVR_Data, then ../ChilloutVR_Data
    #[arg(long, value_name = "DIR")]
    pub patch_dir: Option<PathBuf>,
    /// File holding the game install path. Defaults to ./cvrBasePath.txt, then ../cvrBasePath.txt
    #[arg(long, value_name = "FILE", conflicts_with = "install_dir")]
    pub base_path_file: Option<PathBuf>,
    /// Game install directory, instead of reading it from the path file
    #[arg(long, value_name = "DIR")]
    pub install_dir: Option<PathBuf>,
    /// Seconds to keep the window open before exiting
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_WAIT_SECS)]
    pub wait_secs: u64,
    #[arg(long, value_enum)]
    pub lang: Option<Lang>,
}

/// Every path the patch run touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchConfig {
    pub patch_root: PathBuf,
    pub install_root: PathBuf,
    pub html_dirs: Vec<PathBuf>,
    pub cvrtest_index: PathBuf,
    pub translation_js: PathBuf,
    pub cvrtest_translations: PathBuf,
    pub gameui_translations: PathBuf,
}

impl PatchConfig {
    pub fn new(patch_root: impl Into<PathBuf>, install_root: impl Into<PathBuf>) -> Self {
        let patch_root = patch_root.into();
        let install_root = install_root.into();
        let translations_dir = patch_root.join("..");
        Self {
            html_dirs: HTML_DIRS.iter().map(|dir| install_root.join(dir)).collect(),
            cvrtest_index: install_root.join(CVRTEST_INDEX),
            translation_js: install_root.join(ENGLISH_TRANSLATION_JS),
            cvrtest_translations: translations_dir.join(CVRTEST_TRANSLATIONS),
            gameui_translations: translations_dir.join(GAMEUI_TRANSLATIONS),
            patch_root,
            install_root,
        }
    }

    /// Resolves the roots from the command line, falling back to the files next
    /// to (or one level above) the working directory.
    pub fn resolve(store: &impl FileStore, cli: &Cli) -> Result<Self, PatchError> {
        let patch_root = match &cli.patch_dir {
            Some(dir) => dir.clone(),
            None => find_patch_root(store),
        };
        let install_root = match (&cli.install_dir, &cli.base_path_file) {
            (Some(dir), _) => normalize_install_root(&dir.to_string_lossy()),
            (None, Some(file)) => read_install_root(store, file)?,
            (None, None) => read_install_root(store, &find_base_path_file(store))?,
        };
        Ok(Self::new(patch_root, install_root))
    }

    pub fn check_install_root(&self, store: &impl FileStore) -> Result<(), PatchError> {
        if store.exists(&self.install_root) {
            Ok(())
        } else {
            Err(PatchError::InstallRootMissing(self.install_root.clone()))
        }
    }
}

fn first_existing(store: &impl FileStore, name: &str) -> PathBuf {
    let here = Path::new(".").join(name);
    if store.exists(&here) {
        here
    } else {
        Path::new("..").join(name)
    }
}

pub fn find_patch_root(store: &impl FileStore) -> PathBuf {
    first_existing(store, PATCH_DIR_NAME)
}

pub fn find_base_path_file(store: &impl FileStore) -> PathBuf {
    first_existing(store, BASE_PATH_FILE_NAME)
}

pub fn read_install_root(store: &impl FileStore, file: &Path) -> Result<PathBuf, PatchError> {
    let raw = store.read_to_string(file).map_err(PatchError::io(file))?;
    Ok(normalize_install_root(&raw))
}

/// Trims surrounding whitespace and drops trailing separators.
pub fn normalize_install_root(raw: &str) -> PathBuf {
    Path::new(raw.trim()).components().collect()
}
