use crate::error::PatchError;
use crate::html::is_html;
use crate::store::FileStore;
use std::path::Path;

/// Mirrors every non-HTML file under `patch_root` into `install_root`,
/// overwriting existing files. Returns the number of files copied.
pub fn copy_assets(
    store: &impl FileStore,
    patch_root: &Path,
    install_root: &Path,
) -> Result<usize, PatchError> {
    let files = store
        .files_under(patch_root)
        .map_err(PatchError::io(patch_root))?;

    let mut copied = 0;
    for src in files.iter().filter(|path| !is_html(path)) {
        let relative = src
            .strip_prefix(patch_root)
            .map_err(|_| PatchError::OutsideRoot {
                path: src.clone(),
                root: patch_root.to_path_buf(),
            })?;
        let dst = install_root.join(relative);

        info!(
            "{}",
            t!(copy_file, src = src.display(), dst = dst.display())
        );
        if let Some(parent) = dst.parent() {
            store
                .create_dir_all(parent)
                .map_err(PatchError::io(parent))?;
        }
        store.copy(src, &dst).map_err(PatchError::io(&dst))?;
        copied += 1;
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn mirrors_non_html_files() {
        let store = MemoryStore::new()
            .with_file("patch/ui-font.css", "@font-face {}")
            .with_file("patch/StreamingAssets/fonts/NotoSansJP.ttf", [0u8, 1, 2, 255])
            .with_file("patch/StreamingAssets/index.html", "<html></html>")
            .with_file("game/ui-font.css", "old")
            .with_dir("game");

        let copied = copy_assets(&store, Path::new("patch"), Path::new("game")).expect("copy");

        assert_eq!(copied, 2);
        assert_eq!(store.text("game/ui-font.css").as_deref(), Some("@font-face {}"));
        assert_eq!(
            store.contents("game/StreamingAssets/fonts/NotoSansJP.ttf"),
            Some(vec![0u8, 1, 2, 255])
        );
        assert_eq!(store.contents("game/StreamingAssets/index.html"), None);
    }

    #[test]
    fn missing_patch_root_is_an_error() {
        let store = MemoryStore::new().with_dir("game");
        let err = copy_assets(&store, Path::new("patch"), Path::new("game")).expect_err("missing root");
        assert!(matches!(err, PatchError::Io { .. }));
    }
}
