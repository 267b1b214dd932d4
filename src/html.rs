use crate::error::PatchError;
use crate::store::FileStore;
use crate::translations::TranslationTable;
use lol_html::errors::RewritingError;
use lol_html::html_content::ContentType;
use lol_html::{RewriteStrSettings, doc_text, element, rewrite_str};
use std::path::{Path, PathBuf};

/// Written at the end of `<html>`; its presence means the file has been patched.
pub const PATCH_MARKER: &str = "<!-- cvr-jp:data-v1 -->";

pub const FONT_LINK: &str = r#"<link rel="stylesheet" href="ui-font.css">"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlOutcome {
    Patched,
    AlreadyPatched,
}

pub fn is_patched(content: &str) -> bool {
    content.contains(PATCH_MARKER)
}

fn append_html(html: &str, selector: &str, content: &str) -> Result<String, RewritingError> {
    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!(selector, |el| {
                el.append(content, ContentType::Html);
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    )
}

pub fn inject_font_link(html: &str) -> Result<String, RewritingError> {
    append_html(html, "head", FONT_LINK)
}

pub fn append_marker(html: &str) -> Result<String, RewritingError> {
    append_html(html, "html", PATCH_MARKER)
}

/// Replaces every text node whose exact or trimmed text has a translation.
/// The parser may split a node into several chunks; they are buffered so the
/// lookup always sees the whole node, and untranslated nodes are re-emitted raw.
///
/// Text outside any element (whitespace around `<html>`) is seen too and, like
/// any other node, only changes when its exact or trimmed text is a key.
pub fn translate_text_nodes(
    html: &str,
    translations: &TranslationTable,
) -> Result<String, RewritingError> {
    let mut pending = String::new();
    rewrite_str(
        html,
        RewriteStrSettings {
            document_content_handlers: vec![doc_text!(|chunk| {
                pending.push_str(chunk.as_str());
                if !chunk.last_in_text_node() {
                    chunk.remove();
                    return Ok(());
                }

                let node = std::mem::take(&mut pending);
                if let Some(translated) = translations.lookup_text(&node) {
                    chunk.replace(translated, ContentType::Text);
                } else if node.len() != chunk.as_str().len() {
                    chunk.replace(&node, ContentType::Html);
                }
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    )
}

/// Font link, then translations (when given), then the marker. The result
/// always carries the marker, even when the source omits `</html>`.
pub fn patch_document(
    html: &str,
    translations: Option<&TranslationTable>,
) -> Result<String, RewritingError> {
    let mut result = inject_font_link(html)?;
    if let Some(translations) = translations {
        result = translate_text_nodes(&result, translations)?;
    }
    let mut result = append_marker(&result)?;
    if !is_patched(&result) {
        result.push_str(PATCH_MARKER);
    }
    Ok(result)
}

pub fn patch_file(
    store: &impl FileStore,
    path: &Path,
    translations: Option<&TranslationTable>,
) -> Result<HtmlOutcome, PatchError> {
    info!("{}", t!(patch_html, file_path = path.display()));
    let content = store.read_to_string(path).map_err(PatchError::io(path))?;

    if is_patched(&content) {
        warn!("{}", t!(already_patched_skip));
        return Ok(HtmlOutcome::AlreadyPatched);
    }

    let patched = patch_document(&content, translations).map_err(|source| PatchError::Html {
        path: path.to_path_buf(),
        source,
    })?;
    store
        .write(path, patched.as_bytes())
        .map_err(PatchError::io(path))?;
    Ok(HtmlOutcome::Patched)
}

#[derive(Debug, Default)]
pub struct HtmlSummary {
    pub patched: usize,
    pub already_patched: Vec<PathBuf>,
}

/// Patches every `.html` file below `dir`. Only `translated_file` gets the
/// translation pass. Already-patched files are recorded and do not stop the walk.
pub fn patch_directory(
    store: &impl FileStore,
    dir: &Path,
    translated_file: &Path,
    translations: &TranslationTable,
    summary: &mut HtmlSummary,
) -> Result<(), PatchError> {
    let files = store.files_under(dir).map_err(PatchError::io(dir))?;
    for path in files.iter().filter(|path| is_html(path)) {
        let pass = (path.as_path() == translated_file).then_some(translations);
        match patch_file(store, path, pass)? {
            HtmlOutcome::Patched => summary.patched += 1,
            HtmlOutcome::AlreadyPatched => summary.already_patched.push(path.clone()),
        }
    }
    Ok(())
}

pub fn is_html(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(".html"))
}
