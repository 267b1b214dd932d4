use crate::config::PatchConfig;
use crate::copier;
use crate::error::PatchError;
use crate::html::{self, HtmlSummary};
use crate::js::{self, JsOutcome};
use crate::store::FileStore;
use crate::translations::TranslationTable;
use std::path::PathBuf;

#[derive(Debug)]
pub struct PatchReport {
    pub copied: usize,
    pub patched_html: usize,
    pub already_patched: Vec<PathBuf>,
    pub js: JsOutcome,
}

impl PatchReport {
    pub fn has_already_patched(&self) -> bool {
        !self.already_patched.is_empty()
    }
}

/// Runs the whole patch: asset copy, HTML patch, translation script patch.
/// Any error aborts the run where it happened; earlier stages are not undone.
pub fn run(store: &impl FileStore, config: &PatchConfig) -> Result<PatchReport, PatchError> {
    config.check_install_root(store)?;

    let cvrtest = TranslationTable::load(store, &config.cvrtest_translations)?;
    debug!(
        "{} entries from {}",
        cvrtest.len(),
        config.cvrtest_translations.display()
    );

    let copied = copier::copy_assets(store, &config.patch_root, &config.install_root)?;

    let mut summary = HtmlSummary::default();
    for dir in &config.html_dirs {
        html::patch_directory(store, dir, &config.cvrtest_index, &cvrtest, &mut summary)?;
    }

    let gameui = TranslationTable::load(store, &config.gameui_translations)?;
    let js = js::patch_translation_file(store, &config.translation_js, &gameui)?;

    Ok(PatchReport {
        copied,
        patched_html: summary.patched,
        already_patched: summary.already_patched,
        js,
    })
}
