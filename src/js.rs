use crate::error::PatchError;
use crate::store::FileStore;
use crate::translations::TranslationTable;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Identifier the injected object is bound to.
pub const INJECTED_IDENT: &str = "ja";

// A previous injection (one line) may precede the call; it gets replaced.
static REGISTRATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:const ja = \{[^\n]*\};)?(cvr\.registerNewLanguage)").unwrap()
});
static CLOSING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\}\);").unwrap());
static MERGED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\.\.\.ja\}\);").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsPatchError {
    RegistrationNotFound,
    ClosingNotFound,
}

impl std::fmt::Display for JsPatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::RegistrationNotFound => {
                write!(f, "file does not start with cvr.registerNewLanguage")
            }
            Self::ClosingNotFound => write!(f, "no line starting with `}});` found"),
        }
    }
}

impl std::error::Error for JsPatchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsOutcome {
    Patched,
    PatternMismatch(JsPatchError),
}

/// Binds `object_literal` to `ja` in front of the registration call and spreads
/// it into the call's argument. Safe to run again on its own output.
pub fn inject_translations(source: &str, object_literal: &str) -> Result<String, JsPatchError> {
    let call = REGISTRATION_RE
        .captures(source)
        .and_then(|caps| caps.get(1))
        .ok_or(JsPatchError::RegistrationNotFound)?;

    let mut patched = format!(
        "const {} = {};{}",
        INJECTED_IDENT,
        object_literal,
        &source[call.start()..]
    );

    if MERGED_RE.is_match(&patched) {
        return Ok(patched);
    }

    let closing = CLOSING_RE
        .find(&patched)
        .map(|m| m.range())
        .ok_or(JsPatchError::ClosingNotFound)?;
    patched.replace_range(closing, &format!("...{}}});", INJECTED_IDENT));
    Ok(patched)
}

/// Rewrites the translation script in place. A layout mismatch leaves the file untouched.
pub fn patch_translation_file(
    store: &impl FileStore,
    path: &Path,
    translations: &TranslationTable,
) -> Result<JsOutcome, PatchError> {
    info!("{}", t!(patch_js, file_path = path.display()));
    let source = store.read_to_string(path).map_err(PatchError::io(path))?;
    let object_literal = translations.to_json()?;

    match inject_translations(&source, &object_literal) {
        Ok(patched) => {
            store
                .write(path, patched.as_bytes())
                .map_err(PatchError::io(path))?;
            debug!("{} entries injected", translations.len());
            Ok(JsOutcome::Patched)
        }
        Err(e) => {
            warn!(
                "{}",
                t!(js_pattern_mismatch, file_path = path.display(), reason = e)
            );
            Ok(JsOutcome::PatternMismatch(e))
        }
    }
}
