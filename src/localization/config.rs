use clap::ValueEnum;
use once_cell::sync::{Lazy, OnceCell};
use serde::Deserialize;

static LANG_PACK: Lazy<LangPack> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../lang.json")).expect("Failed to parse lang.json")
});

static LANG: OnceCell<Lang> = OnceCell::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Lang {
    Ja,
    En,
}

#[derive(Debug, Deserialize)]
pub struct LangPack {
    pub install_not_found: LangItem,
    pub patch_source: LangItem,
    pub install_target: LangItem,
    pub copy_file: LangItem,
    pub patch_html: LangItem,
    pub already_patched_skip: LangItem,
    pub patch_js: LangItem,
    pub js_pattern_mismatch: LangItem,
    pub summary: LangItem,
    pub done_banner: LangItem,
    pub already_patched_warning: LangItem,
    pub js_failed_warning: LangItem,
    pub closing_in: LangItem,
    pub error_occurred: LangItem,
    pub error_prompt: LangItem,
}

#[derive(Debug, Deserialize)]
pub struct LangItem {
    pub ja: String,
    pub en: String,
}

impl LangItem {
    pub fn get_translation(&self, lang: Lang) -> &str {
        match lang {
            Lang::Ja => &self.ja,
            Lang::En => &self.en,
        }
    }
}

/// Pins the message language. Only the first call has an effect.
pub fn set_lang(lang: Lang) {
    let _ = LANG.set(lang);
}

pub fn get_lang() -> Lang {
    *LANG.get_or_init(|| {
        let locale = sys_locale::get_locale().unwrap_or_else(|| "en-US".into());
        lang_from_locale(&locale)
    })
}

fn lang_from_locale(locale: &str) -> Lang {
    match locale.split(['-', '_']).next() {
        Some(code) if code.eq_ignore_ascii_case("ja") => Lang::Ja,
        _ => Lang::En,
    }
}

pub fn get_pack() -> &'static LangPack {
    &LANG_PACK
}

/// Fills `{name}` placeholders from `values`. Unknown names are left as written.
pub fn render(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
