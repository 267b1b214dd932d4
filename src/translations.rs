use crate::error::PatchError;
use crate::store::FileStore;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_yaml::Value;
use std::collections::HashMap;
use std::path::Path;

/// Source text to translated text, in document order.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl TranslationTable {
    pub fn load(store: &impl FileStore, path: &Path) -> Result<Self, PatchError> {
        let text = store.read_to_string(path).map_err(PatchError::io(path))?;
        Self::from_yaml(&text).map_err(|source| PatchError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses a flat YAML mapping. Null values are dropped; scalar keys and
    /// values are taken in their string form.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        let Some(mapping) = serde_yaml::from_str::<Option<serde_yaml::Mapping>>(text)? else {
            return Ok(Self::default());
        };

        let mut table = Self::default();
        for (key, value) in mapping {
            let Some(key) = scalar_string(&key) else {
                return Err(serde::de::Error::custom(format!(
                    "translation keys must be scalars, found {:?}",
                    key
                )));
            };
            if value.is_null() {
                continue;
            }
            let Some(value) = scalar_string(&value) else {
                return Err(serde::de::Error::custom(format!(
                    "translation for {:?} must be a scalar",
                    key
                )));
            };
            table.insert(key, value);
        }
        Ok(table)
    }

    pub fn insert(&mut self, key: String, value: String) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&i| self.entries[i].1.as_str())
    }

    /// Looks up a text node: exact text first, then trimmed. Empty translations never match.
    pub fn lookup_text(&self, text: &str) -> Option<&str> {
        self.get(text)
            .filter(|t| !t.is_empty())
            .or_else(|| self.get(text.trim()).filter(|t| !t.is_empty()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compact JSON object literal with keys in document order.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TranslationTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::default();
        for (key, value) in iter {
            table.insert(key.into(), value.into());
        }
        table
    }
}

impl Serialize for TranslationTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_document_order_in_json() {
        let table = TranslationTable::from_yaml(
            "Settings: 設定\nAvatars: アバター\n\"Say \\\"hi\\\"\": こんにちは\n",
        )
        .expect("parse");
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.to_json().expect("json"),
            r#"{"Settings":"設定","Avatars":"アバター","Say \"hi\"":"こんにちは"}"#
        );
    }

    #[test]
    fn empty_document_is_empty_table() {
        let table = TranslationTable::from_yaml("").expect("parse");
        assert!(table.is_empty());
        assert_eq!(table.to_json().expect("json"), "{}");
    }

    #[test]
    fn null_values_are_dropped_and_scalars_stringified() {
        let table = TranslationTable::from_yaml("Missing:\n1: one\nFlag: true\n").expect("parse");
        assert_eq!(table.get("Missing"), None);
        assert_eq!(table.get("1"), Some("one"));
        assert_eq!(table.get("Flag"), Some("true"));
    }

    #[test]
    fn rejects_nested_values() {
        let err = TranslationTable::from_yaml("Menu:\n  - a\n  - b\n").expect_err("nested value");
        assert!(err.to_string().contains("Menu"));
    }

    #[test]
    fn lookup_prefers_exact_then_trimmed() {
        let table: TranslationTable = [("  Start ", "スタート(完全一致)"), ("Start", "スタート")]
            .into_iter()
            .collect();
        assert_eq!(table.lookup_text("  Start "), Some("スタート(完全一致)"));
        assert_eq!(table.lookup_text("\n Start\n"), Some("スタート"));
        assert_eq!(table.lookup_text("Stop"), None);
    }

    #[test]
    fn empty_translation_falls_through_to_trimmed() {
        let table: TranslationTable = [(" Quit", ""), ("Quit", "終了")].into_iter().collect();
        assert_eq!(table.lookup_text(" Quit"), Some("終了"));

        let table: TranslationTable = [("Quit", "")].into_iter().collect();
        assert_eq!(table.lookup_text("Quit"), None);
    }
}
