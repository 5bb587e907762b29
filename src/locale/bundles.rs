//! Translation message bundles.
//!
//! Bundles are loaded once at startup from `<dir>/<code>.json`, one per
//! supported locale. A supported locale without a bundle is a configuration
//! error, so lookups by a resolved [`LocaleCode`] always find one.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::locale::code::{LocaleCode, LocaleSet};

/// Errors loading message bundles.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("no message bundle for locale '{locale}' at {}", .path.display())]
    Missing { locale: String, path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("bundle {} must be a JSON object", .path.display())]
    NotAnObject { path: PathBuf },
}

/// Message bundles keyed by locale.
#[derive(Debug, Clone, Default)]
pub struct MessageBundles {
    bundles: HashMap<LocaleCode, Arc<Value>>,
}

impl MessageBundles {
    /// Load a bundle for every locale in `locales`.
    pub fn load(dir: &Path, locales: &LocaleSet) -> Result<Self, BundleError> {
        let mut bundles = HashMap::with_capacity(locales.len());

        for code in locales.iter() {
            let path = dir.join(format!("{code}.json"));
            let content = match fs::read_to_string(&path) {
                Ok(c) => c,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(BundleError::Missing {
                        locale: code.to_string(),
                        path,
                    });
                }
                Err(source) => return Err(BundleError::Io { path, source }),
            };

            let value: Value = serde_json::from_str(&content)
                .map_err(|source| BundleError::Parse { path: path.clone(), source })?;
            if !value.is_object() {
                return Err(BundleError::NotAnObject { path });
            }

            tracing::debug!(locale = %code, path = %path.display(), "Loaded message bundle");
            bundles.insert(code.clone(), Arc::new(value));
        }

        Ok(Self { bundles })
    }

    /// The full bundle for a locale.
    pub fn bundle(&self, locale: &LocaleCode) -> Option<Arc<Value>> {
        self.bundles.get(locale).cloned()
    }

    /// Look up a dotted key such as `landing.hero.title`.
    pub fn message(&self, locale: &LocaleCode, key: &str) -> Option<&str> {
        let root = self.bundles.get(locale)?;
        lookup(root, key)
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

/// Walk a dotted key path through nested objects to a string leaf.
pub fn lookup<'v>(root: &'v Value, key: &str) -> Option<&'v str> {
    key.split('.')
        .try_fold(root, |node, part| node.get(part))?
        .as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locales() -> LocaleSet {
        LocaleSet::new(&["en".into(), "es".into()], "en").unwrap()
    }

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_load_and_lookup() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en.json", r#"{"languageSwitcher": {"es": "Spanish"}}"#);
        write(dir.path(), "es.json", r#"{"languageSwitcher": {"es": "Español"}}"#);

        let set = locales();
        let bundles = MessageBundles::load(dir.path(), &set).unwrap();
        assert_eq!(bundles.len(), 2);

        let es = set.parse("es").unwrap();
        assert_eq!(bundles.message(&es, "languageSwitcher.es"), Some("Español"));
        assert_eq!(bundles.message(&es, "languageSwitcher"), None);
        assert_eq!(bundles.message(&es, "missing.key"), None);
    }

    #[test]
    fn test_missing_bundle_is_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en.json", "{}");

        let err = MessageBundles::load(dir.path(), &locales()).unwrap_err();
        assert!(matches!(err, BundleError::Missing { ref locale, .. } if locale == "es"));
    }

    #[test]
    fn test_invalid_json_is_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en.json", "{");
        write(dir.path(), "es.json", "{}");

        let err = MessageBundles::load(dir.path(), &locales()).unwrap_err();
        assert!(matches!(err, BundleError::Parse { .. }));
    }

    #[test]
    fn test_bundle_must_be_object() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en.json", "[]");
        write(dir.path(), "es.json", "{}");

        let err = MessageBundles::load(dir.path(), &locales()).unwrap_err();
        assert!(matches!(err, BundleError::NotAnObject { .. }));
    }
}
