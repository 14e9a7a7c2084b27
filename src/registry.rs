//! Compiled-in registry of hash functions
//!
//! Hash implementations are grouped into modules, each exporting named
//! functions. A caller names a module and optionally an export; without an
//! export the registry tries `default`, then `hash`.

use std::collections::BTreeMap;
use std::sync::Arc;

use keymix_core::{KeyMix, UpdateOrder};
use thiserror::Error;

use crate::harness::KeyedHash;

/// Module selected when the caller names none
pub const DEFAULT_MODULE: &str = "keymix";

/// Export names tried, in order, when the caller names none
pub const FALLBACK_EXPORTS: [&str; 2] = ["default", "hash"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("cannot resolve module '{0}'")]
    ModuleResolution(String),

    #[error("module '{module}' has no export named '{export}'")]
    ExportNotFound { module: String, export: String },
}

/// A resolved hash function together with the names it was found under
#[derive(Clone)]
pub struct Resolved {
    pub module: String,
    pub export: String,
    pub function: Arc<dyn KeyedHash>,
}

impl Resolved {
    /// `module::export`
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.module, self.export)
    }
}

impl std::fmt::Debug for Resolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolved")
            .field("module", &self.module)
            .field("export", &self.export)
            .finish_non_exhaustive()
    }
}

type Exports = BTreeMap<String, Arc<dyn KeyedHash>>;

/// Table of hash functions addressable by module and export name
pub struct Registry {
    modules: BTreeMap<String, Exports>,
}

impl Registry {
    /// A registry with no modules
    pub fn empty() -> Self {
        Self {
            modules: BTreeMap::new(),
        }
    }

    /// The built-in `keymix` module
    ///
    /// `default` and `hash` use the sequential update order; `snapshot`
    /// reads every word from the state before the current byte.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        let sequential = Arc::new(KeyMix::new());
        registry.register_shared(DEFAULT_MODULE, "default", sequential.clone());
        registry.register_shared(DEFAULT_MODULE, "hash", sequential);
        registry.register(
            DEFAULT_MODULE,
            "snapshot",
            KeyMix::with_order(UpdateOrder::Snapshot),
        );
        registry
    }

    /// Add (or replace) `module::export`
    pub fn register(&mut self, module: &str, export: &str, function: impl KeyedHash + 'static) {
        self.register_shared(module, export, Arc::new(function));
    }

    fn register_shared(&mut self, module: &str, export: &str, function: Arc<dyn KeyedHash>) {
        self.modules
            .entry(module.to_string())
            .or_default()
            .insert(export.to_string(), function);
    }

    /// Look up a hash function
    pub fn resolve(&self, module: &str, export: Option<&str>) -> Result<Resolved, RegistryError> {
        let exports = self
            .modules
            .get(module)
            .ok_or_else(|| RegistryError::ModuleResolution(module.to_string()))?;

        let found = match export {
            Some(name) => exports.get_key_value(name),
            None => FALLBACK_EXPORTS
                .iter()
                .find_map(|name| exports.get_key_value(*name)),
        };

        let (name, function) = found.ok_or_else(|| RegistryError::ExportNotFound {
            module: module.to_string(),
            export: export.unwrap_or(FALLBACK_EXPORTS[0]).to_string(),
        })?;

        Ok(Resolved {
            module: module.to_string(),
            export: name.clone(),
            function: Arc::clone(function),
        })
    }

    /// Every `(module, export)` pair, sorted
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.modules.iter().flat_map(|(module, exports)| {
            exports
                .keys()
                .map(move |export| (module.as_str(), export.as_str()))
        })
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keymix_core::{Digest, Key};

    fn key() -> Key {
        Key::new("test-key").unwrap()
    }

    #[test]
    fn test_builtin_default_is_keymix() {
        let registry = Registry::builtin();
        let resolved = registry.resolve(DEFAULT_MODULE, None).unwrap();

        assert_eq!(resolved.export, "default");
        assert_eq!(resolved.qualified_name(), "keymix::default");
        assert_eq!(
            resolved.function.hash(b"hello", &key()),
            KeyMix::new().hash(b"hello", &key())
        );
    }

    #[test]
    fn test_explicit_export() {
        let registry = Registry::builtin();
        let snapshot = registry.resolve("keymix", Some("snapshot")).unwrap();
        let expected = KeyMix::with_order(UpdateOrder::Snapshot).hash(b"hello", &key());

        assert_eq!(snapshot.function.hash(b"hello", &key()), expected);
    }

    #[test]
    fn test_falls_back_to_hash_export() {
        let mut registry = Registry::empty();
        registry.register("custom", "hash", |_: &[u8], _: &Key| [7u8; 28]);

        let resolved = registry.resolve("custom", None).unwrap();
        assert_eq!(resolved.export, "hash");
        assert_eq!(resolved.function.hash(b"", &key()), [7u8; 28]);
    }

    #[test]
    fn test_default_wins_over_hash() {
        let mut registry = Registry::empty();
        registry.register("custom", "hash", |_: &[u8], _: &Key| [1u8; 28]);
        registry.register("custom", "default", |_: &[u8], _: &Key| [2u8; 28]);

        let resolved = registry.resolve("custom", None).unwrap();
        assert_eq!(resolved.export, "default");
        assert_eq!(resolved.function.hash(b"", &key()), [2u8; 28]);
    }

    #[test]
    fn test_unknown_module() {
        let err = Registry::builtin().resolve("./missing.js", None).unwrap_err();
        assert_eq!(err, RegistryError::ModuleResolution("./missing.js".to_string()));
    }

    #[test]
    fn test_missing_export() {
        let registry = Registry::builtin();
        let err = registry.resolve("keymix", Some("nope")).unwrap_err();
        assert_eq!(
            err,
            RegistryError::ExportNotFound {
                module: "keymix".to_string(),
                export: "nope".to_string()
            }
        );

        let mut registry = Registry::empty();
        registry.register("custom", "other", |_: &[u8], _: &Key| -> Digest { [0u8; 28] });
        let err = registry.resolve("custom", None).unwrap_err();
        assert_eq!(
            err,
            RegistryError::ExportNotFound {
                module: "custom".to_string(),
                export: "default".to_string()
            }
        );
    }

    #[test]
    fn test_entries_sorted() {
        let registry = Registry::default();
        let entries: Vec<_> = registry.entries().collect();
        assert_eq!(
            entries,
            vec![
                ("keymix", "default"),
                ("keymix", "hash"),
                ("keymix", "snapshot")
            ]
        );
    }
}
