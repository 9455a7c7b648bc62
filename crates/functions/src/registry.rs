use thiserror::Error;

use crate::{FunctionDef, builtin, compile};

/// Errors that can occur when registering a function.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("built-in function '{0}' cannot be replaced")]
    Immutable(String),
}

/// The set of selectable functions.
///
/// Holds the immutable built-ins followed by the `custom` slot. Every
/// successful [`register`](Self::register) bumps a monotonic version counter;
/// dependents (meshes, optimizer state) compare versions to know when to
/// resample or reset.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    entries: Vec<FunctionDef>,
    custom_source: Option<String>,
    version: u64,
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionRegistry {
    /// Creates a registry with the built-in catalogue and the `custom`
    /// placeholder, at version `0`.
    #[must_use]
    pub fn new() -> Self {
        let mut entries = builtin::all();
        entries.push(builtin::custom_placeholder());
        Self {
            entries,
            custom_source: None,
            version: 0,
        }
    }

    /// Looks up a function by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FunctionDef> {
        self.entries.iter().find(|def| def.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Iterates all functions in catalogue order.
    pub fn entries(&self) -> impl Iterator<Item = &FunctionDef> {
        self.entries.iter()
    }

    /// The current version; increases on every registration.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The current `custom` definition.
    #[must_use]
    pub fn custom(&self) -> &FunctionDef {
        // The custom slot is created in `new` and only ever replaced.
        self.get(builtin::CUSTOM)
            .unwrap_or_else(|| unreachable!("custom slot is always present"))
    }

    /// The last custom expression text submitted, whether or not it parsed.
    #[must_use]
    pub fn custom_source(&self) -> Option<&str> {
        self.custom_source.as_deref()
    }

    /// Registers `def` under its identifier, replacing any existing entry.
    ///
    /// New identifiers are appended to the catalogue. Returns the new version.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Immutable`] if the identifier names a built-in.
    pub fn register(&mut self, def: FunctionDef) -> Result<u64, RegistryError> {
        if builtin::is_builtin(def.id()) {
            return Err(RegistryError::Immutable(def.id().to_owned()));
        }

        match self.entries.iter_mut().find(|entry| entry.id() == def.id()) {
            Some(entry) => *entry = def,
            None => self.entries.push(def),
        }
        self.version += 1;
        log::info!("function registry at version {}", self.version);
        Ok(self.version)
    }

    /// Compiles `source` into the `custom` slot and returns the new version.
    ///
    /// If the text does not parse, the previous custom definition is
    /// re-registered unchanged. The version is bumped either way.
    pub fn set_custom(&mut self, source: &str) -> u64 {
        let def = compile(source, self.custom());
        self.custom_source = Some(source.to_owned());

        match self.register(def) {
            Ok(version) => version,
            Err(err) => unreachable!("custom is not a built-in: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use descent_core::Surface;

    use crate::builtin::{CUSTOM, QUADRATIC};

    #[test]
    fn starts_with_builtins_then_custom() {
        let registry = FunctionRegistry::new();
        let ids: Vec<_> = registry.entries().map(FunctionDef::id).collect();
        assert_eq!(ids.len(), builtin::IDS.len() + 1);
        assert_eq!(ids[..builtin::IDS.len()], builtin::IDS);
        assert_eq!(ids.last(), Some(&CUSTOM));
        assert_eq!(registry.version(), 0);
        assert_eq!(registry.custom_source(), None);
    }

    #[test]
    fn builtins_are_immutable() {
        let mut registry = FunctionRegistry::new();
        let impostor = FunctionDef::new(QUADRATIC, "Impostor", builtin::custom_domain(), |_, _| 1.0);

        assert_eq!(
            registry.register(impostor),
            Err(RegistryError::Immutable(QUADRATIC.into()))
        );
        assert_eq!(registry.version(), 0);
        assert_relative_eq!(registry.get(QUADRATIC).unwrap().value(1.0, 1.0), 2.0);
    }

    #[test]
    fn set_custom_replaces_slot_and_bumps_version() {
        let mut registry = FunctionRegistry::new();

        let v1 = registry.set_custom("x^2 + y^2");
        assert_eq!(v1, 1);
        assert_relative_eq!(registry.custom().value(1.5, 1.5), 4.5);
        assert_eq!(registry.custom_source(), Some("x^2 + y^2"));

        let v2 = registry.set_custom("x - y");
        assert!(v2 > v1);
        assert_relative_eq!(registry.custom().value(1.5, 1.0), 0.5);
    }

    #[test]
    fn failed_parse_keeps_previous_custom() {
        let mut registry = FunctionRegistry::new();
        registry.set_custom("x * y");

        let version = registry.set_custom("x * (y");
        assert_eq!(version, 2);
        assert_relative_eq!(registry.custom().value(2.0, 3.0), 6.0);
        assert_eq!(registry.custom_source(), Some("x * (y"));
    }

    #[test]
    fn new_identifiers_are_appended() {
        let mut registry = FunctionRegistry::new();
        let plane = FunctionDef::new("plane", "Plane", builtin::custom_domain(), |x, _| x);

        assert_eq!(registry.register(plane), Ok(1));
        assert!(registry.contains("plane"));
        assert_eq!(registry.entries().last().map(FunctionDef::id), Some("plane"));
    }
}
