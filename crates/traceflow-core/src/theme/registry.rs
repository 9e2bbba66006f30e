//! The theme registry.
//!
//! A registry is an explicit context object: build it once, then hand shared
//! references to every resolver. Resolution never mutates it.

use log::debug;

use super::{DEFAULT_THEME_NAME, ThemeError, builtin, tokens::Theme};

/// Named themes plus the name of the fallback theme.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: Vec<Theme>,
    default_name: String,
}

impl Default for ThemeRegistry {
    /// An empty registry. Resolving against it fails until a theme named
    /// `default` (or the configured default) is registered.
    fn default() -> Self {
        Self {
            themes: Vec::new(),
            default_name: DEFAULT_THEME_NAME.to_string(),
        }
    }
}

impl ThemeRegistry {
    /// Creates a registry holding the built-in themes.
    pub fn builtin() -> Result<Self, ThemeError> {
        let mut registry = Self::default();
        for theme in builtin::all()? {
            registry.register(theme);
        }
        Ok(registry)
    }

    /// Adds a theme, replacing any theme with the same name.
    pub fn register(&mut self, theme: Theme) {
        debug!(name = theme.name.as_str(); "Registering theme");
        match self.themes.iter_mut().find(|t| t.name == theme.name) {
            Some(existing) => *existing = theme,
            None => self.themes.push(theme),
        }
    }

    /// Chooses which registered theme unknown names fall back to.
    pub fn set_default(&mut self, name: &str) -> Result<(), ThemeError> {
        if self.get(name).is_none() {
            return Err(ThemeError::UnknownTheme(name.to_string()));
        }
        self.default_name = name.to_string();
        Ok(())
    }

    /// Returns the theme registered under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.name == name)
    }

    /// Returns the fallback theme.
    pub fn default_theme(&self) -> Result<&Theme, ThemeError> {
        self.get(&self.default_name)
            .ok_or_else(|| ThemeError::RegistryNotInitialized(self.default_name.clone()))
    }

    /// Returns the theme registered under `name`, or the fallback theme when
    /// the name is unknown.
    ///
    /// Fails only when the fallback itself is missing.
    pub fn get_or_default(&self, name: &str) -> Result<&Theme, ThemeError> {
        match self.get(name) {
            Some(theme) => Ok(theme),
            None => {
                let fallback = self.default_theme()?;
                debug!(requested = name, fallback = fallback.name.as_str(); "Unknown theme, using fallback");
                Ok(fallback)
            }
        }
    }

    /// Names of all registered themes, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.iter().map(|t| t.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names() {
        let registry = ThemeRegistry::builtin().unwrap();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ["default", "blueprint", "corporate", "vibrant"]);
    }

    #[test]
    fn test_unknown_name_falls_back() {
        let registry = ThemeRegistry::builtin().unwrap();
        let theme = registry.get_or_default("no-such-theme").unwrap();
        assert_eq!(theme.name, "default");
        assert_eq!(registry.get_or_default("corporate").unwrap().name, "corporate");
    }

    #[test]
    fn test_empty_registry_is_not_initialized() {
        let registry = ThemeRegistry::default();
        assert!(registry.is_empty());
        assert_eq!(
            registry.get_or_default("default"),
            Err(ThemeError::RegistryNotInitialized("default".to_string()))
        );
    }

    #[test]
    fn test_register_replaces_and_set_default() {
        let mut registry = ThemeRegistry::default();
        let mut custom = builtin::vibrant().unwrap();
        custom.name = "brand".to_string();
        registry.register(custom.clone());
        custom.display_name = "Brand 2".to_string();
        registry.register(custom);
        assert_eq!(registry.names().count(), 1);
        assert_eq!(registry.get("brand").unwrap().display_name, "Brand 2");

        assert!(registry.default_theme().is_err());
        assert_eq!(
            registry.set_default("missing"),
            Err(ThemeError::UnknownTheme("missing".to_string()))
        );
        registry.set_default("brand").unwrap();
        assert_eq!(registry.get_or_default("x").unwrap().name, "brand");
    }
}
