//! Theme resolution.
//!
//! [`ThemeResolver`] turns a [`ThemeSpec`] into a [`ResolvedTheme`]:
//!
//! 1. Normalize the theme specification (a bare name, an object, or nothing at all).
//! 2. Look the name up, falling back to the registry's default theme.
//! 3. Merge the mode-invariant overrides into a fresh copy of the theme.
//! 4. Pick the color scheme: explicit caller mode, then the theme specification's mode
//!    unless it is `system`, then the ambient source, then light.
//! 5. Flatten the selected mode's colors (with `colors` overrides applied)
//!    next to the shared tokens.

use log::debug;
use serde::Deserialize;

use super::{
    ColorScheme, DEFAULT_THEME_NAME, ThemeError, ThemeMode,
    overrides::ThemeOverrides,
    registry::ThemeRegistry,
    scheme::ColorSchemeSource,
    tokens::{ConnectorTokens, GridStyle, LayoutTokens, ModeColors, ShapeTokens, Theme, Typography},
};
use crate::color::Color;

/// A theme specification as written in a document.
///
/// Either a bare theme name or an object with optional name, mode and
/// overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ThemeSpec {
    Name(String),
    Config(ThemeConfig),
}

/// Object form of a [`ThemeSpec`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mode: Option<ThemeMode>,
    #[serde(default)]
    pub overrides: Option<ThemeOverrides>,
}

impl ThemeSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Config(config) => config.name.as_deref(),
        }
    }

    pub fn mode(&self) -> Option<ThemeMode> {
        match self {
            Self::Name(_) => None,
            Self::Config(config) => config.mode,
        }
    }

    pub fn overrides(&self) -> Option<&ThemeOverrides> {
        match self {
            Self::Name(_) => None,
            Self::Config(config) => config.overrides.as_ref(),
        }
    }
}

impl From<ThemeConfig> for ThemeSpec {
    fn from(config: ThemeConfig) -> Self {
        Self::Config(config)
    }
}

/// Flattened colors of a resolved theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColors {
    pub background: Color,
    pub node_background: Color,
    pub node_border: Color,
    pub text: Color,
    pub text_muted: Color,
    pub connector_stroke: Color,
    pub accent: Color,
    pub accent_muted: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

/// Background tokens with the grid color of the selected mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBackground {
    pub show_grid: bool,
    pub grid_style: GridStyle,
    pub grid_spacing: f32,
    pub grid_color: Color,
}

/// A theme flattened to a single color scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTheme {
    pub name: String,
    pub display_name: String,
    pub mode: ColorScheme,
    pub colors: ResolvedColors,
    pub typography: Typography,
    pub shapes: ShapeTokens,
    pub connectors: ConnectorTokens,
    pub layout: LayoutTokens,
    pub background: ResolvedBackground,
}

impl ResolvedTheme {
    fn flatten(theme: &Theme, mode_colors: &ModeColors, mode: ColorScheme) -> Self {
        Self {
            name: theme.name.clone(),
            display_name: theme.display_name.clone(),
            mode,
            colors: ResolvedColors {
                background: mode_colors.background,
                node_background: mode_colors.node_background,
                node_border: mode_colors.node_border,
                text: mode_colors.text,
                text_muted: mode_colors.text_muted,
                connector_stroke: mode_colors.connector_stroke,
                accent: theme.accent.primary,
                accent_muted: theme.accent.muted,
                success: theme.accent.success,
                warning: theme.accent.warning,
                error: theme.accent.error,
            },
            typography: theme.typography.clone(),
            shapes: theme.shapes.clone(),
            connectors: theme.connectors.clone(),
            layout: theme.layout.clone(),
            background: ResolvedBackground {
                show_grid: theme.background.show_grid,
                grid_style: theme.background.grid_style,
                grid_spacing: theme.background.grid_spacing,
                grid_color: mode_colors.grid_color,
            },
        }
    }

    /// Resolves a theme object for `mode` without any registry lookup.
    pub fn from_theme(theme: &Theme, mode: ColorScheme) -> Self {
        Self::flatten(theme, theme.colors(mode), mode)
    }
}

/// Resolves theme specifications against a registry.
///
/// # Examples
///
/// ```
/// # use traceflow_core::theme::{ColorScheme, ThemeRegistry, ThemeResolver, ThemeSpec};
/// let registry = ThemeRegistry::builtin().unwrap();
/// let resolver = ThemeResolver::new(&registry);
///
/// let theme = resolver
///     .resolve(Some(&ThemeSpec::named("corporate")), Some(ColorScheme::Dark))
///     .unwrap();
/// assert_eq!(theme.name, "corporate");
/// assert_eq!(theme.mode, ColorScheme::Dark);
/// ```
#[derive(Clone, Copy)]
pub struct ThemeResolver<'a> {
    registry: &'a ThemeRegistry,
    color_scheme: Option<&'a dyn ColorSchemeSource>,
}

impl<'a> ThemeResolver<'a> {
    pub fn new(registry: &'a ThemeRegistry) -> Self {
        Self {
            registry,
            color_scheme: None,
        }
    }

    /// Consults `source` when neither the caller nor the theme specification fixes a mode.
    pub fn with_color_scheme(mut self, source: &'a dyn ColorSchemeSource) -> Self {
        self.color_scheme = Some(source);
        self
    }

    /// Resolves `spec` (absent means the default theme) into a flat theme.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::RegistryNotInitialized`] when the registry has
    /// no default theme. Unknown theme names are not an error.
    pub fn resolve(
        &self,
        spec: Option<&ThemeSpec>,
        explicit_mode: Option<ColorScheme>,
    ) -> Result<ResolvedTheme, ThemeError> {
        // Fail on an uninitialized registry even when the named theme exists.
        self.registry.default_theme()?;

        let name = spec.and_then(ThemeSpec::name).unwrap_or(DEFAULT_THEME_NAME);
        let base = self.registry.get_or_default(name)?;
        let overrides = spec.and_then(ThemeSpec::overrides);

        let mode = self.select_mode(spec.and_then(ThemeSpec::mode), explicit_mode);
        debug!(theme = base.name.as_str(), mode:% = mode, overrides = overrides.is_some(); "Resolving theme");

        let resolved = match overrides {
            Some(overrides) => {
                let merged = overrides.apply(base);
                let mode_colors = overrides.apply_colors(merged.colors(mode));
                ResolvedTheme::flatten(&merged, &mode_colors, mode)
            }
            None => ResolvedTheme::from_theme(base, mode),
        };
        Ok(resolved)
    }

    /// Resolves a theme object directly, bypassing the registry.
    pub fn resolve_direct(theme: &Theme, mode: ColorScheme) -> ResolvedTheme {
        ResolvedTheme::from_theme(theme, mode)
    }

    fn select_mode(&self, spec_mode: Option<ThemeMode>, explicit: Option<ColorScheme>) -> ColorScheme {
        explicit
            .or_else(|| spec_mode.and_then(ThemeMode::scheme))
            .or_else(|| self.color_scheme.and_then(|source| source.current()))
            .unwrap_or(ColorScheme::Light)
    }
}

impl std::fmt::Debug for ThemeResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeResolver")
            .field("registry", self.registry)
            .field("color_scheme", &self.color_scheme.map(|s| s.current()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{
        builtin,
        overrides::{ColorsOverride, TypographyOverride},
        scheme::{ColorSchemeBroadcaster, FixedColorScheme},
    };

    fn registry() -> ThemeRegistry {
        ThemeRegistry::builtin().unwrap()
    }

    #[test]
    fn test_absent_spec_resolves_default_light() {
        let registry = registry();
        let theme = ThemeResolver::new(&registry).resolve(None, None).unwrap();
        assert_eq!(theme.name, "default");
        assert_eq!(theme.mode, ColorScheme::Light);
        assert_eq!(theme.colors.background, Color::new("#F8F8F8").unwrap());
        assert_eq!(theme.background.grid_color, Color::new("#E0E0E0").unwrap());
    }

    #[test]
    fn test_unknown_name_falls_back_to_default() {
        let registry = registry();
        let theme = ThemeResolver::new(&registry)
            .resolve(Some(&ThemeSpec::named("nope")), None)
            .unwrap();
        assert_eq!(theme.name, "default");
    }

    #[test]
    fn test_empty_registry_fails() {
        let registry = ThemeRegistry::default();
        let result = ThemeResolver::new(&registry).resolve(None, None);
        assert!(matches!(result, Err(ThemeError::RegistryNotInitialized(_))));
    }

    #[test]
    fn test_registry_without_default_fails_even_for_known_name() {
        let mut registry = ThemeRegistry::default();
        registry.register(builtin::vibrant().unwrap());
        let result = ThemeResolver::new(&registry).resolve(Some(&ThemeSpec::named("vibrant")), None);
        assert!(matches!(result, Err(ThemeError::RegistryNotInitialized(_))));
    }

    #[test]
    fn test_font_size_override_keeps_other_typography() {
        let registry = registry();
        let spec = ThemeSpec::from(ThemeConfig {
            overrides: Some(ThemeOverrides {
                typography: Some(TypographyOverride {
                    font_size_label: Some(20.0),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        });

        let resolved = ThemeResolver::new(&registry).resolve(Some(&spec), None).unwrap();
        let base = registry.get("default").unwrap();
        assert_eq!(resolved.typography.font_size_label, 20.0);
        assert_eq!(resolved.typography.font_family, base.typography.font_family);
        assert_eq!(
            resolved.typography.font_size_description,
            base.typography.font_size_description
        );
        assert_eq!(resolved.typography.font_weight_label, base.typography.font_weight_label);
        assert_eq!(
            resolved.typography.font_weight_description,
            base.typography.font_weight_description
        );
        // The registry is untouched.
        assert_eq!(registry.get("default").unwrap().typography.font_size_label, 14.0);
    }

    #[test]
    fn test_mode_precedence() {
        let registry = registry();
        let ambient = FixedColorScheme::new(ColorScheme::Dark);
        let resolver = ThemeResolver::new(&registry).with_color_scheme(&ambient);

        let light_spec = ThemeSpec::from(ThemeConfig {
            mode: Some(ThemeMode::Light),
            ..Default::default()
        });
        let system_spec = ThemeSpec::from(ThemeConfig {
            mode: Some(ThemeMode::System),
            ..Default::default()
        });

        // Explicit mode wins over the spec.
        let theme = resolver.resolve(Some(&light_spec), Some(ColorScheme::Dark)).unwrap();
        assert_eq!(theme.mode, ColorScheme::Dark);

        // A mode in the theme specification wins over the ambient source.
        let theme = resolver.resolve(Some(&light_spec), None).unwrap();
        assert_eq!(theme.mode, ColorScheme::Light);

        // `system` defers to the ambient source.
        let theme = resolver.resolve(Some(&system_spec), None).unwrap();
        assert_eq!(theme.mode, ColorScheme::Dark);
        assert_eq!(theme.colors.background, Color::new("#1A1A1A").unwrap());

        // No preference anywhere means light.
        let unknown = FixedColorScheme::unknown();
        let resolver = ThemeResolver::new(&registry).with_color_scheme(&unknown);
        assert_eq!(resolver.resolve(Some(&system_spec), None).unwrap().mode, ColorScheme::Light);
    }

    #[test]
    fn test_broadcaster_feeds_resolution() {
        let registry = registry();
        let broadcaster = ColorSchemeBroadcaster::new(Some(ColorScheme::Light));
        let resolver = ThemeResolver::new(&registry).with_color_scheme(&broadcaster);

        assert_eq!(resolver.resolve(None, None).unwrap().mode, ColorScheme::Light);
        broadcaster.set(ColorScheme::Dark);
        assert_eq!(resolver.resolve(None, None).unwrap().mode, ColorScheme::Dark);
    }

    #[test]
    fn test_colors_override_applies_to_selected_mode_only() {
        let registry = registry();
        let spec = ThemeSpec::from(ThemeConfig {
            name: Some("corporate".to_string()),
            overrides: Some(ThemeOverrides {
                colors: Some(ColorsOverride {
                    node_border: Some(Color::new("#FF0000").unwrap()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        });
        let resolver = ThemeResolver::new(&registry);

        let dark = resolver.resolve(Some(&spec), Some(ColorScheme::Dark)).unwrap();
        assert_eq!(dark.colors.node_border, Color::new("#FF0000").unwrap());
        assert_eq!(dark.colors.background, Color::new("#111827").unwrap());

        let light = resolver.resolve(Some(&spec), Some(ColorScheme::Light)).unwrap();
        assert_eq!(light.colors.node_border, Color::new("#FF0000").unwrap());
        assert_eq!(light.colors.background, Color::new("#F9FAFB").unwrap());
    }

    #[test]
    fn test_every_builtin_resolves_in_both_modes() {
        let registry = registry();
        let resolver = ThemeResolver::new(&registry);
        for name in registry.names() {
            for mode in [ColorScheme::Light, ColorScheme::Dark] {
                let theme = resolver.resolve(Some(&ThemeSpec::named(name)), Some(mode)).unwrap();
                assert_eq!(theme.name, name);
                assert_eq!(theme.mode, mode);
                let base = registry.get(name).unwrap();
                assert_eq!(theme.colors.text, base.colors(mode).text);
                assert_eq!(theme.background.grid_color, base.colors(mode).grid_color);
                assert_eq!(theme.colors.accent, base.accent.primary);
            }
        }
    }

    #[test]
    fn test_resolve_direct() {
        let theme = builtin::blueprint().unwrap();
        let resolved = ThemeResolver::resolve_direct(&theme, ColorScheme::Dark);
        assert_eq!(resolved.name, "blueprint");
        assert_eq!(resolved.colors.background, Color::new("#0F172A").unwrap());
        assert_eq!(resolved.layout, theme.layout);
    }

    #[test]
    fn test_spec_deserialize_forms() {
        #[derive(Deserialize)]
        struct Wrapper {
            theme: ThemeSpec,
        }

        let bare: Wrapper = toml::from_str(r#"theme = "vibrant""#).unwrap();
        assert_eq!(bare.theme, ThemeSpec::named("vibrant"));

        let object: Wrapper = toml::from_str(
            r#"
            [theme]
            name = "blueprint"
            mode = "system"

            [theme.overrides.typography]
            fontSizeLabel = 20
            "#,
        )
        .unwrap();
        assert_eq!(object.theme.name(), Some("blueprint"));
        assert_eq!(object.theme.mode(), Some(ThemeMode::System));
        assert_eq!(
            object
                .theme
                .overrides()
                .and_then(|o| o.typography.as_ref())
                .and_then(|t| t.font_size_label),
            Some(20.0)
        );
    }
}
