//! CSS colors for theme tokens.
//!
//! Every color token of a theme is a [`Color`] parsed by the `color` crate,
//! so a theme can never carry an arbitrary string into the rendered markup.

use std::{fmt, str::FromStr};

use color::{DynamicColor, palette::css};
use serde::Deserialize;

/// A parsed CSS color.
///
/// Displays in CSS syntax, which is safe to place in an attribute as is.
#[derive(Clone, Copy, PartialEq, Debug, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parse a CSS color such as `#3a7d69`, `rgb(0 0 0 / 10%)` or `teal`.
    ///
    /// # Errors
    ///
    /// Returns a message naming `value` when it is not a CSS color.
    ///
    /// ```
    /// use traceflow_core::color::Color;
    ///
    /// assert!(Color::new("#3a7d69").is_ok());
    /// assert!(Color::new("\"><script>").is_err());
    /// ```
    pub fn new(value: &str) -> Result<Self, String> {
        DynamicColor::from_str(value)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{value}`: {err}"))
    }

    /// Opaque white.
    pub fn white() -> Self {
        Self {
            color: DynamicColor::from_alpha_color(css::WHITE),
        }
    }

    /// Same color with opacity `alpha` in `0.0..=1.0`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Opacity in `0.0..=1.0`.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

/// Opaque black.
impl Default for Color {
    fn default() -> Self {
        Self {
            color: DynamicColor::from_alpha_color(css::BLACK),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<Color> for svg::node::Value {
    fn from(color: Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    #[test]
    fn test_parse() {
        assert!(Color::new("#3a7d69").is_ok());
        assert!(Color::new("steelblue").is_ok());
        assert!(Color::new("not-a-color").is_err());
        assert!(Color::try_from("\"><script>".to_string()).is_err());
    }

    #[test]
    fn test_alpha() {
        assert!(approx_eq!(f32, Color::white().alpha(), 1.0));
        assert!(approx_eq!(f32, Color::default().alpha(), 1.0));

        let shadow = Color::new("rgba(0, 0, 0, 0.08)").unwrap();
        assert!(approx_eq!(f32, shadow.alpha(), 0.08, epsilon = 1e-3));
        assert!(approx_eq!(f32, shadow.with_alpha(1.0).alpha(), 1.0));
    }

    #[test]
    fn test_display_is_attribute_safe() {
        for value in ["#F8F8F8", "rgba(0, 0, 0, 0.1)", "red"] {
            let display = Color::new(value).unwrap().to_string();
            assert!(!display.is_empty());
            assert!(!display.contains(['<', '>', '"', '&']));
        }
    }

    #[test]
    fn test_deserialize() {
        #[derive(Deserialize)]
        struct Holder {
            fill: Color,
        }

        let holder: Holder = toml::from_str("fill = \"#22C55E\"").unwrap();
        assert_eq!(holder.fill, Color::new("#22c55e").unwrap());
        assert!(toml::from_str::<Holder>("fill = \"nope\"").is_err());
    }
}
