// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Host-supplied widget configuration (placement, accent color, button size).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Accent color used when the host does not supply a usable one.
pub const DEFAULT_PRIMARY_COLOR: &str = "#0066cc";

/// Screen edge the toggle and panel attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Left edge.
    Left,
    /// Right edge.
    #[default]
    Right,
}

impl Position {
    /// Class applied to the toggle and panel.
    pub fn class(self) -> &'static str {
        match self {
            Position::Left => "left",
            Position::Right => "right",
        }
    }
}

/// Size of the floating toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    /// Compact toggle.
    Small,
    /// Medium toggle.
    Medium,
    /// Large toggle, the default for senior-oriented sites.
    #[default]
    Large,
}

impl ButtonSize {
    /// Class applied to the toggle and panel.
    pub fn class(self) -> &'static str {
        match self {
            ButtonSize::Small => "ada-size-small",
            ButtonSize::Medium => "ada-size-medium",
            ButtonSize::Large => "ada-size-large",
        }
    }
}

/// Initial configuration object handed over by the host page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Screen edge for toggle and panel.
    pub position: Position,
    /// CSS color published as `--ada-primary`.
    pub primary_color: String,
    /// Toggle size.
    pub button_size: ButtonSize,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            position: Position::default(),
            primary_color: DEFAULT_PRIMARY_COLOR.to_owned(),
            button_size: ButtonSize::default(),
        }
    }
}

impl WidgetConfig {
    /// Hover shade published as `--ada-primary-hover`.
    ///
    /// Hex colours get a `dd` alpha channel (`d` for the short form); named
    /// and functional colours are used unchanged.
    pub fn primary_hover_color(&self) -> String {
        let color = self.primary_color.as_str();
        let hex = color
            .strip_prefix('#')
            .filter(|h| h.chars().all(|c| c.is_ascii_hexdigit()));
        match hex.map(str::len) {
            Some(6) => format!("{color}dd"),
            Some(3) => format!("{color}d"),
            _ => color.to_owned(),
        }
    }

    /// Parse a host configuration leniently.
    ///
    /// `null`/non-object input gives the defaults; each field that is missing
    /// or unusable falls back to its default on its own.
    pub fn from_json(value: &Value) -> Self {
        let mut config = Self::default();
        let Some(obj) = value.as_object() else {
            return config;
        };
        if let Some(raw) = obj.get("position") {
            match Position::deserialize(raw) {
                Ok(p) => config.position = p,
                Err(err) => warn!(%err, "unsupported widget position; using default"),
            }
        }
        if let Some(raw) = obj.get("buttonSize") {
            match ButtonSize::deserialize(raw) {
                Ok(s) => config.button_size = s,
                Err(err) => warn!(%err, "unsupported button size; using default"),
            }
        }
        if let Some(raw) = obj.get("primaryColor") {
            if let Some(color) = raw.as_str().and_then(sanitize_color) {
                config.primary_color = color;
            } else {
                warn!(value = %raw, "unusable primary color; using default");
            }
        }
        config
    }
}

impl<'de> Deserialize<'de> for WidgetConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

/// Accept a CSS color string unless it is blank or could break out of a declaration.
fn sanitize_color(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.contains([';', '{', '}', '<', '>']) {
        return None;
    }
    Some(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_config_uses_defaults() {
        let c = WidgetConfig::from_json(&Value::Null);
        assert_eq!(c.position, Position::Right);
        assert_eq!(c.primary_color, "#0066cc");
        assert_eq!(c.button_size, ButtonSize::Large);
    }

    #[test]
    fn fields_fall_back_independently() {
        let c = WidgetConfig::from_json(&json!({
            "position": "left",
            "primaryColor": "red; background: url(x)",
            "buttonSize": "huge"
        }));
        assert_eq!(c.position, Position::Left);
        assert_eq!(c.primary_color, DEFAULT_PRIMARY_COLOR);
        assert_eq!(c.button_size, ButtonSize::Large);
    }

    #[test]
    fn unusable_colors_keep_the_default() {
        for raw in [json!(42), json!(null), json!("   "), json!("blue }")] {
            let c = WidgetConfig::from_json(&json!({ "primaryColor": raw }));
            assert_eq!(c.primary_color, DEFAULT_PRIMARY_COLOR, "{raw}");
        }
    }

    #[test]
    fn accepts_host_values() {
        let c = WidgetConfig::from_json(&json!({
            "position": "right",
            "primaryColor": "  #aa3300 ",
            "buttonSize": "small"
        }));
        assert_eq!(c.primary_color, "#aa3300");
        assert_eq!(c.button_size.class(), "ada-size-small");
        assert_eq!(c.position.class(), "right");
    }

    #[test]
    fn hover_shade_follows_the_primary_color() {
        let with = |color: &str| WidgetConfig::from_json(&json!({ "primaryColor": color }));
        assert_eq!(WidgetConfig::default().primary_hover_color(), "#0066ccdd");
        assert_eq!(with("#abc").primary_hover_color(), "#abcd");
        assert_eq!(with("rebeccapurple").primary_hover_color(), "rebeccapurple");
        assert_eq!(with("#12345678").primary_hover_color(), "#12345678");
    }
}
