// Theme presets for SlotKit Core
//
// A theme is an ordered map of CSS custom-property name to value, applied
// wholesale to the widget container. No validation is performed on values.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered collection of CSS custom properties
///
/// Serializes as a plain JSON object so callers can pass themes the same way
/// they would to a JavaScript widget. Insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Theme {
    pub vars: Vec<(String, String)>,
}

impl Serialize for Theme {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.vars.len()))?;
        for (k, v) in &self.vars {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ThemeVisitor;

        impl<'de> Visitor<'de> for ThemeVisitor {
            type Value = Theme;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of CSS custom properties")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Theme, A::Error> {
                let mut vars = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((k, v)) = access.next_entry::<String, String>()? {
                    vars.push((k, v));
                }
                Ok(Theme { vars })
            }
        }

        deserializer.deserialize_map(ThemeVisitor)
    }
}

impl Theme {
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Look up a bundled preset by name
    pub fn preset(name: &str) -> Option<Theme> {
        match name {
            "cartoon" => Some(cartoon()),
            "neon" => Some(neon()),
            "golden" => Some(golden()),
            _ => None,
        }
    }

    fn from_pairs(pairs: &[(&str, &str)]) -> Theme {
        Theme {
            vars: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Default preset: muted blue surfaces with a coral accent
pub fn cartoon() -> Theme {
    Theme::from_pairs(&[
        ("--background", "linear-gradient(135deg, #2a2d3a 0%, #3d4159 50%, #4a5478 100%)"),
        ("--surface-primary", "rgba(45, 52, 78, 0.95)"),
        ("--surface-secondary", "rgba(55, 62, 88, 0.9)"),
        ("--surface-tertiary", "rgba(65, 72, 98, 0.85)"),
        ("--surface-accent", "rgba(255, 107, 107, 0.12)"),
        ("--text-primary", "#f1f3f5"),
        ("--text-secondary", "#c9cdd4"),
        ("--text-accent", "#ff6b8a"),
        ("--text-on-accent", "#1a1d23"),
        ("--accent-color", "#ff6b8a"),
        ("--accent-light", "#ff8fa3"),
        ("--accent-dark", "#e74c71"),
        ("--accent-gradient", "linear-gradient(135deg, #ff6b8a, #ff8fa3)"),
        ("--accent-shadow", "rgba(255, 107, 138, 0.25)"),
        ("--border-primary", "rgba(241, 243, 245, 0.15)"),
        ("--border-secondary", "rgba(241, 243, 245, 0.08)"),
        ("--border-accent", "rgba(255, 107, 138, 0.3)"),
        ("--border-glow", "rgba(255, 107, 138, 0.2)"),
        ("--border-highlight", "rgba(241, 243, 245, 0.15)"),
        ("--symbol-gradient", "linear-gradient(145deg, rgba(75, 82, 108, 0.8), rgba(65, 72, 98, 0.9))"),
        ("--symbol-gradient-alt", "linear-gradient(145deg, rgba(85, 92, 118, 0.8), rgba(75, 82, 108, 0.9))"),
        ("--symbol-gradient-highlight", "linear-gradient(145deg, rgba(95, 102, 128, 0.9), rgba(85, 92, 118, 0.95))"),
    ])
}

/// Dark preset with cyan glow accents
pub fn neon() -> Theme {
    Theme::from_pairs(&[
        ("--background", "linear-gradient(135deg, #0a0a0f 0%, #1a1a2e 50%, #16213e 100%)"),
        ("--surface-primary", "rgba(18, 18, 28, 0.95)"),
        ("--surface-secondary", "rgba(28, 28, 38, 0.9)"),
        ("--surface-tertiary", "rgba(38, 38, 48, 0.85)"),
        ("--surface-accent", "rgba(0, 255, 255, 0.08)"),
        ("--text-primary", "#e8f4fd"),
        ("--text-secondary", "#b8c5d1"),
        ("--text-accent", "#00ffff"),
        ("--text-on-accent", "#0a0a0f"),
        ("--accent-color", "#00ffff"),
        ("--accent-light", "#4dffff"),
        ("--accent-dark", "#00cccc"),
        ("--accent-gradient", "linear-gradient(135deg, #00ffff, #4dffff)"),
        ("--accent-shadow", "rgba(0, 255, 255, 0.4)"),
        ("--border-primary", "rgba(0, 255, 255, 0.2)"),
        ("--border-secondary", "rgba(0, 255, 255, 0.1)"),
        ("--border-accent", "rgba(0, 255, 255, 0.5)"),
        ("--border-glow", "rgba(0, 255, 255, 0.6)"),
        ("--border-highlight", "rgba(0, 255, 255, 0.3)"),
        ("--symbol-gradient", "linear-gradient(145deg, rgba(28, 28, 38, 0.8), rgba(18, 18, 28, 0.9))"),
        ("--symbol-gradient-alt", "linear-gradient(145deg, rgba(38, 38, 48, 0.8), rgba(28, 28, 38, 0.9))"),
        ("--symbol-gradient-highlight", "linear-gradient(145deg, rgba(48, 48, 58, 0.9), rgba(38, 38, 48, 0.95))"),
    ])
}

/// Warm preset with amber accents
pub fn golden() -> Theme {
    Theme::from_pairs(&[
        ("--background", "linear-gradient(135deg, #1a1612 0%, #2a241e 50%, #3a332b 100%)"),
        ("--surface-primary", "rgba(35, 30, 25, 0.95)"),
        ("--surface-secondary", "rgba(45, 40, 35, 0.9)"),
        ("--surface-tertiary", "rgba(55, 50, 45, 0.85)"),
        ("--surface-accent", "rgba(255, 193, 7, 0.1)"),
        ("--text-primary", "#f5f2e8"),
        ("--text-secondary", "#d4c5a9"),
        ("--text-accent", "#ffc107"),
        ("--text-on-accent", "#1a1612"),
        ("--accent-color", "#ffc107"),
        ("--accent-light", "#ffca2c"),
        ("--accent-dark", "#e0a800"),
        ("--accent-gradient", "linear-gradient(135deg, #ffc107, #ffca2c)"),
        ("--accent-shadow", "rgba(255, 193, 7, 0.3)"),
        ("--border-primary", "rgba(245, 242, 232, 0.12)"),
        ("--border-secondary", "rgba(245, 242, 232, 0.08)"),
        ("--border-accent", "rgba(255, 193, 7, 0.3)"),
        ("--border-glow", "rgba(255, 193, 7, 0.25)"),
        ("--border-highlight", "rgba(245, 242, 232, 0.15)"),
        ("--symbol-gradient", "linear-gradient(145deg, rgba(75, 70, 65, 0.8), rgba(55, 50, 45, 0.9))"),
        ("--symbol-gradient-alt", "linear-gradient(145deg, rgba(85, 80, 75, 0.8), rgba(65, 60, 55, 0.9))"),
        ("--symbol-gradient-highlight", "linear-gradient(145deg, rgba(95, 90, 85, 0.9), rgba(75, 70, 65, 0.95))"),
    ])
}
