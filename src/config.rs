//! Startup settings parsed from environment variables.

use crate::brush::{DEFAULT_RADIUS, MAX_RADIUS, MIN_RADIUS};

pub const DEFAULT_WIDTH: usize = 1280;
pub const DEFAULT_HEIGHT: usize = 800;
pub const DEFAULT_TITLE: &str = "visage";
/// Canvas background, 0x00RRGGBB.
pub const BACKGROUND: u32 = 0x00_78_78_78;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub title: String,
    pub brush_radius: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            title: DEFAULT_TITLE.to_string(),
            brush_radius: DEFAULT_RADIUS,
        }
    }
}

impl Config {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `VISAGE_WIDTH`: window width, default 1280
    /// - `VISAGE_HEIGHT`: window height, default 800
    /// - `VISAGE_TITLE`: window title, default `visage`
    /// - `VISAGE_BRUSH_RADIUS`: initial eraser radius, default 30, clamped to [5,145]
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let width = parse_or(lookup("VISAGE_WIDTH"), DEFAULT_WIDTH).max(1);
        let height = parse_or(lookup("VISAGE_HEIGHT"), DEFAULT_HEIGHT).max(1);
        let title = lookup("VISAGE_TITLE")
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let brush_radius = parse_or(lookup("VISAGE_BRUSH_RADIUS"), DEFAULT_RADIUS).clamp(MIN_RADIUS, MAX_RADIUS);
        Self { width, height, title, brush_radius }
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse::<T>().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(from_pairs(&[]), Config::default());
    }

    #[test]
    fn values_are_parsed() {
        let c = from_pairs(&[
            ("VISAGE_WIDTH", "640"),
            ("VISAGE_HEIGHT", " 480 "),
            ("VISAGE_TITLE", "board"),
            ("VISAGE_BRUSH_RADIUS", "12"),
        ]);
        assert_eq!((c.width, c.height, c.title.as_str(), c.brush_radius), (640, 480, "board", 12));
    }

    #[test]
    fn bad_values_fall_back_or_clamp() {
        let c = from_pairs(&[
            ("VISAGE_WIDTH", "wide"),
            ("VISAGE_HEIGHT", "0"),
            ("VISAGE_TITLE", "   "),
            ("VISAGE_BRUSH_RADIUS", "9000"),
        ]);
        assert_eq!(c.width, DEFAULT_WIDTH);
        assert_eq!(c.height, 1);
        assert_eq!(c.title, DEFAULT_TITLE);
        assert_eq!(c.brush_radius, MAX_RADIUS);
    }
}
