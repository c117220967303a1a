use std::collections::BTreeSet;

use crate::{
    core::{GridSize, Rgb8},
    error::{LanescanError, LanescanResult},
    geom::Triangle,
    schedule::WidthSchedule,
};

/// Colors for the two phases of each chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    pub background: Rgb8,
    pub in_flight_inside: Rgb8,
    pub in_flight_outside: Rgb8,
    pub resolved_inside: Rgb8,
    pub resolved_outside: Rgb8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb8::BLACK,
            in_flight_inside: Rgb8::new(0xFF, 0x00, 0x00),
            in_flight_outside: Rgb8::new(0xFF, 0xA0, 0x00),
            resolved_inside: Rgb8::WHITE,
            resolved_outside: Rgb8::new(0x30, 0x30, 0x30),
        }
    }
}

/// One independent animation run: a grid swept by a lane-width schedule
/// against a fixed triangle. Immutable once the run starts.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Configuration {
    pub name: String,
    pub size: GridSize,
    pub triangle: Triangle,
    pub scale: u32,
    pub widths: WidthSchedule,
    #[serde(default)]
    pub palette: Palette,
}

impl Configuration {
    pub fn validate(&self) -> LanescanResult<()> {
        if self.name.trim().is_empty() {
            return Err(LanescanError::validation(
                "configuration name must be non-empty",
            ));
        }
        if self.name.contains(['/', '\\']) {
            // The name becomes a frame directory and file prefix.
            return Err(LanescanError::validation(format!(
                "configuration name '{}' must not contain path separators",
                self.name
            )));
        }
        if self.size.width == 0 || self.size.height == 0 {
            return Err(LanescanError::validation(
                "grid width/height must be non-zero",
            ));
        }
        if self.scale == 0 {
            return Err(LanescanError::validation("scale factor must be >= 1"));
        }
        self.widths.validate()
    }
}

/// Ordered set of configurations driving one overall run. Static input, read
/// once at startup.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RunManifest {
    pub fps: u32,
    pub configs: Vec<Configuration>,
}

impl RunManifest {
    /// Checks cross-configuration concerns only. Each configuration is
    /// validated inside its own run, so a bad schedule fails that
    /// configuration without touching its siblings.
    pub fn validate(&self) -> LanescanResult<()> {
        if self.fps == 0 {
            return Err(LanescanError::validation("manifest fps must be non-zero"));
        }
        if self.configs.is_empty() {
            return Err(LanescanError::validation(
                "manifest must contain at least one configuration",
            ));
        }
        let mut seen = BTreeSet::new();
        for cfg in &self.configs {
            if !seen.insert(cfg.name.as_str()) {
                return Err(LanescanError::validation(format!(
                    "duplicate configuration name '{}' (names key frame directories)",
                    cfg.name
                )));
            }
        }
        Ok(())
    }

    /// The classic lane-width line-up: serial, 4-wide, 8-wide and 16-wide
    /// schedules over the reference triangle.
    pub fn presets() -> Self {
        fn preset(name: &str, widths: &[usize]) -> Configuration {
            Configuration {
                name: name.to_string(),
                size: GridSize {
                    width: 100,
                    height: 100,
                },
                triangle: Triangle::REFERENCE,
                scale: 2,
                widths: WidthSchedule::new(widths.to_vec()),
                palette: Palette::default(),
            }
        }

        Self {
            fps: 50,
            configs: vec![
                preset("serial", &[1]),
                preset("sse-neon", &[4, 1]),
                preset("avx2", &[8, 4, 1]),
                preset("avx512", &[16, 8, 4, 1]),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;

    fn basic_config() -> Configuration {
        Configuration {
            name: "c0".to_string(),
            size: GridSize {
                width: 10,
                height: 10,
            },
            triangle: Triangle::new(Point::new(0, 0), Point::new(9, 0), Point::new(0, 9)),
            scale: 1,
            widths: WidthSchedule::new(vec![4, 1]),
            palette: Palette::default(),
        }
    }

    #[test]
    fn json_roundtrip() {
        let manifest = RunManifest {
            fps: 50,
            configs: vec![basic_config()],
        };
        let s = serde_json::to_string_pretty(&manifest).unwrap();
        let de: RunManifest = serde_json::from_str(&s).unwrap();
        assert_eq!(de.fps, 50);
        assert_eq!(de.configs.len(), 1);
        assert_eq!(de.configs[0].widths, WidthSchedule::new(vec![4, 1]));
    }

    #[test]
    fn palette_defaults_when_omitted_from_json() {
        let json = r#"{
            "name": "c0",
            "size": { "width": 4, "height": 4 },
            "triangle": {
                "a": { "x": 0, "y": 0 },
                "b": { "x": 3, "y": 0 },
                "c": { "x": 0, "y": 3 }
            },
            "scale": 1,
            "widths": [1]
        }"#;
        let cfg: Configuration = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.palette, Palette::default());
    }

    #[test]
    fn validate_rejects_bad_configurations() {
        let mut cfg = basic_config();
        cfg.name = String::new();
        assert!(cfg.validate().is_err());

        let mut cfg = basic_config();
        cfg.name = "a/b".to_string();
        assert!(cfg.validate().is_err());

        let mut cfg = basic_config();
        cfg.scale = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = basic_config();
        cfg.widths = WidthSchedule::new(vec![1, 4]);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn manifest_rejects_duplicate_names_and_zero_fps() {
        let manifest = RunManifest {
            fps: 50,
            configs: vec![basic_config(), basic_config()],
        };
        assert!(manifest.validate().is_err());

        let manifest = RunManifest {
            fps: 0,
            configs: vec![basic_config()],
        };
        assert!(manifest.validate().is_err());

        let manifest = RunManifest {
            fps: 50,
            configs: vec![],
        };
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn presets_are_valid_and_descending() {
        let manifest = RunManifest::presets();
        manifest.validate().unwrap();
        for cfg in &manifest.configs {
            cfg.validate().unwrap();
            assert!(cfg.widths.reaches_unit_width());
        }
        assert_eq!(manifest.configs[3].widths.widths(), &[16, 8, 4, 1]);
    }
}
