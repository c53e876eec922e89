//! Render settings layered as defaults < JSON file < environment < command line

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use serde::Deserialize;

use crate::core::DisplayContext;
use crate::math::Color;
use crate::sketches::SketchKind;

pub const DEFAULT_SIZE: u32 = 900;
pub const MAX_SIZE: u32 = 8192;

pub const ENV_SKETCH: &str = "GOLDEN_SKETCH";
pub const ENV_WIDTH: &str = "GOLDEN_WIDTH";
pub const ENV_HEIGHT: &str = "GOLDEN_HEIGHT";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub sketch: SketchKind,
    pub width: u32,
    pub height: u32,
    /// Replaces the sketch's own background colour
    pub background: Option<Color>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sketch: SketchKind::default(),
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            background: None,
        }
    }
}

/// Values from one layer above the config file; unset fields keep the lower layer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub sketch: Option<SketchKind>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ConfigOverrides {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Read `GOLDEN_*` values through `lookup`
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let sketch = lookup(ENV_SKETCH)
            .map(|name| {
                SketchKind::from_str(name.trim(), true)
                    .map_err(|_| anyhow::anyhow!("{} names unknown sketch '{}'", ENV_SKETCH, name))
            })
            .transpose()?;

        let number = |key: &str| -> Result<Option<u32>> {
            lookup(key)
                .map(|v| {
                    v.trim()
                        .parse::<u32>()
                        .with_context(|| format!("{} must be a positive integer, got '{}'", key, v))
                })
                .transpose()
        };

        Ok(Self {
            sketch,
            width: number(ENV_WIDTH)?,
            height: number(ENV_HEIGHT)?,
        })
    }
}

impl RenderConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Invalid render config")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("In config file {}", path.display()))
    }

    /// File (or defaults) with each override layer applied in order, then validated
    pub fn resolve(file: Option<&Path>, layers: &[ConfigOverrides]) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        for layer in layers {
            config.apply(layer);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(sketch) = overrides.sketch {
            self.sketch = sketch;
        }
        if let Some(width) = overrides.width {
            self.width = width;
        }
        if let Some(height) = overrides.height {
            self.height = height;
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_SIZE {
                bail!("{} must be between 1 and {}, got {}", name, MAX_SIZE, value);
            }
        }
        Ok(())
    }

    pub fn display_context(&self) -> DisplayContext {
        DisplayContext::new(self.width, self.height)
    }
}
