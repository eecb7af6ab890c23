use crate::{
    engine::GridEngine,
    time,
    types::{DEFAULT_PIXELS_PER_QUARTER_NOTE, MIN_LINE_SPACING},
};
use serde::{Deserialize, Serialize};
use std::{
    fs::read_to_string,
    io,
    path::{Path, PathBuf},
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read grid config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid grid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Grid settings that can be loaded from a TOML file.
///
/// Every field is optional in the file; missing ones take their default.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct GridConfig {
    pub numerator: i32,
    pub denominator: i32,
    pub quantize: i32,
    pub minimum_spacing: f64,
    pub pixels_per_quarter_note: f64,
    pub no_snap: bool,
    pub colors: GridColors,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            numerator: 4,
            denominator: 4,
            quantize: time::DEFAULT_QUANTIZE,
            minimum_spacing: MIN_LINE_SPACING,
            pixels_per_quarter_note: DEFAULT_PIXELS_PER_QUARTER_NOTE,
            no_snap: false,
            colors: GridColors::default(),
        }
    }
}

/// Line colours as `[r, g, b]`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct GridColors {
    pub bar: [u8; 3],
    pub beat: [u8; 3],
    pub common: [u8; 3],
}

impl Default for GridColors {
    fn default() -> Self {
        Self {
            bar: [92, 96, 102],
            beat: [72, 75, 80],
            common: [52, 54, 58],
        }
    }
}

impl GridConfig {
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::from_toml(&source)?;
        log::debug!("loaded grid config from {}", path.display());
        Ok(config)
    }

    /// An engine configured with these settings.
    pub fn engine(&self) -> GridEngine {
        let mut engine = GridEngine::new();
        self.apply(&mut engine);
        engine
    }

    pub fn apply(&self, engine: &mut GridEngine) {
        engine.set_time_signature(self.numerator, self.denominator);
        engine.set_quantize(self.quantize);
        engine.set_minimum_spacing(self.minimum_spacing);
        engine.set_pixels_per_quarter_note(self.pixels_per_quarter_note);
        engine.set_no_snap_mode(self.no_snap);
    }
}
