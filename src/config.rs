//! Match configuration.

use crate::games::chess::{Layout, PieceKind, PlayerKind, Side};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, instrument, warn};

/// Validated configuration for one match.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct MatchConfig {
    /// Player kind for White.
    white: PlayerKind,
    /// Player kind for Black.
    black: PlayerKind,
    /// Screen layout.
    layout: Layout,
    /// Seed for random machine players.
    seed: Option<u64>,
}

/// On-disk shape, before validation.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    players: BTreeMap<String, String>,
    #[serde(default)]
    layout: Layout,
    #[serde(default)]
    seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new(PlayerKind::Human, PlayerKind::Human)
    }
}

impl MatchConfig {
    /// Creates a configuration with the default layout.
    #[instrument]
    pub fn new(white: PlayerKind, black: PlayerKind) -> Self {
        Self {
            white,
            black,
            layout: Layout::default(),
            seed: None,
        }
    }

    /// Returns a copy with a fixed seed for random machines.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Player kind configured for `side`.
    pub fn player(&self, side: Side) -> PlayerKind {
        match side {
            Side::White => self.white,
            Side::Black => self.black,
        }
    }

    /// File name looked up by [`MatchConfig::discover`].
    pub const DEFAULT_FILE: &'static str = "match.toml";

    /// Loads [`MatchConfig::DEFAULT_FILE`] from `dir`. A missing file
    /// falls back to the default configuration; a present but invalid one
    /// is still an error.
    #[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(Self::DEFAULT_FILE);
        if !path.exists() {
            warn!(
                path = %path.display(),
                "No config file found, playing human vs. human with the default layout"
            );
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(white = %config.white, black = %config.black, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        let mut white = None;
        let mut black = None;
        for (key, value) in &raw.players {
            let kind = PlayerKind::from_str(value.trim()).map_err(|_| {
                ConfigError::new(format!("Unknown player kind '{}' for '{}'", value, key))
            })?;
            match key.to_ascii_lowercase().as_str() {
                "white" if white.is_none() => white = Some(kind),
                "black" if black.is_none() => black = Some(kind),
                "white" | "black" => {
                    return Err(ConfigError::new(format!("Side '{}' given twice", key)));
                }
                _ => return Err(ConfigError::new(format!("Unknown side '{}'", key))),
            }
        }

        let white = white.ok_or_else(|| ConfigError::new("Missing player for white".to_string()))?;
        let black = black.ok_or_else(|| ConfigError::new("Missing player for black".to_string()))?;

        validate_layout(&raw.layout)?;

        Ok(Self {
            white,
            black,
            layout: raw.layout,
            seed: raw.seed,
        })
    }
}

/// Rejects layouts whose regions cannot be clicked or whose pixel
/// extents do not fit in `i32`.
#[instrument]
fn validate_layout(layout: &Layout) -> Result<(), ConfigError> {
    let tile = *layout.tile_size();
    if tile <= 0 || *layout.square_tiles() <= 0 {
        return Err(ConfigError::new(
            "Layout tile_size and square_tiles must be positive".to_string(),
        ));
    }

    // One title row plus one row per promotion option, each at least a tile.
    let [selector_width, selector_height] = *layout.selector_size();
    let min_height = 1 + PieceKind::PROMOTION_TARGETS.len() as i32;
    if selector_width < 1 || selector_height < min_height {
        return Err(ConfigError::new(format!(
            "Layout selector_size {:?} too small, need at least [1, {}] tiles",
            layout.selector_size(),
            min_height
        )));
    }

    let fits = |origin: [i32; 2], size: [i32; 2]| {
        (0..2).all(|axis| {
            origin[axis]
                .checked_mul(tile)
                .and_then(|start| start.checked_add(size[axis]))
                .is_some()
        })
    };
    let board_edge = tile
        .checked_mul(*layout.square_tiles())
        .and_then(|square| square.checked_mul(8));
    let selector_px = (
        selector_width.checked_mul(tile),
        selector_height.checked_mul(tile),
    );
    let in_range = match (board_edge, selector_px) {
        (Some(edge), (Some(width), Some(height))) => {
            fits(*layout.board_origin(), [edge, edge])
                && fits(*layout.selector_origin(), [width, height])
        }
        _ => false,
    };
    if !in_range {
        return Err(ConfigError::new(
            "Layout pixel extents overflow, reduce tile_size or the region sizes".to_string(),
        ));
    }
    Ok(())
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
