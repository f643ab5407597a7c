//! Per-game baseline lookup
//!
//! Handles:
//! - Game name → mid eDPI (case-insensitive keyword match)
//! - low / mid / high baseline triple derived from the mid value
//! - Optional JSON override of the built-in game table

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Fallback mid eDPI for games missing from the table
pub const DEFAULT_MID_EDPI: f64 = 1000.0;

/// Sensitivity style band
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Style {
    Low,
    Mid,
    High,
}

impl Style {
    /// All styles in tie-break order
    pub const ALL: [Style; 3] = [Style::Low, Style::Mid, Style::High];

    /// Stable key used in logs
    pub fn key(self) -> &'static str {
        match self {
            Style::Low => "low",
            Style::Mid => "mid",
            Style::High => "high",
        }
    }

    /// Short display name
    pub fn name(self) -> &'static str {
        match self {
            Style::Low => "Low-sens",
            Style::Mid => "Mid-sens (average)",
            Style::High => "High-sens",
        }
    }

    /// Label describing where a result lands
    pub fn leaning_label(self) -> &'static str {
        match self {
            Style::Low => "Leaning low-sens",
            Style::Mid => "Leaning mid-sens (average)",
            Style::High => "Leaning high-sens",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// low / mid / high eDPI reference values for one game
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleBaseline {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl StyleBaseline {
    /// Derive the triple from a mid eDPI: low = mid/2, high = mid*1.5
    pub fn from_mid(mid: f64) -> Self {
        StyleBaseline {
            low: mid / 2.0,
            mid,
            high: mid * 1.5,
        }
    }

    /// eDPI for a style
    pub fn edpi(&self, style: Style) -> f64 {
        match style {
            Style::Low => self.low,
            Style::Mid => self.mid,
            Style::High => self.high,
        }
    }

    /// In-game sensitivity that reaches a style's eDPI at the given DPI
    pub fn sensitivity(&self, style: Style, dpi: u32) -> f64 {
        self.edpi(style) / f64::from(dpi)
    }
}

/// Errors raised while loading a game table file
#[derive(Debug, Error)]
pub enum GameTableError {
    #[error("failed to read game table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid game table JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("game {name:?} has invalid mid eDPI {value}")]
    InvalidEdpi { name: String, value: f64 },
}

/// One game entry: any keyword hit selects `mid_edpi`
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GameProfile {
    pub name: String,
    pub keywords: Vec<String>,
    pub mid_edpi: f64,
}

impl GameProfile {
    fn new(name: &str, keywords: &[&str], mid_edpi: f64) -> Self {
        GameProfile {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            mid_edpi,
        }
    }

    fn matches(&self, lowered_name: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| lowered_name.contains(k.as_str()))
    }
}

/// Ordered game table; the first matching entry wins
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GameTable {
    #[serde(default = "default_mid_edpi")]
    pub default_mid_edpi: f64,
    pub games: Vec<GameProfile>,
}

fn default_mid_edpi() -> f64 {
    DEFAULT_MID_EDPI
}

impl GameTable {
    /// Built-in table of common shooters and a couple of non-shooters
    pub fn builtin() -> Self {
        GameTable {
            default_mid_edpi: DEFAULT_MID_EDPI,
            games: vec![
                GameProfile::new("Valorant", &["valorant"], 262.0),
                GameProfile::new("Apex Legends", &["apex"], 1100.0),
                GameProfile::new("Fortnite", &["fortnite"], 80.0),
                GameProfile::new("Overwatch 2", &["overwatch"], 1000.0),
                GameProfile::new("Call of Duty", &["call of duty", "cod", "warzone"], 800.0),
                GameProfile::new("League of Legends", &["league of legends", "lol"], 2400.0),
                GameProfile::new("Minecraft", &["minecraft"], 360.0),
            ],
        }
    }

    /// Load a table from JSON, falling back to the built-in one if the file is absent
    pub fn load(path: &Path) -> Result<Self, GameTableError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "game table not found, using built-in table");
            return Ok(Self::builtin());
        }

        let content = fs::read_to_string(path).map_err(|source| GameTableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::from_json(&content)?;
        tracing::info!(
            path = %path.display(),
            games = table.games.len(),
            "loaded game table"
        );
        Ok(table)
    }

    /// Parse and validate a table from a JSON string
    pub fn from_json(content: &str) -> Result<Self, GameTableError> {
        let mut table: GameTable = serde_json::from_str(content)?;
        check_edpi("default", table.default_mid_edpi)?;
        for game in &mut table.games {
            check_edpi(&game.name, game.mid_edpi)?;
            for keyword in &mut game.keywords {
                *keyword = keyword.to_lowercase();
            }
            game.keywords.retain(|k| !k.is_empty());
        }
        Ok(table)
    }

    /// Entry whose keyword appears in `game_name`, if any
    pub fn find(&self, game_name: &str) -> Option<&GameProfile> {
        let lowered = game_name.to_lowercase();
        self.games.iter().find(|g| g.matches(&lowered))
    }

    /// Mid eDPI for a game name (default when nothing matches)
    pub fn mid_edpi(&self, game_name: &str) -> f64 {
        self.find(game_name)
            .map(|g| g.mid_edpi)
            .unwrap_or(self.default_mid_edpi)
    }

    /// Baseline triple for a game name
    pub fn baseline(&self, game_name: &str) -> StyleBaseline {
        StyleBaseline::from_mid(self.mid_edpi(game_name))
    }
}

impl Default for GameTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn check_edpi(name: &str, value: f64) -> Result<(), GameTableError> {
    // high = mid * 1.5 must stay finite too
    if value.is_finite() && value > 0.0 && (value * 1.5).is_finite() {
        Ok(())
    } else {
        Err(GameTableError::InvalidEdpi {
            name: name.to_string(),
            value,
        })
    }
}
