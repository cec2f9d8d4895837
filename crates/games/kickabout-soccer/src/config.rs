use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::motion::StepUnit;
use crate::{ball, field, player};

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/soccer.toml";
/// Environment variable naming an alternative config file.
pub const CONFIG_ENV_VAR: &str = "KICKABOUT_SOCCER_CONFIG";

/// Goal box dimensions and placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalConfig {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    /// Goals sit at `x = ±line_x`.
    pub line_x: f32,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            width: field::GOAL_WIDTH,
            height: field::GOAL_HEIGHT,
            depth: field::GOAL_DEPTH,
            line_x: field::GOAL_LINE_X,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub goal: GoalConfig,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: field::FIELD_WIDTH,
            height: field::FIELD_HEIGHT,
            margin: field::FIELD_MARGIN,
            goal: GoalConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub friction: f32,
    pub bounce_factor: f32,
    pub rotation_factor: f32,
    pub step: StepUnit,
    pub kickoff: Vec3,
    pub model_path: String,
    pub model_scale: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            friction: ball::FRICTION,
            bounce_factor: ball::BOUNCE_FACTOR,
            rotation_factor: ball::ROTATION_FACTOR,
            step: StepUnit::Frame,
            kickoff: ball::KICKOFF_SPOT,
            model_path: ball::MODEL_PATH.to_string(),
            model_scale: ball::MODEL_SCALE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub speed: f32,
    pub friction: f32,
    pub min_kick_force: f32,
    pub max_kick_force: f32,
    /// Force gained per second the kick key is held.
    pub kick_charge_rate: f32,
    pub kick_distance: f32,
    pub radius: f32,
    pub contact_margin: f32,
    pub collision_force: f32,
    pub max_contact_push: f32,
    pub step: StepUnit,
    pub spawn: Vec3,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: player::SPEED,
            friction: player::FRICTION,
            min_kick_force: player::MIN_KICK_FORCE,
            max_kick_force: player::MAX_KICK_FORCE,
            kick_charge_rate: player::KICK_CHARGE_RATE,
            kick_distance: player::KICK_DISTANCE,
            radius: player::PLAYER_RADIUS,
            contact_margin: player::CONTACT_MARGIN,
            collision_force: player::COLLISION_FORCE,
            max_contact_push: player::MAX_CONTACT_PUSH,
            step: StepUnit::Elapsed,
            spawn: player::SPAWN_POINT,
        }
    }
}

/// Data-driven tuning for the soccer simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoccerConfig {
    pub field: FieldConfig,
    pub ball: BallConfig,
    pub player: PlayerConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(m) | Self::Parse(m) | Self::Invalid(m) => write!(f, "{m}"),
        }
    }
}

impl std::error::Error for ConfigError {}

fn require(ok: bool, message: &str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::Invalid(message.to_string()))
    }
}

impl SoccerConfig {
    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let f = &self.field;
        require(f.width > 0.0 && f.height > 0.0, "field dimensions must be > 0")?;
        require(
            f.margin >= 0.0 && f.margin * 2.0 < f.width.min(f.height),
            "field.margin must leave a playable area",
        )?;
        require(
            f.goal.width > 0.0 && f.goal.height > 0.0 && f.goal.depth > 0.0,
            "goal dimensions must be > 0",
        )?;

        let b = &self.ball;
        require(
            b.friction > 0.0 && b.friction < 1.0,
            "ball.friction must be in (0, 1)",
        )?;
        require(
            (0.0..=1.0).contains(&b.bounce_factor),
            "ball.bounce_factor must be in [0, 1]",
        )?;
        require(b.model_scale > 0.0, "ball.model_scale must be > 0")?;

        let p = &self.player;
        require(
            p.friction > 0.0 && p.friction < 1.0,
            "player.friction must be in (0, 1)",
        )?;
        require(p.speed >= 0.0, "player.speed must be >= 0")?;
        require(
            p.min_kick_force >= 0.0 && p.min_kick_force <= p.max_kick_force,
            "player.min_kick_force must be in [0, max_kick_force]",
        )?;
        require(
            p.kick_distance > 0.0 && p.radius > 0.0,
            "player.kick_distance and player.radius must be > 0",
        )?;
        require(
            p.collision_force >= 0.0 && p.max_contact_push >= 0.0,
            "player contact tuning must be >= 0",
        )?;
        Ok(())
    }

    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from `KICKABOUT_SOCCER_CONFIG` or `config/soccer.toml`,
    /// falling back to defaults if the file is missing, unparseable or
    /// invalid.
    pub fn load() -> Self {
        let path =
            std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded soccer configuration from {path}");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to load {path}: {e}, using defaults");
                    Self::default()
                },
            },
            Err(_) => {
                tracing::debug!("No {path} found, using defaults");
                Self::default()
            },
        }
    }
}
