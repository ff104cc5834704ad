//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.carousel/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::core::carousel::{
    CarouselOptions, DEFAULT_NEIGHBOR_COUNT, DEFAULT_SWIPE_VELOCITY_THRESHOLD,
};
use crate::core::drag::Axis;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CarouselFileConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub carousel: CarouselSection,
    #[serde(default)]
    pub slides: Vec<SlideEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub deck_title: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CarouselSection {
    pub looped: Option<bool>,
    pub jump: Option<bool>,
    pub fade: Option<bool>,
    pub centered: Option<bool>,
    pub neighbor_count: Option<usize>,
    pub axis: Option<Axis>,
    pub swipe_velocity_threshold: Option<f32>,
    pub transition_ms: Option<u64>,
    pub transition_timeout_ms: Option<u64>,
    pub start_index: Option<usize>,
    pub id_prefix: Option<String>,
}

/// One card of the deck.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SlideEntry {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl SlideEntry {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_DECK_TITLE: &str = "Carousel";
pub const DEFAULT_TRANSITION_MS: u64 = 300;
pub const DEFAULT_TRANSITION_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

fn builtin_deck() -> Vec<SlideEntry> {
    vec![
        SlideEntry::new(
            "Welcome",
            "Use the arrow keys or h and l to move between slides. Drag with the mouse to swipe.",
        ),
        SlideEntry::new(
            "Looping",
            "With looping on, the slide after the last one is the first one again.",
        ),
        SlideEntry::new(
            "Jumping",
            "Press a digit to go straight to a slide. With jump on, distant slides are brought next door first.",
        ),
        SlideEntry::new(
            "Locking",
            "Press x to lock the carousel. Navigation requests are refused until you unlock it.",
        ),
        SlideEntry::new("Adding", "Press a to append a new slide to the deck."),
    ]
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub deck_title: String,
    pub log_level: LevelFilter,
    pub looped: bool,
    pub jump: bool,
    pub fade: bool,
    pub centered: bool,
    pub neighbor_count: usize,
    pub axis: Axis,
    pub swipe_velocity_threshold: f32,
    /// Length of the track animation.
    pub transition: Duration,
    pub transition_timeout: Duration,
    pub start_index: usize,
    pub id_prefix: String,
    pub slides: Vec<SlideEntry>,
}

impl ResolvedConfig {
    pub fn carousel_options(&self) -> CarouselOptions {
        CarouselOptions {
            looped: self.looped,
            jump: self.jump,
            fade: self.fade,
            centered: self.centered,
            enabled: true,
            neighbor_count: self.neighbor_count,
            axis: self.axis,
            swipe_velocity_threshold: self.swipe_velocity_threshold,
            transition_timeout: self.transition_timeout,
            start_index: self.start_index,
            id_prefix: self.id_prefix.clone(),
        }
    }
}

/// Values given on the command line. `None` means "not specified".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub looped: Option<bool>,
    pub jump: Option<bool>,
    pub fade: Option<bool>,
    pub centered: Option<bool>,
    pub neighbor_count: Option<usize>,
    pub axis: Option<Axis>,
    pub start_index: Option<usize>,
    pub log_level: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.carousel/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".carousel").join("config.toml"))
}

/// Load config from `~/.carousel/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `CarouselFileConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<CarouselFileConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(CarouselFileConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<CarouselFileConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(CarouselFileConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: CarouselFileConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# Carousel Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# deck_title = "Carousel"
# log_level = "debug"                 # "off", "error", "warn", "info", "debug", "trace"

# [carousel]
# looped = false                      # Or set CAROUSEL_LOOPED
# jump = false                        # Or set CAROUSEL_JUMP
# fade = false                        # Or set CAROUSEL_FADE
# centered = false
# neighbor_count = 1                  # Or set CAROUSEL_NEIGHBORS
# axis = "horizontal"                 # "horizontal", "vertical", "free"
# swipe_velocity_threshold = 0.5      # cells per millisecond
# transition_ms = 300
# transition_timeout_ms = 1000
# start_index = 0
# id_prefix = "slide"

# [[slides]]
# title = "First"
# body = "Slide text, wrapped to the card width."

# [[slides]]
# title = "Second"
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &CarouselFileConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with(config, cli, |name| std::env::var(name).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with(
    config: &CarouselFileConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let section = &config.carousel;
    let env_flag = |name: &str| env(name).and_then(|v| parse_flag(name, &v));

    // Flags: CLI → env → config → default
    let looped = cli
        .looped
        .or_else(|| env_flag("CAROUSEL_LOOPED"))
        .or(section.looped)
        .unwrap_or(false);
    let jump = cli
        .jump
        .or_else(|| env_flag("CAROUSEL_JUMP"))
        .or(section.jump)
        .unwrap_or(false);
    let fade = cli
        .fade
        .or_else(|| env_flag("CAROUSEL_FADE"))
        .or(section.fade)
        .unwrap_or(false);

    let neighbor_count = cli
        .neighbor_count
        .or_else(|| env("CAROUSEL_NEIGHBORS").and_then(|v| parse_number("CAROUSEL_NEIGHBORS", &v)))
        .or(section.neighbor_count)
        .unwrap_or(DEFAULT_NEIGHBOR_COUNT);

    // Log level: CLI → env → config → default
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| env("CAROUSEL_LOG_LEVEL"))
        .or_else(|| config.general.log_level.clone())
        .and_then(|level| match LevelFilter::from_str(&level) {
            Ok(filter) => Some(filter),
            Err(_) => {
                warn!("Unknown log level '{}', using default", level);
                None
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let swipe_velocity_threshold = match section.swipe_velocity_threshold {
        Some(t) if t.is_finite() && t >= 0.0 => t,
        Some(t) => {
            warn!("Ignoring invalid swipe_velocity_threshold {}", t);
            DEFAULT_SWIPE_VELOCITY_THRESHOLD
        }
        None => DEFAULT_SWIPE_VELOCITY_THRESHOLD,
    };

    // An empty deck falls back to the built-in one
    let slides = if config.slides.is_empty() {
        builtin_deck()
    } else {
        config.slides.clone()
    };

    ResolvedConfig {
        deck_title: config
            .general
            .deck_title
            .clone()
            .unwrap_or_else(|| DEFAULT_DECK_TITLE.to_string()),
        log_level,
        looped,
        jump,
        fade,
        centered: cli.centered.or(section.centered).unwrap_or(false),
        neighbor_count,
        axis: cli.axis.or(section.axis).unwrap_or_default(),
        swipe_velocity_threshold,
        transition: Duration::from_millis(section.transition_ms.unwrap_or(DEFAULT_TRANSITION_MS)),
        transition_timeout: Duration::from_millis(
            section
                .transition_timeout_ms
                .filter(|ms| *ms > 0)
                .unwrap_or(DEFAULT_TRANSITION_TIMEOUT_MS),
        ),
        start_index: cli.start_index.or(section.start_index).unwrap_or(0),
        id_prefix: section
            .id_prefix
            .clone()
            .unwrap_or_else(|| "slide".to_string()),
        slides,
    }
}

fn parse_flag(name: &str, value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        other => {
            warn!("Ignoring {}={}: expected true or false", name, other);
            None
        }
    }
}

fn parse_number(name: &str, value: &str) -> Option<usize> {
    match value.trim().parse() {
        Ok(n) => Some(n),
        Err(e) => {
            warn!("Ignoring {}={}: {}", name, value, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = CarouselFileConfig::default();
        assert!(config.slides.is_empty());
        assert!(config.carousel.looped.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with(&CarouselFileConfig::default(), &CliOverrides::default(), no_env);
        assert!(!resolved.looped);
        assert!(!resolved.jump);
        assert_eq!(resolved.neighbor_count, DEFAULT_NEIGHBOR_COUNT);
        assert_eq!(resolved.log_level, LevelFilter::Debug);
        assert_eq!(resolved.transition, Duration::from_millis(DEFAULT_TRANSITION_MS));
        assert_eq!(resolved.deck_title, DEFAULT_DECK_TITLE);
        assert_eq!(resolved.slides, builtin_deck());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = CarouselFileConfig {
            carousel: CarouselSection {
                looped: Some(true),
                jump: Some(true),
                neighbor_count: Some(2),
                axis: Some(Axis::Vertical),
                transition_ms: Some(120),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with(&config, &CliOverrides::default(), no_env);
        assert!(resolved.looped);
        assert!(resolved.jump);
        assert_eq!(resolved.neighbor_count, 2);
        assert_eq!(resolved.axis, Axis::Vertical);
        assert_eq!(resolved.transition, Duration::from_millis(120));
    }

    #[test]
    fn test_env_overrides_config_and_cli_overrides_env() {
        let config = CarouselFileConfig {
            carousel: CarouselSection {
                looped: Some(false),
                neighbor_count: Some(1),
                ..Default::default()
            },
            ..Default::default()
        };
        let env: HashMap<&str, &str> = [
            ("CAROUSEL_LOOPED", "yes"),
            ("CAROUSEL_NEIGHBORS", "3"),
            ("CAROUSEL_LOG_LEVEL", "warn"),
        ]
        .into_iter()
        .collect();
        let lookup = |name: &str| env.get(name).map(|v| v.to_string());

        let resolved = resolve_with(&config, &CliOverrides::default(), lookup);
        assert!(resolved.looped);
        assert_eq!(resolved.neighbor_count, 3);
        assert_eq!(resolved.log_level, LevelFilter::Warn);

        let cli = CliOverrides {
            looped: Some(false),
            log_level: Some("info".to_string()),
            ..Default::default()
        };
        let resolved = resolve_with(&config, &cli, lookup);
        assert!(!resolved.looped);
        assert_eq!(resolved.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_malformed_env_values_are_ignored() {
        let lookup = |name: &str| match name {
            "CAROUSEL_JUMP" => Some("maybe".to_string()),
            "CAROUSEL_NEIGHBORS" => Some("lots".to_string()),
            _ => None,
        };
        let resolved = resolve_with(&CarouselFileConfig::default(), &CliOverrides::default(), lookup);
        assert!(!resolved.jump);
        assert_eq!(resolved.neighbor_count, DEFAULT_NEIGHBOR_COUNT);
    }

    #[test]
    fn test_invalid_threshold_and_timeout_fall_back() {
        let config = CarouselFileConfig {
            carousel: CarouselSection {
                swipe_velocity_threshold: Some(-1.0),
                transition_timeout_ms: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.swipe_velocity_threshold, DEFAULT_SWIPE_VELOCITY_THRESHOLD);
        assert_eq!(
            resolved.transition_timeout,
            Duration::from_millis(DEFAULT_TRANSITION_TIMEOUT_MS)
        );
    }

    #[test]
    fn test_carousel_options_carry_resolved_values() {
        let cli = CliOverrides {
            looped: Some(true),
            start_index: Some(2),
            ..Default::default()
        };
        let options = resolve_with(&CarouselFileConfig::default(), &cli, no_env).carousel_options();
        assert!(options.looped);
        assert!(options.enabled);
        assert_eq!(options.start_index, 2);
        assert_eq!(options.id_prefix, "slide");
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
deck_title = "Holiday"
log_level = "info"

[carousel]
looped = true
axis = "free"
swipe_velocity_threshold = 0.8

[[slides]]
title = "Beach"
body = "Sand everywhere"

[[slides]]
title = "Mountains"
"#;
        let config: CarouselFileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.deck_title.as_deref(), Some("Holiday"));
        assert_eq!(config.carousel.looped, Some(true));
        assert_eq!(config.carousel.axis, Some(Axis::Free));
        assert_eq!(config.slides.len(), 2);
        assert_eq!(config.slides[0].title, "Beach");
        assert_eq!(config.slides[1].body, "");
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[carousel]
jump = true
"#;
        let config: CarouselFileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.carousel.jump, Some(true));
        assert!(config.carousel.looped.is_none());
        assert!(config.general.deck_title.is_none());
        assert!(config.slides.is_empty());
    }

    #[test]
    fn test_generated_default_parses_as_empty_config() {
        let config: CarouselFileConfig = toml::from_str(DEFAULT_CONFIG_CONTENT).unwrap();
        assert!(config.slides.is_empty());
        assert!(config.carousel.looped.is_none());
    }
}
