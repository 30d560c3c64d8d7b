use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::Color;
use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::animation::DEFAULT_FRAME_MS;
use crate::surface::StrokeCap;
use crate::ui::theme;

// ─── Embedded Default ────────────────────────────────────────────────────
/// Baked into the binary at compile time, so a missing config file never
/// stops the app from starting.
const DEFAULT_CONFIG_TOML: &str = include_str!("../default_config.toml");

// ─── CLI Arguments (override layer) ─────────────────────────────────────
/// tickrow — a row of ticks that flip one tap at a time
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "tickrow", version, about, long_about = None)]
pub struct CliArgs {
    /// Path to a custom config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log file path (logging disabled if not specified)
    #[arg(short, long)]
    pub log: Option<PathBuf>,

    /// Log level filter (overrides config file)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Milliseconds between animation frames (overrides config file)
    #[arg(long)]
    pub frame_ms: Option<u64>,

    /// Disable mouse support
    #[arg(long, default_value_t = false)]
    pub no_mouse: bool,

    /// Print the default config to stdout and exit
    #[arg(long)]
    pub print_default_config: bool,
}

// ─── TOML Structs ───────────────────────────────────────────────────────

/// Root configuration — parsed from TOML, then overridden by CLI flags.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub appearance: AppearanceConfig,
    #[serde(default)]
    pub keys: KeysConfig,

    /// Set from the CLI only
    #[serde(skip)]
    pub log_file: Option<PathBuf>,
    #[serde(skip, default = "default_true")]
    pub mouse_support: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Pause between frames (milliseconds)
    pub frame_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub tick: Color,

    #[serde(deserialize_with = "deserialize_color")]
    pub background: Color,

    /// Stroke end style: "round" or "butt"
    pub stroke_cap: StrokeCap,

    /// Show the key hint bar
    pub show_hints: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    pub tap: Vec<String>,
    pub quit: String,
}

// ─── Defaults ───────────────────────────────────────────────────────────

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).unwrap_or_else(|_| Self {
            general: GeneralConfig::default(),
            animation: AnimationConfig::default(),
            appearance: AppearanceConfig::default(),
            keys: KeysConfig::default(),
            log_file: None,
            mouse_support: true,
        })
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_ms: DEFAULT_FRAME_MS,
        }
    }
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            tick: theme::TICK,
            background: theme::BACKGROUND,
            stroke_cap: StrokeCap::default(),
            show_hints: true,
        }
    }
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            tap: vec!["space".into(), "enter".into()],
            quit: "q".into(),
        }
    }
}

fn default_true() -> bool {
    true
}

// ─── Color / Key Parsing ────────────────────────────────────────────────

fn deserialize_color<'de, D>(deserializer: D) -> std::result::Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color: \"{s}\"")))
}

/// Parse a color string into a ratatui Color.
/// Supports: named colors, "reset", "#RRGGBB" hex.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "reset" | "default" | "transparent" => Some(Color::Reset),
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" | "dark_gray" | "dark_grey" => Some(Color::DarkGray),
        hex if hex.starts_with('#') && hex.len() == 7 && hex.is_ascii() => {
            let r = u8::from_str_radix(&hex[1..3], 16).ok()?;
            let g = u8::from_str_radix(&hex[3..5], 16).ok()?;
            let b = u8::from_str_radix(&hex[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Parse a key name: "space", "enter", "tab", "esc", or a single character.
pub fn parse_key(s: &str) -> Option<KeyCode> {
    let trimmed = s.trim();
    match trimmed.to_lowercase().as_str() {
        "space" => Some(KeyCode::Char(' ')),
        "enter" | "return" => Some(KeyCode::Enter),
        "tab" => Some(KeyCode::Tab),
        "esc" | "escape" => Some(KeyCode::Esc),
        _ => {
            let mut chars = trimmed.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

impl KeysConfig {
    /// True if `key` is one of the configured tap keys
    pub fn is_tap(&self, key: &KeyEvent) -> bool {
        self.tap.iter().any(|k| parse_key(k) == Some(key.code))
    }

    pub fn is_quit(&self, key: &KeyEvent) -> bool {
        parse_key(&self.quit) == Some(key.code)
    }

    /// Display label of the first tap key, for the hint bar
    pub fn tap_label(&self) -> &str {
        self.tap.first().map(String::as_str).unwrap_or("space")
    }
}

// ─── Path Resolution ────────────────────────────────────────────────────

impl Config {
    /// Standard config file path: ~/.config/tickrow/config.toml
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tickrow")
            .join("config.toml")
    }

    /// Animation frame interval, at least one millisecond
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.animation.frame_ms.max(1))
    }

    /// Tap keys and the quit key, validated
    pub fn validate(&self) -> Result<()> {
        for key in self.keys.tap.iter().chain(std::iter::once(&self.keys.quit)) {
            if parse_key(key).is_none() {
                return Err(crate::error::TickError::Config(format!("unknown key: \"{key}\"")))
                    .wrap_err("Invalid [keys] section");
            }
        }
        Ok(())
    }
}

// ─── Bootloader ─────────────────────────────────────────────────────────

/// The single entry point for configuration. Called exactly once at startup.
///
/// 1. Resolve config file path (CLI override or default)
/// 2. If the file doesn't exist, create directory tree + write defaults
/// 3. Parse TOML from disk into Config
/// 4. Apply CLI overrides on top
pub fn load(cli: &CliArgs) -> Result<Config> {
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    if !config_path.exists() {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).wrap_err_with(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        std::fs::write(&config_path, DEFAULT_CONFIG_TOML).wrap_err_with(|| {
            format!(
                "Failed to write default config to {}",
                config_path.display()
            )
        })?;
        info!("Created default config at {}", config_path.display());
    }

    let toml_str = std::fs::read_to_string(&config_path)
        .wrap_err_with(|| format!("Failed to read config from {}", config_path.display()))?;

    let mut config = parse(&toml_str).wrap_err_with(|| {
        format!(
            "Failed to parse config at {}.\n\
             Delete the file to regenerate defaults, or run:\n  \
             tickrow --print-default-config > {:?}",
            config_path.display(),
            config_path
        )
    })?;

    apply_overrides(&mut config, cli);
    config.validate()?;
    Ok(config)
}

fn parse(toml_str: &str) -> Result<Config> {
    Ok(toml::from_str(toml_str)?)
}

fn apply_overrides(config: &mut Config, cli: &CliArgs) {
    if let Some(ref level) = cli.log_level {
        config.general.log_level = level.clone();
    }
    if let Some(ms) = cli.frame_ms {
        config.animation.frame_ms = ms;
    }
    if cli.no_mouse {
        config.mouse_support = false;
    }
    if cli.log.is_some() {
        config.log_file = cli.log.clone();
    }
}

/// Returns the embedded default config TOML string.
pub fn default_config_toml() -> &'static str {
    DEFAULT_CONFIG_TOML
}
