//! Animation and style parameters that drive a generation request.
//!
//! [`AnimationConfig`] is treated as an immutable snapshot: every edit goes through
//! [`AnimationConfig::update`], which returns a new value and leaves the old one untouched.

use std::{fmt, path::Path, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Duration must be between {min} and {max} seconds, got {value}")]
    DurationOutOfRange { value: f64, min: f64, max: f64 },

    #[error("Invalid duration '{0}', expected a number of seconds")]
    InvalidDuration(String),

    #[error("Invalid color '{0}', expected #rgb or #rrggbb")]
    InvalidColor(String),

    #[error("Unknown {kind} '{value}', expected one of: {expected}")]
    UnknownVariant {
        kind: &'static str,
        value: String,
        expected: String,
    },

    #[error("Failed to read config preset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config preset: {0}")]
    Json(#[from] serde_json::Error),
}

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal, default = $default:ident,
        { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ConfigError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let wanted = value.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| ConfigError::UnknownVariant {
                        kind: $kind,
                        value: value.to_string(),
                        expected: $name::ALL
                            .iter()
                            .map(|variant| variant.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

labelled_enum! {
    /// Animation applied to the main logo shape.
    LogoAnimation, "logo animation", default = ElectricTrace, {
        ElectricTrace => "electric-trace",
        FadeIn => "fade-in",
        ScaleUp => "scale-up",
        PathDraw => "path-draw",
    }
}

labelled_enum! {
    /// Animation applied to the logo text.
    TextAnimation, "text animation", default = VerticalEntrance, {
        VerticalEntrance => "vertical-entrance",
        FadeIn => "fade-in",
        Typewriter => "typewriter",
        GlowIn => "glow-in",
    }
}

labelled_enum! {
    /// Animation applied to the background layer.
    BackgroundAnimation, "background animation", default = ProgressiveGlow, {
        ProgressiveGlow => "progressive-glow",
        FadeIn => "fade-in",
        Static => "static",
        SubtlePulse => "subtle-pulse",
    }
}

/// Total loop length in seconds, always within [`MIN`](Self::MIN)..=[`MAX`](Self::MAX)
/// and snapped to [`STEP`](Self::STEP).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, PartialOrd)]
#[serde(try_from = "f64", into = "f64")]
pub struct AnimationDuration(f64);

impl AnimationDuration {
    pub const MIN: f64 = 1.0;
    pub const MAX: f64 = 10.0;
    pub const STEP: f64 = 0.1;

    pub fn new(seconds: f64) -> Result<Self, ConfigError> {
        if !seconds.is_finite() || !(Self::MIN..=Self::MAX).contains(&seconds) {
            return Err(ConfigError::DurationOutOfRange {
                value: seconds,
                min: Self::MIN,
                max: Self::MAX,
            });
        }

        Ok(Self(Self::snap(seconds)))
    }

    /// Slider semantics: out-of-range input is pulled back to the nearest bound.
    pub fn clamped(seconds: f64) -> Self {
        if seconds.is_nan() {
            return Self::default();
        }

        Self(Self::snap(seconds.clamp(Self::MIN, Self::MAX)))
    }

    pub fn seconds(self) -> f64 {
        self.0
    }

    fn snap(seconds: f64) -> f64 {
        // n / 10 is correctly rounded, n * 0.1 is not
        (seconds * 10.0).round() / 10.0
    }
}

impl Default for AnimationDuration {
    fn default() -> Self {
        Self(2.5)
    }
}

impl TryFrom<f64> for AnimationDuration {
    type Error = ConfigError;

    fn try_from(seconds: f64) -> Result<Self, Self::Error> {
        Self::new(seconds)
    }
}

impl From<AnimationDuration> for f64 {
    fn from(duration: AnimationDuration) -> Self {
        duration.0
    }
}

impl fmt::Display for AnimationDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AnimationDuration {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let seconds = value
            .trim()
            .trim_end_matches('s')
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidDuration(value.to_string()))?;
        Self::new(seconds)
    }
}

/// A hex color as produced by a color picker, normalised to lowercase `#rrggbb`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(value.to_string());
        let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let expanded = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => hex.to_string(),
            _ => return Err(invalid()),
        };

        Ok(Color(format!("#{}", expanded.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Color::parse(value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every user-facing parameter of a splash animation.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AnimationConfig {
    /// Label of the logo, also used as the animated text.
    pub logo_name: String,
    pub logo_animation: LogoAnimation,
    pub text_animation: TextAnimation,
    pub background_animation: BackgroundAnimation,
    /// Loop length in seconds (1 to 10, step 0.1).
    #[schemars(with = "f64")]
    pub duration: AnimationDuration,
    /// Only used when `isTransparent` is false.
    #[schemars(with = "String")]
    pub background_color: Color,
    #[schemars(with = "String")]
    pub primary_color: Color,
    #[schemars(with = "String")]
    pub secondary_color: Color,
    pub is_transparent: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            logo_name: "AtemiMx".to_string(),
            logo_animation: LogoAnimation::default(),
            text_animation: TextAnimation::default(),
            background_animation: BackgroundAnimation::default(),
            duration: AnimationDuration::default(),
            background_color: Color("#111827".to_string()),
            primary_color: Color("#38bdf8".to_string()),
            secondary_color: Color("#ffffff".to_string()),
            is_transparent: true,
        }
    }
}

/// A single field change. Values are already validated by their types.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigEdit {
    LogoName(String),
    LogoAnimation(LogoAnimation),
    TextAnimation(TextAnimation),
    BackgroundAnimation(BackgroundAnimation),
    Duration(AnimationDuration),
    BackgroundColor(Color),
    PrimaryColor(Color),
    SecondaryColor(Color),
    Transparent(bool),
}

impl ConfigEdit {
    pub fn field(&self) -> &'static str {
        match self {
            ConfigEdit::LogoName(_) => "logoName",
            ConfigEdit::LogoAnimation(_) => "logoAnimation",
            ConfigEdit::TextAnimation(_) => "textAnimation",
            ConfigEdit::BackgroundAnimation(_) => "backgroundAnimation",
            ConfigEdit::Duration(_) => "duration",
            ConfigEdit::BackgroundColor(_) => "backgroundColor",
            ConfigEdit::PrimaryColor(_) => "primaryColor",
            ConfigEdit::SecondaryColor(_) => "secondaryColor",
            ConfigEdit::Transparent(_) => "isTransparent",
        }
    }
}

impl AnimationConfig {
    /// Returns a copy with one field replaced.
    pub fn update(&self, edit: ConfigEdit) -> AnimationConfig {
        let mut next = self.clone();
        match edit {
            ConfigEdit::LogoName(name) => next.logo_name = name,
            ConfigEdit::LogoAnimation(animation) => next.logo_animation = animation,
            ConfigEdit::TextAnimation(animation) => next.text_animation = animation,
            ConfigEdit::BackgroundAnimation(animation) => next.background_animation = animation,
            ConfigEdit::Duration(duration) => next.duration = duration,
            ConfigEdit::BackgroundColor(color) => next.background_color = color,
            ConfigEdit::PrimaryColor(color) => next.primary_color = color,
            ConfigEdit::SecondaryColor(color) => next.secondary_color = color,
            ConfigEdit::Transparent(transparent) => next.is_transparent = transparent,
        }
        next
    }

    /// Applies edits in order.
    pub fn with_edits(&self, edits: impl IntoIterator<Item = ConfigEdit>) -> AnimationConfig {
        edits
            .into_iter()
            .fold(self.clone(), |config, edit| config.update(edit))
    }

    /// Loads a preset. Missing fields fall back to their defaults.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
