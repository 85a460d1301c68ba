//! # Render Configuration
//!
//! Tunable layout constants, animation timings and effect switches.
//!
//! A [`RenderConfig`] is chosen once at startup, either from one of the
//! presets or from a JSON override file, and handed to the renderer. Nothing
//! in the renderer reads device flags from global state.

use crate::{RenderError, RenderResult};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One row of a spacing breakpoint table.
///
/// Applies to rows holding up to `max_cards` cards. `step` is added to the
/// card width to obtain the distance between neighbouring card origins
/// (negative values overlap the cards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpacingTier {
    pub max_cards: usize,
    pub step: f32,
}

impl SpacingTier {
    pub const fn new(max_cards: usize, step: f32) -> Self {
        Self { max_cards, step }
    }
}

/// Looks up the step for `count` cards; counts beyond the last tier use it.
pub fn tier_step(tiers: &[SpacingTier], count: usize) -> f32 {
    tiers
        .iter()
        .find(|tier| count <= tier.max_cards)
        .or(tiers.last())
        .map(|tier| tier.step)
        .unwrap_or(0.0)
}

/// Wall-clock durations of the animation kinds, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationTimings {
    pub bot_play_ms: f64,
    pub card_flip_ms: f64,
    pub deal_ms: f64,
    pub three_spades_ms: f64,
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self {
            bot_play_ms: 800.0,
            card_flip_ms: 600.0,
            deal_ms: 500.0,
            three_spades_ms: 1500.0,
        }
    }
}

/// Pulse parameters for highlighted cards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlowSettings {
    pub min_intensity: f32,
    pub max_intensity: f32,
    pub three_spades_period_ms: f64,
    pub auto_win_period_ms: f64,
    pub blur: f32,
}

impl Default for GlowSettings {
    fn default() -> Self {
        Self {
            min_intensity: 0.3,
            max_intensity: 0.7,
            three_spades_period_ms: 2000.0,
            auto_win_period_ms: 1500.0,
            blur: 20.0,
        }
    }
}

/// Complete renderer configuration.
///
/// # Examples
///
/// ```
/// use tienlen_render::RenderConfig;
///
/// let config = RenderConfig::default();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.bot_display_cap, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Scale factor applied to hovered cards
    pub hover_scale: f32,
    /// Upward shift of hovered cards
    pub hover_lift: f32,
    /// Upward shift of selected player-hand cards
    pub player_selection_lift: f32,
    /// Upward shift of selected table-size cards
    pub table_selection_lift: f32,
    /// Hand spacing tiers keyed by hand size
    pub hand_tiers: Vec<SpacingTier>,
    /// Smallest step the hand squeezes to, relative to the card width
    pub hand_min_step: f32,
    /// Play-area spacing tiers keyed by the number of played cards
    pub play_area_tiers: Vec<SpacingTier>,
    /// Most card backs drawn per bot before the "+N" badge
    pub bot_display_cap: usize,
    /// Animation durations
    pub timings: AnimationTimings,
    /// Highlight pulse parameters
    pub glow: GlowSettings,
    /// Drop shadows and glows
    pub enable_shadows: bool,
    /// Ghost trail behind cards played by bots
    pub enable_trails: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::desktop()
    }
}

impl RenderConfig {
    /// Full-quality preset.
    pub fn desktop() -> Self {
        Self {
            hover_scale: 1.05,
            hover_lift: 8.0,
            player_selection_lift: 18.0,
            table_selection_lift: 15.0,
            hand_tiers: vec![
                SpacingTier::new(1, 0.0),
                SpacingTier::new(6, 20.0),
                SpacingTier::new(10, 10.0),
                SpacingTier::new(14, 0.0),
                SpacingTier::new(18, -15.0),
                SpacingTier::new(usize::MAX, -25.0),
            ],
            hand_min_step: -20.0,
            play_area_tiers: vec![
                SpacingTier::new(8, -20.0),
                SpacingTier::new(12, -30.0),
                SpacingTier::new(usize::MAX, -38.0),
            ],
            bot_display_cap: 7,
            timings: AnimationTimings::default(),
            glow: GlowSettings::default(),
            enable_shadows: true,
            enable_trails: true,
        }
    }

    /// Reduced-cost preset for phones and slow devices.
    pub fn performance() -> Self {
        Self {
            bot_display_cap: 5,
            timings: AnimationTimings {
                bot_play_ms: 500.0,
                card_flip_ms: 400.0,
                deal_ms: 300.0,
                three_spades_ms: 1000.0,
            },
            glow: GlowSettings {
                blur: 10.0,
                ..GlowSettings::default()
            },
            enable_shadows: false,
            enable_trails: false,
            ..Self::desktop()
        }
    }

    /// Picks a preset from the display size and input kind.
    pub fn detect(screen_width: f32, screen_height: f32, touch_input: bool) -> Self {
        let small = screen_width.min(screen_height) < 600.0;
        if small || touch_input {
            info!(
                "Using performance render preset ({}x{}, touch: {})",
                screen_width, screen_height, touch_input
            );
            Self::performance()
        } else {
            debug!("Using desktop render preset ({}x{})", screen_width, screen_height);
            Self::desktop()
        }
    }

    /// Parses a JSON override; missing fields keep their desktop defaults.
    pub fn from_json_str(text: &str) -> RenderResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON override file.
    pub fn load(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        info!("Loaded render configuration from {}", path.display());
        Ok(config)
    }

    /// Checks internal consistency.
    pub fn validate(&self) -> RenderResult<()> {
        check_tiers("hand_tiers", &self.hand_tiers)?;
        check_tiers("play_area_tiers", &self.play_area_tiers)?;

        if self.hover_scale < 1.0 {
            return Err(RenderError::InvalidConfig(format!(
                "hover_scale must be at least 1.0, got {}",
                self.hover_scale
            )));
        }
        if self.player_selection_lift <= 0.0 || self.table_selection_lift <= 0.0 {
            return Err(RenderError::InvalidConfig(
                "selection lifts must be positive".to_string(),
            ));
        }
        if self.bot_display_cap == 0 {
            return Err(RenderError::InvalidConfig(
                "bot_display_cap must be at least 1".to_string(),
            ));
        }

        let t = &self.timings;
        if [t.bot_play_ms, t.card_flip_ms, t.deal_ms, t.three_spades_ms]
            .iter()
            .any(|d| *d <= 0.0)
        {
            return Err(RenderError::InvalidConfig(
                "animation durations must be positive".to_string(),
            ));
        }

        let g = &self.glow;
        if !(0.0..=1.0).contains(&g.min_intensity)
            || !(0.0..=1.0).contains(&g.max_intensity)
            || g.min_intensity > g.max_intensity
        {
            return Err(RenderError::InvalidConfig(format!(
                "glow range {}..{} is not within 0..1",
                g.min_intensity, g.max_intensity
            )));
        }
        if g.three_spades_period_ms <= 0.0 || g.auto_win_period_ms <= 0.0 {
            return Err(RenderError::InvalidConfig(
                "glow periods must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

fn check_tiers(name: &str, tiers: &[SpacingTier]) -> RenderResult<()> {
    if tiers.is_empty() {
        return Err(RenderError::InvalidConfig(format!("{} is empty", name)));
    }
    if tiers.windows(2).any(|pair| pair[0].max_cards >= pair[1].max_cards) {
        return Err(RenderError::InvalidConfig(format!(
            "{} must be sorted by strictly increasing max_cards",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(RenderConfig::desktop().validate().is_ok());
        assert!(RenderConfig::performance().validate().is_ok());
    }

    #[test]
    fn test_performance_preset_is_cheaper() {
        let desktop = RenderConfig::desktop();
        let fast = RenderConfig::performance();
        assert!(!fast.enable_shadows);
        assert!(!fast.enable_trails);
        assert!(fast.timings.bot_play_ms < desktop.timings.bot_play_ms);
        assert_eq!(fast.hand_tiers, desktop.hand_tiers);
    }

    #[test]
    fn test_detect() {
        assert!(RenderConfig::detect(1280.0, 800.0, false).enable_shadows);
        assert!(!RenderConfig::detect(400.0, 800.0, false).enable_shadows);
        assert!(!RenderConfig::detect(1280.0, 800.0, true).enable_shadows);
    }

    #[test]
    fn test_tier_lookup() {
        let tiers = RenderConfig::desktop().hand_tiers;
        assert_eq!(tier_step(&tiers, 1), 0.0);
        assert_eq!(tier_step(&tiers, 6), 20.0);
        assert_eq!(tier_step(&tiers, 7), 10.0);
        assert_eq!(tier_step(&tiers, 13), 0.0);
        assert_eq!(tier_step(&tiers, 18), -15.0);
        assert_eq!(tier_step(&tiers, 19), -25.0);
        assert_eq!(tier_step(&[SpacingTier::new(3, 5.0)], 10), 5.0);
        assert_eq!(tier_step(&[], 10), 0.0);
    }

    #[test]
    fn test_partial_json_override() {
        let config = RenderConfig::from_json_str(
            r#"{ "bot_display_cap": 4, "timings": { "deal_ms": 250.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.bot_display_cap, 4);
        assert_eq!(config.timings.deal_ms, 250.0);
        assert_eq!(config.timings.bot_play_ms, 800.0);
        assert!(config.enable_shadows);
    }

    #[test]
    fn test_invalid_overrides_are_rejected() {
        let unordered = r#"{ "hand_tiers": [ { "max_cards": 6, "step": 1.0 }, { "max_cards": 3, "step": 2.0 } ] }"#;
        assert!(matches!(
            RenderConfig::from_json_str(unordered),
            Err(RenderError::InvalidConfig(_))
        ));
        assert!(RenderConfig::from_json_str(r#"{ "timings": { "deal_ms": 0.0 } }"#).is_err());
        assert!(RenderConfig::from_json_str(
            r#"{ "glow": { "min_intensity": 0.9, "max_intensity": 0.2 } }"#
        )
        .is_err());
        assert!(matches!(
            RenderConfig::from_json_str("[1, 2"),
            Err(RenderError::Serde(_))
        ));
    }
}
