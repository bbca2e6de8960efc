use bevy::prelude::*;
use constants::reveal::{CARD_BASE_DELAY, CARD_STAGGER};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

use crate::engine::motion::float_motion::MotionParams;
use crate::engine::reveal::group::RevealGroup;
use crate::engine::scroll::parallax::{MappingRange, OutputUnit};

/// Copy and tuning of the whole landing page, loaded from JSON.
///
/// Every field has a default, so a partial file only overrides what it
/// names. An explicit empty `items` list renders an empty grid.
#[derive(Asset, TypePath, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    pub hero: HeroConfig,
    pub challenges: ChallengesConfig,
    /// Font asset for all page text. The built-in font is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub badge: String,
    pub title: String,
    pub subtitle: String,
    pub cta_text: String,
    pub cta_hint: String,
    /// Scroll progress of the hero onto the left column's downward offset.
    pub parallax: MappingRange,
    pub motion: MotionParams,
    pub show_model: bool,
    pub show_particles: bool,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            badge: "The future is already here".into(),
            title: "Get an AI strategy in 5 minutes".into(),
            subtitle: "Our service analyses your company's data and shows which tasks \
                       can be automated with AI right now."
                .into(),
            cta_text: "Run the diagnostic".into(),
            cta_hint: "Free, no sign-up".into(),
            parallax: MappingRange::new([0.0, 50.0], OutputUnit::Percent),
            motion: MotionParams::hero(),
            show_model: true,
            show_particles: true,
        }
    }
}

impl HeroConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.motion.is_valid() {
            return Err(ConfigError::InvalidMotion(self.motion));
        }
        let [d0, d1] = self.parallax.domain;
        if !d0.is_finite() || !d1.is_finite() || d0 == d1 {
            return Err(ConfigError::DegenerateParallaxDomain(self.parallax.domain));
        }
        if !self.parallax.output.iter().all(|v| v.is_finite()) {
            return Err(ConfigError::InvalidParallaxOutput(self.parallax.output));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChallengesConfig {
    pub badge: String,
    pub heading: String,
    pub lead: String,
    pub items: Vec<ChallengeItem>,
    pub trailing_cta: String,
    pub base_delay_ms: u64,
    pub stagger_ms: u64,
}

impl Default for ChallengesConfig {
    fn default() -> Self {
        Self {
            badge: "AI transformation".into(),
            heading: "Why you need an AI strategy".into(),
            lead: "A structured approach to bringing artificial intelligence into your business"
                .into(),
            items: ChallengeItem::defaults(),
            trailing_cta: "Start the rollout".into(),
            base_delay_ms: CARD_BASE_DELAY.as_millis() as u64,
            stagger_ms: CARD_STAGGER.as_millis() as u64,
        }
    }
}

impl ChallengesConfig {
    pub fn reveal_group(&self) -> RevealGroup {
        RevealGroup {
            base_delay: Duration::from_millis(self.base_delay_ms),
            stagger: Duration::from_millis(self.stagger_ms),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(item.id.as_str()) {
                return Err(ConfigError::DuplicateItemId(item.id.clone()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeItem {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: ChallengeIcon,
}

impl ChallengeItem {
    fn new(id: &str, title: &str, description: &str, icon: ChallengeIcon) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            icon,
        }
    }

    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(
                "contractors",
                "Hard to find contractors",
                "We carefully select and verify contractors, guaranteeing quality work",
                ChallengeIcon::Search,
            ),
            Self::new(
                "starting-point",
                "Not sure where to start",
                "We provide a clear roadmap for bringing AI into your business",
                ChallengeIcon::Roadmap,
            ),
            Self::new(
                "rollout-plan",
                "No clear implementation plan",
                "A structured approach to transforming business processes",
                ChallengeIcon::Checklist,
            ),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeIcon {
    #[default]
    Search,
    Roadmap,
    Checklist,
}

impl ChallengeIcon {
    /// Glyph drawn inside the card's icon tile.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Search => "?",
            Self::Roadmap => "</>",
            Self::Checklist => "[=]",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("hero motion parameters must be finite with a non-negative speed, got {0:?}")]
    InvalidMotion(MotionParams),
    #[error("parallax domain must span a finite, non-empty interval, got {0:?}")]
    DegenerateParallaxDomain([f32; 2]),
    #[error("parallax output must be finite, got {0:?}")]
    InvalidParallaxOutput([f32; 2]),
    #[error("challenge item id `{0}` is used more than once")]
    DuplicateItemId(String),
    #[error("landing config could not be parsed: {0}")]
    Parse(String),
}

impl LandingConfig {
    /// First problem found, if any.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.hero.validate()?;
        self.challenges.validate()
    }

    /// Replace every section that fails validation with its defaults.
    /// Returns the cleaned config and the problems that were fixed.
    pub fn sanitized(mut self) -> (Self, Vec<ConfigError>) {
        let mut problems = Vec::new();
        if let Err(error) = self.hero.validate() {
            problems.push(error);
            self.hero = HeroConfig::default();
        }
        if let Err(error) = self.challenges.validate() {
            problems.push(error);
            self.challenges = ChallengesConfig::default();
        }
        (self, problems)
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self, ConfigError> {
        serde_json::from_value(value).map_err(|error| ConfigError::Parse(error.to_string()))
    }
}

/// Config the page is currently built from.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActiveLandingConfig(pub LandingConfig);

/// The page should be rebuilt from a new config.
#[derive(Event, Debug, Clone)]
pub struct LandingConfigChanged(pub LandingConfig);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_take_defaults() {
        let config = LandingConfig::from_json(json!({
            "hero": { "title": "Custom title" }
        }))
        .unwrap();
        assert_eq!(config.hero.title, "Custom title");
        assert_eq!(config.hero.cta_text, HeroConfig::default().cta_text);
        assert_eq!(config.challenges.items.len(), 3);
        assert_eq!(config.hero.parallax.output, [0.0, 50.0]);
    }

    #[test]
    fn partial_nested_objects_keep_the_rest() {
        let config = LandingConfig::from_json(json!({
            "hero": {
                "title": "Custom title",
                "motion": { "speed": 2.0 },
                "parallax": { "output": [0.0, 30.0] }
            }
        }))
        .unwrap();
        assert_eq!(config.hero.title, "Custom title");
        assert_eq!(config.hero.motion.speed, 2.0);
        assert_eq!(
            config.hero.motion.rotation_intensity,
            MotionParams::hero().rotation_intensity
        );
        assert_eq!(
            config.hero.motion.float_intensity,
            MotionParams::hero().float_intensity
        );
        assert_eq!(
            config.hero.motion.floating_range,
            MotionParams::hero().floating_range
        );
        assert_eq!(config.hero.parallax.domain, [0.0, 1.0]);
        assert_eq!(config.hero.parallax.output, [0.0, 30.0]);
        assert_eq!(config.hero.parallax.unit, OutputUnit::None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn explicit_empty_items_stay_empty() {
        let config = LandingConfig::from_json(json!({ "challenges": { "items": [] } })).unwrap();
        assert!(config.challenges.items.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_group_matches_card_timing() {
        let group = ChallengesConfig::default().reveal_group();
        assert_eq!(group.delay_for(0), Duration::from_millis(300));
        assert_eq!(group.delay_for(2), Duration::from_millis(500));
    }

    #[test]
    fn invalid_sections_fall_back_independently() {
        let mut config = LandingConfig::default();
        config.hero.motion.speed = f32::NAN;
        config.challenges.heading = "Kept".into();
        let (clean, problems) = config.sanitized();
        assert_eq!(problems.len(), 1);
        assert!(matches!(problems[0], ConfigError::InvalidMotion(_)));
        assert_eq!(clean.hero, HeroConfig::default());
        assert_eq!(clean.challenges.heading, "Kept");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut config = ChallengesConfig::default();
        config.items.push(config.items[0].clone());
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateItemId("contractors".into()))
        );
    }

    #[test]
    fn unknown_shapes_report_a_parse_error() {
        let error = LandingConfig::from_json(json!({ "hero": { "title": 5 } })).unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
    }
}
