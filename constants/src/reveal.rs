use std::time::Duration;

/// Default entrance animation length.
pub const REVEAL_DURATION: Duration = Duration::from_millis(500);

/// Vertical distance (logical px) an element travels while revealing.
pub const REVEAL_OFFSET_PX: f32 = 20.0;

/// Minimum visible share of an element before a reveal fires. Zero means any overlap.
pub const REVEAL_THRESHOLD: f32 = 0.0;

/// Challenge cards: delay of the first card and increment per card.
pub const CARD_BASE_DELAY: Duration = Duration::from_millis(300);
pub const CARD_STAGGER: Duration = Duration::from_millis(100);

/// Challenge section header elements.
pub const HEADER_BADGE_DELAY: Duration = Duration::ZERO;
pub const HEADER_TITLE_DELAY: Duration = Duration::from_millis(100);
pub const HEADER_LEAD_DELAY: Duration = Duration::from_millis(200);
pub const TRAILING_CTA_DELAY: Duration = Duration::from_millis(600);

/// Hero intro (mount triggered).
pub const HERO_SUBTITLE_DURATION: Duration = Duration::from_millis(800);
pub const HERO_SUBTITLE_DELAY: Duration = Duration::from_millis(200);
pub const HERO_HINT_DELAY: Duration = Duration::from_millis(500);
pub const HERO_SCENE_DURATION: Duration = Duration::from_millis(1000);
pub const HERO_SCENE_DELAY: Duration = Duration::from_millis(200);
pub const HERO_SCENE_INITIAL_SCALE: f32 = 0.8;
pub const HERO_SCENE_FINAL_SCALE: f32 = 1.25;

/// Hover motion.
pub const CARD_HOVER_LIFT_PX: f32 = 5.0;
pub const HOVER_TRANSITION: Duration = Duration::from_millis(200);
pub const CTA_HOVER_SCALE: f32 = 1.05;
pub const CTA_PRESS_SCALE: f32 = 0.95;
