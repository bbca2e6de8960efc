use bevy::prelude::*;

pub const PAGE_BACKGROUND: Color = Color::srgb(0.98, 0.98, 0.99);
pub const SECTION_BACKGROUND: Color = Color::srgb(0.96, 0.97, 0.98);
pub const CARD_BACKGROUND: Color = Color::WHITE;
pub const CARD_BORDER: Color = Color::srgb(0.95, 0.96, 0.97);
pub const PRIMARY: Color = Color::srgb(0.39, 0.40, 0.95);
pub const BADGE_BACKGROUND: Color = Color::srgba(0.39, 0.40, 0.95, 0.08);
pub const HEADING_TEXT: Color = Color::srgb(0.07, 0.09, 0.15);
pub const BODY_TEXT: Color = Color::srgb(0.29, 0.33, 0.39);
pub const MUTED_TEXT: Color = Color::srgb(0.42, 0.45, 0.50);
pub const ON_PRIMARY_TEXT: Color = Color::WHITE;

pub const HERO_TITLE_SIZE: f32 = 56.0;
pub const HERO_SUBTITLE_SIZE: f32 = 20.0;
pub const SECTION_TITLE_SIZE: f32 = 44.0;
pub const CARD_TITLE_SIZE: f32 = 20.0;
pub const BODY_SIZE: f32 = 16.0;
pub const BADGE_SIZE: f32 = 15.0;
pub const ICON_SIZE: f32 = 28.0;

/// Share of the hero row taken by the text column; the 3D column takes the rest.
pub const HERO_LEFT_COLUMN_PERCENT: f32 = 45.0;
pub const HERO_RIGHT_COLUMN_PERCENT: f32 = 55.0;
pub const HERO_SCENE_MAX_HEIGHT: f32 = 600.0;
pub const HERO_SCENE_MIN_HEIGHT: f32 = 300.0;

pub const CONTENT_MAX_WIDTH: f32 = 1280.0;
pub const SECTION_VERTICAL_PADDING: f32 = 128.0;
pub const CARD_WIDTH_PERCENT: f32 = 31.0;
pub const CARD_PADDING: f32 = 32.0;
pub const CTA_PADDING_X: f32 = 32.0;
pub const CTA_PADDING_Y: f32 = 16.0;
pub const CTA_TEXT_SIZE: f32 = 18.0;

/// Scroll distance of one wheel line / one page key press (logical px).
pub const SCROLL_LINE_PX: f32 = 40.0;
pub const SCROLL_PAGE_FRACTION: f32 = 0.9;
