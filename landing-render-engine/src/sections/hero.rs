use bevy::prelude::*;
use constants::layout::{
    BADGE_BACKGROUND, BADGE_SIZE, BODY_TEXT, CONTENT_MAX_WIDTH, CTA_PADDING_X, CTA_PADDING_Y,
    CTA_TEXT_SIZE, HEADING_TEXT, HERO_LEFT_COLUMN_PERCENT, HERO_RIGHT_COLUMN_PERCENT,
    HERO_SCENE_MAX_HEIGHT, HERO_SCENE_MIN_HEIGHT, HERO_SUBTITLE_SIZE, HERO_TITLE_SIZE, MUTED_TEXT,
    ON_PRIMARY_TEXT, PRIMARY,
};
use constants::reveal::{
    HERO_HINT_DELAY, HERO_SCENE_DELAY, HERO_SCENE_DURATION, HERO_SCENE_FINAL_SCALE,
    HERO_SCENE_INITIAL_SCALE, HERO_SUBTITLE_DELAY, HERO_SUBTITLE_DURATION,
};

use super::config::HeroConfig;
use super::{CtaButton, PageText};
use crate::engine::motion::hover::{HoverMotion, ScaledPadding};
use crate::engine::reveal::state::{RevealEntry, RevealStyle};
use crate::engine::scene::composer::SceneSurface;
use crate::engine::scroll::anchor::{EdgePair, ScrollAnchor};
use crate::engine::scroll::parallax::ParallaxOffset;
use crate::engine::scroll::progress::ScrollProgress;

/// Root node of the hero section. Carries the section's scroll anchor.
#[derive(Component)]
pub struct HeroSection;

/// Left column drifting down as the hero scrolls away.
#[derive(Component)]
pub struct HeroCopyColumn;

/// Composes the hero from its config. Owns nothing beyond the entities it
/// spawns; all behaviour comes from the components it attaches.
pub struct HeroOrchestrator;

impl HeroOrchestrator {
    pub fn spawn(
        commands: &mut Commands,
        page: Entity,
        config: &HeroConfig,
        text: &PageText,
    ) -> Entity {
        let hero = commands
            .spawn((
                HeroSection,
                Node {
                    width: Val::Percent(100.0),
                    min_height: Val::Vh(100.0),
                    align_items: AlignItems::Center,
                    justify_content: JustifyContent::Center,
                    padding: UiRect::horizontal(Val::Px(24.0)),
                    overflow: Overflow::clip(),
                    ..default()
                },
                ScrollProgress::default(),
                ChildOf(page),
            ))
            .id();
        commands.entity(hero).insert(ScrollAnchor::bind(
            hero,
            EdgePair::START_START,
            EdgePair::END_START,
        ));

        commands.entity(hero).with_children(|hero_node| {
            hero_node.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(0.0),
                    right: Val::Px(0.0),
                    top: Val::Px(0.0),
                    bottom: Val::Px(0.0),
                    ..default()
                },
                SceneSurface::particle_backdrop(config.show_particles),
            ));

            hero_node
                .spawn(Node {
                    width: Val::Percent(100.0),
                    max_width: Val::Px(CONTENT_MAX_WIDTH),
                    align_items: AlignItems::Center,
                    justify_content: JustifyContent::SpaceBetween,
                    column_gap: Val::Px(48.0),
                    ..default()
                })
                .with_children(|row| {
                    row.spawn((
                        HeroCopyColumn,
                        Node {
                            width: Val::Percent(HERO_LEFT_COLUMN_PERCENT),
                            flex_direction: FlexDirection::Column,
                            row_gap: Val::Px(28.0),
                            ..default()
                        },
                        ParallaxOffset {
                            source: hero,
                            mapping: config.parallax,
                        },
                    ))
                    .with_children(|column| spawn_copy(column, config, text));

                    row.spawn(Node {
                        width: Val::Percent(HERO_RIGHT_COLUMN_PERCENT),
                        aspect_ratio: Some(1.0),
                        max_height: Val::Px(HERO_SCENE_MAX_HEIGHT),
                        min_height: Val::Px(HERO_SCENE_MIN_HEIGHT),
                        ..default()
                    })
                    .with_children(|column| {
                        column.spawn((
                            Node {
                                width: Val::Percent(100.0),
                                height: Val::Percent(100.0),
                                ..default()
                            },
                            SceneSurface::floating_model(config.motion, config.show_model),
                            RevealEntry::on_mount()
                                .with_delay(HERO_SCENE_DELAY)
                                .with_duration(HERO_SCENE_DURATION)
                                .with_initial(RevealStyle {
                                    opacity: 0.0,
                                    offset_y: 0.0,
                                    scale: HERO_SCENE_INITIAL_SCALE,
                                })
                                .with_target(RevealStyle {
                                    scale: HERO_SCENE_FINAL_SCALE,
                                    ..RevealStyle::VISIBLE
                                }),
                        ));
                    });
                });
        });

        info!("Hero section spawned");
        hero
    }
}

fn spawn_copy(column: &mut ChildSpawnerCommands, config: &HeroConfig, text: &PageText) {
    column
        .spawn((
            Node {
                align_self: AlignSelf::FlexStart,
                padding: UiRect::axes(Val::Px(16.0), Val::Px(8.0)),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(BADGE_BACKGROUND),
            BorderColor(PRIMARY.with_alpha(0.1)),
            BorderRadius::MAX,
            RevealEntry::on_mount(),
        ))
        .with_children(|badge| {
            badge.spawn(text.bundle(&config.badge, BADGE_SIZE, PRIMARY));
        });

    column.spawn((
        text.bundle(&config.title, HERO_TITLE_SIZE, HEADING_TEXT),
        RevealEntry::on_mount(),
    ));

    column.spawn((
        text.bundle(&config.subtitle, HERO_SUBTITLE_SIZE, BODY_TEXT),
        RevealEntry::on_mount()
            .with_delay(HERO_SUBTITLE_DELAY)
            .with_duration(HERO_SUBTITLE_DURATION),
    ));

    column
        .spawn(Node {
            align_items: AlignItems::Center,
            column_gap: Val::Px(24.0),
            padding: UiRect::top(Val::Px(16.0)),
            ..default()
        })
        .with_children(|actions| {
            actions
                .spawn((
                    Button,
                    CtaButton::HERO,
                    Node {
                        padding: UiRect::axes(Val::Px(CTA_PADDING_X), Val::Px(CTA_PADDING_Y)),
                        ..default()
                    },
                    BackgroundColor(PRIMARY),
                    BorderRadius::MAX,
                    HoverMotion::cta(),
                    ScaledPadding {
                        horizontal: CTA_PADDING_X,
                        vertical: CTA_PADDING_Y,
                        font_size: CTA_TEXT_SIZE,
                    },
                ))
                .with_children(|button| {
                    button.spawn(text.bundle(&config.cta_text, CTA_TEXT_SIZE, ON_PRIMARY_TEXT));
                });

            actions.spawn((
                text.bundle(&config.cta_hint, BADGE_SIZE, MUTED_TEXT),
                RevealEntry::on_mount()
                    .with_delay(HERO_HINT_DELAY)
                    .with_initial(RevealStyle::hidden(0.0)),
            ));
        });
}
