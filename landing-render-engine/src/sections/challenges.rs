use bevy::prelude::*;
use constants::layout::{
    BADGE_BACKGROUND, BADGE_SIZE, BODY_SIZE, BODY_TEXT, CARD_BACKGROUND, CARD_BORDER,
    CARD_PADDING, CARD_TITLE_SIZE, CARD_WIDTH_PERCENT, CONTENT_MAX_WIDTH, CTA_PADDING_X,
    CTA_PADDING_Y, CTA_TEXT_SIZE, HEADING_TEXT, ICON_SIZE, ON_PRIMARY_TEXT, PRIMARY,
    SECTION_BACKGROUND, SECTION_TITLE_SIZE, SECTION_VERTICAL_PADDING,
};
use constants::reveal::{
    HEADER_BADGE_DELAY, HEADER_LEAD_DELAY, HEADER_TITLE_DELAY, TRAILING_CTA_DELAY,
};

use super::config::{ChallengeItem, ChallengesConfig};
use super::{CtaButton, PageText};
use crate::engine::motion::hover::{HoverMotion, ScaledPadding};
use crate::engine::reveal::group::{RevealGroup, RevealGroupMember};
use crate::engine::reveal::state::RevealEntry;

#[derive(Component)]
pub struct ChallengeSection;

#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct ChallengeCard {
    pub id: String,
}

/// Composes the challenge section: a header, one card per configured item
/// and a trailing call to action, all revealed as they scroll into view.
pub struct ChallengeGridOrchestrator;

impl ChallengeGridOrchestrator {
    pub fn spawn(
        commands: &mut Commands,
        page: Entity,
        config: &ChallengesConfig,
        text: &PageText,
    ) -> Entity {
        let section = commands
            .spawn((
                ChallengeSection,
                Node {
                    width: Val::Percent(100.0),
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    padding: UiRect::axes(Val::Px(24.0), Val::Px(SECTION_VERTICAL_PADDING)),
                    row_gap: Val::Px(64.0),
                    ..default()
                },
                BackgroundColor(SECTION_BACKGROUND),
                ChildOf(page),
            ))
            .id();

        commands.entity(section).with_children(|section_node| {
            section_node
                .spawn(Node {
                    max_width: Val::Px(768.0),
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(24.0),
                    ..default()
                })
                .with_children(|header| spawn_header(header, config, text));
        });

        let group = config.reveal_group();
        let grid = commands
            .spawn((
                Node {
                    width: Val::Percent(100.0),
                    max_width: Val::Px(CONTENT_MAX_WIDTH),
                    flex_wrap: FlexWrap::Wrap,
                    justify_content: JustifyContent::SpaceBetween,
                    row_gap: Val::Px(32.0),
                    ..default()
                },
                group,
                ChildOf(section),
            ))
            .id();
        for (index, item) in config.items.iter().enumerate() {
            spawn_card(commands, grid, &group, index, item, text);
        }

        commands.entity(section).with_children(|section_node| {
            section_node
                .spawn((
                    Button,
                    CtaButton::CHALLENGES,
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
                    RevealEntry::on_viewport().with_delay(TRAILING_CTA_DELAY),
                ))
                .with_children(|button| {
                    button.spawn(text.bundle(&config.trailing_cta, CTA_TEXT_SIZE, ON_PRIMARY_TEXT));
                });
        });

        info!("Challenge section spawned with {} cards", config.items.len());
        section
    }
}

fn spawn_header(header: &mut ChildSpawnerCommands, config: &ChallengesConfig, text: &PageText) {
    header
        .spawn((
            Node {
                padding: UiRect::axes(Val::Px(16.0), Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(BADGE_BACKGROUND),
            BorderRadius::MAX,
            RevealEntry::on_viewport().with_delay(HEADER_BADGE_DELAY),
        ))
        .with_children(|badge| {
            badge.spawn(text.bundle(&config.badge, BADGE_SIZE, PRIMARY));
        });

    header.spawn((
        text.bundle(&config.heading, SECTION_TITLE_SIZE, HEADING_TEXT),
        TextLayout::new_with_justify(JustifyText::Center),
        RevealEntry::on_viewport().with_delay(HEADER_TITLE_DELAY),
    ));

    header.spawn((
        text.bundle(&config.lead, CARD_TITLE_SIZE, BODY_TEXT),
        TextLayout::new_with_justify(JustifyText::Center),
        RevealEntry::on_viewport().with_delay(HEADER_LEAD_DELAY),
    ));
}

fn spawn_card(
    commands: &mut Commands,
    grid: Entity,
    group: &RevealGroup,
    index: usize,
    item: &ChallengeItem,
    text: &PageText,
) {
    commands
        .spawn((
            ChallengeCard {
                id: item.id.clone(),
            },
            Node {
                width: Val::Percent(CARD_WIDTH_PERCENT),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(16.0),
                padding: UiRect::all(Val::Px(CARD_PADDING)),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(CARD_BACKGROUND),
            BorderColor(CARD_BORDER),
            BorderRadius::all(Val::Px(24.0)),
            Interaction::default(),
            HoverMotion::card(),
            group.member_entry(index, RevealEntry::on_viewport()),
            RevealGroupMember { group: grid, index },
            ChildOf(grid),
        ))
        .with_children(|card| {
            card.spawn((
                Node {
                    width: Val::Px(56.0),
                    height: Val::Px(56.0),
                    align_items: AlignItems::Center,
                    justify_content: JustifyContent::Center,
                    ..default()
                },
                BackgroundColor(BADGE_BACKGROUND),
                BorderRadius::all(Val::Px(16.0)),
            ))
            .with_children(|tile| {
                tile.spawn(text.bundle(item.icon.glyph(), ICON_SIZE, PRIMARY));
            });
            card.spawn(text.bundle(&item.title, CARD_TITLE_SIZE, HEADING_TEXT));
            card.spawn(text.bundle(&item.description, BODY_SIZE, BODY_TEXT));
        });
}
