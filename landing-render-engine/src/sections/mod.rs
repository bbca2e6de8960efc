//! The two page sections and the page root they live in.
//!
//! Orchestrators only compose engine components from configuration. Scroll,
//! reveal, motion and scene behaviour is driven entirely by the engine
//! plugins once the entities exist.

/// Challenge section: header, staggered card grid, trailing call to action.
pub mod challenges;

/// Landing page copy and tuning, its validation and the active config.
pub mod config;

/// Hero section: parallax copy column, floating model and particle backdrop.
pub mod hero;

use bevy::prelude::*;

use crate::engine::core::app_state::AppState;
use crate::engine::reveal::RevealPipeline;
use crate::engine::scroll::ScrollPipeline;
use crate::engine::scroll::page_scroll::{PageRoot, PageScroll};
use challenges::ChallengeGridOrchestrator;
use config::{ActiveLandingConfig, LandingConfig, LandingConfigChanged};
use hero::HeroOrchestrator;

/// Font shared by every text node of the page.
#[derive(Debug, Clone, Default)]
pub struct PageText {
    font: Handle<Font>,
}

impl PageText {
    pub fn new(font: Handle<Font>) -> Self {
        Self { font }
    }

    pub fn bundle(&self, value: &str, size: f32, colour: Color) -> (Text, TextFont, TextColor) {
        (
            Text::new(value),
            TextFont {
                font: self.font.clone(),
                font_size: size,
                ..default()
            },
            TextColor(colour),
        )
    }
}

/// Call to action button, tagged with where on the page it sits.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtaButton(pub &'static str);

impl CtaButton {
    pub const HERO: Self = Self("hero");
    pub const CHALLENGES: Self = Self("challenges");
}

#[derive(Event, Debug, Clone, Copy)]
pub struct CtaClicked {
    pub source: &'static str,
}

pub struct SectionsPlugin;

impl Plugin for SectionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveLandingConfig>()
            .add_event::<LandingConfigChanged>()
            .add_event::<CtaClicked>()
            .add_systems(OnEnter(AppState::Running), spawn_page)
            .add_systems(
                Update,
                (
                    rebuild_page
                        .before(ScrollPipeline)
                        .before(RevealPipeline)
                        .run_if(in_state(AppState::Running)),
                    announce_cta_presses,
                ),
            );
    }
}

/// Spawn the page root and both sections. Returns the root.
pub fn build_page(commands: &mut Commands, config: &LandingConfig, text: &PageText) -> Entity {
    let page = commands
        .spawn((
            PageRoot,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                top: Val::Px(0.0),
                ..default()
            },
        ))
        .id();

    HeroOrchestrator::spawn(commands, page, &config.hero, text);
    ChallengeGridOrchestrator::spawn(commands, page, &config.challenges, text);
    page
}

fn page_text(config: &LandingConfig, asset_server: Option<&AssetServer>) -> PageText {
    match (&config.font, asset_server) {
        (Some(path), Some(server)) => PageText::new(server.load(path)),
        _ => PageText::default(),
    }
}

pub fn spawn_page(
    mut commands: Commands,
    config: Res<ActiveLandingConfig>,
    asset_server: Option<Res<AssetServer>>,
) {
    let text = page_text(&config.0, asset_server.as_deref());
    build_page(&mut commands, &config.0, &text);
}

/// Replace the whole page when a new config arrives. Despawning the old root
/// releases its scene handles, which cancels their frame callbacks.
pub fn rebuild_page(
    mut commands: Commands,
    mut changes: EventReader<LandingConfigChanged>,
    mut active: ResMut<ActiveLandingConfig>,
    mut page_scroll: ResMut<PageScroll>,
    roots: Query<Entity, With<PageRoot>>,
    asset_server: Option<Res<AssetServer>>,
) {
    let Some(LandingConfigChanged(config)) = changes.read().last() else {
        return;
    };

    for root in &roots {
        commands.entity(root).despawn();
    }
    page_scroll.scroll_to(0.0);

    active.0 = config.clone();
    let text = page_text(&active.0, asset_server.as_deref());
    build_page(&mut commands, &active.0, &text);
    info!("Landing page rebuilt from new config");
}

pub fn announce_cta_presses(
    buttons: Query<(&Interaction, &CtaButton), Changed<Interaction>>,
    mut clicked: EventWriter<CtaClicked>,
) {
    for (interaction, button) in &buttons {
        if *interaction == Interaction::Pressed {
            debug!("CTA pressed: {}", button.0);
            clicked.write(CtaClicked { source: button.0 });
        }
    }
}
