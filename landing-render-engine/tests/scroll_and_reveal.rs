use bevy::ecs::system::RunSystemOnce;
use bevy::input::InputPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::window::{PrimaryWindow, WindowResolution};
use constants::reveal::REVEAL_OFFSET_PX;
use std::time::Duration;

use landing_render_engine::engine::reveal::RevealPlugin;
use landing_render_engine::engine::reveal::state::{RevealEntry, RevealPhase};
use landing_render_engine::engine::scroll::ScrollPlugin;
use landing_render_engine::engine::scroll::anchor::{EdgePair, ScrollAnchor};
use landing_render_engine::engine::scroll::page_scroll::{PageRoot, PageScroll};
use landing_render_engine::engine::scroll::parallax::{MappingRange, OutputUnit, ParallaxOffset};
use landing_render_engine::engine::scroll::progress::{Progress, ScrollProgress};
use landing_render_engine::sections::PageText;
use landing_render_engine::sections::config::HeroConfig;
use landing_render_engine::sections::hero::{HeroCopyColumn, HeroOrchestrator};

const FRAME: Duration = Duration::from_millis(16);

fn page_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, InputPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .add_plugins((ScrollPlugin, RevealPlugin));
    app.world_mut().spawn((
        Window {
            resolution: WindowResolution::new(1280.0, 800.0),
            ..default()
        },
        PrimaryWindow,
    ));
    app
}

/// Stand-in for the UI layout pass: a node of `size` whose top edge sits at
/// `page_top` in page space, moved up by the scroll the layout last applied.
fn place(app: &mut App, entity: Entity, page_top: f32, size: Vec2) {
    let scrolled = app.world().resource::<PageScroll>().layout_offset();
    let center = Vec2::new(size.x / 2.0, page_top - scrolled + size.y / 2.0);
    app.world_mut().entity_mut(entity).insert((
        ComputedNode {
            size,
            inverse_scale_factor: 1.0,
            ..default()
        },
        GlobalTransform::from_translation(center.extend(0.0)),
    ));
}

fn top(app: &App, entity: Entity) -> Val {
    app.world().get::<Node>(entity).unwrap().top
}

fn phase(app: &App, entity: Entity) -> RevealPhase {
    app.world().get::<RevealEntry>(entity).unwrap().phase()
}

fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

#[test]
fn hero_column_drifts_a_quarter_of_its_height_at_half_progress() {
    let mut app = page_app();
    let (page, hero) = app
        .world_mut()
        .run_system_once(|mut commands: Commands| {
            let page = commands.spawn((PageRoot, Node::default())).id();
            let hero = HeroOrchestrator::spawn(
                &mut commands,
                page,
                &HeroConfig::default(),
                &PageText::default(),
            );
            (page, hero)
        })
        .unwrap();
    let column = app
        .world_mut()
        .query_filtered::<Entity, With<HeroCopyColumn>>()
        .single(app.world())
        .unwrap();

    place(&mut app, page, 0.0, Vec2::new(1280.0, 3000.0));
    place(&mut app, hero, 0.0, Vec2::new(1280.0, 1000.0));
    place(&mut app, column, 200.0, Vec2::new(560.0, 400.0));
    app.update();
    assert_eq!(top(&app, column), Val::Px(0.0));

    app.world_mut().resource_mut::<PageScroll>().scroll_to(500.0);
    app.update();
    assert_eq!(
        app.world().get::<ScrollProgress>(hero).unwrap().current,
        Some(Progress::new(0.5))
    );
    assert_eq!(top(&app, column), Val::Px(100.0));
    assert_eq!(top(&app, page), Val::Px(-500.0));

    // The next layout pass moves everything up by the applied scroll.
    place(&mut app, hero, 0.0, Vec2::new(1280.0, 1000.0));
    place(&mut app, column, 200.0, Vec2::new(560.0, 400.0));
    app.update();
    assert_eq!(top(&app, column), Val::Px(100.0));

    app.world_mut().resource_mut::<PageScroll>().scroll_to(2000.0);
    app.update();
    assert_eq!(top(&app, column), Val::Px(200.0));
}

#[test]
fn unlaid_anchor_holds_the_range_start() {
    let mut app = page_app();
    let container = app
        .world_mut()
        .spawn((Node::default(), ScrollProgress::default()))
        .id();
    app.world_mut().entity_mut(container).insert(ScrollAnchor::bind(
        container,
        EdgePair::START_START,
        EdgePair::END_START,
    ));
    let target = app
        .world_mut()
        .spawn((
            Node::default(),
            ParallaxOffset {
                source: container,
                mapping: MappingRange::new([30.0, 80.0], OutputUnit::Px),
            },
        ))
        .id();

    run_frames(&mut app, 3);
    assert_eq!(app.world().get::<ScrollProgress>(container).unwrap().current, None);
    assert_eq!(top(&app, target), Val::Px(30.0));
}

#[test]
fn viewport_reveal_settles_opaque_at_rest() {
    let mut app = page_app();
    let card = app
        .world_mut()
        .spawn((
            Node::default(),
            BackgroundColor(Color::WHITE),
            RevealEntry::on_viewport().with_delay(Duration::from_millis(300)),
        ))
        .id();
    let label = app
        .world_mut()
        .spawn((Node::default(), TextColor(Color::BLACK), ChildOf(card)))
        .id();

    // Below the fold: stays hidden and pushed down.
    place(&mut app, card, 1200.0, Vec2::new(400.0, 200.0));
    run_frames(&mut app, 5);
    assert_eq!(phase(&app, card), RevealPhase::Unrevealed);
    assert_eq!(top(&app, card), Val::Px(REVEAL_OFFSET_PX));
    assert_eq!(app.world().get::<BackgroundColor>(card).unwrap().0.alpha(), 0.0);
    assert_eq!(app.world().get::<TextColor>(label).unwrap().0.alpha(), 0.0);

    place(&mut app, card, 300.0, Vec2::new(400.0, 200.0));
    app.update();
    assert!(matches!(phase(&app, card), RevealPhase::Revealing { .. }));

    // Still inside the delay.
    run_frames(&mut app, 5);
    assert_eq!(top(&app, card), Val::Px(REVEAL_OFFSET_PX));

    // Delay plus duration is 800 ms; leave a margin of a few frames.
    run_frames(&mut app, 60);
    assert_eq!(phase(&app, card), RevealPhase::Revealed);
    assert_eq!(top(&app, card), Val::Px(0.0));
    assert_eq!(app.world().get::<BackgroundColor>(card).unwrap().0.alpha(), 1.0);
    assert_eq!(app.world().get::<TextColor>(label).unwrap().0.alpha(), 1.0);

    // Leaving the viewport again changes nothing.
    place(&mut app, card, 5000.0, Vec2::new(400.0, 200.0));
    run_frames(&mut app, 5);
    assert_eq!(phase(&app, card), RevealPhase::Revealed);
    assert_eq!(top(&app, card), Val::Px(0.0));
}

#[test]
fn mount_reveals_run_without_layout() {
    let mut app = page_app();
    let badge = app
        .world_mut()
        .spawn((
            Node::default(),
            TextColor(Color::BLACK),
            RevealEntry::on_mount().with_delay(Duration::from_millis(200)),
        ))
        .id();

    app.update();
    assert!(matches!(phase(&app, badge), RevealPhase::Revealing { .. }));

    run_frames(&mut app, 60);
    assert_eq!(phase(&app, badge), RevealPhase::Revealed);
    assert_eq!(top(&app, badge), Val::Px(0.0));
    assert_eq!(app.world().get::<TextColor>(badge).unwrap().0.alpha(), 1.0);
}
