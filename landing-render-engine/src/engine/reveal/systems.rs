use bevy::prelude::*;
use std::time::Duration;

use super::intersection::{IntersectionSource, LayoutIntersections};
use super::state::{RevealEntry, RevealPhase, RevealTrigger};
use crate::engine::motion::hover::HoverMotion;

/// An entry left `Unrevealed`. Its animation starts `delay` later.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct RevealFired {
    pub entity: Entity,
    pub delay: Duration,
}

/// An entry reached `Revealed`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealCompleted {
    pub entity: Entity,
}

/// Alphas a faded node returns to once fully revealed.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct FadeBase {
    background: Option<f32>,
    border: Option<f32>,
    text: Option<f32>,
}

/// Feed intersection samples from `source` to every viewport-triggered entry
/// still waiting to fire.
pub fn observe_entries<'a, S: IntersectionSource>(
    source: &S,
    now: Duration,
    entries: impl IntoIterator<Item = (Entity, Mut<'a, RevealEntry>)>,
) -> Vec<RevealFired> {
    let mut fired = Vec::new();
    for (entity, mut entry) in entries {
        if entry.trigger != RevealTrigger::OnViewport || entry.has_fired() {
            continue;
        }
        let Some(sample) = source.observe(entity) else {
            continue;
        };
        if entry.observe(sample, now) {
            fired.push(RevealFired {
                entity,
                delay: entry.delay,
            });
        }
    }
    fired
}

pub fn mount_reveals(
    time: Res<Time>,
    mut entries: Query<(Entity, &mut RevealEntry)>,
    mut fired: EventWriter<RevealFired>,
) {
    let now = time.elapsed();
    for (entity, mut entry) in &mut entries {
        if entry.trigger == RevealTrigger::OnMount
            && entry.phase() == RevealPhase::Unrevealed
            && entry.mount(now)
        {
            fired.write(RevealFired {
                entity,
                delay: entry.delay,
            });
        }
    }
}

pub fn observe_reveal_targets(
    time: Res<Time>,
    intersections: LayoutIntersections,
    mut entries: Query<(Entity, &mut RevealEntry)>,
    mut fired: EventWriter<RevealFired>,
) {
    let events = observe_entries(&intersections, time.elapsed(), entries.iter_mut());
    if !events.is_empty() {
        fired.write_batch(events);
    }
}

pub fn advance_reveals(
    time: Res<Time>,
    mut entries: Query<(Entity, &mut RevealEntry)>,
    mut completed: EventWriter<RevealCompleted>,
) {
    let now = time.elapsed();
    for (entity, mut entry) in &mut entries {
        if !matches!(entry.phase(), RevealPhase::Revealing { .. }) {
            continue;
        }
        if entry.tick(now) {
            completed.write(RevealCompleted { entity });
        }
    }
}

/// Write the interpolated offset into `Node::top`, lifted by any hover
/// motion on the same node.
pub fn apply_reveal_offsets(
    time: Res<Time>,
    mut nodes: Query<(&RevealEntry, Option<&HoverMotion>, &mut Node)>,
) {
    let now = time.elapsed();
    for (entry, hover, mut node) in &mut nodes {
        let lift = hover.map_or(0.0, HoverMotion::current_lift);
        let top = Val::Px(entry.style_at(now).offset_y - lift);
        if node.top != top {
            node.top = top;
        }
    }
}

/// Fade a revealed node and all of its descendants.
pub fn apply_reveal_opacity(
    mut commands: Commands,
    time: Res<Time>,
    entries: Query<(Entity, &RevealEntry)>,
    children: Query<&Children>,
    mut colours: Query<(
        Option<&FadeBase>,
        Option<&mut BackgroundColor>,
        Option<&mut BorderColor>,
        Option<&mut TextColor>,
    )>,
) {
    let now = time.elapsed();
    for (root, entry) in &entries {
        let opacity = entry.style_at(now).opacity.clamp(0.0, 1.0);
        for entity in std::iter::once(root).chain(children.iter_descendants(root)) {
            if entity != root && entries.contains(entity) {
                continue;
            }
            let Ok((base, background, border, text)) = colours.get_mut(entity) else {
                continue;
            };
            if background.is_none() && border.is_none() && text.is_none() {
                continue;
            }

            let base = match base {
                Some(base) => *base,
                None => {
                    let captured = FadeBase {
                        background: background.as_ref().map(|c| c.0.alpha()),
                        border: border.as_ref().map(|c| c.0.alpha()),
                        text: text.as_ref().map(|c| c.0.alpha()),
                    };
                    commands.entity(entity).insert(captured);
                    captured
                }
            };

            if let (Some(mut colour), Some(alpha)) = (background, base.background) {
                if let Some(faded) = faded(colour.0, alpha * opacity) {
                    colour.0 = faded;
                }
            }
            if let (Some(mut colour), Some(alpha)) = (border, base.border) {
                if let Some(faded) = faded(colour.0, alpha * opacity) {
                    colour.0 = faded;
                }
            }
            if let (Some(mut colour), Some(alpha)) = (text, base.text) {
                if let Some(faded) = faded(colour.0, alpha * opacity) {
                    colour.0 = faded;
                }
            }
        }
    }
}

/// `colour` with `alpha`, or `None` when it already has it.
fn faded(colour: Color, alpha: f32) -> Option<Color> {
    ((colour.alpha() - alpha).abs() > f32::EPSILON).then(|| colour.with_alpha(alpha))
}
