use bevy::prelude::*;
use constants::reveal::{CARD_HOVER_LIFT_PX, CTA_HOVER_SCALE, CTA_PRESS_SCALE, HOVER_TRANSITION};
use std::time::Duration;

/// Pointer-driven lift and scale of an interactive node.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HoverMotion {
    hover_lift: f32,
    hover_scale: f32,
    press_scale: f32,
    transition: Duration,
    lift: f32,
    scale: f32,
}

impl HoverMotion {
    pub fn lift(hover_lift: f32) -> Self {
        Self {
            hover_lift,
            hover_scale: 1.0,
            press_scale: 1.0,
            transition: HOVER_TRANSITION,
            lift: 0.0,
            scale: 1.0,
        }
    }

    pub fn scale(hover_scale: f32, press_scale: f32) -> Self {
        Self {
            hover_lift: 0.0,
            hover_scale,
            press_scale,
            transition: HOVER_TRANSITION,
            lift: 0.0,
            scale: 1.0,
        }
    }

    pub fn card() -> Self {
        Self::lift(CARD_HOVER_LIFT_PX)
    }

    pub fn cta() -> Self {
        Self::scale(CTA_HOVER_SCALE, CTA_PRESS_SCALE)
    }

    pub fn current_lift(&self) -> f32 {
        self.lift
    }

    pub fn current_scale(&self) -> f32 {
        self.scale
    }

    fn target(&self, interaction: Interaction) -> (f32, f32) {
        match interaction {
            Interaction::None => (0.0, 1.0),
            Interaction::Hovered => (self.hover_lift, self.hover_scale),
            Interaction::Pressed => (self.hover_lift, self.press_scale),
        }
    }

    /// Move towards the pose for `interaction`. Returns true if anything moved.
    pub fn step(&mut self, interaction: Interaction, delta: Duration) -> bool {
        let (target_lift, target_scale) = self.target(interaction);
        let fraction = if self.transition.is_zero() {
            1.0
        } else {
            (delta.as_secs_f32() / self.transition.as_secs_f32()).min(1.0)
        };

        let lift_step = self.hover_lift.abs().max(f32::EPSILON) * fraction;
        let scale_span = (self.hover_scale - 1.0)
            .abs()
            .max((self.press_scale - 1.0).abs())
            .max(f32::EPSILON);
        let scale_step = scale_span * fraction;

        let lift = approach(self.lift, target_lift, lift_step);
        let scale = approach(self.scale, target_scale, scale_step);
        let moved = lift != self.lift || scale != self.scale;
        self.lift = lift;
        self.scale = scale;
        moved
    }
}

fn approach(current: f32, target: f32, max_step: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_step {
        target
    } else {
        current + max_step * diff.signum()
    }
}

/// Padding and text size a scaling node returns to at rest.
#[derive(Component, Debug, Clone, Copy)]
pub struct ScaledPadding {
    pub horizontal: f32,
    pub vertical: f32,
    pub font_size: f32,
}

pub fn step_hover_motion(time: Res<Time>, mut query: Query<(&Interaction, &mut HoverMotion)>) {
    for (interaction, mut motion) in &mut query {
        let mut next = *motion;
        if next.step(*interaction, time.delta()) {
            *motion = next;
        }
    }
}

/// Grow padding and label size with the hover scale.
pub fn apply_hover_scale(
    mut nodes: Query<
        (&HoverMotion, &ScaledPadding, &mut Node, Option<&Children>),
        Changed<HoverMotion>,
    >,
    mut fonts: Query<&mut TextFont>,
) {
    for (motion, base, mut node, children) in &mut nodes {
        let scale = motion.current_scale();
        node.padding = UiRect::axes(
            Val::Px(base.horizontal * scale),
            Val::Px(base.vertical * scale),
        );
        for child in children.into_iter().flatten() {
            if let Ok(mut font) = fonts.get_mut(*child) {
                font.font_size = base.font_size * scale;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_lifts_over_the_transition_and_settles() {
        let mut motion = HoverMotion::card();
        assert!(motion.step(Interaction::Hovered, Duration::from_millis(100)));
        assert!((motion.current_lift() - CARD_HOVER_LIFT_PX / 2.0).abs() < 1e-4);
        motion.step(Interaction::Hovered, Duration::from_millis(150));
        assert_eq!(motion.current_lift(), CARD_HOVER_LIFT_PX);
        assert!(!motion.step(Interaction::Hovered, Duration::from_millis(16)));

        motion.step(Interaction::None, Duration::from_secs(1));
        assert_eq!(motion.current_lift(), 0.0);
    }

    #[test]
    fn cta_scales_up_on_hover_and_down_on_press() {
        let mut motion = HoverMotion::cta();
        motion.step(Interaction::Hovered, Duration::from_secs(1));
        assert_eq!(motion.current_scale(), CTA_HOVER_SCALE);
        motion.step(Interaction::Pressed, Duration::from_secs(1));
        assert_eq!(motion.current_scale(), CTA_PRESS_SCALE);
    }
}
