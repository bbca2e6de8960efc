use bevy::prelude::*;
use constants::reveal::{REVEAL_DURATION, REVEAL_OFFSET_PX, REVEAL_THRESHOLD};
use serde::Serialize;
use std::time::Duration;

use super::intersection::IntersectionSample;
use crate::engine::scroll::parallax::Easing;

/// What starts an entrance animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealTrigger {
    /// Fires as soon as the element exists.
    OnMount,
    /// Fires the first time the element intersects the viewport.
    OnViewport,
}

/// Visual parameters interpolated by a reveal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStyle {
    pub opacity: f32,
    /// Downward offset in logical px.
    pub offset_y: f32,
    pub scale: f32,
}

impl RevealStyle {
    pub const VISIBLE: Self = Self {
        opacity: 1.0,
        offset_y: 0.0,
        scale: 1.0,
    };

    /// Transparent and pushed down by `offset_y`.
    pub const fn hidden(offset_y: f32) -> Self {
        Self {
            opacity: 0.0,
            offset_y,
            scale: 1.0,
        }
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            opacity: self.opacity + (other.opacity - self.opacity) * t,
            offset_y: self.offset_y + (other.offset_y - self.offset_y) * t,
            scale: self.scale + (other.scale - self.scale) * t,
        }
    }
}

/// Lifecycle of one entrance animation. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Unrevealed,
    /// Fired at `started_at`; the animation runs after the entry's delay.
    Revealing { started_at: Duration },
    Revealed,
}

impl RevealPhase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unrevealed => "unrevealed",
            Self::Revealing { .. } => "revealing",
            Self::Revealed => "revealed",
        }
    }
}

/// One-shot entrance animation of a page element.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct RevealEntry {
    phase: RevealPhase,
    pub delay: Duration,
    pub duration: Duration,
    pub initial: RevealStyle,
    pub target: RevealStyle,
    /// Minimum visible fraction. Zero means any overlap.
    pub threshold: f32,
    pub trigger: RevealTrigger,
    pub easing: Easing,
}

impl RevealEntry {
    pub fn new(trigger: RevealTrigger) -> Self {
        Self {
            phase: RevealPhase::Unrevealed,
            delay: Duration::ZERO,
            duration: REVEAL_DURATION,
            initial: RevealStyle::hidden(REVEAL_OFFSET_PX),
            target: RevealStyle::VISIBLE,
            threshold: REVEAL_THRESHOLD,
            trigger,
            easing: Easing::EaseOut,
        }
    }

    pub fn on_viewport() -> Self {
        Self::new(RevealTrigger::OnViewport)
    }

    pub fn on_mount() -> Self {
        Self::new(RevealTrigger::OnMount)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_initial(mut self, initial: RevealStyle) -> Self {
        self.initial = initial;
        self
    }

    pub fn with_target(mut self, target: RevealStyle) -> Self {
        self.target = target;
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    /// True from the first firing on. Never goes back to false.
    pub fn has_fired(&self) -> bool {
        self.phase != RevealPhase::Unrevealed
    }

    /// Feed a viewport intersection sample. Returns true if this sample fired
    /// the reveal. Samples after the first firing are ignored.
    pub fn observe(&mut self, sample: IntersectionSample, now: Duration) -> bool {
        if self.trigger != RevealTrigger::OnViewport || self.has_fired() {
            return false;
        }
        if sample.is_intersecting && sample.ratio >= self.threshold {
            self.fire(now)
        } else {
            false
        }
    }

    /// Fire a mount-triggered entry. Returns true on the first call only.
    pub fn mount(&mut self, now: Duration) -> bool {
        if self.trigger != RevealTrigger::OnMount || self.has_fired() {
            return false;
        }
        self.fire(now)
    }

    fn fire(&mut self, now: Duration) -> bool {
        self.phase = RevealPhase::Revealing { started_at: now };
        true
    }

    /// When the animation starts moving. Saturates for huge configured delays.
    fn animation_start(&self, started_at: Duration) -> Duration {
        started_at.saturating_add(self.delay)
    }

    /// Complete the animation once its delay and duration have elapsed.
    /// Returns true on the call that reaches `Revealed`.
    pub fn tick(&mut self, now: Duration) -> bool {
        let RevealPhase::Revealing { started_at } = self.phase else {
            return false;
        };
        if now >= self.animation_start(started_at).saturating_add(self.duration) {
            self.phase = RevealPhase::Revealed;
            true
        } else {
            false
        }
    }

    /// Animation progress in [0, 1], before easing.
    pub fn progress_at(&self, now: Duration) -> f32 {
        match self.phase {
            RevealPhase::Unrevealed => 0.0,
            RevealPhase::Revealed => 1.0,
            RevealPhase::Revealing { started_at } => {
                let start = self.animation_start(started_at);
                let local = now.saturating_sub(start);
                if self.duration.is_zero() {
                    if now >= start { 1.0 } else { 0.0 }
                } else {
                    (local.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
                }
            }
        }
    }

    pub fn style_at(&self, now: Duration) -> RevealStyle {
        let t = self.easing.apply(self.progress_at(now));
        self.initial.lerp(self.target, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VISIBLE: IntersectionSample = IntersectionSample {
        is_intersecting: true,
        ratio: 0.4,
    };
    const HIDDEN: IntersectionSample = IntersectionSample {
        is_intersecting: false,
        ratio: 0.0,
    };

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn fires_once_over_enter_exit_enter() {
        let mut entry = RevealEntry::on_viewport();
        let mut fired = 0;
        for (i, sample) in [HIDDEN, VISIBLE, HIDDEN, VISIBLE, VISIBLE].into_iter().enumerate() {
            if entry.observe(sample, ms(i as u64 * 100)) {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
        assert_eq!(entry.phase(), RevealPhase::Revealing { started_at: ms(100) });
    }

    #[test]
    fn never_intersecting_stays_unrevealed() {
        let mut entry = RevealEntry::on_viewport();
        for i in 0..50 {
            entry.observe(HIDDEN, ms(i * 16));
            entry.tick(ms(i * 16));
        }
        assert_eq!(entry.phase(), RevealPhase::Unrevealed);
        assert_eq!(entry.style_at(ms(10_000)), entry.initial);
    }

    #[test]
    fn threshold_requires_enough_overlap() {
        let mut entry = RevealEntry::on_viewport().with_threshold(0.5);
        assert!(!entry.observe(VISIBLE, ms(0)));
        assert!(entry.observe(
            IntersectionSample {
                is_intersecting: true,
                ratio: 0.5
            },
            ms(16)
        ));
    }

    #[test]
    fn delay_postpones_the_animation() {
        let mut entry = RevealEntry::on_viewport().with_delay(ms(300));
        entry.observe(VISIBLE, ms(1_000));
        assert_eq!(entry.progress_at(ms(1_200)), 0.0);
        assert_eq!(entry.style_at(ms(1_300)), entry.initial);
        assert!(!entry.tick(ms(1_799)));
        assert!(entry.tick(ms(1_800)));
        assert_eq!(entry.phase(), RevealPhase::Revealed);
        assert!(!entry.tick(ms(2_000)));
        assert_eq!(entry.style_at(ms(2_000)), RevealStyle::VISIBLE);
    }

    #[test]
    fn huge_delays_never_overflow() {
        let mut entry = RevealEntry::on_viewport().with_delay(Duration::MAX);
        entry.observe(VISIBLE, ms(1_000));
        assert!(!entry.tick(ms(5_000)));
        assert_eq!(entry.progress_at(ms(5_000)), 0.0);
        assert_eq!(entry.style_at(ms(5_000)), entry.initial);
        assert!(entry.has_fired());
    }

    #[test]
    fn mount_entries_ignore_the_viewport() {
        let mut entry = RevealEntry::on_mount();
        assert!(!entry.observe(VISIBLE, ms(0)));
        assert!(entry.mount(ms(0)));
        assert!(!entry.mount(ms(5)));
        assert!(entry.has_fired());
    }

    #[test]
    fn has_fired_is_monotonic() {
        let mut entry = RevealEntry::on_viewport().with_duration(Duration::ZERO);
        entry.observe(VISIBLE, ms(0));
        for i in 0..20 {
            entry.observe(if i % 2 == 0 { HIDDEN } else { VISIBLE }, ms(i));
            entry.tick(ms(i));
            assert!(entry.has_fired());
        }
    }
}
