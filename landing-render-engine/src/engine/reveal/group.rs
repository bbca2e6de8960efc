use bevy::prelude::*;
use constants::reveal::{CARD_BASE_DELAY, CARD_STAGGER};
use std::time::Duration;

use super::state::RevealEntry;

/// Staggered sequence of reveals. Member `i` waits `base_delay + i * stagger`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealGroup {
    pub base_delay: Duration,
    pub stagger: Duration,
}

impl Default for RevealGroup {
    fn default() -> Self {
        Self {
            base_delay: CARD_BASE_DELAY,
            stagger: CARD_STAGGER,
        }
    }
}

impl RevealGroup {
    pub fn delay_for(&self, index: usize) -> Duration {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.base_delay.saturating_add(self.stagger.saturating_mul(index))
    }

    /// Entry for the member declared at `index`, with its delay fixed now.
    pub fn member_entry(&self, index: usize, entry: RevealEntry) -> RevealEntry {
        entry.with_delay(self.delay_for(index))
    }
}

/// Declaration position of an element within its group.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealGroupMember {
    pub group: Entity,
    pub index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_group_staggers_cards() {
        let group = RevealGroup::default();
        let delays: Vec<u128> = (0..3).map(|i| group.delay_for(i).as_millis()).collect();
        assert_eq!(delays, vec![300, 400, 500]);
    }

    #[test]
    fn huge_indices_saturate() {
        let group = RevealGroup::default();
        assert!(group.delay_for(usize::MAX) >= group.delay_for(1_000));
    }

    #[test]
    fn saturated_member_delay_can_still_tick() {
        let group = RevealGroup {
            base_delay: Duration::ZERO,
            stagger: Duration::from_millis(u64::MAX),
        };
        let mut entry = group.member_entry(1_001, RevealEntry::on_mount());
        assert_eq!(entry.delay, Duration::MAX);
        assert!(entry.mount(Duration::from_secs(1)));
        assert!(!entry.tick(Duration::from_secs(2)));
    }
}
