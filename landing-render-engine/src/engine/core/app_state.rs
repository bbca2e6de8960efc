use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

/// Native overlay text showing the smoothed frame rate.
#[derive(Component)]
pub struct FpsText;

// Final transition to running state
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.config_resolved {
        if loading_progress.used_defaults {
            info!("→ Config resolved with defaults, transitioning to Running state");
        } else {
            info!("→ Config resolved, transitioning to Running state");
        }
        next_state.set(AppState::Running);
    }
}
