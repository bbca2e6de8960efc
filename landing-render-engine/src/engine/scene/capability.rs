use bevy::prelude::*;
use bevy::render::renderer::RenderAdapterInfo;
use constants::scene::LG_BREAKPOINT;
use wgpu_types::DeviceType;

/// Whether this host can afford the 3D surfaces.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderCapability {
    /// Not probed yet. Treated as unavailable.
    #[default]
    Pending,
    Available,
    Unavailable,
}

/// Mount or omit one 3D surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceDecision {
    Mount,
    Omit,
}

impl SurfaceDecision {
    /// A surface mounts only with confirmed rendering support, a window at
    /// least as wide as the `lg` breakpoint and the surface enabled.
    pub fn evaluate(capability: RenderCapability, window_width: f32, enabled: bool) -> Self {
        if enabled && capability == RenderCapability::Available && window_width >= LG_BREAKPOINT {
            Self::Mount
        } else {
            Self::Omit
        }
    }
}

impl RenderCapability {
    /// Software rasterisers can draw the page but not the 3D surfaces at a
    /// usable frame rate.
    pub fn for_device(device_type: DeviceType) -> Self {
        match device_type {
            DeviceType::Cpu => Self::Unavailable,
            _ => Self::Available,
        }
    }
}

/// Resolve a pending capability once the renderer has (or has not) come up.
pub fn detect_render_capability(
    adapter: Option<Res<RenderAdapterInfo>>,
    mut capability: ResMut<RenderCapability>,
) {
    if *capability != RenderCapability::Pending {
        return;
    }
    let Some(adapter) = adapter else {
        warn!("No render adapter, 3D surfaces are omitted");
        *capability = RenderCapability::Unavailable;
        return;
    };

    *capability = RenderCapability::for_device(adapter.device_type);
    match *capability {
        RenderCapability::Available => {
            info!("3D surfaces enabled on adapter {}", adapter.name)
        }
        _ => warn!(
            "Adapter {} is a software rasteriser, 3D surfaces are omitted",
            adapter.name
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn mounts_only_when_everything_agrees() {
        use RenderCapability::*;
        assert_eq!(
            SurfaceDecision::evaluate(Available, 1280.0, true),
            SurfaceDecision::Mount
        );
        assert_eq!(
            SurfaceDecision::evaluate(Available, LG_BREAKPOINT, true),
            SurfaceDecision::Mount
        );
        assert_eq!(
            SurfaceDecision::evaluate(Available, 1023.0, true),
            SurfaceDecision::Omit
        );
        assert_eq!(
            SurfaceDecision::evaluate(Available, 1280.0, false),
            SurfaceDecision::Omit
        );
        assert_eq!(
            SurfaceDecision::evaluate(Unavailable, 1920.0, true),
            SurfaceDecision::Omit
        );
        assert_eq!(
            SurfaceDecision::evaluate(Pending, 1920.0, true),
            SurfaceDecision::Omit
        );
    }

    #[test]
    fn software_adapters_skip_the_3d_surfaces() {
        assert_eq!(
            RenderCapability::for_device(DeviceType::Cpu),
            RenderCapability::Unavailable
        );
        for device in [
            DeviceType::IntegratedGpu,
            DeviceType::DiscreteGpu,
            DeviceType::VirtualGpu,
            DeviceType::Other,
        ] {
            assert_eq!(
                RenderCapability::for_device(device),
                RenderCapability::Available
            );
        }
        assert_eq!(
            SurfaceDecision::evaluate(RenderCapability::for_device(DeviceType::Cpu), 1920.0, true),
            SurfaceDecision::Omit
        );
    }

    #[test]
    fn headless_apps_resolve_to_unavailable() {
        let mut world = World::new();
        world.init_resource::<RenderCapability>();
        world
            .run_system_once(detect_render_capability)
            .expect("system runs");
        assert_eq!(
            *world.resource::<RenderCapability>(),
            RenderCapability::Unavailable
        );
    }
}
