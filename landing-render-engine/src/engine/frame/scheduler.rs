use bevy::prelude::*;

/// Timing passed to every frame callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Seconds since the app started. Kept in f64 so long sessions stay precise.
    pub elapsed: f64,
    /// Seconds since the previous frame.
    pub delta: f32,
    pub frame: u64,
}

/// Whether a callback fires once or on every frame until cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRepeat {
    Once,
    EachFrame,
}

/// Cancellation handle returned by `FrameScheduler::schedule`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameCallbackHandle(u64);

type FrameCallback = Box<dyn FnMut(&FrameTick, &mut World) + Send + Sync>;

struct ScheduledCallback {
    handle: FrameCallbackHandle,
    repeat: FrameRepeat,
    callback: FrameCallback,
}

/// Per-frame callback registry driven by the display refresh.
///
/// Callbacks run with exclusive world access, in scheduling order, once per
/// frame. A callback must not despawn entities; it only writes components of
/// the objects it animates and silently does nothing once they are gone.
#[derive(Resource, Default)]
pub struct FrameScheduler {
    next_id: u64,
    frame: u64,
    callbacks: Vec<ScheduledCallback>,
}

impl FrameScheduler {
    pub fn schedule<F>(&mut self, repeat: FrameRepeat, callback: F) -> FrameCallbackHandle
    where
        F: FnMut(&FrameTick, &mut World) + Send + Sync + 'static,
    {
        let handle = FrameCallbackHandle(self.next_id);
        self.next_id += 1;
        self.callbacks.push(ScheduledCallback {
            handle,
            repeat,
            callback: Box::new(callback),
        });
        handle
    }

    /// Returns false when the handle already fired (once) or was cancelled.
    pub fn cancel(&mut self, handle: FrameCallbackHandle) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|scheduled| scheduled.handle != handle);
        self.callbacks.len() != before
    }

    pub fn is_scheduled(&self, handle: FrameCallbackHandle) -> bool {
        self.callbacks
            .iter()
            .any(|scheduled| scheduled.handle == handle)
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.callbacks.len()
    }

    pub fn frames_run(&self) -> u64 {
        self.frame
    }

    fn run(&mut self, elapsed: f64, delta: f32, world: &mut World) {
        self.frame += 1;
        let tick = FrameTick {
            elapsed,
            delta,
            frame: self.frame,
        };
        self.callbacks.retain_mut(|scheduled| {
            (scheduled.callback)(&tick, world);
            scheduled.repeat == FrameRepeat::EachFrame
        });
    }
}

/// Exclusive system running every scheduled callback for this frame.
pub fn run_frame_callbacks(world: &mut World) {
    let (elapsed, delta) = {
        let time = world.resource::<Time>();
        (time.elapsed_secs_f64(), time.delta_secs())
    };
    world.resource_scope(|world, mut scheduler: Mut<FrameScheduler>| {
        scheduler.run(elapsed, delta, world);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl FnMut(&FrameTick, &mut World) + Send + Sync) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = count.clone();
        (count, move |_: &FrameTick, _: &mut World| {
            inner.fetch_add(1, Ordering::Relaxed);
        })
    }

    #[test]
    fn each_frame_callbacks_run_until_cancelled() {
        let mut world = World::new();
        let mut scheduler = FrameScheduler::default();
        let (count, callback) = counter();
        let handle = scheduler.schedule(FrameRepeat::EachFrame, callback);

        for _ in 0..3 {
            scheduler.run(0.0, 0.016, &mut world);
        }
        assert_eq!(count.load(Ordering::Relaxed), 3);

        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        scheduler.run(0.0, 0.016, &mut world);
        assert_eq!(count.load(Ordering::Relaxed), 3);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn once_callbacks_fire_a_single_time() {
        let mut world = World::new();
        let mut scheduler = FrameScheduler::default();
        let (count, callback) = counter();
        let handle = scheduler.schedule(FrameRepeat::Once, callback);
        assert!(scheduler.is_scheduled(handle));

        scheduler.run(0.0, 0.016, &mut world);
        scheduler.run(0.0, 0.016, &mut world);
        assert_eq!(count.load(Ordering::Relaxed), 1);
        assert!(!scheduler.is_scheduled(handle));
    }

    #[test]
    fn callbacks_see_monotonic_frames() {
        let mut world = World::new();
        world.init_resource::<FrameLog>();
        let mut scheduler = FrameScheduler::default();
        scheduler.schedule(FrameRepeat::EachFrame, |tick, world| {
            world.resource_mut::<FrameLog>().0.push(tick.frame);
        });
        for _ in 0..4 {
            scheduler.run(1.0, 0.016, &mut world);
        }
        assert_eq!(world.resource::<FrameLog>().0, vec![1, 2, 3, 4]);
    }

    #[derive(Resource, Default)]
    struct FrameLog(Vec<u64>);
}
