use listwindow::Point;

use crate::Easing;

/// Frame length used by [`ScrollAnimator::simulate`].
pub const FRAME_MS: u64 = 16;
/// Per-frame velocity decay of a fling.
pub const FRICTION: f64 = 0.95;
/// A fling stops once its squared per-frame step drops to this value.
pub const STOP_THRESHOLD: f64 = 0.04;
/// Largest per-frame step of a fling, in pixels.
pub const MAX_STEP: f64 = 100.0;

/// Parameters of an animated scroll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationRequest {
    pub source: Point,
    pub target: Point,
    pub start_ms: u64,
    pub duration_ms: u64,
    /// Jump to the target on the next tick without intermediate frames.
    pub silent: bool,
}

impl AnimationRequest {
    pub fn new(source: Point, target: Point, start_ms: u64, duration_ms: u64) -> Self {
        Self {
            source,
            target,
            start_ms,
            duration_ms,
            silent: false,
        }
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }
}

/// Identifies one started animation. Handles of replaced animations go stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationHandle(u64);

/// The animation an animator is running.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Animation {
    pub source: Point,
    pub target: Point,
    /// `target - source` per axis.
    pub distance: (f64, f64),
    pub start_ms: u64,
    pub end_ms: u64,
    pub current_ms: u64,
    pub silent: bool,
}

impl Animation {
    fn new(request: AnimationRequest) -> Self {
        Self {
            source: request.source,
            target: request.target,
            distance: (
                request.target.x as f64 - request.source.x as f64,
                request.target.y as f64 - request.source.y as f64,
            ),
            start_ms: request.start_ms,
            end_ms: request.start_ms.saturating_add(request.duration_ms),
            current_ms: request.start_ms,
            silent: request.silent,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        self.silent || now_ms >= self.end_ms
    }

    /// Position at `now_ms`. Snaps to the target once the animation is done.
    pub fn position_at(&self, easing: Easing, now_ms: u64) -> Point {
        if self.is_done(now_ms) {
            return self.target;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let duration = self.duration_ms();
        Point::new(
            offset(
                self.source.x,
                easing.displacement(self.distance.0, duration, elapsed),
            ),
            offset(
                self.source.y,
                easing.displacement(self.distance.1, duration, elapsed),
            ),
        )
    }
}

/// One step of a running animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationFrame {
    pub position: Point,
    /// Set on the final frame, whose position is exactly the target.
    pub done: bool,
}

/// Result of [`ScrollAnimator::simulate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fling {
    pub target: Point,
    pub duration_ms: u64,
}

/// Time-driven interpolation between two scroll positions.
///
/// The host calls [`ScrollAnimator::tick`] once per frame with a monotonic timestamp. At most
/// one animation runs at a time: starting a new one cancels the previous.
#[derive(Clone, Debug, Default)]
pub struct ScrollAnimator {
    easing: Easing,
    generation: u64,
    active: Option<Animation>,
}

impl ScrollAnimator {
    pub fn new(easing: Easing) -> Self {
        Self {
            easing,
            generation: 0,
            active: None,
        }
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn animation(&self) -> Option<&Animation> {
        self.active.as_ref()
    }

    pub fn start(&mut self, request: AnimationRequest) -> AnimationHandle {
        self.generation += 1;
        atrace!(
            generation = self.generation,
            duration_ms = request.duration_ms,
            silent = request.silent,
            "ScrollAnimator::start"
        );
        self.active = Some(Animation::new(request));
        AnimationHandle(self.generation)
    }

    /// Stops the animation started as `handle`. Returns `false` (and does nothing) when the
    /// handle is stale or the animation already finished.
    pub fn stop(&mut self, handle: AnimationHandle) -> bool {
        if handle.0 != self.generation || self.active.is_none() {
            return false;
        }
        self.active = None;
        true
    }

    /// Stops whatever is running.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Position of the animation started as `handle` at its last tick.
    pub fn current_position(&self, handle: AnimationHandle) -> Option<Point> {
        if handle.0 != self.generation {
            return None;
        }
        let animation = self.active.as_ref()?;
        Some(animation.position_at(self.easing, animation.current_ms))
    }

    /// Advances the running animation to `now_ms`.
    ///
    /// The frame that reaches the end time is positioned exactly on the target and ends the
    /// animation.
    pub fn tick(&mut self, now_ms: u64) -> Option<AnimationFrame> {
        let animation = self.active.as_mut()?;
        animation.current_ms = now_ms.max(animation.current_ms);
        let position = animation.position_at(self.easing, animation.current_ms);
        let done = animation.is_done(animation.current_ms);
        if done {
            self.active = None;
        }
        Some(AnimationFrame { position, done })
    }

    /// Where a fling released at `source` with the given velocities (pixels per ms) comes to
    /// rest, and how long it takes.
    ///
    /// The per-frame step starts at `velocity * 16` capped to `±100` and decays by `0.95` per
    /// frame until its squared length drops to `0.04`.
    pub fn simulate(source: Point, velocity_x: f64, velocity_y: f64) -> Fling {
        let mut step_x = initial_step(velocity_x);
        let mut step_y = initial_step(velocity_y);
        let (mut delta_x, mut delta_y) = (0.0, 0.0);
        let mut duration_ms = 0;
        loop {
            step_x *= FRICTION;
            step_y *= FRICTION;
            delta_x += step_x;
            delta_y += step_y;
            duration_ms += FRAME_MS;
            if step_x * step_x + step_y * step_y <= STOP_THRESHOLD {
                break;
            }
        }
        adebug!(delta_x, delta_y, duration_ms, "ScrollAnimator::simulate");
        Fling {
            target: Point::new(offset(source.x, delta_x), offset(source.y, delta_y)),
            duration_ms,
        }
    }
}

fn initial_step(velocity: f64) -> f64 {
    if !velocity.is_finite() {
        awarn!(velocity, "ignoring non-finite fling velocity");
        return 0.0;
    }
    (velocity * FRAME_MS as f64).clamp(-MAX_STEP, MAX_STEP)
}

fn ceil(v: f64) -> i64 {
    let t = v as i64;
    if (t as f64) < v { t + 1 } else { t }
}

/// `base + ceil(delta)`, saturating at 0.
fn offset(base: u64, delta: f64) -> u64 {
    let delta = ceil(delta);
    if delta < 0 {
        base.saturating_sub(delta.unsigned_abs())
    } else {
        base.saturating_add(delta as u64)
    }
}
