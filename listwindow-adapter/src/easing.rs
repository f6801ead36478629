/// Timing curve of a scroll animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    /// Quartic ease-in.
    EaseIn,
    /// Quintic ease-out.
    #[default]
    EaseOut,
    /// Quartic ease-in-out.
    EaseInOut,
    /// A one-pixel-per-frame start for the first 80ms, then [`Easing::EaseOut`].
    FlexibleEaseOut,
}

/// Length of the pixel-stepping start of [`Easing::FlexibleEaseOut`].
const FLEXIBLE_START_MS: u64 = 80;

impl Easing {
    /// Fraction of the distance covered at progress `t` (clamped to `0..=1`).
    pub fn sample(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t * t,
            Self::EaseOut | Self::FlexibleEaseOut => {
                let u = t - 1.0;
                u * u * u * u * u + 1.0
            }
            Self::EaseInOut => {
                let u = t * 2.0;
                if u < 1.0 {
                    0.5 * u * u * u * u
                } else {
                    let u = u - 2.0;
                    -0.5 * (u * u * u * u - 2.0)
                }
            }
        }
    }

    /// Displacement after `elapsed_ms` of an animation covering `distance` in `duration_ms`.
    pub fn displacement(self, distance: f64, duration_ms: u64, elapsed_ms: u64) -> f64 {
        if duration_ms == 0 {
            return distance;
        }
        if self == Self::FlexibleEaseOut && elapsed_ms <= FLEXIBLE_START_MS {
            let step = elapsed_ms.div_ceil(16) as f64;
            return if distance < 0.0 {
                -step.min(-distance)
            } else {
                step.min(distance)
            };
        }
        distance * self.sample(elapsed_ms as f64 / duration_ms as f64)
    }
}
