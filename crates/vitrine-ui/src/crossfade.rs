//! Image crossfade tween.
//!
//! Presentation polish only: when a rotation tick swaps images, the outgoing
//! image fades out while the incoming one fades in over a short duration.
//! The fade reads time from the grid's [`Clock`](vitrine_core::Clock), so it
//! never owns a timer of its own and has nothing to leak.

/// Easing curves for the fade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Linear interpolation (no easing).
    Linear,
    /// Ease in and out using a cubic curve.
    EaseInOut,
}

impl Easing {
    /// Applies the easing to a linear fraction in `[0, 1]`.
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
        }
    }
}

/// Solves the CSS-style cubic bezier `(x1, y1, x2, y2)` at `fraction`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;
    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    fn sample(a: f32, b: f32, c: f32, t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }

    // Newton-Raphson for the parametric t of the x fraction, falling back
    // to bisection when the derivative degenerates.
    let mut t = fraction;
    let mut converged = false;
    for _ in 0..8 {
        let x = sample(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            converged = true;
            break;
        }
        let dx = (3.0 * ax * t + 2.0 * bx) * t + cx;
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }
    if !converged {
        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        t = fraction;
        for _ in 0..16 {
            let delta = sample(ax, bx, cx, t) - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = 0.5 * (lo + hi);
        }
    }

    sample(ay, by, cy, t)
}

/// One in-flight fade between two image indices of a product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossfade {
    /// Index of the outgoing image.
    pub from: usize,
    /// Index of the incoming image.
    pub to: usize,
    started_at_millis: u64,
    duration_millis: u64,
    easing: Easing,
}

impl Crossfade {
    /// Starts a fade at `now_millis` with the grid's configured duration.
    pub fn begin(from: usize, to: usize, now_millis: u64, duration_millis: u64) -> Self {
        Self {
            from,
            to,
            started_at_millis: now_millis,
            duration_millis,
            easing: Easing::EaseInOut,
        }
    }

    /// Eased progress in `[0, 1]` at `now_millis`.
    pub fn progress(&self, now_millis: u64) -> f32 {
        if self.duration_millis == 0 {
            return 1.0;
        }
        let elapsed = now_millis.saturating_sub(self.started_at_millis);
        let linear = (elapsed as f32 / self.duration_millis as f32).clamp(0.0, 1.0);
        self.easing.transform(linear)
    }

    /// Alpha of the incoming image at `now_millis`.
    pub fn incoming_alpha(&self, now_millis: u64) -> f32 {
        self.progress(now_millis)
    }

    /// Alpha of the outgoing image at `now_millis`.
    pub fn outgoing_alpha(&self, now_millis: u64) -> f32 {
        1.0 - self.progress(now_millis)
    }

    /// True once the incoming image is fully shown.
    pub fn is_finished(&self, now_millis: u64) -> bool {
        now_millis.saturating_sub(self.started_at_millis) >= self.duration_millis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_clamps_and_finishes() {
        let fade = Crossfade::begin(0, 1, 1000, 300);
        assert_eq!(fade.progress(1000), 0.0);
        assert_eq!(fade.progress(1300), 1.0);
        assert_eq!(fade.progress(5000), 1.0);
        assert!(!fade.is_finished(1299));
        assert!(fade.is_finished(1300));
    }

    #[test]
    fn alphas_are_complementary() {
        let fade = Crossfade::begin(2, 0, 0, 300);
        for now in [0, 75, 150, 225, 300] {
            let sum = fade.incoming_alpha(now) + fade.outgoing_alpha(now);
            assert!((sum - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn ease_in_out_is_monotonic_and_pinned() {
        let easing = Easing::EaseInOut;
        assert_eq!(easing.transform(0.0), 0.0);
        assert_eq!(easing.transform(1.0), 1.0);
        let mut last = 0.0;
        for step in 1..=20 {
            let value = easing.transform(step as f32 / 20.0);
            assert!(value >= last - 1e-4);
            last = value;
        }
    }

    #[test]
    fn zero_duration_fade_is_instant() {
        let fade = Crossfade::begin(0, 1, 42, 0);
        assert_eq!(fade.progress(42), 1.0);
        assert!(fade.is_finished(42));
    }
}
