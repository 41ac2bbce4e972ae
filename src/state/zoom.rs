//! Zoom engine: wheel, double-tap and pinch scale math, plus the pan dampening
//! that keeps a panned image anchored while it shrinks.

use crate::model::{Length, PanOffset, Point, Size};

/// Wheel units per 1.0 of scale.
pub const WHEEL_DIVISOR: f64 = 1000.0;
/// Pinch separation pixels per 1.0 of scale.
pub const PINCH_DIVISOR: f64 = 100.0;
/// Scale floor while a pinch is in progress; the configured minimum applies on release.
pub const PINCH_FLOOR: f64 = 0.5;
/// Resize reacts like a wheel zoom-out of `scale_max * RESIZE_WHEEL_STEP` units.
pub const RESIZE_WHEEL_STEP: f64 = 150.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLimits {
    pub min: f64,
    pub max: f64,
}

impl ScaleLimits {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self::new(1.0, 6.0)
    }
}

/// Pick the wheel delta the way browsers report it: `deltaY`, then the legacy
/// `detail`, then `wheelDelta`. Zero and non-finite values are skipped.
pub fn wheel_delta(delta_y: f64, detail: f64, legacy_wheel_delta: f64) -> f64 {
    [delta_y, detail, legacy_wheel_delta]
        .into_iter()
        .find(|d| d.is_finite() && *d != 0.0)
        .unwrap_or(0.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scale after a wheel step. Positive deltas zoom out.
pub fn wheel_scale(current: f64, delta: f64, limits: ScaleLimits) -> f64 {
    let next = round2(current - delta / WHEEL_DIVISOR);
    if !next.is_finite() {
        log::warn!("discarding non-finite wheel scale (delta {})", delta);
        return current;
    }
    limits.clamp(next)
}

/// Scale that makes the image fill the viewport height.
pub fn fit_height_scale(viewport: Size, image: Size) -> Option<f64> {
    let ratio = viewport.height / image.height;
    (ratio.is_finite() && ratio > 0.0).then_some(ratio)
}

/// Next stop of the double-tap cycle: fit-to-height, then max, then back to min.
pub fn force_zoom_target(current: f64, fit_height: Option<f64>, limits: ScaleLimits) -> f64 {
    let target = match fit_height {
        Some(fit) if current < fit && fit < limits.max => fit,
        _ if current < limits.max => limits.max,
        _ => limits.min,
    };
    limits.clamp(target)
}

/// Add a pinch increment. Only the pinch floor applies here; a non-finite result
/// keeps the current scale.
pub fn pinch_scale(current: f64, increment: f64) -> f64 {
    let next = current + increment;
    if !next.is_finite() {
        log::warn!("discarding non-finite pinch increment {}", increment);
        return current;
    }
    next.max(PINCH_FLOOR)
}

/// Shrink the pan offset after a zoom-out so the visible region drifts toward center.
pub fn dampen_pan(diff: PanOffset, scale: f64) -> PanOffset {
    if scale >= 3.0 {
        diff.scaled_down(1.1)
    } else if scale >= 2.0 {
        diff.scaled_down(1.15)
    } else if scale == 1.0 {
        Point::ZERO
    } else {
        diff.scaled_down(1.5)
    }
}

pub fn resize_wheel_delta(limits: ScaleLimits) -> f64 {
    limits.max * RESIZE_WHEEL_STEP
}

/// Minimum dimensions that make a square image fill the short side of the viewport.
pub fn square_fill(viewport: Size) -> (Option<Length>, Option<Length>) {
    let fill = if viewport.is_portrait() {
        Length::Vw(100.0)
    } else {
        Length::Vh(100.0)
    };
    (Some(fill), Some(fill))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn wheel_up_zooms_in() {
        let s = wheel_scale(1.0, -1000.0, ScaleLimits::default());
        assert_eq!(s, 2.0);
    }

    #[test]
    fn wheel_out_clamps_to_min() {
        let s = wheel_scale(2.0, 4000.0, ScaleLimits::default());
        assert_eq!(s, 1.0);
    }

    #[test]
    fn wheel_in_clamps_to_max() {
        let s = wheel_scale(5.5, -3000.0, ScaleLimits::default());
        assert_eq!(s, 6.0);
    }

    #[test]
    fn wheel_rounds_to_two_places() {
        let s = wheel_scale(1.0, -123.0, ScaleLimits::default());
        assert!(approx_eq(s, 1.12));
    }

    #[test]
    fn wheel_keeps_scale_on_nan_delta() {
        let s = wheel_scale(2.5, f64::NAN, ScaleLimits::default());
        assert_eq!(s, 2.5);
    }

    #[test]
    fn wheel_delta_prefers_first_nonzero() {
        assert_eq!(wheel_delta(-53.0, 3.0, 120.0), -53.0);
        assert_eq!(wheel_delta(0.0, 3.0, 120.0), 3.0);
        assert_eq!(wheel_delta(0.0, 0.0, -120.0), -120.0);
        assert_eq!(wheel_delta(f64::NAN, 0.0, 0.0), 0.0);
    }

    #[test]
    fn force_zoom_cycles_fit_max_min() {
        let limits = ScaleLimits::default();
        let fit = Some(2.5);
        let a = force_zoom_target(1.0, fit, limits);
        let b = force_zoom_target(a, fit, limits);
        let c = force_zoom_target(b, fit, limits);
        assert_eq!((a, b, c), (2.5, 6.0, 1.0));
    }

    #[test]
    fn force_zoom_skips_fit_beyond_max() {
        let limits = ScaleLimits::default();
        // A fit ratio above max would pin the cycle at max forever.
        assert_eq!(force_zoom_target(1.0, Some(8.0), limits), 6.0);
        assert_eq!(force_zoom_target(6.0, Some(8.0), limits), 1.0);
    }

    #[test]
    fn force_zoom_from_between_fit_and_max_goes_to_max() {
        assert_eq!(force_zoom_target(3.0, Some(2.0), ScaleLimits::default()), 6.0);
    }

    #[test]
    fn fit_height_rejects_degenerate_images() {
        assert_eq!(fit_height_scale(Size::new(800.0, 600.0), Size::new(0.0, 0.0)), None);
        assert_eq!(
            fit_height_scale(Size::new(800.0, 600.0), Size::new(400.0, 240.0)),
            Some(2.5)
        );
    }

    #[test]
    fn pinch_floor_is_half() {
        assert_eq!(pinch_scale(0.6, -0.5), PINCH_FLOOR);
        assert!(approx_eq(pinch_scale(1.0, 0.25), 1.25));
        assert_eq!(pinch_scale(1.3, f64::NAN), 1.3);
    }

    #[test]
    fn dampening_by_scale_band() {
        let d = Point::new(110.0, -33.0);
        let hi = dampen_pan(d, 3.0);
        assert!(approx_eq(hi.x, 100.0) && approx_eq(hi.y, -30.0));
        let mid = dampen_pan(d, 2.0);
        assert!(approx_eq(mid.x, 110.0 / 1.15));
        assert_eq!(dampen_pan(d, 1.0), Point::ZERO);
        let low = dampen_pan(Point::new(15.0, 0.0), 1.5);
        assert!(approx_eq(low.x, 10.0));
    }

    #[test]
    fn square_fill_follows_orientation() {
        assert_eq!(
            square_fill(Size::new(400.0, 800.0)),
            (Some(Length::Vw(100.0)), Some(Length::Vw(100.0)))
        );
        assert_eq!(
            square_fill(Size::new(1200.0, 800.0)),
            (Some(Length::Vh(100.0)), Some(Length::Vh(100.0)))
        );
    }
}
