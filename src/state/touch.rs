// Pinch gesture state: separation baseline and last sample for incremental zoom
use crate::model::Point;
use crate::state::zoom::PINCH_DIVISOR;

#[derive(Default, Debug, Clone, PartialEq)]
pub struct PinchState {
    /// Separation vector at the first sample of the current pinch.
    pub first_offset: Option<Point>,
    /// Separation change (relative to `first_offset`) at the previous sample.
    pub last_distance_delta: Point,
}

/// Per-axis absolute separation of two touch points.
pub fn separation(a: Point, b: Point) -> Point {
    Point::new((a.x - b.x).abs(), (a.y - b.y).abs())
}

impl PinchState {
    /// Feed one two-finger sample and return the scale increment since the previous one.
    /// The axis that moved most drives the zoom so diagonal jitter on the other axis is
    /// ignored. Returns `None` for geometry that is not finite.
    pub fn sample(&mut self, a: Point, b: Point) -> Option<f64> {
        let offset = separation(a, b);
        if !(offset.x.is_finite() && offset.y.is_finite()) {
            return None;
        }
        let first = *self.first_offset.get_or_insert(offset);
        let distance = offset - first;
        let step = (distance - self.last_distance_delta).scaled_down(PINCH_DIVISOR);
        self.last_distance_delta = distance;
        Some(if step.x.abs() > step.y.abs() { step.x } else { step.y })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_sets_baseline_without_zooming() {
        let mut p = PinchState::default();
        let inc = p.sample(Point::new(100.0, 100.0), Point::new(200.0, 150.0));
        assert_eq!(inc, Some(0.0));
        assert_eq!(p.first_offset, Some(Point::new(100.0, 50.0)));
    }

    #[test]
    fn spreading_fingers_zooms_incrementally() {
        let mut p = PinchState::default();
        p.sample(Point::new(100.0, 100.0), Point::new(200.0, 100.0));
        // Spread by 50px horizontally: +0.5
        assert_eq!(p.sample(Point::new(75.0, 100.0), Point::new(225.0, 100.0)), Some(0.5));
        // Another 20px: only the new change counts
        assert_eq!(p.sample(Point::new(65.0, 100.0), Point::new(235.0, 100.0)), Some(0.2));
        // Pinch back in 100px: -1.0
        assert_eq!(p.sample(Point::new(115.0, 100.0), Point::new(185.0, 100.0)), Some(-1.0));
    }

    #[test]
    fn larger_axis_wins() {
        let mut p = PinchState::default();
        p.sample(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        let inc = p.sample(Point::new(0.0, 0.0), Point::new(110.0, 60.0)).unwrap();
        assert_eq!(inc, -0.4);
    }

    #[test]
    fn finger_order_does_not_matter() {
        let mut a = PinchState::default();
        let mut b = PinchState::default();
        a.sample(Point::new(10.0, 90.0), Point::new(60.0, 10.0));
        b.sample(Point::new(60.0, 10.0), Point::new(10.0, 90.0));
        assert_eq!(
            a.sample(Point::new(0.0, 100.0), Point::new(60.0, 10.0)),
            b.sample(Point::new(60.0, 10.0), Point::new(0.0, 100.0))
        );
    }

    #[test]
    fn non_finite_geometry_is_rejected() {
        let mut p = PinchState::default();
        assert_eq!(p.sample(Point::new(f64::NAN, 0.0), Point::new(1.0, 1.0)), None);
        assert_eq!(p.first_offset, None);
    }

    #[test]
    fn reset_clears_baseline() {
        let mut p = PinchState::default();
        p.sample(Point::new(0.0, 0.0), Point::new(50.0, 0.0));
        p.sample(Point::new(0.0, 0.0), Point::new(80.0, 0.0));
        p.reset();
        assert_eq!(p, PinchState::default());
    }
}
