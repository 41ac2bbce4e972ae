//! Gesture interpreter.
//!
//! Tracks one press-drag-release gesture at a time: the drag origin, the running pan
//! offset and its committed snapshot, double-tap timing and the pinch baseline. The
//! offset is always recomputed from the gesture start (`end_diff + start - current`),
//! never accumulated per move, so repeated small moves cannot drift.

use crate::model::{PanOffset, Point};
use crate::state::touch::PinchState;

/// Two presses closer than this form a double tap.
pub const DOUBLE_TAP_MS: f64 = 300.0;
/// Mouse presses are ignored this long after a touch ends (emulated mouse events).
pub const TOUCH_MOUSE_GUARD_MS: f64 = 350.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GesturePhase {
    #[default]
    Idle,
    Pressed,
    Panning,
    PinchZooming,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub start: Point,
    pub current: Point,
}

/// Double-tap detector keyed on the first press timestamp.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TapTracker {
    first_press_ms: Option<f64>,
}

impl TapTracker {
    /// Register a press. Returns true when it completes a double tap, which also
    /// consumes the pending tap.
    pub fn press(&mut self, time_ms: f64) -> bool {
        match self.first_press_ms {
            Some(first) if time_ms < first + DOUBLE_TAP_MS => {
                self.first_press_ms = None;
                true
            }
            _ => {
                self.first_press_ms = Some(time_ms);
                false
            }
        }
    }

    /// A drag happened; the next press starts a fresh tap window.
    pub fn cancel(&mut self) {
        self.first_press_ms = None;
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureState {
    pub phase: GesturePhase,
    pub pointer: PointerState,
    /// Live pan offset.
    pub diff: PanOffset,
    /// Offset committed when the previous gesture ended.
    pub end_diff: PanOffset,
    pub taps: TapTracker,
    pub pinch: PinchState,
}

impl GestureState {
    pub fn press(&mut self, at: Point) {
        self.pointer = PointerState {
            start: at,
            current: at,
        };
        self.phase = GesturePhase::Pressed;
    }

    /// Follow the pointer and return the recomputed pan offset.
    pub fn drag_to(&mut self, at: Point) -> PanOffset {
        self.taps.cancel();
        self.pointer.current = at;
        self.phase = GesturePhase::Panning;
        self.diff = self.end_diff + (self.pointer.start - self.pointer.current);
        self.diff
    }

    /// Feed a two-finger sample; returns the scale increment.
    pub fn pinch(&mut self, a: Point, b: Point) -> Option<f64> {
        self.taps.cancel();
        self.phase = GesturePhase::PinchZooming;
        self.pinch.sample(a, b)
    }

    /// End the gesture and commit `settled` as the offset the next gesture builds on.
    pub fn release(&mut self, settled: PanOffset) {
        self.pinch.reset();
        self.diff = settled;
        self.end_diff = settled;
        self.phase = GesturePhase::Idle;
    }

    /// Replace both live and committed offsets (zoom dampening outside a drag).
    pub fn set_offset(&mut self, diff: PanOffset) {
        self.diff = diff;
        self.end_diff = diff;
    }

    pub fn is_pinching(&self) -> bool {
        self.phase == GesturePhase::PinchZooming
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_offset_is_start_minus_current() {
        let mut g = GestureState::default();
        g.press(Point::new(100.0, 100.0));
        assert_eq!(g.phase, GesturePhase::Pressed);
        assert_eq!(g.drag_to(Point::new(80.0, 130.0)), Point::new(20.0, -30.0));
        assert_eq!(g.phase, GesturePhase::Panning);
    }

    #[test]
    fn drag_does_not_accumulate_per_move() {
        let mut g = GestureState::default();
        g.press(Point::new(0.0, 0.0));
        for step in 1..=50 {
            g.drag_to(Point::new(-(step as f64), 0.0));
        }
        g.drag_to(Point::new(-10.0, 0.0));
        assert_eq!(g.diff, Point::new(10.0, 0.0));
    }

    #[test]
    fn committed_offset_carries_into_next_gesture() {
        let mut g = GestureState::default();
        g.press(Point::new(0.0, 0.0));
        g.drag_to(Point::new(-40.0, -10.0));
        let settled = g.diff;
        g.release(settled);
        assert_eq!(g.end_diff, Point::new(40.0, 10.0));
        assert_eq!(g.phase, GesturePhase::Idle);

        g.press(Point::new(500.0, 500.0));
        assert_eq!(g.drag_to(Point::new(490.0, 505.0)), Point::new(50.0, 5.0));
    }

    #[test]
    fn release_can_override_offset() {
        let mut g = GestureState::default();
        g.press(Point::new(0.0, 0.0));
        g.drag_to(Point::new(0.0, 30.0));
        g.release(Point::ZERO);
        assert_eq!(g.diff, Point::ZERO);
        assert_eq!(g.end_diff, Point::ZERO);
    }

    #[test]
    fn double_tap_within_window() {
        let mut t = TapTracker::default();
        assert!(!t.press(1000.0));
        assert_eq!(t.first_press_ms, Some(1000.0));
        assert!(t.press(1250.0));
        assert_eq!(t.first_press_ms, None);
    }

    #[test]
    fn slow_second_tap_restarts_window() {
        let mut t = TapTracker::default();
        assert!(!t.press(1000.0));
        assert!(!t.press(1300.0));
        assert!(t.press(1450.0));
    }

    #[test]
    fn drag_cancels_pending_tap() {
        let mut g = GestureState::default();
        assert!(!g.taps.press(0.0));
        g.press(Point::ZERO);
        g.drag_to(Point::new(5.0, 0.0));
        assert!(!g.taps.press(100.0));
    }

    #[test]
    fn pinch_switches_phase_and_release_resets_baseline() {
        let mut g = GestureState::default();
        g.press(Point::ZERO);
        assert_eq!(g.pinch(Point::new(0.0, 0.0), Point::new(100.0, 0.0)), Some(0.0));
        assert!(g.is_pinching());
        g.release(Point::ZERO);
        assert_eq!(g.pinch, PinchState::default());
        assert!(!g.is_pinching());
    }
}
