use bevy::prelude::*;
use constants::navigation::CLICK_DRAG_TIMEOUT_SECS;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointerState {
    #[default]
    Idle,
    Pressed {
        since: f64,
    },
}

/// Tells quick clicks apart from drags.
///
/// A press only becomes a click if it is released before the drag timeout.
/// Moving the pointer after the timeout has passed abandons the press.
#[derive(Resource, Debug, Clone)]
pub struct ClickDetector {
    state: PointerState,
    drag_timeout: f64,
}

impl Default for ClickDetector {
    fn default() -> Self {
        Self::new(CLICK_DRAG_TIMEOUT_SECS)
    }
}

impl ClickDetector {
    pub fn new(drag_timeout: f64) -> Self {
        Self {
            state: PointerState::Idle,
            drag_timeout,
        }
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    pub fn press(&mut self, now: f64) {
        self.state = PointerState::Pressed { since: now };
    }

    /// Checked on every move, so a slow drag is caught as soon as it outlives the timeout.
    pub fn pointer_moved(&mut self, now: f64) {
        if self.timed_out(now) {
            self.state = PointerState::Idle;
        }
    }

    /// Returns `true` when this release completes a click.
    pub fn release(&mut self, now: f64) -> bool {
        let clicked = matches!(self.state, PointerState::Pressed { .. }) && !self.timed_out(now);
        self.state = PointerState::Idle;
        clicked
    }

    fn timed_out(&self, now: f64) -> bool {
        match self.state {
            PointerState::Pressed { since } => now - since > self.drag_timeout,
            PointerState::Idle => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_release_is_one_click() {
        let mut detector = ClickDetector::default();
        detector.press(1.0);
        assert!(detector.release(1.1));
        assert!(!detector.release(1.15));
        assert_eq!(detector.state(), PointerState::Idle);
    }

    #[test]
    fn slow_release_is_not_a_click() {
        let mut detector = ClickDetector::default();
        detector.press(1.0);
        assert!(!detector.release(1.25));
    }

    #[test]
    fn moving_past_timeout_abandons_press() {
        let mut detector = ClickDetector::default();
        detector.press(0.0);
        detector.pointer_moved(0.1);
        assert!(matches!(detector.state(), PointerState::Pressed { .. }));

        detector.pointer_moved(0.3);
        assert_eq!(detector.state(), PointerState::Idle);
        assert!(!detector.release(0.31));
    }

    #[test]
    fn moves_within_timeout_still_click() {
        let mut detector = ClickDetector::default();
        detector.press(0.0);
        for step in 1..=4 {
            detector.pointer_moved(step as f64 * 0.04);
        }
        assert!(detector.release(0.19));
    }

    #[test]
    fn release_without_press_does_nothing() {
        let mut detector = ClickDetector::default();
        detector.pointer_moved(3.0);
        assert!(!detector.release(3.0));
    }

    #[test]
    fn new_press_restarts_the_clock() {
        let mut detector = ClickDetector::default();
        detector.press(0.0);
        detector.press(5.0);
        assert!(detector.release(5.1));
    }
}
