//! Two-step confirmation for destructive actions.
//!
//! The first activation on an item arms it; a second activation on the same
//! item before the deadline confirms. Time is supplied by the caller, so the
//! machine is a pure function of its inputs.

use std::time::{Duration, Instant};

use tracing::debug;

/// Default time an item stays armed.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(3_000);

/// Outcome of one activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The item is now armed and waits for a second activation.
    Armed,
    /// The item was armed and is confirmed. The gesture is idle again.
    Confirmed,
}

/// Confirm-to-delete state machine. At most one item is armed at a time.
#[derive(Debug, Clone)]
pub struct ConfirmGesture {
    window: Duration,
    armed: Option<(String, Instant)>,
}

impl Default for ConfirmGesture {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl ConfirmGesture {
    /// Create an idle gesture with the given confirmation window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            armed: None,
        }
    }

    /// The confirmation window.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Activate `id` at time `now`.
    ///
    /// Confirms only if `id` is the armed item and its deadline has not
    /// passed. An expired arm, or a different item, re-arms with `id`.
    pub fn activate(&mut self, id: &str, now: Instant) -> Activation {
        if let Some((armed_id, deadline)) = self.armed.take() {
            if armed_id == id && now < deadline {
                debug!("Confirmed {}", id);
                return Activation::Confirmed;
            }
        }

        debug!("Armed {} for {:?}", id, self.window);
        self.armed = Some((id.to_string(), now + self.window));
        Activation::Armed
    }

    /// Whether `id` is armed and still inside its window at `now`.
    #[must_use]
    pub fn is_armed(&self, id: &str, now: Instant) -> bool {
        matches!(&self.armed, Some((armed_id, deadline)) if armed_id == id && now < *deadline)
    }

    /// The armed item, if its window has not expired at `now`.
    #[must_use]
    pub fn armed_id(&self, now: Instant) -> Option<&str> {
        self.armed
            .as_ref()
            .filter(|(_, deadline)| now < *deadline)
            .map(|(id, _)| id.as_str())
    }

    /// Return to idle.
    pub fn reset(&mut self) {
        self.armed = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_activation_arms() {
        let mut gesture = ConfirmGesture::default();
        let t0 = Instant::now();

        assert_eq!(gesture.activate("c3", t0), Activation::Armed);
        assert!(gesture.is_armed("c3", t0));
        assert_eq!(gesture.armed_id(t0), Some("c3"));
    }

    #[test]
    fn test_second_activation_within_window_confirms() {
        let mut gesture = ConfirmGesture::default();
        let t0 = Instant::now();

        gesture.activate("c3", t0);
        let outcome = gesture.activate("c3", t0 + Duration::from_millis(2_999));

        assert_eq!(outcome, Activation::Confirmed);
        assert!(gesture.armed_id(t0).is_none());
    }

    #[test]
    fn test_activation_after_expiry_rearms() {
        let mut gesture = ConfirmGesture::default();
        let t0 = Instant::now();

        gesture.activate("c3", t0);
        let t4 = t0 + Duration::from_secs(4);
        assert!(!gesture.is_armed("c3", t4));

        assert_eq!(gesture.activate("c3", t4), Activation::Armed);
        assert!(gesture.is_armed("c3", t4));
    }

    #[test]
    fn test_deadline_is_exclusive() {
        let mut gesture = ConfirmGesture::new(Duration::from_millis(100));
        let t0 = Instant::now();

        gesture.activate("x", t0);
        assert_eq!(
            gesture.activate("x", t0 + Duration::from_millis(100)),
            Activation::Armed
        );
    }

    #[test]
    fn test_different_item_takes_over() {
        let mut gesture = ConfirmGesture::default();
        let t0 = Instant::now();

        gesture.activate("c1", t0);
        assert_eq!(gesture.activate("c2", t0), Activation::Armed);
        assert!(!gesture.is_armed("c1", t0));
        assert!(gesture.is_armed("c2", t0));

        // c1 needs two fresh activations now
        assert_eq!(gesture.activate("c1", t0), Activation::Armed);
        assert_eq!(gesture.activate("c1", t0), Activation::Confirmed);
    }

    #[test]
    fn test_reset() {
        let mut gesture = ConfirmGesture::default();
        let t0 = Instant::now();

        gesture.activate("c1", t0);
        gesture.reset();
        assert_eq!(gesture.activate("c1", t0), Activation::Armed);
    }
}
