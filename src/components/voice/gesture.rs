// Tap vs long-press discrimination for the play/pause control.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    Tap,
    LongPress,
}

/// One press at a time. A press that has fired its long-press never produces a tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PressTracker {
    next_id: u64,
    active: Option<ActivePress>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActivePress {
    id: u64,
    long_fired: bool,
}

impl PressTracker {
    /// Pointer went down. Returns the id the long-press timer must present later.
    pub fn begin(&mut self) -> u64 {
        self.next_id += 1;
        self.active = Some(ActivePress {
            id: self.next_id,
            long_fired: false,
        });
        self.next_id
    }

    /// Long-press timer elapsed for press `id`.
    pub fn hold_elapsed(&mut self, id: u64) -> Option<PressOutcome> {
        match self.active.as_mut() {
            Some(press) if press.id == id && !press.long_fired => {
                press.long_fired = true;
                Some(PressOutcome::LongPress)
            }
            _ => None,
        }
    }

    /// Pointer went up over the control.
    pub fn release(&mut self) -> Option<PressOutcome> {
        match self.active.take() {
            Some(press) if !press.long_fired => Some(PressOutcome::Tap),
            _ => None,
        }
    }

    /// Context-menu gesture (right click, platform long-press menu).
    pub fn context_menu(&mut self) -> Option<PressOutcome> {
        match self.active.as_mut() {
            Some(press) if press.long_fired => None,
            Some(press) => {
                press.long_fired = true;
                Some(PressOutcome::LongPress)
            }
            None => Some(PressOutcome::LongPress),
        }
    }

    /// Pointer left or was cancelled; nothing fires.
    pub fn cancel(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_release_is_a_tap() {
        let mut tracker = PressTracker::default();
        let id = tracker.begin();
        assert_eq!(tracker.release(), Some(PressOutcome::Tap));
        assert_eq!(tracker.hold_elapsed(id), None);
    }

    #[test]
    fn held_press_fires_long_press_once_and_never_taps() {
        let mut tracker = PressTracker::default();
        let id = tracker.begin();
        assert_eq!(tracker.hold_elapsed(id), Some(PressOutcome::LongPress));
        assert_eq!(tracker.hold_elapsed(id), None);
        assert_eq!(tracker.release(), None);
    }

    #[test]
    fn stale_timer_from_an_earlier_press_is_ignored() {
        let mut tracker = PressTracker::default();
        let first = tracker.begin();
        tracker.release();
        let _second = tracker.begin();
        assert_eq!(tracker.hold_elapsed(first), None);
        assert_eq!(tracker.release(), Some(PressOutcome::Tap));
    }

    #[test]
    fn context_menu_is_a_long_press_without_tap() {
        let mut tracker = PressTracker::default();
        tracker.begin();
        assert_eq!(tracker.context_menu(), Some(PressOutcome::LongPress));
        assert_eq!(tracker.release(), None);

        // Keyboard or mouse context menu without a preceding pointer down.
        assert_eq!(tracker.context_menu(), Some(PressOutcome::LongPress));
    }

    #[test]
    fn cancelled_press_fires_nothing() {
        let mut tracker = PressTracker::default();
        let id = tracker.begin();
        tracker.cancel();
        assert_eq!(tracker.hold_elapsed(id), None);
        assert_eq!(tracker.release(), None);
    }
}
