use std::time::Duration;

use tracing::trace;

use crate::error::TickResult;

/// Something that can be asked to repaint.
pub trait Invalidate {
    /// Post a redraw as soon as possible
    fn invalidate(&self);

    /// Post a frame redraw once `delay` has elapsed. The host must hand it
    /// back through [`AnimationDriver::frame_due`] before drawing.
    fn invalidate_after(&self, delay: Duration) -> TickResult<()>;
}

/// Redraw-driven animation loop.
///
/// The driver never schedules itself: the rendering path calls
/// [`AnimationDriver::animate`] on every draw, and while the driver is active
/// a draw runs one frame and requests the next frame redraw one frame
/// interval later. At most one frame redraw is outstanding; draws that happen
/// while it is pending (resizes, taps) repaint without stepping.
#[derive(Debug)]
pub struct AnimationDriver<I> {
    target: I,
    active: bool,
    frame: Duration,
    frame_pending: bool,
}

impl<I: Invalidate> AnimationDriver<I> {
    pub fn new(target: I, frame: Duration) -> Self {
        Self {
            target,
            active: false,
            frame,
            frame_pending: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True while a scheduled frame redraw has not arrived yet
    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending
    }

    pub fn target(&self) -> &I {
        &self.target
    }

    /// Activate and post a redraw. Returns false if already active.
    pub fn start(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        trace!("animation driver started");
        self.target.invalidate();
        true
    }

    /// Deactivate. Returns false if already inactive.
    pub fn stop(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        trace!("animation driver stopped");
        true
    }

    /// A scheduled frame redraw arrived; the next draw may step again.
    pub fn frame_due(&mut self) {
        self.frame_pending = false;
    }

    /// Run one frame if active and no frame is scheduled, then schedule the
    /// following one.
    pub fn animate<T>(&mut self, frame: impl FnOnce() -> T) -> Option<T> {
        if !self.active || self.frame_pending {
            return None;
        }
        let out = frame();
        match self.target.invalidate_after(self.frame) {
            Ok(()) => self.frame_pending = true,
            // A lost frame only makes the cadence uneven; the next draw steps
            Err(e) => trace!("frame redraw not scheduled: {}", e),
        }
        Some(out)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::TickError;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Counts redraw requests instead of posting them
    #[derive(Debug, Clone, Default)]
    pub(crate) struct CountingInvalidate {
        pub immediate: Rc<Cell<usize>>,
        pub delayed: Rc<RefCell<Vec<Duration>>>,
        pub fail: bool,
    }

    impl Invalidate for CountingInvalidate {
        fn invalidate(&self) {
            self.immediate.set(self.immediate.get() + 1);
        }

        fn invalidate_after(&self, delay: Duration) -> TickResult<()> {
            if self.fail {
                return Err(TickError::Redraw("closed".into()));
            }
            self.delayed.borrow_mut().push(delay);
            Ok(())
        }
    }

    fn driver() -> AnimationDriver<CountingInvalidate> {
        AnimationDriver::new(CountingInvalidate::default(), Duration::from_millis(50))
    }

    #[test]
    fn test_start_posts_one_redraw() {
        let mut d = driver();
        assert!(d.start());
        assert!(!d.start());
        assert!(d.is_active());
        assert_eq!(d.target().immediate.get(), 1);
        assert!(d.target().delayed.borrow().is_empty());
    }

    #[test]
    fn test_stop_when_inactive_is_noop() {
        let mut d = driver();
        assert!(!d.stop());
        d.start();
        assert!(d.stop());
        assert!(!d.stop());
        assert!(!d.is_active());
    }

    #[test]
    fn test_animate_inactive_skips_frame() {
        let mut d = driver();
        let mut ran = false;
        assert_eq!(d.animate(|| ran = true), None);
        assert!(!ran);
        assert!(d.target().delayed.borrow().is_empty());
    }

    #[test]
    fn test_animate_runs_frame_and_schedules_next() {
        let mut d = driver();
        d.start();
        assert_eq!(d.animate(|| 7), Some(7));
        assert_eq!(
            d.target().delayed.borrow().as_slice(),
            &[Duration::from_millis(50)]
        );
    }

    #[test]
    fn test_schedule_failure_is_swallowed() {
        let mut d = AnimationDriver::new(
            CountingInvalidate {
                fail: true,
                ..Default::default()
            },
            Duration::from_millis(50),
        );
        d.start();
        assert_eq!(d.animate(|| "frame"), Some("frame"));
        assert!(d.is_active());
        assert!(!d.is_frame_pending());
    }

    #[test]
    fn test_draw_while_frame_pending_does_not_step() {
        let mut d = driver();
        d.start();
        assert_eq!(d.animate(|| 1), Some(1));
        assert!(d.is_frame_pending());

        // extra redraw before the scheduled frame arrives
        assert_eq!(d.animate(|| 2), None);
        assert_eq!(d.target().delayed.borrow().len(), 1);

        d.frame_due();
        assert_eq!(d.animate(|| 3), Some(3));
        assert_eq!(d.target().delayed.borrow().len(), 2);
    }

    #[test]
    fn test_restart_waits_for_trailing_frame() {
        let mut d = driver();
        d.start();
        d.animate(|| ());
        d.stop();

        // tapped again before the trailing frame redraw arrived
        d.start();
        assert_eq!(d.animate(|| ()), None);
        d.frame_due();
        assert_eq!(d.animate(|| ()), Some(()));
        assert_eq!(d.target().delayed.borrow().len(), 2);
    }
}
