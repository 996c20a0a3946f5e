//! Counter animation primitive for the statistics block.
//!
//! The browser original arms a counter the first time its host element
//! intersects the viewport, then interpolates per animation frame until
//! the target is reached. Here the two runtime capabilities are explicit
//! and injectable: a [`VisibilitySource`] reporting the current
//! intersection ratio, and a [`FrameClock`] providing monotonic time.
//! The host drives the counter by calling [`Counter::tick`] once per
//! frame and stops scheduling when a frame reports `running == false`.
//!
//! The primitive is pull-based, so cancellation is simply dropping the
//! counter (or calling [`Counter::cancel`]): no observer registration or
//! pending frame callback survives it. Each statistic item owns an
//! independent counter; items share no timers.

use std::time::Duration;

/// Intersection ratio at which a counter arms. One-shot: once armed,
/// later visibility loss neither pauses nor resets the animation.
pub const VISIBILITY_THRESHOLD: f64 = 0.1;

/// Reports how much of the hosting element currently intersects the
/// viewport, in `0.0..=1.0`.
pub trait VisibilitySource {
    fn intersection_ratio(&self) -> f64;
}

/// Monotonic time source driven at the runtime's refresh cadence.
pub trait FrameClock {
    fn now(&self) -> Duration;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Waiting,
    Running { started: Duration },
    Finished,
    Cancelled,
}

/// One frame of counter output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: i64,
    /// False once the counter reached its target (or was cancelled);
    /// the host must stop scheduling frames for it.
    pub running: bool,
}

/// Visibility-gated numeric interpolation from `start` to `end` over
/// `duration`. The final frame is guaranteed to report exactly `end`.
#[derive(Debug, Clone)]
pub struct Counter {
    start: i64,
    end: i64,
    duration: Duration,
    phase: Phase,
}

impl Counter {
    pub fn new(end: i64, duration: Duration) -> Self {
        Self {
            start: 0,
            end,
            duration,
            phase: Phase::Waiting,
        }
    }

    pub fn with_start(mut self, start: i64) -> Self {
        self.start = start;
        self
    }

    /// Advance one frame. While the host element has never been visible
    /// the value holds at `start`; after arming, the value interpolates
    /// and the counter finishes when progress reaches 1.
    pub fn tick(&mut self, visibility: &dyn VisibilitySource, clock: &dyn FrameClock) -> CounterFrame {
        match self.phase {
            Phase::Waiting => {
                if visibility.intersection_ratio() >= VISIBILITY_THRESHOLD {
                    self.phase = Phase::Running {
                        started: clock.now(),
                    };
                }
                CounterFrame {
                    value: self.start,
                    running: true,
                }
            }
            Phase::Running { started } => {
                let elapsed = clock.now().saturating_sub(started);
                let progress = if self.duration.is_zero() {
                    1.0
                } else {
                    (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
                };

                if progress >= 1.0 {
                    self.phase = Phase::Finished;
                    CounterFrame {
                        value: self.end,
                        running: false,
                    }
                } else {
                    let value = (self.start as f64
                        + progress * (self.end - self.start) as f64)
                        .floor() as i64;
                    CounterFrame {
                        value,
                        running: true,
                    }
                }
            }
            Phase::Finished => CounterFrame {
                value: self.end,
                running: false,
            },
            Phase::Cancelled => CounterFrame {
                value: self.start,
                running: false,
            },
        }
    }

    /// Stop the counter at host teardown. Subsequent ticks are inert.
    pub fn cancel(&mut self) {
        self.phase = Phase::Cancelled;
    }

    pub fn has_started(&self) -> bool {
        !matches!(self.phase, Phase::Waiting)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    pub fn end(&self) -> i64 {
        self.end
    }
}

/// Fixed-ratio visibility source, for hosts without a real observer and
/// for tests.
#[derive(Debug, Clone, Copy)]
pub struct StaticVisibility(pub f64);

impl VisibilitySource for StaticVisibility {
    fn intersection_ratio(&self) -> f64 {
        self.0
    }
}

/// Manually advanced clock, for deterministic frame sequences.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: std::cell::Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl FrameClock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VISIBLE: StaticVisibility = StaticVisibility(1.0);
    const HIDDEN: StaticVisibility = StaticVisibility(0.0);

    #[test]
    fn test_does_not_start_until_visible() {
        let clock = ManualClock::new();
        let mut counter = Counter::new(100, Duration::from_millis(2000));

        for _ in 0..5 {
            clock.advance(Duration::from_millis(16));
            let frame = counter.tick(&HIDDEN, &clock);
            assert_eq!(frame.value, 0);
            assert!(frame.running);
        }
        assert!(!counter.has_started());
    }

    #[test]
    fn test_sequence_is_non_decreasing_and_terminates_exactly() {
        let clock = ManualClock::new();
        let mut counter = Counter::new(100, Duration::from_millis(2000));

        let mut last = i64::MIN;
        let mut frames = 0;
        loop {
            let frame = counter.tick(&VISIBLE, &clock);
            assert!(frame.value >= last);
            last = frame.value;
            frames += 1;
            if !frame.running {
                break;
            }
            clock.advance(Duration::from_millis(16));
        }

        assert_eq!(last, 100);
        // 2000ms at 16ms per frame, plus the arming frame
        assert!(frames >= 125, "terminated after only {frames} frames");
        assert!(counter.is_finished());
    }

    #[test]
    fn test_trigger_is_one_shot() {
        let clock = ManualClock::new();
        let mut counter = Counter::new(100, Duration::from_millis(1000));

        counter.tick(&VISIBLE, &clock);
        clock.advance(Duration::from_millis(500));

        // Visibility lost mid-flight: the animation keeps advancing
        let frame = counter.tick(&HIDDEN, &clock);
        assert!(frame.value > 0);
        assert!(frame.running);

        clock.advance(Duration::from_millis(600));
        let frame = counter.tick(&HIDDEN, &clock);
        assert_eq!(frame.value, 100);
        assert!(!frame.running);
    }

    #[test]
    fn test_interpolation_uses_floor() {
        let clock = ManualClock::new();
        let mut counter = Counter::new(3, Duration::from_millis(1000));

        counter.tick(&VISIBLE, &clock);
        clock.advance(Duration::from_millis(500));
        let frame = counter.tick(&VISIBLE, &clock);
        // progress 0.5 of 3 = 1.5, floored
        assert_eq!(frame.value, 1);
    }

    #[test]
    fn test_nonzero_start() {
        let clock = ManualClock::new();
        let mut counter = Counter::new(110, Duration::from_millis(1000)).with_start(100);

        let frame = counter.tick(&HIDDEN, &clock);
        assert_eq!(frame.value, 100);

        counter.tick(&VISIBLE, &clock);
        clock.advance(Duration::from_millis(1000));
        assert_eq!(counter.tick(&VISIBLE, &clock).value, 110);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let clock = ManualClock::new();
        let mut counter = Counter::new(42, Duration::ZERO);

        counter.tick(&VISIBLE, &clock);
        let frame = counter.tick(&VISIBLE, &clock);
        assert_eq!(frame.value, 42);
        assert!(!frame.running);
    }

    #[test]
    fn test_cancel_makes_ticks_inert() {
        let clock = ManualClock::new();
        let mut counter = Counter::new(100, Duration::from_millis(1000));

        counter.tick(&VISIBLE, &clock);
        counter.cancel();

        clock.advance(Duration::from_millis(2000));
        let frame = counter.tick(&VISIBLE, &clock);
        assert!(!frame.running);
        assert!(!counter.is_finished());
    }

    #[test]
    fn test_counters_are_independent() {
        let clock = ManualClock::new();
        let mut a = Counter::new(10, Duration::from_millis(100));
        let mut b = Counter::new(10, Duration::from_millis(100));

        a.tick(&VISIBLE, &clock);
        // b never saw visibility; a's arming must not affect it
        let frame = b.tick(&HIDDEN, &clock);
        assert!(!b.has_started());
        assert_eq!(frame.value, 0);
        assert!(a.has_started());
    }
}
