//! Progress indicator state, advanced by the host's frame loop
//!
//! A determinate bar eases its displayed fill toward the target value. Switching
//! to indeterminate mode first drains the current fill, then sweeps a bar of
//! fixed width back and forth across the track. Leaving indeterminate mode takes
//! effect at the end of the current sweep cycle, and the determinate fill then
//! grows again from zero.

use std::time::Duration;

use crate::layout::{Bounds, LayoutError, Paintable, Style};
use crate::renderer::Painter;

/// Default track length in pixels
pub const DEFAULT_TRACK: f64 = 120.0;

/// Width of the sweeping bar on tracks longer than this
pub const BAR_WIDTH: f64 = 40.0;

/// Default animation speed in pixels per second
pub const DEFAULT_SPEED: f64 = 200.0;

/// Direction of an indeterminate sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Stage of one sweep pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepPhase {
    /// Bar extends from the leading edge
    Growing,
    /// Full-width bar travels along the track
    Sliding,
    /// Bar retracts into the far edge
    Shrinking,
}

/// Animation state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressState {
    /// Displayed fill eases toward the target
    Determinate,
    /// Fill collapses before the sweep starts
    Draining,
    Sweep {
        direction: Direction,
        phase: SweepPhase,
        start: f64,
        length: f64,
    },
}

impl ProgressState {
    fn cycle_start() -> Self {
        ProgressState::Sweep {
            direction: Direction::Forward,
            phase: SweepPhase::Growing,
            start: 0.0,
            length: 0.0,
        }
    }
}

/// Progress bar model driven by [`tick`](ProgressModel::tick)
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressModel {
    min: f64,
    max: f64,
    value: f64,
    track: f64,
    bar: f64,
    speed: f64,
    exit_indeterminate: bool,
    indeterminate: bool,
    displayed: f64,
    state: ProgressState,
}

impl ProgressModel {
    /// Create a model for values in `[min, max]`
    ///
    /// With `exit_indeterminate`, setting a value also leaves indeterminate mode.
    pub fn new(min: f64, max: f64, exit_indeterminate: bool) -> Result<Self, LayoutError> {
        if !(min.is_finite() && max.is_finite()) || min > max {
            return Err(LayoutError::invalid_value(format!(
                "progress range [{}, {}] is empty",
                min, max
            )));
        }
        Ok(Self {
            min,
            max,
            value: min,
            track: DEFAULT_TRACK,
            bar: BAR_WIDTH,
            speed: DEFAULT_SPEED,
            exit_indeterminate,
            indeterminate: false,
            displayed: 0.0,
            state: ProgressState::Determinate,
        })
    }

    /// Set the track length; short tracks sweep a bar of 40% of their length
    pub fn with_track(mut self, track: f64) -> Self {
        self.track = track.max(0.0);
        self.bar = if self.track <= BAR_WIDTH {
            self.track * 0.4
        } else {
            BAR_WIDTH
        };
        self.displayed = self.displayed.min(self.track);
        self
    }

    /// Set the speed in pixels per second
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed.max(0.0);
        self
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn track(&self) -> f64 {
        self.track
    }

    pub fn bar_width(&self) -> f64 {
        self.bar
    }

    pub fn state(&self) -> ProgressState {
        self.state
    }

    pub fn is_indeterminate(&self) -> bool {
        self.indeterminate
    }

    /// Set the value, clamped to the range
    pub fn set_value(&mut self, value: f64) {
        self.value = value.clamp(self.min, self.max);
        if self.exit_indeterminate && self.indeterminate {
            self.set_indeterminate(false);
        }
    }

    /// Enter or leave indeterminate mode
    ///
    /// Entering drains the determinate fill first; leaving waits for the
    /// current sweep cycle to finish.
    pub fn set_indeterminate(&mut self, indeterminate: bool) {
        self.indeterminate = indeterminate;
        if indeterminate && self.state == ProgressState::Determinate {
            self.state = ProgressState::Draining;
        }
    }

    /// Fill length the displayed bar is heading for
    pub fn target(&self) -> f64 {
        let range = self.max - self.min;
        if range <= 0.0 {
            return 0.0;
        }
        (self.value - self.min) / range * self.track
    }

    /// Painted fill as `(start, length)` along the track
    pub fn fill(&self) -> (f64, f64) {
        match self.state {
            ProgressState::Determinate | ProgressState::Draining => (0.0, self.displayed),
            ProgressState::Sweep { start, length, .. } => (start, length),
        }
    }

    /// Whether further ticks would change the fill
    pub fn is_animating(&self) -> bool {
        match self.state {
            ProgressState::Determinate => self.displayed != self.target(),
            _ => true,
        }
    }

    /// Advance the animation by `dt`; returns whether it is still animating
    pub fn tick(&mut self, dt: Duration) -> bool {
        let mut budget = self.speed * dt.as_secs_f64();
        // a degenerate track makes every phase zero-length
        let mut transitions = 0;
        while budget > 0.0 && transitions < 16 {
            let (left, transitioned) = self.step(budget);
            budget = left;
            if transitioned {
                transitions += 1;
            }
        }
        self.is_animating()
    }

    /// Consume up to `budget` pixels of travel in the current state
    fn step(&mut self, budget: f64) -> (f64, bool) {
        match self.state {
            ProgressState::Determinate => {
                let target = self.target();
                let gap = target - self.displayed;
                if gap.abs() <= budget {
                    self.displayed = target;
                } else {
                    self.displayed += budget.copysign(gap);
                }
                (0.0, false)
            }
            ProgressState::Draining => {
                if self.displayed > budget {
                    self.displayed -= budget;
                    return (0.0, false);
                }
                let left = budget - self.displayed;
                self.displayed = 0.0;
                self.state = if self.indeterminate {
                    ProgressState::cycle_start()
                } else {
                    ProgressState::Determinate
                };
                (left, true)
            }
            ProgressState::Sweep {
                direction,
                phase,
                start,
                length,
            } => self.sweep(direction, phase, start, length, budget),
        }
    }

    fn sweep(
        &mut self,
        direction: Direction,
        phase: SweepPhase,
        mut start: f64,
        mut length: f64,
        budget: f64,
    ) -> (f64, bool) {
        let remaining = match (direction, phase) {
            (_, SweepPhase::Growing) => self.bar - length,
            (Direction::Forward, SweepPhase::Sliding) => self.track - self.bar - start,
            (Direction::Backward, SweepPhase::Sliding) => start,
            (_, SweepPhase::Shrinking) => length,
        }
        .max(0.0);
        let travel = budget.min(remaining);

        match (direction, phase) {
            (Direction::Forward, SweepPhase::Growing) => length += travel,
            (Direction::Forward, SweepPhase::Sliding) => start += travel,
            (Direction::Forward, SweepPhase::Shrinking) => {
                start += travel;
                length -= travel;
            }
            (Direction::Backward, SweepPhase::Growing) => {
                start -= travel;
                length += travel;
            }
            (Direction::Backward, SweepPhase::Sliding) => start -= travel,
            (Direction::Backward, SweepPhase::Shrinking) => length -= travel,
        }

        if travel < remaining {
            self.state = ProgressState::Sweep {
                direction,
                phase,
                start,
                length,
            };
            return (0.0, false);
        }

        self.state = match (direction, phase) {
            (_, SweepPhase::Growing) => ProgressState::Sweep {
                direction,
                phase: SweepPhase::Sliding,
                start,
                length: self.bar,
            },
            (Direction::Forward, SweepPhase::Sliding) => ProgressState::Sweep {
                direction,
                phase: SweepPhase::Shrinking,
                start: self.track - self.bar,
                length,
            },
            (Direction::Backward, SweepPhase::Sliding) => ProgressState::Sweep {
                direction,
                phase: SweepPhase::Shrinking,
                start: 0.0,
                length,
            },
            (Direction::Forward, SweepPhase::Shrinking) => ProgressState::Sweep {
                direction: Direction::Backward,
                phase: SweepPhase::Growing,
                start: self.track,
                length: 0.0,
            },
            (Direction::Backward, SweepPhase::Shrinking) => {
                if self.indeterminate {
                    ProgressState::cycle_start()
                } else {
                    tracing::trace!("indeterminate sweep finished");
                    self.displayed = 0.0;
                    ProgressState::Determinate
                }
            }
        };
        (budget - travel, true)
    }
}

impl Paintable for ProgressModel {
    fn paint(&self, bounds: Bounds, painter: &mut dyn Painter) {
        painter.fill_rect(bounds, &Style::new().with_class("progress"));
        if self.track <= 0.0 {
            return;
        }
        let ratio = bounds.width / self.track;
        let (start, length) = self.fill();
        if length > 0.0 {
            let bar = Bounds::new(
                bounds.x + start * ratio,
                bounds.y,
                length * ratio,
                bounds.height,
            );
            painter.fill_rect(bar, &Style::new().with_class("progress-bar"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{PaintOp, RecordingPainter};

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    /// 100 px per second: one millisecond moves 0.1 px, 10 ms move 1 px
    fn model() -> ProgressModel {
        ProgressModel::new(0.0, 100.0, true)
            .unwrap()
            .with_track(120.0)
            .with_speed(100.0)
    }

    #[test]
    fn test_empty_range_rejected() {
        assert!(ProgressModel::new(5.0, 1.0, false).is_err());
        assert!(ProgressModel::new(f64::NAN, 1.0, false).is_err());
    }

    #[test]
    fn test_bar_width_on_short_track() {
        let m = ProgressModel::new(0.0, 1.0, false).unwrap().with_track(30.0);
        assert_eq!(m.bar_width(), 12.0);
        assert_eq!(model().bar_width(), 40.0);
    }

    #[test]
    fn test_determinate_eases_toward_target() {
        let mut m = model();
        m.set_value(50.0);
        assert_eq!(m.target(), 60.0);
        assert!(m.tick(Duration::from_millis(200)));
        assert_eq!(m.fill(), (0.0, 20.0));
        assert!(!m.tick(Duration::from_secs(1)));
        assert_eq!(m.fill(), (0.0, 60.0));

        m.set_value(250.0);
        assert_eq!(m.value(), 100.0);
        m.set_value(25.0);
        m.tick(Duration::from_secs(1));
        assert_eq!(m.fill(), (0.0, 30.0));
    }

    #[test]
    fn test_drain_then_sweep() {
        let mut m = model();
        m.set_value(25.0);
        m.tick(Duration::from_secs(1));
        m.set_indeterminate(true);
        assert_eq!(m.state(), ProgressState::Draining);

        // 30 px drain, then 10 px of growth
        m.tick(Duration::from_millis(400));
        assert_eq!(
            m.state(),
            ProgressState::Sweep {
                direction: Direction::Forward,
                phase: SweepPhase::Growing,
                start: 0.0,
                length: 10.0
            }
        );
    }

    #[test]
    fn test_full_cycle_reverses_direction() {
        let mut m = model();
        m.set_indeterminate(true);
        // grow 40, slide 80, shrink 40: the bar leaves through the far edge
        m.tick(Duration::from_millis(1600));
        assert_eq!(
            m.state(),
            ProgressState::Sweep {
                direction: Direction::Backward,
                phase: SweepPhase::Growing,
                start: 120.0,
                length: 0.0
            }
        );
        m.tick(Duration::from_millis(100));
        assert_eq!(m.fill(), (110.0, 10.0));
        // back to the start of the cycle
        m.tick(Duration::from_millis(1500));
        assert_eq!(m.state(), ProgressState::cycle_start());
    }

    #[test]
    fn test_exit_waits_for_cycle_end() {
        let mut m = model();
        m.set_indeterminate(true);
        m.tick(Duration::from_millis(500));
        m.set_value(50.0);
        assert!(!m.is_indeterminate());
        assert!(matches!(m.state(), ProgressState::Sweep { .. }));

        // remainder of the 3.2 s cycle
        m.tick(Duration::from_millis(2700));
        assert_eq!(m.state(), ProgressState::Determinate);
        assert_eq!(m.fill(), (0.0, 0.0));
        m.tick(Duration::from_millis(100));
        assert_eq!(m.fill(), (0.0, 10.0));
    }

    #[test]
    fn test_leave_during_drain() {
        let mut m = ProgressModel::new(0.0, 100.0, false)
            .unwrap()
            .with_track(120.0)
            .with_speed(100.0);
        m.set_value(50.0);
        m.tick(Duration::from_secs(1));
        m.set_indeterminate(true);
        m.tick(ms(100));
        m.set_indeterminate(false);
        m.tick(ms(1000));
        assert_eq!(m.state(), ProgressState::Determinate);
        assert!(m.is_animating());
    }

    #[test]
    fn test_zero_track_does_not_spin() {
        let mut m = ProgressModel::new(0.0, 1.0, false).unwrap().with_track(0.0);
        m.set_indeterminate(true);
        assert!(m.tick(Duration::from_secs(10)));
    }

    #[test]
    fn test_paint_scales_fill_to_bounds() {
        let mut m = model();
        m.set_value(50.0);
        m.tick(Duration::from_secs(2));
        let mut painter = RecordingPainter::new();
        m.paint(Bounds::new(0.0, 0.0, 240.0, 10.0), &mut painter);
        assert_eq!(
            painter.ops,
            vec![
                PaintOp::Fill(Bounds::new(0.0, 0.0, 240.0, 10.0)),
                PaintOp::Fill(Bounds::new(0.0, 0.0, 120.0, 10.0)),
            ]
        );
    }
}
