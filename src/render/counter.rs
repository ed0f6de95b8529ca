//! Counter animation
//!
//! Hero counters count up from zero to their target once they scroll into
//! view. Frames are driven by the caller's clock; the animation only maps
//! a timestamp to the text to show.

use crate::project::format_thousands;

/// Default counter duration
pub const COUNTER_DURATION_MS: f64 = 2000.0;

/// Ease-out cubic over `[0, 1]`
pub fn ease_out_cubic(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(3)
}

/// Parse counter text such as `"12,500"` back into its integer
pub fn parse_counter_text(text: &str) -> Option<u64> {
    let digits: String = text.trim().chars().filter(|c| *c != ',').collect();
    digits.parse().ok()
}

/// One frame of a running counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: u64,
    pub text: String,
    pub finished: bool,
}

/// A single count-up run.
///
/// The first frame fixes the start time. Values never decrease, and the
/// frame at or past the duration shows exactly the target. There is no way
/// to cancel a run once started.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: u64,
    duration_ms: f64,
    start_ms: Option<f64>,
    last: u64,
    finished: bool,
}

impl CounterAnimation {
    pub fn new(target: u64) -> Self {
        Self::with_duration(target, COUNTER_DURATION_MS)
    }

    pub fn with_duration(target: u64, duration_ms: f64) -> Self {
        Self {
            target,
            duration_ms,
            start_ms: None,
            last: 0,
            finished: false,
        }
    }

    /// Animation towards the number shown in `text`
    pub fn from_text(text: &str) -> Option<Self> {
        parse_counter_text(text).map(Self::new)
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Compute the frame for timestamp `now_ms`
    pub fn tick(&mut self, now_ms: f64) -> CounterFrame {
        let start = *self.start_ms.get_or_insert(now_ms);
        let progress = if self.duration_ms > 0.0 {
            ((now_ms - start) / self.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let value = if progress >= 1.0 || self.finished {
            self.finished = true;
            self.target
        } else {
            let eased = (self.target as f64 * ease_out_cubic(progress)).floor() as u64;
            eased.clamp(self.last, self.target)
        };
        self.last = value;

        CounterFrame {
            value,
            text: format_thousands(value),
            finished: self.finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(animation: &mut CounterAnimation, stamps: &[f64]) -> Vec<CounterFrame> {
        stamps.iter().map(|t| animation.tick(*t)).collect()
    }

    #[test]
    fn test_ease_out_cubic_bounds() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn test_parse_counter_text() {
        assert_eq!(parse_counter_text("12,500"), Some(12500));
        assert_eq!(parse_counter_text(" 3 "), Some(3));
        assert_eq!(parse_counter_text("1,234,567"), Some(1_234_567));
        assert_eq!(parse_counter_text("n/a"), None);
        assert_eq!(parse_counter_text(""), None);
    }

    #[test]
    fn test_converges_with_regular_frames() {
        let mut animation = CounterAnimation::new(12500);
        let stamps: Vec<f64> = (0..=130).map(|i| 1000.0 + i as f64 * 16.0).collect();
        let frames = run(&mut animation, &stamps);

        let last = frames.last().expect("frames");
        assert!(last.finished);
        assert_eq!(last.text, "12,500");
        assert_eq!(frames[0].value, 0);
    }

    #[test]
    fn test_converges_with_irregular_frames() {
        let stamps = [
            5.0, 5.3, 41.0, 42.0, 400.7, 401.1, 999.9, 1333.3, 1999.0, 2004.9, 2005.0, 2500.0,
        ];
        let mut animation = CounterAnimation::new(12500);
        let frames = run(&mut animation, &stamps);

        for pair in frames.windows(2) {
            assert!(pair[0].value <= pair[1].value);
        }
        assert!(frames.iter().all(|f| f.value <= 12500));
        assert!(!frames[9].finished);
        assert!(frames[10].finished);
        assert_eq!(frames.last().map(|f| f.text.as_str()), Some("12,500"));
    }

    #[test]
    fn test_single_late_frame_jumps_to_target() {
        let mut animation = CounterAnimation::new(25416);
        animation.tick(0.0);
        let frame = animation.tick(60_000.0);
        assert!(frame.finished);
        assert_eq!(frame.text, "25,416");
    }

    #[test]
    fn test_clock_going_backwards_never_decreases() {
        let mut animation = CounterAnimation::new(1000);
        animation.tick(0.0);
        let ahead = animation.tick(1000.0).value;
        let behind = animation.tick(500.0).value;
        assert!(behind >= ahead);
    }

    #[test]
    fn test_finished_counter_stays_at_target() {
        let mut animation = CounterAnimation::new(24);
        run(&mut animation, &[0.0, 2000.0]);
        assert!(animation.is_finished());
        assert_eq!(animation.tick(10.0).value, 24);
    }

    #[test]
    fn test_zero_target_and_zero_duration() {
        let mut animation = CounterAnimation::with_duration(0, 0.0);
        let frame = animation.tick(0.0);
        assert!(frame.finished);
        assert_eq!(frame.text, "0");

        let mut from_text = CounterAnimation::from_text("3").expect("parsable");
        assert_eq!(from_text.target(), 3);
        assert_eq!(from_text.tick(0.0).value, 0);
    }
}
