//! Daily-goal progress ratio and its colour.
//!
//! The colour walks through three bands as the day's work approaches the
//! goal: blue to light blue below 30%, light blue to light green up to 70%,
//! then light green to a vibrant green.

use serde::{Deserialize, Serialize};

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend from `self` to `other`, `t` in `0.0..=1.0`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(b) - f64::from(a)).mul_add(t, f64::from(a)).round() as u8;
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// `#rrggbb` form.
    #[must_use]
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

pub const BLUE: Rgb = Rgb::new(33, 102, 214);
pub const LIGHT_BLUE: Rgb = Rgb::new(110, 185, 240);
pub const LIGHT_GREEN: Rgb = Rgb::new(150, 215, 130);
pub const VIBRANT_GREEN: Rgb = Rgb::new(40, 200, 70);

const LOW_BAND_END: f64 = 0.30;
const MID_BAND_END: f64 = 0.70;

/// Which third of the colour ramp a ratio falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressBand {
    /// Below 30% of the goal.
    Low,
    /// 30% up to 70%.
    Mid,
    /// 70% and above.
    High,
}

impl ProgressBand {
    /// Band for a completion ratio.
    #[must_use]
    pub fn of(ratio: f64) -> Self {
        if ratio < LOW_BAND_END {
            Self::Low
        } else if ratio < MID_BAND_END {
            Self::Mid
        } else {
            Self::High
        }
    }
}

/// Completion ratio `min(minutes / goal, 1.0)`.
///
/// A zero goal counts as complete.
#[must_use]
pub fn progress_ratio(minutes_completed: u32, goal_minutes: u32) -> f64 {
    if goal_minutes == 0 {
        return 1.0;
    }
    (f64::from(minutes_completed) / f64::from(goal_minutes)).min(1.0)
}

/// Colour for a completion ratio.
#[must_use]
pub fn progress_color(ratio: f64) -> Rgb {
    let ratio = ratio.clamp(0.0, 1.0);
    match ProgressBand::of(ratio) {
        ProgressBand::Low => BLUE.lerp(LIGHT_BLUE, ratio / LOW_BAND_END),
        ProgressBand::Mid => LIGHT_BLUE.lerp(
            LIGHT_GREEN,
            (ratio - LOW_BAND_END) / (MID_BAND_END - LOW_BAND_END),
        ),
        ProgressBand::High => {
            LIGHT_GREEN.lerp(VIBRANT_GREEN, (ratio - MID_BAND_END) / (1.0 - MID_BAND_END))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(a: Rgb, b: Rgb) -> i32 {
        (i32::from(a.r) - i32::from(b.r)).abs()
            + (i32::from(a.g) - i32::from(b.g)).abs()
            + (i32::from(a.b) - i32::from(b.b)).abs()
    }

    #[test]
    fn test_progress_ratio() {
        assert!((progress_ratio(60, 240) - 0.25).abs() < f64::EPSILON);
        assert!((progress_ratio(300, 240) - 1.0).abs() < f64::EPSILON);
        assert!((progress_ratio(0, 240)).abs() < f64::EPSILON);
        assert!((progress_ratio(5, 0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(ProgressBand::of(0.0), ProgressBand::Low);
        assert_eq!(ProgressBand::of(0.299), ProgressBand::Low);
        assert_eq!(ProgressBand::of(0.30), ProgressBand::Mid);
        assert_eq!(ProgressBand::of(0.699), ProgressBand::Mid);
        assert_eq!(ProgressBand::of(0.70), ProgressBand::High);
        assert_eq!(ProgressBand::of(1.0), ProgressBand::High);
    }

    #[test]
    fn test_band_endpoints() {
        assert_eq!(progress_color(0.0), BLUE);
        assert_eq!(progress_color(0.30), LIGHT_BLUE);
        assert_eq!(progress_color(0.70), LIGHT_GREEN);
        assert_eq!(progress_color(1.0), VIBRANT_GREEN);
    }

    #[test]
    fn test_interpolation_is_monotonic_within_band() {
        let bands = [
            (0.0, 0.29, BLUE),
            (0.30, 0.69, LIGHT_BLUE),
            (0.70, 1.0, LIGHT_GREEN),
        ];

        for (start, end, origin) in bands {
            let mut last = 0;
            let steps = 20;
            for i in 0..=steps {
                let r = start + (end - start) * f64::from(i) / f64::from(steps);
                let d = distance(progress_color(r), origin);
                assert!(d >= last, "colour moved backwards at ratio {r}");
                last = d;
            }
        }
    }

    #[test]
    fn test_hex() {
        assert_eq!(Rgb::new(255, 0, 16).hex(), "#ff0010");
    }
}
