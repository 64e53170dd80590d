//! Calibration mapper
//!
//! The converter's control input is not linear in its real output: asking
//! for 5.0 V on the control pin produces 6.22 V at the terminals. A small
//! table of measured points corrects for this with piecewise-linear
//! interpolation, continuing the end segments linearly outside the table
//! instead of clamping.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single calibration measurement
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationPoint {
    /// Voltage measured at the converter output (V)
    pub measured_v: f32,
    /// Setpoint that was programmed to produce `measured_v` (V)
    pub setpoint_v: f32,
}

impl CalibrationPoint {
    /// Create a new calibration point
    pub const fn new(measured_v: f32, setpoint_v: f32) -> Self {
        Self {
            measured_v,
            setpoint_v,
        }
    }

    /// Slope (setpoint per measured volt) of the segment `self -> next`
    fn slope_to(&self, next: &CalibrationPoint) -> f32 {
        (next.setpoint_v - self.setpoint_v) / (next.measured_v - self.measured_v)
    }
}

/// Errors detected when building a calibration table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// Fewer than two points; no segment to interpolate on
    TooFewPoints,
    /// Measured voltage at `index` is not above the previous point
    NotIncreasing { index: usize },
}

/// Reference measurements for the SC8903-based adjustable converter
///
/// Format: (measured output voltage, setpoint that produced it)
const REFERENCE_POINTS: &[CalibrationPoint] = &[
    CalibrationPoint::new(1.38, 1.0),
    CalibrationPoint::new(2.66, 2.0),
    CalibrationPoint::new(6.22, 5.0),
    CalibrationPoint::new(8.88, 7.5),
    CalibrationPoint::new(11.22, 10.0),
    CalibrationPoint::new(12.92, 12.0),
    CalibrationPoint::new(15.15, 15.0),
];

/// Calibration table for the reference converter
pub const REFERENCE_TABLE: CalibrationTable<'static> = CalibrationTable {
    points: REFERENCE_POINTS,
};

/// Ordered calibration table
///
/// Holds at least two points with strictly increasing measured voltage.
/// Tables are immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationTable<'a> {
    points: &'a [CalibrationPoint],
}

impl<'a> CalibrationTable<'a> {
    /// Build a table from measured points
    ///
    /// Rejects tables with fewer than two points or with measured voltages
    /// that are not strictly increasing (including NaN entries).
    pub fn new(points: &'a [CalibrationPoint]) -> Result<Self, CalibrationError> {
        if points.len() < 2 {
            return Err(CalibrationError::TooFewPoints);
        }

        for (i, pair) in points.windows(2).enumerate() {
            // Written as a negated comparison so NaN fails too
            if !(pair[1].measured_v > pair[0].measured_v) {
                return Err(CalibrationError::NotIncreasing { index: i + 1 });
            }
        }

        Ok(Self { points })
    }

    /// Setpoint required to make the converter output `desired_v`
    ///
    /// Below the first point and above the last point the nearest segment
    /// is extrapolated, so very low requests can produce a negative
    /// setpoint. Inside the table the bracketing segment is interpolated.
    pub fn setpoint_for(&self, desired_v: f32) -> f32 {
        let (first, second) = match self.points {
            [first, second, ..] => (first, second),
            _ => return desired_v,
        };
        if desired_v <= first.measured_v {
            return first.setpoint_v - first.slope_to(second) * (first.measured_v - desired_v);
        }

        let (penultimate, last) = match self.points {
            [.., penultimate, last] => (penultimate, last),
            _ => return desired_v,
        };
        if desired_v >= last.measured_v {
            return last.setpoint_v + penultimate.slope_to(last) * (desired_v - last.measured_v);
        }

        for pair in self.points.windows(2) {
            let (lo, hi) = (&pair[0], &pair[1]);
            if desired_v >= lo.measured_v && desired_v <= hi.measured_v {
                let v_range = hi.measured_v - lo.measured_v;
                let s_range = hi.setpoint_v - lo.setpoint_v;
                let v_delta = desired_v - lo.measured_v;
                return lo.setpoint_v + (v_delta / v_range) * s_range;
            }
        }

        // Unreachable for a monotonic table; NaN requests end up here
        desired_v
    }
}

impl Default for CalibrationTable<'static> {
    fn default() -> Self {
        REFERENCE_TABLE
    }
}

/// Setpoint for `desired_v` using the reference calibration table
pub fn calibrated_setpoint(desired_v: f32) -> f32 {
    REFERENCE_TABLE.setpoint_for(desired_v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_reference_table_is_valid() {
        let table = CalibrationTable::new(REFERENCE_POINTS).unwrap();
        assert_eq!(table, REFERENCE_TABLE);
        assert_eq!(CalibrationTable::default(), REFERENCE_TABLE);
    }

    #[test]
    fn test_calibration_points_map_exactly() {
        for point in REFERENCE_POINTS {
            assert_eq!(calibrated_setpoint(point.measured_v), point.setpoint_v);
        }
    }

    #[test]
    fn test_interpolation_between_points() {
        // Between (2.66, 2.0) and (6.22, 5.0)
        let setpoint = calibrated_setpoint(5.0);
        assert!(approx_eq(setpoint, 2.0 + (5.0 - 2.66) / (6.22 - 2.66) * 3.0));
        assert!(approx_eq(setpoint, 3.971_91));

        // Between (11.22, 10.0) and (12.92, 12.0)
        assert!(approx_eq(calibrated_setpoint(12.0), 10.917_647));
    }

    #[test]
    fn test_extrapolation_below_table() {
        // Slope of first segment is 1.0 / 1.28
        assert!(approx_eq(calibrated_setpoint(0.0), -0.078_125));
        assert!(calibrated_setpoint(-5.0) < calibrated_setpoint(0.0));
    }

    #[test]
    fn test_extrapolation_above_table() {
        // Slope of last segment is 3.0 / 2.23
        let expected = 15.0 + 3.0 / 2.23 * (16.0 - 15.15);
        assert!(approx_eq(calibrated_setpoint(16.0), expected));
    }

    #[test]
    fn test_nan_falls_back_to_input() {
        assert!(calibrated_setpoint(f32::NAN).is_nan());
    }

    #[test]
    fn test_custom_table() {
        let points = [CalibrationPoint::new(0.0, 0.0), CalibrationPoint::new(10.0, 5.0)];
        let table = CalibrationTable::new(&points).unwrap();

        assert!(approx_eq(table.setpoint_for(4.0), 2.0));
        assert!(approx_eq(table.setpoint_for(20.0), 10.0));
        assert!(approx_eq(table.setpoint_for(-2.0), -1.0));
    }

    #[test]
    fn test_rejects_short_table() {
        let points = [CalibrationPoint::new(1.0, 1.0)];
        assert_eq!(
            CalibrationTable::new(&points),
            Err(CalibrationError::TooFewPoints)
        );
        assert_eq!(
            CalibrationTable::new(&[]),
            Err(CalibrationError::TooFewPoints)
        );
    }

    #[test]
    fn test_rejects_non_increasing_table() {
        let points = [
            CalibrationPoint::new(1.0, 1.0),
            CalibrationPoint::new(3.0, 2.0),
            CalibrationPoint::new(3.0, 4.0),
        ];
        assert_eq!(
            CalibrationTable::new(&points),
            Err(CalibrationError::NotIncreasing { index: 2 })
        );

        let points = [CalibrationPoint::new(1.0, 1.0), CalibrationPoint::new(f32::NAN, 2.0)];
        assert_eq!(
            CalibrationTable::new(&points),
            Err(CalibrationError::NotIncreasing { index: 1 })
        );
    }

    proptest! {
        #[test]
        fn prop_monotonic_inside_table(a in 1.38f32..15.15, b in 1.38f32..15.15) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(calibrated_setpoint(lo) <= calibrated_setpoint(hi) + EPSILON);
        }

        #[test]
        fn prop_monotonic_everywhere(a in -20.0f32..40.0, b in -20.0f32..40.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(calibrated_setpoint(lo) <= calibrated_setpoint(hi) + EPSILON);
        }

        #[test]
        fn prop_continuous_at_table_edges(delta in 0.0f32..1e-3) {
            for edge in [1.38f32, 15.15] {
                let below = calibrated_setpoint(edge - delta);
                let above = calibrated_setpoint(edge + delta);
                prop_assert!((above - below).abs() < 0.01);
            }
        }

        #[test]
        fn prop_stays_within_bracket(v in 1.38f32..15.15) {
            let pair = REFERENCE_POINTS
                .windows(2)
                .find(|p| v >= p[0].measured_v && v <= p[1].measured_v)
                .unwrap();
            let setpoint = calibrated_setpoint(v);
            prop_assert!(setpoint >= pair[0].setpoint_v - EPSILON);
            prop_assert!(setpoint <= pair[1].setpoint_v + EPSILON);
        }
    }
}
