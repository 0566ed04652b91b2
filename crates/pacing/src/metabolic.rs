//! Energy cost of running on graded terrain.
//!
//! Uses the polynomial fit of Minetti et al. (2002), "Energy cost of walking
//! and running at extreme uphill and downhill slopes", J Appl Physiol 93.
//! Only the ratio of cost at a grade to cost on the flat is used, so the
//! absolute units (J/kg/m) never leak into paces.

/// Default magnitude (in percent) below which a grade counts as flat.
pub const DEFAULT_FLAT_GRADE_THRESHOLD: f64 = 0.1;

/// Cost of running in J/kg/m at `grade` (a decimal slope, e.g. 0.05 for +5%).
pub fn minetti_cost(grade: f64) -> f64 {
    let i = grade;
    155.4 * i.powi(5) - 30.4 * i.powi(4) - 43.3 * i.powi(3) + 46.3 * i.powi(2) + 19.5 * i + 3.6
}

/// Cost on level ground, the reference for all ratios.
pub fn flat_cost() -> f64 {
    minetti_cost(0.0)
}

/// Relative cost of a grade (in percent) versus flat ground.
///
/// Grades with magnitude below `flat_threshold` percent return exactly 1.
pub fn adjustment_factor_with_threshold(grade_percent: f64, flat_threshold: f64) -> f64 {
    if !grade_percent.is_finite() || grade_percent.abs() < flat_threshold {
        return 1.0;
    }
    minetti_cost(grade_percent / 100.0) / flat_cost()
}

/// Relative cost of a grade (in percent) versus flat ground.
pub fn adjustment_factor(grade_percent: f64) -> f64 {
    adjustment_factor_with_threshold(grade_percent, DEFAULT_FLAT_GRADE_THRESHOLD)
}

/// What a constant `flat_pace` feels like on this grade (grade-adjusted pace).
pub fn grade_adjusted_pace(flat_pace: f64, grade_percent: f64) -> f64 {
    flat_pace * adjustment_factor(grade_percent)
}

/// The actual pace that keeps effort equal to `flat_pace` on this grade.
pub fn actual_pace_for_gap(flat_pace: f64, grade_percent: f64) -> f64 {
    flat_pace / adjustment_factor(grade_percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_cost() {
        assert_eq!(flat_cost(), 3.6);
        assert_eq!(adjustment_factor(0.0), 1.0);
    }

    #[test]
    fn test_flat_threshold() {
        assert_eq!(adjustment_factor(0.09), 1.0);
        assert_eq!(adjustment_factor(-0.09), 1.0);
        assert!(adjustment_factor(0.1) > 1.0);
        assert_eq!(adjustment_factor_with_threshold(2.0, 5.0), 1.0);
    }

    #[test]
    fn test_uphill_costs_more() {
        let mut prev = 1.0;
        for g in [0.5, 1.0, 2.0, 5.0, 10.0, 20.0] {
            let f = adjustment_factor(g);
            assert!(f > prev, "factor at {g}% should exceed {prev}");
            prev = f;
        }
        // +10%: (155.4e-5 - 30.4e-4 - 43.3e-3 + 46.3e-2 + 1.95 + 3.6) / 3.6
        let expected = (0.001554 - 0.00304 - 0.0433 + 0.463 + 1.95 + 3.6) / 3.6;
        assert!((adjustment_factor(10.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_downhill_asymmetric() {
        let down = adjustment_factor(-5.0);
        let up = adjustment_factor(5.0);
        assert!(down < 1.0);
        assert!(1.0 - down < up - 1.0);
    }

    #[test]
    fn test_pace_helpers_are_inverse() {
        for g in [-8.0, -2.0, 0.0, 3.0, 7.5] {
            let gap = grade_adjusted_pace(450.0, g);
            let actual = actual_pace_for_gap(450.0, g);
            assert!((gap * actual - 450.0 * 450.0).abs() < 1e-6);
        }
        assert_eq!(grade_adjusted_pace(450.0, 0.05), 450.0);
    }

    #[test]
    fn test_non_finite_grade_is_flat() {
        assert_eq!(adjustment_factor(f64::NAN), 1.0);
    }
}
