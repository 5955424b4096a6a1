//! Payout calculation from attendance.
//!
//! Converts days worked against a norm into a work percentage and the
//! final KPI amount. Both are rounded to two decimals, midpoint away from
//! zero. The final amount is derived from the unrounded ratio so that
//! rounding the percentage does not leak into the money figure.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// The result of a payout calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayoutResult {
    /// Attendance percentage in `[0, 100]`, two decimals.
    pub work_percent: Decimal,
    /// The payout amount, two decimals.
    pub kpi_final: Decimal,
}

/// Rounds to two decimal places, midpoint away from zero.
///
/// # Example
///
/// ```
/// use kpi_engine::calculation::round_2dp;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_2dp(Decimal::from_str("90.909090").unwrap()), Decimal::from_str("90.91").unwrap());
/// assert_eq!(round_2dp(Decimal::from_str("0.125").unwrap()), Decimal::from_str("0.13").unwrap());
/// ```
pub fn round_2dp(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Calculates the work percentage and final payout.
///
/// `work_percent = 100 × days_worked / days_assigned`, clamped to
/// `[0, 100]`; `kpi_final = work_percent / 100 × kpi_sum`.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] if `days_assigned` is zero,
/// `kpi_sum` is negative, or the arithmetic overflows.
///
/// # Example
///
/// ```
/// use kpi_engine::calculation::calculate_payout;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let payout = calculate_payout(Decimal::from(20), 22, Decimal::from(15000)).unwrap();
/// assert_eq!(payout.work_percent, Decimal::from_str("90.91").unwrap());
/// assert_eq!(payout.kpi_final, Decimal::from_str("13636.36").unwrap());
/// ```
pub fn calculate_payout(
    days_worked: Decimal,
    days_assigned: u32,
    kpi_sum: Decimal,
) -> EngineResult<PayoutResult> {
    if days_assigned == 0 {
        return Err(EngineError::CalculationError {
            message: "norm of zero days".to_string(),
        });
    }
    if kpi_sum.is_sign_negative() && !kpi_sum.is_zero() {
        return Err(EngineError::CalculationError {
            message: format!("negative KPI amount {}", kpi_sum),
        });
    }

    let ratio = days_worked
        .checked_div(Decimal::from(days_assigned))
        .ok_or_else(|| overflow("work ratio"))?
        .clamp(Decimal::ZERO, Decimal::ONE);

    let work_percent = ratio
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| overflow("work percent"))?;
    let kpi_final = ratio
        .checked_mul(kpi_sum)
        .ok_or_else(|| overflow("KPI amount"))?;

    Ok(PayoutResult {
        work_percent: round_2dp(work_percent),
        kpi_final: round_2dp(kpi_final),
    })
}

fn overflow(what: &str) -> EngineError {
    EngineError::CalculationError {
        message: format!("decimal overflow computing {}", what),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_full_attendance_pays_full_amount() {
        let payout = calculate_payout(dec("22"), 22, dec("15000")).unwrap();
        assert_eq!(payout.work_percent, dec("100"));
        assert_eq!(payout.kpi_final, dec("15000"));
    }

    #[test]
    fn test_no_attendance_pays_nothing() {
        let payout = calculate_payout(Decimal::ZERO, 22, dec("15000")).unwrap();
        assert_eq!(payout.work_percent, Decimal::ZERO);
        assert_eq!(payout.kpi_final, Decimal::ZERO);
    }

    #[test]
    fn test_final_amount_uses_unrounded_ratio() {
        // 20/22 = 90.9090..%; via the rounded 90.91% it would be 13636.50
        let payout = calculate_payout(dec("20"), 22, dec("15000")).unwrap();
        assert_eq!(payout.work_percent, dec("90.91"));
        assert_eq!(payout.kpi_final, dec("13636.36"));
    }

    #[test]
    fn test_percent_clamped_above_100() {
        let payout = calculate_payout(dec("25"), 22, dec("1000")).unwrap();
        assert_eq!(payout.work_percent, dec("100"));
        assert_eq!(payout.kpi_final, dec("1000"));
    }

    #[test]
    fn test_percent_clamped_below_zero() {
        let payout = calculate_payout(dec("-3"), 22, dec("1000")).unwrap();
        assert_eq!(payout.work_percent, Decimal::ZERO);
        assert_eq!(payout.kpi_final, Decimal::ZERO);
    }

    #[test]
    fn test_fractional_days() {
        // 10.5 / 21 = 50%
        let payout = calculate_payout(dec("10.5"), 21, dec("333.33")).unwrap();
        assert_eq!(payout.work_percent, dec("50"));
        assert_eq!(payout.kpi_final, dec("166.67"));
    }

    #[test]
    fn test_zero_norm_is_error() {
        let result = calculate_payout(dec("1"), 0, dec("1000"));
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_negative_amount_is_error() {
        match calculate_payout(dec("1"), 22, dec("-5")) {
            Err(EngineError::CalculationError { message }) => {
                assert!(message.contains("negative"));
            }
            other => panic!("Expected CalculationError, got {:?}", other),
        }
    }

    #[test]
    fn test_round_2dp_midpoint_away_from_zero() {
        assert_eq!(round_2dp(dec("1.005")), dec("1.01"));
        assert_eq!(round_2dp(dec("1.004")), dec("1.00"));
        assert_eq!(round_2dp(dec("-1.005")), dec("-1.01"));
    }
}
