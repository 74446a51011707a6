//! Kelly fraction.

use rust_decimal::Decimal;

/// Optimal fraction of bankroll to risk, in `[0, 1]`.
///
/// `f = (p·b − q) / b` with `q = 1 − p` and `b = |win_return / loss_return|`.
///
/// Returns zero when `p` is outside `(0, 1)`, when either return is zero,
/// when the edge is negative, or when the arithmetic overflows.
#[must_use]
pub fn kelly_fraction(win_probability: Decimal, win_return: Decimal, loss_return: Decimal) -> Decimal {
    let p = win_probability;
    if p <= Decimal::ZERO || p >= Decimal::ONE {
        return Decimal::ZERO;
    }
    if win_return.is_zero() || loss_return.is_zero() {
        return Decimal::ZERO;
    }

    let q = Decimal::ONE - p;
    let fraction = win_return
        .checked_div(loss_return)
        .map(|ratio| ratio.abs())
        .and_then(|b| {
            p.checked_mul(b)
                .and_then(|pb| pb.checked_sub(q))
                .and_then(|edge| edge.checked_div(b))
        });

    match fraction {
        Some(f) if f > Decimal::ZERO => f.min(Decimal::ONE),
        _ => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use test_case::test_case;

    #[test_case(dec!(0.6), dec!(1), dec!(-1), dec!(0.2) ; "even money with edge")]
    #[test_case(dec!(0.4), dec!(1), dec!(-1), dec!(0) ; "negative edge")]
    #[test_case(dec!(0.5), dec!(2), dec!(-1), dec!(0.25) ; "two to one")]
    #[test_case(dec!(0.5), dec!(1), dec!(-1), dec!(0) ; "no edge")]
    #[test_case(dec!(0), dec!(1), dec!(-1), dec!(0) ; "zero probability")]
    #[test_case(dec!(1), dec!(1), dec!(-1), dec!(0) ; "certain win")]
    #[test_case(dec!(1.2), dec!(1), dec!(-1), dec!(0) ; "probability above one")]
    #[test_case(dec!(-0.1), dec!(1), dec!(-1), dec!(0) ; "negative probability")]
    #[test_case(dec!(0.6), dec!(0), dec!(-1), dec!(0) ; "zero win return")]
    #[test_case(dec!(0.6), dec!(1), dec!(0), dec!(0) ; "zero loss return")]
    #[test_case(dec!(0.6), dec!(1), dec!(1), dec!(0.2) ; "loss sign ignored")]
    fn kelly_cases(p: Decimal, win: Decimal, loss: Decimal, expected: Decimal) {
        assert_eq!(kelly_fraction(p, win, loss), expected);
    }

    #[test]
    fn kelly_extreme_payoff_stays_bounded() {
        let f = kelly_fraction(dec!(0.99), Decimal::MAX, dec!(0.0000001));
        assert!(f >= Decimal::ZERO && f <= Decimal::ONE);
    }

    proptest! {
        #[test]
        fn kelly_always_in_unit_interval(
            p in -20_000i64..=20_000,
            win in -1_000_000i64..=1_000_000,
            loss in -1_000_000i64..=1_000_000,
        ) {
            let f = kelly_fraction(Decimal::new(p, 4), Decimal::new(win, 3), Decimal::new(loss, 3));
            prop_assert!(f >= Decimal::ZERO);
            prop_assert!(f <= Decimal::ONE);
        }
    }
}
