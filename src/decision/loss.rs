/// Asymmetric loss over a realized outcome and a point prediction. When the
/// two strictly disagree in sign, the loss is quadratic in the prediction
/// magnitude (not in the error), strongly discouraging confident
/// wrong-direction bets:
///
///   alpha * prediction^2 - signum(outcome) * prediction + |outcome|
///
/// When the signs agree, or either side is exactly zero, it is the ordinary
/// absolute error |outcome - prediction|. A zero outcome routes to the
/// same-sign branch, since the strict test 0 * prediction < 0 never holds.
pub fn sign_loss(outcome : f64, prediction : f64, alpha : f64) -> f64 {
    if outcome * prediction < 0.0 {
        // outcome is nonzero here, so signum is exactly +/- 1
        alpha * prediction * prediction - outcome.signum() * prediction + outcome.abs()
    } else {
        (outcome - prediction).abs()
    }
}

/// Branchwise loss of a single scalar prediction against each outcome of a
/// population. Empty populations yield an empty vector.
pub fn sign_loss_vec(outcomes : &[f64], prediction : f64, alpha : f64) -> Vec<f64> {
    outcomes.iter().map(|r| sign_loss(*r, prediction, alpha) ).collect()
}

/// Empirical mean of the loss over a population of simulated outcomes; the
/// objective the Bayes-optimal prediction minimizes. Callers guarantee a
/// non-empty population.
pub fn expected_sign_loss(outcomes : &[f64], prediction : f64, alpha : f64) -> f64 {
    let total : f64 = outcomes.iter().map(|r| sign_loss(*r, prediction, alpha) ).sum();
    total / outcomes.len() as f64
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn same_sign_is_absolute_error() {
        assert!((sign_loss(0.04, 0.01, 100.0) - 0.03).abs() < 1e-15);
        assert!((sign_loss(-0.04, -0.01, 100.0) - 0.03).abs() < 1e-15);
        assert!((sign_loss(2.0, 2.0, 7.0)).abs() < 1e-15);
    }

    #[test]
    fn opposite_sign_matches_the_quadratic_formula() {
        let (t, p, alpha) : (f64, f64, f64) = (0.02, -0.01, 100.0);
        let expect = alpha * p * p - t.signum() * p + t.abs();
        assert!((sign_loss(t, p, alpha) - expect).abs() < 1e-15);
        let (t, p) : (f64, f64) = (-0.02, 0.01);
        let expect = alpha * p * p - t.signum() * p + t.abs();
        assert!((sign_loss(t, p, alpha) - expect).abs() < 1e-15);
    }

    // The contract is the exact branch formula, not a non-negativity
    // invariant: for a tiny sign-mismatched prediction the quadratic branch
    // simply evaluates to what the formula says.
    #[test]
    fn quadratic_branch_is_the_formula_even_for_tiny_predictions() {
        let loss = sign_loss(1.0, -0.001, 100.0);
        let expect = 100.0 * 0.001 * 0.001 + 0.001 + 1.0;
        assert!((loss - expect).abs() < 1e-12);
    }

    #[test]
    fn zero_outcome_routes_to_the_same_sign_branch() {
        assert!((sign_loss(0.0, -0.3, 100.0) - 0.3).abs() < 1e-15);
        assert!((sign_loss(0.0, 0.3, 100.0) - 0.3).abs() < 1e-15);
        // zero prediction against either sign is plain absolute error too
        assert!((sign_loss(-0.2, 0.0, 100.0) - 0.2).abs() < 1e-15);
    }

    #[test]
    fn vectorized_equals_elementwise() {
        let outcomes = [0.03, -0.02, 0.0, 0.5, -1.0];
        let losses = sign_loss_vec(&outcomes, -0.01, 50.0);
        assert_eq!(losses.len(), outcomes.len());
        for (r, l) in outcomes.iter().zip(losses.iter()) {
            assert_eq!(*l, sign_loss(*r, -0.01, 50.0));
        }
        assert!(sign_loss_vec(&[], -0.01, 50.0).is_empty());
    }

    #[test]
    fn expected_loss_is_the_population_mean() {
        let outcomes = [0.05, -0.05];
        let mean = expected_sign_loss(&outcomes, 0.01, 100.0);
        let by_hand = (sign_loss(0.05, 0.01, 100.0) + sign_loss(-0.05, 0.01, 100.0)) / 2.0;
        assert!((mean - by_hand).abs() < 1e-15);
    }

}
