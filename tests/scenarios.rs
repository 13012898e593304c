//! Integration tests for end-to-end planning scenarios

use testresult::TestResult;

use pointsplit::{
    config::{EligibilityBasis, Objective, PlannerConfig, TaxExclusion},
    plan::PlanRequest,
    solvers::{Solver, layered::LayeredSolver},
};

#[test]
fn single_item_below_threshold_pays_full_price() -> TestResult {
    let result = LayeredSolver::default().solve(&PlanRequest::new(1), &PlannerConfig::default())?;

    assert_eq!(result.summary.order_count, 1);
    assert_eq!(result.summary.cash_total, 1_800);
    assert_eq!(result.summary.leftover_points, 0);
    assert!(result.meta.exact);

    let order = result.orders.first().ok_or("missing order")?;

    assert_eq!(order.cash_paid, 1_800);
    assert_eq!(order.points_earned, 0);
    assert!(!order.eligible);

    Ok(())
}

#[test]
fn six_items_earn_points_in_one_order() -> TestResult {
    let result = LayeredSolver::default().solve(&PlanRequest::new(6), &PlannerConfig::default())?;

    assert_eq!(result.summary.order_count, 1);
    assert_eq!(result.summary.cash_total, 10_800);

    // floor(floor(10800 / 1.10) × 0.20) = floor(9818 × 0.20)
    assert_eq!(result.summary.leftover_points, 1_963);

    let order = result.orders.first().ok_or("missing order")?;

    assert_eq!(order.quantity, 6);
    assert_eq!(order.points_earned, 1_963);
    assert!(order.eligible);

    Ok(())
}

#[test]
fn twelve_items_reinvest_earned_points() -> TestResult {
    let result = LayeredSolver::default().solve(&PlanRequest::new(12), &PlannerConfig::default())?;

    // Ten items then two, paying the second order with the 3272 points earned: 18000 + 328.
    assert!(
        result.summary.cash_total <= 18_328,
        "cash total {} exceeds the ten-then-two plan",
        result.summary.cash_total
    );
    assert!(result.summary.order_count >= 2, "a single order cannot reuse points");
    assert_eq!(result.summary.gross_total, 21_600);
    assert!(result.meta.exact);

    Ok(())
}

#[test]
fn starting_points_beyond_gross_total_are_clamped() -> TestResult {
    let solver = LayeredSolver::default();
    let config = PlannerConfig::default();

    let huge = solver.solve(&PlanRequest::new(5).with_starting_points(1_000_000_000), &config)?;
    let exact = solver.solve(&PlanRequest::new(5).with_starting_points(9_000), &config)?;

    assert_eq!(huge.orders, exact.orders);
    assert_eq!(huge.summary, exact.summary);
    assert_eq!(huge.summary.starting_points, 9_000);
    assert_eq!(huge.summary.cash_total, 0);

    Ok(())
}

#[test]
fn negative_starting_points_are_treated_as_zero() -> TestResult {
    let solver = LayeredSolver::default();
    let config = PlannerConfig::default();

    let negative = solver.solve(&PlanRequest::new(7).with_starting_points(-500), &config)?;
    let zero = solver.solve(&PlanRequest::new(7), &config)?;

    assert_eq!(negative.orders, zero.orders);
    assert_eq!(negative.summary, zero.summary);

    Ok(())
}

#[test]
fn starting_points_reduce_cash() -> TestResult {
    let solver = LayeredSolver::default();
    let config = PlannerConfig::default();

    let without = solver.solve(&PlanRequest::new(8), &config)?;
    let with = solver.solve(&PlanRequest::new(8).with_starting_points(2_000), &config)?;

    assert!(
        with.summary.cash_total < without.summary.cash_total,
        "{} should be below {}",
        with.summary.cash_total,
        without.summary.cash_total
    );

    Ok(())
}

#[test]
fn objectives_share_the_minimum_cash() -> TestResult {
    let solver = LayeredSolver::default();

    for basis in [EligibilityBasis::OrderTotal, EligibilityBasis::CashPaid] {
        let base = PlannerConfig {
            tax_exclusion: TaxExclusion::RatioFloor,
            ..PlannerConfig::default()
        };
        let mut config = base;
        config.eligibility.basis = basis;

        let min_orders = solver.solve(
            &PlanRequest::new(18),
            &PlannerConfig {
                objective: Objective::MinOrders,
                ..config
            },
        )?;

        let min_leftover = solver.solve(
            &PlanRequest::new(18),
            &PlannerConfig {
                objective: Objective::MinLeftover,
                ..config
            },
        )?;

        assert_eq!(
            min_orders.summary.cash_total, min_leftover.summary.cash_total,
            "objectives disagree on cash under {basis:?}"
        );
    }

    Ok(())
}

#[test]
fn cash_basis_requires_cash_to_reach_threshold() -> TestResult {
    let mut config = PlannerConfig::default();
    config.eligibility.basis = EligibilityBasis::CashPaid;

    let result = LayeredSolver::default().solve(&PlanRequest::new(14).with_starting_points(3_000), &config)?;

    for order in &result.orders {
        assert_eq!(
            order.eligible,
            order.cash_paid >= config.eligibility.threshold,
            "order #{} eligibility does not follow its cash",
            order.index
        );
    }

    Ok(())
}

#[test]
fn zero_point_rate_degenerates_to_full_price() -> TestResult {
    let config = PlannerConfig {
        point_rate: rust_decimal::Decimal::ZERO,
        ..PlannerConfig::default()
    };

    let result = LayeredSolver::default().solve(&PlanRequest::new(9), &config)?;

    assert_eq!(result.summary.cash_total, 16_200);
    assert_eq!(result.summary.leftover_points, 0);

    Ok(())
}
