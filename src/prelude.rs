//! Pointsplit prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    config::{
        EligibilityBasis, EligibilityRule, Objective, PlannerConfig, SearchTuning, TaxExclusion,
    },
    economics::OrderEconomics,
    fixtures::{FixtureError, Profile},
    plan::{OrderRow, PlanMeta, PlanRequest, PlanResult, PlanSummary},
    receipt::{PlanReceipt, ReceiptError},
    solvers::{
        PlanError, Solver,
        layered::{
            LayeredSolver,
            observer::{NoopObserver, PlanObserver},
        },
    },
};
