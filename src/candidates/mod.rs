//! Candidate Generation
//!
//! The full transition space (every order size × every cash split) is far too large to
//! enumerate, so the search only explores the order sizes and cash payments produced
//! here.

pub mod cash;
pub mod quantity;

pub use cash::{CashCandidates, cash_candidates};
pub use quantity::{QuantityCandidates, quantity_candidates};
