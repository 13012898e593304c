//! Pointsplit
//!
//! Pointsplit plans how to split a purchase of identical items into sequential orders so
//! that loyalty points earned on earlier orders pay for later ones, minimising the total
//! cash spent.

pub mod candidates;
pub mod config;
pub mod consolidation;
pub mod economics;
pub mod fixtures;
pub mod frontier;
pub mod plan;
pub mod prelude;
pub mod rates;
pub mod receipt;
pub mod solvers;
pub mod utils;
