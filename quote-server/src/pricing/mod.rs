//! Landed-Cost Calculation Module
//!
//! Turns a quote's items and route into a cost breakdown. Calculation is a
//! pure function of its input: recomputing with the same input always
//! yields the same breakdown, with no side effects.

mod calculator;

pub use calculator::*;
