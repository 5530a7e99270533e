//! Grid reconstruction from unordered boxes.
//!
//! Detected boxes arrive in no particular order and with some positional
//! noise. [`organize`] clusters them into rows by vertical center, orders
//! each row left to right, and hands back a row-major sequence that is used
//! directly for tile numbering.

mod organize;

pub use organize::{organize, GridAssignment, GridLayout};

#[cfg(test)]
pub(crate) use organize::test_support;
