#![warn(missing_docs)]
//! This crate finds open knight's tours: a sequence of knight moves that
//! visits every cell of an N x N board exactly once from a chosen start.

/// The `tour` module implements the move graph, Warnsdorff move ordering and
/// the backtracking search engines that produce tours.
pub mod tour;
