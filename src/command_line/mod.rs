//! Command-line front-end: argument parsing, reporting and tour file checks.

pub(crate) mod cli;
