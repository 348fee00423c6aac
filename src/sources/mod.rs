//! External collaborators feeding the heuristics.

pub mod fetch;
