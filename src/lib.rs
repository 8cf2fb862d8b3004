//! Log wall planning.
//!
//! Given logs already on hand and a catalog of tree sizes, works out which
//! trees to fell, how to buck each into two logs, how to group all logs into
//! courses of two long and two short logs, and how high the finished wall gets.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
