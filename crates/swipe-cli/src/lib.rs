//! Developer tooling for the swipe decoder: dictionary compilation and
//! inspection, command-line decoding, settings management.

pub mod commands;
pub mod path_input;
pub mod trace_init;
