//! Library components for the dataset profiler CLI.

pub mod logging;
pub mod pipeline;
