//! Outcome shaping and timing instrumentation.

pub(crate) mod outcome;
pub(crate) mod timings;
