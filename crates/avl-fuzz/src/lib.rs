//! avl-fuzz - seeded random operation traces for ordered map tests.
//!
//! A [`Fuzzer`] wraps a xoshiro256** generator so every trace can be replayed
//! from its seed; [`trace`] turns it into insert/remove sequences.

pub mod fuzzer;
pub mod trace;

pub use fuzzer::Fuzzer;
pub use trace::{Op, TraceConfig};
