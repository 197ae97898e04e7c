//! Domain layer for the JobPulse fixture generator.
//!
//! Holds the record types shared by the generator and the storage crate, the
//! uniform-choice helpers used to draw random values, the fake value source
//! and the [`gateway::SeedGateway`] seam the generator writes through.
pub mod choice;
pub mod fake;
pub mod gateway;
pub mod types;

pub use choice::{choose, count_in};
pub use gateway::SeedGateway;
