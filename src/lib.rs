// Library surface shared by the CLI and the integration tests.
pub mod alphabet;
pub mod character;
pub mod config;
pub mod corpus;
pub mod error;
pub mod game;
pub mod information;
pub mod report;
pub mod stats;
pub mod strategy;
pub mod trials;

pub use error::{DistributionError, Error, Result, SamplingError};
