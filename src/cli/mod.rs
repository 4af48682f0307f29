//! Terminal rendering for each subcommand.

pub mod fans;
pub mod geo;
pub mod revenue;
pub mod setup;
pub mod summary;
pub mod trend;
pub mod ui;
