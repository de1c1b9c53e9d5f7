pub mod config;
pub mod constants;
pub mod environment;
pub mod metrics;
pub mod organism;
pub mod rng;
pub mod traits;
pub mod world;

pub use config::{SimConfig, SimConfigError};
pub use environment::{Environment, EnvironmentError};
pub use metrics::{DayMetrics, OrganismStatus, RunSummary, TraitSnapshot};
pub use organism::Organism;
pub use traits::Traits;
pub use world::{ExperimentError, World, WorldInitError};
