use crate::config::{SimConfig, SimConfigError};
use crate::environment::{Environment, EnvironmentError};
use crate::metrics::{DayMetrics, OrganismStatus, RunSummary, TraitSnapshot};
use crate::organism::Organism;
use crate::rng::create_rng;
use crate::traits::Traits;
use rand::Rng;
use rand_chacha::ChaCha12Rng;
use std::{error::Error, fmt};
use tracing::{debug, info};

mod phases;

pub use phases::collision::resolve_collisions;
pub use phases::forage::{return_home, search_for_food, sense_food};

/// The population, the shared food grid and the RNG that drives them.
///
/// One call to [`World::run_day`] is one full day: forage, resolve
/// collisions, reproduce, reset energy, snapshot.
pub struct World {
    config: SimConfig,
    environment: Environment,
    organisms: Vec<Organism>,
    border: Vec<(i32, i32)>,
    rng: ChaCha12Rng,
    day: usize,
    initial_food: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorldInitError {
    Config(SimConfigError),
    Environment(EnvironmentError),
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

impl fmt::Display for WorldInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldInitError::Config(e) => write!(f, "{}", e),
            WorldInitError::Environment(e) => write!(f, "{}", e),
            WorldInitError::DimensionMismatch { expected, actual } => write!(
                f,
                "environment is {}x{} but config expects {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
        }
    }
}

impl From<SimConfigError> for WorldInitError {
    fn from(err: SimConfigError) -> Self {
        WorldInitError::Config(err)
    }
}

impl From<EnvironmentError> for WorldInitError {
    fn from(err: EnvironmentError) -> Self {
        WorldInitError::Environment(err)
    }
}

impl Error for WorldInitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WorldInitError::Config(e) => Some(e),
            WorldInitError::Environment(e) => Some(e),
            WorldInitError::DimensionMismatch { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperimentError {
    NoDays,
    TooManyDays { max: usize, actual: usize },
}

impl fmt::Display for ExperimentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperimentError::NoDays => write!(f, "days must be positive"),
            ExperimentError::TooManyDays { max, actual } => {
                write!(f, "days ({actual}) exceed supported maximum ({max})")
            }
        }
    }
}

impl Error for ExperimentError {}

impl World {
    pub const MAX_EXPERIMENT_DAYS: usize = 100_000;

    /// Scatter food, create `num_organisms` random organisms and put each on
    /// a random border cell.
    pub fn new(config: SimConfig) -> Result<Self, WorldInitError> {
        config.validate()?;
        let mut rng = create_rng(config.seed);
        let mut environment = Environment::new(config.world_width, config.world_height)?;
        environment.place_food(config.num_food, &mut rng)?;

        let mut organisms: Vec<Organism> = (0..config.num_organisms)
            .map(|id| Organism::new(id as u64, Traits::random(&mut rng), config.initial_energy))
            .collect();
        let border = environment.border_positions();
        for org in &mut organisms {
            let (x, y) = pick_border_cell(&border, &mut rng);
            org.x = x;
            org.y = y;
        }

        Ok(Self::assemble(config, environment, organisms, border, rng))
    }

    /// Build a world around an explicitly prepared environment and
    /// population. Organisms keep the positions they carry.
    pub fn with_population(
        config: SimConfig,
        environment: Environment,
        organisms: Vec<Organism>,
    ) -> Result<Self, WorldInitError> {
        config.validate()?;
        let expected = (config.world_width, config.world_height);
        let actual = (environment.width(), environment.height());
        if expected != actual {
            return Err(WorldInitError::DimensionMismatch { expected, actual });
        }
        let rng = create_rng(config.seed);
        let border = environment.border_positions();
        Ok(Self::assemble(config, environment, organisms, border, rng))
    }

    fn assemble(
        config: SimConfig,
        environment: Environment,
        organisms: Vec<Organism>,
        border: Vec<(i32, i32)>,
        rng: ChaCha12Rng,
    ) -> Self {
        let initial_food = environment.food_count();
        Self {
            config,
            environment,
            organisms,
            border,
            rng,
            day: 0,
            initial_food,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn organisms(&self) -> &[Organism] {
        &self.organisms
    }

    pub fn border(&self) -> &[(i32, i32)] {
        &self.border
    }

    /// Days completed so far.
    pub fn day(&self) -> usize {
        self.day
    }

    pub fn alive_count(&self) -> usize {
        self.organisms.iter().filter(|o| o.is_alive()).count()
    }

    pub fn trait_snapshot(&self) -> TraitSnapshot {
        TraitSnapshot::collect(&self.organisms)
    }

    pub fn organism_statuses(&self) -> Vec<OrganismStatus> {
        self.organisms.iter().map(OrganismStatus::from).collect()
    }

    /// Advance one day and report what happened.
    pub fn run_day(&mut self) -> DayMetrics {
        self.day += 1;
        for org in &mut self.organisms {
            org.has_eaten = false;
        }

        let tally = self.step_forage_phase();
        let predation_kills = self.step_collision_phase();
        let birth_count = self.step_reproduction_phase();

        let metrics = DayMetrics {
            day: self.day,
            alive_count: self.alive_count(),
            population_size: self.organisms.len(),
            food_remaining: self.environment.food_count(),
            fed_count: tally.fed,
            starvation_deaths: tally.starved,
            predation_kills,
            birth_count,
            snapshot: self.trait_snapshot(),
        };
        debug!(
            day = metrics.day,
            alive = metrics.alive_count,
            population = metrics.population_size,
            fed = metrics.fed_count,
            starved = metrics.starvation_deaths,
            kills = metrics.predation_kills,
            births = metrics.birth_count,
            food = metrics.food_remaining,
            "day complete"
        );
        metrics
    }

    /// Run `days` consecutive days and collect per-day metrics.
    pub fn run_experiment(&mut self, days: usize) -> Result<RunSummary, ExperimentError> {
        self.run_experiment_with(days, |_, _| {})
    }

    /// Like [`World::run_experiment`], calling `on_day` with the world and
    /// that day's metrics after every day.
    pub fn run_experiment_with<F>(
        &mut self,
        days: usize,
        mut on_day: F,
    ) -> Result<RunSummary, ExperimentError>
    where
        F: FnMut(&World, &DayMetrics),
    {
        if days == 0 {
            return Err(ExperimentError::NoDays);
        }
        if days > Self::MAX_EXPERIMENT_DAYS {
            return Err(ExperimentError::TooManyDays {
                max: Self::MAX_EXPERIMENT_DAYS,
                actual: days,
            });
        }

        info!(
            days,
            organisms = self.organisms.len(),
            food = self.environment.food_count(),
            seed = self.config.seed,
            "starting experiment"
        );
        let mut samples = Vec::with_capacity(days);
        for _ in 0..days {
            let metrics = self.run_day();
            on_day(self, &metrics);
            samples.push(metrics);
        }

        let summary = RunSummary {
            schema_version: 1,
            seed: self.config.seed,
            days,
            initial_food: self.initial_food,
            final_alive_count: self.alive_count(),
            samples,
            final_organisms: self.organism_statuses(),
        };
        info!(
            alive = summary.final_alive_count,
            population = self.organisms.len(),
            births = summary.total_births(),
            "experiment finished"
        );
        Ok(summary)
    }
}

fn pick_border_cell<R: Rng + ?Sized>(border: &[(i32, i32)], rng: &mut R) -> (i32, i32) {
    border[rng.random_range(0..border.len())]
}
