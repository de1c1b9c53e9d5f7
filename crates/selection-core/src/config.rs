use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Deterministic seed for reproducible simulation runs.
    pub seed: u64,
    /// Grid width in cells.
    pub world_width: usize,
    /// Grid height in cells.
    pub world_height: usize,
    /// Organisms created at the start of the run.
    pub num_organisms: usize,
    /// Food particles scattered over the grid interior once per run.
    pub num_food: usize,
    /// Energy every organism is reset to at the end of each day.
    pub initial_energy: i64,
    /// Place newborns on a random border cell instead of leaving them off-grid.
    pub place_offspring_on_border: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            world_width: 100,
            world_height: 100,
            num_organisms: 100,
            num_food: 500,
            initial_energy: crate::constants::INITIAL_ENERGY,
            place_offspring_on_border: false,
        }
    }
}

macro_rules! define_sim_config_error {
    (
        $(
            $variant:ident $( { $($field:ident : $type:ty),* } )? => $fmt:literal $(, $arg:expr)*
        );* $(;)?
    ) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum SimConfigError {
            $(
                $variant $( { $($field : $type),* } )?,
            )*
        }

        impl std::fmt::Display for SimConfigError {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        Self::$variant $( { $($field),* } )? => write!(f, $fmt $(, $arg)*),
                    )*
                }
            }
        }
    };
}

define_sim_config_error! {
    WorldTooSmall { min: usize, width: usize, height: usize } => "world dimensions ({width}x{height}) must both be at least {min}";
    WorldTooLarge { max: usize, width: usize, height: usize } => "world dimensions ({width}x{height}) exceed supported maximum ({max})";
    InvalidInitialEnergy => "initial_energy must be positive";
    TooManyOrganisms { max: usize, actual: usize } => "num_organisms ({actual}) exceeds supported maximum ({max})";
    TooManyFood { max: usize, actual: usize } => "num_food ({actual}) exceeds supported maximum ({max})";
}

impl std::error::Error for SimConfigError {}

impl SimConfig {
    pub const MIN_WORLD_DIM: usize = crate::constants::MIN_WORLD_DIM;
    pub const MAX_WORLD_DIM: usize = crate::constants::MAX_WORLD_DIM;

    pub const MAX_ORGANISMS: usize = 100_000;
    pub const MAX_FOOD: usize = 1_000_000;

    /// Check every field. Zero organisms or zero food are valid and simply
    /// produce days where nothing happens.
    pub fn validate(&self) -> Result<(), SimConfigError> {
        self.validate_world()?;
        self.validate_population()?;
        Ok(())
    }

    fn validate_world(&self) -> Result<(), SimConfigError> {
        let (width, height) = (self.world_width, self.world_height);
        if width < Self::MIN_WORLD_DIM || height < Self::MIN_WORLD_DIM {
            return Err(SimConfigError::WorldTooSmall {
                min: Self::MIN_WORLD_DIM,
                width,
                height,
            });
        }
        if width > Self::MAX_WORLD_DIM || height > Self::MAX_WORLD_DIM {
            return Err(SimConfigError::WorldTooLarge {
                max: Self::MAX_WORLD_DIM,
                width,
                height,
            });
        }
        Ok(())
    }

    fn validate_population(&self) -> Result<(), SimConfigError> {
        if self.initial_energy <= 0 {
            return Err(SimConfigError::InvalidInitialEnergy);
        }
        if self.num_organisms > Self::MAX_ORGANISMS {
            return Err(SimConfigError::TooManyOrganisms {
                max: Self::MAX_ORGANISMS,
                actual: self.num_organisms,
            });
        }
        if self.num_food > Self::MAX_FOOD {
            return Err(SimConfigError::TooManyFood {
                max: Self::MAX_FOOD,
                actual: self.num_food,
            });
        }
        Ok(())
    }
}
