/// Largest valid grid dimension (cells per axis).
pub const MAX_WORLD_DIM: usize = 2048;

/// Smallest grid dimension that still leaves an interior row/column for food.
pub const MIN_WORLD_DIM: usize = 3;

/// Energy every organism starts a day with.
pub const INITIAL_ENERGY: i64 = 500;

/// Inclusive bounds for heritable traits.
pub const TRAIT_MIN: u8 = 1;
pub const TRAIT_MAX: u8 = 5;

/// Number of distinct trait values, i.e. the length of a frequency table.
pub const TRAIT_LEVELS: usize = (TRAIT_MAX - TRAIT_MIN + 1) as usize;

/// Offspring id is the parent id plus this offset. Not globally unique.
pub const OFFSPRING_ID_OFFSET: u64 = 100;

/// Energy gained by a predator per unit of mass of each organism it consumes.
pub const PREDATION_ENERGY_PER_MASS: i64 = 10;

/// Coordinate carried by organisms that have not been placed on the grid yet.
pub const OFF_GRID: i32 = -1;
