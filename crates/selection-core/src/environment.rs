use crate::constants::MIN_WORLD_DIM;
use rand::Rng;
use std::{error::Error, fmt};

/// Bounded 2D grid holding food markers.
///
/// The grid is a presence flag per cell; `food` is the list of placed
/// particles. A cell that received food twice shows up twice in the list but
/// once in the grid, and eating it clears both entries.
#[derive(Clone, Debug)]
pub struct Environment {
    width: usize,
    height: usize,
    grid: Vec<bool>,
    food: Vec<(i32, i32)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentError {
    InvalidDimensions { width: usize, height: usize },
    NoInteriorCells { width: usize, height: usize },
    OutOfBounds { x: i32, y: i32 },
}

impl fmt::Display for EnvironmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvironmentError::InvalidDimensions { width, height } => {
                write!(f, "environment dimensions ({width}x{height}) must be positive")
            }
            EnvironmentError::NoInteriorCells { width, height } => write!(
                f,
                "environment ({width}x{height}) has no interior cells to place food on"
            ),
            EnvironmentError::OutOfBounds { x, y } => {
                write!(f, "coordinate ({x}, {y}) lies outside the environment")
            }
        }
    }
}

impl Error for EnvironmentError {}

impl Environment {
    pub fn new(width: usize, height: usize) -> Result<Self, EnvironmentError> {
        if width == 0 || height == 0 || i32::try_from(width.max(height)).is_err() {
            return Err(EnvironmentError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            grid: vec![false; width * height],
            food: Vec::new(),
        })
    }

    /// Scatter `count` food particles uniformly over interior cells.
    /// Duplicate placements on one cell are kept.
    pub fn place_food<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        rng: &mut R,
    ) -> Result<(), EnvironmentError> {
        if count == 0 {
            return Ok(());
        }
        if self.width < MIN_WORLD_DIM || self.height < MIN_WORLD_DIM {
            return Err(EnvironmentError::NoInteriorCells {
                width: self.width,
                height: self.height,
            });
        }
        let max_x = self.width as i32 - 2;
        let max_y = self.height as i32 - 2;
        self.food.reserve(count);
        for _ in 0..count {
            let x = rng.random_range(1..=max_x);
            let y = rng.random_range(1..=max_y);
            self.mark_food(x, y);
        }
        Ok(())
    }

    /// Place a single food particle at an explicit cell, border included.
    pub fn place_food_at(&mut self, x: i32, y: i32) -> Result<(), EnvironmentError> {
        if !self.contains(x, y) {
            return Err(EnvironmentError::OutOfBounds { x, y });
        }
        self.mark_food(x, y);
        Ok(())
    }

    /// Whether the cell currently holds food.
    ///
    /// # Panics
    /// Panics if `(x, y)` is outside the grid; callers bound-check with
    /// [`Environment::contains`] first.
    pub fn is_food(&self, x: i32, y: i32) -> bool {
        self.grid[self.index(x, y)]
    }

    /// Clear the food at `(x, y)`. No-op when the cell is empty or off-grid.
    pub fn remove_food(&mut self, x: i32, y: i32) {
        if !self.contains(x, y) || !self.is_food(x, y) {
            return;
        }
        let idx = self.index(x, y);
        self.grid[idx] = false;
        self.food.retain(|&cell| cell != (x, y));
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Every border cell, listed top/bottom rows column by column, then the
    /// left/right columns row by row.
    pub fn border_positions(&self) -> Vec<(i32, i32)> {
        let w = self.width as i32;
        let h = self.height as i32;
        let mut border = Vec::with_capacity(2 * (self.width + self.height));
        for x in 0..w {
            border.push((x, 0));
            border.push((x, h - 1));
        }
        for y in 1..h - 1 {
            border.push((0, y));
            border.push((w - 1, y));
        }
        border
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn food_count(&self) -> usize {
        self.food.len()
    }

    pub fn food_particles(&self) -> &[(i32, i32)] {
        &self.food
    }

    /// Clamp a coordinate pair onto the grid.
    pub fn clamp(&self, x: i32, y: i32) -> (i32, i32) {
        (
            x.clamp(0, self.width as i32 - 1),
            y.clamp(0, self.height as i32 - 1),
        )
    }

    fn mark_food(&mut self, x: i32, y: i32) {
        let idx = self.index(x, y);
        self.grid[idx] = true;
        self.food.push((x, y));
    }

    fn index(&self, x: i32, y: i32) -> usize {
        assert!(
            self.contains(x, y),
            "coordinate ({x}, {y}) outside {}x{} environment",
            self.width,
            self.height
        );
        y as usize * self.width + x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    #[test]
    fn rejects_zero_dimensions() {
        assert_eq!(
            Environment::new(0, 5).unwrap_err(),
            EnvironmentError::InvalidDimensions {
                width: 0,
                height: 5
            }
        );
    }

    #[test]
    fn scattered_food_stays_off_the_border() {
        let mut env = Environment::new(6, 4).unwrap();
        let mut rng = create_rng(1);
        env.place_food(200, &mut rng).unwrap();
        assert_eq!(env.food_count(), 200);
        for &(x, y) in env.food_particles() {
            assert!((1..=4).contains(&x), "x={x}");
            assert!((1..=2).contains(&y), "y={y}");
            assert!(env.is_food(x, y));
        }
        for (x, y) in env.border_positions() {
            assert!(!env.is_food(x, y));
        }
    }

    #[test]
    fn placing_food_without_interior_fails() {
        let mut env = Environment::new(2, 10).unwrap();
        let mut rng = create_rng(1);
        assert!(matches!(
            env.place_food(1, &mut rng),
            Err(EnvironmentError::NoInteriorCells { .. })
        ));
        assert!(env.place_food(0, &mut rng).is_ok());
    }

    #[test]
    fn duplicate_placement_shares_one_cell() {
        let mut env = Environment::new(5, 5).unwrap();
        env.place_food_at(2, 2).unwrap();
        env.place_food_at(2, 2).unwrap();
        assert_eq!(env.food_count(), 2);
        assert!(env.is_food(2, 2));

        env.remove_food(2, 2);
        assert!(!env.is_food(2, 2));
        assert_eq!(env.food_count(), 0);
    }

    #[test]
    fn remove_food_on_empty_cell_is_noop() {
        let mut env = Environment::new(5, 5).unwrap();
        env.place_food_at(1, 1).unwrap();
        env.remove_food(3, 3);
        env.remove_food(-1, 7);
        assert_eq!(env.food_count(), 1);
        assert!(env.is_food(1, 1));
    }

    #[test]
    fn place_food_at_rejects_out_of_bounds() {
        let mut env = Environment::new(5, 5).unwrap();
        assert_eq!(
            env.place_food_at(5, 0),
            Err(EnvironmentError::OutOfBounds { x: 5, y: 0 })
        );
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn is_food_out_of_bounds_panics() {
        let env = Environment::new(5, 5).unwrap();
        let _ = env.is_food(-1, 0);
    }

    #[test]
    fn border_positions_cover_the_perimeter_once() {
        let env = Environment::new(4, 3).unwrap();
        let border = env.border_positions();
        assert_eq!(border.len(), 2 * 4 + 2 * (3 - 2));
        assert_eq!(&border[..4], &[(0, 0), (0, 2), (1, 0), (1, 2)]);
        assert_eq!(&border[8..], &[(0, 1), (3, 1)]);
        assert!(!border.contains(&(1, 1)));
    }
}
