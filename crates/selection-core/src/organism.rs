use crate::constants::{OFFSPRING_ID_OFFSET, OFF_GRID};
use crate::environment::Environment;
use crate::traits::Traits;
use rand::Rng;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Organism {
    pub id: u64,
    pub traits: Traits,
    /// May go negative during a day; see [`Organism::is_alive`].
    pub energy: i64,
    pub x: i32,
    pub y: i32,
    /// Set when the organism eats; cleared at the start of every day.
    pub has_eaten: bool,
    pub at_home: bool,
}

impl Organism {
    /// New organism at the off-grid sentinel position.
    pub fn new(id: u64, traits: Traits, energy: i64) -> Self {
        Self {
            id,
            traits,
            energy,
            x: OFF_GRID,
            y: OFF_GRID,
            has_eaten: false,
            at_home: true,
        }
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn is_alive(&self) -> bool {
        self.energy > 0
    }

    /// Whether this organism lost a predation contest. Its mass stays zero
    /// for good; the daily energy reset still brings it back into play.
    pub fn is_eliminated(&self) -> bool {
        self.traits.mass == 0
    }

    /// Metabolic cost of one movement call: `mass * speed^2 + sense`.
    pub fn movement_cost(&self) -> i64 {
        let speed = i64::from(self.traits.speed);
        i64::from(self.traits.mass) * speed * speed + i64::from(self.traits.sense)
    }

    /// Step greedily toward `(tx, ty)` with a budget of `speed` cells.
    ///
    /// The x axis is closed first. If the x gap is larger than the budget the
    /// whole budget goes to x and y does not move; otherwise x is closed and
    /// what remains goes to y. Energy is charged on every call.
    pub fn move_towards(&mut self, env: &Environment, tx: i32, ty: i32) {
        let speed = i32::from(self.traits.speed);
        let dx = tx - self.x;
        let dy = ty - self.y;
        if dx.abs() > speed {
            let (x, _) = env.clamp(self.x + speed * dx.signum(), 0);
            self.x = x;
        } else {
            self.x += dx;
            let step = (speed - dx.abs()).min(dy.abs());
            let (_, y) = env.clamp(0, self.y + step * dy.signum());
            self.y = y;
        }
        self.consume_energy();
    }

    /// Jump by an independent uniform offset in `[-speed, speed]` per axis.
    pub fn random_move<R: Rng + ?Sized>(&mut self, env: &Environment, rng: &mut R) {
        let speed = i32::from(self.traits.speed);
        let offset_x = rng.random_range(-speed..=speed);
        let offset_y = rng.random_range(-speed..=speed);
        let (x, y) = env.clamp(self.x + offset_x, self.y + offset_y);
        self.x = x;
        self.y = y;
        self.consume_energy();
    }

    pub fn consume_energy(&mut self) {
        self.energy -= self.movement_cost();
    }

    /// Offspring with mutated traits, fresh energy and no position yet.
    pub fn reproduce<R: Rng + ?Sized>(&self, energy: i64, rng: &mut R) -> Organism {
        Organism::new(
            self.id + OFFSPRING_ID_OFFSET,
            self.traits.mutated(rng),
            energy,
        )
    }
}
