use super::super::World;
use crate::environment::Environment;
use crate::organism::Organism;
use rand::Rng;
use tracing::trace;

#[derive(Clone, Copy, Debug, Default)]
pub(in crate::world) struct ForageTally {
    pub fed: usize,
    pub starved: usize,
}

impl World {
    /// Let every living organism search until it eats or dies, then walk the
    /// fed ones home. Runs in population order, so later organisms see food
    /// already eaten by earlier ones.
    pub(in crate::world) fn step_forage_phase(&mut self) -> ForageTally {
        let mut tally = ForageTally::default();
        for org in self.organisms.iter_mut() {
            if !org.is_alive() {
                continue;
            }
            search_for_food(org, &mut self.environment, &mut self.rng);
            if org.is_alive() && org.has_eaten {
                tally.fed += 1;
                return_home(org, &self.environment, &self.border, &mut self.rng);
            }
            if !org.is_alive() {
                tally.starved += 1;
                trace!(id = org.id, "organism starved");
            }
        }
        tally
    }
}

/// First food cell within `sense` of the organism, scanning columns left to
/// right and each column top to bottom. Cells off the grid are skipped.
pub fn sense_food(org: &Organism, env: &Environment) -> Option<(i32, i32)> {
    let radius = i32::from(org.traits.sense);
    for dx in -radius..=radius {
        for dy in -radius..=radius {
            let (x, y) = (org.x + dx, org.y + dy);
            if env.contains(x, y) && env.is_food(x, y) {
                return Some((x, y));
            }
        }
    }
    None
}

/// Move toward sensed food or wander at random until the organism either
/// lands on food and eats it, or runs out of energy.
pub fn search_for_food<R: Rng + ?Sized>(org: &mut Organism, env: &mut Environment, rng: &mut R) {
    while org.is_alive() && !org.has_eaten {
        org.at_home = false;
        match sense_food(org, env) {
            Some((fx, fy)) => {
                org.move_towards(env, fx, fy);
                if org.position() == (fx, fy) {
                    org.has_eaten = true;
                    env.remove_food(fx, fy);
                    trace!(id = org.id, x = fx, y = fy, energy = org.energy, "organism ate");
                }
            }
            None => org.random_move(env, rng),
        }
    }
}

/// Pick one border cell at random and walk to it, stopping early if the
/// organism dies on the way.
pub fn return_home<R: Rng + ?Sized>(
    org: &mut Organism,
    env: &Environment,
    border: &[(i32, i32)],
    rng: &mut R,
) {
    if border.is_empty() {
        return;
    }
    let home = border[rng.random_range(0..border.len())];
    while org.position() != home {
        org.move_towards(env, home.0, home.1);
        if !org.is_alive() {
            break;
        }
    }
    org.at_home = org.position() == home;
    trace!(
        id = org.id,
        home_x = home.0,
        home_y = home.1,
        arrived = org.at_home,
        alive = org.is_alive(),
        "return home"
    );
}
