use super::super::{pick_border_cell, World};
use tracing::trace;

impl World {
    /// Spawn one offspring per organism that is alive and ate today, then
    /// restore every organism's energy for tomorrow. Returns the birth count.
    ///
    /// The restore is unconditional: organisms that starved today are alive
    /// again tomorrow, and so are predation losers, who come back with zero
    /// mass and a movement cost of `sense` alone.
    pub(in crate::world) fn step_reproduction_phase(&mut self) -> usize {
        let energy = self.config.initial_energy;
        let mut offspring = Vec::new();
        for org in self.organisms.iter_mut() {
            if org.is_alive() && org.has_eaten {
                let child = org.reproduce(energy, &mut self.rng);
                trace!(parent = org.id, child = child.id, traits = ?child.traits, "birth");
                offspring.push(child);
            }
            org.energy = energy;
        }

        if self.config.place_offspring_on_border {
            for child in offspring.iter_mut() {
                let (x, y) = pick_border_cell(&self.border, &mut self.rng);
                child.x = x;
                child.y = y;
            }
        }

        let births = offspring.len();
        self.organisms.extend(offspring);
        births
    }
}
