use super::super::World;
use crate::constants::PREDATION_ENERGY_PER_MASS;
use crate::organism::Organism;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use tracing::trace;

impl World {
    pub(in crate::world) fn step_collision_phase(&mut self) -> usize {
        resolve_collisions(&mut self.organisms)
    }
}

/// Resolve predation among living organisms sharing a cell.
///
/// The heaviest occupant wins (ties go to the earlier organism in the
/// population), gains `10 * mass` from each loser, and every loser ends with
/// zero energy and zero mass. Returns the number of organisms eliminated.
pub fn resolve_collisions(organisms: &mut [Organism]) -> usize {
    let mut occupants_by_cell: BTreeMap<(i32, i32), Vec<usize>> = BTreeMap::new();
    for (idx, org) in organisms.iter().enumerate() {
        if org.is_alive() {
            occupants_by_cell
                .entry(org.position())
                .or_default()
                .push(idx);
        }
    }

    let mut eliminated = 0;
    for (cell, mut occupants) in occupants_by_cell {
        if occupants.len() < 2 {
            continue;
        }
        // Stable sort keeps population order among equal masses.
        occupants.sort_by_key(|&idx| Reverse(organisms[idx].traits.mass));
        let winner = occupants[0];
        for &loser in &occupants[1..] {
            let gained = i64::from(organisms[loser].traits.mass) * PREDATION_ENERGY_PER_MASS;
            organisms[winner].energy += gained;
            organisms[loser].energy = 0;
            organisms[loser].traits.mass = 0;
            eliminated += 1;
            trace!(
                winner = organisms[winner].id,
                loser = organisms[loser].id,
                x = cell.0,
                y = cell.1,
                gained,
                "predation"
            );
        }
    }
    eliminated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Traits;

    fn at(id: u64, mass: u8, x: i32, y: i32) -> Organism {
        Organism::new(id, Traits::new(mass, 1, 1), 100).with_position(x, y)
    }

    #[test]
    fn heavier_organism_eats_lighter_one() {
        let mut orgs = vec![at(0, 3, 4, 4), at(1, 5, 4, 4)];
        assert_eq!(resolve_collisions(&mut orgs), 1);
        assert_eq!(orgs[1].energy, 130);
        assert_eq!(orgs[1].traits.mass, 5);
        assert_eq!(orgs[0].energy, 0);
        assert_eq!(orgs[0].traits.mass, 0);
        assert!(!orgs[0].is_alive());
    }

    #[test]
    fn winner_collects_from_every_loser() {
        let mut orgs = vec![at(0, 2, 1, 1), at(1, 4, 1, 1), at(2, 1, 1, 1), at(3, 5, 2, 2)];
        assert_eq!(resolve_collisions(&mut orgs), 2);
        assert_eq!(orgs[1].energy, 100 + 20 + 10);
        assert_eq!(orgs[3].energy, 100);
        assert_eq!(orgs[3].traits.mass, 5);
    }

    #[test]
    fn equal_masses_favour_population_order() {
        let mut orgs = vec![at(0, 3, 0, 0), at(1, 3, 0, 0)];
        resolve_collisions(&mut orgs);
        assert_eq!(orgs[0].energy, 130);
        assert_eq!(orgs[1].traits.mass, 0);
    }

    #[test]
    fn dead_organisms_do_not_take_part() {
        let mut dead = at(0, 5, 3, 3);
        dead.energy = -4;
        let mut orgs = vec![dead, at(1, 1, 3, 3)];
        assert_eq!(resolve_collisions(&mut orgs), 0);
        assert_eq!(orgs[0].traits.mass, 5);
        assert_eq!(orgs[1].energy, 100);
    }

    #[test]
    fn exactly_one_survivor_keeps_mass_per_shared_cell() {
        let mut orgs: Vec<Organism> = (0..12)
            .map(|i| at(i, (i % 5) as u8 + 1, (i % 3) as i32, 0))
            .collect();
        resolve_collisions(&mut orgs);
        for x in 0..3 {
            let with_mass: Vec<&Organism> = orgs
                .iter()
                .filter(|o| o.x == x && o.traits.mass > 0)
                .collect();
            assert_eq!(with_mass.len(), 1, "cell x={x}");
            assert!(orgs
                .iter()
                .filter(|o| o.x == x && o.traits.mass == 0)
                .all(|o| o.energy == 0));
        }
    }
}
