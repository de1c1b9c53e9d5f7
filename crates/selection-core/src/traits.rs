use crate::constants::{TRAIT_MAX, TRAIT_MIN};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The three heritable traits of an organism.
///
/// Each value lies in `[TRAIT_MIN, TRAIT_MAX]` for as long as the organism is
/// in play. Predation zeroes `mass` on the loser, which is the only way a
/// trait leaves that range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Traits {
    pub mass: u8,
    pub speed: u8,
    pub sense: u8,
}

impl Traits {
    pub fn new(mass: u8, speed: u8, sense: u8) -> Self {
        Self { mass, speed, sense }
    }

    /// Draw each trait uniformly from the valid range.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            mass: rng.random_range(TRAIT_MIN..=TRAIT_MAX),
            speed: rng.random_range(TRAIT_MIN..=TRAIT_MAX),
            sense: rng.random_range(TRAIT_MIN..=TRAIT_MAX),
        }
    }

    /// Copy with each trait independently shifted by -1, 0 or +1 and clamped
    /// back into range.
    pub fn mutated<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            mass: mutate_trait(self.mass, rng),
            speed: mutate_trait(self.speed, rng),
            sense: mutate_trait(self.sense, rng),
        }
    }

    pub fn in_range(&self) -> bool {
        [self.mass, self.speed, self.sense]
            .iter()
            .all(|t| (TRAIT_MIN..=TRAIT_MAX).contains(t))
    }
}

fn mutate_trait<R: Rng + ?Sized>(value: u8, rng: &mut R) -> u8 {
    let delta: i16 = rng.random_range(-1..=1);
    (value as i16 + delta).clamp(TRAIT_MIN as i16, TRAIT_MAX as i16) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    #[test]
    fn random_traits_are_in_range() {
        let mut rng = ChaCha12Rng::seed_from_u64(3);
        for _ in 0..500 {
            assert!(Traits::random(&mut rng).in_range());
        }
    }

    #[test]
    fn mutation_is_deterministic_for_fixed_seed() {
        let parent = Traits::new(3, 3, 3);
        let mut rng_a = ChaCha12Rng::seed_from_u64(123);
        let mut rng_b = ChaCha12Rng::seed_from_u64(123);
        assert_eq!(parent.mutated(&mut rng_a), parent.mutated(&mut rng_b));
    }

    #[test]
    fn mutation_stays_within_one_step_and_bounds() {
        let mut rng = ChaCha12Rng::seed_from_u64(42);
        let mut current = Traits::new(1, 5, 3);
        for _ in 0..1000 {
            let child = current.mutated(&mut rng);
            assert!(child.in_range(), "{child:?}");
            assert!(child.mass.abs_diff(current.mass) <= 1);
            assert!(child.speed.abs_diff(current.speed) <= 1);
            assert!(child.sense.abs_diff(current.sense) <= 1);
            current = child;
        }
    }

    #[test]
    fn mutation_reaches_both_neighbours() {
        let mut rng = ChaCha12Rng::seed_from_u64(9);
        let parent = Traits::new(3, 3, 3);
        let masses: std::collections::HashSet<u8> =
            (0..200).map(|_| parent.mutated(&mut rng).mass).collect();
        assert_eq!(masses, [2, 3, 4].into_iter().collect());
    }

    #[test]
    fn zeroed_mass_is_out_of_range() {
        assert!(!Traits::new(0, 2, 2).in_range());
    }
}
