use crate::constants::{TRAIT_LEVELS, TRAIT_MIN};
use crate::organism::Organism;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-trait frequency tables of living organisms. Index `i` counts
/// organisms whose trait value is `i + 1`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitSnapshot {
    pub mass: [usize; TRAIT_LEVELS],
    pub speed: [usize; TRAIT_LEVELS],
    pub sense: [usize; TRAIT_LEVELS],
}

impl TraitSnapshot {
    pub fn collect(organisms: &[Organism]) -> Self {
        let mut snapshot = Self::default();
        for org in organisms.iter().filter(|o| o.is_alive()) {
            bump(&mut snapshot.mass, org.traits.mass);
            bump(&mut snapshot.speed, org.traits.speed);
            bump(&mut snapshot.sense, org.traits.sense);
        }
        snapshot
    }

    pub fn is_empty(&self) -> bool {
        self.mass.iter().all(|&c| c == 0)
            && self.speed.iter().all(|&c| c == 0)
            && self.sense.iter().all(|&c| c == 0)
    }
}

fn bump(table: &mut [usize; TRAIT_LEVELS], value: u8) {
    if let Some(slot) = value
        .checked_sub(TRAIT_MIN)
        .and_then(|i| table.get_mut(i as usize))
    {
        *slot += 1;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayMetrics {
    /// 1-based day number.
    pub day: usize,
    pub alive_count: usize,
    pub population_size: usize,
    pub food_remaining: usize,
    pub fed_count: usize,
    pub starvation_deaths: usize,
    pub predation_kills: usize,
    pub birth_count: usize,
    pub snapshot: TraitSnapshot,
}

/// Human-readable status of one organism.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganismStatus {
    pub id: u64,
    pub mass: u8,
    pub speed: u8,
    pub sense: u8,
    pub energy: i64,
    pub alive: bool,
    pub x: i32,
    pub y: i32,
}

impl From<&Organism> for OrganismStatus {
    fn from(org: &Organism) -> Self {
        Self {
            id: org.id,
            mass: org.traits.mass,
            speed: org.traits.speed,
            sense: org.traits.sense,
            energy: org.energy,
            alive: org.is_alive(),
            x: org.x,
            y: org.y,
        }
    }
}

impl fmt::Display for OrganismStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Organism {}: Mass={}, Speed={}, Sense={}, Energy={}, Alive={}",
            self.id, self.mass, self.speed, self.sense, self.energy, self.alive
        )
    }
}

fn default_schema_version() -> u32 {
    1
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub seed: u64,
    pub days: usize,
    pub initial_food: usize,
    pub final_alive_count: usize,
    pub samples: Vec<DayMetrics>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub final_organisms: Vec<OrganismStatus>,
}

impl RunSummary {
    pub fn mass_progression(&self) -> Vec<[usize; TRAIT_LEVELS]> {
        self.samples.iter().map(|d| d.snapshot.mass).collect()
    }

    pub fn speed_progression(&self) -> Vec<[usize; TRAIT_LEVELS]> {
        self.samples.iter().map(|d| d.snapshot.speed).collect()
    }

    pub fn sense_progression(&self) -> Vec<[usize; TRAIT_LEVELS]> {
        self.samples.iter().map(|d| d.snapshot.sense).collect()
    }

    pub fn total_births(&self) -> usize {
        self.samples.iter().map(|d| d.birth_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Traits;

    #[test]
    fn snapshot_counts_only_living_organisms() {
        let mut dead = Organism::new(2, Traits::new(5, 5, 5), 0);
        dead.energy = -3;
        let orgs = vec![
            Organism::new(0, Traits::new(1, 2, 3), 500),
            Organism::new(1, Traits::new(1, 5, 3), 500),
            dead,
        ];
        let snap = TraitSnapshot::collect(&orgs);
        assert_eq!(snap.mass, [2, 0, 0, 0, 0]);
        assert_eq!(snap.speed, [0, 1, 0, 0, 1]);
        assert_eq!(snap.sense, [0, 0, 2, 0, 0]);
    }

    #[test]
    fn zeroed_mass_is_not_bucketed() {
        let orgs = vec![Organism::new(0, Traits::new(0, 1, 1), 500)];
        let snap = TraitSnapshot::collect(&orgs);
        assert_eq!(snap.mass, [0; TRAIT_LEVELS]);
        assert_eq!(snap.speed, [1, 0, 0, 0, 0]);
    }

    #[test]
    fn empty_population_gives_empty_snapshot() {
        assert!(TraitSnapshot::collect(&[]).is_empty());
    }

    #[test]
    fn status_line_is_readable() {
        let org = Organism::new(12, Traits::new(2, 3, 4), 480);
        assert_eq!(
            OrganismStatus::from(&org).to_string(),
            "Organism 12: Mass=2, Speed=3, Sense=4, Energy=480, Alive=true"
        );
    }

    #[test]
    fn progressions_follow_sample_order() {
        let mut first = DayMetrics::default();
        first.snapshot.mass = [1, 0, 0, 0, 0];
        first.birth_count = 2;
        let mut second = DayMetrics::default();
        second.snapshot.mass = [0, 0, 0, 0, 3];
        second.birth_count = 1;
        let summary = RunSummary {
            schema_version: 1,
            seed: 0,
            days: 2,
            initial_food: 0,
            final_alive_count: 0,
            samples: vec![first, second],
            final_organisms: Vec::new(),
        };
        assert_eq!(
            summary.mass_progression(),
            vec![[1, 0, 0, 0, 0], [0, 0, 0, 0, 3]]
        );
        assert_eq!(summary.total_births(), 3);
    }

    #[test]
    fn summary_json_defaults_schema_version() {
        let json = r#"{"seed":1,"days":0,"initial_food":0,"final_alive_count":0,"samples":[]}"#;
        let summary: RunSummary = serde_json::from_str(json).expect("summary should parse");
        assert_eq!(summary.schema_version, 1);
        assert!(summary.final_organisms.is_empty());
    }
}
