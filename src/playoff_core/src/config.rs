use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PLAYOFF_TEAMS, SIMULATION_RUNS};

/// Knobs for a playoff odds sweep.
///
/// Deserializes from a partial JSON object; anything left out keeps its default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of simulated seasons
    pub runs: usize,

    /// Playoff qualifier count, overriding the league setting
    pub playoff_teams: Option<usize>,

    /// Fixed seed for reproducible output; `None` draws from OS entropy
    pub seed: Option<u64>,

    /// Spread the runs over the rayon pool
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            runs: SIMULATION_RUNS,
            playoff_teams: None,
            seed: None,
            parallel: true,
        }
    }
}

impl SimulationConfig {
    pub fn with_seed(seed: u64) -> Self {
        SimulationConfig {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Build the random source for a sweep.
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    /// Resolve the qualifier count: explicit override, then league setting, then default.
    /// Never exceeds the number of teams.
    pub fn qualifiers(&self, league_setting: Option<usize>, team_count: usize) -> usize {
        self.playoff_teams
            .or(league_setting)
            .unwrap_or(DEFAULT_PLAYOFF_TEAMS)
            .min(team_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.runs, 10_000);
        assert_eq!(config.playoff_teams, None);
        assert!(config.parallel);
    }

    #[test]
    fn test_partial_json() {
        let config: SimulationConfig = serde_json::from_str(r#"{"seed": 7, "runs": 500}"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.runs, 500);
        assert!(config.parallel, "Unspecified fields should keep defaults");
    }

    #[test]
    fn test_qualifier_resolution() {
        let config = SimulationConfig::default();
        assert_eq!(config.qualifiers(None, 12), 6);
        assert_eq!(config.qualifiers(Some(4), 12), 4);
        assert_eq!(config.qualifiers(None, 4), 4, "Should clamp to team count");

        let config = SimulationConfig {
            playoff_teams: Some(2),
            ..SimulationConfig::default()
        };
        assert_eq!(config.qualifiers(Some(4), 12), 2, "Explicit override wins");
    }

    #[test]
    fn test_seeded_rng_repeats() {
        let config = SimulationConfig::with_seed(42);
        let a: u64 = config.rng().gen();
        let b: u64 = config.rng().gen();
        assert_eq!(a, b);
    }
}
