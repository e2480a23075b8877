//! Playoff Core - Monte Carlo playoff odds for head-to-head fantasy leagues.
//!
//! Given a partially played regular season, this library estimates how often
//! each team finishes in each standings position, derives playoff odds from
//! those finishes, and ranks the difficulty of every team's remaining schedule.
//! Python bindings are available behind the `python` feature.

pub mod config;
pub mod constants;
pub mod error;
pub mod leverage;
pub mod odds;
pub mod overrides;
pub mod sampler;
pub mod schedule_strength;
pub mod season;
pub mod simulation;
pub mod standings;
pub mod team;
pub mod win_prob;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::SimulationConfig;
pub use constants::{DEFAULT_PLAYOFF_TEAMS, SIMULATION_RUNS};
pub use error::{Result, SeasonError};
pub use leverage::{matchup_leverage, week_leverage, MatchupLeverage, OddsSwing};
pub use odds::{calculate_playoff_odds, OddsAggregator, PlayoffOdds, RankHistogram};
pub use overrides::{Scenario, ScenarioPick};
pub use sampler::sample_score;
pub use schedule_strength::calculate_strength_of_schedule;
pub use season::{Game, RosterId, Season, SeasonData};
pub use simulation::{current_records, SeasonSimulator};
pub use standings::rank_standings;
pub use team::{apply_outcome, GameResult, Outcome, ScoreDistribution, TeamRecord};
pub use win_prob::{calculate_win_prob, project_remaining_matchups, MatchupProjection};

#[cfg(feature = "python")]
mod python {
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;
    use std::collections::BTreeMap;

    use crate::constants::SIMULATION_RUNS;
    use crate::{RosterId, Scenario, SeasonData, SeasonError, SimulationConfig};

    impl From<SeasonError> for PyErr {
        fn from(err: SeasonError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    fn parse_scenario(scenario_json: Option<&str>) -> Result<Option<Scenario>, SeasonError> {
        scenario_json.map(Scenario::from_json).transpose()
    }

    /// Playoff odds for every team, as a JSON array.
    #[pyfunction]
    #[pyo3(name = "calculate_playoff_odds", signature = (season_json, scenario_json = None, seed = None, runs = SIMULATION_RUNS))]
    fn py_calculate_playoff_odds(
        season_json: &str,
        scenario_json: Option<&str>,
        seed: Option<u64>,
        runs: usize,
    ) -> PyResult<String> {
        let data = SeasonData::from_json(season_json)?;
        let scenario = parse_scenario(scenario_json)?;
        let config = SimulationConfig {
            runs,
            seed,
            ..SimulationConfig::default()
        };
        let odds = crate::calculate_playoff_odds(&data, scenario.as_ref(), &config)?;
        Ok(serde_json::to_string(&odds).map_err(SeasonError::from)?)
    }

    /// Remaining schedule rank per roster, 1 = hardest.
    #[pyfunction]
    #[pyo3(name = "calculate_strength_of_schedule")]
    fn py_calculate_strength_of_schedule(season_json: &str) -> PyResult<BTreeMap<RosterId, usize>> {
        let data = SeasonData::from_json(season_json)?;
        Ok(crate::calculate_strength_of_schedule(&data)?)
    }

    /// Win probabilities for the remaining games, as a JSON array.
    #[pyfunction]
    #[pyo3(name = "project_remaining_matchups", signature = (season_json, scenario_json = None))]
    fn py_project_remaining_matchups(season_json: &str, scenario_json: Option<&str>) -> PyResult<String> {
        let data = SeasonData::from_json(season_json)?;
        let scenario = parse_scenario(scenario_json)?;
        let projections = crate::project_remaining_matchups(&data, scenario.as_ref())?;
        Ok(serde_json::to_string(&projections).map_err(SeasonError::from)?)
    }

    /// Python module definition
    #[pymodule]
    fn playoff_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(py_calculate_playoff_odds, m)?)?;
        m.add_function(wrap_pyfunction!(py_calculate_strength_of_schedule, m)?)?;
        m.add_function(wrap_pyfunction!(py_project_remaining_matchups, m)?)?;

        m.add("SIMULATION_RUNS", SIMULATION_RUNS)?;
        m.add("DEFAULT_PLAYOFF_TEAMS", crate::DEFAULT_PLAYOFF_TEAMS)?;

        Ok(())
    }
}
