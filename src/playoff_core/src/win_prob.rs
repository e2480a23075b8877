use serde::{Deserialize, Serialize};
use statrs::function::erf::erfc;
use std::f64::consts::SQRT_2;

use crate::error::Result;
use crate::overrides::Scenario;
use crate::season::{RosterId, Season, SeasonData};
use crate::team::{score_models, GameResult, ScoreDistribution};

/// Standard normal CDF.
fn normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Probability that team 1 outscores team 2 in a single week.
///
/// The score difference of two independent normals is normal with
/// mean `μ1 - μ2` and variance `σ1² + σ2²`. Without any variance the
/// higher mean always wins and equal means split evenly.
///
/// # Returns
/// Probability of team 1 winning (0.0-1.0)
pub fn calculate_win_prob(team1: &ScoreDistribution, team2: &ScoreDistribution) -> f64 {
    let mean_diff = team1.mean - team2.mean;
    let stddev = (team1.std_dev.powi(2) + team2.std_dev.powi(2)).sqrt();

    if stddev == 0.0 {
        return match GameResult::compare(team1.mean, team2.mean) {
            GameResult::Win => 1.0,
            GameResult::Loss => 0.0,
            GameResult::Tie => 0.5,
        };
    }
    normal_cdf(mean_diff / stddev)
}

/// Outlook for one remaining regular-season game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupProjection {
    pub week: u32,
    pub matchup_id: u32,
    pub team1: RosterId,
    pub team2: RosterId,
    pub team1_expected: f64,
    pub team2_expected: f64,
    pub team1_win_prob: f64,
    /// Result set by a scenario pick rather than the score models
    pub forced: bool,
}

/// Win probabilities for every remaining regular-season game.
pub fn project_remaining_matchups(
    data: &SeasonData,
    scenario: Option<&Scenario>,
) -> Result<Vec<MatchupProjection>> {
    let Some(season) = Season::from_data(data)? else {
        return Ok(Vec::new());
    };
    let default_scenario = Scenario::default();
    let scenario = scenario.unwrap_or(&default_scenario);
    scenario.validate()?;
    Ok(projections_for_season(&season, scenario))
}

pub(crate) fn projections_for_season(season: &Season, scenario: &Scenario) -> Vec<MatchupProjection> {
    let models = score_models(season);
    season
        .remaining_games()
        .iter()
        .map(|game| {
            let forced = scenario.outcome_for(season, game);
            let team1_win_prob = match forced {
                Some(outcome) if outcome.team1_result == GameResult::Win => 1.0,
                Some(_) => 0.0,
                None => calculate_win_prob(&models[game.team1], &models[game.team2]),
            };
            MatchupProjection {
                week: game.week,
                matchup_id: game.matchup_id,
                team1: season.roster_id(game.team1),
                team2: season.roster_id(game.team2),
                team1_expected: models[game.team1].mean,
                team2_expected: models[game.team2].mean,
                team1_win_prob,
                forced: forced.is_some(),
            }
        })
        .collect()
}
