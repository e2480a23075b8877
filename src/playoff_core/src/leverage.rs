use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::odds::{odds_for_season, PlayoffOdds};
use crate::overrides::{Scenario, ScenarioPick};
use crate::season::{Game, RosterId, Season, SeasonData};

/// One team's playoff odds under each result of a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OddsSwing {
    pub roster_id: RosterId,
    pub if_team1_wins: f64,
    pub if_team2_wins: f64,
}

impl OddsSwing {
    /// Percentage points gained when team 1 wins instead of team 2.
    pub fn swing(&self) -> f64 {
        self.if_team1_wins - self.if_team2_wins
    }
}

/// What a single remaining game means for every team's playoff odds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupLeverage {
    pub week: u32,
    pub matchup_id: u32,
    pub team1: RosterId,
    pub team2: RosterId,
    /// Roster order
    pub swings: Vec<OddsSwing>,
}

impl MatchupLeverage {
    pub fn swing_for(&self, roster_id: RosterId) -> Option<&OddsSwing> {
        self.swings.iter().find(|s| s.roster_id == roster_id)
    }

    /// Largest absolute swing across the league.
    pub fn max_swing(&self) -> f64 {
        self.swings.iter().map(|s| s.swing().abs()).fold(0.0, f64::max)
    }
}

fn odds_by_roster(odds: Vec<PlayoffOdds>) -> HashMap<RosterId, f64> {
    odds.into_iter().map(|o| (o.roster_id, o.playoff_odds)).collect()
}

/// Force each side of `game` on top of `scenario` and compare.
///
/// With a fixed seed both branches share their random draws, so the swing
/// reflects the game rather than sampling noise.
fn leverage_for_game(
    season: &Season,
    scenario: &Scenario,
    config: &SimulationConfig,
    game: &Game,
) -> MatchupLeverage {
    let team1 = season.roster_id(game.team1);
    let team2 = season.roster_id(game.team2);

    let branch = |winner: RosterId| {
        let mut forced = scenario.clone();
        forced.add_pick(ScenarioPick::winner(game.week, game.matchup_id, winner));
        odds_by_roster(odds_for_season(season, &forced, config))
    };
    let (team1_wins, team2_wins) = rayon::join(|| branch(team1), || branch(team2));

    let swings = season
        .teams()
        .iter()
        .map(|&roster_id| OddsSwing {
            roster_id,
            if_team1_wins: team1_wins.get(&roster_id).copied().unwrap_or(0.0),
            if_team2_wins: team2_wins.get(&roster_id).copied().unwrap_or(0.0),
        })
        .collect();

    MatchupLeverage {
        week: game.week,
        matchup_id: game.matchup_id,
        team1,
        team2,
        swings,
    }
}

/// Playoff odds swing for one remaining game.
///
/// `Ok(None)` when the game isn't a remaining regular-season game.
pub fn matchup_leverage(
    data: &SeasonData,
    scenario: Option<&Scenario>,
    config: &SimulationConfig,
    week: u32,
    matchup_id: u32,
) -> Result<Option<MatchupLeverage>> {
    let Some(season) = Season::from_data(data)? else {
        return Ok(None);
    };
    let default_scenario = Scenario::default();
    let scenario = scenario.unwrap_or(&default_scenario);
    scenario.validate()?;

    let game = season
        .remaining_games()
        .iter()
        .find(|g| g.week == week && g.matchup_id == matchup_id);
    Ok(game.map(|game| leverage_for_game(&season, scenario, config, game)))
}

/// Playoff odds swing for every game of a remaining week.
///
/// Games are evaluated in parallel; output keeps matchup order.
pub fn week_leverage(
    data: &SeasonData,
    scenario: Option<&Scenario>,
    config: &SimulationConfig,
    week: u32,
) -> Result<Vec<MatchupLeverage>> {
    let Some(season) = Season::from_data(data)? else {
        return Ok(Vec::new());
    };
    let default_scenario = Scenario::default();
    let scenario = scenario.unwrap_or(&default_scenario);
    scenario.validate()?;

    let games: Vec<&Game> = season
        .remaining_games()
        .iter()
        .filter(|g| g.week == week)
        .collect();

    Ok(games
        .par_iter()
        .map(|game| leverage_for_game(&season, scenario, config, game))
        .collect())
}
