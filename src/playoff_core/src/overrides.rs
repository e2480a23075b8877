use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;
use crate::season::{check_finite, Game, RosterId, Season};
use crate::team::Outcome;

/// A user-forced result for one matchup.
///
/// `team1_score`/`team2_score` follow the order the two teams appear in that
/// week's matchup list. The winner decides the result even if the scores disagree.
/// A missing score keeps the points actually scored in an already-decided game
/// and credits 0 in a game still to play.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioPick {
    pub week: u32,
    pub matchup_id: u32,
    pub winner_roster_id: RosterId,
    #[serde(default)]
    pub team1_score: Option<f64>,
    #[serde(default)]
    pub team2_score: Option<f64>,
}

impl ScenarioPick {
    pub fn winner(week: u32, matchup_id: u32, winner_roster_id: RosterId) -> Self {
        ScenarioPick {
            week,
            matchup_id,
            winner_roster_id,
            team1_score: None,
            team2_score: None,
        }
    }
}

/// Forced outcomes keyed by `(week, matchup_id)`.
///
/// Built from an ordered pick list; a later pick for the same matchup replaces
/// an earlier one.
#[derive(Clone, Debug, Default)]
pub struct Scenario {
    picks: HashMap<(u32, u32), ScenarioPick>,
}

impl Scenario {
    pub fn new(picks: impl IntoIterator<Item = ScenarioPick>) -> Self {
        let mut scenario = Scenario::default();
        for pick in picks {
            scenario.add_pick(pick);
        }
        scenario
    }

    /// Parse a JSON array of picks.
    pub fn from_json(json: &str) -> Result<Self> {
        let picks: Vec<ScenarioPick> = serde_json::from_str(json)?;
        let scenario = Scenario::new(picks);
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<()> {
        for pick in self.picks.values() {
            for score in [pick.team1_score, pick.team2_score].into_iter().flatten() {
                check_finite(score, || {
                    format!("scenario score for week {} matchup {}", pick.week, pick.matchup_id)
                })?;
            }
        }
        Ok(())
    }

    /// Add or replace the pick for a matchup.
    pub fn add_pick(&mut self, pick: ScenarioPick) {
        self.picks.insert((pick.week, pick.matchup_id), pick);
    }

    pub fn remove_pick(&mut self, week: u32, matchup_id: u32) -> Option<ScenarioPick> {
        self.picks.remove(&(week, matchup_id))
    }

    pub fn get(&self, week: u32, matchup_id: u32) -> Option<&ScenarioPick> {
        self.picks.get(&(week, matchup_id))
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Forced outcome for a game, if a usable pick exists.
    ///
    /// A pick naming a winner who isn't playing in the game is ignored.
    /// Scores the pick leaves out fall back to the recorded points of a completed game.
    pub fn outcome_for(&self, season: &Season, game: &Game) -> Option<Outcome> {
        let pick = self.get(game.week, game.matchup_id)?;
        let team1 = season.roster_id(game.team1);
        let team2 = season.roster_id(game.team2);

        let team1_wins = if pick.winner_roster_id == team1 {
            true
        } else if pick.winner_roster_id == team2 {
            false
        } else {
            warn!(
                "Pick for week {} matchup {} names roster {}, which plays neither side; ignoring",
                pick.week, pick.matchup_id, pick.winner_roster_id
            );
            return None;
        };

        let (played1, played2) = if game.week <= season.completed_week() {
            (game.team1_points, game.team2_points)
        } else {
            (0.0, 0.0)
        };
        Some(Outcome::forced(
            team1_wins,
            pick.team1_score.unwrap_or(played1),
            pick.team2_score.unwrap_or(played2),
        ))
    }

    /// Log picks that point at no regular-season game. They have no effect.
    pub fn report_unmatched(&self, season: &Season) {
        for pick in self.picks.values() {
            if season.find_game(pick.week, pick.matchup_id).is_none() {
                debug!(
                    "Pick for week {} matchup {} matches no regular-season game",
                    pick.week, pick.matchup_id
                );
            }
        }
    }
}
