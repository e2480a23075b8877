use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::season::{Game, Season};

/// Scoring distribution of one team over its completed regular-season games.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    pub mean: f64,

    /// Sample standard deviation (Bessel-corrected); zero below two games
    pub std_dev: f64,

    pub games_played: usize,
}

impl ScoreDistribution {
    /// Fit a distribution to a team's weekly scores.
    ///
    /// No games gives a team that scores 0 every week.
    pub fn from_scores(scores: &[f64]) -> Self {
        match scores.len() {
            0 => ScoreDistribution::default(),
            1 => ScoreDistribution {
                mean: scores[0],
                std_dev: 0.0,
                games_played: 1,
            },
            n => ScoreDistribution {
                mean: scores.mean(),
                std_dev: scores.std_dev(),
                games_played: n,
            },
        }
    }

    pub fn has_variance(&self) -> bool {
        self.std_dev > 0.0
    }
}

/// Fit every team's distribution from its completed regular-season weeks.
///
/// Bye weeks count: a bye still produces a score. Indexed like [`Season::teams`].
pub fn score_models(season: &Season) -> Vec<ScoreDistribution> {
    (0..season.team_count())
        .map(|team| ScoreDistribution::from_scores(season.completed_scores(team)))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win,
    Loss,
    Tie,
}

impl GameResult {
    /// Result for the side that scored `own` against `other`.
    pub fn compare(own: f64, other: f64) -> Self {
        if own > other {
            GameResult::Win
        } else if own < other {
            GameResult::Loss
        } else {
            GameResult::Tie
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            GameResult::Win => GameResult::Loss,
            GameResult::Loss => GameResult::Win,
            GameResult::Tie => GameResult::Tie,
        }
    }
}

/// Win/loss/tie record and points for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: f64,
}

impl TeamRecord {
    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    /// `(wins + ties / 2) / games`, or 0 before any game.
    pub fn win_pct(&self) -> f64 {
        match self.games() {
            0 => 0.0,
            games => (self.wins as f64 + 0.5 * self.ties as f64) / games as f64,
        }
    }

    pub fn with_result(self, points: f64, result: GameResult) -> Self {
        let mut record = self;
        record.points_for += points;
        match result {
            GameResult::Win => record.wins += 1,
            GameResult::Loss => record.losses += 1,
            GameResult::Tie => record.ties += 1,
        }
        record
    }

    /// Same wins, losses and ties; points may differ.
    pub fn same_standing(&self, other: &TeamRecord) -> bool {
        self.wins == other.wins && self.losses == other.losses && self.ties == other.ties
    }
}

/// How one game ended, from team 1's point of view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outcome {
    pub team1_points: f64,
    pub team2_points: f64,
    pub team1_result: GameResult,
}

impl Outcome {
    /// Result decided by the scores themselves.
    pub fn from_scores(team1_points: f64, team2_points: f64) -> Self {
        Outcome {
            team1_points,
            team2_points,
            team1_result: GameResult::compare(team1_points, team2_points),
        }
    }

    /// Result fixed regardless of the points credited.
    pub fn forced(team1_wins: bool, team1_points: f64, team2_points: f64) -> Self {
        Outcome {
            team1_points,
            team2_points,
            team1_result: if team1_wins { GameResult::Win } else { GameResult::Loss },
        }
    }
}

/// Credit a game's outcome to both teams' records.
///
/// Both the current-record tally and the simulator go through here.
pub fn apply_outcome(records: &mut [TeamRecord], game: &Game, outcome: &Outcome) {
    records[game.team1] = records[game.team1].with_result(outcome.team1_points, outcome.team1_result);
    records[game.team2] =
        records[game.team2].with_result(outcome.team2_points, outcome.team1_result.opposite());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::four_team_league;
    use crate::season::SeasonData;

    #[test]
    fn test_distribution_bessel() {
        let dist = ScoreDistribution::from_scores(&[100.0, 110.0]);
        assert!((dist.mean - 105.0).abs() < 1e-10);
        // sqrt(((-5)^2 + 5^2) / 1)
        assert!((dist.std_dev - 50f64.sqrt()).abs() < 1e-10);
        assert_eq!(dist.games_played, 2);
    }

    #[test]
    fn test_distribution_degenerate() {
        let none = ScoreDistribution::from_scores(&[]);
        assert_eq!(none, ScoreDistribution::default());

        let one = ScoreDistribution::from_scores(&[87.5]);
        assert_eq!(one.mean, 87.5);
        assert_eq!(one.std_dev, 0.0, "Single sample has no variance");
        assert!(!one.has_variance());
    }

    #[test]
    fn test_score_models_from_season() {
        let season = Season::from_data(&four_team_league(Some(3))).unwrap().unwrap();
        let models = score_models(&season);
        assert!((models[0].mean - 105.0).abs() < 1e-10);
        assert!((models[2].mean - 102.5).abs() < 1e-10);
        assert!((models[1].mean - 92.5).abs() < 1e-10);
        assert!((models[3].mean - 99.0).abs() < 1e-10);
    }

    #[test]
    fn test_bye_week_feeds_model() {
        let data: SeasonData = serde_json::from_value(serde_json::json!({
            "matchups": {
                "1": [
                    {"roster_id": 1, "matchup_id": 1, "points": 100.0},
                    {"roster_id": 2, "matchup_id": 1, "points": 90.0},
                    {"roster_id": 3, "matchup_id": null, "points": 130.0}
                ]
            },
            "rosters": [{"roster_id": 1}, {"roster_id": 2}, {"roster_id": 3}],
            "league": {"settings": {"leg": 2}}
        }))
        .unwrap();
        let season = Season::from_data(&data).unwrap().unwrap();
        let models = score_models(&season);
        assert_eq!(models[2].mean, 130.0, "Bye score counts toward the mean");
        assert_eq!(models[2].games_played, 1);
    }

    #[test]
    fn test_win_pct() {
        let record = TeamRecord {
            wins: 3,
            losses: 4,
            ties: 1,
            points_for: 0.0,
        };
        assert!((record.win_pct() - 0.4375).abs() < 1e-12);
        assert_eq!(TeamRecord::default().win_pct(), 0.0);
    }

    #[test]
    fn test_apply_outcome_tie_is_symmetric() {
        let game = Game {
            week: 1,
            matchup_id: 1,
            team1: 0,
            team2: 1,
            team1_points: 0.0,
            team2_points: 0.0,
        };
        let mut records = vec![TeamRecord::default(); 2];
        apply_outcome(&mut records, &game, &Outcome::from_scores(95.0, 95.0));
        assert_eq!(records[0].ties, 1);
        assert_eq!(records[1].ties, 1);
        assert_eq!(records[0].points_for, 95.0);
    }

    #[test]
    fn test_forced_outcome_ignores_scores() {
        let game = Game {
            week: 1,
            matchup_id: 1,
            team1: 0,
            team2: 1,
            team1_points: 0.0,
            team2_points: 0.0,
        };
        let mut records = vec![TeamRecord::default(); 2];
        apply_outcome(&mut records, &game, &Outcome::forced(false, 120.0, 80.0));
        assert_eq!((records[0].losses, records[1].wins), (1, 1));
        assert_eq!(records[1].points_for, 80.0);
    }
}
