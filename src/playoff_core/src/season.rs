use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::constants::FPTS_DECIMAL_SCALE;
use crate::error::{Result, SeasonError};
use crate::team::TeamRecord;

/// Stable roster identifier within a league-season.
pub type RosterId = u32;

/// Raw season data as supplied by the host application.
///
/// Every section is optional; a missing section means there is nothing to
/// simulate rather than an error.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SeasonData {
    /// Week number (as a string key) to that week's matchup entries
    #[serde(default)]
    pub matchups: Option<BTreeMap<String, Vec<MatchupEntry>>>,

    #[serde(default)]
    pub rosters: Option<Vec<Roster>>,

    #[serde(default)]
    pub league: Option<League>,
}

/// One team's line in one week.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchupEntry {
    #[serde(alias = "rosterId")]
    pub roster_id: RosterId,

    /// Shared by the two entries that play each other; absent for byes
    #[serde(default, alias = "matchupId")]
    pub matchup_id: Option<u32>,

    #[serde(default)]
    pub points: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Roster {
    #[serde(alias = "rosterId")]
    pub roster_id: RosterId,

    #[serde(default)]
    pub settings: RosterSettings,
}

/// Record as reported by the league host.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterSettings {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub fpts: f64,
    pub fpts_decimal: Option<f64>,
}

impl Roster {
    /// Reported points for, with the hundredths folded back in.
    pub fn points_for(&self) -> f64 {
        self.settings.fpts + self.settings.fpts_decimal.unwrap_or(0.0) / FPTS_DECIMAL_SCALE
    }

    pub fn reported_record(&self) -> TeamRecord {
        TeamRecord {
            wins: self.settings.wins,
            losses: self.settings.losses,
            ties: self.settings.ties,
            points_for: self.points_for(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct League {
    #[serde(default)]
    pub settings: LeagueSettings,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueSettings {
    /// Week in progress; absent once the season is over
    pub leg: Option<u32>,
    pub last_scored_leg: Option<u32>,
    pub playoff_week_start: Option<u32>,
    pub playoff_teams: Option<usize>,
}

impl LeagueSettings {
    /// Last week whose results are final.
    ///
    /// `None` when the season is finished (no `leg`) or nothing has been played yet.
    pub fn completed_week(&self) -> Option<u32> {
        let leg = self.leg?;
        match self.last_scored_leg {
            Some(week) => Some(week),
            None if leg <= 1 => None,
            None => Some(leg - 1),
        }
    }

    /// First postseason week. Zero is how some hosts spell "not set".
    pub fn playoff_week_start(&self) -> Option<u32> {
        self.playoff_week_start.filter(|&week| week > 0)
    }
}

impl SeasonData {
    pub fn from_json(json: &str) -> Result<Self> {
        let data: SeasonData = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// Reject values that would poison every aggregate downstream.
    pub fn validate(&self) -> Result<()> {
        if let Some(matchups) = &self.matchups {
            for (week, entries) in matchups {
                parse_week(week)?;
                for entry in entries {
                    if let Some(points) = entry.points {
                        check_finite(points, || {
                            format!("points for roster {} in week {}", entry.roster_id, week)
                        })?;
                    }
                }
            }
        }
        if let Some(rosters) = &self.rosters {
            for roster in rosters {
                check_finite(roster.settings.fpts, || format!("fpts for roster {}", roster.roster_id))?;
                if let Some(decimal) = roster.settings.fpts_decimal {
                    check_finite(decimal, || format!("fpts_decimal for roster {}", roster.roster_id))?;
                }
            }
        }
        Ok(())
    }
}

pub(crate) fn check_finite(value: f64, what: impl FnOnce() -> String) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SeasonError::NonFiniteValue { what: what(), value })
    }
}

fn parse_week(key: &str) -> Result<u32> {
    match key.trim().parse::<u32>() {
        Ok(week) if week > 0 => Ok(week),
        _ => Err(SeasonError::InvalidWeek(key.to_string())),
    }
}

/// A paired regular-season game. Teams are indices into [`Season::teams`].
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    pub week: u32,
    pub matchup_id: u32,
    pub team1: usize,
    pub team2: usize,
    pub team1_points: f64,
    pub team2_points: f64,
}

/// Season data indexed for simulation.
///
/// Teams keep roster-list order, which is also the final tie-break order.
#[derive(Clone, Debug)]
pub struct Season {
    teams: Vec<RosterId>,
    rosters: Vec<Roster>,
    completed_week: u32,
    playoff_week_start: Option<u32>,
    playoff_teams: Option<usize>,
    /// Every completed regular-season score per team, byes included
    completed_scores: Vec<Vec<f64>>,
    completed: Vec<Game>,
    remaining: Vec<Game>,
}

impl Season {
    /// Build the simulation view of the season.
    ///
    /// `Ok(None)` when a section is missing or no completed week can be derived.
    pub fn from_data(data: &SeasonData) -> Result<Option<Self>> {
        data.validate()?;

        let (Some(matchups), Some(rosters), Some(league)) =
            (&data.matchups, &data.rosters, &data.league)
        else {
            debug!("Season data incomplete; nothing to evaluate");
            return Ok(None);
        };

        let Some(completed_week) = league.settings.completed_week() else {
            debug!("No completed week (leg = {:?})", league.settings.leg);
            return Ok(None);
        };
        let playoff_week_start = league.settings.playoff_week_start();

        let mut teams = Vec::with_capacity(rosters.len());
        let mut index = HashMap::with_capacity(rosters.len());
        for roster in rosters {
            if index.insert(roster.roster_id, teams.len()).is_some() {
                return Err(SeasonError::DuplicateRoster(roster.roster_id));
            }
            teams.push(roster.roster_id);
        }

        let mut weeks = BTreeMap::new();
        for (key, entries) in matchups {
            weeks.insert(parse_week(key)?, entries);
        }

        let mut completed_scores = vec![Vec::new(); teams.len()];
        let mut completed = Vec::new();
        let mut remaining = Vec::new();
        for (&week, entries) in &weeks {
            if playoff_week_start.is_some_and(|start| week >= start) {
                continue;
            }
            let games = pair_week(week, entries, &index);
            if week <= completed_week {
                for entry in entries.iter() {
                    if let (Some(&team), Some(points)) = (index.get(&entry.roster_id), entry.points) {
                        completed_scores[team].push(points);
                    }
                }
                completed.extend(games);
            } else {
                remaining.extend(games);
            }
        }

        debug!(
            "Season: {} teams, completed through week {}, playoffs from {:?}, {} games played, {} remaining",
            teams.len(),
            completed_week,
            playoff_week_start,
            completed.len(),
            remaining.len()
        );

        Ok(Some(Season {
            teams,
            rosters: rosters.clone(),
            completed_week,
            playoff_week_start,
            playoff_teams: league.settings.playoff_teams,
            completed_scores,
            completed,
            remaining,
        }))
    }

    pub fn teams(&self) -> &[RosterId] {
        &self.teams
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn roster_id(&self, team: usize) -> RosterId {
        self.teams[team]
    }

    pub fn rosters(&self) -> &[Roster] {
        &self.rosters
    }

    pub fn completed_week(&self) -> u32 {
        self.completed_week
    }

    pub fn playoff_week_start(&self) -> Option<u32> {
        self.playoff_week_start
    }

    /// Qualifier count from the league settings, if the host provides one.
    pub fn playoff_teams(&self) -> Option<usize> {
        self.playoff_teams
    }

    /// Points a team scored in each completed regular-season week, bye weeks included.
    pub fn completed_scores(&self, team: usize) -> &[f64] {
        &self.completed_scores[team]
    }

    /// Regular-season games already decided, in week then matchup order.
    pub fn completed_games(&self) -> &[Game] {
        &self.completed
    }

    /// Regular-season games still to play, in week then matchup order.
    pub fn remaining_games(&self) -> &[Game] {
        &self.remaining
    }

    pub fn find_game(&self, week: u32, matchup_id: u32) -> Option<&Game> {
        self.completed
            .iter()
            .chain(&self.remaining)
            .find(|g| g.week == week && g.matchup_id == matchup_id)
    }
}

/// Pair one week's entries into games by `matchup_id`.
///
/// Entries without a partner are byes and produce nothing.
fn pair_week(week: u32, entries: &[MatchupEntry], index: &HashMap<RosterId, usize>) -> Vec<Game> {
    let mut groups: BTreeMap<u32, Vec<&MatchupEntry>> = BTreeMap::new();
    for entry in entries {
        let Some(matchup_id) = entry.matchup_id else {
            continue;
        };
        if !index.contains_key(&entry.roster_id) {
            debug!("Week {}: roster {} is not in the league, skipping", week, entry.roster_id);
            continue;
        }
        groups.entry(matchup_id).or_default().push(entry);
    }

    let mut games = Vec::with_capacity(groups.len());
    for (matchup_id, group) in groups {
        match group.as_slice() {
            [first, second] => games.push(Game {
                week,
                matchup_id,
                team1: index[&first.roster_id],
                team2: index[&second.roster_id],
                team1_points: first.points.unwrap_or(0.0),
                team2_points: second.points.unwrap_or(0.0),
            }),
            [_] => {}
            _ => warn!(
                "Week {} matchup {} has {} entries, expected 2; skipping",
                week,
                matchup_id,
                group.len()
            ),
        }
    }
    games
}
