use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::SimulationConfig;
use crate::constants::PERCENT;
use crate::error::Result;
use crate::overrides::Scenario;
use crate::season::{RosterId, Season, SeasonData};
use crate::simulation::SeasonSimulator;
use crate::standings::rank_standings;

/// How often each team finished in each position.
///
/// Every recorded run adds exactly one count per team and one count per rank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankHistogram {
    teams: usize,
    runs: u32,
    /// Row per team, column per rank (0-based)
    counts: Vec<u32>,
}

impl RankHistogram {
    pub fn new(teams: usize) -> Self {
        RankHistogram {
            teams,
            runs: 0,
            counts: vec![0; teams * teams],
        }
    }

    /// Tally one final standings order (team indices, first place first).
    pub fn record(&mut self, order: &[usize]) {
        debug_assert_eq!(order.len(), self.teams);
        for (rank, &team) in order.iter().enumerate() {
            self.counts[team * self.teams + rank] += 1;
        }
        self.runs += 1;
    }

    /// Combine two worker-local histograms.
    pub fn merge(mut self, other: RankHistogram) -> Self {
        debug_assert_eq!(self.teams, other.teams);
        for (count, extra) in self.counts.iter_mut().zip(other.counts) {
            *count += extra;
        }
        self.runs += other.runs;
        self
    }

    /// Times `team` finished at `rank` (1-based).
    pub fn count(&self, team: usize, rank: usize) -> u32 {
        self.counts[team * self.teams + rank - 1]
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn team_count(&self) -> usize {
        self.teams
    }
}

/// Playoff outlook for one team.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayoffOdds {
    pub roster_id: RosterId,

    /// Final rank (1-based) to percentage of runs
    pub position_odds: BTreeMap<usize, f64>,

    /// Sum of `position_odds` over the qualifying ranks
    pub playoff_odds: f64,

    /// Current record, scenario picks on decided games included
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: f64,
}

impl PlayoffOdds {
    /// Percentage of runs ending at `rank` (1-based).
    pub fn position(&self, rank: usize) -> f64 {
        self.position_odds.get(&rank).copied().unwrap_or(0.0)
    }
}

/// Repeats the season simulation and turns final ranks into percentages.
pub struct OddsAggregator<'a> {
    simulator: SeasonSimulator<'a>,
    runs: usize,
    qualifiers: usize,
    parallel: bool,
}

impl<'a> OddsAggregator<'a> {
    pub fn new(season: &'a Season, scenario: &Scenario, config: &SimulationConfig) -> Self {
        OddsAggregator {
            simulator: SeasonSimulator::new(season, scenario),
            runs: config.runs,
            qualifiers: config.qualifiers(season.playoff_teams(), season.team_count()),
            parallel: config.parallel,
        }
    }

    pub fn qualifiers(&self) -> usize {
        self.qualifiers
    }

    /// Run the full sweep and tally final ranks.
    ///
    /// Each run gets its own seed drawn from `rng` up front, so the histogram is
    /// the same whether the runs execute in parallel or not.
    pub fn histogram<R: Rng + ?Sized>(&self, rng: &mut R) -> RankHistogram {
        let teams = self.simulator.season().team_count();
        let seeds: Vec<u64> = (0..self.runs).map(|_| rng.gen::<u64>()).collect();

        if self.parallel {
            seeds
                .par_iter()
                .fold(
                    || RankHistogram::new(teams),
                    |mut hist, &seed| {
                        hist.record(&self.run_once(seed));
                        hist
                    },
                )
                .reduce(|| RankHistogram::new(teams), RankHistogram::merge)
        } else {
            seeds.iter().fold(RankHistogram::new(teams), |mut hist, &seed| {
                hist.record(&self.run_once(seed));
                hist
            })
        }
    }

    fn run_once(&self, seed: u64) -> Vec<usize> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rank_standings(&self.simulator.simulate(&mut rng))
    }

    /// Playoff odds for every team, best odds first.
    ///
    /// Empty when there is no regular-season game left to simulate.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<PlayoffOdds> {
        if !self.simulator.has_remaining_games() {
            debug!("No remaining regular-season games; nothing to simulate");
            return Vec::new();
        }
        if self.runs == 0 {
            debug!("Zero runs requested; nothing to simulate");
            return Vec::new();
        }

        let hist = self.histogram(rng);
        let season = self.simulator.season();
        let teams = season.team_count();
        let runs = hist.runs() as f64;

        let mut results: Vec<PlayoffOdds> = (0..teams)
            .map(|team| {
                let position_odds: BTreeMap<usize, f64> = (1..=teams)
                    .map(|rank| (rank, PERCENT * hist.count(team, rank) as f64 / runs))
                    .collect();
                let playoff_odds: f64 = (1..=self.qualifiers).map(|rank| position_odds[&rank]).sum();
                let record = self.simulator.baseline()[team];

                PlayoffOdds {
                    roster_id: season.roster_id(team),
                    position_odds,
                    playoff_odds,
                    wins: record.wins,
                    losses: record.losses,
                    ties: record.ties,
                    points_for: record.points_for,
                }
            })
            .collect();

        results.sort_by(|a, b| b.playoff_odds.total_cmp(&a.playoff_odds));

        info!(
            "Simulated {} seasons for {} teams ({} remaining games, top {} qualify)",
            hist.runs(),
            teams,
            season.remaining_games().len(),
            self.qualifiers
        );
        results
    }
}

/// Odds for an already-indexed season with the randomness taken from `config`.
pub(crate) fn odds_for_season(
    season: &Season,
    scenario: &Scenario,
    config: &SimulationConfig,
) -> Vec<PlayoffOdds> {
    let mut rng = config.rng();
    OddsAggregator::new(season, scenario, config).run(&mut rng)
}

/// Playoff odds for every team in the league.
///
/// Returns an empty list when the data is incomplete, no week is complete yet,
/// the season is over, or no regular-season game remains. Errors only on
/// malformed input.
pub fn calculate_playoff_odds(
    data: &SeasonData,
    scenario: Option<&Scenario>,
    config: &SimulationConfig,
) -> Result<Vec<PlayoffOdds>> {
    let default_scenario = Scenario::default();
    let scenario = scenario.unwrap_or(&default_scenario);
    scenario.validate()?;

    let Some(season) = Season::from_data(data)? else {
        return Ok(Vec::new());
    };
    Ok(odds_for_season(&season, scenario, config))
}
