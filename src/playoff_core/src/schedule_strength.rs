use log::debug;
use std::collections::BTreeMap;

use crate::error::Result;
use crate::season::{RosterId, Season, SeasonData};
use crate::team::score_models;

/// Average season-to-date scoring of each team's remaining opponents.
///
/// Indexed like [`Season::teams`]. A team with nothing left to play gets 0.
pub fn remaining_opponent_strength(season: &Season) -> Vec<f64> {
    let models = score_models(season);
    let mut opponents: Vec<Vec<f64>> = vec![Vec::new(); season.team_count()];
    for game in season.remaining_games() {
        opponents[game.team1].push(models[game.team2].mean);
        opponents[game.team2].push(models[game.team1].mean);
    }

    opponents
        .iter()
        .map(|strengths| match strengths.len() {
            0 => 0.0,
            n => strengths.iter().sum::<f64>() / n as f64,
        })
        .collect()
}

/// Rank teams by remaining schedule difficulty, 1 = hardest.
///
/// Equal strengths keep roster order. Returns an empty map when the data is
/// incomplete or no week has been completed.
pub fn calculate_strength_of_schedule(data: &SeasonData) -> Result<BTreeMap<RosterId, usize>> {
    let Some(season) = Season::from_data(data)? else {
        return Ok(BTreeMap::new());
    };

    let strength = remaining_opponent_strength(&season);
    let mut order: Vec<usize> = (0..season.team_count()).collect();
    order.sort_by(|&a, &b| strength[b].total_cmp(&strength[a]));

    debug!(
        "Schedule strength over {} remaining games: {:?}",
        season.remaining_games().len(),
        strength
    );

    Ok(order
        .into_iter()
        .enumerate()
        .map(|(pos, team)| (season.roster_id(team), pos + 1))
        .collect())
}
