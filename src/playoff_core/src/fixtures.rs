use serde_json::json;

use crate::season::SeasonData;

/// Four teams, two weeks played, one regular-season week left, playoffs from week 4.
///
/// Roster 1 beat 2 (100-90, 110-95); roster 3 beat 4 (105-100, 100-98).
/// Week 3 pairs 1 vs 3 and 2 vs 4.
pub(crate) fn four_team_league(leg: Option<u32>) -> SeasonData {
    serde_json::from_value(json!({
        "matchups": {
            "1": [
                {"roster_id": 1, "matchup_id": 1, "points": 100.0},
                {"roster_id": 2, "matchup_id": 1, "points": 90.0},
                {"roster_id": 3, "matchup_id": 2, "points": 105.0},
                {"roster_id": 4, "matchup_id": 2, "points": 100.0}
            ],
            "2": [
                {"roster_id": 1, "matchup_id": 1, "points": 110.0},
                {"roster_id": 2, "matchup_id": 1, "points": 95.0},
                {"roster_id": 3, "matchup_id": 2, "points": 100.0},
                {"roster_id": 4, "matchup_id": 2, "points": 98.0}
            ],
            "3": [
                {"roster_id": 1, "matchup_id": 1, "points": 0.0},
                {"roster_id": 3, "matchup_id": 1, "points": 0.0},
                {"roster_id": 2, "matchup_id": 2, "points": 0.0},
                {"roster_id": 4, "matchup_id": 2, "points": 0.0}
            ]
        },
        "rosters": [
            {"roster_id": 1, "settings": {"wins": 2, "losses": 0, "ties": 0, "fpts": 210}},
            {"roster_id": 2, "settings": {"wins": 0, "losses": 2, "ties": 0, "fpts": 185}},
            {"roster_id": 3, "settings": {"wins": 2, "losses": 0, "ties": 0, "fpts": 205}},
            {"roster_id": 4, "settings": {"wins": 0, "losses": 2, "ties": 0, "fpts": 198}}
        ],
        "league": {
            "settings": {"leg": leg, "playoff_week_start": 4}
        }
    }))
    .expect("fixture is valid season data")
}
