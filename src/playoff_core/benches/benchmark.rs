use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::{json, Value};

use playoff_core::{
    calculate_playoff_odds, calculate_strength_of_schedule, rank_standings, Scenario, Season,
    SeasonData, SeasonSimulator, SimulationConfig,
};

/// 12 teams, 9 of 14 regular-season weeks played.
fn create_12_team_league() -> SeasonData {
    let teams = 12usize;
    let mut matchups = serde_json::Map::new();
    for week in 0..14usize {
        let mut order: Vec<usize> = (1..teams).collect();
        order.rotate_left(week % (teams - 1));
        order.insert(0, 0);

        let mut entries = Vec::new();
        for m in 0..teams / 2 {
            for roster in [order[m], order[teams - 1 - m]] {
                let points = if week < 9 {
                    90.0 + ((roster * 7 + week * 13) % 40) as f64
                } else {
                    0.0
                };
                entries.push(json!({"roster_id": roster + 1, "matchup_id": m + 1, "points": points}));
            }
        }
        matchups.insert((week + 1).to_string(), Value::Array(entries));
    }

    let rosters: Vec<Value> = (1..=teams).map(|id| json!({"roster_id": id})).collect();
    serde_json::from_value(json!({
        "matchups": matchups,
        "rosters": rosters,
        "league": {"settings": {"leg": 10, "playoff_week_start": 15}}
    }))
    .unwrap()
}

fn bench_single_season(c: &mut Criterion) {
    let data = create_12_team_league();
    let season = Season::from_data(&data).unwrap().unwrap();
    let simulator = SeasonSimulator::new(&season, &Scenario::default());
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("simulate_and_rank_one_season", |b| {
        b.iter(|| rank_standings(&black_box(&simulator).simulate(&mut rng)))
    });
}

fn bench_full_sweep(c: &mut Criterion) {
    let data = create_12_team_league();
    let parallel = SimulationConfig::with_seed(42);
    let sequential = SimulationConfig {
        parallel: false,
        ..SimulationConfig::with_seed(42)
    };

    c.bench_function("playoff_odds_10000_runs_parallel", |b| {
        b.iter(|| calculate_playoff_odds(black_box(&data), None, &parallel))
    });
    c.bench_function("playoff_odds_10000_runs_sequential", |b| {
        b.iter(|| calculate_playoff_odds(black_box(&data), None, &sequential))
    });
}

fn bench_schedule_strength(c: &mut Criterion) {
    let data = create_12_team_league();

    c.bench_function("strength_of_schedule_12_teams", |b| {
        b.iter(|| calculate_strength_of_schedule(black_box(&data)))
    });
}

criterion_group!(benches, bench_single_season, bench_full_sweep, bench_schedule_strength);
criterion_main!(benches);
