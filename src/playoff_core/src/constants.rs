/// Number of simulated seasons in a full odds sweep
pub const SIMULATION_RUNS: usize = 10_000;

/// Playoff qualifiers when the league settings don't say otherwise
pub const DEFAULT_PLAYOFF_TEAMS: usize = 6;

/// Percentage scale used for every reported probability
pub const PERCENT: f64 = 100.0;

/// Sleeper stores fractional points as hundredths in `fpts_decimal`
pub const FPTS_DECIMAL_SCALE: f64 = 100.0;
