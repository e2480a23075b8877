use rand::Rng;
use std::f64::consts::PI;

use crate::team::ScoreDistribution;

/// Standard normal variate via the Box–Muller transform.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // gen() is in [0, 1); flip it so ln never sees zero
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Draw one weekly score for a team.
///
/// Unclamped: deep tails can go negative. A team without variance always scores its mean.
pub fn sample_score<R: Rng + ?Sized>(dist: &ScoreDistribution, rng: &mut R) -> f64 {
    if !dist.has_variance() {
        return dist.mean;
    }
    dist.mean + dist.std_dev * standard_normal(rng)
}
