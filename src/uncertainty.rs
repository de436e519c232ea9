//! Resampling-based 95% interval around the final probability.
//!
//! Samples a Beta distribution whose mean sits at the point estimate and
//! whose concentration grows with the evidence actually seen, so thin
//! inputs produce wide bands and rich inputs tight ones. The random
//! source is locally scoped per call: concurrent invocations can never
//! interfere, and a supplied seed makes the draw fully deterministic.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Beta, Distribution};

use crate::config::UncertaintyConfig;

#[derive(Debug, Clone, Copy)]
pub struct Interval {
    pub a: [f64; 2],
    pub b: [f64; 2],
}

/// Pseudo-count of evidence behind the point estimate, combining the
/// blend weight and the head-to-head effective sample size.
pub fn effective_sample_size(cfg: &UncertaintyConfig, weight: f64, h2h_effective: f64) -> f64 {
    cfg.concentration_base
        + cfg.concentration_weight_scale * weight
        + cfg.concentration_h2h_scale * h2h_effective.min(cfg.concentration_h2h_cap)
}

/// 95% interval for both sides. `p_a` is the reported (already rounded)
/// probability for A; B's interval is the pointwise complement of A's.
pub fn interval_95(cfg: &UncertaintyConfig, p_a: f64, ess: f64, seed: Option<u64>) -> Interval {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let alpha = (p_a * ess).max(1.0);
    let beta = ((1.0 - p_a) * ess).max(1.0);
    let dist = Beta::new(alpha, beta).expect("alpha and beta are clamped to >= 1");

    let mut samples: Vec<f64> = (0..cfg.n_samples).map(|_| dist.sample(&mut rng)).collect();
    samples.sort_by(f64::total_cmp);

    let mut low = round3(percentile(&samples, 0.025));
    let mut high = round3(percentile(&samples, 0.975));
    // The reported band must bracket the reported point estimate.
    low = low.min(p_a);
    high = high.max(p_a);

    Interval {
        a: [low, high],
        b: [round3(1.0 - high), round3(1.0 - low)],
    }
}

fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = pos - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn width(iv: &Interval) -> f64 {
        iv.a[1] - iv.a[0]
    }

    #[test]
    fn interval_brackets_point_estimate() {
        let cfg = UncertaintyConfig::default();
        for p in [0.05, 0.3, 0.5, 0.7, 0.95] {
            let iv = interval_95(&cfg, p, 60.0, Some(7));
            assert!(iv.a[0] <= p && p <= iv.a[1], "{p} outside {:?}", iv.a);
        }
    }

    #[test]
    fn b_interval_is_pointwise_complement() {
        let cfg = UncertaintyConfig::default();
        let iv = interval_95(&cfg, 0.7, 60.0, Some(7));
        assert!((iv.b[0] - (1.0 - iv.a[1])).abs() < 1e-9);
        assert!((iv.b[1] - (1.0 - iv.a[0])).abs() < 1e-9);
    }

    #[test]
    fn same_seed_reproduces_interval() {
        let cfg = UncertaintyConfig::default();
        let x = interval_95(&cfg, 0.64, 55.0, Some(42));
        let y = interval_95(&cfg, 0.64, 55.0, Some(42));
        assert_eq!(x.a, y.a);
        assert_eq!(x.b, y.b);
    }

    #[test]
    fn more_evidence_tightens_the_band() {
        let cfg = UncertaintyConfig::default();
        let loose = interval_95(&cfg, 0.7, effective_sample_size(&cfg, 0.2, 0.0), Some(9));
        let tight = interval_95(&cfg, 0.7, effective_sample_size(&cfg, 1.0, 5.0), Some(9));
        assert!(width(&tight) < width(&loose));
    }

    #[test]
    fn ess_combines_weight_and_h2h() {
        let cfg = UncertaintyConfig::default();
        let base = effective_sample_size(&cfg, 0.2, 0.0);
        assert!((base - 40.0).abs() < 1e-9);
        // H2H contribution caps out.
        assert_eq!(
            effective_sample_size(&cfg, 0.5, 5.0),
            effective_sample_size(&cfg, 0.5, 50.0)
        );
    }

    #[test]
    fn unseeded_draw_still_brackets_estimate() {
        let cfg = UncertaintyConfig::default();
        let iv = interval_95(&cfg, 0.55, 60.0, None);
        assert!(iv.a[0] <= 0.55 && 0.55 <= iv.a[1]);
        assert!(iv.a[0] >= 0.0 && iv.a[1] <= 1.0);
    }
}
