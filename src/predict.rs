//! The prediction pipeline: prior -> evidence -> blend -> head-to-head
//! -> guardrails -> uncertainty -> explanation. Every stage is a pure
//! function of its inputs and the supplied configuration; a call leaves
//! no state behind.

use serde::{Deserialize, Serialize};

use crate::blend::{blend, logit};
use crate::config::ModelConfig;
use crate::error::Result;
use crate::explain::{Driver, ExplainContext, SignalBreakdown, drivers};
use crate::features::{HeadToHead, PlayerFeatures, validate_inputs};
use crate::guardrails::enforce;
use crate::tiers::{Tier, ranking_prior, tier_gap};
use crate::{evidence, h2h, uncertainty};

pub const LOW_EVIDENCE_WARNING: &str =
    "limited recent match data; prediction leans on ranking prior";

/// Display-only fatigue contribution per extra match in the 14-day
/// window, and its clamp. Fatigue never moves the probability.
const FATIGUE_NOTE_SCALE: f64 = 0.05;
const FATIGUE_NOTE_CAP: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    A,
    B,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProbPair {
    #[serde(rename = "A")]
    pub a: f64,
    #[serde(rename = "B")]
    pub b: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CiPair {
    #[serde(rename = "A")]
    pub a: [f64; 2],
    #[serde(rename = "B")]
    pub b: [f64; 2],
}

/// Final structured prediction. Constructed once per invocation; every
/// field is always present (`drivers`/`warnings` may be empty lists).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub winner: Winner,
    pub proba: ProbPair,
    pub ci95: CiPair,
    pub drivers: Vec<Driver>,
    pub warnings: Vec<String>,
}

/// Predict the outcome of a match between players A and B.
///
/// The feature vectors and head-to-head record come fully resolved from
/// the upstream data layer. `seed` makes the resampled interval (and so
/// the whole result) deterministic; without it only the distributional
/// parameters are.
pub fn predict_match(
    cfg: &ModelConfig,
    a: &PlayerFeatures,
    b: &PlayerFeatures,
    h2h_record: &HeadToHead,
    seed: Option<u64>,
) -> Result<PredictionResult> {
    validate_inputs(a, b, h2h_record)?;

    let tier_a = Tier::of(a.rank);
    let tier_b = Tier::of(b.rank);
    let gap = tier_gap(tier_a, tier_b);
    let p_prior = ranking_prior(&cfg.prior, tier_a, tier_b);

    let ev = evidence::evaluate(&cfg.evidence, a, b);
    let p_blend = blend(p_prior, ev.p_a, ev.weight);
    let (p_adjusted, h2h_shift) = h2h::adjust(&cfg.h2h, p_blend, h2h_record);

    log::debug!(
        "ranks {}v{} gap {gap}: prior {p_prior:.3}, evidence {:.3} (w {:.2}), blend {p_blend:.3}, h2h {p_adjusted:.3}",
        a.rank,
        b.rank,
        ev.p_a,
        ev.weight,
    );

    let guard = enforce(cfg, a, b, h2h_record, p_adjusted)?;

    let p_a = round3(guard.p_a);
    let p_b = round3(1.0 - p_a);

    let mut warnings = guard.warnings;
    if ev.weight <= 0.25 && h2h_record.n_effective < 1.0 {
        warnings.push(LOW_EVIDENCE_WARNING.to_string());
    }

    let ess = uncertainty::effective_sample_size(&cfg.uncertainty, ev.weight, h2h_record.n_effective);
    let interval = uncertainty::interval_95(&cfg.uncertainty, p_a, ess, seed);

    let signals = SignalBreakdown {
        prior: (1.0 - ev.weight) * logit(p_prior),
        rating: ev.weight * ev.elo_logit,
        form: ev.weight * ev.form_adj,
        opponent_strength: ev.weight * ev.opponent_adj,
        h2h: if h2h_shift == 0.0 {
            0.0
        } else {
            logit(p_adjusted) - logit(p_blend)
        },
        fatigue: (FATIGUE_NOTE_SCALE
            * (b.fatigue.matches_14d as f64 - a.fatigue.matches_14d as f64))
            .clamp(-FATIGUE_NOTE_CAP, FATIGUE_NOTE_CAP),
    };
    let driver_rows = drivers(&ExplainContext {
        a,
        b,
        h2h: h2h_record,
        tier_gap: gap,
        signals,
    });

    Ok(PredictionResult {
        winner: if p_a >= 0.5 { Winner::A } else { Winner::B },
        proba: ProbPair { a: p_a, b: p_b },
        ci95: CiPair {
            a: interval.a,
            b: interval.b,
        },
        drivers: driver_rows,
        warnings,
    })
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
