//! Guardrails: the tier-gap underdog cap, the strong-form override
//! conditions that can lift it, and the monotonicity fix-up.
//! Modeled as a short sequence of pure steps, each taking and returning
//! a probability value rather than mutating shared state.

use crate::config::ModelConfig;
use crate::error::{PredictError, Result};
use crate::features::{HeadToHead, PlayerFeatures};
use crate::h2h::{H2hStrength, strength_class};
use crate::tiers::{Tier, tier_gap, underdog_cap};

pub const CAP_WARNING: &str =
    "underdog capped due to large ranking gap with insufficient head-to-head data";
pub const MONOTONICITY_WARNING: &str =
    "monotonicity correction applied: raw signals did not favor the better-ranked player";

#[derive(Debug, Clone)]
pub struct GuardOutcome {
    pub p_a: f64,
    pub warnings: Vec<String>,
    pub overrides_met: u32,
    pub cap_applied: bool,
    pub monotonicity_corrected: bool,
}

/// Count the strong-evidence override conditions that hold. All three
/// read raw features only, never the running probability:
///  (a) underdog out-rates the favorite by a wide margin,
///  (b) underdog has a proven record against top-20 opposition,
///  (c) underdog dominates a well-sampled head-to-head.
pub fn count_overrides(
    cfg: &ModelConfig,
    a: &PlayerFeatures,
    b: &PlayerFeatures,
    h2h: &HeadToHead,
) -> u32 {
    if a.rank == b.rank {
        return 0;
    }
    let g = &cfg.guardrails;
    let a_is_underdog = a.rank > b.rank;
    let (underdog, favorite) = if a_is_underdog { (a, b) } else { (b, a) };
    let underdog_h2h_win_rate = if a_is_underdog {
        h2h.a_win_rate
    } else {
        1.0 - h2h.a_win_rate
    };

    let mut met = 0;
    if underdog.rating - favorite.rating >= g.override_rating_lead {
        met += 1;
    }
    if let Some(rec) = &underdog.top20_record {
        if rec.win_rate >= g.override_top20_win_rate && rec.n_matches >= g.override_top20_min_matches
        {
            met += 1;
        }
    }
    if h2h.n_effective >= g.override_h2h_min_effective
        && underdog_h2h_win_rate >= g.override_h2h_win_rate
    {
        met += 1;
    }
    met
}

/// Run the guardrail sequence over the H2H-adjusted probability for A.
pub fn enforce(
    cfg: &ModelConfig,
    a: &PlayerFeatures,
    b: &PlayerFeatures,
    h2h: &HeadToHead,
    p_a: f64,
) -> Result<GuardOutcome> {
    if !p_a.is_finite() || !(0.0..=1.0).contains(&p_a) {
        return Err(PredictError::GuardrailInvariantViolation(format!(
            "pipeline produced probability {p_a} outside [0,1]"
        )));
    }

    let overrides_met = count_overrides(cfg, a, b, h2h);
    let lifted = overrides_met >= cfg.guardrails.overrides_required;

    let mut warnings = Vec::new();
    let mut p = p_a;
    let mut cap_applied = false;
    let mut monotonicity_corrected = false;

    if !lifted {
        let (capped, hit, warn) = apply_cap(cfg, a, b, h2h, p);
        p = capped;
        cap_applied = hit;
        if warn {
            warnings.push(CAP_WARNING.to_string());
        }

        let (fixed, corrected) = fix_monotonicity(cfg, a.rank, b.rank, p);
        p = fixed;
        if corrected {
            monotonicity_corrected = true;
            log::warn!(
                "monotonicity correction for ranks {} vs {}: p_a {:.4} -> {:.4}",
                a.rank,
                b.rank,
                p_a,
                p
            );
            warnings.push(MONOTONICITY_WARNING.to_string());
        }
    }

    check_invariants(a.rank, b.rank, lifted, p)?;

    Ok(GuardOutcome {
        p_a: p,
        warnings,
        overrides_met,
        cap_applied,
        monotonicity_corrected,
    })
}

/// Clamp the underdog to the tier-gap cap. The cap is the ranking band
/// itself: for any tier-crossing pair, evidence may only modulate the
/// underdog up to `cap(gap)`. The clamp is routine for small gaps and
/// only warning-worthy in the large-gap case where the head-to-head
/// record is too thin to justify an upset call.
fn apply_cap(
    cfg: &ModelConfig,
    a: &PlayerFeatures,
    b: &PlayerFeatures,
    h2h: &HeadToHead,
    p_a: f64,
) -> (f64, bool, bool) {
    let gap = tier_gap(Tier::of(a.rank), Tier::of(b.rank));
    if gap == 0 {
        return (p_a, false, false);
    }

    let cap = underdog_cap(&cfg.prior, gap);
    let underdog_p = if a.rank > b.rank { p_a } else { 1.0 - p_a };
    if underdog_p <= cap {
        return (p_a, false, false);
    }

    let warn = gap >= cfg.guardrails.cap_min_tier_gap
        && strength_class(&cfg.h2h, h2h) != H2hStrength::Strong;
    let capped = if a.rank > b.rank { cap } else { 1.0 - cap };
    (capped, true, warn)
}

/// Last-resort invariant guard: the better-ranked player must not end as
/// the underdog. Not expected to trigger under correct upstream logic;
/// any trigger is surfaced as a warning.
fn fix_monotonicity(cfg: &ModelConfig, rank_a: u32, rank_b: u32, p_a: f64) -> (f64, bool) {
    let floor = 0.5 + cfg.guardrails.monotonic_epsilon;
    if rank_a < rank_b && p_a < 0.5 {
        (p_a.max(floor), true)
    } else if rank_b < rank_a && p_a > 0.5 {
        (p_a.min(1.0 - floor), true)
    } else {
        (p_a, false)
    }
}

fn check_invariants(rank_a: u32, rank_b: u32, lifted: bool, p_a: f64) -> Result<()> {
    if !p_a.is_finite() || !(0.0..=1.0).contains(&p_a) {
        return Err(PredictError::GuardrailInvariantViolation(format!(
            "final probability {p_a} is outside [0,1]"
        )));
    }
    if !lifted {
        if rank_a < rank_b && p_a < 0.5 {
            return Err(PredictError::GuardrailInvariantViolation(format!(
                "better-ranked A left below 0.5 ({p_a})"
            )));
        }
        if rank_b < rank_a && p_a > 0.5 {
            return Err(PredictError::GuardrailInvariantViolation(format!(
                "better-ranked B left below 0.5 ({})",
                1.0 - p_a
            )));
        }
    }
    Ok(())
}
