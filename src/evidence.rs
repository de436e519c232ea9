//! Evidence model: rating difference plus bounded secondary signals,
//! with a sample-size confidence weight.

use crate::blend::sigmoid;
use crate::config::EvidenceConfig;
use crate::features::PlayerFeatures;

/// Probability clamp for the evidence output. The prior keeps its own
/// floor through the logit blend; this one stops degenerate ratings from
/// producing hard 0/1 evidence.
const EVIDENCE_CLAMP: (f64, f64) = (0.01, 0.99);

#[derive(Debug, Clone, Copy)]
pub struct Evidence {
    /// P(A wins) from ratings + secondary signals.
    pub p_a: f64,
    /// Confidence weight in [weight_min, weight_max].
    pub weight: f64,
    // Logit decomposition, kept for the explanation stage.
    pub elo_logit: f64,
    pub form_adj: f64,
    pub opponent_adj: f64,
}

/// Logit of the standard Elo win expectation for a rating difference.
pub fn elo_logit(cfg: &EvidenceConfig, rating_diff: f64) -> f64 {
    rating_diff / cfg.elo_scale * std::f64::consts::LN_10
}

pub fn evaluate(cfg: &EvidenceConfig, a: &PlayerFeatures, b: &PlayerFeatures) -> Evidence {
    let elo = elo_logit(cfg, a.rating - b.rating);

    let form_raw = cfg.form_win_rate_coef * (a.form.win_rate - b.form.win_rate)
        + cfg.form_game_diff_coef * (a.form.game_diff - b.form.game_diff);
    let form_adj = form_raw.clamp(-cfg.secondary_cap, cfg.secondary_cap);

    let opp_raw = cfg.opponent_strength_coef * (a.opponent_strength - b.opponent_strength);
    let opponent_adj = opp_raw.clamp(-cfg.secondary_cap, cfg.secondary_cap);

    let p_a = sigmoid(elo + form_adj + opponent_adj).clamp(EVIDENCE_CLAMP.0, EVIDENCE_CLAMP.1);

    Evidence {
        p_a,
        weight: evidence_weight(cfg, a.form.n_matches, b.form.n_matches),
        elo_logit: elo,
        form_adj,
        opponent_adj,
    }
}

/// Confidence in the evidence, driven by the *smaller* of the two recent
/// sample sizes: the blend is only as trustworthy as the less-observed
/// player.
pub fn evidence_weight(cfg: &EvidenceConfig, n_a: u32, n_b: u32) -> f64 {
    let n = n_a.min(n_b) as f64;
    (n.sqrt() / 10.0).clamp(cfg.weight_min, cfg.weight_max)
}
