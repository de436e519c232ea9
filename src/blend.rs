//! Logit-space helpers and the prior/evidence blender.

/// Keep probabilities strictly inside (0,1) before taking log-odds so a
/// hard prior can never saturate the blend.
const LOGIT_EPS: f64 = 1e-6;

pub fn logit(p: f64) -> f64 {
    let p = p.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS);
    (p / (1.0 - p)).ln()
}

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Weighted log-odds blend: `w` = 1 is pure evidence, `w` = 0 pure
/// prior, smooth interpolation in between.
pub fn blend(p_prior: f64, p_evidence: f64, w: f64) -> f64 {
    let l = w * logit(p_evidence) + (1.0 - w) * logit(p_prior);
    sigmoid(l)
}
