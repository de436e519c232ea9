//! Input data model. Every struct here is built by the upstream
//! data/feature layer and is immutable once constructed; the engine only
//! reads it. Validation is fail-fast: a vector that passes
//! [`validate_inputs`] is safe for the whole pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{PredictError, Result};

/// Recent-form statistics over a player's last 20 matches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RecentForm {
    pub win_rate: f64,
    /// Average games won minus games lost per match.
    pub game_diff: f64,
    pub n_matches: u32,
}

/// Match-density counters over trailing windows.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Fatigue {
    pub matches_14d: u32,
    pub matches_30d: u32,
    pub minutes_14d: f64,
    pub minutes_30d: f64,
}

/// Record against top-20-ranked opponents in the last 12 months.
/// Optional: upstream sources often cannot supply it, and a missing
/// record simply fails override condition (b).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TopOpponentRecord {
    pub win_rate: f64,
    pub n_matches: u32,
}

/// Fully-resolved per-player feature vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerFeatures {
    /// World ranking, 1 = best.
    pub rank: u32,
    pub points: u32,
    /// Time-decayed Elo-style rating. Decay (half-life 180 days) is
    /// applied upstream; the engine consumes the decayed value as-is.
    pub rating: f64,
    pub form: RecentForm,
    /// Average rating of opponents faced in the form window.
    pub opponent_strength: f64,
    pub fatigue: Fatigue,
    #[serde(default)]
    pub top20_record: Option<TopOpponentRecord>,
}

/// Head-to-head record between the two players over the last 24 months,
/// from player A's perspective.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeadToHead {
    pub n_matches: u32,
    /// Time-decayed effective sample size, always <= n_matches.
    pub n_effective: f64,
    pub a_win_rate: f64,
}

impl HeadToHead {
    /// A record carrying no information: no meetings in the window.
    pub fn empty() -> Self {
        Self {
            n_matches: 0,
            n_effective: 0.0,
            a_win_rate: 0.5,
        }
    }
}

pub fn validate_inputs(a: &PlayerFeatures, b: &PlayerFeatures, h2h: &HeadToHead) -> Result<()> {
    validate_player("A", a)?;
    validate_player("B", b)?;

    if !h2h.n_effective.is_finite() || h2h.n_effective < 0.0 {
        return Err(invalid(format!(
            "h2h n_effective must be finite and >= 0, got {}",
            h2h.n_effective
        )));
    }
    if h2h.n_effective > h2h.n_matches as f64 {
        return Err(invalid(format!(
            "h2h n_effective {} exceeds n_matches {}",
            h2h.n_effective, h2h.n_matches
        )));
    }
    validate_rate("h2h a_win_rate", h2h.a_win_rate)?;
    Ok(())
}

fn validate_player(label: &str, p: &PlayerFeatures) -> Result<()> {
    if p.rank < 1 {
        return Err(invalid(format!("player {label}: rank must be >= 1")));
    }
    if !p.rating.is_finite() {
        return Err(invalid(format!("player {label}: rating is not finite")));
    }
    if !p.opponent_strength.is_finite() {
        return Err(invalid(format!(
            "player {label}: opponent_strength is not finite"
        )));
    }
    validate_rate(&format!("player {label} form win_rate"), p.form.win_rate)?;
    if !p.form.game_diff.is_finite() {
        return Err(invalid(format!("player {label}: form game_diff is not finite")));
    }
    if !p.fatigue.minutes_14d.is_finite()
        || p.fatigue.minutes_14d < 0.0
        || !p.fatigue.minutes_30d.is_finite()
        || p.fatigue.minutes_30d < 0.0
    {
        return Err(invalid(format!(
            "player {label}: fatigue minutes must be finite and >= 0"
        )));
    }
    if let Some(rec) = &p.top20_record {
        validate_rate(&format!("player {label} top20 win_rate"), rec.win_rate)?;
    }
    Ok(())
}

fn validate_rate(name: &str, v: f64) -> Result<()> {
    if !v.is_finite() || !(0.0..=1.0).contains(&v) {
        return Err(invalid(format!("{name} must be in [0,1], got {v}")));
    }
    Ok(())
}

fn invalid(msg: String) -> PredictError {
    PredictError::InvalidFeatures(msg)
}
