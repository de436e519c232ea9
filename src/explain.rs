//! Plain-language drivers for a finished prediction. Purely
//! presentational: every number shown here was decided upstream.

use serde::{Deserialize, Serialize};

use crate::features::{HeadToHead, PlayerFeatures};

// Impact thresholds on the absolute logit contribution of a signal.
const STRONG: f64 = 0.80;
const MODERATE: f64 = 0.35;
const MILD: f64 = 0.12;

/// Smallest driver list worth showing; padded with neutral entries.
const MIN_DRIVERS: usize = 3;
const MAX_DRIVERS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub feature: String,
    pub impact: String,
    pub note: String,
}

/// Per-signal logit contributions, recorded while the pipeline runs.
/// Positive values favor player A. The fatigue entry is display-only:
/// fatigue never moves the probability.
#[derive(Debug, Clone, Copy)]
pub struct SignalBreakdown {
    pub prior: f64,
    pub rating: f64,
    pub form: f64,
    pub opponent_strength: f64,
    pub h2h: f64,
    pub fatigue: f64,
}

pub struct ExplainContext<'a> {
    pub a: &'a PlayerFeatures,
    pub b: &'a PlayerFeatures,
    pub h2h: &'a HeadToHead,
    pub tier_gap: u32,
    pub signals: SignalBreakdown,
}

/// Rank the signals by contribution magnitude and emit the top 3-5 as
/// plain-language drivers.
pub fn drivers(ctx: &ExplainContext) -> Vec<Driver> {
    let s = &ctx.signals;
    let mut candidates = vec![
        ("Ranking gap", s.prior, ranking_note(ctx)),
        ("Performance rating", s.rating, rating_note(ctx)),
        ("Recent form", s.form, form_note(ctx)),
        ("Opponent strength", s.opponent_strength, opponent_note(ctx)),
        ("Head-to-head", s.h2h, h2h_note(ctx)),
        ("Fatigue", s.fatigue, fatigue_note(ctx)),
    ];
    candidates.sort_by(|x, y| y.1.abs().total_cmp(&x.1.abs()));

    let mut out: Vec<Driver> = candidates
        .into_iter()
        .take(MAX_DRIVERS)
        .map(|(feature, contrib, note)| Driver {
            feature: feature.to_string(),
            impact: impact_label(contrib),
            note,
        })
        .collect();

    // Trailing neutral entries add nothing beyond the minimum count.
    while out.len() > MIN_DRIVERS && out.last().is_some_and(|d| d.impact == "neutral") {
        out.pop();
    }
    out
}

fn impact_label(contrib: f64) -> String {
    let magnitude = contrib.abs();
    let word = if magnitude >= STRONG {
        "strong"
    } else if magnitude >= MODERATE {
        "moderate"
    } else if magnitude >= MILD {
        "mild"
    } else {
        return "neutral".to_string();
    };
    if contrib > 0.0 {
        format!("+ {word}")
    } else {
        format!("- {word}")
    }
}

fn ranking_note(ctx: &ExplainContext) -> String {
    let (ra, rb) = (ctx.a.rank, ctx.b.rank);
    if ctx.tier_gap >= 3 {
        if ra < rb {
            format!("Top-tier player (#{ra}) vs lower-ranked (#{rb}) strongly favors A")
        } else {
            format!("Top-tier player (#{rb}) vs lower-ranked (#{ra}) strongly favors B")
        }
    } else if ctx.tier_gap >= 1 {
        format!("Ranking gap (#{ra} vs #{rb}) gives the higher seed an edge")
    } else {
        format!("Similar rankings (#{ra} vs #{rb})")
    }
}

fn rating_note(ctx: &ExplainContext) -> String {
    let diff = ctx.a.rating - ctx.b.rating;
    if diff.abs() >= 150.0 {
        let side = if diff > 0.0 { "A" } else { "B" };
        format!(
            "Performance rating differential favors {side} ({:.0} vs {:.0})",
            ctx.a.rating, ctx.b.rating
        )
    } else {
        "Performance ratings are effectively even".to_string()
    }
}

fn form_note(ctx: &ExplainContext) -> String {
    let (fa, fb) = (ctx.a.form.win_rate, ctx.b.form.win_rate);
    if (fa - fb).abs() > 0.15 {
        if fa > fb {
            format!(
                "Player A has stronger recent form ({:.0}% vs {:.0}%)",
                fa * 100.0,
                fb * 100.0
            )
        } else {
            format!(
                "Player B has stronger recent form ({:.0}% vs {:.0}%)",
                fb * 100.0,
                fa * 100.0
            )
        }
    } else {
        "Both players showing similar recent form".to_string()
    }
}

fn opponent_note(ctx: &ExplainContext) -> String {
    let diff = ctx.a.opponent_strength - ctx.b.opponent_strength;
    if diff.abs() >= 80.0 {
        let side = if diff > 0.0 { "A" } else { "B" };
        format!("Player {side} has faced tougher opposition recently")
    } else {
        "Both players have faced comparable opposition".to_string()
    }
}

fn h2h_note(ctx: &ExplainContext) -> String {
    let h = ctx.h2h;
    if h.n_matches >= 3 {
        if h.a_win_rate > 0.6 {
            format!("Player A leads the head-to-head ({} recent matches)", h.n_matches)
        } else if h.a_win_rate < 0.4 {
            format!("Player B leads the head-to-head ({} recent matches)", h.n_matches)
        } else {
            format!("Even head-to-head record ({} recent matches)", h.n_matches)
        }
    } else {
        "No significant head-to-head history in last 24 months".to_string()
    }
}

fn fatigue_note(ctx: &ExplainContext) -> String {
    let (ma, mb) = (ctx.a.fatigue.matches_14d, ctx.b.fatigue.matches_14d);
    if ma.abs_diff(mb) >= 3 {
        let (side, busy, rest) = if ma > mb { ("A", ma, mb) } else { ("B", mb, ma) };
        format!(
            "Player {side} carries a heavier recent workload ({busy} matches in 14 days vs {rest})"
        )
    } else {
        "Neither player shows an unusual recent workload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{Fatigue, RecentForm};

    fn player(rank: u32, rating: f64, win_rate: f64, matches_14d: u32) -> PlayerFeatures {
        PlayerFeatures {
            rank,
            points: 1000,
            rating,
            form: RecentForm {
                win_rate,
                game_diff: 0.0,
                n_matches: 12,
            },
            opponent_strength: 1500.0,
            fatigue: Fatigue {
                matches_14d,
                matches_30d: matches_14d * 2,
                minutes_14d: 0.0,
                minutes_30d: 0.0,
            },
            top20_record: None,
        }
    }

    fn ctx<'a>(
        a: &'a PlayerFeatures,
        b: &'a PlayerFeatures,
        h2h: &'a HeadToHead,
        signals: SignalBreakdown,
    ) -> ExplainContext<'a> {
        ExplainContext {
            a,
            b,
            h2h,
            tier_gap: 2,
            signals,
        }
    }

    #[test]
    fn emits_between_three_and_five_drivers() {
        let a = player(10, 1700.0, 0.7, 2);
        let b = player(45, 1500.0, 0.5, 2);
        let h2h = HeadToHead::empty();
        let signals = SignalBreakdown {
            prior: 0.5,
            rating: 0.9,
            form: 0.2,
            opponent_strength: 0.05,
            h2h: 0.0,
            fatigue: 0.0,
        };
        let out = drivers(&ctx(&a, &b, &h2h, signals));
        assert!(out.len() >= 3 && out.len() <= 5, "got {}", out.len());
        // Largest contribution first.
        assert_eq!(out[0].feature, "Performance rating");
    }

    #[test]
    fn every_driver_has_descriptive_fields() {
        let a = player(10, 1700.0, 0.7, 6);
        let b = player(45, 1500.0, 0.4, 1);
        let h2h = HeadToHead {
            n_matches: 5,
            n_effective: 4.0,
            a_win_rate: 0.8,
        };
        let signals = SignalBreakdown {
            prior: 0.41,
            rating: 0.86,
            form: 0.33,
            opponent_strength: -0.14,
            h2h: 0.3,
            fatigue: -0.2,
        };
        for d in drivers(&ctx(&a, &b, &h2h, signals)) {
            assert!(!d.feature.is_empty());
            assert!(!d.impact.is_empty());
            assert!(d.note.len() > 10, "terse note: {}", d.note);
        }
    }

    #[test]
    fn impact_labels_follow_thresholds() {
        assert_eq!(impact_label(0.9), "+ strong");
        assert_eq!(impact_label(-0.5), "- moderate");
        assert_eq!(impact_label(0.2), "+ mild");
        assert_eq!(impact_label(0.05), "neutral");
        assert_eq!(impact_label(-0.05), "neutral");
    }

    #[test]
    fn h2h_note_names_the_leader() {
        let a = player(10, 1600.0, 0.5, 2);
        let b = player(12, 1600.0, 0.5, 2);
        let h2h = HeadToHead {
            n_matches: 6,
            n_effective: 5.0,
            a_win_rate: 0.2,
        };
        let signals = SignalBreakdown {
            prior: 0.0,
            rating: 0.0,
            form: 0.0,
            opponent_strength: 0.0,
            h2h: -0.4,
            fatigue: 0.0,
        };
        let out = drivers(&ctx(&a, &b, &h2h, signals));
        let h2h_driver = out.iter().find(|d| d.feature == "Head-to-head").unwrap();
        assert!(h2h_driver.note.contains("Player B leads"));
        assert_eq!(h2h_driver.impact, "- moderate");
    }
}
