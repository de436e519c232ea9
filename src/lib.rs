//! courtcast: ranking-aware win-probability engine for two-player
//! matches.
//!
//! Pure computation — no IO, no persistence, no shared state. The
//! upstream data layer hands over fully-resolved feature vectors and a
//! head-to-head record; the engine returns a calibrated probability
//! pair with a 95% band, plain-language drivers, and warnings. A
//! rank-tier prior keeps the output away from an uninformative 50/50
//! whenever the players sit in different tiers, and empirical evidence
//! only modulates within that band.
//!
//! ```rust
//! use courtcast::{HeadToHead, ModelConfig, PlayerFeatures, predict_match};
//! use courtcast::{Fatigue, RecentForm};
//!
//! let cfg = ModelConfig::default();
//! let a = PlayerFeatures {
//!     rank: 3,
//!     points: 11_000,
//!     rating: 1820.0,
//!     form: RecentForm { win_rate: 0.75, game_diff: 1.4, n_matches: 20 },
//!     opponent_strength: 1705.0,
//!     fatigue: Fatigue::default(),
//!     top20_record: None,
//! };
//! let b = PlayerFeatures {
//!     rank: 41,
//!     points: 2_300,
//!     rating: 1590.0,
//!     form: RecentForm { win_rate: 0.55, game_diff: 0.2, n_matches: 14 },
//!     opponent_strength: 1540.0,
//!     fatigue: Fatigue::default(),
//!     top20_record: None,
//! };
//!
//! let result = predict_match(&cfg, &a, &b, &HeadToHead::empty(), Some(42)).unwrap();
//! assert!(result.proba.a > 0.5);
//! ```

pub mod blend;
pub mod config;
pub mod error;
pub mod evidence;
pub mod explain;
pub mod features;
pub mod guardrails;
pub mod h2h;
pub mod predict;
pub mod tiers;
pub mod uncertainty;

pub use config::ModelConfig;
pub use error::{PredictError, Result};
pub use explain::Driver;
pub use features::{Fatigue, HeadToHead, PlayerFeatures, RecentForm, TopOpponentRecord};
pub use predict::{CiPair, PredictionResult, ProbPair, Winner, predict_match};
pub use tiers::Tier;
