use courtcast::{Fatigue, HeadToHead, ModelConfig, PlayerFeatures, RecentForm, predict_match};
use serde_json::Value;

fn player(rank: u32, rating: f64) -> PlayerFeatures {
    PlayerFeatures {
        rank,
        points: 1500,
        rating,
        form: RecentForm {
            win_rate: 0.55,
            game_diff: 0.3,
            n_matches: 12,
        },
        opponent_strength: 1520.0,
        fatigue: Fatigue::default(),
        top20_record: None,
    }
}

fn predict_json(seed: Option<u64>) -> Value {
    let cfg = ModelConfig::default();
    let a = player(9, 1680.0);
    let b = player(34, 1560.0);
    let out = predict_match(&cfg, &a, &b, &HeadToHead::empty(), seed).unwrap();
    serde_json::to_value(&out).unwrap()
}

#[test]
fn serialized_result_carries_every_field() {
    let v = predict_json(Some(42));
    let obj = v.as_object().unwrap();
    for key in ["winner", "proba", "ci95", "drivers", "warnings"] {
        assert!(obj.contains_key(key), "missing {key}: {v}");
    }

    assert!(matches!(v["winner"].as_str(), Some("A") | Some("B")));
    for side in ["A", "B"] {
        assert!(v["proba"][side].is_number(), "proba.{side} missing");
        let ci = v["ci95"][side].as_array().unwrap();
        assert_eq!(ci.len(), 2);
        assert!(ci[0].as_f64().unwrap() <= ci[1].as_f64().unwrap());
    }

    // Lists are present even when empty.
    assert!(v["drivers"].is_array());
    assert!(v["warnings"].is_array());
    for d in v["drivers"].as_array().unwrap() {
        for key in ["feature", "impact", "note"] {
            assert!(d[key].is_string(), "driver missing {key}: {d}");
        }
    }
}

#[test]
fn probabilities_round_to_three_decimals() {
    let v = predict_json(Some(42));
    for side in ["A", "B"] {
        let p = v["proba"][side].as_f64().unwrap();
        assert!(
            ((p * 1000.0).round() / 1000.0 - p).abs() < 1e-12,
            "proba.{side} = {p} is not 3-decimal"
        );
        assert!((0.0..=1.0).contains(&p));
    }
}

#[test]
fn seeded_results_are_byte_identical() {
    let x = serde_json::to_string(&predict_json(Some(1234))).unwrap();
    let y = serde_json::to_string(&predict_json(Some(1234))).unwrap();
    assert_eq!(x, y);
}

#[test]
fn different_seeds_keep_the_point_estimate() {
    let x = predict_json(Some(1));
    let y = predict_json(Some(2));
    assert_eq!(x["proba"], y["proba"]);
    assert_eq!(x["winner"], y["winner"]);
}

#[test]
fn driver_count_is_bounded() {
    let v = predict_json(Some(42));
    let n = v["drivers"].as_array().unwrap().len();
    assert!((3..=5).contains(&n), "got {n} drivers");
}
