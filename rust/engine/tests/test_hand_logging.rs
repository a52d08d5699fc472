use std::fs;
use std::sync::Arc;

use holdem_engine::game::{Game, HandConfig};
use holdem_engine::logger::{HandLogger, HandRecord, Street};
use holdem_engine::ranking::StandardRanker;
use holdem_engine::rules::Action;
use holdem_engine::seat::SeatSpec;

fn folded_hand() -> HandRecord {
    let specs = vec![SeatSpec::new("p0", 50), SeatSpec::new("p1", 50)];
    let mut g = Game::create(specs, HandConfig::new(1).with_seed(77), Arc::new(StandardRanker))
        .expect("create");
    g.apply_action("p0", Action::Raise(6)).unwrap();
    g.apply_action("p1", Action::Fold).unwrap();
    g.hand_record("20250102-000001")
}

#[test]
fn writes_jsonl_with_lf_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hands.jsonl");
    let mut logger = HandLogger::create(&path).expect("create logger");
    logger.write(&folded_hand()).expect("write");
    logger.write(&folded_hand()).expect("write");

    let bytes = fs::read(&path).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(text.lines().count(), 2);
}

#[test]
fn ts_is_generated_when_missing_and_preserved_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("hands.jsonl");
    let mut logger = HandLogger::create(&path).expect("create logger with parent dirs");

    let rec = folded_hand();
    assert!(rec.ts.is_none());
    logger.write(&rec).expect("write");

    let preset = "2030-01-01T00:00:00Z".to_string();
    let rec2 = HandRecord {
        ts: Some(preset.clone()),
        ..rec
    };
    logger.write(&rec2).expect("write2");

    let content = fs::read_to_string(&path).unwrap();
    let parsed: Vec<HandRecord> = content
        .lines()
        .map(|l| serde_json::from_str(l).expect("valid record"))
        .collect();
    assert!(parsed[0].ts.is_some(), "ts should be injected");
    assert_eq!(parsed[1].ts.as_deref(), Some(preset.as_str()));
}

#[test]
fn record_round_trips_the_hand() {
    let rec = folded_hand();
    assert_eq!(rec.seed, 77);
    assert_eq!(rec.street, Street::Showdown);
    assert_eq!(rec.actions.len(), 2);
    assert_eq!(rec.actions[0].chips, 5);

    let json = serde_json::to_string(&rec).unwrap();
    assert!(json.contains("\"street\":\"showdown\""));
    let back: HandRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, rec);
}

#[test]
fn appends_to_an_existing_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hands.jsonl");
    {
        let mut logger = HandLogger::create(&path).unwrap();
        logger.write(&folded_hand()).unwrap();
    }
    let mut logger = HandLogger::create(&path).unwrap();
    logger.write(&folded_hand()).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);
}
