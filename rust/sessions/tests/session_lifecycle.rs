use holdem_engine::errors::GameError;
use holdem_engine::logger::{HandRecord, Street};
use holdem_engine::rules::LegalAction;
use holdem_engine::seat::{Role, SeatSpec, SeatStatus};
use holdem_sessions::config::RegistryConfig;
use holdem_sessions::errors::IntoErrorResponse;
use holdem_sessions::logging::TestLogSubscriber;
use holdem_sessions::protocol::{ActionRequest, CreateRequest};
use holdem_sessions::{SessionError, SessionRegistry};
use tracing::Level;

fn registry() -> SessionRegistry {
    SessionRegistry::new(RegistryConfig::default()).unwrap()
}

fn heads_up() -> CreateRequest {
    CreateRequest::new(vec![SeatSpec::new("alice", 100), SeatSpec::new("bob", 100)]).with_seed(11)
}

fn act(reg: &SessionRegistry, seat: &str, action: &str, amount: u32) -> Result<(), SessionError> {
    reg.submit("g", &ActionRequest::new(seat, action, amount))
        .map(|_| ())
}

#[test]
fn created_session_deals_private_cards_and_posts_blinds() {
    let reg = registry();
    let created = reg.create("g", heads_up()).unwrap();

    assert_eq!(created.game_id, "g");
    assert_eq!(created.seats.len(), 2);
    assert_eq!(created.seats[0].role, Role::ButtonSmallBlind);
    assert_eq!(created.seats[1].role, Role::BigBlind);
    assert_ne!(created.seats[0].hole_cards, created.seats[1].hole_cards);

    let table = &created.table;
    assert_eq!(table.street, Street::Preflop);
    assert_eq!(table.seat_to_act.as_deref(), Some("alice"));
    let pots: Vec<u32> = table.pot_per_seat.iter().map(|p| p.amount).collect();
    assert_eq!(pots, vec![1, 2]);
    assert_eq!(
        table.legal_actions,
        vec![
            LegalAction::Fold,
            LegalAction::CheckOrCall { amount: 1 },
            LegalAction::Raise { min: 3, max: 100 },
        ]
    );
    // the public view never carries hole cards before showdown
    assert!(table.seats.iter().all(|s| s.hole_cards.is_none()));
}

#[test]
fn state_is_read_only() {
    let reg = registry();
    reg.create("g", heads_up()).unwrap();
    let a = reg.state("g").unwrap();
    let b = reg.state("g").unwrap();
    assert_eq!(a, b);
    assert!(!a.street_advanced);
}

#[test]
fn unknown_game_is_not_found_everywhere() {
    let reg = registry();
    assert!(matches!(reg.state("nope"), Err(SessionError::NotFound(_))));
    assert!(matches!(
        reg.submit("nope", &ActionRequest::new("a", "fold", 0)),
        Err(SessionError::NotFound(_))
    ));
    assert!(matches!(reg.end("nope"), Err(SessionError::NotFound(_))));
}

#[test]
fn bad_action_names_are_rejected_without_change() {
    let reg = registry();
    reg.create("g", heads_up()).unwrap();
    let before = reg.state("g").unwrap();
    let err = act(&reg, "alice", "allin", 0).unwrap_err();
    assert!(matches!(err, SessionError::Game(GameError::UnknownAction(_))));
    assert_eq!(err.to_error_response().error, "unknown_action");
    assert_eq!(reg.state("g").unwrap(), before);
}

#[test]
fn hand_plays_to_showdown_through_requests() {
    let reg = registry();
    reg.create("g", heads_up()).unwrap();
    act(&reg, "alice", "call", 0).unwrap();
    let flop = reg
        .submit("g", &ActionRequest::new("bob", "check", 0))
        .unwrap();
    assert!(flop.street_advanced);
    assert_eq!(flop.community_cards.len(), 3);
    assert_eq!(flop.seat_to_act.as_deref(), Some("bob"));

    act(&reg, "bob", "raise", 6).unwrap();
    act(&reg, "alice", "call", 0).unwrap();
    for _ in 0..2 {
        act(&reg, "bob", "check", 0).unwrap();
        act(&reg, "alice", "check", 0).unwrap();
    }

    let end = reg.state("g").unwrap();
    assert_eq!(end.street, Street::Finished);
    assert_eq!(end.total_pot, 12);
    assert!(end.seat_to_act.is_none());
    assert!(end.legal_actions.is_empty());
    assert!(end.seats.iter().all(|s| s.hole_cards.is_some()));
    let showdown = end.showdown.expect("showdown");
    assert!(!showdown.uncontested);
    assert_eq!(showdown.winners.iter().map(|w| w.amount).sum::<u32>(), 12);

    let err = act(&reg, "alice", "check", 0).unwrap_err();
    assert_eq!(
        err.to_error_response().error,
        "invalid_street",
        "settled hands take no actions"
    );
}

#[test]
fn fold_through_hides_every_hole_card() {
    let reg = registry();
    let three = CreateRequest::new(vec![
        SeatSpec::new("a", 50),
        SeatSpec::new("b", 50),
        SeatSpec::new("c", 50),
    ])
    .with_seed(4);
    reg.create("g", three).unwrap();
    act(&reg, "a", "fold", 0).unwrap();
    let view = reg.submit("g", &ActionRequest::new("b", "fold", 0)).unwrap();

    assert_eq!(view.street, Street::Showdown);
    assert!(view.street_advanced);
    assert_eq!(view.seats[0].status, SeatStatus::Folded);
    assert!(view.seats.iter().all(|s| s.hole_cards.is_none()));
    let showdown = view.showdown.unwrap();
    assert!(showdown.uncontested);
    assert_eq!(showdown.winners.len(), 1);
    assert_eq!(showdown.winners[0].seat_id, "c");
    assert_eq!(showdown.winners[0].amount, 3);
    assert!(showdown.winners[0].cards.is_none());
}

#[test]
fn lifecycle_is_logged() {
    let logs = TestLogSubscriber::new();
    logs.capture(|| {
        let reg = registry();
        reg.create("g", heads_up()).unwrap();
        let _ = act(&reg, "bob", "check", 0);
        act(&reg, "alice", "fold", 0).unwrap();
        reg.end("g").unwrap();
    });

    let entries = logs.entries();
    let find = |msg: &str| {
        entries
            .iter()
            .find(|e| e.message.contains(msg))
            .unwrap_or_else(|| panic!("missing log: {msg}"))
    };
    let created = find("creating new game session");
    assert_eq!(created.level, Level::INFO);
    assert!(created.field("game_id").unwrap().contains('g'));
    assert_eq!(find("rejected action").level, Level::WARN);
    assert_eq!(find("applied action").level, Level::DEBUG);
    assert_eq!(find("hand settled").level, Level::INFO);
    assert_eq!(find("session ended").level, Level::INFO);
}

#[test]
fn settled_hands_are_appended_to_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history").join("hands.jsonl");
    let reg = SessionRegistry::new(RegistryConfig {
        history_path: Some(path.clone()),
        ..RegistryConfig::default()
    })
    .unwrap();

    let created = reg.create("g", heads_up()).unwrap();
    act(&reg, "alice", "fold", 0).unwrap();
    reg.end("g").unwrap();

    // a hand ended before settling leaves no trace
    reg.create("g", heads_up()).unwrap();
    reg.end("g").unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let records: Vec<HandRecord> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].hand_id, created.hand_id);
    assert_eq!(records[0].seed, 11);
    assert_eq!(records[0].street, Street::Showdown);
    assert!(records[0].ts.is_some());
    assert_eq!(records[0].showdown.as_ref().unwrap().award_for("bob"), 3);
}

#[test]
fn configured_seed_makes_deals_repeatable() {
    let config = RegistryConfig {
        seed: Some(99),
        ..RegistryConfig::default()
    };
    let seats = || vec![SeatSpec::new("x", 10), SeatSpec::new("y", 10)];
    let a = SessionRegistry::new(config.clone())
        .unwrap()
        .create("g", CreateRequest::new(seats()))
        .unwrap();
    let b = SessionRegistry::new(config)
        .unwrap()
        .create("g", CreateRequest::new(seats()))
        .unwrap();
    assert_eq!(a.seats, b.seats);
    assert_ne!(a.hand_id, b.hand_id);
}

#[cfg(target_os = "linux")]
#[test]
fn history_failure_does_not_undo_the_settling_action() {
    let reg = SessionRegistry::new(RegistryConfig {
        history_path: Some("/dev/full".into()),
        ..RegistryConfig::default()
    })
    .unwrap();
    reg.create("g", heads_up()).unwrap();

    let view = reg
        .submit("g", &ActionRequest::new("alice", "fold", 0))
        .expect("the fold is accepted even though history cannot be written");
    assert_eq!(view.street, Street::Showdown);
    assert!(view.history_error.is_some());

    let state = reg.state("g").unwrap();
    assert_eq!(state.seats[0].status, SeatStatus::Folded);
    assert!(state.history_error.is_none());
}

#[cfg(target_os = "linux")]
#[test]
fn hand_settled_by_blinds_is_registered_when_history_fails() {
    let reg = SessionRegistry::new(RegistryConfig {
        history_path: Some("/dev/full".into()),
        ..RegistryConfig::default()
    })
    .unwrap();
    let req = CreateRequest::new(vec![SeatSpec::new("a", 1), SeatSpec::new("b", 2)]);
    let created = reg.create("g", req).unwrap();
    assert_eq!(created.table.street, Street::Finished);
    assert!(created.table.history_error.is_some());
    assert_eq!(reg.active_sessions().unwrap(), vec!["g".to_string()]);
}

#[test]
fn rejected_duplicate_leaves_history_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hands.jsonl");
    let reg = SessionRegistry::new(RegistryConfig {
        history_path: Some(path.clone()),
        ..RegistryConfig::default()
    })
    .unwrap();
    let all_in = || CreateRequest::new(vec![SeatSpec::new("a", 1), SeatSpec::new("b", 2)]);

    let first = reg.create("g", all_in()).unwrap();
    assert!(first.table.history_error.is_none());
    assert!(matches!(
        reg.create("g", all_in()),
        Err(SessionError::AlreadyExists(_))
    ));

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 1);
    let record: HandRecord = serde_json::from_str(content.trim_end()).unwrap();
    assert_eq!(record.hand_id, first.hand_id);
}
