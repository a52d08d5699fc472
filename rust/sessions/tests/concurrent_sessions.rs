/// Thread-safety of the registry: independent sessions in parallel, and
/// serialized mutation within one session.
use holdem_engine::logger::Street;
use holdem_engine::rules::Action;
use holdem_engine::seat::SeatSpec;
use holdem_sessions::config::RegistryConfig;
use holdem_sessions::protocol::CreateRequest;
use holdem_sessions::{SessionError, SessionRegistry};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

fn three_seats(seed: u64) -> CreateRequest {
    CreateRequest::new(vec![
        SeatSpec::new("s0", 100),
        SeatSpec::new("s1", 100),
        SeatSpec::new("s2", 100),
    ])
    .with_seed(seed)
}

#[test]
fn test_concurrent_session_creation() {
    let registry = Arc::new(SessionRegistry::new(RegistryConfig::default()).unwrap());
    let handles: Vec<_> = (0..16)
        .map(|i| {
            let reg = Arc::clone(&registry);
            thread::spawn(move || {
                reg.create(&format!("game-{i}"), three_seats(1000 + i))
                    .expect("create session")
                    .hand_id
            })
        })
        .collect();

    let hand_ids: HashSet<String> = handles
        .into_iter()
        .map(|h| h.join().expect("thread completed"))
        .collect();
    assert_eq!(hand_ids.len(), 16, "hand ids must be unique");
    assert_eq!(registry.active_sessions().unwrap().len(), 16);
}

#[test]
fn test_racing_creates_with_same_id_admit_one() {
    let registry = Arc::new(SessionRegistry::new(RegistryConfig::default()).unwrap());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let reg = Arc::clone(&registry);
            thread::spawn(move || reg.create("shared", three_seats(i)))
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let ok = results.iter().filter(|r| r.is_ok()).count();
    let dup = results
        .iter()
        .filter(|r| matches!(r, Err(SessionError::AlreadyExists(_))))
        .count();
    assert_eq!(ok, 1);
    assert_eq!(dup, 7);
    assert_eq!(registry.active_sessions().unwrap(), vec!["shared".to_string()]);
}

#[test]
fn test_concurrent_actions_different_sessions() {
    let registry = Arc::new(SessionRegistry::new(RegistryConfig::default()).unwrap());
    let ids: Vec<String> = (0..6).map(|i| format!("table-{i}")).collect();
    for (i, id) in ids.iter().enumerate() {
        registry.create(id, three_seats(2000 + i as u64)).unwrap();
    }

    let handles: Vec<_> = ids
        .iter()
        .cloned()
        .map(|id| {
            let reg = Arc::clone(&registry);
            thread::spawn(move || {
                // call or check through every street
                loop {
                    let view = reg.state(&id).unwrap();
                    let Some(seat) = view.seat_to_act.clone() else {
                        return view;
                    };
                    reg.apply_action(&id, &seat, Action::Call).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        let view = handle.join().unwrap();
        assert_eq!(view.street, Street::Finished);
        assert_eq!(view.community_cards.len(), 5);
        assert_eq!(view.total_pot, 6);
        let paid: u32 = view
            .showdown
            .expect("settled")
            .winners
            .iter()
            .map(|w| w.amount)
            .sum();
        assert_eq!(paid, 6);
    }
}

#[test]
fn test_same_session_actions_are_serialized() {
    let registry = Arc::new(SessionRegistry::new(RegistryConfig::default()).unwrap());
    registry.create("one", three_seats(7)).unwrap();

    // every thread tries to act for the button; exactly one can succeed
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let reg = Arc::clone(&registry);
            thread::spawn(move || reg.apply_action("one", "s0", Action::Call))
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| e.to_string().contains("turn")));

    let view = registry.state("one").unwrap();
    assert_eq!(view.total_pot, 5);
    assert_eq!(view.seat_to_act.as_deref(), Some("s1"));
}

#[test]
fn test_end_while_other_sessions_play() {
    let registry = Arc::new(SessionRegistry::new(RegistryConfig::default()).unwrap());
    registry.create("keep", three_seats(1)).unwrap();
    registry.create("drop", three_seats(2)).unwrap();

    let reg = Arc::clone(&registry);
    let ender = thread::spawn(move || reg.end("drop"));
    registry.apply_action("keep", "s0", Action::Call).unwrap();
    ender.join().unwrap().unwrap();

    assert_eq!(registry.active_sessions().unwrap(), vec!["keep".to_string()]);
    assert!(matches!(
        registry.apply_action("drop", "s0", Action::Call),
        Err(SessionError::NotFound(_))
    ));
}
