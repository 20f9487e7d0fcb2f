mod common;

use std::time::Duration;

use common::{entry, replay_fixture, user_action, Call};
use kroviz_core::event::{EventState, Represention};
use kroviz_core::replay::{calculate_delay, filter_replay_events, ReplayStep};

const HOME: &str = "http://localhost:8080/restful/";

#[tokio::test(start_paused = true)]
async fn replays_recorded_session_with_original_pacing() {
    let log = vec![
        entry(HOME, Some(Represention::Homepage), EventState::Success, 0),
        entry("http://localhost:8080/restful/menuBars", Some(Represention::Menubars), EventState::Success, 40),
        user_action("http://localhost:8080/restful/objects/demo.SimpleObject/1", "Foo", 1_200),
        entry(
            "http://localhost:8080/restful/objects/demo.SimpleObject/1/actions/updateName",
            Some(Represention::ObjectAction),
            EventState::Success,
            1_900,
        ),
        user_action("http://localhost:8080/restful/objects/demo.SimpleObject/2", "Bar", 2_600),
    ];
    let (cmd, _store, proxy, _shell, _session) = replay_fixture(log);

    let handle = cmd.execute();
    let summary = handle.join().await;
    assert_eq!(summary.fetched, 2);
    assert_eq!(summary.loaded, 2);
    assert_eq!(summary.failed, 0);

    let calls = proxy.calls();
    let fetched: Vec<&str> = calls
        .iter()
        .filter_map(|(c, at)| match c {
            Call::Fetch { href, .. } => {
                assert_eq!(*at, Duration::ZERO);
                Some(href.as_str())
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        fetched,
        vec![
            HOME,
            "http://localhost:8080/restful/objects/demo.SimpleObject/1/actions/updateName",
        ]
    );

    // Foo follows the homepage (1200ms after it), Bar follows the action (700ms).
    let loads: Vec<(String, Duration)> = calls
        .iter()
        .filter_map(|(c, at)| match c {
            Call::Load { title, .. } => Some((title.clone(), *at)),
            _ => None,
        })
        .collect();
    assert_eq!(loads.len(), 2);
    assert_eq!(loads[0].0, "Bar");
    assert!(loads[0].1 >= Duration::from_millis(700) && loads[0].1 < Duration::from_millis(710));
    assert_eq!(loads[1].0, "Foo");
    assert!(loads[1].1 >= Duration::from_millis(1_200) && loads[1].1 < Duration::from_millis(1_210));
}

#[tokio::test]
async fn store_is_empty_before_ui_activity_and_refills_after() {
    let log = vec![entry(HOME, Some(Represention::Homepage), EventState::Success, 0)];
    let (cmd, store, _proxy, shell, session) = replay_fixture(log);
    let id = session.id();

    let handle = cmd.execute();
    // Only the rebuild's own homepage request is in the live log.
    let live = store.log();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].state, EventState::Running);

    handle.join().await;
    assert_eq!(shell.sessions_seen.lock().unwrap().clone(), vec![id]);
    assert_eq!(session.generation(), 1);
}

#[tokio::test]
async fn empty_log_issues_no_calls() {
    let (cmd, store, proxy, _shell, _session) = replay_fixture(Vec::new());
    let handle = cmd.execute();
    assert!(handle.scheduled().is_empty());
    handle.join().await;
    assert!(proxy.calls().is_empty());
    assert_eq!(store.len(), 1);
}

#[test]
fn scheduled_delays_match_timestamp_differences() {
    let log = vec![
        entry(HOME, Some(Represention::Homepage), EventState::Success, 100),
        user_action("http://localhost:8080/restful/objects/demo.SimpleObject/1", "Foo", 350),
        user_action("http://localhost:8080/restful/objects/demo.SimpleObject/2", "Bar", 975),
    ];
    let filtered = filter_replay_events(log.clone());
    assert_eq!(filtered.len(), 3);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let steps = rt.block_on(async {
        let (cmd, _store, _proxy, _shell, _session) = replay_fixture(log.clone());
        let handle = cmd.execute();
        let steps = handle.scheduled().to_vec();
        handle.cancel();
        steps
    });

    for (i, step) in steps.iter().enumerate().skip(1) {
        match step {
            ReplayStep::Load { delay_ms, .. } => {
                assert_eq!(*delay_ms as i64, calculate_delay(&filtered[i - 1], &filtered[i]));
            }
            other => panic!("expected load, got {other:?}"),
        }
    }
}
