use super::*;

#[test]
fn attaches_only_once_per_source() {
    let graph = ProbeBus::new();
    let mut tap = SignalTap::new(32);

    assert_eq!(tap.attach(&graph, ReadyState::HaveEnoughData), TapStatus::Attached);
    assert_eq!(tap.attach(&graph, ReadyState::HaveEnoughData), TapStatus::AlreadyAttached);
    assert_eq!(graph.open_contexts(), 1);
}

#[test]
fn defers_until_source_is_ready() {
    let graph = ProbeBus::new();
    let mut tap = SignalTap::new(32);

    assert_eq!(tap.attach(&graph, ReadyState::HaveMetadata), TapStatus::Deferred);
    assert!(!tap.is_attached());
    assert!(tap.sample().is_none());
    assert_eq!(graph.open_contexts(), 0);

    assert!(tap.notify_ready(&graph));
    assert!(tap.is_attached());
    assert!(!tap.notify_ready(&graph));
    assert_eq!(graph.open_contexts(), 1);
}

#[test]
fn ready_notice_from_another_graph_is_ignored() {
    let graph = ProbeBus::new();
    let other = ProbeBus::new();
    let mut tap = SignalTap::new(32);

    tap.attach(&graph, ReadyState::HaveNothing);
    assert!(!tap.notify_ready(&other));
    assert!(!tap.is_attached());
}

#[test]
fn samples_are_fixed_width_and_centred() {
    let graph = ProbeBus::new();
    let mut tap = SignalTap::new(64);
    tap.attach(&graph, ReadyState::HaveCurrentData);

    let frame = tap.sample().cloned();
    assert_eq!(frame, Some(SignalFrame::silent(64)));

    graph.feed(&[1.0, -1.0]);
    let frame = tap.sample().cloned().unwrap();
    assert_eq!(frame.len(), 64);
    assert_eq!(frame.get(62), Some(255));
    assert_eq!(frame.get(63), Some(0));
    assert_eq!(frame.get(0), Some(SILENCE));
}

#[test]
fn detach_releases_context_once_and_allows_reattach() {
    let graph = ProbeBus::new();
    let mut tap = SignalTap::new(32);
    tap.attach(&graph, ReadyState::HaveEnoughData);

    assert!(tap.detach());
    assert!(!tap.detach());
    assert_eq!(graph.open_contexts(), 0);
    assert!(tap.sample().is_none());

    assert_eq!(tap.attach(&graph, ReadyState::HaveEnoughData), TapStatus::Attached);
    assert_eq!(graph.open_contexts(), 1);
}

#[test]
fn detach_cancels_deferred_attachment() {
    let graph = ProbeBus::new();
    let mut tap = SignalTap::new(32);
    tap.attach(&graph, ReadyState::HaveNothing);

    tap.detach();
    assert!(!tap.notify_ready(&graph));
    assert_eq!(graph.open_contexts(), 0);
}

#[test]
fn dropping_tap_closes_context() {
    let graph = ProbeBus::new();
    {
        let mut tap = SignalTap::new(32);
        tap.attach(&graph, ReadyState::HaveEnoughData);
        assert_eq!(graph.open_contexts(), 1);
    }
    assert_eq!(graph.open_contexts(), 0);
}
