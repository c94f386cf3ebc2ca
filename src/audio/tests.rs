use super::*;
use rodio::Source;
use rodio::buffer::SamplesBuffer;

#[test]
fn ready_state_playable_from_current_data() {
    assert!(!ReadyState::HaveNothing.is_playable());
    assert!(!ReadyState::HaveMetadata.is_playable());
    assert!(ReadyState::HaveCurrentData.is_playable());
    assert!(ReadyState::HaveEnoughData.is_playable());
}

#[test]
fn hub_delivers_in_emission_order() {
    let mut hub = EventHub::new();
    let sub = hub.subscribe();
    hub.emit(SourceEvent::MetadataReady(Some(3.0)));
    hub.emit(SourceEvent::Started);
    hub.emit(SourceEvent::TimeUpdate(0.5));

    assert_eq!(
        sub.drain(),
        vec![
            SourceEvent::MetadataReady(Some(3.0)),
            SourceEvent::Started,
            SourceEvent::TimeUpdate(0.5),
        ]
    );
    assert!(sub.drain().is_empty());
}

#[test]
fn dropping_subscription_disposes_registration() {
    let mut hub = EventHub::new();
    let a = hub.subscribe();
    let b = hub.subscribe();
    assert_eq!(hub.subscriber_count(), 2);

    drop(a);
    assert_eq!(hub.subscriber_count(), 1);

    hub.emit(SourceEvent::Paused);
    assert_eq!(b.drain(), vec![SourceEvent::Paused]);
}

#[test]
fn sample_to_byte_centres_silence() {
    assert_eq!(sample_to_byte(0.0), 128);
    assert_eq!(sample_to_byte(-1.0), 0);
    assert_eq!(sample_to_byte(1.0), 255);
    assert_eq!(sample_to_byte(4.0), 255);
}

#[test]
fn analyser_pads_with_silence_and_keeps_latest_samples() {
    let bus = ProbeBus::new();
    let node = bus.connect(4);

    let mut out = [0u8; 4];
    node.byte_time_domain_data(&mut out);
    assert_eq!(out, [128; 4]);

    bus.feed(&[0.5]);
    node.byte_time_domain_data(&mut out);
    assert_eq!(out, [128, 128, 128, 192]);

    bus.feed(&[-1.0, -1.0, -1.0, -1.0, 0.0]);
    node.byte_time_domain_data(&mut out);
    assert_eq!(out, [0, 0, 0, 128]);
}

#[test]
fn closing_analyser_releases_context_once() {
    let bus = ProbeBus::new();
    let mut node = bus.connect(8);
    let other = bus.connect(8);
    assert_eq!(bus.open_contexts(), 2);

    node.close();
    node.close();
    assert_eq!(bus.open_contexts(), 1);

    drop(other);
    assert_eq!(bus.open_contexts(), 0);
}

#[test]
fn graphs_have_distinct_ids() {
    let a = ProbeBus::new();
    let b = ProbeBus::new();
    assert_ne!(a.id(), b.id());
    assert_eq!(a.clone().id(), a.id());
}

#[test]
fn probe_passes_audio_through_and_feeds_mono_mix() {
    let bus = ProbeBus::new();
    let node = bus.connect(2);

    let stereo = vec![0.5f32, -0.5, 1.0, 0.0];
    let probe = Probe::new(SamplesBuffer::new(2, 44_100, stereo.clone()), bus.clone());
    assert_eq!(probe.channels(), 2);
    assert_eq!(probe.sample_rate(), 44_100);

    let played: Vec<f32> = probe.collect();
    assert_eq!(played, stereo);

    // frames averaged: (0.5 + -0.5) / 2 = 0.0, (1.0 + 0.0) / 2 = 0.5
    let mut out = [0u8; 2];
    node.byte_time_domain_data(&mut out);
    assert_eq!(out, [128, 192]);
}
