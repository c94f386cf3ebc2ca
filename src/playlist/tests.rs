use super::*;
use crate::media::RawFile;

fn audio(name: &str) -> RawFile {
    RawFile {
        name: name.to_string(),
        mime: "audio/mpeg".to_string(),
        bytes: name.as_bytes().to_vec(),
    }
}

fn other(name: &str) -> RawFile {
    RawFile {
        name: name.to_string(),
        mime: "text/plain".to_string(),
        bytes: Vec::new(),
    }
}

fn names(p: &Playlist) -> Vec<&str> {
    p.tracks().iter().map(|t| t.name()).collect()
}

#[test]
fn replace_all_keeps_input_order_and_skips_non_audio() {
    let mut p = Playlist::new();
    let out = p.replace_all(vec![audio("b.mp3"), other("notes.txt"), audio("a.mp3")]);

    assert_eq!(names(&p), vec!["b.mp3", "a.mp3"]);
    assert_eq!(out.accepted, 2);
    assert_eq!(out.skipped, vec!["notes.txt".to_string()]);
    assert_eq!(out.revoked, 0);
    assert_eq!(p.registry().live_count(), 2);
}

#[test]
fn replace_all_revokes_every_previous_handle_once() {
    let mut p = Playlist::new();
    p.replace_all(vec![audio("a.mp3"), audio("b.mp3"), audio("c.mp3")]);
    let old: Vec<_> = p.tracks().iter().map(|t| t.handle()).collect();

    let out = p.replace_all(vec![audio("d.mp3")]);
    assert_eq!(out.revoked, 3);
    assert_eq!(p.registry().released_count(), 3);
    for h in old {
        assert!(!p.registry().is_live(h));
    }

    // every surviving descriptor still resolves
    for t in p.tracks() {
        assert!(p.open(t.handle()).is_ok());
    }
}

#[test]
fn replace_all_with_nothing_accepted_empties_the_playlist() {
    let mut p = Playlist::new();
    p.replace_all(vec![audio("a.mp3")]);
    let out = p.replace_all(vec![other("x.txt")]);
    assert!(p.is_empty());
    assert_eq!(out.revoked, 1);
    assert_eq!(p.registry().live_count(), 0);
}

#[test]
fn remove_at_releases_handle_and_shifts_active_back() {
    let mut p = Playlist::new();
    p.replace_all(vec![audio("a"), audio("b"), audio("c")]);
    let b = p.get(1).unwrap().handle();

    let removal = p.remove_at(1, Some(2)).unwrap();
    assert_eq!(removal.track.name(), "b");
    assert_eq!(removal.active, Some(1));
    assert!(!p.registry().is_live(b));
    assert_eq!(names(&p), vec!["a", "c"]);
}

#[test]
fn remove_at_out_of_range_changes_nothing() {
    let mut p = Playlist::new();
    p.replace_all(vec![audio("a")]);
    assert!(p.remove_at(3, Some(0)).is_none());
    assert_eq!(p.len(), 1);
    assert_eq!(p.registry().released_count(), 0);
}

#[test]
fn removing_only_track_resets_active() {
    let mut p = Playlist::new();
    p.replace_all(vec![audio("a")]);
    let removal = p.remove_at(0, Some(0)).unwrap();
    assert_eq!(removal.active, None);
    assert!(p.is_empty());
}

#[test]
fn active_after_removal_policy() {
    // before the active track: shift back by exactly one
    assert_eq!(active_after_removal(0, Some(2), 3), Some(1));
    // the active track itself (not first): shift back
    assert_eq!(active_after_removal(2, Some(2), 3), Some(1));
    // the first track while it is active: floor at the first position
    assert_eq!(active_after_removal(0, Some(0), 2), Some(0));
    // after the active track: unchanged
    assert_eq!(active_after_removal(1, Some(0), 1), Some(0));
    // nothing active stays nothing
    assert_eq!(active_after_removal(0, None, 2), None);
    // empty playlist: none
    assert_eq!(active_after_removal(0, Some(0), 0), None);
}

#[test]
fn removal_decrements_for_every_earlier_index() {
    for len in 2..6usize {
        for active in 1..len {
            for removed in 0..=active {
                assert_eq!(
                    active_after_removal(removed, Some(active), len - 1),
                    Some(active - 1),
                    "len={len} active={active} removed={removed}"
                );
            }
        }
    }
}
