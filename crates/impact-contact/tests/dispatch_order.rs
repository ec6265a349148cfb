//! Cross-pair ordering, pooling, and frame classification.

use std::collections::HashSet;

use impact_contact::{ColliderDesc, ContactConfig, ContactWorld};
use impact_core::{ColliderId, ContactManifold};
use impact_test_utils::fixtures::touching;
use impact_test_utils::{EventKind, EventLog, RecordingListener};
use proptest::prelude::*;

fn world_with(n: usize, log: &EventLog) -> (ContactWorld, Vec<ColliderId>) {
    let mut w = ContactWorld::new(ContactConfig {
        record_capacity: 4,
        contact_capacity: 4,
        ..ContactConfig::default()
    })
    .unwrap();
    let ids: Vec<_> = (0..n)
        .map(|_| {
            let id = w.register(ColliderDesc::solid()).unwrap();
            w.add_listener(id, RecordingListener::boxed(log)).unwrap();
            id
        })
        .collect();
    (w, ids)
}

#[test]
fn exits_follow_every_enter_and_stay() {
    let log = EventLog::new();
    let (mut w, c) = world_with(4, &log);

    w.step(&[touching(c[0], c[1]), touching(c[2], c[3])]).unwrap();
    log.drain();

    // (0,1) exits, (2,3) stays, (0,2) enters.
    w.step(&[touching(c[2], c[3]), touching(c[0], c[2])]).unwrap();
    let kinds: Vec<_> = log.drain().into_iter().map(|e| e.kind).collect();
    assert_eq!(kinds.len(), 6);
    let first_exit = kinds
        .iter()
        .position(|k| *k == EventKind::CollisionExit)
        .unwrap();
    assert!(kinds[first_exit..]
        .iter()
        .all(|k| *k == EventKind::CollisionExit));
    assert_eq!(first_exit, 4);
}

#[test]
fn lower_collider_hears_first() {
    let log = EventLog::new();
    let (mut w, c) = world_with(2, &log);
    w.step(&[touching(c[1], c[0])]).unwrap();
    let events = log.drain();
    assert_eq!(events[0].this, c[0]);
    assert_eq!(events[1].this, c[1]);
}

#[test]
fn duplicate_manifolds_merge_into_one_record() {
    let log = EventLog::new();
    let (mut w, c) = world_with(2, &log);
    let metrics = w
        .step(&[touching(c[0], c[1]), touching(c[1], c[0])])
        .unwrap();
    assert_eq!(metrics.collision_enters, 1);
    assert_eq!(metrics.contacts_recorded, 2);
    let events = log.drain();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.contacts == 2));
}

#[test]
fn steady_state_stops_allocating_records() {
    let log = EventLog::new();
    let (mut w, c) = world_with(8, &log);

    // Cycle through disjoint pair sets; each frame exits the last set.
    let sets: Vec<Vec<ContactManifold>> = (0..4)
        .map(|k| {
            (0..4)
                .map(|i| touching(c[2 * i], c[(2 * i + 1 + 2 * k) % 8]))
                .collect()
        })
        .collect();
    for frame in 0..8 {
        w.step(&sets[frame % 4]).unwrap();
    }
    let capacity = w.registry().capacity();
    let contacts = w.contacts().capacity();
    for frame in 0..200 {
        w.step(&sets[frame % 4]).unwrap();
        assert_eq!(w.registry().capacity(), capacity);
        assert_eq!(w.contacts().capacity(), contacts);
    }
    assert_eq!(w.registry().live(), 4);
}

/// Expected classification for one pair given whether it was touched in
/// the previous and current frame.
fn expected(prev: bool, now: bool) -> Option<EventKind> {
    match (prev, now) {
        (false, true) => Some(EventKind::CollisionEnter),
        (true, true) => Some(EventKind::CollisionStay),
        (true, false) => Some(EventKind::CollisionExit),
        (false, false) => None,
    }
}

proptest! {
    #[test]
    fn classification_matches_touch_history(
        frames in proptest::collection::vec(proptest::collection::vec(any::<bool>(), 3), 1..40),
    ) {
        let log = EventLog::new();
        let (mut w, c) = world_with(4, &log);
        let pairs = [(c[0], c[1]), (c[1], c[2]), (c[2], c[3])];
        let mut prev = [false; 3];

        for touched in frames {
            let manifolds: Vec<_> = pairs
                .iter()
                .zip(&touched)
                .filter(|(_, t)| **t)
                .map(|((a, b), _)| touching(*a, *b))
                .collect();
            let metrics = w.step(&manifolds).unwrap();

            let events = log.drain();
            for (i, (a, b)) in pairs.iter().enumerate() {
                let got: HashSet<_> = events
                    .iter()
                    .filter(|e| (e.this, e.other) == (*a, *b) || (e.this, e.other) == (*b, *a))
                    .map(|e| e.kind)
                    .collect();
                let want: HashSet<_> = expected(prev[i], touched[i]).into_iter().collect();
                prop_assert_eq!(got, want);
            }

            let live = touched.iter().filter(|t| **t).count();
            prop_assert_eq!(w.registry().live(), live);
            prop_assert_eq!(metrics.live_records, live);
            prev.copy_from_slice(&touched);
        }
    }
}
