//! Title editor tests
//!
//! Edit/commit/cancel flow, persistence notification, per-dataset loading,
//! and the transient saved acknowledgment.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use xlplay::persist::{title_key, MemoryStore, Store};
use xlplay::player::{Player, SurfaceId};
use xlplay::playback::CountingScheduler;
use xlplay::title::{DEFAULT_TITLE, SAVED_ACK_MS};
use xlplay::types::Dataset;

mod common;
use common::make_dataset;

fn loaded_player() -> (Player<MemoryStore>, CountingScheduler) {
    let mut sched = CountingScheduler::new();
    let mut player = Player::new(MemoryStore::new());
    player.set_dataset(Some(make_dataset(3)), &mut sched);
    (player, sched)
}

#[test]
fn test_cancel_leaves_committed_unchanged() {
    let (mut player, _sched) = loaded_player();
    let before = player.title().committed().to_string();

    player.title_mut().begin_edit();
    player.title_mut().set_draft("half-typed thought");
    player.title_mut().cancel();

    assert_eq!(player.title().committed(), before);
    assert!(!player.title().is_editing());
    assert_eq!(player.store().writes, 0, "cancel never notifies persistence");
}

#[test]
fn test_save_commits_trimmed_draft_with_one_write() {
    let (mut player, _sched) = loaded_player();

    player.title_mut().begin_edit();
    player.title_mut().set_draft("  Q3 Revenue  ");
    player.save_title(1_000.0);

    assert_eq!(player.title().committed(), "Q3 Revenue");
    assert!(!player.title().is_editing());
    assert_eq!(player.store().writes, 1, "exactly one persistence set per save");
    assert_eq!(
        player.store().get(&title_key("test.xlsx")).as_deref(),
        Some("Q3 Revenue")
    );
}

#[test]
fn test_saved_ack_expires_after_two_seconds() {
    let (mut player, _sched) = loaded_player();
    player.title_mut().begin_edit();
    player.title_mut().set_draft("Title");
    player.save_title(10_000.0);

    assert!(player.title().saved_ack());
    player.title_mut().tick(10_000.0 + SAVED_ACK_MS - 1.0);
    assert!(player.title().saved_ack(), "ack still visible before expiry");
    player.title_mut().tick(10_000.0 + SAVED_ACK_MS);
    assert!(!player.title().saved_ack(), "ack auto-clears after 2s");
}

#[test]
fn test_dataset_switch_loads_persisted_title() {
    let (mut player, mut sched) = loaded_player();

    // Persist a title for a different source, then switch to it
    player
        .store_mut()
        .set(&title_key("other.xlsx"), "Saved Elsewhere")
        .unwrap();
    let other = Dataset {
        source_id: "other.xlsx".to_string(),
        ..make_dataset(2)
    };
    player.set_dataset(Some(other), &mut sched);

    assert_eq!(player.title().committed(), "Saved Elsewhere");
    assert!(!player.title().is_editing());
}

#[test]
fn test_dataset_switch_without_persisted_title_uses_default() {
    let (mut player, mut sched) = loaded_player();
    let fresh = Dataset {
        source_id: "fresh.xlsx".to_string(),
        ..make_dataset(2)
    };
    player.set_dataset(Some(fresh), &mut sched);
    assert_eq!(player.title().committed(), DEFAULT_TITLE);
}

#[test]
fn test_dataset_switch_abandons_edit_in_progress() {
    let (mut player, mut sched) = loaded_player();
    player.title_mut().begin_edit();
    player.title_mut().set_draft("about to be lost");

    player.set_dataset(Some(make_dataset(1)), &mut sched);
    assert!(!player.title().is_editing());
    assert_eq!(player.store().writes, 0);
}

#[test]
fn test_entering_playback_closes_title_edit() {
    let (mut player, mut sched) = loaded_player();
    player.set_viewport_height(SurfaceId::Preview, 200.0);
    player.title_mut().begin_edit();

    player.play(SurfaceId::Preview, &mut sched);
    assert!(!player.title().is_editing());
    assert_eq!(player.store().writes, 0, "abandoned edit is not persisted");
}

#[test]
fn test_save_without_edit_is_noop() {
    let (mut player, _sched) = loaded_player();
    player.save_title(0.0);
    assert_eq!(player.store().writes, 0);
    assert!(!player.title().saved_ack());
}
