//! Surface and settings-handoff tests
//!
//! Settings sanitization at the boundary, the panel-visibility policy, and
//! isolation between the preview and fullscreen surfaces.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic
)]

use xlplay::persist::MemoryStore;
use xlplay::player::{Player, SurfaceId};
use xlplay::playback::{CountingScheduler, PlaybackStatus};
use xlplay::surface::PlaybackSurface;
use xlplay::types::PlaybackSettings;

mod common;
use common::make_dataset;

fn loaded_player() -> (Player<MemoryStore>, CountingScheduler) {
    let mut sched = CountingScheduler::new();
    let mut player = Player::new(MemoryStore::new());
    player.set_dataset(Some(make_dataset(5)), &mut sched);
    player.set_viewport_height(SurfaceId::Preview, 200.0);
    (player, sched)
}

// =============================================================================
// SETTINGS BOUNDARY
// =============================================================================

#[test]
fn test_surface_sanitizes_settings_on_construction() {
    let surface = PlaybackSurface::new(PlaybackSettings {
        speed: -3.0,
        ..PlaybackSettings::default()
    });
    assert!(surface.settings().speed > 0.0, "engine never sees speed <= 0");
}

#[test]
fn test_update_settings_sanitizes() {
    let mut surface = PlaybackSurface::new(PlaybackSettings::default());
    surface.update_settings(&PlaybackSettings {
        speed: f32::NAN,
        background_color: "###".to_string(),
        ..PlaybackSettings::default()
    });
    assert_eq!(surface.settings().speed, PlaybackSettings::default().speed);
    assert_eq!(
        surface.settings().background_color,
        PlaybackSettings::default().background_color
    );
}

// =============================================================================
// PANEL VISIBILITY POLICY
// =============================================================================

#[test]
fn test_panel_hidden_while_playing() {
    let dataset = make_dataset(3);
    let mut sched = CountingScheduler::new();
    let mut surface = PlaybackSurface::new(PlaybackSettings::default());
    assert!(surface.panel_visible(), "panel starts visible when stopped");

    surface.play(&dataset, &mut sched);
    assert!(!surface.panel_visible(), "entering Playing forces panel hidden");

    // Explicit toggling is refused while playing
    surface.set_panel_visible(true);
    assert!(!surface.panel_visible());

    surface.pause(&mut sched);
    assert!(surface.panel_visible(), "leaving Playing forces panel visible");

    surface.play(&dataset, &mut sched);
    surface.reset(&mut sched);
    assert!(surface.panel_visible(), "reset also leaves Playing");
}

// =============================================================================
// FULLSCREEN HANDOFF
// =============================================================================

#[test]
fn test_enter_exit_fullscreen_leaves_preview_settings_intact() {
    let (mut player, mut sched) = loaded_player();
    let custom = PlaybackSettings {
        speed: 2.5,
        frame_color: "#22c55e".to_string(),
        ..PlaybackSettings::default()
    };
    player.update_settings(SurfaceId::Preview, &custom);
    let before = player.preview().settings().clone();

    player.enter_fullscreen(&mut sched);
    player.exit_fullscreen(&mut sched);

    assert_eq!(
        player.preview().settings(),
        &before,
        "round trip must leave preview settings bit-identical"
    );
}

#[test]
fn test_fullscreen_gets_snapshot_not_reference() {
    let (mut player, mut sched) = loaded_player();
    player.enter_fullscreen(&mut sched);

    // Edit the fullscreen copy only
    player.update_settings(
        SurfaceId::Fullscreen,
        &PlaybackSettings {
            speed: 4.0,
            ..PlaybackSettings::default()
        },
    );
    assert_eq!(
        player.preview().settings().speed,
        PlaybackSettings::default().speed,
        "fullscreen edits must not leak into preview"
    );
    assert_eq!(player.fullscreen().unwrap().settings().speed, 4.0);
}

#[test]
fn test_surfaces_have_independent_playback_state() {
    let (mut player, mut sched) = loaded_player();
    player.enter_fullscreen(&mut sched);
    player.set_viewport_height(SurfaceId::Fullscreen, 400.0);

    player.play(SurfaceId::Fullscreen, &mut sched);
    assert_eq!(player.fullscreen().unwrap().status(), PlaybackStatus::Playing);
    assert_eq!(
        player.preview().status(),
        PlaybackStatus::Stopped,
        "preview engine is untouched by fullscreen playback"
    );

    // Advance the fullscreen engine a few frames
    for _ in 0..3 {
        sched.fire().unwrap();
        let _ = player.on_frame(SurfaceId::Fullscreen, &mut sched);
    }
    assert!(player.fullscreen().unwrap().scroll_offset() > 0.0);
    assert_eq!(player.preview().scroll_offset(), 0.0);
}

#[test]
fn test_exit_fullscreen_cancels_pending_callback() {
    let (mut player, mut sched) = loaded_player();
    player.enter_fullscreen(&mut sched);
    player.set_viewport_height(SurfaceId::Fullscreen, 400.0);
    player.play(SurfaceId::Fullscreen, &mut sched);
    assert_eq!(sched.pending_count(), 1);

    player.exit_fullscreen(&mut sched);
    assert_eq!(sched.pending_count(), 0, "discarded engine leaves no callback");
    assert!(player.fullscreen().is_none());
}

#[test]
fn test_reenter_fullscreen_replaces_surface() {
    let (mut player, mut sched) = loaded_player();
    player.enter_fullscreen(&mut sched);
    player.update_settings(
        SurfaceId::Fullscreen,
        &PlaybackSettings {
            speed: 4.0,
            ..PlaybackSettings::default()
        },
    );

    player.enter_fullscreen(&mut sched);
    assert_eq!(
        player.fullscreen().unwrap().settings().speed,
        PlaybackSettings::default().speed,
        "re-entry snapshots the preview again"
    );
}

// =============================================================================
// DATASET LIFECYCLE
// =============================================================================

#[test]
fn test_dataset_replacement_tears_down_engines() {
    let (mut player, mut sched) = loaded_player();
    player.enter_fullscreen(&mut sched);
    player.set_viewport_height(SurfaceId::Fullscreen, 400.0);
    player.play(SurfaceId::Preview, &mut sched);
    player.play(SurfaceId::Fullscreen, &mut sched);
    assert_eq!(sched.pending_count(), 2);

    player.set_dataset(Some(make_dataset(1)), &mut sched);
    assert_eq!(sched.pending_count(), 0, "no stale ticks across imports");
    assert!(player.fullscreen().is_none(), "fullscreen dismissed");
    assert_eq!(player.preview().status(), PlaybackStatus::Stopped);
    assert_eq!(player.preview().scroll_offset(), 0.0);
}

#[test]
fn test_play_without_dataset_is_refused() {
    let mut sched = CountingScheduler::new();
    let mut player = Player::new(MemoryStore::new());
    player.play(SurfaceId::Preview, &mut sched);
    assert_eq!(player.preview().status(), PlaybackStatus::Stopped);
    assert_eq!(sched.requested, 0);
}

#[test]
fn test_play_empty_dataset_is_refused() {
    let mut sched = CountingScheduler::new();
    let mut player = Player::new(MemoryStore::new());
    player.set_dataset(Some(make_dataset(0)), &mut sched);
    player.play(SurfaceId::Preview, &mut sched);
    assert_eq!(player.preview().status(), PlaybackStatus::Stopped);
}
