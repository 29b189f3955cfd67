//! Drives the host loop with scripted input.

use std::time::Duration;

use keepsake_core::scene::Scene;
use keepsake_host::app::run;
use keepsake_host::config::HostConfig;
use keepsake_test_support::MockRng;
use tokio::io::{AsyncWriteExt, BufReader};

fn config() -> HostConfig {
    HostConfig::from_lookup(|key| match key {
        "KEEPSAKE_ASSET_ROOT" => Some("/nonexistent/keepsake-assets".to_owned()),
        _ => None,
    })
    .unwrap()
}

#[tokio::test]
async fn test_tap_then_end_of_input_waits_for_the_handoff() {
    // Arrange
    let script: &[u8] = b"tap\n";
    let mut out = Vec::new();

    // Act
    let summary = run(&config(), Box::new(MockRng), script, &mut out)
        .await
        .unwrap();

    // Assert
    let screen = String::from_utf8(out).unwrap();
    assert_eq!(summary.final_scene, Scene::Gallery);
    assert_eq!(summary.inputs_handled, 1);
    assert!(screen.contains("Tap to unwrap your surprise"));
    assert!(screen.contains("Our Beautiful Journey"));
    assert!(screen.contains("○ ● ○ ○ ○"));
}

#[tokio::test]
async fn test_quit_stops_before_later_lines() {
    let script: &[u8] = b"status\nbogus\nquit\ntap\n";
    let mut out = Vec::new();

    let summary = run(&config(), Box::new(MockRng), script, &mut out)
        .await
        .unwrap();

    let screen = String::from_utf8(out).unwrap();
    assert_eq!(summary.final_scene, Scene::Invitation);
    assert_eq!(summary.inputs_handled, 0);
    assert!(screen.contains("\"current_scene\":\"invitation\""));
    assert!(screen.contains("unknown command: bogus"));
}

#[tokio::test]
async fn test_input_meant_for_another_scene_is_ignored() {
    let script: &[u8] = b"open 2\nclose\nquit\n";
    let mut out = Vec::new();

    let summary = run(&config(), Box::new(MockRng), script, &mut out)
        .await
        .unwrap();

    assert_eq!(summary.final_scene, Scene::Invitation);
    assert_eq!(summary.inputs_handled, 2);
}

#[tokio::test]
async fn test_input_after_the_handoff_window_is_delivered_to_the_next_scene() {
    // Arrange
    let (reader, mut writer) = tokio::io::duplex(64);
    tokio::spawn(async move {
        writer.write_all(b"tap\n").await.unwrap();
        tokio::time::sleep(Duration::from_millis(700)).await;
        writer.write_all(b"continue\n").await.unwrap();
    });
    let mut out = Vec::new();

    // Act
    let summary = run(&config(), Box::new(MockRng), BufReader::new(reader), &mut out)
        .await
        .unwrap();

    // Assert
    assert_eq!(summary.inputs_handled, 2);
    assert_eq!(summary.final_scene, Scene::Reveal);
}
