//! End-to-end play sessions driven through scripted stdin.

use bloodgamble_cli::run_with_input;
use serial_test::serial;
use std::io::Cursor;

fn play(args: &[&str], input: &str) -> (i32, String, String) {
    unsafe {
        std::env::remove_var("BLOODGAMBLE_CONFIG");
        std::env::remove_var("BLOODGAMBLE_SEED");
        std::env::remove_var("BLOODGAMBLE_COLOR");
    }
    let mut stdin = Cursor::new(input.to_string());
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run_with_input(args, &mut stdin, &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
#[serial]
fn calling_station_plays_requested_hands() {
    let input = "call\n".repeat(400);
    let (code, out, _) = play(
        &["bloodgamble", "play", "--seed", "11", "--hands", "3", "--no-color"],
        &input,
    );
    assert_eq!(code, 0);
    assert!(out.contains("HAND 1"));
    assert!(out.contains("Hands played:"));
    assert!(out.contains("Final vigilance level:"));
}

#[test]
#[serial]
fn same_seed_and_input_replay_identically() {
    let input = "2\n".repeat(200);
    let args = ["bloodgamble", "play", "--seed", "2024", "--hands", "2", "--no-color"];
    let (_, first, _) = play(&args, &input);
    let (_, second, _) = play(&args, &input);
    assert_eq!(first, second);
}

#[test]
#[serial]
fn status_and_cheat_list_are_shown_on_request() {
    let (code, out, _) = play(
        &["bloodgamble", "play", "--seed", "8", "--no-color"],
        "status\ncheats\nq\n",
    );
    assert_eq!(code, 0);
    assert!(out.contains("=== STATUS ==="));
    assert!(out.contains("=== CHEATS ==="));
    assert!(out.contains("Table vigilance: 0.00"));
}

#[test]
#[serial]
fn confirmed_cheat_is_resolved_and_reported() {
    let mut input = String::from("cheat bluffboost\ny\n");
    input.push_str(&"fold\n".repeat(50));
    let (code, out, _) = play(
        &["bloodgamble", "play", "--seed", "15", "--hands", "1", "--no-color"],
        &input,
    );
    assert_eq!(code, 0);
    let worked = out.contains("BluffBoost worked:");
    let caught = out.contains("You caught using BluffBoost!");
    assert!(worked ^ caught, "exactly one outcome expected:\n{out}");
}

#[test]
#[serial]
fn cheat_on_cooldown_is_rejected_without_losing_the_turn() {
    let mut input = String::from("cheat cardmarking\ny\ncheat cardmarking\ny\n");
    input.push_str(&"fold\n".repeat(50));
    let (code, out, err) = play(
        &["bloodgamble", "play", "--seed", "16", "--hands", "1", "--no-color"],
        &input,
    );
    assert_eq!(code, 0);
    assert!(err.contains("Cheat rejected:"), "stderr: {err}");
    assert!(out.contains("Hands played: 1"));
}

#[test]
#[serial]
fn repeated_undersized_raises_keep_reprompting() {
    let mut input = "raise 1\n".repeat(12);
    input.push_str("fold\n");
    input.push_str(&"call\n".repeat(50));
    let (code, out, err) = play(
        &["bloodgamble", "play", "--seed", "11", "--hands", "1", "--no-color"],
        &input,
    );
    assert_eq!(code, 0, "stderr: {err}");
    assert_eq!(err.matches("Invalid action:").count(), 12);
    assert!(!err.contains("Error:"));
    assert!(out.contains("You: folds"));
    assert!(out.contains("Hands played: 1"));
}

#[test]
#[serial]
fn retrying_a_cheat_on_cooldown_keeps_the_session_alive() {
    let mut input = "cheat stackpeek\n1\ny\n".repeat(11);
    input.push_str("fold\n");
    input.push_str(&"call\n".repeat(50));
    let (code, out, err) = play(
        &["bloodgamble", "play", "--seed", "11", "--hands", "1", "--no-color"],
        &input,
    );
    assert_eq!(code, 0, "stderr: {err}");
    assert_eq!(err.matches("Cheat rejected:").count(), 10);
    assert!(out.contains("Hands played: 1"));
}
