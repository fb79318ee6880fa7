use super::*;
use std::time::Instant;

use crate::config::Settings;

fn app_with_queue(names: &[&str]) -> App {
    let mut app = App::new(&Settings::default());
    for name in names {
        app.queue.enqueue(name.to_string());
    }
    app
}

#[test]
fn banner_auto_dismisses_after_its_ttl() {
    let mut app = app_with_queue(&[]);
    let t0 = Instant::now();

    app.show_error("add: Song not in library".to_string(), t0);
    assert_eq!(app.banner_message(), Some("add: Song not in library"));

    app.tick_banner(t0 + BANNER_TTL / 2);
    assert!(app.banner_message().is_some());

    app.tick_banner(t0 + BANNER_TTL);
    assert_eq!(app.banner_message(), None);
}

#[test]
fn a_newer_error_restarts_the_banner_window() {
    let mut app = app_with_queue(&[]);
    let t0 = Instant::now();

    app.show_error("first".to_string(), t0);
    app.show_error("second".to_string(), t0 + BANNER_TTL / 2);

    app.tick_banner(t0 + BANNER_TTL);
    assert_eq!(app.banner_message(), Some("second"));
}

#[test]
fn queue_cursor_wraps_both_ways() {
    let mut app = app_with_queue(&["a", "b", "c"]);

    app.queue_cursor_up();
    assert_eq!(app.queue_cursor, 2);
    app.queue_cursor_down();
    assert_eq!(app.queue_cursor, 0);
    app.queue_cursor_down();
    assert_eq!(app.queue_cursor, 1);
}

#[test]
fn queue_cursor_moves_are_noops_on_an_empty_queue() {
    let mut app = app_with_queue(&[]);
    app.queue_cursor_down();
    app.queue_cursor_up();
    assert_eq!(app.queue_cursor, 0);
}

#[test]
fn cursor_keeps_its_screen_position_after_a_removal() {
    let mut app = app_with_queue(&["a", "b", "c"]);
    app.queue_cursor = 1;

    // Removing the row under the cursor: the next row slides into its place.
    app.queue.remove_at(1);
    app.clamp_queue_cursor();
    assert_eq!(app.queue_cursor, 1);
    assert_eq!(app.queue.get(app.queue_cursor), Some("c"));

    // Removing the last row clamps the cursor onto the new last row.
    app.queue_cursor = 1;
    app.queue.remove_at(1);
    app.clamp_queue_cursor();
    assert_eq!(app.queue_cursor, 0);

    app.queue.remove_at(0);
    app.clamp_queue_cursor();
    assert_eq!(app.queue_cursor, 0);
}
