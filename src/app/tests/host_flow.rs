use std::collections::VecDeque;
use std::io;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::App;
use crate::config::{Config, SelectorOptions};
use crate::error::SelectorError;
use crate::record::Record;
use crate::selector::{Phase, Selector};

use super::terminal_surface::TestTerminalSurface;

fn people() -> Vec<Record> {
    vec![
        Record::new().with("name", "Alice").with("id", 1),
        Record::new().with("name", "Alan").with("id", 2),
        Record::new().with("name", "Bob").with("id", 3),
    ]
}

fn app_with(options: SelectorOptions) -> App {
    let selector = Selector::new(options).expect("selector should build");
    App::with_selector(selector, Config::default())
}

fn app() -> App {
    app_with(
        SelectorOptions::new("[[%:name%]]")
            .with_data(people())
            .with_saved_key("id"),
    )
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(ch: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
}

fn typed(text: &str) -> Vec<Event> {
    text.chars()
        .map(|ch| Event::Key(key(KeyCode::Char(ch))))
        .collect()
}

fn click(column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn run_script(app: &mut App, events: Vec<Event>) -> TestTerminalSurface {
    let mut surface = TestTerminalSurface::new(60, 20).expect("test terminal should initialize");
    let mut queue: VecDeque<Event> = events.into();
    app.run_on(&mut surface, || {
        Ok(queue
            .pop_front()
            .unwrap_or(Event::Key(key(KeyCode::Esc))))
    })
    .expect("host loop should finish");
    surface
}

#[test]
fn typing_arrowing_and_enter_commit_the_active_row() {
    let mut app = app();
    let mut events = typed("Al");
    events.extend([
        Event::Key(key(KeyCode::Down)),
        Event::Key(key(KeyCode::Enter)),
        Event::Key(key(KeyCode::Esc)),
        Event::Key(key(KeyCode::Esc)),
    ]);

    run_script(&mut app, events);

    assert_eq!(app.value(), "2;");
    assert_eq!(app.selector.phase(), Phase::Idle);
    assert_eq!(app.status.message, "selected -> 2;");
    assert_eq!(app.finish(), "2;");
}

#[test]
fn dropdown_rows_render_under_the_field() {
    let mut app = app();
    for ch in ['A', 'l'] {
        app.handle_key(key(KeyCode::Char(ch)));
    }
    assert_eq!(app.input.value(), "Al");

    let mut surface = TestTerminalSurface::new(60, 20).expect("test terminal should initialize");
    app.draw(&mut surface).expect("draw should succeed");
    let rows = surface.rows();

    assert!(rows[1].contains("Al"));
    assert!(rows[4].contains("Alice"));
    assert!(rows[5].contains("Alan"));
    assert!(!rows.iter().any(|row| row.contains("Bob")));
}

#[test]
fn clicking_a_dropdown_row_commits_it() {
    let mut app = app();
    let mut events = typed("Al");
    // Popup border sits on row 3 and starts at column 1.
    events.push(click(3, 5));

    run_script(&mut app, events);

    assert_eq!(app.value(), "2;");
}

#[test]
fn backspace_on_empty_input_removes_the_chip_left_of_it() {
    let mut app = app();
    let mut events = typed("Bo");
    events.extend([
        Event::Key(key(KeyCode::Enter)),
        Event::Key(key(KeyCode::Backspace)),
    ]);

    run_script(&mut app, events);

    assert_eq!(app.value(), "");
    assert_eq!(app.status.message, "removed -> ");
}

#[test]
fn typing_at_capacity_is_rejected_and_the_buffer_is_dropped() {
    let mut app = app_with(
        SelectorOptions::new("[[%:name%]]")
            .with_data(people())
            .with_saved_key("id")
            .with_max_data(1),
    );
    for event in typed("Bo") {
        if let Event::Key(key) = event {
            app.handle_key(key);
        }
    }
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.value(), "3;");

    let outcome = app.handle_key(key(KeyCode::Char('A')));

    assert!(outcome.redraw);
    assert_eq!(app.input.value(), "");
    assert_eq!(app.status.message, "at most 1 items can be selected");
    assert_eq!(app.value(), "3;");
}

#[test]
fn clear_and_reset_shortcuts_empty_the_selection() {
    let mut app = app();
    app.selector.load_value("1;3;");
    assert_eq!(app.value(), "1;3;");

    app.handle_key(ctrl('u'));
    assert_eq!(app.value(), "");
    assert_eq!(app.status.message, "selection cleared");

    app.selector.load_value("2;");
    for ch in ['B', 'o'] {
        app.handle_key(key(KeyCode::Char(ch)));
    }
    app.handle_key(ctrl('r'));
    assert_eq!(app.value(), "");
    assert_eq!(app.input.value(), "");
    assert_eq!(app.selector.phase(), Phase::Idle);
    assert_eq!(app.status.message, "selector reset");
}

#[test]
fn key_release_events_are_ignored() {
    let mut app = app();
    let mut release = key(KeyCode::Char('A'));
    release.kind = KeyEventKind::Release;

    run_script(&mut app, vec![Event::Key(release), Event::Key(key(KeyCode::Esc))]);

    assert_eq!(app.input.value(), "");
}

#[test]
fn read_errors_stop_the_loop() {
    let mut app = app();
    let mut surface = TestTerminalSurface::new(60, 20).expect("test terminal should initialize");

    let err = app
        .run_on(&mut surface, || Err(io::Error::other("tty closed")))
        .expect_err("read failure should propagate");

    assert!(matches!(err, SelectorError::Io { .. }));
}
