mod common;

use std::sync::{Arc, Mutex};

use common::{Harness, default_harness};
use oxline::{Completion, Session, SessionError, SessionEvent};

const CTRL_C: &[u8] = b"\x03";
const CTRL_Z: &[u8] = b"\x1a";

type Answers = Arc<Mutex<Vec<String>>>;

fn record_into(sink: &Answers) -> impl FnOnce(String) -> anyhow::Result<()> + Send + 'static {
    let sink = sink.clone();
    move |line| {
        sink.lock().unwrap().push(line);
        Ok(())
    }
}

#[test]
fn ctrl_c_with_handler_interrupts_without_closing() {
    let mut h = default_harness();
    let hits = Arc::new(Mutex::new(0u32));
    let counter = hits.clone();
    let id = h.session.on_interrupt(move || {
        *counter.lock().unwrap() += 1;
        Ok(())
    });

    h.feed(b"draft").unwrap();
    h.feed(CTRL_C).unwrap();
    assert_eq!(*hits.lock().unwrap(), 1);
    assert!(!h.session.is_closed());
    assert_eq!(h.session.line(), "draft");
    assert_eq!(h.count("interrupt"), 1);

    // A REPL-style cancel: drop the line and keep going.
    h.session.clear_line();
    h.feed(b"next\n").unwrap();
    assert_eq!(h.lines(), vec!["next"]);

    assert!(h.session.off_event(id));
    h.feed(CTRL_C).unwrap();
    assert!(h.session.is_closed());
    assert_eq!(h.count("interrupt"), 1);
}

#[test]
fn ctrl_z_is_ignored_without_a_suspend_handler() {
    let mut h = default_harness();
    h.feed(b"ab").unwrap();
    h.feed(CTRL_Z).unwrap();
    assert_eq!(h.count("suspend"), 0);
    assert_eq!(h.session.line(), "ab");

    let hits = Arc::new(Mutex::new(0u32));
    let counter = hits.clone();
    h.session.on_suspend(move || {
        *counter.lock().unwrap() += 1;
        Ok(())
    });
    h.feed(CTRL_Z).unwrap();
    assert_eq!(*hits.lock().unwrap(), 1);
    assert_eq!(h.count("suspend"), 1);
    assert!(!h.session.is_closed());
}

#[test]
fn paused_session_holds_input_until_resume() {
    let mut h = default_harness();
    h.session.pause().unwrap();
    h.session.pause().unwrap();
    assert!(h.session.is_paused());
    assert_eq!(h.count("pause"), 1);

    h.feed_at(b"held line\nta", 0).unwrap();
    assert!(h.lines().is_empty());
    assert_eq!(h.session.line(), "");

    h.session.resume_at(h.at(50)).unwrap();
    assert!(!h.session.is_paused());
    assert_eq!(h.count("resume"), 1);
    assert_eq!(h.lines(), vec!["held line"]);
    assert_eq!(h.session.line(), "ta");

    h.session.resume().unwrap();
    assert_eq!(h.count("resume"), 1);
}

#[test]
fn held_crlf_keeps_its_pairing_on_resume() {
    let mut h = default_harness();
    h.session.pause().unwrap();
    h.feed_at(b"one\r", 0).unwrap();
    h.feed_at(b"\ntwo\n", 500).unwrap();
    h.session.resume_at(h.at(1_000)).unwrap();
    assert_eq!(h.lines(), vec!["one", "two"]);
}

#[test]
fn close_pauses_first_unless_already_paused() {
    let mut h = default_harness();
    h.session.close().unwrap();
    assert_eq!(h.kinds(), vec!["pause", "close"]);

    let mut h = default_harness();
    h.session.pause().unwrap();
    h.session.close().unwrap();
    assert_eq!(h.kinds(), vec!["pause", "close"]);
}

#[test]
fn end_while_paused_processes_held_input() {
    let mut h = default_harness();
    h.session.pause().unwrap();
    h.feed(b"a\nb").unwrap();
    h.session.end().unwrap();
    assert_eq!(h.lines(), vec!["a", "b"]);
    assert!(h.session.is_closed());
}

#[test]
fn question_routes_next_line_to_callback() {
    let mut h = default_harness();
    let got = Answers::default();
    h.session.question("name? ", record_into(&got)).unwrap();
    assert!(h.session.has_question());
    assert_eq!(h.session.prompt(), "name? ");
    assert_eq!(h.last_refresh().unwrap().prompt, "name? ");

    h.feed(b"ada\n").unwrap();
    assert_eq!(*got.lock().unwrap(), vec!["ada"]);
    assert!(h.lines().is_empty());
    assert!(!h.session.has_question());
    assert_eq!(h.session.prompt(), "> ");
    assert_eq!(h.session.history(), vec!["ada"]);

    h.feed(b"after\n").unwrap();
    assert_eq!(h.lines(), vec!["after"]);
    assert_eq!(got.lock().unwrap().len(), 1);
}

#[test]
fn second_question_while_pending_keeps_the_first() {
    let mut h = default_harness();
    let first = Answers::default();
    let second = Answers::default();
    h.session.question("a? ", record_into(&first)).unwrap();
    h.session.question("b? ", record_into(&second)).unwrap();
    assert_eq!(h.session.prompt(), "a? ");

    h.feed(b"yes\n").unwrap();
    assert_eq!(*first.lock().unwrap(), vec!["yes"]);
    assert!(second.lock().unwrap().is_empty());
}

#[test]
fn cancelled_question_never_answers() {
    let mut h = default_harness();
    let got = Answers::default();
    h.session.question("sure? ", record_into(&got)).unwrap();
    h.feed(b"partial").unwrap();
    assert!(h.session.cancel_question());
    assert!(!h.session.cancel_question());
    assert_eq!(h.session.prompt(), "> ");
    assert_eq!(h.session.line(), "");

    h.feed(b"plain\n").unwrap();
    assert!(got.lock().unwrap().is_empty());
    assert_eq!(h.lines(), vec!["plain"]);
}

#[test]
fn question_resumes_a_paused_session() {
    let mut h = default_harness();
    h.session.pause().unwrap();
    h.feed(b"early").unwrap();
    let got = Answers::default();
    h.session.question("? ", record_into(&got)).unwrap();
    assert!(!h.session.is_paused());
    h.feed(b"\n").unwrap();
    assert_eq!(*got.lock().unwrap(), vec!["early"]);
}

#[test]
fn question_after_close_is_an_error() {
    let mut h = default_harness();
    h.session.close().unwrap();
    let got = Answers::default();
    let err = h.session.question("late? ", record_into(&got)).unwrap_err();
    assert!(matches!(err, SessionError::Closed));
    assert!(matches!(h.session.show_prompt(false), Err(SessionError::Closed)));
}

#[test]
fn failing_question_callback_surfaces_after_observer_errors() {
    let mut h = default_harness();
    h.session
        .question("q? ", |_| anyhow::bail!("rejected answer"))
        .unwrap();
    let err = h.feed(b"x\n").unwrap_err();
    assert!(matches!(err, SessionError::Question(_)));
    assert!(err.to_string().contains("rejected answer"));
    assert_eq!(h.session.prompt(), "> ");

    h.session
        .question("q? ", |_| panic!("answer handler bug"))
        .unwrap();
    h.session.on_keypress(|_| anyhow::bail!("observer down"));
    let err = h.feed(b"y\n").unwrap_err();
    assert!(matches!(err, SessionError::Observer(_)), "{err}");
    assert!(!h.session.is_closed());
}

#[test]
fn show_prompt_moves_cursor_home_unless_preserved() {
    let mut h = default_harness();
    h.feed(b"abc").unwrap();
    h.session.show_prompt(true).unwrap();
    assert_eq!(h.session.cursor(), 3);
    assert_eq!(h.last_refresh().unwrap().cursor.col, 5);

    h.session.show_prompt(false).unwrap();
    assert_eq!(h.session.cursor(), 0);
    assert_eq!(h.last_refresh().unwrap().cursor.col, 2);
}

#[test]
fn completer_can_shorten_the_line() {
    let session = Session::builder()
        .completer(|prefix: &str| -> anyhow::Result<Completion> {
            Ok(Completion::replace(prefix, prefix.trim_end()))
        })
        .build()
        .unwrap();
    let mut h = Harness::with_session(session);
    h.feed(b"ls   \t").unwrap();
    assert_eq!(h.session.line(), "ls");
    h.feed(b"\n").unwrap();
    assert_eq!(h.lines(), vec!["ls"]);
    assert!(matches!(
        h.events.lock().unwrap().last(),
        Some(SessionEvent::Line(_))
    ));
}
