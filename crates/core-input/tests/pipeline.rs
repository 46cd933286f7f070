//! Byte chunks through decode, newline and keypress stages together.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use core_events::{KeyToken, NamedKey};
use core_input::{KeypressDecoder, NewlineDisambiguator, NewlineItem};
use core_keymap::KeySequenceTable;
use core_text::ChunkDecoder;
use tracing::Subscriber;
use tracing::dispatcher::Dispatch;
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::Registry;

#[derive(Debug, PartialEq)]
enum Out {
    Key(KeyToken),
    Boundary,
}

struct Pipeline {
    decode: ChunkDecoder,
    newline: NewlineDisambiguator,
    keys: KeypressDecoder,
}

impl Pipeline {
    fn new() -> Self {
        Self {
            decode: ChunkDecoder::new(),
            newline: NewlineDisambiguator::new(Duration::from_millis(100)),
            keys: KeypressDecoder::new(KeySequenceTable::xterm(), Duration::from_millis(500)),
        }
    }

    fn feed(&mut self, bytes: &[u8], now: Instant) -> Vec<Out> {
        let chars = self.decode.feed(bytes);
        let mut out = Vec::new();
        let mut run = Vec::new();
        for item in self.newline.feed(&chars, now) {
            match item {
                NewlineItem::Char(c) => run.push(c),
                NewlineItem::Boundary => {
                    out.extend(self.keys.feed(&run, now).into_iter().map(|k| Out::Key(k.token)));
                    run.clear();
                    out.push(Out::Boundary);
                }
            }
        }
        out.extend(self.keys.feed(&run, now).into_iter().map(|k| Out::Key(k.token)));
        out
    }
}

#[test]
fn utf8_split_and_crlf_split_together() {
    let t0 = Instant::now();
    let mut p = Pipeline::new();
    let input = "é\r\n".as_bytes();
    let mut out = Vec::new();
    for b in input {
        out.extend(p.feed(std::slice::from_ref(b), t0));
    }
    assert_eq!(
        out,
        vec![
            Out::Key(KeyToken::Char('é')),
            Out::Key(KeyToken::Named(NamedKey::Return)),
            Out::Key(KeyToken::Named(NamedKey::Enter)),
            Out::Boundary,
        ]
    );
}

#[test]
fn arrow_key_bytes_one_at_a_time() {
    let t0 = Instant::now();
    let mut p = Pipeline::new();
    let mut out = Vec::new();
    for b in b"\x1b[B" {
        out.extend(p.feed(std::slice::from_ref(b), t0));
    }
    assert_eq!(out, vec![Out::Key(KeyToken::Named(NamedKey::Down))]);
}

#[derive(Clone, Default)]
struct Capture {
    events: Arc<Mutex<Vec<(String, Vec<(String, String)>)>>>,
}

#[derive(Default)]
struct FieldCollector {
    fields: Vec<(String, String)>,
}

impl Visit for FieldCollector {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.fields
            .push((field.name().to_string(), format!("{:?}", value)));
    }
}

impl<S> Layer<S> for Capture
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut collector = FieldCollector::default();
        event.record(&mut collector);
        self.events
            .lock()
            .unwrap()
            .push((event.metadata().target().to_string(), collector.fields));
    }
}

#[test]
fn key_logging_redacts_content() {
    let capture = Capture::default();
    let events = capture.events.clone();
    let dispatch = Dispatch::new(Registry::default().with(capture));

    tracing::dispatcher::with_default(&dispatch, || {
        let mut p = Pipeline::new();
        p.feed("secret 💣\n".as_bytes(), Instant::now());
    });

    let events = events.lock().unwrap();
    assert!(
        events.iter().any(|(target, _)| target == "input.key"),
        "expected input.key events"
    );
    for (_, fields) in events.iter() {
        for (_, value) in fields {
            assert!(!value.contains("secret"), "log leaked content: {value}");
            assert!(!value.contains('💣'), "log leaked content: {value}");
        }
    }
}
