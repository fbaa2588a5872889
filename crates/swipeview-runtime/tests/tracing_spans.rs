#![forbid(unsafe_code)]

//! Log structure of a commit: the phase change into `committing` is emitted
//! inside the `swipeview.commit` span, and the completion is logged once.
//!
//! Run:
//!   cargo test -p swipeview-runtime --test tracing_spans

use std::sync::{Arc, Mutex};
use std::time::Duration;

use swipeview_runtime::{RenderSlots, SwipeConfig, SwipeRow};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone)]
struct CapturedEvent {
    message: String,
    fields: Vec<(String, String)>,
    span: Option<String>,
}

impl CapturedEvent {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

struct EventCapture {
    spans: Arc<Mutex<Vec<String>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        self.spans
            .lock()
            .unwrap()
            .push(attrs.metadata().name().to_string());
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let message = visitor
            .0
            .iter()
            .find(|(k, _)| k == "message")
            .map(|(_, v)| v.clone())
            .unwrap_or_default();
        self.events.lock().unwrap().push(CapturedEvent {
            message,
            fields: visitor.0,
            span: ctx.event_span(event).map(|s| s.name().to_string()),
        });
    }
}

fn capture<F: FnOnce()>(f: F) -> (Vec<String>, Vec<CapturedEvent>) {
    let spans = Arc::new(Mutex::new(Vec::new()));
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        spans: Arc::clone(&spans),
        events: Arc::clone(&events),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let spans = spans.lock().unwrap().clone();
    let events = events.lock().unwrap().clone();
    (spans, events)
}

#[test]
fn commit_phase_change_is_inside_commit_span() {
    let (spans, events) = capture(|| {
        let mut row = SwipeRow::builder()
            .config(SwipeConfig {
                left_open_value: 80.0,
                ..SwipeConfig::default()
            })
            .slots(RenderSlots::new().visible(|_| ()))
            .build()
            .expect("valid row");
        row.on_gesture_start();
        row.on_gesture_move(35.0, 0.0);
        for _ in 0..20 {
            row.advance(Duration::from_millis(16));
        }
    });

    assert_eq!(
        spans.iter().filter(|s| *s == "swipeview.commit").count(),
        1
    );

    let into_commit = events
        .iter()
        .find(|e| e.message == "phase" && e.field("to") == Some("committing"))
        .expect("phase change into committing logged");
    assert_eq!(into_commit.span.as_deref(), Some("swipeview.commit"));
    assert_eq!(into_commit.field("from"), Some("dragging"));

    assert_eq!(
        events.iter().filter(|e| e.message == "commit finished").count(),
        1
    );
    assert!(
        events
            .iter()
            .any(|e| e.message == "phase" && e.field("to") == Some("idle"))
    );
}

#[test]
fn dead_zone_samples_log_nothing_above_trace() {
    let (_, events) = capture(|| {
        let mut row = SwipeRow::builder()
            .slots(RenderSlots::new().visible(|_| ()))
            .build()
            .expect("valid row");
        row.on_gesture_start();
        row.on_gesture_move(1.0, 0.0);
        row.on_gesture_move(-2.0, 0.0);
    });
    assert!(events.iter().all(|e| e.message != "phase"));
    assert!(events.iter().all(|e| e.message != "swipe gesture began"));
}
