use std::{collections::BTreeMap, time::SystemTime};

use crate::logging::{EventSpan, LogEvent};
use tracing::{info, Level};
use tracing_subscriber::Layer;

/// Collects `LogEvent`s emitted via `log_event!` under their enclosing span
/// and emits a single `log entry` record when a top-level span closes.
#[derive(Default)]
pub struct DealLogsLayer;

impl<S> Layer<S> for DealLogsLayer
where
    S: tracing::Subscriber,
    S: for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_new_span(
        &self,
        _attrs: &tracing::span::Attributes<'_>,
        id: &tracing::span::Id,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if *span.metadata().level() > Level::INFO {
            return;
        }

        let mut extensions = span.extensions_mut();
        extensions.insert(EventSpan::new(span.name()));
        extensions.insert(StartTime(SystemTime::now()));
    }

    fn on_close(&self, id: tracing::span::Id, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };

        let mut extensions = span.extensions_mut();
        if let Some(mut event_span) = extensions.remove::<EventSpan>() {
            event_span.latency = match extensions.remove::<StartTime>() {
                Some(start) => SystemTime::now()
                    .duration_since(start.0)
                    .map(|elapsed| elapsed.as_millis() as u64)
                    .unwrap_or_default(),
                None => 0,
            };
            drop(extensions);

            let parent = span
                .scope()
                .skip(1)
                .find(|parent| parent.extensions().get::<EventSpan>().is_some());
            match parent {
                Some(parent) => {
                    let mut extensions = parent.extensions_mut();
                    if let Some(parent_event_span) = extensions.get_mut::<EventSpan>() {
                        parent_event_span.children.push(event_span);
                    }
                }
                None => {
                    if !event_span.is_empty() {
                        info!(entry = %event_span.encode(), "log entry")
                    }
                }
            }
        }
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut fields = BTreeMap::new();
        let mut visitor = JsonVisitor(&mut fields);
        event.record(&mut visitor);

        let Some(log) = fields
            .get("event")
            .and_then(|e| e.as_str())
            .and_then(LogEvent::decode)
        else {
            return;
        };

        if let Some(scope) = ctx.event_scope(event) {
            for span in scope {
                let mut extensions = span.extensions_mut();
                if let Some(event_span) = extensions.get_mut::<EventSpan>() {
                    event_span.events.push(log);
                    return;
                }
            }
        }
    }
}

struct StartTime(SystemTime);

struct JsonVisitor<'a>(&'a mut BTreeMap<String, serde_json::Value>);

impl<'a> tracing::field::Visit for JsonVisitor<'a> {
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_error(
        &mut self,
        field: &tracing::field::Field,
        value: &(dyn std::error::Error + 'static),
    ) {
        self.0.insert(
            field.name().to_string(),
            serde_json::json!(value.to_string()),
        );
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.insert(
            field.name().to_string(),
            serde_json::json!(format!("{:?}", value)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::FetchEvent;
    use std::sync::{Arc, Mutex};
    use tracing::info_span;
    use tracing_subscriber::{layer::SubscriberExt, Registry};

    /// Records the `entry` field of `log entry` records.
    #[derive(Clone, Default)]
    struct EntrySink(Arc<Mutex<Vec<String>>>);

    impl<S: tracing::Subscriber> Layer<S> for EntrySink {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            let mut fields = BTreeMap::new();
            event.record(&mut JsonVisitor(&mut fields));
            if let Some(entry) = fields.get("entry") {
                self.0.lock().unwrap().push(entry.to_string());
            }
        }
    }

    #[test]
    fn events_are_collected_under_top_span() {
        let sink = EntrySink::default();
        let subscriber = Registry::default().with(DealLogsLayer).with(sink.clone());

        tracing::subscriber::with_default(subscriber, || {
            let outer = info_span!("search");
            let _outer = outer.enter();
            {
                let inner = info_span!("fetch");
                let _inner = inner.enter();
                FetchEvent::attempt("cheapshark".to_owned(), "Portal", 1, &Ok(String::new()));
            }
        });

        let entries = sink.0.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("search"));
        assert!(entries[0].contains("fetch"));
        assert!(entries[0].contains("Portal"));
    }

    #[test]
    fn empty_spans_are_not_reported() {
        let sink = EntrySink::default();
        let subscriber = Registry::default().with(DealLogsLayer).with(sink.clone());

        tracing::subscriber::with_default(subscriber, || {
            let span = info_span!("idle");
            let _span = span.enter();
        });

        assert!(sink.0.lock().unwrap().is_empty());
    }
}
