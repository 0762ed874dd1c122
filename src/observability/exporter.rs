//! OpenTelemetry span exporter writing one JSON object per finished span.
//!
//! Each line is a flat record:
//!
//! ```json
//! {"service":"pruneflow","name":"workflow_send","traceId":"…","spanId":"…","parentSpanId":"",
//!  "startUnixNano":"…","durationMicros":41,"attributes":{"state":"selecting","event":"DELETE_SELECTION"},
//!  "events":[{"name":"transition taken","attributes":{…}}],"status":"unset"}
//! ```

use super::sink::RotatingSink;
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Map, Value as JsonValue};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

/// Span exporter backed by a [`RotatingSink`].
pub struct JsonLinesExporter {
    sink: RotatingSink,
    service: String,
    is_shutdown: bool,
}

impl JsonLinesExporter {
    /// Creates an exporter appending to `path`, tagging records with `service`.
    pub fn new(path: PathBuf, service: impl Into<String>) -> Self {
        Self {
            sink: RotatingSink::new(path),
            service: service.into(),
            is_shutdown: false,
        }
    }

    /// Converts one span into its JSON record.
    #[must_use]
    pub fn record(&self, span: &SpanData) -> JsonValue {
        let parent = if span.parent_span_id == SpanId::INVALID {
            String::new()
        } else {
            format!("{:016x}", span.parent_span_id)
        };
        let duration = span
            .end_time
            .duration_since(span.start_time)
            .unwrap_or(Duration::ZERO);

        let events: Vec<JsonValue> = span
            .events
            .iter()
            .map(|event| {
                json!({
                    "name": event.name,
                    "attributes": attributes(&event.attributes),
                })
            })
            .collect();

        json!({
            "service": self.service,
            "name": span.name,
            "traceId": format!("{:032x}", span.span_context.trace_id()),
            "spanId": format!("{:016x}", span.span_context.span_id()),
            "parentSpanId": parent,
            "startUnixNano": unix_nanos(span.start_time).to_string(),
            "durationMicros": u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
            "attributes": attributes(&span.attributes),
            "events": events,
            "status": status(&span.status),
        })
    }
}

fn unix_nanos(time: SystemTime) -> u128 {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos()
}

fn attributes(attributes: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        other => JsonValue::String(other.to_string()),
    }
}

fn status(status: &Status) -> JsonValue {
    match status {
        Status::Unset => json!("unset"),
        Status::Ok => json!("ok"),
        Status::Error { description } => json!({ "error": description.to_string() }),
    }
}

impl SpanExporter for JsonLinesExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown {
            return Box::pin(std::future::ready(Err(TraceError::from("exporter is shut down"))));
        }

        for span in &batch {
            let line = self.record(span).to_string();
            if let Err(e) = self.sink.write_line(&line) {
                return Box::pin(std::future::ready(Err(TraceError::from(e.to_string()))));
            }
        }
        Box::pin(std::future::ready(Ok(())))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        if let Some(service) = resource.get(opentelemetry::Key::from_static_str("service.name")) {
            self.service = service.to_string();
        }
    }
}

impl std::fmt::Debug for JsonLinesExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesExporter")
            .field("sink", &self.sink)
            .field("service", &self.service)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Builds a tracer provider that exports every finished span to `path`.
pub fn tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let service = resource
        .get(opentelemetry::Key::from_static_str("service.name"))
        .map_or_else(|| "pruneflow".to_string(), |value| value.to_string());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(JsonLinesExporter::new(path, service))
        .build()
}
