//! Tracing setup with optional OpenTelemetry span export.
//!
//! ```text
//! tracing macros → tracing-subscriber ─┬→ fmt layer → stderr
//!                                      └→ tracing-opentelemetry → JsonLinesExporter → rotating file
//! ```
//!
//! The filter comes from `RUST_LOG`, then the `trace_level` config option, then
//! `"info"`. Span export is enabled only when `trace_file` is configured.
//!
//! # Modules
//!
//! - `init`: subscriber installation
//! - `exporter`: `SpanExporter` writing one JSON record per span
//! - `sink`: size-rotated line writer

mod exporter;
mod init;
mod sink;

pub use exporter::{tracer_provider, JsonLinesExporter};
pub use init::init_tracing;
pub use sink::RotatingSink;
