//! OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing → tracing-opentelemetry → FileSpanExporter → apidex-otlp.json
//! ```
//!
//! Each exported batch is one OTLP/JSON line. The file rotates at 10 MB and
//! keeps three backups. The level comes from the `trace_level` plugin option.

mod exporter;
mod init;
mod otlp;
mod rotation;

pub use exporter::{create_tracer_provider, FileSpanExporter};
pub use init::init_tracing;
pub use rotation::{RotatingFile, RotationLimits};
