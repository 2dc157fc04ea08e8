//! Span exporter that appends OTLP/JSON documents to a rotated file.

use super::otlp;
use super::rotation::{RotatingFile, RotationLimits};
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

/// Instrumentation scope recorded on every exported batch.
pub const SCOPE: &str = "apidex";

#[derive(Debug)]
pub struct FileSpanExporter {
    file: RotatingFile,
    resource: Resource,
    stopped: bool,
}

impl FileSpanExporter {
    pub const fn new(path: PathBuf, limits: RotationLimits, resource: Resource) -> Self {
        Self {
            file: RotatingFile::new(path, limits),
            resource,
            stopped: false,
        }
    }
}

impl SpanExporter for FileSpanExporter {
    /// Writes the batch as a single JSON line.
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.stopped {
            Err(TraceError::from("file exporter is shut down"))
        } else {
            let line = otlp::encode_batch(&self.resource, SCOPE, &batch).to_string();
            self.file
                .append_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.stopped = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Builds a tracer provider that exports every finished span synchronously
/// to `path`.
pub fn create_tracer_provider(
    path: PathBuf,
    limits: RotationLimits,
    resource: Resource,
) -> TracerProvider {
    let exporter = FileSpanExporter::new(path, limits, resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
