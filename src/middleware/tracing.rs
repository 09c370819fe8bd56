use axum::{extract::Request, middleware::Next, response::Response};
use std::fmt;
use std::time::Instant;
use tracing::field::Field;
use tracing::Instrument;
use tracing_subscriber::field::Visit;
use tracing_subscriber::fmt::format::Writer;
use uuid::Uuid;

/// Wraps every page and asset request in a span tagged with a fresh id.
pub async fn trace_requests(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let started = Instant::now();

    let span = tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    );

    async move {
        let response = next.run(request).await;
        tracing::info!(
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );
        response
    }
    .instrument(span)
    .await
}

/// Field formatter that colours the keys the request span carries.
pub struct ColoredFields;

impl<'writer> tracing_subscriber::fmt::FormatFields<'writer> for ColoredFields {
    fn format_fields<R: tracing_subscriber::field::RecordFields>(
        &self,
        writer: Writer<'writer>,
        fields: R,
    ) -> fmt::Result {
        let mut visitor = ColoredFieldVisitor::new(writer);
        fields.record(&mut visitor);
        visitor.finish()
    }
}

struct ColoredFieldVisitor<'writer> {
    writer: Writer<'writer>,
    is_first: bool,
    error: Option<fmt::Error>,
}

impl<'writer> ColoredFieldVisitor<'writer> {
    fn new(writer: Writer<'writer>) -> Self {
        Self {
            writer,
            is_first: true,
            error: None,
        }
    }

    fn finish(self) -> fmt::Result {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn write_field(&mut self, name: &str, value: &dyn fmt::Debug) -> fmt::Result {
        if !self.is_first {
            write!(self.writer, " ")?;
        }
        self.is_first = false;

        if !self.writer.has_ansi_escapes() {
            return write!(self.writer, "{name}={value:?}");
        }

        let (key, val) = field_colors(name);
        write!(self.writer, "{key}{name}={val}{value:?}\x1b[0m")
    }
}

fn field_colors(name: &str) -> (&'static str, &'static str) {
    match name {
        "request_id" => ("\x1b[38;2;255;105;180m", "\x1b[36m"),
        "method" => ("\x1b[1;33m", "\x1b[36m"),
        "uri" => ("\x1b[35m", "\x1b[1;36m"),
        "status" => ("\x1b[34m", "\x1b[1;37m"),
        "elapsed_ms" => ("\x1b[33m", "\x1b[32m"),
        _ => ("\x1b[90m", "\x1b[37m"),
    }
}

impl<'writer> Visit for ColoredFieldVisitor<'writer> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.write_field(field.name(), value) {
            self.error = Some(err);
        }
    }
}
