//! Request/response exchange capture.
//!
//! # Responsibilities
//! - Log method, path, caller address, and user agent on entry
//! - Record the status code the handler produced (200 unless set)
//! - Copy every body frame into a per-request buffer as it is forwarded
//! - Log status, elapsed time, and body once the body has been delivered
//!
//! # Design Decisions
//! - `CaptureBody` decorates the response body; frames go to the transport
//!   the moment they are polled, the buffer is only a side copy
//! - Completion fires once: end of stream, body error, or drop
//!   (hyper may stop polling once `is_end_stream` is true)
//! - `CapturedExchange` belongs to exactly one request and is never shared

use std::net::SocketAddr;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use axum::{
    body::{Body, Bytes},
    extract::{ConnectInfo, Request},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use hyper::body::{Body as HttpBody, Frame, SizeHint};

use crate::http::request::request_id;
use crate::observability::metrics;

/// Per-request capture state.
#[derive(Debug)]
pub struct CapturedExchange {
    request_id: String,
    status: StatusCode,
    body: Vec<u8>,
    started: Instant,
}

impl CapturedExchange {
    pub fn new(request_id: impl Into<String>, started: Instant) -> Self {
        Self {
            request_id: request_id.into(),
            status: StatusCode::OK,
            body: Vec::new(),
            started,
        }
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub fn record(&mut self, chunk: &[u8]) {
        self.body.extend_from_slice(chunk);
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Close the exchange and produce its log record.
    pub fn finish(self) -> ExchangeRecord {
        ExchangeRecord {
            request_id: self.request_id,
            status: self.status.as_u16(),
            elapsed: self.started.elapsed(),
            body: String::from_utf8_lossy(&self.body).into_owned(),
        }
    }
}

/// Summary of one finished exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRecord {
    pub request_id: String,
    pub status: u16,
    pub elapsed: Duration,
    pub body: String,
}

impl ExchangeRecord {
    /// Write the completion log line and update metrics.
    pub fn emit(self) {
        tracing::info!(
            request_id = %self.request_id,
            status = self.status,
            elapsed_ms = self.elapsed.as_secs_f64() * 1000.0,
            body = %self.body,
            "Request completed"
        );
        metrics::record_exchange(self.status, self.elapsed);
    }
}

type OnComplete = Box<dyn FnOnce(ExchangeRecord) + Send>;

/// Response body that forwards frames unchanged while copying their data.
pub struct CaptureBody {
    inner: Body,
    pending: Option<(CapturedExchange, OnComplete)>,
}

impl CaptureBody {
    /// Wrap `inner`; the record is logged when the body completes.
    pub fn new(inner: Body, exchange: CapturedExchange) -> Self {
        Self::with_callback(inner, exchange, ExchangeRecord::emit)
    }

    /// Wrap `inner` and hand the record to `on_complete` instead of logging it.
    pub fn with_callback<F>(inner: Body, exchange: CapturedExchange, on_complete: F) -> Self
    where
        F: FnOnce(ExchangeRecord) + Send + 'static,
    {
        Self {
            inner,
            pending: Some((exchange, Box::new(on_complete))),
        }
    }

    fn complete(&mut self) {
        if let Some((exchange, on_complete)) = self.pending.take() {
            on_complete(exchange.finish());
        }
    }
}

impl HttpBody for CaptureBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.get_mut();
        let polled = Pin::new(&mut this.inner).poll_frame(cx);

        match &polled {
            Poll::Ready(Some(Ok(frame))) => {
                if let (Some(data), Some((exchange, _))) = (frame.data_ref(), this.pending.as_mut()) {
                    exchange.record(data);
                }
            }
            Poll::Ready(Some(Err(_))) | Poll::Ready(None) => this.complete(),
            Poll::Pending => {}
        }

        polled
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}

impl Drop for CaptureBody {
    fn drop(&mut self) {
        self.complete();
    }
}

/// Middleware installing the capture around every exchange.
pub async fn capture_exchange(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let request_id = request_id(request.headers()).to_string();

    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info!(
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
        remote_addr = %remote_addr,
        user_agent = %user_agent,
        "Request received"
    );

    let mut exchange = CapturedExchange::new(request_id, started);
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    exchange.set_status(parts.status);
    Response::from_parts(parts, Body::new(CaptureBody::new(body, exchange)))
}
