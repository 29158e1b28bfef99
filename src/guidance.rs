//! Guidance API client.
//!
//! Issues guidance requests to the backend and, for the streaming endpoint,
//! pulls the response body through a [`StreamDecoder`] so callers see
//! structured events instead of bytes.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;
use tracing::debug;

use crate::adapters::ReqwestHttpClient;
use crate::config::GuidanceConfig;
use crate::error::{ErrorContext, GuruError, GuruResult, NetworkError, ResultExt};
use crate::gurus::{build_prompt, GuruKind, PromptParts};
use crate::models::{GuidanceRequest, GuidanceResponse, GuruPromptRequest};
use crate::sse::{decode_stream, CancelHandle, DecodedEvent, DecoderConfig, EventStream, StreamDecoder};
use crate::traits::{Headers, HttpClient, HttpError, Response};

pub const STREAM_PATH: &str = "/api/spiritual/guidance/stream";
pub const GUIDANCE_PATH: &str = "/api/spiritual/guidance";
pub const GURUS_PATH: &str = "/api/gurus";
pub const HEALTH_PATH: &str = "/health";

/// A live guidance stream.
///
/// Yields decoded events in order. A non-fatal `Err` marks one skipped
/// malformed update; a fatal `Err` is the last item. Dropping the stream or
/// calling [`CancelHandle::cancel`] on its handle abandons the response.
pub struct GuidanceStream {
    events: EventStream,
    cancel: CancelHandle,
}

impl GuidanceStream {
    /// Handle that stops this stream from another task or thread.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Stream for GuidanceStream {
    type Item = Result<DecodedEvent, GuruError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.events.as_mut().poll_next(cx)
    }
}

impl std::fmt::Debug for GuidanceStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuidanceStream")
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

/// Client for the guidance backend.
///
/// Generic over the transport so tests can substitute
/// [`MockHttpClient`](crate::adapters::MockHttpClient).
pub struct GuidanceClient<C> {
    config: GuidanceConfig,
    decoder_config: DecoderConfig,
    http: Arc<C>,
}

impl<C> Clone for GuidanceClient<C> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            decoder_config: self.decoder_config.clone(),
            http: Arc::clone(&self.http),
        }
    }
}

impl GuidanceClient<ReqwestHttpClient> {
    /// Create a reqwest-backed client, applying the configured timeouts.
    pub fn from_config(config: GuidanceConfig) -> GuruResult<Self> {
        config.validate()?;
        let http = ReqwestHttpClient::with_timeouts(config.connect_timeout, config.request_timeout)
            .map_err(|e| NetworkError::from_http(e, &config.base_url))?;
        Ok(Self::with_http(config, http))
    }
}

impl<C: HttpClient> GuidanceClient<C> {
    pub fn with_http(config: GuidanceConfig, http: C) -> Self {
        Self {
            config,
            decoder_config: DecoderConfig::default(),
            http: Arc::new(http),
        }
    }

    /// Override the wire framing used to decode streamed responses.
    pub fn with_decoder_config(mut self, decoder_config: DecoderConfig) -> Self {
        self.decoder_config = decoder_config;
        self
    }

    pub fn config(&self) -> &GuidanceConfig {
        &self.config
    }

    /// Open a streaming guidance request.
    ///
    /// Request-phase failures (connect, non-2xx status) are returned here;
    /// once the stream is open, failures arrive as stream items.
    pub async fn stream_guidance(&self, request: &GuidanceRequest) -> GuruResult<GuidanceStream> {
        let url = self.config.endpoint(STREAM_PATH);
        let ctx = || {
            ErrorContext::new("stream_guidance")
                .with_guru(request.guru_type.as_str())
                .with_endpoint(STREAM_PATH)
        };

        let body = serde_json::to_string(request).with_context(ctx)?;
        let mut headers = json_headers();
        headers.insert("Accept".to_string(), "text/event-stream".to_string());

        debug!(guru = %request.guru_type, "Opening guidance stream");
        let bytes = self
            .http
            .post_stream(&url, &body, &headers)
            .await
            .map_err(|e| NetworkError::from_http(e, &url))
            .with_context(ctx)?;

        let decoder = StreamDecoder::with_config(self.decoder_config.clone());
        let cancel = decoder.cancel_handle();
        Ok(GuidanceStream {
            events: decode_stream(bytes, decoder),
            cancel,
        })
    }

    /// Stream guidance for `question`, using the configured default guru
    /// when `guru` is `None`.
    pub async fn stream_question(
        &self,
        guru: Option<GuruKind>,
        question: &str,
    ) -> GuruResult<GuidanceStream> {
        let guru = guru.unwrap_or(self.config.default_guru);
        self.stream_guidance(&GuidanceRequest::new(guru, question))
            .await
    }

    /// Ask for guidance on the buffered endpoint.
    pub async fn ask(&self, request: &GuidanceRequest) -> GuruResult<GuidanceResponse> {
        let url = self.config.endpoint(GUIDANCE_PATH);
        let ctx = || {
            ErrorContext::new("ask")
                .with_guru(request.guru_type.as_str())
                .with_endpoint(GUIDANCE_PATH)
        };

        let request = request.clone().buffered();
        let body = serde_json::to_string(&request).with_context(ctx)?;

        let response = self.post_json(&url, &body).await.with_context(ctx)?;
        response.json().with_context(ctx)
    }

    /// Ask one guru directly, sending its assembled persona prompt.
    ///
    /// The backend answers with a free-form JSON document.
    pub async fn ask_guru(&self, guru: GuruKind, question: &str) -> GuruResult<serde_json::Value> {
        let path = format!("{}/{}", GURUS_PATH, guru.as_str());
        let url = self.config.endpoint(&path);
        let ctx = || {
            ErrorContext::new("ask_guru")
                .with_guru(guru.as_str())
                .with_endpoint(path.clone())
        };

        let request = GuruPromptRequest {
            prompt: build_prompt(PromptParts::for_guru(guru, question)),
            question: question.to_string(),
        };
        let body = serde_json::to_string(&request).with_context(ctx)?;

        let response = self.post_json(&url, &body).await.with_context(ctx)?;
        response.json().with_context(ctx)
    }

    /// Check if the backend is reachable and healthy.
    ///
    /// # Returns
    /// `true` if the health endpoint returns a 2xx status
    pub async fn health_check(&self) -> GuruResult<bool> {
        let url = self.config.endpoint(HEALTH_PATH);

        let response = self
            .http
            .get(&url, &Headers::new())
            .await
            .map_err(|e| NetworkError::from_http(e, &url))
            .context(ErrorContext::new("health_check").with_endpoint(HEALTH_PATH))?;

        Ok(response.is_success())
    }

    async fn post_json(&self, url: &str, body: &str) -> Result<Response, NetworkError> {
        let response = self
            .http
            .post(url, body, &json_headers())
            .await
            .map_err(|e| NetworkError::from_http(e, url))?;

        if !response.is_success() {
            return Err(NetworkError::from_http(
                HttpError::ServerError {
                    status: response.status,
                    message: response.text_lossy(),
                },
                url,
            ));
        }
        Ok(response)
    }
}

fn json_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers
}
