//! Guidance session lifecycle.
//!
//! A [`GuidanceSession`] owns a client and at most one in-flight stream.
//! Starting a new stream cancels the previous one, and disposing the session
//! (explicitly or on drop) cancels whatever is still running.

use tracing::debug;
use uuid::Uuid;

use crate::error::{ErrorContext, GuruResult, NetworkError, ResultExt};
use crate::guidance::{GuidanceClient, GuidanceStream};
use crate::models::GuidanceRequest;
use crate::sse::CancelHandle;
use crate::traits::HttpClient;

pub struct GuidanceSession<C> {
    id: String,
    client: GuidanceClient<C>,
    active: Option<CancelHandle>,
    disposed: bool,
}

impl<C> GuidanceSession<C> {
    /// Session identifier, attached to errors raised by this session
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn client(&self) -> &GuidanceClient<C> {
        &self.client
    }

    /// Whether a stream started by this session has not been cancelled yet.
    pub fn has_active_stream(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|handle| !handle.is_cancelled())
    }

    /// Cancel the in-flight stream, if any.
    ///
    /// # Returns
    /// `true` if a live stream was cancelled
    pub fn cancel_active(&mut self) -> bool {
        match self.active.take() {
            Some(handle) if !handle.is_cancelled() => {
                handle.cancel();
                debug!(session = %self.id, "Cancelled active guidance stream");
                true
            }
            _ => false,
        }
    }

    /// Cancel any in-flight stream and refuse further requests.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.cancel_active();
        self.disposed = true;
        debug!(session = %self.id, "Guidance session disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl<C: HttpClient> GuidanceSession<C> {
    pub fn new(client: GuidanceClient<C>) -> Self {
        let id = Uuid::new_v4().to_string();
        debug!(session = %id, "Guidance session created");
        Self {
            id,
            client,
            active: None,
            disposed: false,
        }
    }

    /// Start streaming guidance, cancelling any stream already in flight.
    pub async fn start(&mut self, request: &GuidanceRequest) -> GuruResult<GuidanceStream> {
        let ctx = ErrorContext::new("session_start")
            .with_guru(request.guru_type.as_str())
            .with_session_id(self.id.clone());

        if self.disposed {
            return Err(NetworkError::Cancelled).context(ctx);
        }

        self.cancel_active();
        let stream = self
            .client
            .stream_guidance(request)
            .await
            .map_err(|e| e.with_context(ctx))?;
        self.active = Some(stream.cancel_handle());
        Ok(stream)
    }
}

impl<C> Drop for GuidanceSession<C> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::config::GuidanceConfig;
    use crate::gurus::GuruKind;
    use bytes::Bytes;
    use futures::StreamExt;

    fn session(mock: &MockHttpClient) -> GuidanceSession<MockHttpClient> {
        GuidanceSession::new(GuidanceClient::with_http(
            GuidanceConfig::default(),
            mock.clone(),
        ))
    }

    fn idle_mock() -> MockHttpClient {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::StreamThenIdle(vec![Bytes::from(
            "data: {\"content\":\"peace\"}\n",
        )]));
        mock
    }

    #[tokio::test]
    async fn test_start_tracks_active_stream() {
        let mock = idle_mock();
        let mut session = session(&mock);
        assert!(!session.has_active_stream());

        let mut stream = session
            .start(&GuidanceRequest::new(GuruKind::Yoga, "q"))
            .await
            .unwrap();
        assert!(session.has_active_stream());
        assert!(stream.next().await.unwrap().is_ok());

        assert!(session.cancel_active());
        assert!(!session.has_active_stream());
        assert!(stream.next().await.is_none());
        assert!(!session.cancel_active());
    }

    #[tokio::test]
    async fn test_new_stream_cancels_previous() {
        let mock = idle_mock();
        let mut session = session(&mock);

        let first = session
            .start(&GuidanceRequest::new(GuruKind::Yoga, "one"))
            .await
            .unwrap();
        let first_handle = first.cancel_handle();
        let _second = session
            .start(&GuidanceRequest::new(GuruKind::Yoga, "two"))
            .await
            .unwrap();

        assert!(first_handle.is_cancelled());
        assert!(session.has_active_stream());
    }

    #[tokio::test]
    async fn test_dispose_cancels_and_refuses_new_streams() {
        let mock = idle_mock();
        let mut session = session(&mock);
        let stream = session
            .start(&GuidanceRequest::new(GuruKind::Karma, "q"))
            .await
            .unwrap();
        let handle = stream.cancel_handle();

        session.dispose();
        assert!(handle.is_cancelled());
        assert!(session.is_disposed());

        let err = session
            .start(&GuidanceRequest::new(GuruKind::Karma, "again"))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "E_NET_CANCEL");
        assert_eq!(err.context().unwrap().session_id.as_deref(), Some(session.id()));
    }

    #[tokio::test]
    async fn test_drop_cancels_active_stream() {
        let mock = idle_mock();
        let handle = {
            let mut session = session(&mock);
            let stream = session
                .start(&GuidanceRequest::new(GuruKind::Bhakti, "q"))
                .await
                .unwrap();
            stream.cancel_handle()
        };
        assert!(handle.is_cancelled());
    }

    #[tokio::test]
    async fn test_failed_start_carries_session_context() {
        let mock = MockHttpClient::new();
        let mut session = session(&mock);

        let err = session
            .start(&GuidanceRequest::new(GuruKind::Sloka, "q"))
            .await
            .unwrap_err();
        let ctx = err.context().unwrap();
        assert_eq!(ctx.operation, "session_start");
        assert_eq!(ctx.session_id.as_deref(), Some(session.id()));
    }
}
