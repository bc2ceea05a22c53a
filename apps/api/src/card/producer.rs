// Card producer: decides between remote generation and the local template.
//
// The remote path is strictly best-effort. Every failure mode (missing
// credential, timeout, transport error, error status, malformed body, empty
// completion) is logged and answered with the deterministic template, so
// callers never observe a remote failure.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{info, warn};

use crate::card::prompts::{build_card_prompt, CARD_SYSTEM_PROMPT};
use crate::card::sanitize::extract_card_markup;
use crate::card::template::render_template_card;
use crate::llm_client::{CompletionBackend, LlmError};

/// Produces card markup for introductions. Cheap to clone; every handler
/// shares one instance through [`crate::state::AppState`].
#[derive(Clone)]
pub struct CardProducer {
    remote: Option<Arc<dyn CompletionBackend>>,
    short_intro_threshold: usize,
    remote_budget: Duration,
}

impl CardProducer {
    pub fn new(
        remote: Option<Arc<dyn CompletionBackend>>,
        short_intro_threshold: usize,
        remote_budget: Duration,
    ) -> Self {
        Self {
            remote,
            short_intro_threshold,
            remote_budget,
        }
    }

    /// Produces the card for a validated introduction. Infallible: the
    /// template path is pure string work and the remote path falls back to
    /// it on any error.
    pub async fn produce(&self, intro: &str) -> String {
        let intro_chars = intro.chars().count();

        if intro_chars < self.short_intro_threshold {
            info!(
                "intro has {intro_chars} chars (< {}), using the local template",
                self.short_intro_threshold
            );
            return render_template_card(intro);
        }

        let remote = match &self.remote {
            Some(remote) => remote,
            None => {
                warn!("no completion credential configured, using the local template");
                return render_template_card(intro);
            }
        };

        info!("requesting remote card generation ({intro_chars} chars)");

        match self.try_remote(remote.as_ref(), intro).await {
            Ok(html) => {
                info!("remote generation succeeded ({} bytes)", html.len());
                html
            }
            Err(error) => {
                warn!("remote generation failed, falling back to template: {error}");
                render_template_card(intro)
            }
        }
    }

    /// One bounded remote attempt. When the budget elapses the in-flight
    /// future is dropped, which aborts the underlying request instead of
    /// leaving it running unobserved.
    async fn try_remote(
        &self,
        remote: &dyn CompletionBackend,
        intro: &str,
    ) -> Result<String, LlmError> {
        let prompt = build_card_prompt(intro);

        let raw = timeout(self.remote_budget, remote.complete(CARD_SYSTEM_PROMPT, &prompt))
            .await
            .map_err(|_| LlmError::Timeout(self.remote_budget))??;

        let html = extract_card_markup(&raw);
        if html.is_empty() {
            return Err(LlmError::EmptyContent);
        }

        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const THRESHOLD: usize = 120;
    const BUDGET: Duration = Duration::from_secs(15);

    fn long_intro() -> String {
        "张三，软件工程师，热爱编程与开发。".repeat(10)
    }

    fn producer_with(remote: Option<Arc<dyn CompletionBackend>>) -> CardProducer {
        CardProducer::new(remote, THRESHOLD, BUDGET)
    }

    /// Records calls and answers with a fixed completion.
    struct FixedBackend {
        reply: &'static str,
        calls: AtomicUsize,
    }

    impl FixedBackend {
        fn new(reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl CompletionBackend for FixedBackend {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.to_string())
        }
    }

    /// Always fails with an upstream error status.
    struct FailingBackend;

    #[async_trait]
    impl CompletionBackend for FailingBackend {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 502,
                message: "bad gateway".to_string(),
            })
        }
    }

    /// Never resolves; only the producer's budget can end the attempt.
    struct StalledBackend;

    #[async_trait]
    impl CompletionBackend for StalledBackend {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_short_intro_never_calls_the_backend() {
        let backend = FixedBackend::new("<div>remote</div>");
        let producer = {
            let remote: Arc<dyn CompletionBackend> = backend.clone();
            producer_with(Some(remote))
        };

        let intro = "张三，软件工程师";
        let card = producer.produce(intro).await;

        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
        assert_eq!(card, render_template_card(intro));
    }

    #[tokio::test]
    async fn test_intro_at_threshold_goes_remote() {
        let backend = FixedBackend::new("<p>remote card</p>");
        let producer = {
            let remote: Arc<dyn CompletionBackend> = backend.clone();
            producer_with(Some(remote))
        };

        let intro = "自我介绍".repeat(THRESHOLD / 4);
        assert_eq!(intro.chars().count(), THRESHOLD);

        let card = producer.produce(&intro).await;

        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
        assert_eq!(card, "<p>remote card</p>");
    }

    #[tokio::test]
    async fn test_missing_credential_falls_back() {
        let producer = producer_with(None);
        let intro = long_intro();

        assert_eq!(producer.produce(&intro).await, render_template_card(&intro));
    }

    #[tokio::test]
    async fn test_backend_failure_falls_back_to_identical_template() {
        let producer = producer_with(Some(Arc::new(FailingBackend)));
        let intro = long_intro();

        assert_eq!(producer.produce(&intro).await, render_template_card(&intro));
    }

    #[tokio::test]
    async fn test_remote_markup_is_sanitized() {
        let backend =
            FixedBackend::new("```html\n<!DOCTYPE html><html><body>卡片</body></html>\n```");
        let producer = {
            let remote: Arc<dyn CompletionBackend> = backend.clone();
            producer_with(Some(remote))
        };

        let card = producer.produce(&long_intro()).await;
        assert_eq!(card, "<!DOCTYPE html><html><body>卡片</body></html>");
    }

    #[tokio::test]
    async fn test_completion_that_sanitizes_to_nothing_falls_back() {
        let backend = FixedBackend::new("```html\n```");
        let producer = {
            let remote: Arc<dyn CompletionBackend> = backend.clone();
            producer_with(Some(remote))
        };

        let intro = long_intro();
        assert_eq!(producer.produce(&intro).await, render_template_card(&intro));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_backend_is_cut_off_at_the_budget() {
        let producer = producer_with(Some(Arc::new(StalledBackend)));
        let intro = long_intro();

        let started = tokio::time::Instant::now();
        let card = producer.produce(&intro).await;
        let elapsed = started.elapsed();

        assert!(elapsed >= BUDGET, "returned before the budget elapsed");
        assert!(
            elapsed < BUDGET + Duration::from_secs(1),
            "did not abort promptly at the budget"
        );
        assert_eq!(card, render_template_card(&intro));
    }
}
