//! AI-backed text and image judgments.
//!
//! Every failure (unconfigured endpoint, transport error, non-2xx, missing
//! content, unresolvable image) is treated as "no violation".

use std::sync::Arc;

use tracing::{debug, warn};

use super::ports::{ChatPlatform, ImageRef};
use crate::ai::{AiError, CompletionProvider, CompletionRequest};

pub const TEXT_POLICY: &str = "You are a TG Admin. Analyze message & context for ADS/SPAM.\n\
Include: Crypto selling, Porn, Gambling, Carding, Illegal services.\n\
Strictly end with: 'VERDICT: YES' (violation) or 'VERDICT: NO'.";

pub const PROFILE_POLICY: &str = "Check user profile. RULES: 1. Selling Crypto/Drugs/Fake Money -> YES. \
2. Porn/NSFW -> YES. 3. Normal -> NO. VERDICT: YES/NO.";

pub const IMAGE_POLICY: &str = "Is this an AD/QR Code/Spam text in image? VERDICT: YES/NO";

/// Normalize a free-text model answer to a violation flag.
///
/// `VERDICT: YES` is authoritative. Answers without the marker fall back to
/// "contains YES and no NO", which models that ignore the format sometimes
/// satisfy; it misfires on answers like "YES, SAFE" and is only a fallback.
pub fn parse_verdict(answer: &str) -> bool {
    let upper = answer.to_uppercase();
    if upper.contains("VERDICT: YES") {
        return true;
    }
    let fallback = upper.contains("YES") && !upper.contains("NO");
    if fallback {
        debug!("Verdict marker missing, bare YES accepted: {:.100}", upper);
    }
    fallback
}

#[derive(Clone)]
pub struct ContentClassifier {
    provider: Arc<dyn CompletionProvider>,
    platform: Arc<dyn ChatPlatform>,
}

impl ContentClassifier {
    pub fn new(provider: Arc<dyn CompletionProvider>, platform: Arc<dyn ChatPlatform>) -> Self {
        Self { provider, platform }
    }

    pub async fn classify_text(&self, content: &str, policy: &str) -> bool {
        let request = CompletionRequest::text(policy, content);
        self.judge(&request, "text").await
    }

    pub async fn classify_image(&self, image: &ImageRef) -> bool {
        let url = match self.platform.resolve_file(image).await {
            Ok(url) => url,
            Err(e) => {
                warn!("Could not resolve image {}: {}", image.0, e);
                return false;
            }
        };

        let request = CompletionRequest::image(IMAGE_POLICY, &url);
        self.judge(&request, "image").await
    }

    async fn judge(&self, request: &CompletionRequest, what: &str) -> bool {
        match self.provider.complete(request).await {
            Ok(answer) => {
                let violated = parse_verdict(&answer);
                debug!("AI {} verdict: {} ({:.100})", what, violated, answer);
                violated
            }
            Err(AiError::NotConfigured) => {
                debug!("AI not configured, {} check skipped", what);
                false
            }
            Err(e) => {
                warn!("AI {} check failed, treating as safe: {}", what, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moderation::testing::{MockPlatform, MockProvider};

    #[test]
    fn explicit_marker_wins() {
        assert!(parse_verdict("Looks like an ad. VERDICT: YES"));
        assert!(parse_verdict("verdict: yes"));
        assert!(!parse_verdict("VERDICT: NO"));
    }

    #[test]
    fn bare_yes_fallback() {
        assert!(parse_verdict("Yes."));
        // "NO" anywhere disables the fallback, including inside other words
        assert!(!parse_verdict("Yes, nothing wrong"));
        assert!(!parse_verdict("Maybe"));
        assert!(!parse_verdict(""));
    }

    #[tokio::test]
    async fn transport_error_is_safe() {
        let provider = Arc::new(MockProvider::failing());
        let classifier = ContentClassifier::new(provider.clone(), Arc::new(MockPlatform::default()));

        assert!(!classifier.classify_text("buy now", TEXT_POLICY).await);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn unresolvable_image_skips_provider() {
        let provider = Arc::new(MockProvider::answering("VERDICT: YES"));
        let platform = MockPlatform {
            fail_resolve: true,
            ..Default::default()
        };
        let classifier = ContentClassifier::new(provider.clone(), Arc::new(platform));

        assert!(!classifier.classify_image(&ImageRef("f".into())).await);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn image_request_carries_resolved_url() {
        let provider = Arc::new(MockProvider::answering("VERDICT: YES"));
        let classifier = ContentClassifier::new(provider.clone(), Arc::new(MockPlatform::default()));

        assert!(classifier.classify_image(&ImageRef("abc".into())).await);
        let sent = provider.requests();
        assert_eq!(sent[0], CompletionRequest::image(IMAGE_POLICY, "https://files.test/abc"));
    }
}
