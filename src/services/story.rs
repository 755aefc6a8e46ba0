//! Story generation with template fallback.

use std::sync::Arc;
use tracing::instrument;

use crate::auth::Credential;
use crate::config::StoryConfig;
use crate::observability::{redact, MetricsCollector, RequestTimer};
use crate::story::{build_prompt, generate_template};
use crate::types::chat::ChatRequest;
use crate::types::story::{FallbackReason, GenerationResult, StoryRequest};

use super::ChatService;

/// Generates stories, preferring the remote model and falling back to
/// templates.
///
/// [`StoryService::generate`] never fails: every remote problem becomes a
/// template story with a warning.
pub struct StoryService {
    chat: Arc<ChatService>,
    config: Arc<StoryConfig>,
    metrics: Arc<dyn MetricsCollector>,
}

impl StoryService {
    /// Creates a new story service.
    pub fn new(
        chat: Arc<ChatService>,
        config: Arc<StoryConfig>,
        metrics: Arc<dyn MetricsCollector>,
    ) -> Self {
        Self {
            chat,
            config,
            metrics,
        }
    }

    /// Generates a story.
    ///
    /// A blank credential selects the template path silently. A malformed
    /// credential, a failed request or an empty completion selects it with a
    /// warning. At most one request is sent.
    #[instrument(
        skip(self, credential, request),
        fields(mode = ?request.mode, key = %credential.key_hint())
    )]
    pub async fn generate(
        &self,
        credential: &Credential,
        request: &StoryRequest,
    ) -> GenerationResult {
        if let Err(error) = request.validate() {
            tracing::info!(error = %error, "Story request rejected");
            self.metrics.record_rejected();
            return GenerationResult::Error {
                message: error.message().to_string(),
            };
        }

        if credential.is_blank() {
            tracing::debug!("No API key set, using template story");
            self.metrics.record_template_story();
            return GenerationResult::template(self.template(request));
        }

        let validation = credential.validation();
        if !validation.is_valid() {
            tracing::warn!(
                ?validation,
                reason = validation.description(),
                "API key failed format check"
            );
            return self.fallback(request, FallbackReason::InvalidKeyFormat, None);
        }

        let prompt = build_prompt(
            request.mode,
            &request.child_names,
            &request.characters,
            request.holiday_name(),
        );
        let chat_request = ChatRequest::single_user(
            self.config.model.clone(),
            prompt,
            self.config.max_tokens,
            self.config.temperature,
        );

        let timer = RequestTimer::start("generate_story");
        match self.chat.create(credential, &chat_request, None).await {
            Ok(response) => {
                if let Some(usage) = response.usage {
                    self.metrics
                        .record_tokens(usage.prompt_tokens, usage.completion_tokens);
                }

                match response.non_blank_content() {
                    Some(story) => {
                        tracing::info!(
                            operation = timer.operation(),
                            elapsed = ?timer.elapsed(),
                            finish_reason = response.finish_reason().unwrap_or("unknown"),
                            "AI story generated"
                        );
                        self.metrics.record_ai_story(timer.elapsed());
                        GenerationResult::ai(story)
                    }
                    None => self.fallback(request, FallbackReason::EmptyResponse, Some(&timer)),
                }
            }
            Err(error) => {
                tracing::warn!(error = %redact(&error.to_string()), "Story request failed");
                self.fallback(request, FallbackReason::from(&error), Some(&timer))
            }
        }
    }

    /// Template story for a request, without any network access.
    pub fn template(&self, request: &StoryRequest) -> String {
        generate_template(
            request.mode,
            &request.child_names,
            &request.characters,
            request.holiday_name(),
        )
    }

    fn fallback(
        &self,
        request: &StoryRequest,
        reason: FallbackReason,
        timer: Option<&RequestTimer>,
    ) -> GenerationResult {
        tracing::warn!(reason = reason.as_str(), "Using template story instead of AI");
        self.metrics.record_fallback(
            reason,
            timer.map(RequestTimer::elapsed).unwrap_or_default(),
        );
        GenerationResult::fallback(self.template(request), reason)
    }
}

impl std::fmt::Debug for StoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryService")
            .field("model", &self.config.model)
            .field("max_tokens", &self.config.max_tokens)
            .finish()
    }
}
