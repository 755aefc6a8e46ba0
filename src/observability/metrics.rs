//! Metrics collection for story generation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::Duration;

use crate::types::story::FallbackReason;

/// Metrics collector interface.
pub trait MetricsCollector: Send + Sync {
    /// Records a story written by the remote model.
    fn record_ai_story(&self, duration: Duration);

    /// Records a template story served without attempting the API.
    fn record_template_story(&self);

    /// Records a template story served because the API path failed.
    fn record_fallback(&self, reason: FallbackReason, duration: Duration);

    /// Records a rejected generation request.
    fn record_rejected(&self);

    /// Records a live key test.
    fn record_key_test(&self, success: bool);

    /// Records token usage.
    fn record_tokens(&self, prompt_tokens: u32, completion_tokens: u32);

    /// Gets current metrics.
    fn get_metrics(&self) -> GenerationMetrics;

    /// Resets all metrics.
    fn reset(&self);
}

/// Metrics snapshot.
#[derive(Debug, Clone, Default)]
pub struct GenerationMetrics {
    /// Stories written by the remote model.
    pub ai_stories: u64,
    /// Template stories served without an API attempt.
    pub template_stories: u64,
    /// Template stories served after an API failure.
    pub fallback_stories: u64,
    /// Requests rejected by local validation.
    pub rejected_requests: u64,
    /// Key tests that succeeded.
    pub key_tests_passed: u64,
    /// Key tests that failed.
    pub key_tests_failed: u64,
    /// Total latency of API attempts in milliseconds.
    pub total_latency_ms: u64,
    /// Total prompt tokens.
    pub prompt_tokens: u64,
    /// Total completion tokens.
    pub completion_tokens: u64,
    /// Fallback counts by reason.
    pub fallbacks: HashMap<FallbackReason, u64>,
}

impl GenerationMetrics {
    /// Number of generation calls that reached the API.
    pub fn api_attempts(&self) -> u64 {
        self.ai_stories
            + self
                .fallbacks
                .iter()
                .filter(|(reason, _)| **reason != FallbackReason::InvalidKeyFormat)
                .map(|(_, count)| count)
                .sum::<u64>()
    }

    /// Average latency of API attempts in milliseconds.
    pub fn average_latency_ms(&self) -> f64 {
        let attempts = self.api_attempts();
        if attempts == 0 {
            0.0
        } else {
            self.total_latency_ms as f64 / attempts as f64
        }
    }

    /// Share of API attempts that produced an AI story, as a percentage.
    pub fn ai_success_rate(&self) -> f64 {
        let attempts = self.api_attempts();
        if attempts == 0 {
            100.0
        } else {
            (self.ai_stories as f64 / attempts as f64) * 100.0
        }
    }

    /// Calculates total tokens.
    pub fn total_tokens(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// Default metrics collector implementation.
pub struct DefaultMetricsCollector {
    ai_stories: AtomicU64,
    template_stories: AtomicU64,
    fallback_stories: AtomicU64,
    rejected_requests: AtomicU64,
    key_tests_passed: AtomicU64,
    key_tests_failed: AtomicU64,
    total_latency_ms: AtomicU64,
    prompt_tokens: AtomicU64,
    completion_tokens: AtomicU64,
    fallbacks: RwLock<HashMap<FallbackReason, u64>>,
}

impl DefaultMetricsCollector {
    /// Creates a new metrics collector.
    pub fn new() -> Self {
        Self {
            ai_stories: AtomicU64::new(0),
            template_stories: AtomicU64::new(0),
            fallback_stories: AtomicU64::new(0),
            rejected_requests: AtomicU64::new(0),
            key_tests_passed: AtomicU64::new(0),
            key_tests_failed: AtomicU64::new(0),
            total_latency_ms: AtomicU64::new(0),
            prompt_tokens: AtomicU64::new(0),
            completion_tokens: AtomicU64::new(0),
            fallbacks: RwLock::new(HashMap::new()),
        }
    }

    fn add_latency(&self, duration: Duration) {
        let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self.total_latency_ms.fetch_add(ms, Ordering::Relaxed);
    }
}

impl Default for DefaultMetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector for DefaultMetricsCollector {
    fn record_ai_story(&self, duration: Duration) {
        self.ai_stories.fetch_add(1, Ordering::Relaxed);
        self.add_latency(duration);
    }

    fn record_template_story(&self) {
        self.template_stories.fetch_add(1, Ordering::Relaxed);
    }

    fn record_fallback(&self, reason: FallbackReason, duration: Duration) {
        self.fallback_stories.fetch_add(1, Ordering::Relaxed);
        self.add_latency(duration);

        if let Ok(mut fallbacks) = self.fallbacks.write() {
            *fallbacks.entry(reason).or_insert(0) += 1;
        }
    }

    fn record_rejected(&self) {
        self.rejected_requests.fetch_add(1, Ordering::Relaxed);
    }

    fn record_key_test(&self, success: bool) {
        if success {
            self.key_tests_passed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.key_tests_failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn record_tokens(&self, prompt_tokens: u32, completion_tokens: u32) {
        self.prompt_tokens
            .fetch_add(u64::from(prompt_tokens), Ordering::Relaxed);
        self.completion_tokens
            .fetch_add(u64::from(completion_tokens), Ordering::Relaxed);
    }

    fn get_metrics(&self) -> GenerationMetrics {
        GenerationMetrics {
            ai_stories: self.ai_stories.load(Ordering::Relaxed),
            template_stories: self.template_stories.load(Ordering::Relaxed),
            fallback_stories: self.fallback_stories.load(Ordering::Relaxed),
            rejected_requests: self.rejected_requests.load(Ordering::Relaxed),
            key_tests_passed: self.key_tests_passed.load(Ordering::Relaxed),
            key_tests_failed: self.key_tests_failed.load(Ordering::Relaxed),
            total_latency_ms: self.total_latency_ms.load(Ordering::Relaxed),
            prompt_tokens: self.prompt_tokens.load(Ordering::Relaxed),
            completion_tokens: self.completion_tokens.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.read().map(|f| f.clone()).unwrap_or_default(),
        }
    }

    fn reset(&self) {
        for counter in [
            &self.ai_stories,
            &self.template_stories,
            &self.fallback_stories,
            &self.rejected_requests,
            &self.key_tests_passed,
            &self.key_tests_failed,
            &self.total_latency_ms,
            &self.prompt_tokens,
            &self.completion_tokens,
        ] {
            counter.store(0, Ordering::Relaxed);
        }

        if let Ok(mut fallbacks) = self.fallbacks.write() {
            fallbacks.clear();
        }
    }
}

impl std::fmt::Debug for DefaultMetricsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultMetricsCollector")
            .field("ai_stories", &self.ai_stories.load(Ordering::Relaxed))
            .field(
                "template_stories",
                &self.template_stories.load(Ordering::Relaxed),
            )
            .field(
                "fallback_stories",
                &self.fallback_stories.load(Ordering::Relaxed),
            )
            .finish()
    }
}
