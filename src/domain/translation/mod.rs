use async_trait::async_trait;
use std::time::Duration;

use crate::domain::directory::Locale;

pub mod error;
pub mod pipeline;

pub use error::{PipelineError, TranslationError};
pub use pipeline::{
    LocaleLayout, PipelineReport, TranslationPipeline, BASE_BACKOFF, MAX_ATTEMPTS,
};

/// Remote machine translation of a single string.
/// Abstracts the underlying provider (DeepL today).
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target`.
    ///
    /// # Errors
    /// Returns error on transport failure, non-success status or a response
    /// without a translation
    async fn translate(&self, text: &str, target: Locale) -> Result<String, TranslationError>;
}

/// Delay between retries, injected so tests run without real waiting
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
