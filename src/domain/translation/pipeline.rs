use super::{PipelineError, Sleeper, TokioSleeper, Translator};
use crate::domain::directory::Locale;
use futures::future::{BoxFuture, FutureExt};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Attempts per leaf before falling back to the source text
pub const MAX_ATTEMPTS: u32 = 3;
/// Delay after attempt `n` is `n * BASE_BACKOFF`
pub const BASE_BACKOFF: Duration = Duration::from_millis(500);

const TRANSLATION_FILE: &str = "translation.json";

/// Where locale files are read from and written to
#[derive(Debug, Clone)]
pub struct LocaleLayout {
    pub source_path: PathBuf,
    pub source_locale: Locale,
    /// Output goes to `<out_dir>/<locale>/translation.json`
    pub out_dir: PathBuf,
    /// Optional hand-written overrides at `<overrides_dir>/<locale>.json`
    pub overrides_dir: PathBuf,
}

impl LocaleLayout {
    pub fn output_path(&self, locale: Locale) -> PathBuf {
        self.out_dir.join(locale.as_str()).join(TRANSLATION_FILE)
    }

    pub fn override_path(&self, locale: Locale) -> PathBuf {
        self.overrides_dir.join(format!("{}.json", locale.as_str()))
    }
}

#[derive(Debug, Default)]
pub struct PipelineReport {
    pub written: Vec<(Locale, PathBuf)>,
    pub overridden: Vec<Locale>,
}

/// Build-time batch that turns the source locale tree into one tree per target locale.
///
/// Locales and leaves are processed strictly one at a time to stay inside the
/// translation provider's rate limits.
pub struct TranslationPipeline {
    translator: Arc<dyn Translator>,
    sleeper: Arc<dyn Sleeper>,
    max_attempts: u32,
    base_backoff: Duration,
}

impl TranslationPipeline {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self::with_sleeper(translator, Arc::new(TokioSleeper))
    }

    pub fn with_sleeper(translator: Arc<dyn Translator>, sleeper: Arc<dyn Sleeper>) -> Self {
        Self {
            translator,
            sleeper,
            max_attempts: MAX_ATTEMPTS,
            base_backoff: BASE_BACKOFF,
        }
    }

    /// Translate every target locale and write it to disk.
    /// The source locale is skipped if it appears among the targets.
    pub async fn run(
        &self,
        layout: &LocaleLayout,
        targets: &[Locale],
    ) -> Result<PipelineReport, PipelineError> {
        let source = read_source(&layout.source_path).await?;
        let mut report = PipelineReport::default();

        for &target in targets {
            if target == layout.source_locale {
                tracing::warn!(locale = %target, "Skipping target equal to source locale");
                continue;
            }

            let start_time = std::time::Instant::now();
            tracing::info!(locale = %target, "Translating locale");

            let translated = self.translate_tree(&source, target).await;
            let path = layout.output_path(target);
            write_tree(&path, &translated).await?;

            if merge_override(&path, &layout.override_path(target), translated).await? {
                report.overridden.push(target);
            }

            tracing::info!(
                locale = %target,
                path = %path.display(),
                latency_ms = start_time.elapsed().as_millis(),
                "Locale translations written"
            );
            report.written.push((target, path));
        }

        Ok(report)
    }

    /// Structurally identical copy of `tree` with every string leaf translated.
    /// Mappings keep their keys and order, sequences their length; other
    /// values are copied unchanged.
    pub fn translate_tree<'a>(&'a self, tree: &'a Value, target: Locale) -> BoxFuture<'a, Value> {
        async move {
            match tree {
                Value::String(text) => Value::String(self.translate_leaf(text, target).await),
                Value::Object(map) => {
                    let mut translated = Map::with_capacity(map.len());
                    for (key, value) in map {
                        translated.insert(key.clone(), self.translate_tree(value, target).await);
                    }
                    Value::Object(translated)
                }
                Value::Array(items) => {
                    let mut translated = Vec::with_capacity(items.len());
                    for item in items {
                        translated.push(self.translate_tree(item, target).await);
                    }
                    Value::Array(translated)
                }
                other => other.clone(),
            }
        }
        .boxed()
    }

    /// Translate one leaf, retrying with linear backoff.
    /// Never fails: after the last attempt the source text is returned as is.
    pub async fn translate_leaf(&self, text: &str, target: Locale) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        for attempt in 1..=self.max_attempts {
            match self.translator.translate(text, target).await {
                Ok(translated) => return translated,
                Err(e) if attempt < self.max_attempts => {
                    let delay = self.base_backoff * attempt;
                    tracing::warn!(
                        error = %e,
                        locale = %target,
                        attempt = attempt,
                        retry_in_ms = delay.as_millis(),
                        "Translation attempt failed, retrying"
                    );
                    self.sleeper.sleep(delay).await;
                }
                Err(e) => {
                    let text_preview: String = text.chars().take(80).collect();
                    tracing::error!(
                        error = %e,
                        locale = %target,
                        attempts = attempt,
                        text_preview = %text_preview,
                        "Translation failed, keeping source text"
                    );
                }
            }
        }

        text.to_string()
    }
}

async fn read_source(path: &Path) -> Result<Value, PipelineError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| PipelineError::ReadSource {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_str(&raw).map_err(|source| PipelineError::ParseSource {
        path: path.to_path_buf(),
        source,
    })
}

async fn write_tree(path: &Path, tree: &Value) -> Result<(), PipelineError> {
    let write_err = |source| PipelineError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await.map_err(write_err)?;
    }

    let mut body = serde_json::to_string_pretty(tree)
        .map_err(|e| write_err(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
    body.push('\n');

    tokio::fs::write(path, body).await.map_err(write_err)
}

/// Shallow-merge the override file on top of the written tree; override keys win.
/// Returns whether an override file was applied.
async fn merge_override(
    output_path: &Path,
    override_path: &Path,
    translated: Value,
) -> Result<bool, PipelineError> {
    let read_err = |source| PipelineError::ReadOverride {
        path: override_path.to_path_buf(),
        source,
    };
    let parse_err = |message: String| PipelineError::ParseOverride {
        path: override_path.to_path_buf(),
        message,
    };

    if !tokio::fs::try_exists(override_path).await.map_err(read_err)? {
        return Ok(false);
    }

    let raw = tokio::fs::read_to_string(override_path)
        .await
        .map_err(read_err)?;
    let overrides: Value = serde_json::from_str(&raw).map_err(|e| parse_err(e.to_string()))?;

    let (Value::Object(mut merged), Value::Object(overrides)) = (translated, overrides) else {
        return Err(parse_err(
            "override and source trees must both be JSON objects".to_string(),
        ));
    };

    let override_count = overrides.len();
    for (key, value) in overrides {
        merged.insert(key, value);
    }

    write_tree(output_path, &Value::Object(merged)).await?;

    tracing::info!(
        path = %override_path.display(),
        override_count = override_count,
        "Manual overrides merged"
    );

    Ok(true)
}
