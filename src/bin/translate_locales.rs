use anyhow::Context;
use aqaba_directory::domain::translation::{LocaleLayout, TranslationPipeline};
use aqaba_directory::infrastructure::config::TranslateConfig;
use aqaba_directory::infrastructure::logging::init_logging;
use aqaba_directory::infrastructure::repositories::DeepLTranslator;
use std::sync::Arc;

/// Regenerates `<out>/<locale>/translation.json` for every target locale.
/// Runs as a build step; production deploys ship the committed files instead.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = TranslateConfig::from_env()
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("Failed to load translation config")?;

    init_logging(&config.log_format);

    if config.is_production() {
        tracing::info!("Skipping locale translation in production");
        return Ok(());
    }

    let layout = LocaleLayout {
        source_path: config.source_path.clone(),
        source_locale: config.source_locale,
        out_dir: config.out_dir.clone(),
        overrides_dir: config.overrides_dir.clone(),
    };

    tracing::info!(
        source = %layout.source_path.display(),
        targets = ?config.target_locales,
        "Translating locale files"
    );

    let translator = Arc::new(DeepLTranslator::new(
        config.deepl_api_url.clone(),
        config.deepl_auth_key.clone(),
    ));
    let pipeline = TranslationPipeline::new(translator);

    let report = pipeline
        .run(&layout, &config.target_locales)
        .await
        .context("Locale translation failed")?;

    for (locale, path) in &report.written {
        tracing::info!(locale = %locale, path = %path.display(), "Locale file written");
    }
    tracing::info!(
        written = report.written.len(),
        overridden = report.overridden.len(),
        "Locale translation complete"
    );

    Ok(())
}
