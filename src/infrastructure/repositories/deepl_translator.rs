use crate::domain::directory::Locale;
use crate::domain::translation::{TranslationError, Translator};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<TranslatedText>,
}

#[derive(Debug, Deserialize)]
struct TranslatedText {
    text: String,
}

/// DeepL REST implementation of the translator
pub struct DeepLTranslator {
    http_client: reqwest::Client,
    api_url: String,
    auth_key: String,
}

impl DeepLTranslator {
    pub fn new(api_url: String, auth_key: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_url,
            auth_key,
        }
    }
}

/// DeepL target codes are upper-case; plain `EN` is no longer accepted as a target
fn target_lang(locale: Locale) -> String {
    match locale {
        Locale::English => "EN-US".to_string(),
        other => other.as_str().to_uppercase(),
    }
}

#[async_trait]
impl Translator for DeepLTranslator {
    async fn translate(&self, text: &str, target: Locale) -> Result<String, TranslationError> {
        let target_lang = target_lang(target);
        tracing::debug!(
            target_lang = %target_lang,
            text_length = text.len(),
            "Calling DeepL translate"
        );

        let response = self
            .http_client
            .post(&self.api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.auth_key))
            .form(&[
                ("text", text),
                ("target_lang", target_lang.as_str()),
                ("preserve_formatting", "1"),
            ])
            .send()
            .await
            .map_err(|e| TranslationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: TranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::MalformedResponse(e.to_string()))?;

        payload
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| TranslationError::MalformedResponse("no translations".to_string()))
    }
}
