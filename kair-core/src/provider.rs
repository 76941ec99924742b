use crate::{
    Config,
    error::FetchError,
    provider::{gemini::GeminiProvider, offline::OfflineProvider},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod gemini;
pub mod offline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Gemini,
    Offline,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Gemini => "gemini",
            ProviderId::Offline => "offline",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Gemini, ProviderId::Offline]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ProviderId::all()
            .iter()
            .copied()
            .find(|id| id.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| {
                let supported =
                    ProviderId::all().iter().map(ProviderId::as_str).collect::<Vec<_>>().join(", ");
                anyhow::anyhow!("Unknown provider '{value}'. Supported providers: {supported}.")
            })
    }
}

/// A generative-search collaborator: answers a prompt with free-form text.
#[async_trait]
pub trait SearchProvider: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    async fn search(&self, prompt: &str) -> Result<String, FetchError>;
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> anyhow::Result<Box<dyn SearchProvider>> {
    let boxed: Box<dyn SearchProvider> = match id {
        ProviderId::Gemini => {
            let api_key = config.api_key().ok_or_else(|| {
                anyhow::anyhow!(
                    "No API key configured for provider '{id}'.\n\
                     Hint: run `kair configure` or set GEMINI_API_KEY. \
                     Use --offline to run on placeholder data."
                )
            })?;
            Box::new(GeminiProvider::new(api_key, config.gemini.clone())?)
        }
        ProviderId::Offline => Box::new(OfflineProvider),
    };

    Ok(boxed)
}
