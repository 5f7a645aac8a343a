//! Backend router: maps a `BackendKind` to a ready client.
//!
//! Clients are built lazily from a static constructor registry, at most
//! once per kind, after the credential check passes. Selection never
//! falls back to another backend.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parley_common::{BackendKind, ConfigError};
use parley_config::schema::{BackendSettings, ModelsConfig, TimeoutsConfig};
use parley_config::ParleyConfig;
use tracing::{debug, info, warn};

use crate::{AiClient, AiError, GeminiClient, GeminiConfig, OpenAiClient, OpenAiConfig};

/// Static description of one backend. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendDescriptor {
    pub kind: BackendKind,
    pub logical_name: &'static str,
    /// Name of the environment variable holding the API key.
    pub credential_env: String,
    pub tool_capable: bool,
    pub model_id: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub request_timeout: Duration,
}

impl BackendDescriptor {
    pub fn from_settings(
        kind: BackendKind,
        settings: BackendSettings,
        request_timeout: Duration,
    ) -> Self {
        Self {
            kind,
            logical_name: kind.logical_name(),
            credential_env: settings.credential_env,
            tool_capable: settings.tools,
            model_id: settings.model,
            base_url: settings.base_url,
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            request_timeout,
        }
    }
}

/// Builds a client from its descriptor and the resolved credential.
pub type BackendConstructor = Box<
    dyn Fn(&BackendDescriptor, String) -> Result<Arc<dyn AiClient>, AiError> + Send + Sync,
>;

/// Where API keys come from.
pub trait CredentialSource: Send + Sync {
    fn credential(&self, env_var: &str) -> Option<String>;
}

/// Reads the process environment (after `.env` loading).
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn credential(&self, env_var: &str) -> Option<String> {
        std::env::var(env_var).ok()
    }
}

/// Fixed credential map.
#[derive(Clone, Default)]
pub struct StaticCredentials {
    values: HashMap<String, String>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, env_var: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(env_var.into(), value.into());
        self
    }
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("keys", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CredentialSource for StaticCredentials {
    fn credential(&self, env_var: &str) -> Option<String> {
        self.values.get(env_var).cloned()
    }
}

/// Selects and caches backend clients.
pub struct ModelRouter {
    gpt4o: BackendDescriptor,
    gemini_flash: BackendDescriptor,
    constructors: HashMap<BackendKind, BackendConstructor>,
    credentials: Box<dyn CredentialSource>,
    cache: HashMap<BackendKind, Arc<dyn AiClient>>,
}

impl ModelRouter {
    pub fn new(
        models: &ModelsConfig,
        timeouts: &TimeoutsConfig,
        credentials: impl CredentialSource + 'static,
    ) -> Self {
        let request_timeout = Duration::from_secs(u64::from(timeouts.backend_secs));
        let descriptor = |kind: BackendKind| {
            BackendDescriptor::from_settings(kind, models.settings(kind), request_timeout)
        };

        let mut constructors: HashMap<BackendKind, BackendConstructor> = HashMap::new();
        constructors.insert(BackendKind::Gpt4o, Box::new(openai_constructor));
        constructors.insert(BackendKind::GeminiFlash, Box::new(gemini_constructor));

        Self {
            gpt4o: descriptor(BackendKind::Gpt4o),
            gemini_flash: descriptor(BackendKind::GeminiFlash),
            constructors,
            credentials: Box::new(credentials),
            cache: HashMap::new(),
        }
    }

    /// Router over the process environment.
    pub fn from_config(config: &ParleyConfig) -> Self {
        Self::new(&config.models, &config.timeouts, EnvCredentials)
    }

    /// Replace the constructor for `kind`, dropping any cached client.
    pub fn with_constructor(mut self, kind: BackendKind, constructor: BackendConstructor) -> Self {
        self.constructors.insert(kind, constructor);
        self.cache.remove(&kind);
        self
    }

    pub fn descriptor(&self, kind: BackendKind) -> &BackendDescriptor {
        match kind {
            BackendKind::Gpt4o => &self.gpt4o,
            BackendKind::GeminiFlash => &self.gemini_flash,
        }
    }

    pub fn is_cached(&self, kind: BackendKind) -> bool {
        self.cache.contains_key(&kind)
    }

    /// Whether `kind` has a non-blank credential. Builds nothing.
    pub fn has_credential(&self, kind: BackendKind) -> bool {
        self.credential_for(self.descriptor(kind)).is_some()
    }

    fn credential_for(&self, descriptor: &BackendDescriptor) -> Option<String> {
        self.credentials
            .credential(&descriptor.credential_env)
            .filter(|value| !value.trim().is_empty())
    }

    /// Client for `kind`, constructing it on first use.
    ///
    /// A missing or blank credential fails before any construction or
    /// network access.
    pub fn select(&mut self, kind: BackendKind) -> Result<Arc<dyn AiClient>, ConfigError> {
        if let Some(client) = self.cache.get(&kind) {
            debug!(backend = %kind, "using cached backend client");
            return Ok(Arc::clone(client));
        }

        let descriptor = self.descriptor(kind).clone();
        let credential = self.credential_for(&descriptor).ok_or_else(|| {
            warn!(backend = %kind, env_var = %descriptor.credential_env, "missing credential");
            ConfigError::MissingCredential {
                backend: descriptor.logical_name.to_string(),
                env_var: descriptor.credential_env.clone(),
            }
        })?;

        let constructor = self.constructors.get(&kind).ok_or_else(|| {
            ConfigError::ClientInit(format!("no constructor registered for {kind}"))
        })?;
        let client = constructor(&descriptor, credential)
            .map_err(|e| ConfigError::ClientInit(format!("{}: {e}", descriptor.logical_name)))?;

        info!(backend = %kind, model = %descriptor.model_id, "backend client ready");
        self.cache.insert(kind, Arc::clone(&client));
        Ok(client)
    }
}

fn openai_constructor(
    descriptor: &BackendDescriptor,
    api_key: String,
) -> Result<Arc<dyn AiClient>, AiError> {
    let config = OpenAiConfig::new(api_key)
        .with_model(descriptor.model_id.clone())
        .with_base_url(descriptor.base_url.clone())
        .with_max_tokens(descriptor.max_tokens)
        .with_temperature(descriptor.temperature)
        .with_timeout(descriptor.request_timeout);
    Ok(Arc::new(OpenAiClient::new(config)?))
}

fn gemini_constructor(
    descriptor: &BackendDescriptor,
    api_key: String,
) -> Result<Arc<dyn AiClient>, AiError> {
    let config = GeminiConfig::new(api_key)
        .with_model(descriptor.model_id.clone())
        .with_base_url(descriptor.base_url.clone())
        .with_max_tokens(descriptor.max_tokens)
        .with_temperature(descriptor.temperature)
        .with_timeout(descriptor.request_timeout);
    Ok(Arc::new(GeminiClient::new(config)?))
}
