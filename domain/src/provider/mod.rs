//! Language-model provider registry.
//!
//! Every supported provider speaks the same chat-completions request and
//! response shape, so a provider is just data: an endpoint and a model id.
//! Built-in providers form a closed set; anything else is registered from
//! configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Built-in providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProviderKind {
    DeepSeek,
    OpenAi,
    Moonshot,
    Qwen,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::DeepSeek,
        ProviderKind::OpenAi,
        ProviderKind::Moonshot,
        ProviderKind::Qwen,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ProviderKind::DeepSeek => "deepseek",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Moonshot => "moonshot",
            ProviderKind::Qwen => "qwen",
        }
    }

    pub fn endpoint(&self) -> ProviderEndpoint {
        let (url, model) = match self {
            ProviderKind::DeepSeek => ("https://api.deepseek.com/chat/completions", "deepseek-chat"),
            ProviderKind::OpenAi => ("https://api.openai.com/v1/chat/completions", "gpt-4o-mini"),
            ProviderKind::Moonshot => ("https://api.moonshot.cn/v1/chat/completions", "moonshot-v1-8k"),
            ProviderKind::Qwen => (
                "https://dashscope.aliyuncs.com/compatible-mode/v1/chat/completions",
                "qwen-plus",
            ),
        };
        ProviderEndpoint::new(self.id(), url, model)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.id() == wanted)
            .ok_or_else(|| format!("unknown built-in provider '{}'", s))
    }
}

/// Where and with which model a chat request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoint {
    /// Registry key, e.g. `deepseek`.
    pub id: String,
    pub url: String,
    pub model: String,
}

impl ProviderEndpoint {
    pub fn new(id: impl Into<String>, url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            model: model.into(),
        }
    }
}

/// Read-only map from provider id to endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRegistry {
    entries: BTreeMap<String, ProviderEndpoint>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ProviderRegistry {
    /// Registry holding only the built-in providers.
    pub fn builtin() -> Self {
        let entries = ProviderKind::ALL
            .into_iter()
            .map(|kind| (kind.id().to_string(), kind.endpoint()))
            .collect();
        Self { entries }
    }

    /// Add or replace an entry. Ids are case-insensitive.
    pub fn with_endpoint(mut self, endpoint: ProviderEndpoint) -> Self {
        let id = endpoint.id.trim().to_lowercase();
        self.entries.insert(
            id.clone(),
            ProviderEndpoint {
                id,
                ..endpoint
            },
        );
        self
    }

    pub fn get(&self, id: &str) -> Option<&ProviderEndpoint> {
        self.entries.get(&id.trim().to_lowercase())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Provider ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
