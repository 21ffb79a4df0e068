//! Registry descriptors and the HTTP client that fetches them.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::{
    config::is_loopback,
    error::{Error, Result},
};

/// Name of the registry item that carries the shared class-merging helper.
pub const UTILS_ITEM: &str = "utils";

/// A registry record describing one installable component.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDescriptor {
    /// Unique registry name.
    pub name: String,
    /// Category tag, informational only.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// External packages the component needs.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Other registry items this one references. Only `utils` is honored.
    #[serde(default)]
    pub registry_dependencies: Vec<String>,
    /// Files to materialize, in order.
    pub files: Vec<FileDescriptor>,
}

/// One file payload inside a component descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct FileDescriptor {
    /// Registry-relative source path.
    #[serde(default)]
    pub path: String,
    /// Full file text.
    pub content: String,
    /// File category tag, informational only.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Registry-relative destination; only the basename is used.
    #[serde(default)]
    pub target: String,
}

impl ComponentDescriptor {
    /// Whether this component references the shared utilities item.
    pub(crate) fn needs_utils(&self) -> bool {
        self.registry_dependencies
            .iter()
            .any(|item| item == UTILS_ITEM)
    }
}

impl FileDescriptor {
    /// Return the destination file name, falling back to `path` when `target` is empty.
    pub(crate) fn file_name(&self) -> Option<&str> {
        let raw = if self.target.trim().is_empty() {
            &self.path
        } else {
            &self.target
        };
        let name = raw.rsplit(['/', '\\']).next()?.trim();
        match name {
            "" | "." | ".." => None,
            name => Some(name),
        }
    }
}

/// Something that can produce component descriptors by name.
pub trait ComponentSource {
    /// Fetch and parse the descriptor for `name`.
    async fn fetch(&self, name: &str) -> Result<ComponentDescriptor>;

    /// Describe where `name` would be fetched from, for verbose output.
    fn locate(&self, name: &str) -> String;
}

/// HTTP client for a remote component registry.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    /// Base URL that descriptor names are appended to.
    base: Url,
    /// Shared HTTP client.
    client: reqwest::Client,
}

impl RegistryClient {
    /// Build a client for `base`, with an optional request timeout.
    pub(crate) fn new(base: Url, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if is_loopback(&base) {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(|error| Error::HttpClient {
            message: error.to_string(),
        })?;
        Ok(Self { base, client })
    }

    /// Return the descriptor URL for a component name, percent-encoding the name.
    pub(crate) fn component_url(&self, name: &str) -> String {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&format!("{name}.json"));
        }
        url.into()
    }
}

impl ComponentSource for RegistryClient {
    async fn fetch(&self, name: &str) -> Result<ComponentDescriptor> {
        let url = self.component_url(name);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|error| Error::Fetch {
                name: name.to_string(),
                url: url.clone(),
                message: error.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ComponentNotFound {
                name: name.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|error| Error::Fetch {
            name: name.to_string(),
            url,
            message: error.to_string(),
        })?;
        parse_descriptor(name, &body)
    }

    fn locate(&self, name: &str) -> String {
        self.component_url(name)
    }
}

/// Parse a descriptor body, attributing failures to `name`.
pub fn parse_descriptor(name: &str, body: &str) -> Result<ComponentDescriptor> {
    let descriptor: ComponentDescriptor =
        serde_json::from_str(body).map_err(|error| Error::MalformedResponse {
            name: name.to_string(),
            message: error.to_string(),
        })?;
    if descriptor.name.trim().is_empty() {
        return Err(Error::MalformedResponse {
            name: name.to_string(),
            message: "descriptor has an empty name".to_string(),
        });
    }
    Ok(descriptor)
}
