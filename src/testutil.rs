//! Test utilities for installer tests.
//!
//! `TestProject` builds an isolated project directory, `MemoryRegistry`
//! serves descriptors without a network, and `ScriptedPrompter` answers
//! overwrite prompts from a fixed script.

use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};
use url::Url;

use crate::{
    config::{DEFAULT_COMPONENTS_DIR, DEFAULT_UTILS_PATH},
    error::{Error, Result},
    materialize::Prompter,
    project::PROJECT_MARKER,
    registry::{ComponentDescriptor, ComponentSource, FileDescriptor, UTILS_ITEM},
};

/// Build a file descriptor whose `path` and `target` are both `target`.
pub fn file(target: &str, content: &str) -> FileDescriptor {
    FileDescriptor {
        path: target.to_string(),
        content: content.to_string(),
        kind: "registry:ui".to_string(),
        target: target.to_string(),
    }
}

/// Build a component descriptor.
pub fn descriptor(
    name: &str,
    dependencies: &[&str],
    files: Vec<FileDescriptor>,
) -> ComponentDescriptor {
    ComponentDescriptor {
        name: name.to_string(),
        kind: "registry:ui".to_string(),
        description: format!("The {name} component"),
        dependencies: dependencies.iter().map(ToString::to_string).collect(),
        registry_dependencies: Vec::new(),
        files,
    }
}

/// Builder helpers for descriptors in tests.
pub trait DescriptorExt {
    /// Mark the descriptor as depending on the utilities item.
    fn needing_utils(self) -> Self;
}

impl DescriptorExt for ComponentDescriptor {
    fn needing_utils(mut self) -> Self {
        self.registry_dependencies.push(UTILS_ITEM.to_string());
        self
    }
}

/// An isolated project directory with a `package.json`.
pub struct TestProject {
    /// Temp directory holding the project.
    root: TempDir,
}

impl TestProject {
    /// Create an empty project.
    pub fn new() -> Self {
        let root = TempDir::new().expect("create temp dir");
        fs::write(root.path().join(PROJECT_MARKER), "{}\n").expect("write package.json");
        Self { root }
    }

    /// Add a file relative to the project root.
    pub fn with_file(self, relative: &str, contents: &str) -> Self {
        let path = self.root.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(&path, contents).expect("write file");
        self
    }

    /// Add an already installed component file.
    pub fn with_component_file(self, component: &str, name: &str, contents: &str) -> Self {
        let relative = format!("{DEFAULT_COMPONENTS_DIR}/{component}/{name}");
        self.with_file(&relative, contents)
    }

    /// Project root directory.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Default components directory.
    pub fn components_dir(&self) -> PathBuf {
        self.root.path().join(DEFAULT_COMPONENTS_DIR)
    }

    /// Default utilities helper path.
    pub fn utils_path(&self) -> PathBuf {
        self.root.path().join(DEFAULT_UTILS_PATH)
    }

    /// Read a file relative to the project root.
    pub fn read(&self, relative: &str) -> Option<String> {
        fs::read_to_string(self.root.path().join(relative)).ok()
    }

    /// Path of an installed component file.
    pub fn component_path(&self, component: &str, name: &str) -> PathBuf {
        self.components_dir().join(component).join(name)
    }

    /// Read an installed component file.
    pub fn read_component(&self, component: &str, name: &str) -> Option<String> {
        fs::read_to_string(self.component_path(component, name)).ok()
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory registry keyed by component name.
#[derive(Default)]
pub struct MemoryRegistry {
    /// Served descriptors.
    components: HashMap<String, ComponentDescriptor>,
    /// Names fetched so far, in order.
    requested: RefCell<Vec<String>>,
    /// Called with each requested name before answering.
    hook: Option<Box<dyn Fn(&str)>>,
}

impl MemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `descriptor` under its own name.
    pub fn with(mut self, descriptor: ComponentDescriptor) -> Self {
        self.components.insert(descriptor.name.clone(), descriptor);
        self
    }

    /// Run `hook` on every fetch.
    pub fn on_fetch(mut self, hook: impl Fn(&str) + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Names fetched so far.
    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl ComponentSource for MemoryRegistry {
    async fn fetch(&self, name: &str) -> Result<ComponentDescriptor> {
        self.requested.borrow_mut().push(name.to_string());
        if let Some(hook) = &self.hook {
            hook(name);
        }
        self.components
            .get(name)
            .cloned()
            .ok_or_else(|| Error::ComponentNotFound {
                name: name.to_string(),
                status: 404,
            })
    }

    fn locate(&self, name: &str) -> String {
        format!("memory://{name}.json")
    }
}

/// Prompter that replays a fixed list of answers.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    /// Remaining answers.
    answers: VecDeque<bool>,
    /// Behave like a user pressing Esc or Ctrl+C.
    cancel: bool,
    /// Paths that were asked about, in order.
    pub asked: Vec<PathBuf>,
}

impl ScriptedPrompter {
    /// Answer prompts with `answers` in order.
    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Cancel the first prompt.
    pub fn canceling() -> Self {
        Self {
            cancel: true,
            ..Self::default()
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm_overwrite(&mut self, path: &Path) -> Result<bool> {
        self.asked.push(path.to_path_buf());
        if self.cancel {
            return Err(Error::PromptCanceled);
        }
        self.answers.pop_front().ok_or_else(|| Error::PromptFailed {
            message: "no scripted answer left".to_string(),
        })
    }
}

/// How a loopback registry answers one connection.
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    /// Send a response with this status line and JSON body.
    Respond(&'static str, &'static str),
    /// Close the connection without answering.
    Hangup,
    /// Hold the connection open until the client gives up.
    Stall,
}

/// Serve `replies` on a loopback port, one per connection, and return the base URL.
pub async fn serve_loopback(replies: Vec<Reply>) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        for reply in replies {
            let (mut stream, _) = listener.accept().await.expect("accept");
            read_request(&mut stream).await;
            match reply {
                Reply::Respond(status_line, body) => {
                    let response = format!(
                        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    stream
                        .write_all(response.as_bytes())
                        .await
                        .expect("write response");
                }
                Reply::Hangup => drop(stream),
                Reply::Stall => {
                    let mut rest = Vec::new();
                    stream.read_to_end(&mut rest).await.ok();
                }
            }
        }
    });
    Url::parse(&format!("http://{addr}/r/")).expect("url")
}

/// Base URL of a loopback port with nothing listening.
pub async fn closed_loopback() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    Url::parse(&format!("http://{addr}/r/")).expect("url")
}

/// Consume request headers from `stream`.
async fn read_request(stream: &mut TcpStream) {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        let read = stream.read(&mut buf).await.expect("read request");
        if read == 0 {
            break;
        }
        request.extend_from_slice(&buf[..read]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_project_with_marker() {
        let project = TestProject::new();
        assert!(project.root().join(PROJECT_MARKER).is_file());
    }

    #[test]
    fn adds_component_file() {
        let project = TestProject::new().with_component_file("button", "button.tsx", "x");
        assert_eq!(
            project.read_component("button", "button.tsx").as_deref(),
            Some("x")
        );
    }

    #[tokio::test]
    async fn memory_registry_records_requests() {
        let registry = MemoryRegistry::new().with(descriptor("button", &[], Vec::new()));
        assert!(registry.fetch("button").await.is_ok());
        assert!(registry.fetch("missing").await.is_err());
        assert_eq!(registry.requested(), vec!["button", "missing"]);
    }

    #[test]
    fn scripted_prompter_runs_out() {
        let mut prompter = ScriptedPrompter::answering([true]);
        assert!(prompter.confirm_overwrite(Path::new("a")).expect("answer"));
        assert!(prompter.confirm_overwrite(Path::new("b")).is_err());
        assert_eq!(prompter.asked.len(), 2);
    }
}
