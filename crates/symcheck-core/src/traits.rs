//! Seams to the engine's external collaborators.
//!
//! The core never renders, persists, or talks to a network itself: it
//! fetches definition bytes through `DefinitionSource` and pushes
//! notifications through `Announcer` and `TelemetrySink`. Front-ends plug
//! in concrete implementations; tests plug in recording doubles.

use std::path::PathBuf;

use async_trait::async_trait;

// ---------------------------------------------------------------------------
// Definition source
// ---------------------------------------------------------------------------

/// Where quiz definition bytes come from.
///
/// The concrete transport (HTTP, filesystem, embedded) is a caller concern;
/// the loader only awaits bytes and maps any failure to
/// [`LoadError::NotFound`](crate::error::LoadError::NotFound).
#[async_trait]
pub trait DefinitionSource: Send + Sync {
    /// Fetch the raw definition document.
    async fn fetch(&self) -> anyhow::Result<Vec<u8>>;

    /// Human-readable identifier for diagnostics.
    fn describe(&self) -> String;
}

/// A definition stored on the local filesystem.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DefinitionSource for FileSource {
    async fn fetch(&self) -> anyhow::Result<Vec<u8>> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// An in-memory definition, for embedded documents and tests.
pub struct BytesSource {
    bytes: Vec<u8>,
}

impl BytesSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl DefinitionSource for BytesSource {
    async fn fetch(&self) -> anyhow::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }

    fn describe(&self) -> String {
        format!("<{} bytes in memory>", self.bytes.len())
    }
}

// ---------------------------------------------------------------------------
// Observation sinks
// ---------------------------------------------------------------------------

/// Accessibility announcement sink.
///
/// Invoked at answer selection, completion, and restart. Fire-and-forget:
/// there is no return value, and implementations must not panic; a failure
/// here must never reach the session.
pub trait Announcer: Send + Sync {
    fn announce(&self, message: &str);
}

/// Event sink for usage telemetry.
///
/// Fire-and-forget, same contract as [`Announcer`].
pub trait TelemetrySink: Send + Sync {
    fn emit(&self, event: &str, payload: &serde_json::Value);
}

/// No-op announcer.
pub struct NoopAnnouncer;

impl Announcer for NoopAnnouncer {
    fn announce(&self, _: &str) {}
}

/// No-op telemetry sink.
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
    fn emit(&self, _: &str, _: &serde_json::Value) {}
}
