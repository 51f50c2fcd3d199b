// src/backend/backend.rs
use std::fmt;
use std::sync::Arc;

/// An opaque backend address, usually `host:port`.
///
/// Cloning is cheap so registry snapshots can be handed out per selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Backend(Arc<str>);

impl Backend {
    pub fn new(addr: impl Into<Arc<str>>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Backend {
    fn from(addr: &str) -> Self {
        Self::new(addr)
    }
}

impl From<String> for Backend {
    fn from(addr: String) -> Self {
        Self::new(addr)
    }
}
