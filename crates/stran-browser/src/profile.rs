//! Shared configuration for every content surface in a session.

/// A script installed into every page at document start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectedScript {
    pub name: String,
    pub source: String,
}

impl InjectedScript {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// Engine configuration plus the page-load script bundle.
///
/// Built once by the session and shared read-only by every tab.
#[derive(Debug)]
pub struct ContentProfile {
    name: String,
    scripts: Vec<InjectedScript>,
}

impl ContentProfile {
    pub fn new(name: impl Into<String>, scripts: Vec<InjectedScript>) -> Self {
        Self {
            name: name.into(),
            scripts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scripts(&self) -> &[InjectedScript] {
        &self.scripts
    }

    /// All scripts joined in install order.
    pub fn bundle(&self) -> String {
        self.scripts
            .iter()
            .map(|s| s.source.as_str())
            .collect::<Vec<_>>()
            .join("\n;\n")
    }
}
