use crate::error::{ErrorKind, Result};
use crate::{Csv, Json, Markdown, Writer, Yaml};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Output formats available to one run, keyed by lower-case name.
#[derive(Clone, Default)]
pub struct Registry {
    writers: BTreeMap<String, Arc<dyn Writer>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON, CSV, Markdown and YAML, with their usual aliases.
    pub fn standard() -> Self {
        let markdown: Arc<dyn Writer> = Arc::new(Markdown);
        let yaml: Arc<dyn Writer> = Arc::new(Yaml);
        Self::new()
            .with("json", Arc::new(Json))
            .with("csv", Arc::new(Csv))
            .with("markdown", markdown.clone())
            .with("md", markdown)
            .with("yaml", yaml.clone())
            .with("yml", yaml)
    }

    /// Register (or replace) a writer under `name`.
    pub fn with(mut self, name: impl AsRef<str>, writer: Arc<dyn Writer>) -> Self {
        self.writers.insert(name.as_ref().to_lowercase(), writer);
        self
    }

    /// Look up a writer by name, case-insensitively.
    ///
    /// # Errors
    ///
    /// [`UnknownFormat`](ErrorKind::UnknownFormat) if nothing is registered
    /// under `name`.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Writer>> {
        match self.writers.get(&name.trim().to_lowercase()) {
            Some(writer) => Ok(writer.clone()),
            None => exn::bail!(ErrorKind::UnknownFormat(name.to_string())),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.writers.contains_key(&name.trim().to_lowercase())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.writers.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
