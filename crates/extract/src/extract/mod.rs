//! Loader-specific descriptor extraction.
//!
//! Each supported loader family ships a descriptor at a well-known entry name
//! inside the archive. An [`Extractor`] recognises its family by the presence
//! of that entry and turns the descriptor into a [`Record`]. The [`Chain`]
//! consults extractors in a fixed priority order.

mod classify;
mod context;
mod fabric;
mod forge;
mod json;
mod legacy;
mod manifest;
mod quilt;

pub use self::classify::{Classification, Signal, Signals, classify};
pub use self::context::Context;
use self::manifest::Manifest;
use crate::consts::{
    FABRIC_DESCRIPTOR, FORGE_TOML_DESCRIPTOR, MCMOD_INFO_DESCRIPTOR, NEOFORGE_TOML_DESCRIPTOR, QUILT_DESCRIPTOR,
};
use crate::error::{ErrorKind, Result};
use crate::models::{Loader, Record};
use modlist_archive::ArchiveHandle;
use std::fmt::{Display, Formatter, Result as FmtResult};
use tracing::{debug, instrument};

/// One descriptor family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extractor {
    /// `fabric.mod.json`
    Fabric,
    /// `quilt.mod.json`
    Quilt,
    /// `META-INF/neoforge.mods.toml` or `META-INF/mods.toml`, classified as
    /// Forge or NeoForge.
    ModsToml,
    /// `mcmod.info`
    McModInfo,
}

impl Extractor {
    /// Every extractor, in the order they must be consulted. An archive
    /// carrying several descriptors (multi-loader builds) is identified by
    /// the first family listed here.
    pub const PRIORITY: [Extractor; 4] = [Extractor::Fabric, Extractor::Quilt, Extractor::ModsToml, Extractor::McModInfo];

    pub fn name(&self) -> &'static str {
        match self {
            Extractor::Fabric => "Fabric",
            Extractor::Quilt => "Quilt",
            Extractor::ModsToml => "Forge/NeoForge TOML",
            Extractor::McModInfo => "Legacy Forge",
        }
    }

    /// Descriptor entry names this extractor reads, preferred first.
    pub fn descriptors(&self) -> &'static [&'static str] {
        match self {
            Extractor::Fabric => &[FABRIC_DESCRIPTOR],
            Extractor::Quilt => &[QUILT_DESCRIPTOR],
            Extractor::ModsToml => &[NEOFORGE_TOML_DESCRIPTOR, FORGE_TOML_DESCRIPTOR],
            Extractor::McModInfo => &[MCMOD_INFO_DESCRIPTOR],
        }
    }

    /// Cheap check against the archive's entry listing; nothing is read.
    pub fn can_handle(&self, handle: &ArchiveHandle) -> bool {
        handle.first_entry(self.descriptors()).is_some()
    }

    /// Read and parse this extractor's descriptor.
    ///
    /// # Errors
    ///
    /// - [`NoApplicableExtractor`](ErrorKind::NoApplicableExtractor) if the
    ///   archive has none of [`descriptors`](Self::descriptors).
    /// - [`Archive`](ErrorKind::Archive) if the descriptor can't be read.
    /// - [`InvalidDescriptor`](ErrorKind::InvalidDescriptor),
    ///   [`MissingField`](ErrorKind::MissingField) or
    ///   [`ParseError`](ErrorKind::ParseError) if it can't be parsed.
    #[instrument(skip_all, fields(extractor = self.name(), file_name = %context.file_name))]
    pub fn extract(&self, handle: &mut ArchiveHandle, context: &Context) -> Result<Record> {
        let Some(descriptor) = handle.first_entry(self.descriptors()) else {
            exn::bail!(ErrorKind::NoApplicableExtractor);
        };
        let text = handle.read_text(descriptor).map_err(ErrorKind::archive)?;
        let record = match self {
            Extractor::Fabric => fabric::extract(&text, context)?,
            Extractor::Quilt => quilt::extract(&text, context)?,
            Extractor::ModsToml => {
                let manifest = Manifest::read(handle);
                forge::extract(descriptor, &text, manifest.as_ref(), context)?
            },
            Extractor::McModInfo => legacy::extract(&text, context)?,
        };
        debug!(identifier = %record.identifier, version = %record.version, loader = %record.loader, "extracted descriptor");
        Ok(record)
    }
}

impl Display for Extractor {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

/// An ordered list of extractors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    extractors: Vec<Extractor>,
}

impl Default for Chain {
    fn default() -> Self {
        Self::new(Extractor::PRIORITY)
    }
}

impl Chain {
    pub fn new(extractors: impl IntoIterator<Item = Extractor>) -> Self {
        Self {
            extractors: extractors.into_iter().collect(),
        }
    }

    pub fn extractors(&self) -> &[Extractor] {
        &self.extractors
    }

    /// The first extractor that can handle the archive.
    pub fn select(&self, handle: &ArchiveHandle) -> Option<Extractor> {
        self.extractors.iter().copied().find(|extractor| extractor.can_handle(handle))
    }

    /// Identify an archive with the first extractor that recognises it. If
    /// that extractor fails, the failure is returned as-is; later extractors
    /// are never tried.
    ///
    /// # Errors
    ///
    /// - [`NoApplicableExtractor`](ErrorKind::NoApplicableExtractor) if no
    ///   extractor recognises the archive.
    /// - Anything [`Extractor::extract`] returns.
    pub fn resolve(&self, handle: &mut ArchiveHandle, context: &Context) -> Result<Record> {
        let Some(extractor) = self.select(handle) else {
            debug!(file_name = %context.file_name, "no extractor recognises archive");
            exn::bail!(ErrorKind::NoApplicableExtractor);
        };
        debug!(file_name = %context.file_name, %extractor, "selected extractor");
        extractor.extract(handle, context)
    }
}

/// Best-effort [`Loader::Unknown`] record for an archive no extractor
/// recognised, using the manifest's title and version where present and the
/// archive's own name otherwise.
pub fn fallback(handle: &mut ArchiveHandle, context: &Context) -> Record {
    let manifest = Manifest::read(handle).unwrap_or_default();
    let mut record = context.record(Loader::Unknown, String::new(), manifest.version().unwrap_or_default().to_string());
    if let Some(title) = manifest.title() {
        record.display_name = title.to_string();
    }
    record
}
