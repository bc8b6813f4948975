//! Forge versus NeoForge classification.
//!
//! Both loaders share the `mods.toml` descriptor shape, so which one an
//! archive targets has to be inferred from whatever signals it carries. The
//! signals are checked strongest first; the first one that fires decides.

use crate::consts::{FORGE_ID, NEOFORGE_ID, NEOFORGE_TOML_DESCRIPTOR};
use crate::models::Loader;
use std::fmt::{Display, Formatter, Result as FmtResult};
use tracing::debug;

/// Everything the classification looks at, lifted out of the descriptor so
/// that the decision is a pure function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signals<'a> {
    /// Name of the descriptor entry that was read.
    pub descriptor: &'a str,
    /// Top-level `modLoader` field.
    pub mod_loader: Option<&'a str>,
    /// Every `modId` declared under `[[dependencies.*]]`, mandatory or not.
    pub dependency_ids: Vec<&'a str>,
    /// On-disk archive file name.
    pub file_name: &'a str,
    /// Top-level `loaderVersion` field.
    pub loader_version: Option<&'a str>,
}

/// The signal that classified an archive as NeoForge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The descriptor entry is `neoforge.mods.toml`.
    DescriptorName,
    /// `modLoader` names NeoForge.
    DeclaredLoader,
    /// A dependency targets NeoForge.
    Dependency,
    /// The archive file name mentions NeoForge.
    FileName,
    /// `loaderVersion` mentions NeoForge.
    LoaderVersion,
}

impl Signal {
    /// File name and loader version are circumstantial; the rest are
    /// declared by the descriptor.
    pub fn is_weak(&self) -> bool {
        matches!(self, Signal::FileName | Signal::LoaderVersion)
    }
}

impl Display for Signal {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Signal::DescriptorName => "descriptor name",
            Signal::DeclaredLoader => "declared loader",
            Signal::Dependency => "dependency",
            Signal::FileName => "file name",
            Signal::LoaderVersion => "loader version",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub loader: Loader,
    /// `None` when no signal fired and the archive defaulted to Forge.
    pub signal: Option<Signal>,
}

/// Decide between [`Loader::Forge`] and [`Loader::NeoForge`].
pub fn classify(signals: &Signals<'_>) -> Classification {
    let signal = fired(signals);
    let classification = Classification {
        loader: if signal.is_some() { Loader::NeoForge } else { Loader::Forge },
        signal,
    };
    report_discrepancy(signals, &classification);
    classification
}

fn fired(signals: &Signals<'_>) -> Option<Signal> {
    let descriptor_name = signals.descriptor.rsplit('/').next().unwrap_or(signals.descriptor);
    let neoforge_descriptor = NEOFORGE_TOML_DESCRIPTOR.rsplit('/').next().unwrap_or(NEOFORGE_TOML_DESCRIPTOR);
    if descriptor_name.eq_ignore_ascii_case(neoforge_descriptor) {
        return Some(Signal::DescriptorName);
    }
    if signals.mod_loader.is_some_and(|loader| loader.trim().eq_ignore_ascii_case(NEOFORGE_ID)) {
        return Some(Signal::DeclaredLoader);
    }
    if signals.dependency_ids.iter().any(|id| id.trim().eq_ignore_ascii_case(NEOFORGE_ID)) {
        return Some(Signal::Dependency);
    }
    if contains_neoforge(signals.file_name) {
        return Some(Signal::FileName);
    }
    if signals.loader_version.is_some_and(contains_neoforge) {
        return Some(Signal::LoaderVersion);
    }
    None
}

fn contains_neoforge(value: &str) -> bool {
    value.to_ascii_lowercase().contains(NEOFORGE_ID)
}

/// The classification always wins; disagreements with what the descriptor
/// declares are only worth a debug line.
fn report_discrepancy(signals: &Signals<'_>, classification: &Classification) {
    match classification.signal {
        None if signals.mod_loader.is_some_and(contains_neoforge) => debug!(
            file_name = signals.file_name,
            mod_loader = signals.mod_loader,
            "classified as Forge although modLoader mentions NeoForge"
        ),
        Some(signal) if signal.is_weak() && signals.dependency_ids.iter().any(|id| id.eq_ignore_ascii_case(FORGE_ID)) => {
            debug!(
                file_name = signals.file_name,
                %signal,
                "classified as NeoForge by a weak signal although the mod depends on Forge"
            )
        },
        _ => {},
    }
}
