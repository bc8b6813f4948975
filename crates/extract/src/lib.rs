//! Identification of Minecraft mod archives.
//!
//! A mod archive is identified by the descriptor its loader requires:
//!
//! | Loader            | Descriptor                                          |
//! |-------------------|-----------------------------------------------------|
//! | Fabric            | `fabric.mod.json`                                   |
//! | Quilt             | `quilt.mod.json`                                    |
//! | Forge / NeoForge  | `META-INF/neoforge.mods.toml`, `META-INF/mods.toml` |
//! | Forge (legacy)    | `mcmod.info`                                        |
//!
//! Forge and NeoForge share a descriptor shape, so [`classify`] decides
//! between them from the signals the descriptor and archive carry.

mod consts;
pub mod error;
mod extract;
pub mod models;
mod platform;

use modlist_archive::ArchiveHandle;
use tracing::instrument;

pub use crate::consts::UNKNOWN_VERSION;
use crate::error::Result;
pub use crate::extract::{Chain, Classification, Context, Extractor, Signal, Signals, classify, fallback};
use crate::models::Record;
pub use crate::platform::platform_versions;

/// Easy, top-level entrypoint for identifying an open archive with the
/// default extractor [`Chain`].
///
/// # Errors
///
/// See [`Chain::resolve`].
#[instrument(skip_all, fields(path = %handle.path().display()))]
pub fn extract(handle: &mut ArchiveHandle) -> Result<Record> {
    let context = Context::from_handle(handle);
    Chain::default().resolve(handle, &context)
}
