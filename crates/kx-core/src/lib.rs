//! Model discovery for Klyax project folders.
//!
//! A project keeps its CAD models under a `Models` folder. Parts are single
//! model files; assembly units are folders containing a self-named assembly
//! file. Images and transition files are tied to a model only by a shared
//! file-name prefix. This crate walks that layout into a typed tree and maps
//! identifiers such as `Klyax/Arm/Gripper` back to models.
//!
//! ```no_run
//! use kx_core::{ModelRegistry, ProjectConfig};
//!
//! let registry = ModelRegistry::open(ProjectConfig::load(".")?)?;
//! let unit = registry.get_assembly_unit("Klyax")?;
//! for model in &unit.entities {
//!     println!("{}", model.id());
//! }
//! # Ok::<(), kx_core::KxError>(())
//! ```

/// Assembly unit models.
pub mod assembly;
/// Project layout and naming conventions.
pub mod config;
/// Glob-mask search primitives.
pub mod conventions;
/// Error types used throughout the crate.
pub mod error;
/// Structured model identifiers.
pub mod identifier;
/// The model tree node and its shared fields.
pub mod model;
/// Part models.
pub mod part;
/// Identifier to model resolution.
pub mod registry;

#[cfg(test)]
mod test_support;

/// Re-export model types.
pub use assembly::AssemblyUnitModel;
/// Re-export configuration.
pub use config::ProjectConfig;
/// Re-export search primitives.
pub use conventions::{Masks, list_by_mask, search_by_mask, search_by_mask_recursive};
/// Re-export error types.
pub use error::{KxError, KxResult};
/// Re-export identifier type.
pub use identifier::Identifier;
/// Re-export model types.
pub use model::{Model, ModelInfo};
/// Re-export model types.
pub use part::PartModel;
/// Re-export the registry.
pub use registry::ModelRegistry;
