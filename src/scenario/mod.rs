//! Scenario catalog builder
//!
//! Joins the per-action flag descriptor documents with the category-mapping
//! document into the normalized catalog of supported scopes, targets,
//! actions and flags. Runs offline or at startup; request handling only
//! reads the result.

pub mod model;
pub mod parser;
pub mod source;

pub use model::{ActionSpec, FlagSpec, ModelSpec, ParamSet, PluginSpec, ScenarioOriginal};
pub use parser::{JoinStats, MeshScenarioParser};
pub use source::DescriptorSource;
