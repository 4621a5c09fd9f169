//! Chaos Mesh Invoker Library
//!
//! Translates tool-agnostic fault-injection requests into Chaos Mesh CRDs,
//! submits them against the cluster (attack) or removes them (recover), and
//! builds the scenario catalog describing the supported fault types, actions
//! and flags.

pub mod config;
pub mod error;
pub mod invoker;
pub mod scenario;
pub mod scene;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use invoker::command::{RequestCommand, ResponseCommand};
pub use invoker::dispatch::MeshInvoker;
pub use scenario::parser::MeshScenarioParser;
