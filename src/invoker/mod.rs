//! Fault-injection adapter for Chaos Mesh
//!
//! Turns a flat argument bag plus a scene code into a typed chaos CRD,
//! submits it for creation (attack) or removal (recover), and reduces the
//! remote call into a single `ResponseCommand`.

pub mod body;
pub mod client;
pub mod command;
pub mod crd;
pub mod dispatch;
pub mod encode;

pub use body::build_chaos_body;
pub use client::MeshClient;
pub use command::{RequestCommand, ResponseCommand};
pub use crd::{ChaosPodSelector, ChaosResource, ChaosSpec, FaultKind};
pub use dispatch::{MeshInvoker, Phase};
