//! Contract bindings and compiled artifacts used by the deployment binaries.
pub mod alloy;
pub mod artifact;

pub use artifact::{Artifact, ContractFactory};
