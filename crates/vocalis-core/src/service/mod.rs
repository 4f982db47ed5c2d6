//! Ports implemented by the infrastructure layer.

pub mod fs;
