//! Route handlers.

pub mod skill;
