//! Application layer for Vocalis: the webhook binding and the bundled demo
//! skill. The `vocalis` binary in `main.rs` builds its CLI on top of these.

pub mod demo;
pub mod http;
