// crates/lumacut-core/src/helpers/mod.rs
//
// Small pure utilities shared across core modules and the CLI.

pub mod color;
pub mod time;
