// crates/lumacut-cli/src/helpers/mod.rs

pub mod png_io;
pub mod report;
