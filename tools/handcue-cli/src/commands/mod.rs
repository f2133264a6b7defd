pub mod config;
pub mod replay;
pub mod synth;
pub mod validate;
