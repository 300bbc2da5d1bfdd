pub mod config;
pub mod correlate;
pub mod info;
pub mod pipeline;
