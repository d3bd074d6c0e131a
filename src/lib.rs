pub mod config;
pub mod course;
pub mod logging;
pub mod output;
pub mod scoring;
