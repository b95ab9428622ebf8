pub mod archive;
pub mod config;
pub mod report;
pub mod scan;
pub mod target;
