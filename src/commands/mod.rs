pub mod charts;
pub mod fetch;
pub mod scoring;
pub mod settings;
