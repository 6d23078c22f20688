pub mod dashboard;
pub mod metric;
pub mod project;
pub mod score;
