//! Tools the analysis agents expose to the model.

pub mod web;

pub use web::WebSearchTool;
