//! Orchestrator module
//!
//! The request-orchestration pipeline: model generation, bounding-box
//! filtering, geocode enrichment, and the nearby/re-enrichment merge. The
//! upstream clients live here too; handlers in `api` stay thin.

pub mod bounding_box;
pub mod defaults;
pub mod gemini;
pub mod maps;
pub mod pipeline;
pub mod types;

pub use defaults::PipelineDefaults;
pub use pipeline::{GenerateOutcome, PlaceOrchestrator};
