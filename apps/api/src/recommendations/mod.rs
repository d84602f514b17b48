// Resource recommendations: demo catalog or live advisor + places lookup.
// All provider calls go through llm_client / places, never directly from here.

pub mod handlers;
pub mod service;

pub use service::{find_resources, OutputSource, RecommendationOutcome};
