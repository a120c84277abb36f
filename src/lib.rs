//! AI-assisted rooftop solar analyzer.
//!
//! One analysis run is a single blocking flow: a rooftop image goes to a
//! vision-capable LLM via an OpenAI-compatible chat-completions API, the
//! returned JSON is parsed into a [`analysis::RooftopAnalysis`], and three
//! pure calculators derive sizing, annual production, and payback from it.
//! Nothing is persisted between runs.

pub mod analysis;
pub mod config;
pub mod server;
pub mod state;

pub use analysis::{AnalysisError, AnalysisOutcome};
pub use config::Config;
