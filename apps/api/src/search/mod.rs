// Candidate search: prompt assembly, provider call, CSV parsing, rendering, export.
// All provider calls go through llm_client.

pub mod cleanup;
pub mod export;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod prompts;
pub mod render;
pub mod service;
