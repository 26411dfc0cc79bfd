//! Resume and job-description extraction service.
//!
//! Documents go through OCR, then LLM-driven structured extraction. An LLM judge grades
//! each extraction against its source text and the workflow re-runs failed sources once.

pub mod batch;
pub mod config;
pub mod errors;
pub mod extraction;
pub mod judge;
pub mod llm_client;
pub mod ocr;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod workflow;
