//! Parley Relay - Utterance Resolution Service
//!
//! This crate forwards short text utterances to a hosted NLU conversational
//! runtime, maps the reply shape onto a stable response envelope, and
//! best-effort persists resolved replies keyed by message id.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
