//! Summarization gateway: accepts extracted PDF text over HTTP, asks the local
//! model server for study notes and answers with a uniform success/error body.

pub mod config;
pub mod error;
pub mod server;
