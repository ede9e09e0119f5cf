//! Client side of the study-notes pipeline: PDF text extraction, the gateway
//! call, markup rendering and the submission state machine tying them together.

pub mod error;
pub mod extract;
pub mod flow;
pub mod gateway;
pub mod render;
