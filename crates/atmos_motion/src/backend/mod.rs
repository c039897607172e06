//! # Backend Module
//!
//! The locomotion mappers never talk to an engine directly. Everything they
//! need from the host (collision-resolved movement, force integration,
//! animation parameters, camera orientation, cursor mode) goes through the
//! small traits in [`host`], injected into each controller when it is built.
//!
//! ## Organization
//!
//! - **Host**: The seam traits a host engine implements
//! - **Headless**: Self-contained implementations for tests, tools and the demo
//!
//! ## Design Principles
//!
//! - **Injection**: Controllers own their collaborators; no global lookups
//! - **Narrow**: Each trait carries only what a controller actually calls
//! - **No feedback loops**: Animation sinks are write-only

pub mod host;
pub mod headless;

// Re-export commonly used backend traits
pub use host::{
    AnimationSink, CameraRig, CursorMode, CursorService, ForceBody, MotionPrimitive, MoveOutcome,
};
