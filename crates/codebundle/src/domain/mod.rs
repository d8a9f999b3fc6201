//! Core types shared by every stage of the pipeline.

pub mod errors;
pub mod model;
