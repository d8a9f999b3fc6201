//! Application layer: the bundling pipeline and the response-file workflow.

pub mod bundle;
pub mod order;
pub mod response;
pub mod scan;
pub mod validate;
