//! HTTP request handlers, one module per resource.

pub mod funding;
pub mod link;
pub mod project;
pub mod task;
pub mod template;
