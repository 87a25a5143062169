//! Router assembly.

pub mod common;
pub mod edge;

pub use common::common_routes;
pub use edge::{edge_routes, router};
