//! Outbound collaborators: upstream fetch and template rendering.

pub mod render;
pub mod upstream;

pub use render::{HandlebarsRenderer, TemplateRenderer};
pub use upstream::{HttpUpstream, Upstream, UpstreamResponse};
