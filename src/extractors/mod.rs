//! Request extractors: public request URL, tenant key and deployment environment.

pub mod request;
pub mod tenant;

pub use request::EdgeRequest;
pub use tenant::{Environment, TenantKey, ENVIRONMENT_HEADER};
