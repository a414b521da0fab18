//! Student records backend library.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// OpenAPI surface used by Swagger UI.
pub use doc::ApiDoc;
pub use middleware::Trace;
