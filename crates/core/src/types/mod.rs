//! Shared types for the configuration engine.

pub mod breakpoint;
pub mod id;
pub mod template;

pub use breakpoint::Breakpoint;
pub use id::TenantId;
pub use template::TemplateId;
