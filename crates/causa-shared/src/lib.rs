//! # causa-shared
//!
//! Domain model for the Causa lead marketplace: account and case records,
//! the role/status taxonomies, the pure access policy deciding what each
//! account may see and do, and the error types shared by every layer.
//!
//! This crate has no I/O. Persistence lives in `causa-store`, the HTTP
//! surface in `causa-server`; both depend on the types defined here.

pub mod constants;
pub mod policy;
pub mod types;

mod error;

pub use error::{AuthError, LifecycleError, PolicyError, ValidationError};
pub use types::*;
