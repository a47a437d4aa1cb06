//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse` implementation for `AppError` and the
//! [`ApiErrorResponse`] body type live in `nfsdash-core` (alongside
//! `AppError` itself) so the trait impl satisfies Rust's orphan rule.
//! They are re-exported here to preserve the `nfsdash_api::error` path.

pub use nfsdash_core::error::ApiErrorResponse;
