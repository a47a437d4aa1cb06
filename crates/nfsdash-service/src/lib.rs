//! # nfsdash-service
//!
//! Business logic services for the NFS Dashboard: authentication flows,
//! sandboxed file operations, admin CRUD, audit recording, and host
//! monitoring.

pub mod admin;
pub mod audit;
pub mod auth;
pub mod context;
pub mod file;
pub mod monitoring;

pub use context::RequestContext;
