//! # nfsdash-auth
//!
//! Authentication and authorization primitives for the NFS Dashboard.
//!
//! ## Modules
//!
//! - `jwt` — stateless JWT creation and validation
//! - `password` — Argon2id password hashing
//! - `totp` — TOTP secret generation and code verification
//! - `rbac` — role-based access control decisions

pub mod jwt;
pub mod password;
pub mod rbac;
pub mod totp;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenKind};
pub use password::PasswordHasher;
pub use rbac::Authorizer;
pub use totp::{TotpEnrollment, TotpVerifier};
