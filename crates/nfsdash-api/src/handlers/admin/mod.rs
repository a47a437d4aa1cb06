//! Admin handlers, all guarded by an `admin` permission grant.

pub mod audit;
pub mod roles;
pub mod settings;
pub mod users;
