//! Admin services: user, role, and settings CRUD.

pub mod roles;
pub mod settings;
pub mod users;

pub use roles::RoleService;
pub use settings::SettingsService;
pub use users::AdminUserService;
