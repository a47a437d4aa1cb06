pub mod service;

pub use service::{MonitoringData, MonitoringService};
