//! Host monitoring snapshot built from sysinfo.

use serde::{Deserialize, Serialize};
use sysinfo::{Disks, System};

use nfsdash_core::AppResult;

use crate::file::FileService;

/// Load averages over 1, 5, and 15 minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadAverageData {
    pub one: f64,
    pub five: f64,
    pub fifteen: f64,
}

/// Host memory usage in bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryData {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub available: u64,
}

/// One mounted filesystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiskData {
    pub name: String,
    pub file_system: String,
    pub total: u64,
    pub available: u64,
    pub mount_point: String,
}

/// Recursive size of one top-level sandbox directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderUsage {
    pub folder: String,
    pub bytes: u64,
}

/// A point-in-time snapshot of host and sandbox state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringData {
    pub status: String,
    pub uptime_seconds: u64,
    pub load_average: LoadAverageData,
    pub cpu_cores: usize,
    pub memory: MemoryData,
    pub disks: Vec<DiskData>,
    pub folder_usages: Vec<FolderUsage>,
}

/// Gathers host metrics and sandbox usage for the monitoring endpoint.
#[derive(Debug, Clone)]
pub struct MonitoringService {
    sandbox: FileService,
}

impl MonitoringService {
    /// Create a monitoring service over the given sandbox.
    pub fn new(sandbox: FileService) -> Self {
        Self { sandbox }
    }

    /// Collect a fresh snapshot.
    ///
    /// Metric collection is synchronous and cheap; the folder usage walk is
    /// the only part that touches the (async) filesystem.
    pub async fn snapshot(&self) -> AppResult<MonitoringData> {
        let mut sys = System::new_all();
        sys.refresh_all();

        let load = System::load_average();
        let memory = MemoryData {
            total: sys.total_memory(),
            used: sys.used_memory(),
            free: sys.free_memory(),
            available: sys.available_memory(),
        };

        let disks = Disks::new_with_refreshed_list()
            .iter()
            .map(|disk| DiskData {
                name: disk.name().to_string_lossy().to_string(),
                file_system: disk.file_system().to_string_lossy().to_string(),
                total: disk.total_space(),
                available: disk.available_space(),
                mount_point: disk.mount_point().to_string_lossy().to_string(),
            })
            .collect();

        let folder_usages = self
            .sandbox
            .top_level_usages()
            .await?
            .into_iter()
            .map(|(folder, bytes)| FolderUsage { folder, bytes })
            .collect();

        Ok(MonitoringData {
            status: "ok".to_string(),
            uptime_seconds: System::uptime(),
            load_average: LoadAverageData {
                one: load.one,
                five: load.five,
                fifteen: load.fifteen,
            },
            cpu_cores: sys.cpus().len(),
            memory,
            disks,
            folder_usages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_snapshot_reports_sandbox_usage() {
        let dir = tempfile::tempdir().unwrap();
        let sandbox = FileService::new(dir.path().to_str().unwrap()).await.unwrap();
        sandbox.create_folder("/", "logs").await.unwrap();

        let service = MonitoringService::new(sandbox);
        let data = service.snapshot().await.unwrap();

        assert_eq!(data.status, "ok");
        assert!(data.cpu_cores > 0);
        assert!(data.memory.total > 0);
        assert_eq!(data.folder_usages.len(), 1);
        assert_eq!(data.folder_usages[0].folder, "logs");
    }
}
