//! CPU compute backend using Rayon
//!
//! This is the backend that always works. It uses Rayon to spread one batch
//! across CPU cores. When called from inside an existing Rayon pool the
//! batch runs on that pool's threads.

use crate::hash::hash_ip;
use crate::{Backend, ComputeEngine, ComputeError, DeviceInfo};
use rayon::prelude::*;

/// CPU-based compute engine using Rayon
pub struct CpuEngine {
    device_info: DeviceInfo,
}

impl CpuEngine {
    pub fn new() -> Self {
        let num_cpus = num_cpus::get() as u32;

        Self {
            device_info: DeviceInfo {
                name: format!("CPU ({} cores)", num_cpus),
                backend: Backend::Cpu,
                compute_units: num_cpus,
            },
        }
    }
}

impl Default for CpuEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ComputeEngine for CpuEngine {
    fn backend(&self) -> Backend {
        Backend::Cpu
    }

    fn device_info(&self) -> &DeviceInfo {
        &self.device_info
    }

    fn batch_hash_ip(&self, start: u32, end: u32, seed: u32) -> Result<Vec<u32>, ComputeError> {
        if start > end {
            return Err(ComputeError::InvalidInput(format!(
                "batch start {} is after end {}",
                start, end
            )));
        }

        let hashes: Vec<u32> = (start..=end)
            .into_par_iter()
            .map(|ip| hash_ip(ip, seed))
            .collect();

        Ok(hashes)
    }
}
