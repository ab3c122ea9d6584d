use anyhow::{anyhow, Result};
use std::fs;
use std::path::PathBuf;

pub struct AppPaths;

impl AppPaths {
    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow!("Cannot determine data directory"))?
            .join("roster-view");

        fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    /// Where saved roster snapshots live
    pub fn store_dir() -> Result<PathBuf> {
        let store_dir = Self::data_dir()?.join("state");
        fs::create_dir_all(&store_dir)?;
        Ok(store_dir)
    }
}
