//! Caller-owned load-once cache for the gap catalog.
//!
//! The catalog is loaded on first use and reused until one of the source
//! files changes on disk (modification time differs from the one seen at
//! load), or until the owner calls `refresh` / `invalidate`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::catalog::GapCatalog;
use crate::catalog_loader::{load_gap_cells_file, load_skus_file};
use crate::config::ExplorerConfig;
use crate::error::LoadError;

struct Loaded {
    catalog: Arc<GapCatalog>,
    sku_modified: Option<SystemTime>,
    gap_modified: Option<SystemTime>,
}

pub struct CatalogCache {
    sku_path: PathBuf,
    gap_path: PathBuf,
    loaded: Option<Loaded>,
    loads: usize,
}

impl CatalogCache {
    pub fn new(sku_path: impl Into<PathBuf>, gap_path: impl Into<PathBuf>) -> Self {
        Self {
            sku_path: sku_path.into(),
            gap_path: gap_path.into(),
            loaded: None,
            loads: 0,
        }
    }

    pub fn from_config(config: &ExplorerConfig) -> Self {
        Self::new(&config.sku_path, &config.gap_path)
    }

    /// The cached catalog, loading or re-loading it if needed.
    pub fn get(&mut self) -> Result<Arc<GapCatalog>, LoadError> {
        if let Some(loaded) = &self.loaded {
            if !self.is_stale(loaded) {
                return Ok(Arc::clone(&loaded.catalog));
            }
            log::info!("source files changed, reloading gap catalog");
        }
        self.reload()
    }

    /// Force a reload from disk.
    pub fn refresh(&mut self) -> Result<Arc<GapCatalog>, LoadError> {
        self.reload()
    }

    /// Drop the cached catalog; the next `get` loads again.
    pub fn invalidate(&mut self) {
        self.loaded = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// Number of successful loads so far.
    pub fn load_count(&self) -> usize {
        self.loads
    }

    fn is_stale(&self, loaded: &Loaded) -> bool {
        modified(&self.sku_path) != loaded.sku_modified
            || modified(&self.gap_path) != loaded.gap_modified
    }

    fn reload(&mut self) -> Result<Arc<GapCatalog>, LoadError> {
        // A failed reload must not leave the previous catalog looking current.
        self.loaded = None;

        let sku_modified = modified(&self.sku_path);
        let gap_modified = modified(&self.gap_path);
        let skus = load_skus_file(&self.sku_path)?;
        let cells = load_gap_cells_file(&self.gap_path)?;
        let catalog = Arc::new(GapCatalog::new(&skus, cells)?);

        self.loads += 1;
        log::info!(
            "gap catalog loaded: {} cells across {} categories",
            catalog.len(),
            catalog.categories().len()
        );
        self.loaded = Some(Loaded {
            catalog: Arc::clone(&catalog),
            sku_modified,
            gap_modified,
        });
        Ok(catalog)
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const SKUS: &str = "category,sub_category,Claims\nSnacks,Chips,baked\n";
    const CELLS: &str = "category,sub_category,Price_Tier,Gap_Score\nSnacks,Chips,200+,0.9\n";

    fn write_inputs(dir: &Path) -> (PathBuf, PathBuf) {
        let skus = dir.join("skus.csv");
        let cells = dir.join("cells.csv");
        fs::write(&skus, SKUS).unwrap();
        fs::write(&cells, CELLS).unwrap();
        (skus, cells)
    }

    fn touch(path: &Path, offset_secs: u64) {
        let file = fs::OpenOptions::new().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(offset_secs))
            .unwrap();
    }

    #[test]
    fn second_get_reuses_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let (skus, cells) = write_inputs(dir.path());
        let mut cache = CatalogCache::new(skus, cells);

        let first = cache.get().unwrap();
        let second = cache.get().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.load_count(), 1);
        assert_eq!(first.cells()[0].claim.as_str(), Some("baked"));
    }

    #[test]
    fn modified_file_triggers_reload() {
        let dir = tempfile::tempdir().unwrap();
        let (skus, cells) = write_inputs(dir.path());
        let mut cache = CatalogCache::new(skus, &cells);
        cache.get().unwrap();

        fs::write(
            &cells,
            "category,sub_category,Price_Tier,Gap_Score\nDairy,Curd,200+,0.8\n",
        )
        .unwrap();
        touch(&cells, 60);

        let catalog = cache.get().unwrap();
        assert_eq!(cache.load_count(), 2);
        assert_eq!(catalog.categories(), vec!["Dairy"]);
    }

    #[test]
    fn refresh_and_invalidate() {
        let dir = tempfile::tempdir().unwrap();
        let (skus, cells) = write_inputs(dir.path());
        let mut cache = CatalogCache::new(skus, cells);

        cache.get().unwrap();
        cache.refresh().unwrap();
        assert_eq!(cache.load_count(), 2);

        cache.invalidate();
        assert!(!cache.is_loaded());
        cache.get().unwrap();
        assert_eq!(cache.load_count(), 3);
    }

    #[test]
    fn failed_reload_leaves_nothing_cached() {
        let dir = tempfile::tempdir().unwrap();
        let (skus, cells) = write_inputs(dir.path());
        let mut cache = CatalogCache::new(skus, &cells);
        cache.get().unwrap();

        fs::write(&cells, "category,sub_category\nSnacks,Chips\n").unwrap();
        let err = cache.refresh().unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { .. }));
        assert!(!cache.is_loaded());
    }

    #[test]
    fn missing_files_surface_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = CatalogCache::new(dir.path().join("a.csv"), dir.path().join("b.csv"));
        assert!(matches!(cache.get(), Err(LoadError::Open { .. })));
        assert!(!cache.is_loaded());
    }
}
