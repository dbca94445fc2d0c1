use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use regionguard_core::error::{RegionGuardError, Result};

/// Region name → required group. `BTreeMap` keeps enumeration lexicographic.
type RuleMap = BTreeMap<String, String>;

/// One stored restriction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRule {
    pub region_name: String,
    pub required_group: String,
}

impl RegionRule {
    pub fn new(region_name: impl Into<String>, required_group: impl Into<String>) -> Self {
        Self { region_name: region_name.into(), required_group: required_group.into() }
    }
}

/// File-backed rule store.
///
/// `None` snapshot means the store never loaded successfully, which is
/// distinct from a loaded but empty mapping.
pub struct RegionPolicyStore {
    path: PathBuf,
    snapshot: RwLock<Option<Arc<RuleMap>>>,
    // serializes load/add so disk and snapshot change together
    write_lock: Mutex<()>,
}

impl RegionPolicyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            snapshot: RwLock::new(None),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.current().is_some()
    }

    /// Write an empty document if none exists. Returns true when a file was created.
    pub fn initialize_if_missing(&self) -> Result<bool> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.initialize_locked()
    }

    /// Read the document (creating it first if absent) and replace in-memory state.
    ///
    /// A malformed document leaves the current state untouched.
    pub fn load(&self) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        if self.initialize_locked()? {
            self.publish(RuleMap::new());
            return Ok(());
        }

        let map = self.read_document()?;
        tracing::info!(path = %self.path.display(), rules = map.len(), "region rules loaded");
        self.publish(map);
        Ok(())
    }

    /// Discard in-memory state and load again from disk.
    pub fn reload(&self) -> Result<()> {
        tracing::debug!(path = %self.path.display(), "reloading region rules");
        self.load()
    }

    /// Assign `required_group` to `region_name`, overwriting any previous rule.
    ///
    /// The document is written before the new mapping becomes visible; on a
    /// failed write the in-memory mapping is unchanged.
    pub fn add(&self, region_name: &str, required_group: &str) -> Result<()> {
        if region_name.trim().is_empty() {
            return Err(RegionGuardError::Validation("region name must not be empty".into()));
        }
        if required_group.trim().is_empty() {
            return Err(RegionGuardError::Validation("required group must not be empty".into()));
        }

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.current().ok_or(RegionGuardError::NotLoaded)?;

        let mut next = (*current).clone();
        let previous = next.insert(region_name.to_string(), required_group.to_string());

        self.write_document(&next)?;
        self.publish(next);

        tracing::info!(
            region = region_name,
            group = required_group,
            replaced = ?previous,
            "region rule stored"
        );
        Ok(())
    }

    /// Snapshot of all rules, ordered by region name.
    pub fn list(&self) -> Result<Vec<RegionRule>> {
        let map = self.current().ok_or(RegionGuardError::NotLoaded)?;
        Ok(map
            .iter()
            .map(|(region, group)| RegionRule::new(region.as_str(), group.as_str()))
            .collect())
    }

    /// Required group for one region, if restricted.
    pub fn required_group(&self, region_name: &str) -> Result<Option<String>> {
        let map = self.current().ok_or(RegionGuardError::NotLoaded)?;
        Ok(map.get(region_name).cloned())
    }

    pub fn len(&self) -> usize {
        self.current().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn current(&self) -> Option<Arc<RuleMap>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn publish(&self, map: RuleMap) {
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(map));
    }

    fn initialize_locked(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.write_document(&RuleMap::new())?;
        tracing::info!(path = %self.path.display(), "created empty region document");
        Ok(true)
    }

    fn read_document(&self) -> Result<RuleMap> {
        let raw = fs::read_to_string(&self.path).map_err(|e| self.persist_err(e))?;
        serde_json::from_str(&raw).map_err(|e| RegionGuardError::ConfigParse {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Pretty JSON written to a sibling temp file, then renamed over the target.
    fn write_document(&self, map: &RuleMap) -> Result<()> {
        let mut body = serde_json::to_string_pretty(map).map_err(|e| RegionGuardError::Persist {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        body.push('\n');

        let tmp = self.tmp_path();
        fs::write(&tmp, body.as_bytes()).map_err(|e| self.persist_err(e))?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(self.persist_err(e));
        }
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "regions.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn persist_err(&self, e: std::io::Error) -> RegionGuardError {
        let reason = match e.kind() {
            ErrorKind::NotFound => format!("not found: {e}"),
            ErrorKind::PermissionDenied => format!("permission denied: {e}"),
            _ => e.to_string(),
        };
        tracing::warn!(path = %self.path.display(), %reason, "region document io failed");
        RegionGuardError::Persist { path: self.path.display().to_string(), reason }
    }
}
