use std::{
    io,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;

use crate::domain::{status, Policy};

/// Whether [`Store::update`] re-derives the policy's status before saving.
///
/// `Skip` exists for exactly one caller: restoring an archived policy, which
/// sets `PendingRequirements` directly and must not be re-archived by
/// derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derive {
    Apply,
    Skip,
}

/// The underlying storage failed.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("failed to access the policy file: {0}")]
    Io(#[from] io::Error),
    #[error("the policy file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// An imported snapshot was rejected or could not be stored.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("the file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("the top-level JSON value is not an array of policies")]
    NotAnArray,
    #[error("the first entry is missing required fields (id, clientName)")]
    MissingFields,
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// A targeted mutation could not be applied.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("policy {0} not found")]
    NotFound(String),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// The policy collection, stored as a single JSON file.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// A store backed by the given file. The file is created on first save.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The file this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the entire collection. A missing file is an empty collection.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the file exists but cannot be read
    /// or parsed.
    pub fn load_all(&self) -> Result<Vec<Policy>, PersistenceError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite the entire collection.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the file cannot be written.
    pub fn save_all(&self, policies: &[Policy]) -> Result<(), PersistenceError> {
        let json = serde_json::to_vec_pretty(policies)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Append a new policy, deriving its status first.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the collection cannot be read or
    /// written.
    pub fn append(&self, policy: Policy) -> Result<Policy, PersistenceError> {
        let policy = status::derive(policy);
        let mut policies = self.load_all()?;
        policies.push(policy.clone());
        self.save_all(&policies)?;
        tracing::info!("Added policy {} for {}", policy.id, policy.client_name);
        Ok(policy)
    }

    /// Replace the stored policy with the same id.
    ///
    /// Status is re-derived unless the caller passes [`Derive::Skip`].
    ///
    /// # Errors
    ///
    /// Returns [`UpdateError::NotFound`] if no stored policy has this id,
    /// or an [`UpdateError::Persistence`] on storage failure.
    pub fn update(&self, policy: Policy, derive: Derive) -> Result<Policy, UpdateError> {
        let policy = match derive {
            Derive::Apply => status::derive(policy),
            Derive::Skip => policy,
        };

        let mut policies = self.load_all()?;
        let Some(slot) = policies.iter_mut().find(|p| p.id == policy.id) else {
            return Err(UpdateError::NotFound(policy.id));
        };
        *slot = policy.clone();
        self.save_all(&policies)?;
        Ok(policy)
    }

    /// Permanently remove a policy by id.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateError::NotFound`] if no stored policy has this id,
    /// or an [`UpdateError::Persistence`] on storage failure.
    pub fn remove(&self, id: &str) -> Result<(), UpdateError> {
        let mut policies = self.load_all()?;
        let before = policies.len();
        policies.retain(|p| p.id != id);
        if policies.len() == before {
            return Err(UpdateError::NotFound(id.to_string()));
        }
        self.save_all(&policies)?;
        tracing::info!("Deleted policy {id}");
        Ok(())
    }

    /// Write a dated backup of the collection into `dir`.
    ///
    /// The file is named `new_business_tracker_backup_<ISO-date>.json`.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the collection cannot be read or
    /// the backup cannot be written.
    pub fn export_snapshot(&self, dir: &Path, today: NaiveDate) -> Result<PathBuf, PersistenceError> {
        let policies = self.load_all()?;
        let target = dir.join(format!(
            "new_business_tracker_backup_{}.json",
            today.format("%Y-%m-%d")
        ));
        let json = serde_json::to_vec_pretty(&policies)?;
        std::fs::write(&target, json)?;
        Ok(target)
    }

    /// Replace the entire collection with an exported snapshot.
    ///
    /// The payload must be a JSON array; when non-empty, its first element
    /// must carry the `id` and `clientName` keys. On any failure the stored
    /// collection is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an [`ImportError`] describing why the payload was rejected or
    /// why it could not be stored.
    pub fn import_snapshot(&self, bytes: &[u8]) -> Result<usize, ImportError> {
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        let Some(entries) = value.as_array() else {
            return Err(ImportError::NotAnArray);
        };
        if let Some(first) = entries.first() {
            let has_required_keys =
                first.get("id").is_some() && first.get("clientName").is_some();
            if !has_required_keys {
                return Err(ImportError::MissingFields);
            }
        }

        let policies: Vec<Policy> = serde_json::from_value(value)?;
        self.save_all(&policies).map_err(ImportError::Persistence)?;
        tracing::info!("Imported {} policies", policies.len());
        Ok(policies.len())
    }
}
