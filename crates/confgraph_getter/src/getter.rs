//! The fetcher contract and its caching implementation.

use crate::error::{DownloadError, GetterError};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Materializes a module source into a local directory.
pub trait Getter: Send + Sync {
    /// Fetches `source` into a slot under `dest_dir` and returns the slot.
    ///
    /// A slot that already exists is reused unless `force_refresh` is set.
    ///
    /// # Errors
    ///
    /// Returns a [`GetterError`] if the cache cannot be inspected or the
    /// download fails.
    fn get(&self, source: &str, dest_dir: &Path, force_refresh: bool)
    -> Result<PathBuf, GetterError>;
}

/// A download client: copies `source` into `dest`, resolving relative
/// sources against `working_dir`.
pub trait Download: Send + Sync + 'static {
    /// Performs the download.
    ///
    /// # Errors
    ///
    /// Returns the client's own error on failure.
    fn download(&self, source: &str, dest: &Path, working_dir: &Path)
    -> Result<(), DownloadError>;
}

impl<F> Download for F
where
    F: Fn(&str, &Path, &Path) -> Result<(), DownloadError> + Send + Sync + 'static,
{
    fn download(
        &self,
        source: &str,
        dest: &Path,
        working_dir: &Path,
    ) -> Result<(), DownloadError> {
        self(source, dest, working_dir)
    }
}

/// Returns the cache slot name for a source reference.
///
/// Path separators, colons and the query marker become underscores, so the
/// same parameterized reference always maps to the same slot.
///
/// ```
/// use confgraph_getter::cache_slot_name;
///
/// assert_eq!(
///     cache_slot_name("github.com/org/repo?ref=abc"),
///     "github.com_org_repo_ref=abc"
/// );
/// ```
#[must_use]
pub fn cache_slot_name(source: &str) -> String {
    source.replace(['/', ':', '?'], "_")
}

/// [`Getter`] that caches downloads by source reference.
#[derive(Clone)]
pub struct ModuleGetter {
    client: Arc<dyn Download>,
    working_dir: Option<PathBuf>,
}

impl core::fmt::Debug for ModuleGetter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ModuleGetter")
            .field("working_dir", &self.working_dir)
            .finish_non_exhaustive()
    }
}

impl ModuleGetter {
    /// Creates a getter around a download client.
    pub fn new(client: impl Download) -> Self {
        Self {
            client: Arc::new(client),
            working_dir: None,
        }
    }

    /// Resolves relative sources against `dir` instead of the process
    /// working directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    fn working_dir(&self) -> Result<PathBuf, GetterError> {
        match &self.working_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().map_err(|err| GetterError::io(".", err)),
        }
    }
}

impl Getter for ModuleGetter {
    fn get(
        &self,
        source: &str,
        dest_dir: &Path,
        force_refresh: bool,
    ) -> Result<PathBuf, GetterError> {
        let slot = dest_dir.join(cache_slot_name(source));

        if !force_refresh && slot.try_exists().map_err(|err| GetterError::io(&slot, err))? {
            tracing::debug!(source, slot = %slot.display(), "module already cached");
            return Ok(slot);
        }

        let working_dir = self.working_dir()?;
        tracing::info!(source, slot = %slot.display(), "fetching module");

        self.client
            .download(source, &slot, &working_dir)
            .map_err(|err| GetterError::Download {
                address: source.to_string(),
                source: err,
            })?;

        Ok(slot)
    }
}
