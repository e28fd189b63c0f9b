use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::time::{sleep, Duration};
use tracing::{info, warn};

use mihrab_common::Masjid;

use crate::error::FeedError;
use crate::overpass::{parse_masjid, OverpassClient, OverpassElement};
use crate::states::{bounding_box, state_title, BoundingBox, US_STATES};

const FETCH_ATTEMPTS: u32 = 3;
const RETRY_BASE: Duration = Duration::from_secs(10);
/// Pause between state fetches. Overpass is a shared public service.
const STATE_DELAY: Duration = Duration::from_secs(5);

/// On-disk shape of one per-state feed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateFile {
    pub state: String,
    pub count: usize,
    pub masajid: Vec<Masjid>,
}

/// On-disk shape of the master index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterIndex {
    pub total_count: usize,
    pub state_counts: BTreeMap<String, usize>,
    pub generated_at: String,
}

#[derive(Debug, Default)]
pub struct FetchSummary {
    pub fetched: usize,
    pub skipped: usize,
    pub failed: Vec<String>,
    pub total_masajid: usize,
}

#[derive(Debug, Default)]
pub struct CleanupSummary {
    pub removed: usize,
    pub remaining: usize,
}

/// The OSM data-collection pipeline: per-state Overpass queries with
/// retry/backoff, per-state JSON files, and a master index.
pub struct FeedPipeline {
    client: OverpassClient,
    states_dir: PathBuf,
    index_file: PathBuf,
}

impl FeedPipeline {
    pub fn new(client: OverpassClient, states_dir: PathBuf, index_file: PathBuf) -> Self {
        Self {
            client,
            states_dir,
            index_file,
        }
    }

    fn state_path(&self, slug: &str) -> PathBuf {
        self.states_dir.join(format!("{slug}.json"))
    }

    /// Fetch every state that does not already have a file, then rebuild
    /// the master index. Failed states are reported, not fatal: the next
    /// run picks them up again.
    pub async fn run(&self) -> Result<FetchSummary, FeedError> {
        fs::create_dir_all(&self.states_dir)?;
        let mut summary = FetchSummary::default();

        for (slug, bbox) in US_STATES {
            if self.state_path(slug).exists() {
                info!(state = slug, "State file already exists, skipping");
                summary.skipped += 1;
                continue;
            }

            match self.fetch_with_retry(slug, bbox).await {
                Ok(elements) => {
                    let count = self.save_state(slug, &elements)?;
                    if count > 0 {
                        summary.fetched += 1;
                        summary.total_masajid += count;
                    }
                }
                Err(e) => {
                    warn!(state = slug, error = %e, "Giving up on state");
                    summary.failed.push(slug.to_string());
                }
            }

            sleep(STATE_DELAY).await;
        }

        let index = self.write_index()?;
        info!(
            fetched = summary.fetched,
            skipped = summary.skipped,
            failed = summary.failed.len(),
            total = index.total_count,
            "Feed collection complete"
        );
        Ok(summary)
    }

    /// Fetch a single state unconditionally (refreshing any existing file)
    /// and rebuild the index. Returns the number of masajid found.
    pub async fn fetch_state(&self, slug: &str) -> Result<usize, FeedError> {
        let bbox = bounding_box(slug).ok_or_else(|| FeedError::UnknownState(slug.to_string()))?;

        fs::create_dir_all(&self.states_dir)?;
        let elements = self.fetch_with_retry(slug, bbox).await?;
        let count = self.save_state(slug, &elements)?;
        self.write_index()?;
        Ok(count)
    }

    async fn fetch_with_retry(
        &self,
        slug: &str,
        bbox: BoundingBox,
    ) -> Result<Vec<OverpassElement>, FeedError> {
        let mut attempt = 0;
        loop {
            match self.client.fetch(bbox).await {
                Ok(elements) => {
                    info!(state = slug, elements = elements.len(), "Fetched state");
                    return Ok(elements);
                }
                Err(e) if attempt + 1 < FETCH_ATTEMPTS => {
                    let wait = RETRY_BASE * (attempt + 1);
                    warn!(
                        state = slug,
                        attempt = attempt + 1,
                        wait_secs = wait.as_secs(),
                        error = %e,
                        "Overpass fetch failed, retrying"
                    );
                    sleep(wait).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Parse and write one state's results. An empty result writes nothing,
    /// so the state is retried on the next run.
    fn save_state(&self, slug: &str, elements: &[OverpassElement]) -> Result<usize, FeedError> {
        let state = state_title(slug);
        let masajid: Vec<Masjid> = elements.iter().filter_map(|e| parse_masjid(e, &state)).collect();
        let count = masajid.len();
        if count == 0 {
            return Ok(0);
        }

        let file = StateFile {
            state,
            count,
            masajid,
        };
        write_json(&self.state_path(slug), &file)?;
        Ok(count)
    }

    /// Rebuild the master index from the state files on disk. States with
    /// zero remaining masajid are left out.
    pub fn write_index(&self) -> Result<MasterIndex, FeedError> {
        let mut state_counts = BTreeMap::new();
        let mut total_count = 0;

        for file in self.read_state_files()? {
            if file.count > 0 {
                total_count += file.count;
                state_counts.insert(file.state, file.count);
            }
        }

        let index = MasterIndex {
            total_count,
            state_counts,
            generated_at: Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        };
        write_json(&self.index_file, &index)?;
        Ok(index)
    }

    /// Drop every "Unknown Masjid" entry from the state files, fix the
    /// counts, and rebuild the index.
    pub fn cleanup(&self) -> Result<CleanupSummary, FeedError> {
        let mut summary = CleanupSummary::default();

        for path in self.state_paths()? {
            let mut file: StateFile = read_json(&path)?;
            let before = file.masajid.len();
            file.masajid.retain(|m| m.name.trim() != "Unknown Masjid");
            file.count = file.masajid.len();

            summary.removed += before - file.count;
            summary.remaining += file.count;

            if before != file.count {
                info!(
                    state = file.state.as_str(),
                    removed = before - file.count,
                    remaining = file.count,
                    "Removed unnamed entries"
                );
                write_json(&path, &file)?;
            }
        }

        self.write_index()?;
        Ok(summary)
    }

    /// The full directory: every masjid from every state file. This is the
    /// entry feed that nearby queries run against.
    pub fn load_entries(&self) -> Result<Vec<Masjid>, FeedError> {
        let mut entries = Vec::new();
        for file in self.read_state_files()? {
            entries.extend(file.masajid);
        }
        Ok(entries)
    }

    fn state_paths(&self) -> Result<Vec<PathBuf>, FeedError> {
        if !self.states_dir.exists() {
            return Ok(Vec::new());
        }
        let mut paths: Vec<PathBuf> = fs::read_dir(&self.states_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();
        Ok(paths)
    }

    fn read_state_files(&self) -> Result<Vec<StateFile>, FeedError> {
        self.state_paths()?
            .iter()
            .map(|path| read_json(path))
            .collect()
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, FeedError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), FeedError> {
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}
