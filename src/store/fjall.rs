use std::path::Path;

use fjall::{Config, PartitionCreateOptions, TransactionalPartitionHandle, TxKeyspace};
use tracing::{debug, info};

use crate::snippet::Snippet;

use super::error::Result;
use super::keys::{decode_latest_key, latest_key, snippet_key};
use super::SnippetStore;

/// Fjall-backed persistent storage for snippets.
///
/// Two partitions: `snippets` holds the records, `latest` is a sorted
/// index over unrestricted snippets (see [`super::keys`]).
#[derive(Clone)]
pub struct FjallSnippetStore {
    keyspace: TxKeyspace,
    snippets: TransactionalPartitionHandle,
    latest: TransactionalPartitionHandle,
}

impl FjallSnippetStore {
    /// Open or create a store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening snippet store at: {}", path.display());

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let keyspace = Config::new(path).open_transactional()?;
        let snippets = keyspace.open_partition("snippets", PartitionCreateOptions::default())?;
        let latest = keyspace.open_partition("latest", PartitionCreateOptions::default())?;

        info!("Snippet store opened");
        Ok(Self {
            keyspace,
            snippets,
            latest,
        })
    }

    /// Flush all pending writes to disk.
    pub fn persist(&self) -> Result<()> {
        self.keyspace.persist(fjall::PersistMode::SyncAll)?;
        Ok(())
    }
}

impl SnippetStore for FjallSnippetStore {
    fn get(&self, id: &str) -> Result<Option<Snippet>> {
        match self.snippets.get(snippet_key(id))? {
            Some(value) => Ok(Some(serde_json::from_slice(&value)?)),
            None => Ok(None),
        }
    }

    fn put(&self, snippet: &Snippet) -> Result<()> {
        let value = serde_json::to_vec(snippet)?;
        self.snippets.insert(snippet_key(&snippet.id), value)?;
        if !snippet.is_restricted() {
            self.latest.insert(
                latest_key(snippet.created_at, &snippet.id),
                snippet.id.as_bytes(),
            )?;
        }
        debug!(id = %snippet.id, restricted = snippet.is_restricted(), "Stored snippet");
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        // Eviction only ever targets restricted snippets, which are not
        // indexed; still drop a stray index entry if the record has one.
        if let Some(snippet) = self.get(id)? {
            if !snippet.is_restricted() {
                self.latest
                    .remove(latest_key(snippet.created_at, &snippet.id))?;
            }
        }
        self.snippets.remove(snippet_key(id))?;
        debug!(id, "Deleted snippet");
        Ok(())
    }

    fn list_unrestricted(&self) -> Result<Vec<Snippet>> {
        let mut snippets = Vec::new();
        for item in self.keyspace.read_tx().iter(&self.latest) {
            let (key, _) = item?;
            let Some((_, id)) = decode_latest_key(&key) else {
                continue;
            };
            // Unrestricted snippets are never evicted, so an index entry
            // without its record would indicate external tampering.
            if let Some(snippet) = self.get(&id)? {
                snippets.push(snippet);
            }
        }
        Ok(snippets)
    }

    fn update<F>(&self, id: &str, mut apply: F) -> Result<Option<Snippet>>
    where
        F: FnMut(Option<Snippet>) -> Option<Snippet>,
    {
        // update_fetch runs the closure under the keyspace's per-key write
        // exclusion. Codec failures inside the closure are stashed and the
        // record left untouched, since the closure itself cannot fail.
        let mut codec_err: Option<serde_json::Error> = None;
        let updated = self.snippets.update_fetch(snippet_key(id), |raw| {
            let original = raw.cloned();
            let current = match raw {
                Some(bytes) => match serde_json::from_slice::<Snippet>(bytes) {
                    Ok(snippet) => Some(snippet),
                    Err(err) => {
                        codec_err = Some(err);
                        return original;
                    }
                },
                None => None,
            };

            match apply(current) {
                Some(next) => match serde_json::to_vec(&next) {
                    Ok(buf) => Some(buf.into()),
                    Err(err) => {
                        codec_err = Some(err);
                        original
                    }
                },
                None => None,
            }
        })?;

        if let Some(err) = codec_err {
            return Err(err.into());
        }

        match updated {
            Some(value) => Ok(Some(serde_json::from_slice(&value)?)),
            None => Ok(None),
        }
    }
}
