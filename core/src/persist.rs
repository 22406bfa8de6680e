use crate::{IndexBundle, IndexError, PersistError};
use bincode;
use serde::{Deserialize, Serialize};
use std::fs::{self, create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub const FORMAT_VERSION: u32 = 1;

/// Build summary written next to the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub num_terms: u32,
    pub duplicate_keys: u32,
    pub created_at: String,
    pub version: u32,
}

impl MetaFile {
    pub fn for_bundle(bundle: &IndexBundle, created_at: String) -> Self {
        Self {
            num_docs: bundle.num_docs() as u32,
            num_terms: bundle.num_terms() as u32,
            duplicate_keys: bundle.duplicate_keys().len() as u32,
            created_at,
            version: FORMAT_VERSION,
        }
    }
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn index(&self) -> PathBuf { self.root.join("index.bin") }
    pub fn meta(&self) -> PathBuf { self.root.join("meta.json") }
    pub fn raw_dir(&self) -> PathBuf { self.root.join("raw") }
    fn staging(&self) -> PathBuf { self.root.join(".staging") }
}

/// Storage path for a document's raw text:
/// `root/raw/<docno[6..8]>/<docno[4..6]>/<docno[2..4]>/<last 4 chars>`.
///
/// For LA Times keys (`LAmmddyy-nnnn`) this is `raw/yy/dd/mm/nnnn`. Every
/// sliced character must be an ASCII letter or digit.
pub fn docno_to_path(root: &Path, docno: &str) -> Result<PathBuf, IndexError> {
    let bytes = docno.as_bytes();
    let segments_ok = bytes.len() >= 8
        && bytes[2..8].iter().all(u8::is_ascii_alphanumeric)
        && bytes[bytes.len() - 4..].iter().all(u8::is_ascii_alphanumeric);
    if !docno.is_ascii() || !segments_ok {
        return Err(IndexError::InvalidDocNo(docno.to_string()));
    }
    Ok(root
        .join("raw")
        .join(&docno[6..8])
        .join(&docno[4..6])
        .join(&docno[2..4])
        .join(&docno[docno.len() - 4..]))
}

/// Write area for one build. Files land in `<root>/.staging` and are only
/// moved into `root` by [`Staging::commit`]; dropping an uncommitted
/// staging area deletes it, so an aborted build publishes nothing.
pub struct Staging {
    paths: IndexPaths,
    dir: PathBuf,
    committed: bool,
}

impl Staging {
    pub fn create(paths: &IndexPaths) -> Result<Self, PersistError> {
        create_dir_all(&paths.root).map_err(|e| PersistError::io(&paths.root, e))?;
        let dir = paths.staging();
        if dir.exists() {
            tracing::debug!(dir = %dir.display(), "removing stale staging directory");
            fs::remove_dir_all(&dir).map_err(|e| PersistError::io(&dir, e))?;
        }
        create_dir_all(&dir).map_err(|e| PersistError::io(&dir, e))?;
        Ok(Self { paths: IndexPaths::new(&paths.root), dir, committed: false })
    }

    pub fn dir(&self) -> &Path { &self.dir }

    /// Store a document's indexable text under its docno path.
    pub fn save_raw_text(&self, docno: &str, text: &str) -> Result<(), IndexError> {
        let path = docno_to_path(&self.dir, docno)?;
        if let Some(parent) = path.parent() {
            create_dir_all(parent).map_err(|e| PersistError::io(parent, e))?;
        }
        fs::write(&path, text).map_err(|e| PersistError::io(&path, e))?;
        Ok(())
    }

    /// Write the bundle and summary, then publish everything into the index root.
    pub fn commit(mut self, bundle: &IndexBundle, meta: &MetaFile) -> Result<(), PersistError> {
        let staged = IndexPaths::new(&self.dir);
        save_bundle(&staged, bundle)?;
        save_meta(&staged, meta)?;

        // raw/ always belongs to the index being published
        let target = self.paths.raw_dir();
        if target.exists() {
            fs::remove_dir_all(&target).map_err(|e| PersistError::io(&target, e))?;
        }
        let raw = staged.raw_dir();
        if raw.exists() {
            rename(&raw, &target)?;
        }
        rename(&staged.meta(), &self.paths.meta())?;
        // index.bin goes last: its presence marks a complete index
        rename(&staged.index(), &self.paths.index())?;

        fs::remove_dir_all(&self.dir).map_err(|e| PersistError::io(&self.dir, e))?;
        self.committed = true;
        tracing::info!(root = %self.paths.root.display(), "index published");
        Ok(())
    }
}

impl Drop for Staging {
    fn drop(&mut self) {
        if !self.committed {
            tracing::warn!(dir = %self.dir.display(), "discarding uncommitted index output");
            let _ = fs::remove_dir_all(&self.dir);
        }
    }
}

fn rename(from: &Path, to: &Path) -> Result<(), PersistError> {
    fs::rename(from, to).map_err(|e| PersistError::io(to, e))
}

/// Stage and publish a bundle in one step.
pub fn save_index(paths: &IndexPaths, bundle: &IndexBundle, meta: &MetaFile) -> Result<(), PersistError> {
    Staging::create(paths)?.commit(bundle, meta)
}

fn save_bundle(paths: &IndexPaths, bundle: &IndexBundle) -> Result<(), PersistError> {
    let path = paths.index();
    let mut f = File::create(&path).map_err(|e| PersistError::io(&path, e))?;
    let bytes = bincode::serialize(bundle)?;
    f.write_all(&bytes).map_err(|e| PersistError::io(&path, e))?;
    f.sync_all().map_err(|e| PersistError::io(&path, e))?;
    Ok(())
}

pub fn load_bundle(paths: &IndexPaths) -> Result<IndexBundle, PersistError> {
    let path = paths.index();
    let mut f = File::open(&path).map_err(|e| PersistError::io(&path, e))?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf).map_err(|e| PersistError::io(&path, e))?;
    let bundle = bincode::deserialize(&buf)?;
    Ok(bundle)
}

fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<(), PersistError> {
    let path = paths.meta();
    let mut f = File::create(&path).map_err(|e| PersistError::io(&path, e))?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes()).map_err(|e| PersistError::io(&path, e))?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile, PersistError> {
    let path = paths.meta();
    let mut f = File::open(&path).map_err(|e| PersistError::io(&path, e))?;
    let mut buf = String::new();
    f.read_to_string(&mut buf).map_err(|e| PersistError::io(&path, e))?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}
