// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Directory-backed object store for prekey blobs.
//!
//! A bucket is a directory under the data root; object keys are relative
//! paths inside it (`{networkID}/{publicKeyHex}`). Writes go to a temp file
//! first and are renamed into place, so readers never observe a partial
//! object. Later writes to the same key replace the object.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid object key: {0}")]
    InvalidKey(String),

    #[error("integrity violation: {0}")]
    IntegrityViolation(String),
}

pub type BlobResult<T> = Result<T, BlobError>;

#[derive(Debug, Clone)]
pub struct BlobStore {
    bucket_dir: PathBuf,
}

impl BlobStore {
    /// Open the bucket directory `root/bucket`, creating it if needed.
    pub fn open(root: impl AsRef<Path>, bucket: &str) -> BlobResult<Self> {
        let bucket_dir = root.as_ref().join(bucket);
        fs::create_dir_all(&bucket_dir)?;
        Ok(Self { bucket_dir })
    }

    pub fn bucket_dir(&self) -> &Path {
        &self.bucket_dir
    }

    /// Resolve an object key to a path inside the bucket.
    ///
    /// Keys must be relative and may not climb out of the bucket.
    fn object_path(&self, key: &str) -> BlobResult<PathBuf> {
        let relative = Path::new(key);
        let is_plain = !key.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !is_plain {
            return Err(BlobError::InvalidKey(key.to_string()));
        }
        Ok(self.bucket_dir.join(relative))
    }

    /// Store an object, replacing any previous object under `key`.
    pub fn put(&self, key: &str, data: &[u8]) -> BlobResult<PathBuf> {
        let path = self.object_path(key)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(data)?;
            writer.flush()?;
        }

        fs::rename(&temp_path, &path)?;
        Ok(path)
    }

    /// Read an object, `None` if the key was never written.
    pub fn get(&self, key: &str) -> BlobResult<Option<Vec<u8>>> {
        let path = self.object_path(key)?;
        match fs::read(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write-read-delete probe of the bucket directory.
    pub fn health_check(&self) -> BlobResult<()> {
        let test_file = self.bucket_dir.join(".health_check");
        let test_data = b"health_check_data";

        fs::write(&test_file, test_data)?;
        let read_data = fs::read(&test_file)?;
        fs::remove_file(&test_file)?;

        if read_data != test_data {
            return Err(BlobError::IntegrityViolation(
                "Health check data mismatch".to_string(),
            ));
        }
        Ok(())
    }
}
