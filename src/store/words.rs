use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::store::errors::StoreError;
use crate::store::traits::WordStore;

const WORD_BYTES: usize = std::mem::size_of::<u64>();
const FILE_PREFIX: &str = "expressions";
const FILE_EXTENSION: &str = "words";

/// Words kept in memory, mostly useful in tests
#[derive(Debug, Clone, Default)]
pub struct MemoryWordStore {
    contents: Option<(Vec<u64>, usize)>,
}

impl MemoryWordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WordStore for MemoryWordStore {
    fn write_words(&mut self, words: &[u64], records: usize) -> Result<(), StoreError> {
        self.contents = Some((words.to_vec(), records));
        Ok(())
    }

    fn read_words(&self) -> Result<(Vec<u64>, usize), StoreError> {
        self.contents
            .clone()
            .ok_or_else(|| StoreError::Missing(PathBuf::from("<memory>")))
    }
}

/// Little-endian words in `<dir>/expressions-<m>-<records>.words`.
///
/// The record count lives only in the file name; writing a new count replaces the
/// old file.
#[derive(Debug, Clone)]
pub struct FileWordStore {
    dir: PathBuf,
    num_values: usize,
}

impl FileWordStore {
    pub fn new(dir: impl Into<PathBuf>, num_values: usize) -> Self {
        Self {
            dir: dir.into(),
            num_values,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `records` records
    pub fn path_for(&self, records: usize) -> PathBuf {
        self.dir.join(format!(
            "{}-{}-{}.{}",
            FILE_PREFIX, self.num_values, records, FILE_EXTENSION
        ))
    }

    fn parse_records(&self, file_name: &str) -> Option<usize> {
        let prefix = format!("{}-{}-", FILE_PREFIX, self.num_values);
        let suffix = format!(".{}", FILE_EXTENSION);
        file_name
            .strip_prefix(&prefix)?
            .strip_suffix(&suffix)?
            .parse()
            .ok()
    }

    /// Every stored file for this number of values, with its record count
    fn existing(&self) -> Result<Vec<(PathBuf, usize)>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut found = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            if let Some(records) = name.to_str().and_then(|n| self.parse_records(n)) {
                found.push((entry.path(), records));
            }
        }
        found.sort_by_key(|&(_, records)| records);
        Ok(found)
    }
}

impl WordStore for FileWordStore {
    fn write_words(&mut self, words: &[u64], records: usize) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(records);
        let staging = path.with_extension("tmp");

        {
            let mut writer = BufWriter::new(fs::File::create(&staging)?);
            for word in words {
                writer.write_all(&word.to_le_bytes())?;
            }
            writer.flush()?;
        }
        fs::rename(&staging, &path)?;

        for (stale, _) in self.existing()? {
            if stale != path {
                fs::remove_file(&stale)?;
            }
        }

        debug!("Wrote {} words to {}", words.len(), path.display());
        Ok(())
    }

    fn read_words(&self) -> Result<(Vec<u64>, usize), StoreError> {
        let mut existing = self.existing()?;
        let Some((path, records)) = existing.pop() else {
            return Err(StoreError::Missing(self.path_for(0).with_file_name(format!(
                "{}-{}-*.{}",
                FILE_PREFIX, self.num_values, FILE_EXTENSION
            ))));
        };
        if !existing.is_empty() {
            warn!(
                "Found {} stale expression files in {}, using {}",
                existing.len(),
                self.dir.display(),
                path.display()
            );
        }

        let bytes = fs::read(&path)?;
        if bytes.len() % WORD_BYTES != 0 {
            return Err(StoreError::Corrupt(format!(
                "{} holds {} bytes, not a whole number of words",
                path.display(),
                bytes.len()
            )));
        }

        let words = bytes
            .chunks_exact(WORD_BYTES)
            .map(|chunk| {
                let mut word = [0u8; WORD_BYTES];
                word.copy_from_slice(chunk);
                u64::from_le_bytes(word)
            })
            .collect::<Vec<_>>();

        debug!("Read {} words from {}", words.len(), path.display());
        Ok((words, records))
    }
}
