use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;

use crate::error::ViewerError;

/// The Library is the user's ordered list of document paths.
/// Order is insertion order and drives both the sidebar and navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    entries: Vec<String>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn position(&self, path: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry == path)
    }

    /// Append a path unless an identical one is already present.
    /// Returns true if the path was added.
    pub fn add(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.entries.contains(&path) {
            return false;
        }
        self.entries.push(path);
        true
    }

    /// Add several paths in order.
    /// Returns the index of the first entry that was actually added.
    pub fn add_all<I, S>(&mut self, paths: I) -> Option<usize>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut first_added = None;
        for path in paths {
            if self.add(path) && first_added.is_none() {
                first_added = Some(self.entries.len() - 1);
            }
        }
        first_added
    }

    /// Remove the entries at the given indices.
    ///
    /// Indices refer to positions before the removal; they are processed
    /// from highest to lowest so the remaining ones stay valid.
    /// Duplicates and out-of-range indices are ignored.
    pub fn remove(&mut self, indices: &[usize]) -> usize {
        let unique: BTreeSet<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < self.entries.len())
            .collect();

        for &index in unique.iter().rev() {
            self.entries.remove(index);
        }
        unique.len()
    }

    /// Swap in a whole new list. The loaded list wins entirely, nothing is merged.
    pub fn replace(&mut self, entries: Vec<String>) {
        self.entries = entries;
    }

    /// File name shown in the sidebar (the last path component)
    pub fn display_name(&self, index: usize) -> Option<String> {
        let entry = self.entries.get(index)?;
        let name = Path::new(entry)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| entry.clone());
        Some(name)
    }

    /// JSON array of paths, pretty-printed with a 4-space indent
    pub fn serialize(&self) -> Result<String, ViewerError> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.entries.serialize(&mut serializer)?;
        String::from_utf8(buffer).map_err(|e| ViewerError::MalformedLibrary(e.to_string()))
    }

    /// Parse a library payload. Anything but a JSON array of strings is rejected.
    pub fn deserialize(bytes: &[u8]) -> Result<Vec<String>, ViewerError> {
        let entries: Vec<String> = serde_json::from_slice(bytes)?;
        Ok(entries)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ViewerError> {
        let json = self.serialize()?;
        std::fs::write(path, json)?;
        tracing::info!("💾 Saved {} entries to {}", self.entries.len(), path.display());
        Ok(())
    }

    /// Replace the list with the contents of a library file.
    /// On any failure the current list is left untouched.
    pub fn load_from(&mut self, path: &Path) -> Result<(), ViewerError> {
        let bytes = std::fs::read(path)?;
        let entries = Self::deserialize(&bytes)?;
        tracing::info!("📚 Loaded {} entries from {}", entries.len(), path.display());
        self.replace(entries);
        Ok(())
    }
}
