//! Raw submission assembly
//!
//! The transport layer (multipart parser) feeds values and file parts into
//! a [`RawSubmission`]; repeated keys accumulate, which is how checkbox
//! groups arrive.

use std::collections::BTreeMap;

/// One file part extracted from the multipart stream.
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Multipart field name the file arrived under
    pub field: String,
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// A submission as received, before validation. Ordinary fields keep every
/// occurrence in arrival order.
#[derive(Debug, Default)]
pub struct RawSubmission {
    values: BTreeMap<String, Vec<String>>,
    files: Vec<FilePart>,
}

impl RawSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of an ordinary field.
    pub fn push_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_default().push(value.into());
    }

    pub fn push_file(&mut self, file: FilePart) {
        self.files.push(file);
    }

    pub fn values(&self) -> &BTreeMap<String, Vec<String>> {
        &self.values
    }

    pub fn files(&self) -> &[FilePart] {
        &self.files
    }

    pub fn into_files(self) -> Vec<FilePart> {
        self.files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_keys_accumulate_in_order() {
        let mut raw = RawSubmission::new();
        raw.push_value("topics", "web");
        raw.push_value("topics", "brand");
        raw.push_value("name", "Ada");
        assert_eq!(raw.values()["topics"], vec!["web", "brand"]);
        assert_eq!(raw.values()["name"], vec!["Ada"]);
    }
}
