//! Plugin surface for document build pipelines.
//! A host hands each file to [`Plugin::run`] and learns whether its
//! contents were replaced.

mod doctoc;

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

pub use doctoc::{process_contents, DoctocPlugin, ProcessedContents, RunResult};

use crate::utils::error::{DoctocError, Result};

/// Plugin metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginMetadata {
    pub name: String,
    pub version: String,
    pub author: String,
    pub description: String,
    pub homepage: Option<String>,
    pub license: Option<String>,
}

/// Contents of a file as the host stores them
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContents {
    Text(String),
    Bytes(Vec<u8>),
}

impl FileContents {
    /// Borrow the contents as text; byte buffers must be UTF-8
    pub fn as_text(&self) -> Result<Cow<'_, str>> {
        match self {
            FileContents::Text(text) => Ok(Cow::Borrowed(text)),
            FileContents::Bytes(bytes) => std::str::from_utf8(bytes)
                .map(Cow::Borrowed)
                .map_err(|e| DoctocError::Document(format!("contents are not valid UTF-8: {}", e))),
        }
    }

    /// Replace the contents, keeping the caller's representation
    pub fn replace(&mut self, text: String) {
        *self = match self {
            FileContents::Text(_) => FileContents::Text(text),
            FileContents::Bytes(_) => FileContents::Bytes(text.into_bytes()),
        };
    }

    pub fn is_bytes(&self) -> bool {
        matches!(self, FileContents::Bytes(_))
    }
}

impl From<String> for FileContents {
    fn from(text: String) -> Self {
        FileContents::Text(text)
    }
}

impl From<&str> for FileContents {
    fn from(text: &str) -> Self {
        FileContents::Text(text.to_string())
    }
}

impl From<Vec<u8>> for FileContents {
    fn from(bytes: Vec<u8>) -> Self {
        FileContents::Bytes(bytes)
    }
}

/// A file flowing through the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginFile {
    pub contents: FileContents,
}

impl PluginFile {
    pub fn new<C: Into<FileContents>>(contents: C) -> Self {
        Self {
            contents: contents.into(),
        }
    }
}

/// Plugin trait that pipeline steps implement
pub trait Plugin {
    /// What a run hands back to the host besides the mutated file
    type Output;

    /// Get plugin metadata
    fn metadata(&self) -> &PluginMetadata;

    /// Process one file, replacing its contents when needed
    fn run(&mut self, filename: &str, file: &mut PluginFile) -> Result<Self::Output>;
}
