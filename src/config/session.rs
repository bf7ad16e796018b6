//! Layered options for a plugin session.
//!
//! Three layers are kept: the plugin's base options, the invocation
//! defaults derived from them, and a single-use per-file override derived
//! from the invocation defaults. Callers sharing one scope across threads
//! must serialize access themselves.

use log::debug;

use crate::config::types::{ConfigInput, Options};
use crate::utils::error::Result;

/// Options meant for exactly one file
#[derive(Debug, Clone)]
struct FileOverride {
    filename: String,
    options: Options,
}

/// Holder of the base, invocation-default and per-file option layers
#[derive(Debug, Clone)]
pub struct SessionScope {
    base: Options,
    invocation_default: Options,
    file_override: Option<FileOverride>,
}

impl SessionScope {
    /// Create a scope whose every layer starts out as `base`
    pub fn new(base: Options) -> Self {
        Self {
            invocation_default: base.clone(),
            base,
            file_override: None,
        }
    }

    pub fn base(&self) -> &Options {
        &self.base
    }

    pub fn invocation_default(&self) -> &Options {
        &self.invocation_default
    }

    /// Filename of the pending per-file override, if any
    pub fn pending_override(&self) -> Option<&str> {
        self.file_override.as_ref().map(|o| o.filename.as_str())
    }

    /// Replace the invocation defaults with `base` combined with `input`
    pub fn set_invocation_defaults<I: Into<ConfigInput>>(&mut self, input: I) -> Result<()> {
        self.invocation_default = self.base.derive(input)?;
        Ok(())
    }

    /// Stage options for the next resolution of `filename`
    pub fn set_file_override<I: Into<ConfigInput>>(&mut self, filename: &str, input: I) -> Result<()> {
        let options = self.invocation_default.derive(input)?;
        self.file_override = Some(FileOverride {
            filename: filename.to_string(),
            options,
        });
        Ok(())
    }

    /// Options to use for `filename`.
    ///
    /// A staged per-file override is consumed by this call whether or not
    /// it was meant for `filename`, so it can never leak into another file.
    pub fn resolve_for(&mut self, filename: &str) -> Options {
        match self.file_override.take() {
            Some(file) if file.filename == filename => {
                debug!("Using file options for {}", filename);
                file.options
            }
            Some(file) => {
                debug!("Discarding file options staged for {} while resolving {}", file.filename, filename);
                self.invocation_default.clone()
            }
            None => self.invocation_default.clone(),
        }
    }
}
