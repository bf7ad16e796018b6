use log::{debug, info};

use super::{Plugin, PluginFile, PluginMetadata};
use crate::config::{ConfigInput, Options, SessionScope};
use crate::document::{DocumentEngine, HtmlEngine};
use crate::toc::{
    extract_headings, parse_options_for, serialize_document, Extraction, HeadingRecord,
    TocTreeBuilder, TreeBuilder,
};
use crate::utils::error::Result;

/// Headings of one document plus its replacement contents, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedContents {
    pub extraction: Extraction,
    /// `None` when the document needs no re-serialization
    pub contents: Option<String>,
}

/// Parse `contents`, assign heading ids and re-serialize when changed
pub fn process_contents<E: DocumentEngine>(
    engine: &E,
    contents: &str,
    options: &Options,
) -> Result<ProcessedContents> {
    let mut document = engine.parse(contents, &parse_options_for(options))?;
    let extraction = extract_headings(&mut document, options)?;

    let contents = if extraction.modified {
        Some(serialize_document(&document, extraction.shape)?)
    } else {
        None
    };

    Ok(ProcessedContents { extraction, contents })
}

/// What a run hands back to the host
#[derive(Debug, Clone)]
pub struct RunResult<Tree> {
    pub tree: Tree,
    pub headings: Vec<HeadingRecord>,
    pub new_id_count: usize,
    /// Whether the file's contents were replaced
    pub replaced: bool,
}

/// Heading extraction step for a build pipeline
pub struct DoctocPlugin<E = HtmlEngine, T = TocTreeBuilder> {
    metadata: PluginMetadata,
    scope: SessionScope,
    engine: E,
    tree_builder: T,
}

impl DoctocPlugin {
    /// Plugin using the HTML engine and the default tree builder
    pub fn with_options<I: Into<ConfigInput>>(input: I) -> Result<Self> {
        Self::new(HtmlEngine::new(), TocTreeBuilder, input)
    }
}

impl<E: DocumentEngine, T: TreeBuilder> DoctocPlugin<E, T> {
    /// Create a plugin whose base options are the defaults combined with `input`
    pub fn new<I: Into<ConfigInput>>(engine: E, tree_builder: T, input: I) -> Result<Self> {
        let base = Options::from_input(input)?;

        Ok(Self {
            metadata: PluginMetadata {
                name: "doctoc".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                author: "doctoc developers".to_string(),
                description: "Heading ids and table of contents data".to_string(),
                homepage: None,
                license: Some("AGPL-3.0".to_string()),
            },
            scope: SessionScope::new(base),
            engine,
            tree_builder,
        })
    }

    /// Options used for every file without a file override
    pub fn set_default_options<I: Into<ConfigInput>>(&mut self, input: I) -> Result<()> {
        self.scope.set_invocation_defaults(input)
    }

    /// Options used for the next run on `filename` only
    pub fn set_file_options<I: Into<ConfigInput>>(&mut self, filename: &str, input: I) -> Result<()> {
        self.scope.set_file_override(filename, input)
    }

    pub fn scope(&self) -> &SessionScope {
        &self.scope
    }
}

impl<E: DocumentEngine, T: TreeBuilder> Plugin for DoctocPlugin<E, T> {
    type Output = RunResult<T::Tree>;

    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn run(&mut self, filename: &str, file: &mut PluginFile) -> Result<RunResult<T::Tree>> {
        // file options are consumed here, before anything can fail
        let options = self.scope.resolve_for(filename);

        let processed = {
            let contents = file.contents.as_text()?;
            process_contents(&self.engine, &contents, &options)?
        };

        let replaced = match processed.contents {
            Some(contents) => {
                file.contents.replace(contents);
                true
            }
            None => false,
        };

        let extraction = processed.extraction;
        info!(
            "{}: {} heading(s), {} new id(s)",
            filename,
            extraction.headings.len(),
            extraction.new_id_count
        );
        debug!("{}: contents replaced: {}", filename, replaced);

        Ok(RunResult {
            tree: self.tree_builder.create_tree_from_headings(&extraction.headings),
            headings: extraction.headings,
            new_id_count: extraction.new_id_count,
            replaced,
        })
    }
}
