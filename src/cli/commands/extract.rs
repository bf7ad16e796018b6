use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::Serialize;

use doctoc::config::{
    load_config, ConfigInput, DocumentShape, DoctocConfig, OptionsInput, SlugFunc,
};
use doctoc::plugins::{DoctocPlugin, Plugin, PluginFile, RunResult};
use doctoc::toc::{HeadingRecord, TableOfContents};
use doctoc::utils::error::{BoxResult, DoctocError};

use crate::cli::types::{Cli, OutputFormat};

/// Per-file entry of the JSON output
#[derive(Debug, Serialize)]
struct FileReport<'a> {
    file: String,
    new_ids: usize,
    replaced: bool,
    headings: &'a [HeadingRecord],
}

/// Options given on the command line, used as the invocation defaults
fn command_line_options(cli: &Cli) -> BoxResult<OptionsInput> {
    let mut input = OptionsInput::new();

    input.h_range = cli.range.clone();
    input.h_selector = cli.selector.clone();
    input.h_context = cli.context.clone();
    input.id_prefix = cli.prefix.clone();
    input.id_length_limit = cli.length_limit;

    if let Some(name) = &cli.slug {
        let func = SlugFunc::named(name).ok_or_else(|| {
            DoctocError::validation("slugFunc", name, "is not a known slug function")
        })?;
        input.slug_func = Some(func);
    }

    if let Some(name) = &cli.shape {
        let shape = DocumentShape::from_name(name).ok_or_else(|| {
            DoctocError::validation("documentShapeHint", name, "is not a document shape")
        })?;
        input.document_shape_hint = Some(shape);
    }

    // flags can only switch these on
    if cli.unique {
        input.make_ids_unique = Some(true);
    }
    if cli.always_update {
        input.always_update = Some(true);
    }

    Ok(input)
}

/// Per-file layer for `path`, looked up by full path, then by file name
fn file_layer(config: &DoctocConfig, path: &Path) -> BoxResult<Option<ConfigInput>> {
    let by_path = config.files.get(path.to_string_lossy().as_ref());
    let by_name = || {
        path.file_name()
            .and_then(|name| config.files.get(name.to_string_lossy().as_ref()))
    };

    match by_path.or_else(by_name) {
        Some(value) => Ok(Some(ConfigInput::from_yaml(value)?)),
        None => Ok(None),
    }
}

/// Render the tree of one file in a text format
fn render(format: OutputFormat, tree: &TableOfContents) -> String {
    match format {
        OutputFormat::Markdown => tree.to_markdown(),
        OutputFormat::Html => tree.to_html(),
        OutputFormat::Outline => tree.to_outline_comment(),
        OutputFormat::Json => serde_json::to_string_pretty(tree).unwrap_or_default(),
    }
}

/// Write the processed contents back when they differ from what was read
fn write_back(
    path: &Path,
    original: &[u8],
    file: &PluginFile,
    result: &RunResult<TableOfContents>,
    attach: bool,
) -> BoxResult<bool> {
    let mut contents = file.contents.as_text()?.into_owned();
    if attach {
        contents = result.tree.attach_outline(&contents);
    }

    if contents.as_bytes() == original {
        debug!("{} is up to date", path.display());
        return Ok(false);
    }

    fs::write(path, contents)?;
    info!("Updated {}", path.display());
    Ok(true)
}

/// Process every file given on the command line
pub fn handle_extract_command(cli: &Cli) -> BoxResult<()> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => DoctocConfig::default(),
    };

    let mut plugin = DoctocPlugin::with_options(ConfigInput::from_yaml(&config.options)?)?;
    plugin.set_default_options(command_line_options(cli)?)?;

    // every file layer is checked before any file is touched
    let mut layers = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        let layer = file_layer(&config, path)?;
        if let Some(layer) = &layer {
            plugin.scope().invocation_default().derive(layer.clone())?;
        }
        layers.push(layer);
    }

    let mut results = Vec::new();

    for (path, layer) in cli.files.iter().zip(layers) {
        let filename = path.to_string_lossy().to_string();

        if let Some(layer) = layer {
            debug!("Applying file options for {}", filename);
            plugin.set_file_options(&filename, layer)?;
        }

        let original = fs::read(path)?;
        let mut file = PluginFile::new(original.clone());
        let result = plugin.run(&filename, &mut file)?;

        if cli.write {
            write_back(path, &original, &file, &result, cli.attach)?;
        }

        results.push((filename, result));
    }

    if cli.quiet {
        return Ok(());
    }

    if cli.format == OutputFormat::Json {
        let reports: Vec<FileReport> = results
            .iter()
            .map(|(file, result)| FileReport {
                file: file.clone(),
                new_ids: result.new_id_count,
                replaced: result.replaced,
                headings: &result.headings,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for (file, result) in &results {
            println!("{}:\n{}", file, render(cli.format, &result.tree));
        }
    }

    Ok(())
}
