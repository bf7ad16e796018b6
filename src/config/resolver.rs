use log::debug;

use crate::config::selector::{is_heading_selector, read_range};
use crate::config::types::{ConfigInput, Options, OptionsInput};
use crate::config::validation::{resolve_selector_fields, validate};
use crate::utils::error::{DoctocError, Result};

/// Turn a bare options string into the fields it stands for
fn read_options_string(text: &str) -> Result<OptionsInput> {
    if let Some((min, max)) = read_range(text) {
        // e.g. "h1-6"
        return Ok(OptionsInput::new().with_min_level(min).with_max_level(max));
    }

    if is_heading_selector(text) {
        // e.g. "h1, h2"
        return Ok(OptionsInput::new().with_selector(text));
    }

    Err(DoctocError::InvalidConfigValue(text.to_string()))
}

/// Copy every supplied field onto `target`
fn apply_fields(target: &mut Options, input: OptionsInput) -> Result<()> {
    if let Some(selector) = input.h_selector {
        target.selector = selector;
    }

    if let Some(context) = input.h_context {
        target.context_selector = context;
    }

    if let Some(slug_func) = input.slug_func {
        target.slug_func = slug_func;
    }

    if let Some(prefix) = input.id_prefix {
        target.id_prefix = prefix;
    }

    if let Some(limit) = input.id_length_limit {
        target.id_length_limit = usize::try_from(limit).map_err(|_| {
            DoctocError::validation("idLengthLimit", limit, "does not fit in a machine-sized integer")
        })?;
    }

    if let Some(unique) = input.make_ids_unique {
        target.make_ids_unique = unique;
    }

    if let Some(always) = input.always_update {
        target.always_update = always;
    }

    if let Some(shape) = input.document_shape_hint {
        target.document_shape = shape;
    }

    Ok(())
}

impl Options {
    /// Build options from the defaults and one input layer
    pub fn from_input<I: Into<ConfigInput>>(input: I) -> Result<Self> {
        let mut options = Options::default();
        options.combine(input)?;
        Ok(options)
    }

    /// Merge `input` into these options.
    ///
    /// Merging is all-or-nothing: on error `self` is left untouched.
    pub fn combine<I: Into<ConfigInput>>(&mut self, input: I) -> Result<()> {
        let mut fields = match input.into() {
            ConfigInput::Empty => return Ok(()),
            ConfigInput::Text(text) => read_options_string(&text)?,
            ConfigInput::Fields(fields) => fields,
        };

        resolve_selector_fields(&mut fields)?;
        validate(&fields)?;

        let mut scratch = self.clone();
        apply_fields(&mut scratch, fields)?;
        debug!("Combined options: selector='{}', prefix='{}'", scratch.selector, scratch.id_prefix);

        *self = scratch;
        Ok(())
    }

    /// Derive a new layer from these options without touching them
    pub fn derive<I: Into<ConfigInput>>(&self, input: I) -> Result<Self> {
        let mut layer = self.clone();
        layer.combine(input)?;
        Ok(layer)
    }
}
