use std::fmt;
use std::sync::Arc;

use crate::config::defaults;
use crate::toc::slugs;

/// A named slug function mapping heading text to id text
#[derive(Clone)]
pub struct SlugFunc {
    name: String,
    func: Arc<dyn Fn(&str) -> String + Send + Sync>,
}

impl SlugFunc {
    /// Wrap a custom slug function
    pub fn new<F>(name: &str, func: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            func: Arc::new(func),
        }
    }

    /// Look up one of the built-in slug functions by name
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "slugify" => Some(Self::new("slugify", slugs::slugify)),
            "jekyll" => Some(Self::new("jekyll", slugs::jekyll_slug)),
            _ => None,
        }
    }

    /// Names accepted by [`SlugFunc::named`]
    pub fn builtin_names() -> &'static [&'static str] {
        &["slugify", "jekyll"]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Slug the given heading text
    pub fn apply(&self, title: &str) -> String {
        (self.func)(title)
    }
}

impl Default for SlugFunc {
    fn default() -> Self {
        Self::new("slugify", slugs::slugify)
    }
}

impl fmt::Debug for SlugFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlugFunc").field("name", &self.name).finish()
    }
}

/// How the document is re-serialized after ids were assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    /// Decide from the parsed document whether an explicit `<body>` exists
    Auto,
    /// Tag soup: only the body's inner content is written back
    Fragment,
    /// A complete document: everything is written back
    FullDocument,
}

impl DocumentShape {
    /// Get the configuration name of the shape
    pub fn name(&self) -> &str {
        match self {
            DocumentShape::Auto => "auto",
            DocumentShape::Fragment => "fragment",
            DocumentShape::FullDocument => "full-document",
        }
    }

    /// Parse a shape from its configuration name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "auto" => Some(DocumentShape::Auto),
            "fragment" | "body" => Some(DocumentShape::Fragment),
            "full-document" | "complete" => Some(DocumentShape::FullDocument),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Resolved heading extraction options.
///
/// A value of this type has always passed validation. Layers are derived
/// by cloning and combining, so a parent is never mutated by its children.
#[derive(Debug, Clone)]
pub struct Options {
    pub(crate) selector: String,
    pub(crate) context_selector: String,
    pub(crate) slug_func: SlugFunc,
    pub(crate) id_prefix: String,
    pub(crate) id_length_limit: usize,
    pub(crate) make_ids_unique: bool,
    pub(crate) always_update: bool,
    pub(crate) document_shape: DocumentShape,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            selector: defaults::default_selector(),
            context_selector: defaults::default_context_selector(),
            slug_func: defaults::default_slug_func(),
            id_prefix: defaults::default_id_prefix(),
            id_length_limit: defaults::default_id_length_limit(),
            make_ids_unique: defaults::default_make_ids_unique(),
            always_update: defaults::default_always_update(),
            document_shape: defaults::default_document_shape(),
        }
    }
}

impl Options {
    /// Canonical heading selector, e.g. `h2, h3, h4`
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Context selector; empty means the whole document
    pub fn context_selector(&self) -> &str {
        &self.context_selector
    }

    pub fn slug_func(&self) -> &SlugFunc {
        &self.slug_func
    }

    pub fn id_prefix(&self) -> &str {
        &self.id_prefix
    }

    pub fn id_length_limit(&self) -> usize {
        self.id_length_limit
    }

    pub fn make_ids_unique(&self) -> bool {
        self.make_ids_unique
    }

    pub fn always_update(&self) -> bool {
        self.always_update
    }

    pub fn document_shape(&self) -> DocumentShape {
        self.document_shape
    }
}

/// A partial options layer. Every field is optional; only supplied
/// fields override the layer they are combined into.
#[derive(Debug, Clone, Default)]
pub struct OptionsInput {
    /// `hN-M`, overrides `h_min`/`h_max`
    pub h_range: Option<String>,
    /// Lowest level, overrides `h_selector`
    pub h_min: Option<i64>,
    /// Highest level, overrides `h_selector`
    pub h_max: Option<i64>,
    pub h_selector: Option<String>,
    pub h_context: Option<String>,
    pub slug_func: Option<SlugFunc>,
    pub id_prefix: Option<String>,
    pub id_length_limit: Option<i64>,
    pub make_ids_unique: Option<bool>,
    pub always_update: Option<bool>,
    pub document_shape_hint: Option<DocumentShape>,
}

impl OptionsInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_range(mut self, range: &str) -> Self {
        self.h_range = Some(range.to_string());
        self
    }

    pub fn with_min_level(mut self, level: i64) -> Self {
        self.h_min = Some(level);
        self
    }

    pub fn with_max_level(mut self, level: i64) -> Self {
        self.h_max = Some(level);
        self
    }

    pub fn with_selector(mut self, selector: &str) -> Self {
        self.h_selector = Some(selector.to_string());
        self
    }

    pub fn with_context(mut self, context: &str) -> Self {
        self.h_context = Some(context.to_string());
        self
    }

    pub fn with_slug_func(mut self, slug_func: SlugFunc) -> Self {
        self.slug_func = Some(slug_func);
        self
    }

    pub fn with_id_prefix(mut self, prefix: &str) -> Self {
        self.id_prefix = Some(prefix.to_string());
        self
    }

    pub fn with_id_length_limit(mut self, limit: i64) -> Self {
        self.id_length_limit = Some(limit);
        self
    }

    pub fn with_unique_ids(mut self, unique: bool) -> Self {
        self.make_ids_unique = Some(unique);
        self
    }

    pub fn with_always_update(mut self, always: bool) -> Self {
        self.always_update = Some(always);
        self
    }

    pub fn with_document_shape(mut self, shape: DocumentShape) -> Self {
        self.document_shape_hint = Some(shape);
        self
    }

    /// Overlay `other` onto this layer, field by field
    pub fn merge(&mut self, other: OptionsInput) {
        if other.h_range.is_some() {
            self.h_range = other.h_range;
        }
        if other.h_min.is_some() {
            self.h_min = other.h_min;
        }
        if other.h_max.is_some() {
            self.h_max = other.h_max;
        }
        if other.h_selector.is_some() {
            self.h_selector = other.h_selector;
        }
        if other.h_context.is_some() {
            self.h_context = other.h_context;
        }
        if other.slug_func.is_some() {
            self.slug_func = other.slug_func;
        }
        if other.id_prefix.is_some() {
            self.id_prefix = other.id_prefix;
        }
        if other.id_length_limit.is_some() {
            self.id_length_limit = other.id_length_limit;
        }
        if other.make_ids_unique.is_some() {
            self.make_ids_unique = other.make_ids_unique;
        }
        if other.always_update.is_some() {
            self.always_update = other.always_update;
        }
        if other.document_shape_hint.is_some() {
            self.document_shape_hint = other.document_shape_hint;
        }
    }
}

/// Anything that can be combined into [`Options`]
#[derive(Debug, Clone, Default)]
pub enum ConfigInput {
    /// Nothing supplied; combining is a no-op
    #[default]
    Empty,
    /// A range (`h1-6`) or selector (`h1, h2`) string
    Text(String),
    /// Structured fields
    Fields(OptionsInput),
}

impl From<&str> for ConfigInput {
    fn from(text: &str) -> Self {
        ConfigInput::Text(text.to_string())
    }
}

impl From<String> for ConfigInput {
    fn from(text: String) -> Self {
        ConfigInput::Text(text)
    }
}

impl From<OptionsInput> for ConfigInput {
    fn from(fields: OptionsInput) -> Self {
        ConfigInput::Fields(fields)
    }
}

impl<T: Into<ConfigInput>> From<Option<T>> for ConfigInput {
    fn from(input: Option<T>) -> Self {
        input.map_or(ConfigInput::Empty, Into::into)
    }
}
