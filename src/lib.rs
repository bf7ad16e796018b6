//! Heading extraction for table-of-contents generation.
//!
//! Headings are located in an HTML document, given stable ids derived from
//! their text, and reported in document order. The [`plugins::DoctocPlugin`]
//! wraps this as a pipeline step with layered, per-file options.
//!
//! ```
//! use doctoc::config::OptionsInput;
//! use doctoc::plugins::{DoctocPlugin, Plugin, PluginFile};
//!
//! let mut plugin = DoctocPlugin::with_options(OptionsInput::new().with_unique_ids(true)).unwrap();
//! let mut file = PluginFile::new("<h1>Intro</h1><h2>Intro</h2>");
//! let result = plugin.run("index.html", &mut file).unwrap();
//!
//! assert_eq!(result.headings[1].id, "doctoc-intro-1");
//! ```

pub mod config;
pub mod document;
pub mod plugins;
pub mod toc;
pub mod utils;
