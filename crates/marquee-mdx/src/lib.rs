//! Markdown document parsing with a validated front-matter schema.
//!
//! This crate extracts YAML front-matter, headings, fenced code blocks and
//! links to other documents. Turning the body into HTML is left to the
//! renderer.

pub mod codeblock;
pub mod frontmatter;
pub mod parser;

pub use codeblock::{CodeBlock, Language};
pub use frontmatter::{Frontmatter, FrontmatterError};
pub use parser::{
    parse_document, slugify, DocReference, ParseError, ParsedDoc, TocEntry, MARKDOWN_OPTIONS,
};
