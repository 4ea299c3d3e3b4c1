//! Markdown document parser.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::codeblock::CodeBlock;
use crate::frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};

/// Markdown extensions enabled for every document.
pub const MARKDOWN_OPTIONS: Options = Options::ENABLE_TABLES
    .union(Options::ENABLE_FOOTNOTES)
    .union(Options::ENABLE_STRIKETHROUGH)
    .union(Options::ENABLE_TASKLISTS)
    .union(Options::ENABLE_HEADING_ATTRIBUTES);

/// A parsed document.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDoc {
    /// Parsed frontmatter
    pub frontmatter: Frontmatter,

    /// Markdown content (without frontmatter)
    pub content: String,

    /// Code blocks, fenced and indented, in document order
    pub code_blocks: Vec<CodeBlock>,

    /// Table of contents entries
    pub toc: Vec<TocEntry>,

    /// Links that point at other documents
    pub references: Vec<DocReference>,
}

/// A table of contents entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// A link in a document body that refers to another document.
///
/// Two forms are recognized: file links ending in `.md`/`.mdx`, relative to
/// the linking file, and `doc:<id>` links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocReference {
    /// `./other.md#anchor`: the raw destination and the path part
    Path { raw: String, path: String },
    /// `doc:intro#anchor`: the raw destination and the id
    Id { raw: String, id: String },
}

impl DocReference {
    /// Classify a link destination. Returns `None` for external URLs,
    /// anchors and links to non-document files.
    pub fn from_destination(dest: &str) -> Option<Self> {
        let without_fragment = dest.split('#').next().unwrap_or("");

        if let Some(id) = without_fragment.strip_prefix("doc:") {
            return Some(Self::Id {
                raw: dest.to_string(),
                id: id.to_string(),
            });
        }

        if without_fragment.contains("://") || without_fragment.starts_with("mailto:") {
            return None;
        }

        if without_fragment.ends_with(".md") || without_fragment.ends_with(".mdx") {
            return Some(Self::Path {
                raw: dest.to_string(),
                path: without_fragment.to_string(),
            });
        }

        None
    }

    /// The destination exactly as written in the document.
    pub fn raw(&self) -> &str {
        match self {
            Self::Path { raw, .. } | Self::Id { raw, .. } => raw,
        }
    }

    /// The `#anchor` part of the destination, if any.
    pub fn fragment(&self) -> Option<&str> {
        self.raw().split_once('#').map(|(_, fragment)| fragment)
    }
}

/// Errors that can occur when parsing a document.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),

    #[error("Missing frontmatter block with a `title`")]
    MissingFrontmatter,
}

/// Parse a markdown document.
///
/// Extracts frontmatter, code blocks, document links and generates a table of contents.
pub fn parse_document(source: &str) -> Result<ParsedDoc, ParseError> {
    // Extract frontmatter first
    let (frontmatter, content) = extract_frontmatter(source)?;
    let frontmatter = frontmatter.ok_or(ParseError::MissingFrontmatter)?;

    let mut code_blocks = Vec::new();
    let mut toc = Vec::new();
    let mut references = Vec::new();

    let parser = Parser::new_ext(content, MARKDOWN_OPTIONS);

    let mut current_code_block: Option<(String, String)> = None; // (info, source)
    let mut current_heading: Option<(u8, Option<String>, String)> = None; // (level, id, text)

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let info = match &kind {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                current_code_block = Some((info, String::new()));
            }

            Event::Text(text) => {
                if let Some((_, ref mut block_source)) = current_code_block {
                    block_source.push_str(&text);
                } else if let Some((_, _, ref mut heading_text)) = current_heading {
                    heading_text.push_str(&text);
                }
            }

            Event::Code(code) => {
                if let Some((_, _, ref mut heading_text)) = current_heading {
                    heading_text.push_str(&code);
                }
            }

            Event::End(TagEnd::CodeBlock) => {
                if let Some((info, block_source)) = current_code_block.take() {
                    code_blocks.push(CodeBlock::new(&info, block_source));
                }
            }

            Event::Start(Tag::Heading { level, id, .. }) => {
                current_heading = Some((level as u8, id.map(|i| i.to_string()), String::new()));
            }

            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, id, title)) = current_heading.take() {
                    let title = title.trim().to_string();
                    let id = id.unwrap_or_else(|| slugify(&title));
                    toc.push(TocEntry { title, id, level });
                }
            }

            Event::Start(Tag::Link { dest_url, .. }) => {
                if let Some(reference) = DocReference::from_destination(&dest_url) {
                    if !references.contains(&reference) {
                        references.push(reference);
                    }
                }
            }

            _ => {}
        }
    }

    Ok(ParsedDoc {
        frontmatter,
        content: content.to_string(),
        code_blocks,
        toc,
        references,
    })
}

/// Convert a heading to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
