//! Markdown to HTML.
//!
//! Document bodies are rendered with heading anchors matching the table of
//! contents, links to other documents rewritten to their routes and dead
//! links marked. Mermaid fences become diagram containers when enabled and
//! `showLineNumbers` fences get one span per line.

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Parser, Tag, TagEnd};

use marquee_config::MarkdownOptions;
use marquee_content::{DocNode, LinkState};
use marquee_mdx::MARKDOWN_OPTIONS;

/// Render the body of a resolved document.
pub fn render_doc(node: &DocNode, options: &MarkdownOptions) -> String {
    let mut headings = node.body.toc.iter();
    let mut events: Vec<Event> = Vec::new();
    // One recorded code block per code block event, in order.
    let mut blocks = node.body.code_blocks.iter();
    let mut in_dead_link = false;
    let mut replaced_block = false;

    for event in Parser::new_ext(&node.body.content, MARKDOWN_OPTIONS) {
        match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                // The toc holds one entry per heading, in order.
                let entry = headings.next();
                let id = id.or_else(|| entry.map(|e| CowStr::from(e.id.clone())));
                events.push(Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }));
            }

            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => match node.link(&dest_url) {
                Some(LinkState::Resolved(route)) => events.push(Event::Start(Tag::Link {
                    link_type,
                    dest_url: CowStr::from(route.clone()),
                    title,
                    id,
                })),
                Some(LinkState::Dead) => {
                    in_dead_link = true;
                    events.push(Event::Html(CowStr::Borrowed(r#"<a class="link--dead">"#)));
                }
                None => events.push(Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                })),
            },

            Event::End(TagEnd::Link) if in_dead_link => {
                in_dead_link = false;
                events.push(Event::Html(CowStr::Borrowed("</a>")));
            }

            Event::Start(Tag::CodeBlock(kind)) => {
                let Some(block) = blocks.next() else {
                    events.push(Event::Start(Tag::CodeBlock(kind)));
                    continue;
                };

                if options.mermaid && block.is_diagram() {
                    replaced_block = true;
                    events.push(Event::Html(CowStr::Borrowed(r#"<pre class="mermaid">"#)));
                    events.push(Event::Text(CowStr::from(block.source.clone())));
                    events.push(Event::Html(CowStr::Borrowed("</pre>\n")));
                    continue;
                }

                if let Some(title) = &block.title {
                    events.push(Event::Html(CowStr::Borrowed(
                        r#"<div class="code-block__title">"#,
                    )));
                    events.push(Event::Text(CowStr::from(title.clone())));
                    events.push(Event::Html(CowStr::Borrowed("</div>\n")));
                }

                let language = block.language.as_str();
                if block.line_numbers {
                    replaced_block = true;
                    events.push(Event::Html(CowStr::from(format!(
                        r#"<pre class="code-block--line-numbers"><code class="language-{}">"#,
                        language
                    ))));
                    for line in block.source.lines() {
                        events.push(Event::Html(CowStr::Borrowed(r#"<span class="code-line">"#)));
                        events.push(Event::Text(CowStr::from(line.to_string())));
                        events.push(Event::Html(CowStr::Borrowed("</span>\n")));
                    }
                    events.push(Event::Html(CowStr::Borrowed("</code></pre>\n")));
                    continue;
                }

                let kind = match kind {
                    CodeBlockKind::Fenced(_) => CodeBlockKind::Fenced(CowStr::Borrowed(language)),
                    indented => indented,
                };
                events.push(Event::Start(Tag::CodeBlock(kind)));
            }

            Event::Text(_) if replaced_block => {}

            Event::End(TagEnd::CodeBlock) if replaced_block => {
                replaced_block = false;
            }

            other => events.push(other),
        }
    }

    let mut out = String::with_capacity(node.body.content.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    out
}

/// Render block markdown, such as the homepage narrative.
pub fn render_block(source: &str) -> String {
    let mut out = String::new();
    html::push_html(&mut out, Parser::new_ext(source, MARKDOWN_OPTIONS));
    out
}

/// Render a single paragraph of markdown without the wrapping `<p>`.
pub fn render_inline(source: &str) -> String {
    let rendered = render_block(source);
    let trimmed = rendered.trim();
    match trimmed
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
    {
        Some(inner) if !inner.contains("<p>") => inner.to_string(),
        _ => trimmed.to_string(),
    }
}
