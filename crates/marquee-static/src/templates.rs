//! Template engine for rendering pages.
//!
//! Every render call receives the [`ThemeDescriptor`] of the page's locale
//! explicitly; templates read nothing else from the site.

use minijinja::{context, Environment};
use serde::Serialize;

use crate::page::{DocPage, HomePage};
use crate::theme::ThemeDescriptor;

/// Link to the same page in another locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alternate {
    pub lang: String,
    pub href: String,
}

/// Document head data shared by all page kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Head {
    /// `lang` attribute of the document
    pub lang: String,
    pub title: String,
    pub description: Option<String>,
    pub base_url: String,
    /// Absolute canonical URL of the page
    pub canonical: String,
    pub favicon: Option<String>,
    pub stylesheets: Vec<String>,
    pub scripts: Vec<String>,
    /// Load the mermaid runtime
    pub mermaid: bool,
    pub alternates: Vec<Alternate>,
    /// Extra inline script, used by the dev server for live reload
    pub inline_script: Option<String>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a template engine with the built-in templates.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();

        env.add_template("base.html", BASE_TEMPLATE)?;
        env.add_template("navbar.html", NAVBAR_TEMPLATE)?;
        env.add_template("footer.html", FOOTER_TEMPLATE)?;
        env.add_template("home.html", HOME_TEMPLATE)?;
        env.add_template("doc.html", DOC_TEMPLATE)?;
        env.add_template("404.html", NOT_FOUND_TEMPLATE)?;

        Ok(Self { env })
    }

    pub fn render_home(
        &self,
        page: &HomePage,
        theme: &ThemeDescriptor,
        head: &Head,
    ) -> Result<String, minijinja::Error> {
        self.env.get_template("home.html")?.render(context! {
            page => page,
            theme => theme,
            head => head,
        })
    }

    pub fn render_doc(
        &self,
        page: &DocPage,
        theme: &ThemeDescriptor,
        head: &Head,
    ) -> Result<String, minijinja::Error> {
        self.env.get_template("doc.html")?.render(context! {
            page => page,
            theme => theme,
            head => head,
        })
    }

    pub fn render_not_found(
        &self,
        theme: &ThemeDescriptor,
        head: &Head,
    ) -> Result<String, minijinja::Error> {
        self.env.get_template("404.html")?.render(context! {
            theme => theme,
            head => head,
        })
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ head.lang }}" data-syntax-light="{{ theme.syntax.light }}" data-syntax-dark="{{ theme.syntax.dark }}">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ head.title }}</title>
  {% if head.description %}<meta name="description" content="{{ head.description }}">
  {% endif %}<link rel="canonical" href="{{ head.canonical }}">
  {% for alt in head.alternates %}<link rel="alternate" hreflang="{{ alt.lang }}" href="{{ alt.href }}">
  {% endfor %}{% if head.favicon %}<link rel="icon" href="{{ head.favicon }}">
  {% endif %}{% if theme.image %}<meta property="og:image" content="{{ theme.image }}">
  {% endif %}{% for style in head.stylesheets %}<link rel="stylesheet" href="{{ style }}">
  {% endfor %}
</head>
<body>
  {% include "navbar.html" %}
  {% block content %}{% endblock %}
  {% include "footer.html" %}
  {% for script in head.scripts %}<script src="{{ script }}"></script>
  {% endfor %}{% if head.mermaid %}<script type="module">
    import mermaid from "https://cdn.jsdelivr.net/npm/mermaid@11/dist/mermaid.esm.min.mjs";
    mermaid.initialize({ startOnLoad: true });
  </script>
  {% endif %}{% if head.inline_script %}<script>{{ head.inline_script | safe }}</script>
  {% endif %}
</body>
</html>
"##;

const NAVBAR_TEMPLATE: &str = r##"{% macro nav_link(link) %}{% if link.href %}<a class="navbar__link" href="{{ link.href }}"{% if link.external %} target="_blank" rel="noopener noreferrer"{% endif %}>{{ link.label }}</a>{% else %}<a class="navbar__link link--dead">{{ link.label }}</a>{% endif %}{% endmacro %}
<nav class="navbar">
  <div class="navbar__items">
    <a class="navbar__brand" href="{{ theme.navbar.home }}">
      {% if theme.navbar.logo %}<img src="{{ theme.navbar.logo.src }}" alt="{{ theme.navbar.logo.alt }}"{% if theme.navbar.logo.class_name %} class="{{ theme.navbar.logo.class_name }}"{% endif %}{% if theme.navbar.logo.height %} style="height: {{ theme.navbar.logo.height }}"{% endif %}>{% endif %}
      <span>{{ theme.navbar.title }}</span>
    </a>
    {% for link in theme.navbar.left %}{{ nav_link(link) }}
    {% endfor %}
  </div>
  <div class="navbar__items navbar__items--right">
    {% for link in theme.navbar.right %}{{ nav_link(link) }}
    {% endfor %}<button type="button" class="navbar__link" data-toggle-theme aria-label="Toggle color mode">◐</button>
  </div>
</nav>
"##;

const FOOTER_TEMPLATE: &str = r##"<footer class="footer footer--{{ theme.footer.style }}">
  {% if theme.footer.columns %}<div class="footer__links">
    {% for column in theme.footer.columns %}<div class="footer__col">
      <div class="footer__title">{{ column.title }}</div>
      <ul class="footer__items">
        {% for link in column.links %}<li><a href="{{ link.href }}"{% if link.external %} target="_blank" rel="noopener noreferrer"{% endif %}>{{ link.label }}</a></li>
        {% endfor %}
      </ul>
    </div>
    {% endfor %}
  </div>
  {% endif %}{% if theme.footer.copyright %}<div class="footer__copyright">{{ theme.footer.copyright }}</div>
  {% endif %}
</footer>
"##;

const HOME_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block content %}
<div class="container-fluid">
  <header class="hero hero--primary">
    <div class="container">
      {% if page.header.logo %}<img src="{{ page.header.logo.src }}" alt="{{ page.header.logo.alt }}"{% if page.header.logo.width %} width="{{ page.header.logo.width }}"{% endif %}>
      {% endif %}<h1 class="hero__title">{{ page.header.title }}</h1>
      <p class="hero__subtitle">{{ page.header.tagline }}</p>
      {% if page.header.actions %}<div class="buttons">
        {% for action in page.header.actions %}<a class="button button--{{ action.style }} button--lg" href="{{ action.link.href }}"{% if action.link.external %} target="_blank" rel="noopener noreferrer"{% endif %}>{{ action.link.label }}</a>
        {% endfor %}
      </div>
      {% endif %}
    </div>
  </header>
  <main>
    {% if page.features %}<section class="features">
      <div class="container features__grid">
        {% for feature in page.features.features %}<div class="feature" id="feature-{{ feature.key }}">
          <img class="feature__icon" src="{{ feature.icon_url }}" alt="" role="img">
          <h3>{{ feature.title }}</h3>
          <p>{{ feature.description_html | safe }}</p>
        </div>
        {% endfor %}
      </div>
    </section>
    {% endif %}{% if page.narrative %}<section class="narrative container">
      <h2>{{ page.narrative.heading }}</h2>
      {{ page.narrative.body_html | safe }}
    </section>
    {% endif %}
  </main>
</div>
{% endblock %}
"##;

const DOC_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block content %}
<div class="doc-layout">
  <aside class="sidebar">
    {% for group in page.sidebar %}<div class="sidebar__category">{{ group.label }}</div>
    <ul>
      {% for item in group.items %}<li>{% if item.href %}<a class="sidebar__link{% if item.active %} sidebar__link--active{% endif %}" href="{{ item.href }}">{{ item.label }}</a>{% else %}<a class="sidebar__link link--dead">{{ item.label }}</a>{% endif %}</li>
      {% endfor %}
    </ul>
    {% endfor %}
  </aside>
  <main class="doc">
    {% if page.fallback %}<div class="fallback-notice" lang="{{ page.locale }}">This page has not been translated yet.</div>
    {% endif %}<article class="markdown">
      {{ page.body_html | safe }}
    </article>
    {% if page.edit_url %}<a class="edit-this-page" href="{{ page.edit_url }}" target="_blank" rel="noopener noreferrer">Edit this page</a>
    {% endif %}{% if page.previous or page.next %}<nav class="pagination-nav" aria-label="Docs pages">
      {% if page.previous %}<a class="pagination-nav__link pagination-nav__link--prev" href="{{ page.previous.href }}"><span class="pagination-nav__sublabel">Previous</span>{{ page.previous.label }}</a>
      {% endif %}{% if page.next %}<a class="pagination-nav__link pagination-nav__link--next" href="{{ page.next.href }}"><span class="pagination-nav__sublabel">Next</span>{{ page.next.label }}</a>
      {% endif %}
    </nav>
    {% endif %}
  </main>
  {% if page.toc %}<aside class="toc">
    <ul>
      {% for entry in page.toc %}<li class="toc-level-{{ entry.level }}"><a href="#{{ entry.id }}">{{ entry.title }}</a></li>
      {% endfor %}
    </ul>
  </aside>
  {% endif %}
</div>
{% endblock %}
"##;

const NOT_FOUND_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block content %}
<main class="container not-found">
  <h1 class="hero__title">Page Not Found</h1>
  <p>We could not find what you were looking for.</p>
  <p><a href="{{ theme.navbar.home }}">Back to the start page</a></p>
</main>
{% endblock %}
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureFragment;
    use crate::page::{FeatureGrid, HeroHeader, PageLink, SidebarGroup, SidebarItem, TocItem};
    use crate::theme::{FooterDescriptor, NavbarDescriptor, SyntaxThemes, ThemeLink};
    use marquee_config::FooterStyle;

    fn theme() -> ThemeDescriptor {
        ThemeDescriptor {
            locale: "en".to_string(),
            navbar: NavbarDescriptor {
                title: "Nextino".to_string(),
                home: "/".to_string(),
                logo: None,
                left: vec![
                    ThemeLink {
                        label: "Docs".to_string(),
                        href: Some("/intro/".to_string()),
                        external: false,
                    },
                    ThemeLink {
                        label: "Missing".to_string(),
                        href: None,
                        external: false,
                    },
                ],
                right: vec![],
            },
            footer: FooterDescriptor {
                style: FooterStyle::Dark,
                columns: vec![],
                copyright: Some("Copyright © Nextino".to_string()),
            },
            syntax: SyntaxThemes {
                light: "github".to_string(),
                dark: "dracula".to_string(),
            },
            image: None,
        }
    }

    fn head(title: &str) -> Head {
        Head {
            lang: "en".to_string(),
            title: title.to_string(),
            description: None,
            base_url: "/".to_string(),
            canonical: "https://nextino.cc/".to_string(),
            favicon: None,
            stylesheets: vec!["/assets/main.css".to_string()],
            scripts: vec![],
            mermaid: false,
            alternates: vec![Alternate {
                lang: "ka".to_string(),
                href: "https://nextino.cc/ka/".to_string(),
            }],
            inline_script: None,
        }
    }

    #[test]
    fn renders_homepage_sections_in_order() {
        let engine = TemplateEngine::new().unwrap();
        let page = HomePage {
            locale: "en".to_string(),
            route: "/".to_string(),
            document_title: "Nextino".to_string(),
            description: None,
            header: HeroHeader {
                logo: None,
                title: "Nextino Framework".to_string(),
                tagline: "The Next Step for Arduino".to_string(),
                actions: vec![],
            },
            features: Some(FeatureGrid {
                features: vec![FeatureFragment {
                    key: "modular".to_string(),
                    title: "Modular <Architecture>".to_string(),
                    icon_url: "/img/blocks.svg".to_string(),
                    description_html: "A <b>clean</b> structure".to_string(),
                }],
            }),
            narrative: None,
        };

        let html = engine.render_home(&page, &theme(), &head("Nextino")).unwrap();

        let hero = html.find("hero__title").unwrap();
        let grid = html.find("features__grid").unwrap();
        assert!(hero < grid);
        assert!(html.contains(r#"id="feature-modular""#));
        assert!(html.contains("Modular &lt;Architecture&gt;"));
        assert!(html.contains("A <b>clean</b> structure"));
        assert!(html.contains(r#"<a class="navbar__link link--dead">Missing</a>"#));
        assert!(html.contains("footer--dark"));
        assert!(html.contains(r#"hreflang="ka""#));
    }

    #[test]
    fn renders_doc_page() {
        let engine = TemplateEngine::new().unwrap();
        let page = DocPage {
            locale: "en".to_string(),
            id: "intro".to_string(),
            route: "/intro/".to_string(),
            title: "Intro".to_string(),
            document_title: "Intro | Nextino".to_string(),
            description: Some("Start here".to_string()),
            body_html: "<h1 id=\"intro\">Intro</h1>".to_string(),
            toc: vec![TocItem {
                title: "Install".to_string(),
                id: "install".to_string(),
                level: 2,
            }],
            sidebar: vec![SidebarGroup {
                label: "Start".to_string(),
                items: vec![
                    SidebarItem {
                        label: "Intro".to_string(),
                        href: Some("/intro/".to_string()),
                        active: true,
                    },
                    SidebarItem {
                        label: "missing-doc".to_string(),
                        href: None,
                        active: false,
                    },
                ],
            }],
            previous: None,
            next: Some(PageLink {
                label: "Roadmap".to_string(),
                href: "/roadmap/".to_string(),
            }),
            edit_url: Some("https://github.com/magradze/Nextino/tree/main/docs/intro.md".to_string()),
            fallback: false,
        };

        let html = engine
            .render_doc(&page, &theme(), &head("Intro | Nextino"))
            .unwrap();

        assert!(html.contains("<title>Intro | Nextino</title>"));
        assert!(html.contains(r#"<h1 id="intro">Intro</h1>"#));
        assert!(html.contains("sidebar__link--active"));
        assert!(html.contains(r#"<a class="sidebar__link link--dead">missing-doc</a>"#));
        assert!(html.contains(r##"<a href="#install">Install</a>"##));
        assert!(html.contains("Edit this page"));
        assert!(!html.contains("pagination-nav__link--prev"));
        assert!(html.contains(r#"data-syntax-dark="dracula""#));
    }

    #[test]
    fn renders_not_found() {
        let engine = TemplateEngine::new().unwrap();
        let html = engine.render_not_found(&theme(), &head("Page Not Found")).unwrap();
        assert!(html.contains("Page Not Found"));
        assert!(html.contains("Copyright © Nextino"));
    }
}
