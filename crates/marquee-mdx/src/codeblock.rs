//! Code block extraction and parsing.

/// Programming language of a code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    Cpp,
    C,
    Ini,
    Python,
    Json,
    Yaml,
    Toml,
    Bash,
    Mermaid,
    #[default]
    Unknown,
}

impl Language {
    /// Parse language from code fence info string.
    pub fn from_info(info: &str) -> Self {
        let lang = info.split_whitespace().next().unwrap_or("");
        match lang.to_lowercase().as_str() {
            "cpp" | "c++" | "ino" | "arduino" => Self::Cpp,
            "c" | "h" => Self::C,
            "ini" | "platformio" => Self::Ini,
            "py" | "python" => Self::Python,
            "json" => Self::Json,
            "yaml" | "yml" => Self::Yaml,
            "toml" => Self::Toml,
            "bash" | "sh" | "shell" => Self::Bash,
            "mermaid" => Self::Mermaid,
            _ => Self::Unknown,
        }
    }

    /// CSS class suffix used by syntax highlighters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cpp => "cpp",
            Self::C => "c",
            Self::Ini => "ini",
            Self::Python => "python",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Bash => "bash",
            Self::Mermaid => "mermaid",
            Self::Unknown => "text",
        }
    }
}

/// A code block and the options from its fence info string.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub language: Language,

    /// Source code content
    pub source: String,

    /// Optional title from the info string
    pub title: Option<String>,

    /// `showLineNumbers` was given
    pub line_numbers: bool,
}

impl CodeBlock {
    pub fn new(info: &str, source: String) -> Self {
        Self {
            language: Language::from_info(info),
            source,
            title: extract_title(info),
            line_numbers: info.split_whitespace().any(|w| w == "showLineNumbers"),
        }
    }

    /// Check if this block is a diagram rather than code.
    pub fn is_diagram(&self) -> bool {
        self.language == Language::Mermaid
    }
}

/// Extract a title from code fence info string if present.
///
/// Supports formats like:
/// - `cpp title="main.cpp"`
/// - `cpp title=main.cpp`
pub fn extract_title(info: &str) -> Option<String> {
    // Try title="..." format
    if let Some(start) = info.find("title=\"") {
        let rest = &info[start + 7..];
        if let Some(end) = rest.find('"') {
            return Some(rest[..end].to_string());
        }
    }

    // Try title=... format (without quotes)
    if let Some(start) = info.find("title=") {
        let rest = &info[start + 6..];
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let title = rest[..end].trim_matches('"');
        if !title.is_empty() {
            return Some(title.to_string());
        }
    }

    None
}
