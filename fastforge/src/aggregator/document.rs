//! Line-level model of a Python aggregator file

/// Classification of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Part of a top-level `import`/`from` statement
    Import,
    /// Anything else
    Other,
}

/// Line terminator a document is written back with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// Dominant terminator of `text`; ties and text without newlines use `\n`
    #[must_use]
    pub fn detect(text: &str) -> Self {
        let total = text.matches('\n').count();
        let crlf = text.matches("\r\n").count();
        if crlf * 2 > total {
            Self::CrLf
        } else {
            Self::Lf
        }
    }

    /// Terminator text
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Line {
    text: String,
    kind: LineKind,
}

/// Ordered lines of an aggregator file, parsed once and mutated in place
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatorDocument {
    lines: Vec<Line>,
    ending: LineEnding,
}

impl AggregatorDocument {
    /// Parse file contents
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut in_docstring = false;
        let mut continuation = false;
        let mut paren_depth: i32 = 0;

        for raw in text.lines() {
            let kind = if continuation || paren_depth > 0 || (!in_docstring && is_import_start(raw))
            {
                LineKind::Import
            } else {
                LineKind::Other
            };

            if kind == LineKind::Import {
                paren_depth += paren_balance(raw);
                continuation = raw.trim_end().ends_with('\\');
            } else {
                paren_depth = 0;
                continuation = false;
                if docstring_delimiters(raw) % 2 == 1 {
                    in_docstring = !in_docstring;
                }
            }

            lines.push(Line {
                text: raw.to_string(),
                kind,
            });
        }

        Self {
            lines,
            ending: LineEnding::detect(text),
        }
    }

    /// Serialize back to text, every line terminated with the detected ending
    #[must_use]
    pub fn render(&self) -> String {
        let ending = self.ending.as_str();
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text);
            out.push_str(ending);
        }
        out
    }

    /// Whether `entry` already occurs somewhere in the file
    ///
    /// The entry may share its line with other text, such as a trailing
    /// `# noqa` comment, but must not be part of a longer name:
    /// `from .endpoints import post` is not found in
    /// `from .endpoints import posts`.
    #[must_use]
    pub fn contains_entry(&self, entry: &str) -> bool {
        let entry = entry.trim();
        !entry.is_empty()
            && self
                .lines
                .iter()
                .any(|line| occurs_bounded(&line.text, entry))
    }

    /// Index of the last line belonging to a top-level import
    #[must_use]
    pub fn last_import(&self) -> Option<usize> {
        self.lines
            .iter()
            .rposition(|line| line.kind == LineKind::Import)
    }

    /// Index of the last line of the last statement that calls a method on `anchor`
    #[must_use]
    pub fn last_call_on(&self, anchor: &str) -> Option<usize> {
        let prefix = format!("{anchor}.");
        self.lines
            .iter()
            .rposition(|line| line.kind == LineKind::Other && line.text.starts_with(&prefix))
            .map(|start| self.statement_end(start))
    }

    /// Index of the last line of the top-level statement defining `anchor`
    #[must_use]
    pub fn definition_of(&self, anchor: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.kind == LineKind::Other && defines(&line.text, anchor))
            .map(|start| self.statement_end(start))
    }

    /// First definition of `name` at any indentation, e.g. a class attribute
    ///
    /// Returns the index of the statement's last line and the indentation of
    /// its first line.
    #[must_use]
    pub fn field_of(&self, name: &str) -> Option<(usize, String)> {
        let start = self.lines.iter().position(|line| {
            line.kind == LineKind::Other && defines(line.text.trim_start(), name)
        })?;
        let text = &self.lines[start].text;
        let indent = text[..text.len() - text.trim_start().len()].to_string();
        Some((self.statement_end(start), indent))
    }

    /// Whether the last line exists and is not blank
    #[must_use]
    pub fn ends_with_content(&self) -> bool {
        self.lines
            .last()
            .is_some_and(|line| !line.text.trim().is_empty())
    }

    /// Insert a line after `index`
    pub fn insert_after(&mut self, index: usize, text: &str, kind: LineKind) {
        let at = (index + 1).min(self.lines.len());
        self.lines.insert(
            at,
            Line {
                text: text.to_string(),
                kind,
            },
        );
    }

    /// Append a line at the end
    pub fn push(&mut self, text: &str, kind: LineKind) {
        self.lines.push(Line {
            text: text.to_string(),
            kind,
        });
    }

    /// Follow an open bracket from `start` to the line that closes it
    fn statement_end(&self, start: usize) -> usize {
        let mut depth = 0;
        for (offset, line) in self.lines[start..].iter().enumerate() {
            depth += paren_balance(&line.text);
            if depth <= 0 {
                return start + offset;
            }
        }
        self.lines.len().saturating_sub(1)
    }
}

fn is_import_start(line: &str) -> bool {
    line.starts_with("import ") || line.starts_with("from ")
}

/// `name = ...` or `name: ...`, but not `name == ...` or `name_other = ...`
fn defines(line: &str, name: &str) -> bool {
    line.strip_prefix(name).is_some_and(|rest| {
        let rest = rest.trim_start();
        (rest.starts_with('=') && !rest.starts_with("==")) || rest.starts_with(':')
    })
}

fn occurs_bounded(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(|c| is_name_char(c) || c == '.') && !after.is_some_and(is_name_char)
    })
}

const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn paren_balance(line: &str) -> i32 {
    let code = line.split('#').next().unwrap_or_default();
    code.chars().fold(0, |depth, c| match c {
        '(' | '[' | '{' => depth + 1,
        ')' | ']' | '}' => depth - 1,
        _ => depth,
    })
}

fn docstring_delimiters(line: &str) -> usize {
    line.matches("\"\"\"").count() + line.matches("'''").count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTER: &str = "\
from fastapi import APIRouter
from .endpoints import (
    users,
    items,
)

api_router = APIRouter()
api_router.include_router(
    users.router,
    prefix=\"/users\",
)
api_router.include_router(items.router, prefix=\"/items\", tags=[\"items\"])
";

    #[test]
    fn test_parenthesised_import_is_one_block() {
        let doc = AggregatorDocument::parse(ROUTER);
        assert_eq!(doc.last_import(), Some(4));
        assert!(doc.contains_entry("users,"));
    }

    #[test]
    fn test_last_call_spans_multiline_statement() {
        let doc = AggregatorDocument::parse(ROUTER);
        assert_eq!(doc.last_call_on("api_router"), Some(11));

        let single = AggregatorDocument::parse(
            "api_router = APIRouter()\napi_router.include_router(\n    a.router,\n)\n",
        );
        assert_eq!(single.last_call_on("api_router"), Some(3));
    }

    #[test]
    fn test_definition_of_anchor() {
        let doc = AggregatorDocument::parse(ROUTER);
        assert_eq!(doc.definition_of("api_router"), Some(6));
        assert_eq!(doc.definition_of("missing"), None);

        let annotated = AggregatorDocument::parse("router: APIRouter = APIRouter(\n    prefix='/x',\n)\n");
        assert_eq!(annotated.definition_of("router"), Some(2));
    }

    #[test]
    fn test_docstring_lines_are_not_imports() {
        let doc = AggregatorDocument::parse("\"\"\"Models.\n\nfrom here import nothing\n\"\"\"\n");
        assert_eq!(doc.last_import(), None);
    }

    #[test]
    fn test_indented_import_is_not_top_level() {
        let doc = AggregatorDocument::parse("if TYPE_CHECKING:\n    from .a import A\n");
        assert_eq!(doc.last_import(), None);
    }

    #[test]
    fn test_render_normalises_trailing_newline() {
        assert_eq!(AggregatorDocument::parse("a\nb").render(), "a\nb\n");
        assert_eq!(AggregatorDocument::parse("a\nb\n").render(), "a\nb\n");
        assert_eq!(AggregatorDocument::parse("").render(), "");
    }

    #[test]
    fn test_contains_entry_ignores_trailing_comment() {
        let doc = AggregatorDocument::parse("from .post import Post  # noqa: F401\n");
        assert!(doc.contains_entry("from .post import Post"));
    }

    #[test]
    fn test_contains_entry_respects_name_boundaries() {
        let doc = AggregatorDocument::parse(
            "from .endpoints import posts\nv1_router.include_router(a.router)\n",
        );
        assert!(!doc.contains_entry("from .endpoints import post"));
        assert!(!doc.contains_entry("router.include_router(a.router)"));
        assert!(doc.contains_entry("from .endpoints import posts"));
    }

    #[test]
    fn test_field_of_finds_class_attribute() {
        let doc = AggregatorDocument::parse(
            "class Settings(BaseSettings):\n    DATABASE_URL: str = (\n        \"sqlite://\"\n    )\n    DEBUG: bool = False\n",
        );
        assert_eq!(doc.field_of("DATABASE_URL"), Some((3, "    ".to_string())));
        assert_eq!(doc.field_of("DATABASE"), None);
    }

    #[test]
    fn test_crlf_documents_render_with_crlf() {
        let doc = AggregatorDocument::parse("\"\"\"Models.\"\"\"\r\nfrom .user import User\r\n");
        assert_eq!(doc.ending, LineEnding::CrLf);
        assert_eq!(doc.render(), "\"\"\"Models.\"\"\"\r\nfrom .user import User\r\n");

        assert_eq!(LineEnding::detect("a\nb\r\nc\n"), LineEnding::Lf);
        assert_eq!(LineEnding::detect("no newline"), LineEnding::Lf);
    }
}
