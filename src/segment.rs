//! Document segmentation.
//!
//! Splits a markdown document into ordered, non-overlapping spans so the case
//! converter touches heading text and eligible frontmatter values and nothing
//! else. Concatenating the spans reproduces the input byte for byte.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

static TITLE_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(\s*(title|linkTitle|description)\s*=\s*")(.*)("\s*)$"#).unwrap()
});

static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[+\s*([^\[\]]+?)\s*\]+\s*$").unwrap());

/// What a span of the document contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// Ordinary body text.
    Text,
    /// An ATX heading line.
    Heading {
        /// Number of `#` markers, 1 through 6.
        level: u8,
    },
    /// A fenced or indented code block, fence lines included.
    Code,
    /// Frontmatter content that is not an eligible title field.
    FrontmatterBody,
    /// A frontmatter `key = "value"` line whose quoted value is converted.
    FrontmatterTitle,
}

/// A classified region of a document.
///
/// Spans come back in document order, never overlap, and leave no gaps.
/// Line terminators stay attached to the span that owns the line.
#[derive(Debug, Clone, PartialEq)]
pub struct Span<'a> {
    pub kind: SpanKind,
    pub text: &'a str,
    pub range: Range<usize>,
}

/// An ATX heading line, split into marker level and text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingLine<'a> {
    pub level: u8,
    pub text: &'a str,
}

impl<'a> HeadingLine<'a> {
    /// Parses a heading from a single line with its terminator stripped.
    ///
    /// A heading is 1 to 6 `#` markers at the start of the line, at least one
    /// whitespace character, then non-blank text. Seven or more markers, a
    /// missing space, or an indented marker all mean the line is not a
    /// heading.
    pub fn parse(content: &'a str) -> Option<Self> {
        let level = content.bytes().take_while(|&b| b == b'#').count();
        if !(1..=6).contains(&level) {
            return None;
        }
        let rest = &content[level..];
        let text = rest.trim_start();
        if text.is_empty() || text.len() == rest.len() {
            return None;
        }
        Some(Self {
            level: level as u8,
            text,
        })
    }
}

/// A frontmatter `key = "value"` line split so only the value gets rewritten.
///
/// `prefix` runs through the opening quote and `suffix` starts at the closing
/// quote, so `prefix + value + suffix` reproduces the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleField<'a> {
    pub key: &'a str,
    pub prefix: &'a str,
    pub value: &'a str,
    pub suffix: &'a str,
}

impl<'a> TitleField<'a> {
    /// Parses a `title`, `linkTitle`, or `description` assignment with a
    /// quoted value. Unquoted values and other keys do not match.
    pub fn parse(content: &'a str) -> Option<Self> {
        let caps = TITLE_FIELD_RE.captures(content)?;
        Some(Self {
            prefix: caps.get(1)?.as_str(),
            key: caps.get(2)?.as_str(),
            value: caps.get(3)?.as_str(),
            suffix: caps.get(4)?.as_str(),
        })
    }
}

/// Splits a document into classified spans.
///
/// The scan is a single pass over the lines. Frontmatter is recognized only
/// when the first line is exactly `+++` and a closing `+++` line exists;
/// otherwise the whole document is ordinary content. Within ordinary content,
/// fenced code is claimed first, then indented code, then heading lines;
/// whatever remains is plain text. An unclosed fence swallows the rest of the
/// document as one code span.
pub fn segment(document: &str) -> Vec<Span<'_>> {
    let lines = split_lines(document);
    if lines.is_empty() {
        return vec![Span {
            kind: SpanKind::Text,
            text: document,
            range: 0..0,
        }];
    }

    let mut spans = Vec::new();
    let body_from = match frontmatter_close(&lines) {
        Some(close) => {
            emit_frontmatter(document, &lines[..=close], &mut spans);
            close + 1
        }
        None => 0,
    };
    emit_body(document, &lines[body_from..], &mut spans);
    spans
}

/// Splits a single line into its content and line terminator.
pub fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(content) = line.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = line.strip_suffix('\n') {
        (content, "\n")
    } else {
        (line, "")
    }
}

/// One physical line: raw text with terminator, content without it, and the
/// byte offset of the line start in the document.
struct Line<'a> {
    raw: &'a str,
    content: &'a str,
    start: usize,
}

fn split_lines(document: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut start = 0;
    for raw in document.split_inclusive('\n') {
        let content = match raw.strip_suffix('\n') {
            Some(s) => s.strip_suffix('\r').unwrap_or(s),
            None => raw,
        };
        lines.push(Line {
            raw,
            content,
            start,
        });
        start += raw.len();
    }
    lines
}

/// Index of the closing `+++` line, when the document opens with one.
fn frontmatter_close(lines: &[Line<'_>]) -> Option<usize> {
    if lines[0].content != "+++" {
        return None;
    }
    lines
        .iter()
        .skip(1)
        .position(|line| line.content == "+++")
        .map(|i| i + 1)
}

fn emit_frontmatter<'a>(document: &'a str, lines: &[Line<'a>], spans: &mut Vec<Span<'a>>) {
    let mut section: Option<&str> = None;
    let mut body_run: Option<usize> = None;

    for (i, line) in lines.iter().enumerate() {
        let is_delimiter = i == 0 || i == lines.len() - 1;
        if !is_delimiter {
            if let Some(caps) = SECTION_RE.captures(line.content) {
                // A section header resets what `title` means from here on.
                section = caps.get(1).map(|m| m.as_str());
            } else if let Some(field) = TitleField::parse(line.content)
                && is_eligible_title(section, field.key)
            {
                flush_run(document, lines, &mut body_run, i, spans);
                spans.push(make_span(
                    document,
                    &lines[i..=i],
                    SpanKind::FrontmatterTitle,
                ));
                continue;
            }
        }
        if body_run.is_none() {
            body_run = Some(i);
        }
    }
    flush_run(document, lines, &mut body_run, lines.len(), spans);
}

/// Top-level `title`, `linkTitle`, and `description` values are eligible for
/// conversion; inside a section only `title` under `[menu.*]` is.
fn is_eligible_title(section: Option<&str>, key: &str) -> bool {
    match section {
        None => matches!(key, "title" | "linkTitle" | "description"),
        Some(name) => key == "title" && name.starts_with("menu."),
    }
}

fn emit_body<'a>(document: &'a str, lines: &[Line<'a>], spans: &mut Vec<Span<'a>>) {
    let mut text_run: Option<usize> = None;
    let mut i = 0;

    while i < lines.len() {
        let content = lines[i].content;
        if content.starts_with("```") {
            flush_text(document, lines, &mut text_run, i, spans);
            let end = match lines[i + 1..]
                .iter()
                .position(|line| line.content.trim_end() == "```")
            {
                Some(offset) => i + 1 + offset,
                // Unclosed fence: the rest of the document is code.
                None => lines.len() - 1,
            };
            spans.push(make_span(document, &lines[i..=end], SpanKind::Code));
            i = end + 1;
        } else if is_indented(content) && !is_blank(content) {
            flush_text(document, lines, &mut text_run, i, spans);
            // The run extends through interior blank lines up to the last
            // indented line; trailing blanks are not part of it.
            let mut last = i;
            let mut j = i + 1;
            while j < lines.len() {
                let next = lines[j].content;
                if is_indented(next) && !is_blank(next) {
                    last = j;
                } else if !is_blank(next) {
                    break;
                }
                j += 1;
            }
            spans.push(make_span(document, &lines[i..=last], SpanKind::Code));
            i = last + 1;
        } else if let Some(heading) = HeadingLine::parse(content) {
            flush_text(document, lines, &mut text_run, i, spans);
            spans.push(make_span(
                document,
                &lines[i..=i],
                SpanKind::Heading {
                    level: heading.level,
                },
            ));
            i += 1;
        } else {
            if text_run.is_none() {
                text_run = Some(i);
            }
            i += 1;
        }
    }
    flush_text(document, lines, &mut text_run, lines.len(), spans);
}

fn is_indented(content: &str) -> bool {
    content.starts_with("    ") || content.starts_with('\t')
}

fn is_blank(content: &str) -> bool {
    content.trim().is_empty()
}

fn flush_run<'a>(
    document: &'a str,
    lines: &[Line<'a>],
    run: &mut Option<usize>,
    end: usize,
    spans: &mut Vec<Span<'a>>,
) {
    if let Some(start) = run.take() {
        spans.push(make_span(
            document,
            &lines[start..end],
            SpanKind::FrontmatterBody,
        ));
    }
}

fn flush_text<'a>(
    document: &'a str,
    lines: &[Line<'a>],
    run: &mut Option<usize>,
    end: usize,
    spans: &mut Vec<Span<'a>>,
) {
    if let Some(start) = run.take() {
        spans.push(make_span(document, &lines[start..end], SpanKind::Text));
    }
}

fn make_span<'a>(document: &'a str, lines: &[Line<'a>], kind: SpanKind) -> Span<'a> {
    let start = lines[0].start;
    let last = &lines[lines.len() - 1];
    let end = last.start + last.raw.len();
    Span {
        kind,
        text: &document[start..end],
        range: start..end,
    }
}
