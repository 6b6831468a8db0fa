//! Headcase converts all-caps and title-case Markdown headings to sentence
//! case, keeping a configured list of proper nouns in their canonical casing.
//!
//! # Example
//!
//! ```
//! use headcase::{ProperNouns, convert_document};
//!
//! let nouns = ProperNouns::from_lines("VS Code\nmacOS\n");
//! let input = "# GETTING STARTED ON MACOS\n";
//! let output = convert_document(input, &nouns);
//! assert_eq!(output, "# Getting started on macOS\n");
//! ```

pub mod case;
pub mod config;
pub mod extract;
pub mod nouns;
pub mod segment;

pub use case::to_sentence_case;
pub use config::{CONFIG_FILE_NAME, Config, ConfigError};
pub use extract::{
    Dictionary, DictionaryError, UnknownWord, WordAnalysis, analyze_words, unknown_heading_words,
};
pub use nouns::{NounsError, ProperNouns};
pub use segment::{HeadingLine, Span, SpanKind, TitleField, segment, split_line_ending};

/// Converts every heading and eligible frontmatter title in a document to
/// sentence case.
///
/// # Arguments
///
/// * `input` - The full Markdown document.
/// * `nouns` - Proper nouns whose casing must be preserved.
///
/// # Returns
///
/// The converted document. Code blocks, frontmatter structure, body text,
/// and line terminators are reproduced byte for byte; only heading text and
/// eligible frontmatter values change.
pub fn convert_document(input: &str, nouns: &ProperNouns) -> String {
    let mut output = String::with_capacity(input.len());

    for span in segment::segment(input) {
        match span.kind {
            SpanKind::Heading { level } => {
                let (content, terminator) = split_line_ending(span.text);
                match HeadingLine::parse(content) {
                    Some(heading) => {
                        output.push_str(&"#".repeat(level as usize));
                        output.push(' ');
                        output.push_str(&to_sentence_case(heading.text, nouns));
                        output.push_str(terminator);
                    }
                    None => output.push_str(span.text),
                }
            }
            SpanKind::FrontmatterTitle => {
                let (content, terminator) = split_line_ending(span.text);
                match TitleField::parse(content) {
                    Some(field) => {
                        output.push_str(field.prefix);
                        output.push_str(&to_sentence_case(field.value, nouns));
                        output.push_str(field.suffix);
                        output.push_str(terminator);
                    }
                    None => output.push_str(span.text),
                }
            }
            SpanKind::Text | SpanKind::Code | SpanKind::FrontmatterBody => {
                output.push_str(span.text);
            }
        }
    }
    output
}
