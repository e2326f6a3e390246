//! Markdown-to-text preparation for CVs written in markdown.
//!
//! Uses pulldown-cmark for proper CommonMark parsing rather than regex-based
//! stripping. Unlike prose linters, headings are kept: in a CV the heading
//! text ("Experience", "Skills") is exactly what section coverage looks for.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Convert a markdown CV to plain text.
///
/// Removes:
/// - YAML frontmatter
/// - Fenced and indented code blocks
/// - HTML tags
/// - Link and image targets
/// - Emphasis markers and table pipes
///
/// Keeps:
/// - Heading text, each on its own line
/// - Paragraph, list item and blockquote text, one block per line
/// - Inline code text (often a skill name)
/// - Table cell text, one row per line
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn to_plain_text(text: &str) -> String {
    let text = strip_frontmatter(text);

    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(&text, options);

    let mut result = String::with_capacity(text.len());
    let mut in_code_block = false;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,

            Event::Text(t) | Event::Code(t) if !in_code_block => {
                result.push_str(&t);
            }
            Event::SoftBreak => result.push(' '),
            Event::HardBreak => result.push('\n'),

            Event::End(TagEnd::TableCell) => result.push(' '),
            Event::End(
                TagEnd::Heading(_)
                | TagEnd::Paragraph
                | TagEnd::Item
                | TagEnd::TableHead
                | TagEnd::TableRow,
            ) => end_line(&mut result),

            _ => {}
        }
    }

    result.trim_end().to_string()
}

/// Terminate the current line unless it is already terminated.
fn end_line(out: &mut String) {
    let trimmed = out.trim_end_matches(' ').len();
    out.truncate(trimmed);
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

/// Strip YAML frontmatter delimited by `---` lines.
fn strip_frontmatter(text: &str) -> String {
    let trimmed = text.trim_start();
    if !trimmed.starts_with("---") {
        return text.to_string();
    }

    let after_opening = &trimmed[3..];
    let Some(close_pos) = after_opening.find("\n---") else {
        return text.to_string();
    };

    let remainder = &after_opening[close_pos + 4..];
    remainder
        .strip_prefix('\n')
        .unwrap_or(remainder)
        .to_string()
}
