//! HTML title extraction.
//!
//! Candidates are tried in a fixed priority order; the first one that is
//! non-empty after whitespace collapsing wins:
//!
//! 1. text of the first `.archive-title` element
//! 2. `og:title` meta content
//! 3. `twitter:title` meta content
//! 4. `<meta name="title">` content
//! 5. `<title>` text

use scraper::{Html, Selector};

use shelfmark_core::{collapse_whitespace, defaults};

/// Where a candidate title is read from.
#[derive(Debug, Clone, Copy)]
enum Source {
    /// Concatenated text of the first element carrying the class.
    Class(&'static str),
    /// Concatenated text of the element.
    Text(&'static str),
    /// The element's `content` attribute.
    Content(&'static str),
}

const PRIORITY: &[Source] = &[
    Source::Class(defaults::ARCHIVE_TITLE_CLASS),
    Source::Content(r#"meta[property="og:title"], meta[name="og:title"]"#),
    Source::Content(r#"meta[name="twitter:title"], meta[property="twitter:title"]"#),
    Source::Content(r#"meta[name="title"]"#),
    Source::Text("title"),
];

/// Extract the best available title from an HTML document.
///
/// Returns `None` when no candidate carries visible text.
pub fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    PRIORITY
        .iter()
        .find_map(|source| candidate(&document, *source))
}

fn candidate(document: &Html, source: Source) -> Option<String> {
    // Only the first matching element counts for each source.
    let raw = match source {
        Source::Class(class) => {
            let selector = Selector::parse(&format!(".{}", class)).ok()?;
            let element = document.select(&selector).next()?;
            element.text().collect::<String>()
        }
        Source::Text(selector) => {
            let selector = Selector::parse(selector).ok()?;
            let element = document.select(&selector).next()?;
            element.text().collect::<String>()
        }
        Source::Content(selector) => {
            let selector = Selector::parse(selector).ok()?;
            let element = document.select(&selector).next()?;
            element.value().attr("content")?.to_string()
        }
    };

    let title = collapse_whitespace(&raw);
    (!title.is_empty()).then_some(title)
}
