//! Isolating the slice of a page that belongs to one heading.
//!
//! Ballotpedia articles are flat: `h2` headings and `table` elements sit side
//! by side in the content flow. A section is "every table after the start
//! heading and before the first end heading", found by walking headings and
//! tables in document order.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::ParseError;

static HEADINGS_AND_TABLES: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2, table").expect("static selector"));
static TR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("static selector"));
static TD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").expect("static selector"));
static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("static selector"));

/// Boundary description for one section of a page.
///
/// `start` must be a substring of some `h2`'s text; the section runs from
/// there to the first later `h2` matching any of `ends`, or to the end of the
/// document when none does. `table_class` keeps only tables carrying that
/// class, and `first_only` truncates to the first table found.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    pub start: &'a str,
    pub ends: &'a [&'a str],
    pub table_class: Option<&'a str>,
    pub first_only: bool,
}

/// Collect the tables belonging to `section`, in document order.
pub fn tables_in<'a>(
    document: &'a Html,
    section: &Section<'_>,
    page: &str,
) -> Result<Vec<ElementRef<'a>>, ParseError> {
    let mut started = false;
    let mut tables = Vec::new();

    for element in document.select(&HEADINGS_AND_TABLES) {
        if element.value().name() == "h2" {
            let text = element_text(element);
            if !started {
                started = text.contains(section.start);
            } else if section.ends.iter().any(|end| text.contains(end)) {
                break;
            }
            continue;
        }
        if !started {
            continue;
        }
        if let Some(class) = section.table_class {
            if !element.value().classes().any(|c| c == class) {
                continue;
            }
        }
        tables.push(element);
        if section.first_only {
            break;
        }
    }

    if !started {
        return Err(ParseError::HeadingNotFound {
            page: page.to_string(),
            heading: section.start.to_string(),
        });
    }
    Ok(tables)
}

/// Every `tr` of a table, header included.
pub fn rows<'a>(table: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    table.select(&TR)
}

/// Data rows of a table: every `tr` after the header row.
pub fn data_rows<'a>(table: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    rows(table).skip(1)
}

/// The `td` cells of a row.
pub fn cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    row.select(&TD).collect()
}

/// Href of the first anchor inside a cell.
pub fn first_href<'a>(cell: ElementRef<'a>) -> Option<&'a str> {
    cell.select(&ANCHOR)
        .next()
        .and_then(|a| a.value().attr("href"))
}

/// All of an element's text, concatenated as-is.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Cell text the way the tables are read: each text node trimmed, empty
/// fragments dropped, the rest joined without separators.
pub fn cell_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}
