//! Typed walker over a parsed Chess-Results page.
//!
//! Layout detection works on element kinds and classes instead of chained
//! selector queries, so every traversal rule is a named function.

use scraper::{ElementRef, Html, Selector};

/// Class marking the data table on every Chess-Results report
pub const DATA_TABLE_CLASS: &str = "CRs1";

/// Colour marker for the white side in nested pairing tables
pub const WHITE_MARKER_CLASS: &str = "FarbewT";

/// Colour marker for the black side in nested pairing tables
pub const BLACK_MARKER_CLASS: &str = "FarbesT";

/// Element tag name check
pub fn is_tag(el: &ElementRef, name: &str) -> bool {
    el.value().name().eq_ignore_ascii_case(name)
}

/// Class membership check
pub fn has_class(el: &ElementRef, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// Text content, trimmed
pub fn text_of(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Direct element children
pub fn child_elements<'a>(el: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap).collect()
}

/// First direct child satisfying `pred`
pub fn first_child_matching<'a, P>(el: &ElementRef<'a>, pred: P) -> Option<ElementRef<'a>>
where
    P: Fn(&ElementRef<'a>) -> bool,
{
    el.children().filter_map(ElementRef::wrap).find(|child| pred(child))
}

/// Descendants (excluding `el`) satisfying `pred`, in document order
pub fn descendants_matching<'a, P>(el: &ElementRef<'a>, pred: P) -> Vec<ElementRef<'a>>
where
    P: Fn(&ElementRef<'a>) -> bool,
{
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|node| pred(node))
        .collect()
}

/// Outermost ancestor strictly below the first ancestor matching `stop`.
///
/// Returns `None` when `el` is a direct child of the stopping element. When no
/// ancestor matches `stop`, the walk ends at the root element.
pub fn ancestor_until<'a, P>(el: &ElementRef<'a>, stop: P) -> Option<ElementRef<'a>>
where
    P: Fn(&ElementRef<'a>) -> bool,
{
    let mut outermost = None;
    for ancestor in el.ancestors().filter_map(ElementRef::wrap) {
        if stop(&ancestor) {
            break;
        }
        outermost = Some(ancestor);
    }
    outermost
}

/// Nearest enclosing `table` element
pub fn enclosing_table<'a>(el: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| is_tag(ancestor, "table"))
}

/// The report's data table.
///
/// The marker class normally sits on the `table` itself; when it is on a
/// wrapper, the first table inside the wrapper is used.
pub fn data_table(document: &Html) -> Option<ElementRef<'_>> {
    let selector = Selector::parse(&format!(".{}", DATA_TABLE_CLASS)).ok()?;
    let marked = document.select(&selector).next()?;
    if is_tag(&marked, "table") {
        return Some(marked);
    }
    descendants_matching(&marked, |el| is_tag(el, "table"))
        .into_iter()
        .next()
}

/// Rows belonging to `table` itself, not to tables nested in its cells
pub fn table_rows<'a>(table: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    descendants_matching(table, |el| is_tag(el, "tr"))
        .into_iter()
        .filter(|row| enclosing_table(row).map(|t| t.id()) == Some(table.id()))
        .collect()
}

/// Direct `td`/`th` children of a row
pub fn child_cells<'a>(row: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    child_elements(row)
        .into_iter()
        .filter(|cell| is_tag(cell, "td") || is_tag(cell, "th"))
        .collect()
}

/// Row made of `th` cells
pub fn is_header_row(row: &ElementRef) -> bool {
    first_child_matching(row, |cell| is_tag(cell, "th")).is_some()
}

/// Header row of the data table: first row with a `th`, else the first row
pub fn header_row<'a>(rows: &[ElementRef<'a>]) -> Option<ElementRef<'a>> {
    rows.iter()
        .find(|row| is_header_row(row))
        .or_else(|| rows.first())
        .copied()
}

/// Trimmed text of each header cell
pub fn header_labels(row: &ElementRef) -> Vec<String> {
    child_cells(row).iter().map(text_of).collect()
}

/// Tables nested anywhere inside a row
pub fn nested_tables<'a>(row: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    descendants_matching(row, |el| is_tag(el, "table"))
}
