use std::collections::HashMap;

use scraper::{ElementRef, Html, Selector};

use crate::errors::ScrapeError;
use crate::text_manipulators::extract_cell_text;

/// One column header after the grouped header rows are flattened. `group`
/// is the over-header fragment ("Standard", "Total", ...) and is empty for
/// single-level headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub group: String,
    pub name: String,
}

#[derive(Debug)]
pub struct Table {
    pub headers: Vec<Header>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Index of the first column whose leaf name matches, constrained to
    /// the over-header group when one is given.
    pub fn column(&self, group: Option<&str>, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header.name == name && group.is_none_or(|g| header.group == g))
    }

    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows[row].get(column).map(String::as_str).unwrap_or("")
    }
}

/// Locates the first table whose caption contains `caption_marker`.
pub fn find_table(document: &Html, caption_marker: &str) -> Option<Table> {
    let table_selector = Selector::parse("table").unwrap();
    let caption_selector = Selector::parse("caption").unwrap();
    for table in document.select(&table_selector) {
        let Some(caption) = table.select(&caption_selector).next() else {
            continue;
        };
        if extract_cell_text(caption).contains(caption_marker) {
            return Some(parse_table(table));
        }
    }
    None
}

fn parse_table(table: ElementRef) -> Table {
    Table {
        headers: parse_headers(table),
        rows: parse_rows(table),
    }
}

fn parse_headers(table: ElementRef) -> Vec<Header> {
    let head_row_selector = Selector::parse("thead tr").unwrap();
    let head_cell_selector = Selector::parse("th, td").unwrap();
    let head_rows: Vec<_> = table.select(&head_row_selector).collect();
    let Some(leaf_row) = head_rows.last() else {
        return Vec::new();
    };

    // Expand the over-header row across its colspans so every leaf column
    // knows which group fragment it sits under.
    let mut groups: Vec<String> = Vec::new();
    if head_rows.len() > 1 {
        for cell in head_rows[head_rows.len() - 2].select(&head_cell_selector) {
            let span: usize = cell
                .value()
                .attr("colspan")
                .and_then(|value| value.parse().ok())
                .unwrap_or(1);
            let group = extract_cell_text(cell);
            for _ in 0..span {
                groups.push(group.clone());
            }
        }
    }

    leaf_row
        .select(&head_cell_selector)
        .enumerate()
        .map(|(index, cell)| Header {
            group: groups.get(index).cloned().unwrap_or_default(),
            name: extract_cell_text(cell),
        })
        .collect()
}

fn parse_rows(table: ElementRef) -> Vec<Vec<String>> {
    let body_row_selector = Selector::parse("tbody tr").unwrap();
    let cell_selector = Selector::parse("th, td").unwrap();
    let mut rows = Vec::new();
    for row in table.select(&body_row_selector) {
        // fbref repeats the header mid-table and pads with spacer rows.
        let class = row.value().attr("class").unwrap_or("");
        if class.contains("thead") || class.contains("spacer") {
            continue;
        }
        let cells: Vec<String> = row.select(&cell_selector).map(extract_cell_text).collect();
        if cells.iter().all(String::is_empty) {
            continue;
        }
        rows.push(cells);
    }
    rows
}

/// A located table plus the season and table names used in error context.
pub struct TableView<'a> {
    table: Table,
    season: &'a str,
    name: &'static str,
}

impl<'a> TableView<'a> {
    /// Finds the first table matching any of the caption markers. The
    /// wording of some captions varies across eras, hence a marker list.
    pub fn load(
        document: &Html,
        caption_markers: &[&str],
        name: &'static str,
        season: &'a str,
    ) -> Result<Self, ScrapeError> {
        for marker in caption_markers {
            if let Some(table) = find_table(document, marker) {
                return Ok(TableView {
                    table,
                    season,
                    name,
                });
            }
        }
        Err(ScrapeError::MissingTable {
            season: season.to_string(),
            caption: caption_markers[0].to_string(),
        })
    }

    pub fn column(&self, group: Option<&str>, name: &str) -> Result<usize, ScrapeError> {
        self.table
            .column(group, name)
            .ok_or_else(|| ScrapeError::MissingColumn {
                season: self.season.to_string(),
                table: self.name.to_string(),
                column: name.to_string(),
            })
    }

    pub fn rows(&self) -> usize {
        self.table.rows.len()
    }

    pub fn text(&self, row: usize, column: usize) -> &str {
        self.table.cell(row, column)
    }

    pub fn count(&self, row: usize, column: usize, column_name: &str) -> Result<u32, ScrapeError> {
        let raw = self.table.cell(row, column);
        // Larger counts carry thousands separators.
        raw.replace(',', "")
            .parse()
            .map_err(|_| self.cell_error(column_name, raw))
    }

    pub fn percent(&self, row: usize, column: usize, column_name: &str) -> Result<f32, ScrapeError> {
        let raw = self.table.cell(row, column);
        raw.parse().map_err(|_| self.cell_error(column_name, raw))
    }

    fn cell_error(&self, column: &str, value: &str) -> ScrapeError {
        ScrapeError::CellParse {
            season: self.season.to_string(),
            table: self.name.to_string(),
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    /// Row index per squad, for joining aux tables back onto standings rows.
    pub fn index_by_squad(&self, squad_column: usize) -> HashMap<String, usize> {
        self.table
            .rows
            .iter()
            .enumerate()
            .map(|(index, _)| (self.table.cell(index, squad_column).to_string(), index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUPED_TABLE: &str = r#"
        <table>
          <caption>Squad Shooting Table</caption>
          <thead>
            <tr><th colspan="1"></th><th colspan="3">Standard</th></tr>
            <tr><th>Squad</th><th>Gls</th><th>Sh</th><th>SoT</th></tr>
          </thead>
          <tbody>
            <tr><th>Arsenal</th><td>88</td><td>610</td><td>221</td></tr>
            <tr class="spacer"><td></td><td></td><td></td><td></td></tr>
            <tr class="thead"><td>Squad</td><td>Gls</td><td>Sh</td><td>SoT</td></tr>
            <tr><th>Chelsea</th><td>76</td><td>1,024</td><td>198</td></tr>
          </tbody>
        </table>"#;

    #[test]
    fn finds_table_by_caption_fragment() {
        let document = Html::parse_document(GROUPED_TABLE);
        assert!(find_table(&document, "Squad Shooting").is_some());
        assert!(find_table(&document, "Squad Passing").is_none());
    }

    #[test]
    fn flattens_grouped_headers_by_colspan() {
        let document = Html::parse_document(GROUPED_TABLE);
        let table = find_table(&document, "Squad Shooting").unwrap();
        assert_eq!(
            table.headers,
            vec![
                Header { group: String::new(), name: "Squad".into() },
                Header { group: "Standard".into(), name: "Gls".into() },
                Header { group: "Standard".into(), name: "Sh".into() },
                Header { group: "Standard".into(), name: "SoT".into() },
            ]
        );
        assert_eq!(table.column(Some("Standard"), "SoT"), Some(3));
        assert_eq!(table.column(None, "Squad"), Some(0));
        assert_eq!(table.column(Some("Total"), "SoT"), None);
    }

    #[test]
    fn skips_spacer_and_repeated_header_rows() {
        let document = Html::parse_document(GROUPED_TABLE);
        let table = find_table(&document, "Squad Shooting").unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.cell(0, 0), "Arsenal");
        assert_eq!(table.cell(1, 0), "Chelsea");
    }

    #[test]
    fn count_strips_thousands_separators() {
        let document = Html::parse_document(GROUPED_TABLE);
        let view = TableView::load(&document, &["Squad Shooting"], "shooting", "2020/2021").unwrap();
        let shots = view.column(Some("Standard"), "Sh").unwrap();
        assert_eq!(view.count(1, shots, "Sh").unwrap(), 1024);
    }

    #[test]
    fn missing_table_is_an_error() {
        let document = Html::parse_document("<p>no tables here</p>");
        let err = TableView::load(&document, &["Squad Shooting"], "shooting", "2020/2021")
            .err()
            .unwrap();
        assert!(matches!(err, ScrapeError::MissingTable { .. }));
    }
}
