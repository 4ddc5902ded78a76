//! Output formatting for the search command
//!
//! Tables are rendered with comfy-table; everything here goes to stdout.

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use tagscout::{ScanStats, SearchConfig};

/// Print a table with headers and rows
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    println!("{}", build_table(headers, rows));
}

fn build_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for row in rows {
        table.add_row(row);
    }

    table
}

/// Effective run parameters as label/value rows
pub fn parameter_rows(config: &SearchConfig) -> Vec<Vec<String>> {
    let path_or_none = |p: Option<&std::path::Path>| {
        p.map(|p| p.display().to_string()).unwrap_or_else(|| "(none)".to_string())
    };

    vec![
        vec![
            "AF Server".to_string(),
            config.server.clone().unwrap_or_else(|| "Default".to_string()),
        ],
        vec![
            "AF Database".to_string(),
            config.database.clone().unwrap_or_else(|| "ALL AF DBs".to_string()),
        ],
        vec!["Tag List File".to_string(), path_or_none(config.watch_list.as_deref())],
        vec!["Output File".to_string(), config.output_file.display().to_string()],
        vec!["Write to Console".to_string(), config.trace_console.to_string()],
        vec!["Error File".to_string(), config.error_file.display().to_string()],
        vec!["Write Errors".to_string(), config.write_errors.to_string()],
    ]
}

/// Print the parameter banner shown before a scan
pub fn print_parameters(config: &SearchConfig) {
    print_table(&["Parameter", "Value"], parameter_rows(config));
}

/// Scan statistics as label/value rows
pub fn summary_rows(stats: &ScanStats) -> Vec<Vec<String>> {
    let row = |label: &str, value: u64| vec![label.to_string(), value.to_string()];

    vec![
        row("Databases", stats.databases),
        row("Elements", stats.elements),
        row("Attributes", stats.attributes),
        row("Bound attributes", stats.leaf_attributes),
        row("Matches", stats.matches),
        row("Invalid references", stats.invalid_references),
        row("Other faults", stats.unclassified_faults),
        row("Element failures", stats.element_failures),
        row("Databases skipped", stats.databases_skipped),
        vec!["Duration".to_string(), format!("{} ms", stats.duration_ms)],
    ]
}

/// Print the summary shown after a scan
pub fn print_summary(stats: &ScanStats) {
    print_table(&["Search Summary", ""], summary_rows(stats));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parameter_defaults() {
        let rows = parameter_rows(&SearchConfig::default());
        assert_eq!(rows[0][1], "Default");
        assert_eq!(rows[1][1], "ALL AF DBs");
        assert_eq!(rows[2][1], "(none)");
        assert_eq!(rows[3][1], "Output.txt");
        assert_eq!(rows[6][1], "false");
    }

    #[test]
    fn test_parameter_values() {
        let config = SearchConfig {
            server: Some("AF01".to_string()),
            database: Some("Plant".to_string()),
            watch_list: Some(PathBuf::from("tags.txt")),
            write_errors: true,
            ..SearchConfig::default()
        };
        let rows = parameter_rows(&config);
        assert_eq!(rows[0][1], "AF01");
        assert_eq!(rows[1][1], "Plant");
        assert_eq!(rows[2][1], "tags.txt");
        assert_eq!(rows[6][1], "true");
    }

    #[test]
    fn test_summary_table_renders() {
        let mut stats = ScanStats::started_now();
        stats.matches = 3;
        stats.duration_ms = 12;

        let table = build_table(&["Search Summary", ""], summary_rows(&stats)).to_string();
        assert!(table.contains("Matches"));
        assert!(table.contains("12 ms"));
    }
}
