use std::fmt::Write;

use crate::analyzer::{Analyzer, StatFilter, StatSummary, percentage};

/// Renders the classic disk-space utilization report, in the format of
/// the upstream `sqlite3_analyzer` utility
/// (https://sqlite.org/sqlanalyze.html).
pub fn render(stats: &Analyzer) -> String {
    let mut report = Report {
        stats,
        out: String::new()
    };

    report.disk_space();
    report.tables_page_counts();
    report.tables_and_indices_page_counts();
    report.global_usage();
    report.indices_usage();
    report.tables_details();
    report.definitions();
    report.stat_db_dump();

    report.out
}

struct Report<'a> {
    stats: &'a Analyzer,
    out: String
}

impl Report<'_> {
    fn disk_space(&mut self) {
        let _ = writeln!(
            self.out,
            "/** Disk-Space Utilization Report For {}\n",
            self.stats.path().display()
        );

        let page_count = self.stats.page_count();

        self.stat_line("Page size in bytes", self.stats.page_size());
        self.stat_line("Pages in the whole file (measured)", page_count);
        self.stat_line(
            "Pages in the whole file (calculated)",
            self.stats.calculated_page_count()
        );

        let in_use_pages = self.stats.in_use_pages();

        self.stat_line_percent(
            "Pages that store data",
            in_use_pages,
            percentage(in_use_pages as f64, page_count as f64)
        );

        self.stat_line("Pages on the freelist (per header)", self.stats.freelist_count());
        self.stat_line("Pages on the freelist (calculated)", self.stats.calculated_free_pages());

        let autovacuum_pages = self.stats.autovacuum_page_count();

        self.stat_line_percent(
            "Pages of auto-vacuum overhead",
            autovacuum_pages,
            percentage(autovacuum_pages as f64, page_count as f64)
        );

        self.stat_line("Number of tables in the database", self.stats.ntable());
        self.stat_line("Number of indices", self.stats.nindex());
        self.stat_line("Number of defined indices", self.stats.nmanindex());
        self.stat_line("Number of implied indices", self.stats.nautoindex());

        let file_size = self.stats.file_size();

        if self.stats.is_compressed() {
            self.stat_line("Size of uncompressed content in bytes", file_size);

            self.stat_line_percent(
                "Size of compressed file on disk",
                file_size,
                percentage(file_size as f64, self.stats.logical_file_size() as f64)
            );
        } else {
            self.stat_line("Size of the file in bytes", file_size);
        }

        let payload = self.stats.payload_size();

        self.stat_line_percent(
            "Bytes of user payload stored",
            payload,
            percentage(payload as f64, file_size as f64)
        );

        self.out.push('\n');
    }

    /// Larger tables first, each with all its indices folded in.
    fn tables_page_counts(&mut self) {
        self.title_line("Page counts for all tables with their indices");

        let page_count = self.stats.page_count();

        for usage in self.stats.table_space_usage() {
            self.stat_line_percent(
                &usage.name.to_uppercase(),
                usage.size,
                percentage(usage.size as f64, page_count as f64)
            );
        }

        self.out.push('\n');
    }

    fn tables_and_indices_page_counts(&mut self) {
        self.title_line("Page counts for all tables and indices separately");

        let stats = self.stats;

        let mut page_counts = stats.objects().iter()
            .map(|object| (object.name.as_str(), object.total_pages()))
            .collect::<Vec<_>>();

        page_counts.sort_by(|a, b| b.1.cmp(&a.1));

        let page_count = stats.page_count();

        for (name, pages) in page_counts {
            self.stat_line_percent(
                &name.to_uppercase(),
                pages,
                percentage(pages as f64, page_count as f64)
            );
        }

        self.out.push('\n');
    }

    fn global_usage(&mut self) {
        self.title_line("All tables and indices");
        self.print_stats(&self.stats.stats(StatFilter::All));
        self.out.push('\n');

        self.title_line("All tables");
        self.print_stats(&self.stats.stats(StatFilter::TablesOnly));
        self.out.push('\n');
    }

    fn indices_usage(&mut self) {
        if self.stats.indices().next().is_some() {
            self.title_line("All indices");
            self.print_stats(&self.stats.stats(StatFilter::IndicesOnly));
        }
    }

    fn tables_details(&mut self) {
        let stats = self.stats;

        let mut tables = stats.tables().collect::<Vec<_>>();

        tables.sort_by_key(|table| std::cmp::Reverse(table.total_pages()));

        for table in tables {
            let table_name = table.name.to_uppercase();
            let indices = stats.indices_of(&table.name);

            if indices.is_empty() {
                self.title_line(&format!("Table {table_name}"));
                self.print_stats(&stats.stats(StatFilter::Object(&table.name)));

                continue;
            }

            self.title_line(&format!("Table {table_name} and all its indices"));
            self.print_stats(&stats.stats(StatFilter::TableWithIndices(&table.name)));
            self.out.push('\n');

            self.title_line(&format!("Table {table_name} w/o any indices"));
            self.print_stats(&stats.stats(StatFilter::Object(&table.name)));

            for index in indices {
                let index_name = index.name.to_uppercase();

                self.title_line(&format!("Index {index_name} of table {table_name}"));
                self.print_stats(&stats.stats(StatFilter::Object(&index.name)));
                self.out.push('\n');
            }
        }
    }

    fn print_stats(&mut self, stats: &StatSummary) {
        self.stat_line(
            "Percentage of total database",
            format!("{}%", format_g(stats.total_pages_percent))
        );

        self.stat_line("Number of entries", stats.nentry);
        self.stat_line("Bytes of storage consumed", stats.storage);
        self.stat_line_percent("Bytes of payload", stats.payload, stats.payload_percent);
        self.stat_line_percent("Bytes of metadata", stats.total_metadata, stats.metadata_percent);

        if stats.cnt == 1 {
            self.stat_line("B-tree depth", stats.depth);
        }

        self.stat_line("Average payload per entry", format!("{:.2}", stats.average_payload));
        self.stat_line("Average unused bytes per entry", format!("{:.2}", stats.average_unused));
        self.stat_line("Average metadata per entry", format!("{:.2}", stats.average_metadata));

        if stats.total_pages > 1 {
            self.stat_line_percent("Non-sequential pages", stats.gap_cnt, stats.fragmentation);
        }

        self.stat_line("Maximum payload per entry", stats.mx_payload);
        self.stat_line_percent("Entries that use overflow", stats.ovfl_cnt, stats.ovfl_percent);

        if stats.int_pages > 0 {
            self.stat_line("Index pages used", stats.int_pages);
        }

        self.stat_line("Primary pages used", stats.leaf_pages);
        self.stat_line("Overflow pages used", stats.ovfl_pages);
        self.stat_line("Total pages used", stats.total_pages);

        if stats.int_unused > 0 {
            self.stat_line_percent(
                "Unused bytes on index pages",
                stats.int_unused,
                stats.int_unused_percent
            );
        }

        self.stat_line_percent(
            "Unused bytes on primary pages",
            stats.leaf_unused,
            stats.leaf_unused_percent
        );

        self.stat_line_percent(
            "Unused bytes on overflow pages",
            stats.ovfl_unused,
            stats.ovfl_unused_percent
        );

        self.stat_line_percent(
            "Unused bytes on all pages",
            stats.total_unused,
            stats.total_unused_percent
        );

        self.out.push('\n');
    }

    fn stat_db_dump(&mut self) {
        self.out.push_str(
            "The entire text of this report can be sourced into any SQL database\n"
        );
        self.out.push_str(
            "engine for further analysis. All of the text above is an SQL comment.\n"
        );
        self.out.push_str("The data used to generate this report follows:\n");
        self.out.push_str("*/\n");

        for line in self.stats.stat_db_dump() {
            self.out.push_str(&line);
            self.out.push('\n');
        }
    }

    fn title_line(&mut self, title: &str) {
        let stars = "*".repeat(79_usize.saturating_sub(title.len() + 5));

        let _ = writeln!(self.out, "*** {title} {stars}\n");
    }

    fn stat_line(&mut self, description: &str, value: impl std::fmt::Display) {
        let dots = ".".repeat(50_usize.saturating_sub(description.len()));

        let _ = writeln!(self.out, "{description}{dots} {value}");
    }

    fn stat_line_percent(
        &mut self,
        description: &str,
        value: impl std::fmt::Display,
        percent: f64
    ) {
        let value = value.to_string();

        let dots = ".".repeat(50_usize.saturating_sub(description.len()));
        let sep = " ".repeat(10_usize.saturating_sub(value.len()));
        let percent = format!("{}%", round_percentage(percent));

        let _ = writeln!(self.out, "{description}{dots} {value}{sep} {percent:>10}");
    }

    fn definitions(&mut self) {
        self.title_line("Definitions");

        let page_size = self.stats.page_size();

        let definitions = format!(
            r#"Page size in bytes

    The number of bytes in a single page of the database file.
    Usually 1024.

Number of pages in the whole file

    The number of {page_size}-byte pages that go into forming the complete
    database

Pages that store data

    The number of pages that store data, either as primary B*Tree pages or
    as overflow pages.  The number at the right is the data pages divided by
    the total number of pages in the file.

Pages on the freelist

    The number of pages that are not currently in use but are reserved for
    future use.  The percentage at the right is the number of freelist pages
    divided by the total number of pages in the file.

Pages of auto-vacuum overhead

    The number of pages that store data used by the database to facilitate
    auto-vacuum. This is zero for databases that do not support auto-vacuum.

Number of tables in the database

    The number of tables in the database, including the SQLITE_MASTER table
    used to store schema information.

Number of indices

    The total number of indices in the database.

Number of defined indices

    The number of indices created using an explicit CREATE INDEX statement.

Number of implied indices

    The number of indices used to implement PRIMARY KEY or UNIQUE constraints
    on tables.

Size of the file in bytes

    The total amount of disk space used by the entire database files.

Bytes of user payload stored

    The total number of bytes of user payload stored in the database. The
    schema information in the SQLITE_MASTER table is not counted when
    computing this number.  The percentage at the right shows the payload
    divided by the total file size.

Percentage of total database

    The amount of the complete database file that is devoted to storing
    information described by this category.

Number of entries

    The total number of B-Tree key/value pairs stored under this category.

Bytes of storage consumed

    The total amount of disk space required to store all B-Tree entries
    under this category.  The is the total number of pages used times
    the pages size.

Bytes of payload

    The amount of payload stored under this category.  Payload is the data
    part of table entries and the key part of index entries.  The percentage
    at the right is the bytes of payload divided by the bytes of storage
    consumed.

Bytes of metadata

    The amount of formatting and structural information stored in the
    table or index.  Metadata includes the btree page header, the cell pointer
    array, the size field for each cell, the left child pointer or non-leaf
    cells, the overflow pointers for overflow cells, and the rowid value for
    rowid table cells.  In other words, metadata is everything that is neither
    unused space nor content.  The record header in the payload is counted as
    content, not metadata.

Average payload per entry

    The average amount of payload on each entry.  This is just the bytes of
    payload divided by the number of entries.

Average unused bytes per entry

    The average amount of free space remaining on all pages under this
    category on a per-entry basis.  This is the number of unused bytes on
    all pages divided by the number of entries.

Non-sequential pages

    The number of pages in the table or index that are out of sequence.
    Many filesystems are optimized for sequential file access so a small
    number of non-sequential pages might result in faster queries,
    especially for larger database files that do not fit in the disk cache.
    Note that after running VACUUM, the root page of each table or index is
    at the beginning of the database file and all other pages are in a
    separate part of the database file, resulting in a single non-
    sequential page.

Maximum payload per entry

    The largest payload size of any entry.

Entries that use overflow

    The number of entries that user one or more overflow pages.

Total pages used

    This is the number of pages used to hold all information in the current
    category.  This is the sum of index, primary, and overflow pages.

Index pages used

    This is the number of pages in a table B-tree that hold only key (rowid)
    information and no data.

Primary pages used

    This is the number of B-tree pages that hold both key and data.

Overflow pages used

    The total number of overflow pages used for this category.

Unused bytes on index pages

    The total number of bytes of unused space on all index pages.  The
    percentage at the right is the number of unused bytes divided by the
    total number of bytes on index pages.

Unused bytes on primary pages

    The total number of bytes of unused space on all primary pages.  The
    percentage at the right is the number of unused bytes divided by the
    total number of bytes on primary pages.

Unused bytes on overflow pages

    The total number of bytes of unused space on all overflow pages.  The
    percentage at the right is the number of unused bytes divided by the
    total number of bytes on overflow pages.

Unused bytes on all pages

    The total number of bytes of unused space on all primary and overflow
    pages.  The percentage at the right is the number of unused bytes
    divided by the total number of bytes.
"#
        );

        self.out.push_str(&definitions);
        self.out.push('\n');
        self.out.push_str(&"*".repeat(79));
        self.out.push('\n');
    }
}

/// Width and precision follow how close the value is to 0% or 100%, so
/// extreme percentages keep their significant digits.
fn round_percentage(percent: f64) -> String {
    if percent == 100.0 || percent < 0.001 || (percent > 1.0 && percent < 99.0) {
        format!("{percent:5.1}")
    } else if percent < 0.1 || percent > 99.9 {
        format!("{percent:7.3}")
    } else {
        format!("{percent:6.2}")
    }
}

/// Shortest decimal form with 6 significant digits, trailing zeroes
/// trimmed.
fn format_g(value: f64) -> String {
    if value == 0.0 {
        return String::from("0");
    }

    let magnitude = value.abs().log10().floor() as i32;
    let precision = (5 - magnitude).max(0) as usize;

    let mut text = format!("{value:.precision$}");

    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }

        if text.ends_with('.') {
            text.pop();
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_percentage_widths() {
        assert_eq!(round_percentage(100.0), "100.0");
        assert_eq!(round_percentage(0.0), "  0.0");
        assert_eq!(round_percentage(25.0), " 25.0");
        assert_eq!(round_percentage(0.05), "  0.050");
        assert_eq!(round_percentage(99.95), " 99.950");
        assert_eq!(round_percentage(0.5), "  0.50");
        assert_eq!(round_percentage(99.5), " 99.50");
    }

    #[test]
    fn format_g_keeps_six_significant_digits() {
        assert_eq!(format_g(25.0), "25");
        assert_eq!(format_g(0.0), "0");
        assert_eq!(format_g(100.0), "100");
        assert_eq!(format_g(12.5), "12.5");
        assert_eq!(format_g(33.333333333), "33.3333");
        assert_eq!(format_g(200.0 / 7.0), "28.5714");
        assert_eq!(format_g(0.53191489), "0.531915");
    }

    #[test]
    fn stat_lines_are_dot_padded() {
        let mut report = String::new();
        let dots = ".".repeat(50 - "Page size in bytes".len());

        let _ = writeln!(report, "Page size in bytes{dots} 4096");

        assert_eq!(
            report,
            "Page size in bytes................................ 4096\n"
        );
    }

    #[test]
    fn title_lines_are_79_columns() {
        let title = "All tables";
        let stars = "*".repeat(79 - title.len() - 5);
        let line = format!("*** {title} {stars}");

        assert_eq!(line.len(), 79);
    }
}
