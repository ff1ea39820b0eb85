use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use thiserror::Error;

/// Name `dbstat` reports for the schema table (page 1 of the file).
const SCHEMA_TABLE: &str = "sqlite_schema";

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("database file {0:?} doesn't exist")]
    FileNotFound(PathBuf),

    #[error("SQLite is built without the dbstat virtual table (SQLITE_ENABLE_DBSTAT_VTAB)")]
    DbstatUnavailable,

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error)
}

/// Space accounting for a single b-tree: one table or one index, plus a
/// synthetic entry for the schema table itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpaceUsed {
    pub name: String,
    pub tbl_name: String,
    pub is_index: bool,
    pub is_without_rowid: bool,
    pub nentry: i64,
    pub leaf_entries: i64,
    pub depth: i64,
    pub payload: i64,
    pub ovfl_payload: i64,
    pub ovfl_cnt: i64,
    pub mx_payload: i64,
    pub int_pages: i64,
    pub leaf_pages: i64,
    pub ovfl_pages: i64,
    pub int_unused: i64,
    pub leaf_unused: i64,
    pub ovfl_unused: i64,
    pub gap_cnt: i64,
    pub compressed_size: i64
}

impl SpaceUsed {
    pub fn total_pages(&self) -> i64 {
        self.int_pages + self.leaf_pages + self.ovfl_pages
    }
}

/// Selects which `SpaceUsed` rows an aggregated [`StatSummary`] covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatFilter<'a> {
    All,
    TablesOnly,
    IndicesOnly,
    /// A single table or index by its own name, indices excluded.
    Object(&'a str),
    /// A table together with all of its indices.
    TableWithIndices(&'a str)
}

/// Aggregated statistics over a set of tables and indices.
#[derive(Debug, Clone, PartialEq)]
pub struct StatSummary {
    pub nentry: i64,
    pub payload: i64,
    pub ovfl_payload: i64,
    pub mx_payload: i64,
    pub ovfl_cnt: i64,
    pub leaf_pages: i64,
    pub int_pages: i64,
    pub ovfl_pages: i64,
    pub leaf_unused: i64,
    pub int_unused: i64,
    pub ovfl_unused: i64,
    pub gap_cnt: i64,
    pub compressed_size: i64,
    pub depth: i64,
    pub cnt: i64,

    pub total_pages: i64,
    pub total_pages_percent: f64,
    pub storage: i64,
    pub is_compressed: bool,
    pub payload_percent: f64,
    pub total_unused: i64,
    pub total_metadata: i64,
    pub metadata_percent: f64,
    pub average_payload: f64,
    pub average_unused: f64,
    pub average_metadata: f64,
    pub ovfl_percent: f64,
    pub fragmentation: f64,
    pub int_unused_percent: f64,
    pub ovfl_unused_percent: f64,
    pub leaf_unused_percent: f64,
    pub total_unused_percent: f64
}

/// Per-table page usage, indices included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableUsage {
    pub name: String,
    pub count: i64,
    pub size: i64
}

/// Space usage statistics for one SQLite database file.
///
/// All data is gathered once at [`Analyzer::open`] from a read-only
/// connection; the connection is closed before `open` returns and the
/// input file is never modified.
#[derive(Debug, Clone)]
pub struct Analyzer {
    path: PathBuf,
    file_size: u64,
    page_size: i64,
    page_count: i64,
    freelist_count: i64,
    auto_vacuum: i64,
    ntable: i64,
    nindex: i64,
    nautoindex: i64,
    objects: Vec<SpaceUsed>
}

impl Analyzer {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AnalyzerError> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(AnalyzerError::FileNotFound(path.to_path_buf()));
        }

        let file_size = std::fs::metadata(path)?.len();

        let connection = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        )?;

        let has_dbstat = connection.query_row(
            "SELECT 1 FROM pragma_compile_options WHERE compile_options = 'ENABLE_DBSTAT_VTAB'",
            [],
            |row| row.get::<_, i64>(0)
        ).optional()?;

        if has_dbstat.is_none() {
            return Err(AnalyzerError::DbstatUnavailable);
        }

        // First real read of the file. A malformed database fails here
        // with SQLITE_NOTADB.
        let ntable = connection.query_row(
            "SELECT COUNT(*) + 1 FROM sqlite_schema WHERE type = 'table'",
            [],
            |row| row.get(0)
        )?;

        let nindex = connection.query_row(
            "SELECT COUNT(*) FROM sqlite_schema WHERE type = 'index'",
            [],
            |row| row.get(0)
        )?;

        let nautoindex = connection.query_row(
            "SELECT COUNT(*) FROM sqlite_schema WHERE name LIKE 'sqlite_autoindex%'",
            [],
            |row| row.get(0)
        )?;

        let page_size = connection.query_row("PRAGMA page_size", [], |row| row.get(0))?;
        let page_count = connection.query_row("PRAGMA page_count", [], |row| row.get(0))?;
        let freelist_count = connection.query_row("PRAGMA freelist_count", [], |row| row.get(0))?;
        let auto_vacuum = connection.query_row("PRAGMA auto_vacuum", [], |row| row.get(0))?;

        // dbstat is slow to query repeatedly, so it is snapshotted once.
        // Temp tables live outside the read-only main database.
        connection.execute_batch(
            "CREATE TEMP TABLE dbstat_snapshot AS
             SELECT * FROM dbstat ORDER BY name, path"
        )?;

        let mut names = {
            let mut query = connection.prepare(
                "SELECT name, tbl_name FROM sqlite_schema WHERE rootpage > 0"
            )?;

            let names = query.query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?.collect::<Result<Vec<_>, _>>()?;

            names
        };

        names.push((SCHEMA_TABLE.to_string(), SCHEMA_TABLE.to_string()));

        let mut objects = Vec::with_capacity(names.len());

        for (name, tbl_name) in names {
            objects.push(extract_space_used(&connection, name, tbl_name)?);
        }

        Ok(Self {
            path: path.to_path_buf(),
            file_size,
            page_size,
            page_count,
            freelist_count,
            auto_vacuum,
            ntable,
            nindex,
            nautoindex,
            objects
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the database file on disk, in bytes.
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Page count times page size.
    pub fn logical_file_size(&self) -> i64 {
        self.page_count * self.page_size
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Pages in the whole file, as measured by `PRAGMA page_count`.
    pub fn page_count(&self) -> i64 {
        self.page_count
    }

    /// Pages in the whole file, as the sum of in-use, freelist and
    /// auto-vacuum pages.
    pub fn calculated_page_count(&self) -> i64 {
        self.in_use_pages() + self.freelist_count() + self.autovacuum_page_count()
    }

    /// Freelist size reported by the database header.
    pub fn freelist_count(&self) -> i64 {
        self.freelist_count
    }

    /// Pages not accounted for by any b-tree or the auto-vacuum overhead.
    pub fn calculated_free_pages(&self) -> i64 {
        self.page_count() - self.in_use_pages() - self.autovacuum_page_count()
    }

    /// Pages storing data, as primary b-tree pages or overflow pages.
    pub fn in_use_pages(&self) -> i64 {
        self.objects.iter().map(SpaceUsed::total_pages).sum()
    }

    /// Pointer-map pages reserved when auto-vacuum is enabled.
    pub fn autovacuum_page_count(&self) -> i64 {
        if self.auto_vacuum == 0 || self.page_count == 1 {
            return 0;
        }

        pointer_map_pages(self.page_count, self.page_size)
    }

    /// Number of tables, the schema table included.
    pub fn ntable(&self) -> i64 {
        self.ntable
    }

    pub fn nindex(&self) -> i64 {
        self.nindex
    }

    /// Indices implied by PRIMARY KEY or UNIQUE constraints.
    pub fn nautoindex(&self) -> i64 {
        self.nautoindex
    }

    /// Indices created with an explicit CREATE INDEX.
    pub fn nmanindex(&self) -> i64 {
        self.nindex - self.nautoindex
    }

    /// Bytes of user payload, the schema table and all indices excluded.
    pub fn payload_size(&self) -> i64 {
        self.objects.iter()
            .filter(|object| !object.is_index && object.name != SCHEMA_TABLE)
            .map(|object| object.payload)
            .sum()
    }

    pub fn is_compressed(&self) -> bool {
        let global = self.stats(StatFilter::All);

        global.storage > global.compressed_size
    }

    /// All gathered b-trees in schema order, the schema table last.
    pub fn objects(&self) -> &[SpaceUsed] {
        &self.objects
    }

    pub fn tables(&self) -> impl Iterator<Item = &SpaceUsed> {
        self.objects.iter().filter(|object| !object.is_index)
    }

    pub fn indices(&self) -> impl Iterator<Item = &SpaceUsed> {
        self.objects.iter().filter(|object| object.is_index)
    }

    pub fn indices_of(&self, table: &str) -> Vec<&SpaceUsed> {
        let mut indices = self.objects.iter()
            .filter(|object| object.is_index && object.tbl_name == table)
            .collect::<Vec<_>>();

        indices.sort_by(|a, b| a.name.cmp(&b.name));

        indices
    }

    /// Pages consumed by a single table or index b-tree.
    pub fn object_page_count(&self, name: &str) -> i64 {
        self.objects.iter()
            .find(|object| object.name == name)
            .map(SpaceUsed::total_pages)
            .unwrap_or(0)
    }

    /// Page usage of every table with its indices, largest first.
    pub fn table_space_usage(&self) -> Vec<TableUsage> {
        let mut usage = BTreeMap::<&str, (i64, i64)>::new();

        for object in &self.objects {
            let entry = usage.entry(object.tbl_name.as_str()).or_default();

            entry.0 += 1;
            entry.1 += object.total_pages();
        }

        let mut usage = usage.into_iter()
            .map(|(name, (count, size))| TableUsage {
                name: name.to_string(),
                count,
                size
            })
            .collect::<Vec<_>>();

        usage.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.name.cmp(&b.name)));

        usage
    }

    /// Aggregates the selected b-trees into one summary.
    pub fn stats(&self, filter: StatFilter<'_>) -> StatSummary {
        let rows = self.objects.iter()
            .filter(|object| match filter {
                StatFilter::All => true,
                StatFilter::TablesOnly => !object.is_index,
                StatFilter::IndicesOnly => object.is_index,
                StatFilter::Object(name) => object.name == name,
                StatFilter::TableWithIndices(table) => object.tbl_name == table
            })
            .collect::<Vec<_>>();

        // WITHOUT ROWID tables and indices keep interior entries because
        // their interior cells carry keys; rowid tables count leaves only.
        let nentry = rows.iter()
            .map(|row| {
                if row.is_without_rowid || row.is_index {
                    row.nentry
                } else {
                    row.leaf_entries
                }
            })
            .sum::<i64>();

        let payload = rows.iter().map(|row| row.payload).sum::<i64>();
        let ovfl_payload = rows.iter().map(|row| row.ovfl_payload).sum::<i64>();
        let mx_payload = rows.iter().map(|row| row.mx_payload).max().unwrap_or(0);
        let ovfl_cnt = rows.iter().map(|row| row.ovfl_cnt).sum::<i64>();
        let leaf_pages = rows.iter().map(|row| row.leaf_pages).sum::<i64>();
        let int_pages = rows.iter().map(|row| row.int_pages).sum::<i64>();
        let ovfl_pages = rows.iter().map(|row| row.ovfl_pages).sum::<i64>();
        let leaf_unused = rows.iter().map(|row| row.leaf_unused).sum::<i64>();
        let int_unused = rows.iter().map(|row| row.int_unused).sum::<i64>();
        let ovfl_unused = rows.iter().map(|row| row.ovfl_unused).sum::<i64>();
        let gap_cnt = rows.iter().map(|row| row.gap_cnt).sum::<i64>();
        let compressed_size = rows.iter().map(|row| row.compressed_size).sum::<i64>();
        let depth = rows.iter().map(|row| row.depth).max().unwrap_or(0);
        let cnt = rows.len() as i64;

        let total_pages = leaf_pages + int_pages + ovfl_pages;
        let storage = total_pages * self.page_size;
        let total_unused = ovfl_unused + int_unused + leaf_unused;

        // Metadata is everything that is neither payload nor unused space,
        // except the first 4 bytes of each overflow chain link.
        let total_metadata = storage - payload - total_unused
            + 4 * (ovfl_pages - ovfl_cnt);

        let (average_payload, average_unused, average_metadata) = if nentry == 0 {
            (0.0, 0.0, 0.0)
        } else {
            (
                payload as f64 / nentry as f64,
                total_unused as f64 / nentry as f64,
                total_metadata as f64 / nentry as f64
            )
        };

        StatSummary {
            nentry,
            payload,
            ovfl_payload,
            mx_payload,
            ovfl_cnt,
            leaf_pages,
            int_pages,
            ovfl_pages,
            leaf_unused,
            int_unused,
            ovfl_unused,
            gap_cnt,
            compressed_size,
            depth,
            cnt,

            total_pages,
            total_pages_percent: percentage(total_pages as f64, self.page_count as f64),
            storage,
            is_compressed: storage > compressed_size,
            payload_percent: percentage(payload as f64, storage as f64),
            total_unused,
            total_metadata,
            metadata_percent: percentage(total_metadata as f64, storage as f64),
            average_payload,
            average_unused,
            average_metadata,
            ovfl_percent: percentage(ovfl_cnt as f64, nentry as f64),
            fragmentation: percentage(gap_cnt as f64, (total_pages - 1).max(0) as f64),
            int_unused_percent: percentage(
                int_unused as f64,
                (int_pages * self.page_size) as f64
            ),
            ovfl_unused_percent: percentage(
                ovfl_unused as f64,
                (ovfl_pages * self.page_size) as f64
            ),
            leaf_unused_percent: percentage(
                leaf_unused as f64,
                (leaf_pages * self.page_size) as f64
            ),
            total_unused_percent: percentage(total_unused as f64, storage as f64)
        }
    }

    /// The gathered rows as SQL text that recreates the `space_used`
    /// table, so the report tail can be sourced into any SQL engine.
    pub fn stat_db_dump(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.objects.len() + 3);

        lines.push(String::from("BEGIN TRANSACTION;"));
        lines.push(String::from(
            "CREATE TABLE space_used(name clob, tblname clob, is_index boolean, \
             is_without_rowid boolean, nentry int, leaf_entries int, depth int, \
             payload int, ovfl_payload int, ovfl_cnt int, mx_payload int, \
             int_pages int, leaf_pages int, ovfl_pages int, int_unused int, \
             leaf_unused int, ovfl_unused int, gap_cnt int, compressed_size int);"
        ));

        for object in &self.objects {
            lines.push(format!(
                "INSERT INTO \"space_used\" VALUES('{}','{}',{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{});",
                sql_quote(&object.name),
                sql_quote(&object.tbl_name),
                object.is_index as i64,
                object.is_without_rowid as i64,
                object.nentry,
                object.leaf_entries,
                object.depth,
                object.payload,
                object.ovfl_payload,
                object.ovfl_cnt,
                object.mx_payload,
                object.int_pages,
                object.leaf_pages,
                object.ovfl_pages,
                object.int_unused,
                object.leaf_unused,
                object.ovfl_unused,
                object.gap_cnt,
                object.compressed_size
            ));
        }

        lines.push(String::from("COMMIT;"));

        lines
    }
}

pub fn percentage(value: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }

    100.0 * value / total
}

/// Pointer-map pages needed for an auto-vacuum database. The file layout
/// is one pointer-map page followed by `page_size / 5` content pages,
/// repeated; the first pointer-map page is page 2 of the file.
fn pointer_map_pages(page_count: i64, page_size: i64) -> i64 {
    let pointers_per_page = page_size as f64 / 5.0;

    ((page_count - 1) as f64 / (pointers_per_page + 1.0)).ceil() as i64
}

fn extract_space_used(
    connection: &Connection,
    name: String,
    tbl_name: String
) -> Result<SpaceUsed, rusqlite::Error> {
    let is_index = name != tbl_name;

    let mut query = connection.prepare_cached(
        "SELECT
            sum(ncell),
            sum((pagetype = 'leaf') * ncell),
            sum(payload),
            sum((pagetype = 'overflow') * payload),
            sum(path LIKE '%+000000'),
            max(mx_payload),
            sum(pagetype = 'internal'),
            sum(pagetype = 'leaf'),
            sum(pagetype = 'overflow'),
            sum((pagetype = 'internal') * unused),
            sum((pagetype = 'leaf') * unused),
            sum((pagetype = 'overflow') * unused),
            sum(pgsize),
            max((length(CASE WHEN path LIKE '%+%' THEN '' ELSE path END) + 3) / 4)
         FROM dbstat_snapshot WHERE name = ?1"
    )?;

    let stats = query.query_row(params![name], |row| {
        let mut fields = [0_i64; 14];

        for (i, field) in fields.iter_mut().enumerate() {
            *field = row.get::<_, Option<i64>>(i)?.unwrap_or(0);
        }

        Ok(fields)
    })?;

    let is_without_rowid = if is_index {
        false
    } else {
        is_without_rowid(connection, &name)?
    };

    let gap_cnt = count_gaps(connection, &name)?;

    Ok(SpaceUsed {
        name,
        tbl_name,
        is_index,
        is_without_rowid,
        nentry: stats[0],
        leaf_entries: stats[1],
        payload: stats[2],
        ovfl_payload: stats[3],
        ovfl_cnt: stats[4],
        mx_payload: stats[5],
        int_pages: stats[6],
        leaf_pages: stats[7],
        ovfl_pages: stats[8],
        int_unused: stats[9],
        leaf_unused: stats[10],
        ovfl_unused: stats[11],
        compressed_size: stats[12],
        depth: stats[13],
        gap_cnt
    })
}

/// A table is WITHOUT ROWID when its primary key index listed by
/// `pragma_index_list` has no own entry in the schema: the key b-tree
/// is the table itself.
fn is_without_rowid(connection: &Connection, table: &str) -> Result<bool, rusqlite::Error> {
    let mut query = connection.prepare_cached(
        "SELECT name FROM pragma_index_list(?1) WHERE origin = 'pk'"
    )?;

    let pk_indices = query.query_map(params![table], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    for index in pk_indices {
        let in_schema = connection.query_row(
            "SELECT COUNT(*) FROM sqlite_schema WHERE name = ?1",
            params![index],
            |row| row.get::<_, i64>(0)
        )?;

        if in_schema == 0 {
            return Ok(true);
        }
    }

    Ok(false)
}

/// Counts leaf pages that are out of sequence when the b-tree's pages
/// are read in page-number order.
fn count_gaps(connection: &Connection, name: &str) -> Result<i64, rusqlite::Error> {
    let mut query = connection.prepare_cached(
        "SELECT pageno, pagetype FROM dbstat_snapshot
         WHERE name = ?1 ORDER BY pageno"
    )?;

    let pages = query.query_map(params![name], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
    })?.collect::<Result<Vec<_>, _>>()?;

    let mut gap_cnt = 0;
    let mut previous_page = 0;

    for (pageno, pagetype) in pages {
        if previous_page > 0 && pagetype == "leaf" && pageno != previous_page + 1 {
            gap_cnt += 1;
        }

        previous_page = pageno;
    }

    Ok(gap_cnt)
}

fn sql_quote(text: &str) -> String {
    text.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space_used(name: &str, tbl_name: &str) -> SpaceUsed {
        SpaceUsed {
            name: name.to_string(),
            tbl_name: tbl_name.to_string(),
            is_index: name != tbl_name,
            is_without_rowid: false,
            nentry: 0,
            leaf_entries: 0,
            depth: 1,
            payload: 0,
            ovfl_payload: 0,
            ovfl_cnt: 0,
            mx_payload: 0,
            int_pages: 0,
            leaf_pages: 1,
            ovfl_pages: 0,
            int_unused: 0,
            leaf_unused: 0,
            ovfl_unused: 0,
            gap_cnt: 0,
            compressed_size: 0
        }
    }

    fn analyzer(objects: Vec<SpaceUsed>) -> Analyzer {
        Analyzer {
            path: PathBuf::from("test.db"),
            file_size: 4096 * 10,
            page_size: 4096,
            page_count: 10,
            freelist_count: 0,
            auto_vacuum: 0,
            ntable: 2,
            nindex: 1,
            nautoindex: 0,
            objects
        }
    }

    #[test]
    fn percentage_of_zero_total_is_zero() {
        assert_eq!(percentage(5.0, 0.0), 0.0);
        assert_eq!(percentage(1.0, 4.0), 25.0);
    }

    #[test]
    fn pointer_map_page_math() {
        // 1024-byte pages hold 204.8 pointers each.
        assert_eq!(pointer_map_pages(1000, 1024), 5);
        assert_eq!(pointer_map_pages(2, 4096), 1);
    }

    #[test]
    fn rowid_tables_count_leaf_entries_only() {
        let mut table = space_used("users", "users");

        table.nentry = 120;
        table.leaf_entries = 100;

        let mut index = space_used("idx_users", "users");

        index.nentry = 120;
        index.leaf_entries = 100;

        let analyzer = analyzer(vec![table, index]);

        assert_eq!(analyzer.stats(StatFilter::TablesOnly).nentry, 100);
        assert_eq!(analyzer.stats(StatFilter::IndicesOnly).nentry, 120);
        assert_eq!(analyzer.stats(StatFilter::All).nentry, 220);
    }

    #[test]
    fn without_rowid_tables_count_all_entries() {
        let mut table = space_used("kv", "kv");

        table.is_without_rowid = true;
        table.nentry = 50;
        table.leaf_entries = 40;

        let analyzer = analyzer(vec![table]);

        assert_eq!(analyzer.stats(StatFilter::All).nentry, 50);
    }

    #[test]
    fn metadata_accounts_for_overflow_chain_links() {
        let mut table = space_used("blobs", "blobs");

        table.nentry = 2;
        table.leaf_entries = 2;
        table.payload = 6000;
        table.leaf_pages = 1;
        table.ovfl_pages = 3;
        table.ovfl_cnt = 1;
        table.leaf_unused = 100;
        table.ovfl_unused = 200;

        let analyzer = analyzer(vec![table]);
        let stats = analyzer.stats(StatFilter::All);

        assert_eq!(stats.total_pages, 4);
        assert_eq!(stats.storage, 4 * 4096);
        assert_eq!(stats.total_unused, 300);
        assert_eq!(stats.total_metadata, 4 * 4096 - 6000 - 300 + 4 * 2);
    }

    #[test]
    fn single_page_trees_have_no_fragmentation() {
        let analyzer = analyzer(vec![space_used("tiny", "tiny")]);
        let stats = analyzer.stats(StatFilter::All);

        assert_eq!(stats.total_pages, 1);
        assert_eq!(stats.fragmentation, 0.0);
    }

    #[test]
    fn table_space_usage_sorts_largest_first() {
        let mut big = space_used("big", "big");
        let mut big_index = space_used("idx_big", "big");
        let small = space_used("small", "small");

        big.leaf_pages = 4;
        big_index.leaf_pages = 2;

        let analyzer = analyzer(vec![small, big, big_index]);
        let usage = analyzer.table_space_usage();

        assert_eq!(usage.len(), 2);
        assert_eq!(usage[0].name, "big");
        assert_eq!(usage[0].count, 2);
        assert_eq!(usage[0].size, 6);
        assert_eq!(usage[1].name, "small");
        assert_eq!(usage[1].size, 1);
    }

    #[test]
    fn stat_db_dump_quotes_names() {
        let analyzer = analyzer(vec![space_used("it's", "it's")]);
        let dump = analyzer.stat_db_dump();

        assert_eq!(dump.first().map(String::as_str), Some("BEGIN TRANSACTION;"));
        assert_eq!(dump.last().map(String::as_str), Some("COMMIT;"));
        assert!(dump[2].starts_with("INSERT INTO \"space_used\" VALUES('it''s','it''s',"));
    }
}
