//! Section markers in a mysqldump stream.
//!
//! mysqldump brackets every section with a comment block; the second line
//! of the block names the section. Recognizing those lines is all the
//! splitter needs, everything in between is opaque payload.

use std::sync::LazyLock;

use regex::Regex;

/// A section boundary recognized in the dump stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// `-- Current Database: ...`; what follows belongs to this database
    /// until the next boundary.
    Database(String),
    /// Table structure or table data.
    Table(String),
    /// View definition, temporary placeholder or final.
    View(String),
    /// Stored routines of the current database.
    Routines,
    /// Events of the current database.
    Events,
    /// `-- Dump completed ...`; nothing of interest follows.
    Completed,
}

static DATABASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-- Current Database: `(.+)`").expect("Invalid database regex"));

static TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-- (?:Table structure for table|Dumping data for table) `(.+)`")
        .expect("Invalid table regex")
});

// The temporary placeholder section was renamed between server versions.
static VIEW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^-- (?:Temporary table structure for view|Temporary view structure for view|Final view structure for view) `(.+)`",
    )
    .expect("Invalid view regex")
});

// Unlike the table sections, these quote the database name with single
// quotes.
static ROUTINES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-- Dumping routines for database '(.+)'").expect("Invalid routines regex")
});

static EVENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-- Dumping events for database '(.+)'").expect("Invalid events regex")
});

/// Classifies one line of the stream. Data lines vastly outnumber marker
/// lines, so anything without the comment prefix is dismissed before the
/// regexes run.
pub fn marker(line: &str) -> Option<Marker> {
    if !line.starts_with("-- ") {
        return None;
    }
    if let Some(caps) = TABLE.captures(line) {
        return Some(Marker::Table(caps[1].to_string()));
    }
    if let Some(caps) = VIEW.captures(line) {
        return Some(Marker::View(caps[1].to_string()));
    }
    if let Some(caps) = DATABASE.captures(line) {
        return Some(Marker::Database(caps[1].to_string()));
    }
    if ROUTINES.is_match(line) {
        return Some(Marker::Routines);
    }
    if EVENTS.is_match(line) {
        return Some(Marker::Events);
    }
    if line.starts_with("-- Dump completed") {
        return Some(Marker::Completed);
    }
    None
}
