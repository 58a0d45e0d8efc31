//! String interning and the flat string-table export
//!
//! # Design
//!
//! - Forward map `value -> id` and reverse map `id -> value`, both `DashMap`
//! - Ids come from an `AtomicU64` starting at 1, drawn only inside the
//!   forward map's entry guard, so the first writer of a value wins and every
//!   value gets exactly one id
//! - The reverse entry is written while the forward guard is held: once
//!   `intern` returns, the id resolves through [`StringTable::lookup`]
//!
//! The table is independent of the event lock; interning never contends
//! with event ingestion.
//!
//! # Export format
//!
//! One line per entry, `<id>,<value>`, no header. [`StringTableFormat::Raw`]
//! writes values verbatim; [`StringTableFormat::Escaped`] backslash-escapes
//! `\`, newline and carriage return so the export can be parsed back with
//! [`read_string_table`]. Commas need no escaping: readers split at the first
//! comma.

use dashmap::DashMap;
use std::borrow::Cow;
use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracedb_core::{Error, Result, StringId};
use tracing::trace;

/// How values are written in a string-table export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StringTableFormat {
    /// Values written verbatim. Values containing newlines do not round-trip.
    #[default]
    Raw,
    /// Backslash escapes for `\`, `\n` and `\r`
    Escaped,
}

/// Concurrent string interner
#[derive(Debug)]
pub struct StringTable {
    ids: DashMap<Arc<str>, StringId>,
    names: DashMap<StringId, Arc<str>>,
    next_id: AtomicU64,
}

impl StringTable {
    /// Create an empty table; the first interned string gets id 1
    pub fn new() -> Self {
        Self {
            ids: DashMap::new(),
            names: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Intern `value`, returning its id
    ///
    /// Idempotent: repeated calls with the same value return the same id.
    pub fn intern(&self, value: &str) -> StringId {
        if let Some(id) = self.ids.get(value) {
            return *id;
        }

        let key: Arc<str> = Arc::from(value);
        let entry = self.ids.entry(Arc::clone(&key)).or_insert_with(|| {
            let id = StringId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
            self.names.insert(id, key);
            trace!(%id, "interned string");
            id
        });
        *entry
    }

    /// Resolve an id back to its value
    pub fn lookup(&self, id: StringId) -> Option<Arc<str>> {
        self.names.get(&id).map(|name| Arc::clone(name.value()))
    }

    /// Id of an already interned value, without interning it
    pub fn get(&self, value: &str) -> Option<StringId> {
        self.ids.get(value).map(|id| *id)
    }

    /// Number of distinct interned strings
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if nothing has been interned
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Copy of all entries, sorted by id
    pub fn snapshot(&self) -> Vec<(StringId, Arc<str>)> {
        let mut entries: Vec<_> = self
            .names
            .iter()
            .map(|entry| (*entry.key(), Arc::clone(entry.value())))
            .collect();
        entries.sort_unstable_by_key(|(id, _)| *id);
        entries
    }

    /// Snapshot the table, then write it to `sink`
    ///
    /// No table lock is held while writing, so a slow sink never blocks
    /// interning. Returns the number of lines written.
    pub fn dump<W: Write>(&self, sink: &mut W, format: StringTableFormat) -> Result<usize> {
        let entries = self.snapshot();
        write_string_table(&entries, sink, format)
    }
}

impl Default for StringTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Write entries as `<id>,<value>` lines
pub fn write_string_table<W, S>(
    entries: &[(StringId, S)],
    sink: &mut W,
    format: StringTableFormat,
) -> Result<usize>
where
    W: Write,
    S: AsRef<str>,
{
    for (id, value) in entries {
        let value = value.as_ref();
        match format {
            StringTableFormat::Raw => writeln!(sink, "{},{}", id.as_u64(), value)?,
            StringTableFormat::Escaped => writeln!(sink, "{},{}", id.as_u64(), escape(value))?,
        }
    }
    sink.flush()?;
    Ok(entries.len())
}

/// Parse an export produced by [`write_string_table`]
///
/// Lines are split at the first comma. Only `\n` terminates a line, so raw
/// values keep any carriage returns they contain.
pub fn read_string_table<R: BufRead>(
    reader: R,
    format: StringTableFormat,
) -> Result<Vec<(StringId, String)>> {
    let mut entries = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for (index, line) in reader.split(b'\n').enumerate() {
        let line_no = index + 1;
        let line = String::from_utf8(line?)
            .map_err(|_| Error::malformed(line_no, "not valid UTF-8"))?;

        let (id, value) = line
            .split_once(',')
            .ok_or_else(|| Error::malformed(line_no, "missing ','"))?;
        let id: u64 = id
            .parse()
            .map_err(|_| Error::malformed(line_no, format!("invalid id {:?}", id)))?;
        if id == 0 {
            return Err(Error::malformed(line_no, "id 0 is never assigned"));
        }
        if !seen.insert(id) {
            return Err(Error::malformed(line_no, format!("duplicate id {}", id)));
        }

        let value = match format {
            StringTableFormat::Raw => value.to_string(),
            StringTableFormat::Escaped => unescape(value, line_no)?,
        };
        entries.push((StringId::new(id), value));
    }

    Ok(entries)
}

fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '\n', '\r']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn unescape(value: &str, line_no: usize) -> Result<String> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => {
                return Err(Error::malformed(
                    line_no,
                    format!("unknown escape '\\{}'", other),
                ))
            }
            None => return Err(Error::malformed(line_no, "dangling '\\'")),
        }
    }
    Ok(out)
}
