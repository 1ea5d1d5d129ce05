//! Output side of the splitter.
//!
//! Consumes the dump stream one line at a time and routes sections to
//! per-table files. The leading header (and the current database's
//! prologue) is replayed at the top of every file, so each one restores
//! standalone. Lines are handled as bytes; table payload is not assumed
//! to be valid UTF-8.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::debug;

use crate::cmd::filename::codec;
use crate::cmd::thirdparty::subrun;

use super::parser::{self, Marker};

/// Include/exclude globs over qualified section names (`db.table`, or
/// bare `table` when the dump names no database).
pub struct TableFilter {
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl TableFilter {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, globset::Error> {
        Ok(Self {
            include: build(include)?,
            exclude: build(exclude)?,
        })
    }

    /// Exclusion wins; with no include patterns everything is included.
    pub fn matches(&self, name: &str) -> bool {
        if let Some(exclude) = &self.exclude
            && exclude.is_match(name)
        {
            return false;
        }
        match &self.include {
            Some(include) => include.is_match(name),
            None => true,
        }
    }
}

fn build(patterns: &[String]) -> Result<Option<GlobSet>, globset::Error> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    builder.build().map(Some)
}

/// Conventional extension for well-known compressors; unknown filters add
/// nothing.
pub fn compressor_extension(program: &str) -> &'static str {
    let name = Path::new(program)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(program);
    match name {
        "gzip" | "pigz" => ".gz",
        "bzip2" | "pbzip2" | "lbzip2" => ".bz2",
        "xz" => ".xz",
        "lzma" => ".lzma",
        "lz4" => ".lz4",
        "zstd" | "pzstd" => ".zst",
        _ => "",
    }
}

enum Output {
    Plain(BufWriter<File>),
    Filtered(BufWriter<subrun::Sink>),
}

impl Output {
    fn write_line(&mut self, line: &[u8]) -> io::Result<usize> {
        let writer: &mut dyn Write = match self {
            Output::Plain(w) => w,
            Output::Filtered(w) => w,
        };
        writer.write_all(line)?;
        writer.write_all(b"\n")?;
        Ok(line.len() + 1)
    }

    fn close(self) -> io::Result<()> {
        match self {
            Output::Plain(mut file) => file.flush(),
            Output::Filtered(sink) => sink
                .into_inner()
                .map_err(|err| err.into_error())?
                .finish(),
        }
    }
}

enum State {
    Header,
    Prologue,
    Section,
    Done,
}

/// Totals for one splitting run.
pub struct Summary {
    pub files: usize,
    pub bytes: u64,
}

pub struct SplitWriter {
    dir: PathBuf,
    filter: TableFilter,
    compress: Option<Vec<String>>,
    suffix: String,
    state: State,
    header: Vec<Vec<u8>>,
    prologue: Vec<Vec<u8>>,
    pending: Vec<Vec<u8>>,
    database: Option<String>,
    current: Option<(PathBuf, Output)>,
    written: HashSet<PathBuf>,
    files: usize,
    bytes: u64,
}

impl SplitWriter {
    pub fn new(dir: PathBuf, filter: TableFilter, compress: Option<Vec<String>>) -> Self {
        let suffix = match compress.as_deref().and_then(|argv| argv.first()) {
            Some(program) => format!(".sql{}", compressor_extension(program)),
            None => ".sql".to_string(),
        };
        Self {
            dir,
            filter,
            compress,
            suffix,
            state: State::Header,
            header: Vec::new(),
            prologue: Vec::new(),
            pending: Vec::new(),
            database: None,
            current: None,
            written: HashSet::new(),
            files: 0,
            bytes: 0,
        }
    }

    /// Feeds one input line, without its terminator.
    pub fn line(&mut self, line: &[u8]) -> anyhow::Result<()> {
        match classify(line) {
            Some(marker) => self.boundary(marker, line),
            None => self.content(line),
        }
    }

    /// Flushes held lines and closes the open section file.
    pub fn finish(mut self) -> anyhow::Result<Summary> {
        self.flush_pending()?;
        self.close_current()?;
        Ok(Summary {
            files: self.files,
            bytes: self.bytes,
        })
    }

    fn content(&mut self, line: &[u8]) -> anyhow::Result<()> {
        // A bare separator run may introduce the next section; hold it
        // back until its owner is known.
        if line.is_empty() || line == b"--".as_slice() {
            self.pending.push(line.to_vec());
            return Ok(());
        }
        self.flush_pending()?;
        self.sink(line)
    }

    fn boundary(&mut self, marker: Marker, line: &[u8]) -> anyhow::Result<()> {
        match marker {
            Marker::Database(db) => {
                self.close_current()?;
                self.prologue.clear();
                self.database = Some(db);
                self.state = State::Prologue;
                let mut held: Vec<Vec<u8>> = self.pending.drain(..).collect();
                self.prologue.append(&mut held);
                self.prologue.push(line.to_vec());
                Ok(())
            }
            Marker::Table(name) | Marker::View(name) => self.open_section(&name, line),
            Marker::Routines => self.open_section("routines", line),
            Marker::Events => self.open_section("events", line),
            Marker::Completed => {
                self.pending.clear();
                self.close_current()?;
                self.state = State::Done;
                Ok(())
            }
        }
    }

    fn sink(&mut self, line: &[u8]) -> anyhow::Result<()> {
        match self.state {
            State::Header => self.header.push(line.to_vec()),
            State::Prologue => self.prologue.push(line.to_vec()),
            State::Section => {
                if let Some((_, output)) = &mut self.current {
                    self.bytes += output.write_line(line)? as u64;
                }
            }
            State::Done => {}
        }
        Ok(())
    }

    fn flush_pending(&mut self) -> anyhow::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let held: Vec<Vec<u8>> = self.pending.drain(..).collect();
        for line in &held {
            self.sink(line)?;
        }
        Ok(())
    }

    fn open_section(&mut self, name: &str, line: &[u8]) -> anyhow::Result<()> {
        self.state = State::Section;

        let qualified = match &self.database {
            Some(db) => format!("{db}.{name}"),
            None => name.to_string(),
        };
        if !self.filter.matches(&qualified) {
            debug!("skipping '{qualified}'");
            self.close_current()?;
            self.pending.clear();
            return Ok(());
        }

        let target = self.target_path(name)?;
        let same = self
            .current
            .as_ref()
            .is_some_and(|(path, _)| *path == target);
        if !same {
            self.close_current()?;
            self.open(target)?;
        }
        self.flush_pending()?;
        self.sink(line)
    }

    fn target_path(&self, name: &str) -> anyhow::Result<PathBuf> {
        let stem =
            codec::encode(name).with_context(|| format!("cannot map '{name}' to a file name"))?;
        let file = format!("{stem}{}", self.suffix);
        Ok(match &self.database {
            Some(db) => {
                let dir = codec::encode(db)
                    .with_context(|| format!("cannot map '{db}' to a directory name"))?;
                self.dir.join(dir).join(file)
            }
            None => self.dir.join(file),
        })
    }

    fn open(&mut self, target: PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("cannot create directory {}", parent.display()))?;
        }
        // A view's final definition lands in the file its placeholder
        // opened earlier; revisited paths reopen for append and count
        // once.
        let fresh = self.written.insert(target.clone());
        let file = if fresh {
            File::create(&target).with_context(|| format!("cannot create {}", target.display()))?
        } else {
            fs::OpenOptions::new()
                .append(true)
                .open(&target)
                .with_context(|| format!("cannot reopen {}", target.display()))?
        };
        let mut output = match &self.compress {
            Some(argv) => {
                let sink = subrun::spawn(argv, file)
                    .with_context(|| format!("cannot start '{}'", argv.join(" ")))?;
                Output::Filtered(BufWriter::new(sink))
            }
            None => Output::Plain(BufWriter::new(file)),
        };
        debug!("writing {}", target.display());

        if fresh {
            for line in &self.header {
                self.bytes += output.write_line(line)? as u64;
            }
            for line in &self.prologue {
                self.bytes += output.write_line(line)? as u64;
            }
            self.files += 1;
        }
        self.current = Some((target, output));
        Ok(())
    }

    fn close_current(&mut self) -> anyhow::Result<()> {
        if let Some((path, output)) = self.current.take() {
            output
                .close()
                .with_context(|| format!("cannot finish {}", path.display()))?;
        }
        Ok(())
    }
}

fn classify(line: &[u8]) -> Option<Marker> {
    if !line.starts_with(b"-- ") {
        return None;
    }
    std::str::from_utf8(line).ok().and_then(parser::marker)
}
