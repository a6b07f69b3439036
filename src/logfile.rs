//! Fixed-format calculation log documents and section slicing.
//!
//! Gaussian output files are long, multi-section text documents in which each
//! quantity of interest lives between a pair of marker phrases ("Input
//! orientation" ... "Distance matrix", "THERM" ... "END", and so on). Every
//! extractor in this crate narrows the document with the same small
//! primitive instead of re-implementing the scan-and-slice loop:
//!
//! - [`LogDocument`] holds the ordered line sequence of one file. It is never
//!   mutated; narrowing produces a borrowed [`View`].
//! - [`View::after`] / [`View::until`] narrow to the first occurrence of a
//!   marker and return `None` when the marker is absent, so each caller
//!   decides explicitly whether a missing marker is fatal or whether the
//!   unnarrowed range is acceptable.
//!
//! Marker search is first-match, top-to-bottom, by substring, and tolerates
//! arbitrary leading/trailing whitespace on the matched line.

use crate::error::{Result, ToolboxError};
use std::fs;
use std::path::Path;

/// Declares how the text in a coordinate source is laid out.
///
/// The format is chosen once at the boundary (CLI flag or file extension)
/// and passed down as a value, rather than re-derived from the filename at
/// each call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// An .xyz trajectory frame: indented `symbol x y z` lines.
    Trajectory,
    /// A Gaussian .log/.out file with an "Input orientation" table.
    CalculationLog,
}

impl SourceFormat {
    /// Infers the format from a file extension.
    ///
    /// `.xyz` maps to [`SourceFormat::Trajectory`]; `.log` and `.out` map to
    /// [`SourceFormat::CalculationLog`]. Returns `None` for anything else so
    /// the caller can fail with a proper message.
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("xyz") => Some(SourceFormat::Trajectory),
            Some("log") | Some("out") => Some(SourceFormat::CalculationLog),
            _ => None,
        }
    }
}

/// One calculation output file as an immutable, ordered line sequence.
#[derive(Debug, Clone)]
pub struct LogDocument {
    origin: String,
    lines: Vec<String>,
}

impl LogDocument {
    /// Reads a document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ToolboxError::Io`] with the offending path when the file
    /// cannot be read.
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ToolboxError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_text(&path.display().to_string(), &content))
    }

    /// Builds a document from already-loaded text. `origin` is used only for
    /// error context.
    pub fn from_text(origin: &str, text: &str) -> Self {
        Self {
            origin: origin.to_string(),
            lines: text.lines().map(|l| l.to_string()).collect(),
        }
    }

    /// The origin (path) this document was read from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// All lines of the document.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// A view spanning the whole document.
    pub fn view(&self) -> View<'_> {
        View {
            doc: self,
            start: 0,
            end: self.lines.len(),
        }
    }

    /// Builds the [`ToolboxError::SectionNotFound`] for a marker missing from
    /// this document.
    pub fn missing(&self, marker: &'static str) -> ToolboxError {
        ToolboxError::SectionNotFound {
            file: self.origin.clone(),
            marker,
        }
    }

    /// Builds a [`ToolboxError::Malformed`] for a line of this document.
    /// `line` is 0-based here and reported 1-based.
    pub fn malformed(&self, line: usize, what: impl Into<String>) -> ToolboxError {
        ToolboxError::Malformed {
            file: self.origin.clone(),
            line: line + 1,
            what: what.into(),
        }
    }
}

/// A contiguous line range of a [`LogDocument`].
///
/// Views are cheap to copy; narrowing never touches the underlying document.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    doc: &'a LogDocument,
    start: usize,
    end: usize,
}

impl<'a> View<'a> {
    /// The lines covered by this view.
    pub fn lines(&self) -> &'a [String] {
        &self.doc.lines()[self.start..self.end]
    }

    /// Document line index (0-based) of the first line in the view.
    pub fn start_line(&self) -> usize {
        self.start
    }

    /// The document this view borrows from.
    pub fn document(&self) -> &'a LogDocument {
        self.doc
    }

    /// Index (relative to the document) of the first line in the view that
    /// contains `marker`.
    fn find(&self, marker: &str) -> Option<usize> {
        self.doc.lines()[self.start..self.end]
            .iter()
            .position(|line| line.contains(marker))
            .map(|pos| self.start + pos)
    }

    /// Narrows the view to begin `offset` lines past the first line
    /// containing `marker`. Returns `None` when the marker is absent.
    pub fn after(&self, marker: &str, offset: usize) -> Option<View<'a>> {
        let at = self.find(marker)?;
        let start = (at + offset).min(self.end);
        Some(View {
            doc: self.doc,
            start,
            end: self.end,
        })
    }

    /// Narrows the view to end `back` lines before the first line containing
    /// `marker`. Returns `None` when the marker is absent.
    pub fn until(&self, marker: &str, back: usize) -> Option<View<'a>> {
        let at = self.find(marker)?;
        let end = at.saturating_sub(back).max(self.start);
        Some(View {
            doc: self.doc,
            start: self.start,
            end,
        })
    }

    /// Like [`View::after`], but keeps the current range when the marker is
    /// absent. Used where best-effort narrowing is the intended behavior.
    pub fn after_or_here(&self, marker: &str, offset: usize) -> View<'a> {
        self.after(marker, offset).unwrap_or(*self)
    }

    /// Like [`View::until`], but keeps the current range when the marker is
    /// absent.
    pub fn until_or_here(&self, marker: &str, back: usize) -> View<'a> {
        self.until(marker, back).unwrap_or(*self)
    }

    /// Narrows the end to the earliest occurrence of any of `markers`,
    /// keeping the current range when none are present.
    pub fn until_any_or_here(&self, markers: &[&str], back: usize) -> View<'a> {
        let mut end = self.end;
        for marker in markers {
            if let Some(at) = self.find(marker) {
                end = end.min(at.saturating_sub(back).max(self.start));
            }
        }
        View {
            doc: self.doc,
            start: self.start,
            end,
        }
    }
}

/// Narrows a document to the converged window of an optimization job: from
/// "Optimization complete" up to the job boundary ("Proceeding to internal
/// job" or "Normal termination of Gaussian").
///
/// Both markers are best-effort: a single-point log without either phrase
/// yields the whole document, which matches how these files are sliced in
/// practice.
pub fn converged_window(doc: &LogDocument) -> View<'_> {
    doc.view()
        .after_or_here("Optimization complete", 0)
        .until_any_or_here(
            &["Proceeding to internal job", "Normal termination of Gaussian"],
            0,
        )
}
