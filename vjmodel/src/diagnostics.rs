//! Diagnostics reported while building a model.
//!
//! Messages come from a fixed catalogue ([`DiagnosticKind`]) and carry the
//! caller's opaque [`Location`]. Every recorded diagnostic is mirrored to the
//! `log` facade at the matching level.
use strum::{Display, EnumIter, FromRepr, IntoStaticStr};

use crate::reflect::Location;

/// Severity levels, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromRepr, Display)]
#[repr(u32)]
pub enum Severity {
    Info = 2,
    Warning = 3,
    Error = 4,
}

impl Severity {
    fn log_level(self) -> log::Level {
        match self {
            Severity::Info => log::Level::Info,
            Severity::Warning => log::Level::Warn,
            Severity::Error => log::Level::Error,
        }
    }
}

/// The message catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
pub enum DiagnosticKind {
    MalformedGetter,
    MalformedSetter,
    ConflictingPropertyType,
    ClassNotFound,
    NotAnInterface,
    ImportTypeNotFound,
    ParameterNamesUnavailable,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticKind::ParameterNamesUnavailable => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Render the catalogue entry for `subject`.
    pub fn message(self, subject: &str) -> String {
        match self {
            DiagnosticKind::MalformedGetter => format!(
                "Malformed getter `{subject}`: a getter must not take any parameters."
            ),
            DiagnosticKind::MalformedSetter => format!(
                "Malformed setter `{subject}`: a setter takes exactly one parameter and returns nothing, its declaring interface or the generated class."
            ),
            DiagnosticKind::ConflictingPropertyType => format!(
                "Property method `{subject}` disagrees with the type of an existing member of the same name."
            ),
            DiagnosticKind::ClassNotFound => {
                format!("Referenced type `{subject}` was not found.")
            }
            DiagnosticKind::NotAnInterface => {
                format!("Configured interface `{subject}` is a class and cannot be implemented.")
            }
            DiagnosticKind::ImportTypeNotFound => {
                format!("Import type `{subject}` was not found.")
            }
            DiagnosticKind::ParameterNamesUnavailable => format!(
                "Parameter names are unavailable for `{subject}`, member names are used instead. Keep parameter names in the compiled declarations to use the original ones."
            ),
        }
    }
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, location: Location, subject: &str) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            location,
            message: kind.message(subject),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}: {}", self.severity, self.location, self.message)
    }
}

/// Receiver of diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);

    /// Build a catalogue message, log it and report it.
    fn emit(&mut self, kind: DiagnosticKind, location: &Location, subject: &str) {
        let diagnostic = Diagnostic::new(kind, location.clone(), subject);
        log::log!(
            diagnostic.severity.log_level(),
            "{}: {}",
            diagnostic.location,
            diagnostic.message
        );
        self.report(diagnostic);
    }
}

/// Ordered collection of the diagnostics of one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|diagnostic| diagnostic.severity == Severity::Error)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Diagnostics of one catalogue entry.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(move |diagnostic| diagnostic.kind == kind)
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
