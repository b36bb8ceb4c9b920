//! Conflict diagnostics.

use crate::overload::Redeclaration;
use kres_common::FqName;
use kres_common::diagnostics::{Diagnostic, diagnostic_messages};
use kres_descriptors::{CallableMember, ClassDescriptor, ClassKind, DeclId, Declaration};
use rustc_hash::FxHashSet;
use tracing::debug;

const UNKNOWN_CONTAINER: &str = "<unknown>";
const ROOT_PACKAGE: &str = "root package";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConflictKind {
    /// A property declared twice.
    Redeclaration,
    /// Two callables that call sites cannot tell apart.
    ConflictingOverloads,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConflictPayload {
    Redeclaration {
        name: String,
    },
    ConflictingOverloads {
        member: CallableMember,
        container: String,
    },
}

/// A conflict attached to one source declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConflictDiagnostic {
    pub kind: ConflictKind,
    pub declaration: Declaration,
    pub payload: ConflictPayload,
}

impl ConflictDiagnostic {
    pub fn new(redeclaration: Redeclaration, container: &str) -> Self {
        let Redeclaration {
            declaration,
            member,
        } = redeclaration;
        if member.is_property() {
            Self {
                kind: ConflictKind::Redeclaration,
                payload: ConflictPayload::Redeclaration {
                    name: member.name().to_string(),
                },
                declaration,
            }
        } else {
            Self {
                kind: ConflictKind::ConflictingOverloads,
                payload: ConflictPayload::ConflictingOverloads {
                    member,
                    container: container.to_string(),
                },
                declaration,
            }
        }
    }

    /// Render into a file diagnostic located at the offending declaration.
    pub fn to_diagnostic(&self, file: &str) -> Diagnostic {
        let span = self.declaration.span();
        match &self.payload {
            ConflictPayload::Redeclaration { name } => Diagnostic::from_message(
                file,
                span.start,
                span.len(),
                diagnostic_messages::REDECLARATION,
                &[name.as_str()],
            ),
            ConflictPayload::ConflictingOverloads { member, container } => {
                let member = member.to_string();
                Diagnostic::from_message(
                    file,
                    span.start,
                    span.len(),
                    diagnostic_messages::CONFLICTING_OVERLOADS,
                    &[member.as_str(), container.as_str()],
                )
            }
        }
    }
}

/// Receives conflict diagnostics as they are found.
pub trait DiagnosticsCollector {
    fn report(&mut self, diagnostic: ConflictDiagnostic);
}

impl DiagnosticsCollector for Vec<ConflictDiagnostic> {
    fn report(&mut self, diagnostic: ConflictDiagnostic) {
        self.push(diagnostic);
    }
}

/// Collector that renders every conflict into a [`Diagnostic`] for one file.
#[derive(Clone, Debug)]
pub struct RenderingCollector {
    file: String,
    diagnostics: Vec<Diagnostic>,
}

impl RenderingCollector {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            diagnostics: Vec::new(),
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticsCollector for RenderingCollector {
    fn report(&mut self, diagnostic: ConflictDiagnostic) {
        self.diagnostics.push(diagnostic.to_diagnostic(&self.file));
    }
}

/// Forwards redeclarations to a collector, at most once per declaration.
pub struct ConflictReporter<'a, D: DiagnosticsCollector + ?Sized> {
    sink: &'a mut D,
    reported: FxHashSet<DeclId>,
}

impl<'a, D: DiagnosticsCollector + ?Sized> ConflictReporter<'a, D> {
    pub fn new(sink: &'a mut D) -> Self {
        Self {
            sink,
            reported: FxHashSet::default(),
        }
    }

    /// Report `redeclarations` found in a group of `container`.
    ///
    /// Returns the number of diagnostics emitted.
    pub fn report_redeclarations(
        &mut self,
        container: &str,
        redeclarations: impl IntoIterator<Item = Redeclaration>,
    ) -> usize {
        let mut emitted = 0;
        for redeclaration in redeclarations {
            if !self.reported.insert(redeclaration.declaration.id()) {
                continue;
            }
            debug!(
                declaration = ?redeclaration.declaration,
                member = %redeclaration.member,
                container,
                "conflict reported"
            );
            self.sink
                .report(ConflictDiagnostic::new(redeclaration, container));
            emitted += 1;
        }
        emitted
    }

    /// Number of distinct declarations reported so far.
    pub fn reported_count(&self) -> usize {
        self.reported.len()
    }
}

/// Container name used in messages about members of `class`.
pub fn class_display_name(class: &ClassDescriptor) -> String {
    match class.kind {
        ClassKind::ClassObject => format!(
            "class object {}",
            class
                .container
                .name()
                .map_or(UNKNOWN_CONTAINER, |name| name.as_str())
        ),
        ClassKind::Object => UNKNOWN_CONTAINER.to_string(),
        ClassKind::Class => class.name.to_string(),
    }
}

/// Container name used in messages about top-level members of `package`.
pub fn package_display_name(package: &FqName) -> String {
    if package.is_root() {
        ROOT_PACKAGE.to_string()
    } else {
        package.to_string()
    }
}
