//! Overload resolution pass.
//!
//! Runs after descriptors for all declarations of a pass are available
//! (recorded eagerly, or forced on demand by a lazy trace). Each name group
//! with more than one member is checked pairwise; conflicts are reported and
//! checking continues with the next group.

use crate::context::ResolvedDeclarations;
use crate::grouping::{class_member_groups, group_constructors, package_member_groups};
use crate::overload::{OverloadabilityOracle, SignatureOverloadability, find_redeclarations};
use crate::reporter::{
    ConflictReporter, DiagnosticsCollector, class_display_name, package_display_name,
};
use kres_descriptors::{CallableMember, Declaration};
use kres_trace::slice::{Slice, SliceValue};
use kres_trace::{BindingTrace, TraceError, slices};
use std::sync::Arc;
use tracing::{debug, debug_span, trace};

/// Counters for one pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OverloadReport {
    /// Name groups with at least two members.
    pub groups_checked: usize,
    pub conflicts_reported: usize,
}

pub struct OverloadResolver<'a, T, O, D>
where
    T: BindingTrace,
    O: OverloadabilityOracle,
    D: DiagnosticsCollector + ?Sized,
{
    trace: &'a T,
    oracle: O,
    reporter: ConflictReporter<'a, D>,
}

impl<'a, T, O, D> OverloadResolver<'a, T, O, D>
where
    T: BindingTrace,
    O: OverloadabilityOracle,
    D: DiagnosticsCollector + ?Sized,
{
    pub fn new(trace: &'a T, oracle: O, sink: &'a mut D) -> Self {
        Self {
            trace,
            oracle,
            reporter: ConflictReporter::new(sink),
        }
    }

    /// Check every class and package of `declarations` for conflicts.
    ///
    /// # Errors
    ///
    /// Fails when a declaration has no descriptor in the trace (or forcing
    /// it failed). Conflicts are never errors.
    pub fn process(
        &mut self,
        declarations: &ResolvedDeclarations,
    ) -> Result<OverloadReport, TraceError> {
        let _span = debug_span!(
            "check_overloads",
            classes = declarations.classes.len(),
            functions = declarations.functions.len(),
            properties = declarations.properties.len(),
        )
        .entered();

        let classes = self.descriptors(slices::CLASS, &declarations.classes)?;
        let functions = self.descriptors(slices::FUNCTION, &declarations.functions)?;
        let properties = self.descriptors(slices::VARIABLE, &declarations.properties)?;

        let constructors = group_constructors(&classes);
        let mut report = OverloadReport::default();

        for class in &classes {
            let groups = class_member_groups(class, constructors.nested_in(class));
            let container = class_display_name(class);
            for members in groups.values() {
                self.check_group(members, &container, &mut report);
            }
        }

        let groups = package_member_groups(&functions, &properties, &constructors.in_packages);
        for (fq_name, members) in &groups {
            let container = package_display_name(&fq_name.parent());
            self.check_group(members, &container, &mut report);
        }

        debug!(
            groups_checked = report.groups_checked,
            conflicts = report.conflicts_reported,
            "overload check finished"
        );
        Ok(report)
    }

    fn descriptors<V>(
        &self,
        slice: Slice<Declaration, Arc<V>>,
        declarations: &[Declaration],
    ) -> Result<Vec<Arc<V>>, TraceError>
    where
        Arc<V>: SliceValue,
    {
        declarations
            .iter()
            .map(|declaration| self.trace.require(slice, declaration))
            .collect()
    }

    fn check_group(
        &mut self,
        members: &[CallableMember],
        container: &str,
        report: &mut OverloadReport,
    ) {
        if members.len() < 2 {
            return;
        }
        report.groups_checked += 1;
        trace!(
            name = %members[0].name(),
            container,
            size = members.len(),
            "checking group"
        );
        let redeclarations = find_redeclarations(members, &self.oracle);
        report.conflicts_reported += self
            .reporter
            .report_redeclarations(container, redeclarations);
    }
}

/// Run the pass with the default signature-based overload rule.
pub fn check_overloads<T, D>(
    trace: &T,
    declarations: &ResolvedDeclarations,
    sink: &mut D,
) -> Result<OverloadReport, TraceError>
where
    T: BindingTrace,
    D: DiagnosticsCollector + ?Sized,
{
    OverloadResolver::new(trace, SignatureOverloadability, sink).process(declarations)
}
