use crate::slice::{Slice, SliceKind};
use crate::slices::{self, ScopeRef};
use crate::{BindingTrace, BindingTraceContext, TraceError, TraceOptions};
use kres_descriptors::{
    ContainingDeclaration, DeclarationFactory, DeclarationKind, ElementId, FunctionDescriptor,
    Signature,
};
use std::io;
use std::sync::{Arc, Mutex};

const LABELS: Slice<ElementId, &'static str> =
    Slice::new(slices::FIRST_CUSTOM_SLICE_ID, "LABELS", SliceKind::Recorded);

#[test]
fn test_get_after_record_returns_value() {
    let trace = BindingTraceContext::new();
    trace.record(LABELS, ElementId(1), "loop");
    assert_eq!(trace.get(LABELS, &ElementId(1)), Some("loop"));
    assert_eq!(trace.get(LABELS, &ElementId(2)), None);
}

#[test]
fn test_get_on_unknown_slice_is_absent() {
    let trace = BindingTraceContext::new();
    assert!(trace.is_empty());
    assert_eq!(trace.get(slices::RESOLUTION_SCOPE, &ElementId(0)), None);
}

#[test]
fn test_first_recorded_value_wins() {
    let trace = BindingTraceContext::new();
    trace.record(LABELS, ElementId(1), "first");
    trace.record(LABELS, ElementId(1), "second");
    assert_eq!(trace.get(LABELS, &ElementId(1)), Some("first"));
    assert_eq!(trace.len(), 1);
}

#[test]
fn test_recording_identical_value_is_idempotent() {
    let trace = BindingTraceContext::new();
    trace.record(slices::RESOLUTION_SCOPE, ElementId(3), ScopeRef(7));
    trace.record(slices::RESOLUTION_SCOPE, ElementId(3), ScopeRef(7));
    assert_eq!(trace.len(), 1);
    assert_eq!(
        trace.get(slices::RESOLUTION_SCOPE, &ElementId(3)),
        Some(ScopeRef(7))
    );
}

#[test]
fn test_slices_with_same_key_are_independent() {
    let trace = BindingTraceContext::new();
    trace.record(slices::RESOLUTION_SCOPE, ElementId(1), ScopeRef(1));
    trace.record(slices::TYPE_RESOLUTION_SCOPE, ElementId(1), ScopeRef(2));
    assert_eq!(
        trace.get(slices::RESOLUTION_SCOPE, &ElementId(1)),
        Some(ScopeRef(1))
    );
    assert_eq!(
        trace.get(slices::TYPE_RESOLUTION_SCOPE, &ElementId(1)),
        Some(ScopeRef(2))
    );
}

#[test]
fn test_keys_in_recording_order() {
    let trace = BindingTraceContext::new();
    for id in [5, 1, 3] {
        trace.record(LABELS, ElementId(id), "x");
    }
    assert_eq!(
        trace.keys(LABELS),
        vec![ElementId(5), ElementId(1), ElementId(3)]
    );
    assert!(trace.contains(LABELS, &ElementId(3)));
    assert!(!trace.contains(LABELS, &ElementId(4)));
}

#[test]
fn test_require_reports_unresolved_descriptor() {
    let trace = BindingTraceContext::new();
    let mut decls = DeclarationFactory::new();
    let f = decls.declare(DeclarationKind::Function, "f");

    let err = trace
        .require(slices::FUNCTION, &f)
        .expect_err("nothing was recorded");
    assert!(
        matches!(err, TraceError::UnresolvedDescriptor { slice: "FUNCTION", .. }),
        "unexpected error: {err:?}"
    );

    let descriptor = Arc::new(
        FunctionDescriptor::new("f", ContainingDeclaration::package("p"), Signature::default())
            .with_source(f.clone()),
    );
    trace.record(slices::FUNCTION, f.clone(), Arc::clone(&descriptor));
    let found = trace.require(slices::FUNCTION, &f).expect("recorded");
    assert_eq!(found.id, descriptor.id);
}

#[test]
fn test_base_trace_never_forces_derivable_slices() {
    let trace = BindingTraceContext::new();
    let mut decls = DeclarationFactory::new();
    let f = decls.declare(DeclarationKind::Function, "f");
    assert!(slices::FUNCTION.is_derivable());
    assert!(trace.get(slices::FUNCTION, &f).is_none());
}

#[test]
fn test_trace_options_from_json() {
    let options: TraceOptions =
        serde_json::from_str(r#"{ "maxForcingDepth": 8 }"#).expect("valid options");
    assert_eq!(options.max_forcing_depth, 8);

    let defaults: TraceOptions = serde_json::from_str("{}").expect("valid options");
    assert_eq!(defaults, TraceOptions::default());
}

/// Shares `LABELS`' id with a different value type.
const COUNTS: Slice<ElementId, u32> =
    Slice::new(slices::FIRST_CUSTOM_SLICE_ID, "COUNTS", SliceKind::Recorded);

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("log buffer")).into_owned()
    }
}

#[test]
fn test_mistyped_slice_read_is_logged() {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let trace = BindingTraceContext::new();
    tracing::subscriber::with_default(subscriber, || {
        trace.record(LABELS, ElementId(1), "loop");
        assert_eq!(trace.get(COUNTS, &ElementId(1)), None);
    });

    let output = logs.contents();
    assert!(output.contains("read ignored"), "got: {output}");
    assert!(output.contains("COUNTS"), "got: {output}");
    assert_eq!(trace.get(LABELS, &ElementId(1)), Some("loop"));
}

#[test]
fn test_mistyped_slice_write_is_dropped() {
    let trace = BindingTraceContext::new();
    trace.record(LABELS, ElementId(1), "loop");
    trace.record(COUNTS, ElementId(2), 3);
    assert_eq!(trace.len(), 1);
    assert_eq!(trace.get(LABELS, &ElementId(2)), None);
}
