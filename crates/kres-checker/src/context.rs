use kres_descriptors::Declaration;

/// Declarations collected by one resolution pass.
///
/// Only handles are stored; descriptors are looked up in the binding trace
/// (`CLASS`, `FUNCTION` and `VARIABLE` slices). `functions` and `properties`
/// may include class members: package-level checking only considers the
/// ones whose container is a package, class members are reached through
/// their class.
#[derive(Clone, Debug, Default)]
pub struct ResolvedDeclarations {
    pub classes: Vec<Declaration>,
    pub functions: Vec<Declaration>,
    pub properties: Vec<Declaration>,
}

impl ResolvedDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.functions.is_empty() && self.properties.is_empty()
    }
}
