//! Classification of compiler-generated types and methods.
//!
//! Which attributes mark a type or method as compiler-generated is decided
//! upstream during reflection extraction; the resolver only consumes the
//! verdicts through the [`Classification`] trait. All functions here are
//! pure predicates with no side effects.

use std::collections::HashSet;

/// External classification of an assembly's types and methods.
pub trait Classification {
    /// Was this type synthesized by the compiler (closure class, iterator,
    /// async state machine)?
    fn is_compiler_type(&self, type_id: u32) -> bool;

    /// Was this method synthesized by the compiler?
    fn is_compiler_method(&self, method_id: u32) -> bool;

    /// Is this method a constructor?
    fn is_constructor(&self, method_id: u32) -> bool;

    /// A method is eligible for ownership resolution iff it is itself
    /// marked compiler-generated or belongs to a compiler-generated type.
    fn is_resolvable(&self, type_id: u32, method_id: u32) -> bool {
        self.is_compiler_method(method_id) || self.is_compiler_type(type_id)
    }
}

/// Set-backed [`Classification`] for hosts that load id sets from
/// extraction output, and for tests.
#[derive(Debug, Clone, Default)]
pub struct SetClassification {
    compiler_types: HashSet<u32>,
    compiler_methods: HashSet<u32>,
    constructors: HashSet<u32>,
}

impl SetClassification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compiler_types(mut self, type_ids: impl IntoIterator<Item = u32>) -> Self {
        self.compiler_types.extend(type_ids);
        self
    }

    pub fn with_compiler_methods(mut self, method_ids: impl IntoIterator<Item = u32>) -> Self {
        self.compiler_methods.extend(method_ids);
        self
    }

    pub fn with_constructors(mut self, method_ids: impl IntoIterator<Item = u32>) -> Self {
        self.constructors.extend(method_ids);
        self
    }
}

impl Classification for SetClassification {
    fn is_compiler_type(&self, type_id: u32) -> bool {
        self.compiler_types.contains(&type_id)
    }

    fn is_compiler_method(&self, method_id: u32) -> bool {
        self.compiler_methods.contains(&method_id)
    }

    fn is_constructor(&self, method_id: u32) -> bool {
        self.constructors.contains(&method_id)
    }
}
