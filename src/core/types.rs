//! Core value types for assembly ownership resolution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a method within a loaded set of assemblies. Compared by value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MethodRef {
    pub assembly_name: String,
    pub type_id: u32,
    pub method_id: u32,
}

impl MethodRef {
    pub fn new(assembly_name: impl Into<String>, type_id: u32, method_id: u32) -> Self {
        Self {
            assembly_name: assembly_name.into(),
            type_id,
            method_id,
        }
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}.{}", self.assembly_name, self.type_id, self.method_id)
    }
}

/// One observed call within an assembly.
///
/// Multiple edges between the same pair are expected in extracted data;
/// the call-graph indexes collapse them, the raw edge list keeps them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEdge {
    pub from: MethodRef,
    pub to: MethodRef,
    pub from_namespace: String,
    pub to_namespace: String,
}

/// Records that a user method declares a local variable of a synthesized
/// type. Some synthesized instances are constructed and handed to runtime
/// infrastructure instead of being called directly; the local declaration
/// is then the only visible evidence of who owns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalsRecord {
    pub owner_type: u32,
    pub owner_method: u32,
    pub owner_namespace: String,
    pub compiler_type: u32,
}

/// One method in an assembly's method roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRecord {
    pub type_id: u32,
    pub method_id: u32,
}

impl MethodRecord {
    pub fn new(type_id: u32, method_id: u32) -> Self {
        Self { type_id, method_id }
    }
}

/// A candidate user-written method believed to be the logical container of
/// a synthesized method.
///
/// Two owners are the same candidate iff `(method_id, assembly_name)`
/// match. That check is [`Owner::same_candidate`], and it is always a value
/// comparison: candidates constructed independently by evidence collection
/// and by chain climbing must collapse into one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub method_id: u32,
    pub type_id: u32,
    pub assembly_name: String,
    pub namespace: String,
}

impl Owner {
    pub fn new(
        method_id: u32,
        type_id: u32,
        assembly_name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            method_id,
            type_id,
            assembly_name: assembly_name.into(),
            namespace: namespace.into(),
        }
    }

    /// Candidate identity: `(method_id, assembly_name)`.
    pub fn same_candidate(&self, other: &Owner) -> bool {
        self.method_id == other.method_id && self.assembly_name == other.assembly_name
    }

    /// Whether this candidate is the given method.
    pub fn is_method(&self, assembly_name: &str, method_id: u32) -> bool {
        self.method_id == method_id && self.assembly_name == assembly_name
    }
}

/// Why a synthesized method could not be assigned a single owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diagnostic {
    /// No eligible caller was found anywhere in the evidence.
    NoCallers,
    /// More than one eligible caller survived resolution.
    MultipleCallers,
}

/// Non-error annotation on a result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Note {
    /// The method has no eligible caller but only ever calls members of its
    /// own declaring type, so the missing caller is not worth surfacing.
    Insignificant,
}

/// One output row per synthesized method. This is the durable artifact of a
/// resolution run; the host persists and displays these.
///
/// Owner fields are populated iff `diagnostic` is `None` and `note` is
/// `None`; otherwise they stay zero/empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub assembly_name: String,
    pub compiler_type: u32,
    pub compiler_method: u32,
    pub owner_type: u32,
    pub owner_method: u32,
    pub owner_namespace: String,
    pub diagnostic: Option<Diagnostic>,
    pub note: Option<Note>,
}

impl ResolutionResult {
    /// The synthesized method this row describes.
    pub fn method_ref(&self) -> MethodRef {
        MethodRef::new(
            self.assembly_name.clone(),
            self.compiler_type,
            self.compiler_method,
        )
    }

    /// The resolved owner, when the row carries one.
    pub fn owner(&self) -> Option<Owner> {
        if self.diagnostic.is_none() && self.note.is_none() {
            Some(Owner::new(
                self.owner_method,
                self.owner_type,
                self.assembly_name.clone(),
                self.owner_namespace.clone(),
            ))
        } else {
            None
        }
    }
}
