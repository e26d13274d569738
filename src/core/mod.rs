pub mod errors;
pub mod types;

pub use errors::ResolveError;
pub use types::{
    CallEdge, Diagnostic, LocalsRecord, MethodRecord, MethodRef, Note, Owner, ResolutionResult,
};
