//! Indexed view of one assembly's observed calls.

use im::{HashMap, HashSet, Vector};

use crate::core::{CallEdge, MethodRef, ResolveError};

/// Call graph for a single assembly.
///
/// The raw edge list is preserved in input order for evidence collection;
/// the caller/callee indexes collapse duplicate edges between the same
/// pair. All lookups are by `MethodRef` value.
#[derive(Debug, Clone, Default)]
pub struct AssemblyCallGraph {
    edges: Vector<CallEdge>,
    caller_index: HashMap<MethodRef, HashSet<MethodRef>>,
    callee_index: HashMap<MethodRef, HashSet<MethodRef>>,
}

impl AssemblyCallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph for `assembly_name` from extracted edges.
    ///
    /// Edge sets are same-assembly by contract; an endpoint from any other
    /// assembly aborts with [`ResolveError::CrossAssemblyEdge`] rather than
    /// silently producing wrong ownership data downstream.
    pub fn from_edges(assembly_name: &str, edges: &[CallEdge]) -> Result<Self, ResolveError> {
        let mut graph = Self::new();
        for edge in edges {
            if edge.from.assembly_name != assembly_name || edge.to.assembly_name != assembly_name {
                return Err(ResolveError::CrossAssemblyEdge {
                    assembly: assembly_name.to_string(),
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                });
            }
            graph.add_edge(edge.clone());
        }
        Ok(graph)
    }

    pub fn add_edge(&mut self, edge: CallEdge) {
        let caller = edge.from.clone();
        let callee = edge.to.clone();

        self.edges.push_back(edge);

        self.callee_index
            .entry(caller.clone())
            .or_default()
            .insert(callee.clone());

        self.caller_index.entry(callee).or_default().insert(caller);
    }

    /// Raw edges in input order, duplicates included.
    pub fn edges(&self) -> impl Iterator<Item = &CallEdge> {
        self.edges.iter()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Distinct callers of `method`.
    pub fn callers_of(&self, method: &MethodRef) -> Vec<MethodRef> {
        self.caller_index
            .get(method)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Distinct callees of `method`.
    pub fn callees_of(&self, method: &MethodRef) -> Vec<MethodRef> {
        self.callee_index
            .get(method)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// True iff every outgoing edge of `method` targets the given type.
    /// Vacuously true for a method with no outgoing edges.
    pub fn calls_only_type(&self, method: &MethodRef, type_id: u32) -> bool {
        self.callee_index
            .get(method)
            .map(|set| set.iter().all(|callee| callee.type_id == type_id))
            .unwrap_or(true)
    }
}
