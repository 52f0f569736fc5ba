//! Step graph derived from routing declarations
//!
//! Edges come from each step's `routingAwareOutput` keys (the `default`
//! route is not an edge). The graph is rebuilt from the pipeline on every
//! call; nothing is cached between validation passes.
//!
//! Cycles are accepted. Routing is decided at run time by an LLM for each
//! document, so a cyclic graph is a valid topology; nothing here guarantees
//! that an execution terminates.

use crate::core::pipeline::PipelineConfig;
use std::collections::{HashSet, VecDeque};

/// Steps with no incoming routing reference, in document order.
///
/// Must only be called on a pipeline whose routing targets all resolve.
pub fn find_entry_points(pipeline: &PipelineConfig) -> Vec<String> {
    let referenced: HashSet<&str> = pipeline
        .steps
        .iter()
        .flat_map(|step| step.next_step_ids())
        .collect();

    pipeline
        .ids()
        .filter(|id| !referenced.contains(id))
        .map(str::to_string)
        .collect()
}

/// A directed routing edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

/// Routing graph over a pipeline's steps
#[derive(Debug, Clone)]
pub struct PipelineGraph {
    nodes: Vec<String>,
    edges: Vec<Edge>,
}

impl PipelineGraph {
    /// Derive the graph; edges to unknown steps are dropped
    pub fn build(pipeline: &PipelineConfig) -> Self {
        let nodes: Vec<String> = pipeline.ids().map(str::to_string).collect();
        let edges = pipeline
            .steps
            .iter()
            .flat_map(|step| {
                step.next_step_ids()
                    .filter(|to| pipeline.contains(to))
                    .map(|to| Edge {
                        from: step.id.clone(),
                        to: to.to_string(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Steps reachable in one hop
    pub fn successors(&self, id: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.from == id)
            .map(|e| e.to.as_str())
            .collect()
    }

    /// Steps that route to `id`
    pub fn predecessors(&self, id: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.to == id)
            .map(|e| e.from.as_str())
            .collect()
    }

    /// Nodes with no incoming edge, in document order
    pub fn entry_points(&self) -> Vec<String> {
        let targets: HashSet<&str> = self.edges.iter().map(|e| e.to.as_str()).collect();
        self.nodes
            .iter()
            .filter(|id| !targets.contains(id.as_str()))
            .cloned()
            .collect()
    }

    /// Every step reachable from `starts` (including the starts), in visit order
    pub fn reachable_from<S: AsRef<str>>(&self, starts: &[S]) -> Vec<String> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut order = Vec::new();
        let mut queue: VecDeque<&str> = VecDeque::new();

        for start in starts {
            if let Some(node) = self.nodes.iter().find(|n| n.as_str() == start.as_ref()) {
                queue.push_back(node.as_str());
            }
        }

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            order.push(current.to_string());
            for next in self.successors(current) {
                if !visited.contains(next) {
                    queue.push_back(next);
                }
            }
        }

        order
    }

    /// Steps no entry point can reach (members of closed routing cycles)
    pub fn unreachable_steps(&self) -> Vec<String> {
        let reachable: HashSet<String> = self.reachable_from(&self.entry_points()).into_iter().collect();
        self.nodes
            .iter()
            .filter(|id| !reachable.contains(*id))
            .cloned()
            .collect()
    }

    /// Steps that route to themselves
    pub fn self_loops(&self) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.from == e.to)
            .map(|e| e.from.as_str())
            .collect()
    }
}
