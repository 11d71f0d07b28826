//! Dependency graph and cycle detection.
//!
//! Nodes are task indices (positions in the input slice); edges run from a
//! dependency to its dependent. The graph is derived once per call and
//! never outlives it.
//!
//! # Algorithm
//! Cycle detection is a depth-first search with two marker sets:
//! `finished` (fully explored, acyclic below) and `on_path` (ancestors in
//! the active traversal). Reaching a node that is on the current path is a
//! back edge and therefore a cycle. Each node is finished at most once, so
//! the whole check is O(V + E).
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.3-22.4

use std::collections::HashMap;

use crate::models::Task;

/// Directed dependency graph over task indices.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// `dependents[i]`: tasks that list task `i` as a dependency.
    dependents: Vec<Vec<usize>>,
    /// `dependencies[i]`: tasks that task `i` lists as dependencies.
    dependencies: Vec<Vec<usize>>,
}

impl DependencyGraph {
    /// Builds the graph from tasks and an id → index map.
    ///
    /// Dependencies that do not resolve through `index` are skipped, and a
    /// dependency listed twice yields a single edge.
    pub fn new(tasks: &[Task], index: &HashMap<&str, usize>) -> Self {
        let mut dependents = vec![Vec::new(); tasks.len()];
        let mut dependencies = Vec::with_capacity(tasks.len());

        for (i, task) in tasks.iter().enumerate() {
            let mut deps: Vec<usize> = task
                .dependencies
                .iter()
                .filter_map(|dep| index.get(dep.as_str()).copied())
                .collect();
            deps.sort_unstable();
            deps.dedup();

            for &dep in &deps {
                dependents[dep].push(i);
            }
            dependencies.push(deps);
        }

        Self {
            dependents,
            dependencies,
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Tasks that depend on `node`.
    pub fn dependents(&self, node: usize) -> &[usize] {
        &self.dependents[node]
    }

    /// Tasks that `node` depends on.
    pub fn dependencies(&self, node: usize) -> &[usize] {
        &self.dependencies[node]
    }

    /// Number of distinct dependencies per node.
    pub fn in_degrees(&self) -> Vec<usize> {
        self.dependencies.iter().map(Vec::len).collect()
    }

    /// Searches for a cycle.
    ///
    /// Returns the index of one node lying on a cycle, or `None` if the graph
    /// is acyclic. Self-dependencies count as cycles.
    pub fn find_cycle(&self) -> Option<usize> {
        let mut detector = CycleDetector::new(self.len());
        (0..self.len()).find_map(|root| detector.visit(self, root))
    }

    /// Finds a node on a cycle among the nodes not yet scheduled.
    ///
    /// Meant for the case where ordering stalls: every unscheduled node then
    /// has at least one unscheduled dependency, so following dependencies
    /// must revisit a node, and that node is on a cycle.
    pub fn cycle_member(&self, scheduled: &[bool]) -> Option<usize> {
        let mut seen = vec![false; self.len()];
        let mut node = (0..self.len()).find(|&i| !scheduled[i])?;

        loop {
            if seen[node] {
                return Some(node);
            }
            seen[node] = true;
            node = *self.dependencies[node].iter().find(|&&d| !scheduled[d])?;
        }
    }
}

/// Traversal state owned by a single [`DependencyGraph::find_cycle`] call.
struct CycleDetector {
    finished: Vec<bool>,
    on_path: Vec<bool>,
    /// (node, position of the next dependent to explore)
    stack: Vec<(usize, usize)>,
}

impl CycleDetector {
    fn new(len: usize) -> Self {
        Self {
            finished: vec![false; len],
            on_path: vec![false; len],
            stack: Vec::new(),
        }
    }

    /// Explores everything reachable from `root`. Iterative, so long
    /// dependency chains do not grow the call stack.
    fn visit(&mut self, graph: &DependencyGraph, root: usize) -> Option<usize> {
        if self.finished[root] {
            return None;
        }

        self.on_path[root] = true;
        self.stack.push((root, 0));

        while let Some(frame) = self.stack.last_mut() {
            let (node, next) = *frame;
            match graph.dependents[node].get(next) {
                Some(&succ) => {
                    frame.1 += 1;
                    if self.on_path[succ] {
                        return Some(succ); // Back edge → cycle
                    }
                    if !self.finished[succ] {
                        self.on_path[succ] = true;
                        self.stack.push((succ, 0));
                    }
                }
                None => {
                    self.on_path[node] = false;
                    self.finished[node] = true;
                    self.stack.pop();
                }
            }
        }

        None
    }
}
