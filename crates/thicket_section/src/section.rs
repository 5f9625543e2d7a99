use std::time::Duration;

use hashbrown::HashMap;
use thicket_check::{Location, SectionId, TestError};

/// Per-leaf accounting, moved into a node exactly once at the end of the run
/// that makes it a leaf (component D's invariant 4).
#[derive(Debug, Default, Clone)]
pub(crate) struct LeafStats {
    pub executed_checks: u64,
    pub failed_checks: u64,
    pub errors: Vec<TestError>,
    pub duration: Duration,
}

/// A single node in a test's section tree.
///
/// Nodes are stored in a flat arena (see [`SectionTree`]) rather than
/// linked through owned pointers, mirroring how the rest of the traversal
/// machinery in this workspace addresses its nodes by id rather than by
/// reference.
pub(crate) struct SectionNode {
    pub name: String,
    pub location: Location,
    pub children: Vec<SectionId>,
    child_index: HashMap<String, SectionId>,
    pub is_done: bool,
    pub last_visited_in_exec: i64,
    pub next_open_section: Option<SectionId>,
    pub stats: LeafStats,
}

impl SectionNode {
    fn new(name: String, location: Location) -> Self {
        Self {
            name,
            location,
            children: Vec::new(),
            child_index: HashMap::new(),
            is_done: false,
            last_visited_in_exec: -1,
            next_open_section: None,
            stats: LeafStats::default(),
        }
    }
}

/// The arena backing one test's section tree.
///
/// Built lazily across repeated runs of the user callable: the first run to
/// mention a section name inserts it, later runs re-resolve the same node by
/// name.
pub(crate) struct SectionTree {
    nodes: Vec<SectionNode>,
}

impl SectionTree {
    pub fn new(root_name: impl Into<String>, root_location: Location) -> Self {
        Self { nodes: vec![SectionNode::new(root_name.into(), root_location)] }
    }

    pub fn root(&self) -> SectionId {
        SectionId::from_index(0)
    }

    pub fn node(&self, id: SectionId) -> &SectionNode {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: SectionId) -> &mut SectionNode {
        &mut self.nodes[id.index()]
    }

    fn child_or_insert(&mut self, parent_id: SectionId, name: &str, location: Location) -> SectionId {
        if let Some(&id) = self.node(parent_id).child_index.get(name) {
            return id;
        }
        let new_id = SectionId::from_index(self.nodes.len());
        self.nodes.push(SectionNode::new(name.to_string(), location));
        let parent = self.node_mut(parent_id);
        parent.children.push(new_id);
        parent.child_index.insert(name.to_string(), new_id);
        new_id
    }

    /// The `open_section` algorithm, steps 1-3: resolve
    /// or insert the child, reject a duplicate visit within this execution,
    /// and stamp it visited. Returns the child id for the caller
    /// (`SectionTree::enter`) to finish steps 4-6 against the active
    /// execution context.
    pub fn resolve_and_stamp(
        &mut self,
        parent_id: SectionId,
        name: &str,
        location: Location,
        exec_count: u64,
    ) -> Result<SectionId, thicket_check::Unwind> {
        let child_id = self.child_or_insert(parent_id, name, location);
        let node = self.node_mut(child_id);
        if node.last_visited_in_exec == exec_count as i64 {
            return Err(thicket_check::Unwind::DuplicateSection { name: name.to_string(), location });
        }
        node.last_visited_in_exec = exec_count as i64;
        Ok(child_id)
    }

    pub fn is_done(&self, id: SectionId) -> bool {
        self.node(id).is_done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn here() -> Location {
        Location { file: "section.rs", line: 1 }
    }

    #[test]
    fn first_encounter_inserts_in_order() {
        let mut tree = SectionTree::new("root", here());
        let root = tree.root();
        let a = tree.resolve_and_stamp(root, "a", here(), 1).unwrap();
        let b = tree.resolve_and_stamp(root, "b", here(), 1).unwrap();
        assert_eq!(tree.node(root).children, vec![a, b]);
    }

    #[test]
    fn re_encounter_in_a_later_exec_resolves_the_same_node() {
        let mut tree = SectionTree::new("root", here());
        let root = tree.root();
        let a1 = tree.resolve_and_stamp(root, "a", here(), 1).unwrap();
        let a2 = tree.resolve_and_stamp(root, "a", here(), 2).unwrap();
        assert_eq!(a1, a2);
    }

    #[test]
    fn re_encounter_within_the_same_exec_is_a_duplicate() {
        let mut tree = SectionTree::new("root", here());
        let root = tree.root();
        tree.resolve_and_stamp(root, "a", here(), 1).unwrap();
        let err = tree.resolve_and_stamp(root, "a", here(), 1).unwrap_err();
        assert!(matches!(err, thicket_check::Unwind::DuplicateSection { .. }));
    }
}
