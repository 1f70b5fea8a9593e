//! Append-only search trees
//!
//! Vertices live in an arena and refer to their parent by index. A vertex
//! can only name an earlier vertex as parent, so parent chains always end
//! at the root (index 0) and cannot form cycles.

use crate::common::{Configuration, PlanningError, PlanningResult};

/// Growth direction of a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeRole {
    /// Rooted at the start; segments run parent -> child
    Forward,
    /// Rooted at the goal; segments run child -> parent
    Backward,
}

impl TreeRole {
    pub fn other(self) -> TreeRole {
        match self {
            TreeRole::Forward => TreeRole::Backward,
            TreeRole::Backward => TreeRole::Forward,
        }
    }
}

/// Tree node: a configuration, its parent link and the segment joining them
#[derive(Debug, Clone)]
pub struct Vertex<S> {
    config: Configuration,
    role: TreeRole,
    parent: Option<usize>,
    incoming: Option<S>,
    depth: usize,
}

impl<S> Vertex<S> {
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn role(&self) -> TreeRole {
        self.role
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Segment between this vertex and its parent, `None` for the root.
    ///
    /// For a forward tree it starts at the parent, for a backward tree it
    /// ends at the parent.
    pub fn incoming_segment(&self) -> Option<&S> {
        self.incoming.as_ref()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Ordered, insertion-indexed collection of vertices of one role
#[derive(Debug, Clone)]
pub struct Tree<S> {
    role: TreeRole,
    vertices: Vec<Vertex<S>>,
    // vertex the path is reconstructed from when it is not the last one
    tip: Option<usize>,
}

impl<S> Tree<S> {
    pub fn new(role: TreeRole, root: Configuration) -> Self {
        let root = Vertex {
            config: root,
            role,
            parent: None,
            incoming: None,
            depth: 0,
        };
        Tree {
            role,
            vertices: vec![root],
            tip: None,
        }
    }

    pub fn role(&self) -> TreeRole {
        self.role
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// A tree always holds at least its root
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn root(&self) -> &Vertex<S> {
        &self.vertices[0]
    }

    pub fn get(&self, index: usize) -> Option<&Vertex<S>> {
        self.vertices.get(index)
    }

    pub fn last(&self) -> &Vertex<S> {
        &self.vertices[self.vertices.len() - 1]
    }

    pub fn last_index(&self) -> usize {
        self.vertices.len() - 1
    }

    pub fn vertices(&self) -> &[Vertex<S>] {
        &self.vertices
    }

    /// Append a child of `parent` reached through `segment`.
    ///
    /// The vertex is built completely before it is pushed, so a rejected
    /// insertion leaves the tree untouched.
    pub fn add_vertex(&mut self, parent: usize, config: Configuration, segment: S) -> PlanningResult<usize> {
        let depth = match self.vertices.get(parent) {
            Some(p) => p.depth + 1,
            None => {
                return Err(PlanningError::InvalidParameter(format!(
                    "parent index {} out of range for tree of {} vertices",
                    parent,
                    self.vertices.len()
                )))
            }
        };
        self.vertices.push(Vertex {
            config,
            role: self.role,
            parent: Some(parent),
            incoming: Some(segment),
            depth,
        });
        Ok(self.vertices.len() - 1)
    }

    /// Vertex the path to the root is reconstructed from: the connection
    /// point once one has been marked, otherwise the last inserted vertex.
    pub fn tip(&self) -> usize {
        self.tip.unwrap_or(self.vertices.len() - 1)
    }

    pub(crate) fn mark_connection(&mut self, index: usize) {
        debug_assert!(index < self.vertices.len());
        self.tip = Some(index);
    }

    /// Indices from `from` up to the root, inclusive
    pub fn chain_to_root(&self, from: usize) -> Vec<usize> {
        let mut chain = Vec::with_capacity(self.vertices.get(from).map_or(0, |v| v.depth + 1));
        let mut current = self.vertices.get(from).map(|_| from);
        while let Some(index) = current {
            chain.push(index);
            current = self.vertices[index].parent;
        }
        chain
    }

    /// Tip-to-root chain ordered along the direction of motion: root to tip
    /// for a forward tree, tip to root for a backward tree.
    fn chain_in_motion_order(&self) -> Vec<usize> {
        let mut chain = self.chain_to_root(self.tip());
        if self.role == TreeRole::Forward {
            chain.reverse();
        }
        chain
    }

    /// Segments between the root and the tip, in the direction of motion
    pub fn segments_to_tip(&self) -> Vec<&S> {
        self.chain_in_motion_order()
            .into_iter()
            .filter_map(|i| self.vertices[i].incoming.as_ref())
            .collect()
    }

    /// Configurations between the root and the tip, in the direction of motion
    pub fn configurations_to_tip(&self) -> Vec<&Configuration> {
        self.chain_in_motion_order()
            .into_iter()
            .map(|i| &self.vertices[i].config)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{UnitQuaternion, Vector3};

    fn config_at(x: f64) -> Configuration {
        Configuration::new(UnitQuaternion::identity(), Vector3::new(x, 0.0, 0.0))
    }

    // segments are labelled "parent->child"
    fn build_tree(role: TreeRole) -> Tree<String> {
        let mut tree = Tree::new(role, config_at(0.0));
        tree.add_vertex(0, config_at(1.0), "0->1".to_string()).unwrap();
        tree.add_vertex(0, config_at(-1.0), "0->2".to_string()).unwrap();
        tree.add_vertex(1, config_at(2.0), "1->3".to_string()).unwrap();
        tree
    }

    #[test]
    fn test_root_and_depths() {
        let tree = build_tree(TreeRole::Forward);
        assert_eq!(tree.len(), 4);
        assert!(tree.root().is_root());
        assert_eq!(tree.root().depth(), 0);
        assert_eq!(tree.get(3).unwrap().depth(), 2);
        assert_eq!(tree.get(3).unwrap().parent(), Some(1));
        assert!(tree.vertices().iter().all(|v| v.role() == TreeRole::Forward));
    }

    #[test]
    fn test_parent_chains_terminate_at_root() {
        let tree = build_tree(TreeRole::Backward);
        for (i, v) in tree.vertices().iter().enumerate() {
            let chain = tree.chain_to_root(i);
            assert_eq!(chain.len(), v.depth() + 1);
            assert_eq!(*chain.last().unwrap(), 0);
            // parents always come earlier, so the chain strictly decreases
            assert!(chain.windows(2).all(|w| w[1] < w[0]));
        }
    }

    #[test]
    fn test_add_vertex_rejects_unknown_parent() {
        let mut tree = build_tree(TreeRole::Forward);
        let result = tree.add_vertex(10, config_at(5.0), "bad".to_string());
        assert!(result.is_err());
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_forward_segments_run_root_to_tip() {
        let tree = build_tree(TreeRole::Forward);
        // tip defaults to the last inserted vertex
        assert_eq!(tree.tip(), 3);
        assert_eq!(tree.segments_to_tip(), vec!["0->1", "1->3"]);
        let xs: Vec<f64> = tree.configurations_to_tip().iter().map(|c| c.position.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_backward_segments_run_tip_to_root() {
        let tree = build_tree(TreeRole::Backward);
        assert_eq!(tree.segments_to_tip(), vec!["1->3", "0->1"]);
        let xs: Vec<f64> = tree.configurations_to_tip().iter().map(|c| c.position.x).collect();
        assert_eq!(xs, vec![2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_marked_connection_overrides_tip() {
        let mut tree = build_tree(TreeRole::Forward);
        tree.mark_connection(2);
        assert_eq!(tree.tip(), 2);
        assert_eq!(tree.segments_to_tip(), vec!["0->2"]);

        tree.mark_connection(0);
        assert!(tree.segments_to_tip().is_empty());
        assert_eq!(tree.configurations_to_tip().len(), 1);
    }
}
