//! In-process scene graph: named nodes in a parent/child transform
//! hierarchy.
//!
//! The graph holds exactly what the simulation writes (anchor rotation,
//! model placement, reparenting) and what a renderer reads (world matrices
//! and node kinds). It does not draw anything.

mod node;
mod stage;

use glam::{Mat4, Quat, Vec3};
pub use node::{Node, NodeId, NodeKind, Transform};
use rustc_hash::FxHashMap;
pub use stage::{Stage, ANCHOR, BRICKS, CRANE, GRID, SKYBOX, SUN};

use crate::error::CraneError;

/// Name of the node created by [`SceneGraph::new`].
pub const ROOT: &str = "root";

/// Node store with name lookup and change tracking.
pub struct SceneGraph {
    nodes: FxHashMap<NodeId, Node>,
    names: FxHashMap<String, NodeId>,
    root: NodeId,
    next_id: u32,
    /// Monotonically increasing generation; bumped on any mutation.
    generation: u64,
    /// Generation that was last consumed by the renderer.
    rendered_generation: u64,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create a graph holding only the root group.
    #[must_use]
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = FxHashMap::default();
        let _ = nodes.insert(root, Node::new(ROOT, NodeKind::Group));
        let mut names = FxHashMap::default();
        let _ = names.insert(ROOT.to_owned(), root);
        Self {
            nodes,
            names,
            root,
            next_id: 1,
            generation: 1,
            rendered_generation: 0,
        }
    }

    fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// The root node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root cannot be removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert `node` as the last child of `parent`.
    pub fn insert(
        &mut self,
        parent: NodeId,
        mut node: Node,
    ) -> Result<NodeId, CraneError> {
        if self.names.contains_key(&node.name) {
            return Err(CraneError::DuplicateNode(node.name));
        }
        let id = NodeId(self.next_id);
        self.node_mut(parent)?.children.push(id);
        self.next_id += 1;

        node.parent = Some(parent);
        node.children.clear();
        let _ = self.names.insert(node.name.clone(), id);
        let _ = self.nodes.insert(id, node);
        self.invalidate();
        Ok(id)
    }

    /// Look up a node by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// Immutable node access.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Mutable node access. Marks the graph dirty.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.generation += 1;
        self.nodes.get_mut(&id)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, CraneError> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| CraneError::UnknownNode(format!("#{}", id.0)))
    }

    /// Overwrite a node's local translation.
    pub fn set_translation(
        &mut self,
        id: NodeId,
        translation: Vec3,
    ) -> Result<(), CraneError> {
        self.node_mut(id)?.transform.translation = translation;
        self.invalidate();
        Ok(())
    }

    /// Overwrite a node's local rotation.
    pub fn set_rotation(
        &mut self,
        id: NodeId,
        rotation: Quat,
    ) -> Result<(), CraneError> {
        self.node_mut(id)?.transform.rotation = rotation;
        self.invalidate();
        Ok(())
    }

    /// Whether `ancestor` appears on the parent chain of `id` (or is `id`).
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.nodes.get(&current).and_then(Node::parent);
        }
        false
    }

    /// Move `child` (and its subtree) under `new_parent`, keeping its local
    /// transform. Reparenting to the current parent is a no-op.
    pub fn reparent(
        &mut self,
        child: NodeId,
        new_parent: NodeId,
    ) -> Result<(), CraneError> {
        if !self.nodes.contains_key(&new_parent) {
            return Err(CraneError::UnknownNode(format!("#{}", new_parent.0)));
        }
        let old_parent = self.node_mut(child)?.parent;
        if old_parent == Some(new_parent) {
            return Ok(());
        }
        if child == self.root || self.is_ancestor(child, new_parent) {
            return Err(CraneError::SceneCycle);
        }

        if let Some(old) = old_parent {
            self.node_mut(old)?.children.retain(|&c| c != child);
        }
        self.node_mut(new_parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(new_parent);
        self.invalidate();
        Ok(())
    }

    /// Compose local transforms from the root down to `id`.
    pub fn world_matrix(&self, id: NodeId) -> Result<Mat4, CraneError> {
        let mut matrix = Mat4::IDENTITY;
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self
                .nodes
                .get(&current)
                .ok_or_else(|| CraneError::UnknownNode(format!("#{}", current.0)))?;
            matrix = node.transform.to_matrix() * matrix;
            cursor = node.parent;
        }
        Ok(matrix)
    }

    /// World-space origin of `id`.
    pub fn world_position(&self, id: NodeId) -> Result<Vec3, CraneError> {
        Ok(self.world_matrix(id)?.transform_point3(Vec3::ZERO))
    }

    /// Depth-first walk from the root, parents before children.
    #[must_use]
    pub fn walk(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.children.iter().rev());
            }
        }
        order
    }

    /// Whether the graph changed since last `mark_rendered()`.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.generation != self.rendered_generation
    }

    /// Record that the current state has been presented.
    pub fn mark_rendered(&mut self) {
        self.rendered_generation = self.generation;
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn group(name: &str) -> Node {
        Node::new(name, NodeKind::Group)
    }

    #[test]
    fn insert_and_find_by_name() {
        let mut scene = SceneGraph::new();
        let a = scene.insert(scene.root(), group("a")).unwrap();
        assert_eq!(scene.find("a"), Some(a));
        assert_eq!(scene.get(a).unwrap().parent(), Some(scene.root()));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut scene = SceneGraph::new();
        let _ = scene.insert(scene.root(), group("a")).unwrap();
        let err = scene.insert(scene.root(), group("a")).unwrap_err();
        assert!(matches!(err, CraneError::DuplicateNode(name) if name == "a"));
    }

    #[test]
    fn reparent_moves_child_between_lists() {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        let a = scene.insert(root, group("a")).unwrap();
        let b = scene.insert(root, group("b")).unwrap();

        scene.reparent(b, a).unwrap();

        assert_eq!(scene.get(b).unwrap().parent(), Some(a));
        assert_eq!(scene.get(a).unwrap().children(), &[b]);
        assert_eq!(scene.get(root).unwrap().children(), &[a]);
    }

    #[test]
    fn reparent_twice_does_not_duplicate_child() {
        let mut scene = SceneGraph::new();
        let root = scene.root();
        let a = scene.insert(root, group("a")).unwrap();
        let b = scene.insert(root, group("b")).unwrap();

        scene.reparent(b, a).unwrap();
        scene.reparent(b, a).unwrap();

        assert_eq!(scene.get(a).unwrap().children(), &[b]);
    }

    #[test]
    fn reparent_under_descendant_is_a_cycle() {
        let mut scene = SceneGraph::new();
        let a = scene.insert(scene.root(), group("a")).unwrap();
        let b = scene.insert(a, group("b")).unwrap();

        assert!(matches!(scene.reparent(a, b), Err(CraneError::SceneCycle)));
        assert!(matches!(
            scene.reparent(scene.root(), a),
            Err(CraneError::SceneCycle)
        ));
    }

    #[test]
    fn world_matrix_composes_parent_first() {
        let mut scene = SceneGraph::new();
        let pivot = scene
            .insert(
                scene.root(),
                group("pivot").with_transform(Transform::from_translation(
                    Vec3::new(20.0, 35.0, 0.0),
                )),
            )
            .unwrap();
        let load = scene
            .insert(
                pivot,
                group("load").with_transform(Transform::from_translation(
                    Vec3::new(0.0, -15.0, 0.0),
                )),
            )
            .unwrap();

        let p = scene.world_position(load).unwrap();
        assert!((p - Vec3::new(20.0, 20.0, 0.0)).length() < 1e-5);

        // A quarter turn about Z swings the load out along +X.
        scene
            .set_rotation(pivot, Quat::from_rotation_z(FRAC_PI_2))
            .unwrap();
        let p = scene.world_position(load).unwrap();
        assert!((p - Vec3::new(35.0, 35.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn walk_visits_parents_before_children() {
        let mut scene = SceneGraph::new();
        let a = scene.insert(scene.root(), group("a")).unwrap();
        let b = scene.insert(a, group("b")).unwrap();
        let c = scene.insert(scene.root(), group("c")).unwrap();

        assert_eq!(scene.walk(), vec![scene.root(), a, b, c]);
    }

    #[test]
    fn dirty_tracking() {
        let mut scene = SceneGraph::new();
        assert!(scene.is_dirty());
        scene.mark_rendered();
        assert!(!scene.is_dirty());

        let root = scene.root();
        scene.set_translation(root, Vec3::X).unwrap();
        assert!(scene.is_dirty());
    }

    #[test]
    fn unknown_ids_are_errors() {
        let mut scene = SceneGraph::new();
        let ghost = NodeId(99);
        assert!(matches!(
            scene.set_rotation(ghost, Quat::IDENTITY),
            Err(CraneError::UnknownNode(_))
        ));
        assert!(scene.world_matrix(ghost).is_err());
    }
}
