// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node storage with allocation, node-level display list
//! operations, and property management.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect};
use understory_dirty::DirtyTracker;

use super::display_list::DisplayList;
use super::id::{INVALID, NodeId, NodeKind};
use crate::dirty;
use crate::stage::{MovieRegistry, StageId};
use crate::trace::{MarkUpdateEvent, TraceSink, Tracer};

/// Struct-of-arrays storage for all nodes of a scene.
///
/// Nodes are addressed by [`NodeId`] handles. Internally, each node occupies
/// a slot in parallel arrays. Destroyed nodes are recycled via a free list,
/// and generation counters prevent stale handle access.
///
/// The node-level operations ([`add_child`](Self::add_child),
/// [`remove_child`](Self::remove_child), [`clear`](Self::clear), ...) are
/// available on every node; on a [`NodeKind::Leaf`], which has no display
/// list, they do nothing.
pub struct Scene {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) display_list: Vec<Option<DisplayList>>,

    // -- Node properties --
    pub(crate) kind: Vec<NodeKind>,
    pub(crate) position: Vec<Point>,
    pub(crate) content_bounds: Vec<Rect>,

    // -- Lifecycle --
    pub(crate) stage: Vec<u32>,
    pub(crate) stages: Vec<MovieRegistry>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Change tracking --
    pub(crate) dirty: DirtyTracker<u32>,
    pub(crate) pending_activated: Vec<u32>,
    pub(crate) pending_deactivated: Vec<u32>,
    pub(crate) topology_changed: bool,

    #[cfg(feature = "trace")]
    sink: Option<Box<dyn TraceSink>>,
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("slots", &self.len)
            .field("free", &self.free_list.len())
            .field("stages", &self.stages.len())
            .field("topology_changed", &self.topology_changed)
            .finish_non_exhaustive()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates an empty scene with no nodes and no stages.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            next_sibling: Vec::new(),
            display_list: Vec::new(),
            kind: Vec::new(),
            position: Vec::new(),
            content_bounds: Vec::new(),
            stage: Vec::new(),
            stages: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::new(),
            pending_activated: Vec::new(),
            pending_deactivated: Vec::new(),
            topology_changed: false,
            #[cfg(feature = "trace")]
            sink: None,
        }
    }

    /// Installs a sink that receives every subsequent scene event.
    ///
    /// Without the `trace` feature the sink is dropped immediately.
    pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink>) {
        #[cfg(feature = "trace")]
        {
            self.sink = Some(sink);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
        }
    }

    /// Removes the installed trace sink, if any.
    pub fn clear_trace_sink(&mut self) {
        #[cfg(feature = "trace")]
        {
            self.sink = None;
        }
    }

    pub(crate) fn tracer(&mut self) -> Tracer<'_> {
        #[cfg(feature = "trace")]
        {
            match self.sink.as_deref_mut() {
                Some(sink) => Tracer::new(sink),
                None => Tracer::none(),
            }
        }
        #[cfg(not(feature = "trace"))]
        {
            Tracer::none()
        }
    }

    // -- Allocation API --

    /// Creates a new node and returns its handle.
    ///
    /// The node starts detached and inactive, at the origin, with empty
    /// content bounds. Containers and movies get an empty display list.
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot; its generation was bumped on destroy.
            let i = idx as usize;
            self.parent[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.display_list[i] = kind.has_display_list().then(|| DisplayList::new(idx));
            self.kind[i] = kind;
            self.position[i] = Point::ZERO;
            self.content_bounds[i] = Rect::ZERO;
            self.stage[i] = INVALID;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.next_sibling.push(INVALID);
            self.display_list
                .push(kind.has_display_list().then(|| DisplayList::new(idx)));
            self.kind.push(kind);
            self.position.push(Point::ZERO);
            self.content_bounds.push(Rect::ZERO);
            self.stage.push(INVALID);
            self.generation.push(0);
            idx
        };
        self.handle(idx)
    }

    /// Destroys a node, freeing its slot for reuse.
    ///
    /// The node is removed from its parent, its own children become
    /// ownerless roots, and the node is deactivated. The children themselves
    /// stay alive.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_node(&mut self, id: NodeId) {
        self.validate(id);
        let idx = id.idx;

        let parent = self.parent[idx as usize];
        if parent != INVALID {
            self.list_remove(parent, idx);
        }
        self.list_clear(idx);
        self.deactivate_from(idx);

        self.dirty.remove_key(idx);
        self.pending_activated.retain(|&i| i != idx);
        self.display_list[idx as usize] = None;

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;
        self.free_list.push(idx);
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        id.idx < self.len
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    // -- Queries --

    /// Returns the kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.validate(id);
        self.kind[id.idx as usize]
    }

    /// Returns whether the node owns a display list.
    #[must_use]
    pub fn has_display_list(&self, id: NodeId) -> bool {
        self.validate(id);
        self.display_list[id.idx as usize].is_some()
    }

    /// Returns the node's display list, if it has one.
    #[must_use]
    pub fn display_list(&self, id: NodeId) -> Option<&DisplayList> {
        self.validate(id);
        self.display_list[id.idx as usize].as_ref()
    }

    /// Returns the parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.handle_opt(self.parent[id.idx as usize])
    }

    /// Returns the following sibling of a node, if any.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.handle_opt(self.next_sibling[id.idx as usize])
    }

    /// Returns the stage the node is active on, if any.
    #[must_use]
    pub fn stage(&self, id: NodeId) -> Option<StageId> {
        self.validate(id);
        let stage = self.stage[id.idx as usize];
        (stage != INVALID).then_some(StageId(stage))
    }

    /// Returns whether the node is active on some stage.
    #[must_use]
    pub fn is_active(&self, id: NodeId) -> bool {
        self.stage(id).is_some()
    }

    /// Returns the live nodes that have no parent, in slot order.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        (0..self.len)
            .filter(|&idx| self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx))
            .map(|idx| self.handle(idx))
            .collect()
    }

    // -- Node-level display list operations --

    /// Appends `child` to the display list of `parent`.
    ///
    /// If `child` already has a parent (including `parent` itself) it is
    /// moved. Ignored if `child` is `parent` or one of its ancestors.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> &mut Self {
        self.validate(parent);
        self.validate(child);
        self.list_add(parent.idx, &[child.idx], None);
        self
    }

    /// Inserts `child` into the display list of `parent` at `index`.
    ///
    /// `index` is clamped to the current number of children. Moving a node
    /// within the same list behaves like removing it and then inserting it at
    /// `index` in the shortened list.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn add_child_at(&mut self, parent: NodeId, child: NodeId, index: usize) -> &mut Self {
        self.validate(parent);
        self.validate(child);
        self.list_add(parent.idx, &[child.idx], Some(index));
        self
    }

    /// Appends a sequence of nodes, in order, to the display list of
    /// `parent`.
    ///
    /// The whole request is ignored if it is empty or if any node is `parent`
    /// or one of its ancestors.
    ///
    /// # Panics
    ///
    /// Panics if any handle is stale.
    pub fn add_children(&mut self, parent: NodeId, children: &[NodeId]) -> &mut Self {
        self.validate(parent);
        let indices = self.indices_of(children);
        self.list_add(parent.idx, &indices, None);
        self
    }

    /// Inserts a sequence of nodes, in order, at `index`.
    ///
    /// # Panics
    ///
    /// Panics if any handle is stale.
    pub fn add_children_at(
        &mut self,
        parent: NodeId,
        children: &[NodeId],
        index: usize,
    ) -> &mut Self {
        self.validate(parent);
        let indices = self.indices_of(children);
        self.list_add(parent.idx, &indices, Some(index));
        self
    }

    /// Returns a copy of the children of `parent`, in paint order.
    ///
    /// The returned vector is detached from the scene.
    #[must_use]
    pub fn children(&self, parent: NodeId) -> Vec<NodeId> {
        self.validate(parent);
        self.display_list[parent.idx as usize]
            .as_ref()
            .map(|list| list.children.iter().map(|&c| self.handle(c)).collect())
            .unwrap_or_default()
    }

    /// Returns the number of direct children of `parent`.
    #[must_use]
    pub fn child_count(&self, parent: NodeId) -> usize {
        self.validate(parent);
        self.display_list[parent.idx as usize]
            .as_ref()
            .map_or(0, DisplayList::len)
    }

    /// Replaces the children of `parent`: clears the list, then adds
    /// `children` in order.
    ///
    /// # Panics
    ///
    /// Panics if any handle is stale.
    pub fn set_children(&mut self, parent: NodeId, children: &[NodeId]) -> &mut Self {
        self.validate(parent);
        let indices = self.indices_of(children);
        self.list_clear(parent.idx);
        self.list_add(parent.idx, &indices, None);
        self
    }

    /// Removes every child of `parent`, deactivating each one.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn clear(&mut self, parent: NodeId) -> &mut Self {
        self.validate(parent);
        self.list_clear(parent.idx);
        self
    }

    /// Removes `child` from the display list of `parent` if it is a direct
    /// child; does nothing otherwise.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> &mut Self {
        let _ = self.take_child(parent, child);
        self
    }

    /// Removes `child` from the display list of `parent` and reports whether
    /// it was a direct child.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn take_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        self.validate(parent);
        self.validate(child);
        self.list_remove(parent.idx, child.idx)
    }

    /// Removes `child` from whatever display list holds it.
    ///
    /// Returns `false` if the node had no parent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn remove_from_parent(&mut self, child: NodeId) -> bool {
        self.validate(child);
        let parent = self.parent[child.idx as usize];
        parent != INVALID && self.list_remove(parent, child.idx)
    }

    /// Returns the position of `child` among the direct children of `parent`.
    #[must_use]
    pub fn index_of_child(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.validate(parent);
        self.validate(child);
        self.display_list[parent.idx as usize]
            .as_ref()
            .and_then(|list| list.position(child.idx))
    }

    /// Returns whether `node` is a direct or indirect child of `parent`.
    #[must_use]
    pub fn contains(&self, parent: NodeId, node: NodeId) -> bool {
        self.validate(parent);
        self.validate(node);
        self.list_contains(parent.idx, node.idx)
    }

    /// Marks `id` and its whole subtree for update.
    ///
    /// Descendants are marked depth-first, each node's children before the
    /// node itself, following the current children sequences by index.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn mark_update(&mut self, id: NodeId) {
        self.validate(id);
        self.mark_update_subtree(id.idx);
    }

    // -- Properties --

    /// Returns the node's position in its parent's coordinate space.
    #[must_use]
    pub fn position(&self, id: NodeId) -> Point {
        self.validate(id);
        self.position[id.idx as usize]
    }

    /// Sets the node's position and marks it for update.
    pub fn set_position(&mut self, id: NodeId, position: Point) {
        self.validate(id);
        self.position[id.idx as usize] = position;
        self.dirty.mark(id.idx, dirty::UPDATE);
    }

    /// Returns the node's own content bounds, relative to its position.
    ///
    /// Only leaves use these for [`get_computed`](Self::get_computed);
    /// containers aggregate their children instead.
    #[must_use]
    pub fn content_bounds(&self, id: NodeId) -> Rect {
        self.validate(id);
        self.content_bounds[id.idx as usize]
    }

    /// Sets the node's own content bounds and marks it for update.
    pub fn set_content_bounds(&mut self, id: NodeId, bounds: Rect) {
        self.validate(id);
        self.content_bounds[id.idx as usize] = bounds;
        self.dirty.mark(id.idx, dirty::UPDATE);
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: NodeId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale NodeId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Builds a handle for a live slot.
    pub(crate) fn handle(&self, idx: u32) -> NodeId {
        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    fn handle_opt(&self, idx: u32) -> Option<NodeId> {
        (idx != INVALID).then(|| self.handle(idx))
    }

    fn indices_of(&self, nodes: &[NodeId]) -> Vec<u32> {
        nodes
            .iter()
            .map(|&id| {
                self.validate(id);
                id.idx
            })
            .collect()
    }

    /// Returns the child at position `i` of `owner`'s display list.
    pub(crate) fn child_at(&self, owner: u32, i: usize) -> Option<u32> {
        self.display_list[owner as usize]
            .as_ref()?
            .children
            .get(i)
            .copied()
    }

    fn mark_update_subtree(&mut self, idx: u32) {
        let mut i = 0;
        while let Some(child) = self.child_at(idx, i) {
            self.mark_update_subtree(child);
            i += 1;
        }
        self.dirty.mark(idx, dirty::UPDATE);
        let node = self.handle(idx);
        self.tracer().mark_update(&MarkUpdateEvent { node });
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn container(scene: &mut Scene) -> NodeId {
        scene.create_node(NodeKind::Container)
    }

    /// Asserts that following `next` links yields exactly the children.
    fn assert_links(scene: &Scene, parent: NodeId) {
        let linked: Vec<_> = scene.sibling_chain(parent).collect();
        assert_eq!(linked, scene.children(parent), "next links diverge");
        if let Some(&last) = scene.children(parent).last() {
            assert_eq!(scene.next_sibling(last), None, "last child has a next");
        }
        for child in scene.children(parent) {
            assert_eq!(scene.parent(child), Some(parent), "wrong parent link");
        }
    }

    #[test]
    fn create_and_destroy() {
        let mut scene = Scene::new();
        let id = container(&mut scene);
        assert!(scene.is_alive(id));
        scene.destroy_node(id);
        assert!(!scene.is_alive(id));
        assert_eq!(scene.node_count(), 0);
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut scene = Scene::new();
        let id1 = container(&mut scene);
        scene.destroy_node(id1);
        let id2 = scene.create_node(NodeKind::Leaf);
        assert!(!scene.is_alive(id1));
        assert!(scene.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
        assert!(!scene.has_display_list(id2));
    }

    #[test]
    fn insert_at_index_fixes_links() {
        let mut scene = Scene::new();
        let owner = container(&mut scene);
        let [a, b, c, d] = [(); 4].map(|()| container(&mut scene));
        scene.add_children(owner, &[a, b, c]);

        scene.add_child_at(owner, d, 1);
        assert_eq!(scene.children(owner), vec![a, d, b, c]);
        assert_eq!(scene.next_sibling(a), Some(d));
        assert_eq!(scene.next_sibling(d), Some(b));
        assert_eq!(scene.next_sibling(c), None);

        scene.remove_child(owner, b);
        assert_eq!(scene.children(owner), vec![a, d, c]);
        assert_eq!(scene.next_sibling(d), Some(c));
        assert_eq!(scene.parent(b), None);
        assert_eq!(scene.next_sibling(b), None);
        assert_links(&scene, owner);
    }

    #[test]
    fn insert_at_zero_prepends() {
        let mut scene = Scene::new();
        let owner = container(&mut scene);
        let [a, b] = [(); 2].map(|()| container(&mut scene));
        scene.add_child(owner, a).add_child_at(owner, b, 0);
        assert_eq!(scene.children(owner), vec![b, a]);
        assert_links(&scene, owner);
    }

    #[test]
    fn insert_index_is_clamped() {
        let mut scene = Scene::new();
        let owner = container(&mut scene);
        let [a, b] = [(); 2].map(|()| container(&mut scene));
        scene.add_child(owner, a).add_child_at(owner, b, 99);
        assert_eq!(scene.children(owner), vec![a, b]);
        assert_links(&scene, owner);
    }

    #[test]
    fn sequence_insert_keeps_order() {
        let mut scene = Scene::new();
        let owner = container(&mut scene);
        let [a, b, c, d] = [(); 4].map(|()| container(&mut scene));
        scene.add_children(owner, &[a, d]);
        scene.add_children_at(owner, &[b, c], 1);
        assert_eq!(scene.children(owner), vec![a, b, c, d]);
        assert_links(&scene, owner);
    }

    #[test]
    fn empty_sequence_is_ignored() {
        let mut scene = Scene::new();
        let owner = container(&mut scene);
        let a = container(&mut scene);
        scene.add_child(owner, a).add_children(owner, &[]);
        assert_eq!(scene.children(owner), vec![a]);
    }

    #[test]
    fn adding_owner_or_ancestor_is_ignored() {
        let mut scene = Scene::new();
        let root = container(&mut scene);
        let mid = container(&mut scene);
        let leaf = container(&mut scene);
        let fresh = container(&mut scene);
        scene.add_child(root, mid).add_child(mid, leaf);

        scene.add_child(mid, mid);
        scene.add_child(leaf, root);
        scene.add_children(leaf, &[fresh, mid]);

        assert_eq!(scene.children(root), vec![mid]);
        assert_eq!(scene.children(mid), vec![leaf]);
        assert!(scene.children(leaf).is_empty());
        assert_eq!(scene.parent(root), None);
        assert_eq!(scene.parent(fresh), None);
    }

    #[test]
    fn reparent_moves_exactly_once() {
        let mut scene = Scene::new();
        let old = container(&mut scene);
        let new = container(&mut scene);
        let [a, b, c] = [(); 3].map(|()| container(&mut scene));
        let x = container(&mut scene);
        scene.add_children(old, &[a, b, c]);
        scene.add_child(new, x);

        scene.add_child_at(new, b, 0);

        assert_eq!(scene.children(old), vec![a, c]);
        assert_eq!(scene.next_sibling(a), Some(c));
        assert!(!scene.contains(old, b));
        assert_eq!(scene.children(new), vec![b, x]);
        assert_eq!(scene.parent(b), Some(new));
        assert_links(&scene, old);
        assert_links(&scene, new);
    }

    #[test]
    fn moving_within_same_list() {
        let mut scene = Scene::new();
        let owner = container(&mut scene);
        let [a, b, c, d] = [(); 4].map(|()| container(&mut scene));
        scene.add_children(owner, &[a, b, c, d]);

        // Move `d` to the front, then `a` to the end.
        scene.add_child_at(owner, d, 0);
        assert_eq!(scene.children(owner), vec![d, a, b, c]);
        scene.add_child(owner, a);
        assert_eq!(scene.children(owner), vec![d, b, c, a]);
        assert_links(&scene, owner);
    }

    #[test]
    fn repeated_nodes_in_a_sequence_are_inserted_once() {
        let mut scene = Scene::new();
        let owner = container(&mut scene);
        let [a, b] = [(); 2].map(|()| container(&mut scene));
        scene.add_children(owner, &[a, b, a]);
        assert_eq!(scene.children(owner), vec![a, b]);
        assert_links(&scene, owner);
    }

    #[test]
    fn children_returns_a_copy() {
        let mut scene = Scene::new();
        let owner = container(&mut scene);
        let [a, b] = [(); 2].map(|()| container(&mut scene));
        scene.add_children(owner, &[a, b]);

        let mut copy = scene.children(owner);
        copy.clear();
        assert_eq!(scene.children(owner), vec![a, b]);
    }

    #[test]
    fn set_children_replaces_list() {
        let mut scene = Scene::new();
        let owner = container(&mut scene);
        let [a, b, c] = [(); 3].map(|()| container(&mut scene));
        scene.add_children(owner, &[a, b]);

        scene.set_children(owner, &[c, a]);
        assert_eq!(scene.children(owner), vec![c, a]);
        assert_eq!(scene.parent(b), None);
        assert_links(&scene, owner);
    }

    #[test]
    fn clear_detaches_every_child() {
        let mut scene = Scene::new();
        let owner = container(&mut scene);
        let [a, b, c] = [(); 3].map(|()| container(&mut scene));
        scene.add_children(owner, &[a, b, c]).clear(owner);

        assert!(scene.children(owner).is_empty());
        for node in [a, b, c] {
            assert_eq!(scene.parent(node), None);
            assert_eq!(scene.next_sibling(node), None);
            assert!(scene.is_alive(node));
        }
    }

    #[test]
    fn remove_absent_child_is_noop() {
        let mut scene = Scene::new();
        let owner = container(&mut scene);
        let other = container(&mut scene);
        let [a, b] = [(); 2].map(|()| container(&mut scene));
        scene.add_child(owner, a).add_child(other, b);

        assert!(!scene.take_child(owner, b));
        assert_eq!(scene.parent(b), Some(other));
        assert!(scene.take_child(owner, a));
        assert!(!scene.take_child(owner, a));
    }

    #[test]
    fn contains_is_recursive() {
        let mut scene = Scene::new();
        let root = container(&mut scene);
        let mid = container(&mut scene);
        let deep = scene.create_node(NodeKind::Leaf);
        scene.add_child(root, mid).add_child(mid, deep);

        assert!(scene.contains(root, mid));
        assert!(scene.contains(root, deep));
        assert!(!scene.contains(mid, root));
        assert!(!scene.contains(root, root));

        scene.remove_child(mid, deep);
        assert!(!scene.contains(root, deep));
    }

    #[test]
    fn index_of_child_is_direct_only() {
        let mut scene = Scene::new();
        let root = container(&mut scene);
        let [a, b] = [(); 2].map(|()| container(&mut scene));
        let deep = container(&mut scene);
        scene.add_children(root, &[a, b]).add_child(b, deep);

        assert_eq!(scene.index_of_child(root, a), Some(0));
        assert_eq!(scene.index_of_child(root, b), Some(1));
        assert_eq!(scene.index_of_child(root, deep), None);
    }

    #[test]
    fn leaf_ignores_child_operations() {
        let mut scene = Scene::new();
        let leaf = scene.create_node(NodeKind::Leaf);
        let other = container(&mut scene);
        scene.add_child(leaf, other);

        assert!(scene.children(leaf).is_empty());
        assert_eq!(scene.parent(other), None);
        assert_eq!(scene.index_of_child(leaf, other), None);
        assert!(!scene.contains(leaf, other));
    }

    #[test]
    fn destroy_orphans_children() {
        let mut scene = Scene::new();
        let root = container(&mut scene);
        let mid = container(&mut scene);
        let [a, b] = [(); 2].map(|()| container(&mut scene));
        scene.add_child(root, mid).add_children(mid, &[a, b]);

        scene.destroy_node(mid);
        assert!(scene.children(root).is_empty());
        assert_eq!(scene.parent(a), None);
        assert_eq!(scene.next_sibling(a), None);
        let roots = scene.roots();
        assert!(roots.contains(&a) && roots.contains(&b) && roots.contains(&root));
        assert_eq!(roots.len(), 3);
    }

    #[test]
    fn random_edits_keep_links_consistent() {
        let mut scene = Scene::new();
        let owners = [container(&mut scene), container(&mut scene)];
        let nodes: Vec<_> = (0..8).map(|_| container(&mut scene)).collect();

        // Deterministic pseudo-random sequence of edits.
        let mut state = 0x2545_f491_u32;
        for _ in 0..200 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let owner = owners[(state % 2) as usize];
            let node = nodes[((state >> 3) % 8) as usize];
            match (state >> 8) % 3 {
                0 => {
                    scene.add_child(owner, node);
                }
                1 => {
                    scene.add_child_at(owner, node, ((state >> 12) % 5) as usize);
                }
                _ => {
                    scene.remove_child(owner, node);
                }
            }
            for owner in owners {
                assert_links(&scene, owner);
            }
            let total: usize = owners.iter().map(|&o| scene.child_count(o)).sum();
            let attached = nodes.iter().filter(|&&n| scene.parent(n).is_some()).count();
            assert_eq!(total, attached, "a node sits in two lists");
        }
    }

    #[test]
    fn mark_update_reports_subtree() {
        let mut scene = Scene::new();
        let root = container(&mut scene);
        let mid = container(&mut scene);
        let leaf = scene.create_node(NodeKind::Leaf);
        let outside = container(&mut scene);
        scene.add_child(root, mid).add_child(mid, leaf);
        let _ = scene.collect_changes();

        scene.mark_update(root);
        let changes = scene.collect_changes();
        for node in [root, mid, leaf] {
            assert!(changes.updated.contains(&node.idx), "{node:?} not marked");
        }
        assert!(!changes.updated.contains(&outside.idx));
    }

    #[test]
    fn set_position_marks_update() {
        let mut scene = Scene::new();
        let id = scene.create_node(NodeKind::Leaf);
        scene.set_position(id, Point::new(3.0, 4.0));
        assert_eq!(scene.position(id), Point::new(3.0, 4.0));
        let changes = scene.collect_changes();
        assert!(changes.updated.contains(&id.idx));
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_add_child() {
        let mut scene = Scene::new();
        let root = container(&mut scene);
        let id = container(&mut scene);
        scene.destroy_node(id);
        scene.add_child(root, id);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_parent() {
        let mut scene = Scene::new();
        let id = container(&mut scene);
        scene.destroy_node(id);
        let _ = scene.parent(id);
    }
}
