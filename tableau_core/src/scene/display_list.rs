// Copyright 2026 the Tableau Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered child lists and the structural operations on them.
//!
//! A [`DisplayList`] belongs to exactly one owner node for the owner's whole
//! life. The operations here keep four things in step: the children
//! sequence, each child's `parent` link, each child's `next` link, and each
//! child's stage (through the [lifecycle hooks](super::Scene::activate)).

use alloc::vec;
use alloc::vec::Vec;

use super::id::INVALID;
use super::store::Scene;
use crate::dirty;
use crate::trace::{AttachEvent, DetachEvent, RejectEvent, RejectReason};

/// The ordered children of one container node.
///
/// Sequence order is sibling order and paint order.
#[derive(Clone, Debug)]
pub struct DisplayList {
    pub(crate) owner: u32,
    pub(crate) children: Vec<u32>,
}

impl DisplayList {
    pub(crate) fn new(owner: u32) -> Self {
        Self {
            owner,
            children: Vec::new(),
        }
    }

    /// Returns the raw slot index of the owning node.
    #[must_use]
    pub fn owner_index(&self) -> u32 {
        self.owner
    }

    /// Returns the raw slot indices of the children, in order.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.children
    }

    /// Returns the number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns whether the list has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn position(&self, idx: u32) -> Option<usize> {
        self.children.iter().position(|&c| c == idx)
    }
}

impl Scene {
    /// Splices `nodes` into `owner`'s list at `at` (append when `None`).
    ///
    /// Ignored when `owner` has no list, `nodes` is empty, or any node is
    /// `owner` or one of its ancestors.
    pub(crate) fn list_add(&mut self, owner: u32, nodes: &[u32], at: Option<usize>) {
        if self.display_list[owner as usize].is_none() {
            return;
        }
        let owner_id = self.handle(owner);
        if nodes.is_empty() {
            self.tracer().rejected(&RejectEvent {
                owner: owner_id,
                reason: RejectReason::Empty,
            });
            return;
        }
        if nodes.iter().any(|&n| self.is_self_or_ancestor(n, owner)) {
            self.tracer().rejected(&RejectEvent {
                owner: owner_id,
                reason: RejectReason::Cycle,
            });
            return;
        }

        let mut incoming: Vec<u32> = Vec::with_capacity(nodes.len());
        for &n in nodes {
            if !incoming.contains(&n) {
                incoming.push(n);
            }
        }

        // A node that already has a parent leaves it first, even when the
        // parent is `owner`.
        for &n in &incoming {
            let old = self.parent[n as usize];
            if old != INVALID {
                self.list_remove(old, n);
            }
        }

        let Some(list) = self.display_list[owner as usize].as_mut() else {
            return;
        };
        let at = at.map_or(list.children.len(), |i| i.min(list.children.len()));
        let tail = list.children.split_off(at);
        list.children.extend_from_slice(&incoming);
        list.children.extend(tail);

        if at > 0 {
            let prev = list.children[at - 1];
            self.next_sibling[prev as usize] = incoming[0];
        }

        let stage = self.stage[owner as usize];
        for (offset, &n) in incoming.iter().enumerate() {
            let index = at + offset;
            self.next_sibling[n as usize] = self.child_at(owner, index + 1).unwrap_or(INVALID);
            self.parent[n as usize] = owner;
            let node = self.handle(n);
            self.tracer().attach(&AttachEvent {
                node,
                parent: owner_id,
                index,
            });
            self.activate_from(n, stage);
        }

        self.mark_structure(owner);
    }

    /// Removes `node` from `owner`'s list. Returns `false` if it was not a
    /// direct child.
    pub(crate) fn list_remove(&mut self, owner: u32, node: u32) -> bool {
        let Some(list) = self.display_list[owner as usize].as_ref() else {
            return false;
        };
        let Some(pos) = list.position(node) else {
            return false;
        };

        if pos > 0 {
            let prev = list.children[pos - 1];
            self.next_sibling[prev as usize] = self.next_sibling[node as usize];
        }
        self.next_sibling[node as usize] = INVALID;
        self.parent[node as usize] = INVALID;

        self.deactivate_from(node);

        if let Some(list) = self.display_list[owner as usize].as_mut() {
            list.children.remove(pos);
        }

        let (node_id, owner_id) = (self.handle(node), self.handle(owner));
        self.tracer().detach(&DetachEvent {
            node: node_id,
            parent: owner_id,
        });
        self.mark_structure(owner);
        true
    }

    /// Deactivates and unlinks every child of `owner`, then empties the list.
    pub(crate) fn list_clear(&mut self, owner: u32) {
        let owner_id = self.handle(owner);
        // Index-based so deactivation cannot invalidate the walk.
        let mut i = 0;
        while let Some(child) = self.child_at(owner, i) {
            self.deactivate_from(child);
            self.next_sibling[child as usize] = INVALID;
            self.parent[child as usize] = INVALID;
            let node = self.handle(child);
            self.tracer().detach(&DetachEvent {
                node,
                parent: owner_id,
            });
            i += 1;
        }

        let emptied = match self.display_list[owner as usize].as_mut() {
            Some(list) if !list.children.is_empty() => {
                list.children.clear();
                true
            }
            _ => false,
        };
        if emptied {
            self.mark_structure(owner);
        }
    }

    /// Returns whether `node` is anywhere below `owner`.
    pub(crate) fn list_contains(&self, owner: u32, node: u32) -> bool {
        let mut stack = vec![owner];
        while let Some(idx) = stack.pop() {
            if let Some(list) = &self.display_list[idx as usize] {
                for &child in &list.children {
                    if child == node {
                        return true;
                    }
                    stack.push(child);
                }
            }
        }
        false
    }

    fn mark_structure(&mut self, owner: u32) {
        self.dirty.mark(owner, dirty::STRUCTURE);
        self.topology_changed = true;
    }
}
