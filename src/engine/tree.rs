//! Tree queries over the element arrays.
//!
//! Siblings are ordered by their `order` slot, then by creation sequence, so
//! an element created later by a control-flow branch still lands in its slot.

use super::arrays::{content, core};
use super::registry::get_allocated_indices;

/// Sort key of an element among its siblings.
fn sibling_key(index: usize) -> (i32, u64) {
    (core::get_order(index), core::get_sequence(index))
}

/// Children of `parent` in display order.
pub fn children(parent: usize) -> Vec<usize> {
    let mut children: Vec<usize> = get_allocated_indices()
        .into_iter()
        .filter(|&index| core::get_parent_index(index) == Some(parent))
        .collect();
    children.sort_by_key(|&index| sibling_key(index));
    children
}

/// Elements without a parent, in creation order.
pub fn roots() -> Vec<usize> {
    let mut roots: Vec<usize> = get_allocated_indices()
        .into_iter()
        .filter(|&index| core::get_parent_index(index).is_none())
        .collect();
    roots.sort_by_key(|&index| sibling_key(index));
    roots
}

/// `root` and everything below it, depth first in display order.
pub fn descendants(root: usize) -> Vec<usize> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(index) = stack.pop() {
        out.push(index);
        let mut kids = children(index);
        kids.reverse();
        stack.extend(kids);
    }
    out
}

/// Elements under `root` (inclusive) carrying `class`, in display order.
pub fn find_by_class(root: usize, class: &str) -> Vec<usize> {
    descendants(root)
        .into_iter()
        .filter(|&index| content::has_class(index, class))
        .collect()
}

/// First element under `root` (inclusive) carrying `class`.
pub fn find_first_by_class(root: usize, class: &str) -> Option<usize> {
    find_by_class(root, class).into_iter().next()
}

/// Element under `root` (inclusive) whose `id` attribute is `id`.
pub fn find_by_attr_id(root: usize, id: &str) -> Option<usize> {
    descendants(root)
        .into_iter()
        .find(|&index| content::get_attr(index, "id").as_deref() == Some(id))
}

/// Depth of `index` below its root.
pub fn depth(index: usize) -> usize {
    let mut depth = 0;
    let mut current = core::get_parent_index(index);
    while let Some(parent) = current {
        depth += 1;
        current = core::get_parent_index(parent);
    }
    depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{allocate_index, reset_registry};

    #[test]
    fn test_children_sorted_by_order_then_sequence() {
        reset_registry();

        let parent = allocate_index();
        let late = allocate_index();
        let early = allocate_index();
        let same_a = allocate_index();
        let same_b = allocate_index();
        for child in [late, early, same_a, same_b] {
            core::set_parent_index(child, Some(parent));
        }
        core::set_order(late, 5);
        core::set_order(early, 1);
        core::set_order(same_a, 3);
        core::set_order(same_b, 3);

        assert_eq!(children(parent), vec![early, same_a, same_b, late]);
        assert_eq!(roots(), vec![parent]);
        assert_eq!(depth(same_b), 1);
    }

    #[test]
    fn test_find_by_class_depth_first() {
        reset_registry();

        let root = allocate_index();
        let a = allocate_index();
        let a_child = allocate_index();
        let b = allocate_index();
        core::set_parent_index(a, Some(root));
        core::set_parent_index(a_child, Some(a));
        core::set_parent_index(b, Some(root));
        for index in [a, a_child, b] {
            content::add_class(index, "hit");
        }

        assert_eq!(find_by_class(root, "hit"), vec![a, a_child, b]);
        assert_eq!(find_first_by_class(root, "hit"), Some(a));
        assert_eq!(descendants(root), vec![root, a, a_child, b]);
    }
}
