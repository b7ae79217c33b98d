//! Path-based surgery on owned operation trees.
//!
//! A path is the list of child indices (as returned by
//! [`Operation::children`]) leading from a root to a node. Paths are taken
//! on the borrowed tree and replayed on a clone, after which every node on
//! the path gets its source text regenerated.

use ir::syntax::render;
use ir::{Meta, Operation};

/// Path to the first node in pre-order matching `pred`.
pub(crate) fn path_to(root: &Operation, pred: &dyn Fn(&Operation) -> bool) -> Option<Vec<usize>> {
    if pred(root) {
        return Some(Vec::new());
    }
    for (idx, child) in root.children().into_iter().enumerate() {
        if let Some(mut rest) = path_to(child, pred) {
            rest.insert(0, idx);
            return Some(rest);
        }
    }
    None
}

/// Path to `node`, compared by address.
pub(crate) fn path_to_node(root: &Operation, node: &Operation) -> Option<Vec<usize>> {
    path_to(root, &|candidate| std::ptr::eq(candidate, node))
}

/// Replaces the node at `path` and regenerates the text of its ancestors.
pub(crate) fn replace_at(root: &mut Operation, path: &[usize], replacement: Operation) -> bool {
    let Some((first, rest)) = path.split_first() else {
        *root = replacement;
        return true;
    };
    let replaced = match root.children_mut().into_iter().nth(*first) {
        Some(child) => replace_at(child, rest, replacement),
        None => false,
    };
    if replaced {
        root.syntax = render(root);
    }
    replaced
}

/// Clone of `root` with the nodes at the given paths replaced.
pub(crate) fn replaced(root: &Operation, edits: Vec<(Vec<usize>, Operation)>) -> Option<Operation> {
    let mut out = root.clone();
    for (path, replacement) in edits {
        if !replace_at(&mut out, &path, replacement) {
            return None;
        }
    }
    Some(out)
}

/// Gives synthesized nodes, which carry no location, the location of the
/// node they replace.
pub(crate) fn place(mut op: Operation, meta: &Meta) -> Operation {
    op.for_each_mut(&mut |node| {
        if node.meta.line == 0 {
            node.meta = meta.clone();
        } else if node.meta.file.is_empty() {
            node.meta.file = meta.file.clone();
        }
    });
    op.meta = meta.clone();
    op
}
