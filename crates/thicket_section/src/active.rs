//! Thread-local stack of in-flight section trees.
//!
//! Kept separate from [`thicket_check::context`]'s execution-context stack
//! but pushed and popped in lockstep with it by the scheduler, so a nested
//! self-test gets its own isolated tree exactly as it gets its own isolated
//! context.

use std::cell::RefCell;

use thicket_check::Location;

use crate::section::SectionTree;

thread_local! {
    static TREE_STACK: RefCell<Vec<SectionTree>> = const { RefCell::new(Vec::new()) };
}

pub(crate) fn push_tree(root_name: impl Into<String>, root_location: Location) {
    TREE_STACK.with(|stack| stack.borrow_mut().push(SectionTree::new(root_name, root_location)));
}

pub(crate) fn pop_tree() -> SectionTree {
    TREE_STACK.with(|stack| stack.borrow_mut().pop().expect("pop_tree called with no active section tree"))
}

pub(crate) fn with_active_tree<R>(f: impl FnOnce(&mut SectionTree) -> R) -> R {
    TREE_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        let tree = stack.last_mut().expect("section op used with no active test");
        f(tree)
    })
}
