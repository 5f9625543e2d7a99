use thicket_check::{Location, context};

use crate::active;

/// The scoped guard returned by entering a `SECTION!`.
///
/// Its `Drop` impl performs the opener scope-exit algorithm (spec
/// component D) unconditionally whenever the section was entered — whether
/// or not the body completed normally — so the parent's traversal
/// bookkeeping advances even if the section's body panics.
pub struct SectionOpener {
    entered: bool,
}

impl SectionOpener {
    /// Whether this run should execute the section's body.
    pub fn entered(&self) -> bool {
        self.entered
    }
}

impl Drop for SectionOpener {
    fn drop(&mut self) {
        if self.entered {
            close_entered_section();
        }
    }
}

/// The `open_section` algorithm.
///
/// Steps 1-3 (resolve/insert the child, reject a same-execution re-entry,
/// stamp it visited) are delegated to [`crate::section::SectionTree`]; steps
/// 4-6 (decide whether this run actually descends into the child) are
/// decided here against the active execution context.
pub fn enter_section(name: impl Into<String>, location: Location) -> SectionOpener {
    let name = name.into();
    let parent_id = context::with_current(|ctx| ctx.current_section());
    let exec_count = context::with_current(|ctx| ctx.exec_count());

    let resolved = active::with_active_tree(|tree| tree.resolve_and_stamp(parent_id, &name, location, exec_count));
    let child_id = match resolved {
        Ok(id) => id,
        Err(unwind) => std::panic::panic_any(unwind),
    };

    let already_have_leaf = context::with_current(|ctx| ctx.leaf_section().is_some());
    if already_have_leaf {
        active::with_active_tree(|tree| tree.node_mut(parent_id).next_open_section = Some(child_id));
        return SectionOpener { entered: false };
    }

    if active::with_active_tree(|tree| tree.is_done(child_id)) {
        return SectionOpener { entered: false };
    }

    active::with_active_tree(|tree| tree.node_mut(child_id).next_open_section = None);
    context::with_current(|ctx| ctx.push_section(child_id));
    SectionOpener { entered: true }
}

fn close_entered_section() {
    let (sub_id, parent_id) = context::with_current(|ctx| {
        let sub_id = ctx.current_section();
        let parent_id = ctx.path()[ctx.path().len() - 2];
        (sub_id, parent_id)
    });

    let became_leaf = active::with_active_tree(|tree| match tree.node(sub_id).next_open_section {
        None => {
            tree.node_mut(sub_id).is_done = true;
            true
        }
        Some(next_id) => {
            tree.node_mut(parent_id).next_open_section = Some(next_id);
            false
        }
    });

    context::with_current(|ctx| {
        if became_leaf {
            ctx.set_leaf_section(sub_id);
        }
        ctx.pop_section();
    });
}
