//! Control Flow - Conditional and keyed list rendering.
//!
//! - [`show`] - mount one of two branches depending on a reactive condition
//! - [`each`] - one mounted component per key, with a per-key item signal
//!
//! Both capture the parent index at creation time and restore it whenever
//! they render later from inside an effect. Both own an effect scope; the
//! returned cleanup stops the scope and unmounts whatever is mounted.
//!
//! A branch or row is mounted in a detached scope of its own, with no
//! active effect. Its bindings are not children of the effect that decided
//! to mount it, so a later re-run of that effect leaves them alive. They
//! stop when the branch or row is unmounted.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::{Rc, Weak};

use spark_signals::{
    effect, effect_scope, on_scope_dispose, signal, with_context, AnyReaction, AnySource, Signal,
};

use crate::engine::{get_current_parent_index, with_parent};
use crate::primitives::Cleanup;

// =============================================================================
// Owned mounts
// =============================================================================

/// Tracking state of the running effect, parked while something mounts.
///
/// Restored on drop, including the dependencies collected so far.
struct Parked {
    reaction: Option<Weak<dyn AnyReaction>>,
    effect: Option<Weak<dyn AnyReaction>>,
    deps: Vec<Rc<dyn AnySource>>,
    skipped: usize,
}

impl Parked {
    fn park() -> Self {
        with_context(|ctx| Self {
            reaction: ctx.set_active_reaction(None),
            effect: ctx.set_active_effect(None),
            deps: ctx.swap_new_deps(Vec::new()),
            skipped: ctx.get_skipped_deps(),
        })
    }
}

impl Drop for Parked {
    fn drop(&mut self) {
        let deps = std::mem::take(&mut self.deps);
        with_context(|ctx| {
            ctx.swap_new_deps(deps);
            ctx.set_skipped_deps(self.skipped);
            ctx.set_active_reaction(self.reaction.take());
            ctx.set_active_effect(self.effect.take());
        });
    }
}

/// Mount `render` in a detached scope. The returned cleanup unmounts it and
/// stops every effect it created.
fn mount_owned(render: impl FnOnce() -> Cleanup) -> Cleanup {
    let scope = effect_scope(true);
    let mounted = {
        let _parked = Parked::park();
        scope.run(render)
    };

    Box::new(move || {
        if let Some(cleanup) = mounted {
            cleanup();
        }
        scope.stop();
    })
}

// =============================================================================
// show()
// =============================================================================

/// Mount `then_fn` while `condition` holds, `else_fn` (if any) otherwise.
///
/// The branch is only rebuilt when the condition actually flips.
///
/// ```ignore
/// let empty = signal(true);
/// let cleanup = show(
///     move || empty.get(),
///     || placeholder(&ctx, &text),
///     None::<fn() -> Cleanup>,
/// );
/// ```
pub fn show<ThenF, ElseF, ThenR, ElseR>(
    condition: impl Fn() -> bool + 'static,
    then_fn: ThenF,
    else_fn: Option<ElseF>,
) -> Cleanup
where
    ThenF: Fn() -> ThenR + 'static,
    ElseF: Fn() -> ElseR + 'static,
    ThenR: Into<Cleanup>,
    ElseR: Into<Cleanup>,
{
    let parent_index = get_current_parent_index();

    let mounted: Rc<RefCell<Option<Cleanup>>> = Rc::new(RefCell::new(None));
    let last: Rc<Cell<Option<bool>>> = Rc::new(Cell::new(None));

    let scope = effect_scope(false);
    let mounted_effect = mounted.clone();
    let mounted_dispose = mounted.clone();

    scope.run(move || {
        let _stop = effect(move || {
            let current = condition();
            if last.get() == Some(current) {
                return;
            }
            last.set(Some(current));

            let previous = mounted_effect.borrow_mut().take();
            if let Some(previous) = previous {
                previous();
            }

            let next = if current {
                Some(mount_owned(|| with_parent(parent_index, || then_fn().into())))
            } else {
                else_fn
                    .as_ref()
                    .map(|f| mount_owned(|| with_parent(parent_index, || f().into())))
            };
            *mounted_effect.borrow_mut() = next;
        });

        on_scope_dispose(move || {
            let current = mounted_dispose.borrow_mut().take();
            if let Some(current) = current {
                current();
            }
        });
    });

    Box::new(move || scope.stop())
}

// =============================================================================
// each()
// =============================================================================

/// Render one component per item, tracked by key.
///
/// - new key: an item signal is created and `render_fn(getter, key)` runs
/// - known key: only its item signal is updated, nothing is re-rendered
/// - vanished key: its component is unmounted
///
/// Duplicate keys are logged and skipped.
///
/// ```ignore
/// let cleanup = each(
///     move || tracker_items(),
///     move |item, key| render_row(item, key),
///     |item: &ListItem| item.key,
/// );
/// ```
pub fn each<T, K, RenderF, R>(
    items_getter: impl Fn() -> Vec<T> + 'static,
    render_fn: RenderF,
    key_fn: impl Fn(&T) -> K + 'static,
) -> Cleanup
where
    T: Clone + PartialEq + 'static,
    K: Clone + Eq + Hash + Debug + 'static,
    RenderF: Fn(Rc<dyn Fn() -> T>, K) -> R + 'static,
    R: Into<Cleanup>,
{
    let parent_index = get_current_parent_index();
    let scope = effect_scope(false);

    let mounted: Rc<RefCell<HashMap<K, (Signal<T>, Cleanup)>>> =
        Rc::new(RefCell::new(HashMap::new()));
    let mounted_effect = mounted.clone();
    let mounted_dispose = mounted.clone();

    scope.run(move || {
        let _stop = effect(move || {
            let items = items_getter();
            let mut seen = HashSet::with_capacity(items.len());

            for item in items {
                let key = key_fn(&item);
                if !seen.insert(key.clone()) {
                    log::warn!("each: duplicate key {:?} skipped", key);
                    continue;
                }

                let existing = mounted_effect.borrow().get(&key).map(|(s, _)| s.clone());
                match existing {
                    Some(item_signal) => {
                        item_signal.set(item);
                    }
                    None => {
                        let item_signal = signal(item);
                        let reader = item_signal.clone();
                        let getter: Rc<dyn Fn() -> T> = Rc::new(move || reader.get());
                        let row_key = key.clone();
                        let cleanup = mount_owned(|| {
                            with_parent(parent_index, || render_fn(getter, row_key).into())
                        });
                        mounted_effect.borrow_mut().insert(key, (item_signal, cleanup));
                    }
                }
            }

            let gone: Vec<(Signal<T>, Cleanup)> = {
                let mut map = mounted_effect.borrow_mut();
                let stale: Vec<K> = map.keys().filter(|k| !seen.contains(*k)).cloned().collect();
                stale.iter().filter_map(|k| map.remove(k)).collect()
            };
            for (_, cleanup) in gone {
                cleanup();
            }
        });

        on_scope_dispose(move || {
            let all: Vec<(Signal<T>, Cleanup)> =
                mounted_dispose.borrow_mut().drain().map(|(_, v)| v).collect();
            for (_, cleanup) in all {
                cleanup();
            }
        });
    });

    Box::new(move || scope.stop())
}
