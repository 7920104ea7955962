//! Mount/Unmount Animation Hooks
//!
//! Widgets announce when an element appears and disappears so an animator
//! can run a transition. Hooks are fire-and-forget: nothing waits on them.
//!
//! # Pattern
//!
//! - [`AnimationGuard::acquire`] calls `on_mount` (optionally) and returns a guard
//! - The guard is stored as a destroy callback of the element
//! - Dropping the guard calls `on_unmount`, so release is guaranteed on unmount
//!
//! # Example
//!
//! ```ignore
//! use spark_formlib::state::animate::{AnimationGuard, ClassAnimator};
//!
//! let guard = AnimationGuard::acquire(Rc::new(ClassAnimator), index, "Formlib-Row--Animation", true);
//! on_destroy(index, move || drop(guard));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::engine::arrays::content;
use crate::engine::on_destroy;

/// Receives mount and unmount notifications for animated elements.
pub trait Animator {
    fn on_mount(&self, index: usize, class_prefix: &str);
    fn on_unmount(&self, index: usize, class_prefix: &str);
}

/// Animator that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAnimation;

impl Animator for NoAnimation {
    fn on_mount(&self, _index: usize, _class_prefix: &str) {}
    fn on_unmount(&self, _index: usize, _class_prefix: &str) {}
}

/// Animator that marks elements with `<prefix>--enter` / `<prefix>--leave`.
///
/// Renderers that support transitions key off these classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassAnimator;

impl Animator for ClassAnimator {
    fn on_mount(&self, index: usize, class_prefix: &str) {
        content::add_class(index, &format!("{}--enter", class_prefix));
    }

    fn on_unmount(&self, index: usize, class_prefix: &str) {
        content::remove_class(index, &format!("{}--enter", class_prefix));
        content::add_class(index, &format!("{}--leave", class_prefix));
    }
}

/// Which hook fired, for [`RecordingAnimator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationEvent {
    Mount(usize, String),
    Unmount(usize, String),
}

/// Animator that records every hook call.
#[derive(Debug, Default)]
pub struct RecordingAnimator {
    events: RefCell<Vec<AnimationEvent>>,
}

impl RecordingAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AnimationEvent> {
        self.events.borrow().clone()
    }

    pub fn mounts(&self, class_prefix: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, AnimationEvent::Mount(_, p) if p == class_prefix))
            .count()
    }

    pub fn unmounts(&self, class_prefix: &str) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, AnimationEvent::Unmount(_, p) if p == class_prefix))
            .count()
    }
}

impl Animator for RecordingAnimator {
    fn on_mount(&self, index: usize, class_prefix: &str) {
        self.events
            .borrow_mut()
            .push(AnimationEvent::Mount(index, class_prefix.to_string()));
    }

    fn on_unmount(&self, index: usize, class_prefix: &str) {
        self.events
            .borrow_mut()
            .push(AnimationEvent::Unmount(index, class_prefix.to_string()));
    }
}

// =============================================================================
// Guard
// =============================================================================

/// Scoped animation of one element. Unmount hook runs on drop.
pub struct AnimationGuard {
    animator: Rc<dyn Animator>,
    index: usize,
    class_prefix: String,
}

impl AnimationGuard {
    /// Start animating `index`. `on_mount` fires only when `animate_mount`.
    pub fn acquire(
        animator: Rc<dyn Animator>,
        index: usize,
        class_prefix: &str,
        animate_mount: bool,
    ) -> Self {
        if animate_mount {
            animator.on_mount(index, class_prefix);
        }
        Self {
            animator,
            index,
            class_prefix: class_prefix.to_string(),
        }
    }

    /// Acquire and tie the guard to the element's lifetime.
    pub fn attach(animator: Rc<dyn Animator>, index: usize, class_prefix: &str, animate_mount: bool) {
        let guard = Self::acquire(animator, index, class_prefix, animate_mount);
        on_destroy(index, move || drop(guard));
    }
}

impl Drop for AnimationGuard {
    fn drop(&mut self) {
        self.animator.on_unmount(self.index, &self.class_prefix);
    }
}
