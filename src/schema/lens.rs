//! Lenses into the form value and error trees.
//!
//! The whole form value lives in one `Signal<Value>`. Each widget gets a
//! [`ValueLens`]: the root signal plus the path of its field. Reading through
//! a lens inside an effect subscribes to the root, writing replaces the root
//! with an updated copy.
//!
//! List rows address their item with [`PathSegment::Item`], a getter of the
//! row's current index. After a reorder the same row reads and writes its
//! new position, and its namespace follows.
//!
//! ```
//! use spark_formlib::schema::ValueLens;
//! use spark_signals::signal;
//! use serde_json::json;
//!
//! let root = signal(json!({ "tags": ["a", "b"] }));
//! let second = ValueLens::new(root.clone()).key("tags").index(1);
//!
//! assert_eq!(second.get(), json!("b"));
//! second.set(json!("z"));
//! assert_eq!(root.get(), json!({ "tags": ["a", "z"] }));
//! assert_eq!(second.namespace(), vec!["tags", "1"]);
//! ```

use std::fmt;
use std::rc::Rc;

use serde_json::{Map, Value};
use spark_signals::Signal;

use super::validation::{match_invariant_error, ErrorMessage, InvariantError, ValidationError};

// =============================================================================
// Path
// =============================================================================

/// One step from a value to a child value.
#[derive(Clone)]
pub enum PathSegment {
    /// Object member.
    Key(String),
    /// Fixed list position.
    Index(usize),
    /// List position read at access time.
    Item(Rc<dyn Fn() -> usize>),
}

impl fmt::Debug for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "Key({:?})", key),
            PathSegment::Index(index) => write!(f, "Index({})", index),
            PathSegment::Item(_) => write!(f, "Item(..)"),
        }
    }
}

/// A path segment with its index resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Key(String),
    Index(usize),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Key(key) => write!(f, "{}", key),
            Step::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Path from the form root to a field.
#[derive(Clone, Debug, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    fn push(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    pub fn key(&self, name: &str) -> Self {
        self.push(PathSegment::Key(name.to_string()))
    }

    pub fn index(&self, index: usize) -> Self {
        self.push(PathSegment::Index(index))
    }

    pub fn item(&self, index: Rc<dyn Fn() -> usize>) -> Self {
        self.push(PathSegment::Item(index))
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Resolve item getters. Subscribes when called inside an effect.
    pub fn steps(&self) -> Vec<Step> {
        self.segments
            .iter()
            .map(|segment| match segment {
                PathSegment::Key(key) => Step::Key(key.clone()),
                PathSegment::Index(index) => Step::Index(*index),
                PathSegment::Item(index) => Step::Index(index()),
            })
            .collect()
    }

    /// Path as namespace strings (`["tags", "2"]`).
    pub fn namespace(&self) -> Vec<String> {
        self.steps().iter().map(Step::to_string).collect()
    }
}

fn lookup<'a>(value: &'a Value, steps: &[Step]) -> Option<&'a Value> {
    steps.iter().try_fold(value, |current, step| match step {
        Step::Key(key) => current.as_object()?.get(key),
        Step::Index(index) => current.as_array()?.get(*index),
    })
}

/// Mutable slot at `steps`, creating containers on the way.
fn slot_mut<'a>(value: &'a mut Value, steps: &[Step]) -> &'a mut Value {
    let Some((step, rest)) = steps.split_first() else {
        return value;
    };
    let child = match step {
        Step::Key(key) => {
            if !value.is_object() {
                *value = Value::Object(Map::new());
            }
            match value {
                Value::Object(map) => map.entry(key.clone()).or_insert(Value::Null),
                _ => unreachable!("value was just made an object"),
            }
        }
        Step::Index(index) => {
            if !value.is_array() {
                *value = Value::Array(Vec::new());
            }
            match value {
                Value::Array(items) => {
                    if items.len() <= *index {
                        items.resize(*index + 1, Value::Null);
                    }
                    &mut items[*index]
                }
                _ => unreachable!("value was just made an array"),
            }
        }
    };
    slot_mut(child, rest)
}

// =============================================================================
// Value Lens
// =============================================================================

/// Read/write access to one field of the form value.
#[derive(Clone)]
pub struct ValueLens {
    root: Signal<Value>,
    path: FieldPath,
}

impl ValueLens {
    pub fn new(root: Signal<Value>) -> Self {
        Self {
            root,
            path: FieldPath::root(),
        }
    }

    pub fn with_path(root: Signal<Value>, path: FieldPath) -> Self {
        Self { root, path }
    }

    pub fn key(&self, name: &str) -> Self {
        Self::with_path(self.root.clone(), self.path.key(name))
    }

    pub fn index(&self, index: usize) -> Self {
        Self::with_path(self.root.clone(), self.path.index(index))
    }

    pub fn item(&self, index: Rc<dyn Fn() -> usize>) -> Self {
        Self::with_path(self.root.clone(), self.path.item(index))
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn root_signal(&self) -> &Signal<Value> {
        &self.root
    }

    pub fn namespace(&self) -> Vec<String> {
        self.path.namespace()
    }

    /// Current value, `Null` when the path does not exist.
    pub fn get(&self) -> Value {
        let steps = self.path.steps();
        let root = self.root.get();
        lookup(&root, &steps).cloned().unwrap_or(Value::Null)
    }

    /// Replace the value at this path.
    pub fn set(&self, value: Value) {
        self.update(move |slot| *slot = value);
    }

    /// Edit the value at this path in place and publish the new root.
    pub fn update(&self, edit: impl FnOnce(&mut Value)) {
        let steps = self.path.steps();
        let mut root = self.root.get();
        edit(slot_mut(&mut root, &steps));
        self.root.set(root);
    }
}

impl fmt::Debug for ValueLens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueLens").field("path", &self.path).finish()
    }
}

// =============================================================================
// Error Lens
// =============================================================================

/// Read access to the validation errors of one field.
#[derive(Clone)]
pub struct ErrorLens {
    root: Signal<Option<ValidationError>>,
    path: FieldPath,
}

impl ErrorLens {
    pub fn new(root: Signal<Option<ValidationError>>) -> Self {
        Self {
            root,
            path: FieldPath::root(),
        }
    }

    pub fn with_path(root: Signal<Option<ValidationError>>, path: FieldPath) -> Self {
        Self { root, path }
    }

    pub fn key(&self, name: &str) -> Self {
        Self::with_path(self.root.clone(), self.path.key(name))
    }

    pub fn item(&self, index: Rc<dyn Fn() -> usize>) -> Self {
        Self::with_path(self.root.clone(), self.path.item(index))
    }

    pub fn root_signal(&self) -> &Signal<Option<ValidationError>> {
        &self.root
    }

    /// Errors from the root down to this field, root first. Stops where the
    /// error tree ends.
    fn chain(&self) -> (Vec<ValidationError>, Vec<String>) {
        let namespace = self.path.namespace();
        let Some(root) = self.root.get() else {
            return (Vec::new(), namespace);
        };

        let mut chain = vec![root.clone()];
        let mut current = &root;
        for name in &namespace {
            match current.field_error(name) {
                Some(child) => {
                    chain.push(child.clone());
                    current = child;
                }
                None => break,
            }
        }
        (chain, namespace)
    }

    /// This field's own error.
    pub fn get(&self) -> Option<ValidationError> {
        let steps = self.path.steps();
        let root = self.root.get()?;
        let mut current = &root;
        for step in &steps {
            current = current.field_error(&step.to_string())?;
        }
        Some(current.clone())
    }

    /// Own error as a displayable message.
    pub fn message(&self) -> Option<ErrorMessage> {
        self.get().as_ref().map(ErrorMessage::from)
    }

    /// Invariant error addressed to this field's namespace.
    ///
    /// Invariants declared on this field and on every ancestor are considered.
    pub fn invariant(&self) -> Option<ErrorMessage> {
        let (chain, namespace) = self.chain();
        let invariants: Vec<&InvariantError> =
            chain.iter().flat_map(|err| err.invariant_errors.iter()).collect();
        match_invariant_error(invariants, &namespace)
    }
}

impl fmt::Debug for ErrorLens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorLens").field("path", &self.path).finish()
    }
}
