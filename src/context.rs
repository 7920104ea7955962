//! Form context handed to every widget.
//!
//! Carries the adapter registry, translator, animator and options of one
//! form, plus the form-wide reactive flags. Cloning is cheap.

use std::cell::Cell;
use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::adapter::AdapterRegistry;
use crate::i18n::{render_string, I18nText, NoTranslation, Translator};
use crate::options::FormOptions;
use crate::schema::ErrorMessage;
use crate::state::animate::{AnimationGuard, Animator, ClassAnimator};

#[derive(Clone)]
pub struct FormContext {
    pub registry: Rc<AdapterRegistry>,
    pub translator: Rc<dyn Translator>,
    pub animator: Rc<dyn Animator>,
    pub options: Rc<FormOptions>,

    /// Set once the user has tried to submit; error blocks style on it.
    pub submitted: Signal<bool>,

    mounted: Rc<Cell<bool>>,
}

impl FormContext {
    pub fn new(registry: AdapterRegistry) -> Self {
        Self {
            registry: Rc::new(registry),
            translator: Rc::new(NoTranslation),
            animator: Rc::new(ClassAnimator),
            options: Rc::new(FormOptions::default()),
            submitted: signal(false),
            mounted: Rc::new(Cell::new(false)),
        }
    }

    pub fn with_translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Rc::new(translator);
        self
    }

    pub fn with_animator(mut self, animator: Rc<dyn Animator>) -> Self {
        self.animator = animator;
        self
    }

    pub fn with_options(mut self, options: FormOptions) -> Self {
        self.options = Rc::new(options);
        self
    }

    pub fn lang(&self) -> Option<&str> {
        self.options.lang.as_deref()
    }

    /// Resolve a text in the form's language.
    pub fn render(&self, text: &I18nText, fallback: Option<&str>) -> String {
        render_string(self.translator.as_ref(), text, self.lang(), fallback)
    }

    /// Resolve an error message: its i18n label, defaulting to its message.
    pub fn render_error(&self, error: &ErrorMessage) -> String {
        match &error.i18n_label {
            Some(label) => self.render(
                &I18nText::Label {
                    label: label.clone(),
                    message: None,
                },
                Some(&error.message),
            ),
            None => error.message.clone(),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    pub(crate) fn mark_mounted(&self, mounted: bool) {
        self.mounted.set(mounted);
    }

    /// Tie an animation guard to `index`.
    ///
    /// The mount hook runs when `always` is set or the form is already
    /// mounted; the unmount hook always runs. Nothing happens when
    /// animation is switched off in the options.
    pub fn animate(&self, index: usize, class_prefix: &str, always: bool) {
        if !self.options.animate {
            return;
        }
        AnimationGuard::attach(self.animator.clone(), index, class_prefix, always || self.is_mounted());
    }
}
