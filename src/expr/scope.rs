//! Layered parameter scopes.
//!
//! Each hierarchy level pushes a frame on descent and pops it on return, so
//! a design's parameters are visible while its instances are resolved and
//! disappear once the walker leaves that level.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::trace;

use crate::model::{ConfigurableElementValue, Parameter};

/// Parameter values visible at one hierarchy level.
///
/// Values are stored as unevaluated expressions, keyed by parameter id.
/// Parameter names resolve through an alias table.
#[derive(Clone, Debug, Default)]
pub struct ScopeFrame {
    label: SmolStr,
    values: FxHashMap<SmolStr, SmolStr>,
    aliases: FxHashMap<SmolStr, SmolStr>,
}

impl ScopeFrame {
    pub fn new(label: impl Into<SmolStr>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// A frame holding the given parameters' own values.
    pub fn from_parameters(label: impl Into<SmolStr>, parameters: &[Parameter]) -> Self {
        let mut frame = Self::new(label);
        for parameter in parameters {
            frame.insert(parameter.id.as_str(), parameter.value.as_str());
            if parameter.name != parameter.id {
                frame
                    .aliases
                    .entry(SmolStr::new(&parameter.name))
                    .or_insert_with(|| SmolStr::new(&parameter.id));
            }
        }
        frame
    }

    /// Replace the values of known parameters with configured overrides.
    ///
    /// Overrides naming a parameter this frame does not hold are ignored.
    pub fn with_overrides(mut self, overrides: &[ConfigurableElementValue]) -> Self {
        for element in overrides {
            match self.values.get_mut(element.reference_id.as_str()) {
                Some(value) => *value = SmolStr::new(&element.value),
                None => trace!(
                    "[SCOPE] '{}': ignoring override of unknown parameter '{}'",
                    self.label,
                    element.reference_id
                ),
            }
        }
        self
    }

    pub fn insert(&mut self, id: impl Into<SmolStr>, value: impl Into<SmolStr>) {
        self.values.insert(id.into(), value.into());
    }

    /// Look up a value by parameter id, then by parameter name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .or_else(|| {
                self.aliases
                    .get(key)
                    .and_then(|id| self.values.get(id.as_str()))
            })
            .map(SmolStr::as_str)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A stack of [`ScopeFrame`]s. Lookups search the innermost frame first.
#[derive(Clone, Debug, Default)]
pub struct ParameterScope {
    frames: Vec<ScopeFrame>,
}

impl ParameterScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: ScopeFrame) {
        trace!("[SCOPE] push '{}' ({} values)", frame.label, frame.len());
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<ScopeFrame> {
        let frame = self.frames.pop();
        if let Some(frame) = &frame {
            trace!("[SCOPE] pop '{}'", frame.label);
        }
        frame
    }

    /// Run `f` with `frame` pushed, popping it again afterwards.
    pub fn with_frame<R>(&mut self, frame: ScopeFrame, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push(frame);
        let result = f(self);
        self.pop();
        result
    }

    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.frames.iter().rev().find_map(|frame| frame.get(key))
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Frame labels from outermost to innermost.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().map(ScopeFrame::label)
    }
}
