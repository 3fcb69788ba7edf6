//! Graph construction.
//!
//! [`GraphFactory`] walks a component hierarchy depth-first and produces a
//! [`ConnectivityGraph`](crate::graph::ConnectivityGraph):
//!
//! ```text
//! create_connectivity_graph(top, view)
//!   └── instance (top, then every design instance in declaration order)
//!         ├── memory forest      (memory.rs)
//!         ├── interfaces         (interfaces.rs)
//!         ├── internal routing   (routing.rs)
//!         └── hierarchical view  (design.rs)
//!               ├── instances ...        recurse
//!               └── interconnections     once all instances exist
//! ```
//!
//! Every numeric attribute is resolved through the caller's
//! [`ExpressionEvaluator`] against a [`ParameterScope`] that gains a frame on
//! each descent and loses it on return.

mod design;
mod diagnostics;
mod interfaces;
mod memory;
mod options;
mod routing;

pub use diagnostics::{BuildError, BuildOutput, BuildWarning};
pub use options::BuildOptions;

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tracing::debug;

use crate::base::{Vlnv, parse_u64};
use crate::expr::{ExpressionEvaluator, ParameterScope};
use crate::graph::ConnectivityGraph;
use crate::library::DocumentLibrary;
use crate::model::{Component, Presence};

/// Builds connectivity graphs from library documents.
pub struct GraphFactory<'a> {
    library: &'a dyn DocumentLibrary,
    evaluator: &'a dyn ExpressionEvaluator,
    options: BuildOptions,
}

impl<'a> GraphFactory<'a> {
    pub fn new(library: &'a dyn DocumentLibrary, evaluator: &'a dyn ExpressionEvaluator) -> Self {
        Self {
            library,
            evaluator,
            options: BuildOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build the graph of `top` as seen through its view `active_view`.
    ///
    /// An empty view name selects the component's only view, if it has
    /// exactly one.
    pub fn create_connectivity_graph(
        &self,
        top: &Component,
        active_view: &str,
    ) -> Result<BuildOutput, BuildError> {
        debug!("[BUILD] connectivity graph for {} (view '{}')", top.vlnv, active_view);
        let mut builder = Builder::new(self);
        builder.build_root(top, active_view)?;
        debug!(
            "[BUILD] done: {} components, {} interfaces, {} connections, {} warnings",
            builder.graph.component_count(),
            builder.graph.interface_count(),
            builder.graph.connection_count(),
            builder.warnings.len()
        );
        Ok(BuildOutput {
            graph: builder.graph,
            warnings: builder.warnings,
        })
    }

    /// Fetch the top component from the library, then build its graph.
    pub fn create_connectivity_graph_for(
        &self,
        top: &Vlnv,
        active_view: &str,
    ) -> Result<BuildOutput, BuildError> {
        let component = self
            .library
            .component(top)
            .ok_or_else(|| BuildError::MissingTopComponent(top.clone()))?;
        self.create_connectivity_graph(&component, active_view)
    }
}

// ============================================================================
// BUILDER STATE
// ============================================================================

/// Mutable state of one construction run.
struct Builder<'f> {
    library: &'f dyn DocumentLibrary,
    evaluator: &'f dyn ExpressionEvaluator,
    options: &'f BuildOptions,
    graph: ConnectivityGraph,
    warnings: Vec<BuildWarning>,
    scope: ParameterScope,
    identifiers: FxHashSet<SmolStr>,
    /// Components currently under descent, outermost first.
    chain: Vec<Vlnv>,
}

impl<'f> Builder<'f> {
    fn new(factory: &'f GraphFactory<'_>) -> Self {
        Self {
            library: factory.library,
            evaluator: factory.evaluator,
            options: &factory.options,
            graph: ConnectivityGraph::new(),
            warnings: Vec::new(),
            scope: ParameterScope::new(),
            identifiers: FxHashSet::default(),
            chain: Vec::new(),
        }
    }

    fn eval(&self, expression: &str) -> SmolStr {
        SmolStr::new(self.evaluator.evaluate(expression, &self.scope))
    }

    /// Evaluate an optional expression. Missing and blank text stay `None`.
    fn eval_opt(&self, expression: Option<&str>) -> Option<SmolStr> {
        expression
            .filter(|expression| !expression.trim().is_empty())
            .map(|expression| self.eval(expression))
    }

    fn eval_u64(&self, expression: &str) -> Option<u64> {
        if expression.trim().is_empty() {
            return None;
        }
        parse_u64(&self.eval(expression))
    }

    /// An element is present when it has no presence expression or the
    /// expression evaluates to exactly 1.
    fn is_present(&self, element: &impl Presence) -> bool {
        match element.presence() {
            None => true,
            Some(expression) if expression.trim().is_empty() => true,
            Some(expression) => self.eval_u64(expression) == Some(1),
        }
    }

    fn warn(&mut self, warning: BuildWarning) {
        debug!("[BUILD] warning: {}", warning);
        self.warnings.push(warning);
    }

    /// Reserve a memory identifier, suffixing `~N` when it is already taken.
    fn allocate_identifier(&mut self, candidate: String) -> SmolStr {
        let candidate = SmolStr::new(candidate);
        if self.identifiers.insert(candidate.clone()) {
            return candidate;
        }
        let renamed = (1..)
            .map(|n| SmolStr::new(format!("{candidate}~{n}")))
            .find(|renamed| !self.identifiers.contains(renamed))
            .unwrap_or_else(|| candidate.clone());
        self.identifiers.insert(renamed.clone());
        self.warn(BuildWarning::DuplicateMemoryIdentifier {
            identifier: candidate,
            renamed: renamed.clone(),
        });
        renamed
    }
}
