//! Pass trait and driver.

use plume_ir::Graph;
use snafu::ResultExt;

use crate::error::{InvalidGraphAfterPassSnafu, Result};

/// One graph-to-graph optimization step.
pub trait Pass {
    fn name(&self) -> &str;
    fn apply(&self, graph: &mut Graph) -> Result<()>;
}

/// Runs passes in sequence, re-validating the graph after each one.
///
/// Acyclicity and argument-name uniqueness are standing invariants the
/// handlers may transiently break; a pass that leaves them broken is a bug
/// surfaced here, not silently carried into the next pass.
#[derive(Default)]
pub struct PassManager {
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, pass: impl Pass + 'static) -> &mut Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    pub fn run(&self, graph: &mut Graph) -> Result<()> {
        for pass in &self.passes {
            let before = graph.len();
            pass.apply(graph)?;
            graph.validate().context(InvalidGraphAfterPassSnafu { pass: pass.name() })?;
            tracing::info!(pass = pass.name(), nodes_before = before, nodes_after = graph.len(), "pass done");
        }
        Ok(())
    }
}
