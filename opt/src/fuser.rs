//! Base for pattern-driven rewrite passes.

use plume_ir::error::PatternNodeNotFoundSnafu;
use plume_ir::{Graph, Match, Pattern, PatternMatcher, PatternNodeId};
use snafu::ResultExt;

use crate::error::{PassFailedSnafu, Result};

/// Retrieve a pattern node built by `build_pattern`, by identity.
pub fn required_node(pattern: &Pattern, identity: &str) -> plume_ir::Result<PatternNodeId> {
    pattern.retrieve(identity).ok_or_else(|| PatternNodeNotFoundSnafu { identity }.build())
}

/// A rewrite pass expressed as a pattern plus a per-match handler.
///
/// `apply` builds the pattern, runs the matcher, and calls `rewrite` for
/// every surviving match in discovery order. Matches whose nodes were
/// removed by an earlier rewrite in the same run are skipped; a later pass
/// iteration picks the survivors up again.
pub trait Fuser {
    fn name(&self) -> &str;

    /// Populate the pattern this fuser searches for.
    fn build_pattern(&self, pattern: &mut Pattern) -> plume_ir::Result<()>;

    /// Rewrite the graph at one match. Pattern nodes are retrieved from
    /// `pattern` by identity.
    fn rewrite(&self, subgraph: &Match, pattern: &Pattern, graph: &mut Graph) -> plume_ir::Result<()>;

    /// Run the matcher and rewrite every match. Returns the number of live
    /// matches handed to `rewrite`.
    fn apply(&self, graph: &mut Graph) -> Result<usize> {
        let run = || -> plume_ir::Result<usize> {
            let mut pattern = Pattern::new();
            self.build_pattern(&mut pattern)?;
            let matcher = PatternMatcher::new(pattern);
            let mut rewritten = 0usize;
            matcher.run(graph, |subgraph, graph| {
                if !subgraph.is_live(graph) {
                    tracing::debug!(fuser = self.name(), "skipping stale match");
                    return Ok(());
                }
                self.rewrite(subgraph, matcher.pattern(), graph)?;
                rewritten += 1;
                Ok(())
            })?;
            Ok(rewritten)
        };
        run().context(PassFailedSnafu { pass: self.name() })
    }
}
