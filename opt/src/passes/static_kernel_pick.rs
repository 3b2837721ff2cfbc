//! Static kernel binding.
//!
//! After rewrite passes settle, every statement gets its kernels resolved
//! against the requested place set: the full viable list lands on the
//! statement, the first produced kernel is bound for execution. Runs once,
//! at the end of the pass pipeline.

use plume_ir::Graph;
use plume_place::Place;
use plume_runtime::error::NoViableKernelSnafu;
use snafu::ResultExt;

use crate::error::{Error, PassFailedSnafu, Result, SelectionSnafu};
use crate::pass::Pass;

pub struct StaticKernelPickPass {
    valid_places: Vec<Place>,
}

impl StaticKernelPickPass {
    pub fn new(valid_places: impl Into<Vec<Place>>) -> Self {
        Self { valid_places: valid_places.into() }
    }
}

impl Pass for StaticKernelPickPass {
    fn name(&self) -> &str {
        "static_kernel_pick"
    }

    fn apply(&self, graph: &mut Graph) -> Result<()> {
        let stmt_ids: Vec<_> = graph.iter().filter(|(_, node)| node.is_stmt()).map(|(id, _)| id).collect();

        for id in stmt_ids {
            let node = graph.node_mut(id).context(PassFailedSnafu { pass: self.name() })?;
            let stmt = node.as_stmt().context(PassFailedSnafu { pass: self.name() })?;

            stmt.op.set_valid_places(self.valid_places.clone());
            let mut kernels = stmt.op.create_kernels(&self.valid_places, None).context(SelectionSnafu)?;
            if kernels.is_empty() {
                let source = NoViableKernelSnafu {
                    op_type: stmt.op_type.clone(),
                    places: self.valid_places.clone(),
                }
                .build();
                return Err(Error::Selection { source });
            }

            stmt.op.bind_kernel(kernels.remove(0));
            stmt.valid_kernels = kernels;
        }
        Ok(())
    }
}
