//! Pattern template nodes.

use crate::error::{MixedTellerConfigSnafu, Result, TellerAlreadySetSnafu};
use crate::node::Node;

/// Predicate deciding whether an IR node can stand for a pattern node.
///
/// Tellers must be pure over the queried node: candidate sets may be
/// re-evaluated and cached across matcher invocations.
pub type Teller = Box<dyn Fn(&Node) -> bool>;

/// Whether a pattern node stands for a statement or an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Op,
    Var,
}

/// What happens to a matched node when the handler rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatternRole {
    /// Neither retained nor removed; callers mark boundary nodes explicitly.
    #[default]
    Unknown,
    /// Subgraph input, retained across the rewrite.
    Input,
    /// Subgraph output, retained across the rewrite.
    Output,
    /// Slated for removal; must have no edges leaving the match.
    Intermediate,
}

/// One vertex of a pattern template.
///
/// Configured either with a single teller or with a conjunction of
/// assertion tellers; the two modes are mutually exclusive.
pub struct PatternNode {
    identity: String,
    kind: PatternKind,
    role: PatternRole,
    teller: Option<Teller>,
    asserts: Vec<Teller>,
}

impl PatternNode {
    pub(crate) fn new(identity: String, kind: PatternKind) -> Self {
        Self { identity, kind, role: PatternRole::default(), teller: None, asserts: Vec::new() }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    pub fn role(&self) -> PatternRole {
        self.role
    }

    /// Install the single predicate. Rejected when assertions are already
    /// installed or a teller was set before.
    pub fn set_teller(&mut self, teller: impl Fn(&Node) -> bool + 'static) -> Result<&mut Self> {
        snafu::ensure!(self.asserts.is_empty(), MixedTellerConfigSnafu { identity: self.identity.clone() });
        snafu::ensure!(self.teller.is_none(), TellerAlreadySetSnafu { identity: self.identity.clone() });
        self.teller = Some(Box::new(teller));
        Ok(self)
    }

    /// Append one assertion to the conjunction. Rejected when a single
    /// teller is installed.
    pub fn add_assert(&mut self, assert: impl Fn(&Node) -> bool + 'static) -> Result<&mut Self> {
        snafu::ensure!(self.teller.is_none(), MixedTellerConfigSnafu { identity: self.identity.clone() });
        self.asserts.push(Box::new(assert));
        Ok(self)
    }

    /// Mark this node as a retained input of the subgraph.
    pub fn as_input(&mut self) -> &mut Self {
        self.role = PatternRole::Input;
        self
    }

    /// Mark this node as a retained output of the subgraph.
    pub fn as_output(&mut self) -> &mut Self {
        self.role = PatternRole::Output;
        self
    }

    /// Mark this node for removal; all its links must stay inside a match.
    pub fn as_intermediate(&mut self) -> &mut Self {
        self.role = PatternRole::Intermediate;
        self
    }

    pub fn is_input(&self) -> bool {
        self.role == PatternRole::Input
    }

    pub fn is_output(&self) -> bool {
        self.role == PatternRole::Output
    }

    pub fn is_intermediate(&self) -> bool {
        self.role == PatternRole::Intermediate
    }

    /// Whether `node` is a candidate for this pattern node.
    ///
    /// The kind gate comes first; then the single teller, if installed, or
    /// the conjunction of assertions (vacuously true when empty).
    pub fn tell(&self, node: &Node) -> bool {
        let kind_ok = match self.kind {
            PatternKind::Op => node.is_stmt(),
            PatternKind::Var => node.is_arg(),
        };
        if !kind_ok {
            return false;
        }
        if let Some(teller) = &self.teller {
            return teller(node);
        }
        self.asserts.iter().all(|assert| assert(node))
    }
}

// Tellers are opaque closures; Debug shows the structural fields only.
impl std::fmt::Debug for PatternNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternNode")
            .field("identity", &self.identity)
            .field("kind", &self.kind)
            .field("role", &self.role)
            .field("teller", &self.teller.is_some())
            .field("asserts", &self.asserts.len())
            .finish()
    }
}
