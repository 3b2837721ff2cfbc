//! IR graph nodes.
//!
//! A [`Node`] starts role-less and is fixed as either a statement or an
//! argument by its first `as_stmt`/`as_arg` call. Repeated calls of the
//! matching kind are idempotent accessors; calling the other kind is a
//! contract violation surfaced as [`Error::RoleMismatch`](crate::Error).

use plume_runtime::{Kernel, Operator};

use crate::error::{Result, RoleMismatchSnafu};

/// Statement payload: an operator and the kernels resolved for it.
///
/// `valid_kernels` holds the remaining candidates after selection; the
/// bound kernel (at most one) lives on the operator itself.
#[derive(Debug, Default)]
pub struct Stmt {
    pub op_type: String,
    pub op: Operator,
    pub valid_kernels: Vec<Kernel>,
}

/// Argument payload: a named tensor variable.
///
/// The node stores the variable *name* only; storage belongs to the
/// runtime scope.
#[derive(Debug, Default)]
pub struct Arg {
    pub name: String,
}

#[derive(Debug, Default)]
pub enum NodeKind {
    #[default]
    Unset,
    Stmt(Box<Stmt>),
    Arg(Box<Arg>),
}

impl NodeKind {
    fn name(&self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Stmt(_) => "statement",
            Self::Arg(_) => "argument",
        }
    }
}

/// One vertex of the IR graph.
#[derive(Debug, Default)]
pub struct Node {
    kind: NodeKind,
}

impl Node {
    /// A fresh node with no role fixed yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_arg(name: impl Into<String>) -> Self {
        Self { kind: NodeKind::Arg(Box::new(Arg { name: name.into() })) }
    }

    pub fn new_stmt(op_type: impl Into<String>, valid_kernels: Vec<Kernel>, op: Operator) -> Self {
        Self { kind: NodeKind::Stmt(Box::new(Stmt { op_type: op_type.into(), op, valid_kernels })) }
    }

    pub fn is_role_set(&self) -> bool {
        !matches!(self.kind, NodeKind::Unset)
    }

    pub fn is_stmt(&self) -> bool {
        matches!(self.kind, NodeKind::Stmt(_))
    }

    pub fn is_arg(&self) -> bool {
        matches!(self.kind, NodeKind::Arg(_))
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Fix the role as statement (first call) or access the existing
    /// statement state (subsequent calls).
    pub fn as_stmt(&mut self) -> Result<&mut Stmt> {
        if let NodeKind::Unset = self.kind {
            self.kind = NodeKind::Stmt(Box::default());
        }
        match &mut self.kind {
            NodeKind::Stmt(stmt) => Ok(stmt),
            kind => RoleMismatchSnafu { requested: "statement", actual: kind.name() }.fail(),
        }
    }

    /// `as_stmt` plus payload assignment, mirroring statement construction
    /// during graph building.
    pub fn as_stmt_with(&mut self, op_type: &str, valid_kernels: Vec<Kernel>, op: Operator) -> Result<&mut Stmt> {
        let stmt = self.as_stmt()?;
        stmt.op_type = op_type.to_string();
        stmt.op = op;
        stmt.valid_kernels = valid_kernels;
        Ok(stmt)
    }

    /// Fix the role as argument (first call) or access the existing
    /// argument state (subsequent calls).
    pub fn as_arg(&mut self) -> Result<&mut Arg> {
        if let NodeKind::Unset = self.kind {
            self.kind = NodeKind::Arg(Box::default());
        }
        match &mut self.kind {
            NodeKind::Arg(arg) => Ok(arg),
            kind => RoleMismatchSnafu { requested: "argument", actual: kind.name() }.fail(),
        }
    }

    pub fn as_arg_named(&mut self, name: &str) -> Result<&mut Arg> {
        let arg = self.as_arg()?;
        arg.name = name.to_string();
        Ok(arg)
    }

    /// Read access to the statement payload.
    pub fn stmt(&self) -> Result<&Stmt> {
        match &self.kind {
            NodeKind::Stmt(stmt) => Ok(stmt),
            kind => RoleMismatchSnafu { requested: "statement", actual: kind.name() }.fail(),
        }
    }

    /// Read access to the argument payload.
    pub fn arg(&self) -> Result<&Arg> {
        match &self.kind {
            NodeKind::Arg(arg) => Ok(arg),
            kind => RoleMismatchSnafu { requested: "argument", actual: kind.name() }.fail(),
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            NodeKind::Unset => write!(f, "unset node"),
            NodeKind::Stmt(stmt) => write!(f, "Statement {}", stmt.op_type),
            NodeKind::Arg(arg) => write!(f, "Argument {}", arg.name),
        }
    }
}
