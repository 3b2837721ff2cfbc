//! Teller constructors for common pattern constraints.
//!
//! Each function returns a boxed predicate ready for
//! [`PatternNode::add_assert`](super::PatternNode::add_assert) or
//! [`PatternNode::set_teller`](super::PatternNode::set_teller).

use super::Teller;

/// The node is a statement.
pub fn is_stmt() -> Teller {
    Box::new(|node| node.is_stmt())
}

/// The node is an argument.
pub fn is_arg() -> Teller {
    Box::new(|node| node.is_arg())
}

/// The node is a statement of exactly this operator type.
pub fn stmt_op_type(op_type: impl Into<String>) -> Teller {
    let op_type = op_type.into();
    Box::new(move |node| node.stmt().map(|stmt| stmt.op_type == op_type).unwrap_or(false))
}

/// The node is a statement whose operator type is in the set.
pub fn stmt_op_type_in(op_types: impl IntoIterator<Item = impl Into<String>>) -> Teller {
    let op_types: Vec<String> = op_types.into_iter().map(Into::into).collect();
    Box::new(move |node| {
        node.stmt()
            .map(|stmt| op_types.iter().any(|op| *op == stmt.op_type))
            .unwrap_or(false)
    })
}

/// The node is the argument carrying exactly this variable name.
pub fn arg_named(name: impl Into<String>) -> Teller {
    let name = name.into();
    Box::new(move |node| node.arg().map(|arg| arg.name == name).unwrap_or(false))
}

/// The node is a statement carrying the named attribute.
pub fn stmt_with_attr(name: impl Into<String>) -> Teller {
    let name = name.into();
    Box::new(move |node| {
        node.stmt()
            .map(|stmt| stmt.op.op_info().has_attr(&name))
            .unwrap_or(false)
    })
}
