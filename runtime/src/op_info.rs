//! Operator descriptor.
//!
//! [`OpInfo`] is the loader-facing description of one operator instance:
//! ordered, named input/output argument groups (each group holding the names
//! of the tensor variables wired into it) plus a generic attribute map.
//! Rewrite handlers re-alias variables through [`OpInfo::update_all_inputs`]
//! and [`OpInfo::update_all_outputs`] when they splice nodes out of the
//! graph.

use std::collections::BTreeMap;

/// A generic operator attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Int(i64),
    Float(f32),
    Bool(bool),
    String(String),
    Ints(Vec<i64>),
    Floats(Vec<f32>),
    Strings(Vec<String>),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

/// Description of a single operator: type name, argument groups, attributes.
///
/// Argument groups keep their declaration order; variable names keep their
/// order within each group. Group names are unique per direction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpInfo {
    op_type: String,
    inputs: Vec<(String, Vec<String>)>,
    outputs: Vec<(String, Vec<String>)>,
    attrs: BTreeMap<String, AttrValue>,
}

impl OpInfo {
    pub fn new(op_type: impl Into<String>) -> Self {
        Self { op_type: op_type.into(), ..Default::default() }
    }

    pub fn op_type(&self) -> &str {
        &self.op_type
    }

    /// Add variables to the named input argument group, creating it on first
    /// use and keeping declaration order.
    pub fn add_input(&mut self, argname: impl Into<String>, vars: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        Self::add_group(&mut self.inputs, argname.into(), vars);
        self
    }

    pub fn add_output(&mut self, argname: impl Into<String>, vars: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        Self::add_group(&mut self.outputs, argname.into(), vars);
        self
    }

    fn add_group(groups: &mut Vec<(String, Vec<String>)>, argname: String, vars: impl IntoIterator<Item = impl Into<String>>) {
        let vars = vars.into_iter().map(Into::into);
        match groups.iter_mut().find(|(name, _)| *name == argname) {
            Some((_, existing)) => existing.extend(vars),
            None => groups.push((argname, vars.collect())),
        }
    }

    /// Variable names in the named input group.
    pub fn input(&self, argname: &str) -> Option<&[String]> {
        self.inputs.iter().find(|(name, _)| name == argname).map(|(_, vars)| vars.as_slice())
    }

    pub fn output(&self, argname: &str) -> Option<&[String]> {
        self.outputs.iter().find(|(name, _)| name == argname).map(|(_, vars)| vars.as_slice())
    }

    /// All input variable names, flattened in declaration order.
    pub fn input_names(&self) -> Vec<String> {
        self.inputs.iter().flat_map(|(_, vars)| vars.iter().cloned()).collect()
    }

    pub fn output_names(&self) -> Vec<String> {
        self.outputs.iter().flat_map(|(_, vars)| vars.iter().cloned()).collect()
    }

    pub fn input_argnames(&self) -> Vec<&str> {
        self.inputs.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn output_argnames(&self) -> Vec<&str> {
        self.outputs.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Which input group a variable is wired into, if any.
    pub fn find_input_argname(&self, var: &str) -> Option<&str> {
        self.inputs
            .iter()
            .find(|(_, vars)| vars.iter().any(|v| v == var))
            .map(|(name, _)| name.as_str())
    }

    pub fn find_output_argname(&self, var: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|(_, vars)| vars.iter().any(|v| v == var))
            .map(|(name, _)| name.as_str())
    }

    /// Rename every occurrence of `from` across all input groups.
    pub fn update_all_inputs(&mut self, from: &str, to: &str) {
        for (_, vars) in &mut self.inputs {
            for var in vars.iter_mut() {
                if var == from {
                    *var = to.to_string();
                }
            }
        }
    }

    pub fn update_all_outputs(&mut self, from: &str, to: &str) {
        for (_, vars) in &mut self.outputs {
            for var in vars.iter_mut() {
                if var == from {
                    *var = to.to_string();
                }
            }
        }
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: AttrValue) -> &mut Self {
        self.attrs.insert(name.into(), value);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn attrs(&self) -> &BTreeMap<String, AttrValue> {
        &self.attrs
    }
}
