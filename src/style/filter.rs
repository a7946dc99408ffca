//! Filter expressions in their legacy array form.

use crate::value::Value;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// FilterExpression is a boolean expression over feature properties.
///
/// The wire form is the legacy array syntax `[operator, ...operands]`.
/// Diffing compares filters wholesale, so the tree exists for typed
/// construction and faithful round-tripping, not for evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpression {
    /// `[==|!=|>|>=|<|<=, key, value]`
    Comparison {
        op: ComparisonOp,
        key: String,
        value: Value,
    },
    /// `[in|!in, key, ...values]`
    Membership {
        negated: bool,
        key: String,
        values: Vec<Value>,
    },
    /// `[has|!has, key]`
    Existence { negated: bool, key: String },
    /// `[all|any|none, ...filters]`
    Combinator {
        op: CombinatorOp,
        filters: Vec<FilterExpression>,
    },
    /// Anything that is not the legacy array form, kept verbatim.
    Other(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl ComparisonOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "==",
            ComparisonOp::Ne => "!=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Ge => ">=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Le => "<=",
        }
    }

    pub fn from_str(s: &str) -> Option<ComparisonOp> {
        match s {
            "==" => Some(ComparisonOp::Eq),
            "!=" => Some(ComparisonOp::Ne),
            ">" => Some(ComparisonOp::Gt),
            ">=" => Some(ComparisonOp::Ge),
            "<" => Some(ComparisonOp::Lt),
            "<=" => Some(ComparisonOp::Le),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinatorOp {
    All,
    Any,
    None,
}

impl CombinatorOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            CombinatorOp::All => "all",
            CombinatorOp::Any => "any",
            CombinatorOp::None => "none",
        }
    }

    pub fn from_str(s: &str) -> Option<CombinatorOp> {
        match s {
            "all" => Some(CombinatorOp::All),
            "any" => Some(CombinatorOp::Any),
            "none" => Some(CombinatorOp::None),
            _ => None,
        }
    }
}

impl FilterExpression {
    /// Interprets a JSON value as a filter expression.
    ///
    /// Arrays in the legacy `[operator, ...operands]` form become typed
    /// variants; everything else (including the newer expression syntax)
    /// is kept opaque as [`FilterExpression::Other`].
    pub fn from_value(value: &Value) -> FilterExpression {
        let items = match value.as_list() {
            Some(items) if !items.is_empty() => items,
            _ => return FilterExpression::Other(value.clone()),
        };
        let op = match items[0].as_str() {
            Some(op) => op,
            None => return FilterExpression::Other(value.clone()),
        };

        if let Some(op) = ComparisonOp::from_str(op) {
            if items.len() == 3 {
                if let Some(key) = items[1].as_str() {
                    return FilterExpression::Comparison {
                        op,
                        key: key.to_string(),
                        value: items[2].clone(),
                    };
                }
            }
        } else if op == "in" || op == "!in" {
            if items.len() >= 2 {
                if let Some(key) = items[1].as_str() {
                    return FilterExpression::Membership {
                        negated: op == "!in",
                        key: key.to_string(),
                        values: items[2..].to_vec(),
                    };
                }
            }
        } else if op == "has" || op == "!has" {
            if items.len() == 2 {
                if let Some(key) = items[1].as_str() {
                    return FilterExpression::Existence {
                        negated: op == "!has",
                        key: key.to_string(),
                    };
                }
            }
        } else if let Some(op) = CombinatorOp::from_str(op) {
            return FilterExpression::Combinator {
                op,
                filters: items[1..].iter().map(FilterExpression::from_value).collect(),
            };
        }

        FilterExpression::Other(value.clone())
    }

    /// Renders the filter back to its legacy array form.
    pub fn to_value(&self) -> Value {
        match self {
            FilterExpression::Comparison { op, key, value } => Value::List(vec![
                Value::String(op.as_str().into()),
                Value::String(key.clone()),
                value.clone(),
            ]),
            FilterExpression::Membership {
                negated,
                key,
                values,
            } => {
                let mut items = Vec::with_capacity(values.len() + 2);
                items.push(Value::String(if *negated { "!in" } else { "in" }.into()));
                items.push(Value::String(key.clone()));
                items.extend(values.iter().cloned());
                Value::List(items)
            }
            FilterExpression::Existence { negated, key } => Value::List(vec![
                Value::String(if *negated { "!has" } else { "has" }.into()),
                Value::String(key.clone()),
            ]),
            FilterExpression::Combinator { op, filters } => {
                let mut items = Vec::with_capacity(filters.len() + 1);
                items.push(Value::String(op.as_str().into()));
                items.extend(filters.iter().map(FilterExpression::to_value));
                Value::List(items)
            }
            FilterExpression::Other(v) => v.clone(),
        }
    }
}

impl Serialize for FilterExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FilterExpression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(FilterExpression::from_value(&value))
    }
}
