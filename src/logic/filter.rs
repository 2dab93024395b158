use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Filter expression over a row's JSON form, deserializable from list-page query state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterExpr {
    /// Logical AND - all conditions must be true
    All { all: Vec<FilterExpr> },
    /// Logical OR - any condition must be true
    Any { any: Vec<FilterExpr> },
    Not { not: Box<FilterExpr> },
    Eq { eq: (JsonPath, Value) },
    Ne { ne: (JsonPath, Value) },
    Gt { gt: (JsonPath, Value) },
    Gte { gte: (JsonPath, Value) },
    Lt { lt: (JsonPath, Value) },
    Lte { lte: (JsonPath, Value) },
    In { r#in: (JsonPath, Vec<Value>) },
    /// Case-sensitive substring match
    Contains { contains: (JsonPath, String) },
    /// Case-insensitive substring match against any of several fields (the search box)
    Search { search: (Vec<JsonPath>, String) },
    Exists { exists: JsonPath },
}

impl FilterExpr {
    /// Search-box filter over the given fields
    pub fn search(fields: &[&str], needle: impl Into<String>) -> Self {
        FilterExpr::Search {
            search: (
                fields.iter().map(|f| JsonPath(format!("$.{}", f))).collect(),
                needle.into(),
            ),
        }
    }

    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        FilterExpr::Eq {
            eq: (JsonPath(format!("$.{}", field)), value.into()),
        }
    }
}

/// `$.field` path into a serialized row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonPath(pub String);

impl JsonPath {
    /// Extract the field from a row; missing and null fields are `None`
    pub fn extract<'v>(&self, row: &'v Value) -> Result<Option<&'v Value>> {
        let field = self
            .0
            .strip_prefix("$.")
            .ok_or_else(|| anyhow!("Invalid JSON path: {}", self.0))?;
        Ok(row.get(field).filter(|value| !value.is_null()))
    }
}

pub struct RowFilter;

impl RowFilter {
    /// Evaluate a filter expression against one serialized row
    pub fn evaluate(row: &Value, filter: &FilterExpr) -> Result<bool> {
        match filter {
            FilterExpr::All { all } => {
                for expr in all {
                    if !Self::evaluate(row, expr)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }

            FilterExpr::Any { any } => {
                for expr in any {
                    if Self::evaluate(row, expr)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }

            FilterExpr::Not { not } => Ok(!Self::evaluate(row, not)?),

            FilterExpr::Eq { eq: (path, value) } => Ok(path.extract(row)? == Some(value)),

            FilterExpr::Ne { ne: (path, value) } => Ok(path.extract(row)? != Some(value)),

            FilterExpr::Gt { gt: (path, value) } => {
                Ok(Self::compare(path.extract(row)?, value, |a, b| a > b))
            }

            FilterExpr::Gte { gte: (path, value) } => {
                Ok(Self::compare(path.extract(row)?, value, |a, b| a >= b))
            }

            FilterExpr::Lt { lt: (path, value) } => {
                Ok(Self::compare(path.extract(row)?, value, |a, b| a < b))
            }

            FilterExpr::Lte { lte: (path, value) } => {
                Ok(Self::compare(path.extract(row)?, value, |a, b| a <= b))
            }

            FilterExpr::In { r#in: (path, values) } => match path.extract(row)? {
                Some(value) => Ok(values.contains(value)),
                None => Ok(false),
            },

            FilterExpr::Contains {
                contains: (path, substring),
            } => match path.extract(row)? {
                Some(Value::String(s)) => Ok(s.contains(substring.as_str())),
                _ => Ok(false),
            },

            FilterExpr::Search {
                search: (paths, needle),
            } => {
                let needle = needle.trim().to_lowercase();
                if needle.is_empty() {
                    return Ok(true);
                }
                for path in paths {
                    if let Some(Value::String(s)) = path.extract(row)? {
                        if s.to_lowercase().contains(&needle) {
                            return Ok(true);
                        }
                    }
                }
                Ok(false)
            }

            FilterExpr::Exists { exists: path } => Ok(path.extract(row)?.is_some()),
        }
    }

    /// Numbers compare numerically; strings compare numerically when both
    /// parse, otherwise lexically (ISO dates order correctly this way)
    fn compare<F>(left: Option<&Value>, right: &Value, cmp: F) -> bool
    where
        F: Fn(std::cmp::Ordering, std::cmp::Ordering) -> bool,
    {
        use std::cmp::Ordering;

        let ordering = match (left, right) {
            (Some(Value::Number(l)), Value::Number(r)) => match (l.as_f64(), r.as_f64()) {
                (Some(l), Some(r)) => l.partial_cmp(&r),
                _ => None,
            },
            (Some(Value::String(l)), Value::String(r)) => {
                match (l.parse::<f64>(), r.parse::<f64>()) {
                    (Ok(l), Ok(r)) => l.partial_cmp(&r),
                    _ => Some(l.as_str().cmp(r.as_str())),
                }
            }
            _ => None,
        };
        ordering.map_or(false, |ordering| cmp(ordering, Ordering::Equal))
    }
}

/// Keep the rows matching `filter`, in their original order.
///
/// Rows that fail to serialize or hit a bad path simply do not match.
pub fn filter_rows<'a, T>(rows: &'a [T], filter: &FilterExpr) -> Vec<&'a T>
where
    T: Serialize,
{
    rows.iter()
        .filter(|row| {
            serde_json::to_value(row)
                .map_err(anyhow::Error::from)
                .and_then(|value| RowFilter::evaluate(&value, filter))
                .unwrap_or(false)
        })
        .collect()
}

/// Convert from generic JSON value to typed FilterExpr
pub fn parse_filter_expr(value: Value) -> Result<FilterExpr> {
    serde_json::from_value(value).map_err(|e| anyhow!("Failed to parse filter expression: {}", e))
}
