//! JSON Patch (RFC 6902) documents over the point-of-interest update shape.
//!
//! A [`PatchDocument`] is applied to a [`PointUpdateInput`] working copy, never
//! to an entity. Application is all-or-nothing: when any operation fails the
//! working copy is left exactly as it was.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::projection::PointUpdateInput;

/// One operation of a patch document.
///
/// `value` distinguishes an explicit `null` (`Some(Value::Null)`) from an
/// absent member (`None`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub op: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl PatchOperation {
    /// Build a `replace` operation.
    ///
    /// # Examples
    /// ```
    /// use cityinfo::domain::PatchOperation;
    ///
    /// let op = PatchOperation::replace("/name", "Jamtli");
    /// assert_eq!(op.op, "replace");
    /// ```
    pub fn replace(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            op: "replace".to_owned(),
            path: path.into(),
            from: None,
            value: Some(value.into()),
        }
    }

    /// Build a `remove` operation.
    pub fn remove(path: impl Into<String>) -> Self {
        Self {
            op: "remove".to_owned(),
            path: path.into(),
            from: None,
            value: None,
        }
    }
}

/// Ordered list of patch operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(pub Vec<PatchOperation>);

impl PatchDocument {
    /// Wrap a list of operations.
    #[must_use]
    pub fn new(operations: Vec<PatchOperation>) -> Self {
        Self(operations)
    }

    /// Borrow the operations in application order.
    #[must_use]
    pub fn operations(&self) -> &[PatchOperation] {
        &self.0
    }

    /// Apply every operation to `target`.
    ///
    /// # Errors
    /// Returns the first failing operation. `target` is untouched in that case.
    pub fn apply_to(&self, target: &mut PointUpdateInput) -> Result<(), PatchError> {
        let mut working = target.clone();
        for (index, operation) in self.0.iter().enumerate() {
            apply_operation(&mut working, index, operation)?;
        }
        *target = working;
        Ok(())
    }
}

/// Reasons a patch document cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    /// The `op` member names an operation this resource does not support.
    #[error("operation {index}: unsupported operation '{op}'")]
    UnsupportedOperation { index: usize, op: String },
    /// The path does not address a field of the resource.
    #[error("operation {index}: path '{path}' does not exist on the resource")]
    UnknownPath { index: usize, path: String },
    /// `add`, `replace` and `test` need a `value` member.
    #[error("operation {index}: missing 'value'")]
    MissingValue { index: usize },
    /// `copy` and `move` need a `from` member.
    #[error("operation {index}: missing 'from'")]
    MissingFrom { index: usize },
    /// The value is neither a string nor `null`.
    #[error("operation {index}: value for '{path}' must be a string or null")]
    InvalidValue { index: usize, path: String },
    /// A `test` operation did not match the current value.
    #[error("operation {index}: test failed for '{path}'")]
    TestFailed { index: usize, path: String },
}

impl PatchError {
    /// Position of the failing operation within the document.
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::UnsupportedOperation { index, .. }
            | Self::UnknownPath { index, .. }
            | Self::MissingValue { index }
            | Self::MissingFrom { index }
            | Self::InvalidValue { index, .. }
            | Self::TestFailed { index, .. } => *index,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Description,
}

impl Field {
    fn parse(index: usize, path: &str) -> Result<Self, PatchError> {
        let unknown = || PatchError::UnknownPath {
            index,
            path: path.to_owned(),
        };
        let segment = path.strip_prefix('/').ok_or_else(unknown)?;
        if segment.eq_ignore_ascii_case("name") {
            Ok(Self::Name)
        } else if segment.eq_ignore_ascii_case("description") {
            Ok(Self::Description)
        } else {
            Err(unknown())
        }
    }

    fn slot(self, target: &mut PointUpdateInput) -> &mut Option<String> {
        match self {
            Self::Name => &mut target.name,
            Self::Description => &mut target.description,
        }
    }

    fn get(self, target: &PointUpdateInput) -> Option<String> {
        match self {
            Self::Name => target.name.clone(),
            Self::Description => target.description.clone(),
        }
    }
}

fn string_value(
    index: usize,
    path: &str,
    value: Option<&Value>,
) -> Result<Option<String>, PatchError> {
    match value {
        None => Err(PatchError::MissingValue { index }),
        Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(PatchError::InvalidValue {
            index,
            path: path.to_owned(),
        }),
    }
}

fn source_field(index: usize, operation: &PatchOperation) -> Result<Field, PatchError> {
    let from = operation
        .from
        .as_deref()
        .ok_or(PatchError::MissingFrom { index })?;
    Field::parse(index, from)
}

fn apply_operation(
    target: &mut PointUpdateInput,
    index: usize,
    operation: &PatchOperation,
) -> Result<(), PatchError> {
    let path = operation.path.as_str();
    match operation.op.as_str() {
        "add" | "replace" => {
            let field = Field::parse(index, path)?;
            *field.slot(target) = string_value(index, path, operation.value.as_ref())?;
        }
        "remove" => {
            let field = Field::parse(index, path)?;
            *field.slot(target) = None;
        }
        "copy" => {
            let source = source_field(index, operation)?;
            let field = Field::parse(index, path)?;
            *field.slot(target) = source.get(target);
        }
        "move" => {
            let source = source_field(index, operation)?;
            let field = Field::parse(index, path)?;
            if source != field {
                let moved = source.slot(target).take();
                *field.slot(target) = moved;
            }
        }
        "test" => {
            let field = Field::parse(index, path)?;
            let expected = string_value(index, path, operation.value.as_ref())?;
            if field.get(target) != expected {
                return Err(PatchError::TestFailed {
                    index,
                    path: path.to_owned(),
                });
            }
        }
        other => {
            return Err(PatchError::UnsupportedOperation {
                index,
                op: other.to_owned(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
