use alloc::string::String;

use thiserror::Error;

/// Errors of building or walking a [`BoundFieldTable`](super::BoundFieldTable).
///
/// `Collision` and `Cycle` are raised while building a table, the type
/// cannot be mapped until its declaration changes. The other variants come
/// up while reading or writing values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlattenError {
    #[error("`{type_path}` maps more than one field to member `{name}`, the last one at `{path}`")]
    Collision {
        type_path: &'static str,
        name: String,
        path: String,
    },
    #[error("`{type_path}` flattens into itself at `{path}`")]
    Cycle { type_path: &'static str, path: String },
    #[error("expected a struct, found `{type_path}`")]
    NotAStruct { type_path: &'static str },
    #[error("`{type_path}` has no field at index {index}")]
    MissingField { type_path: &'static str, index: usize },
    #[error("type mismatch: expected `{expected}`, found `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("no default constructor registered for `{type_path}`")]
    NoConstructor { type_path: &'static str },
    #[error("no codec available for `{type_path}`, consider `#[reflect(serde)]`")]
    NoCodec { type_path: &'static str },
}
