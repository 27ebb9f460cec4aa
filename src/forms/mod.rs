//! Form schema generation and schema-driven validation.
//!
//! Both halves are stateless transformers over JSON-Schema-like values:
//! [`generate_form_schema`] prepares a component config schema for
//! rendering, [`validate_form_data`] checks user-entered data against one.

pub mod schema;
pub mod validation;

pub use schema::{generate_form_schema, normalize_schema, GeneratedForm};
pub use validation::{
    validate_form_data, FieldViolation, FormValidation, ValidationOptions, ViolationKind,
};
