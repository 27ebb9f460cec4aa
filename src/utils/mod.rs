//! Small shared helpers.

pub mod json_path;
