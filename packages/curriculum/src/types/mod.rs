//! Academic records passed in by callers and returned with generated fields.
//!
//! Identity (`id`) is assigned by the persistence layer; this crate only
//! carries it through.

pub mod course;
pub mod department;
pub mod lecture;
pub mod professor;
pub mod topic;

pub use course::Course;
pub use department::Department;
pub use lecture::Lecture;
pub use professor::Professor;
pub use topic::Topic;

/// Keep `generated` when present, otherwise `current`.
pub(crate) fn merge_text(current: &Option<String>, generated: Option<String>) -> Option<String> {
    generated
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .or_else(|| current.clone())
}
