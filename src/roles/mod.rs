//! Role assignment for a new round.

pub mod assigner;

pub use assigner::{assign_roles, impostor_count, RoleAssignment};
