pub mod aggregate;
pub mod hierarchy;

pub use aggregate::{
    Department, DepartmentForm, DepartmentLeader, DepartmentListResponse, DepartmentQuery,
    DepartmentStats, DepartmentType,
};
pub use hierarchy::{build_hierarchy, parent_candidates};
