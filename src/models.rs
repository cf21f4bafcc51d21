pub mod organization;
pub mod rbac;
