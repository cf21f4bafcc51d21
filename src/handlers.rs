pub mod navigation;
pub mod organizations;
pub mod rbac;
