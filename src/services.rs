pub mod hierarchy_service;
pub use hierarchy_service::HierarchyService;
pub mod navigation_service;
pub mod permission_service;
