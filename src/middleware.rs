pub mod caller;
pub mod i18n;
pub mod query;
pub mod rbac;
