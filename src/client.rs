pub mod organization_client;
pub use organization_client::{HttpOrganizationClient, OrganizationSource, StaticOrganizationSource};
