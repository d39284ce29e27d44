//! v2 resource clients.

pub mod info;
pub mod jobs;
pub mod services;
pub mod shared_domains;

pub use info::{GetInfoResponse, Info};
pub use jobs::{GetJobRequest, Jobs};
pub use services::{
    DeleteServiceOptions, DeleteServiceRequest, GetServiceRequest, ListServicePlansRequest,
    ListServicesRequest, ServiceEntity, ServicePlanEntity, ServicePlanResource, ServiceResource,
    Services,
};
pub use shared_domains::{
    CreateSharedDomainRequest, DeleteSharedDomainRequest, GetSharedDomainRequest,
    ListSharedDomainsRequest, SharedDomainEntity, SharedDomainResource, SharedDomains,
};
