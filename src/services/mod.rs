pub mod bootstrap;
pub mod policy;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService};
pub use auth_service_impl::DeskAuthService;

pub mod collaborator_service;
pub mod collaborator_service_impl;
pub use collaborator_service::{
    CollaboratorError, CollaboratorService, NewCollaborator, ProfileUpdate, TempPassword,
    ValidationError,
};
pub use collaborator_service_impl::DeskCollaboratorService;

pub mod interaction_service;
pub mod interaction_service_impl;
pub use interaction_service::{
    InteractionError, InteractionService, InteractionUpdate, NewInteraction,
};
pub use interaction_service_impl::DeskInteractionService;

pub mod report_service;
pub mod report_service_impl;
pub use report_service::{ExportFormat, ReportError, ReportService};
pub use report_service_impl::DeskReportService;

pub use policy::PolicyError;
