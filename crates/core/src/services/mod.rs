//! Business logic services.

#![allow(missing_docs)]

pub mod allocator;
pub mod appointment;
pub mod category;
pub mod content;
pub mod emergency_contact;
pub mod event;
pub mod report;
pub mod user;

pub use allocator::{RegistrationAllocator, RegistrationStore};
pub use appointment::{
    AppointmentService, CreateAppointmentInput, RejectAppointmentInput, UpdateAppointmentInput,
};
pub use category::{CategoryService, CreateCategoryInput, UpdateCategoryInput};
pub use content::{ContentService, CreateContentInput, UpdateContentInput};
pub use emergency_contact::EmergencyContactService;
pub use event::{CreateEventInput, EventService, UpdateEventInput};
pub use report::{
    CreateReportInput, CreateTrackingInput, IncidentAddressInput, PerpetratorInput, ReportDetail,
    ReportService, UpdateReportInput, VictimInput,
};
pub use user::{
    ChangePasswordInput, LoginInput, RegisterInput, TokenResponse, UpdateProfileInput, UserService,
};
