//! Database entities.

#![allow(missing_docs)]

pub mod appointment;
pub mod content;
pub mod emergency_contact;
pub mod event;
pub mod incident_address;
pub mod perpetrator;
pub mod report;
pub mod report_tracking;
pub mod user;
pub mod victim;
pub mod violence_category;

pub use appointment::Entity as Appointment;
pub use content::Entity as Content;
pub use emergency_contact::Entity as EmergencyContact;
pub use event::Entity as Event;
pub use incident_address::Entity as IncidentAddress;
pub use perpetrator::Entity as Perpetrator;
pub use report::Entity as Report;
pub use report_tracking::Entity as ReportTracking;
pub use user::Entity as User;
pub use victim::Entity as Victim;
pub use violence_category::Entity as ViolenceCategory;
