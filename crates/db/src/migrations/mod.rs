//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250101_000001_create_user_table;
mod m20250101_000002_create_violence_category_table;
mod m20250101_000003_create_report_table;
mod m20250101_000004_create_incident_address_table;
mod m20250101_000005_create_report_tracking_table;
mod m20250101_000006_create_perpetrator_table;
mod m20250101_000007_create_victim_table;
mod m20250101_000008_create_appointment_table;
mod m20250101_000009_create_content_table;
mod m20250101_000010_create_event_table;
mod m20250101_000011_create_emergency_contact_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_user_table::Migration),
            Box::new(m20250101_000002_create_violence_category_table::Migration),
            Box::new(m20250101_000003_create_report_table::Migration),
            Box::new(m20250101_000004_create_incident_address_table::Migration),
            Box::new(m20250101_000005_create_report_tracking_table::Migration),
            Box::new(m20250101_000006_create_perpetrator_table::Migration),
            Box::new(m20250101_000007_create_victim_table::Migration),
            Box::new(m20250101_000008_create_appointment_table::Migration),
            Box::new(m20250101_000009_create_content_table::Migration),
            Box::new(m20250101_000010_create_event_table::Migration),
            Box::new(m20250101_000011_create_emergency_contact_table::Migration),
        ]
    }
}
