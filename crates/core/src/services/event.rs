//! Event service.
//!
//! Outreach sessions and counseling schedules published by the agency.

use chrono::{DateTime, Utc};
use pedika_common::{AppError, AppResult};
use pedika_db::{entities::event, repositories::EventRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for publishing an event.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[validate(length(min = 1, max = 10_000))]
    pub description: String,

    pub start_time: DateTime<Utc>,

    pub end_time: DateTime<Utc>,

    #[validate(length(min = 1, max = 256))]
    pub location: String,

    /// Poster image URL (set by API layer after upload).
    pub image_url: Option<String>,
}

/// Input for editing an event.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateEventInput {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 10_000))]
    pub description: Option<String>,

    pub start_time: Option<DateTime<Utc>>,

    pub end_time: Option<DateTime<Utc>>,

    #[validate(length(min = 1, max = 256))]
    pub location: Option<String>,

    pub image_url: Option<String>,
}

/// Event service for business logic.
#[derive(Clone)]
pub struct EventService {
    event_repo: EventRepository,
}

impl EventService {
    /// Create a new event service.
    #[must_use]
    pub const fn new(event_repo: EventRepository) -> Self {
        Self { event_repo }
    }

    /// All events, earliest first.
    pub async fn list(&self) -> AppResult<Vec<event::Model>> {
        self.event_repo.find_all().await
    }

    /// A single event.
    pub async fn get(&self, id: i32) -> AppResult<event::Model> {
        self.event_repo.get_by_id(id).await
    }

    /// Publish an event.
    pub async fn create(&self, input: CreateEventInput) -> AppResult<event::Model> {
        input.validate()?;
        validate_window(&input.start_time, &input.end_time)?;

        let model = event::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            start_time: Set(input.start_time.into()),
            end_time: Set(input.end_time.into()),
            location: Set(input.location),
            image_url: Set(input.image_url),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        self.event_repo.create(model).await
    }

    /// Edit an event.
    pub async fn update(&self, id: i32, input: UpdateEventInput) -> AppResult<event::Model> {
        input.validate()?;

        let event = self.event_repo.get_by_id(id).await?;

        let start = input.start_time.unwrap_or_else(|| event.start_time.into());
        let end = input.end_time.unwrap_or_else(|| event.end_time.into());
        validate_window(&start, &end)?;

        let mut model: event::ActiveModel = event.into();
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(description) = input.description {
            model.description = Set(description);
        }
        model.start_time = Set(start.into());
        model.end_time = Set(end.into());
        if let Some(location) = input.location {
            model.location = Set(location);
        }
        if let Some(image_url) = input.image_url {
            model.image_url = Set(Some(image_url));
        }
        model.updated_at = Set(Some(Utc::now().into()));

        self.event_repo.update(model).await
    }

    /// Delete an event.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.event_repo.get_by_id(id).await?;
        self.event_repo.delete(id).await
    }
}

fn validate_window(start: &DateTime<Utc>, end: &DateTime<Utc>) -> AppResult<()> {
    if end <= start {
        return Err(AppError::Validation(
            "Event must end after it starts".to_string(),
        ));
    }
    Ok(())
}
