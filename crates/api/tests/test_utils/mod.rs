use std::sync::{Arc, Mutex};

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use fake::{Fake, faker::name::en::Name};
use mentorbook_api::{ApiState, app, middleware::auth::ACTOR_HEADER};
use mentorbook_core::{
    models::{availability::AvailabilityWindowRequest, mentor::RegisterMentorRequest},
    service::{MentorshipService, SchedulingSettings},
};
use mentorbook_db::InMemoryStore;
use uuid::Uuid;

/// Sunday 2026-03-01 12:00 UTC. The next day is a Monday.
pub fn now() -> DateTime<Utc> {
    at(1, 12, 0)
}

pub fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, minute, 0).unwrap()
}

pub fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub fn actor_header() -> HeaderName {
    HeaderName::from_static(ACTOR_HEADER)
}

pub fn actor_value(id: Uuid) -> HeaderValue {
    HeaderValue::from_str(&id.to_string()).unwrap()
}

pub struct TestContext {
    pub server: TestServer,
    pub service: MentorshipService,
    pub store: Arc<InMemoryStore>,
    clock: Arc<Mutex<DateTime<Utc>>>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_settings(SchedulingSettings::default())
    }

    pub fn with_settings(settings: SchedulingSettings) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let service = MentorshipService::from_store(store.clone(), settings);
        let clock = Arc::new(Mutex::new(now()));
        let reader = clock.clone();
        let state = ApiState::with_clock(service.clone(), Arc::new(move || *reader.lock().unwrap()));
        let server = TestServer::new(app(state)).unwrap();

        Self {
            server,
            service,
            store,
            clock,
        }
    }

    /// Moves the server's clock; starts at [`now`].
    pub fn set_now(&self, instant: DateTime<Utc>) {
        *self.clock.lock().unwrap() = instant;
    }

    /// Registers a mentor directly through the service, available Monday
    /// 09:00-12:00.
    pub async fn mentor(&self) -> Uuid {
        let mentor_id = Uuid::new_v4();
        let registration = RegisterMentorRequest {
            display_name: Name().fake(),
            specialties: vec!["mathematics".to_string()],
            bio: None,
        };
        self.service.register_mentor(mentor_id, &registration).await.unwrap();
        self.service
            .replace_availability_windows(
                mentor_id,
                mentor_id,
                &[AvailabilityWindowRequest::new(0, hm(9, 0), hm(12, 0))],
            )
            .await
            .unwrap();
        mentor_id
    }
}
