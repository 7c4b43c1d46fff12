//! Router wiring for handler tests: in-memory store, UTC site clock and a
//! fast-polling feed session.

use std::sync::Arc;
use std::time::Duration;

use salvo::Service;
use serde_json::{Value, json};

use super::API_ROUTE_PREFIX;
use crate::app::{AppContext, router};
use crate::config::{
    AuthConfig, AuthMethod, DashboardConfig, DatabaseConfig, FeedConfig, LoggingConfig,
    ServerConfig, Settings, SingleUserAuthConfig, SiteConfig, StoreBackend,
};
use tidings_core::feed::WrapMode;
use tidings_core::schedule::SiteClock;
use tidings_db::store::Store;
use tidings_service::feed::{FeedSession, StoreFeedSource};

pub struct TestApp {
    pub service: Service,
    pub store: Store,
    pub session: FeedSession,
}

pub fn single_user() -> AuthConfig {
    AuthConfig {
        method: AuthMethod::SingleUser,
        proxy: None,
        single_user: Some(SingleUserAuthConfig {
            name: "Editor".to_string(),
            email: "editor@example.org".to_string(),
        }),
        basic_auth: None,
    }
}

pub fn settings(auth: AuthConfig) -> Settings {
    Settings {
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 1,
            backend: StoreBackend::Memory,
        },
        auth,
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5800,
            serve_origin: None,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
        site: SiteConfig {
            timezone: "UTC".to_string(),
        },
        feed: FeedConfig {
            poll_interval_ms: 20,
            window_size: 4,
            tick_interval_ms: 3_600_000,
            wrap: WrapMode::Restart,
        },
        dashboard: DashboardConfig {
            refresh_interval_ms: 2000,
        },
    }
}

pub fn app_with(auth: AuthConfig) -> TestApp {
    let settings = settings(auth);
    let store = Store::in_memory();
    let session = FeedSession::spawn(Arc::new(StoreFeedSource::new(store.clone())), &settings.feed);
    let router = router(AppContext {
        settings: Arc::new(settings),
        clock: SiteClock::default(),
        store: store.clone(),
        feed: session.handle(),
    })
    .unwrap();
    TestApp {
        service: Service::new(router),
        store,
        session,
    }
}

pub fn app() -> TestApp {
    app_with(single_user())
}

pub fn url(path: &str) -> String {
    format!("http://127.0.0.1:5800{API_ROUTE_PREFIX}{path}")
}

/// Waits until the feed session has picked up `len` entries.
pub async fn wait_for_feed(session: &FeedSession, len: usize) {
    let mut handle = session.handle();
    tokio::time::timeout(Duration::from_secs(5), async {
        while handle.snapshot().items.len() != len {
            handle.changed().await.unwrap();
        }
    })
    .await
    .unwrap();
}

pub fn news_body(title: &str, published: bool) -> Value {
    json!({
        "title": title,
        "shortDescription": format!("About {title}"),
        "author": "Desk",
        "isPublished": published,
    })
}

pub fn event_body(title: &str, lifecycle: &str, date: &str) -> Value {
    json!({
        "title": title,
        "shortDescription": "Hands-on session",
        "author": "Desk",
        "lifecycle": lifecycle,
        "eventDate": date,
        "eventTime": "10:00",
        "speakers": "Ada Obi, Kemi Ade",
    })
}

pub fn booking_body(email: &str) -> Value {
    json!({
        "fullName": "Zainab Musa",
        "email": email,
        "mobileNumber": "+234 803 555 0101",
        "location": "Kano",
        "gender": "female",
        "educationBackground": "BSc Computer Science",
        "employmentStatus": "unemployed",
        "expectation": "Meet mentors",
    })
}
