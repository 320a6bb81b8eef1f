//! Shared helpers for HTTP integration suites.

use std::sync::{Arc, Mutex};

use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{Method, header};
use actix_web::{App, test, web};
use async_trait::async_trait;
use serde_json::Value;

use cityinfo::Trace;
use cityinfo::domain::ports::{CityStore, CityStoreError, NotificationSink};
use cityinfo::domain::{
    ChangeSet, City, CityId, CommitReceipt, PointOfInterest, PointOfInterestId,
};
use cityinfo::inbound::http::api_scope;
use cityinfo::inbound::http::state::HttpState;

/// Notification sink that keeps every `(subject, body)` pair it receives.
#[derive(Clone, Default)]
pub struct RecordingNotificationSink {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingNotificationSink {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().expect("notification lock").clone()
    }
}

impl NotificationSink for RecordingNotificationSink {
    fn send(&self, subject: &str, body: &str) {
        self.sent
            .lock()
            .expect("notification lock")
            .push((subject.to_owned(), body.to_owned()));
    }
}

/// Store whose reads succeed over an inner store but whose commits fail.
pub struct FailingCommitStore {
    pub inner: Arc<dyn CityStore>,
}

#[async_trait]
impl CityStore for FailingCommitStore {
    async fn list_cities(&self) -> Result<Vec<City>, CityStoreError> {
        self.inner.list_cities().await
    }

    async fn find_city(
        &self,
        city_id: CityId,
        include_points: bool,
    ) -> Result<Option<City>, CityStoreError> {
        self.inner.find_city(city_id, include_points).await
    }

    async fn city_exists(&self, city_id: CityId) -> Result<bool, CityStoreError> {
        self.inner.city_exists(city_id).await
    }

    async fn list_points(&self, city_id: CityId) -> Result<Vec<PointOfInterest>, CityStoreError> {
        self.inner.list_points(city_id).await
    }

    async fn find_point(
        &self,
        city_id: CityId,
        point_id: PointOfInterestId,
    ) -> Result<Option<PointOfInterest>, CityStoreError> {
        self.inner.find_point(city_id, point_id).await
    }

    async fn apply(&self, _changes: ChangeSet) -> Result<CommitReceipt, CityStoreError> {
        Err(CityStoreError::connection("database unavailable at 10.0.0.7"))
    }

    async fn ping(&self) -> Result<(), CityStoreError> {
        Err(CityStoreError::connection("database unavailable at 10.0.0.7"))
    }
}

/// Status, headers and parsed JSON body of one response.
pub struct Reply {
    pub status: u16,
    pub location: Option<String>,
    pub body: Option<Value>,
}

/// Status, content type and raw text of one response.
pub struct RawReply {
    pub status: u16,
    pub content_type: Option<String>,
    pub location: Option<String>,
    pub text: String,
}

/// Build the API over `store`, send one request and collect the reply.
pub async fn send(
    store: Arc<dyn CityStore>,
    notifications: Arc<dyn NotificationSink>,
    method: Method,
    path: &str,
    payload: Option<Value>,
) -> Reply {
    let mut request = test::TestRequest::default().method(method).uri(path);
    if let Some(payload) = payload {
        request = request.set_json(payload);
    }
    let raw = call(store, notifications, request).await;
    let body = (!raw.text.is_empty())
        .then(|| serde_json::from_str(&raw.text).expect("JSON body"));
    Reply {
        status: raw.status,
        location: raw.location,
        body,
    }
}

/// Like [`send`], with an explicit `Accept` header and an unparsed body.
pub async fn send_accepting(
    store: Arc<dyn CityStore>,
    notifications: Arc<dyn NotificationSink>,
    method: Method,
    path: &str,
    payload: Option<Value>,
    accept: &str,
) -> RawReply {
    let mut request = test::TestRequest::default()
        .method(method)
        .uri(path)
        .insert_header((header::ACCEPT, accept));
    if let Some(payload) = payload {
        request = request.set_json(payload);
    }
    call(store, notifications, request).await
}

async fn call(
    store: Arc<dyn CityStore>,
    notifications: Arc<dyn NotificationSink>,
    request: test::TestRequest,
) -> RawReply {
    let state = web::Data::new(HttpState::new(store, notifications));
    let app = test::init_service(App::new().app_data(state).wrap(Trace).service(api_scope())).await;
    let response = app.call(request.to_request()).await.expect("service call");
    into_raw_reply(response).await
}

fn header_value(response: &ServiceResponse<BoxBody>, name: header::HeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

async fn into_raw_reply(response: ServiceResponse<BoxBody>) -> RawReply {
    let status = response.status().as_u16();
    let content_type = header_value(&response, header::CONTENT_TYPE);
    let location = header_value(&response, header::LOCATION);
    let bytes = test::read_body(response).await;
    RawReply {
        status,
        content_type,
        location,
        text: String::from_utf8(bytes.to_vec()).expect("utf-8 body"),
    }
}
