//! Test transport that records requests and replays one canned response.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Error;
use crate::payload::Payload;
use crate::pipeline::{BlockingPipeline, HttpPipeline};
use crate::request::HttpRequest;
use crate::response::Response;

pub(crate) struct RecordingPipeline {
    status: u16,
    body: serde_json::Value,
    sent: Mutex<Vec<HttpRequest>>,
}

impl RecordingPipeline {
    pub(crate) fn ok(body: serde_json::Value) -> Self {
        Self::status(200, body)
    }

    pub(crate) fn status(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            body,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }

    fn respond(&self, request: HttpRequest) -> Result<Response, Error> {
        self.sent.lock().unwrap().push(request);
        Ok(Response::new(
            self.status,
            vec![("content-type".into(), "application/json".into())],
            Payload::from(&self.body),
        ))
    }
}

#[async_trait]
impl HttpPipeline for RecordingPipeline {
    async fn send(&self, request: HttpRequest) -> Result<Response, Error> {
        self.respond(request)
    }
}

impl BlockingPipeline for RecordingPipeline {
    fn send(&self, request: HttpRequest) -> Result<Response, Error> {
        self.respond(request)
    }
}
