//! Scripted HTTP client for tester unit tests

use crate::client::{HttpClient, HttpRequest, HttpResponse};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// One scripted reaction to a GET
#[derive(Debug, Clone)]
pub enum Scripted {
    Respond(u16, &'static str),
    Delayed(Duration, u16, &'static str),
    Fail(&'static str),
}

/// Answers requests from a fixed script, in call order
pub struct ScriptedClient {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedClient {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.url.clone())
            .collect()
    }
}

#[async_trait]
impl HttpClient for ScriptedClient {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        let step = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Scripted::Fail("script exhausted"));

        match step {
            Scripted::Respond(status, body) => Ok(HttpResponse::new(status, body.as_bytes())),
            Scripted::Delayed(delay, status, body) => {
                tokio::time::sleep(delay).await;
                Ok(HttpResponse::new(status, body.as_bytes()))
            }
            Scripted::Fail(message) => Err(AppError::network(message)),
        }
    }
}
