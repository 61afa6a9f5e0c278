//! Scripted in-memory transport for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use super::{FetchError, Transport};
use crate::pages::MountToken;

/// Answers requests from a fixed route table and records every call.
/// Unscripted paths answer HTTP 404.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    routes: HashMap<String, Result<Value, u32>>,
    calls: Mutex<Vec<String>>,
    posts: Mutex<Vec<(String, Value)>>,
    unmount_on: Option<(String, MountToken)>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn ok(mut self, path: &str, body: Value) -> Self {
        self.routes.insert(path.to_string(), Ok(body));
        self
    }

    pub(crate) fn status(mut self, path: &str, status: u32) -> Self {
        self.routes.insert(path.to_string(), Err(status));
        self
    }

    /// Unmounts `token` while the request for `path` is in flight.
    pub(crate) fn unmount_on(mut self, path: &str, token: MountToken) -> Self {
        self.unmount_on = Some((path.to_string(), token));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.split_once(' ').map(|(_, p)| p) == Some(path))
            .count()
    }

    pub(crate) fn posted(&self, path: &str) -> Vec<Value> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, body)| body.clone())
            .collect()
    }

    fn respond(&self, method: &'static str, path: &str) -> Result<Value, FetchError> {
        self.calls.lock().unwrap().push(format!("{method} {path}"));
        if let Some((trigger, token)) = &self.unmount_on {
            if trigger == path {
                token.unmount();
            }
        }
        match self.routes.get(path) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(FetchError::Http {
                method,
                path: path.to_string(),
                status: *status,
            }),
            None => Err(FetchError::Http {
                method,
                path: path.to_string(),
                status: 404,
            }),
        }
    }
}

impl Transport for ScriptedTransport {
    fn get_json(&self, path: &str) -> Result<Value, FetchError> {
        self.respond("GET", path)
    }

    fn post_json(&self, path: &str, body: &Value) -> Result<Value, FetchError> {
        self.posts
            .lock()
            .unwrap()
            .push((path.to_string(), body.clone()));
        self.respond("POST", path)
    }
}
