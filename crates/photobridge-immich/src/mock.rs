//! In-memory transports for tests.
//!
//! [`MockTransport`] replays scripted replies keyed by candidate and records
//! every attempt. [`FakeImmich`] keeps album state so that multi-step
//! operations can be exercised end to end.
//!
//! ```rust,ignore
//! let transport = MockTransport::new()
//!     .reply("GET /albums", Reply::Status(404))
//!     .reply("GET /album", Reply::json("[]"));
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use photobridge_core::{Error, Result};

use crate::proxy::ForwardHeaders;
use crate::transport::{Candidate, Transport};

/// Scripted reply for one candidate.
#[derive(Debug, Clone)]
pub enum Reply {
    /// 2xx with this body.
    Body(String),
    /// Non-2xx status with an empty body.
    Status(u16),
    /// Connection failure.
    Refused,
    /// Never answers.
    Pending,
}

impl Reply {
    pub fn json(body: &str) -> Self {
        Self::Body(body.to_string())
    }
}

/// Replays scripted replies. Unscripted candidates answer 404.
#[derive(Default)]
pub struct MockTransport {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<Candidate>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the reply for a candidate, keyed by its display form.
    pub fn reply(mut self, key: &str, reply: Reply) -> Self {
        self.replies.insert(key.to_string(), reply);
        self
    }

    /// Display form of every attempted candidate, in order.
    pub fn calls(&self) -> Vec<String> {
        self.requests().iter().map(|c| c.to_string()).collect()
    }

    /// Every attempted candidate, in order.
    pub fn requests(&self) -> Vec<Candidate> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, candidate: &Candidate) -> Result<Vec<u8>> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push(candidate.clone());
        match self.replies.get(&candidate.to_string()) {
            Some(Reply::Body(body)) => Ok(body.clone().into_bytes()),
            Some(Reply::Status(status)) => Err(Error::upstream(*status, "")),
            Some(Reply::Refused) => Err(Error::Transport("connection refused".to_string())),
            Some(Reply::Pending) => std::future::pending().await,
            None => Err(Error::upstream(404, "")),
        }
    }

    async fn open(
        &self,
        _candidate: &Candidate,
        _forward: &ForwardHeaders,
    ) -> Result<reqwest::Response> {
        Err(Error::Transport("streaming not scripted".to_string()))
    }
}

#[derive(Default)]
struct FakeState {
    albums: Vec<(String, String)>,
    members: HashMap<String, Vec<String>>,
    created: usize,
    calls: Vec<String>,
}

/// Stateful stand-in for a deployment's album endpoints.
///
/// Serves `GET /albums`, `POST /albums`, and membership-add under
/// `/albums/{id}/assets`. When `put_supported` is false the PUT form answers
/// 405 so callers must fall back to POST.
pub struct FakeImmich {
    put_supported: bool,
    state: Mutex<FakeState>,
}

impl FakeImmich {
    pub fn new(put_supported: bool) -> Self {
        Self {
            put_supported,
            state: Mutex::new(FakeState::default()),
        }
    }

    /// Seed an existing album.
    pub fn with_album(self, id: &str, name: &str) -> Self {
        self.state
            .lock()
            .expect("fake state poisoned")
            .albums
            .push((id.to_string(), name.to_string()));
        self
    }

    pub fn album_count(&self) -> usize {
        self.state.lock().expect("fake state poisoned").albums.len()
    }

    pub fn created_count(&self) -> usize {
        self.state.lock().expect("fake state poisoned").created
    }

    pub fn members(&self, album_id: &str) -> Vec<String> {
        self.state
            .lock()
            .expect("fake state poisoned")
            .members
            .get(album_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().expect("fake state poisoned").calls.clone()
    }
}

#[async_trait]
impl Transport for FakeImmich {
    async fn execute(&self, candidate: &Candidate) -> Result<Vec<u8>> {
        let mut state = self.state.lock().expect("fake state poisoned");
        state.calls.push(candidate.to_string());

        let segments: Vec<&str> = candidate.path.trim_matches('/').split('/').collect();
        let method = candidate.method.as_str();
        let response = match (method, segments.as_slice()) {
            ("GET", ["albums"]) => {
                let albums: Vec<Value> = state
                    .albums
                    .iter()
                    .map(|(id, name)| json!({"id": id, "albumName": name}))
                    .collect();
                Value::Array(albums)
            }
            ("POST", ["albums"]) => {
                let name = candidate
                    .body
                    .as_ref()
                    .and_then(|b| b.get("albumName"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                state.created += 1;
                let id = format!("album-{}", state.created);
                state.albums.push((id.clone(), name.clone()));
                json!({"id": id, "albumName": name})
            }
            ("POST", ["albums", album_id, "assets"])
            | ("PUT", ["albums", album_id, "assets"])
                if method == "POST" || self.put_supported =>
            {
                let album_id = album_id.to_string();
                if !state.albums.iter().any(|(id, _)| *id == album_id) {
                    return Err(Error::upstream(400, "album not found"));
                }
                let ids: Vec<String> = candidate
                    .body
                    .as_ref()
                    .and_then(|b| b.get("ids"))
                    .and_then(Value::as_array)
                    .map(|ids| {
                        ids.iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();
                let members = state.members.entry(album_id).or_default();
                let results: Vec<Value> = ids
                    .into_iter()
                    .map(|id| {
                        if members.contains(&id) {
                            json!({"id": id, "success": false, "error": "duplicate"})
                        } else {
                            members.push(id.clone());
                            json!({"id": id, "success": true})
                        }
                    })
                    .collect();
                Value::Array(results)
            }
            ("PUT", ["albums", _, "assets"]) => return Err(Error::upstream(405, "")),
            _ => return Err(Error::upstream(404, "")),
        };
        Ok(response.to_string().into_bytes())
    }

    async fn open(
        &self,
        _candidate: &Candidate,
        _forward: &ForwardHeaders,
    ) -> Result<reqwest::Response> {
        Err(Error::Transport("streaming not supported".to_string()))
    }
}
