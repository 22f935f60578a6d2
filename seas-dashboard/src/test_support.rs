//! In-memory job directory and scripted operator for tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use seas_client::{ClientError, Result};
use seas_core::domain::job::JobRecord;
use seas_core::dto::job::{ArchiveFile, CreateJobResponse, DeleteJobResponse};
use tokio::sync::Notify;

use crate::repository::JobDirectory;
use crate::service::Interaction;

pub fn job(name: &str, status: &str) -> JobRecord {
    JobRecord {
        name: name.to_string(),
        timestamp: "2024-05-01 10:00:00".to_string(),
        status: status.to_string(),
    }
}

/// How the fake answers uploads
#[derive(Debug, Clone)]
pub enum CreateReply {
    /// `{}` with a success status
    Accept,
    /// `{"error": ...}`
    Reject(String),
    /// No usable response at all
    Unreachable,
    /// A success status with a body that is not JSON
    Garbled,
}

const GARBLED: &str = "Failed to parse JSON response: expected value at line 1 column 1";

/// Job directory kept in memory
///
/// Every call is recorded as `"<op>"` or `"<op>:<batch>"`. A gate registered
/// for such a key holds the next matching call until released, which lets a
/// test decide the order responses arrive in.
pub struct FakeDirectory {
    jobs: Mutex<Vec<JobRecord>>,
    logs: Mutex<HashMap<String, Vec<String>>>,
    create_reply: Mutex<CreateReply>,
    fail_list: AtomicBool,
    garble_list: AtomicBool,
    fail_delete: AtomicBool,
    fail_logs: AtomicBool,
    omit_delete_message: AtomicBool,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeDirectory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            jobs: Mutex::default(),
            logs: Mutex::default(),
            create_reply: Mutex::new(CreateReply::Accept),
            fail_list: AtomicBool::new(false),
            garble_list: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
            fail_logs: AtomicBool::new(false),
            omit_delete_message: AtomicBool::new(false),
            gates: Mutex::default(),
            calls: Mutex::default(),
        })
    }

    pub fn with_jobs(jobs: &[(&str, &str)]) -> Arc<Self> {
        let fake = Self::new();
        fake.set_jobs(jobs);
        fake
    }

    pub fn set_jobs(&self, jobs: &[(&str, &str)]) {
        *self.jobs.lock().unwrap() = jobs.iter().map(|(n, s)| job(n, s)).collect();
    }

    pub fn set_logs(&self, batch_name: &str, lines: &[&str]) {
        self.logs.lock().unwrap().insert(
            batch_name.to_string(),
            lines.iter().map(|l| l.to_string()).collect(),
        );
    }

    pub fn set_create_reply(&self, reply: CreateReply) {
        *self.create_reply.lock().unwrap() = reply;
    }

    pub fn fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    /// Makes listings fail the way an undecodable body does
    pub fn garble_list(&self, garble: bool) {
        self.garble_list.store(garble, Ordering::SeqCst);
    }

    pub fn fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn fail_logs(&self, fail: bool) {
        self.fail_logs.store(fail, Ordering::SeqCst);
    }

    pub fn omit_delete_message(&self) {
        self.omit_delete_message.store(true, Ordering::SeqCst);
    }

    /// Holds the next call recorded as `key` until the returned gate is notified
    pub fn gate(&self, key: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(key.to_string(), Arc::clone(&gate));
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls whose key is `op` or starts with `op:`
    pub fn count(&self, op: &str) -> usize {
        let prefix = format!("{}:", op);
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| *c == op || c.starts_with(&prefix))
            .count()
    }

    fn record(&self, key: &str) {
        self.calls.lock().unwrap().push(key.to_string());
    }

    async fn pass_gate(&self, key: &str) {
        let gate = self.gates.lock().unwrap().remove(key);
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl JobDirectory for FakeDirectory {
    async fn list_jobs(&self) -> Result<Vec<JobRecord>> {
        self.record("list");
        let jobs = self.jobs.lock().unwrap().clone();
        let fail = self.fail_list.load(Ordering::SeqCst);
        let garble = self.garble_list.load(Ordering::SeqCst);
        self.pass_gate("list").await;

        if fail {
            return Err(ClientError::api_error(503, "Service Unavailable"));
        }
        if garble {
            return Err(ClientError::ParseError(GARBLED.to_string()));
        }
        Ok(jobs)
    }

    async fn create_job(
        &self,
        batch_name: &str,
        _archive: &ArchiveFile,
    ) -> Result<CreateJobResponse> {
        self.record(&format!("create:{}", batch_name));
        self.pass_gate("create").await;

        let reply = self.create_reply.lock().unwrap().clone();
        match reply {
            CreateReply::Accept => {
                self.jobs.lock().unwrap().push(job(batch_name, "Uploaded"));
                Ok(CreateJobResponse::default())
            }
            CreateReply::Reject(message) => Err(ClientError::rejected(200, message)),
            CreateReply::Unreachable => Err(ClientError::api_error(502, "Bad Gateway")),
            CreateReply::Garbled => Err(ClientError::ParseError(GARBLED.to_string())),
        }
    }

    async fn delete_job(&self, batch_name: &str) -> Result<DeleteJobResponse> {
        let key = format!("delete:{}", batch_name);
        self.record(&key);
        self.pass_gate(&key).await;

        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(ClientError::api_error(500, "Internal Server Error"));
        }

        let mut jobs = self.jobs.lock().unwrap();
        let before = jobs.len();
        jobs.retain(|j| j.name != batch_name);
        if jobs.len() == before {
            return Err(ClientError::rejected(404, "Job not found"));
        }

        let message = if self.omit_delete_message.load(Ordering::SeqCst) {
            None
        } else {
            Some(format!("Deleted job {}", batch_name))
        };
        Ok(DeleteJobResponse {
            message,
            error: None,
        })
    }

    async fn fetch_logs(&self, batch_name: &str) -> Result<Vec<String>> {
        let key = format!("logs:{}", batch_name);
        self.record(&key);
        let logs = self.logs.lock().unwrap().get(batch_name).cloned();
        let fail = self.fail_logs.load(Ordering::SeqCst);
        self.pass_gate(&key).await;

        if fail {
            return Err(ClientError::api_error(503, "Service Unavailable"));
        }
        logs.ok_or_else(|| ClientError::rejected(404, "Job not found"))
    }
}

/// Operator stand-in that answers confirmations with a fixed reply
pub struct ScriptedOperator {
    answer: AtomicBool,
    prompts: Mutex<Vec<String>>,
    notices: Mutex<Vec<String>>,
}

impl ScriptedOperator {
    pub fn answering(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer: AtomicBool::new(answer),
            prompts: Mutex::default(),
            notices: Mutex::default(),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

#[async_trait]
impl Interaction for ScriptedOperator {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer.load(Ordering::SeqCst)
    }

    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }
}
