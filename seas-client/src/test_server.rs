//! In-process fake of the job directory used by the client tests

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use seas_core::domain::job::JobRecord;
use serde_json::json;

const TIMESTAMP: &str = "2024-05-01 10:00:00";

/// What the fake received on its last successful upload
#[derive(Debug, Clone)]
pub struct Upload {
    pub batch_name: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Default)]
struct Inner {
    jobs: Vec<(JobRecord, Vec<String>)>,
    last_upload: Option<Upload>,
    fail_listing: bool,
    garbled: bool,
    reject_with_ok: Option<String>,
}

type Shared = Arc<Mutex<Inner>>;

/// Handle to a running fake directory
pub struct FakeDirectory {
    url: String,
    state: Shared,
}

impl FakeDirectory {
    /// Bind to an ephemeral local port and start serving
    pub async fn spawn() -> Self {
        let state: Shared = Arc::default();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let app = Router::new()
            .route("/jobs", get(list_jobs))
            .route("/upload", post(upload))
            .route("/delete/{batchname}", delete(delete_job))
            .route("/logs/{batchname}", get(get_logs))
            .with_state(Arc::clone(&state));

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            state,
        }
    }

    pub fn url(&self) -> String {
        self.url.clone()
    }

    pub fn add_job(&self, name: &str, status: &str, logs: &[&str]) {
        let record = JobRecord {
            name: name.to_string(),
            timestamp: TIMESTAMP.to_string(),
            status: status.to_string(),
        };
        let logs = logs.iter().map(|l| l.to_string()).collect();
        self.state.lock().unwrap().jobs.push((record, logs));
    }

    pub fn last_upload(&self) -> Option<Upload> {
        self.state.lock().unwrap().last_upload.clone()
    }

    /// Make `GET /jobs` answer 503 with a plain-text body
    pub fn fail_listing(&self) {
        self.state.lock().unwrap().fail_listing = true;
    }

    /// Make `GET /jobs` and `POST /upload` answer 200 with a non-JSON body
    pub fn garble_responses(&self) {
        self.state.lock().unwrap().garbled = true;
    }

    /// Make uploads answer 200 with an `error` field
    pub fn reject_uploads_with_ok(&self, message: &str) {
        self.state.lock().unwrap().reject_with_ok = Some(message.to_string());
    }
}

async fn list_jobs(State(state): State<Shared>) -> Response {
    let inner = state.lock().unwrap();
    if inner.fail_listing {
        return (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response();
    }
    if inner.garbled {
        return garbled();
    }

    let jobs: Vec<JobRecord> = inner.jobs.iter().map(|(job, _)| job.clone()).collect();
    Json(jobs).into_response()
}

async fn upload(State(state): State<Shared>, mut multipart: Multipart) -> Response {
    let mut batch_name = None;
    let mut file = None;

    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("batchname") => batch_name = Some(field.text().await.unwrap()),
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.unwrap().to_vec();
                file = Some((file_name, bytes));
            }
            _ => {}
        }
    }

    let (Some(batch_name), Some((file_name, bytes))) = (batch_name, file) else {
        return error(StatusCode::BAD_REQUEST, "Missing file or batch name");
    };

    let mut inner = state.lock().unwrap();
    if inner.garbled {
        return garbled();
    }
    if let Some(message) = inner.reject_with_ok.clone() {
        return error(StatusCode::OK, &message);
    }
    if !file_name.ends_with(".tar.gz") {
        return error(StatusCode::BAD_REQUEST, "Only .tar.gz files allowed");
    }

    let record = JobRecord {
        name: batch_name.clone(),
        timestamp: TIMESTAMP.to_string(),
        status: "Uploaded".to_string(),
    };
    inner.jobs.push((record, Vec::new()));
    inner.last_upload = Some(Upload {
        batch_name: batch_name.clone(),
        file_name,
        bytes,
    });

    Json(json!({
        "message": "Upload successful",
        "filename": format!("{}.tar.gz", batch_name),
    }))
    .into_response()
}

async fn delete_job(State(state): State<Shared>, Path(batch_name): Path<String>) -> Response {
    let mut inner = state.lock().unwrap();
    let before = inner.jobs.len();
    inner.jobs.retain(|(job, _)| job.name != batch_name);

    if inner.jobs.len() == before {
        return error(StatusCode::NOT_FOUND, "Job not found");
    }

    Json(json!({ "message": format!("Deleted job {}", batch_name) })).into_response()
}

async fn get_logs(State(state): State<Shared>, Path(batch_name): Path<String>) -> Response {
    let inner = state.lock().unwrap();
    match inner.jobs.iter().find(|(job, _)| job.name == batch_name) {
        Some((_, logs)) => Json(json!({ "logs": logs })).into_response(),
        None => error(StatusCode::NOT_FOUND, "Job not found"),
    }
}

fn garbled() -> Response {
    (StatusCode::OK, "<html>oops</html>").into_response()
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
