//! Shared fixtures for debuglens-axum integration tests.
//!
//! OCR and inference are replaced by in-process fakes; upload storage and the
//! record store are the real adapters over a temp dir and in-memory SQLite.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::Request;
use debuglens_axum::bootstrap::{AxumContext, CorsConfig};
use debuglens_axum::routes::create_router;
use debuglens_core::{
    AnalysisDeps, AnalysisService, AppConfig, DebugPrompt, InferenceEnginePort, InferenceOutcome,
    NewUploadRecord, RepositoryError, SystemProbePort, TextExtraction, TextExtractorPort,
    UploadCollisionPolicy, UploadRecordRepository,
};
use debuglens_db::{SqliteUploadRepository, setup_test_database};
use debuglens_runtime::LocalUploadStorage;
use tempfile::TempDir;

pub const GB: u64 = 1024 * 1024 * 1024;
pub const BOUNDARY: &str = "debuglens-test-boundary";
pub const TEST_CORS_ORIGIN: &str = "http://localhost:3000";

pub const OCR_TEXT: &str = "for i in range(10)\n  print(i)";
pub const ENGINE_OUTPUT: &str = "Root Cause:\nMissing colon after the for statement.\n\n\
Fix Code:\nfor i in range(10):\n    print(i)\n\n\
Steps to Apply:\n1. Add ':' after range(10).\n\n\
Prevention:\nRun a linter.\n\n\
Type Coercion Detected:\nNo\n\n\
Confidence:\n95%";

pub struct FixedProbe(pub Option<u64>);

impl SystemProbePort for FixedProbe {
    fn available_memory_bytes(&self) -> Option<u64> {
        self.0
    }

    fn total_memory_bytes(&self) -> Option<u64> {
        Some(16 * GB)
    }
}

pub struct FakeExtractor;

#[async_trait]
impl TextExtractorPort for FakeExtractor {
    async fn extract_text(&self, image_path: &Path) -> TextExtraction {
        if image_path.exists() {
            TextExtraction::Extracted(OCR_TEXT.to_string())
        } else {
            TextExtraction::failed("image missing")
        }
    }
}

#[derive(Default)]
pub struct FakeEngine {
    pub calls: AtomicUsize,
}

#[async_trait]
impl InferenceEnginePort for FakeEngine {
    async fn run_inference(&self, _image_path: &Path, _prompt: &DebugPrompt) -> InferenceOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        InferenceOutcome::Completed(ENGINE_OUTPUT.to_string())
    }
}

pub struct UnreachableRecords;

#[async_trait]
impl UploadRecordRepository for UnreachableRecords {
    async fn save(&self, _record: &NewUploadRecord) -> Result<String, RepositoryError> {
        Err(RepositoryError::Connection(
            "unable to open database file".to_string(),
        ))
    }
}

pub struct TestOptions {
    pub available_bytes: Option<u64>,
    pub policy: UploadCollisionPolicy,
    pub records_unreachable: bool,
    pub cors: CorsConfig,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            available_bytes: Some(8 * GB),
            policy: UploadCollisionPolicy::Overwrite,
            records_unreachable: false,
            cors: CorsConfig::AllowAll,
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub engine: Arc<FakeEngine>,
    pub upload_dir: PathBuf,
    _tmp: TempDir,
}

pub async fn test_app(options: TestOptions) -> TestApp {
    let tmp = tempfile::tempdir().unwrap();
    let upload_dir = tmp.path().join("uploads");
    let storage = LocalUploadStorage::create(&upload_dir, options.policy)
        .await
        .unwrap();

    let records: Arc<dyn UploadRecordRepository> = if options.records_unreachable {
        Arc::new(UnreachableRecords)
    } else {
        Arc::new(SqliteUploadRepository::new(setup_test_database().await.unwrap()))
    };

    let engine = Arc::new(FakeEngine::default());
    let config = AppConfig::default();
    let service = AnalysisService::new(
        AnalysisDeps {
            probe: Arc::new(FixedProbe(options.available_bytes)),
            storage: Arc::new(storage),
            extractor: Arc::new(FakeExtractor),
            engine: engine.clone(),
            records,
        },
        config.min_free_memory_gb,
    );

    let router = create_router(AxumContext::new(service, config), &options.cors);
    TestApp {
        router,
        engine,
        upload_dir,
        _tmp: tmp,
    }
}

/// One part of a multipart/form-data body.
pub enum Part<'a> {
    File {
        name: &'a str,
        filename: &'a str,
        data: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File {
                name,
                filename,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: image/png\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn analyze_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

/// The form the web frontend sends: code, language, then the image.
pub fn frontend_form<'a>(filename: &'a str, data: &'a [u8]) -> Vec<Part<'a>> {
    vec![
        Part::Text {
            name: "code",
            value: "",
        },
        Part::Text {
            name: "language",
            value: "auto",
        },
        Part::File {
            name: "file",
            filename,
            data,
        },
    ]
}
