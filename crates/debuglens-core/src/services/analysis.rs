//! Analysis service - the request pipeline.
//!
//! Stages run in a fixed order: gate, store upload, extract text, assemble
//! prompt, infer, persist record, respond. Once the gate passes, every stage
//! runs unconditionally: extraction and inference degrade to text instead of
//! failing, and a record store failure only clears the record identifier.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::{
    AnalysisOutcome, AnalysisRequest, AnalysisResponse, LOW_MEMORY_ADVISORY, NewUploadRecord,
};
use crate::guard::ResourceGuard;
use crate::ports::{
    CoreError, InferenceEnginePort, SystemProbePort, TextExtractorPort, UploadRecordRepository,
    UploadStoragePort,
};
use crate::prompt::build_debug_prompt;

/// Collaborators required by [`AnalysisService`].
#[derive(Clone)]
pub struct AnalysisDeps {
    pub probe: Arc<dyn SystemProbePort>,
    pub storage: Arc<dyn UploadStoragePort>,
    pub extractor: Arc<dyn TextExtractorPort>,
    pub engine: Arc<dyn InferenceEnginePort>,
    pub records: Arc<dyn UploadRecordRepository>,
}

/// Orchestrates one analysis per call. Shared across concurrent requests.
pub struct AnalysisService {
    guard: ResourceGuard,
    storage: Arc<dyn UploadStoragePort>,
    extractor: Arc<dyn TextExtractorPort>,
    engine: Arc<dyn InferenceEnginePort>,
    records: Arc<dyn UploadRecordRepository>,
}

impl AnalysisService {
    /// Create a new analysis service gated at `min_free_memory_gb`.
    pub fn new(deps: AnalysisDeps, min_free_memory_gb: f64) -> Self {
        Self {
            guard: ResourceGuard::new(deps.probe, min_free_memory_gb),
            storage: deps.storage,
            extractor: deps.extractor,
            engine: deps.engine,
            records: deps.records,
        }
    }

    /// The resource gate used by this service.
    pub const fn guard(&self) -> &ResourceGuard {
        &self.guard
    }

    /// Run the full pipeline for one request.
    ///
    /// Returns `Ok(AnalysisOutcome::Rejected)` when memory is low; nothing
    /// else is touched in that case. The only error is failing to write the
    /// upload itself.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisOutcome, CoreError> {
        let check = self.guard.check();
        if !check.sufficient {
            warn!(
                target: "debuglens.pipeline",
                available_bytes = ?check.available_bytes,
                minimum_gb = check.minimum_gb,
                "Rejecting analysis: insufficient free memory"
            );
            return Ok(AnalysisOutcome::Rejected {
                advisory: LOW_MEMORY_ADVISORY.to_string(),
            });
        }

        debug!(
            target: "debuglens.pipeline",
            filename = %request.filename,
            bytes = request.data.len(),
            language = ?request.language,
            has_code = request.code.is_some(),
            "Starting analysis"
        );

        let stored_path = self.storage.store(&request.filename, &request.data).await?;
        let filename = request.filename;

        let extraction = self.extractor.extract_text(&stored_path).await;
        if extraction.is_failed() {
            warn!(target: "debuglens.pipeline", path = %stored_path.display(), ?extraction, "OCR failed, continuing with diagnostic text");
        }
        let extracted_text = extraction.into_text();

        let prompt = build_debug_prompt(&extracted_text);

        let started = Instant::now();
        let outcome = self.engine.run_inference(&stored_path, &prompt).await;
        let inference_failed = outcome.is_failed();
        let analysis = outcome.render();
        info!(
            target: "debuglens.pipeline",
            path = %stored_path.display(),
            elapsed_ms = started.elapsed().as_millis(),
            failed = inference_failed,
            "Inference finished"
        );

        let record = NewUploadRecord {
            filename,
            path: stored_path.display().to_string(),
            extracted_text,
            analysis_result: analysis.clone(),
            uploaded_at: Utc::now(),
        };
        let record_id = match self.records.save(&record).await {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(target: "debuglens.pipeline", error = %e, "Failed to persist upload record");
                None
            }
        };

        Ok(AnalysisOutcome::Completed(AnalysisResponse {
            analysis,
            record_id,
        }))
    }
}
