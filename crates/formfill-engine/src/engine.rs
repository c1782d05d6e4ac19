//! Core Engine implementation

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::types::{FillOutcome, FillRequest, IngestOutcome, IngestRequest};
use formfill_domain::traits::{DocumentUnderstanding, MetadataStore, ObjectStore, RawDocument};
use formfill_domain::{DocumentRef, ExtractionResult, FieldMappingResult};
use formfill_extract::{classify, ExtractorRegistry};
use formfill_mapping::{CatalogError, FormCatalog, MappingEngine};
use formfill_store::{FilledForm, VersionedStore};
use formfill_validate::Validator;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// The Engine orchestrates ingestion and form filling
pub struct Engine<D, O, M>
where
    D: DocumentUnderstanding,
    O: ObjectStore,
    M: MetadataStore,
{
    docai: Arc<D>,
    registry: ExtractorRegistry,
    validator: Validator,
    mapping: MappingEngine,
    catalog: FormCatalog,
    store: Arc<VersionedStore<O, M>>,
    config: EngineConfig,
}

/// Serialized artifact payload written to the object store
///
/// PDF rendering is an external collaborator; the engine persists the
/// mapped assignments plus enough context to render later.
#[derive(Serialize)]
struct ArtifactPayload<'a> {
    form_type: &'a str,
    template_ref: &'a str,
    tax_year: u16,
    assignments: &'a BTreeMap<String, formfill_domain::FieldValue>,
}

impl<D, O, M> Engine<D, O, M>
where
    D: DocumentUnderstanding + Send + Sync + 'static,
    O: ObjectStore + 'static,
    M: MetadataStore + 'static,
    D::Error: std::fmt::Display,
    O::Error: std::fmt::Display + Send,
    M::Error: std::fmt::Display + Send,
{
    /// Create an Engine with built-in extractors, rules, aliases and catalog
    pub fn new(docai: D, objects: O, metadata: M, config: EngineConfig) -> Self {
        Self {
            docai: Arc::new(docai),
            registry: ExtractorRegistry::with_builtin(),
            validator: Validator::default_config(),
            mapping: MappingEngine::with_builtin_aliases(),
            catalog: FormCatalog::builtin(),
            store: Arc::new(VersionedStore::new(objects, metadata)),
            config,
        }
    }

    /// Replace the form catalog (per-jurisdiction deployments)
    pub fn with_catalog(mut self, catalog: FormCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replace the validator
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Replace the extractor registry
    pub fn with_registry(mut self, registry: ExtractorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the mapping engine
    pub fn with_mapping(mut self, mapping: MappingEngine) -> Self {
        self.mapping = mapping;
        self
    }

    /// Ingest a document: classify, extract, validate
    ///
    /// A failed document-understanding call yields `success: false` on the
    /// extraction with the failure described in its errors; it is not an
    /// `Err`, and no fields are fabricated.
    pub async fn ingest(&self, request: IngestRequest) -> Result<IngestOutcome, EngineError> {
        let document_type = request
            .document_type
            .unwrap_or_else(|| classify(&request.document));

        info!(
            storage_key = %request.document.storage_key,
            subject_id = %request.subject_id,
            %document_type,
            "starting ingest"
        );

        let extraction = match self.submit_with_retries(&request.document).await {
            Ok(raw) => self.registry.extract(document_type, &raw),
            Err(description) => {
                warn!(%description, "document understanding failed");
                ExtractionResult::service_failure(document_type, description)
            }
        };

        let validation = self.validator.validate(&extraction);

        info!(
            %document_type,
            fields = extraction.fields.len(),
            soft_errors = extraction.errors.len(),
            is_valid = validation.is_valid,
            "ingest complete"
        );

        Ok(IngestOutcome {
            document_type,
            extraction,
            validation,
        })
    }

    /// Fill a form from a semantic field map and persist a new version
    pub async fn fill(&self, request: FillRequest) -> Result<FillOutcome, EngineError> {
        let form = self
            .catalog
            .require(&request.form_type)
            .map_err(|e| match e {
                CatalogError::UnknownForm(ft) => EngineError::UnknownForm(ft),
                other => EngineError::Config(other.to_string()),
            })?;

        let mapping: FieldMappingResult = self.mapping.map_fields(form, &request.fields);

        debug!(
            form_type = %form.form_type,
            assigned = mapping.assignments.len(),
            unmapped = mapping.unmapped_fields.len(),
            "field mapping complete"
        );

        let payload = ArtifactPayload {
            form_type: &form.form_type,
            template_ref: &form.template_ref,
            tax_year: request.tax_year,
            assignments: &mapping.assignments,
        };
        let artifact = serde_json::to_vec_pretty(&payload)?;

        let filled = FilledForm {
            subject_id: request.subject_id,
            form_type: request.form_type,
            tax_year: request.tax_year,
            artifact,
        };

        // Store backends may block on network I/O
        let store = Arc::clone(&self.store);
        let version = tokio::task::spawn_blocking(move || store.save(filled))
            .await
            .map_err(|e| EngineError::Task(e.to_string()))??;

        info!(
            subject_id = %version.subject_id,
            form_type = %version.form_type,
            version = version.version,
            "fill complete"
        );

        Ok(FillOutcome { version, mapping })
    }

    /// Call the document-understanding service under a deadline, retrying
    /// transient failures with exponential backoff; the error is a
    /// human-readable description of the final failure
    ///
    /// Permanent failures (as classified by the provider) stop the loop on
    /// the first attempt. The timeout abandons the blocking call rather
    /// than cancelling it; providers enforce their own request deadline.
    async fn submit_with_retries(&self, document: &DocumentRef) -> Result<RawDocument, String> {
        let mut last_error = String::new();
        let mut attempts = 0;

        while attempts < self.config.submit_retries {
            attempts += 1;
            let docai = Arc::clone(&self.docai);
            let doc = document.clone();
            let call = tokio::task::spawn_blocking(move || {
                docai
                    .submit(&doc)
                    .map_err(|e| (e.to_string(), D::is_transient(&e)))
            });

            match timeout(self.config.submit_timeout(), call).await {
                Ok(Ok(Ok(raw))) => return Ok(raw),
                Ok(Ok(Err((service_err, transient)))) => {
                    last_error = service_err;
                    debug!(attempts, %last_error, transient, "document understanding attempt failed");
                    if !transient {
                        break;
                    }
                }
                Ok(Err(join_err)) => {
                    last_error = format!("task error: {}", join_err);
                    debug!(attempts, %last_error, "document understanding attempt failed");
                }
                Err(_) => {
                    last_error = format!(
                        "document understanding timed out after {}s",
                        self.config.submit_timeout_secs
                    );
                    debug!(attempts, %last_error, "document understanding attempt failed");
                }
            }

            if attempts < self.config.submit_retries {
                tokio::time::sleep(self.config.backoff_delay(attempts)).await;
            }
        }

        Err(format!(
            "service unavailable after {} attempts: {}",
            attempts, last_error
        ))
    }
}
