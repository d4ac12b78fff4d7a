use std::sync::Arc;

use crate::core::config::{AppConfig, AppPaths};
use crate::documents::{DocumentFiller, TemplateRegistry};
use crate::llm::{LlmProvider, OllamaProvider};
use crate::rag::{IntentClassifier, RagEngine, SqliteVectorStore, VectorStore};

pub mod error;

use error::InitializationError;

/// Application state shared across all routes.
///
/// Built exactly once at startup and passed explicitly to every handler;
/// there are no process-wide globals for the model, store, or templates.
pub struct AppState {
    pub paths: Arc<AppPaths>,
    pub config: AppConfig,
    pub llm: Arc<dyn LlmProvider>,
    pub store: Arc<dyn VectorStore>,
    pub engine: RagEngine,
    pub classifier: IntentClassifier,
    pub filler: DocumentFiller,
}

impl AppState {
    /// Initialize every component, or fail the startup sequence entirely.
    ///
    /// Requires the vector store directory to exist (ingestion is a
    /// precondition for serving) and the LLM runtime to answer a health
    /// check.
    pub async fn initialize() -> Result<Arc<Self>, InitializationError> {
        Self::initialize_with(Arc::new(AppPaths::new())).await
    }

    pub async fn initialize_with(paths: Arc<AppPaths>) -> Result<Arc<Self>, InitializationError> {
        let config = AppConfig::load(&paths)
            .map_err(|e| InitializationError::Config(anyhow::anyhow!(e)))?;

        if !paths.store_dir.exists() {
            return Err(InitializationError::VectorStoreMissing(
                paths.store_dir.clone(),
            ));
        }
        tracing::info!("Loading vector store from {:?}", paths.store_dir);
        let store: Arc<dyn VectorStore> = Arc::new(
            SqliteVectorStore::open(&paths.store_dir)
                .await
                .map_err(|e| InitializationError::VectorStore(anyhow::anyhow!(e)))?,
        );

        let llm: Arc<dyn LlmProvider> =
            Arc::new(OllamaProvider::new(config.ollama.base_url.clone()));
        let healthy = llm
            .health_check()
            .await
            .map_err(|e| InitializationError::Llm(anyhow::anyhow!(e)))?;
        if !healthy {
            return Err(InitializationError::LlmUnreachable(
                config.ollama.base_url.clone(),
            ));
        }
        tracing::info!(
            "Using LLM '{}' and embedding model '{}' via {}",
            config.ollama.model,
            config.ollama.embedding_model,
            config.ollama.base_url
        );

        Ok(Arc::new(Self::assemble(paths, config, llm, store)))
    }

    /// Wire components from already-constructed collaborators. Used by
    /// `initialize` and directly by tests with mock providers.
    pub fn assemble(
        paths: Arc<AppPaths>,
        config: AppConfig,
        llm: Arc<dyn LlmProvider>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        let registry = TemplateRegistry::new(&paths.template_dir, &config.templates);
        let filler = DocumentFiller::new(registry, paths.output_dir.clone());

        let engine = RagEngine::new(
            llm.clone(),
            store.clone(),
            config.ollama.clone(),
            config.rag.clone(),
        );
        let classifier = IntentClassifier::new(
            llm.clone(),
            config.ollama.model.clone(),
            config.rag.classify_temperature,
        );

        Self {
            paths,
            config,
            llm,
            store,
            engine,
            classifier,
            filler,
        }
    }
}
