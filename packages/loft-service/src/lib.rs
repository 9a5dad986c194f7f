pub mod access;
pub mod search;
pub mod time_serde;

mod error;

pub use error::{Error, Result};
pub use search::{
	CandidateTier, ScoredCandidate, SearchItem, SearchOutcome, SearchRequest, SearchResponse,
	SemanticReranker, TierOutcome,
};

use std::{future::Future, pin::Pin, sync::Arc};

use loft_config::{Config, LlmProviderConfig};
use loft_providers::reasoning;
use loft_storage::{
	db::Db,
	models::FileRecord,
	queries::{self, FileQuery},
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read access to the design-file record store.
pub trait FileStore
where
	Self: Send + Sync,
{
	fn select_files<'a>(
		&'a self,
		query: &'a FileQuery,
	) -> BoxFuture<'a, loft_storage::Result<Vec<FileRecord>>>;
}

/// An external reasoning service that answers a system prompt and user payload with text.
pub trait ReasoningProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		system_prompt: &'a str,
		user_payload: &'a str,
	) -> BoxFuture<'a, loft_providers::Result<String>>;
}

/// Request-scoped retrieval over an explicitly supplied record store.
///
/// The service holds no mutable state, so one instance can serve concurrent searches.
pub struct LoftService {
	pub cfg: Config,
	pub store: Arc<dyn FileStore>,
	reranker: Option<SemanticReranker>,
}

struct DefaultProviders;

impl FileStore for Db {
	fn select_files<'a>(
		&'a self,
		query: &'a FileQuery,
	) -> BoxFuture<'a, loft_storage::Result<Vec<FileRecord>>> {
		Box::pin(queries::select_files(&self.pool, query))
	}
}

impl ReasoningProvider for DefaultProviders {
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		system_prompt: &'a str,
		user_payload: &'a str,
	) -> BoxFuture<'a, loft_providers::Result<String>> {
		Box::pin(reasoning::complete(cfg, system_prompt, user_payload))
	}
}

impl LoftService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self::with_store(cfg, Arc::new(db))
	}

	pub fn with_store(cfg: Config, store: Arc<dyn FileStore>) -> Self {
		Self::with_reasoning(cfg, store, Arc::new(DefaultProviders))
	}

	/// Semantic reranking is enabled only when `providers.reasoning` is configured; otherwise
	/// `provider` is unused.
	pub fn with_reasoning(
		cfg: Config,
		store: Arc<dyn FileStore>,
		provider: Arc<dyn ReasoningProvider>,
	) -> Self {
		let reranker = cfg
			.providers
			.reasoning
			.clone()
			.map(|reasoning_cfg| SemanticReranker::new(provider, reasoning_cfg));

		Self { cfg, store, reranker }
	}

	pub fn semantic_rerank_enabled(&self) -> bool {
		self.reranker.is_some()
	}
}
