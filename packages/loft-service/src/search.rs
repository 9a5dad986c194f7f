mod ranking;
mod tiers;

pub use ranking::{
	ScoredCandidate, SemanticReranker,
	heuristic::{self, rank_positive, score_record},
	semantic::{build_rerank_payload, parse_ranked_indices, reconcile_ranking},
};
pub use tiers::{CandidateTier, TierOutcome, fetch_candidates};

use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, LoftService, Result, access};
use loft_domain::{privacy::Privacy, query};
use loft_storage::models::FileRecord;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchRequest {
	pub workspace_id: String,
	pub requester_email: String,
	pub query: String,
	pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SearchItem {
	pub file_id: Uuid,
	pub name: Option<String>,
	pub description: Option<String>,
	pub project: Option<String>,
	pub tags: Vec<String>,
	pub url: Option<String>,
	#[serde(with = "crate::time_serde")]
	pub uploaded_at: OffsetDateTime,
	pub privacy: Option<Privacy>,
}
impl From<FileRecord> for SearchItem {
	fn from(record: FileRecord) -> Self {
		let name = record.display_name().map(str::to_string);
		let tags = match record.tags {
			Some(tags) if !tags.is_empty() => tags,
			_ => record
				.tags_text
				.as_deref()
				.map(|text| text.split_whitespace().map(str::to_string).collect())
				.unwrap_or_default(),
		};

		Self {
			file_id: record.file_id,
			name,
			description: record.description,
			project: record.project,
			tags,
			url: record.url,
			uploaded_at: record.uploaded_at,
			privacy: Privacy::classify(record.privacy.as_deref()),
		}
	}
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchResponse {
	/// The tier that supplied the results; `None` when nothing matched.
	pub tier: Option<CandidateTier>,
	pub items: Vec<SearchItem>,
}

/// Ranked, access-filtered records together with the tier they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
	pub tier: Option<CandidateTier>,
	pub records: Vec<FileRecord>,
}

impl LoftService {
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		let limit = self.resolve_limit(req.limit)?;
		let outcome =
			self.run_search(&req.query, &req.workspace_id, &req.requester_email, limit).await?;

		Ok(SearchResponse {
			tier: outcome.tier,
			items: outcome.records.into_iter().map(SearchItem::from).collect(),
		})
	}

	/// Ranked records `requester_email` may view, best first, at most `limit` long.
	pub async fn search_files(
		&self,
		query: &str,
		workspace_id: &str,
		requester_email: &str,
		limit: u32,
	) -> Result<Vec<FileRecord>> {
		let limit = self.resolve_limit(Some(limit))?;

		Ok(self.run_search(query, workspace_id, requester_email, limit).await?.records)
	}

	pub async fn run_search(
		&self,
		query: &str,
		workspace_id: &str,
		requester_email: &str,
		limit: u32,
	) -> Result<SearchOutcome> {
		let workspace_id = workspace_id.trim();

		if workspace_id.is_empty() {
			return Err(Error::InvalidRequest {
				message: "workspace_id must be non-empty.".to_string(),
			});
		}
		if limit == 0 {
			return Err(Error::InvalidRequest {
				message: "limit must be greater than zero.".to_string(),
			});
		}

		let tokens = query::tokenize(query);
		let outcome = tiers::fetch_candidates(
			self.store.as_ref(),
			&tokens,
			workspace_id,
			self.cfg.search.working_set_limit,
		)
		.await?;
		let tier = outcome.tier;
		let mut ranked: Vec<FileRecord> =
			outcome.candidates.into_iter().map(|candidate| candidate.record).collect();

		if let Some(reranker) = self.reranker.as_ref() {
			ranked = self.rerank_head(reranker, query, ranked).await?;
		}

		ranked.truncate(limit as usize);

		let ranked_count = ranked.len();
		let records = access::filter_viewable(ranked, requester_email);

		tracing::info!(
			workspace_id,
			tier = tier.map(CandidateTier::as_str).unwrap_or("none"),
			tokens = tokens.len(),
			ranked = ranked_count,
			returned = records.len(),
			"Search completed."
		);

		Ok(SearchOutcome { tier, records })
	}

	/// Reranks the first `search.rerank.max_candidates` candidates and keeps the rest behind them
	/// in heuristic order.
	async fn rerank_head(
		&self,
		reranker: &SemanticReranker,
		query: &str,
		mut candidates: Vec<FileRecord>,
	) -> Result<Vec<FileRecord>> {
		let head_len = candidates.len().min(self.cfg.search.rerank.max_candidates as usize);

		if head_len < 2 {
			return Ok(candidates);
		}

		let tail = candidates.split_off(head_len);
		let mut ranked = reranker.rerank(query, candidates, head_len).await?;

		ranked.extend(tail);

		Ok(ranked)
	}

	fn resolve_limit(&self, requested: Option<u32>) -> Result<u32> {
		let limit = requested.unwrap_or(self.cfg.search.default_limit);

		if limit == 0 || limit > self.cfg.search.max_limit {
			return Err(Error::InvalidRequest {
				message: format!(
					"limit must be between 1 and {}; got {limit}.",
					self.cfg.search.max_limit
				),
			});
		}

		Ok(limit)
	}
}
