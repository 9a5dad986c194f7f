use crate::{FileStore, Result, search::ranking::heuristic::{self, ScoredCandidate}};
use loft_domain::query;
use loft_storage::queries::FileQuery;

/// Fetch strategies, tried in order until one yields a positively scored candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateTier {
	/// Workspace rows whose text fields contain the primary token.
	WorkspaceMatching,
	/// The most recent workspace rows.
	WorkspaceRecent,
	/// The most recent rows across every workspace, including rows that predate scoping.
	Legacy,
}
impl CandidateTier {
	pub const CHAIN: [Self; 3] = [Self::WorkspaceMatching, Self::WorkspaceRecent, Self::Legacy];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::WorkspaceMatching => "workspace_matching",
			Self::WorkspaceRecent => "workspace_recent",
			Self::Legacy => "legacy",
		}
	}

	/// The store read for this tier, or `None` when the tier does not apply.
	pub fn file_query(
		self,
		primary_token: Option<&str>,
		workspace_id: &str,
		limit: u32,
	) -> Option<FileQuery> {
		match self {
			Self::WorkspaceMatching => primary_token
				.map(|token| FileQuery::workspace_contains(workspace_id, token, limit)),
			Self::WorkspaceRecent => Some(FileQuery::workspace_recent(workspace_id, limit)),
			Self::Legacy => Some(FileQuery::global_recent(limit)),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct TierOutcome {
	/// The tier that produced `candidates`; `None` when no tier matched.
	pub tier: Option<CandidateTier>,
	/// Positively scored candidates, best first.
	pub candidates: Vec<ScoredCandidate>,
}
impl TierOutcome {
	pub fn empty() -> Self {
		Self { tier: None, candidates: Vec::new() }
	}
}

pub async fn fetch_candidates(
	store: &dyn FileStore,
	tokens: &[String],
	workspace_id: &str,
	working_set_limit: u32,
) -> Result<TierOutcome> {
	if tokens.is_empty() {
		tracing::debug!("Query has no tokens. Skipping candidate fetch.");

		return Ok(TierOutcome::empty());
	}

	let primary = query::primary_token(tokens);

	for tier in CandidateTier::CHAIN {
		let Some(file_query) = tier.file_query(primary, workspace_id, working_set_limit) else {
			tracing::debug!(tier = tier.as_str(), "Tier skipped. No primary token.");

			continue;
		};

		if tier == CandidateTier::Legacy {
			tracing::warn!(
				workspace_id,
				"No positive workspace match. Escalating to legacy rows."
			);
		}

		let records = store.select_files(&file_query).await?;
		let fetched = records.len();
		let candidates = heuristic::rank_positive(records, tokens);

		tracing::debug!(
			tier = tier.as_str(),
			fetched,
			positive = candidates.len(),
			"Tier fetched."
		);

		if !candidates.is_empty() {
			return Ok(TierOutcome { tier: Some(tier), candidates });
		}
	}

	Ok(TierOutcome::empty())
}
