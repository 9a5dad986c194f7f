use std::sync::Arc;

use serde_json::Value;

use crate::{ReasoningProvider, Result};
use loft_config::LlmProviderConfig;
use loft_storage::models::FileRecord;

const SYSTEM_PROMPT: &str = "You rank design files for a teammate's request. \
Output must be valid JSON only and must match the provided schema exactly. \
Each candidate has an integer id; answer with that id as index. \
Score relevance from 0.0 (unrelated) to 1.0 (exactly what was asked for). \
Do not add explanations or extra fields.";

/// Reorders heuristic candidates with an external reasoning service.
///
/// The service can only reorder: candidates it leaves out are appended in their original order,
/// and output it does not understand leaves the heuristic order in place.
pub struct SemanticReranker {
	provider: Arc<dyn ReasoningProvider>,
	cfg: LlmProviderConfig,
}
impl SemanticReranker {
	pub fn new(provider: Arc<dyn ReasoningProvider>, cfg: LlmProviderConfig) -> Self {
		Self { provider, cfg }
	}

	pub async fn rerank(
		&self,
		query: &str,
		candidates: Vec<FileRecord>,
		top_k: usize,
	) -> Result<Vec<FileRecord>> {
		let payload = build_rerank_payload(query, &candidates);
		let text = match self.provider.complete(&self.cfg, SYSTEM_PROMPT, &payload).await {
			Ok(text) => text,
			Err(err) if err.is_malformed_response() => {
				tracing::warn!(error = %err, "Reasoning response unusable. Keeping heuristic order.");

				return Ok(keep_order(candidates, top_k));
			},
			Err(err) => return Err(err.into()),
		};

		Ok(reconcile_ranking(&text, candidates, top_k))
	}
}

pub fn build_rerank_payload(query: &str, candidates: &[FileRecord]) -> String {
	let schema = serde_json::json!({
		"ranked": [{ "index": "integer", "score": "number between 0 and 1" }]
	});
	let items: Vec<Value> = candidates
		.iter()
		.enumerate()
		.map(|(id, record)| {
			serde_json::json!({
				"id": id,
				"name": record.display_name().unwrap_or_default(),
				"tags": record.tag_text().unwrap_or_default(),
				"description": record.description.as_deref().unwrap_or_default(),
				"url": record.url.as_deref().unwrap_or_default(),
			})
		})
		.collect();

	format!(
		"Return JSON matching this exact schema:\n{schema}\nRequest:\n{query}\nCandidates:\n{items}",
		items = Value::Array(items),
	)
}

/// Merges the service's answer with the incoming order and truncates to `top_k`.
pub fn reconcile_ranking(
	response_text: &str,
	candidates: Vec<FileRecord>,
	top_k: usize,
) -> Vec<FileRecord> {
	let Some(order) = parse_ranked_indices(response_text, candidates.len()) else {
		tracing::warn!("Reasoning response has no ranked array. Keeping heuristic order.");

		return keep_order(candidates, top_k);
	};
	let mut slots: Vec<Option<FileRecord>> = candidates.into_iter().map(Some).collect();
	let mut out = Vec::with_capacity(slots.len());

	for index in order {
		// `take` leaves `None`, so a repeated index is skipped.
		if let Some(record) = slots[index].take() {
			out.push(record);
		}
	}

	out.extend(slots.into_iter().flatten());
	out.truncate(top_k);

	out
}

/// In-range indices ordered by descending score. Missing scores count as 0 and ties keep the
/// order the service gave.
pub fn parse_ranked_indices(response_text: &str, candidate_count: usize) -> Option<Vec<usize>> {
	let json = parse_json_object(response_text)?;
	let ranked = json.get("ranked")?.as_array()?;
	let mut entries: Vec<(usize, f64)> = ranked
		.iter()
		.filter_map(|entry| {
			let index = usize::try_from(entry.get("index")?.as_u64()?).ok()?;

			if index >= candidate_count {
				return None;
			}

			let score = entry.get("score").and_then(Value::as_f64).unwrap_or(0.0);

			Some((index, score))
		})
		.collect();

	entries.sort_by(|a, b| b.1.total_cmp(&a.1));

	Some(entries.into_iter().map(|(index, _)| index).collect())
}

fn parse_json_object(text: &str) -> Option<Value> {
	let trimmed = text.trim();

	if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(trimmed) {
		return Some(value);
	}

	// Tolerate prose or code fences around the object.
	let start = trimmed.find('{')?;
	let end = trimmed.rfind('}')?;

	if end <= start {
		return None;
	}

	match serde_json::from_str::<Value>(&trimmed[start..=end]) {
		Ok(value @ Value::Object(_)) => Some(value),
		_ => None,
	}
}

fn keep_order(mut candidates: Vec<FileRecord>, top_k: usize) -> Vec<FileRecord> {
	candidates.truncate(top_k);

	candidates
}
