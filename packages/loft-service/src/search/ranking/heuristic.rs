use loft_storage::models::FileRecord;

pub const NAME_CONTAINS_POINTS: u32 = 8;
pub const NAME_PREFIX_POINTS: u32 = 4;
pub const PROJECT_POINTS: u32 = 3;
pub const TAGS_POINTS: u32 = 3;
pub const DESCRIPTION_POINTS: u32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
	pub record: FileRecord,
	pub score: u32,
}

/// Lowercased copies of the fields the heuristic reads.
struct ScoringFields {
	name: String,
	name_words: Vec<String>,
	project: String,
	tags: String,
	description: String,
}
impl ScoringFields {
	fn of(record: &FileRecord) -> Self {
		let name = record.display_name().unwrap_or_default().to_lowercase();
		let name_words = name
			.split(|ch: char| !ch.is_alphanumeric())
			.filter(|word| !word.is_empty())
			.map(str::to_string)
			.collect();

		Self {
			name,
			name_words,
			project: record.project.as_deref().unwrap_or_default().to_lowercase(),
			tags: record.tag_text().unwrap_or_default().to_lowercase(),
			description: record.description.as_deref().unwrap_or_default().to_lowercase(),
		}
	}

	/// The name, or any word in it, begins with `token`. Wider than a whole-name prefix: "Final Orca
	/// Deck" earns the bonus for `orca`.
	fn name_starts_with(&self, token: &str) -> bool {
		self.name.starts_with(token) || self.name_words.iter().any(|word| word.starts_with(token))
	}
}

/// Scores every record against `tokens`, preserving input order.
pub fn score(records: Vec<FileRecord>, tokens: &[String]) -> Vec<ScoredCandidate> {
	records
		.into_iter()
		.map(|record| {
			let score = score_record(&record, tokens);

			ScoredCandidate { record, score }
		})
		.collect()
}

pub fn score_record(record: &FileRecord, tokens: &[String]) -> u32 {
	let fields = ScoringFields::of(record);
	let mut total = 0;

	for token in tokens {
		let token = token.as_str();

		if token.is_empty() {
			continue;
		}
		if fields.name.contains(token) {
			total += NAME_CONTAINS_POINTS;
		}
		if fields.name_starts_with(token) {
			total += NAME_PREFIX_POINTS;
		}
		if fields.project.contains(token) {
			total += PROJECT_POINTS;
		}
		if fields.tags.contains(token) {
			total += TAGS_POINTS;
		}
		if fields.description.contains(token) {
			total += DESCRIPTION_POINTS;
		}
	}

	total
}

/// Positively scored candidates, best first. Equal scores keep fetch order.
pub fn rank_positive(records: Vec<FileRecord>, tokens: &[String]) -> Vec<ScoredCandidate> {
	let mut candidates: Vec<ScoredCandidate> =
		score(records, tokens).into_iter().filter(|candidate| candidate.score > 0).collect();

	// `sort_by` is stable.
	candidates.sort_by(|a, b| b.score.cmp(&a.score));

	candidates
}
