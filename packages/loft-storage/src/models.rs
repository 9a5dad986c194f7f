use time::OffsetDateTime;
use uuid::Uuid;

/// One uploaded design asset.
///
/// Rows written before workspace scoping carry `team_id` and the legacy `name` column instead of
/// `workspace_id` and `file_name`.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct FileRecord {
	pub file_id: Uuid,
	pub workspace_id: Option<String>,
	pub team_id: Option<String>,
	pub file_name: Option<String>,
	pub name: Option<String>,
	pub description: Option<String>,
	pub project: Option<String>,
	pub tags: Option<Vec<String>>,
	pub tags_text: Option<String>,
	pub url: Option<String>,
	pub uploaded_at: OffsetDateTime,
	pub privacy: Option<String>,
	pub allowed_emails: Option<Vec<String>>,
}
impl FileRecord {
	/// `file_name`, falling back to the legacy `name`.
	pub fn display_name(&self) -> Option<&str> {
		self.file_name.as_deref().filter(|name| !name.is_empty()).or(self.name.as_deref())
	}

	/// Tags joined with spaces, falling back to the flattened `tags_text`.
	pub fn tag_text(&self) -> Option<String> {
		match self.tags.as_ref() {
			Some(tags) if !tags.is_empty() => Some(tags.join(" ")),
			_ => self.tags_text.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn record() -> FileRecord {
		FileRecord {
			file_id: Uuid::nil(),
			workspace_id: None,
			team_id: Some("T1".to_string()),
			file_name: None,
			name: Some("Legacy Logo".to_string()),
			description: None,
			project: None,
			tags: Some(Vec::new()),
			tags_text: Some("brand mark".to_string()),
			url: None,
			uploaded_at: OffsetDateTime::UNIX_EPOCH,
			privacy: None,
			allowed_emails: None,
		}
	}

	#[test]
	fn legacy_columns_are_used_as_fallbacks() {
		let record = record();

		assert_eq!(record.display_name(), Some("Legacy Logo"));
		assert_eq!(record.tag_text().as_deref(), Some("brand mark"));
	}

	#[test]
	fn tag_array_wins_over_tags_text() {
		let mut record = record();

		record.file_name = Some("Logo v2".to_string());
		record.tags = Some(vec!["brand".to_string(), "logo".to_string()]);

		assert_eq!(record.display_name(), Some("Logo v2"));
		assert_eq!(record.tag_text().as_deref(), Some("brand logo"));
	}
}
