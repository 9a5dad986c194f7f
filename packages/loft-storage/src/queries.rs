use sqlx::PgExecutor;

use crate::{Error, Result, models::FileRecord};

/// Read filter for [`select_files`]. Results are always ordered newest upload first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileQuery {
	/// `None` reads across every workspace, including rows that predate workspace scoping.
	pub workspace_id: Option<String>,
	/// Case-insensitive substring matched against name, description, project, and tag text.
	pub contains: Option<String>,
	pub limit: u32,
}
impl FileQuery {
	pub fn workspace_contains(workspace_id: &str, needle: &str, limit: u32) -> Self {
		Self {
			workspace_id: Some(workspace_id.to_string()),
			contains: Some(needle.to_string()),
			limit,
		}
	}

	pub fn workspace_recent(workspace_id: &str, limit: u32) -> Self {
		Self { workspace_id: Some(workspace_id.to_string()), contains: None, limit }
	}

	pub fn global_recent(limit: u32) -> Self {
		Self { workspace_id: None, contains: None, limit }
	}
}

pub async fn select_files<'e, E>(executor: E, query: &FileQuery) -> Result<Vec<FileRecord>>
where
	E: PgExecutor<'e>,
{
	if query.limit == 0 {
		return Err(Error::InvalidArgument("File query limit must be greater than zero.".to_string()));
	}

	let pattern = query.contains.as_deref().map(contains_pattern);
	let rows = sqlx::query_as::<_, FileRecord>(
		"\
SELECT
	file_id,
	workspace_id,
	team_id,
	file_name,
	name,
	description,
	project,
	tags,
	tags_text,
	url,
	uploaded_at,
	privacy,
	allowed_emails
FROM design_files
WHERE ($1::text IS NULL OR workspace_id = $1)
	AND (
		$2::text IS NULL
		OR file_name ILIKE $2
		OR name ILIKE $2
		OR description ILIKE $2
		OR project ILIKE $2
		OR tags_text ILIKE $2
	)
ORDER BY uploaded_at DESC, file_id
LIMIT $3",
	)
	.bind(query.workspace_id.as_deref())
	.bind(pattern.as_deref())
	.bind(i64::from(query.limit))
	.fetch_all(executor)
	.await?;

	Ok(rows)
}

/// Write path used by the upload flow. `tags_text` is derived from `tags` when absent so that
/// substring reads see tag content.
pub async fn insert_file<'e, E>(executor: E, record: &FileRecord) -> Result<()>
where
	E: PgExecutor<'e>,
{
	let tags_text = record.tags_text.clone().or_else(|| record.tags.as_ref().map(|t| t.join(" ")));

	sqlx::query(
		"\
INSERT INTO design_files (
	file_id,
	workspace_id,
	team_id,
	file_name,
	name,
	description,
	project,
	tags,
	tags_text,
	url,
	uploaded_at,
	privacy,
	allowed_emails
)
VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13)",
	)
	.bind(record.file_id)
	.bind(record.workspace_id.as_deref())
	.bind(record.team_id.as_deref())
	.bind(record.file_name.as_deref())
	.bind(record.name.as_deref())
	.bind(record.description.as_deref())
	.bind(record.project.as_deref())
	.bind(record.tags.as_deref())
	.bind(tags_text.as_deref())
	.bind(record.url.as_deref())
	.bind(record.uploaded_at)
	.bind(record.privacy.as_deref())
	.bind(record.allowed_emails.as_deref())
	.execute(executor)
	.await?;

	Ok(())
}

/// `%needle%` with LIKE metacharacters escaped.
pub fn contains_pattern(needle: &str) -> String {
	let mut out = String::with_capacity(needle.len() + 2);

	out.push('%');

	for ch in needle.chars() {
		if matches!(ch, '%' | '_' | '\\') {
			out.push('\\');
		}

		out.push(ch);
	}

	out.push('%');

	out
}
