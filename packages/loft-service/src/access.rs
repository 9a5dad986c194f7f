use loft_domain::privacy;
use loft_storage::models::FileRecord;

/// Keeps, in order, the records `requester_email` may view. Records that fail are dropped, not
/// replaced.
pub fn filter_viewable(records: Vec<FileRecord>, requester_email: &str) -> Vec<FileRecord> {
	records.into_iter().filter(|record| record_viewable(record, requester_email)).collect()
}

pub fn record_viewable(record: &FileRecord, requester_email: &str) -> bool {
	privacy::can_view(
		record.privacy.as_deref(),
		record.allowed_emails.as_deref().unwrap_or_default(),
		requester_email,
	)
}
