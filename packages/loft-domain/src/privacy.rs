use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Privacy {
	/// Visible to anyone who can reach the workspace.
	Public,
	/// Visible to every member of the owning company.
	Company,
	/// Visible only to the emails on the record's allow-list.
	Restricted,
}
impl Privacy {
	/// Classifies a stored privacy label. Blank labels are unclassified; any label other than
	/// `public` or `company` is restricted.
	pub fn classify(raw: Option<&str>) -> Option<Self> {
		let label = raw.map(str::trim).filter(|label| !label.is_empty())?;

		if label.eq_ignore_ascii_case("public") {
			return Some(Self::Public);
		}
		if label.eq_ignore_ascii_case("company") {
			return Some(Self::Company);
		}

		Some(Self::Restricted)
	}
}

pub fn can_view(privacy: Option<&str>, allowed_emails: &[String], requester_email: &str) -> bool {
	match Privacy::classify(privacy) {
		None | Some(Privacy::Public) | Some(Privacy::Company) => true,
		Some(Privacy::Restricted) => email_allowed(allowed_emails, requester_email),
	}
}

fn email_allowed(allowed_emails: &[String], requester_email: &str) -> bool {
	let requester = requester_email.trim();

	if requester.is_empty() {
		return false;
	}

	let requester = requester.to_lowercase();

	allowed_emails.iter().any(|email| email.trim().to_lowercase() == requester)
}
