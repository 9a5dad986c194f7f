use reqwest::header::{AUTHORIZATION, HeaderName};
use serde_json::{Map, Value};

use loft_providers::Error;

#[test]
fn builds_bearer_auth_header() {
	let headers =
		loft_providers::auth_headers("secret", &Map::new()).expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");

	assert_eq!(value, "Bearer secret");
}

#[test]
fn merges_default_headers() {
	let mut defaults = Map::new();

	defaults.insert("X-Client".to_string(), Value::String("loft".to_string()));

	let headers = loft_providers::auth_headers("secret", &defaults).expect("Failed to build headers.");
	let value =
		headers.get(HeaderName::from_static("x-client")).expect("Missing default header.");

	assert_eq!(value, "loft");
}

#[test]
fn rejects_non_string_default_headers() {
	let mut defaults = Map::new();

	defaults.insert("X-Retries".to_string(), Value::from(3));

	let err = loft_providers::auth_headers("secret", &defaults).expect_err("Expected error.");

	assert!(matches!(err, Error::InvalidConfig { .. }), "Unexpected error: {err:?}");
	assert!(!err.is_malformed_response());
}
