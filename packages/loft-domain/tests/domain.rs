use loft_domain::{
	privacy::{self, Privacy},
	query,
};

#[test]
fn stopword_only_queries_fall_back_to_every_word() {
	for raw in ["the and with", "is it ok", "a b c"] {
		let expected: Vec<String> = raw.split_whitespace().map(str::to_string).collect();

		assert_eq!(query::tokenize(raw), expected, "query {raw:?}");
	}
}

#[test]
fn tokens_only_empty_without_alphanumerics() {
	assert!(query::tokenize("?!").is_empty());
	assert!(!query::tokenize("?! x").is_empty());
}

#[test]
fn tokenize_is_deterministic() {
	let raw = "Brand refresh: Hero banners & social icons (Q3)";

	assert_eq!(query::tokenize(raw), query::tokenize(raw));
	assert_eq!(query::tokenize(raw), vec!["brand", "refresh", "hero", "banner", "social", "icon"]);
}

#[test]
fn primary_token_of_tokenized_query() {
	let tokens = query::tokenize("orca dashboard mockup");

	assert_eq!(query::primary_token(&tokens), Some("dashboard"));
}

#[test]
fn public_company_and_unclassified_are_always_visible() {
	for label in [None, Some("public"), Some("company"), Some("")] {
		assert!(privacy::can_view(label, &[], ""), "label {label:?}");
	}
}

#[test]
fn privacy_serializes_as_snake_case() {
	let json = serde_json::to_string(&Privacy::Restricted).expect("Failed to serialize.");

	assert_eq!(json, "\"restricted\"");
}
