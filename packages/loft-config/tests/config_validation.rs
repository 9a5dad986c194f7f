use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use loft_config::{Config, Error};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_value() -> Value {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.")
}

fn with_table<F>(path: &[&str], f: F) -> String
where
	F: FnOnce(&mut toml::Table),
{
	let mut value = sample_value();
	let mut table = value.as_table_mut().expect("Template config must be a table.");

	for key in path {
		table = table
			.get_mut(*key)
			.and_then(Value::as_table_mut)
			.unwrap_or_else(|| panic!("Template config must include [{key}]."));
	}

	f(table);

	toml::to_string(&value).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("loft_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> loft_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = loft_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn expect_validation(payload: String, expected: &str) {
	let err = load_payload(payload).expect_err("Expected validation error.");

	assert!(matches!(err, Error::Validation { .. }), "Unexpected error kind: {err:?}");
	assert!(err.to_string().contains(expected), "Unexpected error message: {err}");
}

#[test]
fn sample_config_is_valid() {
	let cfg = load_payload(SAMPLE_CONFIG_TEMPLATE_TOML.to_string())
		.expect("Sample config must be valid.");
	let reasoning = cfg.providers.reasoning.expect("Reasoning provider must be configured.");

	assert_eq!(cfg.search.working_set_limit, 200);
	assert_eq!(reasoning.model, "gpt-4o-mini");
	assert_eq!(reasoning.default_headers.get("X-Client").and_then(|v| v.as_str()), Some("loft"));
}

#[test]
fn missing_config_file_reports_path() {
	let mut path = env::temp_dir();

	path.push("loft_config_test_does_not_exist.toml");

	let err = loft_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error kind: {err:?}");
}

#[test]
fn malformed_toml_reports_parse_error_with_path() {
	let path = write_temp_config("[service\nhttp_bind = ".to_string());
	let result = loft_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	match result {
		Err(Error::ParseConfig { path: reported, .. }) => assert_eq!(reported, path),
		other => panic!("Expected parse error, got {other:?}."),
	}
}

#[test]
fn working_set_limit_must_be_positive() {
	let payload = with_table(&["search"], |search| {
		search.insert("working_set_limit".to_string(), Value::Integer(0));
	});

	expect_validation(payload, "search.working_set_limit must be greater than zero.");
}

#[test]
fn default_limit_cannot_exceed_max_limit() {
	let payload = with_table(&["search"], |search| {
		search.insert("default_limit".to_string(), Value::Integer(60));
	});

	expect_validation(
		payload,
		"search.default_limit must be less than or equal to search.max_limit.",
	);
}

#[test]
fn rerank_max_candidates_must_be_positive() {
	let payload = with_table(&["search", "rerank"], |rerank| {
		rerank.insert("max_candidates".to_string(), Value::Integer(0));
	});

	expect_validation(payload, "search.rerank.max_candidates must be greater than zero.");
}

#[test]
fn pool_size_must_be_positive() {
	let payload = with_table(&["storage", "postgres"], |postgres| {
		postgres.insert("pool_max_conns".to_string(), Value::Integer(0));
	});

	expect_validation(payload, "storage.postgres.pool_max_conns must be greater than zero.");
}

#[test]
fn reasoning_temperature_must_be_in_range() {
	let payload = with_table(&["providers", "reasoning"], |reasoning| {
		reasoning.insert("temperature".to_string(), Value::Float(3.5));
	});

	expect_validation(payload, "providers.reasoning.temperature must be in the range 0.0-2.0.");
}

#[test]
fn reasoning_header_values_must_be_strings() {
	let payload = with_table(&["providers", "reasoning", "default_headers"], |headers| {
		headers.insert("X-Retries".to_string(), Value::Integer(3));
	});

	expect_validation(payload, "providers.reasoning.default_headers values must be strings.");
}

#[test]
fn blank_reasoning_key_is_not_a_validation_error() {
	let payload = with_table(&["providers", "reasoning"], |reasoning| {
		reasoning.insert("api_key".to_string(), Value::String(String::new()));
		reasoning.insert("model".to_string(), Value::String(String::new()));
	});
	let cfg = load_payload(payload).expect("Blank key must disable the provider.");

	assert!(cfg.providers.reasoning.is_none());
}

#[test]
fn missing_reasoning_section_disables_rerank() {
	let mut value = sample_value();

	value.as_table_mut().expect("Template config must be a table.").remove("providers");

	let payload = toml::to_string(&value).expect("Failed to render template config.");
	let cfg = load_payload(payload).expect("Config without providers must be valid.");

	assert!(cfg.providers.reasoning.is_none());
}
