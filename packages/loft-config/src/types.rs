use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub providers: Providers,
	pub search: Search,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct Providers {
	/// Optional. When absent, or when its api_key is blank, results keep the heuristic order.
	pub reasoning: Option<LlmProviderConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	#[serde(default)]
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	/// Row cap applied to every candidate tier.
	#[serde(default = "default_working_set_limit")]
	pub working_set_limit: u32,
	#[serde(default = "default_limit")]
	pub default_limit: u32,
	#[serde(default = "default_max_limit")]
	pub max_limit: u32,
	#[serde(default)]
	pub rerank: SearchRerank,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchRerank {
	pub max_candidates: u32,
}
impl Default for SearchRerank {
	fn default() -> Self {
		Self { max_candidates: 20 }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_working_set_limit() -> u32 {
	200
}

fn default_limit() -> u32 {
	5
}

fn default_max_limit() -> u32 {
	50
}
