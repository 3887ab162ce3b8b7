// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

use gridsink_core::Error;
use serde::Deserialize;

/// Connection settings for the backing store.
///
/// Consumed by whichever collaborator constructs the engine handle; the
/// ingest pipeline itself only ever sees the finished [`StoreEngine`].
///
/// [`StoreEngine`]: gridsink_core::StoreEngine
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoreConfig {
	pub discovery: Discovery,
	/// Cache backing the SQL tables.
	#[serde(default = "default_cache_name")]
	pub cache_name: String,
	/// SQL schema the tables live in.
	#[serde(default = "default_schema_name")]
	pub schema_name: String,
	/// JDBC-style connection string, overrides discovery when set.
	#[serde(default)]
	pub data_source: Option<String>,
}

/// How the store's cluster membership is discovered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum Discovery {
	/// Fixed address list.
	Broadcast { addresses: Vec<String> },
	/// Orchestrator lookup by namespace and service name.
	OrchestratorDiscovery {
		#[serde(default = "default_namespace")]
		namespace: String,
		#[serde(default = "default_service")]
		service: String,
	},
}

impl StoreConfig {
	pub fn from_json(payload: &str) -> crate::Result<Self> {
		serde_json::from_str(payload).map_err(|source| Error::Parse {
			reason: format!("invalid store config: {source}"),
		})
	}
}

fn default_cache_name() -> String {
	"dummy_cache".to_string()
}

fn default_schema_name() -> String {
	"PUBLIC".to_string()
}

fn default_namespace() -> String {
	"yms-example".to_string()
}

fn default_service() -> String {
	"apache-ignite".to_string()
}

/// Deadlines applied to store interactions.
///
/// `statement` bounds a single statement execution or session open,
/// `batch` bounds one whole row batch. A batch that trips either deadline
/// is aborted; rows already applied stay committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
	pub statement: Duration,
	pub batch: Duration,
}

impl Default for Timeouts {
	fn default() -> Self {
		Self {
			statement: Duration::from_secs(30),
			batch: Duration::from_secs(300),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_broadcast_config() {
		let config = StoreConfig::from_json(
			r#"{
				"discovery": {"mode": "broadcast", "addresses": ["10.0.0.1:47500", "10.0.0.2:47500"]},
				"cache_name": "ingest_cache",
				"schema_name": "INGEST",
				"data_source": "jdbc:ignite:thin://10.0.0.1"
			}"#,
		)
		.unwrap();

		assert_eq!(
			config.discovery,
			Discovery::Broadcast {
				addresses: vec!["10.0.0.1:47500".to_string(), "10.0.0.2:47500".to_string()],
			}
		);
		assert_eq!(config.cache_name, "ingest_cache");
		assert_eq!(config.schema_name, "INGEST");
		assert_eq!(config.data_source.as_deref(), Some("jdbc:ignite:thin://10.0.0.1"));
	}

	#[test]
	fn test_orchestrator_discovery_defaults() {
		let config = StoreConfig::from_json(r#"{"discovery": {"mode": "orchestrator-discovery"}}"#).unwrap();

		assert_eq!(
			config.discovery,
			Discovery::OrchestratorDiscovery {
				namespace: "yms-example".to_string(),
				service: "apache-ignite".to_string(),
			}
		);
		assert_eq!(config.cache_name, "dummy_cache");
		assert_eq!(config.schema_name, "PUBLIC");
		assert_eq!(config.data_source, None);
	}

	#[test]
	fn test_unknown_discovery_mode_rejected() {
		let err = StoreConfig::from_json(r#"{"discovery": {"mode": "gossip"}}"#).unwrap_err();
		assert!(err.to_string().starts_with("malformed payload"));
	}

	#[test]
	fn test_default_timeouts() {
		let timeouts = Timeouts::default();
		assert_eq!(timeouts.statement, Duration::from_secs(30));
		assert_eq!(timeouts.batch, Duration::from_secs(300));
	}
}
