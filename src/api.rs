//! Typed client for the git-analysis service.
//!
//! The service owns the actual repository mining; this side only triggers a
//! parse and reads back the three derived datasets for one repository path.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analytics::insights::RunStats;
use crate::analytics::risk::FileMetric;
use crate::analytics::timeline::CommitRecord;
use crate::components::force_graph::GraphData;

const BASE_URL: &str = "http://localhost:8000";

/// Failure talking to the analysis service.
#[derive(Debug, Error)]
pub enum ApiError {
	#[error("analysis service unreachable: {0}")]
	Transport(#[from] reqwest::Error),
	#[error("{0}")]
	Service(String),
}

#[derive(Serialize)]
struct ParseRequest<'a> {
	repo_path: &'a str,
}

#[derive(Deserialize)]
struct ParseResponse {
	stats: RunStats,
}

/// Error body the service returns on non-success statuses.
#[derive(Deserialize)]
struct ServiceDetail {
	detail: String,
}

async fn service_error(response: reqwest::Response) -> ApiError {
	let status = response.status();
	let detail = match response.text().await {
		Ok(body) => serde_json::from_str::<ServiceDetail>(&body)
			.map(|d| d.detail)
			.unwrap_or_else(|_| format!("analysis service returned {status}")),
		Err(_) => format!("analysis service returned {status}"),
	};
	ApiError::Service(detail)
}

async fn get_json<T: for<'de> Deserialize<'de>>(
	path: &str,
	repo_path: &str,
) -> Result<T, ApiError> {
	let response = reqwest::Client::new()
		.get(format!("{BASE_URL}{path}"))
		.query(&[("repo_path", repo_path)])
		.send()
		.await?;
	if !response.status().is_success() {
		return Err(service_error(response).await);
	}
	Ok(response.json().await?)
}

/// Trigger a fresh analysis of `repo_path` and return the run statistics.
pub async fn trigger_parse(repo_path: &str) -> Result<RunStats, ApiError> {
	let response = reqwest::Client::new()
		.post(format!("{BASE_URL}/api/parse"))
		.json(&ParseRequest { repo_path })
		.send()
		.await?;
	if !response.status().is_success() {
		return Err(service_error(response).await);
	}
	let parsed: ParseResponse = response.json().await?;
	Ok(parsed.stats)
}

/// Commit history for a parsed repository.
pub async fn fetch_commits(repo_path: &str) -> Result<Vec<CommitRecord>, ApiError> {
	get_json("/api/commits", repo_path).await
}

/// Per-file change/complexity heatmap for a parsed repository.
pub async fn fetch_heatmap(repo_path: &str) -> Result<Vec<FileMetric>, ApiError> {
	get_json("/api/heatmap", repo_path).await
}

/// Contributor collaboration graph for a parsed repository.
pub async fn fetch_network(repo_path: &str) -> Result<GraphData, ApiError> {
	get_json("/api/network", repo_path).await
}
