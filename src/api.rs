//! Client for the remote graph API.

use thiserror::Error;

use crate::components::force_graph::{GraphSnapshot, RawSnapshot};

/// Origin of the backend serving `/api/graph/{domain}`.
pub const API_ORIGIN: &str = "http://localhost:5000";

/// The fixed set of selectable MultiWOZ domains.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Domain {
	All,
	Hotel,
	Restaurant,
	Train,
	Attraction,
	Taxi,
	Hospital,
	Police,
}

impl Domain {
	/// Selector order, `all` first.
	pub const ALL: [Domain; 8] = [
		Domain::All,
		Domain::Hotel,
		Domain::Restaurant,
		Domain::Train,
		Domain::Attraction,
		Domain::Taxi,
		Domain::Hospital,
		Domain::Police,
	];

	/// The path segment used in the API URL.
	pub fn as_str(self) -> &'static str {
		match self {
			Domain::All => "all",
			Domain::Hotel => "hotel",
			Domain::Restaurant => "restaurant",
			Domain::Train => "train",
			Domain::Attraction => "attraction",
			Domain::Taxi => "taxi",
			Domain::Hospital => "hospital",
			Domain::Police => "police",
		}
	}

	/// Human-readable name for the selector.
	pub fn label(self) -> &'static str {
		match self {
			Domain::All => "All domains",
			Domain::Hotel => "Hotel",
			Domain::Restaurant => "Restaurant",
			Domain::Train => "Train",
			Domain::Attraction => "Attraction",
			Domain::Taxi => "Taxi",
			Domain::Hospital => "Hospital",
			Domain::Police => "Police",
		}
	}

	/// Parses a selector value; unknown values fall back to `All`.
	pub fn from_value(value: &str) -> Domain {
		Domain::ALL
			.into_iter()
			.find(|d| d.as_str() == value)
			.unwrap_or(Domain::All)
	}
}

/// Why a fetch produced no usable snapshot. Never fatal: the caller substitutes
/// the fallback dataset and surfaces the message.
#[derive(Debug, Error)]
pub enum ApiError {
	#[error("graph request failed: {0}")]
	Transport(#[from] reqwest::Error),
	#[error("graph API returned HTTP {0}")]
	Status(u16),
	#[error("graph API returned malformed data: {0}")]
	Malformed(#[from] serde_json::Error),
}

/// Fetches and canonicalizes the snapshot for one domain. No retries.
pub async fn fetch_snapshot(domain: Domain) -> Result<GraphSnapshot, ApiError> {
	let url = format!("{API_ORIGIN}/api/graph/{}", domain.as_str());
	let response = reqwest::get(&url).await?;
	if !response.status().is_success() {
		return Err(ApiError::Status(response.status().as_u16()));
	}
	let body = response.text().await?;
	let raw: RawSnapshot = serde_json::from_str(&body)?;
	Ok(raw.canonicalize())
}

/// Monotonic token source guarding against stale responses: a fetch begun for
/// an old domain selection is discarded when a newer fetch has since begun.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestGeneration(u64);

impl RequestGeneration {
	/// Starts a new request generation and returns its token.
	pub fn begin(&mut self) -> u64 {
		self.0 += 1;
		self.0
	}

	/// True while `token` still identifies the most recent request.
	pub fn is_current(self, token: u64) -> bool {
		self.0 == token
	}
}
