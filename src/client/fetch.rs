//! Shared fetch pipeline: URL assembly, paced request, decode, and cache population.

// self
use crate::{
	_prelude::*,
	cache::CacheKey,
	client::Gateway,
	error::{DecodeError, TransportError},
	http::{ApiHttpClient, ApiResponse},
	model::{ApiRecord, Resource},
	obs::{self, QueryKind, QueryOutcome},
	store::RecordBatch,
};

impl<C> Gateway<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Builds `{base_url}/{resource}?{params}`; parameters keep their order.
	pub fn request_url(
		&self,
		resource: Resource,
		params: &[(&'static str, String)],
	) -> Result<Url, TransportError> {
		let mut url = self.config.base_url.clone();

		url.path_segments_mut()
			.map_err(|_| TransportError::Url { base: self.config.base_url.to_string() })?
			.pop_if_empty()
			.push(resource.path());

		if !params.is_empty() {
			let mut pairs = url.query_pairs_mut();

			for (name, value) in params {
				pairs.append_pair(name, value);
			}
		}

		Ok(url)
	}

	/// Fetches and decodes one record list through the throttle, bypassing the cache.
	pub async fn fetch_records<R>(&self, params: &[(&'static str, String)]) -> Result<Vec<R>>
	where
		R: ApiRecord,
	{
		let url = self.request_url(R::RESOURCE, params)?;

		self.stats.record_fetch();

		let response = self.throttle.send(self.http_client.as_ref(), &url).await?;

		decode(&response)
	}

	/// Serves `key` from cache unless `force` is set, otherwise awaits `fetch`, persists the
	/// batch, and stores it.
	///
	/// `fetch` is only polled on a miss. A failed fetch or persist leaves the cache untouched.
	pub(crate) async fn cached<R, F>(
		&self,
		kind: QueryKind,
		key: CacheKey,
		force: bool,
		fetch: F,
	) -> Result<Vec<R>>
	where
		R: ApiRecord,
		F: Future<Output = Result<Vec<R>>>,
	{
		if !force {
			let hit = self.cache.get(&key).as_ref().and_then(R::from_cached);

			self.stats.record_lookup(hit.is_some());

			if let Some(records) = hit {
				obs::record_query_outcome(kind, QueryOutcome::CacheHit);

				return Ok(records);
			}
		}

		let records = fetch.await?;
		let cached = R::into_cached(records.clone());

		if let Some(sink) = &self.sink {
			sink.persist(RecordBatch::new(key.clone(), cached.clone())).await?;
		}

		self.cache.insert(key, cached);

		Ok(records)
	}

	/// Runs `fut` inside a query span and records attempt/success/failure outcomes.
	pub(crate) async fn observe<T, F>(&self, kind: QueryKind, stage: &'static str, fut: F) -> Result<T>
	where
		F: Future<Output = Result<T>>,
	{
		obs::record_query_outcome(kind, QueryOutcome::Attempt);

		let result = obs::in_query_span(kind, stage, fut).await;

		match &result {
			Ok(_) => obs::record_query_outcome(kind, QueryOutcome::Success),
			Err(_) => obs::record_query_outcome(kind, QueryOutcome::Failure),
		}

		result
	}
}

fn decode<R>(response: &ApiResponse) -> Result<Vec<R>>
where
	R: ApiRecord,
{
	let deserializer = &mut serde_json::Deserializer::from_slice(&response.body);

	serde_path_to_error::deserialize(deserializer)
		.map_err(|err| DecodeError::new(R::RESOURCE, response.meta.status, err).into())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::{ScriptedReply, scripted_config, scripted_gateway},
		http::ResponseMetadata,
		model::{Driver, Team},
	};

	#[test]
	fn request_url_appends_resource_and_present_params() {
		let (gateway, _) = scripted_gateway(scripted_config());
		let url = gateway
			.request_url(Resource::Drivers, &[
				("session_key", "9158".into()),
				("team_name", "Red Bull Racing".into()),
			])
			.expect("Drivers URL should build.");

		assert_eq!(
			url.as_str(),
			"https://openf1.test/v1/drivers?session_key=9158&team_name=Red+Bull+Racing"
		);

		let url = gateway.request_url(Resource::Sessions, &[]).expect("Sessions URL should build.");

		assert_eq!(url.as_str(), "https://openf1.test/v1/sessions");
	}

	#[test]
	fn request_url_tolerates_trailing_slash_in_base() {
		let config = crate::config::GatewayConfig::builder()
			.base_url(Url::parse("https://openf1.test/v1/").expect("Fixture URL should parse."))
			.build()
			.expect("Config fixture should build.");
		let (gateway, _) = scripted_gateway(config);
		let url = gateway.request_url(Resource::RaceResults, &[("race_id", "42".into())]);

		assert_eq!(
			url.expect("Race results URL should build.").as_str(),
			"https://openf1.test/v1/race_results?race_id=42"
		);
	}

	#[test]
	fn decode_reports_resource_status_and_path() {
		let response = ApiResponse {
			meta: ResponseMetadata { status: 200, retry_after: None },
			body: br#"[{"id": 1, "name": "Ferrari"}, {"id": "two", "name": "Mercedes"}]"#.to_vec(),
		};
		let err = decode::<Team>(&response).expect_err("String id should fail to decode.");

		match err {
			Error::Decode(DecodeError { resource, status, path, .. }) => {
				assert_eq!(resource, Resource::Teams);
				assert_eq!(status, 200);
				assert_eq!(path, "[1].id");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn decode_keeps_upstream_status_for_error_bodies() {
		let response = ApiResponse {
			meta: ResponseMetadata { status: 503, retry_after: None },
			body: b"{\"detail\":\"maintenance\"}".to_vec(),
		};
		let err = decode::<Driver>(&response).expect_err("Object body should fail to decode.");

		assert!(matches!(err, Error::Decode(DecodeError { status: 503, .. })));
	}

	#[tokio::test(start_paused = true)]
	async fn failed_persist_leaves_cache_empty() {
		use crate::store::{RecordSink, StoreError, StoreFuture};

		struct FailingSink;
		impl RecordSink for FailingSink {
			fn persist(&self, _batch: RecordBatch) -> StoreFuture<'_, ()> {
				Box::pin(async {
					Err(StoreError::Backend { message: "disk full".into() })
				})
			}
		}

		let (gateway, http_client) = scripted_gateway(scripted_config());
		let gateway = gateway.with_sink(Arc::new(FailingSink));

		http_client.always("/v1/circuits", ScriptedReply::ok("[]"));

		let err = gateway
			.circuits(Default::default())
			.await
			.expect_err("Sink failures should surface to the caller.");

		assert!(matches!(err, Error::Storage(_)));
		assert!(gateway.cache.is_empty());
	}
}
