//! PostgREST client for the hosted store.

use async_trait::async_trait;
use jobstack::{
    bundles::{Bundle, BundleData, BundleId},
    fields::{BUNDLE_FIELDS, FieldMapping, SERVICE_FIELDS, from_store, to_store},
    services::{Service, ServiceData, ServiceId},
    settings::{SettingsRecord, SiteSettings},
};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::{
    config::StoreConfig,
    gateway::{
        CatalogGateway,
        errors::{GatewayError, StoreErrorBody},
    },
};

const SERVICES: &str = "services";
const BUNDLES: &str = "bundles";
const SETTINGS: &str = "ui_settings";

/// Media type asking PostgREST for a single object instead of an array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// The settings row is always stored under this id.
const SETTINGS_ROW_ID: i64 = 1;

type Row = Map<String, Value>;

/// HTTP client for the store's REST interface.
#[derive(Debug, Clone)]
pub struct PostgrestGateway {
    base_url: String,
    api_key: String,
    http: Client,
}

impl PostgrestGateway {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            base_url: config.store_url.trim_end_matches('/').to_string(),
            api_key: config.store_key.clone(),
            http: Client::new(),
        }
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let url = format!("{}/rest/v1/{table}", self.base_url);

        debug!(%method, %url, "store request");

        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn send(request: RequestBuilder) -> Result<Response, GatewayError> {
        let response = request.send().await?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let body: StoreErrorBody = serde_json::from_str(&text).unwrap_or_default();

        Err(GatewayError::Rejected {
            status,
            code: body.code,
            message: body.message.unwrap_or(text),
        })
    }

    async fn rows(request: RequestBuilder) -> Result<Vec<Row>, GatewayError> {
        let bytes = Self::send(request).await?.bytes().await?;
        let rows: Option<Vec<Row>> = serde_json::from_slice(&bytes)?;

        Ok(rows.unwrap_or_default())
    }

    async fn single<T: DeserializeOwned>(
        request: RequestBuilder,
        table: &[FieldMapping],
    ) -> Result<T, GatewayError> {
        let bytes = Self::send(request.header("Accept", SINGLE_OBJECT))
            .await?
            .bytes()
            .await?;
        let row: Option<Row> = serde_json::from_slice(&bytes)?;

        decode(row.ok_or(GatewayError::Empty)?, table)
    }

    fn returning(request: RequestBuilder) -> RequestBuilder {
        request.header("Prefer", "return=representation")
    }

    fn by_id(request: RequestBuilder, id: i64) -> RequestBuilder {
        request.query(&[("id", format!("eq.{id}"))])
    }
}

fn decode<T: DeserializeOwned>(row: Row, table: &[FieldMapping]) -> Result<T, GatewayError> {
    Ok(serde_json::from_value(Value::Object(from_store(
        row, table,
    )))?)
}

fn encode<T: Serialize>(payload: &T, table: &[FieldMapping]) -> Result<Row, GatewayError> {
    match serde_json::to_value(payload)? {
        Value::Object(map) => Ok(to_store(map, table)),
        _ => Ok(Row::new()),
    }
}

#[async_trait]
impl CatalogGateway for PostgrestGateway {
    async fn list_services(&self) -> Result<Vec<Service>, GatewayError> {
        let request = self
            .request(Method::GET, SERVICES)
            .query(&[("select", "*"), ("order", "sort_order.asc,id.asc")]);

        Self::rows(request)
            .await?
            .into_iter()
            .map(|row| decode(row, SERVICE_FIELDS))
            .collect()
    }

    async fn insert_service(
        &self,
        sort_order: i64,
        service: ServiceData,
    ) -> Result<Service, GatewayError> {
        let mut payload = encode(&service, SERVICE_FIELDS)?;
        payload.insert("sort_order".to_string(), Value::from(sort_order));

        let request = Self::returning(self.request(Method::POST, SERVICES)).json(&payload);

        Self::single(request, SERVICE_FIELDS).await
    }

    async fn update_service(
        &self,
        id: ServiceId,
        service: ServiceData,
    ) -> Result<Service, GatewayError> {
        let payload = encode(&service, SERVICE_FIELDS)?;

        let request = Self::by_id(
            Self::returning(self.request(Method::PATCH, SERVICES)),
            id.into_i64(),
        )
        .json(&payload);

        Self::single(request, SERVICE_FIELDS).await
    }

    async fn delete_service(&self, id: ServiceId) -> Result<(), GatewayError> {
        Self::send(Self::by_id(
            self.request(Method::DELETE, SERVICES),
            id.into_i64(),
        ))
        .await?;

        Ok(())
    }

    async fn reorder_services(&self, order: Vec<(ServiceId, i64)>) -> Result<(), GatewayError> {
        let updates: Vec<Value> = order
            .into_iter()
            .map(|(id, sort_order)| json!({ "id": id, "sort_order": sort_order }))
            .collect();

        let request = self
            .request(Method::POST, SERVICES)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&updates);

        Self::send(request).await?;

        Ok(())
    }

    async fn list_bundles(&self) -> Result<Vec<Bundle>, GatewayError> {
        let request = self
            .request(Method::GET, BUNDLES)
            .query(&[("select", "*"), ("order", "id.asc")]);

        Self::rows(request)
            .await?
            .into_iter()
            .map(|row| decode(row, BUNDLE_FIELDS))
            .collect()
    }

    async fn insert_bundle(&self, bundle: BundleData) -> Result<Bundle, GatewayError> {
        let payload = encode(&bundle, BUNDLE_FIELDS)?;

        let request = Self::returning(self.request(Method::POST, BUNDLES)).json(&payload);

        Self::single(request, BUNDLE_FIELDS).await
    }

    async fn update_bundle(
        &self,
        id: BundleId,
        bundle: BundleData,
    ) -> Result<Bundle, GatewayError> {
        let payload = encode(&bundle, BUNDLE_FIELDS)?;

        let request = Self::by_id(
            Self::returning(self.request(Method::PATCH, BUNDLES)),
            id.into_i64(),
        )
        .json(&payload);

        Self::single(request, BUNDLE_FIELDS).await
    }

    async fn delete_bundle(&self, id: BundleId) -> Result<(), GatewayError> {
        Self::send(Self::by_id(
            self.request(Method::DELETE, BUNDLES),
            id.into_i64(),
        ))
        .await?;

        Ok(())
    }

    async fn fetch_settings(&self) -> Result<Option<SettingsRecord>, GatewayError> {
        let request = self
            .request(Method::GET, SETTINGS)
            .query(&[("select", "*"), ("limit", "1")]);

        match Self::single::<Row>(request, &[]).await {
            Ok(row) => Ok(Some(SettingsRecord::new(row))),
            Err(error) if error.is_no_rows() => Ok(None),
            Err(error) => Err(error),
        }
    }

    async fn save_settings(&self, settings: SiteSettings) -> Result<(), GatewayError> {
        let mut row = settings.to_store_row()?;
        row.insert("id".to_string(), Value::from(SETTINGS_ROW_ID));

        let request = self
            .request(Method::POST, SETTINGS)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&row);

        Self::send(request).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jobstack::defaults::Defaults;
    use rust_decimal::Decimal;
    use testresult::TestResult;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, headers, method, path, query_param},
    };

    use super::*;

    fn gateway(server: &MockServer) -> PostgrestGateway {
        PostgrestGateway::new(&StoreConfig {
            store_url: format!("{}/", server.uri()),
            store_key: "anon-key".to_string(),
        })
    }

    #[tokio::test]
    async fn list_services_maps_store_columns() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/services"))
            .and(query_param("order", "sort_order.asc,id.asc"))
            .and(header("apikey", "anon-key"))
            .and(header("authorization", "Bearer anon-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": 7,
                    "name": "Configure Your ICP",
                    "price": 1100,
                    "sort_order": 0,
                    "color_theme": "accent",
                    "pricing_model": "hybrid",
                    "monthly_price": 300,
                    "youtube_video_id": null,
                    "created_at": "2025-01-01T00:00:00Z",
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let services = gateway(&server).list_services().await?;
        let icp = services.first().ok_or("no services")?;

        assert_eq!(icp.id, ServiceId::new(7));
        assert_eq!(icp.data.color_theme, "accent");
        assert_eq!(icp.data.monthly_price, Some(Decimal::from(300)));
        assert_eq!(icp.price_label(), "$1100 + $300/mo");

        Ok(())
    }

    #[tokio::test]
    async fn null_collections_are_empty() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/bundles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
            .mount(&server)
            .await;

        assert!(gateway(&server).list_bundles().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn non_array_collections_are_decode_errors() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/services"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1 })))
            .mount(&server)
            .await;

        let result = gateway(&server).list_services().await;

        assert!(
            matches!(result, Err(GatewayError::Json(_))),
            "expected Json, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn insert_service_sends_store_names_and_returns_the_stored_row() -> TestResult {
        let server = MockServer::start().await;
        let data = ServiceData::new("HubSpot Audit", Decimal::from(500));

        let mut expected = encode(&data, SERVICE_FIELDS)?;
        expected.insert("sort_order".to_string(), json!(4));

        Mock::given(method("POST"))
            .and(path("/rest/v1/services"))
            .and(header("prefer", "return=representation"))
            .and(header("accept", SINGLE_OBJECT))
            .and(body_json(&expected))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 31,
                "name": "HubSpot Audit",
                "price": 500,
                "sort_order": 4,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let stored = gateway(&server).insert_service(4, data).await?;

        assert_eq!(stored.id, ServiceId::new(31));
        assert_eq!(stored.sort_order, 4);
        assert!(expected.contains_key("color_theme"));
        assert!(!expected.contains_key("colorTheme"));

        Ok(())
    }

    #[tokio::test]
    async fn delete_filters_by_id() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/rest/v1/bundles"))
            .and(query_param("id", "eq.2"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        gateway(&server).delete_bundle(BundleId::new(2)).await?;

        Ok(())
    }

    #[tokio::test]
    async fn reorder_upserts_every_position() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/services"))
            .and(headers(
                "prefer",
                vec!["resolution=merge-duplicates", "return=minimal"],
            ))
            .and(body_json(json!([
                { "id": 3, "sort_order": 0 },
                { "id": 1, "sort_order": 1 },
            ])))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        gateway(&server)
            .reorder_services(vec![(ServiceId::new(3), 0), (ServiceId::new(1), 1)])
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn missing_settings_row_is_none() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/ui_settings"))
            .respond_with(ResponseTemplate::new(406).set_body_json(json!({
                "code": "PGRST116",
                "details": "The result contains 0 rows",
                "hint": null,
                "message": "JSON object requested, multiple (or no) rows returned",
            })))
            .mount(&server)
            .await;

        assert!(gateway(&server).fetch_settings().await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn other_store_errors_are_rejections() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/ui_settings"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "code": "42501",
                "message": "permission denied for table ui_settings",
            })))
            .mount(&server)
            .await;

        let result = gateway(&server).fetch_settings().await;

        assert!(
            matches!(
                &result,
                Err(GatewayError::Rejected { status: 401, message, .. })
                    if message.contains("permission denied")
            ),
            "expected Rejected, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn save_settings_upserts_row_one_with_store_names() -> TestResult {
        let server = MockServer::start().await;
        let settings = Defaults::builtin()?.settings;

        let mut expected = settings.to_store_row()?;
        expected.insert("id".to_string(), json!(1));

        Mock::given(method("POST"))
            .and(path("/rest/v1/ui_settings"))
            .and(headers(
                "prefer",
                vec!["resolution=merge-duplicates", "return=minimal"],
            ))
            .and(body_json(&expected))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        gateway(&server).save_settings(settings).await?;

        Ok(())
    }
}
