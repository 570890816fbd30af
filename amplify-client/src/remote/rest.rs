//! REST table client for the hosted data service (PostgREST dialect)

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, StatusCode};

use super::{Filter, RemoteError, RemoteResult, Row, TableClient};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// HTTP client speaking `{base_url}/rest/v1/{table}`
#[derive(Debug, Clone)]
pub struct RestTableClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    token: Option<String>,
}

impl RestTableClient {
    /// Create a new REST client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::Config("base_url must not be empty".into()));
        }
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            token: config.token.clone(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(key) = &self.api_key
            && let Ok(value) = HeaderValue::from_str(key)
        {
            headers.insert("apikey", value);
        }
        let bearer = self.token.as_ref().or(self.api_key.as_ref());
        if let Some(token) = bearer
            && let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}"))
        {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }

    fn request(&self, builder: RequestBuilder, filter: Option<&Filter>) -> RequestBuilder {
        let builder = builder.headers(self.auth_headers());
        match filter {
            Some(f) => builder.query(&f.to_query_pairs()),
            None => builder,
        }
    }

    /// Send and decode; every failure becomes a descriptor
    async fn send(builder: RequestBuilder) -> RemoteResult<Vec<Row>> {
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            tracing::warn!(status = %status, "Data service rejected request");
            return Err(parse_error_body(status, &text));
        }
        parse_rows(&text)
    }
}

fn transport_error(e: reqwest::Error) -> RemoteError {
    let err = RemoteError::new(e.to_string());
    match e.status() {
        Some(status) => err.with_status(status.as_u16()),
        None => err,
    }
}

/// Turn a failed response body into a descriptor
fn parse_error_body(status: StatusCode, body: &str) -> RemoteError {
    if let Ok(descriptor) = serde_json::from_str::<RemoteError>(body) {
        return descriptor.with_status(status.as_u16());
    }
    let message = if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    } else {
        body.trim().to_string()
    };
    RemoteError::new(message).with_status(status.as_u16())
}

/// Successful bodies are a JSON array; `204 No Content` reads as no rows
fn parse_rows(body: &str) -> RemoteResult<Vec<Row>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    match serde_json::from_str::<Row>(body) {
        Ok(Row::Array(rows)) => Ok(rows),
        Ok(single @ Row::Object(_)) => Ok(vec![single]),
        Ok(other) => Err(RemoteError::new(format!("Unexpected response body: {other}"))),
        Err(e) => Err(RemoteError::new(format!("Invalid response body: {e}"))),
    }
}

#[async_trait]
impl TableClient for RestTableClient {
    async fn select(&self, table: &str, filter: Option<&Filter>) -> RemoteResult<Vec<Row>> {
        tracing::debug!(table, "select");
        let builder = self
            .client
            .get(self.table_url(table))
            .query(&[("select", "*")]);
        Self::send(self.request(builder, filter)).await
    }

    async fn insert(&self, table: &str, rows: Vec<Row>) -> RemoteResult<Vec<Row>> {
        tracing::debug!(table, count = rows.len(), "insert");
        let builder = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(&rows);
        Self::send(self.request(builder, None)).await
    }

    async fn update(&self, table: &str, filter: &Filter, patch: Row) -> RemoteResult<Vec<Row>> {
        tracing::debug!(table, "update");
        let builder = self
            .client
            .patch(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(&patch);
        Self::send(self.request(builder, Some(filter))).await
    }

    async fn delete(&self, table: &str, filter: &Filter) -> RemoteResult<Vec<Row>> {
        tracing::debug!(table, "delete");
        let builder = self
            .client
            .delete(self.table_url(table))
            .header("Prefer", "return=representation");
        Self::send(self.request(builder, Some(filter))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_url_trims_trailing_slash() {
        let client = RestTableClient::new(&ClientConfig::new("https://x.supabase.co/")).unwrap();
        assert_eq!(client.base_url(), "https://x.supabase.co");
        assert_eq!(client.table_url("members"), "https://x.supabase.co/rest/v1/members");
    }

    #[test]
    fn test_empty_base_url_rejected() {
        assert!(matches!(
            RestTableClient::new(&ClientConfig::new(" ")),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_auth_headers_prefer_token() {
        let config = ClientConfig::new("http://localhost")
            .with_api_key("anon")
            .with_token("user-jwt");
        let headers = RestTableClient::new(&config).unwrap().auth_headers();
        assert_eq!(headers["apikey"], "anon");
        assert_eq!(headers[AUTHORIZATION], "Bearer user-jwt");

        let config = ClientConfig::new("http://localhost").with_api_key("anon");
        let headers = RestTableClient::new(&config).unwrap().auth_headers();
        assert_eq!(headers[AUTHORIZATION], "Bearer anon");
    }

    #[test]
    fn test_parse_error_body_descriptor() {
        let err = parse_error_body(
            StatusCode::CONFLICT,
            r#"{"code":"23505","details":"Key (id)=(1) already exists.","hint":null,"message":"duplicate key value violates unique constraint \"members_pkey\""}"#,
        );
        assert_eq!(
            err.message,
            "duplicate key value violates unique constraint \"members_pkey\""
        );
        assert_eq!(err.code.as_deref(), Some("23505"));
        assert_eq!(err.status, Some(409));
    }

    #[test]
    fn test_parse_error_body_fallbacks() {
        let err = parse_error_body(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(err.message, "upstream down");
        let err = parse_error_body(StatusCode::SERVICE_UNAVAILABLE, "");
        assert_eq!(err.message, "Service Unavailable");
        assert_eq!(err.status, Some(503));
    }

    #[test]
    fn test_parse_rows() {
        assert_eq!(parse_rows("").unwrap(), Vec::<Row>::new());
        assert_eq!(parse_rows(r#"[{"id":"1"}]"#).unwrap(), vec![json!({ "id": "1" })]);
        assert_eq!(parse_rows(r#"{"id":"1"}"#).unwrap().len(), 1);
        assert!(parse_rows("42").is_err());
        assert!(parse_rows("<html>").is_err());
    }
}
