//! Google Sheets HTTP client
//!
//! Implements the append capability against the real Google APIs: a signed
//! RS256 JWT assertion is exchanged at the token endpoint for a bearer
//! token, then rows are appended through the `values:append` endpoint with
//! `valueInputOption=RAW`.

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{AccessToken, AppendOutcome, ServiceAccountKey, SheetsClient, SPREADSHEETS_SCOPE};
use crate::error::{BridgeError, Result};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_TTL_SECS: i64 = 3600;

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct AppendResponse {
    #[serde(default)]
    updates: Option<UpdateSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateSummary {
    updated_rows: Option<u64>,
}

/// Sheets client backed by the real Google endpoints
pub struct GoogleSheetsClient {
    client: reqwest::Client,
    api_base: String,
}

impl GoogleSheetsClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: SHEETS_API_BASE.to_string(),
        }
    }

    /// Point the client at a different API base URL
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
        }
    }

    fn signed_assertion(&self, key: &ServiceAccountKey) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: &key.client_email,
            scope: SPREADSHEETS_SCOPE,
            aud: &key.token_uri,
            iat: now,
            exp: now + ASSERTION_TTL_SECS,
        };

        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| BridgeError::Credential(format!("invalid private key: {e}")))?;

        encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| BridgeError::Credential(format!("failed to sign assertion: {e}")))
    }
}

impl Default for GoogleSheetsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SheetsClient for GoogleSheetsClient {
    async fn authenticate(&self, key: &ServiceAccountKey) -> Result<AccessToken> {
        let assertion = self.signed_assertion(key)?;

        let response = self
            .client
            .post(&key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", &assertion)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BridgeError::Credential(format!(
                "token exchange failed ({status}): {body}"
            )));
        }

        let token: TokenResponse = response.json().await?;
        Ok(AccessToken(token.access_token))
    }

    async fn append_rows(
        &self,
        token: &AccessToken,
        spreadsheet_id: &str,
        range: &str,
        rows: &[Value],
    ) -> Result<AppendOutcome> {
        let url = format!("{}/{}/values/{}:append", self.api_base, spreadsheet_id, range);

        let response = self
            .client
            .post(&url)
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(&token.0)
            .json(&json!({ "values": rows }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BridgeError::Sheets(format!(
                "append failed ({status}): {body}"
            )));
        }

        let parsed: AppendResponse = response.json().await?;
        Ok(AppendOutcome {
            updated_rows: parsed.updates.and_then(|u| u.updated_rows),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_response_reads_updated_rows() {
        let parsed: AppendResponse = serde_json::from_str(
            r#"{"spreadsheetId":"abc","updates":{"updatedRange":"Sheet1!A1:B3","updatedRows":3,"updatedCells":6}}"#,
        )
        .unwrap();
        assert_eq!(parsed.updates.unwrap().updated_rows, Some(3));
    }

    #[test]
    fn test_append_response_tolerates_missing_updates() {
        let parsed: AppendResponse = serde_json::from_str(r#"{"spreadsheetId":"abc"}"#).unwrap();
        assert!(parsed.updates.is_none());
    }

    #[test]
    fn test_unparseable_private_key_is_credential_error() {
        let client = GoogleSheetsClient::new();
        let key = ServiceAccountKey {
            client_email: "svc@project.iam.gserviceaccount.com".to_string(),
            private_key: "not a pem".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
        };
        let err = client.signed_assertion(&key).unwrap_err();
        assert!(matches!(err, BridgeError::Credential(_)));
    }
}
