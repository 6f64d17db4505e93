//! Blocking HTTP implementation of [`RemoteStore`].
//!
//! Endpoint shapes:
//!
//! ```text
//! GET  {api}/languages/{project}                       → language list
//! GET  {api}/download/{project}/{version}              → blob listing
//! GET  {api}/{project}/{version}/[private/]{lng}/{ns}  → namespace content
//! POST {api}/update/{project}/{version}/{lng}/{ns}     → key mutations
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::LAST_MODIFIED;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use loctree_core::{BlobDescriptor, LanguageCode, NamespaceContent, NamespaceName};

use crate::error::RemoteError;
use crate::store::{parse_blob_key, RemoteStore, UpdatePayload};

/// Client-level request timeout. The engine itself has no per-stage timeout;
/// the transport boundary owns this policy so a hung request cannot hang a
/// run forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTP client for one project/version of the remote store.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    http: Client,
    api_path: String,
    project_id: String,
    version: String,
    api_key: Option<String>,
}

impl HttpRemote {
    pub fn new(
        api_path: impl Into<String>,
        project_id: impl Into<String>,
        version: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, RemoteError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let mut api_path = api_path.into();
        while api_path.ends_with('/') {
            api_path.pop();
        }
        Ok(Self {
            http,
            api_path,
            project_id: project_id.into(),
            version: version.into(),
            api_key,
        })
    }

    fn languages_url(&self) -> String {
        format!("{}/languages/{}", self.api_path, self.project_id)
    }

    fn download_url(&self) -> String {
        format!("{}/download/{}/{}", self.api_path, self.project_id, self.version)
    }

    fn namespace_url(
        &self,
        language: &LanguageCode,
        namespace: &NamespaceName,
        is_private: bool,
    ) -> String {
        if is_private {
            format!(
                "{}/private/{}/{}/{}/{}",
                self.api_path, self.project_id, self.version, language, namespace
            )
        } else {
            format!(
                "{}/{}/{}/{}/{}",
                self.api_path, self.project_id, self.version, language, namespace
            )
        }
    }

    fn update_url(&self, language: &LanguageCode, namespace: &NamespaceName) -> String {
        format!(
            "{}/update/{}/{}/{}/{}",
            self.api_path, self.project_id, self.version, language, namespace
        )
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header("Authorization", key),
            None => builder,
        }
    }

    /// Read a JSON body, surfacing API error payloads and non-success
    /// statuses in that order (an error payload is the better diagnostic).
    fn read_json(url: &str, response: Response) -> Result<Value, RemoteError> {
        let status = response.status();
        let text = response.text()?;
        let value: Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(err) => {
                if !status.is_success() {
                    return Err(status_error(status, url));
                }
                return Err(RemoteError::Malformed(err));
            }
        };
        if let Some(message) = api_error_message(&value) {
            return Err(RemoteError::Api { message });
        }
        if !status.is_success() {
            return Err(status_error(status, url));
        }
        Ok(value)
    }
}

fn status_error(status: StatusCode, url: &str) -> RemoteError {
    RemoteError::Status {
        status: status.as_u16(),
        url: url.to_owned(),
    }
}

/// API-reported error payloads carry `errorMessage` or `message`.
fn api_error_message(value: &Value) -> Option<String> {
    value
        .get("errorMessage")
        .or_else(|| value.get("message"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

fn parse_http_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|t| t.with_timezone(&Utc))
        .ok()
}

/// Wire shape of one entry in the blob listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBlob {
    key: String,
    #[serde(default)]
    last_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    url: String,
    #[serde(default)]
    is_private: bool,
}

impl RemoteStore for HttpRemote {
    fn list_languages(&self) -> Result<Vec<LanguageCode>, RemoteError> {
        let url = self.languages_url();
        let response = self.authorized(self.http.get(&url)).send()?;
        let value = Self::read_json(&url, response)?;

        // The endpoint answers either a plain array of codes or an object
        // keyed by code.
        let mut languages: Vec<LanguageCode> = match value {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| item.as_str().map(LanguageCode::from))
                .collect(),
            other => serde_json::from_value::<BTreeMap<String, Value>>(other)
                .map_err(RemoteError::Malformed)?
                .into_keys()
                .map(LanguageCode::from)
                .collect(),
        };
        languages.sort();
        Ok(languages)
    }

    fn list_blobs(&self) -> Result<Vec<BlobDescriptor>, RemoteError> {
        let url = self.download_url();
        let response = self.authorized(self.http.get(&url)).send()?;
        let value = Self::read_json(&url, response)?;
        let raws: Vec<RawBlob> = serde_json::from_value(value)?;

        let mut blobs = Vec::with_capacity(raws.len());
        for raw in raws {
            let Some((language, namespace)) = parse_blob_key(&raw.key, raw.is_private) else {
                log::warn!("skipping blob with unparseable key {:?}", raw.key);
                continue;
            };
            blobs.push(BlobDescriptor {
                language,
                namespace,
                last_modified: raw.last_modified,
                size: raw.size,
                url: raw.url,
                is_private: raw.is_private,
            });
        }
        Ok(blobs)
    }

    fn fetch_namespace(
        &self,
        language: &LanguageCode,
        namespace: &NamespaceName,
        is_private: bool,
    ) -> Result<(NamespaceContent, Option<DateTime<Utc>>), RemoteError> {
        let url = self.namespace_url(language, namespace, is_private);
        let response = self.authorized(self.http.get(&url)).send()?;

        // A namespace the store has never seen is empty, not an error.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok((NamespaceContent::new(), None));
        }
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, &url));
        }

        let last_modified = response
            .headers()
            .get(LAST_MODIFIED)
            .and_then(|header| header.to_str().ok())
            .and_then(parse_http_date);

        // No error-payload sniffing here: namespace content is user data and
        // may legitimately contain a "message" key.
        let value: Value = response.json()?;
        let content = loctree_codecs::flatten(&value)?;
        Ok((content, last_modified))
    }

    fn push_changes(
        &self,
        language: &LanguageCode,
        namespace: &NamespaceName,
        payload: &UpdatePayload,
    ) -> Result<(), RemoteError> {
        let url = self.update_url(language, namespace);
        log::debug!("pushing {} key(s) to {url}", payload.len());
        let response = self.authorized(self.http.post(&url).json(payload)).send()?;

        let status = response.status();
        let text = response.text()?;
        if let Ok(value) = serde_json::from_str::<Value>(&text) {
            if let Some(message) = api_error_message(&value) {
                return Err(RemoteError::Api { message });
            }
        }
        if !status.is_success() {
            return Err(status_error(status, &url));
        }
        Ok(())
    }
}
