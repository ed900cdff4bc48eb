//! Audio library backend: the trait the store talks to and its HTTP implementation

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{LibraryError, LibraryResult};
use super::types::{AudioItem, PlaylistSummary};

/// Operations offered by the audio library service
#[async_trait]
pub trait LibraryBackend: Send + Sync {
    async fn list_playlists(&self) -> LibraryResult<Vec<PlaylistSummary>>;
    async fn add_playlist(&self, title: &str) -> LibraryResult<()>;
    async fn delete_playlist(&self, id: &str) -> LibraryResult<()>;
    async fn all_audios(&self) -> LibraryResult<Vec<AudioItem>>;
    async fn playlist_audios(&self, id: &str) -> LibraryResult<Vec<AudioItem>>;
    async fn update_playlist_audios(&self, id: &str, audios: &[String]) -> LibraryResult<()>;
    async fn delete_audio(&self, audio: &str, playlist: Option<&str>) -> LibraryResult<()>;
    async fn delete_audios(&self, audios: &[String], playlist: Option<&str>) -> LibraryResult<()>;
    async fn add_audios_to_playlist(&self, audios: &[String], playlist: &str) -> LibraryResult<()>;
}

/// Response envelope shared by every endpoint.
///
/// `data` stays untyped until `code` has been checked.
#[derive(Debug, Deserialize)]
struct Envelope {
    code: i64,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    data: Value,
}

impl Envelope {
    fn into_result(self) -> LibraryResult<Value> {
        if self.code != 0 {
            return Err(LibraryError::Server(self.msg));
        }
        Ok(self.data)
    }
}

#[derive(Serialize)]
struct TitleBody<'a> {
    title: &'a str,
}

#[derive(Serialize)]
struct IdBody<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct ReorderBody<'a> {
    id: &'a str,
    audios: &'a [String],
}

#[derive(Serialize)]
struct DeleteAudioBody<'a> {
    audio: &'a str,
    playlist: Option<&'a str>,
}

#[derive(Serialize)]
struct AudiosBody<'a> {
    audios: &'a [String],
    playlist: Option<&'a str>,
}

/// HTTP client for the `/api/music` endpoints
#[derive(Clone)]
pub struct HttpLibraryClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpLibraryClient {
    pub fn new(base_url: &str, timeout: Duration) -> LibraryResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/music/{}", self.base_url, path)
    }

    async fn decode(operation: &'static str, response: reqwest::Response) -> LibraryResult<Value> {
        let envelope: Envelope = response.json().await.map_err(|e| {
            tracing::error!(operation, error = %e, "Malformed response body");
            LibraryError::network(e)
        })?;
        envelope.into_result().inspect_err(|e| {
            tracing::error!(operation, error = %e, "Server rejected request");
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        query: &[(&str, &str)],
    ) -> LibraryResult<T> {
        tracing::debug!(operation, path, "API request started");
        let response = self
            .http
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(operation, error = %e, "API request failed");
                LibraryError::network(e)
            })?;
        let data = Self::decode(operation, response).await?;
        if data.is_null() {
            tracing::error!(operation, "Response carried no data");
            return Err(LibraryError::network("response carried no data"));
        }
        serde_json::from_value(data).map_err(|e| {
            tracing::error!(operation, error = %e, "Unexpected data in response");
            LibraryError::network(e)
        })
    }

    async fn post<B: Serialize + Sync>(
        &self,
        operation: &'static str,
        path: &str,
        body: &B,
    ) -> LibraryResult<()> {
        tracing::debug!(operation, path, "API request started");
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(operation, error = %e, "API request failed");
                LibraryError::network(e)
            })?;
        Self::decode(operation, response).await?;
        tracing::info!(operation, "API request successful");
        Ok(())
    }
}

#[async_trait]
impl LibraryBackend for HttpLibraryClient {
    async fn list_playlists(&self) -> LibraryResult<Vec<PlaylistSummary>> {
        self.get("list_playlists", "playlists", &[]).await
    }

    async fn add_playlist(&self, title: &str) -> LibraryResult<()> {
        self.post("add_playlist", "add_playlist", &TitleBody { title }).await
    }

    async fn delete_playlist(&self, id: &str) -> LibraryResult<()> {
        self.post("delete_playlist", "delete_playlist", &IdBody { id }).await
    }

    async fn all_audios(&self) -> LibraryResult<Vec<AudioItem>> {
        self.get("all_audios", "all_audios", &[]).await
    }

    async fn playlist_audios(&self, id: &str) -> LibraryResult<Vec<AudioItem>> {
        self.get("playlist_audios", "playlist_audios", &[("id", id)]).await
    }

    async fn update_playlist_audios(&self, id: &str, audios: &[String]) -> LibraryResult<()> {
        self.post(
            "update_playlist_audios",
            "update_playlist_audios",
            &ReorderBody { id, audios },
        )
        .await
    }

    async fn delete_audio(&self, audio: &str, playlist: Option<&str>) -> LibraryResult<()> {
        self.post("delete_audio", "delete_audio", &DeleteAudioBody { audio, playlist })
            .await
    }

    async fn delete_audios(&self, audios: &[String], playlist: Option<&str>) -> LibraryResult<()> {
        self.post("delete_audios", "delete_audios", &AudiosBody { audios, playlist })
            .await
    }

    async fn add_audios_to_playlist(&self, audios: &[String], playlist: &str) -> LibraryResult<()> {
        self.post(
            "add_audios_to_playlist",
            "add_audios_to_playlist",
            &AudiosBody {
                audios,
                playlist: Some(playlist),
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_with_nonzero_code_is_server_error() {
        let env: Envelope =
            serde_json::from_str(r#"{"code":3,"msg":"duplicate title","data":null}"#).unwrap();
        assert_eq!(
            env.into_result(),
            Err(LibraryError::Server("duplicate title".to_string()))
        );
    }

    #[test]
    fn server_message_wins_over_odd_payload() {
        let env: Envelope = serde_json::from_str(r#"{"code":7,"msg":"bad id","data":""}"#).unwrap();
        assert_eq!(env.into_result(), Err(LibraryError::Server("bad id".to_string())));
    }

    #[test]
    fn envelope_without_data_is_ok_for_mutations() {
        let env: Envelope = serde_json::from_str(r#"{"code":0,"msg":""}"#).unwrap();
        assert_eq!(env.into_result(), Ok(Value::Null));
    }

    #[test]
    fn null_playlist_is_serialized_for_global_delete() {
        let audios = vec!["a1".to_string(), "a2".to_string()];
        let body = serde_json::to_value(AudiosBody { audios: &audios, playlist: None }).unwrap();
        assert_eq!(body, serde_json::json!({"audios": ["a1", "a2"], "playlist": null}));
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let client = HttpLibraryClient::new("http://localhost:8080/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.url("playlists"), "http://localhost:8080/api/music/playlists");
    }
}
