use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};
use thiserror::Error;

/// Content type the style endpoint expects for YSLD documents
pub const YSLD_CONTENT_TYPE: &str = "application/vnd.geoserver.ysld+yaml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Bounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Bbox {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lonlat: Option<Bounds>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Proj {
    pub srs: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: JsonMap<String, Value>,
}

/// Workspace-qualified layer identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct LayerRef {
    pub workspace: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Layer {
    pub name: String,
    pub workspace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub layer_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proj: Option<Proj>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Bbox>,
    /// Client-side only; never sent to or read from the server
    #[serde(skip)]
    pub visible: bool,
    // Fields we don't model are kept so a PUT round-trips them
    #[serde(flatten)]
    pub extra: JsonMap<String, Value>,
}

impl Layer {
    pub fn layer_ref(&self) -> LayerRef {
        LayerRef {
            workspace: self.workspace.clone(),
            name: self.name.clone(),
        }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Map {
    pub name: String,
    pub workspace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proj: Option<Proj>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Bbox>,
    /// Detailed layer list, filled from the map layers endpoint
    #[serde(skip)]
    pub layers: Vec<Layer>,
    /// Comma-joined names of hidden layers, stashed before leaving the view
    #[serde(skip)]
    pub hidden_layers: Option<String>,
    #[serde(flatten)]
    pub extra: JsonMap<String, Value>,
}

/// One validation problem reported against a style document
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StyleMarker {
    pub problem: String,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub column: Option<u32>,
}

/// Failure reported by the server (or transport) for any call
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status, None for transport-level failures
    pub status: Option<u16>,
    pub message: String,
    pub trace: Option<String>,
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            trace: None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
            trace: None,
        }
    }
}

/// Outcome of a rejected style save
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleSaveError {
    #[error("style failed validation ({} problem(s))", .0.len())]
    Validation(Vec<StyleMarker>),
    #[error(transparent)]
    Failed(#[from] ApiError),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    trace: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ValidationBody {
    #[serde(default)]
    errors: Vec<StyleMarker>,
}

#[derive(Debug, Deserialize)]
struct LayerPage {
    #[serde(default)]
    layers: Vec<Layer>,
}

/// Remote calls the compose view depends on
#[async_trait]
pub trait MapApi: Send + Sync {
    async fn get_map(&self, workspace: &str, name: &str) -> Result<Map, ApiError>;

    async fn get_map_layers(&self, workspace: &str, map: &str) -> Result<Vec<Layer>, ApiError>;

    async fn put_map_layers(
        &self,
        workspace: &str,
        map: &str,
        layers: &[Layer],
    ) -> Result<Vec<Layer>, ApiError>;

    async fn add_map_layers(
        &self,
        workspace: &str,
        map: &str,
        layers: &[LayerRef],
    ) -> Result<Vec<Layer>, ApiError>;

    async fn delete_map_layer(&self, workspace: &str, map: &str, layer: &str)
        -> Result<(), ApiError>;

    async fn list_layers(&self, workspace: &str) -> Result<Vec<Layer>, ApiError>;

    async fn get_style(&self, workspace: &str, layer: &str) -> Result<String, ApiError>;

    async fn put_style(
        &self,
        workspace: &str,
        layer: &str,
        style: &str,
        map: Option<&str>,
    ) -> Result<(), StyleSaveError>;
}

/// HTTP client for the Composer REST API
#[derive(Clone)]
pub struct ComposerClient {
    base_url: String,
    credentials: Option<(String, Option<String>)>,
    client: Client,
}

impl ComposerClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: None,
            client: Client::new(),
        }
    }

    pub fn with_credentials(mut self, username: String, password: Option<String>) -> Self {
        self.credentials = Some((username, password));
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/api{}", self.base_url, path);
        let builder = self.client.request(method, &url);
        match &self.credentials {
            Some((user, pass)) => builder.basic_auth(user, pass.as_ref()),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }
}

/// Build an ApiError from a failed response, preferring the JSON error body
async fn error_from_response(response: Response) -> ApiError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    error_from_body(status, &text)
}

fn error_from_body(status: StatusCode, text: &str) -> ApiError {
    match serde_json::from_str::<ErrorBody>(text) {
        Ok(ErrorBody {
            message: Some(message),
            trace,
        }) => ApiError {
            status: Some(status.as_u16()),
            message,
            trace,
        },
        _ => ApiError {
            status: Some(status.as_u16()),
            message: if text.trim().is_empty() {
                status.to_string()
            } else {
                text.trim().to_string()
            },
            trace: None,
        },
    }
}

fn seg(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}

#[async_trait]
impl MapApi for ComposerClient {
    async fn get_map(&self, workspace: &str, name: &str) -> Result<Map, ApiError> {
        let path = format!("/maps/{}/{}", seg(workspace), seg(name));
        let response = self.send(self.request(Method::GET, &path)).await?;
        Ok(response.json().await?)
    }

    async fn get_map_layers(&self, workspace: &str, map: &str) -> Result<Vec<Layer>, ApiError> {
        let path = format!("/maps/{}/{}/layers", seg(workspace), seg(map));
        let response = self.send(self.request(Method::GET, &path)).await?;
        Ok(response.json().await?)
    }

    async fn put_map_layers(
        &self,
        workspace: &str,
        map: &str,
        layers: &[Layer],
    ) -> Result<Vec<Layer>, ApiError> {
        let path = format!("/maps/{}/{}/layers", seg(workspace), seg(map));
        let response = self
            .send(self.request(Method::PUT, &path).json(layers))
            .await?;
        Ok(response.json().await?)
    }

    async fn add_map_layers(
        &self,
        workspace: &str,
        map: &str,
        layers: &[LayerRef],
    ) -> Result<Vec<Layer>, ApiError> {
        let path = format!("/maps/{}/{}/layers", seg(workspace), seg(map));
        let response = self
            .send(self.request(Method::POST, &path).json(layers))
            .await?;
        Ok(response.json().await?)
    }

    async fn delete_map_layer(
        &self,
        workspace: &str,
        map: &str,
        layer: &str,
    ) -> Result<(), ApiError> {
        let path = format!(
            "/maps/{}/{}/layers/{}",
            seg(workspace),
            seg(map),
            seg(layer)
        );
        self.send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    async fn list_layers(&self, workspace: &str) -> Result<Vec<Layer>, ApiError> {
        let path = format!("/layers/{}", seg(workspace));
        let response = self.send(self.request(Method::GET, &path)).await?;
        let page: LayerPage = response.json().await?;
        Ok(page.layers)
    }

    async fn get_style(&self, workspace: &str, layer: &str) -> Result<String, ApiError> {
        let path = format!("/layers/{}/{}/style", seg(workspace), seg(layer));
        let response = self.send(self.request(Method::GET, &path)).await?;
        Ok(response.text().await?)
    }

    async fn put_style(
        &self,
        workspace: &str,
        layer: &str,
        style: &str,
        map: Option<&str>,
    ) -> Result<(), StyleSaveError> {
        let mut path = format!("/layers/{}/{}/style", seg(workspace), seg(layer));
        if let Some(map) = map {
            path.push_str(&format!("?map={}", seg(map)));
        }

        let response = self
            .request(Method::PUT, &path)
            .header(reqwest::header::CONTENT_TYPE, YSLD_CONTENT_TYPE)
            .body(style.to_string())
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        if status == StatusCode::BAD_REQUEST {
            let markers = serde_json::from_str::<ValidationBody>(&text)
                .map(|body| body.errors)
                .unwrap_or_default();
            return Err(StyleSaveError::Validation(markers));
        }

        Err(StyleSaveError::Failed(error_from_body(status, &text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_visible_is_not_serialized() {
        let json = r#"{"name":"roads","workspace":"ws1","keywords":["a"]}"#;
        let mut layer: Layer = serde_json::from_str(json).unwrap();
        assert!(!layer.visible);
        layer.visible = true;

        let out = serde_json::to_value(&layer).unwrap();
        assert!(out.get("visible").is_none());
        // Unknown fields survive the round trip
        assert_eq!(out["keywords"][0], "a");
    }

    #[test]
    fn test_error_body_uses_json_message_and_trace() {
        let err = error_from_body(
            StatusCode::NOT_FOUND,
            r#"{"message":"No such map","trace":"at Foo"}"#,
        );
        assert_eq!(err.status, Some(404));
        assert_eq!(err.message, "No such map");
        assert_eq!(err.trace.as_deref(), Some("at Foo"));
    }

    #[test]
    fn test_error_body_falls_back_to_raw_text() {
        let err = error_from_body(StatusCode::INTERNAL_SERVER_ERROR, "boom\n");
        assert_eq!(err.status, Some(500));
        assert_eq!(err.message, "boom");
        assert!(err.trace.is_none());
    }

    #[test]
    fn test_error_body_empty_uses_status() {
        let err = error_from_body(StatusCode::BAD_GATEWAY, "");
        assert_eq!(err.message, "502 Bad Gateway");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = ComposerClient::new("http://localhost:8080/geoserver/".to_string());
        assert_eq!(client.base_url, "http://localhost:8080/geoserver");
    }
}
