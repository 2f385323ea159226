use crate::config::Credentials;
use crate::traits::{MediaUpload, Publisher};
use crate::twitter::oauth::OAuthSigner;
use crate::types::{ComposedPost, FetchConfig, MediaId, PostReceipt, PosterError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

pub const CREATE_POST_URL: &str = "https://api.twitter.com/2/tweets";
pub const MEDIA_UPLOAD_URL: &str = "https://upload.twitter.com/1.1/media/upload.json";

#[derive(Debug, Serialize)]
pub struct CreatePostRequest<'a> {
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<PostMedia<'a>>,
}

#[derive(Debug, Serialize)]
pub struct PostMedia<'a> {
    pub media_ids: Vec<&'a str>,
}

impl<'a> CreatePostRequest<'a> {
    pub fn new(post: &'a ComposedPost, media: Option<&'a MediaId>) -> Self {
        Self {
            text: post.as_str(),
            media: media.map(|id| PostMedia {
                media_ids: vec![id.as_str()],
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreatePostResponse {
    data: CreatedPost,
}

#[derive(Debug, Deserialize)]
struct CreatedPost {
    id: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct MediaUploadResponse {
    media_id_string: String,
}

/// X (Twitter) API client: v1.1 for media upload, v2 for posting.
pub struct TwitterClient {
    client: Client,
    signer: OAuthSigner,
    post_url: String,
    upload_url: String,
}

impl TwitterClient {
    pub fn new(credentials: Credentials, fetch_config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&fetch_config.user_agent)
            .timeout(Duration::from_secs(fetch_config.timeout_seconds))
            .connect_timeout(Duration::from_secs(fetch_config.connect_timeout_seconds))
            .build()
            .map_err(|e| PosterError::General(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            signer: OAuthSigner::new(credentials),
            post_url: CREATE_POST_URL.to_string(),
            upload_url: MEDIA_UPLOAD_URL.to_string(),
        })
    }

    /// Point the client at different endpoints, e.g. a local stand-in.
    pub fn with_endpoints(mut self, post_url: String, upload_url: String) -> Self {
        self.post_url = post_url;
        self.upload_url = upload_url;
        self
    }
}

#[async_trait]
impl MediaUpload for TwitterClient {
    async fn upload(&self, image: Vec<u8>) -> Result<MediaId> {
        debug!("Uploading image ({} bytes)", image.len());

        // Multipart fields are not part of the OAuth signature base.
        let auth = self.signer.authorization_header("POST", &self.upload_url, &[])?;
        let form = Form::new().part("media", Part::bytes(image).file_name("image.jpg"));

        let response = self
            .client
            .post(&self.upload_url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PosterError::Upload(format!("HTTP {}: {}", status, body)));
        }

        let body = response.text().await?;
        let uploaded: MediaUploadResponse = serde_json::from_str(&body)?;
        info!("Uploaded media {}", uploaded.media_id_string);
        Ok(MediaId(uploaded.media_id_string))
    }
}

#[async_trait]
impl Publisher for TwitterClient {
    async fn publish(&self, post: &ComposedPost, media: Option<&MediaId>) -> Result<PostReceipt> {
        let auth = self.signer.authorization_header("POST", &self.post_url, &[])?;
        let request = CreatePostRequest::new(post, media);

        let response = self
            .client
            .post(&self.post_url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PosterError::Publish {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let created: CreatePostResponse = serde_json::from_str(&body)?;
        Ok(PostReceipt {
            id: created.data.id,
            text: created.data.text,
        })
    }
}
