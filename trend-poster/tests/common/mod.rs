#![allow(dead_code)]

use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::{Mutex, Once};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use trend_poster::{
    Candidate, ComposedPost, Credentials, FeedSource, ImageFetch, ImageSearch, MediaId,
    MediaUpload, PostReceipt, PosterError, Publisher, Result,
};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub const FIXED_TIMESTAMP: i64 = 1_700_000_000;

pub fn fixed_clock() -> i64 {
    FIXED_TIMESTAMP
}

/// Feed that always returns the same items, truncated to the limit asked for.
pub struct StaticFeed {
    pub candidates: Vec<Candidate>,
    pub requested_limits: Mutex<Vec<usize>>,
}

impl StaticFeed {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            requested_limits: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl FeedSource for StaticFeed {
    fn source_name(&self) -> String {
        "static".to_string()
    }

    async fn fetch_candidates(&self, limit: usize) -> Result<Vec<Candidate>> {
        self.requested_limits.lock().unwrap().push(limit);
        Ok(self.candidates.iter().take(limit).cloned().collect())
    }
}

pub struct FailingFeed;

#[async_trait]
impl FeedSource for FailingFeed {
    fn source_name(&self) -> String {
        "failing".to_string()
    }

    async fn fetch_candidates(&self, _limit: usize) -> Result<Vec<Candidate>> {
        Err(PosterError::Parse("not a feed".to_string()))
    }
}

pub enum SearchBehavior {
    Found(String),
    NotFound,
    Fails,
}

pub struct FakeImageSearch {
    pub behavior: SearchBehavior,
    pub queries: Mutex<Vec<String>>,
}

impl FakeImageSearch {
    pub fn new(behavior: SearchBehavior) -> Self {
        Self {
            behavior,
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ImageSearch for FakeImageSearch {
    async fn search(&self, query: &str) -> Result<Option<String>> {
        self.queries.lock().unwrap().push(query.to_string());
        match &self.behavior {
            SearchBehavior::Found(url) => Ok(Some(url.clone())),
            SearchBehavior::NotFound => Ok(None),
            SearchBehavior::Fails => Err(PosterError::General("search blocked".to_string())),
        }
    }
}

pub struct FakeImageFetch {
    pub bytes: Option<Vec<u8>>,
}

#[async_trait]
impl ImageFetch for FakeImageFetch {
    async fn fetch_image(&self, _url: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.bytes.clone())
    }
}

pub struct FakeUpload {
    pub media_id: Option<String>,
    pub uploads: Mutex<Vec<usize>>,
}

impl FakeUpload {
    pub fn succeeding(media_id: &str) -> Self {
        Self {
            media_id: Some(media_id.to_string()),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            media_id: None,
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl MediaUpload for FakeUpload {
    async fn upload(&self, image: Vec<u8>) -> Result<MediaId> {
        self.uploads.lock().unwrap().push(image.len());
        match &self.media_id {
            Some(id) => Ok(MediaId(id.clone())),
            None => Err(PosterError::Upload("HTTP 400: bad media".to_string())),
        }
    }
}

/// Publisher that keeps everything it was asked to post.
#[derive(Default)]
pub struct RecordingPublisher {
    pub posts: Mutex<Vec<(String, Option<MediaId>)>>,
}

impl RecordingPublisher {
    pub fn published(&self) -> Vec<(String, Option<MediaId>)> {
        self.posts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, post: &ComposedPost, media: Option<&MediaId>) -> Result<PostReceipt> {
        let mut posts = self.posts.lock().unwrap();
        posts.push((post.text.clone(), media.cloned()));
        Ok(PostReceipt {
            id: format!("post-{}", posts.len()),
            text: post.text.clone(),
        })
    }
}

pub struct FailingPublisher;

#[async_trait]
impl Publisher for FailingPublisher {
    async fn publish(&self, _post: &ComposedPost, _media: Option<&MediaId>) -> Result<PostReceipt> {
        Err(PosterError::Publish {
            status: 403,
            body: "duplicate content".to_string(),
        })
    }
}

/// Whitespace-separated tokens that look like hashtags.
pub fn hashtags_in(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter(|token| token.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn test_credentials() -> Credentials {
    Credentials {
        api_key: "test-key".to_string(),
        api_secret: "test-key-secret".to_string(),
        access_token: "test-token".to_string(),
        access_secret: "test-token-secret".to_string(),
    }
}

/// Canned reply for [`StubServer`].
pub struct StubResponse {
    pub status: &'static str,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    /// Without a length the body is delimited by closing the connection.
    pub send_length: bool,
}

impl StubResponse {
    pub fn new(status: &'static str, content_type: &'static str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
            send_length: true,
        }
    }

    pub fn json(status: &'static str, body: &str) -> Self {
        Self::new(status, "application/json", body)
    }

    pub fn without_length(mut self) -> Self {
        self.send_length = false;
        self
    }
}

/// Local HTTP endpoint that answers exactly one request and hands back
/// the raw request it received.
pub struct StubServer {
    addr: SocketAddr,
    handle: JoinHandle<Vec<u8>>,
}

impl StubServer {
    pub async fn start(response: StubResponse) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;

            let mut head = format!(
                "HTTP/1.1 {}\r\nContent-Type: {}\r\nConnection: close\r\n",
                response.status, response.content_type
            );
            if response.send_length {
                head.push_str(&format!("Content-Length: {}\r\n", response.body.len()));
            }
            head.push_str("\r\n");

            // The client may hang up early, e.g. after seeing an oversized length.
            let _ = stream.write_all(head.as_bytes()).await;
            let _ = stream.write_all(&response.body).await;
            let _ = stream.shutdown().await;
            request
        });

        Self { addr, handle }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// The request as received, lossily decoded.
    pub async fn request(self) -> String {
        let raw = self.handle.await.unwrap();
        String::from_utf8_lossy(&raw).into_owned()
    }
}

async fn read_request(stream: &mut tokio::net::TcpStream) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        if let Some(header_end) = find(&buf, b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
            let content_length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok());

            let complete = match content_length {
                Some(length) => buf.len() >= header_end + 4 + length,
                None if head.contains("transfer-encoding: chunked") => buf.ends_with(b"0\r\n\r\n"),
                None => true,
            };
            if complete {
                return buf;
            }
        }

        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return buf,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}
