//! Image loading service.
//!
//! DESIGN
//! ======
//! `http(s)://` sources are fetched with `reqwest`; anything else is a path
//! read through `tokio::fs`. Bytes are decoded to RGBA with `image`.
//!
//! `ImageLoadQueue` starts loads concurrently but places the results on the
//! surface in the order they were requested, whatever order they finish in.
//!
//! ERROR HANDLING
//! ==============
//! A failed load is logged and dropped: nothing is inserted and nothing is
//! retried. The remaining loads in the queue still land.

#[cfg(test)]
#[path = "images_test.rs"]
mod images_test;

use canvas::doc::EntityId;
use canvas::engine::{EngineCore, ImageSource};
use futures::StreamExt;
use futures::future::BoxFuture;
use futures::stream::FuturesOrdered;
use image::RgbaImage;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum ResourceLoadError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("http status {status} for {src}")]
    Status { src: String, status: u16 },
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// Decoded pixels and the source they came from.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub src: String,
    pub pixels: RgbaImage,
}

impl LoadedImage {
    #[must_use]
    pub fn source(&self) -> ImageSource {
        ImageSource {
            src: self.src.clone(),
            width: f64::from(self.pixels.width()),
            height: f64::from(self.pixels.height()),
        }
    }
}

#[must_use]
pub fn is_remote(src: &str) -> bool {
    src.starts_with("http://") || src.starts_with("https://")
}

/// Fetch and decode one image.
///
/// # Errors
///
/// Returns a [`ResourceLoadError`] for transport failures, non-success HTTP
/// statuses, unreadable files and undecodable bytes.
pub async fn load_image(client: &reqwest::Client, src: &str) -> Result<LoadedImage, ResourceLoadError> {
    let bytes = if is_remote(src) {
        let response = client.get(src).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ResourceLoadError::Status { src: src.to_string(), status: status.as_u16() });
        }
        response.bytes().await?.to_vec()
    } else {
        tokio::fs::read(src).await?
    };
    let pixels = image::load_from_memory(&bytes)?.to_rgba8();
    debug!(%src, width = pixels.width(), height = pixels.height(), "image decoded");
    Ok(LoadedImage { src: src.to_string(), pixels })
}

type PendingLoad = BoxFuture<'static, (String, Result<LoadedImage, ResourceLoadError>)>;

/// Concurrent image loads that resolve in request order.
pub struct ImageLoadQueue {
    client: reqwest::Client,
    pending: FuturesOrdered<PendingLoad>,
}

impl ImageLoadQueue {
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self { client, pending: FuturesOrdered::new() }
    }

    /// Start loading `src`. The load runs as soon as the queue is drained.
    pub fn push(&mut self, src: impl Into<String>) {
        let src = src.into();
        let client = self.client.clone();
        self.pending.push_back(Box::pin(async move {
            let result = load_image(&client, &src).await;
            (src, result)
        }));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Wait for every queued load and place each success on the surface, in
    /// the order the loads were pushed. Returns the inserted ids.
    pub async fn drain_into(&mut self, engine: &mut EngineCore) -> Vec<EntityId> {
        let mut inserted = Vec::new();
        while let Some((src, result)) = self.pending.next().await {
            match result {
                Ok(loaded) => {
                    let source = loaded.source();
                    engine.register_image(loaded.src, loaded.pixels);
                    if let Some(id) = engine.add_image(&source) {
                        inserted.push(id);
                    }
                }
                Err(e) => warn!(%src, error = %e, "image load failed"),
            }
        }
        inserted
    }
}
