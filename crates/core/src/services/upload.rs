//! Image upload

use std::sync::Arc;

use serde_json::Value;
use storefront_domain::constants::UPLOAD_FIELD_NAME;
use storefront_domain::{Endpoints, ImageUpload};
use tracing::debug;

use crate::errors::ClientError;
use crate::http::{ApiRequest, FormPart, RequestBody};
use crate::session::SessionClient;

#[derive(Clone)]
pub struct UploadService {
    client: Arc<SessionClient>,
    endpoints: Arc<Endpoints>,
}

impl UploadService {
    pub fn new(client: Arc<SessionClient>, endpoints: Arc<Endpoints>) -> Self {
        Self { client, endpoints }
    }

    /// Upload an image as a multipart `file` part and return its public URL.
    ///
    /// # Errors
    /// `Decode` when the response names no URL, else any [`ClientError`] from
    /// the request.
    pub async fn upload_image(&self, image: ImageUpload) -> Result<String, ClientError> {
        let path = self.endpoints.upload_image();
        let size = image.bytes.len();
        let part = FormPart {
            name: UPLOAD_FIELD_NAME.to_string(),
            file_name: Some(image.file_name),
            content_type: Some(image.content_type),
            data: image.bytes,
        };
        let request = ApiRequest::post(path.clone()).with_body(RequestBody::Multipart(vec![part]));
        let body: Value = self.client.fetch(request).await?;

        let url = image_url(&body).ok_or_else(|| ClientError::Decode {
            path,
            message: "upload response did not contain an image URL".into(),
        })?;
        debug!(size, "image uploaded");
        Ok(url)
    }
}

/// First non-empty of `img_url`, `url`, `data.img_url`, `data.url`.
fn image_url(body: &Value) -> Option<String> {
    let data = body.get("data");
    let nested = |key: &str| data.and_then(|d| d.get(key));
    [body.get("img_url"), body.get("url"), nested("img_url"), nested("url")]
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .find(|url| !url.is_empty())
        .map(str::to_string)
}
