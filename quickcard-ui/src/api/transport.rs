//! gloo-net Transport
//!
//! Sends [`ApiRequest`]s with the browser's fetch API. Multipart bodies
//! become `FormData`, with images attached as `Blob`s.

use async_trait::async_trait;
use gloo_net::http::Request;
use wasm_bindgen::JsValue;

use quickcard::client::{
    ApiRequest, ApiResponse, Body, FormPayload, FormValue, ImageFile, Method, Transport,
    TransportError,
};

/// Browser transport; holds no state, every call is a fresh fetch
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };

        if let Some(authorization) = &request.authorization {
            builder = builder.header("Authorization", authorization);
        }

        let prepared = match request.body {
            Body::Empty => builder.build(),
            Body::Json(value) => builder.json(&value),
            Body::Multipart(payload) => builder.body(to_form_data(payload)?),
        }
        .map_err(|e| TransportError::new(format!("Request build error: {}", e)))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| TransportError::new(format!("Network error: {}", e)))?;

        let status = response.status();
        let body = response
            .binary()
            .await
            .map_err(|e| TransportError::new(format!("Failed to read response: {}", e)))?;

        Ok(ApiResponse { status, body })
    }
}

fn to_form_data(payload: FormPayload) -> Result<web_sys::FormData, TransportError> {
    let form = web_sys::FormData::new().map_err(js_error)?;

    for (name, value) in payload.into_parts() {
        match value {
            FormValue::Text(text) => form.append_with_str(&name, &text).map_err(js_error)?,
            FormValue::File(file) => {
                let blob = to_blob(&file)?;
                form.append_with_blob_and_filename(&name, &blob, &file.file_name)
                    .map_err(js_error)?;
            }
        }
    }

    Ok(form)
}

fn to_blob(file: &ImageFile) -> Result<web_sys::Blob, TransportError> {
    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);

    let options = web_sys::BlobPropertyBag::new();
    options.set_type(&file.content_type);

    web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)
}

fn js_error(value: JsValue) -> TransportError {
    TransportError::new(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}
