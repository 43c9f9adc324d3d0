//! HTTP 请求封装模块
//!
//! 基于 `gloo-net` 实现核心库的 `HttpClient`。
//! multipart 请求体通过 `FormData` 构造，Content-Type 由浏览器生成。

use gloo_net::http::{Request, RequestBuilder};
use tm_portal::request::{FilePart, HttpMethod, HttpRequest, HttpResponse, RequestBody};
use tm_portal::{HttpClient, PortalError, PortalResult};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

fn js_error(e: JsValue) -> PortalError {
    PortalError::network(format!("{:?}", e))
}

fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
    match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Put => Request::put(url),
        HttpMethod::Delete => Request::delete(url),
        HttpMethod::Patch => Request::patch(url),
    }
}

/// 文本字段 + 文件 → FormData
fn form_data(fields: &[(String, String)], file: Option<&FilePart>) -> PortalResult<FormData> {
    let form = FormData::new().map_err(js_error)?;
    for (key, value) in fields {
        form.append_with_str(key, value).map_err(js_error)?;
    }
    if let Some(file) = file {
        let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        options.set_type(&file.mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(js_error)?;
        form.append_with_blob_and_filename(&file.field, &blob, &file.file_name)
            .map_err(js_error)?;
    }
    Ok(form)
}

/// 浏览器 fetch 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> PortalResult<HttpResponse> {
        let mut builder = builder(req.method, &req.url);
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(body) => builder.body(body),
            RequestBody::Multipart { fields, file } => builder.body(form_data(&fields, file.as_ref())?),
        }
        .map_err(|e| PortalError::network(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| PortalError::network(e.to_string()))?;

        let status = response.status();
        let content_type = response.headers().get("content-type");
        let body = response
            .binary()
            .await
            .map_err(|e| PortalError::network(e.to_string()))?;

        Ok(HttpResponse {
            status,
            body,
            content_type,
        })
    }
}
