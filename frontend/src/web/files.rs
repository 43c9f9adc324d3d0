//! 文件上传与下载
//!
//! 上传：`File` → ArrayBuffer → `Attachment`，由核心库组装 multipart。
//! 下载：Blob → 临时 object URL → 隐藏的 `<a download>` 点击。
//! object URL 由 `ObjectUrl` 持有，离开作用域即释放。

use tm_portal::Download;
use tm_portal::shared::Attachment;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, HtmlAnchorElement, Url};

const FALLBACK_MIME: &str = "application/octet-stream";

/// 读取用户选择的文件
pub async fn read_attachment(file: &File) -> Result<Attachment, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let mime = file.type_();
    Ok(Attachment {
        file_name: file.name(),
        mime: if mime.is_empty() {
            FALLBACK_MIME.to_string()
        } else {
            mime
        },
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}

/// 临时 object URL，drop 时 revoke
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn new(bytes: &[u8], mime: &str) -> Result<Self, JsValue> {
        let data = js_sys::Uint8Array::from(bytes);
        let parts = js_sys::Array::of1(&data);
        let options = BlobPropertyBag::new();
        options.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
        Url::create_object_url_with_blob(&blob).map(ObjectUrl)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        if let Err(e) = Url::revoke_object_url(&self.0) {
            log::warn!("revokeObjectURL failed: {:?}", e);
        }
    }
}

/// 按 MIME 补全扩展名
pub fn file_name(base: &str, mime: &str) -> String {
    let ext = match mime.split(';').next().unwrap_or("").trim() {
        "application/pdf" => "pdf",
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "application/msword" => "doc",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => "docx",
        _ => return base.to_string(),
    };
    if base.to_lowercase().ends_with(&format!(".{ext}")) {
        base.to_string()
    } else {
        format!("{base}.{ext}")
    }
}

/// 触发浏览器保存文件
pub fn save_file(file: &Download, name: &str) -> Result<(), JsValue> {
    let url = ObjectUrl::new(&file.bytes, &file.mime)?;
    let document = leptos::prelude::document();
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(url.as_str());
    anchor.set_download(&file_name(name, &file.mime));
    anchor.set_attribute("style", "display: none")?;
    // 未挂载到文档上的链接在部分浏览器中点击无效
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    body.append_child(&anchor)?;
    anchor.click();
    anchor.remove();
    Ok(())
}
