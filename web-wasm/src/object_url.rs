//! Blob URL（`URL.createObjectURL`）の所有ハンドル
//!
//! 破棄時に `URL.revokeObjectURL` で解放する。
//! プレビューを置き換えると前のURLは自動的に解放される。

use wasm_bindgen::JsValue;
use web_sys::{Blob, Url};

#[derive(Debug)]
pub struct ObjectUrl {
    url: String,
    content_type: String,
}

impl ObjectUrl {
    pub fn from_blob(blob: &Blob) -> Result<Self, JsValue> {
        let url = Url::create_object_url_with_blob(blob)?;
        Ok(Self {
            url,
            content_type: blob.type_(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Blobの種類（空の場合はNone）
    pub fn content_type(&self) -> Option<&str> {
        Some(self.content_type.as_str()).filter(|ct| !ct.is_empty())
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        let _ = Url::revoke_object_url(&self.url);
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::BlobPropertyBag;

    wasm_bindgen_test_configure!(run_in_browser);

    fn png_blob() -> Blob {
        let parts = js_sys::Array::new();
        parts.push(&JsValue::from_str("not really a png"));
        let options = BlobPropertyBag::new();
        options.set_type("image/png");
        Blob::new_with_str_sequence_and_options(&parts, &options).expect("blob")
    }

    #[wasm_bindgen_test]
    fn object_url_is_blob_scheme() {
        let url = ObjectUrl::from_blob(&png_blob()).expect("object url");
        assert!(url.url().starts_with("blob:"));
        assert_eq!(url.content_type(), Some("image/png"));
    }

    #[wasm_bindgen_test]
    fn object_url_without_type() {
        let blob = Blob::new().expect("blob");
        let url = ObjectUrl::from_blob(&blob).expect("object url");
        assert_eq!(url.content_type(), None);
    }
}
