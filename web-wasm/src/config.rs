//! APIのベースURL
//!
//! 優先順位:
//! 1. `<meta name="sar-detect-api-url" content="...">`
//! 2. ビルド時の環境変数 `SAR_DETECT_API_URL`
//! 3. `DEFAULT_API_URL`

use sar_detect_common::{ApiEndpoint, Result};

const API_URL_META: &str = "sar-detect-api-url";

/// 実行時に使うエンドポイント（不正な設定は既定値に戻す）
pub fn api_endpoint() -> ApiEndpoint {
    let meta = meta_api_url();
    match resolve_endpoint(meta.as_deref(), option_env!("SAR_DETECT_API_URL")) {
        Ok(endpoint) => endpoint,
        Err(err) => {
            gloo::console::error!(format!("{}; using {}", err, ApiEndpoint::default()));
            ApiEndpoint::default()
        }
    }
}

/// 空でない最初の候補を検証する
pub fn resolve_endpoint(meta: Option<&str>, build_time: Option<&str>) -> Result<ApiEndpoint> {
    let chosen = [meta, build_time]
        .into_iter()
        .flatten()
        .find(|url| !url.trim().is_empty());

    match chosen {
        Some(url) => ApiEndpoint::parse(url),
        None => Ok(ApiEndpoint::default()),
    }
}

fn meta_api_url() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let selector = format!("meta[name=\"{}\"]", API_URL_META);
    let meta = document.query_selector(&selector).ok()??;
    meta.get_attribute("content")
}


#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn meta_tag_is_read() {
        let document = web_sys::window().unwrap().document().unwrap();
        let meta = document.create_element("meta").unwrap();
        meta.set_attribute("name", API_URL_META).unwrap();
        meta.set_attribute("content", "https://meta.example.org/").unwrap();
        document.head().unwrap().append_child(&meta).unwrap();

        assert_eq!(api_endpoint().base(), "https://meta.example.org");

        meta.remove();
    }
}
