//! 画像のダウンロード（一時的な `<a download>` をクリック）

use wasm_bindgen::prelude::*;
use web_sys::HtmlAnchorElement;

pub fn download_object_url(url: &str, file_name: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document is not available"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    let link: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    link.set_href(url);
    link.set_download(file_name);

    body.append_child(&link)?;
    link.click();
    body.remove_child(&link)?;
    Ok(())
}
