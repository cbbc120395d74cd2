//! `POST {api_url}/detect`
//!
//! multipartの `file` フィールドに選択ファイルを入れて送る。
//! 成功ステータスかつ画像のレスポンスなら本文のBlobを返す。

use super::js_error_message;
use sar_detect_common::messages::DETECTION_FAILED;
use sar_detect_common::{is_image_response, ApiEndpoint, FILE_FIELD};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, File, FormData, Request, RequestInit, RequestMode, Response};

/// 検出を実行し、注釈付き画像のBlobを返す
///
/// 失敗時は画面に表示するメッセージを返す。
pub async fn detect(endpoint: &ApiEndpoint, file: &File) -> Result<Blob, String> {
    let url = endpoint.detect_url();
    let response = post_file(&url, file)
        .await
        .map_err(|e| js_error_message(&e))?;

    let content_type = response.headers().get("content-type").ok().flatten();
    if let Err(message) = check_response(response.ok(), content_type.as_deref()) {
        gloo::console::warn!(format!(
            "detect: {} returned HTTP {} ({})",
            url,
            response.status(),
            content_type.unwrap_or_default()
        ));
        return Err(message);
    }

    read_blob(&response).await.map_err(|e| js_error_message(&e))
}

/// ステータスとContent-Typeから成否を判定する
fn check_response(ok: bool, content_type: Option<&str>) -> Result<(), String> {
    if ok && is_image_response(content_type) {
        Ok(())
    } else {
        Err(DETECTION_FAILED.to_string())
    }
}

async fn post_file(url: &str, file: &File) -> Result<Response, JsValue> {
    let form = FormData::new()?;
    form.append_with_blob_and_filename(FILE_FIELD, file, &file.name())?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form);

    let request = Request::new_with_str_and_init(url, &opts)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    resp_value.dyn_into()
}

async fn read_blob(response: &Response) -> Result<Blob, JsValue> {
    let value = JsFuture::from(response.blob()?).await?;
    value.dyn_into()
}
