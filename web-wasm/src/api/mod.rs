//! 検出サービス連携

mod detect;

pub use detect::detect;

use sar_detect_common::messages::failure_message;
use wasm_bindgen::prelude::*;

/// JsValueのエラーを表示用メッセージに変換
///
/// `Error` オブジェクトならmessage、文字列ならそのまま、それ以外は汎用メッセージ。
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return failure_message(&String::from(err.message()));
    }
    failure_message(&value.as_string().unwrap_or_default())
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use sar_detect_common::messages::GENERIC_FAILURE;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn error_object_message() {
        let err = js_sys::Error::new("Failed to fetch");
        assert_eq!(js_error_message(&err.into()), "Failed to fetch");
    }

    #[wasm_bindgen_test]
    fn string_message() {
        assert_eq!(js_error_message(&JsValue::from_str("no window")), "no window");
    }

    #[wasm_bindgen_test]
    fn unknown_value_falls_back() {
        assert_eq!(js_error_message(&JsValue::NULL), GENERIC_FAILURE);
        assert_eq!(js_error_message(&JsValue::from_f64(42.0)), GENERIC_FAILURE);
    }
}
