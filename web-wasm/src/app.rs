//! メインアプリケーションコンポーネント
//!
//! 左列: アップロード → 元画像プレビュー → 検出ボタン → エラー
//! 右列: 検出結果（未取得ならプレースホルダ）

use leptos::prelude::*;
use leptos::task::spawn_local;
use sar_detect_common::messages::{DOWNLOAD_FAILED, NOT_AN_IMAGE};
use sar_detect_common::{
    is_image_mime, mime_from_file_name, original_download_name, result_download_name,
    ApiEndpoint, DetectionSession, Selection,
};
use web_sys::File;

use crate::api::{self, js_error_message};
use crate::components::{
    detect_button::DetectButton,
    error_banner::ErrorBanner,
    header::Header,
    image_preview::ImagePreview,
    upload_zone::UploadZone,
};
use crate::config;
use crate::download::download_object_url;
use crate::object_url::ObjectUrl;

/// 画面の状態（ファイルはweb_sys::File、プレビューはBlob URL）
pub type WebSession = DetectionSession<File, ObjectUrl>;

type SessionSignal = RwSignal<WebSession, LocalStorage>;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let session: SessionSignal = RwSignal::new_local(WebSession::new());
    let endpoint = StoredValue::new(config::api_endpoint());

    let original_url = Memo::new(move |_| {
        session.with(|s| s.original_preview().map(|p| p.url().to_string()))
    });
    let result_url = Memo::new(move |_| {
        session.with(|s| s.result_preview().map(|p| p.url().to_string()))
    });
    let is_busy = Memo::new(move |_| session.with(|s| s.is_busy()));
    let error = Memo::new(move |_| session.with(|s| s.error().map(str::to_string)));

    let on_file = move |file: File| select_file(session, file);
    let on_detect = move || start_detection(session, endpoint.get_value());

    view! {
        <div class="container">
            <Header />

            <div class="layout-grid">
                <div class="upload-column">
                    <UploadZone on_file=on_file />

                    {move || {
                        original_url
                            .get()
                            .map(|url| {
                                view! {
                                    <div class="panel">
                                        <h2>"Original Image"</h2>
                                        <ImagePreview
                                            image_url=url
                                            title="Original Image"
                                            on_download=move || download_original(session)
                                        />
                                    </div>
                                    <DetectButton is_busy=is_busy on_detect=on_detect />
                                }
                            })
                    }}

                    <ErrorBanner error=error />
                </div>

                <div class="panel results-panel">
                    <h2>"Detection Results"</h2>
                    {move || match result_url.get() {
                        Some(url) => {
                            view! {
                                <ImagePreview
                                    image_url=url
                                    title="Detection Result"
                                    on_download=move || download_result(session)
                                />
                            }
                                .into_any()
                        }
                        None => {
                            view! {
                                <div class="result-placeholder">
                                    <p class="text-muted">"Detection results will appear here"</p>
                                </div>
                            }
                                .into_any()
                        }
                    }}
                </div>
            </div>
        </div>
    }
}

/// 選択・ドロップされたファイルを反映
fn select_file(session: SessionSignal, file: File) {
    let file_name = file.name();
    let mime_type = Some(file.type_())
        .filter(|t| !t.is_empty())
        .or_else(|| mime_from_file_name(&file_name).map(str::to_string))
        .unwrap_or_default();

    if !is_image_mime(&mime_type) {
        gloo::console::warn!(format!("ignored non-image file: {} ({})", file_name, mime_type));
        session.update(|s| s.report_error(NOT_AN_IMAGE));
        return;
    }

    let preview = match ObjectUrl::from_blob(&file) {
        Ok(preview) => preview,
        Err(err) => {
            let message = js_error_message(&err);
            session.update(|s| s.report_error(&message));
            return;
        }
    };

    session.update(move |s| {
        let selection = Selection {
            file,
            file_name,
            mime_type,
            preview,
        };
        if let Err(err) = s.select(selection) {
            s.report_error(&err.to_string());
        }
    });
}

/// 検出リクエストを開始（処理中は何もしない）
fn start_detection(session: SessionSignal, endpoint: ApiEndpoint) {
    let mut request = None;
    session.update(|s| match s.begin_detection() {
        Ok(ticket) => request = s.file().cloned().map(|file| (ticket, file)),
        Err(err) => gloo::console::warn!(format!("detect: {}", err)),
    });

    let Some((ticket, file)) = request else {
        return;
    };

    gloo::console::log!(format!("detect: {} -> {}", file.name(), endpoint.detect_url()));

    spawn_local(async move {
        match api::detect(&endpoint, &file).await {
            Ok(blob) => match ObjectUrl::from_blob(&blob) {
                Ok(preview) => session.update(|s| {
                    if !s.complete_success(ticket, preview) {
                        gloo::console::log!("detect: result discarded (selection changed)");
                    }
                }),
                Err(err) => {
                    let message = js_error_message(&err);
                    session.update(|s| {
                        s.complete_failure(ticket, &message);
                    });
                }
            },
            Err(message) => {
                gloo::console::error!(format!("detect: {}", message));
                session.update(|s| {
                    s.complete_failure(ticket, &message);
                });
            }
        }
    });
}

fn download_original(session: SessionSignal) {
    let target = session.with_untracked(|s| {
        s.selection()
            .map(|sel| (sel.preview.url().to_string(), original_download_name(&sel.file_name)))
    });
    if let Some((url, file_name)) = target {
        save_download(session, &url, &file_name);
    }
}

fn download_result(session: SessionSignal) {
    let target = session.with_untracked(|s| {
        s.result_preview()
            .map(|p| (p.url().to_string(), result_download_name(p.content_type())))
    });
    if let Some((url, file_name)) = target {
        save_download(session, &url, &file_name);
    }
}

fn save_download(session: SessionSignal, url: &str, file_name: &str) {
    if let Err(err) = download_object_url(url, file_name) {
        gloo::console::error!(format!("download: {}", js_error_message(&err)));
        session.update(|s| s.report_error(DOWNLOAD_FAILED));
    }
}
