//! アップロードエリアコンポーネント
//!
//! ドラッグ&ドロップ、またはラベルから隠しinputを開いて画像を選ぶ。
//! 先頭の1ファイルだけを `on_file` に渡す。

use leptos::prelude::*;
use web_sys::{DragEvent, Event, File, HtmlInputElement};

#[component]
pub fn UploadZone<F>(on_file: F) -> impl IntoView
where
    F: Fn(File) + 'static + Clone,
{
    let (is_dragover, set_is_dragover) = signal(false);

    let on_drop = {
        let on_file = on_file.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            let file = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0));
            if let Some(file) = file {
                on_file(file);
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            on_file(file);
        }
        // 同じファイルを選び直してもchangeが発火するように
        input.set_value("");
    };

    view! {
        <div
            class=move || {
                if is_dragover.get() {
                    "upload-zone dragover"
                } else {
                    "upload-zone"
                }
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
        >
            <input
                type="file"
                accept="image/*"
                id="file-input"
                class="hidden"
                on:change=on_change
            />
            <label for="file-input" class="upload-label">
                <div class="upload-icon">"⬆"</div>
                <p>"Drag & drop an image or click to browse"</p>
                <p class="text-muted">"Supports JPG, PNG files"</p>
            </label>
        </div>
    }
}
