//! 検出ボタンコンポーネント
//!
//! 処理中は無効化し、スピナーと "Processing..." を表示する。

use leptos::prelude::*;

#[component]
pub fn DetectButton<F>(is_busy: Memo<bool>, on_detect: F) -> impl IntoView
where
    F: Fn() + 'static,
{
    view! {
        <button
            class="btn btn-primary detect-button"
            disabled=move || is_busy.get()
            on:click=move |_| on_detect()
        >
            <Show when=move || is_busy.get()>
                <span class="spinner"></span>
            </Show>
            {move || if is_busy.get() { "Processing..." } else { "Detect People" }}
        </button>
    }
}
