//! 画像プレビューコンポーネント

use leptos::prelude::*;

#[component]
pub fn ImagePreview<F>(image_url: String, title: &'static str, on_download: F) -> impl IntoView
where
    F: Fn() + 'static,
{
    view! {
        <div class="image-preview">
            <div class="image-frame">
                <img src=image_url alt=title />
            </div>
            <button
                class="download-button"
                title="Download image"
                on:click=move |_| on_download()
            >
                "⬇"
            </button>
        </div>
    }
}
