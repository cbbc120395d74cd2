//! エラー表示コンポーネント

use leptos::prelude::*;

#[component]
pub fn ErrorBanner(error: Memo<Option<String>>) -> impl IntoView {
    move || {
        error.get().map(|message| {
            view! {
                <div class="error-banner" role="alert">
                    <span class="error-icon">"⚠"</span>
                    <p>{message}</p>
                </div>
            }
        })
    }
}
