//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Search & Rescue Operation"</h1>
            <p class="text-muted">"Upload UAV imagery to detect people in search and rescue scenarios"</p>
        </header>
    }
}
