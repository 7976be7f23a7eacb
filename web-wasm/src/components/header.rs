//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Snapcheck"</h1>
            <p class="text-muted">"Upload an image to classify it"</p>
        </header>
    }
}
