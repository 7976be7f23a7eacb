//! 選択画像のプレビュー

use leptos::prelude::*;

use crate::app::UploadHandle;

#[component]
pub fn ImagePreview(handle: UploadHandle) -> impl IntoView {
    let preview = move || handle.with(|c| c.preview().map(str::to_string));
    let alt = move || handle.with(|c| c.upload_label());

    view! {
        <div class="image-preview" id="imagePreview">
            {move || preview().map(|src| view! { <img src=src alt=alt /> })}
        </div>
    }
}
