//! アップロードエリアコンポーネント

use leptos::prelude::*;
use snapcheck_common::Event;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

use crate::app::UploadHandle;
use crate::image_file::ImageFile;

#[component]
pub fn UploadArea(handle: UploadHandle) -> impl IntoView {
    let on_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };

        // 1枚目だけを使う（キャンセル時は空）
        let file = input
            .files()
            .and_then(|files| files.get(0))
            .map(ImageFile::from);
        handle.dispatch(Event::FileSelected(file));
    };

    view! {
        <div class="upload-area">
            <input
                type="file"
                id="imageUpload"
                accept="image/*"
                on:change=on_change
            />
            <label for="imageUpload" class="upload-label">
                <div class="upload-icon">"📷"</div>
                <span>{move || handle.with(|c| c.upload_label())}</span>
            </label>
            <p class="text-muted">"JPEG, PNG, WebP"</p>
        </div>
    }
}
