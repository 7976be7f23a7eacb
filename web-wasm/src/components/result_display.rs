//! 解析結果の表示

use leptos::prelude::*;
use snapcheck_common::Phase;

use crate::app::UploadHandle;

#[component]
pub fn ResultDisplay(handle: UploadHandle) -> impl IntoView {
    let phase = move || handle.with(|c| c.phase());

    view! {
        <div
            class="result"
            class:busy=move || phase() == Phase::InFlight
            class:failed=move || phase() == Phase::Failed
        >
            <p id="prediction">{move || handle.with(|c| c.result_text())}</p>
        </div>
    }
}
