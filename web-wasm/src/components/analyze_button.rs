//! 解析ボタン

use leptos::prelude::*;
use snapcheck_common::Event;

use crate::app::UploadHandle;

#[component]
pub fn AnalyzeButton(handle: UploadHandle) -> impl IntoView {
    let is_busy = move || handle.with(|c| c.is_busy());

    view! {
        <div class="actions">
            <button
                class="btn btn-primary"
                id="analyzeButton"
                disabled=move || !handle.with(|c| c.analyze_enabled())
                on:click=move |_| handle.dispatch(Event::AnalyzeRequested)
            >
                {move || if is_busy() { "Analyzing..." } else { "Analyze" }}
            </button>
        </div>
    }
}
