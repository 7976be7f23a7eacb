//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use snapcheck_common::{submit, ClientConfig, Effect, Event, UploadController};
use wasm_bindgen_futures::spawn_local;

use crate::api::classifier::FetchClassifier;
use crate::components::{
    analyze_button::AnalyzeButton,
    header::Header,
    image_preview::ImagePreview,
    result_display::ResultDisplay,
    upload_area::UploadArea,
};
use crate::config::load_config;
use crate::image_file::ImageFile;
use crate::preview::read_preview;

/// アプリケーションの状態へのハンドル
///
/// `web_sys::File` は `Send` でないため、コントローラはローカルストレージの
/// シグナルに置く。コピーして各コンポーネントに配る。
#[derive(Clone, Copy)]
pub struct UploadHandle {
    controller: RwSignal<UploadController<ImageFile>, LocalStorage>,
    classifier: StoredValue<FetchClassifier>,
}

impl UploadHandle {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            controller: RwSignal::new_local(UploadController::new(config.messages)),
            classifier: StoredValue::new(FetchClassifier::new(config.endpoint)),
        }
    }

    /// コントローラの状態を読む（リアクティブに追跡される）
    pub fn with<T>(self, f: impl FnOnce(&UploadController<ImageFile>) -> T) -> T {
        self.controller.with(f)
    }

    /// イベントを適用し、返ってきた副作用を実行する
    pub fn dispatch(self, event: Event<ImageFile>) {
        let effects = self
            .controller
            .try_update(|controller| controller.handle(event))
            .unwrap_or_default();

        for effect in effects {
            self.run(effect);
        }
    }

    fn run(self, effect: Effect<ImageFile>) {
        match effect {
            Effect::ReadPreview { selection, image } => spawn_local(async move {
                let event = match read_preview(&image).await {
                    Ok(data_url) => Event::PreviewLoaded {
                        selection,
                        data_url,
                    },
                    Err(reason) => Event::PreviewFailed { selection, reason },
                };
                self.dispatch(event);
            }),
            Effect::Submit { request, image } => {
                let classifier = self.classifier.get_value();
                spawn_local(async move {
                    let event = submit(&classifier, request, &image).await;
                    self.dispatch(event);
                });
            }
            Effect::Notify(message) => gloo::dialogs::alert(&message),
        }
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let handle = UploadHandle::new(load_config());

    view! {
        <div class="container">
            <Header />

            <UploadArea handle=handle />

            <ImagePreview handle=handle />

            <AnalyzeButton handle=handle />

            <ResultDisplay handle=handle />
        </div>
    }
}
