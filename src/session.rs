//! 端末でのアップロード制御
//!
//! Web版と同じ `UploadController` にイベントを渡し、返ってきた副作用を
//! その場で順に実行する。

use crate::image_file::LocalImage;
use indicatif::{ProgressBar, ProgressStyle};
use snapcheck_common::{submit, Classifier, Effect, Event, Messages, UploadController};
use std::collections::VecDeque;
use std::time::Duration;

pub struct Session<C> {
    controller: UploadController<LocalImage>,
    classifier: C,
    notices: Vec<String>,
    show_progress: bool,
}

impl<C: Classifier<LocalImage>> Session<C> {
    pub fn new(messages: Messages, classifier: C) -> Self {
        Self {
            controller: UploadController::new(messages),
            classifier,
            notices: Vec::new(),
            show_progress: true,
        }
    }

    /// スピナーを表示しない（テスト・パイプ出力用）
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    pub fn controller(&self) -> &UploadController<LocalImage> {
        &self.controller
    }

    /// これまでに出した通知
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// イベントを適用し、連鎖する副作用がなくなるまで実行する
    pub async fn dispatch(&mut self, event: Event<LocalImage>) {
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            for effect in self.controller.handle(event) {
                match effect {
                    Effect::ReadPreview { selection, image } => {
                        queue.push_back(Event::PreviewLoaded {
                            selection,
                            data_url: image.data_url(),
                        });
                    }
                    Effect::Submit { request, image } => {
                        let spinner = self.spinner();
                        let completed = submit(&self.classifier, request, &image).await;
                        if let Some(spinner) = spinner {
                            spinner.finish_and_clear();
                        }
                        queue.push_back(completed);
                    }
                    Effect::Notify(message) => {
                        eprintln!("⚠ {}", message);
                        self.notices.push(message);
                    }
                }
            }
        }
    }

    fn spinner(&self) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(self.controller.result_text());
        spinner.enable_steady_tick(Duration::from_millis(100));
        Some(spinner)
    }
}
