//! アップロード制御（状態機械）
//!
//! 画面の状態はすべて `SubmissionState` から導出する。ボタンの有効/無効や
//! 結果表示の文言をDOM側で保持しない。
//!
//! 遷移は `SubmissionState::step` に閉じており、DOMも通信も扱わない。
//! 非同期処理（プレビュー読み込み・分類API呼び出し）は `Effect` として
//! ホストに返し、完了したらホストが `Event` として戻す。
//!
//! ```text
//! NoSelection --FileSelected--> Ready --AnalyzeRequested--> InFlight
//!                                 ^                          |    ^
//!                                 |          Completed(Ok/Err) |    | AnalyzeRequested
//!                                 |                          v    |
//!                                 +--FileSelected(None)-- Succeeded / Failed
//! ```
//!
//! 解析後に別の画像を選んでも `Succeeded` / `Failed` のまま選択だけが
//! 替わり、前回の結果表示は次の解析まで残る。

use crate::config::Messages;
use crate::error::AnalysisError;
use crate::parser::format_prediction;
use crate::types::{ImageSource, Prediction, RequestId, SelectionId};

/// 選択中の画像
#[derive(Debug, Clone)]
pub struct Selection<F> {
    pub id: SelectionId,
    pub image: F,
    /// 表示中のプレビュー（Data URL）
    pub preview: Option<String>,
}

/// 送信状態
#[derive(Debug, Clone)]
pub enum SubmissionState<F> {
    NoSelection,
    Ready(Selection<F>),
    InFlight {
        selection: Selection<F>,
        request: RequestId,
    },
    Succeeded {
        selection: Selection<F>,
        prediction: Prediction,
    },
    Failed {
        selection: Selection<F>,
        error: AnalysisError,
    },
}

impl<F> Default for SubmissionState<F> {
    fn default() -> Self {
        SubmissionState::NoSelection
    }
}

/// `SubmissionState` からデータを除いたもの
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NoSelection,
    Ready,
    InFlight,
    Succeeded,
    Failed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::NoSelection => "no-selection",
            Phase::Ready => "ready",
            Phase::InFlight => "in-flight",
            Phase::Succeeded => "succeeded",
            Phase::Failed => "failed",
        }
    }
}

/// ホストから届くイベント
#[derive(Debug, Clone)]
pub enum Event<F> {
    /// ファイル選択（`None` は空の選択。ピッカーのキャンセルなど）
    FileSelected(Option<F>),
    PreviewLoaded {
        selection: SelectionId,
        data_url: String,
    },
    PreviewFailed {
        selection: SelectionId,
        reason: String,
    },
    AnalyzeRequested,
    Completed {
        request: RequestId,
        outcome: Result<Prediction, AnalysisError>,
    },
}

/// ホストに実行させる副作用
#[derive(Debug, Clone)]
pub enum Effect<F> {
    /// 画像をData URLとして読み込み、`PreviewLoaded` / `PreviewFailed` を返す
    ReadPreview { selection: SelectionId, image: F },
    /// `POST /analyze` を1回送り、`Completed` を返す
    Submit { request: RequestId, image: F },
    /// ブロッキングな通知（alertなど）
    Notify(String),
}

/// 連番の払い出し
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    selection: u64,
    request: u64,
}

impl IdAllocator {
    fn next_selection(&mut self) -> SelectionId {
        self.selection += 1;
        SelectionId(self.selection)
    }

    fn next_request(&mut self) -> RequestId {
        self.request += 1;
        RequestId(self.request)
    }
}

impl<F> SubmissionState<F> {
    pub fn phase(&self) -> Phase {
        match self {
            SubmissionState::NoSelection => Phase::NoSelection,
            SubmissionState::Ready(_) => Phase::Ready,
            SubmissionState::InFlight { .. } => Phase::InFlight,
            SubmissionState::Succeeded { .. } => Phase::Succeeded,
            SubmissionState::Failed { .. } => Phase::Failed,
        }
    }

    pub fn selection(&self) -> Option<&Selection<F>> {
        match self {
            SubmissionState::NoSelection => None,
            SubmissionState::Ready(selection)
            | SubmissionState::InFlight { selection, .. }
            | SubmissionState::Succeeded { selection, .. }
            | SubmissionState::Failed { selection, .. } => Some(selection),
        }
    }

    fn selection_mut(&mut self) -> Option<&mut Selection<F>> {
        match self {
            SubmissionState::NoSelection => None,
            SubmissionState::Ready(selection)
            | SubmissionState::InFlight { selection, .. }
            | SubmissionState::Succeeded { selection, .. }
            | SubmissionState::Failed { selection, .. } => Some(selection),
        }
    }
}

impl<F: ImageSource> SubmissionState<F> {
    /// 1イベント分の遷移
    pub fn step(
        self,
        event: Event<F>,
        ids: &mut IdAllocator,
        messages: &Messages,
    ) -> (Self, Vec<Effect<F>>) {
        match event {
            Event::FileSelected(Some(image)) => self.select(image, ids),
            Event::FileSelected(None) => self.deselect(),
            Event::PreviewLoaded { selection, data_url } => self.mount_preview(selection, data_url),
            Event::PreviewFailed { selection, reason } => {
                log::warn!("{}: preview unavailable: {}", selection, reason);
                (self, Vec::new())
            }
            Event::AnalyzeRequested => self.analyze(ids, messages),
            Event::Completed { request, outcome } => self.complete(request, outcome),
        }
    }

    fn select(self, image: F, ids: &mut IdAllocator) -> (Self, Vec<Effect<F>>) {
        let selection = Selection {
            id: ids.next_selection(),
            image,
            preview: None,
        };
        log::info!("{}: selected {}", selection.id, selection.image.file_name());

        let effects = vec![Effect::ReadPreview {
            selection: selection.id,
            image: selection.image.clone(),
        }];

        // 送信中・解析後は状態を保ったまま選択だけ差し替える。
        // 前回の結果表示は次の解析まで残る。
        let state = match self {
            SubmissionState::InFlight { request, .. } => {
                SubmissionState::InFlight { selection, request }
            }
            SubmissionState::Succeeded { prediction, .. } => SubmissionState::Succeeded {
                selection,
                prediction,
            },
            SubmissionState::Failed { error, .. } => SubmissionState::Failed { selection, error },
            SubmissionState::NoSelection | SubmissionState::Ready(_) => {
                SubmissionState::Ready(selection)
            }
        };
        (state, effects)
    }

    fn deselect(self) -> (Self, Vec<Effect<F>>) {
        match self {
            SubmissionState::InFlight { selection, request } => {
                log::debug!("{}: empty selection ignored while in flight", request);
                (SubmissionState::InFlight { selection, request }, Vec::new())
            }
            other => {
                if let Some(selection) = other.selection() {
                    log::info!("{}: selection cleared", selection.id);
                }
                (SubmissionState::NoSelection, Vec::new())
            }
        }
    }

    fn mount_preview(mut self, id: SelectionId, data_url: String) -> (Self, Vec<Effect<F>>) {
        match self.selection_mut() {
            Some(selection) if selection.id == id => selection.preview = Some(data_url),
            _ => log::debug!("{}: stale preview dropped", id),
        }
        (self, Vec::new())
    }

    fn analyze(self, ids: &mut IdAllocator, messages: &Messages) -> (Self, Vec<Effect<F>>) {
        let selection = match self {
            SubmissionState::NoSelection => {
                log::info!("analyze requested without a selection");
                return (
                    SubmissionState::NoSelection,
                    vec![Effect::Notify(messages.no_selection.clone())],
                );
            }
            SubmissionState::InFlight { selection, request } => {
                log::debug!("{}: analyze ignored, request still in flight", request);
                return (SubmissionState::InFlight { selection, request }, Vec::new());
            }
            SubmissionState::Ready(selection)
            | SubmissionState::Succeeded { selection, .. }
            | SubmissionState::Failed { selection, .. } => selection,
        };

        let request = ids.next_request();
        let effects = vec![Effect::Submit {
            request,
            image: selection.image.clone(),
        }];
        (SubmissionState::InFlight { selection, request }, effects)
    }

    fn complete(
        self,
        request: RequestId,
        outcome: Result<Prediction, AnalysisError>,
    ) -> (Self, Vec<Effect<F>>) {
        let (selection, outstanding) = match self {
            SubmissionState::InFlight {
                selection,
                request: outstanding,
            } => (selection, outstanding),
            other => {
                log::warn!("{}: completion without an outstanding request dropped", request);
                return (other, Vec::new());
            }
        };

        if outstanding != request {
            log::warn!("{}: completion dropped, {} is outstanding", request, outstanding);
            let state = SubmissionState::InFlight {
                selection,
                request: outstanding,
            };
            return (state, Vec::new());
        }

        let state = match outcome {
            Ok(prediction) => {
                log::info!("{}: {}", request, format_prediction(&prediction));
                SubmissionState::Succeeded {
                    selection,
                    prediction,
                }
            }
            Err(error) => {
                log::warn!("{}: analysis failed ({:?}): {}", request, error.kind(), error);
                SubmissionState::Failed { selection, error }
            }
        };
        (state, Vec::new())
    }
}

/// アップロード制御
///
/// 状態・連番・文言をまとめて持つ。ホストは `handle` にイベントを渡し、
/// 返ってきた `Effect` を実行するだけでよい。
#[derive(Debug, Clone)]
pub struct UploadController<F> {
    state: SubmissionState<F>,
    ids: IdAllocator,
    messages: Messages,
}

impl<F> Default for UploadController<F> {
    fn default() -> Self {
        Self::new(Messages::default())
    }
}

impl<F> UploadController<F> {
    pub fn new(messages: Messages) -> Self {
        Self {
            state: SubmissionState::NoSelection,
            ids: IdAllocator::default(),
            messages,
        }
    }

    pub fn state(&self) -> &SubmissionState<F> {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// 解析ボタンを押せるか
    pub fn analyze_enabled(&self) -> bool {
        matches!(
            self.phase(),
            Phase::Ready | Phase::Succeeded | Phase::Failed
        )
    }

    /// 送信中か（同時送信を防ぐフラグ）
    pub fn is_busy(&self) -> bool {
        self.phase() == Phase::InFlight
    }

    /// 結果表示欄の文言
    pub fn result_text(&self) -> String {
        match &self.state {
            SubmissionState::NoSelection | SubmissionState::Ready(_) => {
                self.messages.idle_result.clone()
            }
            SubmissionState::InFlight { .. } => self.messages.in_progress.clone(),
            SubmissionState::Succeeded { prediction, .. } => format_prediction(prediction),
            SubmissionState::Failed { .. } => self.messages.failure.clone(),
        }
    }

    pub fn preview(&self) -> Option<&str> {
        self.state.selection().and_then(|s| s.preview.as_deref())
    }

    pub fn selected(&self) -> Option<&F> {
        self.state.selection().map(|s| &s.image)
    }

    /// 最後の失敗（ログ・CLIの終了コード用）
    pub fn last_error(&self) -> Option<&AnalysisError> {
        match &self.state {
            SubmissionState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl<F: ImageSource> UploadController<F> {
    pub fn handle(&mut self, event: Event<F>) -> Vec<Effect<F>> {
        let before = self.phase();
        let state = std::mem::take(&mut self.state);
        let (state, effects) = state.step(event, &mut self.ids, &self.messages);
        self.state = state;

        if before != self.phase() {
            log::debug!("{} -> {}", before.as_str(), self.phase().as_str());
        }
        effects
    }

    /// アップロード欄のラベル（選択中のファイル名）
    pub fn upload_label(&self) -> String {
        self.selected()
            .map(|image| image.file_name())
            .unwrap_or_else(|| self.messages.upload_placeholder.clone())
    }
}
