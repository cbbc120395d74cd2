//! 検出セッションの状態
//!
//! 画面が保持する一時的な状態をまとめたもの:
//! - 選択中の画像（ファイルハンドル + 元画像プレビュー）
//! - 結果プレビュー
//! - 処理中フラグ（同時に送れるリクエストは1件まで）
//! - エラーメッセージ
//!
//! `F` はプラットフォームのファイルハンドル、`P` はプレビューハンドル。
//! プレビューは自分のリソースを所有し、置き換え・破棄で解放される。

use crate::error::{Error, Result};
use crate::image::is_image_mime;
use crate::messages::failure_message;

/// 選択された画像
#[derive(Debug, Clone)]
pub struct Selection<F, P> {
    pub file: F,
    pub file_name: String,
    pub mime_type: String,
    pub preview: P,
}

/// 送信中リクエストと選択の対応
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionTicket {
    generation: u64,
}

#[derive(Debug)]
pub struct DetectionSession<F, P> {
    selection: Option<Selection<F, P>>,
    result: Option<P>,
    busy: bool,
    error: Option<String>,
    generation: u64,
}

impl<F, P> Default for DetectionSession<F, P> {
    fn default() -> Self {
        Self {
            selection: None,
            result: None,
            busy: false,
            error: None,
            generation: 0,
        }
    }
}

impl<F, P> DetectionSession<F, P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 画像を選択する
    ///
    /// 画像以外は拒否して状態を変えない。
    /// 受け入れた場合は前回の結果とエラーを消す。
    pub fn select(&mut self, selection: Selection<F, P>) -> Result<()> {
        if !is_image_mime(&selection.mime_type) {
            return Err(Error::NotAnImage(selection.file_name));
        }

        self.selection = Some(selection);
        self.result = None;
        self.error = None;
        self.generation += 1;
        Ok(())
    }

    /// 検出リクエストを開始する
    pub fn begin_detection(&mut self) -> Result<DetectionTicket> {
        if self.selection.is_none() {
            return Err(Error::NoSelection);
        }
        if self.busy {
            return Err(Error::Busy);
        }

        self.busy = true;
        self.error = None;
        Ok(DetectionTicket {
            generation: self.generation,
        })
    }

    /// 成功を反映する。古い選択向けの結果は捨てる。
    ///
    /// 結果を保存した場合にtrueを返す。
    pub fn complete_success(&mut self, ticket: DetectionTicket, preview: P) -> bool {
        self.busy = false;
        if !self.is_current(ticket) {
            return false;
        }
        self.result = Some(preview);
        true
    }

    /// 失敗を反映する。古い選択向けの失敗は表示しない。
    pub fn complete_failure(&mut self, ticket: DetectionTicket, message: &str) -> bool {
        self.busy = false;
        if !self.is_current(ticket) {
            return false;
        }
        self.error = Some(failure_message(message));
        true
    }

    /// リクエスト以外の失敗（ダウンロード等）を表示する
    pub fn report_error(&mut self, message: &str) {
        self.error = Some(failure_message(message));
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn is_current(&self, ticket: DetectionTicket) -> bool {
        ticket.generation == self.generation
    }

    pub fn selection(&self) -> Option<&Selection<F, P>> {
        self.selection.as_ref()
    }

    pub fn file(&self) -> Option<&F> {
        self.selection.as_ref().map(|s| &s.file)
    }

    pub fn file_name(&self) -> Option<&str> {
        self.selection.as_ref().map(|s| s.file_name.as_str())
    }

    pub fn original_preview(&self) -> Option<&P> {
        self.selection.as_ref().map(|s| &s.preview)
    }

    pub fn result_preview(&self) -> Option<&P> {
        self.result.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 送信ボタンを押せるか
    pub fn can_submit(&self) -> bool {
        self.selection.is_some() && !self.busy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::GENERIC_FAILURE;

    type TestSession = DetectionSession<&'static str, String>;

    fn selection(name: &str, mime: &str) -> Selection<&'static str, String> {
        Selection {
            file: "handle",
            file_name: name.to_string(),
            mime_type: mime.to_string(),
            preview: format!("blob:{}", name),
        }
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = TestSession::new();
        assert!(session.selection().is_none());
        assert!(session.result_preview().is_none());
        assert!(!session.is_busy());
        assert!(session.error().is_none());
        assert!(!session.can_submit());
    }

    #[test]
    fn test_select_image() {
        let mut session = TestSession::new();
        session.select(selection("uav.jpg", "image/jpeg")).unwrap();

        assert_eq!(session.file_name(), Some("uav.jpg"));
        assert_eq!(session.original_preview().map(String::as_str), Some("blob:uav.jpg"));
        assert_eq!(session.file(), Some(&"handle"));
        assert!(session.can_submit());
    }

    #[test]
    fn test_select_rejects_non_image() {
        let mut session = TestSession::new();
        session.select(selection("uav.jpg", "image/jpeg")).unwrap();

        let err = session.select(selection("notes.txt", "text/plain")).unwrap_err();
        assert_eq!(err, Error::NotAnImage("notes.txt".to_string()));
        // 既存の選択は残る
        assert_eq!(session.file_name(), Some("uav.jpg"));
    }

    #[test]
    fn test_select_clears_result_and_error() {
        let mut session = TestSession::new();
        session.select(selection("a.jpg", "image/jpeg")).unwrap();
        let ticket = session.begin_detection().unwrap();
        assert!(session.complete_success(ticket, "blob:result".to_string()));
        session.report_error("Failed to download image");

        session.select(selection("b.png", "image/png")).unwrap();
        assert!(session.result_preview().is_none());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_begin_without_selection() {
        let mut session = TestSession::new();
        assert_eq!(session.begin_detection().unwrap_err(), Error::NoSelection);
        assert!(!session.is_busy());
    }

    #[test]
    fn test_only_one_request_in_flight() {
        let mut session = TestSession::new();
        session.select(selection("a.jpg", "image/jpeg")).unwrap();

        let ticket = session.begin_detection().unwrap();
        assert!(session.is_busy());
        assert!(!session.can_submit());
        assert_eq!(session.begin_detection().unwrap_err(), Error::Busy);

        session.complete_success(ticket, "blob:result".to_string());
        assert!(!session.is_busy());
        assert!(session.can_submit());
    }

    #[test]
    fn test_success_renders_result() {
        let mut session = TestSession::new();
        session.select(selection("a.jpg", "image/jpeg")).unwrap();
        let ticket = session.begin_detection().unwrap();

        assert!(session.complete_success(ticket, "blob:result".to_string()));
        assert_eq!(session.result_preview().map(String::as_str), Some("blob:result"));
        assert!(session.error().is_none());
    }

    #[test]
    fn test_failure_renders_error() {
        let mut session = TestSession::new();
        session.select(selection("a.jpg", "image/jpeg")).unwrap();
        let ticket = session.begin_detection().unwrap();

        assert!(session.complete_failure(ticket, "Detection failed"));
        assert_eq!(session.error(), Some("Detection failed"));
        assert!(session.result_preview().is_none());
        assert!(!session.is_busy());
    }

    #[test]
    fn test_failure_without_message() {
        let mut session = TestSession::new();
        session.select(selection("a.jpg", "image/jpeg")).unwrap();
        let ticket = session.begin_detection().unwrap();

        session.complete_failure(ticket, "");
        assert_eq!(session.error(), Some(GENERIC_FAILURE));
    }

    #[test]
    fn test_begin_clears_previous_error() {
        let mut session = TestSession::new();
        session.select(selection("a.jpg", "image/jpeg")).unwrap();
        let ticket = session.begin_detection().unwrap();
        session.complete_failure(ticket, "Detection failed");

        session.begin_detection().unwrap();
        assert!(session.error().is_none());
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut session = TestSession::new();
        session.select(selection("a.jpg", "image/jpeg")).unwrap();
        let ticket = session.begin_detection().unwrap();

        // 送信中に別の画像を選択
        session.select(selection("b.jpg", "image/jpeg")).unwrap();

        assert!(!session.complete_success(ticket, "blob:stale".to_string()));
        assert!(session.result_preview().is_none());
        assert!(!session.is_busy());
        assert_eq!(session.file_name(), Some("b.jpg"));
    }

    #[test]
    fn test_stale_failure_is_not_shown() {
        let mut session = TestSession::new();
        session.select(selection("a.jpg", "image/jpeg")).unwrap();
        let ticket = session.begin_detection().unwrap();
        session.select(selection("b.jpg", "image/jpeg")).unwrap();

        assert!(!session.complete_failure(ticket, "Detection failed"));
        assert!(session.error().is_none());
    }

    #[test]
    fn test_report_and_clear_error() {
        let mut session = TestSession::new();
        session.report_error("Failed to download image");
        assert_eq!(session.error(), Some("Failed to download image"));

        session.clear_error();
        assert!(session.error().is_none());
    }
}
