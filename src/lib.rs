//! sar-detect: UAV画像の人物検出クライアント
//!
//! 検出サービス（`POST {api_url}/detect`）へ画像を送り、注釈付き画像を受け取る。

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
