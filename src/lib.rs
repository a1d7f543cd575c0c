//! translation-curator
//!
//! クラウド翻訳のキュレーション用の編集セッション。未送信の編集の追跡、レコード選択、
//! ステータス表示、取得・編集・送信のライフサイクルを提供する。

pub mod config;
pub mod gateway;
pub mod session;
pub mod status;
pub mod storage;
#[cfg(test)]
mod test_utils;
pub mod types;

pub use session::SessionController;
