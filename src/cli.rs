use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snapcheck")]
#[command(about = "画像を分類APIに送信して判定結果を表示", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像を送信して分類結果を表示
    Analyze {
        /// 画像ファイル（省略時は入力を求める）
        image: Option<PathBuf>,

        /// 分類APIのURL（例: http://127.0.0.1:5000/analyze）
        #[arg(short, long)]
        endpoint: Option<String>,

        /// スピナーを表示しない
        #[arg(long)]
        no_progress: bool,
    },

    /// 設定を表示・変更
    Config {
        /// 現在の設定を表示
        #[arg(long)]
        show: bool,

        /// 分類APIのURLを保存
        #[arg(long)]
        set_endpoint: Option<String>,

        /// 設定を初期値に戻す
        #[arg(long)]
        reset: bool,
    },
}
