//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use std::fmt;

/// 変換ターゲット
///
/// 出力先の用途（クライアント用かサーバー用か）を表します。
/// フィールドの可視性タグと比較され、どのフィールドを出力するかを決定します。
/// プロセス全体で一度だけ選択され、実行中は変更されません。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConversionTarget {
    /// クライアント用（可視性タグ `1`）
    #[default]
    Client,

    /// サーバー用（可視性タグ `2`）
    Server,
}

impl ConversionTarget {
    /// コマンドライン引数からターゲットを決定する
    ///
    /// `"server"`のみがサーバーを選択し、それ以外（`"client"`を含む）は
    /// すべてクライアントとして扱います。
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use xlsx2lua::ConversionTarget;
    ///
    /// assert_eq!(ConversionTarget::from_arg("server"), ConversionTarget::Server);
    /// assert_eq!(ConversionTarget::from_arg("client"), ConversionTarget::Client);
    /// assert_eq!(ConversionTarget::from_arg("anything"), ConversionTarget::Client);
    /// ```
    pub fn from_arg(arg: &str) -> Self {
        if arg == "server" {
            ConversionTarget::Server
        } else {
            ConversionTarget::Client
        }
    }

    /// 可視性タグと比較される整数コード
    pub fn code(self) -> i64 {
        match self {
            ConversionTarget::Client => 1,
            ConversionTarget::Server => 2,
        }
    }
}

impl fmt::Display for ConversionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionTarget::Client => write!(f, "client"),
            ConversionTarget::Server => write!(f, "server"),
        }
    }
}

/// シートのレイアウト
///
/// 先頭セル（A1）のマーカーによって決定される、テーブルの解釈方式です。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableLayout {
    /// 横表: 1行が1レコード、1列が1フィールド（デフォルト）
    Horizontal,

    /// 縦表（複数レコード）: 1列が1レコード、1行が1フィールド
    ///
    /// A1セルが`#Vertical_Array`の場合に選択されます。
    VerticalArray,

    /// 縦表（単一レコード）: シート全体で1レコード
    ///
    /// A1セルが`#Vertical_Single`の場合に選択されます。
    VerticalSingle,
}

impl TableLayout {
    /// 縦表（複数レコード）を示すA1セルのマーカー
    pub const VERTICAL_ARRAY_MARKER: &'static str = "#Vertical_Array";

    /// 縦表（単一レコード）を示すA1セルのマーカー
    pub const VERTICAL_SINGLE_MARKER: &'static str = "#Vertical_Single";
}

impl fmt::Display for TableLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableLayout::Horizontal => write!(f, "horizontal"),
            TableLayout::VerticalArray => write!(f, "vertical array"),
            TableLayout::VerticalSingle => write!(f, "vertical single"),
        }
    }
}
