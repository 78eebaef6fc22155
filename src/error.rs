//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// xlsx2luaクレート全体で使用するエラー型
///
/// Excelファイルの読み込み、テーブル解釈、Lua出力、ディレクトリ走査中に
/// 発生するすべてのエラーを統一的に扱います。
///
/// # エラーの分類
///
/// - 設定エラー（`Config`, `Json`）: 変換開始前に処理を中断する
/// - ファイル単位のエラー（`InvalidFileName`, `InvalidFormat`, `Parse`,
///   `SecurityViolation`, `Io`）: 報告して該当ファイルをスキップする
/// - スキーマエラー（`Schema`）: 実行全体を即座に停止する
///
/// どの分類に属するかは[`XlsxToLuaError::is_fatal`]で判定できます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsx2lua::XlsxToLuaError;
/// use std::fs::File;
///
/// fn read_excel_file(path: &str) -> Result<(), XlsxToLuaError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     // ... 処理 ...
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum XlsxToLuaError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Excelファイルの解析中に発生したエラー（calamine由来）
    #[error("Failed to parse Excel file: {0}")]
    Parse(#[from] calamine::Error),

    /// 設定ファイル（config.json）のデコードエラー
    #[error("Failed to decode config file: {0}")]
    Json(#[from] serde_json::Error),

    /// ディレクトリ走査中のエラー
    #[error("Directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// 入力・出力ルートが存在しない場合や、ビルダーの設定値が不正な場合に発生します。
    #[error("Configuration error: {0}")]
    Config(String),

    /// ファイル名が変換対象の形式に一致しない
    ///
    /// `<name>.xlsx`の形（ドットで区切られた2要素）でないファイルに対して発生します。
    #[error("File name '{name}' rejected: {message}")]
    InvalidFileName {
        /// 対象のファイル名
        name: String,
        /// 拒否の理由
        message: String,
    },

    /// シートの構造が変換に必要な最小条件を満たさない
    ///
    /// 行数・列数の不足、XLSX以外のワークブック、シートが存在しない場合などです。
    #[error("Invalid table format: {0}")]
    InvalidFormat(String),

    /// 入力サイズの上限を超えた
    #[error("Security violation: {0}")]
    SecurityViolation(String),

    /// フィールド定義の参照がスキーマの範囲外
    ///
    /// 名前や型の参照がヘッダーで宣言された範囲を超えた場合に発生します。
    /// 構造的に壊れたスキーマを部分的に出力することはできないため、
    /// このエラーは実行全体を停止させます。
    ///
    /// # 例
    ///
    /// ```rust
    /// use xlsx2lua::XlsxToLuaError;
    ///
    /// let error = XlsxToLuaError::Schema {
    ///     cell: "C5".to_string(),
    ///     message: "field type is missing".to_string(),
    /// };
    /// assert!(error.is_fatal());
    /// ```
    #[error("Schema error at cell {cell}: {message}")]
    Schema {
        /// エラーが発生したセルの座標（A1記法）
        cell: String,
        /// エラーの詳細メッセージ
        message: String,
    },
}

impl XlsxToLuaError {
    /// 実行全体を停止すべきエラーかどうか
    pub fn is_fatal(&self) -> bool {
        matches!(self, XlsxToLuaError::Schema { .. })
    }
}
