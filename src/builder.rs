//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use crate::api::{ConversionTarget, TableLayout};
use crate::error::XlsxToLuaError;
use crate::formatter::CellFormatter;
use crate::grid::SheetGrid;
use crate::output::LuaWriter;
use crate::security::SecurityConfig;
use std::io::{Read, Seek, Write};

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone, Default)]
pub(crate) struct ConversionConfig {
    /// 変換ターゲット
    pub target: ConversionTarget,

    /// 入力に対するセキュリティ制限
    pub security: SecurityConfig,
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsx2lua::{ConversionTarget, ConverterBuilder};
///
/// # fn main() -> Result<(), xlsx2lua::XlsxToLuaError> {
/// let converter = ConverterBuilder::new()
///     .with_target(ConversionTarget::Server)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 変換ターゲット: クライアント
    /// - 入力サイズ上限: 2GB
    pub fn new() -> Self {
        Self::default()
    }

    /// 変換ターゲット（クライアント / サーバー）を指定する
    pub fn with_target(mut self, target: ConversionTarget) -> Self {
        self.config.target = target;
        self
    }

    /// 入力ファイルの最大サイズ（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.security.max_input_file_size = bytes;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `XlsxToLuaError::Config(String)`: 入力サイズ上限が0の場合
    pub fn build(self) -> Result<Converter, XlsxToLuaError> {
        if self.config.security.max_input_file_size == 0 {
            return Err(XlsxToLuaError::Config(
                "Maximum input size must be greater than 0".to_string(),
            ));
        }

        Ok(Converter::new(self.config))
    }
}

/// 変換処理のファサード
///
/// Excelファイルの先頭シートを、レイアウトに応じてLuaテーブルに変換します。
///
/// 変換結果はいったんメモリ上に完成させてから出力先に書き込むため、
/// 変換が途中で失敗した場合、出力先には何も書き込まれません。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsx2lua::ConverterBuilder;
/// use std::fs::File;
///
/// # fn main() -> Result<(), xlsx2lua::XlsxToLuaError> {
/// let converter = ConverterBuilder::new().build()?;
/// let input = File::open("monster.xlsx")?;
/// let output = File::create("monster.lua")?;
/// converter.convert(input, output)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,

    /// セルフォーマッター
    formatter: CellFormatter,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self {
            formatter: CellFormatter::new(),
            config,
        }
    }

    /// 変換ターゲット
    pub fn target(&self) -> ConversionTarget {
        self.config.target
    }

    /// ExcelファイルをLuaテーブルに変換
    ///
    /// # 処理フロー
    ///
    /// 1. ワークブックを開き、先頭シートをテキストグリッドとして読み込む
    /// 2. A1セルのマーカーからレイアウトを判定
    /// 3. レイアウトに応じた変換でLuaテーブルを生成
    /// 4. 完成した出力を書き込む
    ///
    /// # 戻り値
    ///
    /// * `Ok(TableLayout)` - 変換に成功した場合、判定されたレイアウト
    /// * `Err(XlsxToLuaError)` - エラーが発生した場合
    pub fn convert<R: Read + Seek, W: Write>(
        &self,
        input: R,
        output: W,
    ) -> Result<TableLayout, XlsxToLuaError> {
        let mut parser = crate::parser::WorkbookParser::open(input, &self.config.security)?;
        let grid = parser.first_sheet(&self.formatter)?;
        self.convert_grid(&grid, output)
    }

    /// 読み込み済みのグリッドをLuaテーブルに変換
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use xlsx2lua::{ConverterBuilder, SheetGrid, TableLayout};
    ///
    /// # fn main() -> Result<(), xlsx2lua::XlsxToLuaError> {
    /// let rows = [
    ///     vec!["id", "hp"],
    ///     vec!["number", "number"],
    ///     vec!["0", "0"],
    ///     vec!["ID", "HP"],
    ///     vec!["1001", "30"],
    /// ];
    /// let grid = SheetGrid::from_rows(
    ///     rows.iter()
    ///         .map(|row| row.iter().map(|cell| cell.to_string()).collect())
    ///         .collect(),
    /// );
    ///
    /// let converter = ConverterBuilder::new().build()?;
    /// let mut output = Vec::new();
    /// let layout = converter.convert_grid(&grid, &mut output)?;
    ///
    /// assert_eq!(layout, TableLayout::Horizontal);
    /// assert_eq!(
    ///     String::from_utf8(output).unwrap(),
    ///     "return\n{\n[1001] = {id=1001,hp=30,},\n}\n"
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert_grid<W: Write>(
        &self,
        grid: &SheetGrid,
        mut output: W,
    ) -> Result<TableLayout, XlsxToLuaError> {
        let layout = TableLayout::classify(grid);

        let mut buffer = Vec::new();
        crate::table::render_table(
            grid,
            layout,
            self.config.target,
            &mut LuaWriter::new(&mut buffer),
        )?;

        output.write_all(&buffer)?;
        output.flush()?;

        Ok(layout)
    }

    /// ExcelファイルをLuaテーブルの文字列に変換
    pub fn convert_to_string<R: Read + Seek>(&self, input: R) -> Result<String, XlsxToLuaError> {
        let mut buffer = Vec::new();
        self.convert(input, &mut buffer)?;

        let result = String::from_utf8(buffer).map_err(|e| {
            XlsxToLuaError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        Ok(result)
    }
}
