//! Parser Module
//!
//! calamineを使用したExcelファイル解析の基礎実装。
//! 変換に使用するのは各ファイルの先頭シートのみです。

use calamine::{open_workbook_auto_from_rs, Reader, Sheets, Xlsx};
use std::io::{Cursor, Read, Seek};

use crate::error::XlsxToLuaError;
use crate::formatter::CellFormatter;
use crate::grid::SheetGrid;
use crate::security::SecurityConfig;

/// ワークブックパーサー
///
/// calamineのラッパーとして、ワークブックレベルの操作を提供します。
pub(crate) struct WorkbookParser {
    /// calamineのワークブック（XLSX形式のみサポート）
    workbook: Xlsx<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// ワークブックを開く
    ///
    /// 入力全体をメモリに読み込み、サイズ制限を検証してからcalamineで開きます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - ワークブックの読み込みに成功した場合
    /// * `Err(XlsxToLuaError::SecurityViolation)` - 入力サイズが上限を超えた場合
    /// * `Err(XlsxToLuaError::Parse)` - コンテナとして読み込めない場合
    /// * `Err(XlsxToLuaError::InvalidFormat)` - XLSX以外のワークブックの場合
    pub fn open<R: Read + Seek>(
        mut reader: R,
        security: &SecurityConfig,
    ) -> Result<Self, XlsxToLuaError> {
        let mut buffer = Vec::new();
        let bytes_read = reader.read_to_end(&mut buffer)?;
        security.check_input_size(bytes_read)?;

        let sheets = open_workbook_auto_from_rs(Cursor::new(buffer)).map_err(XlsxToLuaError::Parse)?;
        match sheets {
            Sheets::Xlsx(workbook) => Ok(Self { workbook }),
            _ => Err(XlsxToLuaError::InvalidFormat(
                "Only XLSX format is supported".to_string(),
            )),
        }
    }

    /// すべてのシート名を取得
    pub fn get_sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// 先頭シートをテキストグリッドとして読み込む
    ///
    /// # 戻り値
    ///
    /// * `Ok(SheetGrid)` - 先頭シートのグリッド
    /// * `Err(XlsxToLuaError::InvalidFormat)` - シートが1つも存在しない場合
    /// * `Err(XlsxToLuaError::Parse)` - シートの読み込みに失敗した場合
    pub fn first_sheet(&mut self, formatter: &CellFormatter) -> Result<SheetGrid, XlsxToLuaError> {
        let sheet_name = self
            .get_sheet_names()
            .into_iter()
            .next()
            .ok_or_else(|| XlsxToLuaError::InvalidFormat("Workbook has no sheets".to_string()))?;

        let range = self
            .workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| XlsxToLuaError::Parse(e.into()))?;

        SheetGrid::from_range(&range, formatter)
    }
}

// 実際のXLSXファイルを使用するテストは統合テスト（tests/）で実装します。
