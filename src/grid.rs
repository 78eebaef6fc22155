//! Grid Module
//!
//! calamineのセル範囲から、テキストセルの稠密なグリッド構造への変換を提供するモジュール。
//! 座標はシートの絶対座標（A1 = (0, 0)）で扱います。

use calamine::{Data, Range};

use crate::error::XlsxToLuaError;
use crate::formatter::CellFormatter;

/// テキストセルのグリッド
///
/// 1シート分のセルを行ごとのテキスト列として保持します。
/// 行の長さは揃っている必要はなく、存在しないセルは`None`として参照されます。
///
/// # 使用例
///
/// ```rust
/// use xlsx2lua::SheetGrid;
///
/// let grid = SheetGrid::from_rows(vec![
///     vec!["id".to_string(), "hp".to_string()],
///     vec!["1001".to_string()],
/// ]);
/// assert_eq!(grid.get_rows(), 2);
/// assert_eq!(grid.get_cols(), 2);
/// assert_eq!(grid.cell(1, 0), Some("1001"));
/// assert_eq!(grid.cell(1, 1), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetGrid {
    /// グリッドデータ（行 × 列）
    cells: Vec<Vec<String>>,

    /// 列数（シートの幅）
    cols: usize,
}

impl SheetGrid {
    /// 行ごとのテキストからグリッドを構築する
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { cells: rows, cols }
    }

    /// calamineのセル範囲からグリッドを構築する
    ///
    /// calamineの範囲は最初の使用セルから始まるため、絶対座標で
    /// (0, 0) から範囲の終端までを走査し、範囲外は空文字列で埋めます。
    /// 各行の末尾の空セルは取り除かれ、列数はシートの使用範囲の幅になります。
    pub(crate) fn from_range(
        range: &Range<Data>,
        formatter: &CellFormatter,
    ) -> Result<Self, XlsxToLuaError> {
        let Some((end_row, end_col)) = range.end() else {
            return Ok(Self::default());
        };

        let rows = end_row as usize + 1;
        let cols = end_col as usize + 1;
        let mut cells = Vec::with_capacity(rows);

        for row in 0..=end_row {
            let mut row_cells = Vec::with_capacity(cols);
            for col in 0..=end_col {
                let text = match range.get_value((row, col)) {
                    Some(value) => formatter.format_cell(value)?,
                    None => String::new(),
                };
                row_cells.push(text);
            }
            // 行末の空セルは存在しないセルとして扱う
            while row_cells.last().is_some_and(String::is_empty) {
                row_cells.pop();
            }
            cells.push(row_cells);
        }

        Ok(Self { cells, cols })
    }

    /// 行数
    pub fn get_rows(&self) -> usize {
        self.cells.len()
    }

    /// 列数（シートの幅）
    pub fn get_cols(&self) -> usize {
        self.cols
    }

    /// 指定行のセル（範囲外の行は空スライス）
    pub fn get_row(&self, row_idx: usize) -> &[String] {
        self.cells.get(row_idx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 指定座標のセルテキスト
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.get_row(row).get(col).map(String::as_str)
    }

    /// シートの範囲内のセルテキスト
    ///
    /// 範囲内で値を持たないセル（行末で省略されたセルを含む）は空文字列、
    /// シートの行数・列数を超える座標は`None`になります。
    pub fn cell_in_sheet(&self, row: usize, col: usize) -> Option<&str> {
        if row < self.get_rows() && col < self.cols {
            Some(self.cell(row, col).unwrap_or_default())
        } else {
            None
        }
    }

    /// グリッドが空かどうか
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
