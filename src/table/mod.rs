//! Table Module
//!
//! シートのレイアウト判定と、レイアウトごとのLuaテーブル変換を提供するモジュール。
//!
//! - 横表（[`horizontal`]）: 1行が1レコード
//! - 縦表（[`vertical`]）: 1列が1レコード（複数レコード / 単一レコード）
//!
//! どちらの変換も、フィールドの出力は[`FieldWriter`]を共有します。

mod horizontal;
mod vertical;

use std::io::Write;

use crate::api::{ConversionTarget, TableLayout};
use crate::error::XlsxToLuaError;
use crate::grid::SheetGrid;
use crate::output::LuaWriter;
use crate::schema::FieldSchema;
use crate::types::CellCoord;

impl TableLayout {
    /// A1セルのマーカーからレイアウトを判定する
    ///
    /// 認識できないマーカー（空セルを含む）は横表として扱います。
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use xlsx2lua::{SheetGrid, TableLayout};
    ///
    /// let grid = SheetGrid::from_rows(vec![vec!["#Vertical_Single".to_string()]]);
    /// assert_eq!(TableLayout::classify(&grid), TableLayout::VerticalSingle);
    /// ```
    pub fn classify(grid: &SheetGrid) -> TableLayout {
        match grid.cell(0, 0) {
            Some(TableLayout::VERTICAL_ARRAY_MARKER) => TableLayout::VerticalArray,
            Some(TableLayout::VERTICAL_SINGLE_MARKER) => TableLayout::VerticalSingle,
            _ => TableLayout::Horizontal,
        }
    }
}

/// グリッドを判定済みのレイアウトでLuaテーブルに変換する
pub(crate) fn render_table<W: Write>(
    grid: &SheetGrid,
    layout: TableLayout,
    target: ConversionTarget,
    writer: &mut LuaWriter<W>,
) -> Result<(), XlsxToLuaError> {
    match layout {
        TableLayout::Horizontal => horizontal::render(grid, target, writer),
        TableLayout::VerticalArray => vertical::render(grid, target, writer, vertical::Mode::Array),
        TableLayout::VerticalSingle => {
            vertical::render(grid, target, writer, vertical::Mode::Single)
        }
    }
}

/// フィールド出力のパラメータ
///
/// 1シートの変換中に共有される、スキーマ・変換ターゲット・出力先の組です。
pub(crate) struct FieldWriter<'a, W: Write> {
    /// シートのフィールド定義
    pub schema: &'a FieldSchema,

    /// 変換ターゲット
    pub target: ConversionTarget,

    /// 出力先
    pub sink: &'a mut LuaWriter<W>,
}

impl<W: Write> FieldWriter<'_, W> {
    /// 1フィールド分を出力する
    ///
    /// 名前が空のフィールド、およびターゲットに対して非表示のフィールドは
    /// 何も出力しません。セルが存在しない場合は空の値を出力します。
    ///
    /// # 引数
    ///
    /// * `index` - スキーマ上のフィールド位置
    /// * `coord` - 値を読み出したセルの座標（エラー報告用）
    /// * `value` - セルのテキスト
    ///
    /// # 戻り値
    ///
    /// * `Ok(true)` - フィールドを出力した場合
    /// * `Ok(false)` - フィールドをスキップした場合
    /// * `Err(XlsxToLuaError::Schema)` - 名前または型の参照がスキーマの範囲外の場合
    pub fn write(
        &mut self,
        index: usize,
        coord: CellCoord,
        value: Option<&str>,
    ) -> Result<bool, XlsxToLuaError> {
        let field = self.schema.get(index).ok_or_else(|| XlsxToLuaError::Schema {
            cell: coord.to_a1_notation(),
            message: format!(
                "field name index {} is out of range (fields: {})",
                index,
                self.schema.len()
            ),
        })?;

        if !field.is_emitted_for(self.target) {
            return Ok(false);
        }

        let field_type = field.field_type.as_ref().ok_or_else(|| XlsxToLuaError::Schema {
            cell: coord.to_a1_notation(),
            message: format!("field '{}' has no type declared", field.name),
        })?;

        self.sink
            .write_field(&field.name, field_type, value.unwrap_or_default())?;
        Ok(true)
    }
}
