//! Vertical Table Module
//!
//! 縦表（1列が1レコード）の変換。行がフィールドを定義します。
//!
//! | 列 | 内容 |
//! |----|------|
//! | 0  | マーカー（A1のみ） |
//! | 1  | フィールド名 |
//! | 2  | 型タグ |
//! | 3  | 可視性タグ |
//! | 4  | 予約（読み飛ばす） |
//! | 5～ | データ（行0がレコードのキー） |
//!
//! 単一レコードモードでは列5のみを対象とし、キーを持たないフラットな
//! フィールド列を改行区切りで出力します。

use std::io::Write;

use super::FieldWriter;
use crate::api::ConversionTarget;
use crate::error::XlsxToLuaError;
use crate::grid::SheetGrid;
use crate::output::LuaWriter;
use crate::schema::FieldSchema;
use crate::types::CellCoord;

/// 変換可能な最小列数
const MIN_COLUMNS: usize = 5;

/// 最初のデータ列
const FIRST_DATA_COL: usize = 5;

/// 縦表の出力モード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Mode {
    /// データ列ごとに`[<key>] = {...},`のレコードを出力する
    Array,

    /// 列5のみを、キーなしの改行区切りフィールドとして出力する
    Single,
}

pub(super) fn render<W: Write>(
    grid: &SheetGrid,
    target: ConversionTarget,
    writer: &mut LuaWriter<W>,
    mode: Mode,
) -> Result<(), XlsxToLuaError> {
    if grid.get_cols() < MIN_COLUMNS {
        return Err(XlsxToLuaError::InvalidFormat(format!(
            "vertical table needs at least {} columns, found {}",
            MIN_COLUMNS,
            grid.get_cols()
        )));
    }

    let schema = FieldSchema::from_field_rows(grid);

    writer.begin()?;

    if grid.get_cols() <= FIRST_DATA_COL {
        return writer.finish();
    }

    let end_col = match mode {
        Mode::Array => grid.get_cols(),
        Mode::Single => FIRST_DATA_COL + 1,
    };

    for col in FIRST_DATA_COL..end_col {
        let Some(key) = grid.cell(0, col).filter(|key| !key.is_empty()) else {
            continue;
        };

        if mode == Mode::Array {
            writer.open_record(key)?;
        }

        let mut fields = FieldWriter {
            schema: &schema,
            target,
            sink: &mut *writer,
        };
        for index in 0..schema.len() {
            fields.write(index, CellCoord::new(index, col), grid.cell(index, col))?;
            if mode == Mode::Single {
                fields.sink.newline()?;
            }
        }

        match mode {
            Mode::Array => writer.close_record()?,
            Mode::Single => writer.newline()?,
        }
    }

    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn convert(
        rows: Vec<Vec<String>>,
        target: ConversionTarget,
        mode: Mode,
    ) -> Result<String, XlsxToLuaError> {
        let grid = SheetGrid::from_rows(rows);
        let mut buffer = Vec::new();
        render(&grid, target, &mut LuaWriter::new(&mut buffer), mode)?;
        Ok(String::from_utf8(buffer).unwrap())
    }

    fn hero_rows() -> Vec<Vec<String>> {
        vec![
            row(&["#Vertical_Array", "job", "string", "0", "Job", "warrior", "", "mage"]),
            row(&["", "hp", "number", "0", "HP", "120", "1", "80"]),
            row(&["", "skills", "array", "1", "Skills", "1,2", "", "3"]),
            row(&["", "script", "string", "2", "Script", "w.lua", "", "m.lua"]),
            row(&["", "memo", "string", "3", "Memo", "tank", "", "dps"]),
            row(&["", "", "number", "0", "", "x", "", "y"]),
        ]
    }

    #[test]
    fn test_array_mode_client() {
        let output = convert(hero_rows(), ConversionTarget::Client, Mode::Array).unwrap();
        assert_eq!(
            output,
            "return\n{\n\
             [warrior] = {job=\"warrior\",hp=120,skills={1,2},},\n\
             [mage] = {job=\"mage\",hp=80,skills={3},},\n\
             }\n"
        );
    }

    #[test]
    fn test_array_mode_server() {
        let output = convert(hero_rows(), ConversionTarget::Server, Mode::Array).unwrap();
        assert!(output.contains("[warrior] = {job=\"warrior\",hp=120,script=\"w.lua\",},\n"));
        assert!(!output.contains("skills"));
        assert!(!output.contains("memo"));
    }

    #[test]
    fn test_single_mode_reads_only_first_data_column() {
        let mut rows = hero_rows();
        rows[0][0] = "#Vertical_Single".to_string();
        let output = convert(rows, ConversionTarget::Client, Mode::Single).unwrap();
        assert_eq!(
            output,
            "return\n{\njob=\"warrior\",\nhp=120,\nskills={1,2},\n\n\n\n\n}\n"
        );
        assert!(!output.contains("mage"));
        assert!(!output.contains('['));
    }

    #[test]
    fn test_too_few_columns() {
        let rows = vec![row(&["#Vertical_Array", "id", "number", "0"])];
        let result = convert(rows, ConversionTarget::Client, Mode::Array);
        assert!(matches!(result, Err(XlsxToLuaError::InvalidFormat(_))));
    }

    #[test]
    fn test_no_data_columns_is_empty_table() {
        let rows = vec![row(&["#Vertical_Array", "id", "number", "0", "ID"])];
        let output = convert(rows, ConversionTarget::Client, Mode::Array).unwrap();
        assert_eq!(output, "return\n{\n}\n");
    }

    #[test]
    fn test_empty_header_column_is_skipped() {
        let rows = vec![
            row(&["#Vertical_Array", "id", "number", "0", "", "", "7"]),
            row(&["", "hp", "number", "0", "", "1", "2"]),
        ];
        let output = convert(rows, ConversionTarget::Client, Mode::Array).unwrap();
        assert_eq!(output, "return\n{\n[7] = {id=7,hp=2,},\n}\n");
    }

    #[test]
    fn test_short_field_row_emits_empty_value() {
        let rows = vec![
            row(&["#Vertical_Array", "id", "number", "0", "", "7"]),
            row(&["", "name", "string", "0"]),
        ];
        let output = convert(rows, ConversionTarget::Client, Mode::Array).unwrap();
        assert_eq!(output, "return\n{\n[7] = {id=7,name=\"\",},\n}\n");
    }

    #[test]
    fn test_blank_type_cell_is_raw() {
        let rows = vec![
            row(&["#Vertical_Array", "id", "number", "0", "", "7"]),
            row(&["", "hp"]),
        ];
        let output = convert(rows, ConversionTarget::Client, Mode::Array).unwrap();
        assert_eq!(output, "return\n{\n[7] = {id=7,hp=,},\n}\n");
    }

    #[test]
    fn test_single_mode_without_key_is_empty_table() {
        let rows = vec![
            row(&["#Vertical_Single", "name", "string", "0", "Name", "", "other"]),
            row(&["", "level", "number", "0", "Level", "10", "20"]),
        ];
        let output = convert(rows, ConversionTarget::Client, Mode::Single).unwrap();
        assert_eq!(output, "return\n{\n}\n");
    }
}
