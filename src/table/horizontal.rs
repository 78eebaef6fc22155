//! Horizontal Table Module
//!
//! 横表（1行が1レコード）の変換。
//!
//! | 行 | 内容 |
//! |----|------|
//! | 0  | フィールド名 |
//! | 1  | 型タグ |
//! | 2  | 可視性タグ |
//! | 3  | 予約（読み飛ばす） |
//! | 4～ | データ（列0がレコードのキー） |

use std::io::Write;

use super::FieldWriter;
use crate::api::ConversionTarget;
use crate::error::XlsxToLuaError;
use crate::grid::SheetGrid;
use crate::output::LuaWriter;
use crate::schema::FieldSchema;
use crate::types::CellCoord;

/// 最初のデータ行
const FIRST_DATA_ROW: usize = 4;

pub(super) fn render<W: Write>(
    grid: &SheetGrid,
    target: ConversionTarget,
    writer: &mut LuaWriter<W>,
) -> Result<(), XlsxToLuaError> {
    if grid.get_rows() <= FIRST_DATA_ROW {
        return Err(XlsxToLuaError::InvalidFormat(format!(
            "horizontal table needs more than {} rows, found {}",
            FIRST_DATA_ROW,
            grid.get_rows()
        )));
    }

    let schema = FieldSchema::from_header_rows(grid);
    // キー列が非表示ならレコード全体を出力しない
    let key_visible = schema.visibility(0).admits(target);

    writer.begin()?;

    for row_idx in FIRST_DATA_ROW..grid.get_rows() {
        let data_row = grid.get_row(row_idx);
        let Some(key) = data_row.first() else {
            continue;
        };
        if key.is_empty() || !key_visible {
            continue;
        }

        writer.open_record(key)?;
        let mut fields = FieldWriter {
            schema: &schema,
            target,
            sink: &mut *writer,
        };
        for index in 0..schema.len() {
            fields.write(
                index,
                CellCoord::new(row_idx, index),
                data_row.get(index).map(String::as_str),
            )?;
        }
        writer.close_record()?;
    }

    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn convert(rows: Vec<Vec<String>>, target: ConversionTarget) -> Result<String, XlsxToLuaError> {
        let grid = SheetGrid::from_rows(rows);
        let mut buffer = Vec::new();
        render(&grid, target, &mut LuaWriter::new(&mut buffer))?;
        Ok(String::from_utf8(buffer).unwrap())
    }

    fn monster_rows() -> Vec<Vec<String>> {
        vec![
            row(&["id", "name", "hp", "drops", "memo", "ai"]),
            row(&["number", "string", "number", "array", "string", "string"]),
            row(&["0", "0", "0", "1", "3", "2"]),
            row(&["ID", "Name", "HP", "Drops", "Memo", "AI"]),
            row(&["1001", "Slime", "30", "1,2", "weak", "passive"]),
            row(&["", "Ghost", "10", "", "", ""]),
            row(&["1002", "Bat", "12", "3", "", "aggressive"]),
        ]
    }

    #[test]
    fn test_client_output() {
        let output = convert(monster_rows(), ConversionTarget::Client).unwrap();
        assert_eq!(
            output,
            "return\n{\n\
             [1001] = {id=1001,name=\"Slime\",hp=30,drops={1,2},},\n\
             [1002] = {id=1002,name=\"Bat\",hp=12,drops={3},},\n\
             }\n"
        );
    }

    #[test]
    fn test_server_output() {
        let output = convert(monster_rows(), ConversionTarget::Server).unwrap();
        assert_eq!(
            output,
            "return\n{\n\
             [1001] = {id=1001,name=\"Slime\",hp=30,ai=\"passive\",},\n\
             [1002] = {id=1002,name=\"Bat\",hp=12,ai=\"aggressive\",},\n\
             }\n"
        );
    }

    #[test]
    fn test_too_few_rows() {
        let rows = monster_rows().into_iter().take(4).collect();
        let result = convert(rows, ConversionTarget::Client);
        match result {
            Err(error @ XlsxToLuaError::InvalidFormat(_)) => assert!(!error.is_fatal()),
            other => panic!("Expected InvalidFormat error, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only_sheet_is_empty_table() {
        let mut rows: Vec<Vec<String>> = monster_rows().into_iter().take(4).collect();
        rows.push(vec![]);
        let output = convert(rows, ConversionTarget::Client).unwrap();
        assert_eq!(output, "return\n{\n}\n");
    }

    #[test]
    fn test_short_data_row_emits_empty_values() {
        let rows = vec![
            row(&["id", "name", "hp"]),
            row(&["number", "string", "number"]),
            row(&["0", "0", "0"]),
            row(&[]),
            row(&["7"]),
        ];
        let output = convert(rows, ConversionTarget::Client).unwrap();
        assert_eq!(output, "return\n{\n[7] = {id=7,name=\"\",hp=,},\n}\n");
    }

    #[test]
    fn test_hidden_key_column_skips_every_record() {
        let rows = vec![
            row(&["id", "hp"]),
            row(&["number", "number"]),
            row(&["2", "0"]),
            row(&[]),
            row(&["1", "5"]),
        ];
        let client = convert(rows.clone(), ConversionTarget::Client).unwrap();
        assert_eq!(client, "return\n{\n}\n");

        let server = convert(rows, ConversionTarget::Server).unwrap();
        assert_eq!(server, "return\n{\n[1] = {id=1,hp=5,},\n}\n");
    }

    #[test]
    fn test_unknown_type_tag_is_raw() {
        let rows = vec![
            row(&["id", "speed"]),
            row(&["int", "float"]),
            row(&["0", "x"]),
            row(&[]),
            row(&["1", "math.huge"]),
        ];
        let output = convert(rows, ConversionTarget::Client).unwrap();
        assert_eq!(output, "return\n{\n[1] = {id=1,speed=math.huge,},\n}\n");
    }

    #[test]
    fn test_blank_type_cell_is_raw_at_any_position() {
        let middle = vec![
            row(&["id", "note", "hp"]),
            row(&["number", "", "number"]),
            row(&["0", "0", "0"]),
            row(&[]),
            row(&["1", "x", "5"]),
        ];
        let trailing = vec![
            row(&["id", "hp", "note"]),
            row(&["number", "number"]),
            row(&["0", "0", "0"]),
            row(&[]),
            row(&["1", "5", "x"]),
        ];

        assert_eq!(
            convert(middle, ConversionTarget::Client).unwrap(),
            "return\n{\n[1] = {id=1,note=x,hp=5,},\n}\n"
        );
        assert_eq!(
            convert(trailing, ConversionTarget::Client).unwrap(),
            "return\n{\n[1] = {id=1,hp=5,note=x,},\n}\n"
        );
    }

    #[test]
    fn test_unnamed_field_is_ignored() {
        let rows = vec![
            row(&["id", ""]),
            row(&["number"]),
            row(&["0"]),
            row(&[]),
            row(&["1", "5"]),
        ];
        let output = convert(rows, ConversionTarget::Client).unwrap();
        assert_eq!(output, "return\n{\n[1] = {id=1,},\n}\n");
    }
}
