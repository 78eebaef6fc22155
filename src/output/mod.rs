//! Output Module
//!
//! Luaのテーブルリテラルを追記専用で書き出すライターを提供するモジュール。
//!
//! 出力形式:
//!
//! ```text
//! return
//! {
//! [1001] = {hp=100,name="Slime",drops={1,2},},
//! }
//! ```
//!
//! セルのテキストはエスケープせずにそのまま埋め込みます。

use std::io::Write;

use crate::error::XlsxToLuaError;
use crate::schema::FieldType;

/// Luaテーブルライター
pub(crate) struct LuaWriter<W: Write> {
    writer: W,
}

impl<W: Write> LuaWriter<W> {
    /// 新しいライターを生成
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// テーブルの開始（`return\n{\n`）を書き出す
    pub fn begin(&mut self) -> Result<(), XlsxToLuaError> {
        self.writer.write_all(b"return\n{\n")?;
        Ok(())
    }

    /// テーブルの終了（`}\n`）を書き出す
    pub fn finish(&mut self) -> Result<(), XlsxToLuaError> {
        self.writer.write_all(b"}\n")?;
        self.writer.flush()?;
        Ok(())
    }

    /// レコードの開始（`[<key>] = {`）を書き出す
    pub fn open_record(&mut self, key: &str) -> Result<(), XlsxToLuaError> {
        write!(self.writer, "[{}] = {{", key)?;
        Ok(())
    }

    /// レコードの終了（`},\n`）を書き出す
    pub fn close_record(&mut self) -> Result<(), XlsxToLuaError> {
        self.writer.write_all(b"},\n")?;
        Ok(())
    }

    /// 改行を書き出す（単一レコードモードの区切り）
    pub fn newline(&mut self) -> Result<(), XlsxToLuaError> {
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// フィールド（`<name>=<literal>,`）を書き出す
    pub fn write_field(
        &mut self,
        name: &str,
        field_type: &FieldType,
        value: &str,
    ) -> Result<(), XlsxToLuaError> {
        match field_type {
            FieldType::String => write!(self.writer, "{}=\"{}\",", name, value)?,
            FieldType::Array => write!(self.writer, "{}={{{}}},", name, value)?,
            FieldType::Number | FieldType::Other(_) => write!(self.writer, "{}={},", name, value)?,
        }
        Ok(())
    }
}
