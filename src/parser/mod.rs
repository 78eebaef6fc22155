//! Parser Module
//!
//! calamineを使用したExcelファイル解析の基礎実装。

mod workbook;

pub(crate) use workbook::WorkbookParser;
