//! xlsx2lua - Game configuration spreadsheets to Lua data tables
//!
//! 企画者がExcelで作成した設定テーブルを、スクリプトランタイムが読み込める
//! Luaのテーブルリテラルへ一括変換するクレートです。出力はクライアント用と
//! サーバー用に分けられ、フィールドごとの可視性タグで出力内容が決まります。
//!
//! # テーブルのレイアウト
//!
//! 先頭シートのA1セルでレイアウトが決まります。
//!
//! - `#Vertical_Array`: 縦表（1列が1レコード）
//! - `#Vertical_Single`: 縦表（シート全体で1レコード）
//! - それ以外: 横表（1行が1レコード）
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsx2lua::{ConversionTarget, ConverterBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new()
//!         .with_target(ConversionTarget::Client)
//!         .build()?;
//!
//!     let input = File::open("monster.xlsx")?;
//!     let output = File::create("monster.lua")?;
//!     converter.convert(input, output)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # ディレクトリの一括変換
//!
//! ```rust,no_run
//! use xlsx2lua::{BatchConverter, ConversionTarget, ConverterBuilder, ToolConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let target = ConversionTarget::Server;
//!     let config = ToolConfig::load("config.json")?;
//!     let (source_root, output_root) = config.resolve(target)?;
//!
//!     let converter = ConverterBuilder::new().with_target(target).build()?;
//!     let report = BatchConverter::new(converter).convert_dir(source_root, output_root)?;
//!
//!     for (path, reason) in &report.failed {
//!         eprintln!("skipped {}: {}", path.display(), reason);
//!     }
//!     Ok(())
//! }
//! ```

mod api;
mod batch;
mod builder;
mod config;
mod error;
mod formatter;
mod grid;
mod output;
mod parser;
mod schema;
mod security;
mod table;
mod types;

// 公開API
pub use api::{ConversionTarget, TableLayout};
pub use batch::{source_stem, BatchConverter, BatchReport, FileOutcome};
pub use builder::{Converter, ConverterBuilder};
pub use config::{ToolConfig, DEFAULT_CONFIG_PATH};
pub use error::XlsxToLuaError;
pub use grid::SheetGrid;
pub use schema::{FieldDescriptor, FieldSchema, FieldType, Visibility};
