//! Formatter Module
//!
//! calamineのセル値をLua出力用のテキストに変換するモジュール。
//! 出力時のエスケープは行わず、セルの内容をそのままテキスト化します。

use calamine::Data;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::XlsxToLuaError;

/// セルフォーマッター
///
/// セル値のテキスト化処理のファサードとして機能します。
#[derive(Debug)]
pub(crate) struct CellFormatter {
    /// 日付フォーマッター
    date_formatter: DateFormatter,
}

impl CellFormatter {
    /// 新しいCellFormatterインスタンスを生成
    pub fn new() -> Self {
        Self {
            date_formatter: DateFormatter,
        }
    }

    /// セル値をテキストに変換
    ///
    /// # 変換規則
    ///
    /// - 文字列: そのまま
    /// - 整数・浮動小数点数: 10進表記（`1001.0` → `1001`）
    /// - 論理値: Luaのリテラル（`true` / `false`）
    /// - 日時: `YYYY-MM-DD`（時刻部分がある場合は `YYYY-MM-DD HH:MM:SS`）
    /// - エラー値: `#DIV/0!` などのリテラル
    /// - 空セル: 空文字列
    pub fn format_cell(&self, cell: &Data) -> Result<String, XlsxToLuaError> {
        let text = match cell {
            Data::Int(i) => i.to_string(),
            Data::Float(f) => f.to_string(),
            Data::String(s) => s.clone(),
            Data::Bool(b) => b.to_string(),
            Data::DateTime(dt) => self.date_formatter.format(dt.as_f64())?,
            Data::DateTimeIso(s) => s.clone(),
            Data::DurationIso(s) => s.clone(),
            Data::Error(e) => e.to_string(),
            Data::Empty => String::new(),
        };
        Ok(text)
    }
}

impl Default for CellFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// 日付フォーマッター
///
/// Excelのシリアル日付値（1900年システム）を文字列に変換します。
#[derive(Debug)]
pub(crate) struct DateFormatter;

impl DateFormatter {
    /// シリアル値をフォーマット
    ///
    /// エポックは1899年12月30日です（1900年うるう年バグにより、
    /// 1900年3月以降の日付で正しい結果になります）。
    pub fn format(&self, serial_value: f64) -> Result<String, XlsxToLuaError> {
        if !serial_value.is_finite() {
            return Err(XlsxToLuaError::InvalidFormat(format!(
                "Date serial value is not finite: {}",
                serial_value
            )));
        }

        let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
            .map(|date| NaiveDateTime::new(date, NaiveTime::MIN))
            .ok_or_else(|| XlsxToLuaError::InvalidFormat("Invalid epoch date".to_string()))?;

        let millis = (serial_value * 86_400_000.0).round() as i64;
        let datetime = epoch
            .checked_add_signed(Duration::milliseconds(millis))
            .ok_or_else(|| {
                XlsxToLuaError::InvalidFormat(format!(
                    "Date calculation overflow: serial_value={}",
                    serial_value
                ))
            })?;

        if datetime.time() == NaiveTime::MIN {
            Ok(datetime.format("%Y-%m-%d").to_string())
        } else {
            Ok(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
        }
    }
}
