//! Batch Module
//!
//! ディレクトリツリー全体を変換するモジュール。
//!
//! - 変換元ツリーを名前順・深さ優先で走査し、出力先に同じ構造を再現する
//! - `.svn`という名前のエントリは辿らない
//! - `~$`を含むファイル（Excelのロックファイル）は黙って無視する
//! - `<name>.xlsx`の形でないファイルは報告してスキップする
//! - ファイル単位のエラーは報告して走査を続け、スキーマエラーは即座に中断する

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};
use walkdir::WalkDir;

use crate::builder::Converter;
use crate::error::XlsxToLuaError;

/// 変換対象の拡張子
const SOURCE_EXTENSION: &str = "xlsx";

/// 出力ファイルの拡張子
const OUTPUT_EXTENSION: &str = "lua";

/// 走査から除外するディレクトリ名
const SKIPPED_ENTRY: &str = ".svn";

/// 1ファイルの処理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// 変換して出力した（出力ファイルのパス）
    Converted(PathBuf),

    /// ロックファイルなどのため無視した
    Ignored,
}

/// ディレクトリ変換の結果
#[derive(Debug, Default)]
pub struct BatchReport {
    /// 出力したファイル
    pub converted: Vec<PathBuf>,

    /// 無視したファイル数
    pub ignored: usize,

    /// スキップしたファイルとその理由
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    /// スキップしたファイルがないかどうか
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// ファイル名から出力名の元になる語幹を取り出す
///
/// # 戻り値
///
/// * `Ok(None)` - `~$`を含むため無視するファイル
/// * `Ok(Some(stem))` - 変換対象のファイル
/// * `Err(XlsxToLuaError::InvalidFileName)` - 名前の形式が一致しない
///
/// # 使用例
///
/// ```rust
/// use xlsx2lua::source_stem;
///
/// assert_eq!(source_stem("monster.xlsx").unwrap(), Some("monster"));
/// assert_eq!(source_stem("~$monster.xlsx").unwrap(), None);
/// assert!(source_stem("monster.old.xlsx").is_err());
/// assert!(source_stem("monster.csv").is_err());
/// ```
pub fn source_stem(file_name: &str) -> Result<Option<&str>, XlsxToLuaError> {
    if file_name.contains("~$") {
        return Ok(None);
    }

    let parts: Vec<&str> = file_name.split('.').collect();
    let [stem, extension] = parts.as_slice() else {
        return Err(XlsxToLuaError::InvalidFileName {
            name: file_name.to_string(),
            message: "expected exactly one '.' in the file name".to_string(),
        });
    };

    if *extension != SOURCE_EXTENSION {
        return Err(XlsxToLuaError::InvalidFileName {
            name: file_name.to_string(),
            message: format!("extension must be '{}'", SOURCE_EXTENSION),
        });
    }

    Ok(Some(*stem))
}

/// ディレクトリツリーの一括変換
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsx2lua::{BatchConverter, ConversionTarget, ConverterBuilder};
///
/// # fn main() -> Result<(), xlsx2lua::XlsxToLuaError> {
/// let converter = ConverterBuilder::new()
///     .with_target(ConversionTarget::Client)
///     .build()?;
/// let report = BatchConverter::new(converter).convert_dir("tables", "client/data")?;
/// println!("{} files converted", report.converted.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct BatchConverter {
    converter: Converter,
}

impl BatchConverter {
    /// 新しいインスタンスを生成
    pub fn new(converter: Converter) -> Self {
        Self { converter }
    }

    /// 変換元ツリーを出力先ツリーに変換する
    ///
    /// # 戻り値
    ///
    /// * `Ok(BatchReport)` - 走査が完了した場合（ファイル単位の失敗を含む）
    /// * `Err(XlsxToLuaError)` - スキーマエラー、または走査自体に失敗した場合
    pub fn convert_dir(
        &self,
        source_root: impl AsRef<Path>,
        output_root: impl AsRef<Path>,
    ) -> Result<BatchReport, XlsxToLuaError> {
        let source_root = source_root.as_ref();
        let output_root = output_root.as_ref();
        let mut report = BatchReport::default();

        let walker = WalkDir::new(source_root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.file_name() != SKIPPED_ENTRY);

        for entry in walker {
            let entry = entry?;
            let relative = entry
                .path()
                .strip_prefix(source_root)
                .unwrap_or_else(|_| entry.path());
            let mirrored = output_root.join(relative);

            if entry.file_type().is_dir() {
                debug!(path = %mirrored.display(), "creating output directory");
                if let Err(e) = fs::create_dir_all(&mirrored) {
                    warn!(path = %mirrored.display(), error = %e, "failed to create output directory");
                }
                continue;
            }

            let out_dir = mirrored.parent().unwrap_or(output_root);
            match self.convert_file(entry.path(), out_dir) {
                Ok(FileOutcome::Converted(path)) => report.converted.push(path),
                Ok(FileOutcome::Ignored) => report.ignored += 1,
                Err(e) if e.is_fatal() => {
                    error!(path = %entry.path().display(), error = %e, "conversion aborted");
                    return Err(e);
                }
                Err(e) => {
                    warn!(path = %entry.path().display(), error = %e, "file skipped");
                    report.failed.push((entry.path().to_path_buf(), e.to_string()));
                }
            }
        }

        Ok(report)
    }

    /// 1ファイルを変換し、`out_dir`に`<stem>.lua`として書き出す
    ///
    /// 既存の出力ファイルは上書きされます。変換に失敗した場合、
    /// 出力ファイルは作成も変更もされません。
    pub fn convert_file(
        &self,
        source: &Path,
        out_dir: &Path,
    ) -> Result<FileOutcome, XlsxToLuaError> {
        let file_name = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let Some(stem) = source_stem(&file_name)? else {
            debug!(path = %source.display(), "ignoring lock file");
            return Ok(FileOutcome::Ignored);
        };

        let mut buffer = Vec::new();
        let layout = self.converter.convert(File::open(source)?, &mut buffer)?;

        let output_path = out_dir.join(format!("{}.{}", stem, OUTPUT_EXTENSION));
        fs::write(&output_path, buffer)?;

        debug!(
            source = %source.display(),
            output = %output_path.display(),
            %layout,
            "converted"
        );
        Ok(FileOutcome::Converted(output_path))
    }
}
