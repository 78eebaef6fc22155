//! Config Module
//!
//! 変換ツールの設定ファイル（`config.json`）を読み込むモジュール。
//!
//! ```json
//! {
//!     "TagetPath": "design/tables",
//!     "ServerOutPath": "server/data",
//!     "ClientOutPath": "client/data"
//! }
//! ```
//!
//! ターゲット別の出力先を持たない設定では、`OutPath`を共通の出力先として使用できます。

use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::api::ConversionTarget;
use crate::error::XlsxToLuaError;

/// デフォルトの設定ファイルパス（カレントディレクトリ相対）
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// 設定ファイルの内容
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolConfig {
    /// 変換元のExcelファイルツリーのルート
    #[serde(rename = "TagetPath")]
    pub source_root: PathBuf,

    /// サーバー用の出力ルート
    #[serde(rename = "ServerOutPath", default)]
    pub server_out: Option<PathBuf>,

    /// クライアント用の出力ルート
    #[serde(rename = "ClientOutPath", default)]
    pub client_out: Option<PathBuf>,

    /// ターゲット共通の出力ルート
    #[serde(rename = "OutPath", default)]
    pub out: Option<PathBuf>,
}

impl ToolConfig {
    /// 設定ファイルを読み込む
    ///
    /// # 戻り値
    ///
    /// * `Err(XlsxToLuaError::Io)` - ファイルを開けない場合
    /// * `Err(XlsxToLuaError::Json)` - JSONとしてデコードできない場合
    pub fn load(path: impl AsRef<Path>) -> Result<Self, XlsxToLuaError> {
        let file = File::open(path.as_ref())?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// 指定ターゲットの出力ルート
    ///
    /// ターゲット別のキーを優先し、なければ`OutPath`を使用します。
    pub fn output_root(&self, target: ConversionTarget) -> Option<&Path> {
        let specific = match target {
            ConversionTarget::Client => self.client_out.as_deref(),
            ConversionTarget::Server => self.server_out.as_deref(),
        };
        specific.or(self.out.as_deref())
    }

    /// 変換元ルートと出力ルートを解決し、両方が存在するディレクトリか検証する
    ///
    /// # 戻り値
    ///
    /// * `Ok((source_root, output_root))` - 両方のディレクトリが存在する場合
    /// * `Err(XlsxToLuaError::Config)` - 出力先が未設定、またはディレクトリが存在しない場合
    pub fn resolve(&self, target: ConversionTarget) -> Result<(PathBuf, PathBuf), XlsxToLuaError> {
        let output_root = self.output_root(target).ok_or_else(|| {
            XlsxToLuaError::Config(format!("No output path configured for target '{}'", target))
        })?;

        if !output_root.is_dir() {
            return Err(XlsxToLuaError::Config(format!(
                "Output path not found: {}",
                output_root.display()
            )));
        }

        if !self.source_root.is_dir() {
            return Err(XlsxToLuaError::Config(format!(
                "Source path not found: {}",
                self.source_root.display()
            )));
        }

        Ok((self.source_root.clone(), output_root.to_path_buf()))
    }
}
