//! xlsx2lua command-line tool
//!
//! `config.json`に従って、変換元ツリーのExcelファイルをすべてLuaテーブルに変換します。

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;
use xlsx2lua::{
    BatchConverter, ConversionTarget, ConverterBuilder, ToolConfig, XlsxToLuaError,
    DEFAULT_CONFIG_PATH,
};

#[derive(Parser)]
#[command(name = "xlsx2lua")]
#[command(about = "Convert game configuration spreadsheets into Lua data tables")]
#[command(long_about = "Convert every .xlsx file under the configured source tree into a
<name>.lua table at the same relative position under the output tree.

TARGETS:
  server   - export server-side fields (visibility 0 and 2)
  client   - export client-side fields (visibility 0 and 1), the default

CONFIG (config.json):
  {
    \"TagetPath\": \"design/tables\",
    \"ServerOutPath\": \"server/data\",
    \"ClientOutPath\": \"client/data\"
  }")]
#[command(version)]
struct Cli {
    /// Export target: "server", anything else selects the client
    #[arg(default_value = "client")]
    target: String,

    /// Path to the JSON configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Exit immediately instead of waiting for Enter
    #[arg(long)]
    no_pause: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "xlsx2lua=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    println!("{}", cli.target);

    let status = match run(&cli) {
        Ok(()) => 0,
        Err(e) => {
            handle_error(e);
            1
        }
    };

    if !cli.no_pause {
        let mut line = String::new();
        let _ = io::stdin().lock().read_line(&mut line);
    }

    process::exit(status);
}

fn run(cli: &Cli) -> Result<(), XlsxToLuaError> {
    let target = ConversionTarget::from_arg(&cli.target);
    let start = Instant::now();

    let config = ToolConfig::load(&cli.config)?;
    let (source_root, output_root) = config.resolve(target)?;

    let converter = ConverterBuilder::new().with_target(target).build()?;
    let report = BatchConverter::new(converter).convert_dir(&source_root, &output_root)?;

    tracing::info!(
        converted = report.converted.len(),
        ignored = report.ignored,
        failed = report.failed.len(),
        "export finished"
    );

    println!("Export succeeded in {:.6}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn handle_error(error: XlsxToLuaError) {
    match error {
        XlsxToLuaError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the config file exists and is readable.");
        }
        XlsxToLuaError::Json(json_err) => {
            eprintln!("Config Decode Error: {}", json_err);
        }
        XlsxToLuaError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
            eprintln!("Please check TagetPath and the output path for this target.");
        }
        XlsxToLuaError::Walk(walk_err) => {
            eprintln!("Directory Error: {}", walk_err);
        }
        XlsxToLuaError::Schema { cell, message } => {
            eprintln!("Schema Error:");
            eprintln!("  Cell: {}", cell);
            eprintln!("  Details: {}", message);
            eprintln!("Export aborted; remaining files were not converted.");
        }
        other => {
            eprintln!("Error: {}", other);
        }
    }
}
