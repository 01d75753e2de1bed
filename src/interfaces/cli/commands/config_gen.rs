//! `venuetrack config generate`

use std::io::{BufRead, Write};
use std::path::Path;

use colored::Colorize;

use crate::config::StaticConfig;
use crate::interfaces::cli::CliError;

const SAMPLE_CONFIG_PATH: &str = "config.example.toml";

fn io_err(e: std::io::Error) -> CliError {
    CliError::CommandError(format!("terminal I/O failed: {}", e))
}

/// 询问是否覆盖已有文件，只有 `y`/`Y` 视为同意
fn confirm_overwrite(path: &str) -> Result<bool, CliError> {
    let mut stdout = std::io::stdout();
    write!(
        stdout,
        "{} already exists, overwrite? [y/N] ",
        path.yellow().bold()
    )
    .and_then(|_| stdout.flush())
    .map_err(io_err)?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(io_err)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// 把内置默认配置写成 TOML，作为编辑起点
pub async fn config_generate(output_path: Option<String>, force: bool) -> Result<(), CliError> {
    let path = output_path.unwrap_or_else(|| SAMPLE_CONFIG_PATH.to_string());

    if Path::new(&path).exists() && !force && !confirm_overwrite(&path)? {
        println!("{}", "Left existing file untouched".dimmed());
        return Ok(());
    }

    StaticConfig::default().save_to_file(&path)?;

    println!("{} {}", "Wrote".green().bold(), path);
    println!(
        "{}",
        "Values can be overridden per key with VT__<SECTION>__<KEY>, e.g. VT__SERVER__PORT=8080"
            .dimmed()
    );
    Ok(())
}
