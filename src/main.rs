//! rlhex - Terminal Hex Viewer

use anyhow::Result;
use clap::{Arg, Command};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let matches = Command::new("rlhex")
        .version(rlhex::VERSION)
        .about("An interactive terminal hex viewer for binary files")
        .long_about(
            "rlhex shows any file as a hex dump with a character column and numeric \
             readouts, and searches it as text, raw hex, or 16/32-bit integers and floats.",
        )
        .arg(
            Arg::new("file")
                .help("Path to the file to view")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Custom encodings file (JSON or TOML)"),
        )
        .get_matches();

    let Some(file) = matches.get_one::<String>("file") else {
        anyhow::bail!("missing file argument");
    };
    let file_path = PathBuf::from(file);
    let config_path = matches.get_one::<String>("config").map(PathBuf::from);

    if !file_path.exists() {
        anyhow::bail!("File does not exist: {}", file_path.display());
    }

    if !file_path.is_file() {
        anyhow::bail!("Path is not a regular file: {}", file_path.display());
    }

    use rlhex::render::ui::TerminalUI;
    use rlhex::Application;

    let ui_renderer = Box::new(TerminalUI::new()?);
    let mut app = Application::new(&file_path, config_path.as_deref(), ui_renderer)?;

    app.run().await?;

    Ok(())
}
