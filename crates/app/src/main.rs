use std::io::{self, BufRead, Write};

use anyhow::Context;

use medishop_app::shell::{self, ShellCommand};
use medishop_app::{AppConfig, ShopController};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    medishop_observability::init_with(config.log_format);

    let mut shop = ShopController::new(config)?;
    tracing::info!("reading commands from stdin");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let result = line
            .parse::<ShellCommand>()
            .and_then(|cmd| {
                let quit = cmd == ShellCommand::Quit;
                shell::execute(&mut shop, cmd).map(|out| (out, quit))
            });

        let (out, quit) = match result {
            Ok(pair) => pair,
            Err(e) => {
                tracing::debug!(code = e.code(), error = %e, "command failed");
                (e.to_json(), false)
            }
        };

        serde_json::to_writer(&mut stdout, &out).context("failed to write response")?;
        writeln!(stdout).context("failed to write response")?;
        stdout.flush().context("failed to flush stdout")?;

        if quit {
            break;
        }
    }

    tracing::info!("session ended");
    Ok(())
}
