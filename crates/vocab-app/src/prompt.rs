use std::io::{self, BufRead, Write};

/// Ask a yes/no question on the terminal.
///
/// Declines without asking when stdin is not interactive.
pub async fn confirm(question: String) -> anyhow::Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        tracing::warn!("stdin is not a terminal, pass --yes to run without confirmation");
        return Ok(false);
    }

    let answer = tokio::task::spawn_blocking(move || -> io::Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{question} (yes/no): ")?;
        stdout.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    })
    .await??;

    Ok(is_affirmative(&answer))
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}
