use eyre::{Context, Result};
use std::io::{self, BufRead, Write};

pub fn read_input(name: &str) -> Result<String> {
    print!("{name}: ");
    io::stdout().flush()?;
    read_line(&mut io::stdin().lock())
}

pub fn read_input_hidden(name: &str) -> Result<String> {
    rpassword::prompt_password(format!("{name}: ")).wrap_err("Failed to read hidden input")
}

/// Asks a yes/no question on the terminal. Anything but `y`/`yes` is a no.
pub fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    confirm_from(&mut io::stdin().lock())
}

pub fn confirm_from(reader: &mut impl BufRead) -> Result<bool> {
    let answer = read_line(reader)?;
    Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn read_line(reader: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .wrap_err("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}
