//! Console implementation of the interaction trait.

use std::io::{self, BufRead, Write};

use crate::store::StaticConfig;

use super::Interaction;

/// [`Interaction`] implementation over stdin/stdout.
///
/// Prompts render their default in brackets (`Subnet mask [255.255.255.0]:`)
/// and an empty reply accepts it. Choice lists are numbered from 1 and an
/// empty reply cancels.
#[derive(Debug, Clone, Default)]
pub struct ConsoleUi {
    _private: (),
}

impl ConsoleUi {
    /// Creates a new console interaction.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    fn read_line() -> io::Result<Option<String>> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            // EOF behaves like cancelling
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl Interaction for ConsoleUi {
    fn prompt_line(&mut self, label: &str, default: Option<&str>) -> io::Result<String> {
        match default {
            Some(value) => print!("{label} [{value}]: "),
            None => print!("{label}: "),
        }
        io::stdout().flush()?;

        let reply = Self::read_line()?.unwrap_or_default();
        if reply.is_empty() {
            return Ok(default.unwrap_or("").to_string());
        }
        Ok(reply)
    }

    fn choose(&mut self, title: &str, options: &[String]) -> io::Result<Option<usize>> {
        println!("{title}");
        for (index, option) in options.iter().enumerate() {
            println!("  {}) {option}", index + 1);
        }

        loop {
            print!("Choice (empty to cancel): ");
            io::stdout().flush()?;

            let reply = match Self::read_line()? {
                None => return Ok(None),
                Some(reply) if reply.is_empty() => return Ok(None),
                Some(reply) => reply,
            };

            match reply.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(Some(n - 1)),
                _ => println!("Enter a number between 1 and {}.", options.len()),
            }
        }
    }

    fn info(&mut self, message: &str) {
        println!("{message}");
    }

    fn error(&mut self, message: &str) {
        eprintln!("Error: {message}");
    }

    fn show_status(&mut self, adapter: &str, config: &StaticConfig) {
        println!();
        println!("Adapter:   {adapter}");
        println!("Static IP: {}", config.static_ip);
        println!("Mask:      {}", config.subnet_mask);
        println!("Gateway:   {}", config.gateway);
        println!("DNS:       {}", config.dns);
        println!();
    }
}
