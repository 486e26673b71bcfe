//! Interactive command-line front end for key-stager.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use key_stager::stager::parse_delay_secs;
use key_stager::{Config, HotkeyParser, KeyInjector, Stager, PRESETS};

#[derive(Parser, Debug)]
#[command(
    name = "kst",
    version,
    about = "Stage text or hotkey combos and replay them into the focused window after a delay"
)]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Replay delay in seconds (overrides the config file)
    #[arg(short, long)]
    delay: Option<String>,

    /// Start with history obfuscation disabled
    #[arg(long)]
    no_obfuscate: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path).context("loading configuration")?,
        None => Config::default(),
    };
    if let Some(delay) = &cli.delay {
        config.default_delay = parse_delay_secs(delay)?;
    }
    if cli.no_obfuscate {
        config.obfuscate_by_default = false;
    }
    if cli.verbose {
        config.verbose = true;
    }

    let filter = if config.verbose { "key_stager=debug" } else { "key_stager=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
    debug!(?config, "starting up");

    let injector = KeyInjector::new().context("initializing input backend")?;
    let mut stager = Stager::new(injector, HotkeyParser::default(), &config);

    println!("{}", "⌨️  key-stager — type 'help' for commands".bold());
    println!(
        "Replay delay is {:.1}s; focus the target window before it elapses.",
        stager.delay().as_secs_f64()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_prompt().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if !handle_command(&mut stager, line.trim()) {
            break;
        }
    }

    Ok(())
}

async fn print_prompt() -> Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"> ").await?;
    stdout.flush().await?;
    Ok(())
}

/// Dispatch one command line. Returns false when the user asked to quit.
fn handle_command(stager: &mut Stager<KeyInjector>, line: &str) -> bool {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "help" => print_help(),
        "text" => match stager.send_text(rest) {
            Ok(_) => print_staged("text", stager),
            Err(e) => print_error(&e.to_string()),
        },
        "key" => match stager.send_hotkey(rest) {
            Ok(_) => print_staged("hotkey", stager),
            Err(e) => print_error(&e.to_string()),
        },
        "preset" => match rest.parse::<usize>().ok().and_then(|n| PRESETS.get(n)) {
            Some(combo) => match stager.send_hotkey(combo) {
                Ok(_) => print_staged("hotkey", stager),
                Err(e) => print_error(&e.to_string()),
            },
            None => print_error(&format!(
                "usage: preset <0..{}> (see 'presets')",
                PRESETS.len() - 1
            )),
        },
        "presets" => {
            for (i, combo) in PRESETS.iter().enumerate() {
                println!("  {i:>2}  {combo}");
            }
        }
        "keys" => print_keys(stager),
        "history" => print_history(stager),
        "resend" => with_index(rest, |index| match stager.resend(index) {
            Ok(_) => println!(
                "{}",
                format!("⏳ Resent; replaying in {:.1}s", stager.delay().as_secs_f64()).green()
            ),
            Err(e) => print_error(&e.to_string()),
        }),
        "toggle" => with_index(rest, |index| {
            match stager.history_mut().toggle_visibility(index) {
                Ok(()) => print_history(stager),
                Err(e) => print_error(&e.to_string()),
            }
        }),
        "toggle-all" => {
            stager.history_mut().toggle_all();
            print_history(stager);
        }
        "delete" => with_index(rest, |index| match stager.history_mut().delete(index) {
            Ok(()) => println!("Deleted entry {index}"),
            Err(e) => print_error(&e.to_string()),
        }),
        "clear" => {
            stager.history_mut().clear();
            println!("History cleared");
        }
        "delay" => match parse_delay_secs(rest) {
            Ok(delay) => {
                stager.set_delay(delay);
                println!("Replay delay set to {:.1}s", delay.as_secs_f64());
            }
            Err(e) => print_error(&e.to_string()),
        },
        "obfuscate" => match rest {
            "on" => {
                stager.history_mut().set_obfuscate_by_default(true);
                println!("New text entries will start masked");
            }
            "off" => {
                stager.history_mut().set_obfuscate_by_default(false);
                println!("New text entries will start visible");
            }
            _ => print_error("usage: obfuscate on|off"),
        },
        "quit" | "exit" => return false,
        other => print_error(&format!("unknown command '{other}' (try 'help')")),
    }

    true
}

fn with_index(rest: &str, action: impl FnOnce(usize)) {
    match rest.parse::<usize>() {
        Ok(index) => action(index),
        Err(_) => print_error("expected a history index"),
    }
}

fn print_staged(what: &str, stager: &Stager<KeyInjector>) {
    println!(
        "{}",
        format!(
            "⏳ Staged {what}; replaying in {:.1}s — focus the target window",
            stager.delay().as_secs_f64()
        )
        .green()
    );
}

fn print_history(stager: &Stager<KeyInjector>) {
    let items = stager.history().display_items();
    if items.is_empty() {
        println!("{}", "(history is empty)".dimmed());
        return;
    }
    for (i, item) in items.iter().enumerate() {
        println!("  {i:>2}  {item}");
    }
}

fn print_keys(stager: &Stager<KeyInjector>) {
    let categories = stager.parser().key_categories();
    println!("Letters:    {}", categories.letters.join(" "));
    println!("Function:   {}", categories.function_keys.join(" "));
    println!("Navigation: {}", categories.navigation.join(" "));
    println!("Editing:    {}", categories.editing.join(" "));
    println!("Modifiers:  {}", categories.modifiers.join(" "));
}

fn print_help() {
    println!("Commands:");
    println!("  text <string>     stage text for replay");
    println!("  key <combo>       stage a hotkey combo, e.g. CTRL+SHIFT+A");
    println!("  preset <n>        stage a preset combo by number");
    println!("  presets           list preset combos");
    println!("  keys              list available key names");
    println!("  history           show the send history");
    println!("  resend <n>        re-stage a history entry");
    println!("  toggle <n>        show/hide a text entry");
    println!("  toggle-all        bulk show/hide text entries");
    println!("  delete <n>        remove a history entry");
    println!("  clear             empty the history");
    println!("  delay <secs>      change the replay delay");
    println!("  obfuscate on|off  mask new text entries by default");
    println!("  quit              exit");
}

fn print_error(message: &str) {
    eprintln!("{}", format!("✗ {message}").red());
}
