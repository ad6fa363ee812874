//! inworld-tts - check credentials, browse voices and synthesize speech from the shell.
//!
//! Usage:
//!   inworld-tts check [--config <path>]
//!   inworld-tts voices [--config <path>] [--language <code>]
//!   inworld-tts speak <text> --out <file> [--config <path>] [--voice <id>] [--encoding <enc>]

use anyhow::Context;
use inworld_tts::{InworldProvider, ProviderConfig, SpeechProvider, TtsOptions};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "check" => cmd_check(&args[2..]).await,
        "voices" => cmd_voices(&args[2..]).await,
        "speak" => cmd_speak(&args[2..]).await,
        "version" | "--version" | "-V" => {
            cmd_version();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(err) = result {
        match err.downcast_ref::<inworld_tts::Error>() {
            Some(e) => eprintln!("Error: {}", e.user_message()),
            None => eprintln!("Error: {err:#}"),
        }
        std::process::exit(1);
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inworld_tts=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_usage() {
    println!(
        r#"inworld-tts - Inworld text-to-speech from the command line

USAGE:
    inworld-tts <COMMAND> [OPTIONS]

COMMANDS:
    check                       Verify the API key and connectivity
    voices [--language <code>]  List available voices, grouped by language
    speak <text> --out <file>   Synthesize text and write the audio to a file
    version                     Show version information
    help                        Show this help message

OPTIONS:
    --config <path>             YAML provider config (env overrides still apply)
    --voice <id>                Voice for this utterance (speak)
    --encoding <enc>            LINEAR16, MP3, OGG_OPUS, ALAW or MULAW (speak)

ENVIRONMENT:
    INWORLD_API_KEY             API key (falls back to the OS keyring)
    INWORLD_API_URL             API base URL
    RUST_LOG                    Log filter, e.g. inworld_tts=debug"#
    );
}

fn cmd_version() {
    println!("inworld-tts {}", env!("CARGO_PKG_VERSION"));
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

/// First argument that is neither a flag nor a flag's value.
fn positional(args: &[String]) -> Option<String> {
    let mut skip = false;
    for arg in args {
        if skip {
            skip = false;
            continue;
        }
        if arg.starts_with("--") {
            skip = true;
            continue;
        }
        return Some(arg.clone());
    }
    None
}

fn load_config(args: &[String]) -> anyhow::Result<ProviderConfig> {
    let config = match flag_value(args, "--config") {
        Some(path) => ProviderConfig::from_yaml_file(PathBuf::from(&path))
            .with_context(|| format!("loading {path}"))?,
        None => ProviderConfig::default(),
    };
    Ok(config.with_env_overrides()?)
}

async fn cmd_check(args: &[String]) -> anyhow::Result<()> {
    let provider = InworldProvider::setup(load_config(args)?).await?;
    let settings = provider.settings();
    println!("OK  {} ({})", provider.name(), provider.unique_id());
    println!("    voice:    {}", settings.voice_id);
    println!("    language: {}", settings.language);
    println!("    model:    {} - {}", settings.model_id, settings.model_id.description());
    println!(
        "    audio:    {} @ {} Hz ({})",
        settings.audio_encoding,
        settings.sample_rate_hertz,
        settings.audio_encoding.content_type()
    );
    Ok(())
}

async fn cmd_voices(args: &[String]) -> anyhow::Result<()> {
    let provider = InworldProvider::setup(load_config(args)?).await?;
    let catalog = provider.catalog();
    let only = flag_value(args, "--language");

    for language in catalog.languages() {
        if only.as_deref().is_some_and(|l| l != language) {
            continue;
        }
        println!("{}", language.to_uppercase());
        for voice in catalog.voices_for(language) {
            if voice.label == voice.value {
                println!("  {}", voice.value);
            } else {
                println!("  {:<20} {}", voice.value, voice.label);
            }
        }
    }
    Ok(())
}

async fn cmd_speak(args: &[String]) -> anyhow::Result<()> {
    let text = positional(args).context("missing <text> to speak")?;
    let out = flag_value(args, "--out").context("missing --out <file>")?;

    let provider = InworldProvider::setup(load_config(args)?).await?;
    let options = TtsOptions {
        voice: flag_value(args, "--voice"),
        audio_encoding: flag_value(args, "--encoding"),
        ..Default::default()
    };
    let language = provider.default_language().to_string();
    let audio = provider
        .get_tts_audio(&text, &language, Some(&options))
        .await?;

    tokio::fs::write(&out, &audio.data)
        .await
        .with_context(|| format!("writing {out}"))?;
    println!("Wrote {} bytes of {} to {}", audio.data.len(), audio.content_type, out);
    Ok(())
}
