use std::fs;
use std::io::{self, Write};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use langswitch::core::{
    format_output_path, print_error_message, switch_document_language, DocumentOptions,
};
use langswitch::env::{self, EnvVar};
use langswitch::translation::{ConfigManager, SwitcherConfig};

#[derive(Parser, Debug)]
#[command(
    name = "langswitch",
    version,
    about = "Switch the language of an HTML document in place using phrase dictionaries"
)]
struct Cli {
    /// HTML file to translate
    #[arg(required_unless_present = "print_env_docs")]
    input: Option<String>,

    /// Language to switch the document to
    #[arg(short, long)]
    lang: Option<String>,

    /// Language the document is written in
    #[arg(short, long)]
    default_lang: Option<String>,

    /// Directory or http(s) URL holding the dictionaries
    #[arg(short, long)]
    path: Option<String>,

    /// Dictionary file extension
    #[arg(short = 'x', long)]
    extension: Option<String>,

    /// Extra attributes to translate
    #[arg(short, long, value_delimiter = ',')]
    attributes: Vec<String>,

    /// Match phrases without collapsing whitespace
    #[arg(long)]
    no_clean: bool,

    /// Selector of the subtree watched for changes
    #[arg(long)]
    observe: Option<String>,

    /// Write the result here instead of stdout (supports %title% and %lang%)
    #[arg(short, long)]
    output: Option<String>,

    /// Charset of the produced document
    #[arg(short, long)]
    encoding: Option<String>,

    /// Remember the selected language between runs
    #[arg(long)]
    persist: bool,

    /// Database file used with --persist
    #[arg(long)]
    storage: Option<String>,

    /// Configuration file (TOML or JSON)
    #[arg(short, long)]
    config: Option<String>,

    /// Print the supported environment variables and exit
    #[arg(long)]
    print_env_docs: bool,
}

impl Cli {
    fn switcher_config(&self) -> Result<SwitcherConfig, String> {
        let manager = match &self.config {
            Some(path) => ConfigManager::from_file(path),
            None => ConfigManager::new(),
        }
        .map_err(|e| e.to_string())?;

        let mut config = manager.into_config();
        if let Some(default_lang) = &self.default_lang {
            config.default_lang = default_lang.clone();
        }
        if let Some(path) = &self.path {
            config.path = path.clone();
        }
        if let Some(extension) = &self.extension {
            config.extension = extension.clone();
        }
        config.attributes.extend(self.attributes.iter().cloned());
        if self.no_clean {
            config.clean = false;
        }
        if let Some(observe) = &self.observe {
            config.observe = Some(observe.clone());
        }
        config.persistent = self.persist;
        if let Some(storage) = &self.storage {
            config.storage_path = storage.clone();
        }

        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}

fn init_logging() {
    let level = env::core::LogLevel::get_or_default("info".to_string());
    let no_color = env::core::NoColor::get_or_default(false);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(format!("langswitch={level}"))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(!no_color)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if cli.print_env_docs {
        print!("{}", env::generate_env_docs());
        return;
    }

    init_logging();

    let config = match cli.switcher_config() {
        Ok(config) => config,
        Err(e) => {
            print_error_message(&format!("Error: {e}"));
            process::exit(1);
        }
    };

    let options = DocumentOptions {
        lang: cli.lang.clone(),
        input_encoding: None,
        output_encoding: cli.encoding.clone(),
        config,
    };

    let target = cli.input.as_deref().unwrap_or_default();
    let document = match switch_document_language(target, &options).await {
        Ok(document) => document,
        Err(e) => {
            print_error_message(&format!("Error: {e}"));
            process::exit(1);
        }
    };

    let written = match &cli.output {
        Some(output) => {
            let path = format_output_path(output, document.title.as_deref(), &document.lang);
            fs::write(&path, &document.data)
        }
        None => io::stdout()
            .lock()
            .write_all(&document.data)
            .and_then(|_| io::stdout().flush()),
    };

    if let Err(e) = written {
        print_error_message(&format!("Error: could not write output: {e}"));
        process::exit(1);
    }
}
