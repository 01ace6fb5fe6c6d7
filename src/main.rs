use api_pages::config::{self, ConfigOverrides, Newline};
use api_pages::generate::{Documenter, FileSink, MemorySink};
use api_pages::model::ApiModel;
use api_pages::output;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "api-pages")]
#[command(about = "Markdown reference pages from an API model")]
#[command(long_about = "\
Markdown reference pages from an API model

Reads the JSON API model of a package and writes one Markdown page per
documented item, each with TOML front matter:

  api/
  ├── _index.md                        # API Reference
  └── widgets/
      ├── _root/_index.md              # widgets package
      ├── Widget/_index.md             # Widget class
      │   └── render/_index.md         # Widget.render method
      └── var_defaultTheme/_index.md   # variables get a var_ prefix

The output directory is emptied before pages are written.

Run 'api-pages gen-config' to generate a documented api-pages.toml.")]
#[command(version)]
struct Cli {
    /// API model file
    #[arg(long, default_value = "api.json", global = true)]
    input: PathBuf,

    /// Output directory
    #[arg(long, default_value = "api", global = true)]
    output: PathBuf,

    /// Config file (optional; defaults apply when missing)
    #[arg(long, default_value = config::CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Log every page written (same as RUST_LOG=debug)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(flatten)]
    overrides: OverrideArgs,

    #[command(subcommand)]
    command: Command,
}

/// Flags that take precedence over the config file.
#[derive(clap::Args, Clone)]
struct OverrideArgs {
    /// Prefix of every link between pages
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Line endings of written pages
    #[arg(long, value_enum, global = true)]
    newline: Option<NewlineArg>,

    /// List inherited members in class and interface tables
    #[arg(long, global = true)]
    show_inherited_members: bool,
}

#[derive(ValueEnum, Clone, Copy)]
enum NewlineArg {
    Lf,
    Crlf,
    Os,
}

impl From<NewlineArg> for Newline {
    fn from(arg: NewlineArg) -> Self {
        match arg {
            NewlineArg::Lf => Newline::Lf,
            NewlineArg::Crlf => Newline::Crlf,
            NewlineArg::Os => Newline::Os,
        }
    }
}

impl OverrideArgs {
    fn to_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            newline: self.newline.map(Newline::from),
            show_inherited_members: self.show_inherited_members.then_some(true),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Write the page tree to the output directory
    Generate,
    /// Render every page in memory and report problems without writing
    Check {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock api-pages.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // --verbose enables DEBUG, otherwise use RUST_LOG or default to INFO
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Generate => {
            let config = config::load_config(&cli.config, &cli.overrides.to_overrides())?;
            let model = ApiModel::load(&cli.input)?;
            let documenter = Documenter::new(&model, &config)?;
            let report = documenter.run(&mut FileSink::new(&cli.output), None)?;
            output::print_generate_output(&report);
        }
        Command::Check { json } => {
            let config = config::load_config(&cli.config, &cli.overrides.to_overrides())?;
            let model = ApiModel::load(&cli.input)?;
            let documenter = Documenter::new(&model, &config)?;
            let report = documenter.run(&mut MemorySink::default(), None)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_check_output(&report);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
