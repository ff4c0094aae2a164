use clap::{Parser, Subcommand};
use lightbox_gal::{config, generate, output};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "lightbox-gal")]
#[command(about = "Static image gallery with a lightbox viewer")]
#[command(long_about = "\
Static image gallery with a lightbox viewer

Reads an ordered list of images and writes a single page with a thumbnail
grid. Clicking a thumbnail opens it enlarged; arrow keys or the on-screen
arrows move between images (wrapping at both ends), Escape or a click on the
backdrop closes it.

Content structure:

  content/
  ├── gallery.toml     # [[items]] preview / original / description
  ├── config.toml      # Site config (optional)
  └── assets/          # Copied to the output root (optional)

gallery.json is accepted instead of gallery.toml: either an array of items
or an object with an \"items\" array.

Run 'lightbox-gal gen-config' to print a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the gallery page
    Build,
    /// Validate config and gallery data without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            println!("==> Building {}", cli.source.display());
            let site = generate::load_site(&cli.source)?;
            output::print_items_output(&site.items, &site.items_file);
            let report = generate::write_site(&site, &cli.source, &cli.output)?;
            output::print_generate_output(&report, &cli.output);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = generate::load_site(&cli.source)?;
            output::print_items_output(&site.items, &site.items_file);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
