pub mod analyze;
pub mod manifest;
pub mod render;

use clap::Parser;
use eyre::Result;
use log::{debug, info};

use std::path::PathBuf;

use manifest::Manifest;

#[derive(Clone, Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Section manifest (TOML)
    #[arg(short, long)]
    manifest: PathBuf,
    /// Write a stylesheet of per-section CSS custom properties
    #[arg(short, long)]
    css: Option<PathBuf>,
    /// Print the themes as JSON instead of a table
    #[arg(short, long)]
    json: bool,
    /// Toggle the manifest's dark mode setting
    #[arg(long)]
    dark: bool,
}

fn main() -> Result<()> {
    pretty_env_logger::init_custom_env("FOLIO_LOG");
    let args = Args::parse();
    debug!("Arguments: {:?}", &args);

    let manifest = Manifest::load(&args.manifest)?;
    let mut registry = manifest.registry();
    if args.dark {
        registry.toggle_dark_mode();
    }

    let jobs = manifest.jobs();
    let updated = analyze::run(&jobs, &mut registry);
    info!("{updated} of {} section themes derived from images", jobs.len());

    if let Some(css) = &args.css {
        info!("writing stylesheet to {}", css.display());
        render::write_stylesheet(css, &registry)?;
    }
    if args.json {
        println!("{}", render::render_json(&registry)?);
    } else {
        render::print_table(&registry);
    }
    Ok(())
}
