use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use deep_skies::catalog::Catalog;
use deep_skies::coordinates::ViewportState;
use deep_skies::render::{self, DrawDirective, DrawingSurface};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Star field renderer for fixed-width star catalogs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one render pass and print every drawing directive as a JSON line
    Render {
        /// Path to the star catalog
        #[arg(short, long, default_value = "STARS.DAT")]
        catalog: PathBuf,

        /// JSON file holding the viewport, flags below override its fields
        #[arg(short, long)]
        viewport: Option<PathBuf>,

        #[command(flatten)]
        overrides: ViewportOverrides,
    },
    /// Print the number of stars in the catalog
    Info {
        #[arg(short, long, default_value = "STARS.DAT")]
        catalog: PathBuf,
    },
    /// Print one decoded star record as JSON
    Star {
        #[arg(short, long, default_value = "STARS.DAT")]
        catalog: PathBuf,

        /// 1-based ordinal index of the star
        #[arg(short, long)]
        index: u64,
    },
}

#[derive(Args)]
struct ViewportOverrides {
    /// Right ascension at the center, degrees
    #[arg(long)]
    ra: Option<f64>,
    /// Declination at the center, degrees
    #[arg(long, allow_hyphen_values = true)]
    dec: Option<f64>,
    /// Field of view, degrees
    #[arg(long)]
    fov: Option<f64>,
    /// Rotation of the field, degrees
    #[arg(long, allow_hyphen_values = true)]
    rotation: Option<f64>,
    #[arg(long)]
    limiting_magnitude: Option<f64>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
}

impl ViewportOverrides {
    fn apply(&self, mut viewport: ViewportState) -> ViewportState {
        if let Some(ra) = self.ra {
            viewport.center_ra = ra;
        }
        if let Some(dec) = self.dec {
            viewport.center_dec = dec;
        }
        if let Some(fov) = self.fov {
            viewport.field_of_view = fov;
        }
        if let Some(rotation) = self.rotation {
            viewport.rotation = rotation;
        }
        if let Some(mag) = self.limiting_magnitude {
            viewport.limiting_magnitude = mag;
        }
        if let Some(width) = self.width {
            viewport.pixel_width = width;
        }
        if let Some(height) = self.height {
            viewport.pixel_height = height;
        }
        viewport
    }
}

/// writes each directive to stdout as it arrives
struct JsonLines<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> DrawingSurface for JsonLines<W> {
    fn draw(&mut self, directive: DrawDirective) {
        if self.error.is_some() {
            return;
        }
        let written = serde_json::to_writer(&mut self.out, &directive)
            .map_err(io::Error::from)
            .and_then(|_| writeln!(self.out));
        if let Err(e) = written {
            self.error = Some(e);
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            catalog,
            viewport,
            overrides,
        } => {
            let base = match viewport {
                Some(path) => ViewportState::from_json_file(&path)?,
                None => ViewportState::default(),
            };
            let viewport = overrides.apply(base);

            let mut surface = JsonLines {
                out: io::BufWriter::new(io::stdout().lock()),
                error: None,
            };
            let summary = render::render_pass(&catalog, &viewport, &mut surface)
                .with_context(|| format!("render pass over {:?} failed", catalog))?;
            if let Some(e) = surface.error {
                return Err(e).context("writing directives to stdout");
            }
            surface.out.flush()?;
            eprintln!(
                "{} stars scanned, {} plotted, {} labelled, {} skipped",
                summary.scanned, summary.plotted, summary.labelled, summary.skipped
            );
        }
        Commands::Info { catalog: path } => {
            let mut catalog = Catalog::open(&path)?;
            let count = catalog.record_count()?;
            catalog.close();
            println!("{}: {} stars", path.display(), count);
        }
        Commands::Star {
            catalog: path,
            index,
        } => {
            let mut catalog = Catalog::open(&path)?;
            let star = catalog.get_star(index)?;
            catalog.close();
            println!("{}", serde_json::to_string_pretty(&star)?);
        }
    }
    Ok(())
}
