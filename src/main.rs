use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use image::Rgb;
use rand::rngs::StdRng;
use rand::SeedableRng;

use collage_rs::catalog::Catalog;
use collage_rs::populate::populate;
use collage_rs::render::{collage_file_name, colors, save_canvas};
use collage_rs::{generate_layout, GeneratorConfig, ItemTree, Resolution};

const USAGE: &str = "\
usage: collage <image-dir> [options]

options:
  --count N           collages to generate (default 1)
  --out DIR           output directory (default ./output)
  --resolution R      4k, 1440p or 1080p (default 1080p)
  --seed N            seed for reproducible output
  --nesting N         maximum nesting depth (default 2)
  --background COLOR  container background, a name or r,g,b (default white)";

/// Parsed command line.
#[derive(Debug, Clone, PartialEq)]
struct Options {
    image_dir: PathBuf,
    count: usize,
    out: PathBuf,
    resolution: Resolution,
    seed: Option<u64>,
    nesting: Option<u32>,
    background: Option<Rgb<u8>>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options> {
    let mut image_dir = None;
    let mut count = 1;
    let mut out = PathBuf::from("output");
    let mut resolution = Resolution::default();
    let mut seed = None;
    let mut nesting = None;
    let mut background = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .with_context(|| format!("{flag} needs a value\n\n{USAGE}"))
        };
        match arg.as_str() {
            "--count" => count = value("--count")?.parse().context("--count must be a number")?,
            "--out" => out = PathBuf::from(value("--out")?),
            "--resolution" => resolution = value("--resolution")?.parse()?,
            "--seed" => seed = Some(value("--seed")?.parse().context("--seed must be a number")?),
            "--nesting" => nesting = Some(value("--nesting")?.parse().context("--nesting must be a number")?),
            "--background" => background = Some(colors::parse_color(&value("--background")?)?),
            flag if flag.starts_with("--") => bail!("unknown option {flag}\n\n{USAGE}"),
            path if image_dir.is_none() => image_dir = Some(PathBuf::from(path)),
            extra => bail!("unexpected argument {extra}\n\n{USAGE}"),
        }
    }

    let Some(image_dir) = image_dir else {
        bail!("missing image directory\n\n{USAGE}");
    };
    Ok(Options {
        image_dir,
        count,
        out,
        resolution,
        seed,
        nesting,
        background,
    })
}

impl Options {
    fn generator_config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::default().with_resolution(self.resolution);
        if let Some(nesting) = self.nesting {
            config.max_nesting = nesting;
        }
        if let Some(background) = self.background {
            config.root_style.background = background;
            config.child_style.background = background;
        }
        config
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("collage_rs=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{USAGE}");
        return Ok(());
    }
    let options = parse_args(args)?;
    let config = options.generator_config();
    config.validate()?;

    tracing::info!(
        "collage starting: {} collage(s) at {} from {:?}",
        options.count,
        options.resolution,
        options.image_dir
    );

    let catalog = Catalog::scan(&options.image_dir)?;
    if catalog.is_empty() {
        bail!("No usable images found in {}", options.image_dir.display());
    }

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for i in 0..options.count {
        // Each collage draws from a fresh copy so images can repeat across
        // collages but never within one.
        let mut images = catalog.clone();
        let mut tree = ItemTree::new();
        let layout = generate_layout(&mut tree, &config, &mut rng)?;
        let placed = populate(
            &mut tree,
            &layout.leaves,
            &mut images,
            &config.heuristics,
            config.frame_style,
            &mut rng,
        );

        let canvas = tree.render(layout.root);
        let path = options.out.join(collage_file_name(&mut rng));
        save_canvas(&canvas, &path)?;
        tracing::info!(
            "Generated collage {} of {}: {} images in {} containers",
            i + 1,
            options.count,
            placed,
            layout.leaves.len()
        );
    }

    Ok(())
}
