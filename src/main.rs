use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use lidarmap::{points, scan, RenderConfig, Viewport};

/// Render a lidar point cloud to a PNG map
#[derive(Parser, Debug)]
#[command(name = "lidarmap", version, about)]
struct Args {
    /// JSON point file: `[[x, y], ...]`, `{"points": [...]}` or a saved map
    #[arg(short, long, conflicts_with = "simulate")]
    input: Option<PathBuf>,

    /// Render a simulated sweep at this time (seconds) instead of a file
    #[arg(long, value_name = "SECONDS")]
    simulate: Option<f64>,

    /// Output PNG path
    #[arg(short, long, default_value = "map.png")]
    output: PathBuf,

    #[arg(long, default_value_t = 400)]
    width: u32,

    #[arg(long, default_value_t = 400)]
    height: u32,

    /// JSON render config; missing fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only render the newest N points
    #[arg(long, value_name = "N")]
    tail: Option<usize>,

    /// Print the SHA-256 of the raw pixels
    #[arg(long)]
    digest: bool,

    /// Print a base64 data URL instead of writing the output file
    #[arg(long)]
    data_url: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let stdout = std::io::stdout();
    if let Err(e) = run(Args::parse(), &mut stdout.lock()) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Render according to `args`; `--digest` and `--data-url` text goes to `out`.
fn run(args: Args, out: &mut impl Write) -> Result<()> {
    let config = match &args.config {
        Some(path) => RenderConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RenderConfig::default(),
    };

    let loaded = match (&args.input, args.simulate) {
        (Some(path), _) => {
            points::load_points(path).with_context(|| format!("reading {}", path.display()))?
        }
        (None, Some(t)) => Some(scan::simulated_scan(t)),
        (None, None) => anyhow::bail!("nothing to render: pass --input FILE or --simulate SECONDS"),
    };

    let selected = loaded
        .as_deref()
        .map(|pts| args.tail.map_or(pts, |n| points::tail(pts, n)));

    let viewport = Viewport {
        width: args.width,
        height: args.height,
    };
    let (raster, stats) = lidarmap::render_map(&config, viewport, selected)?;
    log::info!(
        "{}x{} map: {} points drawn, {} clipped",
        viewport.width,
        viewport.height,
        stats.drawn,
        stats.clipped
    );

    if args.digest {
        writeln!(out, "{}", raster.digest())?;
    }

    write_output(&args, &raster, out)
}

#[cfg(feature = "png")]
fn write_output(args: &Args, raster: &lidarmap::Raster, out: &mut impl Write) -> Result<()> {
    let shot = raster.to_png().context("encoding PNG")?;
    if args.data_url {
        writeln!(out, "{}", shot.to_data_url())?;
        return Ok(());
    }
    std::fs::write(&args.output, &shot.png_data)
        .with_context(|| format!("writing {}", args.output.display()))?;
    log::info!("wrote {} ({} bytes)", args.output.display(), shot.png_data.len());
    Ok(())
}

#[cfg(not(feature = "png"))]
fn write_output(args: &Args, _raster: &lidarmap::Raster, _out: &mut impl Write) -> Result<()> {
    if args.data_url || !args.digest {
        anyhow::bail!("built without the `png` feature; only --digest output is available");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn input_and_simulate_conflict() {
        let res = Args::try_parse_from(["lidarmap", "--input", "a.json", "--simulate", "1"]);
        assert!(res.is_err());
    }

    #[test]
    fn defaults_match_map_view() {
        let args = Args::try_parse_from(["lidarmap", "--simulate", "0"]).unwrap();
        assert_eq!((args.width, args.height), (400, 400));
        assert_eq!(args.output, PathBuf::from("map.png"));
        assert!(!args.digest);
    }

    fn run_with(argv: &[&str]) -> Result<String> {
        let mut full = vec!["lidarmap"];
        full.extend_from_slice(argv);
        let mut out = Vec::new();
        run(Args::try_parse_from(full)?, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn expected_digest(points: &[lidarmap::Point]) -> String {
        lidarmap::render_map(&RenderConfig::default(), Viewport::default(), Some(points))
            .unwrap()
            .0
            .digest()
    }

    #[test]
    fn nothing_to_render_is_an_error() {
        let err = run_with(&[]).unwrap_err();
        assert!(err.to_string().contains("nothing to render"), "{:#}", err);
    }

    #[test]
    fn digest_matches_library_render() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("map.png");
        let printed = run_with(&[
            "--simulate",
            "1.5",
            "--digest",
            "--output",
            output.to_str().unwrap(),
        ])
        .unwrap();
        assert_eq!(printed.trim(), expected_digest(&scan::simulated_scan(1.5)));
    }

    #[test]
    fn tail_renders_only_the_newest_points() {
        let mut input = tempfile::NamedTempFile::new().unwrap();
        write!(input, "[[1000, 500], [-600, 300], [150, -270]]").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("map.png");
        let path = input.path().to_str().unwrap();
        let out = output.to_str().unwrap();

        let full = run_with(&["-i", path, "--digest", "-o", out]).unwrap();
        let tailed = run_with(&["-i", path, "--tail", "1", "--digest", "-o", out]).unwrap();
        assert_eq!(tailed.trim(), expected_digest(&[lidarmap::Point::new(150.0, -270.0)]));
        assert_ne!(full, tailed);
    }

    #[test]
    fn bad_input_file_is_reported() {
        let mut input = tempfile::NamedTempFile::new().unwrap();
        write!(input, "[[1, 2, 3]]").unwrap();
        let path = input.path().to_str().unwrap();
        assert!(run_with(&["-i", path, "--digest"]).is_err());
    }

    #[cfg(feature = "png")]
    #[test]
    fn writes_png_to_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("map.png");
        let printed = run_with(&["--simulate", "1", "--output", output.to_str().unwrap()]).unwrap();
        assert!(printed.is_empty());
        let bytes = std::fs::read(&output).unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']));
    }

    #[cfg(feature = "png")]
    #[test]
    fn data_url_goes_to_stdout_instead_of_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("map.png");
        let printed =
            run_with(&["--simulate", "1", "--data-url", "-o", output.to_str().unwrap()]).unwrap();
        assert!(printed.starts_with("data:image/png;base64,"), "{}", printed);
        assert!(!output.exists());
    }
}
