// SPDX-License-Identifier: MIT
//
// monet — print a Material color scheme from a seed color or an image.
//
// Wires the three library crates together:
//
//   monet-hct      → Argb parsing and the color space
//   monet-quantize → pixels → seed candidates (via monet-scheme::extract)
//   monet-scheme   → seed + options → resolved roles
//
// Usage:
//
//   monet [OPTIONS] <SEED>
//   monet [OPTIONS] --pixels <FILE>
//
// <SEED> is a hex color (#RGB, #RRGGBB, #AARRGGBB; the # is optional).
// <FILE> holds already decoded pixels as packed 8-bit RGB triples.
//
// Output is one `role #RRGGBB` line per role, in catalogue order.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::process;

use monet_hct::{Argb, ColorError};
use monet_scheme::{ColorScheme, ColorSchemeBuilder, Overrides, Role, SchemeError, extract_color};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
usage: monet [OPTIONS] <SEED>
       monet [OPTIONS] --pixels <FILE>

options:
  --variant <NAME>          tonal-spot (default), neutral, vibrant, expressive,
                            fidelity, content, monochrome, rainbow, fruit-salad
  --dark                    dark scheme
  --contrast <LEVEL>        -1.0 ..= 1.0 (default 0.0)
  --platform <NAME>         phone (default) or watch
  --spec <YEAR>             2021 (default) or 2025
  --secondary <HEX>         seed override for the secondary palette
  --tertiary <HEX>          seed override for the tertiary palette
  --neutral <HEX>           seed override for the neutral palette
  --neutral-variant <HEX>   seed override for the neutral variant palette
  --error <HEX>             seed override for the error palette
  --role <NAME>             print a single role
  --all                     include key colors and dim roles
  --verbose                 log at debug level to stderr
  -h, --help                print this help";

// ─── Errors ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
enum CliError {
    #[error("{0} needs a value")]
    MissingValue(String),

    #[error("unknown option {0:?}")]
    UnknownOption(String),

    #[error("expected one seed color, got {0:?} and {1:?}")]
    ExtraSeed(String, String),

    #[error("nothing to do: give a seed color or --pixels <FILE>")]
    NoSource,

    #[error("give either a seed color or --pixels, not both")]
    TwoSources,

    #[error("contrast level {0:?} is not a number")]
    BadNumber(String),

    #[error("{path}: {source}")]
    Read { path: String, source: std::io::Error },

    #[error("{path}: length {len} is not a multiple of 3 (expected RGB triples)")]
    RaggedPixels { path: String, len: usize },

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error(transparent)]
    Scheme(#[from] SchemeError),
}

// ─── Arguments ──────────────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
enum Source {
    Seed(Argb),
    Pixels(String),
}

#[derive(Debug)]
struct Args {
    source: Source,
    builder: ColorSchemeBuilder,
    role: Option<Role>,
    all: bool,
    verbose: bool,
}

/// What the command line asked for: a scheme, or the help text.
#[derive(Debug)]
enum Invocation {
    Run(Args),
    Help,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Invocation, CliError> {
    let mut args = args.into_iter();
    let mut builder = ColorSchemeBuilder::default();
    let mut overrides = Overrides::default();
    let mut seed: Option<String> = None;
    let mut pixels: Option<String> = None;
    let mut role = None;
    let mut all = false;
    let mut verbose = false;

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| args.next().ok_or_else(|| CliError::MissingValue(flag.to_string()));
        match arg.as_str() {
            "-h" | "--help" => return Ok(Invocation::Help),
            "--dark" => builder = builder.dark(true),
            "--all" => all = true,
            "--verbose" | "-v" => verbose = true,
            "--variant" => builder = builder.variant(value(&arg)?.parse()?),
            "--platform" => builder = builder.platform(value(&arg)?.parse()?),
            "--spec" => builder = builder.spec_version(value(&arg)?.parse()?),
            "--contrast" => {
                let raw = value(&arg)?;
                let level: f64 = raw.parse().map_err(|_| CliError::BadNumber(raw))?;
                builder = builder.contrast_level(level)?;
            }
            "--secondary" => overrides.secondary = Some(value(&arg)?.parse()?),
            "--tertiary" => overrides.tertiary = Some(value(&arg)?.parse()?),
            "--neutral" => overrides.neutral = Some(value(&arg)?.parse()?),
            "--neutral-variant" => overrides.neutral_variant = Some(value(&arg)?.parse()?),
            "--error" => overrides.error = Some(value(&arg)?.parse()?),
            "--role" => role = Some(value(&arg)?.parse()?),
            "--pixels" => pixels = Some(value(&arg)?),
            flag if flag.starts_with('-') => return Err(CliError::UnknownOption(arg)),
            _ => {
                if let Some(first) = seed {
                    return Err(CliError::ExtraSeed(first, arg));
                }
                seed = Some(arg);
            }
        }
    }

    let source = match (seed, pixels) {
        (Some(hex), None) => Source::Seed(hex.parse()?),
        (None, Some(path)) => Source::Pixels(path),
        (None, None) => return Err(CliError::NoSource),
        (Some(_), Some(_)) => return Err(CliError::TwoSources),
    };

    Ok(Invocation::Run(Args { source, builder: builder.overrides(overrides), role, all, verbose }))
}

// ─── Pixels ─────────────────────────────────────────────────────────────────

/// Packed RGB triples to opaque colors.
fn decode_rgb(bytes: &[u8], path: &str) -> Result<Vec<Argb>, CliError> {
    if bytes.len() % 3 != 0 {
        return Err(CliError::RaggedPixels { path: path.to_string(), len: bytes.len() });
    }
    Ok(bytes.chunks_exact(3).map(|px| Argb::from_rgb(px[0], px[1], px[2])).collect())
}

fn seed_from_pixels(path: &str) -> Result<Argb, CliError> {
    let bytes = fs::read(path).map_err(|source| CliError::Read { path: path.to_string(), source })?;
    let pixels = decode_rgb(&bytes, path)?;
    let seed = extract_color(&pixels)?;
    debug!(path, pixels = pixels.len(), %seed, "seed from image");
    Ok(seed)
}

// ─── Output ─────────────────────────────────────────────────────────────────

fn render(scheme: &ColorScheme, role: Option<Role>, all: bool) -> Result<String, CliError> {
    let mut out = String::new();
    if let Some(role) = role {
        let argb = scheme.get(role).ok_or_else(|| SchemeError::UnknownRole(role.name().to_string()))?;
        let _ = writeln!(out, "{} {argb}", role.name());
        return Ok(out);
    }

    let roles: Vec<_> = if all { scheme.iter_all().collect() } else { scheme.iter().collect() };
    for (role, argb) in roles {
        let _ = writeln!(out, "{} {argb}", role.name());
    }
    Ok(out)
}

fn run(args: Args) -> Result<String, CliError> {
    let seed = match &args.source {
        Source::Seed(seed) => *seed,
        Source::Pixels(path) => seed_from_pixels(path)?,
    };
    let scheme = args.builder.seed(seed).build();
    render(&scheme, args.role, args.all)
}

fn init_logging(verbose: bool) {
    // --verbose beats RUST_LOG.
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() {
    let args = match parse_args(env::args().skip(1)) {
        Ok(Invocation::Run(args)) => args,
        Ok(Invocation::Help) => {
            println!("{USAGE}");
            return;
        }
        Err(e) => {
            eprintln!("monet: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    init_logging(args.verbose);

    match run(args) {
        Ok(out) => print!("{out}"),
        Err(e) => {
            eprintln!("monet: {e}");
            process::exit(1);
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use monet_scheme::{Platform, SpecVersion, Variant};
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<Invocation, CliError> {
        parse_args(args.iter().map(|s| (*s).to_string()))
    }

    fn run_args(args: &[&str]) -> Args {
        match parse(args) {
            Ok(Invocation::Run(args)) => args,
            other => panic!("expected a run for {args:?}, got {other:?}"),
        }
    }

    // ── Parsing ───────────────────────────────────────────────────────────

    #[test]
    fn seed_alone_uses_defaults() {
        let args = run_args(&["#6750A4"]);
        assert_eq!(args.source, Source::Seed(Argb(0xFF67_50A4)));
        let config = args.builder.config();
        assert_eq!(config.variant, Variant::TonalSpot);
        assert!(!config.dark);
        assert_eq!(config.spec_version, SpecVersion::Spec2021);
        assert_eq!(args.role, None);
    }

    #[test]
    fn options_reach_the_builder() {
        let args = run_args(&[
            "6750a4", "--dark", "--variant", "vibrant", "--contrast", "0.5", "--platform", "watch", "--spec",
            "2025", "--tertiary", "#00FF00", "--role", "on-primary",
        ]);
        let config = args.builder.config();
        assert!(config.dark);
        assert_eq!(config.variant, Variant::Vibrant);
        assert!((config.contrast.level() - 0.5).abs() < 1e-12, "contrast {}", config.contrast.level());
        assert_eq!(config.platform, Platform::Watch);
        assert_eq!(config.spec_version, SpecVersion::Spec2025);
        assert_eq!(config.overrides.tertiary, Some(Argb(0xFF00_FF00)));
        assert_eq!(args.role, Some(Role::OnPrimary));
    }

    #[test]
    fn pixels_source() {
        let args = run_args(&["--pixels", "photo.rgb", "--verbose"]);
        assert_eq!(args.source, Source::Pixels("photo.rgb".to_string()));
        assert!(args.verbose);
    }

    #[test]
    fn help_wins() {
        assert!(matches!(parse(&["--dark", "--help"]), Ok(Invocation::Help)));
    }

    // ── Parse errors ──────────────────────────────────────────────────────

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(parse(&[]), Err(CliError::NoSource)));
        assert!(matches!(parse(&["#fff", "--pixels", "a.rgb"]), Err(CliError::TwoSources)));
        assert!(matches!(parse(&["#fff", "#000"]), Err(CliError::ExtraSeed(..))));
        assert!(matches!(parse(&["#fff", "--variant"]), Err(CliError::MissingValue(_))));
        assert!(matches!(parse(&["#fff", "--bogus"]), Err(CliError::UnknownOption(_))));
        assert!(matches!(parse(&["not-a-color"]), Err(CliError::Color(_))));
        assert!(matches!(parse(&["#fff", "--contrast", "lots"]), Err(CliError::BadNumber(_))));
        assert!(matches!(
            parse(&["#fff", "--contrast", "2"]),
            Err(CliError::Scheme(SchemeError::InvalidContrast(_)))
        ));
        assert!(matches!(
            parse(&["#fff", "--variant", "pastel"]),
            Err(CliError::Scheme(SchemeError::UnknownVariant(_)))
        ));
    }

    // ── Pixels ────────────────────────────────────────────────────────────

    #[test]
    fn decodes_rgb_triples() {
        let pixels = decode_rgb(&[0xFF, 0, 0, 0, 0x80, 0], "x").unwrap_or_default();
        assert_eq!(pixels, vec![Argb(0xFFFF_0000), Argb(0xFF00_8000)]);
        assert!(matches!(decode_rgb(&[1, 2], "x"), Err(CliError::RaggedPixels { len: 2, .. })));
    }

    // ── Output ────────────────────────────────────────────────────────────

    #[test]
    fn prints_one_line_per_role() {
        let scheme = ColorScheme::from_seed(Argb(0xFF67_50A4));
        let out = render(&scheme, None, false).unwrap_or_default();
        assert_eq!(out.lines().count(), Role::STANDARD.len());
        assert!(out.lines().all(|l| l.split_once(" #").is_some_and(|(_, hex)| hex.len() == 6)), "{out}");

        let all = render(&scheme, None, true).unwrap_or_default();
        assert!(all.lines().count() > out.lines().count());
    }

    #[test]
    fn single_role() {
        let scheme = ColorScheme::from_seed(Argb(0xFF67_50A4));
        let expected = scheme.get(Role::Primary).map(|c| format!("primary {c}\n"));
        assert_eq!(render(&scheme, Some(Role::Primary), false).ok(), expected);
    }

    #[test]
    fn dim_role_missing_in_2021() {
        let scheme = ColorScheme::from_seed(Argb(0xFF67_50A4));
        assert!(matches!(
            render(&scheme, Some(Role::PrimaryDim), false),
            Err(CliError::Scheme(SchemeError::UnknownRole(_)))
        ));
    }
}
