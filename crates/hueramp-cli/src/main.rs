use std::fs;

use anyhow::{Context, Result, bail};
use hueramp_engine::logging::{LoggingConfig, init_logging};
use hueramp_engine::{EngineConfig, Gradient, write_flat_table};

const USAGE: &str = "\
usage: hueramp <command> [args]

commands:
  show    <file>                          print control points and remap
  export  <file> <out> [n]                write an n-entry flat RGBA table
  preview <file> <out.png> [width] [height]
                                          render the gradient as a PNG strip
";

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("show") => show(&args[1..]),
        Some("export") => export(&args[1..]),
        Some("preview") => preview(&args[1..]),
        _ => {
            eprint!("{USAGE}");
            std::process::exit(2);
        }
    }
}

fn load(path: &str) -> Result<Gradient> {
    let src = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let mut gradient = Gradient::new(&EngineConfig::default());
    gradient
        .load_str(&src)
        .with_context(|| format!("loading {path}"))?;
    log::info!("loaded {} with {} control points", path, gradient.points().len());
    Ok(gradient)
}

fn arg<'a>(args: &'a [String], idx: usize, name: &str) -> Result<&'a str> {
    match args.get(idx) {
        Some(s) => Ok(s.as_str()),
        None => bail!("missing <{name}> argument\n{USAGE}"),
    }
}

fn parse_or<T: std::str::FromStr>(args: &[String], idx: usize, default: T) -> Result<T> {
    match args.get(idx) {
        Some(s) => s.parse().map_err(|_| anyhow::anyhow!("invalid argument {s:?}")),
        None => Ok(default),
    }
}

// ── show ──────────────────────────────────────────────────────────────────

fn show(args: &[String]) -> Result<()> {
    let gradient = load(arg(args, 0, "file")?)?;

    match gradient.remap() {
        Some(remap) => println!("remap: {}  (a = {})", remap.source(), remap.param()),
        None => println!("remap: none"),
    }
    println!("points:");
    for point in gradient.points() {
        let c = point.color();
        println!(
            "  {:<8} {:<5} {:<4} h={} s={} v={} a={}",
            point.position(),
            if point.is_fixed() { "fixed" } else { "" },
            point.active().to_letters(),
            c.h,
            c.s,
            c.v,
            c.a,
        );
    }
    Ok(())
}

// ── export ────────────────────────────────────────────────────────────────

fn export(args: &[String]) -> Result<()> {
    let gradient = load(arg(args, 0, "file")?)?;
    let out = arg(args, 1, "out")?;
    let n = parse_or(args, 2, EngineConfig::default().table_size)?;

    let table = gradient.export_table(n);
    fs::write(out, write_flat_table(&table)).with_context(|| format!("writing {out}"))?;
    println!("wrote {n} entries to {out}");
    Ok(())
}

// ── preview ───────────────────────────────────────────────────────────────

fn preview(args: &[String]) -> Result<()> {
    let gradient = load(arg(args, 0, "file")?)?;
    let out = arg(args, 1, "out.png")?;
    let width: u32 = parse_or(args, 2, 512)?;
    let height: u32 = parse_or(args, 3, 32)?;
    if width == 0 || height == 0 {
        bail!("preview dimensions must be non-zero");
    }

    // One sampled row, replicated downward.
    let row = gradient.export_table(width as usize);
    let img = image::RgbaImage::from_fn(width, height, |x, _| {
        let c = row[x as usize];
        image::Rgba([to_byte(c.r), to_byte(c.g), to_byte(c.b), to_byte(c.a)])
    });
    img.save(out).with_context(|| format!("writing {out}"))?;
    println!("wrote {width}x{height} preview to {out}");
    Ok(())
}

fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
