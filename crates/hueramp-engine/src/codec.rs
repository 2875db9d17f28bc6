//! Persistence for the gradient model.
//!
//! The gradient file is line-oriented and versioned:
//!
//! ```text
//! V 1.1 Color Gradient File
//! ScalingFunction: x ** a
//! ScalingParameter: 2
//! ControlPoints: (pos fixed channels h s v a)
//! 0 True hsva 0.16666667 0 0 1
//! 1 True hsva 0.16666667 0 1 1
//! ```
//!
//! Versions below 1.1 omit the two scaling lines and load with no remap.
//! Only the control points and remap are persisted; the sampled tables are
//! derived and rebuilt on load.

use hueramp_expr::RemapFn;

use crate::color::{Hsva, Rgba};
use crate::error::FormatError;
use crate::gradient::Gradient;
use crate::point::{ChannelSet, ColorPoint};

/// Version written by [`write_gradient_file`].
pub const FORMAT_VERSION: &str = "1.1";

const MAGIC_TITLE: &str = "Color Gradient File";

/// The parsed content of a gradient file, staged before it replaces any
/// live gradient state.
#[derive(Debug, Clone)]
pub struct GradientFile {
    /// Sorted ascending by position; file order preserved for ties.
    pub points: Vec<ColorPoint>,
    pub remap: Option<RemapFn>,
}

// ── Writing ───────────────────────────────────────────────────────────────

/// Serializes the gradient's control points and remap. Always writes the
/// current format version.
pub fn write_gradient_file(gradient: &Gradient) -> String {
    let mut out = String::new();
    out.push_str(&format!("V {FORMAT_VERSION} {MAGIC_TITLE}\n"));
    match gradient.remap() {
        Some(remap) => {
            out.push_str(&format!("ScalingFunction: {}\n", remap.source()));
            out.push_str(&format!("ScalingParameter: {}\n", remap.param()));
        }
        None => {
            out.push_str("ScalingFunction:\n");
            out.push_str("ScalingParameter: 0\n");
        }
    }
    out.push_str("ControlPoints: (pos fixed channels h s v a)\n");
    for point in gradient.points() {
        let c = point.color();
        out.push_str(&format!(
            "{} {} {} {} {} {} {}\n",
            point.position(),
            if point.is_fixed() { "True" } else { "False" },
            point.active().to_letters(),
            c.h,
            c.s,
            c.v,
            c.a,
        ));
    }
    out
}

/// Serializes a flat RGBA table: a count header, then one `r g b a` line
/// per entry. One-way export for consumers that only understand dense
/// lookup tables.
pub fn write_flat_table(table: &[Rgba]) -> String {
    let mut out = String::with_capacity(table.len() * 16 + 8);
    out.push_str(&format!("{}\n", table.len()));
    for c in table {
        out.push_str(&format!("{} {} {} {}\n", c.r, c.g, c.b, c.a));
    }
    out
}

// ── Parsing ───────────────────────────────────────────────────────────────

/// Parses a gradient file into a staged [`GradientFile`].
///
/// All validation happens here, including remap compilation, so a caller
/// can keep its live gradient untouched on any failure.
pub fn parse_gradient_file(src: &str) -> Result<GradientFile, FormatError> {
    let lines: Vec<&str> = src.lines().collect();
    let mut next = 0;

    let version = parse_magic(&lines, &mut next)?;
    let remap = if version < 1.1 {
        // Legacy files predate scaling functions.
        None
    } else {
        parse_scaling(&lines, &mut next)?
    };
    let points = parse_control_points(&lines, &mut next)?;

    log::debug!(
        "parsed gradient file: version {version}, {} points, remap {}",
        points.len(),
        if remap.is_some() { "present" } else { "absent" },
    );

    Ok(GradientFile { points, remap })
}

fn parse_magic(lines: &[&str], next: &mut usize) -> Result<f32, FormatError> {
    let line = lines
        .first()
        .ok_or_else(|| FormatError::new("empty file", 1))?;
    let rest = line
        .strip_prefix("V ")
        .ok_or_else(|| FormatError::new("not a gradient file (missing version tag)", 1))?;
    let (version, title) = rest
        .split_once(' ')
        .ok_or_else(|| FormatError::new("malformed version line", 1))?;
    if title.trim() != MAGIC_TITLE {
        return Err(FormatError::new("not a gradient file (wrong title)", 1));
    }
    let version: f32 = version
        .parse()
        .map_err(|_| FormatError::new(format!("invalid version {version:?}"), 1))?;
    *next = 1;
    Ok(version)
}

fn parse_scaling(lines: &[&str], next: &mut usize) -> Result<Option<RemapFn>, FormatError> {
    let expr_line_no = *next + 1;
    let expr = field_after(lines, next, "ScalingFunction:")?.to_string();
    let param_str = field_after(lines, next, "ScalingParameter:")?;
    let param: f32 = param_str
        .parse()
        .map_err(|_| FormatError::new(format!("invalid scaling parameter {param_str:?}"), *next))?;

    if expr.is_empty() {
        return Ok(None);
    }
    RemapFn::compile(&expr, param)
        .map(Some)
        .map_err(|e| FormatError::new(format!("bad scaling function: {e}"), expr_line_no))
}

fn field_after<'s>(
    lines: &[&'s str],
    next: &mut usize,
    prefix: &str,
) -> Result<&'s str, FormatError> {
    let line_no = *next + 1;
    let line = lines
        .get(*next)
        .ok_or_else(|| FormatError::new(format!("missing {prefix} line"), line_no))?;
    let value = line
        .strip_prefix(prefix)
        .ok_or_else(|| FormatError::new(format!("expected {prefix} line"), line_no))?;
    *next += 1;
    Ok(value.trim())
}

fn parse_control_points(lines: &[&str], next: &mut usize) -> Result<Vec<ColorPoint>, FormatError> {
    let header_line_no = *next + 1;
    let header = lines
        .get(*next)
        .ok_or_else(|| FormatError::new("missing ControlPoints header", header_line_no))?;
    if !header.starts_with("ControlPoints:") {
        return Err(FormatError::new("expected ControlPoints header", header_line_no));
    }
    *next += 1;

    let mut points = Vec::new();
    for (offset, raw) in lines[*next..].iter().enumerate() {
        let line_no = *next + offset + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        points.push(parse_point_line(line, line_no)?);
    }

    // Stable sort keeps file order for coincident positions.
    points.sort_by(|a, b| a.position().total_cmp(&b.position()));

    validate_boundaries(&mut points, header_line_no)?;
    Ok(points)
}

fn parse_point_line(line: &str, line_no: usize) -> Result<ColorPoint, FormatError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 7 {
        return Err(FormatError::new(
            format!("control point needs 7 fields, got {}", fields.len()),
            line_no,
        ));
    }

    let float = |s: &str| -> Result<f32, FormatError> {
        s.parse()
            .map_err(|_| FormatError::new(format!("invalid number {s:?}"), line_no))
    };

    let position = float(fields[0])?;
    let fixed = match fields[1] {
        "True" => true,
        "False" => false,
        other => {
            return Err(FormatError::new(
                format!("fixed flag must be True or False, got {other:?}"),
                line_no,
            ));
        }
    };
    let active = ChannelSet::from_letters(fields[2])
        .ok_or_else(|| FormatError::new(format!("unknown channel letters {:?}", fields[2]), line_no))?;
    let color = Hsva::new(float(fields[3])?, float(fields[4])?, float(fields[5])?, float(fields[6])?);

    Ok(ColorPoint::from_parts(position, color, fixed, active))
}

/// The interpolation invariant needs fixed, all-channel boundary points at
/// 0 and 1; a file without them cannot produce a valid gradient.
fn validate_boundaries(points: &mut [ColorPoint], line_no: usize) -> Result<(), FormatError> {
    let mut has_left = false;
    let mut has_right = false;
    for point in points.iter_mut() {
        if point.is_fixed() {
            // Boundary points are active everywhere by invariant; repair
            // quietly since activation is monotonic anyway.
            point.activate(ChannelSet::ALL);
            has_left |= point.position() == 0.0;
            has_right |= point.position() == 1.0;
        }
    }
    if !has_left || !has_right {
        return Err(FormatError::new(
            "file must contain fixed boundary points at positions 0 and 1",
            line_no,
        ));
    }
    Ok(())
}

// ── Gradient entry points ─────────────────────────────────────────────────

impl Gradient {
    /// Replaces this gradient's points and remap from a persisted file.
    ///
    /// All-or-nothing: on any parse or compile failure the gradient is left
    /// exactly as it was.
    pub fn load_str(&mut self, src: &str) -> Result<(), FormatError> {
        let file = parse_gradient_file(src)?;
        self.replace_model(file.points, file.remap);
        Ok(())
    }

    /// Serializes this gradient with [`write_gradient_file`].
    pub fn save_string(&self) -> String {
        write_gradient_file(self)
    }
}
