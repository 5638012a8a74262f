use indexmap::IndexMap;

use super::color::convert_scalar_color;
use super::error::ConvertError;
use super::geometry::{expand_rectangle, zip_coordinates};
use super::options::ConvertOptions;
use super::parser::parse_input;
use super::records::{Named, flatten, unflatten};
use super::stats::Stats;
use super::types::*;
use super::writer::render_output;

/// Icon name meaning "use whatever the set declares"
const DEFAULT_ICON_SENTINEL: &str = "default";

/// Result of a conversion run, ready to be rendered
#[derive(Debug, Clone)]
pub struct Conversion {
    pub marker_sets: IndexMap<String, OutputSet>,
    pub stats: Stats,
}

impl Conversion {
    /// Render the output text including the stats comment block.
    /// Call [`Stats::finalize`] first to stamp the report.
    pub fn render(&self) -> Result<String, ConvertError> {
        render_output(&self.marker_sets, &self.stats)
    }
}

/// What the marker converters need to know about the set they belong to
pub struct SetContext<'a> {
    pub set_name: &'a str,
    /// Set-level icon, only valid while this set is converted
    pub default_icon: Option<&'a str>,
    pub options: &'a ConvertOptions,
}

type MarkerConverter<T> = fn(
    Named<T>,
    &SetContext<'_>,
    &mut Stats,
) -> Result<Option<Named<OutputMarker>>, ConvertError>;

/// Convert a Dynmap YAML document into BlueMap marker sets
pub fn convert(input: &str, options: &ConvertOptions) -> Result<Conversion, ConvertError> {
    options.validate()?;
    let document = parse_input(input)?;

    let mut stats = Stats::new();
    let marker_sets = convert_marker_sets(document.sets, options, &mut stats)?;

    log::info!(
        "Converted {} of {} marker sets ({} skipped), {} of {} markers ({} skipped)",
        stats.sets.output,
        stats.sets.input,
        stats.sets.skipped,
        stats.markers.output,
        stats.markers.input,
        stats.markers.skipped
    );

    Ok(Conversion { marker_sets, stats })
}

/// Convert, stamp the report and render the output text in one go
pub fn convert_to_string(input: &str, options: &ConvertOptions) -> Result<String, ConvertError> {
    let mut conversion = convert(input, options)?;
    conversion.stats.finalize();
    conversion.render()
}

/// Convert all sets, dropping excluded sets and sets without markers
pub fn convert_marker_sets(
    sets: IndexMap<String, InputSet>,
    options: &ConvertOptions,
    stats: &mut Stats,
) -> Result<IndexMap<String, OutputSet>, ConvertError> {
    let records = flatten(sets);
    stats.sets.input += records.len();

    let mut converted = Vec::new();
    for set in records {
        if !options.is_set_included(&set.name) {
            log::debug!("Skipping excluded set '{}'", set.name);
            stats.sets.skipped += 1;
            continue;
        }
        if let Some(output) = convert_marker_set(set, options, stats)? {
            converted.push(output);
        }
    }

    stats.sets.output += converted.len();
    Ok(unflatten(converted))
}

/// Convert one set. Returns `None` when no marker survives filtering.
pub fn convert_marker_set(
    set: Named<InputSet>,
    options: &ConvertOptions,
    stats: &mut Stats,
) -> Result<Option<Named<OutputSet>>, ConvertError> {
    let Named { name, record: input } = set;
    let ctx = SetContext {
        set_name: &name,
        default_icon: input.deficon.as_deref(),
        options,
    };

    let mut markers = Vec::new();
    convert_category(input.markers, convert_point_marker, &ctx, stats, &mut markers)?;
    convert_category(input.lines, convert_line_marker, &ctx, stats, &mut markers)?;
    convert_category(input.areas, convert_area_marker, &ctx, stats, &mut markers)?;

    if markers.is_empty() {
        log::debug!("Set '{}' has no markers left, dropping it", name);
        return Ok(None);
    }

    log::debug!("Set '{}': {} markers", name, markers.len());
    let output = OutputSet {
        label: input.label,
        toggleable: true,
        default_hidden: input.hide,
        markers: unflatten(markers),
    };
    Ok(Some(Named::new(name, output)))
}

/// Filter one marker category by world and convert what is left.
/// An absent category contributes nothing, not even to the input count.
fn convert_category<T: WorldScoped>(
    category: Option<IndexMap<String, T>>,
    convert_marker: MarkerConverter<T>,
    ctx: &SetContext<'_>,
    stats: &mut Stats,
    output: &mut Vec<Named<OutputMarker>>,
) -> Result<(), ConvertError> {
    let Some(category) = category else {
        return Ok(());
    };

    let records = flatten(category);
    stats.markers.input += records.len();

    for marker in records {
        if !ctx.options.is_matching_world(marker.record.world()) {
            log::debug!(
                "Skipping marker '{}' of set '{}' from world {:?}",
                marker.name,
                ctx.set_name,
                marker.record.world()
            );
            stats.markers.skipped += 1;
            continue;
        }
        if let Some(converted) = convert_marker(marker, ctx, stats)? {
            stats.markers.output += 1;
            output.push(converted);
        }
    }
    Ok(())
}

/// Label shared by every marker kind, optionally suffixed with the marker name
pub fn marker_label(name: &str, label: Option<String>, options: &ConvertOptions) -> Option<String> {
    if !options.append_marker_name {
        return label;
    }
    match label {
        Some(label) => Some(format!("{} ({})", label, name)),
        None => Some(name.to_string()),
    }
}

/// Build the common marker shell around a kind-specific body
pub fn output_marker(
    name: &str,
    kind: MarkerKind,
    label: Option<String>,
    body: MarkerBody,
    options: &ConvertOptions,
) -> OutputMarker {
    OutputMarker {
        kind,
        label: marker_label(name, label, options),
        body,
    }
}

/// Marker icon unless missing or `default`, else the set's icon
fn resolve_icon<'a>(icon: Option<&'a str>, default_icon: Option<&'a str>) -> Option<&'a str> {
    [icon, default_icon]
        .into_iter()
        .flatten()
        .find(|name| *name != DEFAULT_ICON_SENTINEL)
}

fn exceeds_distance(position: &Point, threshold: f64) -> bool {
    [Some(position.x), position.y, Some(position.z)]
        .into_iter()
        .flatten()
        .any(|axis| axis.value().abs() > threshold)
}

pub fn convert_point_marker(
    marker: Named<InputPoint>,
    ctx: &SetContext<'_>,
    stats: &mut Stats,
) -> Result<Option<Named<OutputMarker>>, ConvertError> {
    let Named { name, record: point } = marker;
    let position = Point::new(point.x, point.y, point.z);

    if let Some(threshold) = ctx.options.distance_threshold()
        && exceeds_distance(&position, threshold)
    {
        stats.warn(format!(
            "marker '{}' in set '{}' is more than {} blocks from the origin: x={}, y={}, z={}",
            name, ctx.set_name, threshold, point.x, point.y, point.z
        ));
    }

    let icon_name = resolve_icon(point.icon.as_deref(), ctx.default_icon);
    let body = PoiBody {
        position,
        icon: icon_name.map(|icon| ctx.options.convert_icon(icon)),
        anchor: icon_name.and_then(|icon| ctx.options.icon_anchor(icon)),
    };

    let output = output_marker(
        &name,
        MarkerKind::Poi,
        point.label,
        MarkerBody::Poi(body),
        ctx.options,
    );
    Ok(Some(Named::new(name, output)))
}

/// Styling present in the source is converted, absent styling stays absent
fn convert_style(style: &InputStyle) -> Style {
    Style {
        line_width: style.stroke_weight,
        line_color: style
            .stroke_color
            .map(|color| convert_scalar_color(color, style.opacity)),
        fill_color: style
            .fill_color
            .map(|color| convert_scalar_color(color, style.fill_opacity)),
    }
}

fn geometry_error(ctx: &SetContext<'_>, name: &str, reason: String) -> ConvertError {
    ConvertError::Geometry {
        marker: format!("{}/{}", ctx.set_name, name),
        reason,
    }
}

pub fn convert_line_marker(
    marker: Named<InputLine>,
    ctx: &SetContext<'_>,
    stats: &mut Stats,
) -> Result<Option<Named<OutputMarker>>, ConvertError> {
    let Named { name, record: line } = marker;

    let vertices = zip_coordinates(&line.x, Some(&line.y), &line.z)
        .map_err(|reason| geometry_error(ctx, &name, reason))?;
    let Some(&position) = vertices.first() else {
        stats.error(format!(
            "line marker '{}' in set '{}' has no vertices and was dropped",
            name, ctx.set_name
        ));
        return Ok(None);
    };

    let body = LineBody {
        style: convert_style(&line.style),
        line: vertices,
        position,
    };
    let output = output_marker(
        &name,
        MarkerKind::Line,
        line.label,
        MarkerBody::Line(body),
        ctx.options,
    );
    Ok(Some(Named::new(name, output)))
}

pub fn convert_area_marker(
    marker: Named<InputArea>,
    ctx: &SetContext<'_>,
    stats: &mut Stats,
) -> Result<Option<Named<OutputMarker>>, ConvertError> {
    let Named { name, record: area } = marker;

    let outline = zip_coordinates(&area.x, None, &area.z)
        .map_err(|reason| geometry_error(ctx, &name, reason))?;
    let shape = expand_rectangle(outline);
    let Some(&position) = shape.first() else {
        stats.error(format!(
            "area marker '{}' in set '{}' has no outline and was dropped",
            name, ctx.set_name
        ));
        return Ok(None);
    };

    let elevation = Elevation::from_bounds(area.ytop, area.ybottom);
    let body = AreaBody {
        detail: None,
        style: convert_style(&area.style),
        shape,
        position,
        elevation,
    };

    let mut output = output_marker(
        &name,
        elevation.kind(),
        area.label,
        MarkerBody::Area(body),
        ctx.options,
    );
    // Dynmap has a single text field feeding both label and detail
    if let MarkerBody::Area(body) = &mut output.body {
        body.detail = output.label.clone();
    }
    Ok(Some(Named::new(name, output)))
}
