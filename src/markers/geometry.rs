use super::types::{Point, Scalar};

/// Zip per-axis coordinate arrays into points.
///
/// `ys` is given for lines (3D vertices) and omitted for area outlines.
/// Arrays of different lengths are rejected with a description of the
/// mismatch.
pub fn zip_coordinates(
    xs: &[Scalar],
    ys: Option<&[Scalar]>,
    zs: &[Scalar],
) -> Result<Vec<Point>, String> {
    if xs.len() != zs.len() {
        return Err(format!(
            "{} x values but {} z values",
            xs.len(),
            zs.len()
        ));
    }
    if let Some(ys) = ys
        && ys.len() != xs.len()
    {
        return Err(format!(
            "{} x values but {} y values",
            xs.len(),
            ys.len()
        ));
    }

    let points = xs
        .iter()
        .zip(zs)
        .enumerate()
        .map(|(idx, (&x, &z))| Point {
            x,
            y: ys.map(|ys| ys[idx]),
            z,
        })
        .collect();

    Ok(points)
}

/// Expand a two-point outline (opposite corners) into the four rectangle
/// corners, starting at the first corner. Other outlines pass through.
pub fn expand_rectangle(outline: Vec<Point>) -> Vec<Point> {
    if outline.len() != 2 {
        return outline;
    }

    let (p1, p2) = (outline[0], outline[1]);
    vec![
        Point::flat(p1.x, p1.z),
        Point::flat(p2.x, p1.z),
        Point::flat(p2.x, p2.z),
        Point::flat(p1.x, p2.z),
    ]
}
