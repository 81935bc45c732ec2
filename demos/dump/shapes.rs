use skelset::math::Point2;

/// Names accepted by [`by_name`].
pub const NAMES: [&str; 5] = ["square", "rectangle", "l_shape", "dumbbell", "notch"];

/// Returns the polygon registered under `name`.
pub fn by_name(name: &str) -> Option<Vec<Point2>> {
    let raw: &[(f64, f64)] = match name {
        "square" => &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
        "rectangle" => &[(0.0, 0.0), (10.0, 0.0), (10.0, 4.0), (0.0, 4.0)],
        "l_shape" => &[
            (0.0, 0.0),
            (6.0, 0.0),
            (6.0, 2.0),
            (2.0, 2.0),
            (2.0, 6.0),
            (0.0, 6.0),
        ],
        "dumbbell" => &[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 1.5),
            (6.0, 1.5),
            (6.0, 0.0),
            (10.0, 0.0),
            (10.0, 4.0),
            (6.0, 4.0),
            (6.0, 2.5),
            (4.0, 2.5),
            (4.0, 4.0),
            (0.0, 4.0),
        ],
        // A pentagon with a reflex vertex in its top side.
        "notch" => &[(0.0, 0.0), (10.0, 0.0), (10.0, 6.0), (5.0, 3.0), (0.0, 6.0)],
        _ => return None,
    };
    Some(raw.iter().map(|&(x, y)| Point2::new(x, y)).collect())
}
