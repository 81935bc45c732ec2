use super::{Point2, Vector2};

/// Parameters `(t, u)` where `p1 + t * d1` meets `p2 + u * d2`.
///
/// `None` when the directions are parallel within `eps`.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
    eps: f64,
) -> Option<(f64, f64)> {
    let denom = d1.perp(d2);
    if denom.abs() < eps {
        return None;
    }
    let gap = p2 - p1;
    Some((gap.perp(d2) / denom, gap.perp(d1) / denom))
}

/// Crossing of segments `a0 → a1` and `b0 → b1`.
///
/// Returns the crossing point with both segment parameters clamped to
/// `[0, 1]`. Parallel segments yield `None`; see [`segments_touch_2d`] for
/// collinear overlap.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    eps: f64,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let (t, u) = line_line_intersect_2d(a0, &da, b0, &(b1 - b0), eps)?;
    let on_segment = |s: f64| (-eps..=1.0 + eps).contains(&s);
    if !(on_segment(t) && on_segment(u)) {
        return None;
    }
    let t = t.clamp(0.0, 1.0);
    Some((point_at(a0, &da, t), t, u.clamp(0.0, 1.0)))
}

/// Whether two closed segments share a point, collinear overlap included.
#[must_use]
pub fn segments_touch_2d(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2, eps: f64) -> bool {
    let da = a1 - a0;
    let db = b1 - b0;
    let scale = da.norm().max(1.0) * db.norm().max(1.0);
    if da.perp(&db).abs() >= eps * scale {
        return segment_segment_intersect_2d(a0, a1, b0, b1, eps).is_some();
    }

    let len = da.norm();
    if len < eps {
        return false;
    }
    let axis = da / len;
    if (b0 - a0).perp(&axis).abs() > eps {
        return false;
    }
    // Collinear: compare the projections onto `a`.
    let s0 = (b0 - a0).dot(&axis) / len;
    let s1 = (b1 - a0).dot(&axis) / len;
    s0.max(s1) >= -eps && s0.min(s1) <= 1.0 + eps
}

/// `origin + dir * t`.
#[must_use]
pub fn point_at(origin: &Point2, dir: &Vector2, t: f64) -> Point2 {
    origin + dir * t
}
