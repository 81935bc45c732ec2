use super::Vector2;
use crate::error::GeometryError;

/// Velocity of a wavefront vertex joining two unit-speed edges.
///
/// `n_in` and `n_out` are the unit normals (in the direction of travel) of
/// the incoming and outgoing edge. The returned vector `v` satisfies
/// `v · n_in = v · n_out = 1`, so the vertex stays on both offset lines;
/// its magnitude is `1 / cos(θ / 2)` for the angle `θ` between the normals.
/// Collinear edges yield the shared normal.
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` when the normals are antiparallel
/// within `eps`: the two offset lines are parallel and the vertex has no
/// finite velocity.
pub fn vertex_velocity(
    n_in: &Vector2,
    n_out: &Vector2,
    eps: f64,
) -> Result<Vector2, GeometryError> {
    let denom = 1.0 + n_in.dot(n_out);
    if denom <= eps {
        return Err(GeometryError::Degenerate(format!(
            "antiparallel edges with normals ({:.6}, {:.6}) and ({:.6}, {:.6})",
            n_in.x, n_in.y, n_out.x, n_out.y
        )));
    }
    Ok((n_in + n_out) / denom)
}

/// Returns `true` if the boundary turns away from the travel side at a vertex.
///
/// The wavefront travels to the left of each directed edge; a right turn
/// from `d_in` to `d_out` opens an angle wider than 180° on that side, so the
/// vertex can run into an opposite edge.
#[must_use]
pub fn is_reflex(d_in: &Vector2, d_out: &Vector2, eps: f64) -> bool {
    d_in.perp(d_out) < -eps
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::left_normal;
    use crate::math::TOLERANCE;
    use approx::assert_relative_eq;

    #[test]
    fn right_angle_corner() {
        // Bottom edge then right edge of a CCW square.
        let n_in = left_normal(&Vector2::new(1.0, 0.0));
        let n_out = left_normal(&Vector2::new(0.0, 1.0));
        let v = vertex_velocity(&n_in, &n_out, TOLERANCE).unwrap();
        assert_relative_eq!(v.x, -1.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn collinear_edges_use_shared_normal() {
        let n = left_normal(&Vector2::new(1.0, 0.0));
        let v = vertex_velocity(&n, &n, TOLERANCE).unwrap();
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn velocity_keeps_unit_edge_speed() {
        let d_in = Vector2::new(1.0, 0.2).normalize();
        let d_out = Vector2::new(-0.3, 1.0).normalize();
        let (n_in, n_out) = (left_normal(&d_in), left_normal(&d_out));
        let v = vertex_velocity(&n_in, &n_out, TOLERANCE).unwrap();
        assert_relative_eq!(v.dot(&n_in), 1.0, epsilon = 1e-12);
        assert_relative_eq!(v.dot(&n_out), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn antiparallel_edges_are_degenerate() {
        let n_in = left_normal(&Vector2::new(1.0, 0.0));
        let n_out = left_normal(&Vector2::new(-1.0, 0.0));
        assert!(vertex_velocity(&n_in, &n_out, TOLERANCE).is_err());
    }

    #[test]
    fn reflex_classification() {
        let east = Vector2::new(1.0, 0.0);
        let north = Vector2::new(0.0, 1.0);
        let south = Vector2::new(0.0, -1.0);
        assert!(!is_reflex(&east, &north, TOLERANCE));
        assert!(is_reflex(&east, &south, TOLERANCE));
        assert!(!is_reflex(&east, &east, TOLERANCE));
    }
}
