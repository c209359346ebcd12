use glam::Vec3;

/// Divisions used for the arc-length lookup table
const ARC_LENGTH_DIVISIONS: usize = 200;

/// Parametrization of the Catmull-Rom spline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveType {
    /// Knot spacing by sqrt of chord length. Never cusps or self-intersects
    /// within a segment, which keeps rails smooth at the L-turn.
    Centripetal,
    /// Knot spacing by chord length
    Chordal,
    /// Uniform spacing with the given tension
    Uniform { tension: f32 },
}

/// Interpolating spline through an ordered list of control points.
///
/// `point(t)` spreads `t` evenly across segments; `point_at(u)` spreads `u`
/// evenly across arc length, which is what tube extrusion samples.
#[derive(Debug, Clone)]
pub struct CatmullRomCurve {
    points: Vec<Vec3>,
    curve_type: CurveType,
    lengths: Vec<f32>,
}

impl CatmullRomCurve {
    /// Centripetal curve through `points`; needs at least two points
    pub fn new(points: Vec<Vec3>) -> Option<Self> {
        Self::with_type(points, CurveType::Centripetal)
    }

    pub fn with_type(points: Vec<Vec3>, curve_type: CurveType) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let mut curve = Self {
            points,
            curve_type,
            lengths: Vec::new(),
        };
        curve.lengths = curve.compute_lengths(ARC_LENGTH_DIVISIONS);
        Some(curve)
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn curve_type(&self) -> CurveType {
        self.curve_type
    }

    /// Approximate total arc length
    pub fn length(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at segment parameter `t` in `[0, 1]`
    pub fn point(&self, t: f32) -> Vec3 {
        let points = &self.points;
        let l = points.len();

        let p = (l - 1) as f32 * t.clamp(0.0, 1.0);
        let mut int_point = p.floor() as usize;
        let mut weight = p - int_point as f32;

        if int_point >= l - 1 {
            int_point = l - 2;
            weight = 1.0;
        }

        // Mirror the end segments to get phantom neighbours
        let p0 = if int_point > 0 {
            points[int_point - 1]
        } else {
            points[0] * 2.0 - points[1]
        };
        let p1 = points[int_point];
        let p2 = points[int_point + 1];
        let p3 = if int_point + 2 < l {
            points[int_point + 2]
        } else {
            points[l - 1] * 2.0 - points[l - 2]
        };

        match self.curve_type {
            CurveType::Centripetal => nonuniform_segment(p0, p1, p2, p3, 0.25, weight),
            CurveType::Chordal => nonuniform_segment(p0, p1, p2, p3, 0.5, weight),
            CurveType::Uniform { tension } => {
                let t1 = (p2 - p0) * tension;
                let t2 = (p3 - p1) * tension;
                cubic(p1, p2, t1, t2, weight)
            }
        }
    }

    /// Point at arc-length fraction `u` in `[0, 1]`
    pub fn point_at(&self, u: f32) -> Vec3 {
        self.point(self.u_to_t(u))
    }

    /// Unit tangent at segment parameter `t`
    pub fn tangent(&self, t: f32) -> Vec3 {
        let delta = 0.0001;
        let t1 = (t - delta).max(0.0);
        let t2 = (t + delta).min(1.0);
        (self.point(t2) - self.point(t1)).normalize_or_zero()
    }

    /// Unit tangent at arc-length fraction `u`
    pub fn tangent_at(&self, u: f32) -> Vec3 {
        self.tangent(self.u_to_t(u))
    }

    /// Evenly spaced (by arc length) samples, `divisions + 1` points
    pub fn spaced_points(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at(i as f32 / divisions as f32))
            .collect()
    }

    /// Maps an arc-length fraction onto the segment parameter
    pub fn u_to_t(&self, u: f32) -> f32 {
        let lengths = &self.lengths;
        let count = lengths.len();
        let total = self.length();
        if count < 2 || total <= f32::EPSILON {
            return u.clamp(0.0, 1.0);
        }

        let target = u.clamp(0.0, 1.0) * total;

        // Last cumulative length that is <= target
        let i = lengths.partition_point(|&len| len <= target).saturating_sub(1);
        if i >= count - 1 {
            return 1.0;
        }

        let before = lengths[i];
        let after = lengths[i + 1];
        let segment = after - before;
        let fraction = if segment > 0.0 { (target - before) / segment } else { 0.0 };

        (i as f32 + fraction) / (count - 1) as f32
    }

    fn compute_lengths(&self, divisions: usize) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut last = self.point(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);
        for d in 1..=divisions {
            let current = self.point(d as f32 / divisions as f32);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }
        lengths
    }
}

/// Hermite cubic from `x1` to `x2` with end tangents `t1`, `t2`
fn cubic(x1: Vec3, x2: Vec3, t1: Vec3, t2: Vec3, t: f32) -> Vec3 {
    let c0 = x1;
    let c1 = t1;
    let c2 = -3.0 * x1 + 3.0 * x2 - 2.0 * t1 - t2;
    let c3 = 2.0 * x1 - 2.0 * x2 + t1 + t2;
    let t2_ = t * t;
    c0 + c1 * t + c2 * t2_ + c3 * t2_ * t
}

/// Non-uniform Catmull-Rom segment. `pow` is applied to squared chord lengths
/// (0.25 centripetal, 0.5 chordal).
fn nonuniform_segment(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, pow: f32, t: f32) -> Vec3 {
    let mut dt0 = p0.distance_squared(p1).powf(pow);
    let mut dt1 = p1.distance_squared(p2).powf(pow);
    let mut dt2 = p2.distance_squared(p3).powf(pow);

    // Repeated points
    if dt1 < 1e-4 {
        dt1 = 1.0;
    }
    if dt0 < 1e-4 {
        dt0 = dt1;
    }
    if dt2 < 1e-4 {
        dt2 = dt1;
    }

    let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
    let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

    cubic(p1, p2, t1, t2, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_two_points() {
        assert!(CatmullRomCurve::new(vec![]).is_none());
        assert!(CatmullRomCurve::new(vec![Vec3::ZERO]).is_none());
        assert!(CatmullRomCurve::new(vec![Vec3::ZERO, Vec3::X]).is_some());
    }

    #[test]
    fn test_two_point_curve_is_straight() {
        let curve = CatmullRomCurve::new(vec![Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0)]).unwrap();
        let mid = curve.point(0.5);
        assert!((mid - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-4);
        assert!((curve.length() - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_u_to_t_endpoints() {
        let curve = CatmullRomCurve::new(vec![
            Vec3::ZERO,
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(5.0, 1.0, 0.0),
        ])
        .unwrap();
        assert!(curve.u_to_t(0.0).abs() < 1e-6);
        assert!((curve.u_to_t(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_uniform_tension_half_hits_points() {
        let points = vec![Vec3::ZERO, Vec3::new(1.0, 2.0, 0.0), Vec3::new(3.0, 2.0, 1.0)];
        let curve =
            CatmullRomCurve::with_type(points.clone(), CurveType::Uniform { tension: 0.5 }).unwrap();
        assert!((curve.point(0.5) - points[1]).length() < 1e-5);
    }
}
