//! Real roots of low-degree polynomials.
//!
//! Quadratics are solved in closed form. Cubics and quartics are solved by
//! bracketing: the roots of the derivative split the real line into monotone
//! pieces, each holding at most one root, which is then found by bisection.
//! This never loses a root to cancellation the way Cardano/Ferrari can for
//! nearly-tangent rays, at the price of a few dozen polynomial evaluations.

/// Leading coefficients smaller than this are treated as zero.
const DEGENERATE: f64 = 1e-12;

/// Bisection steps per bracket; enough to exhaust f64 precision.
const MAX_BISECTIONS: usize = 128;

/// Solve `a*x^2 + b*x + c = 0`.
///
/// Returns the real roots in ascending order. A double root is reported
/// twice so tangent rays still produce an entry/exit pair.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Vec<f64> {
    if a.abs() < DEGENERATE {
        // Linear
        if b.abs() > DEGENERATE {
            return vec![-c / b];
        }
        return Vec::new();
    }

    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return Vec::new();
    }

    let sqrt_disc = disc.sqrt();
    let t0 = (-b - sqrt_disc) / (2.0 * a);
    let t1 = (-b + sqrt_disc) / (2.0 * a);
    if t0 <= t1 {
        vec![t0, t1]
    } else {
        vec![t1, t0]
    }
}

/// Solve `a*x^3 + b*x^2 + c*x + d = 0`.
///
/// Returns the real roots in ascending order. A double root is reported
/// twice.
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64) -> Vec<f64> {
    if a.abs() < DEGENERATE {
        // Degenerate to quadratic
        return solve_quadratic(b, c, d);
    }

    let coeffs = [1.0, b / a, c / a, d / a];
    let critical = solve_quadratic(3.0, 2.0 * coeffs[1], coeffs[2]);
    bracket_roots(&coeffs, &critical)
}

/// Solve `a*x^4 + b*x^3 + c*x^2 + d*x + e = 0`.
///
/// Returns the real roots in ascending order. Tangent (double) roots are
/// reported twice, like [`solve_quadratic`], so a grazing ray still enters
/// and leaves.
pub fn solve_quartic(a: f64, b: f64, c: f64, d: f64, e: f64) -> Vec<f64> {
    if a.abs() < DEGENERATE {
        // Degenerate to cubic
        return solve_cubic(b, c, d, e);
    }

    let coeffs = [1.0, b / a, c / a, d / a, e / a];
    let critical = solve_cubic(4.0, 3.0 * coeffs[1], 2.0 * coeffs[2], coeffs[3]);
    bracket_roots(&coeffs, &critical)
}

/// Evaluate a polynomial given highest-degree coefficient first (Horner).
#[inline]
fn eval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, &k| acc * x + k)
}

/// Find every real root of a monic polynomial whose derivative vanishes
/// at `critical` (ascending).
///
/// A root sitting on a critical point is a repeated root. It is reported
/// twice when the polynomial keeps its sign across it (a tangency) and once
/// when the sign flips, so the number of roots always has the parity of the
/// number of sign changes along the real line.
fn bracket_roots(coeffs: &[f64], critical: &[f64]) -> Vec<f64> {
    // Cauchy bound: every root lies within (-bound, bound)
    let bound = 1.0 + coeffs[1..].iter().fold(0.0_f64, |m, k| m.max(k.abs()));
    let scale = 1.0 + coeffs.iter().fold(0.0_f64, |m, k| m.max(k.abs()));
    let touching = 1e-10 * scale;

    let mut fences = Vec::with_capacity(critical.len() + 2);
    fences.push(-bound);
    fences.extend(critical.iter().copied().filter(|c| c.abs() < bound));
    fences.push(bound);
    fences.dedup();

    let values: Vec<f64> = fences.iter().map(|&x| eval(coeffs, x)).collect();
    let last = fences.len() - 1;
    let on_fence = |i: usize| i > 0 && i < last && values[i].abs() <= touching;

    let mut roots = Vec::new();
    for i in 0..last {
        if on_fence(i) {
            if values[i - 1].signum() == values[i + 1].signum() {
                roots.push(fences[i]);
            }
            roots.push(fences[i]);
        } else if !on_fence(i + 1) && values[i].signum() != values[i + 1].signum() {
            // Monotone between fences, so at most one crossing
            roots.push(bisect(coeffs, fences[i], fences[i + 1], values[i]));
        }
    }

    roots.sort_by(f64::total_cmp);
    roots
}

/// Bisect a sign-changing bracket down to the root.
fn bisect(coeffs: &[f64], mut lo: f64, mut hi: f64, mut f_lo: f64) -> f64 {
    for _ in 0..MAX_BISECTIONS {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            break;
        }
        let f_mid = eval(coeffs, mid);
        if f_mid == 0.0 {
            return mid;
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}
