use crate::color::{hex_to_lab, Lab};
use crate::error::Result;

const POW25_7: f64 = 6_103_515_625.0; // 25^7

/// CIEDE2000 color difference between two Lab colors, with kL = kC = kH = 1.
///
/// Every difference term enters either squared or as the product ΔC'·ΔH',
/// so swapping the arguments leaves the result unchanged.
pub fn ciede2000(lab1: Lab, lab2: Lab) -> f64 {
    let (l1, a1, b1) = (lab1.l, lab1.a, lab1.b);
    let (l2, a2, b2) = (lab2.l, lab2.a, lab2.b);

    let c1 = a1.hypot(b1);
    let c2 = a2.hypot(b2);
    let avg_c7 = (0.5 * (c1 + c2)).powi(7);
    let g = 0.5 * (1.0 - (avg_c7 / (avg_c7 + POW25_7)).sqrt());

    let a1p = (1.0 + g) * a1;
    let a2p = (1.0 + g) * a2;
    let c1p = a1p.hypot(b1);
    let c2p = a2p.hypot(b2);
    let h1p = hue_angle(b1, a1p);
    let h2p = hue_angle(b2, a2p);

    let delta_lp = l2 - l1;
    let delta_cp = c2p - c1p;

    let chroma_product = c1p * c2p;
    let delta_hp_angle = if chroma_product == 0.0 {
        0.0
    } else {
        let d = h2p - h1p;
        if d.abs() <= 180.0 {
            d
        } else if d > 180.0 {
            d - 360.0
        } else {
            d + 360.0
        }
    };
    let delta_hp = 2.0 * chroma_product.sqrt() * (delta_hp_angle.to_radians() / 2.0).sin();

    let avg_lp = 0.5 * (l1 + l2);
    let avg_cp = 0.5 * (c1p + c2p);
    let avg_hp = if chroma_product == 0.0 {
        h1p + h2p
    } else if (h1p - h2p).abs() <= 180.0 {
        0.5 * (h1p + h2p)
    } else if h1p + h2p < 360.0 {
        0.5 * (h1p + h2p + 360.0)
    } else {
        0.5 * (h1p + h2p - 360.0)
    };

    let t = 1.0 - 0.17 * (avg_hp - 30.0).to_radians().cos()
        + 0.24 * (2.0 * avg_hp).to_radians().cos()
        + 0.32 * (3.0 * avg_hp + 6.0).to_radians().cos()
        - 0.20 * (4.0 * avg_hp - 63.0).to_radians().cos();

    let delta_theta = 30.0 * (-((avg_hp - 275.0) / 25.0).powi(2)).exp();
    let avg_cp7 = avg_cp.powi(7);
    let r_c = 2.0 * (avg_cp7 / (avg_cp7 + POW25_7)).sqrt();
    let l_term = (avg_lp - 50.0).powi(2);
    let s_l = 1.0 + 0.015 * l_term / (20.0 + l_term).sqrt();
    let s_c = 1.0 + 0.045 * avg_cp;
    let s_h = 1.0 + 0.015 * avg_cp * t;
    let r_t = -(2.0 * delta_theta).to_radians().sin() * r_c;

    let dl = delta_lp / s_l;
    let dc = delta_cp / s_c;
    let dh = delta_hp / s_h;

    (dl * dl + dc * dc + dh * dh + r_t * dc * dh).max(0.0).sqrt()
}

/// Hue angle in degrees, normalized to [0, 360).
fn hue_angle(b: f64, a_prime: f64) -> f64 {
    if b == 0.0 && a_prime == 0.0 {
        0.0
    } else {
        b.atan2(a_prime).to_degrees().rem_euclid(360.0)
    }
}

/// Perceptual distance between two `#rrggbb` colors.
pub fn compare_colors(hex1: &str, hex2: &str) -> Result<f64> {
    Ok(ciede2000(hex_to_lab(hex1)?, hex_to_lab(hex2)?))
}
