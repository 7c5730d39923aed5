//! IAPWS-IF97 basic equations for regions 1, 2, and 4.
//!
//! Pressures are in MPa, temperatures in K, specific enthalpies in kJ/kg, and
//! specific volumes in m³/kg, matching the units of the IAPWS release.

/// Specific gas constant of water, kJ/kg·K.
const R: f64 = 0.461_526;

/// Upper temperature of region 1, K.
pub(super) const T_REGION1_MAX: f64 = 623.15;

/// Upper temperature of region 2, K.
pub(super) const T_REGION2_MAX: f64 = 1073.15;

/// Triple-point temperature, K.
pub(super) const T_TRIPLE: f64 = 273.16;

/// Upper pressure limit of regions 1 and 2, MPa.
pub(super) const P_MAX: f64 = 100.0;

/// Boundary between regions 2 and 3, `(n1, n2, n3)`.
const B23: [f64; 3] = [348.051_856_289_69, -1.167_185_987_997_5, 1.019_297_003_932_6e-3];

/// Region 1 coefficients `(I, J, n)`.
const REGION1: [(i32, i32, f64); 34] = [
    (0, -2, 0.14632971213167),
    (0, -1, -0.84548187169114),
    (0, 0, -3.756360367204),
    (0, 1, 3.3855169168385),
    (0, 2, -0.95791963387872),
    (0, 3, 0.15772038513228),
    (0, 4, -0.016616417199501),
    (0, 5, 0.00081214629983568),
    (1, -9, 0.00028319080123804),
    (1, -7, -0.00060706301565874),
    (1, -1, -0.018990068218419),
    (1, 0, -0.032529748770505),
    (1, 1, -0.021841717175414),
    (1, 3, -5.283835796993e-05),
    (2, -3, -0.00047184321073267),
    (2, 0, -0.00030001780793026),
    (2, 1, 4.7661393906987e-05),
    (2, 3, -4.4141845330846e-06),
    (2, 17, -7.2694996297594e-16),
    (3, -4, -3.1679644845054e-05),
    (3, 0, -2.8270797985312e-06),
    (3, 6, -8.5205128120103e-10),
    (4, -5, -2.2425281908e-06),
    (4, -2, -6.5171222895601e-07),
    (4, 10, -1.4341729937924e-13),
    (5, -8, -4.0516996860117e-07),
    (8, -11, -1.2734301741641e-09),
    (8, -6, -1.7424871230634e-10),
    (21, -29, -6.8762131295531e-19),
    (23, -31, 1.4478307828521e-20),
    (29, -38, 2.6335781662795e-23),
    (30, -39, -1.1947622640071e-23),
    (31, -40, 1.8228094581404e-24),
    (32, -41, -9.3537087292458e-26),
];

/// Region 2 ideal-gas coefficients `(J, n)`.
const REGION2_IDEAL: [(i32, f64); 9] = [
    (0, -9.6927686500217),
    (1, 10.086655968018),
    (-5, -0.005608791128302),
    (-4, 0.071452738081455),
    (-3, -0.40710498223928),
    (-2, 1.4240819171444),
    (-1, -4.383951131945),
    (2, -0.28408632460772),
    (3, 0.021268463753307),
];

/// Region 2 residual coefficients `(I, J, n)`.
const REGION2_RESIDUAL: [(i32, i32, f64); 43] = [
    (1, 0, -0.0017731742473213),
    (1, 1, -0.017834862292358),
    (1, 2, -0.045996013696365),
    (1, 3, -0.057581259083432),
    (1, 6, -0.05032527872793),
    (2, 1, -3.3032641670203e-05),
    (2, 2, -0.00018948987516315),
    (2, 4, -0.0039392777243355),
    (2, 7, -0.043797295650573),
    (2, 36, -2.6674547914087e-05),
    (3, 0, 2.0481737692309e-08),
    (3, 1, 4.3870667284435e-07),
    (3, 3, -3.227767723857e-05),
    (3, 6, -0.0015033924542148),
    (3, 35, -0.040668253562649),
    (4, 1, -7.8847309559367e-10),
    (4, 2, 1.2790717852285e-08),
    (4, 3, 4.8225372718507e-07),
    (5, 7, 2.2922076337661e-06),
    (6, 3, -1.6714766451061e-11),
    (6, 16, -0.0021171472321355),
    (6, 35, -23.895741934104),
    (7, 0, -5.905956432427e-18),
    (7, 11, -1.2621808899101e-06),
    (7, 25, -0.038946842435739),
    (8, 8, 1.1256211360459e-11),
    (8, 36, -8.2311340897998),
    (9, 13, 1.9809712802088e-08),
    (10, 4, 1.0406965210174e-19),
    (10, 10, -1.0234747095929e-13),
    (10, 14, -1.0018179379511e-09),
    (16, 29, -8.0882908646985e-11),
    (16, 50, 0.10693031879409),
    (18, 57, -0.33662250574171),
    (20, 20, 8.9185845355421e-25),
    (20, 35, 3.0629316876232e-13),
    (20, 48, -4.2002467698208e-06),
    (21, 21, -5.9056029685639e-26),
    (22, 53, 3.7826947613457e-06),
    (23, 39, -1.2768608934681e-15),
    (24, 26, 7.3087610595061e-29),
    (24, 40, 5.5414715350778e-17),
    (24, 58, -9.436970724121e-07),
];

/// Saturation-line coefficients `n1` to `n10`.
const REGION4: [f64; 10] = [
    1167.0521452767,
    -724213.16703206,
    -17.073846940092,
    12020.82470247,
    -3232555.0322333,
    14.91510861353,
    -4823.2657361591,
    405113.40542057,
    -0.23855557567849,
    650.17534844798,
];

/// Specific enthalpy and volume of compressed liquid.
pub(super) fn region1(p: f64, t: f64) -> (f64, f64) {
    let pi = p / 16.53;
    let tau = 1386.0 / t;
    let (gamma_tau, gamma_pi) = REGION1.iter().fold((0.0, 0.0), |(g_tau, g_pi), &(i, j, n)| {
        let a = 7.1 - pi;
        let b = tau - 1.222;
        (
            g_tau + n * a.powi(i) * f64::from(j) * b.powi(j - 1),
            g_pi - n * f64::from(i) * a.powi(i - 1) * b.powi(j),
        )
    });
    let h = R * t * tau * gamma_tau;
    let v = R * t * pi * gamma_pi / p / 1000.0;
    (h, v)
}

/// Specific enthalpy and volume of superheated (or metastable) vapor.
pub(super) fn region2(p: f64, t: f64) -> (f64, f64) {
    let pi = p;
    let tau = 540.0 / t;
    let ideal_tau: f64 = REGION2_IDEAL
        .iter()
        .map(|&(j, n)| n * f64::from(j) * tau.powi(j - 1))
        .sum();
    let (residual_tau, residual_pi) =
        REGION2_RESIDUAL
            .iter()
            .fold((0.0, 0.0), |(g_tau, g_pi), &(i, j, n)| {
                let b = tau - 0.5;
                (
                    g_tau + n * pi.powi(i) * f64::from(j) * b.powi(j - 1),
                    g_pi + n * f64::from(i) * pi.powi(i - 1) * b.powi(j),
                )
            });
    let h = R * t * tau * (ideal_tau + residual_tau);
    let v = R * t * pi * (1.0 / pi + residual_pi) / p / 1000.0;
    (h, v)
}

/// Saturation pressure at temperature `t`.
pub(super) fn saturation_pressure(t: f64) -> f64 {
    let n = REGION4;
    let theta = t + n[8] / (t - n[9]);
    let a = theta * theta + n[0] * theta + n[1];
    let b = n[2] * theta * theta + n[3] * theta + n[4];
    let c = n[5] * theta * theta + n[6] * theta + n[7];
    (2.0 * c / (-b + (b * b - 4.0 * a * c).sqrt())).powi(4)
}

/// Saturation temperature at pressure `p`.
pub(super) fn saturation_temperature(p: f64) -> f64 {
    let n = REGION4;
    let beta = p.powf(0.25);
    let e = beta * beta + n[2] * beta + n[5];
    let f = n[0] * beta * beta + n[3] * beta + n[6];
    let g = n[1] * beta * beta + n[4] * beta + n[7];
    let d = 2.0 * g / (-f - (f * f - 4.0 * e * g).sqrt());
    (n[9] + d - ((n[9] + d).powi(2) - 4.0 * (n[8] + n[9] * d)).sqrt()) / 2.0
}

/// Pressure on the region 2/3 boundary at temperature `t`.
pub(super) fn boundary_23_pressure(t: f64) -> f64 {
    let [n1, n2, n3] = B23;
    n1 + n2 * t + n3 * t * t
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn region1_verification_values() {
        assert_relative_eq!(region1(3.0, 300.0).0, 115.331_273, max_relative = 1e-7);
        assert_relative_eq!(region1(80.0, 300.0).0, 184.142_828, max_relative = 1e-7);
        assert_relative_eq!(region1(3.0, 500.0).0, 975.542_239, max_relative = 1e-7);
        assert_relative_eq!(region1(3.0, 300.0).1, 0.100_215_168e-2, max_relative = 1e-7);
    }

    #[test]
    fn region2_verification_values() {
        assert_relative_eq!(region2(0.0035, 300.0).0, 2549.911_45, max_relative = 1e-7);
        assert_relative_eq!(region2(0.0035, 700.0).0, 3335.683_75, max_relative = 1e-7);
        assert_relative_eq!(region2(30.0, 700.0).0, 2631.494_74, max_relative = 1e-7);
        assert_relative_eq!(region2(0.0035, 300.0).1, 39.491_386_6, max_relative = 1e-7);
    }

    #[test]
    fn region4_verification_values() {
        assert_relative_eq!(saturation_pressure(300.0), 0.353_658_941e-2, max_relative = 1e-7);
        assert_relative_eq!(saturation_pressure(500.0), 0.263_889_776e1, max_relative = 1e-7);
        assert_relative_eq!(saturation_pressure(600.0), 0.123_443_146e2, max_relative = 1e-7);
        assert_relative_eq!(saturation_temperature(0.1), 372.755_919, max_relative = 1e-7);
        assert_relative_eq!(saturation_temperature(1.0), 453.035_632, max_relative = 1e-7);
        assert_relative_eq!(saturation_temperature(10.0), 584.149_488, max_relative = 1e-7);
    }

    #[test]
    fn boundary_23_verification_value() {
        assert_relative_eq!(boundary_23_pressure(623.15), 16.529_164_25, max_relative = 1e-7);
    }
}
