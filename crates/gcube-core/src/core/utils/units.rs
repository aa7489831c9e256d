//! Length unit conversions between atomic units and Ångström.

use nalgebra::{Point3, Vector3};

/// Length of one Bohr radius in Ångström (CODATA 2010).
pub const BOHR_TO_ANGSTROM: f64 = 0.52917721092;

/// Number of Bohr radii in one Ångström.
pub const ANGSTROM_TO_BOHR: f64 = 1.0 / BOHR_TO_ANGSTROM;

#[inline]
pub fn bohr_to_angstrom(value: f64) -> f64 {
    value * BOHR_TO_ANGSTROM
}

#[inline]
pub fn angstrom_to_bohr(value: f64) -> f64 {
    value * ANGSTROM_TO_BOHR
}

#[inline]
pub fn point_bohr_to_angstrom(point: &Point3<f64>) -> Point3<f64> {
    point * BOHR_TO_ANGSTROM
}

#[inline]
pub fn point_angstrom_to_bohr(point: &Point3<f64>) -> Point3<f64> {
    point * ANGSTROM_TO_BOHR
}

#[inline]
pub fn vector_bohr_to_angstrom(vector: &Vector3<f64>) -> Vector3<f64> {
    vector * BOHR_TO_ANGSTROM
}

#[inline]
pub fn vector_angstrom_to_bohr(vector: &Vector3<f64>) -> Vector3<f64> {
    vector * ANGSTROM_TO_BOHR
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn constants_are_reciprocal() {
        assert!((BOHR_TO_ANGSTROM * ANGSTROM_TO_BOHR - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn conversion_is_its_own_inverse() {
        for &x in &[0.0, 1.0, -1.0, 0.283459, 12.5, -7.25e3, 1e-9, 6.02e23] {
            let back = bohr_to_angstrom(angstrom_to_bohr(x));
            assert!(
                (back - x).abs() <= TOLERANCE * x.abs().max(1.0),
                "{} became {}",
                x,
                back
            );
            let forth = angstrom_to_bohr(bohr_to_angstrom(x));
            assert!((forth - x).abs() <= TOLERANCE * x.abs().max(1.0));
        }
    }

    #[test]
    fn one_angstrom_is_about_1_889726_bohr() {
        assert_eq!(format!("{:.6}", angstrom_to_bohr(1.0)), "1.889726");
    }

    #[test]
    fn point_and_vector_helpers_scale_every_component() {
        let p = Point3::new(1.0, -2.0, 3.0);
        let converted = point_bohr_to_angstrom(&p);
        assert!((converted.x - BOHR_TO_ANGSTROM).abs() < TOLERANCE);
        assert!((converted.y + 2.0 * BOHR_TO_ANGSTROM).abs() < TOLERANCE);
        assert!((point_angstrom_to_bohr(&converted) - p).norm() < TOLERANCE);

        let v = Vector3::new(0.5, 0.25, 0.125);
        assert!((vector_bohr_to_angstrom(&vector_angstrom_to_bohr(&v)) - v).norm() < TOLERANCE);
    }
}
