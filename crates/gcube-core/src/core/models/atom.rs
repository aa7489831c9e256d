use super::element;
use nalgebra::Point3;

/// An atom of a molecular system.
///
/// Cube files carry no atom names, residues or force field types; an atom is fully described
/// by its atomic number and position.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The atomic number (0 for ghost atoms and dummy centres).
    pub atomic_number: u8,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom` placed at the origin.
    ///
    /// # Arguments
    ///
    /// * `atomic_number` - The atomic number of the element.
    pub fn new(atomic_number: u8) -> Self {
        Self {
            atomic_number,
            position: Point3::origin(),
        }
    }

    pub fn symbol(&self) -> &'static str {
        element::symbol(self.atomic_number)
    }

    pub fn covalent_radius(&self) -> f64 {
        element::covalent_radius(self.atomic_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let atom = Atom::new(8);
        assert_eq!(atom.atomic_number, 8);
        assert_eq!(atom.position, Point3::origin());
    }

    #[test]
    fn element_lookups_use_atomic_number() {
        let atom = Atom::new(6);
        assert_eq!(atom.symbol(), "C");
        assert_eq!(atom.covalent_radius(), 0.76);
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let mut atom1 = Atom::new(7);
        atom1.position = Point3::new(1.0, 2.0, 3.0);
        let atom2 = atom1.clone();
        assert_eq!(atom1, atom2);
    }
}
