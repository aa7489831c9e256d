use super::atom::Atom;
use super::cube::Cube;
use super::ids::AtomId;
use super::topology::Bond;
use crate::core::utils::bonding::{self, BondPerception};
use slotmap::SlotMap;
use std::collections::HashMap;

/// Key of the free-text name entry in [`MolecularSystem::data`].
pub const NAME_KEY: &str = "name";

/// Represents a molecule together with the volumetric grids attached to it.
///
/// Atoms are stored in a slot map for stable IDs, while their insertion order is kept
/// separately so that positional access (`atom_at`) matches the order of the source file.
#[derive(Debug, Clone, Default)]
pub struct MolecularSystem {
    /// Free-form string properties, such as the display name.
    data: HashMap<String, String>,
    /// Primary storage for atoms using a slot map for efficient ID management.
    atoms: SlotMap<AtomId, Atom>,
    /// Atom IDs in insertion order.
    atom_order: Vec<AtomId>,
    /// List of all bonds in the system.
    bonds: Vec<Bond>,
    /// Attached grids in the order they were added.
    cubes: Vec<Cube>,
}

impl MolecularSystem {
    /// Creates a new, empty molecular system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a string property, replacing any previous value under the same key.
    pub fn set_data(&mut self, key: &str, value: impl Into<String>) {
        self.data.insert(key.to_string(), value.into());
    }

    /// Retrieves a string property.
    ///
    /// # Return
    ///
    /// Returns `Some(&str)` if a value is stored under `key`, otherwise `None`.
    pub fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// The display name of the system, empty when none has been set.
    pub fn name(&self) -> &str {
        self.data(NAME_KEY).unwrap_or("")
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.set_data(NAME_KEY, name);
    }

    /// Adds a new atom at the origin and returns its ID.
    ///
    /// # Arguments
    ///
    /// * `atomic_number` - The atomic number of the new atom.
    pub fn add_atom(&mut self, atomic_number: u8) -> AtomId {
        let atom_id = self.atoms.insert(Atom::new(atomic_number));
        self.atom_order.push(atom_id);
        atom_id
    }

    /// Retrieves an immutable reference to an atom by its ID.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Retrieves a mutable reference to an atom by its ID.
    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    /// Retrieves the atom at a position of the insertion order.
    ///
    /// # Return
    ///
    /// Returns `None` if `index` is out of range or the slot no longer holds an atom.
    pub fn atom_at(&self, index: usize) -> Option<&Atom> {
        self.atom_order
            .get(index)
            .and_then(|&id| self.atoms.get(id))
    }

    /// Frees the slot of `id` while leaving it in the insertion order, producing the dangling
    /// entry that positional lookups must tolerate.
    #[cfg(test)]
    pub(crate) fn detach_atom_slot(&mut self, id: AtomId) {
        self.atoms.remove(id);
    }

    pub fn atom_count(&self) -> usize {
        self.atom_order.len()
    }

    /// Returns an iterator over all atoms in insertion order.
    ///
    /// # Return
    ///
    /// An iterator yielding `(AtomId, &Atom)` pairs.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atom_order
            .iter()
            .filter_map(|&id| self.atoms.get(id).map(|atom| (id, atom)))
    }

    /// Returns a slice of all bonds in the system.
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Adds a bond between two atoms.
    ///
    /// Adding a bond that already exists (in either direction) succeeds without creating
    /// a duplicate.
    ///
    /// # Return
    ///
    /// Returns `Some(())` if successful, otherwise `None` (unknown atom or a self-bond).
    pub fn add_bond(&mut self, atom1_id: AtomId, atom2_id: AtomId) -> Option<()> {
        if atom1_id == atom2_id
            || !self.atoms.contains_key(atom1_id)
            || !self.atoms.contains_key(atom2_id)
        {
            return None;
        }

        let exists = self
            .bonds
            .iter()
            .any(|bond| bond.contains(atom1_id) && bond.contains(atom2_id));
        if !exists {
            self.bonds.push(Bond::new(atom1_id, atom2_id));
        }
        Some(())
    }

    /// Retrieves the bonded neighbors of an atom.
    pub fn get_bonded_neighbors(&self, atom_id: AtomId) -> Vec<AtomId> {
        self.bonds
            .iter()
            .filter(|bond| bond.contains(atom_id))
            .map(|bond| {
                if bond.atom1_id == atom_id {
                    bond.atom2_id
                } else {
                    bond.atom1_id
                }
            })
            .collect()
    }

    /// Replaces the bond list with bonds inferred from interatomic distances alone.
    ///
    /// # Return
    ///
    /// The number of bonds found.
    pub fn perceive_bonds_simple(&mut self, params: &BondPerception) -> usize {
        let centers: Vec<_> = self
            .atoms_iter()
            .map(|(_, atom)| (atom.position, atom.covalent_radius()))
            .collect();

        self.bonds = bonding::find_bonded_pairs(&centers, params)
            .into_iter()
            .map(|(i, j)| Bond::new(self.atom_order[i], self.atom_order[j]))
            .collect();
        self.bonds.len()
    }

    /// Attaches a new, empty grid and returns a mutable reference to it.
    pub fn add_cube(&mut self) -> &mut Cube {
        self.cubes.push(Cube::new());
        let last = self.cubes.len() - 1;
        &mut self.cubes[last]
    }

    /// Attaches an existing grid.
    pub fn push_cube(&mut self, cube: Cube) {
        self.cubes.push(cube);
    }

    pub fn cube(&self, index: usize) -> Option<&Cube> {
        self.cubes.get(index)
    }

    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    pub fn cube_count(&self) -> usize {
        self.cubes.len()
    }

    /// Detaches every grid, returning them in order.
    pub fn take_cubes(&mut self) -> Vec<Cube> {
        std::mem::take(&mut self.cubes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    fn create_water() -> (MolecularSystem, [AtomId; 3]) {
        let mut system = MolecularSystem::new();
        let o = system.add_atom(8);
        let h1 = system.add_atom(1);
        let h2 = system.add_atom(1);
        system.atom_mut(o).unwrap().position = Point3::new(0.0, 0.0, 0.1173);
        system.atom_mut(h1).unwrap().position = Point3::new(0.0, 0.7572, -0.4692);
        system.atom_mut(h2).unwrap().position = Point3::new(0.0, -0.7572, -0.4692);
        (system, [o, h1, h2])
    }

    #[test]
    fn system_creation_and_access() {
        let (system, [o, h1, _]) = create_water();
        assert_eq!(system.atom_count(), 3);
        assert_eq!(system.atom(o).unwrap().atomic_number, 8);
        assert_eq!(system.atom_at(1), system.atom(h1));
        assert!(system.atom_at(3).is_none());
        assert_eq!(
            system
                .atoms_iter()
                .map(|(_, a)| a.atomic_number)
                .collect::<Vec<_>>(),
            vec![8, 1, 1]
        );
    }

    #[test]
    fn name_is_stored_as_data_entry() {
        let mut system = MolecularSystem::new();
        assert_eq!(system.name(), "");
        assert_eq!(system.data(NAME_KEY), None);

        system.set_name("water density");
        assert_eq!(system.name(), "water density");
        assert_eq!(system.data("name"), Some("water density"));

        system.set_data("comment", "SCF Total Density");
        assert_eq!(system.data("comment"), Some("SCF Total Density"));
    }

    #[test]
    fn idempotent_add_bond_does_not_create_duplicates() {
        let (mut system, [o, h1, _]) = create_water();
        assert_eq!(system.add_bond(o, h1), Some(()));
        assert_eq!(system.add_bond(h1, o), Some(()));
        assert_eq!(system.bonds().len(), 1);
        assert_eq!(system.add_bond(o, o), None);
    }

    #[test]
    fn get_bonded_neighbors_returns_correct_neighbors() {
        let (mut system, [o, h1, h2]) = create_water();
        system.add_bond(o, h1);
        system.add_bond(h2, o);

        let mut neighbors = system.get_bonded_neighbors(o);
        neighbors.sort();
        let mut expected = vec![h1, h2];
        expected.sort();
        assert_eq!(neighbors, expected);
        assert_eq!(system.get_bonded_neighbors(h1), vec![o]);
    }

    #[test]
    fn perceive_bonds_simple_bonds_water() {
        let (mut system, [o, h1, h2]) = create_water();
        let found = system.perceive_bonds_simple(&BondPerception::default());
        assert_eq!(found, 2);
        assert_eq!(system.get_bonded_neighbors(o).len(), 2);
        assert_eq!(system.get_bonded_neighbors(h1), vec![o]);
        assert_eq!(system.get_bonded_neighbors(h2), vec![o]);
    }

    #[test]
    fn cubes_are_kept_in_insertion_order() {
        let mut system = MolecularSystem::new();
        assert_eq!(system.cube_count(), 0);
        assert!(system.cube(0).is_none());

        system
            .add_cube()
            .set_limits(Point3::origin(), [1, 1, 1], Vector3::repeat(1.0));
        system
            .add_cube()
            .set_limits(Point3::origin(), [2, 1, 1], Vector3::repeat(1.0));

        assert_eq!(system.cube_count(), 2);
        assert_eq!(system.cube(1).unwrap().dimensions(), [2, 1, 1]);

        let cubes = system.take_cubes();
        assert_eq!(cubes.len(), 2);
        assert_eq!(system.cube_count(), 0);
    }
}
