use super::ids::AtomId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1_id: AtomId, // ID of the first atom
    pub atom2_id: AtomId, // ID of the second atom
}

impl Bond {
    pub fn new(atom1_id: AtomId, atom2_id: AtomId) -> Self {
        Self { atom1_id, atom2_id }
    }

    pub fn contains(&self, atom_id: AtomId) -> bool {
        self.atom1_id == atom_id || self.atom2_id == atom_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_atom_id(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn bond_contains_both_atoms() {
        let a1 = dummy_atom_id(1);
        let a2 = dummy_atom_id(2);
        let a3 = dummy_atom_id(3);
        let bond = Bond::new(a1, a2);
        assert!(bond.contains(a1));
        assert!(bond.contains(a2));
        assert!(!bond.contains(a3));
    }
}
