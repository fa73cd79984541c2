// Released under MIT License.
// Copyright (c) 2023-2025 Ladislav Bartos

//! Implementation of the `MoleculeSet` structure: ordered set of tracked molecules.

use indexmap::IndexSet;

use crate::errors::ParseParamError;

/// Ordered set of molecule IDs whose centers of mass are tracked.
///
/// Each molecule is assigned a dense local index `0..M` corresponding
/// to the order in which it was listed. The set is immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoleculeSet {
    ids: IndexSet<i64>,
}

impl MoleculeSet {
    /// Construct a new `MoleculeSet` from molecule IDs in the order they should be indexed.
    ///
    /// ## Returns
    /// - `MoleculeSet` if the IDs are unique and at least one ID is provided.
    /// - `ParseParamError::DuplicateMolecule` if any ID is provided multiple times.
    /// - `ParseParamError::NoMolecules` if no ID is provided.
    ///
    /// ## Example
    /// ```
    /// # use msdmol::prelude::*;
    /// #
    /// let molecules = MoleculeSet::new([10, 20, 7]).unwrap();
    ///
    /// assert_eq!(molecules.len(), 3);
    /// assert_eq!(molecules.local_index(20), Some(1));
    /// assert_eq!(molecules.local_index(8), None);
    /// assert_eq!(molecules.id(2), Some(7));
    /// ```
    pub fn new(ids: impl IntoIterator<Item = i64>) -> Result<Self, ParseParamError> {
        let mut set = IndexSet::new();
        for id in ids {
            if !set.insert(id) {
                return Err(ParseParamError::DuplicateMolecule(id));
            }
        }

        if set.is_empty() {
            return Err(ParseParamError::NoMolecules);
        }

        Ok(MoleculeSet { ids: set })
    }

    /// Get the local index of the molecule with the given ID.
    /// Returns `None` if the molecule is not tracked.
    #[inline(always)]
    pub fn local_index(&self, mol_id: i64) -> Option<usize> {
        self.ids.get_index_of(&mol_id)
    }

    /// Get the ID of the molecule with the given local index.
    #[inline(always)]
    pub fn id(&self, local_index: usize) -> Option<i64> {
        self.ids.get_index(local_index).copied()
    }

    /// Returns `true` if the molecule with the given ID is tracked.
    #[inline(always)]
    pub fn contains(&self, mol_id: i64) -> bool {
        self.ids.contains(&mol_id)
    }

    /// Number of tracked molecules.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always `false` for a successfully constructed set.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate over the tracked molecule IDs in the order of their local indices.
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.ids.iter().copied()
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
