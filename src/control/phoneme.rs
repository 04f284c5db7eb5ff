//! Voice roles and the phoneme-table seam.

use std::fmt;

use crate::control::aggregate::Location;

/// The four fixed voices of the choir.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VoiceRole {
    Soprano,
    Alto,
    Tenor,
    Bass,
}

impl VoiceRole {
    /// All roles, highest voice first. This is the dispatch order.
    pub const ALL: [VoiceRole; 4] = [
        VoiceRole::Soprano,
        VoiceRole::Alto,
        VoiceRole::Tenor,
        VoiceRole::Bass,
    ];

    pub fn index(self) -> usize {
        match self {
            VoiceRole::Soprano => 0,
            VoiceRole::Alto => 1,
            VoiceRole::Tenor => 2,
            VoiceRole::Bass => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VoiceRole::Soprano => "soprano",
            VoiceRole::Alto => "alto",
            VoiceRole::Tenor => "tenor",
            VoiceRole::Bass => "bass",
        }
    }
}

impl fmt::Display for VoiceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per voice role.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceSet<T> {
    values: [T; 4],
}

impl<T> VoiceSet<T> {
    /// Values given in role order: soprano, alto, tenor, bass.
    pub fn new(soprano: T, alto: T, tenor: T, bass: T) -> Self {
        Self {
            values: [soprano, alto, tenor, bass],
        }
    }

    pub fn from_fn(mut f: impl FnMut(VoiceRole) -> T) -> Self {
        Self {
            values: VoiceRole::ALL.map(&mut f),
        }
    }

    pub fn get(&self, role: VoiceRole) -> &T {
        &self.values[role.index()]
    }

    pub fn get_mut(&mut self, role: VoiceRole) -> &mut T {
        &mut self.values[role.index()]
    }

    pub fn map<U>(self, mut f: impl FnMut(VoiceRole, T) -> U) -> VoiceSet<U> {
        let [soprano, alto, tenor, bass] = self.values;
        VoiceSet::new(
            f(VoiceRole::Soprano, soprano),
            f(VoiceRole::Alto, alto),
            f(VoiceRole::Tenor, tenor),
            f(VoiceRole::Bass, bass),
        )
    }

    /// Iterate in role order.
    pub fn iter(&self) -> impl Iterator<Item = (VoiceRole, &T)> {
        VoiceRole::ALL.into_iter().zip(self.values.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (VoiceRole, &mut T)> {
        VoiceRole::ALL.into_iter().zip(self.values.iter_mut())
    }

    pub fn into_array(self) -> [T; 4] {
        self.values
    }
}

impl<T: Clone> VoiceSet<T> {
    pub fn splat(value: T) -> Self {
        Self::from_fn(|_| value.clone())
    }
}

/// A pure lookup from a control location to one voice's phoneme.
///
/// Must return a value for every location in the unit square.
pub trait PhonemeTable {
    type Phoneme;

    fn phoneme_at(&self, location: Location) -> Self::Phoneme;
}

impl<F, P> PhonemeTable for F
where
    F: Fn(Location) -> P,
{
    type Phoneme = P;

    fn phoneme_at(&self, location: Location) -> P {
        self(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_in_dispatch_order() {
        let names: Vec<_> = VoiceRole::ALL.iter().map(|r| r.name()).collect();
        assert_eq!(names, ["soprano", "alto", "tenor", "bass"]);
        for (i, role) in VoiceRole::ALL.iter().enumerate() {
            assert_eq!(role.index(), i);
        }
    }

    #[test]
    fn test_voice_set_access_and_map() {
        let set = VoiceSet::new(4, 3, 2, 1);
        assert_eq!(*set.get(VoiceRole::Soprano), 4);
        assert_eq!(*set.get(VoiceRole::Bass), 1);

        let labelled = set.map(|role, n| format!("{role}:{n}"));
        let collected: Vec<_> = labelled.iter().map(|(_, s)| s.clone()).collect();
        assert_eq!(collected, ["soprano:4", "alto:3", "tenor:2", "bass:1"]);
    }

    #[test]
    fn test_voice_set_from_fn_and_mutation() {
        let mut set = VoiceSet::from_fn(|role| role.index() * 10);
        *set.get_mut(VoiceRole::Tenor) += 1;
        for (_, value) in set.iter_mut() {
            *value += 1;
        }
        assert_eq!(set.into_array(), [1, 11, 22, 31]);
    }

    #[test]
    fn test_closure_is_a_phoneme_table() {
        let table = |location: Location| location.x + location.y;
        assert_eq!(table.phoneme_at(Location::new(0.25, 0.5)), 0.75);
    }
}
