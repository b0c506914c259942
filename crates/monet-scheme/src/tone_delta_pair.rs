//! Joint tone constraints between two roles.

use crate::role::Role;

/// Which side of the pair gets the lighter tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TonePolarity {
    /// Role A is nearer the background.
    Nearer,
    /// Role A is farther from the background.
    Farther,
    /// Role A is lighter.
    Lighter,
    /// Role A is darker.
    Darker,
    /// Role A is lighter in light schemes and darker in dark ones.
    RelativeLighter,
    /// Role A is darker in light schemes and lighter in dark ones.
    RelativeDarker,
}

/// How the delta binds (2025 tables). The 2021 tables always treat it as
/// a minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaConstraint {
    /// Exactly `delta` apart.
    Exact,
    /// At most `delta` apart.
    Nearer,
    /// At least `delta` apart.
    Farther,
}

/// Two roles whose tones must keep `delta` apart in the direction given by
/// `polarity`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneDeltaPair {
    pub role_a: Role,
    pub role_b: Role,
    pub delta: f64,
    pub polarity: TonePolarity,
    /// When the farther role would land in the awkward 50–59 band, move
    /// the nearer one along with it instead of splitting them across it.
    pub stay_together: bool,
    pub constraint: DeltaConstraint,
}

impl ToneDeltaPair {
    #[must_use]
    pub const fn new(role_a: Role, role_b: Role, delta: f64, polarity: TonePolarity, stay_together: bool) -> Self {
        Self { role_a, role_b, delta, polarity, stay_together, constraint: DeltaConstraint::Farther }
    }

    #[must_use]
    pub const fn with_constraint(mut self, constraint: DeltaConstraint) -> Self {
        self.constraint = constraint;
        self
    }

    /// The other member, if `role` is one of the two.
    #[must_use]
    pub fn partner(&self, role: Role) -> Option<Role> {
        if role == self.role_a {
            Some(self.role_b)
        } else if role == self.role_b {
            Some(self.role_a)
        } else {
            None
        }
    }

    /// Signed offset of role A from role B under the 2025 rules: positive
    /// when A must be lighter.
    #[must_use]
    pub fn signed_delta(&self, dark: bool) -> f64 {
        let darker = match self.polarity {
            TonePolarity::Darker => true,
            TonePolarity::RelativeLighter => dark,
            TonePolarity::RelativeDarker => !dark,
            _ => false,
        };
        if darker { -self.delta } else { self.delta }
    }

    /// Whether role A is the one nearer the background under the 2021
    /// rules.
    #[must_use]
    pub const fn a_is_nearer(&self, dark: bool) -> bool {
        match self.polarity {
            TonePolarity::Nearer => true,
            TonePolarity::Lighter => !dark,
            TonePolarity::Darker => dark,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partner_lookup() {
        let pair = ToneDeltaPair::new(Role::PrimaryContainer, Role::Primary, 10.0, TonePolarity::Nearer, false);
        assert_eq!(pair.partner(Role::Primary), Some(Role::PrimaryContainer));
        assert_eq!(pair.partner(Role::PrimaryContainer), Some(Role::Primary));
        assert_eq!(pair.partner(Role::Secondary), None);
    }

    #[test]
    fn nearer_side_follows_polarity() {
        let pair = |polarity| ToneDeltaPair::new(Role::PrimaryFixed, Role::PrimaryFixedDim, 10.0, polarity, true);
        assert!(pair(TonePolarity::Nearer).a_is_nearer(true));
        assert!(pair(TonePolarity::Lighter).a_is_nearer(false));
        assert!(!pair(TonePolarity::Lighter).a_is_nearer(true));
        assert!(pair(TonePolarity::Darker).a_is_nearer(true));
        assert!(!pair(TonePolarity::Farther).a_is_nearer(false));
    }

    #[test]
    fn relative_polarity_flips_with_brightness() {
        let pair = ToneDeltaPair::new(Role::PrimaryContainer, Role::Primary, 5.0, TonePolarity::RelativeLighter, false);
        assert_eq!(pair.signed_delta(false), 5.0);
        assert_eq!(pair.signed_delta(true), -5.0);
        let darker = ToneDeltaPair { polarity: TonePolarity::Darker, ..pair };
        assert_eq!(darker.signed_delta(false), -5.0);
        assert_eq!(darker.constraint, DeltaConstraint::Farther);
    }
}
