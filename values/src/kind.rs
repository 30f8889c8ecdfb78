use core::fmt;

use smallvec::SmallVec;

/// Runtime class of a [`Value`](crate::dynamic::Value).
///
/// Kinds form a single-inheritance tree rooted at [`Kind::Object`]:
///
/// ```text
/// Object
/// ├── Nil
/// ├── Bool
/// ├── Numeric
/// │   ├── Int
/// │   └── Float
/// ├── Str
/// ├── Array
/// ├── Map
/// └── Class
/// ```
///
/// Only the leaves are ever the exact kind of a value. `Object` and `Numeric`
/// exist so that ancestry-style type tests (`is_a?`) have something to match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    Object,
    Nil,
    Bool,
    Numeric,
    Int,
    Float,
    Str,
    Array,
    Map,
    /// The kind of `Value::Kind(..)` values themselves.
    Class,
}

impl Kind {
    /// Every kind, in declaration order.
    pub const ALL: [Kind; 10] = [
        Kind::Object,
        Kind::Nil,
        Kind::Bool,
        Kind::Numeric,
        Kind::Int,
        Kind::Float,
        Kind::Str,
        Kind::Array,
        Kind::Map,
        Kind::Class,
    ];

    /// Direct parent in the kind tree, `None` for `Object`.
    pub const fn superclass(self) -> Option<Kind> {
        match self {
            Kind::Object => None,
            Kind::Int | Kind::Float => Some(Kind::Numeric),
            _ => Some(Kind::Object),
        }
    }

    /// The kind itself followed by all of its ancestors, nearest first.
    pub fn ancestors(self) -> SmallVec<[Kind; 4]> {
        let mut chain = SmallVec::new();
        let mut current = Some(self);
        while let Some(kind) = current {
            chain.push(kind);
            current = kind.superclass();
        }
        chain
    }

    /// Ancestry-style type test: `self` is `other` or descends from it.
    pub fn is_a(self, other: Kind) -> bool {
        self.ancestors().contains(&other)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Kind::Object => "Object",
            Kind::Nil => "Nil",
            Kind::Bool => "Bool",
            Kind::Numeric => "Numeric",
            Kind::Int => "Int",
            Kind::Float => "Float",
            Kind::Str => "Str",
            Kind::Array => "Array",
            Kind::Map => "Map",
            Kind::Class => "Class",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ancestors_walk_to_object() {
        assert_eq!(
            Kind::Int.ancestors().as_slice(),
            &[Kind::Int, Kind::Numeric, Kind::Object]
        );
        assert_eq!(Kind::Object.ancestors().as_slice(), &[Kind::Object]);
    }

    #[test]
    fn is_a_follows_ancestry_only() {
        assert!(Kind::Float.is_a(Kind::Numeric));
        assert!(Kind::Array.is_a(Kind::Object));
        assert!(Kind::Str.is_a(Kind::Str));
        assert!(!Kind::Numeric.is_a(Kind::Int));
        assert!(!Kind::Array.is_a(Kind::Str));
    }

    #[test]
    fn every_kind_descends_from_object() {
        for kind in Kind::ALL {
            assert!(kind.is_a(Kind::Object), "{kind} should be an Object");
        }
    }
}
