//! Schema registry: the fixed table of known vocabulary fields.
//!
//! Every field the engine can resolve is a [`SkosField`] variant carrying its
//! value kind, multiplicity, and language dependence. The table is compiled
//! in — nothing mutates it, so instances share it without synchronization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

// ============================================================================
// Field kinds
// ============================================================================

/// What kind of value a field holds on the object side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Object is a URI reference (relations, mapping links).
    Uri,
    /// Object is a language-tagged literal.
    Literal,
    /// Object is a literal that never carries a language tag.
    LiteralNoLang,
    /// Object may be a literal or a URI (notation).
    Either,
}

impl FieldKind {
    /// True for every kind that participates in literal value matching.
    pub fn is_literal_like(self) -> bool {
        !matches!(self, FieldKind::Uri)
    }
}

// ============================================================================
// Field descriptors
// ============================================================================

/// Descriptor for one schema field. One per [`SkosField`], compiled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: &'static str,
    pub kind: FieldKind,
    pub multivalued: bool,
    pub lang_dependent: bool,
}

/// The known vocabulary fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkosField {
    PrefLabel,
    AltLabel,
    HiddenLabel,
    Notation,
    Definition,
    Example,
    Broader,
    Narrower,
    Related,
    ExactMatch,
    CloseMatch,
    BroadMatch,
    NarrowMatch,
    RelatedMatch,
}

impl SkosField {
    pub const ALL: [SkosField; 14] = [
        SkosField::PrefLabel,
        SkosField::AltLabel,
        SkosField::HiddenLabel,
        SkosField::Notation,
        SkosField::Definition,
        SkosField::Example,
        SkosField::Broader,
        SkosField::Narrower,
        SkosField::Related,
        SkosField::ExactMatch,
        SkosField::CloseMatch,
        SkosField::BroadMatch,
        SkosField::NarrowMatch,
        SkosField::RelatedMatch,
    ];

    pub const fn info(self) -> FieldInfo {
        use FieldKind::*;
        match self {
            SkosField::PrefLabel => FieldInfo {
                name: "prefLabel", kind: Literal, multivalued: false, lang_dependent: true,
            },
            SkosField::AltLabel => FieldInfo {
                name: "altLabel", kind: Literal, multivalued: true, lang_dependent: true,
            },
            SkosField::HiddenLabel => FieldInfo {
                name: "hiddenLabel", kind: Literal, multivalued: true, lang_dependent: true,
            },
            SkosField::Notation => FieldInfo {
                name: "notation", kind: Either, multivalued: true, lang_dependent: false,
            },
            SkosField::Definition => FieldInfo {
                name: "definition", kind: Literal, multivalued: true, lang_dependent: true,
            },
            SkosField::Example => FieldInfo {
                name: "example", kind: Literal, multivalued: true, lang_dependent: true,
            },
            SkosField::Broader => FieldInfo {
                name: "broader", kind: Uri, multivalued: true, lang_dependent: false,
            },
            SkosField::Narrower => FieldInfo {
                name: "narrower", kind: Uri, multivalued: true, lang_dependent: false,
            },
            SkosField::Related => FieldInfo {
                name: "related", kind: Uri, multivalued: true, lang_dependent: false,
            },
            SkosField::ExactMatch => FieldInfo {
                name: "exactMatch", kind: Uri, multivalued: true, lang_dependent: false,
            },
            SkosField::CloseMatch => FieldInfo {
                name: "closeMatch", kind: Uri, multivalued: true, lang_dependent: false,
            },
            SkosField::BroadMatch => FieldInfo {
                name: "broadMatch", kind: Uri, multivalued: true, lang_dependent: false,
            },
            SkosField::NarrowMatch => FieldInfo {
                name: "narrowMatch", kind: Uri, multivalued: true, lang_dependent: false,
            },
            SkosField::RelatedMatch => FieldInfo {
                name: "relatedMatch", kind: Uri, multivalued: true, lang_dependent: false,
            },
        }
    }

    pub const fn name(self) -> &'static str {
        self.info().name
    }

    pub const fn kind(self) -> FieldKind {
        self.info().kind
    }

    pub const fn is_multivalued(self) -> bool {
        self.info().multivalued
    }

    pub const fn is_lang_dependent(self) -> bool {
        self.info().lang_dependent
    }

    /// Look a field up by its canonical name. `None` for anything the
    /// registry does not know — callers turn that into the contract error.
    pub fn parse(name: &str) -> Option<SkosField> {
        SkosField::ALL.iter().copied().find(|f| f.name() == name)
    }
}

impl FromStr for SkosField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkosField::parse(s).ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

impl fmt::Display for SkosField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
