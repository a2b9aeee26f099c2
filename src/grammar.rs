//! The GEDCOM 5.5.5 lineage-linked grammar as static data.
//!
//! Every node type is a [`NodeDef`]: its tag (or none, for a transparent
//! structure), the primitive fields its value may take, whether it declares
//! an identity, its level offset, and its ordered child [`Slot`]s.
//!
//! Offsets are data, not inference. Tags nest one level below their parent.
//! Tag-less structures such as [`EVENT_DETAIL`] or [`ADDRESS_STRUCTURE`] are
//! transparent and consume no level, so `PLAC` inside a `BIRT` event sits
//! one level below `BIRT`. Record roots, `HEAD` and `TRLR` are transparent
//! too: they sit on their section's level, which is always 0.

use crate::field_catalog::{self, FieldSpec};
use crate::level::LevelOffset;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use std::fmt;

/// How often a child may occur under its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Repetition {
    /// Exactly once
    Required,
    /// At most once
    Optional,
    /// Any number of times
    Many,
}

impl Repetition {
    /// Whether at most one occurrence is allowed.
    #[must_use]
    pub const fn is_single(self) -> bool {
        !matches!(self, Self::Many)
    }
}

/// A child position in a node type.
#[derive(Debug)]
pub struct Slot {
    /// Child node type
    pub def: &'static NodeDef,
    /// Allowed occurrences
    pub repetition: Repetition,
}

/// Static definition of one node type.
pub struct NodeDef {
    /// Unique grammar name
    pub name: &'static str,
    /// Emitted tag; `None` for a transparent structure
    pub tag: Option<&'static str>,
    /// Primitive fields the value may take, by catalog name
    pub fields: &'static [&'static str],
    /// Whether a value must be present
    pub value_required: bool,
    /// Whether the node declares a record identity
    pub identity: bool,
    /// Level shift relative to the parent
    pub level_offset: LevelOffset,
    /// Children in grammar order
    pub slots: &'static [Slot],
}

impl fmt::Debug for NodeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeDef")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("fields", &self.fields)
            .field("slots", &self.slots.len())
            .finish_non_exhaustive()
    }
}

/// Deepest chain of nested structures searched when resolving a child.
const MAX_STRUCTURE_DEPTH: usize = 8;

impl NodeDef {
    /// Whether this is a tag-less structure.
    #[must_use]
    pub const fn is_structure(&self) -> bool {
        self.tag.is_none()
    }

    /// Tag if present, otherwise the grammar name.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.tag.unwrap_or(self.name)
    }

    /// First literal field this node's value may take.
    #[must_use]
    pub fn literal_field(&self) -> Option<&'static FieldSpec> {
        self.fields
            .iter()
            .filter_map(|name| field_catalog::lookup(name))
            .find(|spec| !spec.is_pointer())
    }

    /// First cross-reference field this node's value may take.
    #[must_use]
    pub fn reference_field(&self) -> Option<&'static FieldSpec> {
        self.fields
            .iter()
            .filter_map(|name| field_catalog::lookup(name))
            .find(|spec| spec.is_pointer())
    }

    /// Slot indices leading to the first child with this tag.
    ///
    /// Direct slots are searched first, then tag-less structure slots depth
    /// first in grammar order. Every index but the last selects a structure.
    #[must_use]
    pub fn path_to_tag(&self, tag: &str) -> Option<Vec<usize>> {
        self.search(&|def| def.tag == Some(tag), 0)
    }

    /// Slot indices leading to a child of exactly this type.
    #[must_use]
    pub fn path_to_def(&self, target: &'static NodeDef) -> Option<Vec<usize>> {
        self.search(&|def| std::ptr::eq(def, target), 0)
    }

    fn search(&self, matches: &dyn Fn(&NodeDef) -> bool, depth: usize) -> Option<Vec<usize>> {
        if let Some(index) = self.slots.iter().position(|slot| matches(slot.def)) {
            return Some(vec![index]);
        }
        if depth >= MAX_STRUCTURE_DEPTH {
            return None;
        }
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.def.is_structure())
            .find_map(|(index, slot)| {
                slot.def.search(matches, depth + 1).map(|mut path| {
                    path.insert(0, index);
                    path
                })
            })
    }
}

macro_rules! slots {
    ($($child:ident: $rep:ident),* $(,)?) => {
        &[$(Slot { def: &$child, repetition: Repetition::$rep }),*]
    };
}

macro_rules! value_required {
    (required) => {
        true
    };
    (optional) => {
        false
    };
    (none) => {
        false
    };
}

/// A tag carrying one required literal value and no children.
macro_rules! leaf {
    ($name:ident, $tag:literal, $field:literal) => {
        #[doc = concat!("`", $tag, "` with a `", $field, "` value.")]
        pub static $name: NodeDef = NodeDef {
            name: stringify!($name),
            tag: Some($tag),
            fields: &[$field],
            value_required: true,
            identity: false,
            level_offset: LevelOffset::Nested,
            slots: &[],
        };
    };
}

/// A tag nested one level below its parent.
macro_rules! tag {
    ($name:ident, $tag:literal, [$($field:literal),*], $value:ident, { $($slots:tt)* }) => {
        #[doc = concat!("`", $tag, "` line.")]
        pub static $name: NodeDef = NodeDef {
            name: stringify!($name),
            tag: Some($tag),
            fields: &[$($field),*],
            value_required: value_required!($value),
            identity: false,
            level_offset: LevelOffset::Nested,
            slots: slots!($($slots)*),
        };
    };
}

/// A tag-less structure that groups children without consuming a level.
macro_rules! structure {
    ($name:ident, { $($slots:tt)* }) => {
        #[doc = concat!("`", stringify!($name), "` structure.")]
        pub static $name: NodeDef = NodeDef {
            name: stringify!($name),
            tag: None,
            fields: &[],
            value_required: false,
            identity: false,
            level_offset: LevelOffset::Transparent,
            slots: slots!($($slots)*),
        };
    };
}

/// A record root: declares an identity and sits on its section's level.
macro_rules! record {
    ($name:ident, $tag:literal, [$($field:literal),*], $value:ident, { $($slots:tt)* }) => {
        #[doc = concat!("`", $tag, "` record.")]
        pub static $name: NodeDef = NodeDef {
            name: stringify!($name),
            tag: Some($tag),
            fields: &[$($field),*],
            value_required: value_required!($value),
            identity: true,
            level_offset: LevelOffset::Transparent,
            slots: slots!($($slots)*),
        };
    };
}

/// A level-0 tag without identity (`HEAD`, `TRLR`).
macro_rules! top_level {
    ($name:ident, $tag:literal, { $($slots:tt)* }) => {
        #[doc = concat!("`", $tag, "` section line.")]
        pub static $name: NodeDef = NodeDef {
            name: stringify!($name),
            tag: Some($tag),
            fields: &[],
            value_required: false,
            identity: false,
            level_offset: LevelOffset::Transparent,
            slots: slots!($($slots)*),
        };
    };
}

/// An individual event or attribute with an optional event detail.
macro_rules! individual_fact {
    ($name:ident, $tag:literal, [$($field:literal),*], $value:ident) => {
        tag!($name, $tag, [$($field),*], $value, { INDIVIDUAL_EVENT_DETAIL: Optional });
    };
}

/// A family event with an optional family event detail.
macro_rules! family_event {
    ($name:ident, $tag:literal, [$($field:literal),*], $value:ident) => {
        tag!($name, $tag, [$($field),*], $value, { FAMILY_EVENT_DETAIL: Optional });
    };
}

// Shared leaves

leaf!(TIME, "TIME", "TIME_VALUE");
leaf!(RIN, "RIN", "AUTOMATED_RECORD_ID");
leaf!(AGE, "AGE", "AGE_AT_EVENT");
leaf!(AGNC, "AGNC", "RESPONSIBLE_AGENCY");
leaf!(PHONETIC_TYPE, "TYPE", "PHONETISATION_METHOD");
leaf!(ROMANISED_TYPE, "TYPE", "ROMANISATION_METHOD");

// MULTIMEDIA_LINK, NOTE_STRUCTURE

tag!(OBJE_LINK, "OBJE", ["XREF_OBJE"], required, {});
structure!(MULTIMEDIA_LINK, { OBJE_LINK: Required });

tag!(NOTE_LINK, "NOTE", ["XREF_NOTE", "USER_TEXT"], required, {});
structure!(NOTE_STRUCTURE, { NOTE_LINK: Required });

// CHANGE_DATE

tag!(CHANGE_DATE_DATE, "DATE", ["DATE_EXACT"], required, { TIME: Optional });
tag!(CHAN, "CHAN", [], none, { CHANGE_DATE_DATE: Required, NOTE_STRUCTURE: Many });
structure!(CHANGE_DATE, { CHAN: Required });

// USER_REFERENCE_NUMBER

leaf!(REFN_TYPE, "TYPE", "USER_REFERENCE_TYPE");
tag!(REFN, "REFN", ["USER_REFERENCE_NUMBER"], required, { REFN_TYPE: Optional });

// ADDRESS_STRUCTURE

leaf!(ADR1, "ADR1", "ADDRESS_LINE1");
leaf!(ADR2, "ADR2", "ADDRESS_LINE2");
leaf!(ADR3, "ADR3", "ADDRESS_LINE3");
leaf!(CITY, "CITY", "ADDRESS_CITY");
leaf!(STAE, "STAE", "ADDRESS_STATE");
leaf!(POST, "POST", "ADDRESS_POSTAL_CODE");
leaf!(CTRY, "CTRY", "ADDRESS_COUNTRY");
tag!(ADDR, "ADDR", [], none, {
    ADR1: Optional,
    ADR2: Optional,
    ADR3: Optional,
    CITY: Optional,
    STAE: Optional,
    POST: Optional,
    CTRY: Optional,
});
leaf!(PHON, "PHON", "PHONE_NUMBER");
leaf!(EMAIL, "EMAIL", "ADDRESS_EMAIL");
leaf!(FAX, "FAX", "ADDRESS_FAX");
leaf!(WWW, "WWW", "ADDRESS_WEB_PAGE");
structure!(ADDRESS_STRUCTURE, {
    ADDR: Required,
    PHON: Many,
    EMAIL: Many,
    FAX: Many,
    WWW: Many,
});

// PLACE_STRUCTURE

tag!(PLACE_FONE, "FONE", ["PLACE_PHONETIC"], required, { PHONETIC_TYPE: Required });
tag!(PLACE_ROMN, "ROMN", ["PLACE_ROMANISED"], required, { ROMANISED_TYPE: Required });
leaf!(LATI, "LATI", "PLACE_LATITUDE");
leaf!(LONG, "LONG", "PLACE_LONGITUDE");
tag!(MAP, "MAP", [], none, { LATI: Required, LONG: Required });
tag!(PLAC, "PLAC", ["PLACE_NAME"], required, {
    PLACE_FONE: Many,
    PLACE_ROMN: Many,
    MAP: Optional,
    NOTE_STRUCTURE: Many,
});
structure!(PLACE_STRUCTURE, { PLAC: Required });

// SOURCE_CITATION

leaf!(PAGE, "PAGE", "WHERE_WITHIN_SOURCE");
leaf!(ROLE, "ROLE", "ROLE_IN_EVENT");
tag!(CITATION_EVEN, "EVEN", ["EVENT_TYPE_CITED_FROM"], required, { ROLE: Optional });
leaf!(CITATION_DATA_DATE, "DATE", "ENTRY_RECORDING_DATE");
leaf!(CITATION_DATA_TEXT, "TEXT", "TEXT_FROM_SOURCE");
tag!(CITATION_DATA, "DATA", [], none, {
    CITATION_DATA_DATE: Optional,
    CITATION_DATA_TEXT: Many,
});
leaf!(QUAY, "QUAY", "CERTAINTY_ASSESSMENT");
tag!(CITATION_SOUR, "SOUR", ["XREF_SOUR"], required, {
    PAGE: Optional,
    CITATION_EVEN: Optional,
    CITATION_DATA: Optional,
    MULTIMEDIA_LINK: Many,
    NOTE_STRUCTURE: Many,
    QUAY: Optional,
});
structure!(SOURCE_CITATION, { CITATION_SOUR: Required });

// EVENT_DETAIL

leaf!(EVENT_TYPE, "TYPE", "EVENT_OR_FACT_CLASSIFICATION");
leaf!(EVENT_DATE, "DATE", "DATE_VALUE");
leaf!(EVENT_RELI, "RELI", "RELIGIOUS_AFFILIATION");
leaf!(CAUS, "CAUS", "CAUSE_OF_EVENT");
structure!(EVENT_DETAIL, {
    EVENT_TYPE: Optional,
    EVENT_DATE: Optional,
    PLACE_STRUCTURE: Optional,
    ADDRESS_STRUCTURE: Optional,
    AGNC: Optional,
    EVENT_RELI: Optional,
    CAUS: Optional,
    NOTE_STRUCTURE: Many,
    SOURCE_CITATION: Many,
    MULTIMEDIA_LINK: Many,
});

// FAMILY_EVENT_STRUCTURE

tag!(FAMILY_EVENT_HUSB, "HUSB", [], none, { AGE: Required });
tag!(FAMILY_EVENT_WIFE, "WIFE", [], none, { AGE: Required });
structure!(FAMILY_EVENT_DETAIL, {
    FAMILY_EVENT_HUSB: Optional,
    FAMILY_EVENT_WIFE: Optional,
    EVENT_DETAIL: Optional,
});
family_event!(FAM_ANUL, "ANUL", ["Y"], optional);
family_event!(FAM_CENS, "CENS", ["Y"], optional);
family_event!(FAM_DIV, "DIV", ["Y"], optional);
family_event!(FAM_DIVF, "DIVF", ["Y"], optional);
family_event!(FAM_ENGA, "ENGA", ["Y"], optional);
family_event!(FAM_MARB, "MARB", ["Y"], optional);
family_event!(FAM_MARC, "MARC", ["Y"], optional);
family_event!(FAM_MARR, "MARR", ["Y"], optional);
family_event!(FAM_MARL, "MARL", ["Y"], optional);
family_event!(FAM_MARS, "MARS", ["Y"], optional);
family_event!(FAM_RESI, "RESI", [], none);
family_event!(FAM_EVEN, "EVEN", ["EVENT_DESCRIPTOR"], optional);
structure!(FAMILY_EVENT_STRUCTURE, {
    FAM_ANUL: Optional,
    FAM_CENS: Optional,
    FAM_DIV: Optional,
    FAM_DIVF: Optional,
    FAM_ENGA: Optional,
    FAM_MARB: Optional,
    FAM_MARC: Optional,
    FAM_MARR: Optional,
    FAM_MARL: Optional,
    FAM_MARS: Optional,
    FAM_RESI: Optional,
    FAM_EVEN: Optional,
});

// INDIVIDUAL_EVENT_STRUCTURE

structure!(INDIVIDUAL_EVENT_DETAIL, { EVENT_DETAIL: Optional, AGE: Optional });
tag!(EVENT_FAMC, "FAMC", ["XREF_FAM"], required, {});
leaf!(ADOPTED_BY, "ADOP", "ADOPTED_BY_WHICH_PARENT");
tag!(ADOPTION_FAMC, "FAMC", ["XREF_FAM"], required, { ADOPTED_BY: Optional });
tag!(INDI_BIRT, "BIRT", ["Y"], optional, {
    INDIVIDUAL_EVENT_DETAIL: Optional,
    EVENT_FAMC: Optional,
});
tag!(INDI_CHR, "CHR", ["Y"], optional, {
    INDIVIDUAL_EVENT_DETAIL: Optional,
    EVENT_FAMC: Optional,
});
tag!(INDI_ADOP, "ADOP", [], none, {
    INDIVIDUAL_EVENT_DETAIL: Optional,
    ADOPTION_FAMC: Optional,
});
individual_fact!(INDI_DEAT, "DEAT", ["Y"], optional);
individual_fact!(INDI_BURI, "BURI", [], none);
individual_fact!(INDI_CREM, "CREM", [], none);
individual_fact!(INDI_BAPM, "BAPM", [], none);
individual_fact!(INDI_BARM, "BARM", [], none);
individual_fact!(INDI_BASM, "BASM", [], none);
individual_fact!(INDI_CHRA, "CHRA", [], none);
individual_fact!(INDI_CONF, "CONF", [], none);
individual_fact!(INDI_FCOM, "FCOM", [], none);
individual_fact!(INDI_NATU, "NATU", [], none);
individual_fact!(INDI_EMIG, "EMIG", [], none);
individual_fact!(INDI_IMMI, "IMMI", [], none);
individual_fact!(INDI_CENS, "CENS", [], none);
individual_fact!(INDI_PROB, "PROB", [], none);
individual_fact!(INDI_WILL, "WILL", [], none);
individual_fact!(INDI_GRAD, "GRAD", [], none);
individual_fact!(INDI_RETI, "RETI", [], none);
individual_fact!(INDI_EVEN, "EVEN", ["EVENT_DESCRIPTOR"], optional);
structure!(INDIVIDUAL_EVENT_STRUCTURE, {
    INDI_BIRT: Optional,
    INDI_CHR: Optional,
    INDI_DEAT: Optional,
    INDI_BURI: Optional,
    INDI_CREM: Optional,
    INDI_ADOP: Optional,
    INDI_BAPM: Optional,
    INDI_BARM: Optional,
    INDI_BASM: Optional,
    INDI_CHRA: Optional,
    INDI_CONF: Optional,
    INDI_FCOM: Optional,
    INDI_NATU: Optional,
    INDI_EMIG: Optional,
    INDI_IMMI: Optional,
    INDI_CENS: Optional,
    INDI_PROB: Optional,
    INDI_WILL: Optional,
    INDI_GRAD: Optional,
    INDI_RETI: Optional,
    INDI_EVEN: Optional,
});

// INDIVIDUAL_ATTRIBUTE_STRUCTURE

individual_fact!(ATTR_CAST, "CAST", ["CASTE_NAME"], required);
individual_fact!(ATTR_DSCR, "DSCR", ["PHYSICAL_DESCRIPTION"], required);
individual_fact!(ATTR_EDUC, "EDUC", ["SCHOLASTIC_ACHIEVEMENT"], required);
individual_fact!(ATTR_IDNO, "IDNO", ["ID_NUMBER"], required);
individual_fact!(ATTR_NATI, "NATI", ["NATIONAL_OR_TRIBAL_ORIGIN"], required);
individual_fact!(ATTR_NCHI, "NCHI", ["COUNT_OF_CHILDREN"], required);
individual_fact!(ATTR_NMR, "NMR", ["NUMBER_OF_RELATIONSHIPS"], required);
individual_fact!(ATTR_OCCU, "OCCU", ["OCCUPATION"], required);
individual_fact!(ATTR_PROP, "PROP", ["POSSESSIONS"], required);
individual_fact!(ATTR_RELI, "RELI", ["RELIGIOUS_AFFILIATION"], required);
individual_fact!(ATTR_RESI, "RESI", [], none);
individual_fact!(ATTR_TITL, "TITL", ["NOBILITY_TYPE_TITLE"], required);
individual_fact!(ATTR_FACT, "FACT", ["ATTRIBUTE_DESCRIPTOR"], required);
structure!(INDIVIDUAL_ATTRIBUTE_STRUCTURE, {
    ATTR_CAST: Optional,
    ATTR_DSCR: Optional,
    ATTR_EDUC: Optional,
    ATTR_IDNO: Optional,
    ATTR_NATI: Optional,
    ATTR_NCHI: Optional,
    ATTR_NMR: Optional,
    ATTR_OCCU: Optional,
    ATTR_PROP: Optional,
    ATTR_RELI: Optional,
    ATTR_RESI: Optional,
    ATTR_TITL: Optional,
    ATTR_FACT: Optional,
});

// PERSONAL_NAME_STRUCTURE

leaf!(NPFX, "NPFX", "NAME_PIECE_PREFIX");
leaf!(GIVN, "GIVN", "NAME_PIECE_GIVEN");
leaf!(NICK, "NICK", "NAME_PIECE_NICKNAME");
leaf!(SPFX, "SPFX", "NAME_PIECE_SURNAME_PREFIX");
leaf!(SURN, "SURN", "NAME_PIECE_SURNAME");
leaf!(NSFX, "NSFX", "NAME_PIECE_SUFFIX");
structure!(PERSONAL_NAME_PIECES, {
    NPFX: Optional,
    GIVN: Optional,
    NICK: Optional,
    SPFX: Optional,
    SURN: Optional,
    NSFX: Optional,
    NOTE_STRUCTURE: Many,
    SOURCE_CITATION: Many,
});
leaf!(PERSONAL_NAME_TYPE, "TYPE", "NAME_TYPE");
tag!(NAME_FONE, "FONE", ["NAME_PHONETIC"], required, {
    PHONETIC_TYPE: Required,
    PERSONAL_NAME_PIECES: Optional,
});
tag!(NAME_ROMN, "ROMN", ["NAME_ROMANISED"], required, {
    ROMANISED_TYPE: Required,
    PERSONAL_NAME_PIECES: Optional,
});
tag!(PERSONAL_NAME, "NAME", ["NAME_PERSONAL"], required, {
    PERSONAL_NAME_TYPE: Optional,
    PERSONAL_NAME_PIECES: Optional,
    NAME_FONE: Many,
    NAME_ROMN: Many,
});
structure!(PERSONAL_NAME_STRUCTURE, { PERSONAL_NAME: Required });

// Links between records

leaf!(PEDI, "PEDI", "PEDIGREE_LINKAGE_TYPE");
tag!(CHILD_FAMC, "FAMC", ["XREF_FAM"], required, {
    PEDI: Optional,
    NOTE_STRUCTURE: Many,
});
structure!(CHILD_TO_FAMILY_LINK, { CHILD_FAMC: Required });

tag!(SPOUSE_FAMS, "FAMS", ["XREF_FAM"], required, { NOTE_STRUCTURE: Many });
structure!(SPOUSE_TO_FAMILY_LINK, { SPOUSE_FAMS: Required });

leaf!(RELA, "RELA", "RELATION_IS_DESCRIPTOR");
tag!(ASSO, "ASSO", ["XREF_INDI"], required, {
    RELA: Required,
    SOURCE_CITATION: Many,
    NOTE_STRUCTURE: Many,
});
structure!(ASSOCIATION_STRUCTURE, { ASSO: Required });

leaf!(MEDI, "MEDI", "SOURCE_MEDIA_TYPE");
tag!(CALN, "CALN", ["SOURCE_CALL_NUMBER"], required, { MEDI: Optional });
tag!(REPOSITORY_CITATION_REPO, "REPO", ["XREF_REPO"], required, {
    NOTE_STRUCTURE: Many,
    CALN: Many,
});
structure!(SOURCE_REPOSITORY_CITATION, { REPOSITORY_CITATION_REPO: Required });

// Records

leaf!(SEX, "SEX", "SEX_VALUE");
record!(INDIVIDUAL_RECORD, "INDI", [], none, {
    PERSONAL_NAME_STRUCTURE: Many,
    SEX: Optional,
    INDIVIDUAL_EVENT_STRUCTURE: Many,
    INDIVIDUAL_ATTRIBUTE_STRUCTURE: Many,
    CHILD_TO_FAMILY_LINK: Many,
    SPOUSE_TO_FAMILY_LINK: Many,
    ASSOCIATION_STRUCTURE: Many,
    REFN: Many,
    RIN: Optional,
    CHANGE_DATE: Optional,
    NOTE_STRUCTURE: Many,
    SOURCE_CITATION: Many,
    MULTIMEDIA_LINK: Many,
});

tag!(FAMILY_HUSB, "HUSB", ["XREF_INDI"], required, {});
tag!(FAMILY_WIFE, "WIFE", ["XREF_INDI"], required, {});
tag!(FAMILY_CHIL, "CHIL", ["XREF_INDI"], required, {});
leaf!(FAMILY_NCHI, "NCHI", "COUNT_OF_CHILDREN");
record!(FAM_RECORD, "FAM", [], none, {
    FAMILY_EVENT_STRUCTURE: Many,
    FAMILY_HUSB: Optional,
    FAMILY_WIFE: Optional,
    FAMILY_CHIL: Many,
    FAMILY_NCHI: Optional,
    REFN: Many,
    RIN: Optional,
    CHANGE_DATE: Optional,
    NOTE_STRUCTURE: Many,
    SOURCE_CITATION: Many,
    MULTIMEDIA_LINK: Many,
});

leaf!(MEDIA_TYPE, "TYPE", "SOURCE_MEDIA_TYPE");
tag!(FILE_FORM, "FORM", ["MULTIMEDIA_FORMAT"], required, { MEDIA_TYPE: Optional });
leaf!(FILE_TITL, "TITL", "DESCRIPTIVE_TITLE");
tag!(MULTIMEDIA_FILE, "FILE", ["MULTIMEDIA_FILE_REFERENCE"], required, {
    FILE_FORM: Required,
    FILE_TITL: Optional,
});
record!(MULTIMEDIA_RECORD, "OBJE", [], none, {
    MULTIMEDIA_FILE: Many,
    REFN: Many,
    RIN: Optional,
    NOTE_STRUCTURE: Many,
    SOURCE_CITATION: Many,
    CHANGE_DATE: Optional,
});

record!(NOTE_RECORD, "NOTE", ["USER_TEXT"], required, {
    REFN: Many,
    RIN: Optional,
    SOURCE_CITATION: Many,
    CHANGE_DATE: Optional,
});

leaf!(REPOSITORY_NAME, "NAME", "NAME_OF_REPOSITORY");
record!(REPOSITORY_RECORD, "REPO", [], none, {
    REPOSITORY_NAME: Required,
    ADDRESS_STRUCTURE: Optional,
    NOTE_STRUCTURE: Many,
    REFN: Many,
    RIN: Optional,
    CHANGE_DATE: Optional,
});

leaf!(RECORDED_DATE, "DATE", "DATE_PERIOD");
leaf!(RECORDED_PLAC, "PLAC", "SOURCE_JURISDICTION_PLACE");
tag!(RECORDED_EVEN, "EVEN", ["EVENTS_RECORDED"], required, {
    RECORDED_DATE: Optional,
    RECORDED_PLAC: Optional,
});
tag!(SOURCE_DATA, "DATA", [], none, {
    RECORDED_EVEN: Many,
    AGNC: Optional,
    NOTE_STRUCTURE: Many,
});
leaf!(AUTH, "AUTH", "SOURCE_ORIGINATOR");
leaf!(SOURCE_TITL, "TITL", "SOURCE_DESCRIPTIVE_TITLE");
leaf!(ABBR, "ABBR", "SOURCE_FILED_BY_ENTRY");
leaf!(PUBL, "PUBL", "SOURCE_PUBLICATION_FACTS");
leaf!(SOURCE_TEXT, "TEXT", "TEXT_FROM_SOURCE");
record!(SOURCE_RECORD, "SOUR", [], none, {
    SOURCE_DATA: Optional,
    AUTH: Optional,
    SOURCE_TITL: Optional,
    ABBR: Optional,
    PUBL: Optional,
    SOURCE_TEXT: Optional,
    SOURCE_REPOSITORY_CITATION: Many,
    REFN: Many,
    RIN: Optional,
    CHANGE_DATE: Optional,
    NOTE_STRUCTURE: Many,
    MULTIMEDIA_LINK: Many,
});

leaf!(SUBMITTER_NAME, "NAME", "SUBMITTER_NAME");
leaf!(SUBMITTER_LANG, "LANG", "LANGUAGE_OF_TEXT");
record!(SUBMITTER_RECORD, "SUBM", [], none, {
    SUBMITTER_NAME: Required,
    ADDRESS_STRUCTURE: Optional,
    MULTIMEDIA_LINK: Many,
    SUBMITTER_LANG: Many,
    RIN: Optional,
    NOTE_STRUCTURE: Many,
    CHANGE_DATE: Optional,
});

// Header

leaf!(GEDCOM_VERS, "VERS", "GEDCOM_VERSION_NUMBER");
tag!(GEDCOM_FORM, "FORM", ["GEDCOM_FORM"], required, { GEDCOM_VERS: Required });
tag!(GEDC, "GEDC", [], none, { GEDCOM_VERS: Required, GEDCOM_FORM: Required });
leaf!(CHAR, "CHAR", "CHARACTER_ENCODING");
leaf!(DEST, "DEST", "RECEIVING_SYSTEM_NAME");
leaf!(PRODUCT_VERS, "VERS", "PRODUCT_VERSION_NUMBER");
leaf!(PRODUCT_NAME, "NAME", "NAME_OF_PRODUCT");
tag!(CORP, "CORP", ["NAME_OF_BUSINESS"], required, { ADDRESS_STRUCTURE: Optional });
leaf!(PUBLICATION_DATE, "DATE", "PUBLICATION_DATE");
leaf!(SOURCE_DATA_COPR, "COPR", "COPYRIGHT_SOURCE_DATA");
tag!(SOURCE_DATA_NAME, "DATA", ["NAME_OF_SOURCE_DATA"], required, {
    PUBLICATION_DATE: Optional,
    SOURCE_DATA_COPR: Optional,
});
tag!(SYSTEM_SOUR, "SOUR", ["SYSTEM_ID"], required, {
    PRODUCT_VERS: Optional,
    PRODUCT_NAME: Optional,
    CORP: Optional,
    SOURCE_DATA_NAME: Optional,
});
tag!(FILE_DATE, "DATE", ["FILE_CREATION_DATE"], required, { TIME: Optional });
leaf!(HEADER_LANG, "LANG", "LANGUAGE_OF_TEXT");
tag!(HEADER_SUBM, "SUBM", ["XREF_SUBM"], required, {});
leaf!(HEADER_FILE, "FILE", "GEDCOM_FILE_NAME");
leaf!(HEADER_COPR, "COPR", "COPYRIGHT_GEDCOM_FILE");
leaf!(HEADER_NOTE, "NOTE", "GEDCOM_CONTENT_DESCRIPTION");
structure!(GEDCOM_FORM_HEADER_EXTENSION, {
    DEST: Optional,
    SYSTEM_SOUR: Required,
    FILE_DATE: Optional,
    HEADER_LANG: Optional,
    HEADER_SUBM: Optional,
    HEADER_FILE: Optional,
    HEADER_COPR: Optional,
    HEADER_NOTE: Optional,
});
top_level!(HEAD, "HEAD", {
    GEDC: Required,
    CHAR: Required,
    GEDCOM_FORM_HEADER_EXTENSION: Optional,
});
structure!(GEDCOM_HEADER, { HEAD: Required });

// Document

top_level!(TRLR, "TRLR", {});
structure!(GEDCOM_TRAILER, { TRLR: Required });

structure!(LINEAGE_LINKED_RECORD, {
    FAM_RECORD: Optional,
    INDIVIDUAL_RECORD: Optional,
    MULTIMEDIA_RECORD: Optional,
    NOTE_RECORD: Optional,
    REPOSITORY_RECORD: Optional,
    SOURCE_RECORD: Optional,
});

structure!(LINEAGE_LINKED_GEDCOM_FILE, {
    GEDCOM_HEADER: Required,
    SUBMITTER_RECORD: Required,
    LINEAGE_LINKED_RECORD: Many,
    GEDCOM_TRAILER: Required,
});

lazy_static! {
    static ref DEFINITIONS: IndexMap<&'static str, &'static NodeDef> = {
        let mut definitions = IndexMap::new();
        let mut stack: Vec<&'static NodeDef> = vec![&LINEAGE_LINKED_GEDCOM_FILE];
        while let Some(def) = stack.pop() {
            if definitions.insert(def.name, def).is_none() {
                stack.extend(def.slots.iter().rev().map(|slot| slot.def));
            }
        }
        definitions
    };
}

/// Look up a node type by grammar name.
#[must_use]
pub fn definition(name: &str) -> Option<&'static NodeDef> {
    DEFINITIONS.get(name).copied()
}

/// Every node type reachable from [`LINEAGE_LINKED_GEDCOM_FILE`].
pub fn definitions() -> impl Iterator<Item = &'static NodeDef> {
    DEFINITIONS.values().copied()
}
