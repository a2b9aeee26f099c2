//! Static catalog of GEDCOM 5.5.5 primitive field types.
//!
//! Each [`FieldSpec`] names one primitive (for example `ADDRESS_CITY`) and
//! carries its inclusive length bounds in characters. Cross-reference
//! primitives (`XREF_*`) have [`FieldKind::PointerRef`] and render as
//! `@id@` values instead of literal text.
//!
//! Maximum lengths drive the CONT/CONC policy of the line chunker. Minimum
//! lengths are descriptive only and are reported, never enforced, by
//! [`crate::validation::field_bound_issues`].

use indexmap::IndexMap;
use lazy_static::lazy_static;
use serde::Serialize;

/// Longest value that must always fit without a `CONC` continuation.
pub const CONC_THRESHOLD: usize = 248;

/// How a field's value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldKind {
    /// Plain text, escaped and chunked as needed
    Literal,
    /// Cross-reference to a record identity, rendered as `@id@`
    PointerRef,
}

/// Length bounds for one GEDCOM primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FieldSpec {
    /// Primitive name, e.g. `ADDRESS_CITY`
    pub name: &'static str,
    /// Minimum length in characters (descriptive)
    pub min_len: usize,
    /// Maximum length in characters
    pub max_len: usize,
    /// Rendering kind
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn literal(name: &'static str, min_len: usize, max_len: usize) -> Self {
        FieldSpec {
            name,
            min_len,
            max_len,
            kind: FieldKind::Literal,
        }
    }

    const fn xref(name: &'static str) -> Self {
        FieldSpec {
            name,
            min_len: 3,
            max_len: 22,
            kind: FieldKind::PointerRef,
        }
    }

    /// Whether values of this field may be split with `CONC` lines.
    #[must_use]
    pub const fn allows_concatenation(&self) -> bool {
        self.max_len > CONC_THRESHOLD
    }

    /// Whether this field holds a cross-reference.
    #[must_use]
    pub const fn is_pointer(&self) -> bool {
        matches!(self.kind, FieldKind::PointerRef)
    }
}

/// Every GEDCOM 5.5.5 primitive, in alphabetical order.
pub static FIELD_CATALOG: &[FieldSpec] = &[
    FieldSpec::literal("ADDRESS_CITY", 1, 60),
    FieldSpec::literal("ADDRESS_COUNTRY", 1, 60),
    FieldSpec::literal("ADDRESS_EMAIL", 5, 120),
    FieldSpec::literal("ADDRESS_FAX", 5, 60),
    FieldSpec::literal("ADDRESS_LINE1", 1, 60),
    FieldSpec::literal("ADDRESS_LINE2", 1, 60),
    FieldSpec::literal("ADDRESS_LINE3", 1, 60),
    FieldSpec::literal("ADDRESS_POSTAL_CODE", 1, 10),
    FieldSpec::literal("ADDRESS_STATE", 1, 60),
    FieldSpec::literal("ADDRESS_WEB_PAGE", 4, 2047),
    FieldSpec::literal("ADOPTED_BY_WHICH_PARENT", 4, 4),
    FieldSpec::literal("AGE_AT_EVENT", 2, 13),
    FieldSpec::literal("ATTRIBUTE_DESCRIPTOR", 1, 90),
    FieldSpec::literal("ATTRIBUTE_TYPE", 4, 4),
    FieldSpec::literal("AUTOMATED_RECORD_ID", 1, 12),
    FieldSpec::literal("BEFORE_COMMON_ERA", 2, 4),
    FieldSpec::literal("CASTE_NAME", 1, 90),
    FieldSpec::literal("CAUSE_OF_EVENT", 1, 90),
    FieldSpec::literal("CERTAINTY_ASSESSMENT", 1, 1),
    FieldSpec::literal("CHARACTER_ENCODING", 5, 7),
    FieldSpec::literal("COPYRIGHT_GEDCOM_FILE", 1, 248),
    FieldSpec::literal("COPYRIGHT_SOURCE_DATA", 1, 248),
    FieldSpec::literal("COUNT_OF_CHILDREN", 1, 3),
    FieldSpec::literal("DATE", 4, 35),
    FieldSpec::literal("DATE_APPROXIMATED", 8, 39),
    FieldSpec::literal("DATE_CALENDAR", 4, 35),
    FieldSpec::literal("DATE_CALENDAR_ESCAPE", 4, 15),
    FieldSpec::literal("DATE_EXACT", 10, 11),
    FieldSpec::literal("DATE_FREN", 4, 35),
    FieldSpec::literal("DATE_GREG", 4, 35),
    FieldSpec::literal("DATE_HEBR", 4, 35),
    FieldSpec::literal("DATE_JULN", 4, 35),
    FieldSpec::literal("DATE_PERIOD", 7, 35),
    FieldSpec::literal("DATE_PHRASE", 1, 35),
    FieldSpec::literal("DATE_RANGE", 8, 35),
    FieldSpec::literal("DATE_VALUE", 1, 35),
    FieldSpec::literal("DAY", 1, 2),
    FieldSpec::literal("DESCRIPTIVE_TITLE", 1, 248),
    FieldSpec::literal("DIGIT", 1, 1),
    FieldSpec::literal("DUAL_STYLE_YEAR", 3, 7),
    FieldSpec::literal("ENTRY_RECORDING_DATE", 1, 90),
    FieldSpec::literal("EVENT_ATTRIBUTE_TYPE", 1, 15),
    FieldSpec::literal("EVENT_DESCRIPTOR", 1, 90),
    FieldSpec::literal("EVENT_OR_FACT_CLASSIFICATION", 1, 90),
    FieldSpec::literal("EVENT_TYPE_CITED_FROM", 1, 15),
    FieldSpec::literal("EVENT_TYPE_FAMILY", 3, 4),
    FieldSpec::literal("EVENT_TYPE_INDIVIDUAL", 3, 4),
    FieldSpec::literal("EVENTS_RECORDED", 1, 90),
    FieldSpec::literal("FILE_CREATION_DATE", 10, 11),
    FieldSpec::literal("GEDCOM_CONTENT_DESCRIPTION", 1, 248),
    FieldSpec::literal("GEDCOM_FILE_NAME", 5, 248),
    // LINEAGE-LINKED, the only form 5.5.5 defines, is 14 characters.
    FieldSpec::literal("GEDCOM_FORM", 14, 20),
    FieldSpec::literal("GEDCOM_VERSION_NUMBER", 3, 11),
    FieldSpec::literal("ID_NUMBER", 1, 30),
    FieldSpec::literal("LANGUAGE_ID", 1, 15),
    FieldSpec::literal("LANGUAGE_OF_TEXT", 1, 15),
    FieldSpec::literal("MONTH", 3, 3),
    FieldSpec::literal("MONTH_FREN", 4, 4),
    FieldSpec::literal("MONTH_HEBR", 3, 3),
    FieldSpec::literal("MULTIMEDIA_FILE_REFERENCE", 1, 259),
    FieldSpec::literal("MULTIMEDIA_FORMAT", 3, 4),
    FieldSpec::literal("NAME_OF_BUSINESS", 1, 90),
    FieldSpec::literal("NAME_OF_PRODUCT", 1, 90),
    FieldSpec::literal("NAME_OF_REPOSITORY", 1, 90),
    FieldSpec::literal("NAME_OF_SOURCE_DATA", 1, 90),
    FieldSpec::literal("NAME_PERSONAL", 1, 120),
    FieldSpec::literal("NAME_PHONETIC", 1, 120),
    FieldSpec::literal("NAME_PIECE", 1, 90),
    FieldSpec::literal("NAME_PIECE_GIVEN", 1, 120),
    FieldSpec::literal("NAME_PIECE_NICKNAME", 1, 30),
    FieldSpec::literal("NAME_PIECE_PREFIX", 1, 30),
    FieldSpec::literal("NAME_PIECE_SUFFIX", 1, 30),
    FieldSpec::literal("NAME_PIECE_SURNAME", 1, 120),
    FieldSpec::literal("NAME_PIECE_SURNAME_PREFIX", 1, 30),
    FieldSpec::literal("NAME_ROMANISED", 1, 120),
    FieldSpec::literal("NAME_TEXT", 1, 120),
    FieldSpec::literal("NAME_TYPE", 5, 30),
    FieldSpec::literal("NATIONAL_OR_TRIBAL_ORIGIN", 1, 120),
    FieldSpec::literal("NOBILITY_TYPE_TITLE", 1, 120),
    FieldSpec::literal("NUMBER", 3, 4),
    FieldSpec::literal("NUMBER_OF_RELATIONSHIPS", 1, 3),
    FieldSpec::literal("OCCUPATION", 1, 90),
    FieldSpec::literal("PEDIGREE_LINKAGE_TYPE", 5, 7),
    FieldSpec::literal("PHONE_NUMBER", 1, 25),
    FieldSpec::literal("PHONETISATION_METHOD", 5, 30),
    FieldSpec::literal("PHYSICAL_DESCRIPTION", 1, 4095),
    FieldSpec::literal("PLACE_LATITUDE", 2, 10),
    FieldSpec::literal("PLACE_LONGITUDE", 2, 11),
    FieldSpec::literal("PLACE_NAME", 1, 120),
    FieldSpec::literal("PLACE_PHONETIC", 1, 120),
    FieldSpec::literal("PLACE_ROMANISED", 1, 120),
    FieldSpec::literal("PLACE_TEXT", 1, 120),
    FieldSpec::literal("POSSESSIONS", 1, 248),
    FieldSpec::literal("PRODUCT_VERSION_NUMBER", 3, 15),
    FieldSpec::literal("PUBLICATION_DATE", 10, 11),
    FieldSpec::literal("RECEIVING_SYSTEM_NAME", 1, 20),
    FieldSpec::literal("RELATION_IS_DESCRIPTOR", 1, 25),
    FieldSpec::literal("RELIGIOUS_AFFILIATION", 1, 90),
    FieldSpec::literal("RESPONSIBLE_AGENCY", 1, 120),
    FieldSpec::literal("ROLE_DESCRIPTOR", 1, 25),
    FieldSpec::literal("ROLE_IN_EVENT", 3, 27),
    FieldSpec::literal("ROMANISATION_METHOD", 5, 30),
    FieldSpec::literal("SCHOLASTIC_ACHIEVEMENT", 1, 248),
    FieldSpec::literal("SEX_VALUE", 1, 1),
    FieldSpec::literal("SOURCE_CALL_NUMBER", 1, 120),
    FieldSpec::literal("SOURCE_DESCRIPTIVE_TITLE", 1, 4095),
    FieldSpec::literal("SOURCE_FILED_BY_ENTRY", 1, 60),
    FieldSpec::literal("SOURCE_JURISDICTION_PLACE", 1, 120),
    FieldSpec::literal("SOURCE_MEDIA_TYPE", 1, 15),
    FieldSpec::literal("SOURCE_ORIGINATOR", 1, 255),
    FieldSpec::literal("SOURCE_PUBLICATION_FACTS", 1, 4095),
    FieldSpec::literal("SUBMITTER_NAME", 1, 60),
    FieldSpec::literal("SYSTEM_ID", 1, 20),
    FieldSpec::literal("TEXT", 1, 32767),
    FieldSpec::literal("TEXT_FROM_SOURCE", 1, 32767),
    FieldSpec::literal("TIME_VALUE", 7, 12),
    FieldSpec::literal("USER_REFERENCE_NUMBER", 1, 20),
    FieldSpec::literal("USER_REFERENCE_TYPE", 1, 40),
    FieldSpec::literal("USER_TEXT", 1, 32767),
    FieldSpec::literal("WHERE_WITHIN_SOURCE", 1, 248),
    FieldSpec::xref("XREF_FAM"),
    FieldSpec::xref("XREF_INDI"),
    FieldSpec::xref("XREF_NOTE"),
    FieldSpec::xref("XREF_OBJE"),
    FieldSpec::xref("XREF_REPO"),
    FieldSpec::xref("XREF_SOUR"),
    FieldSpec::xref("XREF_SUBM"),
    FieldSpec::literal("Y", 1, 1),
    FieldSpec::literal("YEAR", 3, 4),
];

lazy_static! {
    static ref CATALOG_INDEX: IndexMap<&'static str, &'static FieldSpec> =
        FIELD_CATALOG.iter().map(|spec| (spec.name, spec)).collect();
}

/// Look up a primitive by name.
///
/// Returns `None` for names outside the catalog. Callers treat an unknown
/// field as unbounded.
///
/// # Examples
///
/// ```
/// use gedcom555::field_catalog::lookup;
///
/// let city = lookup("ADDRESS_CITY").unwrap();
/// assert_eq!((city.min_len, city.max_len), (1, 60));
/// assert!(lookup("NOT_A_FIELD").is_none());
/// ```
#[must_use]
pub fn lookup(name: &str) -> Option<&'static FieldSpec> {
    CATALOG_INDEX.get(name).copied()
}

/// Serde adapter storing an optional field binding by its primitive name.
pub(crate) mod by_name {
    use super::{lookup, FieldSpec};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(field: &Option<&'static FieldSpec>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match field {
            Some(spec) => serializer.serialize_some(spec.name),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<&'static FieldSpec>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name: Option<String> = Option::deserialize(deserializer)?;
        name.map(|name| {
            lookup(&name).ok_or_else(|| D::Error::custom(format!("unknown GEDCOM field {name}")))
        })
        .transpose()
    }
}
