//! Common test helpers shared across the integration tests.

#![allow(dead_code)]

use gedcom555::date::{DatePoint, DateValue};
use gedcom555::{Document, NodeBuilder};
use std::path::PathBuf;

/// Path of a file under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("data").join(name)
}

/// Contents of a fixture file.
pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).unwrap()
}

/// Header, one submitter and the trailer; nothing else.
pub fn minimal_document() -> Document {
    Document::builder()
        .header(|head| head.text("SOUR", "gedcom.org"))
        .submitter(NodeBuilder::submitter("U", "gedcom.org"))
        .build()
        .unwrap()
}

fn day(year: i32, month: u32, day: u32) -> String {
    DateValue::Date(DatePoint::day(year, month, day).unwrap()).into()
}

fn name(full: &str, surname: &str, given: &str) -> impl FnOnce(NodeBuilder) -> NodeBuilder {
    let (full, surname, given) = (full.to_string(), surname.to_string(), given.to_string());
    move |name| name.value(full).text("SURN", surname).text("GIVN", given)
}

/// Three individuals in two families with a source and a repository.
#[allow(clippy::too_many_lines)]
pub fn sample_document() -> Document {
    let robert = NodeBuilder::individual("I1")
        .with("NAME", name("Robert Eugene /Williams/", "Williams", "Robert Eugene"))
        .text("SEX", "M")
        .with("BIRT", |birth| {
            birth
                .text("DATE", day(1822, 10, 2))
                .text("PLAC", "Weston, Madison, Connecticut, United States of America")
                .with("SOUR", |citation| citation.reference("S1").text("PAGE", "Sec. 2, p. 45"))
        })
        .with("DEAT", |death| {
            death
                .text("DATE", day(1905, 4, 14))
                .text("PLAC", "Stamford, Fairfield, Connecticut, United States of America")
        })
        .with("BURI", |burial| {
            burial.text(
                "PLAC",
                "Spring Hill Cemetery, Stamford, Fairfield, Connecticut, United States of America",
            )
        })
        .pointer("FAMS", "F1")
        .pointer("FAMS", "F2")
        .with("RESI", |residence| {
            residence.text(
                "DATE",
                DateValue::FromTo(DatePoint::year(1900), DatePoint::year(1905)),
            )
        });

    let mary = NodeBuilder::individual("I2")
        .with("NAME", name("Mary Ann /Wilson/", "Wilson", "Mary Ann"))
        .text("SEX", "F")
        .with("BIRT", |birth| {
            birth
                .text("DATE", DateValue::Before(DatePoint::year(1828)))
                .text("PLAC", "Connecticut, United States of America")
        })
        .pointer("FAMS", "F1");

    let joe = NodeBuilder::individual("I3")
        .with("NAME", name("Joe /Williams/", "Williams", "Joe"))
        .text("SEX", "M")
        .with("BIRT", |birth| {
            birth
                .text("DATE", day(1861, 6, 11))
                .text("PLAC", "Idaho Falls, Bonneville, Idaho, United States of America")
        })
        .pointer("FAMC", "F1")
        .with("FAMC", |link| link.reference("F2").text("PEDI", "adopted"))
        .with("ADOP", |adoption| adoption.text("DATE", day(1864, 3, 16)));

    let first_marriage = NodeBuilder::family("F1")
        .pointer("HUSB", "I1")
        .pointer("WIFE", "I2")
        .pointer("CHIL", "I3")
        .with("MARR", |marriage| {
            marriage
                .text("DATE", DateValue::Date(DatePoint::month(1859, 12).unwrap()))
                .text("PLAC", "Rapid City, Pennington, South Dakota, United States of America")
        });

    let second_marriage = NodeBuilder::family("F2").pointer("HUSB", "I1").pointer("CHIL", "I3");

    let madison_records = NodeBuilder::source("S1")
        .with("DATA", |data| {
            data.with("EVEN", |events| {
                events
                    .value("BIRT, DEAT, MARR")
                    .text(
                        "DATE",
                        DateValue::FromTo(
                            DatePoint::month(1820, 1).unwrap(),
                            DatePoint::month(1825, 12).unwrap(),
                        ),
                    )
                    .text("PLAC", "Madison, Connecticut, United States of America")
            })
            .text("AGNC", "Madison County Court")
        })
        .text("TITL", "Madison County Birth, Death, and Marriage Records")
        .text("ABBR", "Madison BMD Records")
        .with("REPO", |repo| {
            repo.reference("R1")
                .with("CALN", |call| call.value("13B-1234.01").text("MEDI", "Microfilm"))
        });

    let library = NodeBuilder::repository("R1")
        .text("NAME", "Family History Library")
        .with("ADDR", |addr| {
            addr.text("ADR1", "35 N West Temple Street")
                .text("CITY", "Salt Lake City")
                .text("STAE", "Utah")
                .text("POST", "84150")
                .text("CTRY", "United States of America")
        });

    let submitter = NodeBuilder::submitter("U1", "Reldon Poulson")
        .with("ADDR", |addr| {
            addr.text("ADR1", "1900 43rd Street West")
                .text("CITY", "Billings")
                .text("STAE", "Montana")
                .text("POST", "68051")
                .text("CTRY", "United States of America")
        })
        .text("PHON", "+1 (406) 555-1232");

    Document::builder()
        .header(|head| {
            head.with("SOUR", |system| {
                system
                    .value("GS")
                    .text("NAME", "GEDCOM Specification")
                    .text("VERS", "5.5.5")
                    .with("CORP", |corp| {
                        corp.value("gedcom.org")
                            .with("ADDR", |addr| addr.text("CITY", "LEIDEN"))
                            .text("WWW", "www.gedcom.org")
                    })
            })
            .with("DATE", |date| date.value("2 Oct 2019").text("TIME", "0:00:00"))
            .text("FILE", "555Sample.ged")
            .text("LANG", "English")
            .pointer("SUBM", "U1")
        })
        .submitter(submitter)
        .records([robert, mary, joe, first_marriage, second_marriage, madison_records, library])
        .build()
        .unwrap()
}
