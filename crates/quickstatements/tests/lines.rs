use chrono::NaiveDate;
use quickstatements::{
    BatchBuilder, ClaimLine, CreateLine, DataType, FormatError, Identifier, Line, Qualifier,
    Quantity, ReferenceBlock, ReferenceSnippet, Time, TimePrecision, Value,
};

fn id(s: &str) -> Identifier {
    Identifier::new(s).unwrap()
}

fn orcid_qualifier() -> Qualifier {
    Qualifier::new(
        id("S854"),
        Value::text("https://orcid.org/0000-0003-4423-4370").unwrap(),
    )
    .unwrap()
}

fn position_qualifier() -> Qualifier {
    Qualifier::new(id("P39"), id("Q1706722")).unwrap()
}

fn employment(start: Time) -> Line {
    ClaimLine::builder(id("Q47475003"), id("P108"), id("Q49121"))
        .qualifier(orcid_qualifier())
        .qualifier(Qualifier::start_time(start))
        .qualifier(position_qualifier())
        .build()
        .unwrap()
        .into()
}

#[test]
fn employment_line_with_day_precision() {
    let start = NaiveDate::from_ymd_opt(2021, 2, 15).unwrap();
    let line = employment(Time::from_date(start, TimePrecision::Day));
    assert_eq!(
        line.get_line().unwrap(),
        "Q47475003|P108|Q49121|S854|\"https://orcid.org/0000-0003-4423-4370\"|\
         P580|+2021-02-15T00:00:00Z/11|P39|Q1706722"
    );
}

#[test]
fn employment_line_with_month_precision() {
    let start = NaiveDate::from_ymd_opt(2021, 2, 1).unwrap();
    let line = employment(Time::from_date(start, TimePrecision::Month));
    assert_eq!(
        line.get_line().unwrap(),
        "Q47475003|P108|Q49121|S854|\"https://orcid.org/0000-0003-4423-4370\"|\
         P580|+2021-02-01T00:00:00Z/10|P39|Q1706722"
    );
}

#[test]
fn text_claim() {
    let line: Line = ClaimLine::new(id("Q47475003"), id("P1449"), Value::text("Charlie").unwrap())
        .unwrap()
        .into();
    assert_eq!(line.get_line().unwrap(), r#"Q47475003|P1449|"Charlie""#);
}

#[test]
fn qualifier_order_is_significant() {
    let start = Time::new(2021, 2, 15, TimePrecision::Day).unwrap();
    let forward: Line = ClaimLine::builder(id("Q1"), id("P108"), id("Q2"))
        .qualifiers([orcid_qualifier(), Qualifier::start_time(start), position_qualifier()])
        .build()
        .unwrap()
        .into();
    let reversed: Line = ClaimLine::builder(id("Q1"), id("P108"), id("Q2"))
        .qualifiers([position_qualifier(), Qualifier::start_time(start), orcid_qualifier()])
        .build()
        .unwrap()
        .into();

    let forward = forward.get_line().unwrap();
    let reversed = reversed.get_line().unwrap();
    assert_ne!(forward, reversed);
    assert!(forward.find("S854").unwrap() < forward.find("P580").unwrap());
    assert!(forward.find("P580").unwrap() < forward.find("P39").unwrap());
    assert!(reversed.find("P39").unwrap() < reversed.find("S854").unwrap());
}

#[test]
fn encoding_is_idempotent() {
    let line = employment(Time::new(2021, 2, 15, TimePrecision::Day).unwrap());
    assert_eq!(line.get_line().unwrap(), line.get_line().unwrap());
}

#[test]
fn newline_in_text_fails_without_output() {
    assert_eq!(Value::text("first\nsecond"), Err(FormatError::RawNewline));
    assert!(matches!(
        ClaimLine::label(id("Q1"), "en", "first\nsecond"),
        Err(quickstatements::ConstructionError::Format(FormatError::RawNewline))
    ));
}

#[test]
fn every_value_kind_in_one_line() {
    let line: Line = ClaimLine::builder(id("Q64"), id("P625"), Value::coordinate(52.52, 13.405, 0.001).unwrap())
        .qualifier(Qualifier::new(id("P1082"), Quantity::new(3_645_000.0).unwrap().with_unit(id("Q11573"))).unwrap())
        .qualifier(Qualifier::new(id("P1448"), Value::monolingual("de", "Berlin").unwrap()).unwrap())
        .qualifier(Qualifier::new(id("P585"), Time::from_year(2019)).unwrap())
        .reference(
            ReferenceBlock::new([
                ReferenceSnippet::reference_url("https://example.org/berlin").unwrap(),
                ReferenceSnippet::retrieved(Time::new(2024, 3, 1, TimePrecision::Day).unwrap()),
            ])
            .unwrap(),
        )
        .build()
        .unwrap()
        .into();
    assert_eq!(
        line.get_line().unwrap(),
        "Q64|P625|@52.520/13.405|P1082|+3645000U11573|P1448|de:\"Berlin\"|\
         P585|+2019-01-01T00:00:00Z/9|!S854|\"https://example.org/berlin\"|\
         S813|+2024-03-01T00:00:00Z/11"
    );
}

#[test]
fn batch_preserves_order_and_count() {
    let batch = BatchBuilder::new("new researcher")
        .create_item()
        .try_line(ClaimLine::label(Identifier::last(), "en", "Jane Doe"))
        .claim(Identifier::last(), id("P31"), id("Q5"), |c| c)
        .line(CreateLine::Property(DataType::ExternalId))
        .claim(Identifier::last(), id("P31"), id("Q19847637"), |c| c)
        .build()
        .unwrap();

    let payload = batch.compose().unwrap();
    let records: Vec<&str> = payload.split('\n').collect();
    assert_eq!(
        records,
        [
            "CREATE",
            "LAST|Len|\"Jane Doe\"",
            "LAST|P31|Q5",
            "external-id,CREATE",
            "LAST|P31|Q19847637",
        ]
    );
    assert_eq!(quickstatements::compose(batch.lines(), batch.name()).unwrap(), payload);
}

#[test]
fn duplicate_lines_are_kept() {
    let claim = ClaimLine::new(id("Q1"), id("P31"), id("Q5")).unwrap();
    let batch = BatchBuilder::new("dupes")
        .line(claim.clone())
        .line(claim)
        .build()
        .unwrap();
    assert_eq!(batch.compose().unwrap(), "Q1|P31|Q5\nQ1|P31|Q5");
}
