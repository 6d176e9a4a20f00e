//! Value types for QuickStatements claims, qualifiers, and references.
//!
//! Every value kind validates its payload at construction, so a [`Value`]
//! that exists can always be rendered as a line-format token.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::error::{ConstructionError, FormatError};
use crate::model::Identifier;
use crate::util::datetime::{parse_timestamp, validate_calendar};

/// Property datatypes understood by the target knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    WikibaseItem,
    WikibaseProperty,
    WikibaseLexeme,
    WikibaseForm,
    WikibaseSense,
    String,
    MonolingualText,
    ExternalId,
    Url,
    CommonsMedia,
    Math,
    GeoShape,
    TabularData,
    MusicalNotation,
    EntitySchema,
    Quantity,
    Time,
    GlobeCoordinate,
}

const ALL_DATA_TYPES: [DataType; 18] = [
    DataType::WikibaseItem,
    DataType::WikibaseProperty,
    DataType::WikibaseLexeme,
    DataType::WikibaseForm,
    DataType::WikibaseSense,
    DataType::String,
    DataType::MonolingualText,
    DataType::ExternalId,
    DataType::Url,
    DataType::CommonsMedia,
    DataType::Math,
    DataType::GeoShape,
    DataType::TabularData,
    DataType::MusicalNotation,
    DataType::EntitySchema,
    DataType::Quantity,
    DataType::Time,
    DataType::GlobeCoordinate,
];

lazy_static! {
    static ref DATA_TYPES_BY_TAG: FxHashMap<&'static str, DataType> =
        ALL_DATA_TYPES.iter().map(|dt| (dt.tag(), *dt)).collect();
}

impl DataType {
    /// Returns the datatype tag as written in a property creation line.
    pub fn tag(self) -> &'static str {
        match self {
            DataType::WikibaseItem => "wikibase-item",
            DataType::WikibaseProperty => "wikibase-property",
            DataType::WikibaseLexeme => "wikibase-lexeme",
            DataType::WikibaseForm => "wikibase-form",
            DataType::WikibaseSense => "wikibase-sense",
            DataType::String => "string",
            DataType::MonolingualText => "monolingualtext",
            DataType::ExternalId => "external-id",
            DataType::Url => "url",
            DataType::CommonsMedia => "commonsMedia",
            DataType::Math => "math",
            DataType::GeoShape => "geo-shape",
            DataType::TabularData => "tabular-data",
            DataType::MusicalNotation => "musical-notation",
            DataType::EntitySchema => "entity-schema",
            DataType::Quantity => "quantity",
            DataType::Time => "time",
            DataType::GlobeCoordinate => "globe-coordinate",
        }
    }

    /// Looks up a datatype by its tag.
    pub fn from_tag(tag: &str) -> Option<DataType> {
        DATA_TYPES_BY_TAG.get(tag).copied()
    }

    /// Returns whether a value of this kind conventionally fits the datatype.
    pub fn accepts(self, value: &Value) -> bool {
        match value {
            Value::Entity(_) => matches!(
                self,
                DataType::WikibaseItem
                    | DataType::WikibaseProperty
                    | DataType::WikibaseLexeme
                    | DataType::WikibaseForm
                    | DataType::WikibaseSense
            ),
            Value::Text(_) => matches!(
                self,
                DataType::String
                    | DataType::ExternalId
                    | DataType::Url
                    | DataType::CommonsMedia
                    | DataType::Math
                    | DataType::GeoShape
                    | DataType::TabularData
                    | DataType::MusicalNotation
                    | DataType::EntitySchema
            ),
            Value::MonolingualText(_) => self == DataType::MonolingualText,
            Value::Quantity(_) => self == DataType::Quantity,
            Value::Time(_) => self == DataType::Time,
            Value::GlobeCoordinate(_) => self == DataType::GlobeCoordinate,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DataType {
    type Err = ConstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataType::from_tag(s).ok_or_else(|| ConstructionError::UnknownDataType { tag: s.to_string() })
    }
}

/// Date/time precision levels with their fixed numeric codes.
///
/// The codes are part of the wire format and must not be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TimePrecision {
    BillionYears = 0,
    HundredMillionYears = 1,
    TenMillionYears = 2,
    MillionYears = 3,
    HundredThousandYears = 4,
    TenThousandYears = 5,
    Millennium = 6,
    Century = 7,
    Decade = 8,
    Year = 9,
    Month = 10,
    Day = 11,
    Hour = 12,
    Minute = 13,
    Second = 14,
}

impl TimePrecision {
    /// Returns the numeric precision code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Creates a precision from its numeric code.
    pub fn from_code(code: u8) -> Result<TimePrecision, FormatError> {
        match code {
            0 => Ok(TimePrecision::BillionYears),
            1 => Ok(TimePrecision::HundredMillionYears),
            2 => Ok(TimePrecision::TenMillionYears),
            3 => Ok(TimePrecision::MillionYears),
            4 => Ok(TimePrecision::HundredThousandYears),
            5 => Ok(TimePrecision::TenThousandYears),
            6 => Ok(TimePrecision::Millennium),
            7 => Ok(TimePrecision::Century),
            8 => Ok(TimePrecision::Decade),
            9 => Ok(TimePrecision::Year),
            10 => Ok(TimePrecision::Month),
            11 => Ok(TimePrecision::Day),
            12 => Ok(TimePrecision::Hour),
            13 => Ok(TimePrecision::Minute),
            14 => Ok(TimePrecision::Second),
            _ => Err(FormatError::InvalidPrecision { code }),
        }
    }
}

impl TryFrom<u8> for TimePrecision {
    type Error = FormatError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        TimePrecision::from_code(code)
    }
}

/// Rejects characters the line format cannot carry inside a quoted string.
pub(crate) fn validate_text(value: &str) -> Result<(), FormatError> {
    for c in value.chars() {
        match c {
            '\n' | '\r' => return Err(FormatError::RawNewline),
            '|' | '\t' => {
                return Err(FormatError::ReservedCharacter {
                    context: "text",
                    char: c,
                });
            }
            _ => {}
        }
    }
    Ok(())
}

/// Checks the shape of a Wikimedia language code (`en`, `zh-hans`, `be-tarask`).
pub(crate) fn validate_language(code: &str) -> Result<(), FormatError> {
    let starts_with_letter = code.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    let well_formed = code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    if starts_with_letter && well_formed && !code.ends_with('-') {
        Ok(())
    } else {
        Err(FormatError::InvalidLanguage {
            code: code.to_string(),
        })
    }
}

/// A plain string literal without a language tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Text(String);

impl Text {
    /// Creates a text literal. Fails on raw line breaks and reserved separators.
    pub fn new(value: impl Into<String>) -> Result<Self, FormatError> {
        let value = value.into();
        validate_text(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A string literal tagged with a language code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MonolingualText {
    language: String,
    text: Text,
}

impl MonolingualText {
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Result<Self, FormatError> {
        let language = language.into();
        validate_language(&language)?;
        Ok(Self {
            language,
            text: Text::new(text)?,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }
}

/// A numeric amount with optional tolerance and unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    amount: f64,
    tolerance: Option<f64>,
    unit: Option<Identifier>,
}

impl Quantity {
    /// Creates a unitless quantity. Fails on NaN and infinities.
    pub fn new(amount: f64) -> Result<Self, FormatError> {
        if !amount.is_finite() {
            return Err(FormatError::NonFiniteNumber { field: "amount" });
        }
        Ok(Self {
            // Folds -0.0 into +0.0 so zero always renders as `+0`.
            amount: amount + 0.0,
            tolerance: None,
            unit: None,
        })
    }

    /// Attaches a unit item.
    pub fn with_unit(mut self, unit: Identifier) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Attaches a symmetric tolerance (`amount ± tolerance`).
    pub fn with_tolerance(mut self, tolerance: f64) -> Result<Self, FormatError> {
        if !tolerance.is_finite() {
            return Err(FormatError::NonFiniteNumber { field: "tolerance" });
        }
        if tolerance < 0.0 {
            return Err(FormatError::NegativeTolerance { tolerance });
        }
        self.tolerance = Some(tolerance + 0.0);
        Ok(self)
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn tolerance(&self) -> Option<f64> {
        self.tolerance
    }

    pub fn unit(&self) -> Option<&Identifier> {
        self.unit.as_ref()
    }
}

/// A point in time at a declared precision.
///
/// Fields finer than the precision are normalized at construction: month and
/// day become 1 and the time of day becomes midnight, so two values that
/// render identically also compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Time {
    year: i64,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    precision: TimePrecision,
}

impl Time {
    /// Creates a date at midnight.
    ///
    /// Month and day are ignored (and may be 0) when the precision is
    /// coarser than them.
    pub fn new(year: i64, month: u32, day: u32, precision: TimePrecision) -> Result<Self, FormatError> {
        Self::from_parts(year, month, day, 0, 0, 0, precision)
    }

    /// Creates a year-precision value.
    pub fn from_year(year: i64) -> Self {
        Self {
            year,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            precision: TimePrecision::Year,
        }
    }

    /// Creates a value from every calendar field.
    pub fn from_parts(
        year: i64,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        precision: TimePrecision,
    ) -> Result<Self, FormatError> {
        let time = Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            precision,
        }
        .truncated();
        validate_calendar(time.year, time.month, time.day, time.hour, time.minute, time.second)?;
        Ok(time)
    }

    /// Creates a value from a calendar date.
    pub fn from_date(date: NaiveDate, precision: TimePrecision) -> Self {
        Self {
            year: i64::from(date.year()),
            month: date.month(),
            day: date.day(),
            hour: 0,
            minute: 0,
            second: 0,
            precision,
        }
        .truncated()
    }

    /// Creates a value from a date and time of day (UTC).
    pub fn from_datetime(datetime: NaiveDateTime, precision: TimePrecision) -> Self {
        Self {
            year: i64::from(datetime.year()),
            month: datetime.month(),
            day: datetime.day(),
            hour: datetime.hour(),
            minute: datetime.minute(),
            // Leap seconds are folded into :59.
            second: datetime.second().min(59),
            precision,
        }
        .truncated()
    }

    fn truncated(mut self) -> Self {
        if self.precision < TimePrecision::Month {
            self.month = 1;
        }
        if self.precision < TimePrecision::Day {
            self.day = 1;
        }
        if self.precision < TimePrecision::Hour {
            self.hour = 0;
        }
        if self.precision < TimePrecision::Minute {
            self.minute = 0;
        }
        if self.precision < TimePrecision::Second {
            self.second = 0;
        }
        self
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Returns `(hour, minute, second)`.
    pub fn time_of_day(&self) -> (u32, u32, u32) {
        (self.hour, self.minute, self.second)
    }

    pub fn precision(&self) -> TimePrecision {
        self.precision
    }
}

impl FromStr for Time {
    type Err = FormatError;

    /// Parses a `+YYYY-MM-DDTHH:MM:SSZ/P` token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = parse_timestamp(s)?;
        let precision = TimePrecision::from_code(parsed.precision)?;
        Time::from_parts(
            parsed.year,
            parsed.month,
            parsed.day,
            parsed.hour,
            parsed.minute,
            parsed.second,
            precision,
        )
    }
}

/// Upper bound on rendered coordinate decimals.
pub const MAX_COORDINATE_DECIMALS: usize = 12;

/// A WGS84 coordinate with a precision in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeCoordinate {
    latitude: f64,
    longitude: f64,
    precision: f64,
}

impl GlobeCoordinate {
    pub fn new(latitude: f64, longitude: f64, precision: f64) -> Result<Self, FormatError> {
        if !latitude.is_finite() {
            return Err(FormatError::NonFiniteNumber { field: "latitude" });
        }
        if !longitude.is_finite() {
            return Err(FormatError::NonFiniteNumber { field: "longitude" });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(FormatError::LatitudeOutOfRange { lat: latitude });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(FormatError::LongitudeOutOfRange { lon: longitude });
        }
        if !precision.is_finite() || precision <= 0.0 {
            return Err(FormatError::InvalidCoordinatePrecision { precision });
        }
        Ok(Self {
            latitude,
            longitude,
            precision,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// Number of decimal places implied by the precision (0.0001° -> 4).
    pub fn decimal_places(&self) -> usize {
        // The epsilon keeps exact powers of ten from rounding up a place.
        let places = (-self.precision.log10() - 1e-9).ceil();
        places.clamp(0.0, MAX_COORDINATE_DECIMALS as f64) as usize
    }
}

/// A typed value that can be the target of a claim, qualifier, or reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Reference to an item, property, or the `LAST` sentinel.
    Entity(Identifier),
    /// Quoted string literal.
    Text(Text),
    /// Quoted string literal with a language code.
    MonolingualText(MonolingualText),
    /// Signed decimal amount.
    Quantity(Quantity),
    /// Point in time with precision.
    Time(Time),
    /// Latitude/longitude pair.
    GlobeCoordinate(GlobeCoordinate),
}

impl Value {
    pub fn entity(id: Identifier) -> Self {
        Value::Entity(id)
    }

    pub fn text(value: impl Into<String>) -> Result<Self, FormatError> {
        Text::new(value).map(Value::Text)
    }

    pub fn monolingual(
        language: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, FormatError> {
        MonolingualText::new(language, text).map(Value::MonolingualText)
    }

    pub fn quantity(amount: f64) -> Result<Self, FormatError> {
        Quantity::new(amount).map(Value::Quantity)
    }

    pub fn coordinate(latitude: f64, longitude: f64, precision: f64) -> Result<Self, FormatError> {
        GlobeCoordinate::new(latitude, longitude, precision).map(Value::GlobeCoordinate)
    }

    /// Returns the datatype this value naturally belongs to.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Entity(_) => DataType::WikibaseItem,
            Value::Text(_) => DataType::String,
            Value::MonolingualText(_) => DataType::MonolingualText,
            Value::Quantity(_) => DataType::Quantity,
            Value::Time(_) => DataType::Time,
            Value::GlobeCoordinate(_) => DataType::GlobeCoordinate,
        }
    }

    /// Renders this value as a line-format token.
    pub fn encode(&self) -> Result<String, FormatError> {
        crate::codec::encode_value(self)
    }
}

impl From<Identifier> for Value {
    fn from(id: Identifier) -> Self {
        Value::Entity(id)
    }
}

impl From<Text> for Value {
    fn from(text: Text) -> Self {
        Value::Text(text)
    }
}

impl From<MonolingualText> for Value {
    fn from(text: MonolingualText) -> Self {
        Value::MonolingualText(text)
    }
}

impl From<Quantity> for Value {
    fn from(quantity: Quantity) -> Self {
        Value::Quantity(quantity)
    }
}

impl From<Time> for Value {
    fn from(time: Time) -> Self {
        Value::Time(time)
    }
}

impl From<GlobeCoordinate> for Value {
    fn from(coordinate: GlobeCoordinate) -> Self {
        Value::GlobeCoordinate(coordinate)
    }
}
