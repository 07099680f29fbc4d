// Record Store - immutable campaign collection
// Loads JSON/CSV sources and coerces numeric fields at the boundary

use crate::error::DataFormatError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Bundled sample dataset (used when no data source is configured)
pub const SAMPLE_DATA: &str = include_str!("../data/games.json");

/// One crowdfunding campaign.
/// Value object: no identity field, compared by content, never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignRecord {
    pub name: String,
    pub description: String,

    #[serde(rename = "img")]
    pub image_ref: String,

    pub goal: f64,
    pub pledged: f64,
    pub backers: u64,
}

impl CampaignRecord {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        image_ref: impl Into<String>,
        goal: f64,
        pledged: f64,
        backers: u64,
    ) -> Self {
        CampaignRecord {
            name: name.into(),
            description: description.into(),
            image_ref: image_ref.into(),
            goal,
            pledged,
            backers,
        }
    }

    /// Funded iff the pledged amount meets or exceeds the goal
    pub fn is_funded(&self) -> bool {
        self.pledged >= self.goal
    }
}

// ============================================================================
// NUMERIC COERCION
// ============================================================================

/// Coerce a loosely-typed value to a number, the way `Number(x)` does in a
/// browser. Anything that would come out as NaN is returned as `0`.
pub fn to_number(value: &Value) -> f64 {
    try_number(value).unwrap_or(0.0)
}

/// Coerce a value to a non-negative whole count (backers).
/// Fractions truncate toward zero; negative or non-finite values become `0`.
pub fn to_count(value: &Value) -> u64 {
    count_from(to_number(value)).unwrap_or(0)
}

/// `None` means the value is not numeric (NaN after coercion).
fn try_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_str(s),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::Array(_) | Value::Object(_) => None,
    };
    n.filter(|n| !n.is_nan())
}

fn parse_numeric_str(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => 16,
        Some("0o") | Some("0O") => 8,
        Some("0b") | Some("0B") => 2,
        _ => 10,
    };

    if radix != 10 {
        let digits = &s[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }
        return u128::from_str_radix(digits, radix).ok().map(|n| n as f64);
    }

    let unsigned = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
    if unsigned == "Infinity" {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    // str::parse also takes "inf"/"nan" spellings, which are not numbers here
    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }

    s.parse::<f64>().ok()
}

fn count_from(n: f64) -> Option<u64> {
    if n.is_finite() && n >= 0.0 {
        Some(n.trunc() as u64)
    } else {
        None
    }
}

fn coerce_number(value: &Value, index: usize, field: &'static str) -> f64 {
    match try_number(value) {
        Some(n) => n,
        None => {
            warn!(index, field, value = %value, "non-numeric value coerced to 0");
            0.0
        }
    }
}

fn coerce_count(value: &Value, index: usize, field: &'static str) -> u64 {
    let n = coerce_number(value, index, field);
    match count_from(n) {
        Some(count) => count,
        None => {
            warn!(index, field, value = n, "count out of range, coerced to 0");
            0
        }
    }
}

/// Render any value as text, the way `String(x)` does in a browser
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => number_text(f),
            _ => n.to_string(),
        },
        // Array elements join with commas; null renders as empty
        Value::Array(items) => items
            .iter()
            .map(|item| if item.is_null() { String::new() } else { to_text(item) })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_text(f: f64) -> String {
    if f == 0.0 {
        // -0 prints as 0
        "0".to_string()
    } else if f.fract() == 0.0 && f.abs() < 1e21 {
        format!("{:.0}", f)
    } else {
        f.to_string()
    }
}

fn coerce_text(value: Value, index: usize, field: &'static str) -> String {
    match value {
        Value::String(s) => s,
        other => {
            warn!(index, field, value = %other, "non-string value rendered as text");
            to_text(&other)
        }
    }
}

// ============================================================================
// RAW SOURCE SHAPES
// ============================================================================

/// Record as it appears in the JSON source, before coercion
#[derive(Debug, Deserialize)]
struct RawRecord {
    name: Value,
    description: Value,

    #[serde(alias = "imageRef", alias = "image_ref")]
    img: Value,

    goal: Value,
    pledged: Value,
    backers: Value,
}

impl RawRecord {
    fn into_record(self, index: usize) -> CampaignRecord {
        CampaignRecord {
            goal: coerce_number(&self.goal, index, "goal"),
            pledged: coerce_number(&self.pledged, index, "pledged"),
            backers: coerce_count(&self.backers, index, "backers"),
            name: coerce_text(self.name, index, "name"),
            description: coerce_text(self.description, index, "description"),
            image_ref: coerce_text(self.img, index, "img"),
        }
    }
}

/// CSV row: every cell arrives as text and goes through the same coercion
#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    description: String,

    #[serde(alias = "imageRef", alias = "image_ref")]
    img: String,

    goal: String,
    pledged: String,
    backers: String,
}

impl From<CsvRow> for RawRecord {
    fn from(row: CsvRow) -> Self {
        RawRecord {
            name: Value::String(row.name),
            description: Value::String(row.description),
            img: Value::String(row.img),
            goal: Value::String(row.goal),
            pledged: Value::String(row.pledged),
            backers: Value::String(row.backers),
        }
    }
}

// ============================================================================
// RECORD STORE
// ============================================================================

/// Read-only, insertion-ordered collection of campaign records.
/// Nothing hands out `&mut` access, so records and their order are fixed at load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    records: Vec<CampaignRecord>,
}

impl RecordStore {
    pub fn from_records(records: Vec<CampaignRecord>) -> Self {
        info!(count = records.len(), "loaded campaign records");
        RecordStore { records }
    }

    /// The bundled 11-record dataset
    pub fn sample() -> Result<Self, DataFormatError> {
        Self::from_json_str(SAMPLE_DATA)
    }

    /// Parse a JSON array of record objects
    pub fn from_json_str(source: &str) -> Result<Self, DataFormatError> {
        let parsed: Value = serde_json::from_str(source)?;
        match parsed {
            Value::Array(values) => Self::from_values(values),
            _ => Err(DataFormatError::NotAnArray),
        }
    }

    /// Build from already-parsed values (each must be an object with the six fields)
    pub fn from_values(values: Vec<Value>) -> Result<Self, DataFormatError> {
        let records = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                if !value.is_object() {
                    return Err(DataFormatError::NotAnObject { index });
                }
                let raw: RawRecord = serde_json::from_value(value)
                    .map_err(|source| DataFormatError::InvalidRecord { index, source })?;
                Ok(raw.into_record(index))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_records(records))
    }

    pub fn from_json_path(path: &Path) -> Result<Self, DataFormatError> {
        let source = std::fs::read_to_string(path).map_err(|source| DataFormatError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&source)
    }

    /// CSV with a header row naming the six fields
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, DataFormatError> {
        let mut rdr = csv::Reader::from_reader(reader);

        let mut records = Vec::new();
        for (index, result) in rdr.deserialize::<CsvRow>().enumerate() {
            let row = result?;
            records.push(RawRecord::from(row).into_record(index));
        }

        Ok(Self::from_records(records))
    }

    pub fn from_csv_path(path: &Path) -> Result<Self, DataFormatError> {
        let file = std::fs::File::open(path).map_err(|source| DataFormatError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_csv_reader(file)
    }

    /// Pick the loader from the file extension
    pub fn from_path(path: &Path) -> Result<Self, DataFormatError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        debug!(path = %path.display(), "loading campaign data");

        match ext.as_deref() {
            Some("json") => Self::from_json_path(path),
            Some("csv") => Self::from_csv_path(path),
            _ => Err(DataFormatError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn records(&self) -> &[CampaignRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    type Fields = BTreeMap<String, String>;

    /// Collects the fields of every `warn` event
    #[derive(Clone, Default)]
    struct WarnCapture {
        events: Arc<Mutex<Vec<Fields>>>,
    }

    struct FieldVisitor<'a>(&'a mut Fields);

    impl Visit for FieldVisitor<'_> {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_string(), value.to_string());
        }

        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            self.0.insert(field.name().to_string(), format!("{:?}", value));
        }
    }

    impl<S: tracing::Subscriber> Layer<S> for WarnCapture {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() != tracing::Level::WARN {
                return;
            }
            let mut fields = Fields::new();
            event.record(&mut FieldVisitor(&mut fields));
            self.events.lock().unwrap().push(fields);
        }
    }

    fn load_capturing_warnings(source: &str) -> (RecordStore, Vec<Fields>) {
        let capture = WarnCapture::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        let store = tracing::subscriber::with_default(subscriber, || {
            RecordStore::from_json_str(source).unwrap()
        });
        let events = capture.events.lock().unwrap().clone();
        (store, events)
    }

    #[test]
    fn test_to_number_passes_numbers_through() {
        assert_eq!(to_number(&json!(42)), 42.0);
        assert_eq!(to_number(&json!(12.5)), 12.5);
        assert_eq!(to_number(&json!(-3)), -3.0);
    }

    #[test]
    fn test_to_number_parses_numeric_strings() {
        assert_eq!(to_number(&json!("1500")), 1500.0);
        assert_eq!(to_number(&json!("  20.25 ")), 20.25);
        assert_eq!(to_number(&json!("1e3")), 1000.0);
        assert_eq!(to_number(&json!(".5")), 0.5);
        assert_eq!(to_number(&json!("+7")), 7.0);
        assert_eq!(to_number(&json!("0x1A")), 26.0);
        assert_eq!(to_number(&json!("0b101")), 5.0);
        assert_eq!(to_number(&json!("0o17")), 15.0);
    }

    #[test]
    fn test_to_number_empty_and_null_are_zero() {
        assert_eq!(to_number(&json!("")), 0.0);
        assert_eq!(to_number(&json!("   ")), 0.0);
        assert_eq!(to_number(&Value::Null), 0.0);
        assert_eq!(to_number(&json!(false)), 0.0);
        assert_eq!(to_number(&json!(true)), 1.0);
    }

    #[test]
    fn test_to_number_non_numeric_falls_back_to_zero() {
        assert_eq!(to_number(&json!("twelve")), 0.0);
        assert_eq!(to_number(&json!("12abc")), 0.0);
        assert_eq!(to_number(&json!("1,208")), 0.0);
        assert_eq!(to_number(&json!("NaN")), 0.0);
        assert_eq!(to_number(&json!("inf")), 0.0);
        assert_eq!(to_number(&json!("0x")), 0.0);
        assert_eq!(to_number(&json!({"a": 1})), 0.0);
    }

    #[test]
    fn test_to_number_infinity_spelling() {
        assert_eq!(to_number(&json!("Infinity")), f64::INFINITY);
        assert_eq!(to_number(&json!("-Infinity")), f64::NEG_INFINITY);
        assert_eq!(to_number(&json!("infinity")), 0.0);
    }

    #[test]
    fn test_to_count_truncates_and_clamps() {
        assert_eq!(to_count(&json!("1021")), 1021);
        assert_eq!(to_count(&json!(12.9)), 12);
        assert_eq!(to_count(&json!(-4)), 0);
        assert_eq!(to_count(&json!("Infinity")), 0);
        assert_eq!(to_count(&json!("lots")), 0);
    }

    #[test]
    fn test_from_json_str_coerces_string_fields() {
        let source = r#"[
            {"name": "A", "description": "d", "img": "a.png",
             "goal": "1000", "pledged": "250.5", "backers": "7"}
        ]"#;

        let store = RecordStore::from_json_str(source).unwrap();
        let record = &store.records()[0];

        assert_eq!(record.goal, 1000.0);
        assert_eq!(record.pledged, 250.5);
        assert_eq!(record.backers, 7);
        assert_eq!(record.image_ref, "a.png");
    }

    #[test]
    fn test_from_json_str_bad_numbers_do_not_fail() {
        let source = r#"[
            {"name": "A", "description": "d", "img": "a.png",
             "goal": "lots", "pledged": null, "backers": "?"}
        ]"#;

        let store = RecordStore::from_json_str(source).unwrap();
        let record = &store.records()[0];

        assert_eq!(record.goal, 0.0);
        assert_eq!(record.pledged, 0.0);
        assert_eq!(record.backers, 0);
    }

    #[test]
    fn test_coercion_fallback_logs_index_and_field() {
        let source = r#"[
            {"name": "A", "description": "d", "img": "a.png", "goal": 10, "pledged": 5, "backers": 1},
            {"name": "B", "description": "d", "img": "b.png", "goal": "lots", "pledged": 5, "backers": 1}
        ]"#;

        let (store, warnings) = load_capturing_warnings(source);

        assert_eq!(store.records()[1].goal, 0.0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].get("index").map(String::as_str), Some("1"));
        assert_eq!(warnings[0].get("field").map(String::as_str), Some("goal"));
    }

    #[test]
    fn test_count_out_of_range_logs_fallback() {
        let source = r#"[{"name": "A", "description": "d", "img": "a.png",
                          "goal": 1, "pledged": 1, "backers": -4}]"#;

        let (store, warnings) = load_capturing_warnings(source);

        assert_eq!(store.records()[0].backers, 0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].get("field").map(String::as_str), Some("backers"));
    }

    #[test]
    fn test_clean_record_logs_no_warnings() {
        let (_, warnings) = load_capturing_warnings(SAMPLE_DATA);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_from_json_str_accepts_image_ref_alias() {
        let source = r#"[{"name": "A", "description": "d", "imageRef": "x.png",
                          "goal": 1, "pledged": 2, "backers": 3}]"#;
        let store = RecordStore::from_json_str(source).unwrap();
        assert_eq!(store.records()[0].image_ref, "x.png");
    }

    #[test]
    fn test_to_text_matches_browser_string_conversion() {
        assert_eq!(to_text(&json!("Zoo")), "Zoo");
        assert_eq!(to_text(&json!(42)), "42");
        assert_eq!(to_text(&json!(1.0)), "1");
        assert_eq!(to_text(&json!(12.5)), "12.5");
        assert_eq!(to_text(&json!(-3)), "-3");
        assert_eq!(to_text(&Value::Null), "null");
        assert_eq!(to_text(&json!(true)), "true");
        assert_eq!(to_text(&json!([1, null, "a"])), "1,,a");
        assert_eq!(to_text(&json!({"a": 1})), "[object Object]");
    }

    #[test]
    fn test_from_json_str_renders_non_string_text_fields() {
        let source = r#"[{"name": 42, "description": null, "img": true,
                          "goal": 1, "pledged": 2, "backers": 3}]"#;

        let (store, warnings) = load_capturing_warnings(source);
        let record = &store.records()[0];

        assert_eq!(warnings.len(), 3);
        assert_eq!(record.name, "42");
        assert_eq!(record.description, "null");
        assert_eq!(record.image_ref, "true");
        assert_eq!(record.pledged, 2.0);
    }

    #[test]
    fn test_from_json_str_rejects_invalid_json() {
        let err = RecordStore::from_json_str("[{").unwrap_err();
        assert!(matches!(err, DataFormatError::Json(_)));
    }

    #[test]
    fn test_from_json_str_rejects_non_array() {
        let err = RecordStore::from_json_str(r#"{"name": "A"}"#).unwrap_err();
        assert!(matches!(err, DataFormatError::NotAnArray));
    }

    #[test]
    fn test_from_json_str_rejects_non_object_element() {
        let source = r#"[{"name": "A", "description": "d", "img": "a",
                          "goal": 1, "pledged": 1, "backers": 1}, 5]"#;
        let err = RecordStore::from_json_str(source).unwrap_err();
        assert!(matches!(err, DataFormatError::NotAnObject { index: 1 }));
    }

    #[test]
    fn test_from_json_str_rejects_missing_field() {
        let source = r#"[{"name": "A", "description": "d", "img": "a",
                          "goal": 1, "pledged": 1}]"#;
        let err = RecordStore::from_json_str(source).unwrap_err();

        match err {
            DataFormatError::InvalidRecord { index, source } => {
                assert_eq!(index, 0);
                assert!(source.to_string().contains("backers"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_json_str_empty_array() {
        let store = RecordStore::from_json_str("[]").unwrap();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_from_csv_reader() {
        let csv = "name,description,img,goal,pledged,backers\n\
                   Alpha,First,a.png,1000,1200,10\n\
                   Beta,Second,b.png,500,abc,2\n";

        let store = RecordStore::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].pledged, 1200.0);
        assert_eq!(store.records()[1].pledged, 0.0);
        assert_eq!(store.records()[1].name, "Beta");
    }

    #[test]
    fn test_from_csv_reader_missing_column() {
        let csv = "name,description,img,goal,pledged\nAlpha,First,a.png,1000,1200\n";
        let err = RecordStore::from_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataFormatError::Csv(_)));
    }

    #[test]
    fn test_from_path_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("games.json");
        std::fs::write(&json_path, SAMPLE_DATA).unwrap();
        assert_eq!(RecordStore::from_path(&json_path).unwrap().len(), 11);

        let csv_path = dir.path().join("games.csv");
        let mut file = std::fs::File::create(&csv_path).unwrap();
        writeln!(file, "name,description,img,goal,pledged,backers").unwrap();
        writeln!(file, "Alpha,First,a.png,1000,1200,10").unwrap();
        drop(file);
        assert_eq!(RecordStore::from_path(&csv_path).unwrap().len(), 1);

        let txt_path = dir.path().join("games.txt");
        let err = RecordStore::from_path(&txt_path).unwrap_err();
        assert!(matches!(err, DataFormatError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = RecordStore::from_path(Path::new("/nonexistent/games.json")).unwrap_err();
        assert!(matches!(err, DataFormatError::Io { .. }));
    }

    #[test]
    fn test_sample_preserves_source_order() {
        let store = RecordStore::sample().unwrap();
        assert_eq!(store.len(), 11);
        assert_eq!(store.records()[0].name, "Fire Ticket");
        assert_eq!(store.records()[10].name, "Abyss Arcade");
    }

    #[test]
    fn test_is_funded_boundary() {
        let exact = CampaignRecord::new("A", "", "", 200.0, 200.0, 1);
        let short = CampaignRecord::new("B", "", "", 200.0, 199.99, 1);
        assert!(exact.is_funded());
        assert!(!short.is_funded());
    }
}
