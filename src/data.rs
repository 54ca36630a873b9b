//! Data
//!
//! Categorical values, records and the labeled [`Dataset`] the tree is grown from.
use crate::errors::Id3Error;
use hashbrown::HashMap as FastMap;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A categorical cell value.
///
/// Values only ever compare for equality, so integers and booleans are
/// treated as categories just like text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean category.
    Boolean(bool),
    /// Discrete integer category.
    Integer(i64),
    /// Free text category.
    Text(String),
}

impl Value {
    /// Parse a raw table cell.
    ///
    /// Cells written in canonical integer form become [`Value::Integer`],
    /// `true`/`false` (either capitalisation) become [`Value::Boolean`],
    /// anything else is text. Codes such as `"007"` or `"+7"` stay text so
    /// they are not merged with `"7"`.
    pub fn parse(cell: &str) -> Self {
        let cell = cell.trim();
        if let Ok(i) = cell.parse::<i64>() {
            if i.to_string() == cell {
                return Value::Integer(i);
            }
        }
        match cell {
            "true" | "True" | "TRUE" => Value::Boolean(true),
            "false" | "False" | "FALSE" => Value::Boolean(false),
            _ => Value::Text(cell.to_string()),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

/// A single row: attribute name to categorical value.
pub type Record = HashMap<String, Value>;

/// Build a [`Record`] from `(attribute, value)` pairs.
pub fn record<K, V, I>(pairs: I) -> Record
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// Labeled table of categorical records.
///
/// Every record holds every attribute in `attributes` and the `target`.
/// This is checked once on construction, deserialization included; the
/// tree builder relies on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataset")]
pub struct Dataset {
    records: Vec<Record>,
    attributes: Vec<String>,
    target: String,
}

#[derive(Deserialize)]
struct RawDataset {
    records: Vec<Record>,
    attributes: Vec<String>,
    target: String,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = Id3Error;

    fn try_from(raw: RawDataset) -> Result<Self, Self::Error> {
        Dataset::new(raw.records, raw.attributes, raw.target)
    }
}

impl Dataset {
    /// Create a dataset from records.
    ///
    /// * `records` - The rows of the table.
    /// * `attributes` - Non-target attribute names, in the order the attribute
    ///   selector scans them. If the target is listed it is removed.
    /// * `target` - Name of the class label attribute.
    pub fn new<S: Into<String>>(records: Vec<Record>, attributes: Vec<String>, target: S) -> Result<Self, Id3Error> {
        let target = target.into();
        let mut ordered: Vec<String> = Vec::with_capacity(attributes.len());
        for a in attributes {
            if a == target {
                continue;
            }
            if ordered.contains(&a) {
                return Err(Id3Error::InvalidInput(format!("attribute {} is listed twice", a)));
            }
            ordered.push(a);
        }

        for (row, r) in records.iter().enumerate() {
            for a in ordered.iter().chain(std::iter::once(&target)) {
                if !r.contains_key(a) {
                    return Err(Id3Error::MissingAttribute {
                        attribute: a.clone(),
                        row,
                    });
                }
            }
        }

        Ok(Dataset {
            records,
            attributes: ordered,
            target,
        })
    }

    /// Create a dataset from named columns of equal length.
    ///
    /// Column order gives the attribute order, the `target` column is taken out of it.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<Value>)>, target: &str) -> Result<Self, Id3Error> {
        let columns: Vec<(String, Vec<Value>)> = columns.into_iter().map(|(n, c)| (n.into(), c)).collect();
        {
            let mut seen: hashbrown::HashSet<&str> = hashbrown::HashSet::with_capacity(columns.len());
            if let Some((name, _)) = columns.iter().find(|(n, _)| !seen.insert(n.as_str())) {
                return Err(Id3Error::InvalidInput(format!("column {} appears more than once", name)));
            }
        }
        if !columns.iter().any(|(n, _)| n == target) {
            return Err(Id3Error::InvalidInput(format!("target column {} not found", target)));
        }
        let rows = columns.first().map(|(_, c)| c.len()).unwrap_or(0);
        if let Some((name, _)) = columns.iter().find(|(_, c)| c.len() != rows) {
            return Err(Id3Error::InvalidInput(format!(
                "column {} does not have {} values",
                name, rows
            )));
        }

        let mut records: Vec<Record> = (0..rows).map(|_| Record::with_capacity(columns.len())).collect();
        let mut attributes = Vec::with_capacity(columns.len());
        for (name, column) in columns {
            for (r, v) in records.iter_mut().zip(column) {
                r.insert(name.clone(), v);
            }
            attributes.push(name);
        }
        Dataset::new(records, attributes, target)
    }

    /// Read a dataset from CSV with a header row.
    ///
    /// * `reader` - Source of the CSV text.
    /// * `target` - Header of the class label column.
    pub fn from_csv_reader<R: Read>(reader: R, target: &str) -> Result<Self, Id3Error> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| Id3Error::UnableToRead(e.to_string()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut columns: Vec<(String, Vec<Value>)> = headers.into_iter().map(|h| (h, Vec::new())).collect();
        for row in rdr.records() {
            let row = row.map_err(|e| Id3Error::UnableToRead(e.to_string()))?;
            for ((_, column), cell) in columns.iter_mut().zip(row.iter()) {
                column.push(Value::parse(cell));
            }
        }
        Dataset::from_columns(columns, target)
    }

    /// Read a dataset from a CSV file.
    ///
    /// * `path` - Path to the CSV file.
    /// * `target` - Header of the class label column.
    pub fn from_csv_path<P: AsRef<Path>>(path: P, target: &str) -> Result<Self, Id3Error> {
        let file = File::open(path).map_err(|e| Id3Error::UnableToRead(e.to_string()))?;
        Dataset::from_csv_reader(file, target)
    }

    /// Return a copy without attributes that take a distinct value on every record.
    ///
    /// Such columns (row ids and the like) split the data perfectly and
    /// carry nothing that generalizes.
    pub fn drop_identifier_attributes(&self) -> Dataset {
        let n = self.records.len();
        let (dropped, kept): (Vec<&String>, Vec<&String>) = self.attributes.iter().partition(|a| {
            let distinct: hashbrown::HashSet<&Value> = self.records.iter().map(|r| &r[a.as_str()]).collect();
            n > 0 && distinct.len() == n
        });
        if !dropped.is_empty() {
            info!("Dropping identifier attributes: {:?}", dropped);
        }
        let kept: Vec<String> = kept.into_iter().cloned().collect();
        let records: Vec<Record> = self
            .records
            .iter()
            .map(|r| {
                r.iter()
                    .filter(|(k, _)| kept.contains(*k) || **k == self.target)
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect::<Record>()
            })
            .collect();
        Dataset {
            records,
            attributes: kept,
            target: self.target.clone(),
        }
    }

    /// The records of the table.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Non-target attribute names, in scan order.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Name of the class label attribute.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether `attribute` is one of the non-target attributes.
    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.attributes.iter().any(|a| a == attribute)
    }

    /// Label of the record at `row`.
    pub fn label(&self, row: usize) -> &Value {
        &self.records[row][self.target.as_str()]
    }

    /// Value of `attribute` on the record at `row`.
    pub fn value(&self, row: usize, attribute: &str) -> &Value {
        &self.records[row][attribute]
    }

    /// Index over all records.
    pub(crate) fn index(&self) -> Vec<usize> {
        (0..self.records.len()).collect()
    }

    /// Count labels over `index`, in order of first appearance.
    pub(crate) fn label_counts(&self, index: &[usize]) -> Vec<(&Value, usize)> {
        let mut position: FastMap<&Value, usize> = FastMap::new();
        let mut counts: Vec<(&Value, usize)> = Vec::new();
        for &i in index {
            let label = self.label(i);
            match position.get(label) {
                Some(&p) => counts[p].1 += 1,
                None => {
                    position.insert(label, counts.len());
                    counts.push((label, 1));
                }
            }
        }
        counts
    }

    /// Group `index` by the value of `attribute`, in order of first appearance.
    pub(crate) fn partition(&self, index: &[usize], attribute: &str) -> Vec<(&Value, Vec<usize>)> {
        let mut position: FastMap<&Value, usize> = FastMap::new();
        let mut groups: Vec<(&Value, Vec<usize>)> = Vec::new();
        for &i in index {
            let v = self.value(i, attribute);
            match position.get(v) {
                Some(&p) => groups[p].1.push(i),
                None => {
                    position.insert(v, groups.len());
                    groups.push((v, vec![i]));
                }
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather() -> Dataset {
        Dataset::from_columns(
            vec![
                ("weather", vec!["sunny".into(), "sunny".into(), "rainy".into(), "rainy".into()]),
                ("play", vec!["yes".into(), "yes".into(), "no".into(), "no".into()]),
            ],
            "play",
        )
        .unwrap()
    }

    #[test]
    fn test_from_columns() {
        let data = weather();
        assert_eq!(data.len(), 4);
        assert_eq!(data.attributes(), &["weather".to_string()]);
        assert_eq!(data.target(), "play");
        assert_eq!(data.label(2), &Value::from("no"));
        assert_eq!(data.value(0, "weather"), &Value::from("sunny"));
    }

    #[test]
    fn test_from_columns_errors() {
        let res = Dataset::from_columns(vec![("a", vec![Value::from(1)]), ("b", vec![])], "b");
        assert!(matches!(res, Err(Id3Error::InvalidInput(_))));
        let res = Dataset::from_columns(vec![("a", vec![Value::from(1)])], "label");
        assert!(matches!(res, Err(Id3Error::InvalidInput(_))));
    }

    #[test]
    fn test_new_missing_attribute() {
        let records = vec![
            record([("outlook", "sunny"), ("play", "no")]),
            record([("play", "yes")]),
        ];
        let res = Dataset::new(records, vec!["outlook".to_string()], "play");
        assert_eq!(
            res,
            Err(Id3Error::MissingAttribute {
                attribute: "outlook".to_string(),
                row: 1
            })
        );
    }

    #[test]
    fn test_new_removes_target_from_attributes() {
        let records = vec![record([("outlook", "sunny"), ("play", "no")])];
        let data = Dataset::new(records, vec!["play".to_string(), "outlook".to_string()], "play").unwrap();
        assert_eq!(data.attributes(), &["outlook".to_string()]);
    }

    #[test]
    fn test_value_parse() {
        assert_eq!(Value::parse("42"), Value::Integer(42));
        assert_eq!(Value::parse(" -3 "), Value::Integer(-3));
        assert_eq!(Value::parse("True"), Value::Boolean(true));
        assert_eq!(Value::parse("false"), Value::Boolean(false));
        assert_eq!(Value::parse("youth"), Value::Text("youth".to_string()));
        assert_eq!(Value::parse("0"), Value::Integer(0));
        assert_eq!(Value::parse("007"), Value::Text("007".to_string()));
        assert_eq!(Value::parse("+7"), Value::Text("+7".to_string()));
        assert_ne!(Value::parse("007"), Value::parse("7"));
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"records":[{"weather":"sunny","play":"yes"},{"play":"no"}],"attributes":["weather"],"target":"play"}"#;
        let res = serde_json::from_str::<Dataset>(json);
        let err = res.unwrap_err().to_string();
        assert!(err.contains("weather"), "{}", err);

        let json = r#"{"records":[{"weather":"sunny","play":"yes"}],"attributes":["weather","play"],"target":"play"}"#;
        let data: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(data.attributes(), &["weather".to_string()]);
        let round: Dataset = serde_json::from_str(&serde_json::to_string(&data).unwrap()).unwrap();
        assert_eq!(round, data);
    }

    #[test]
    fn test_from_columns_repeated_name() {
        let res = Dataset::from_columns(
            vec![
                ("play", vec![Value::from("yes")]),
                ("weather", vec![Value::from("sunny")]),
                ("play", vec![Value::from("no")]),
            ],
            "play",
        );
        assert!(matches!(res, Err(Id3Error::InvalidInput(_))));

        let csv = "a,play,play\nx,yes,no\n";
        assert!(matches!(
            Dataset::from_csv_reader(csv.as_bytes(), "play"),
            Err(Id3Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_csv_reader() {
        let csv = "rid,age,student,buys\n1,youth,no,no\n2,youth,yes,yes\n3,senior,no,yes\n";
        let data = Dataset::from_csv_reader(csv.as_bytes(), "buys").unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(
            data.attributes(),
            &["rid".to_string(), "age".to_string(), "student".to_string()]
        );
        assert_eq!(data.value(1, "rid"), &Value::Integer(2));
        assert_eq!(data.label(2), &Value::from("yes"));

        let data = data.drop_identifier_attributes();
        assert_eq!(data.attributes(), &["age".to_string(), "student".to_string()]);
        assert!(!data.records()[0].contains_key("rid"));
        assert!(data.records()[0].contains_key("buys"));
    }

    #[test]
    fn test_from_csv_reader_unknown_target() {
        let csv = "a,b\n1,2\n";
        assert!(matches!(
            Dataset::from_csv_reader(csv.as_bytes(), "c"),
            Err(Id3Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_partition_order() {
        let data = Dataset::from_columns(
            vec![
                ("color", vec!["red".into(), "blue".into(), "red".into(), "green".into()]),
                ("y", vec![Value::from(1), Value::from(0), Value::from(0), Value::from(1)]),
            ],
            "y",
        )
        .unwrap();
        let groups = data.partition(&data.index(), "color");
        let keys: Vec<String> = groups.iter().map(|(v, _)| v.to_string()).collect();
        assert_eq!(keys, vec!["red", "blue", "green"]);
        assert_eq!(groups[0].1, vec![0, 2]);

        let counts = data.label_counts(&[1, 0, 2, 3]);
        assert_eq!(counts, vec![(&Value::from(0), 2), (&Value::from(1), 2)]);
    }
}
