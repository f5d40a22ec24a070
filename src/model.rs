use std::collections::BTreeSet;

use crate::{
    error::{LoadStage, RaceChartError, RaceChartResult},
    format::parse_clock,
};

/// One cyclist's climb.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    pub name: String,
    pub nationality: String,
    pub year: i32,
    pub time: String, // "MM:SS"
    pub seconds: f64,
    pub place: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub doping: String, // empty when no allegation
    #[serde(default, rename = "URL", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

fn null_as_empty<'de, D>(de: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v: Option<String> = serde::Deserialize::deserialize(de)?;
    Ok(v.unwrap_or_default())
}

impl Record {
    pub fn is_doped(&self) -> bool {
        !self.doping.trim().is_empty()
    }

    pub fn doping_note(&self) -> &str {
        if self.is_doped() {
            self.doping.trim()
        } else {
            "None"
        }
    }
}

/// Validated, read-only record sequence.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Validates the records. `source_uri` is only used for error reporting.
    pub fn new(records: Vec<Record>, source_uri: &str) -> RaceChartResult<Self> {
        let invalid = |msg: String| RaceChartError::load(LoadStage::Validate, source_uri, msg);

        let mut places = BTreeSet::new();
        for (i, r) in records.iter().enumerate() {
            if r.place == 0 {
                return Err(invalid(format!("record {i} ('{}') has place 0", r.name)));
            }
            if !places.insert(r.place) {
                return Err(invalid(format!(
                    "record {i} ('{}') repeats place {}",
                    r.name, r.place
                )));
            }
            if !r.seconds.is_finite() || r.seconds < 0.0 {
                return Err(invalid(format!(
                    "record {i} ('{}') has invalid seconds {}",
                    r.name, r.seconds
                )));
            }
            match parse_clock(&r.time) {
                Some(t) if (f64::from(t) - r.seconds).abs() <= 1.0 => {}
                _ => tracing::warn!(
                    name = %r.name,
                    time = %r.time,
                    seconds = r.seconds,
                    "time string disagrees with seconds"
                ),
            }
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The winner: `Place == 1`, or the lowest place present.
    pub fn reference(&self) -> Option<&Record> {
        self.records
            .iter()
            .find(|r| r.place == 1)
            .or_else(|| self.records.iter().min_by_key(|r| r.place))
    }

    pub fn time_offset(&self) -> f64 {
        self.reference().map_or(0.0, |r| r.seconds)
    }

    /// Milliseconds behind the reference record.
    pub fn elapsed_ms(&self, record: &Record) -> f64 {
        (record.seconds - self.time_offset()) * 1000.0
    }

    pub fn elapsed_extent_ms(&self) -> Option<(f64, f64)> {
        let offset = self.time_offset();
        self.records.iter().fold(None, |acc, r| {
            let v = (r.seconds - offset) * 1000.0;
            Some(match acc {
                None => (v, v),
                Some((lo, hi)) => (f64::min(lo, v), f64::max(hi, v)),
            })
        })
    }

    pub fn max_elapsed_ms(&self) -> f64 {
        self.elapsed_extent_ms().map_or(0.0, |(_, hi)| hi)
    }

    pub fn place_extent(&self) -> Option<(u32, u32)> {
        let lo = self.records.iter().map(|r| r.place).min()?;
        let hi = self.records.iter().map(|r| r.place).max()?;
        Some((lo, hi))
    }

    pub fn max_place(&self) -> u32 {
        self.place_extent().map_or(0, |(_, hi)| hi)
    }

    pub fn doped_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_doped()).count()
    }
}
