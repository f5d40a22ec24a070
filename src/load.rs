use std::path::PathBuf;

use crate::{
    error::{LoadStage, RaceChartError, RaceChartResult},
    model::{Dataset, Record},
};

pub const DEFAULT_SOURCE: &str =
    "https://raw.githubusercontent.com/FreeCodeCamp/ProjectReferenceData/master/cyclist-data.json";

/// Where the record array comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Http(String),
    File(PathBuf),
}

impl Source {
    pub fn parse(uri: &str) -> Self {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            Self::Http(uri.to_string())
        } else if let Some(p) = uri.strip_prefix("file://") {
            Self::File(PathBuf::from(p))
        } else {
            Self::File(PathBuf::from(uri))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Http(url) => url.clone(),
            Self::File(p) => p.display().to_string(),
        }
    }

    fn fetch(&self) -> RaceChartResult<Vec<u8>> {
        let uri = self.describe();
        match self {
            Self::Http(url) => {
                let resp = reqwest::blocking::get(url)
                    .map_err(|e| RaceChartError::load(LoadStage::Transport, &uri, e.to_string()))?;
                if !resp.status().is_success() {
                    return Err(RaceChartError::load(
                        LoadStage::Status,
                        &uri,
                        format!("server answered {}", resp.status()),
                    ));
                }
                let bytes = resp
                    .bytes()
                    .map_err(|e| RaceChartError::load(LoadStage::Read, &uri, e.to_string()))?;
                Ok(bytes.to_vec())
            }
            Self::File(path) => std::fs::read(path)
                .map_err(|e| RaceChartError::load(LoadStage::Read, &uri, e.to_string())),
        }
    }
}

/// Parses a JSON record array. Any problem is a load failure; nothing partial is returned.
pub fn parse_dataset(bytes: &[u8], source_uri: &str) -> RaceChartResult<Dataset> {
    let records: Vec<Record> = serde_json::from_slice(bytes)
        .map_err(|e| RaceChartError::load(LoadStage::Parse, source_uri, e.to_string()))?;
    Dataset::new(records, source_uri)
}

#[tracing::instrument]
pub fn load_dataset(uri: &str) -> RaceChartResult<Dataset> {
    let source = Source::parse(uri);
    let bytes = source.fetch()?;
    let dataset = parse_dataset(&bytes, &source.describe())?;
    tracing::debug!(
        records = dataset.len(),
        bytes = bytes.len(),
        "dataset loaded"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_parse_schemes() {
        assert_eq!(
            Source::parse("https://x/y.json"),
            Source::Http("https://x/y.json".to_string())
        );
        assert_eq!(
            Source::parse("file:///tmp/a.json"),
            Source::File(PathBuf::from("/tmp/a.json"))
        );
        assert_eq!(
            Source::parse("data/a.json"),
            Source::File(PathBuf::from("data/a.json"))
        );
    }

    #[test]
    fn parse_error_is_load_failure() {
        let err = parse_dataset(b"{not json", "mem").unwrap_err();
        match err {
            RaceChartError::LoadFailure { stage, .. } => assert_eq!(stage, LoadStage::Parse),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn wrong_shape_is_load_failure() {
        let err = parse_dataset(br#"{"Name":"x"}"#, "mem").unwrap_err();
        assert!(err.is_load_failure());
    }

    #[test]
    fn missing_file_is_read_failure() {
        let err = load_dataset("target/definitely/not/here.json").unwrap_err();
        match err {
            RaceChartError::LoadFailure { stage, .. } => assert_eq!(stage, LoadStage::Read),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unreachable_host_is_transport_failure() {
        // nothing listens on port 1
        let err = load_dataset("http://127.0.0.1:1/cyclists.json").unwrap_err();
        match err {
            RaceChartError::LoadFailure {
                stage, source_uri, ..
            } => {
                assert_eq!(stage, LoadStage::Transport);
                assert_eq!(source_uri, "http://127.0.0.1:1/cyclists.json");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn null_doping_parses_as_clean() {
        let body = br#"[{"Time":"36:50","Place":1,"Seconds":2210,"Name":"A","Year":1995,"Nationality":"ITA","Doping":null}]"#;
        let ds = parse_dataset(body, "mem").unwrap();
        assert_eq!(ds.doped_count(), 0);
    }

    #[test]
    fn empty_array_parses() {
        let ds = parse_dataset(b"[]", "mem").unwrap();
        assert!(ds.is_empty());
    }
}
