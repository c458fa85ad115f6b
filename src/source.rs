use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::str::FromStr;

use tracing::info;

use crate::error::Result;

/// Where a document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    File(PathBuf),
    Url(String),
}

impl FromStr for Location {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Location::Url(s.to_string()))
        } else {
            Ok(Location::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::File(path) => write!(f, "{}", path.display()),
            Location::Url(url) => write!(f, "{url}"),
        }
    }
}

/// A document to fetch, optionally a named entry inside a zip archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub location: Location,
    pub zip_entry: Option<String>,
}

impl Source {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            zip_entry: None,
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(Location::File(path.into()))
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::new(Location::Url(url.into()))
    }

    pub fn in_zip(mut self, entry: impl Into<String>) -> Self {
        self.zip_entry = Some(entry.into());
        self
    }

    /// Reads the whole document.
    pub async fn fetch(&self) -> Result<Vec<u8>> {
        info!("Fetching {self}");
        let Some(entry) = &self.zip_entry else {
            return match &self.location {
                Location::File(path) => Ok(tokio::fs::read(path).await?),
                Location::Url(url) => Ok(get(url).await?),
            };
        };
        let archive = match &self.location {
            Location::File(path) => File::open(path)?,
            Location::Url(url) => {
                let mut tmpfile = tempfile::tempfile()?;
                tmpfile.write_all(&get(url).await?)?;
                tmpfile
            }
        };
        let mut zip = zip::ZipArchive::new(archive)?;
        let mut file = zip.by_name(entry)?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

async fn get(url: &str) -> Result<Vec<u8>> {
    let response = reqwest::get(url).await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.zip_entry {
            Some(entry) => write!(f, "{entry} in {}", self.location),
            None => write!(f, "{}", self.location),
        }
    }
}
