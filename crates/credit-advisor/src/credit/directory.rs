use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::domain::ClientProfile;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("client directory {} not found", .path.display())]
    Missing { path: PathBuf },
    #[error("unable to read client directory: {0}")]
    Io(#[from] io::Error),
    #[error("malformed client directory: {0}")]
    Csv(#[from] csv::Error),
}

/// Where client rows come from. Loaded once per interaction.
pub trait ClientSource: Send + Sync {
    fn load(&self) -> Result<ClientDirectory, DirectoryError>;
}

/// Client directory backed by a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvClientSource {
    path: PathBuf,
}

impl CsvClientSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ClientSource for CsvClientSource {
    fn load(&self) -> Result<ClientDirectory, DirectoryError> {
        ClientDirectory::from_path(&self.path)
    }
}

/// In-memory view over the `dni,nombre,ingreso_mensual,score_sbs,endeudamiento` table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientDirectory {
    clients: Vec<ClientProfile>,
}

impl ClientDirectory {
    pub fn new(clients: Vec<ClientProfile>) -> Self {
        Self { clients }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => DirectoryError::Missing {
                path: path.to_path_buf(),
            },
            _ => DirectoryError::Io(err),
        })?;

        let directory = Self::from_reader(file)?;
        debug!(path = %path.display(), clients = directory.len(), "client directory loaded");
        Ok(directory)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DirectoryError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let clients = csv_reader
            .deserialize::<ClientProfile>()
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { clients })
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Distinct client names in file order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::with_capacity(self.clients.len());
        for client in &self.clients {
            if !names.contains(&client.name.as_str()) {
                names.push(client.name.as_str());
            }
        }
        names
    }

    /// Case-insensitive substring search over client names.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.names();
        }

        self.names()
            .into_iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect()
    }

    /// First row carrying exactly this name.
    pub fn find_by_name(&self, name: &str) -> Option<&ClientProfile> {
        let name = name.trim();
        self.clients.iter().find(|client| client.name == name)
    }

    pub fn find_by_dni(&self, dni: &str) -> Option<&ClientProfile> {
        let dni = dni.trim();
        self.clients.iter().find(|client| client.dni == dni)
    }
}
