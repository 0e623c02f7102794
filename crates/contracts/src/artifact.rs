//! Lookup of compiled contracts by name.
//!
//! The contracts are compiled by an external Hardhat project which writes one
//! JSON artifact per contract to `artifacts/<source path>/<Contract>.json`.
//! Deploying a contract needs its creation bytecode from that artifact, the
//! constructor arguments are encoded with the typed bindings in
//! [`crate::alloy`].

use {
    alloy::{
        json_abi::JsonAbi,
        primitives::{Bytes, hex},
        sol_types::SolConstructor,
    },
    serde::Deserialize,
    std::{
        collections::BTreeMap,
        fs,
        path::{Path, PathBuf},
    },
    walkdir::WalkDir,
};

/// Directory Hardhat uses for its compiler inputs and outputs. It contains
/// no contract artifacts.
const BUILD_INFO_DIR: &str = "build-info";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("artifacts directory {0:?} does not exist")]
    MissingDirectory(PathBuf),
    #[error("no artifact for contract {name} in {dir:?}")]
    NotFound { name: String, dir: PathBuf },
    #[error("multiple artifacts for contract {name}, use a fully qualified name: {candidates:?}")]
    Ambiguous {
        name: String,
        candidates: Vec<PathBuf>,
    },
    #[error("failed to read artifact {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse artifact {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to walk artifacts directory")]
    Walk(#[from] walkdir::Error),
    #[error("contract {0} is abstract and can't be deployed")]
    Abstract(String),
    #[error("contract {name} needs to be linked against {libraries:?}")]
    UnlinkedLibraries {
        name: String,
        libraries: Vec<String>,
    },
    #[error("contract {name} has malformed bytecode")]
    Bytecode {
        name: String,
        #[source]
        source: hex::FromHexError,
    },
    #[error("contract {contract} has no function {function}")]
    MissingFunction { contract: String, function: String },
}

/// A compiled contract as written by Hardhat.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    pub source_name: String,
    pub abi: JsonAbi,
    /// Hex encoded creation bytecode. Kept as a string because unlinked
    /// library references are placeholders which are not valid hex.
    pub bytecode: String,
    /// Library references by source file and library name.
    #[serde(default)]
    pub link_references: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
}

impl Artifact {
    /// Reads and parses the artifact at `path`.
    pub fn read(path: &Path) -> Result<Self, Error> {
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| Error::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Name in `<source>:<contract>` form which identifies the contract
    /// uniquely within a project.
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    /// Returns the creation bytecode of the contract.
    pub fn creation_code(&self) -> Result<Bytes, Error> {
        let libraries = self
            .link_references
            .iter()
            .flat_map(|(source, libraries)| {
                libraries
                    .keys()
                    .map(move |library| format!("{source}:{library}"))
            })
            .collect::<Vec<_>>();
        if !libraries.is_empty() {
            return Err(Error::UnlinkedLibraries {
                name: self.contract_name.clone(),
                libraries,
            });
        }

        let code = hex::decode(&self.bytecode).map_err(|source| Error::Bytecode {
            name: self.contract_name.clone(),
            source,
        })?;
        if code.is_empty() {
            return Err(Error::Abstract(self.contract_name.clone()));
        }
        Ok(code.into())
    }
}

/// Handle used to deploy new instances of a named contract, or to check a
/// named contract's interface before calling into an existing instance.
#[derive(Debug, Clone)]
pub struct ContractFactory {
    artifact: Artifact,
}

impl ContractFactory {
    pub fn new(artifact: Artifact) -> Self {
        Self { artifact }
    }

    /// Finds the artifact of the contract `name` somewhere below `dir`.
    ///
    /// `name` is either a bare contract name or a fully qualified
    /// `<source>:<contract>` name. A bare name must match exactly one
    /// artifact.
    pub fn from_artifacts(dir: &Path, name: &str) -> Result<Self, Error> {
        if !dir.is_dir() {
            return Err(Error::MissingDirectory(dir.to_owned()));
        }
        let (source, contract) = match name.rsplit_once(':') {
            Some((source, contract)) => (Some(source), contract),
            None => (None, name),
        };
        let file_name = format!("{contract}.json");

        let mut candidates = Vec::new();
        let entries = WalkDir::new(dir)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != BUILD_INFO_DIR);
        for entry in entries {
            let entry = entry?;
            if !entry.file_type().is_file()
                || entry.file_name().to_str() != Some(file_name.as_str())
            {
                continue;
            }
            let artifact = Artifact::read(entry.path())?;
            if artifact.contract_name != contract
                || source.is_some_and(|source| artifact.source_name != source)
            {
                tracing::debug!(path = ?entry.path(), "skipping artifact of other contract");
                continue;
            }
            candidates.push((entry.into_path(), artifact));
        }

        match candidates.len() {
            0 => Err(Error::NotFound {
                name: name.to_owned(),
                dir: dir.to_owned(),
            }),
            1 => {
                let (path, artifact) = candidates.remove(0);
                tracing::debug!(
                    ?path,
                    contract = %artifact.fully_qualified_name(),
                    "loaded artifact"
                );
                Ok(Self::new(artifact))
            }
            _ => Err(Error::Ambiguous {
                name: name.to_owned(),
                candidates: candidates.into_iter().map(|(path, _)| path).collect(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.artifact.contract_name
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    /// Creation bytecode followed by the ABI encoded constructor arguments,
    /// i.e. the input of the contract creation transaction.
    pub fn deploy_code<C: SolConstructor>(&self, constructor: &C) -> Result<Bytes, Error> {
        let mut code = self.artifact.creation_code()?.to_vec();
        code.extend(constructor.abi_encode());
        Ok(code.into())
    }

    /// Checks that the contract exposes a function called `function`.
    pub fn ensure_function(&self, function: &str) -> Result<(), Error> {
        match self.artifact.abi.function(function) {
            Some(overloads) if !overloads.is_empty() => Ok(()),
            _ => Err(Error::MissingFunction {
                contract: self.artifact.contract_name.clone(),
                function: function.to_owned(),
            }),
        }
    }
}
