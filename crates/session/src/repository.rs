use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use log::debug;
use matrix::DenseMatrix;

use crate::{text, Error};

/// Matrices the user has created or loaded, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct Repository {
    matrices: BTreeMap<String, DenseMatrix>,
}

/// A name is valid when it is non-empty, does not start with an ASCII digit, and consists of
/// letters and digits only.
pub fn is_valid_name(name: &str) -> bool {
    match name.chars().next() {
        Some(first) if !first.is_ascii_digit() => name.chars().all(char::is_alphanumeric),
        _ => false,
    }
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.matrices.contains_key(name)
    }

    /// Names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.matrices.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DenseMatrix)> {
        self.matrices.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Stores `matrix` under `name`.
    ///
    /// # Errors
    /// * [`Error::InvalidName`] if `name` fails [`is_valid_name`].
    /// * [`Error::AlreadyExists`] if the name is taken.
    pub fn insert(&mut self, name: &str, matrix: DenseMatrix) -> Result<(), Error> {
        if !is_valid_name(name) {
            return Err(Error::InvalidName {
                name: name.to_string(),
            });
        }
        if self.contains(name) {
            return Err(Error::AlreadyExists {
                name: name.to_string(),
            });
        }
        debug!("insert {} ({}x{})", name, matrix.rows(), matrix.cols());
        self.matrices.insert(name.to_string(), matrix);
        Ok(())
    }

    /// Stores `matrix` under the first free name `matrixN`, counting from `len + 1`, and returns
    /// that name.
    pub fn insert_auto(&mut self, matrix: DenseMatrix) -> String {
        let mut n = self.len() + 1;
        let mut name = format!("matrix{}", n);
        while self.contains(&name) {
            n += 1;
            name = format!("matrix{}", n);
        }
        debug!("insert {} ({}x{})", name, matrix.rows(), matrix.cols());
        self.matrices.insert(name.clone(), matrix);
        name
    }

    pub fn get(&self, name: &str) -> Result<&DenseMatrix, Error> {
        self.matrices.get(name).ok_or_else(|| Error::NotFound {
            name: name.to_string(),
        })
    }

    pub fn remove(&mut self, name: &str) -> Result<DenseMatrix, Error> {
        let matrix = self.matrices.remove(name).ok_or_else(|| Error::NotFound {
            name: name.to_string(),
        })?;
        debug!("remove {}", name);
        Ok(matrix)
    }

    /// Reads a text dump from `path` and stores it under the file stem, which is returned.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<String, Error> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !is_valid_name(&name) {
            return Err(Error::InvalidName { name });
        }
        if self.contains(&name) {
            return Err(Error::AlreadyExists { name });
        }

        let matrix = text::read_matrix(BufReader::new(File::open(path)?))?;
        debug!("loaded {} from {}", name, path.display());
        self.insert(&name, matrix)?;
        Ok(name)
    }

    /// Writes the matrix stored under `name` to `path` as a text dump.
    pub fn save<P: AsRef<Path>>(&self, name: &str, path: P) -> Result<(), Error> {
        let matrix = self.get(name)?;
        let path = path.as_ref();
        let mut w = BufWriter::new(File::create(path)?);
        text::write_matrix(matrix, &mut w)?;
        w.flush()?;
        debug!("saved {} to {}", name, path.display());
        Ok(())
    }
}
