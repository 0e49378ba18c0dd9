// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mkignore-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of mkignore and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Output-file persistence for the chosen templates.
//!
//! The fetched template body is written verbatim, either replacing the file
//! or appended after its current contents. No separators are added and no
//! atomicity is promised; a failed write leaves whatever landed.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// How the output file is opened for writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Create the file or replace its contents.
    Truncate,
    /// Create the file or add to the end of it.
    Append,
}

/// Decision offered when the output file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChoice {
    Overwrite,
    Append,
    Cancel,
}

impl SaveChoice {
    /// The write mode a choice resolves to; `Cancel` resolves to none.
    pub fn write_mode(self) -> Option<WriteMode> {
        match self {
            Self::Overwrite => Some(WriteMode::Truncate),
            Self::Append => Some(WriteMode::Append),
            Self::Cancel => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Overwrite => "Overwrite",
            Self::Append => "Append",
            Self::Cancel => "Cancel",
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// The single output target of a session.
#[derive(Debug, Clone)]
pub struct OutputFile {
    path: PathBuf,
}

impl OutputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn write(&self, contents: &str, mode: WriteMode) -> Result<(), StoreError> {
        let mut options = OpenOptions::new();
        options.write(true).create(true);
        match mode {
            WriteMode::Truncate => options.truncate(true),
            WriteMode::Append => options.append(true),
        };
        let mut file = options
            .open(&self.path)
            .map_err(|source| StoreError::Io { path: self.path.clone(), source })?;
        file.write_all(contents.as_bytes())
            .map_err(|source| StoreError::Io { path: self.path.clone(), source })
    }
}
