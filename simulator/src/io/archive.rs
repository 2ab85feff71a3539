//! Frame set persistence
//!
//! Each frame kind is written to its own JSON artifact holding the frame
//! shape, the classifier label, row-major pixel data for every frame and,
//! for track frames, the geometry drawn into each one.

use std::path::{Path, PathBuf};

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::synth::{Frame, FrameKind, FrameSynthesizer, SynthesisError};
use crate::track::TrackGeometry;

/// Errors that can occur while saving or loading frame archives
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Archive I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Archive JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Malformed archive: {0}")]
    Malformed(String),
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}

/// One frame kind as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameArchive {
    pub kind: FrameKind,
    pub label: u8,
    pub n_row: usize,
    pub n_col: usize,
    /// Row-major pixel data, one entry per frame
    pub frames: Vec<Vec<u16>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub track_geometries: Vec<TrackGeometry>,
}

impl FrameArchive {
    /// Pack frames of one kind; refuses an empty sequence.
    pub fn from_frames(
        kind: FrameKind,
        frames: &[Frame],
        track_geometries: &[TrackGeometry],
    ) -> Result<Self, ArchiveError> {
        let first = frames
            .first()
            .ok_or(SynthesisError::NothingGenerated(kind))?;
        let (n_row, n_col) = first.dim();

        if let Some(bad) = frames.iter().find(|f| f.dim() != (n_row, n_col)) {
            return Err(ArchiveError::Malformed(format!(
                "mixed frame shapes {:?} and {:?}",
                (n_row, n_col),
                bad.dim()
            )));
        }

        Ok(Self {
            kind,
            label: kind.label(),
            n_row,
            n_col,
            frames: frames.iter().map(|f| f.iter().copied().collect()).collect(),
            track_geometries: track_geometries.to_vec(),
        })
    }

    /// Unpack into frames, checking each against the declared shape.
    pub fn to_frames(&self) -> Result<Vec<Frame>, ArchiveError> {
        self.frames
            .iter()
            .enumerate()
            .map(|(idx, data)| {
                Array2::from_shape_vec((self.n_row, self.n_col), data.clone()).map_err(|_| {
                    ArchiveError::Malformed(format!(
                        "frame {idx} has {} values, expected {}x{}",
                        data.len(),
                        self.n_row,
                        self.n_col
                    ))
                })
            })
            .collect()
    }

    pub fn save(&self, path: &Path) -> Result<(), ArchiveError> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate an archive written by [`save`](Self::save).
    pub fn load(path: &Path) -> Result<Self, ArchiveError> {
        let json = std::fs::read_to_string(path)?;
        let archive: Self = serde_json::from_str(&json)?;

        if archive.label != archive.kind.label() {
            return Err(ArchiveError::Malformed(format!(
                "label {} does not match {} frames",
                archive.label, archive.kind
            )));
        }
        archive.to_frames()?;

        Ok(archive)
    }
}

/// Artifact file name for a frame kind
pub fn archive_file_name(kind: FrameKind) -> &'static str {
    match kind {
        FrameKind::Background => "sample_generator_bg.json",
        FrameKind::Track => "sample_generator_track.json",
    }
}

/// Outcome of saving both frame kinds
#[derive(Debug, Default)]
pub struct SaveReport {
    /// Artifacts written
    pub written: Vec<PathBuf>,
    /// Kinds skipped because nothing had been generated
    pub skipped: Vec<FrameKind>,
}

impl FrameSynthesizer {
    /// Write one frame kind into `dir`.
    ///
    /// Fails with `NothingGenerated` and writes nothing if that sequence is empty.
    pub fn save_kind(&self, dir: &Path, kind: FrameKind) -> Result<PathBuf, ArchiveError> {
        let frames = self.export_kind(kind)?;
        let geometries = match kind {
            FrameKind::Background => &[][..],
            FrameKind::Track => self.track_geometries(),
        };

        let archive = FrameArchive::from_frames(kind, frames, geometries)?;
        std::fs::create_dir_all(dir)?;
        let path = dir.join(archive_file_name(kind));
        archive.save(&path)?;

        log::info!("Saved {} {} frames to {}", frames.len(), kind, path.display());
        Ok(path)
    }

    /// Write every generated frame kind into `dir`.
    ///
    /// An empty sequence is reported in the returned `skipped` list rather
    /// than failing the whole save; I/O and encoding errors still fail.
    pub fn save(&self, dir: &Path) -> Result<SaveReport, ArchiveError> {
        let mut report = SaveReport::default();

        for kind in FrameKind::ALL {
            match self.save_kind(dir, kind) {
                Ok(path) => report.written.push(path),
                Err(ArchiveError::Synthesis(SynthesisError::NothingGenerated(kind))) => {
                    log::error!("Have not generated any {kind} frames, so nothing to save");
                    report.skipped.push(kind);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }
}
