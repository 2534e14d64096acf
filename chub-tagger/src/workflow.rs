//! Per-file tagging workflow
//!
//! **Algorithm (per image):**
//! 1. Read stored tags; a valid scan UUID in `ImageUniqueID` means the image
//!    is already tagged
//! 2. Identify film/frame from the filename, else ask (unless `auto`)
//! 3. Look up the negative, register a scan, fetch the scan record
//! 4. Translate the record to EXIF tags and diff against stored tags
//! 5. Write the merged tags when confirmed (or `yes`), never on `dry_run`

use crate::client::Catalog;
use crate::error::TaggerResult;
use crate::store::TagStore;
use chub_common::tags::IMAGE_UNIQUE_ID;
use chub_common::{diff, guess_ids, is_valid_uuid, translate, FrameRef, TagDiff};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Changes proposed for one image
pub type TagChanges = TagDiff<String, String>;

/// User interaction needed by the workflow
pub trait Interaction {
    /// Ask for film and frame of a scan whose name gave no hint
    fn ask_frame(&mut self, filename: &str) -> io::Result<FrameRef>;

    /// Show the proposed changes and ask whether to write them
    fn confirm_write(&mut self, image: &Path, changes: &TagChanges) -> io::Result<bool>;
}

/// Command-line switches affecting the workflow
#[derive(Debug, Clone, Copy, Default)]
pub struct TaggerOptions {
    /// Never prompt for film/frame; skip files that don't follow the naming convention
    pub auto: bool,
    /// Accept all changes without asking
    pub yes: bool,
    /// Never write tags
    pub dry_run: bool,
}

/// What happened to one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Image already carries a scan ID
    AlreadyTagged { scan_id: String },
    /// Film/frame could not be determined without prompting
    Unidentified,
    /// Stored tags already match the catalog
    NoChanges { scan_id: String },
    /// Changes found but dry run requested
    DryRun { scan_id: String, changes: usize },
    /// User declined the changes
    Declined { scan_id: String, changes: usize },
    /// Changes written
    Written { scan_id: String, changes: usize },
}

/// Totals over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub tagged: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Drives the workflow over a catalog, a tag store and a user
pub struct Tagger<C, S, I> {
    catalog: C,
    store: S,
    interaction: I,
    options: TaggerOptions,
}

impl<C, S, I> Tagger<C, S, I>
where
    C: Catalog,
    S: TagStore,
    I: Interaction,
{
    pub fn new(catalog: C, store: S, interaction: I, options: TaggerOptions) -> Self {
        Self {
            catalog,
            store,
            interaction,
            options,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn interaction(&self) -> &I {
        &self.interaction
    }

    /// Tag every file, continuing past per-file failures
    pub async fn run(&mut self, files: &[PathBuf]) -> RunSummary {
        let mut summary = RunSummary::default();

        for file in files {
            info!("Processing image {}", file.display());

            match self.process_file(file).await {
                Ok(FileOutcome::Written { scan_id, changes }) => {
                    info!(scan = %scan_id, changes, "Tagged {}", file.display());
                    summary.tagged += 1;
                }
                Ok(outcome) => {
                    info!(?outcome, "Left {} unchanged", file.display());
                    summary.skipped += 1;
                }
                Err(e) => {
                    warn!("Failed to tag {}: {}", file.display(), e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            tagged = summary.tagged,
            skipped = summary.skipped,
            failed = summary.failed,
            "Run complete"
        );
        summary
    }

    /// Run the workflow for a single image
    pub async fn process_file(&mut self, image: &Path) -> TaggerResult<FileOutcome> {
        let existing = self.store.read_tags(image)?;

        if let Some(scan_id) = existing.get(IMAGE_UNIQUE_ID) {
            if is_valid_uuid(scan_id) {
                info!("{} already has a scan ID", image.display());
                return Ok(FileOutcome::AlreadyTagged {
                    scan_id: scan_id.clone(),
                });
            }
        }

        let filename = image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| image.display().to_string());

        let frame = match guess_ids(image) {
            Some(frame) => {
                info!("Deduced film {} and frame {}", frame.film, frame.frame);
                frame
            }
            None if self.options.auto => {
                warn!("{} does not match FILM-FRAME notation, skipping", filename);
                return Ok(FileOutcome::Unidentified);
            }
            None => {
                info!("{} does not match FILM-FRAME notation", filename);
                self.interaction.ask_frame(&filename)?
            }
        };

        let negative = self.catalog.find_negative(&frame).await?;
        info!("{} corresponds to negative {}", filename, negative);

        let scan_id = self.catalog.create_scan(&negative, &filename).await?;
        info!("Created new scan ID {}", scan_id);

        let record = self.catalog.get_scan(&scan_id).await?;
        let exif = translate(&record)?;

        let changes = diff(&existing, &exif);
        if changes.is_empty() {
            return Ok(FileOutcome::NoChanges { scan_id });
        }
        let count = changes.len();

        if self.options.dry_run {
            info!("Dry run, {} change(s) for {} not written", count, filename);
            return Ok(FileOutcome::DryRun {
                scan_id,
                changes: count,
            });
        }

        let accepted = self.options.yes || self.interaction.confirm_write(image, &changes)?;
        if !accepted {
            return Ok(FileOutcome::Declined {
                scan_id,
                changes: count,
            });
        }

        let mut updated = existing;
        changes.apply_to(&mut updated);
        self.store.write_tags(image, &updated)?;

        Ok(FileOutcome::Written {
            scan_id,
            changes: count,
        })
    }
}
