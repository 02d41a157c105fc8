//! JSON import/export for card catalogs.
//! A catalog file holds `{ "name": ..., "flashcards": [ ... ] }`; the name is optional.

use crate::error::{Result, StudyError};
use crate::models::Deck;
use log::info;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Writes a deck to a JSON file at the specified path.
pub fn export_catalog(deck: &Deck, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| catalog_io_error(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, deck)?;
    writer.flush().map_err(|e| catalog_io_error(path, e))?;
    info!("Exported {} cards to {}", deck.flashcards.len(), path.display());
    Ok(())
}

/// Reads a catalog file. Card ids must be unique within the file.
pub fn import_catalog(path: impl AsRef<Path>) -> Result<Deck> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| catalog_io_error(path, e))?;
    let deck: Deck = serde_json::from_reader(BufReader::new(file))?;

    if let Some(dup) = duplicate_id(&deck) {
        return Err(StudyError::Catalog(format!(
            "duplicate card id '{}' in {}",
            dup,
            path.display()
        )));
    }

    info!(
        "Loaded deck '{}' with {} cards from {}",
        deck.name,
        deck.flashcards.len(),
        path.display()
    );
    Ok(deck)
}

fn duplicate_id(deck: &Deck) -> Option<String> {
    let mut seen = HashSet::new();
    deck.flashcards
        .iter()
        .find(|c| !seen.insert(c.id.as_str()))
        .map(|c| c.id.clone())
}

fn catalog_io_error(path: &Path, err: std::io::Error) -> StudyError {
    StudyError::Catalog(format!("{}: {}", path.display(), err))
}
