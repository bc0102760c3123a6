//! The `readscore count` command.

use std::path::PathBuf;

use anyhow::Result;

use readscore_core::scoring::word_count;

use super::read_passage;

pub fn execute(passage_path: PathBuf) -> Result<()> {
    let passage = read_passage(&passage_path)?;
    println!("{}", word_count(&passage));
    Ok(())
}
