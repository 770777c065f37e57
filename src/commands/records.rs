//! Administrative record commands: `show` and `delete`.
use crate::report::to_json;
use crate::store::PredictionRepository;
use anyhow::Result;

pub fn handle_show<S: PredictionRepository>(store: &S, id: u64) -> Result<()> {
    let record = store.get(id)?;
    println!("{}", to_json(&record)?);
    Ok(())
}

pub fn handle_delete<S: PredictionRepository>(store: &mut S, id: u64) -> Result<()> {
    store.delete(id)?;
    println!("Deleted prediction {id}");
    Ok(())
}
