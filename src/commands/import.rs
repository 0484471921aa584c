use flexcat::store::WikiStore;

use crate::ImportArgs;

pub fn run(args: &ImportArgs) -> Result<(), anyhow::Error> {
    let config = super::load_config(args.config_file.as_deref())?;
    let store = WikiStore::open(&config.database)?;

    let summary = store.import_file(&args.file)?;
    println!(
        "Imported {} pages, {} category links",
        summary.pages, summary.links
    );

    Ok(())
}
