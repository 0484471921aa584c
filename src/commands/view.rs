use flexcat::hooks::HookRegistry;
use flexcat::page::ViewRequest;
use flexcat::site::Wiki;

use crate::ViewArgs;

pub fn run(args: &ViewArgs) -> Result<(), anyhow::Error> {
    let config = super::load_config(args.config_file.as_deref())?;
    let wiki = Wiki::open(&config, HookRegistry::new())?;

    let request = ViewRequest {
        diff: args.diff.clone(),
        diffonly: args.diffonly.clone(),
        from: args.from.clone(),
        until: args.until.clone(),
    };

    let page = wiki.view(&args.title, request)?;
    println!("{}", page.html);

    Ok(())
}
