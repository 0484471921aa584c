use flexcat::api::{ApiRequest, CoaRawParams, MODULE_NAME};
use flexcat::hooks::HookRegistry;
use flexcat::site::Wiki;

use crate::QueryArgs;

pub fn run(args: &QueryArgs) -> Result<(), anyhow::Error> {
    let config = super::load_config(args.config_file.as_deref())?;
    let wiki = Wiki::open(&config, HookRegistry::new())?;

    let request = ApiRequest {
        action: Some("query".to_string()),
        list: Some(MODULE_NAME.to_string()),
        params: CoaRawParams {
            title: Some(args.category.clone()),
            answered: args.answered.clone(),
            limit: args.limit.clone(),
        },
    };

    match wiki.api(&request) {
        Ok(body) => {
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
        Err(e) if e.is_usage() => {
            println!("{}", serde_json::to_string_pretty(&e.to_json())?);
            Err(anyhow::anyhow!("{code}: {e}", code = e.code()))
        }
        Err(e) => Err(e.into()),
    }
}
