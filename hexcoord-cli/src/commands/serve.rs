use crate::cli::GlobalFlags;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on (overrides config.json)
    #[arg(long, value_name = "ADDR")]
    pub listen: Option<String>,

    /// Directory holding home.html, template.html, style.css and ops.js
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, global: &GlobalFlags) -> anyhow::Result<()> {
    let mut options = global.load_options();
    if let Some(listen) = args.listen {
        options.listen_addr = listen;
    }
    if let Some(assets) = args.assets {
        options.assets_dir = Some(assets);
    }

    hexcoord::server::serve(&options).await?;
    Ok(())
}
