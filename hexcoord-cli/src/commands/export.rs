use crate::cli::GlobalFlags;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file
    #[arg(short, long, default_value = "shapes.xlsx")]
    pub output: PathBuf,
}

pub async fn execute(args: ExportArgs, global: &GlobalFlags) -> anyhow::Result<()> {
    let options = global.load_options();
    let service = global.open_service(&options)?;

    let bytes = tokio::task::spawn_blocking(move || service.export_xlsx()).await??;
    std::fs::write(&args.output, &bytes)?;

    println!("{}", args.output.display());
    Ok(())
}
