use crate::cli::GlobalFlags;
use clap::Args;

#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Print removed row counts as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: ClearArgs, global: &GlobalFlags) -> anyhow::Result<()> {
    let options = global.load_options();
    let service = global.open_service(&options)?;

    let summary = tokio::task::spawn_blocking(move || service.clear_all()).await??;

    if args.json {
        let out = serde_json::json!({
            "ok": true,
            "shapes": summary.shapes,
            "shape_points": summary.shape_points,
            "points": summary.points,
        });
        println!("{}", out);
    } else {
        println!(
            "Removed {} shapes, {} shape points, {} points",
            summary.shapes, summary.shape_points, summary.points
        );
    }
    Ok(())
}
