use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use sen3lst::core::DEFAULT_GCP_STRIDE;
use sen3lst::{BatchConfig, BatchConverter};

#[derive(Parser, Debug)]
#[command(name = "sen3lst")]
#[command(about = "Convert zipped Sentinel-3 L2 LST products into EPSG:4326 GeoTIFFs")]
struct Args {
    /// Directory containing the zipped Sentinel-3 products
    #[arg(long)]
    source_dir: PathBuf,

    /// Directory the products are extracted into and converted in
    #[arg(long)]
    work_dir: PathBuf,

    /// Delete the source directory once the batch has finished
    #[arg(long)]
    purge_source: bool,

    /// Pixel stride between ground control points
    #[arg(long, default_value_t = DEFAULT_GCP_STRIDE)]
    gcp_stride: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = BatchConfig::new(&args.source_dir, &args.work_dir);
    config.purge_source = args.purge_source;
    config.gcp_stride = args.gcp_stride;

    let summary = BatchConverter::new(config).run()?;

    for (name, message) in &summary.extraction.failed {
        log::warn!("Archive {} was skipped: {}", name, message);
    }
    for report in &summary.products {
        match &report.outcome {
            Ok(path) => log::info!("{}: {}", report.product_id, path.display()),
            Err(e) => log::warn!("{}: {}", report.product_id, e),
        }
    }
    log::info!(
        "Batch complete: {} archives extracted ({} failed), {} products converted ({} failed)",
        summary.extraction.extracted.len(),
        summary.extraction.failed.len(),
        summary.converted(),
        summary.failed()
    );

    Ok(())
}
