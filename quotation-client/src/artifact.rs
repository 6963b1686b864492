use crate::error::Result;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

pub fn render(bid: &str) -> String {
    format!("Dolar: {}", bid)
}

/// Replaces the file at `path` with a single `Dolar: <bid>` line. The old
/// file is removed before the new one is created, so a failure in between
/// leaves no file at all.
pub async fn save_bid(path: &Path, bid: &str) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let mut file = fs::File::create(path).await?;
    file.write_all(render(bid).as_bytes()).await?;
    file.flush().await?;

    info!("Wrote {}", path.display());
    Ok(())
}
