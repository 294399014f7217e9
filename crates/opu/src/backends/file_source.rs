use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::common::{Document, ItemList};

/// 📂 Read the whole input file and pull out its `items`, in order.
///
/// The whole file goes into memory at once. Prow event dumps are megabytes,
/// not terabytes, and the `items` array has to be parsed as one value anyway.
///
/// 💀 Fails with the offending path in the message when the file is missing or
/// unreadable, is not JSON, or has no `items` array of objects.
pub(crate) async fn load_documents(path: &Path) -> Result<Vec<Document>> {
    info!("📂 opening {}", path.display());

    let raw = tokio::fs::read(path).await.context(format!(
        "💀 The door to '{}' would not budge. We knocked. We checked if it existed (it might not). \
         We checked permissions (they might be wrong). The file remains unopened.",
        path.display()
    ))?;

    let item_list: ItemList = serde_json::from_slice(&raw).context(format!(
        "💀 '{}' is not the JSON we were promised. We need an object with an `items` array of objects.",
        path.display()
    ))?;

    info!(items = item_list.items.len(), "📋 parsed json items");
    Ok(item_list.items)
}
