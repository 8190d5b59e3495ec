use crate::foundation::error::{VttError, VttResult};
use crate::items::StoreItem;
use crate::store::SceneStore;

pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Submit `items` in order, `batch_size` at a time, one batch in flight.
///
/// The first failing batch aborts the rest; batches already submitted stay
/// committed. Returns the number of batches submitted.
pub fn emit_in_batches<S: SceneStore + ?Sized>(
    store: &mut S,
    items: &[StoreItem],
    batch_size: usize,
) -> VttResult<usize> {
    if batch_size == 0 {
        return Err(VttError::validation("batch size must be > 0"));
    }

    let total = items.len().div_ceil(batch_size);
    for (idx, batch) in items.chunks(batch_size).enumerate() {
        tracing::debug!(batch = idx + 1, total, len = batch.len(), "submitting batch");
        store.submit_batch(batch).inspect_err(|e| {
            tracing::warn!(batch = idx + 1, total, error = %e, "batch submission failed");
        })?;
    }
    Ok(total)
}

#[cfg(test)]
#[path = "../../tests/unit/store/batch.rs"]
mod tests;
