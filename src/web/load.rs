//! Per-Dataset Load Guard
//!
//! Every dashboard page fetches several independent datasets. This guard is
//! the single place where a failed fetch becomes an empty row set plus an
//! error message, so one failing call never blocks the others from
//! rendering. Pages await their guarded calls jointly with `tokio::join!`.

use std::future::Future;

use crate::backend::BackendError;

/// The outcome of one guarded dataset fetch
pub struct Loaded<T> {
    pub rows: Vec<T>,
    pub error: Option<String>,
}

impl<T> Loaded<T> {
    /// The first row, if any. Summary datasets are single-row.
    pub fn first(&self) -> Option<&T> {
        self.rows.first()
    }
}

/// Await one dataset fetch, absorbing failure into an empty result.
///
/// The error is logged and kept for the page's error banner.
pub async fn load<T, F>(dataset: &str, fut: F) -> Loaded<T>
where
    F: Future<Output = Result<Vec<T>, BackendError>>,
{
    match fut.await {
        Ok(rows) => Loaded { rows, error: None },
        Err(e) => {
            tracing::warn!(
                dataset = dataset,
                error = %e,
                "dataset fetch failed, rendering empty"
            );
            Loaded {
                rows: Vec::new(),
                error: Some(format!("{dataset}: {e}")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn success_keeps_rows() {
        let loaded = load("numbers", async { Ok(vec![1, 2, 3]) }).await;
        assert_eq!(loaded.rows, vec![1, 2, 3]);
        assert!(loaded.error.is_none());
        assert_eq!(loaded.first(), Some(&1));
    }

    #[tokio::test]
    async fn failure_becomes_empty_rows_with_message() {
        let loaded: Loaded<i32> = load("numbers", async {
            Err(BackendError::Api {
                status: 500,
                message: "boom".to_string(),
            })
        })
        .await;

        assert!(loaded.rows.is_empty());
        assert!(loaded.first().is_none());
        let message = loaded.error.unwrap();
        assert!(message.contains("numbers"));
        assert!(message.contains("500"));
    }
}
